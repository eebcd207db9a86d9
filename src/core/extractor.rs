use crate::core::document::{
    attr, class_selector, find_first, parse_document, parse_fragment, selector, stripped_text,
};
use crate::domain::model::{Record, NO_TITLE};
use crate::utils::error::{Result, ScrapeError};
use scraper::{ElementRef, Selector};
use serde::{Deserialize, Serialize};

/// 搜尋結果頁面的 CSS class 名稱，預設值對應 Historic England 的標記
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    pub result_container: String,
    pub image_container: String,
    pub thumbnail: String,
    pub thumbnail_attribute: String,
    pub details_container: String,
    pub title_container: String,
    pub detail_list: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            result_container: "archive-search-results-list__result-container".to_string(),
            image_container: "archive-search-results-list__image-container".to_string(),
            thumbnail: "archive-record__thumbnail".to_string(),
            thumbnail_attribute: "data-url".to_string(),
            details_container: "archive-search-results-list__details-container".to_string(),
            title_container: "archive-search-result__title-container".to_string(),
            detail_list: "archive-record__dl".to_string(),
        }
    }
}

/// One result container, before its image has been resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultItem {
    pub link: String,
    pub image_path: Option<String>,
    pub title: String,
    pub details: Vec<(String, String)>,
}

impl ResultItem {
    /// 組合成記錄：Title、Link、Image 先寫入，再合併 dt/dd 欄位
    pub fn into_record(self, base_url: &str, image: Option<String>) -> Record {
        let mut record = Record::with_image(self.title, absolute_url(base_url, &self.link), image);
        record.merge_details(self.details);
        record
    }
}

/// Prefixes a site-relative path with the archive origin. Absolute URLs pass through.
pub fn absolute_url(base_url: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    let base = base_url.trim_end_matches('/');
    if path.starts_with('/') {
        format!("{}{}", base, path)
    } else {
        format!("{}/{}", base, path)
    }
}

pub struct RecordExtractor {
    result_container: Selector,
    anchor: Selector,
    image_container: Selector,
    noscript: Selector,
    thumbnail: Selector,
    thumbnail_attribute: String,
    details_container: Selector,
    title_container: Selector,
    detail_list: Selector,
    term: Selector,
    description: Selector,
}

impl RecordExtractor {
    pub fn new(config: &SelectorConfig) -> Result<Self> {
        Ok(Self {
            result_container: class_selector("div", &config.result_container)?,
            anchor: selector("a")?,
            image_container: class_selector("div", &config.image_container)?,
            noscript: selector("noscript")?,
            thumbnail: class_selector("div", &config.thumbnail)?,
            thumbnail_attribute: config.thumbnail_attribute.clone(),
            details_container: class_selector("div", &config.details_container)?,
            title_container: class_selector("div", &config.title_container)?,
            detail_list: class_selector("dl", &config.detail_list)?,
            term: selector("dt")?,
            description: selector("dd")?,
        })
    }

    /// 解析一個搜尋結果頁面，每個結果容器產生一個項目
    ///
    /// A container without an anchor (or an anchor without `href`) fails the
    /// whole page.
    pub fn extract_items(&self, html: &str, page: u32) -> Result<Vec<ResultItem>> {
        let document = parse_document(html);
        let items = document
            .select(&self.result_container)
            .map(|container| self.extract_item(container, page))
            .collect::<Result<Vec<_>>>()?;
        tracing::debug!("Page {}: {} result containers", page, items.len());
        Ok(items)
    }

    fn extract_item(&self, container: ElementRef<'_>, page: u32) -> Result<ResultItem> {
        let anchor =
            find_first(container, &self.anchor).ok_or_else(|| ScrapeError::MissingElementError {
                page,
                element: "a".to_string(),
            })?;
        let link = attr(anchor, "href")
            .ok_or_else(|| ScrapeError::MissingAttributeError {
                page,
                element: "a".to_string(),
                attribute: "href".to_string(),
            })?
            .to_string();

        let image_path = self.thumbnail_path(container);

        let (title, details) = match find_first(container, &self.details_container) {
            Some(details_container) => (
                self.title(details_container),
                self.details(details_container),
            ),
            None => (NO_TITLE.to_string(), Vec::new()),
        };

        Ok(ResultItem {
            link,
            image_path,
            title,
            details,
        })
    }

    fn thumbnail_path(&self, container: ElementRef<'_>) -> Option<String> {
        let image_container = find_first(container, &self.image_container)?;
        let noscript = find_first(image_container, &self.noscript)?;

        if let Some(thumbnail) = find_first(noscript, &self.thumbnail) {
            return attr(thumbnail, &self.thumbnail_attribute).map(str::to_string);
        }

        // With scripting enabled the parser keeps <noscript> content as raw text.
        let raw: String = noscript.text().collect();
        let fragment = parse_fragment(&raw);
        let thumbnail = fragment.select(&self.thumbnail).next()?;
        attr(thumbnail, &self.thumbnail_attribute).map(str::to_string)
    }

    fn title(&self, details_container: ElementRef<'_>) -> String {
        find_first(details_container, &self.title_container)
            .and_then(|title_container| find_first(title_container, &self.anchor))
            .map(stripped_text)
            .unwrap_or_else(|| NO_TITLE.to_string())
    }

    fn details(&self, details_container: ElementRef<'_>) -> Vec<(String, String)> {
        details_container
            .select(&self.detail_list)
            .filter_map(|dl| {
                let term = find_first(dl, &self.term)?;
                let description = find_first(dl, &self.description)?;
                Some((stripped_text(term), stripped_text(description)))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{IMAGE_KEY, LINK_KEY, NO_IMAGE, TITLE_KEY};

    const BASE: &str = "https://historicengland.org.uk";

    fn container(inner: &str) -> String {
        format!(
            r#"<div class="archive-search-results-list__result-container">{}</div>"#,
            inner
        )
    }

    fn full_container(link: &str, title: &str, data_url: &str, pairs: &[(&str, &str)]) -> String {
        let dls: String = pairs
            .iter()
            .map(|(dt, dd)| {
                format!(
                    r#"<dl class="archive-record__dl"><dt>{}</dt><dd>{}</dd></dl>"#,
                    dt, dd
                )
            })
            .collect();
        container(&format!(
            r#"<a href="{link}" class="archive-search-results-list__link">
                 <div class="archive-search-results-list__image-container">
                   <noscript><div class="archive-record__thumbnail" data-url="{data_url}"></div></noscript>
                 </div>
               </a>
               <div class="archive-search-results-list__details-container">
                 <div class="archive-search-result__title-container"><a href="{link}"> {title} </a></div>
                 {dls}
               </div>"#
        ))
    }

    fn page(containers: &[String]) -> String {
        format!(
            "<html><body><div class=\"archive-search-results-list\">{}</div></body></html>",
            containers.concat()
        )
    }

    fn extractor() -> RecordExtractor {
        RecordExtractor::new(&SelectorConfig::default()).unwrap()
    }

    #[test]
    fn test_one_item_per_container() {
        let html = page(&[
            full_container("/images-books/photos/item/JLP01/01/001", "Kenwood House", "/img/1", &[]),
            full_container("/images-books/photos/item/JLP01/01/002", "Iveagh Bequest", "/img/2", &[]),
            full_container("/images-books/photos/item/JLP01/01/003", "Hampstead", "/img/3", &[]),
        ]);

        let items = extractor().extract_items(&html, 1).unwrap();

        assert_eq!(items.len(), 3);
        assert_eq!(items[0].title, "Kenwood House");
        assert_eq!(items[0].link, "/images-books/photos/item/JLP01/01/001");
        assert_eq!(items[0].image_path.as_deref(), Some("/img/1"));
        assert_eq!(items[2].title, "Hampstead");
    }

    #[test]
    fn test_page_without_containers_is_empty() {
        let html = "<html><body><p>No results match your search</p></body></html>";
        let items = extractor().extract_items(html, 7).unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn test_missing_noscript_means_no_image() {
        let html = page(&[container(
            r#"<a href="/item/1"></a>
               <div class="archive-search-results-list__image-container"><img src="/lazy.jpg"></div>"#,
        )]);

        let items = extractor().extract_items(&html, 1).unwrap();
        assert_eq!(items[0].image_path, None);

        let record = items[0].clone().into_record(BASE, Some(NO_IMAGE.to_string()));
        assert_eq!(record.image(), Some(NO_IMAGE));
    }

    #[test]
    fn test_thumbnail_without_data_url_means_no_image() {
        let html = page(&[container(
            r#"<a href="/item/1"></a>
               <div class="archive-search-results-list__image-container">
                 <noscript><div class="archive-record__thumbnail"></div></noscript>
               </div>"#,
        )]);

        let items = extractor().extract_items(&html, 1).unwrap();
        assert_eq!(items[0].image_path, None);
    }

    #[test]
    fn test_missing_details_container_uses_no_title() {
        let html = page(&[container(r#"<a href="/item/9">thumbnail only</a>"#)]);

        let items = extractor().extract_items(&html, 1).unwrap();
        assert_eq!(items[0].title, NO_TITLE);
        assert!(items[0].details.is_empty());
    }

    #[test]
    fn test_title_container_without_anchor_uses_no_title() {
        let html = page(&[container(
            r#"<a href="/item/9"></a>
               <div class="archive-search-results-list__details-container">
                 <div class="archive-search-result__title-container"><span>plain</span></div>
               </div>"#,
        )]);

        let items = extractor().extract_items(&html, 1).unwrap();
        assert_eq!(items[0].title, NO_TITLE);
    }

    #[test]
    fn test_detail_pairs_are_collected_and_incomplete_pairs_skipped() {
        let html = page(&[container(
            r#"<a href="/item/1"></a>
               <div class="archive-search-results-list__details-container">
                 <dl class="archive-record__dl"><dt> Date </dt><dd> 1947 </dd></dl>
                 <dl class="archive-record__dl"><dt>Orphan label</dt></dl>
                 <dl class="archive-record__dl"><dt>Reference</dt><dd>JLP01/01/001</dd></dl>
                 <dl class="other-list"><dt>Ignored</dt><dd>x</dd></dl>
               </div>"#,
        )]);

        let items = extractor().extract_items(&html, 1).unwrap();
        assert_eq!(
            items[0].details,
            vec![
                ("Date".to_string(), "1947".to_string()),
                ("Reference".to_string(), "JLP01/01/001".to_string()),
            ]
        );
    }

    #[test]
    fn test_duplicate_labels_keep_last_value() {
        let html = page(&[full_container(
            "/item/1",
            "Kenwood",
            "/img/1",
            &[("Date", "1947"), ("Photographer", "John Laing"), ("Date", "1948")],
        )]);

        let items = extractor().extract_items(&html, 1).unwrap();
        let record = items[0].clone().into_record(BASE, Some(NO_IMAGE.to_string()));

        assert_eq!(record.get("Date"), Some("1948"));
        assert_eq!(record.get("Photographer"), Some("John Laing"));
        assert_eq!(record.len(), 5);
    }

    #[test]
    fn test_detail_label_can_overwrite_mandatory_key() {
        let html = page(&[full_container("/item/1", "Kenwood", "/img/1", &[("Title", "Catalogue title")])]);

        let items = extractor().extract_items(&html, 1).unwrap();
        let record = items[0].clone().into_record(BASE, Some("page text".to_string()));

        assert_eq!(record.get(TITLE_KEY), Some("Catalogue title"));
        assert_eq!(record.get(IMAGE_KEY), Some("page text"));
    }

    #[test]
    fn test_missing_anchor_fails_the_page() {
        let html = page(&[
            full_container("/item/1", "Fine", "/img/1", &[]),
            container(r#"<div class="archive-search-results-list__details-container">no link</div>"#),
        ]);

        let err = extractor().extract_items(&html, 4).unwrap_err();
        match err {
            ScrapeError::MissingElementError { page, element } => {
                assert_eq!(page, 4);
                assert_eq!(element, "a");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_anchor_without_href_fails_the_page() {
        let html = page(&[container(r#"<a name="top">no href</a>"#)]);
        let err = extractor().extract_items(&html, 2).unwrap_err();
        assert!(matches!(err, ScrapeError::MissingAttributeError { page: 2, .. }));
    }

    #[test]
    fn test_link_is_made_absolute() {
        let html = page(&[full_container("/foo", "Kenwood", "/img/1", &[])]);
        let items = extractor().extract_items(&html, 1).unwrap();
        let record = items[0].clone().into_record(BASE, Some(NO_IMAGE.to_string()));
        assert_eq!(record.get(LINK_KEY), Some("https://historicengland.org.uk/foo"));
    }

    #[test]
    fn test_absolute_url() {
        assert_eq!(absolute_url(BASE, "/foo"), "https://historicengland.org.uk/foo");
        assert_eq!(absolute_url("https://historicengland.org.uk/", "/foo"), "https://historicengland.org.uk/foo");
        assert_eq!(absolute_url(BASE, "foo"), "https://historicengland.org.uk/foo");
        assert_eq!(absolute_url(BASE, "https://other.org/x"), "https://other.org/x");
    }

    #[test]
    fn test_custom_selectors() {
        let config = SelectorConfig {
            result_container: "hit".to_string(),
            ..SelectorConfig::default()
        };
        let html = r#"<div class="hit"><a href="/a"></a></div><div class="archive-search-results-list__result-container"><a href="/b"></a></div>"#;

        let items = RecordExtractor::new(&config).unwrap().extract_items(html, 1).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].link, "/a");
    }
}
