use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

pub const TITLE_KEY: &str = "Title";
pub const LINK_KEY: &str = "Link";
pub const IMAGE_KEY: &str = "Image";

pub const NO_IMAGE: &str = "No image";
pub const NO_TITLE: &str = "No title";

/// 一筆搜尋結果；除了 Title、Link、Image 之外，欄位由頁面上的 dt/dd 決定
/// 值為 `None` 表示欄位存在但沒有內容，輸出時為空白儲存格
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    pub data: HashMap<String, Option<String>>,
}

impl Record {
    pub fn new(title: impl Into<String>, link: impl Into<String>, image: impl Into<String>) -> Self {
        Self::with_image(title, link, Some(image.into()))
    }

    /// `image` is `None` when the detail page could not be retrieved.
    pub fn with_image(
        title: impl Into<String>,
        link: impl Into<String>,
        image: Option<String>,
    ) -> Self {
        let mut data = HashMap::new();
        data.insert(TITLE_KEY.to_string(), Some(title.into()));
        data.insert(LINK_KEY.to_string(), Some(link.into()));
        data.insert(IMAGE_KEY.to_string(), image);
        Self { data }
    }

    /// Later pairs overwrite earlier ones, including the mandatory keys.
    pub fn merge_details<I>(&mut self, details: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (label, value) in details {
            self.data.insert(label, Some(value));
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.data.get(key).and_then(|value| value.as_deref())
    }

    pub fn title(&self) -> Option<&str> {
        self.get(TITLE_KEY)
    }

    pub fn link(&self) -> Option<&str> {
        self.get(LINK_KEY)
    }

    pub fn image(&self) -> Option<&str> {
        self.get(IMAGE_KEY)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// 單一頁面的擷取結果，空結果代表分頁結束
#[derive(Debug, Clone)]
pub struct PageResult {
    pub page: u32,
    pub records: Vec<Record>,
}

impl PageResult {
    pub fn empty(page: u32) -> Self {
        Self {
            page,
            records: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// A page yielded no records, or could not be fetched.
    Exhausted,
    /// The configured page limit was reached. Zero or negative limits stop before page 1.
    LimitReached(i64),
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::Exhausted => write!(f, "No more results found. Stopping."),
            StopReason::LimitReached(limit) => write!(f, "Reached {} pages. Stopping.", limit),
        }
    }
}

/// 一次執行的狀態：累積的結果、已處理頁數與停止原因
#[derive(Debug, Clone, Default)]
pub struct ScrapeRun {
    pub records: Vec<Record>,
    pub pages_scraped: u32,
    pub stop_reason: Option<StopReason>,
}

impl ScrapeRun {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, page: PageResult) {
        self.pages_scraped = self.pages_scraped.max(page.page);
        self.records.extend(page.records);
    }

    pub fn finish(mut self, reason: StopReason) -> Self {
        self.stop_reason = Some(reason);
        self
    }
}

/// 所有記錄攤平成的表格；欄位為所有記錄鍵值的聯集
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub records: Vec<Record>,
    pub table: Table,
}
