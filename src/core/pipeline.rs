use crate::adapters::xlsx::write_workbook;
use crate::core::extractor::RecordExtractor;
use crate::core::pagination::PaginationDriver;
use crate::core::table::flatten;
use crate::core::{ConfigProvider, Fetcher, Pipeline, Record, ScrapeRun, Storage, Table, TransformResult};
use crate::utils::error::{Result, ScrapeError};
use chrono::{DateTime, Utc};

pub const SUPPORTED_FORMATS: [&str; 3] = ["xlsx", "csv", "json"];

/// 搜尋結果 → 記錄 → 表格 → 輸出檔案
pub struct ArchivePipeline<F: Fetcher, S: Storage, C: ConfigProvider> {
    fetcher: F,
    storage: S,
    config: C,
    started_at: DateTime<Utc>,
}

impl<F: Fetcher, S: Storage, C: ConfigProvider> ArchivePipeline<F, S, C> {
    pub fn new(fetcher: F, storage: S, config: C) -> Self {
        Self {
            fetcher,
            storage,
            config,
            started_at: Utc::now(),
        }
    }

    fn file_name(&self, extension: &str) -> String {
        format!("{}.{}", self.config.file_stem(), extension)
    }

    async fn save(&self, extension: &str, data: &[u8]) -> Result<String> {
        let path = self.storage.write_file(&self.file_name(extension), data).await?;
        tracing::info!("💾 Wrote {} ({} bytes)", path, data.len());
        println!("Data saved to {}", path);
        Ok(path)
    }
}

#[async_trait::async_trait]
impl<F: Fetcher, S: Storage, C: ConfigProvider> Pipeline for ArchivePipeline<F, S, C> {
    async fn extract(&self) -> Result<ScrapeRun> {
        tracing::info!(
            "🚀 Run started at {}, extracting from {} (page limit: {})",
            self.started_at.format("%Y-%m-%d %H:%M:%S UTC"),
            self.config.search_url(),
            self.config
                .page_limit()
                .map(|l| l.to_string())
                .unwrap_or_else(|| "none".to_string())
        );

        let extractor = RecordExtractor::new(self.config.selectors())?;
        let driver = PaginationDriver::new(
            &self.fetcher,
            &extractor,
            self.config.search_url(),
            self.config.base_url(),
            self.config.page_limit(),
        );
        driver.run().await
    }

    async fn transform(&self, run: ScrapeRun) -> Result<TransformResult> {
        let table = flatten(&run.records);
        tracing::debug!(
            "Flattened {} records into {} columns",
            table.rows.len(),
            table.columns.len()
        );
        Ok(TransformResult {
            records: run.records,
            table,
        })
    }

    async fn load(&self, result: TransformResult) -> Result<Vec<String>> {
        let mut paths = Vec::new();

        for format in self.config.output_formats() {
            let data = match format.as_str() {
                "xlsx" => write_workbook(&result.table)?,
                "csv" => csv_bytes(&result.table)?,
                "json" => json_bytes(&result.records)?,
                other => {
                    return Err(ScrapeError::ExportError {
                        message: format!("Unsupported output format: {}", other),
                    })
                }
            };
            paths.push(self.save(format, &data).await?);
        }

        Ok(paths)
    }
}

fn csv_bytes(table: &Table) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    if !table.columns.is_empty() {
        writer.write_record(&table.columns)?;
        for row in &table.rows {
            writer.write_record(row.iter().map(|cell| cell.as_deref().unwrap_or("")))?;
        }
    }
    writer.into_inner().map_err(|e| ScrapeError::ExportError {
        message: format!("Failed to finish CSV output: {}", e),
    })
}

fn json_bytes(records: &[Record]) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec_pretty(records)?)
}
