use crate::core::{Pipeline, StopReason};
use crate::utils::error::Result;
use crate::utils::monitor::{format_seconds, SystemMonitor};

#[derive(Debug, Clone)]
pub struct RunReport {
    pub output_paths: Vec<String>,
    pub record_count: usize,
    pub pages_scraped: u32,
    pub stop_reason: Option<StopReason>,
    pub elapsed_seconds: f64,
}

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, SystemMonitor::new(false))
    }

    /// 使用呼叫端建立的計時器，執行時間從計時器的起點算起
    pub fn new_with_monitoring(pipeline: P, monitor: SystemMonitor) -> Self {
        Self { pipeline, monitor }
    }

    /// 擷取、轉換、輸出。擷取失敗時不會寫出任何檔案
    pub async fn run(&self) -> Result<RunReport> {
        tracing::info!("Starting scrape run");
        self.monitor.log_stats("Start");

        // Extract
        let run = self.pipeline.extract().await?;
        let pages_scraped = run.pages_scraped;
        let stop_reason = run.stop_reason;
        tracing::info!("Extracted {} records from {} pages", run.records.len(), pages_scraped);
        self.monitor.log_stats("Extract");

        // Transform
        let transformed = self.pipeline.transform(run).await?;
        let record_count = transformed.records.len();
        tracing::info!(
            "Transformed {} records into {} columns",
            record_count,
            transformed.table.columns.len()
        );
        self.monitor.log_stats("Transform");

        // Load
        let output_paths = self.pipeline.load(transformed).await?;
        self.monitor.log_stats("Load");
        self.monitor.log_final_stats();

        let elapsed_seconds = self.monitor.elapsed_seconds();
        println!("Script ran in {} seconds.", format_seconds(elapsed_seconds));

        Ok(RunReport {
            output_paths,
            record_count,
            pages_scraped,
            stop_reason,
            elapsed_seconds,
        })
    }
}
