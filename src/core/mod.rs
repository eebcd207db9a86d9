pub mod document;
pub mod etl;
pub mod extractor;
pub mod image;
pub mod pagination;
pub mod pipeline;
pub mod table;

pub use crate::domain::model::{PageResult, Record, ScrapeRun, StopReason, Table, TransformResult};
pub use crate::domain::ports::{ConfigProvider, Fetcher, Pipeline, Storage};
pub use crate::utils::error::Result;
