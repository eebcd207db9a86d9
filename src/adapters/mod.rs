// Adapters layer: concrete implementations for external systems (http, storage, workbook output).

pub mod http;
pub mod storage;
pub mod xlsx;
