use crate::domain::ports::{ConfigProvider, Storage};
use crate::utils::error::Result;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }

    /// Writes under the configured output directory.
    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        Self::new(config.output_path().to_string())
    }
}

impl Storage for LocalStorage {
    /// 寫入檔案（覆寫既有檔案），回傳完整路徑
    async fn write_file(&self, path: &str, data: &[u8]) -> Result<String> {
        let full_path = Path::new(&self.base_path).join(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(&full_path, data)?;
        Ok(full_path.to_string_lossy().into_owned())
    }
}
