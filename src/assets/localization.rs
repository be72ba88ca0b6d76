use std::path::PathBuf;

use async_trait::async_trait;

use super::LocalizationSource;

/// String table read from a UTF-8 text file, one string per line.
///
/// The table identifier is ignored: the file is the table.
#[derive(Debug, Clone)]
pub struct LineFileStrings {
    path: PathBuf,
}

impl LineFileStrings {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl LocalizationSource for LineFileStrings {
    async fn strings(&self, table: &str) -> Option<Vec<String>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => Some(contents.lines().map(str::to_owned).collect()),
            Err(e) => {
                tracing::warn!(
                    table,
                    path = %self.path.display(),
                    error = %e,
                    "Failed to read localized strings"
                );
                None
            }
        }
    }
}
