#[cfg(test)]
#[path = "token_store_test.rs"]
mod tests;

use std::path;

use anyhow::Result;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::configuration::Config;
use crate::configuration::ConfigKey;

/// Persists the bearer token between runs. The token is the only state kept
/// on disk.
#[derive(Clone)]
pub struct TokenStore {
    pub file_path: path::PathBuf,
}

impl Default for TokenStore {
    fn default() -> TokenStore {
        return TokenStore::new(path::PathBuf::from(Config::get(ConfigKey::TokenFile)));
    }
}

impl TokenStore {
    pub fn new(file_path: path::PathBuf) -> TokenStore {
        return TokenStore { file_path };
    }

    pub async fn load(&self) -> Result<Option<String>> {
        if !self.file_path.exists() {
            return Ok(None);
        }

        let token = fs::read_to_string(&self.file_path).await?;
        let token = token.trim();
        if token.is_empty() {
            return Ok(None);
        }

        return Ok(Some(token.to_string()));
    }

    pub async fn save(&self, token: &str) -> Result<()> {
        if let Some(parent) = self.file_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).await?;
            }
        }

        let mut file = fs::File::create(&self.file_path).await?;
        file.write_all(token.trim().as_bytes()).await?;
        file.flush().await?;

        return Ok(());
    }

    pub async fn delete(&self) -> Result<()> {
        if !self.file_path.exists() {
            return Ok(());
        }

        fs::remove_file(&self.file_path).await?;
        return Ok(());
    }
}
