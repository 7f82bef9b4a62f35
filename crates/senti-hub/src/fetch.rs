//! Model file downloads for local inference.
//!
//! Pulls the ONNX export, tokenizer and config of a hub repository into a
//! local directory. Files that already exist are left alone, so the directory
//! doubles as a cache.

use std::path::{Path, PathBuf};

use senti_core::ApiToken;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use crate::error::HubError;

/// Base URL for hub file downloads.
pub const DEFAULT_HUB_URL: &str = "https://huggingface.co";

/// `(remote path in the repo, local file name)` for every file the local
/// classifier needs.
pub const MODEL_FILES: &[(&str, &str)] = &[
    ("onnx/model.onnx", "model.onnx"),
    ("tokenizer.json", "tokenizer.json"),
    ("config.json", "config.json"),
];

const REVISION: &str = "main";

/// Downloads model files from the hub.
pub struct ModelFetcher {
    client: reqwest::Client,
    hub_url: String,
    token: Option<ApiToken>,
}

impl ModelFetcher {
    pub fn new(hub_url: String, token: Option<ApiToken>) -> Self {
        Self {
            client: reqwest::Client::new(),
            hub_url: hub_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    fn file_url(&self, repo: &str, remote_path: &str) -> String {
        format!("{}/{repo}/resolve/{REVISION}/{remote_path}", self.hub_url)
    }

    /// Ensure every file in [`MODEL_FILES`] exists in `dest_dir`.
    ///
    /// Returns the number of files actually downloaded.
    pub async fn fetch(&self, repo: &str, dest_dir: &Path) -> Result<usize, HubError> {
        tokio::fs::create_dir_all(dest_dir).await?;

        let mut downloaded = 0;
        for &(remote_path, local_name) in MODEL_FILES {
            let dest = dest_dir.join(local_name);
            if tokio::fs::try_exists(&dest).await? {
                debug!(file = %dest.display(), "already present, skipping");
                continue;
            }
            self.download(repo, remote_path, &dest).await?;
            downloaded += 1;
        }

        info!(repo, dir = %dest_dir.display(), downloaded, "model files ready");
        Ok(downloaded)
    }

    async fn download(&self, repo: &str, remote_path: &str, dest: &Path) -> Result<(), HubError> {
        let url = self.file_url(repo, remote_path);
        info!(url = %url, "downloading");

        let mut req = self.client.get(&url);
        if let Some(token) = &self.token {
            req = req.bearer_auth(token.expose());
        }

        let mut resp = req.send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(HubError::Server {
                status: status.as_u16(),
                body,
            });
        }

        // Stream into a sibling `.part` file so an interrupted download is
        // never mistaken for a complete one.
        let part = part_path(dest);
        let mut file = tokio::fs::File::create(&part).await?;
        let mut bytes = 0usize;
        while let Some(chunk) = resp.chunk().await? {
            file.write_all(&chunk).await?;
            bytes += chunk.len();
        }
        file.flush().await?;
        drop(file);
        tokio::fs::rename(&part, dest).await?;

        debug!(file = %dest.display(), bytes, "download complete");
        Ok(())
    }
}

fn part_path(dest: &Path) -> PathBuf {
    let mut name = dest.file_name().unwrap_or_default().to_os_string();
    name.push(".part");
    dest.with_file_name(name)
}
