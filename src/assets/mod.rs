//! Asset Retrieval
//!
//! Streams finished audio, WAV and MIDI files to disk.

use std::path::{Path, PathBuf};

use futures_util::StreamExt;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, info};

use crate::error::{Result, TracksError};
use crate::execution::http::build_http_client_from_config;
use crate::types::{ClipResult, HttpConfig};

/// Write buffer size used while streaming a download.
pub const WRITE_BUFFER_SIZE: usize = 8192;

/// Keep alphanumerics, spaces, underscores and hyphens, then trim.
pub fn sanitize_name(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '_' | '-'))
        .collect::<String>()
        .trim()
        .to_string()
}

/// File name for clip `index` of `total` clips, e.g. `Night Drive.mp3` or
/// `Night Drive_2.mp3` when a job produced several clips.
pub fn clip_file_name(clip: &ClipResult, index: usize, total: usize, extension: &str) -> String {
    let mut stem = sanitize_name(clip.display_name());
    if stem.is_empty() {
        stem = sanitize_name(&clip.clip_id);
    }
    if stem.is_empty() {
        stem = "clip".to_string();
    }
    if total > 1 {
        stem = format!("{stem}_{}", index + 1);
    }
    format!("{stem}.{extension}")
}

/// Downloads assets over HTTP.
#[derive(Debug, Clone)]
pub struct AssetDownloader {
    http: reqwest::Client,
}

impl AssetDownloader {
    pub fn new(http: reqwest::Client) -> Self {
        Self { http }
    }

    pub fn from_config(config: &HttpConfig) -> Result<Self> {
        Ok(Self::new(build_http_client_from_config(config)?))
    }

    /// Stream `url` into `destination` and return the number of bytes written.
    ///
    /// Fails with `DownloadError` on any transport error or non-success status.
    /// A partially written file is removed.
    pub async fn fetch(&self, url: &str, destination: &Path) -> Result<u64> {
        info!(url, destination = %destination.display(), "Downloading asset");
        match self.stream_to_file(url, destination).await {
            Ok(written) => {
                info!(url, bytes = written, "Download complete");
                Ok(written)
            }
            Err(error) => {
                if let Err(cleanup) = tokio::fs::remove_file(destination).await {
                    debug!(path = %destination.display(), error = %cleanup, "No partial file removed");
                }
                Err(error)
            }
        }
    }

    /// Download into `directory`, returning the written path.
    pub async fn fetch_into(&self, url: &str, directory: &Path, file_name: &str) -> Result<PathBuf> {
        let path = directory.join(file_name);
        self.fetch(url, &path).await?;
        Ok(path)
    }

    async fn stream_to_file(&self, url: &str, destination: &Path) -> Result<u64> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| TracksError::download(url, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TracksError::download(url, format!("HTTP {status}")));
        }

        let file = tokio::fs::File::create(destination).await.map_err(|e| {
            TracksError::download(url, format!("cannot create {}: {e}", destination.display()))
        })?;
        let mut writer = BufWriter::with_capacity(WRITE_BUFFER_SIZE, file);

        let mut written: u64 = 0;
        let mut body = response.bytes_stream();
        while let Some(chunk) = body.next().await {
            let chunk = chunk.map_err(|e| TracksError::download(url, e.to_string()))?;
            writer
                .write_all(&chunk)
                .await
                .map_err(|e| TracksError::download(url, e.to_string()))?;
            written += chunk.len() as u64;
        }
        writer
            .flush()
            .await
            .map_err(|e| TracksError::download(url, e.to_string()))?;

        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_name() {
        assert_eq!(sanitize_name("My/Song: Final!"), "MySong Final");
        assert_eq!(sanitize_name("  rock_n-roll  "), "rock_n-roll");
        assert_eq!(sanitize_name("///"), "");
    }

    #[test]
    fn test_clip_file_name() {
        let clip = ClipResult {
            clip_id: "abc-123".into(),
            title: "Night Drive?".into(),
            ..Default::default()
        };
        assert_eq!(clip_file_name(&clip, 0, 1, "mp3"), "Night Drive.mp3");
        assert_eq!(clip_file_name(&clip, 1, 2, "mp3"), "Night Drive_2.mp3");

        let untitled = ClipResult {
            clip_id: "abc-123".into(),
            ..Default::default()
        };
        assert_eq!(clip_file_name(&untitled, 0, 1, "wav"), "abc-123.wav");
    }
}
