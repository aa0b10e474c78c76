//! File downloader for HTTP/HTTPS archives.

use std::path::Path;

use crate::http::{HttpClient, HttpError};
use crate::{Result, SnagError};

/// File downloader for HTTP archives
pub struct FileDownloader {
    http_client: HttpClient,
}

impl FileDownloader {
    /// Create a new file downloader
    pub fn new(http_client: HttpClient) -> Self {
        Self { http_client }
    }

    /// Download a URL to the specified path
    pub fn download<F>(&self, url: &str, dest: &Path, progress: Option<F>) -> Result<()>
    where
        F: FnMut(u64, u64),
    {
        log::debug!("Downloading {} to {}", url, dest.display());

        self.http_client
            .download(url, dest, progress)
            .map_err(|e| match e {
                HttpError::HttpStatus { status, url } => SnagError::HttpStatus { status, url },
                other => SnagError::DownloadFailed {
                    url: url.to_string(),
                    reason: other.to_string(),
                },
            })
    }
}
