//! Blocking HTTP client for archive downloads.
//!
//! This is a thin wrapper around `reqwest`'s blocking client with a custom
//! User-Agent and streaming file downloads with progress reporting. Requests
//! carry no timeout: a hung transfer blocks the invocation. Response bodies
//! are written to disk as-is; gzip layers are stripped by the caller, never
//! by the transport.

use std::io::Read;
use std::path::Path;

use reqwest::blocking::{Client, Response};
use thiserror::Error;

const DEFAULT_USER_AGENT: &str = concat!("snag/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP {status}: {url}")]
    HttpStatus { status: u16, url: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub struct HttpClient {
    client: Client,
    user_agent: String,
}

impl HttpClient {
    pub fn new() -> Result<Self, reqwest::Error> {
        Self::with_config(HttpClientConfig::default())
    }

    pub fn with_config(config: HttpClientConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self {
            client,
            user_agent: config.user_agent,
        })
    }

    /// Perform a GET request, turning non-success statuses into errors.
    pub fn get(&self, url: &str) -> Result<Response, HttpError> {
        let response = self.client.get(url).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(HttpError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response)
    }

    /// Download a URL to a file, streaming the body to disk.
    pub fn download<F>(&self, url: &str, dest: &Path, mut progress: Option<F>) -> Result<(), HttpError>
    where
        F: FnMut(u64, u64),
    {
        let mut response = self.get(url)?;

        let total_size = response.content_length().unwrap_or(0);

        if let Some(parent) = dest.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let mut file = std::fs::File::create(dest)?;
        let mut downloaded: u64 = 0;
        let mut buf = [0u8; 8192];

        loop {
            let read = response.read(&mut buf)?;
            if read == 0 {
                break;
            }
            std::io::Write::write_all(&mut file, &buf[..read])?;
            downloaded += read as u64;

            if let Some(ref mut callback) = progress {
                callback(downloaded, total_size);
            }
        }

        Ok(())
    }

    /// Get the configured user agent
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new().expect("Failed to create default HTTP client")
    }
}

#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl HttpClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user_agent(mut self, user_agent: String) -> Self {
        self.user_agent = user_agent;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = HttpClient::new().unwrap();
        assert!(client.user_agent().starts_with("snag/"));
    }

    #[test]
    fn test_custom_user_agent() {
        let config = HttpClientConfig::new().with_user_agent("test-agent/1.0".to_string());
        let client = HttpClient::with_config(config).unwrap();
        assert_eq!(client.user_agent(), "test-agent/1.0");
    }

    #[test]
    fn test_download_from_local_server() {
        use std::io::Cursor;

        let server = tiny_http::Server::http("127.0.0.1:0").unwrap();
        let port = server.server_addr().to_ip().unwrap().port();

        let handle = std::thread::spawn(move || {
            let request = server.recv().unwrap();
            let response = tiny_http::Response::new(
                tiny_http::StatusCode(200),
                vec![],
                Cursor::new(b"hello".to_vec()),
                Some(5),
                None,
            );
            request.respond(response).unwrap();
        });

        let temp_dir = tempfile::TempDir::new().unwrap();
        let dest = temp_dir.path().join("payload.bin");

        let client = HttpClient::new().unwrap();
        let mut seen = 0u64;
        client
            .download(
                &format!("http://127.0.0.1:{}/payload.bin", port),
                &dest,
                Some(|downloaded, _total| seen = downloaded),
            )
            .unwrap();

        assert_eq!(std::fs::read(&dest).unwrap(), b"hello");
        assert_eq!(seen, 5);
        handle.join().unwrap();
    }

    #[test]
    fn test_get_reports_http_status() {
        let server = tiny_http::Server::http("127.0.0.1:0").unwrap();
        let port = server.server_addr().to_ip().unwrap().port();

        let handle = std::thread::spawn(move || {
            let request = server.recv().unwrap();
            let response = tiny_http::Response::from_string("not here")
                .with_status_code(tiny_http::StatusCode(404));
            request.respond(response).unwrap();
        });

        let client = HttpClient::new().unwrap();
        let err = client
            .get(&format!("http://127.0.0.1:{}/missing", port))
            .unwrap_err();

        match err {
            HttpError::HttpStatus { status, .. } => assert_eq!(status, 404),
            other => panic!("unexpected error: {}", other),
        }
        handle.join().unwrap();
    }
}
