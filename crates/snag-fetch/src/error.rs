use thiserror::Error;

#[derive(Error, Debug)]
pub enum SnagError {
    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Network errors
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    // Git errors
    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    // Download errors
    #[error("Download failed for {url}: {reason}")]
    DownloadFailed { url: String, reason: String },

    #[error("HTTP {status}: {url}")]
    HttpStatus { status: u16, url: String },

    // Extraction errors
    #[error("Extraction failed: {0}")]
    ExtractionFailed(String),

    #[error("{path}: illegal file path")]
    PathTraversal { path: String },

    // Installation errors
    #[error("Installation failed: {0}")]
    InstallationFailed(String),
}

pub type Result<T> = std::result::Result<T, SnagError>;
