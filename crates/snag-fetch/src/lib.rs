pub mod cli;
pub mod confirm;
pub mod downloader;
pub mod error;
pub mod http;
pub mod install;
pub mod remove;
pub mod source;

pub use confirm::{AutoConfirm, Confirmation};
pub use error::{Result, SnagError};
pub use install::Installer;
pub use remove::remove;
pub use source::SourceKind;
