//! Install command - fetch a source and place it at a destination.

use anyhow::{Context, Result};
use clap::Args;
use console::style;
use std::path::PathBuf;

use snag_fetch::cli::{format_bytes, ProgressManager};
use snag_fetch::downloader::GitDownloader;
use snag_fetch::{AutoConfirm, Installer, SourceKind};

#[derive(Args, Debug)]
pub struct InstallArgs {
    /// Archive URL (.zip, .tar.gz, .tgz) or repository URL
    #[arg(value_name = "SOURCE")]
    pub source: String,

    /// Path the fetched content is placed at
    #[arg(value_name = "DESTINATION")]
    pub destination: PathBuf,

    /// SSH key used when cloning a private repository
    #[arg(long, value_name = "KEY")]
    pub ssh_key: Option<PathBuf>,

    /// Disable the download progress bar
    #[arg(long)]
    pub no_progress: bool,
}

pub fn execute(args: InstallArgs) -> Result<i32> {
    let mut installer = Installer::new().context("Failed to set up the installer")?;
    if let Some(ref key) = args.ssh_key {
        installer = installer.with_git(GitDownloader::new().with_ssh_key(key));
    }

    // Repository clones stream their own progress to stdout
    let kind = SourceKind::classify(&args.source);
    let show_bar = !args.no_progress && kind != SourceKind::Repository;

    let progress = ProgressManager::new(show_bar);
    let bar = progress.create_download_bar(&args.source);

    let result = installer.install(
        &args.source,
        &args.destination,
        &AutoConfirm,
        Some(|downloaded, total| {
            if total > 0 {
                bar.set_length(total);
            } else {
                bar.set_message(format_bytes(downloaded));
            }
            bar.set_position(downloaded);
        }),
    );
    bar.finish_and_clear();

    result.with_context(|| format!("Failed to install {}", args.source))?;

    println!(
        "{} Installed {} to {}",
        style("Success:").green().bold(),
        args.source,
        args.destination.display()
    );
    Ok(0)
}
