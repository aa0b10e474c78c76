//! Remove command - delete an installed path.

use anyhow::{Context, Result};
use clap::Args;
use console::style;
use std::path::PathBuf;

use snag_fetch::{AutoConfirm, Confirmation};

#[derive(Args, Debug)]
pub struct RemoveArgs {
    /// Path to delete
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Delete without asking for confirmation
    #[arg(short = 'y', long)]
    pub yes: bool,
}

/// Interactive confirmation on the terminal, defaulting to "no".
struct TermConfirm;

impl Confirmation for TermConfirm {
    fn confirm(&self, question: &str) -> bool {
        dialoguer::Confirm::new()
            .with_prompt(question)
            .default(false)
            .interact()
            .unwrap_or(false)
    }
}

pub fn execute(args: RemoveArgs) -> Result<i32> {
    let confirm: Box<dyn Confirmation> = if args.yes {
        Box::new(AutoConfirm)
    } else {
        Box::new(TermConfirm)
    };

    let existed = args.path.exists();

    snag_fetch::remove(&args.path, confirm.as_ref())
        .with_context(|| format!("Failed to remove {}", args.path.display()))?;

    if existed && args.path.exists() {
        // Still there: the prompt was declined
        println!("{}", style("Command aborted").red());
        return Ok(1);
    }

    println!(
        "{} Removed {}",
        style("Success:").green().bold(),
        args.path.display()
    );
    Ok(0)
}
