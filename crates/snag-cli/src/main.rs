mod install;
mod remove;

use clap::{ArgAction, Parser, Subcommand};
use console::style;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "snag")]
#[command(about = "Fetch a package from an archive or repository URL and place it at a path")]
#[command(version)]
struct Cli {
    /// Verbose output (use -vv to increase verbosity)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Install a package
    Install(install::InstallArgs),
    /// Remove a package
    Remove(remove::RemoveArgs),
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Error,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };
    env_logger::Builder::new().filter_level(level).init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let result = match cli.command {
        Commands::Install(args) => install::execute(args),
        Commands::Remove(args) => remove::execute(args),
    };

    match result {
        Ok(code) => ExitCode::from(code as u8),
        Err(e) => {
            eprintln!("{} {:#}", style("Error:").red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
