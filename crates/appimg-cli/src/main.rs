use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

use appimg_core::AppImgError;
use appimg_registry::Selector;
use clap::{Parser, Subcommand};

mod completion;
mod dispatch;
mod render;

use completion::CliCompletionShell;
use dispatch::run_cli;
use render::{format_error_lines, resolve_output_style, OutputStyle};

const LOG_ENV: &str = "APPIMG_LOG";

#[derive(Parser, Debug)]
#[command(name = "appimg")]
#[command(about = "A simple CLI to manage AppImage applications", long_about = None)]
#[command(version, arg_required_else_help = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List all installed AppImages
    List,
    /// Show details of a specific AppImage
    Show {
        /// Index from `list`, or a record id
        target: Selector,
    },
    /// Delete a specific AppImage
    Delete {
        /// Index from `list`, or a record id
        target: Selector,
    },
    /// Install an AppImage
    Install {
        /// The file path of the AppImage to be installed
        bundle_path: PathBuf,
    },
    /// Print the directories appimg reads and writes
    Paths,
    /// Print a shell completion script
    Completions { shell: CliCompletionShell },
}

fn main() -> ExitCode {
    init_logging();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return ExitCode::from(u8::try_from(err.exit_code()).unwrap_or(2));
        }
    };

    let style = current_output_style();
    match run_cli(cli, style) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            for line in format_error_lines(&err, style) {
                eprintln!("{line}");
            }
            ExitCode::from(exit_code_for(&err))
        }
    }
}

fn init_logging() {
    let env = env_logger::Env::new().filter_or(LOG_ENV, "warn");
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .try_init();
}

fn current_output_style() -> OutputStyle {
    resolve_output_style(
        std::io::stdout().is_terminal(),
        std::env::var_os("NO_COLOR").is_some(),
    )
}

/// 0 is success; typed failures carry their own code, anything else is 1.
fn exit_code_for(err: &anyhow::Error) -> u8 {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<AppImgError>())
        .map(AppImgError::exit_code)
        .unwrap_or(1)
}
