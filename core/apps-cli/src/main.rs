//! mac-apps: report active, idle and inactive desktop applications as JSON.
//!
//! ## Subcommands
//!
//! - `list <all|active|idle|inactive>`: reconcile windows, running processes
//!   and installed bundles, then print the selected set
//!
//! Diagnostics go to stderr (`RUST_LOG`, or `MAC_APPS_DEBUG_LOG=1`).
//! Exit codes: 0 success, 1 encode/write failure, 2 invalid selector.

mod list;
mod logging;

use clap::{Parser, Subcommand};
use mac_apps_core::{RenderOptions, Selector};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mac-apps")]
#[command(about = "Desktop applications CLI tool")]
#[command(version)]
struct Cli {
    /// JSON config file (default: ~/.config/mac-apps/config.json, or $MAC_APPS_CONFIG)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List apps, can be all, inactive, idle, active
    List {
        #[arg(value_name = "APPS")]
        apps: String,

        /// Indent the JSON output
        #[arg(long)]
        pretty: bool,

        /// Sort inactive apps by name, Z to A
        #[arg(long)]
        sort_inactive: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let code = {
        let _logging_guard = logging::init();
        run(cli)
    };
    std::process::exit(code);
}

fn run(cli: Cli) -> i32 {
    match cli.command {
        Commands::List {
            apps,
            pretty,
            sort_inactive,
        } => {
            let options = RenderOptions {
                pretty,
                sort_inactive_desc: sort_inactive,
            };
            match list::run(&apps, options, cli.config.as_deref()) {
                Ok(()) => 0,
                Err(err) => {
                    if let list::ListError::Usage(e) = &err {
                        tracing::debug!(error = %e, "Rejected selector");
                        eprintln!(
                            "ERROR: value can be either: {}",
                            Selector::VALUES.join(", ")
                        );
                    } else {
                        tracing::error!(error = %err, "mac-apps list failed");
                    }
                    err.exit_code()
                }
            }
        }
    }
}
