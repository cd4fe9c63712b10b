//! `list` subcommand: reconcile and print one JSON line.
//!
//! ## Usage
//!
//! ```bash
//! mac-apps list all
//! mac-apps list idle --pretty
//! mac-apps list inactive --sort-inactive
//! ```

use mac_apps_core::{
    load_config_or_default, render, AppInventory, AppsError, RenderOptions, Selector,
};
use std::io::{self, Write};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ListError {
    #[error("{0}")]
    Usage(#[source] AppsError),

    #[error("{0}")]
    Encode(#[source] AppsError),

    #[error("Failed to write output: {0}")]
    Io(#[from] io::Error),
}

impl ListError {
    pub fn exit_code(&self) -> i32 {
        match self {
            ListError::Usage(_) => 2,
            ListError::Encode(_) | ListError::Io(_) => 1,
        }
    }
}

pub fn run(
    apps: &str,
    options: RenderOptions,
    config_path: Option<&Path>,
) -> Result<(), ListError> {
    // Validate before touching any source so a typo never runs the window query.
    let selector: Selector = apps.parse().map_err(ListError::Usage)?;

    let config = load_config_or_default(config_path);
    let report = AppInventory::from_config(&config).collect();

    let text = render(selector, &report, options).map_err(ListError::Encode)?;

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", text)?;
    stdout.flush()?;
    Ok(())
}
