//! Fetchers for the three application sources.
//!
//! Every fetcher degrades to an empty collection on failure and reports the
//! failure via `tracing::warn!`. The window-query tool and the process table
//! sit behind traits so the pipeline can be driven by fakes in tests.

mod installed;
mod running;
mod window_query;

pub use installed::{fetch_installed_applications, scan_application_dir};
pub use running::{bundle_root, fetch_running_applications, BundleIndex, SysinfoProcessTable};
pub use window_query::{fetch_active_apps, parse_windows, CommandWindowQuery, WindowEntry};

use crate::error::Result;
use std::path::PathBuf;

/// Source of currently visible windows.
pub trait WindowQuery {
    /// Returns the windows currently reported, in the tool's order.
    fn query_windows(&self) -> Result<Vec<WindowEntry>>;
}

/// Source of currently running processes.
pub trait ProcessTable {
    /// Returns a point-in-time list of running processes.
    /// Should NOT fail - return an empty list if enumeration is unavailable.
    fn running_processes(&self) -> Vec<RunningProcess>;
}

/// A running process as seen by the OS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunningProcess {
    pub pid: u32,
    pub name: Option<String>,
    /// Enclosing application bundle of the process executable, if any.
    pub bundle_path: Option<PathBuf>,
}
