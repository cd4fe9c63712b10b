//! Fetch → reconcile pipeline.
//!
//! One `collect` call is one point-in-time snapshot; nothing is cached
//! between calls.

use crate::config::AppsConfig;
use crate::reconcile::{reconcile, AppsReport};
use crate::sources::{
    fetch_active_apps, fetch_installed_applications, fetch_running_applications, BundleIndex,
    CommandWindowQuery, ProcessTable, SysinfoProcessTable, WindowQuery,
};
use crate::types::ApplicationRecord;
use std::path::PathBuf;

/// The three fetched collections, before reconciliation.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub active: Vec<ApplicationRecord>,
    pub installed: Vec<ApplicationRecord>,
    pub running: Vec<ApplicationRecord>,
}

impl Snapshot {
    pub fn reconcile(self) -> AppsReport {
        reconcile(self.active, self.installed, self.running)
    }
}

#[derive(Debug)]
pub struct AppInventory<W: WindowQuery, P: ProcessTable> {
    windows: W,
    processes: P,
    application_dirs: Vec<PathBuf>,
    bundle_extension: String,
}

impl AppInventory<CommandWindowQuery, SysinfoProcessTable> {
    /// Inventory backed by the configured window-query command and the OS process table.
    pub fn from_config(config: &AppsConfig) -> Self {
        Self::new(
            CommandWindowQuery::from_config(&config.window_query),
            SysinfoProcessTable::new(config.bundle_extension.clone()),
            config.application_dirs.clone(),
            config.bundle_extension.clone(),
        )
    }
}

impl<W: WindowQuery, P: ProcessTable> AppInventory<W, P> {
    pub fn new(
        windows: W,
        processes: P,
        application_dirs: Vec<PathBuf>,
        bundle_extension: String,
    ) -> Self {
        Self {
            windows,
            processes,
            application_dirs,
            bundle_extension,
        }
    }

    /// Fetches all three sources. The process table is read first so that
    /// window pids resolve against the same snapshot.
    pub fn fetch(&self) -> Snapshot {
        let processes = self.processes.running_processes();
        let index = BundleIndex::from_processes(&processes);

        let running = fetch_running_applications(&processes);
        let active = fetch_active_apps(&self.windows, &index);
        let installed =
            fetch_installed_applications(&self.application_dirs, &self.bundle_extension);

        tracing::debug!(
            active = active.len(),
            installed = installed.len(),
            running = running.len(),
            "Fetched application sources"
        );

        Snapshot {
            active,
            installed,
            running,
        }
    }

    pub fn collect(&self) -> AppsReport {
        self.fetch().reconcile()
    }
}
