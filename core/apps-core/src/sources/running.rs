//! Running-process enumeration and pid → bundle resolution.
//!
//! Only the current user's processes count, and only an executable sitting
//! directly in a bundle's `Contents/MacOS` directory makes that bundle
//! running. Command-line shims shipped inside a bundle (for example
//! `Contents/Resources/app/bin/code`) do not.

use super::{ProcessTable, RunningProcess};
use crate::types::ApplicationRecord;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use sysinfo::{ProcessRefreshKind, System, UpdateKind};

/// Process table backed by `sysinfo`.
#[derive(Debug, Clone)]
pub struct SysinfoProcessTable {
    bundle_extension: String,
}

impl SysinfoProcessTable {
    pub fn new(bundle_extension: impl Into<String>) -> Self {
        Self {
            bundle_extension: bundle_extension.into(),
        }
    }
}

impl ProcessTable for SysinfoProcessTable {
    fn running_processes(&self) -> Vec<RunningProcess> {
        let mut sys = System::new();
        sys.refresh_processes_specifics(
            ProcessRefreshKind::new()
                .with_exe(UpdateKind::OnlyIfNotSet)
                .with_user(UpdateKind::OnlyIfNotSet),
        );

        let own_user = sysinfo::get_current_pid()
            .ok()
            .and_then(|pid| sys.process(pid))
            .and_then(|process| process.user_id())
            .cloned();

        let mut processes = sys
            .processes()
            .iter()
            .filter(|(_, process)| same_owner(process.user_id(), own_user.as_ref()))
            .map(|(pid, process)| RunningProcess {
                pid: pid.as_u32(),
                name: Some(process.name().to_string()).filter(|n| !n.is_empty()),
                bundle_path: process
                    .exe()
                    .and_then(|exe| bundle_root(exe, &self.bundle_extension)),
            })
            .collect::<Vec<_>>();
        processes.sort_by_key(|p| p.pid);

        tracing::debug!(count = processes.len(), "Enumerated running processes");
        processes
    }
}

/// A process is kept when it runs as `own`. Without a known own user nothing is filtered.
fn same_owner<U: PartialEq>(owner: Option<&U>, own: Option<&U>) -> bool {
    match own {
        Some(own) => owner == Some(own),
        None => true,
    }
}

/// Returns the bundle whose main executable is `exe`.
///
/// `/Applications/Foo.app/Contents/MacOS/Foo` resolves to `/Applications/Foo.app`;
/// a helper at `Contents/Frameworks/Foo Helper.app/Contents/MacOS/..` resolves to the helper.
/// Anything else under a bundle resolves to nothing.
pub fn bundle_root(exe: &Path, extension: &str) -> Option<PathBuf> {
    let macos = exe.parent()?;
    if macos.file_name()? != "MacOS" {
        return None;
    }
    let contents = macos.parent()?;
    if contents.file_name()? != "Contents" {
        return None;
    }
    let bundle = contents.parent()?;
    bundle
        .extension()
        .is_some_and(|ext| ext == extension)
        .then(|| bundle.to_path_buf())
}

/// Lookup of bundle paths by pid over one process snapshot.
#[derive(Debug, Default, Clone)]
pub struct BundleIndex {
    by_pid: HashMap<u32, String>,
}

impl BundleIndex {
    pub fn from_processes(processes: &[RunningProcess]) -> Self {
        let by_pid = processes
            .iter()
            .filter_map(|p| {
                p.bundle_path
                    .as_ref()
                    .map(|path| (p.pid, path.to_string_lossy().into_owned()))
            })
            .collect();
        Self { by_pid }
    }

    pub fn bundle_path(&self, pid: u32) -> Option<String> {
        self.by_pid.get(&pid).cloned()
    }
}

/// One record per running process, with the bundle path when resolvable.
pub fn fetch_running_applications(processes: &[RunningProcess]) -> Vec<ApplicationRecord> {
    processes
        .iter()
        .map(|p| {
            ApplicationRecord::running(
                p.pid,
                p.name.clone(),
                p.bundle_path
                    .as_ref()
                    .map(|path| path.to_string_lossy().into_owned()),
            )
        })
        .collect()
}
