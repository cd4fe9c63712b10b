//! Active windows from the external window-query tool (yabai by default).

use super::{BundleIndex, WindowQuery};
use crate::command::ExternalCommand;
use crate::config::WindowQueryConfig;
use crate::error::{AppsError, Result};
use crate::types::ApplicationRecord;
use serde::Deserialize;

/// One window as reported by the tool. Extra fields in the tool output are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WindowEntry {
    pub id: i64,
    pub pid: u32,
    pub app: String,
    pub title: String,
}

/// Window query that shells out to a configured command.
#[derive(Debug, Clone)]
pub struct CommandWindowQuery {
    command: ExternalCommand,
}

impl CommandWindowQuery {
    pub fn new(command: ExternalCommand) -> Self {
        Self { command }
    }

    pub fn from_config(config: &WindowQueryConfig) -> Self {
        Self::new(ExternalCommand::new(
            config.program.clone(),
            config.args.clone(),
            config.timeout(),
        ))
    }
}

impl WindowQuery for CommandWindowQuery {
    fn query_windows(&self) -> Result<Vec<WindowEntry>> {
        let output = self.command.run()?;
        let stderr = output.stderr_lossy();

        if !output.status.success() && output.stdout.iter().all(u8::is_ascii_whitespace) {
            return Err(AppsError::CommandFailed {
                command: self.command.display(),
                details: format!("exited with {}: {}", output.status, stderr),
            });
        }
        if !stderr.is_empty() {
            tracing::debug!(
                command = %self.command.display(),
                stderr = %stderr,
                "Window query wrote to stderr"
            );
        }

        parse_windows(&output.stdout)
    }
}

/// Parses the tool's JSON array output.
pub fn parse_windows(bytes: &[u8]) -> Result<Vec<WindowEntry>> {
    serde_json::from_slice(bytes).map_err(|e| AppsError::Json {
        context: "decoding window query output".to_string(),
        source: e,
    })
}

/// Fetches active windows as records, resolving each pid to its bundle path.
/// Any failure is logged and yields an empty list.
pub fn fetch_active_apps(query: &dyn WindowQuery, index: &BundleIndex) -> Vec<ApplicationRecord> {
    match query.query_windows() {
        Ok(windows) => windows
            .into_iter()
            .map(|w| {
                let path = index.bundle_path(w.pid);
                ApplicationRecord::window(w.id, w.pid, w.app, w.title, path)
            })
            .collect(),
        Err(err) => {
            tracing::warn!(error = %err, "Failed to query active windows");
            Vec::new()
        }
    }
}
