//! Selection and JSON rendering of a reconciliation report.

use crate::error::{AppsError, Result};
use crate::reconcile::{AppSet, AppsReport};
use crate::types::ApplicationRecord;
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Which part of the report to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector {
    All,
    Active,
    Idle,
    Inactive,
}

impl Selector {
    pub const VALUES: [&'static str; 4] = ["all", "inactive", "idle", "active"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Selector::All => "all",
            Selector::Active => "active",
            Selector::Idle => "idle",
            Selector::Inactive => "inactive",
        }
    }
}

impl FromStr for Selector {
    type Err = AppsError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "all" => Ok(Selector::All),
            "active" => Ok(Selector::Active),
            "idle" => Ok(Selector::Idle),
            "inactive" => Ok(Selector::Inactive),
            other => Err(AppsError::InvalidSelector(other.to_string())),
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output formatting options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    pub pretty: bool,
    /// Order `inactive` by name, Z to A. Records without a name go last.
    pub sort_inactive_desc: bool,
}

#[derive(Serialize)]
struct AllView<'a> {
    active: &'a [ApplicationRecord],
    idle: &'a AppSet,
    inactive: &'a [&'a ApplicationRecord],
}

/// Renders the selected part of `report` as JSON text (no trailing newline).
pub fn render(selector: Selector, report: &AppsReport, options: RenderOptions) -> Result<String> {
    let inactive = inactive_view(&report.inactive, options.sort_inactive_desc);
    match selector {
        Selector::All => encode(
            &AllView {
                active: &report.active,
                idle: &report.idle,
                inactive: &inactive,
            },
            options.pretty,
        ),
        Selector::Active => encode(&report.active, options.pretty),
        Selector::Idle => encode(&report.idle, options.pretty),
        Selector::Inactive => encode(&inactive, options.pretty),
    }
}

fn inactive_view(inactive: &AppSet, sort_desc: bool) -> Vec<&ApplicationRecord> {
    let mut records: Vec<_> = inactive.iter().collect();
    if sort_desc {
        records.sort_by(|a, b| match (a.name(), b.name()) {
            (Some(a), Some(b)) => b.cmp(a),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });
    }
    records
}

fn encode<T: Serialize + ?Sized>(value: &T, pretty: bool) -> Result<String> {
    let encoded = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    encoded.map_err(AppsError::Encode)
}

/// Parses `selector` and renders compact JSON.
pub fn present(selector: &str, report: &AppsReport) -> Result<String> {
    render(selector.parse()?, report, RenderOptions::default())
}
