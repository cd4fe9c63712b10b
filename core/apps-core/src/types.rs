//! Application record model shared by the fetchers, the reconciler and the presenter.
//!
//! A record is "the same application" as another iff their identities match.
//! Identity is derived from the bundle path; every other field is
//! informational and never takes part in equality, hashing or deduplication.

use serde::Serialize;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_UNKNOWN_TOKEN: AtomicU64 = AtomicU64::new(1);

/// Comparable identity of an application record.
///
/// Records whose bundle path could not be resolved each receive their own
/// `Unknown` token, so two unresolved processes never collapse into one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AppIdentity {
    Known(String),
    Unknown(u64),
}

impl AppIdentity {
    fn for_path(path: Option<&str>) -> Self {
        match path {
            Some(path) => AppIdentity::Known(path.to_string()),
            None => AppIdentity::Unknown(NEXT_UNKNOWN_TOKEN.fetch_add(1, Ordering::Relaxed)),
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, AppIdentity::Known(_))
    }
}

/// One application instance or installation.
///
/// Serializes as `{id, pid, app, title, path}` with `null` for absent fields.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationRecord {
    #[serde(rename = "id")]
    numeric_id: Option<i64>,
    #[serde(rename = "pid")]
    process_id: Option<u32>,
    #[serde(rename = "app")]
    name: Option<String>,
    title: Option<String>,
    path: Option<String>,
    #[serde(skip)]
    identity: AppIdentity,
}

impl ApplicationRecord {
    pub fn new(
        numeric_id: Option<i64>,
        process_id: Option<u32>,
        name: Option<String>,
        title: Option<String>,
        path: Option<String>,
    ) -> Self {
        let path = path.map(|p| normalize_path(&p)).filter(|p| !p.is_empty());
        let identity = AppIdentity::for_path(path.as_deref());
        Self {
            numeric_id,
            process_id,
            name,
            title,
            path,
            identity,
        }
    }

    /// Record for a window reported by the window-query tool.
    pub fn window(
        numeric_id: i64,
        process_id: u32,
        app: String,
        title: String,
        path: Option<String>,
    ) -> Self {
        Self::new(
            Some(numeric_id),
            Some(process_id),
            Some(app),
            Some(title),
            path,
        )
    }

    /// Record for a bundle found on disk. Name and title are both the bundle stem.
    pub fn installed(name: String, path: String) -> Self {
        Self::new(None, None, Some(name.clone()), Some(name), Some(path))
    }

    /// Record for a running process.
    pub fn running(process_id: u32, name: Option<String>, path: Option<String>) -> Self {
        Self::new(None, Some(process_id), name.clone(), name, path)
    }

    pub fn numeric_id(&self) -> Option<i64> {
        self.numeric_id
    }

    pub fn process_id(&self) -> Option<u32> {
        self.process_id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn identity(&self) -> &AppIdentity {
        &self.identity
    }
}

impl PartialEq for ApplicationRecord {
    fn eq(&self, other: &Self) -> bool {
        self.identity == other.identity
    }
}

impl Eq for ApplicationRecord {}

impl Hash for ApplicationRecord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity.hash(state);
    }
}

fn normalize_path(path: &str) -> String {
    if path == "/" {
        "/".to_string()
    } else {
        path.trim_end_matches('/').to_string()
    }
}
