//! Set reconciliation of active, installed and running applications.
//!
//! ```text
//! idle     = (running ∩ installed) \ active
//! inactive = installed \ active \ idle
//! ```
//!
//! Only plain difference and intersection are used, so the three outputs are
//! pairwise disjoint by construction and `idle ∪ inactive ⊆ installed`.

use crate::types::{AppIdentity, ApplicationRecord};
use serde::Serialize;
use std::collections::HashSet;

/// Identity-deduplicated collection that keeps first-seen order.
#[derive(Debug, Clone, Default)]
pub struct AppSet {
    records: Vec<ApplicationRecord>,
    identities: HashSet<AppIdentity>,
}

impl AppSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `record` unless one with the same identity is already present.
    /// Returns whether it was inserted.
    pub fn insert(&mut self, record: ApplicationRecord) -> bool {
        if self.identities.insert(record.identity().clone()) {
            self.records.push(record);
            true
        } else {
            false
        }
    }

    pub fn contains(&self, record: &ApplicationRecord) -> bool {
        self.identities.contains(record.identity())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ApplicationRecord> {
        self.records.iter()
    }

    /// Elements of `self` whose identity is also in `other`; representatives come from `self`.
    pub fn intersection(&self, other: &AppSet) -> AppSet {
        self.iter().filter(|r| other.contains(r)).cloned().collect()
    }

    /// Elements of `self` whose identity is not in `other`.
    pub fn difference(&self, other: &AppSet) -> AppSet {
        self.iter().filter(|r| !other.contains(r)).cloned().collect()
    }

    pub fn into_vec(self) -> Vec<ApplicationRecord> {
        self.records
    }
}

impl FromIterator<ApplicationRecord> for AppSet {
    fn from_iter<I: IntoIterator<Item = ApplicationRecord>>(iter: I) -> Self {
        let mut set = AppSet::new();
        for record in iter {
            set.insert(record);
        }
        set
    }
}

impl<'a> IntoIterator for &'a AppSet {
    type Item = &'a ApplicationRecord;
    type IntoIter = std::slice::Iter<'a, ApplicationRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl Serialize for AppSet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.records.serialize(serializer)
    }
}

/// Result of one reconciliation pass.
#[derive(Debug, Clone, Serialize)]
pub struct AppsReport {
    /// Window-query records in tool order.
    pub active: Vec<ApplicationRecord>,
    /// Running, installed and not active.
    pub idle: AppSet,
    /// Installed and neither active nor idle.
    pub inactive: AppSet,
}

/// Partitions the fetched collections into active, idle and inactive.
pub fn reconcile(
    active: Vec<ApplicationRecord>,
    installed: Vec<ApplicationRecord>,
    running: Vec<ApplicationRecord>,
) -> AppsReport {
    let active_set: AppSet = active.iter().cloned().collect();
    let installed_set: AppSet = installed.into_iter().collect();
    let running_set: AppSet = running.into_iter().collect();

    let idle = running_set
        .intersection(&installed_set)
        .difference(&active_set);
    let inactive = installed_set.difference(&active_set).difference(&idle);

    tracing::debug!(
        active = active.len(),
        idle = idle.len(),
        inactive = inactive.len(),
        "Reconciled application sets"
    );

    AppsReport {
        active,
        idle,
        inactive,
    }
}
