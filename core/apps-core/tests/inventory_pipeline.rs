//! Integration tests for the fetch → reconcile → present pipeline.

use mac_apps_core::sources::{ProcessTable, RunningProcess, WindowEntry, WindowQuery};
use mac_apps_core::{present, AppInventory, AppsError, Result};
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

struct FakeWindows(Vec<WindowEntry>);

impl WindowQuery for FakeWindows {
    fn query_windows(&self) -> Result<Vec<WindowEntry>> {
        Ok(self.0.clone())
    }
}

struct BrokenWindows;

impl WindowQuery for BrokenWindows {
    fn query_windows(&self) -> Result<Vec<WindowEntry>> {
        Err(AppsError::CommandFailed {
            command: "yabai -m query --windows".to_string(),
            details: "yabai is not running".to_string(),
        })
    }
}

struct FakeProcesses(Vec<RunningProcess>);

impl ProcessTable for FakeProcesses {
    fn running_processes(&self) -> Vec<RunningProcess> {
        self.0.clone()
    }
}

fn bundles(root: &Path, names: &[&str]) -> PathBuf {
    for name in names {
        std::fs::create_dir_all(root.join(format!("{name}.app")).join("Contents")).unwrap();
    }
    root.to_path_buf()
}

fn process(pid: u32, name: &str, bundle: Option<PathBuf>) -> RunningProcess {
    RunningProcess {
        pid,
        name: Some(name.to_string()),
        bundle_path: bundle,
    }
}

fn window(id: i64, pid: u32, app: &str) -> WindowEntry {
    WindowEntry {
        id,
        pid,
        app: app.to_string(),
        title: format!("{app} - main"),
    }
}

#[test]
fn test_pipeline_partitions_installed_apps() {
    let tmp = TempDir::new().unwrap();
    let system = bundles(&tmp.path().join("System"), &["Calendar", "Notes"]);
    let user = bundles(&tmp.path().join("Applications"), &["Safari", "Zed"]);

    let processes = FakeProcesses(vec![
        process(100, "Safari", Some(user.join("Safari.app"))),
        process(101, "Notes", Some(system.join("Notes.app"))),
        process(102, "launchd", None),
    ]);
    let windows = FakeWindows(vec![window(1, 100, "Safari")]);

    let inventory = AppInventory::new(windows, processes, vec![system, user], "app".to_string());
    let report = inventory.collect();

    let value: Value = serde_json::from_str(&present("all", &report).unwrap()).unwrap();

    assert_eq!(value["active"].as_array().unwrap().len(), 1);
    assert_eq!(value["active"][0]["id"], json!(1));
    assert_eq!(value["active"][0]["pid"], json!(100));
    assert!(value["active"][0]["path"]
        .as_str()
        .unwrap()
        .ends_with("Safari.app"));

    let idle: Vec<_> = value["idle"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["app"].as_str().unwrap())
        .collect();
    assert_eq!(idle, vec!["Notes"]);

    let inactive: Vec<_> = value["inactive"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["app"].as_str().unwrap())
        .collect();
    assert_eq!(inactive, vec!["Calendar", "Zed"]);
}

#[test]
fn test_broken_window_query_degrades_to_no_active_apps() {
    let tmp = TempDir::new().unwrap();
    let apps = bundles(tmp.path(), &["Foo"]);

    let processes = FakeProcesses(vec![process(7, "Foo", Some(apps.join("Foo.app")))]);
    let inventory = AppInventory::new(BrokenWindows, processes, vec![apps], "app".to_string());

    let report = inventory.collect();
    assert!(report.active.is_empty());
    assert_eq!(report.idle.len(), 1);
    assert!(report.inactive.is_empty());
}

#[test]
fn test_missing_directories_and_no_processes_render_empty_sets() {
    let tmp = TempDir::new().unwrap();
    let inventory = AppInventory::new(
        FakeWindows(vec![]),
        FakeProcesses(vec![]),
        vec![tmp.path().join("missing")],
        "app".to_string(),
    );

    let report = inventory.collect();
    assert_eq!(
        present("all", &report).unwrap(),
        r#"{"active":[],"idle":[],"inactive":[]}"#
    );
}

#[test]
fn test_window_for_unresolved_pid_is_active_without_path() {
    let tmp = TempDir::new().unwrap();
    let apps = bundles(tmp.path(), &["Foo"]);

    let inventory = AppInventory::new(
        FakeWindows(vec![window(3, 999, "Mystery")]),
        FakeProcesses(vec![]),
        vec![apps],
        "app".to_string(),
    );

    let report = inventory.collect();
    assert_eq!(report.active.len(), 1);
    assert_eq!(report.active[0].path(), None);
    assert_eq!(report.inactive.len(), 1);
}

#[test]
fn test_fetch_snapshot_keeps_sources_separate() {
    let tmp = TempDir::new().unwrap();
    let apps = bundles(tmp.path(), &["Foo", "Bar"]);

    let inventory = AppInventory::new(
        FakeWindows(vec![window(1, 5, "Foo")]),
        FakeProcesses(vec![
            process(5, "Foo", Some(apps.join("Foo.app"))),
            process(6, "cron", None),
        ]),
        vec![apps],
        "app".to_string(),
    );

    let snapshot = inventory.fetch();
    assert_eq!(snapshot.active.len(), 1);
    assert_eq!(snapshot.installed.len(), 2);
    assert_eq!(snapshot.running.len(), 2);
}
