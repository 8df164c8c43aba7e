//! End-to-end cascade over on-disk tables and an on-disk selection slot.
//!
//! Each controller instance stands in for one session; the state directory
//! is what survives between them.

use std::path::Path;
use std::sync::Arc;

use lobpick::controller::view::{Summary, PLACEHOLDER};
use lobpick::controller::{ControllerError, SelectionController};
use lobpick::source::DirSource;
use lobpick::store::FileStore;
use tempfile::TempDir;

fn write_tables(root: &Path, lobs: &str, packages: &str, descriptions: &str) {
    let data = root.join("data");
    std::fs::create_dir_all(&data).unwrap();
    std::fs::write(data.join("lobToApps.json"), lobs).unwrap();
    std::fs::write(data.join("appToPackage.json"), packages).unwrap();
    std::fs::write(data.join("appToDescription.json"), descriptions).unwrap();
}

fn session(site: &Path, state: &Path) -> SelectionController {
    SelectionController::new(Arc::new(DirSource::new(site)), Box::new(FileStore::new(state)))
}

fn sample_site() -> TempDir {
    let site = TempDir::new().unwrap();
    write_tables(
        site.path(),
        r#"{
            "Wealth": ["advisor-desk", "portfolio"],
            "Cards": ["auth", "disputes"],
            "Lending": []
        }"#,
        r#"{ "advisor-desk": "PKG-ADV-3", "auth": "PKG-AUTH-1" }"#,
        r#"{ "advisor-desk": "Advisor workstation", "portfolio": "Portfolio analytics" }"#,
    );
    site
}

#[tokio::test]
async fn selection_survives_sessions() {
    let site = sample_site();
    let state = TempDir::new().unwrap();

    let mut first = session(site.path(), state.path());
    first.reload().await.unwrap();
    assert_eq!(
        first.view().lob_chooser.options,
        vec!["Cards", "Lending", "Wealth"]
    );
    first.select_lob("Wealth").unwrap();
    first.select_app("advisor-desk").unwrap();
    let expected = first.view().clone();
    drop(first);

    let mut second = session(site.path(), state.path());
    second.reload().await.unwrap();
    assert_eq!(second.view().summary, expected.summary);
    assert_eq!(second.view().app_chooser, expected.app_chooser);
    assert_eq!(second.view().summary.package, "PKG-ADV-3");
    assert_eq!(second.view().summary.description, "Advisor workstation");
}

#[tokio::test]
async fn upstream_change_narrows_saved_selection() {
    let site = sample_site();
    let state = TempDir::new().unwrap();

    let mut c = session(site.path(), state.path());
    c.reload().await.unwrap();
    c.select_lob("Wealth").unwrap();
    c.select_app("portfolio").unwrap();
    assert_eq!(c.view().summary.package, PLACEHOLDER);

    // "portfolio" moves out of Wealth.
    write_tables(
        site.path(),
        r#"{ "Wealth": ["advisor-desk"], "Markets": ["portfolio"] }"#,
        "{}",
        "{}",
    );
    c.reload().await.unwrap();
    assert_eq!(c.selection().lob.as_deref(), Some("Wealth"));
    assert_eq!(c.selection().app, None);
    assert_eq!(c.view().summary, Summary::lob_only("Wealth"));

    // Wealth disappears entirely.
    write_tables(site.path(), r#"{ "Markets": ["portfolio"] }"#, "{}", "{}");
    c.reload().await.unwrap();
    assert_eq!(c.selection().lob, None);
    assert_eq!(c.view().summary, Summary::empty());
}

#[tokio::test]
async fn clear_removes_slot_file() {
    let site = sample_site();
    let state = TempDir::new().unwrap();

    let mut c = session(site.path(), state.path());
    c.reload().await.unwrap();
    c.select_lob("Cards").unwrap();
    assert!(state.path().join("lobApp.json").exists());

    c.clear();
    assert!(!state.path().join("lobApp.json").exists());

    let mut next = session(site.path(), state.path());
    next.reload().await.unwrap();
    assert_eq!(next.selection().lob, None);
}

#[tokio::test]
async fn corrupt_slot_file_is_ignored() {
    let site = sample_site();
    let state = TempDir::new().unwrap();
    std::fs::write(state.path().join("lobApp.json"), "\u{0}garbage").unwrap();

    let mut c = session(site.path(), state.path());
    c.reload().await.unwrap();
    assert_eq!(c.selection().lob, None);
    assert!(!c.view().status.is_error());
}

#[tokio::test]
async fn missing_table_fails_whole_load() {
    let site = sample_site();
    std::fs::remove_file(site.path().join("data/appToDescription.json")).unwrap();
    let state = TempDir::new().unwrap();

    let mut c = session(site.path(), state.path());
    let err = c.reload().await.unwrap_err();
    assert!(matches!(err, ControllerError::Load(_)));
    assert_eq!(
        c.view().status.text,
        "Failed to load data/appToDescription.json: HTTP 404"
    );
    assert!(!c.view().lob_chooser.enabled);
    assert!(!c.view().app_chooser.enabled);
}

#[tokio::test]
async fn empty_lob_table_is_reported() {
    let site = TempDir::new().unwrap();
    write_tables(site.path(), "{}", "{}", "{}");
    let state = TempDir::new().unwrap();

    let mut c = session(site.path(), state.path());
    let err = c.reload().await.unwrap_err();
    assert!(matches!(err, ControllerError::EmptyData(_)));
    assert!(c.view().status.is_error());
    assert!(!c.view().app_chooser.enabled);
}

#[tokio::test]
async fn duplicate_lob_keys_collapse_to_last_entry() {
    let site = TempDir::new().unwrap();
    write_tables(
        site.path(),
        r#"{"B":["x"],"A":["y"],"B":["z"]}"#,
        "{}",
        "{}",
    );
    let state = TempDir::new().unwrap();

    let mut c = session(site.path(), state.path());
    c.reload().await.unwrap();
    assert_eq!(c.view().lob_chooser.options, vec!["A", "B"]);

    c.select_lob("B").unwrap();
    assert_eq!(c.view().app_chooser.options, vec!["z"]);
}
