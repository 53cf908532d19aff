use anyhow::Result;
use filebrowse::models::FileEntry;
use filebrowse::pages::explorer::{ExplorerPage, LoadState};
use filebrowse::services::alerts::ConsoleAlerts;
use filebrowse::services::fs::listing::{list_dir, FsLister, ListParams};
use filebrowse::services::fs::opener::SystemOpener;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tempfile::tempdir;

fn build_tree(root: &Path) -> Result<()> {
    fs::create_dir_all(root.join("Documents"))?;
    fs::create_dir_all(root.join("Music"))?;
    fs::write(root.join("document.txt"), "draft")?;
    fs::write(root.join("image.jpg"), vec![0u8; 4096])?;
    fs::write(root.join("notes.TXT"), "n")?;
    fs::write(root.join("Documents").join("inner.txt"), "not listed from the root")?;
    Ok(())
}

fn page_at(root: &Path) -> ExplorerPage {
    ExplorerPage::with_start_path(
        root,
        Arc::new(FsLister),
        Arc::new(SystemOpener),
        Arc::new(ConsoleAlerts::new(Vec::new())),
    )
}

fn names(entries: &[FileEntry]) -> Vec<&str> {
    entries.iter().map(|e| e.name.as_str()).collect()
}

#[test]
fn page_lists_real_directory() -> Result<()> {
    let root = tempdir()?;
    build_tree(root.path())?;

    let page = page_at(root.path());
    let entries = page.entries();
    assert_eq!(entries.len(), 5);
    assert!(entries[..2].iter().all(|e| e.is_directory));
    assert!(entries[2..].iter().all(|e| !e.is_directory));
    assert!(entries
        .iter()
        .all(|e| e.kind().label() == if e.is_directory { "Folder" } else { "File" }));
    Ok(())
}

#[test]
fn filtering_is_not_recursive() -> Result<()> {
    let root = tempdir()?;
    build_tree(root.path())?;

    let mut page = page_at(root.path());
    page.set_filter_text(Some("TXT".into()));
    let mut listed = names(page.entries());
    listed.sort();
    assert_eq!(listed, vec!["document.txt", "notes.TXT"]);

    page.set_filter_text(Some("doc".into()));
    assert_eq!(names(page.entries()), vec!["Documents", "document.txt"]);
    Ok(())
}

#[test]
fn entering_a_folder_lists_its_contents() -> Result<()> {
    let root = tempdir()?;
    build_tree(root.path())?;

    let mut page = page_at(root.path());
    let documents = page
        .entries()
        .iter()
        .find(|e| e.name == "Documents")
        .cloned()
        .expect("Documents listed");
    assert!(page.activate(Some(&documents)));
    assert_eq!(names(page.entries()), vec!["inner.txt"]);

    assert!(page.go_up());
    assert_eq!(page.entries().len(), 5);
    Ok(())
}

#[test]
fn reload_picks_up_files_created_later() -> Result<()> {
    let root = tempdir()?;
    build_tree(root.path())?;

    let mut page = page_at(root.path());
    assert_eq!(page.entries().len(), 5);

    fs::write(root.path().join("late.txt"), "new")?;
    assert!(!names(page.entries()).contains(&"late.txt"));
    page.reload();
    assert_eq!(page.entries().len(), 6);
    assert!(names(page.entries()).contains(&"late.txt"));
    Ok(())
}

#[cfg(unix)]
#[test]
fn folders_with_undecodable_names_can_be_entered() -> Result<()> {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let root = tempdir()?;
    let raw = OsStr::from_bytes(b"caf\xe9");
    let folder = root.path().join(raw);
    fs::create_dir(&folder)?;
    fs::write(folder.join("inside.txt"), "x")?;

    let mut page = page_at(root.path());
    let entry = page.entries()[0].clone();
    assert!(entry.is_directory);
    assert!(page.activate(Some(&entry)));
    assert_eq!(page.current_path(), folder);
    assert_eq!(names(page.entries()), vec!["inside.txt"]);
    Ok(())
}

#[test]
fn vanished_folder_empties_the_page() -> Result<()> {
    let root = tempdir()?;
    build_tree(root.path())?;

    let mut page = page_at(root.path());
    page.set_current_path(root.path().join("gone"));
    assert!(page.entries().is_empty());
    assert_eq!(page.load_state(), LoadState::Idle);
    Ok(())
}

#[tokio::test]
async fn background_reload_applies_latest_ticket() -> Result<()> {
    let root = tempdir()?;
    build_tree(root.path())?;
    let mut page = page_at(root.path());

    page.set_filter_text(Some("music".into()));
    let ticket = page.begin_reload().expect("path is set");
    assert_eq!(page.load_state(), LoadState::Loading);

    let (ticket, result) = ticket.run(page.lister()).await;
    assert!(page.complete_reload(ticket, result));
    assert_eq!(names(page.entries()), vec!["Music"]);
    Ok(())
}

#[tokio::test]
async fn async_listing_reports_sizes() -> Result<()> {
    let root = tempdir()?;
    build_tree(root.path())?;

    let entries = list_dir(ListParams {
        path: root.path(),
        filter: Some("image"),
    })
    .await?;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].size_display.as_deref(), Some("4 KB"));
    Ok(())
}
