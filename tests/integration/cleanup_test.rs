//! Cleanup operation tests: dry-run safety and targeted deletion

use apkaudit::{CleanupRunner, CleanupTarget, Config};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn scaffold(root: &Path) -> PathBuf {
    let module = root.join("app");
    let drawable = module.join("src/main/res/drawable");
    let kotlin = module.join("src/main/kotlin");
    fs::create_dir_all(&drawable).unwrap();
    fs::create_dir_all(&kotlin).unwrap();
    fs::write(module.join("build.gradle.kts"), "plugins {}").unwrap();

    fs::write(drawable.join("used_icon.png"), [0u8; 10]).unwrap();
    fs::write(drawable.join("old_banner.png"), [0u8; 30]).unwrap();
    fs::write(drawable.join("old_photo.jpg"), [0u8; 40]).unwrap();
    fs::write(
        drawable.join("old_vector.xml"),
        "<vector android:pathData=\"M0,0\"/>",
    )
    .unwrap();
    fs::write(
        kotlin.join("Main.kt"),
        "val icon = R.drawable.used_icon",
    )
    .unwrap();
    module
}

#[test]
fn test_dry_run_never_deletes() {
    let temp = TempDir::new().unwrap();
    let module = scaffold(temp.path());

    let runner = CleanupRunner::new(CleanupTarget::All, false, false);
    let outcome = runner.run(temp.path(), &Config::default()).unwrap();

    assert!(outcome.dry_run);
    assert_eq!(outcome.deleted, 0);
    // Candidates were found, yet every file is still there
    assert_eq!(outcome.candidates.len(), 3);
    assert!(module.join("src/main/res/drawable/old_banner.png").exists());
    assert!(module.join("src/main/res/drawable/old_photo.jpg").exists());
    assert!(module.join("src/main/res/drawable/old_vector.xml").exists());
}

#[test]
fn test_type_selector_limits_scope() {
    let temp = TempDir::new().unwrap();
    let _module = scaffold(temp.path());

    let runner = CleanupRunner::new(CleanupTarget::Jpg, false, false);
    let outcome = runner.run(temp.path(), &Config::default()).unwrap();

    assert_eq!(outcome.candidates.len(), 1);
    assert_eq!(outcome.candidates[0].base_name(), "old_photo");
    assert_eq!(outcome.reclaimable(), 40);
}

#[test]
fn test_confirmed_deletion_reports_counts() {
    let temp = TempDir::new().unwrap();
    let module = scaffold(temp.path());

    let runner = CleanupRunner::new(CleanupTarget::All, true, false);
    let outcome = runner.run(temp.path(), &Config::default()).unwrap();

    assert!(!outcome.dry_run);
    assert_eq!(outcome.deleted, 3);
    assert_eq!(outcome.failed, 0);
    assert!(!module.join("src/main/res/drawable/old_banner.png").exists());
    // Referenced resources survive
    assert!(module.join("src/main/res/drawable/used_icon.png").exists());
}

#[test]
fn test_vector_cleanup_only_touches_sniffed_vectors() {
    let temp = TempDir::new().unwrap();
    let module = scaffold(temp.path());
    // A drawable XML without vector markers must not be an svg candidate
    fs::write(
        module.join("src/main/res/drawable/plain_shape.xml"),
        "<shape></shape>",
    )
    .unwrap();

    let runner = CleanupRunner::new(CleanupTarget::Svg, false, false);
    let outcome = runner.run(temp.path(), &Config::default()).unwrap();

    assert_eq!(outcome.candidates.len(), 1);
    assert_eq!(outcome.candidates[0].base_name(), "old_vector");
}
