//! End-to-end audit pipeline tests over scaffolded projects

use apkaudit::analysis::decompose;
use apkaudit::audit;
use apkaudit::Config;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Write a stored-compression zip posing as an APK
fn write_apk(path: &Path, entries: &[(&str, usize)]) {
    let file = File::create(path).unwrap();
    let mut writer = zip::ZipWriter::new(file);
    let options = zip::write::SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Stored);
    for (name, size) in entries {
        writer.start_file(*name, options).unwrap();
        writer.write_all(&vec![0u8; *size]).unwrap();
    }
    writer.finish().unwrap();
}

fn scaffold(root: &Path) -> PathBuf {
    let module = root.join("app");
    fs::create_dir_all(module.join("src/main/res/drawable")).unwrap();
    fs::create_dir_all(module.join("src/main/kotlin")).unwrap();
    fs::create_dir_all(module.join("build/outputs/apk/release")).unwrap();
    fs::write(
        module.join("build.gradle.kts"),
        r#"
plugins { id("com.android.application") }
dependencies { implementation(libs.okhttp.client) }
"#,
    )
    .unwrap();
    fs::write(module.join("src/main/res/drawable/used_icon.png"), [0u8; 10]).unwrap();
    fs::write(
        module.join("src/main/res/drawable/unused_banner.png"),
        [0u8; 64],
    )
    .unwrap();
    fs::write(
        module.join("src/main/kotlin/Main.kt"),
        "val icon = R.drawable.used_icon",
    )
    .unwrap();

    let gradle = root.join("gradle");
    fs::create_dir_all(&gradle).unwrap();
    fs::write(
        gradle.join("libs.versions.toml"),
        r#"
[libraries]
okhttp-client = { group = "com.squareup.okhttp3", name = "okhttp" }
guava = "com.google.guava:guava:33.0.0-jre"
"#,
    )
    .unwrap();

    module
}

#[test]
fn test_full_audit_over_scaffolded_project() {
    let temp = TempDir::new().unwrap();
    let module = scaffold(temp.path());

    write_apk(
        &module.join("build/outputs/apk/release/app-release.apk"),
        &[
            ("classes.dex", 500),
            ("res/drawable/used_icon.png", 10),
            ("lib/arm64-v8a/libocr.so", 200),
            ("AndroidManifest.xml", 50),
        ],
    );

    let report = audit::run(temp.path(), &Config::default(), false).unwrap();

    assert_eq!(report.app_module, "app");
    assert_eq!(report.modules, vec!["app".to_string()]);

    // Reference matching
    let unused: Vec<_> = report
        .unused_resources
        .iter()
        .map(|r| r.base_name())
        .collect();
    assert_eq!(unused, vec!["unused_banner".to_string()]);

    // Decomposition happened and reconciles
    let package = report.package.as_ref().expect("artifact should decompose");
    let sizes = &package.sizes;
    assert_eq!(sizes.code, 500);
    assert_eq!(sizes.native_libs, 200);
    assert!(sizes.is_consistent());
    let attributed = sizes.code
        + sizes.resources
        + sizes.native_libs
        + sizes.assets
        + sizes.metadata
        + sizes.other;
    assert_eq!(attributed as i64 + sizes.overhead, sizes.total as i64);

    // Catalog cross-reference: okhttp-client used, guava unused
    let catalog = report.catalog.as_ref().expect("catalog facet");
    assert_eq!(catalog.declared, 2);
    assert_eq!(catalog.unused.len(), 1);
    assert_eq!(catalog.unused[0].alias, "guava");
    assert!(report
        .suggestions
        .iter()
        .any(|s| s.contains("unused dependencies")));
}

#[test]
fn test_release_artifact_preferred_over_larger_debug() {
    let temp = TempDir::new().unwrap();
    let module = scaffold(temp.path());

    let release = module.join("build/outputs/apk/release/app-release.apk");
    let debug = module.join("build/outputs/apk/debug/app-debug.apk");
    fs::create_dir_all(debug.parent().unwrap()).unwrap();
    write_apk(&release, &[("classes.dex", 1_000)]);
    write_apk(&debug, &[("classes.dex", 50_000)]);

    let report = audit::run(temp.path(), &Config::default(), false).unwrap();
    let package = report.package.expect("artifact should decompose");
    assert_eq!(package.name, "app-release.apk");
}

#[test]
fn test_corrupt_artifact_degrades_to_warning() {
    let temp = TempDir::new().unwrap();
    let module = scaffold(temp.path());

    fs::write(
        module.join("build/outputs/apk/release/app-release.apk"),
        b"not a zip",
    )
    .unwrap();

    let report = audit::run(temp.path(), &Config::default(), false).unwrap();
    assert!(report.package.is_none());
    assert!(report
        .warnings
        .iter()
        .any(|w| w.contains("could not analyze artifact")));
}

#[test]
fn test_missing_catalog_yields_warning_not_error() {
    let temp = TempDir::new().unwrap();
    let module = temp.path().join("app");
    fs::create_dir_all(&module).unwrap();
    fs::write(module.join("build.gradle.kts"), "plugins {}").unwrap();

    let report = audit::run(temp.path(), &Config::default(), false).unwrap();
    assert!(report.catalog.is_none());
    assert!(report
        .warnings
        .iter()
        .any(|w| w.contains("libs.versions.toml")));
}

#[test]
fn test_repeated_runs_are_byte_identical() {
    let temp = TempDir::new().unwrap();
    let module = scaffold(temp.path());
    write_apk(
        &module.join("build/outputs/apk/release/app-release.apk"),
        &[("classes.dex", 100)],
    );

    let config = Config::default();
    let first = serde_json::to_vec(&audit::run(temp.path(), &config, false).unwrap()).unwrap();
    let second = serde_json::to_vec(&audit::run(temp.path(), &config, false).unwrap()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_decompose_reconciliation_holds_for_compressed_entries() {
    let temp = TempDir::new().unwrap();
    let apk = temp.path().join("app.apk");

    let file = File::create(&apk).unwrap();
    let mut writer = zip::ZipWriter::new(file);
    let stored = zip::write::SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Stored);
    writer.start_file("classes.dex", stored).unwrap();
    writer.write_all(&[7u8; 4096]).unwrap();
    writer.start_file("assets/blob.bin", stored).unwrap();
    writer.write_all(&[9u8; 1024]).unwrap();
    writer.finish().unwrap();

    let breakdown = decompose(&apk).unwrap();
    let sizes = &breakdown.sizes;
    let attributed = sizes.code
        + sizes.resources
        + sizes.native_libs
        + sizes.assets
        + sizes.metadata
        + sizes.other;
    assert_eq!(attributed as i64 + sizes.overhead, sizes.total as i64);
    assert!(sizes.overhead > 0, "zip structure bytes must show as overhead");
}
