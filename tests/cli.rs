use std::path::Path;
use std::process::{Command, Output};

fn command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_xyconf"));
    cmd.current_dir(dir)
        .env_remove("XYCONF_CATALOG")
        .env("XYCONF_LOG_LEVEL", "Error")
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir.join(".config"))
        .args(args);
    cmd
}

fn xyconf(dir: &Path, args: &[&str]) -> Output {
    command(dir, args).output().unwrap()
}

fn xyconf_with_catalog(dir: &Path, catalog: &Path, args: &[&str]) -> Output {
    command(dir, args)
        .env("XYCONF_CATALOG", catalog)
        .output()
        .unwrap()
}

#[test]
fn configure_writes_makefile() {
    let dir = tempfile::tempdir().unwrap();
    let out = xyconf(dir.path(), &["configure", "--no-third-party", "--with-jpeg", "--CXX=clang++"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let text = std::fs::read_to_string(dir.path().join("Makefile")).unwrap();
    assert!(text.contains("CXX = clang++\n"));
    assert!(text.contains("LIBjpeg = -ljpeg\n"));
}

#[test]
fn conflicting_flags_fail_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let out = xyconf(dir.path(), &["configure", "--with-png", "--no-png"]);
    assert!(!out.status.success());
    assert!(!dir.path().join("Makefile").exists());
}

#[test]
fn unknown_flag_fails_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let out = xyconf(dir.path(), &["configure", "--with-opencv"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("Usage"));
    assert!(!dir.path().join("Makefile").exists());
}

#[test]
fn custom_output_path() {
    let dir = tempfile::tempdir().unwrap();
    let out = xyconf(dir.path(), &["configure", "--output", "build.mk", "--use_tr1"]);
    assert!(out.status.success());
    let text = std::fs::read_to_string(dir.path().join("build.mk")).unwrap();
    assert!(text.contains("DEFS = -D__USE_TR1__\n"));
}

#[test]
fn template_creates_triad() {
    let dir = tempfile::tempdir().unwrap();
    let out = xyconf(dir.path(), &["template", "GeometryUtils"]);
    assert!(out.status.success());
    for file in ["GeometryUtils.h", "GeometryUtils.cc", "GeometryUtilsTest.cc"] {
        assert!(dir.path().join(file).is_file(), "{} missing", file);
    }
    let header = std::fs::read_to_string(dir.path().join("GeometryUtils.h")).unwrap();
    assert!(header.contains("#ifndef __XYUTILS_GEOMETRY_UTILS_H__"));

    let again = xyconf(dir.path(), &["template", "GeometryUtils"]);
    assert!(!again.status.success());
}

#[test]
fn underscored_library_name_parses() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = dir.path().join("catalog.toml");
    let builtin = include_str!("../catalog/xycpputils.toml");
    std::fs::write(
        &catalog,
        builtin.replace("\"png\"", "\"third_party\""),
    )
    .unwrap();
    let out = xyconf_with_catalog(dir.path(), &catalog, &["configure", "--no-third_party"]);
    assert_eq!(out.status.code(), Some(0), "{}", String::from_utf8_lossy(&out.stderr));
    let text = std::fs::read_to_string(dir.path().join("Makefile")).unwrap();
    assert!(!text.contains("ImageTest"));
}

#[test]
fn broken_catalog_only_blocks_configure() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = dir.path().join("broken.toml");
    std::fs::write(&catalog, "[project\n").unwrap();

    assert!(xyconf_with_catalog(dir.path(), &catalog, &["--help"]).status.success());
    let config = xyconf_with_catalog(dir.path(), &catalog, &["config", "default_cxx", "clang++"]);
    assert!(config.status.success());

    let configure = xyconf_with_catalog(dir.path(), &catalog, &["configure"]);
    assert_eq!(configure.status.code(), Some(1));
    assert!(!dir.path().join("Makefile").exists());
}
