use bootstrap_fs::{
    PermissionMode, PromoteOptions, Staging, ensure_dir, remove_all, symlink, symlink_if_absent,
};
use tempfile::tempdir;

#[cfg(unix)]
#[test]
fn test_stage_link_promote() {
    let dir = tempdir().unwrap();
    let staging = Staging::prepare(dir.path().join("staging")).unwrap();

    ensure_dir(staging.join("bin")).unwrap();
    std::fs::write(staging.join("bin/run"), b"#!/x").unwrap();
    PermissionMode::OwnerExecutable
        .apply_to_path(&staging.join("bin/run"))
        .unwrap();

    ensure_dir(staging.join("libexec")).unwrap();
    symlink("../bin/run", staging.join("libexec/run-link")).unwrap();

    let dest = dir.path().join("usr");
    staging.promote(&dest, PromoteOptions::new()).unwrap();

    assert!(dest.join("bin/run").is_file());
    assert!(dest.join("libexec/run-link").is_symlink());
    assert_eq!(std::fs::read(dest.join("libexec/run-link")).unwrap(), b"#!/x");
}

#[test]
fn test_promote_fails_when_destination_reappears() {
    let dir = tempdir().unwrap();
    let staging = Staging::prepare(dir.path().join("staging")).unwrap();
    std::fs::write(staging.join("file"), b"data").unwrap();

    let dest = dir.path().join("usr");
    std::fs::create_dir(&dest).unwrap();
    std::fs::write(dest.join("foreign"), b"x").unwrap();

    assert!(staging.promote(&dest, PromoteOptions::new()).is_err());
    assert!(dest.join("foreign").exists());
    assert!(dir.path().join("staging/file").exists());
}

#[cfg(unix)]
#[test]
fn test_purge_then_skip_links() {
    let dir = tempdir().unwrap();
    let links = dir.path().join("support");
    ensure_dir(&links).unwrap();

    assert!(symlink_if_absent("/lib/libfoo.so", links.join("foo")).unwrap());
    assert!(!symlink_if_absent("/lib/libfoo.so", links.join("foo")).unwrap());

    assert!(remove_all(&links).unwrap());
    assert!(!links.exists());
}
