/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use osdecl_core::os;
use std::fs;
use std::io::ErrorKind;

#[test]
fn mkdir_then_rmdir_restores_state() {
    let tmp = tempfile::tempdir().unwrap();
    let before = os::listdir(tmp.path()).unwrap();

    let dir = tmp.path().join("d");
    os::mkdir(&dir, 0o755).unwrap();
    assert!(dir.is_dir());
    assert_eq!(os::listdir(tmp.path()).unwrap(), vec!["d".to_string()]);

    os::rmdir(&dir).unwrap();
    assert_eq!(os::listdir(tmp.path()).unwrap(), before);
}

#[test]
fn mkdir_failures() {
    let tmp = tempfile::tempdir().unwrap();
    let err = os::mkdir(tmp.path(), 0o777).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AlreadyExists);
    let err = os::mkdir(tmp.path().join("a/b"), 0o777).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn listdir_names_only() {
    let tmp = tempfile::tempdir().unwrap();
    assert!(os::listdir(tmp.path()).unwrap().is_empty());

    fs::write(tmp.path().join("a.txt"), "a").unwrap();
    fs::create_dir(tmp.path().join("sub")).unwrap();
    let mut names = os::listdir(tmp.path()).unwrap();
    names.sort();
    assert_eq!(names, ["a.txt", "sub"]);

    let err = os::listdir(tmp.path().join("a.txt")).unwrap_err();
    assert_ne!(err.kind(), ErrorKind::NotFound);
    let err = os::listdir(tmp.path().join("missing")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn remove_files_only() {
    let tmp = tempfile::tempdir().unwrap();
    let file = tmp.path().join("f");
    fs::write(&file, "x").unwrap();
    os::remove(&file).unwrap();
    assert!(!file.exists());

    assert_eq!(os::remove(&file).unwrap_err().kind(), ErrorKind::NotFound);
    assert!(os::remove(tmp.path()).is_err());
    assert!(tmp.path().is_dir());
}

#[test]
fn rmdir_refuses_non_empty() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path().join("d");
    fs::create_dir(&dir).unwrap();
    fs::write(dir.join("f"), "x").unwrap();

    assert!(os::rmdir(&dir).is_err());
    assert!(dir.join("f").exists());
    assert_eq!(
        os::rmdir(tmp.path().join("missing")).unwrap_err().kind(),
        ErrorKind::NotFound
    );
}

#[test]
fn rename_moves_entry() {
    let tmp = tempfile::tempdir().unwrap();
    let src = tmp.path().join("src");
    let dst = tmp.path().join("dst");
    fs::write(&src, "payload").unwrap();

    os::rename(&src, &dst).unwrap();
    assert!(!src.exists());
    assert_eq!(fs::read_to_string(&dst).unwrap(), "payload");

    assert_eq!(os::rename(&src, &dst).unwrap_err().kind(), ErrorKind::NotFound);
    assert!(os::rename(&dst, tmp.path().join("no/such/dir")).is_err());
}

#[test]
fn removedirs_prunes_empty_parents() {
    let tmp = tempfile::tempdir().unwrap();
    fs::write(tmp.path().join("keep"), "").unwrap();
    let leaf = tmp.path().join("a/b/c");
    fs::create_dir_all(&leaf).unwrap();

    os::removedirs(&leaf).unwrap();
    assert!(!tmp.path().join("a").exists());
    // stops at the first non-empty parent
    assert!(tmp.path().is_dir());
    assert!(tmp.path().join("keep").exists());
}

#[test]
fn removedirs_stops_at_non_empty_parent() {
    let tmp = tempfile::tempdir().unwrap();
    let leaf = tmp.path().join("a/b");
    fs::create_dir_all(&leaf).unwrap();
    fs::write(tmp.path().join("a/other"), "").unwrap();

    os::removedirs(&leaf).unwrap();
    assert!(!leaf.exists());
    assert!(tmp.path().join("a/other").exists());

    assert!(os::removedirs(tmp.path().join("missing")).is_err());
}

#[cfg(unix)]
#[test]
fn chmod_sets_permission_bits() {
    use std::os::unix::fs::PermissionsExt;

    let tmp = tempfile::tempdir().unwrap();
    let file = tmp.path().join("f");
    fs::write(&file, "x").unwrap();

    os::chmod(&file, 0o600).unwrap();
    assert_eq!(fs::metadata(&file).unwrap().permissions().mode() & 0o777, 0o600);
    os::chmod(&file, 0o644).unwrap();
    assert_eq!(fs::metadata(&file).unwrap().permissions().mode() & 0o777, 0o644);

    assert_eq!(
        os::chmod(tmp.path().join("missing"), 0o600).unwrap_err().kind(),
        ErrorKind::NotFound
    );
}

#[cfg(unix)]
#[test]
fn mkdir_applies_mode() {
    use std::os::unix::fs::PermissionsExt;

    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path().join("d");
    os::mkdir(&dir, 0o700).unwrap();
    // umask can only clear bits
    let mode = fs::metadata(&dir).unwrap().permissions().mode() & 0o777;
    assert_eq!(mode & !0o700, 0);
}
