/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use crate::helper::{call, lit};
use osdecl_core::statics::Error;
use osdecl_core::{Catalog, OsBinding, RuntimeError, Type, Value, call_str, check_str};
use std::io::ErrorKind;

#[test]
fn filesystem_calls() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path().join("made");

    let (value, ty) = call(&format!("os.mkdir({}, mode=0o755)", lit(&dir)));
    assert_eq!((value, ty), (Value::None, Type::None));
    assert!(dir.is_dir());

    let (value, ty) = call(&format!("os.listdir({})", lit(tmp.path())));
    assert_eq!(value, Value::List(vec![Value::Str("made".into())]));
    assert_eq!(ty.to_string(), "[string]");

    let moved = tmp.path().join("moved");
    call(&format!("os.rename({}, dst={})", lit(&dir), lit(&moved)));
    call(&format!("os.rmdir({})", lit(&moved)));
    assert_eq!(call(&format!("listdir({})", lit(tmp.path()))).0, Value::List(vec![]));
}

#[test]
fn bytes_paths_are_accepted() {
    let tmp = tempfile::tempdir().unwrap();
    let file = tmp.path().join("f");
    std::fs::write(&file, "").unwrap();
    let src = format!("os.remove(b{})", lit(&file));
    assert_eq!(call(&src).0, Value::None);
    assert!(!file.exists());
}

#[test]
fn getenv_through_the_catalog() {
    let (value, ty) = call(r#"os.getenv("OSDECL_DYNAMIC_ABSENT", 7)"#);
    assert_eq!(value, Value::Int(7));
    assert_eq!(ty.to_string(), "string | nat");

    let (value, ty) = call(r#"getenv("OSDECL_DYNAMIC_ABSENT")"#);
    assert_eq!(value, Value::None);
    assert_eq!(ty.to_string(), "string | none");

    call(r#"os.putenv("OSDECL_DYNAMIC_SET", "on")"#);
    let (value, _) = call(r#"os.getenv(key="OSDECL_DYNAMIC_SET", default=b"")"#);
    assert_eq!(value, Value::Str("on".into()));
}

#[test]
fn random_and_name() {
    let (value, ty) = call("os.urandom(8)");
    assert!(matches!(value, Value::Bytes(b) if b.len() == 8));
    assert_eq!(ty, Type::Bytes);
    assert_eq!(call("os.getrandom(0)").0, Value::Bytes(vec![]));
    assert_eq!(call("os.name").0, Value::Str(osdecl_core::NAME.into()));
}

#[test]
fn os_failure_is_a_runtime_error() {
    let catalog = Catalog::os().unwrap();
    let tmp = tempfile::tempdir().unwrap();
    let missing = tmp.path().join("missing");

    let err = call_str(&catalog, &format!("os.rmdir({})", lit(&missing))).unwrap_err();
    assert!(err.static_errors().is_empty());
    match err.runtime_error() {
        Some(RuntimeError::Os { binding, source }) => {
            assert_eq!(*binding, OsBinding::Rmdir);
            assert_eq!(source.kind(), ErrorKind::NotFound);
        }
        other => panic!("expected an os error, got {other:?}"),
    }
    assert!(err.to_string().starts_with("rmdir: "));
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn static_failures_never_reach_the_os() {
    let catalog = Catalog::os().unwrap();
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path().join("d");

    let src = format!("os.mkdir({}, mode=-1)", lit(&dir));
    let err = call_str(&catalog, &src).unwrap_err();
    assert!(err.runtime_error().is_none());
    assert!(matches!(
        err.static_errors(),
        [Error::ArgumentType { param: "mode", .. }]
    ));
    assert!(!dir.exists());

    let err = check_str(&catalog, "os.mkdr(\"x\")").unwrap_err();
    let rendered = err.to_string();
    assert!(rendered.contains("did you mean `mkdir`?"), "{rendered}");
}

#[test]
fn unsatisfiable_random_size_is_a_runtime_error() {
    let catalog = Catalog::os().unwrap();
    for src in ["os.urandom(1000000000000000)", "os.getrandom(9223372036854775807)"] {
        let err = call_str(&catalog, src).unwrap_err();
        assert!(err.static_errors().is_empty());
        let os_err = err.runtime_error().and_then(RuntimeError::os_error);
        assert_eq!(os_err.map(|e| e.kind()), Some(ErrorKind::OutOfMemory), "{src}");
    }
}

#[test]
fn oversized_mode_is_rejected_by_the_os_layer() {
    let catalog = Catalog::os().unwrap();
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path().join("d");

    let src = format!("os.mkdir({}, mode=5000000000)", lit(&dir));
    let err = call_str(&catalog, &src).unwrap_err();
    assert!(err.static_errors().is_empty());
    match err.runtime_error() {
        Some(RuntimeError::Os { binding, source }) => {
            assert_eq!(*binding, OsBinding::Mkdir);
            assert_eq!(source.kind(), ErrorKind::InvalidInput);
        }
        other => panic!("expected an os error, got {other:?}"),
    }
    assert!(!dir.exists());
}

#[cfg(unix)]
#[test]
fn chmod_through_the_catalog() {
    use std::os::unix::fs::PermissionsExt;

    let tmp = tempfile::tempdir().unwrap();
    let file = tmp.path().join("f");
    std::fs::write(&file, "x").unwrap();

    let (value, ty) = call(&format!("os.chmod({}, 0o600)", lit(&file)));
    assert_eq!((value, ty), (Value::None, Type::None));
    let mode = std::fs::metadata(&file).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);

    call(&format!("chmod(path={}, mode=0o644)", lit(&file)));
    let mode = std::fs::metadata(&file).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o644);
}

#[test]
fn removedirs_through_the_catalog() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(tmp.path().join("keep"), "").unwrap();
    let leaf = tmp.path().join("a/b/c");
    std::fs::create_dir_all(&leaf).unwrap();

    let (value, ty) = call(&format!("os.removedirs({})", lit(&leaf)));
    assert_eq!((value, ty), (Value::None, Type::None));
    assert!(!tmp.path().join("a").exists());
    assert!(tmp.path().join("keep").exists());

    let catalog = Catalog::os().unwrap();
    let err = call_str(&catalog, &format!("os.removedirs({})", lit(&leaf))).unwrap_err();
    assert!(matches!(
        err.runtime_error(),
        Some(RuntimeError::Os { binding: OsBinding::Removedirs, .. })
    ));
}
