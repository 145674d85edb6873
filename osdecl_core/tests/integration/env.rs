/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

// Every test uses its own variable names; the environment is shared by the whole test binary.

use osdecl_core::os::{self, EnvVar};

#[test]
fn absent_key_returns_default_unmodified() {
    let key = "OSDECL_TEST_ABSENT";
    assert_eq!(os::getenv(key, 42), EnvVar::Default(42));
    assert_eq!(os::getenv(key, None::<String>), EnvVar::Default(None));
    assert_eq!(os::getenv(key, vec![1u8, 2]).into_result(), Err(vec![1, 2]));
}

#[test]
fn putenv_then_getenv() {
    let key = "OSDECL_TEST_PUT";
    os::putenv(key, "first").unwrap();
    assert_eq!(os::getenv(key, ()), EnvVar::Set("first".to_string()));
    os::putenv(key, "").unwrap();
    assert_eq!(os::getenv(key, "fallback".to_string()).into_string(), "");
    assert!(os::getenv(key, ()).is_set());
}

#[test]
fn putenv_is_visible_to_children() {
    os::putenv("OSDECL_TEST_CHILD", "inherited").unwrap();
    assert_eq!(std::env::var("OSDECL_TEST_CHILD").unwrap(), "inherited");

    #[cfg(unix)]
    {
        let output = utils::command!("sh"; "-c", "printf %s \"$OSDECL_TEST_CHILD\"").unwrap();
        assert_eq!(String::from_utf8_lossy(&output.stdout), "inherited");
    }
}

#[test]
fn putenv_rejects_malformed_input() {
    for key in ["", "A=B", "NUL\0KEY"] {
        let err = os::putenv(key, "v").unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidInput);
    }
    let err = os::putenv("OSDECL_TEST_NUL_VALUE", "a\0b").unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::InvalidInput);
    assert!(!os::getenv("OSDECL_TEST_NUL_VALUE", ()).is_set());
}
