/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use osdecl_core::os;

#[test]
fn exact_lengths() {
    for size in [0, 1, 16, 1000] {
        assert_eq!(os::getrandom(size).unwrap().len(), size);
        assert_eq!(os::urandom(size).unwrap().len(), size);
    }
}

#[test]
fn successive_draws_differ() {
    assert_ne!(os::getrandom(32).unwrap(), os::getrandom(32).unwrap());
    assert_ne!(os::urandom(32).unwrap(), os::urandom(32).unwrap());
}
