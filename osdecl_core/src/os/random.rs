/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use rand::RngCore;
use rand::TryRngCore;
use rand::rngs::OsRng;
use std::io;

/// `size` bytes read directly from the operating system's entropy source.
pub fn getrandom(size: usize) -> io::Result<Vec<u8>> {
    let mut buf = zeroed(size)?;
    OsRng.try_fill_bytes(&mut buf).map_err(io::Error::other)?;
    Ok(buf)
}

/// `size` bytes from the thread-local CSPRNG, which is seeded from the operating system and never blocks.
pub fn urandom(size: usize) -> io::Result<Vec<u8>> {
    let mut buf = zeroed(size)?;
    rand::rng().fill_bytes(&mut buf);
    Ok(buf)
}

// A size the allocator cannot satisfy is an error, not an abort.
fn zeroed(size: usize) -> io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(size)
        .map_err(|e| io::Error::new(io::ErrorKind::OutOfMemory, e))?;
    buf.resize(size, 0);
    Ok(buf)
}
