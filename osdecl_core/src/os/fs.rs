/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use std::env;
use std::fs;
use std::io;
use std::path::Path;

pub fn chdir(path: impl AsRef<Path>) -> io::Result<()> {
    env::set_current_dir(path)
}

/// Sets the permission bits of `path` to `mode`.
///
/// Outside of Unix only the owner-write bit is meaningful: clearing it makes the file read-only.
#[cfg(unix)]
pub fn chmod(path: impl AsRef<Path>, mode: u32) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(mode))
}

#[cfg(not(unix))]
pub fn chmod(path: impl AsRef<Path>, mode: u32) -> io::Result<()> {
    let path = path.as_ref();
    let mut perms = fs::metadata(path)?.permissions();
    perms.set_readonly(mode & 0o200 == 0);
    fs::set_permissions(path, perms)
}

pub fn getcwd() -> io::Result<String> {
    let cwd = env::current_dir()?;
    Ok(cwd.to_string_lossy().into_owned())
}

/// Names of the entries in the directory `path`, in the order the OS returns them.
pub fn listdir(path: impl AsRef<Path>) -> io::Result<Vec<String>> {
    let mut names = vec![];
    for entry in fs::read_dir(path)? {
        let entry = entry?;
        names.push(entry.file_name().to_string_lossy().into_owned());
    }
    Ok(names)
}

/// Creates the directory `path`. On Unix `mode` is applied, masked by the process umask.
#[cfg(unix)]
pub fn mkdir(path: impl AsRef<Path>, mode: u32) -> io::Result<()> {
    use std::os::unix::fs::DirBuilderExt;
    fs::DirBuilder::new().mode(mode).create(path)
}

#[cfg(not(unix))]
pub fn mkdir(path: impl AsRef<Path>, _mode: u32) -> io::Result<()> {
    fs::create_dir(path)
}

pub fn remove(path: impl AsRef<Path>) -> io::Result<()> {
    fs::remove_file(path)
}

/// Removes the directory `path`, then each of its parent components until one cannot be removed.
///
/// Only a failure to remove `path` itself is reported.
pub fn removedirs(path: impl AsRef<Path>) -> io::Result<()> {
    let path = path.as_ref();
    fs::remove_dir(path)?;
    let mut current = path.parent();
    while let Some(dir) = current
        && !dir.as_os_str().is_empty()
    {
        if fs::remove_dir(dir).is_err() {
            break;
        }
        current = dir.parent();
    }
    Ok(())
}

pub fn rename(src: impl AsRef<Path>, dst: impl AsRef<Path>) -> io::Result<()> {
    fs::rename(src, dst)
}

pub fn rmdir(path: impl AsRef<Path>) -> io::Result<()> {
    fs::remove_dir(path)
}
