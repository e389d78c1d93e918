// This file is part of finfo, a portable file information library.
// Copyright (C) 2026 The finfo contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! File information queries
//!
//! This module implements the metadata translator. [`FileInfo::from_stat`]
//! converts a native [`Stat`] into a platform-neutral [`FileInfo`], and the
//! query functions obtain the `Stat` from the [system](crate::system):
//!
//! - [`query_by_descriptor`] examines an open file.
//! - [`query_by_path`] examines a file by pathname, optionally following a
//!   final symbolic link.
//! - [`set_permissions`] changes the permission bits of a file.
//!
//! Every function either returns a fully populated result or the error
//! reported by the system. No retries are made and nothing is written on
//! failure.

use crate::file_type::{FileType, classify_type};
use crate::io::Fd;
use crate::permission::{Permissions, native_to_neutral, neutral_to_native};
use crate::system::{AT_FDCWD, Chmod, Errno, Fstat, Gid, Mode, Result, Stat, Uid};
use crate::time::Timestamp;
use std::ffi::CString;

/// Allocation scope
///
/// Path-based queries accept a pool for symmetry with the other operations
/// of the portability library. The result of a query is a plain value owned
/// by the caller, so nothing is ever allocated from the pool.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Pool(());

impl Pool {
    /// Creates a new pool.
    #[must_use]
    pub const fn new() -> Self {
        Pool(())
    }
}

/// Platform-neutral file information
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct FileInfo {
    /// Access permissions
    pub permissions: Permissions,
    /// Type of the file
    pub file_type: FileType,
    /// Owner user ID
    pub user: Uid,
    /// Owner group ID
    pub group: Gid,
    /// Size of the file in bytes
    pub size: u64,
    /// I-node number
    ///
    /// Together with [`device`](Self::device), this identifies the file
    /// within the system.
    pub inode: u64,
    /// ID of the device containing the file
    pub device: u64,
    /// Time of last access
    pub atime: Timestamp,
    /// Time of last data modification
    pub mtime: Timestamp,
    /// Time of last status change
    pub ctime: Timestamp,
}

impl FileInfo {
    /// Converts a native file status.
    ///
    /// The file type comes from [`classify_type`] and the permissions from
    /// [`native_to_neutral`]. The other fields are copied, with times
    /// converted to [`Timestamp`].
    #[must_use]
    pub fn from_stat(stat: &Stat) -> Self {
        FileInfo {
            permissions: native_to_neutral(Mode::from_bits_truncate(stat.mode)),
            file_type: classify_type(stat.mode),
            user: stat.uid,
            group: stat.gid,
            size: stat.size,
            inode: stat.ino,
            device: stat.dev,
            atime: stat.atime.into(),
            mtime: stat.mtime.into(),
            ctime: stat.ctime.into(),
        }
    }

    /// Tests whether the two records describe the same file.
    ///
    /// This compares the device ID and i-node number only.
    #[must_use]
    pub const fn is_same_file_as(&self, other: &Self) -> bool {
        self.device == other.device && self.inode == other.inode
    }
}

impl From<Stat> for FileInfo {
    #[inline]
    fn from(stat: Stat) -> Self {
        FileInfo::from_stat(&stat)
    }
}

/// Converts a pathname to a C string.
///
/// Fails with [`Errno::EINVAL`] if the pathname contains a nul byte.
fn to_c_path<P: AsRef<[u8]>>(path: P) -> Result<CString> {
    CString::new(path.as_ref()).map_err(|_| Errno::EINVAL)
}

/// Returns information about an open file.
///
/// The file is given as anything convertible to an [`Fd`], such as a
/// reference to a [`File`](std::fs::File). The descriptor is neither closed
/// nor duplicated.
pub fn query_by_descriptor<S, F>(system: &S, file: F) -> Result<FileInfo>
where
    S: Fstat + ?Sized,
    F: Into<Fd>,
{
    let fd = file.into();
    match system.fstat(fd) {
        Ok(stat) => Ok(FileInfo::from_stat(&stat)),
        Err(errno) => {
            log::debug!("cannot get status of descriptor {fd}: {errno}");
            Err(errno)
        }
    }
}

/// Returns information about the file at `path`.
///
/// If `follow_symlinks` is true, a symbolic link at the end of `path` is
/// followed and its target is examined, as with `stat`. Otherwise, the link
/// itself is examined, as with `lstat`.
///
/// The pool is not used.
pub fn query_by_path<S, P>(
    system: &S,
    path: P,
    follow_symlinks: bool,
    _pool: &Pool,
) -> Result<FileInfo>
where
    S: Fstat + ?Sized,
    P: AsRef<[u8]>,
{
    let path = to_c_path(path)?;
    match system.fstatat(AT_FDCWD, &path, follow_symlinks) {
        Ok(stat) => Ok(FileInfo::from_stat(&stat)),
        Err(errno) => {
            log::debug!("cannot get status of {path:?}: {errno}");
            Err(errno)
        }
    }
}

/// Changes the permission bits of the file at `path`.
///
/// The neutral permissions are converted with [`neutral_to_native`] and
/// applied with `chmod`. Symbolic links are followed.
pub fn set_permissions<S, P>(system: &S, path: P, permissions: Permissions) -> Result<()>
where
    S: Chmod + ?Sized,
    P: AsRef<[u8]>,
{
    let path = to_c_path(path)?;
    let mode = neutral_to_native(permissions);
    system.chmod(&path, mode).inspect_err(|errno| {
        log::debug!("cannot change mode of {path:?} to {mode:?}: {errno}");
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::TimeSpec;
    use crate::system::r#virtual::{FileBody, Inode, VirtualSystem};
    use assert_matches::assert_matches;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn save(system: &VirtualSystem, path: &str, inode: Inode) {
        let file = Rc::new(RefCell::new(inode));
        let mut state = system.state.borrow_mut();
        state.file_system.save(path, file).unwrap();
    }

    #[test]
    fn from_stat_copies_every_field() {
        let stat = Stat {
            dev: 7,
            ino: 1234,
            mode: crate::system::raw::S_IFREG | 0o640,
            nlink: 2,
            uid: Uid(1000),
            gid: Gid(100),
            size: 4096,
            atime: TimeSpec {
                sec: 10,
                nsec: 1_000,
            },
            mtime: TimeSpec::from_secs(20),
            ctime: TimeSpec::from_secs(30),
        };
        let info = FileInfo::from_stat(&stat);
        assert_eq!(info.permissions, Permissions::from_bits_retain(0x0640));
        assert_eq!(info.file_type, FileType::Regular);
        assert_eq!(info.user, Uid(1000));
        assert_eq!(info.group, Gid(100));
        assert_eq!(info.size, 4096);
        assert_eq!(info.inode, 1234);
        assert_eq!(info.device, 7);
        assert_eq!(info.atime, Timestamp(10_000_001));
        assert_eq!(info.mtime, Timestamp::from_secs(20));
        assert_eq!(info.ctime, Timestamp::from_secs(30));
    }

    #[test]
    fn same_file() {
        let stat = Stat {
            dev: 1,
            ino: 2,
            ..Stat::default()
        };
        let a = FileInfo::from_stat(&stat);
        let b = FileInfo { size: 100, ..a };
        let c = FileInfo { inode: 3, ..a };
        let d = FileInfo { device: 3, ..a };
        assert!(a.is_same_file_as(&b));
        assert!(!a.is_same_file_as(&c));
        assert!(!a.is_same_file_as(&d));
    }

    #[test]
    fn query_regular_file_scenario() {
        let system = VirtualSystem::new();
        save(&system, "/file", Inode::new(""));

        let info = query_by_path(&system, "/file", true, &Pool::new()).unwrap();
        assert_eq!(info.file_type, FileType::Regular);
        assert_eq!(info.permissions.to_string(), "rw-r--r--");
        assert_eq!(info.size, 0);

        let rw_all = Permissions::USER_READ
            | Permissions::USER_WRITE
            | Permissions::GROUP_READ
            | Permissions::GROUP_WRITE
            | Permissions::WORLD_READ
            | Permissions::WORLD_WRITE;
        set_permissions(&system, "/file", rw_all).unwrap();

        let info = query_by_path(&system, "/file", true, &Pool::new()).unwrap();
        assert_eq!(info.permissions, rw_all);
        assert_eq!(info.permissions.to_string(), "rw-rw-rw-");
    }

    #[test]
    fn query_by_path_and_by_descriptor_agree() {
        let system = VirtualSystem::new();
        save(&system, "/dir/file", Inode::new("some content"));
        let fd = system.open(c"/dir/file").unwrap();

        let by_path = query_by_path(&system, "/dir/file", true, &Pool::new()).unwrap();
        let by_fd = query_by_descriptor(&system, fd).unwrap();
        assert_eq!(by_path.inode, by_fd.inode);
        assert_eq!(by_path.device, by_fd.device);
        assert_eq!(by_path.size, by_fd.size);
        assert!(by_path.is_same_file_as(&by_fd));
    }

    #[test]
    fn query_symlink_with_and_without_following() {
        let system = VirtualSystem::new();
        save(&system, "/dir", Inode::directory());
        save(&system, "/link", Inode::symlink("dir"));

        let link = query_by_path(&system, "/link", false, &Pool::new()).unwrap();
        assert_eq!(link.file_type, FileType::Symlink);
        let target = query_by_path(&system, "/link", true, &Pool::new()).unwrap();
        assert_eq!(target.file_type, FileType::Directory);
    }

    #[test]
    fn query_each_file_type() {
        let system = VirtualSystem::new();
        let bodies = [
            ("/fifo", FileBody::Fifo, FileType::Pipe),
            ("/chr", FileBody::CharacterDevice, FileType::CharacterDevice),
            ("/blk", FileBody::BlockDevice, FileType::BlockDevice),
            ("/sock", FileBody::Socket, FileType::Socket),
        ];
        for (path, body, file_type) in bodies {
            save(&system, path, Inode::with_body(body));
            let info = query_by_path(&system, path, false, &Pool::new()).unwrap();
            assert_eq!(info.file_type, file_type, "{path}");
        }
    }

    #[test]
    fn query_non_existent_path() {
        let system = VirtualSystem::new();
        let result = query_by_path(&system, "/no/such/file", true, &Pool::new());
        assert_eq!(result, Err(Errno::ENOENT));
    }

    #[test]
    fn query_path_with_nul_byte() {
        let system = VirtualSystem::new();
        let result = query_by_path(&system, "/a\0b", true, &Pool::new());
        assert_eq!(result, Err(Errno::EINVAL));
    }

    #[test]
    fn query_closed_descriptor() {
        let system = VirtualSystem::new();
        assert_matches!(query_by_descriptor(&system, Fd(42)), Err(Errno::EBADF));
    }

    #[test]
    fn set_permissions_on_non_existent_path() {
        let system = VirtualSystem::new();
        let result = set_permissions(&system, "/no/such/file", Permissions::OS_DEFAULT);
        assert_eq!(result, Err(Errno::ENOENT));
    }

    #[test]
    fn set_permissions_with_special_bits() {
        let system = VirtualSystem::new();
        save(&system, "/dir", Inode::directory());
        let permissions = Permissions::from_bits_retain(0x2777);
        set_permissions(&system, "/dir", permissions).unwrap();

        let info = query_by_path(&system, "/dir", true, &Pool::new()).unwrap();
        assert_eq!(info.permissions, permissions);
        assert_eq!(info.permissions.to_string(), "rwxrwxrwt");
    }
}
