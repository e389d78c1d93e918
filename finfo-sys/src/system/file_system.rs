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

//! Items about file systems

use super::{Gid, Uid};
use crate::io::Fd;
use std::fmt::Debug;

#[cfg(unix)]
const RAW_AT_FDCWD: i32 = libc::AT_FDCWD;
#[cfg(not(unix))]
const RAW_AT_FDCWD: i32 = -100;

/// Sentinel for the current working directory
///
/// This value can be passed to system calls named "*at" such as
/// [`fstatat`](super::Fstat::fstatat).
pub const AT_FDCWD: Fd = Fd(RAW_AT_FDCWD);

#[cfg(unix)]
type RawModeDef = libc::mode_t;
#[cfg(not(unix))]
type RawModeDef = u32;

/// Raw file mode type
///
/// This is a type alias for the raw file mode type `mode_t` declared in the
/// [`libc`] crate. The exact representation of this type is
/// platform-dependent while POSIX requires the type to be an integer. On
/// non-Unix platforms, this type is hard-coded to `u32`.
///
/// A raw mode word contains both the file type and the permission bits. The
/// permission bits are usually wrapped in the [`Mode`] type and the file type
/// is extracted with [`classify_type`](crate::classify_type).
pub type RawMode = RawModeDef;

/// Native file-format constants
///
/// These are the `S_IF*` values of the platform. Sockets are a capability of
/// the build target: where the platform has no socket file type,
/// [`S_IFSOCK`](raw::S_IFSOCK) is `None` and no mode word is ever classified
/// as a socket.
pub(crate) mod raw {
    use super::RawMode;

    #[cfg(unix)]
    mod consts {
        use super::RawMode;
        pub const S_IFMT: RawMode = libc::S_IFMT;
        pub const S_IFREG: RawMode = libc::S_IFREG;
        pub const S_IFDIR: RawMode = libc::S_IFDIR;
        pub const S_IFCHR: RawMode = libc::S_IFCHR;
        pub const S_IFBLK: RawMode = libc::S_IFBLK;
        pub const S_IFIFO: RawMode = libc::S_IFIFO;
        pub const S_IFLNK: RawMode = libc::S_IFLNK;
        pub const S_IFSOCK: Option<RawMode> = Some(libc::S_IFSOCK);
    }

    #[cfg(not(unix))]
    mod consts {
        use super::RawMode;
        pub const S_IFMT: RawMode = 0o170000;
        pub const S_IFREG: RawMode = 0o100000;
        pub const S_IFDIR: RawMode = 0o040000;
        pub const S_IFCHR: RawMode = 0o020000;
        pub const S_IFBLK: RawMode = 0o060000;
        pub const S_IFIFO: RawMode = 0o010000;
        pub const S_IFLNK: RawMode = 0o120000;
        pub const S_IFSOCK: Option<RawMode> = None;
    }

    pub use consts::*;
}

bitflags::bitflags! {
    /// Native file permission bits
    ///
    /// This type wraps the permission part of a [raw mode](RawMode) word. The
    /// values are the ones fixed by POSIX for `S_IRUSR` through `S_ISVTX`.
    /// Bits outside the permission part are not representable in this type.
    #[derive(Clone, Copy, Eq, Hash, PartialEq)]
    #[repr(transparent)]
    pub struct Mode: RawMode {
        /// Set-user-ID bit
        const SET_USER_ID = 0o4000;
        /// Set-group-ID bit
        const SET_GROUP_ID = 0o2000;
        /// Sticky bit
        const STICKY = 0o1000;

        /// Read permission for the owner
        const USER_READ = 0o400;
        /// Write permission for the owner
        const USER_WRITE = 0o200;
        /// Execute permission for the owner
        const USER_EXEC = 0o100;
        /// Read, write, and execute permissions for the owner
        const USER_ALL = 0o700;

        /// Read permission for the group
        const GROUP_READ = 0o40;
        /// Write permission for the group
        const GROUP_WRITE = 0o20;
        /// Execute permission for the group
        const GROUP_EXEC = 0o10;
        /// Read, write, and execute permissions for the group
        const GROUP_ALL = 0o70;

        /// Read permission for others
        const OTHER_READ = 0o4;
        /// Write permission for others
        const OTHER_WRITE = 0o2;
        /// Execute permission for others
        const OTHER_EXEC = 0o1;
        /// Read, write, and execute permissions for others
        const OTHER_ALL = 0o7;

        /// Read permission for all
        const ALL_READ = 0o444;
        /// Write permission for all
        const ALL_WRITE = 0o222;
        /// Execute permission for all
        const ALL_EXEC = 0o111;
        /// Read, write, and execute permissions for all
        const ALL_9 = 0o777;
    }
}

impl Debug for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Mode({:#o})", self.bits())
    }
}

/// The default mode is `0o644`, not `0o000`.
impl Default for Mode {
    fn default() -> Mode {
        Mode::from_bits_retain(0o644)
    }
}

/// Point in time in the native `timespec` form
///
/// `sec` counts seconds since the Unix epoch and may be negative. `nsec` is
/// always in the range `0..1_000_000_000`.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct TimeSpec {
    /// Whole seconds since the epoch
    pub sec: i64,
    /// Nanoseconds past `sec`
    pub nsec: u32,
}

impl TimeSpec {
    /// Creates a `TimeSpec` with whole seconds only.
    #[must_use]
    pub const fn from_secs(sec: i64) -> Self {
        Self { sec, nsec: 0 }
    }
}

/// Native file status
///
/// This is the typed counterpart of the `stat` structure filled by the
/// "stat" family of system calls. It is the input to the metadata translator
/// ([`FileInfo::from_stat`](crate::FileInfo::from_stat)).
///
/// `mode` holds the raw mode word, so it contains both the file type and the
/// permission bits.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub struct Stat {
    /// Device ID
    pub dev: u64,
    /// I-node number
    pub ino: u64,
    /// File type and permission bits
    pub mode: RawMode,
    /// Number of hard links
    pub nlink: u64,
    /// User ID of the owner
    pub uid: Uid,
    /// Group ID of the owner
    pub gid: Gid,
    /// File length in bytes
    pub size: u64,
    /// Last access time
    pub atime: TimeSpec,
    /// Last modification time
    pub mtime: TimeSpec,
    /// Last status change time
    pub ctime: TimeSpec,
}
