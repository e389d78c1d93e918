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

//! Interfaces to the underlying system
//!
//! The metadata translator obtains native file status through the traits
//! defined in this module rather than calling the operating system directly.
//! Each trait covers one family of system calls:
//!
//! - [`Fstat`] for `fstat`, `stat`, and `lstat`
//! - [`Chmod`] for `chmod`
//!
//! [`System`] is the union of them. There are two implementors:
//! [`RealSystem`] performs the actual system calls, and [`VirtualSystem`]
//! simulates them on an in-memory file system for testing.

mod errno;
mod file_system;
mod id;
#[cfg(unix)]
pub mod real;
pub mod r#virtual;

pub use self::errno::{Errno, RawErrno, Result};
pub use self::file_system::{AT_FDCWD, Mode, RawMode, Stat, TimeSpec};
pub(crate) use self::file_system::raw;
pub use self::id::{Gid, RawGid, RawUid, Uid};
#[cfg(unix)]
pub use self::real::RealSystem;
pub use self::r#virtual::VirtualSystem;
use crate::io::Fd;
use std::ffi::CStr;
use std::fmt::Debug;

/// Trait for retrieving file status
pub trait Fstat {
    /// Retrieves metadata of an open file.
    ///
    /// This is a thin wrapper around the [`fstat` system
    /// call](https://pubs.opengroup.org/onlinepubs/9799919799/functions/fstat.html).
    /// The file descriptor is neither closed nor duplicated.
    fn fstat(&self, fd: Fd) -> Result<Stat>;

    /// Retrieves metadata of a file by pathname.
    ///
    /// This is a thin wrapper around the [`fstatat` system
    /// call](https://pubs.opengroup.org/onlinepubs/9799919799/functions/fstatat.html).
    /// A relative `path` is resolved from `dir_fd`, which may be
    /// [`AT_FDCWD`]. If `follow_symlinks` is `false` and the last component
    /// of `path` names a symbolic link, the link itself is examined.
    fn fstatat(&self, dir_fd: Fd, path: &CStr, follow_symlinks: bool) -> Result<Stat>;
}

/// Trait for changing file permissions
pub trait Chmod {
    /// Changes the permission bits of a file.
    ///
    /// This is a thin wrapper around the [`chmod` system
    /// call](https://pubs.opengroup.org/onlinepubs/9799919799/functions/chmod.html).
    /// Symbolic links in `path` are followed.
    fn chmod(&self, path: &CStr, mode: Mode) -> Result<()>;
}

/// API to the system-managed file metadata
///
/// This trait is implemented for every type that implements all of the
/// system call traits of this module.
pub trait System: Chmod + Debug + Fstat {}

impl<T: Chmod + Debug + Fstat + ?Sized> System for T {}

impl<T: Fstat + ?Sized> Fstat for &T {
    #[inline]
    fn fstat(&self, fd: Fd) -> Result<Stat> {
        (**self).fstat(fd)
    }

    #[inline]
    fn fstatat(&self, dir_fd: Fd, path: &CStr, follow_symlinks: bool) -> Result<Stat> {
        (**self).fstatat(dir_fd, path, follow_symlinks)
    }
}

impl<T: Chmod + ?Sized> Chmod for &T {
    #[inline]
    fn chmod(&self, path: &CStr, mode: Mode) -> Result<()> {
        (**self).chmod(path, mode)
    }
}
