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

//! File descriptors

use std::ffi::c_int;
#[cfg(unix)]
use std::os::fd::{AsRawFd, RawFd};

/// File descriptor
///
/// This is the descriptor number of a file resource that has already been
/// opened by some other part of the program. Functions of this crate that
/// accept an `Fd` only inspect the resource; they never close or duplicate
/// it.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[repr(transparent)]
pub struct Fd(pub c_int);

impl Fd {
    /// File descriptor for the standard input
    pub const STDIN: Fd = Fd(0);
    /// File descriptor for the standard output
    pub const STDOUT: Fd = Fd(1);
    /// File descriptor for the standard error
    pub const STDERR: Fd = Fd(2);
}

impl std::fmt::Display for Fd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(unix)]
impl AsRawFd for Fd {
    #[inline]
    fn as_raw_fd(&self) -> RawFd {
        self.0
    }
}

/// Borrows the descriptor number of any open resource.
///
/// This allows passing a [`File`](std::fs::File), a socket, or any other
/// type that exposes its descriptor where an `Fd` is expected. The resource
/// remains owned by the caller.
#[cfg(unix)]
impl<T: AsRawFd + ?Sized> From<&T> for Fd {
    #[inline]
    fn from(resource: &T) -> Self {
        Fd(resource.as_raw_fd())
    }
}
