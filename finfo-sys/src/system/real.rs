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

//! Implementation of the system interfaces that actually interacts with the
//! operating system

mod errno;
mod file_system;

use super::{Chmod, Errno, Fstat, Mode, Result, Stat};
use crate::io::Fd;
use std::ffi::CStr;
use std::mem::MaybeUninit;

/// Implementation of the system interfaces that actually interacts with the
/// system
///
/// `RealSystem` is an empty `struct` because the underlying operating system
/// manages all the state. Every method issues exactly one system call and
/// returns the `errno` value unmodified on failure. Interrupted calls are not
/// retried.
///
/// Since the methods operate only on their arguments, a `RealSystem` can be
/// freely copied and shared between threads.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct RealSystem(());

impl RealSystem {
    /// Returns an instance of `RealSystem`.
    #[must_use]
    pub const fn new() -> Self {
        RealSystem(())
    }
}

impl Fstat for RealSystem {
    fn fstat(&self, fd: Fd) -> Result<Stat> {
        log::trace!("fstat({fd})");
        let mut stat = MaybeUninit::<libc::stat>::uninit();
        let result = unsafe { libc::fstat(fd.0, stat.as_mut_ptr()) };
        Errno::result_m1(result)?;
        Ok(Stat::from_raw(&stat))
    }

    fn fstatat(&self, dir_fd: Fd, path: &CStr, follow_symlinks: bool) -> Result<Stat> {
        log::trace!("fstatat({dir_fd}, {path:?}, follow_symlinks: {follow_symlinks})");
        let flags = if follow_symlinks {
            0
        } else {
            libc::AT_SYMLINK_NOFOLLOW
        };
        let mut stat = MaybeUninit::<libc::stat>::uninit();
        let result = unsafe { libc::fstatat(dir_fd.0, path.as_ptr(), stat.as_mut_ptr(), flags) };
        Errno::result_m1(result)?;
        Ok(Stat::from_raw(&stat))
    }
}

impl Chmod for RealSystem {
    fn chmod(&self, path: &CStr, mode: Mode) -> Result<()> {
        log::trace!("chmod({path:?}, {mode:?})");
        let result = unsafe { libc::chmod(path.as_ptr(), mode.bits()) };
        Errno::result_m1(result).map(drop)
    }
}
