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

//! Extension to [`Stat`] for the real system

use super::super::{Gid, Stat, TimeSpec, Uid};
use std::mem::MaybeUninit;

/// Reads a `timespec`-like pair of fields from a raw `stat` structure.
macro_rules! time_field {
    ($ptr:expr, $sec:ident, $nsec:ident) => {
        TimeSpec {
            sec: unsafe { (&raw const (*$ptr).$sec).read() } as _,
            nsec: unsafe { (&raw const (*$ptr).$nsec).read() } as _,
        }
    };
}

impl Stat {
    /// Converts a raw `stat` structure to a `Stat` object.
    ///
    /// This function requires the `stat` structure to be initialized, but it is
    /// passed as `MaybeUninit` because of possible padding or extension fields
    /// in the structure which may not be initialized by the `stat` system call.
    #[must_use]
    pub(super) fn from_raw(stat: &MaybeUninit<libc::stat>) -> Self {
        let ptr = stat.as_ptr();
        Self {
            dev: unsafe { (&raw const (*ptr).st_dev).read() } as _,
            ino: unsafe { (&raw const (*ptr).st_ino).read() } as _,
            mode: unsafe { (&raw const (*ptr).st_mode).read() },
            nlink: unsafe { (&raw const (*ptr).st_nlink).read() } as _,
            uid: Uid(unsafe { (&raw const (*ptr).st_uid).read() }),
            gid: Gid(unsafe { (&raw const (*ptr).st_gid).read() }),
            size: unsafe { (&raw const (*ptr).st_size).read() } as _,
            atime: time_field!(ptr, st_atime, st_atime_nsec),
            mtime: time_field!(ptr, st_mtime, st_mtime_nsec),
            ctime: time_field!(ptr, st_ctime, st_ctime_nsec),
        }
    }
}
