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

//! Extensions to [`Errno`] that depend on the real system

use super::super::Errno;

impl Errno {
    /// Returns the current `errno` value.
    ///
    /// This function returns an `Errno` value containing the current `errno`
    /// value, which is the error value of the last system call. Note that
    /// this function should be called immediately after a system call that
    /// sets `errno`, because the value of `errno` may be changed by other
    /// system calls whether or not they succeed.
    #[inline]
    #[must_use]
    pub(super) fn last() -> Self {
        Self(errno::errno().0)
    }

    /// Converts the return value of a system call that returns `-1` on
    /// failure.
    ///
    /// If the result is `-1`, this function returns the [last](Self::last)
    /// error. Otherwise, the result is returned as `Ok`.
    pub(super) fn result_m1(result: libc::c_int) -> super::super::Result<libc::c_int> {
        if result == -1 {
            Err(Self::last())
        } else {
            Ok(result)
        }
    }
}
