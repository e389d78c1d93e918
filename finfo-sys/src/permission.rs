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

//! Platform-neutral permission bits
//!
//! [`Permissions`] encodes read, write, and execute permissions for the owner,
//! the group, and others independently of the platform's `mode_t` layout.
//! [`native_to_neutral`] and [`neutral_to_native`] convert between the two
//! encodings. The conversion is lossless: every bit of one encoding has
//! exactly one counterpart in the other.

use crate::system::Mode;

bitflags::bitflags! {
    /// Neutral permission bits
    ///
    /// Each group of permissions occupies its own hexadecimal digit: the
    /// owner in `0x700`, the group in `0x070`, and others in `0x007`. The
    /// set-user-ID, set-group-ID, and sticky bits occupy the top digit.
    #[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
    #[repr(transparent)]
    pub struct Permissions: u16 {
        /// Set-user-ID
        const USER_SETID = 0x8000;
        /// Read permission for the owner
        const USER_READ = 0x0400;
        /// Write permission for the owner
        const USER_WRITE = 0x0200;
        /// Execute permission for the owner
        const USER_EXECUTE = 0x0100;

        /// Set-group-ID
        const GROUP_SETID = 0x4000;
        /// Read permission for the group
        const GROUP_READ = 0x0040;
        /// Write permission for the group
        const GROUP_WRITE = 0x0020;
        /// Execute permission for the group
        const GROUP_EXECUTE = 0x0010;

        /// Sticky bit
        const WORLD_STICKY = 0x2000;
        /// Read permission for others
        const WORLD_READ = 0x0004;
        /// Write permission for others
        const WORLD_WRITE = 0x0002;
        /// Execute permission for others
        const WORLD_EXECUTE = 0x0001;

        /// Read and write permissions for the owner, read permission for the
        /// group and others (`rw-r--r--`)
        const OS_DEFAULT = 0x0644;
    }
}

/// Pairs of corresponding bits in the two encodings
const MAPPING: [(Mode, Permissions); 12] = [
    (Mode::SET_USER_ID, Permissions::USER_SETID),
    (Mode::USER_READ, Permissions::USER_READ),
    (Mode::USER_WRITE, Permissions::USER_WRITE),
    (Mode::USER_EXEC, Permissions::USER_EXECUTE),
    (Mode::SET_GROUP_ID, Permissions::GROUP_SETID),
    (Mode::GROUP_READ, Permissions::GROUP_READ),
    (Mode::GROUP_WRITE, Permissions::GROUP_WRITE),
    (Mode::GROUP_EXEC, Permissions::GROUP_EXECUTE),
    (Mode::STICKY, Permissions::WORLD_STICKY),
    (Mode::OTHER_READ, Permissions::WORLD_READ),
    (Mode::OTHER_WRITE, Permissions::WORLD_WRITE),
    (Mode::OTHER_EXEC, Permissions::WORLD_EXECUTE),
];

/// Converts native permission bits to neutral ones.
#[must_use]
pub fn native_to_neutral(mode: Mode) -> Permissions {
    MAPPING
        .iter()
        .filter(|(native, _)| mode.contains(*native))
        .fold(Permissions::empty(), |acc, &(_, neutral)| acc | neutral)
}

/// Converts neutral permission bits to native ones.
#[must_use]
pub fn neutral_to_native(permissions: Permissions) -> Mode {
    MAPPING
        .iter()
        .filter(|(_, neutral)| permissions.contains(*neutral))
        .fold(Mode::empty(), |acc, &(native, _)| acc | native)
}

impl From<Mode> for Permissions {
    #[inline]
    fn from(mode: Mode) -> Self {
        native_to_neutral(mode)
    }
}

impl From<Permissions> for Mode {
    #[inline]
    fn from(permissions: Permissions) -> Self {
        neutral_to_native(permissions)
    }
}

/// Formats the permissions in the style of `ls -l`, such as `rwxr-xr-x`.
///
/// The set-ID and sticky bits are shown in the execute position as `s`/`S`
/// and `t`/`T`, the lower-case letter meaning the execute bit is also set.
impl std::fmt::Display for Permissions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use std::fmt::Write as _;

        let triplets = [
            (
                Permissions::USER_READ,
                Permissions::USER_WRITE,
                Permissions::USER_EXECUTE,
                Permissions::USER_SETID,
                's',
            ),
            (
                Permissions::GROUP_READ,
                Permissions::GROUP_WRITE,
                Permissions::GROUP_EXECUTE,
                Permissions::GROUP_SETID,
                's',
            ),
            (
                Permissions::WORLD_READ,
                Permissions::WORLD_WRITE,
                Permissions::WORLD_EXECUTE,
                Permissions::WORLD_STICKY,
                't',
            ),
        ];
        for (read, write, execute, special, letter) in triplets {
            f.write_char(if self.contains(read) { 'r' } else { '-' })?;
            f.write_char(if self.contains(write) { 'w' } else { '-' })?;
            f.write_char(match (self.contains(execute), self.contains(special)) {
                (false, false) => '-',
                (true, false) => 'x',
                (true, true) => letter,
                (false, true) => letter.to_ascii_uppercase(),
            })?;
        }
        Ok(())
    }
}
