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

//! Platform-neutral time values

use crate::system::TimeSpec;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Number of microseconds in a second
pub const USEC_PER_SEC: i64 = 1_000_000;

/// Point in time
///
/// The value is the number of microseconds since the Unix epoch
/// (1970-01-01T00:00:00Z). Negative values denote times before the epoch.
/// Native time values with a finer resolution are truncated toward negative
/// infinity.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[repr(transparent)]
pub struct Timestamp(pub i64);

impl Timestamp {
    /// The Unix epoch
    pub const EPOCH: Timestamp = Timestamp(0);

    /// Converts seconds since the epoch.
    #[must_use]
    pub const fn from_secs(secs: i64) -> Self {
        Timestamp(secs.saturating_mul(USEC_PER_SEC))
    }

    /// Converts a native `timespec` value.
    #[must_use]
    pub const fn from_timespec(time: TimeSpec) -> Self {
        let micros = (time.nsec / 1_000) as i64;
        Timestamp(time.sec.saturating_mul(USEC_PER_SEC).saturating_add(micros))
    }

    /// Returns the whole seconds since the epoch.
    ///
    /// For a time before the epoch, this is rounded toward negative infinity
    /// so that [`subsec_micros`](Self::subsec_micros) is never negative.
    #[must_use]
    pub const fn as_secs(self) -> i64 {
        self.0.div_euclid(USEC_PER_SEC)
    }

    /// Returns the fractional part of the second in microseconds.
    #[must_use]
    pub const fn subsec_micros(self) -> u32 {
        self.0.rem_euclid(USEC_PER_SEC) as u32
    }

    /// Converts this timestamp to a [`SystemTime`].
    #[must_use]
    pub fn to_system_time(self) -> SystemTime {
        let magnitude = Duration::from_micros(self.0.unsigned_abs());
        if self.0 >= 0 {
            UNIX_EPOCH + magnitude
        } else {
            UNIX_EPOCH - magnitude
        }
    }
}

impl From<TimeSpec> for Timestamp {
    #[inline]
    fn from(time: TimeSpec) -> Self {
        Timestamp::from_timespec(time)
    }
}

impl From<SystemTime> for Timestamp {
    fn from(time: SystemTime) -> Self {
        let micros = match time.duration_since(UNIX_EPOCH) {
            Ok(after) => i64::try_from(after.as_micros()).unwrap_or(i64::MAX),
            Err(before) => i64::try_from(before.duration().as_micros())
                .map(|micros| -micros)
                .unwrap_or(i64::MIN),
        };
        Timestamp(micros)
    }
}

/// Formats the timestamp as seconds and microseconds since the epoch, such
/// as `1700000000.250000`.
impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{:06}", self.as_secs(), self.subsec_micros())
    }
}
