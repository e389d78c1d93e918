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

//! This crate translates native file status into platform-neutral file
//! information.
//!
//! The "stat" family of system calls describes a file with a structure whose
//! layout, field widths, and mode-bit encoding depend on the platform. This
//! crate converts that structure into a [`FileInfo`], which has a
//! [file type](FileType) classified from the mode word,
//! [permissions](Permissions) in a neutral bit layout, and
//! [timestamps](Timestamp) in microseconds since the epoch.
//!
//! The [`query_by_descriptor`] and [`query_by_path`] functions return the
//! information for an open file and a pathname, respectively.
//! [`set_permissions`] goes the other way and applies neutral permissions to
//! a file.
//!
//! These functions reach the operating system through the traits in the
//! [`system`] module. Pass a [`RealSystem`] to operate on real files, or a
//! [`VirtualSystem`] to operate on a simulated file system:
//!
//! ```
//! # #[cfg(unix)] {
//! use finfo_sys::{FileType, Pool, RealSystem, query_by_path};
//!
//! let info = query_by_path(&RealSystem::new(), "/", true, &Pool::new()).unwrap();
//! assert_eq!(info.file_type, FileType::Directory);
//! # }
//! ```
//!
//! Failures are reported as the [`Errno`] returned by the system, without
//! interpretation.

pub mod file_type;
pub mod info;
pub mod io;
pub mod permission;
pub mod system;
pub mod time;

pub use self::file_type::{FileType, classify_type};
pub use self::info::{FileInfo, Pool, query_by_descriptor, query_by_path, set_permissions};
pub use self::io::Fd;
pub use self::permission::{Permissions, native_to_neutral, neutral_to_native};
#[cfg(unix)]
pub use self::system::RealSystem;
pub use self::system::{Errno, Mode, Result, Stat, System, VirtualSystem};
pub use self::time::Timestamp;
