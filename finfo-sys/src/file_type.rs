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

//! File type classification

use crate::system::RawMode;
use crate::system::raw;
use strum::EnumIter;

/// Type of a file
///
/// A file has exactly one type. [`classify_type`] derives it from the format
/// bits of a native mode word.
#[derive(Clone, Copy, Debug, EnumIter, Eq, Hash, PartialEq)]
pub enum FileType {
    /// Regular file
    Regular,
    /// Directory
    Directory,
    /// Character special file
    CharacterDevice,
    /// Block special file
    BlockDevice,
    /// Named pipe (FIFO)
    Pipe,
    /// Symbolic link
    Symlink,
    /// Socket
    Socket,
    /// File of a type not listed above
    Unknown,
}

impl FileType {
    /// Returns a human-readable name of the file type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            FileType::Regular => "regular file",
            FileType::Directory => "directory",
            FileType::CharacterDevice => "character special file",
            FileType::BlockDevice => "block special file",
            FileType::Pipe => "fifo",
            FileType::Symlink => "symbolic link",
            FileType::Socket => "socket",
            FileType::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for FileType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.as_str().fmt(f)
    }
}

/// Classifies a native mode word into a [`FileType`].
///
/// Only the format bits (`S_IFMT`) of `mode` are examined, so the permission
/// bits do not affect the result. The native format values are mutually
/// exclusive, so at most one type can match. A word whose format bits match
/// none of the known types yields [`FileType::Unknown`].
///
/// Sockets are recognized only on platforms that have a socket file type.
#[must_use]
pub const fn classify_type(mode: RawMode) -> FileType {
    let format = mode & raw::S_IFMT;
    match format {
        raw::S_IFREG => FileType::Regular,
        raw::S_IFDIR => FileType::Directory,
        raw::S_IFCHR => FileType::CharacterDevice,
        raw::S_IFBLK => FileType::BlockDevice,
        raw::S_IFIFO => FileType::Pipe,
        raw::S_IFLNK => FileType::Symlink,
        _ => match raw::S_IFSOCK {
            Some(socket) if format == socket => FileType::Socket,
            _ => FileType::Unknown,
        },
    }
}
