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

//! System simulated in Rust
//!
//! [`VirtualSystem`] is a pure Rust implementation of the system interfaces
//! that simulates the behavior of the underlying system without any
//! interaction with the actual system. `VirtualSystem` is used for testing
//! the metadata translator in unit tests.
//!
//! # File system
//!
//! Regular files, directories, named pipes, symbolic links, character and
//! block devices, and sockets are supported. Pathname resolution follows
//! symbolic links and understands the `.` and `..` components. There is no
//! current working directory other than the root directory.
//!
//! # File descriptors
//!
//! Files can be opened with [`VirtualSystem::open`] to obtain a descriptor
//! for [`fstat`](Fstat::fstat). Descriptors do not support I/O.
//!
//! # Time
//!
//! The system has a clock ([`SystemState::now`]) that tests can set. It is
//! recorded as the change time of a file whose permissions are changed.

mod file_system;

pub use self::file_system::*;
use super::{AT_FDCWD, Chmod, Errno, Fstat, Mode, Result, Stat, TimeSpec};
use crate::io::Fd;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::ffi::CStr;
use std::rc::Rc;

/// Lowest descriptor number returned by [`VirtualSystem::open`]
///
/// Descriptors below this number are left for the standard input, output,
/// and error, which the virtual system does not open by default.
pub const MIN_OPEN_FD: Fd = Fd(3);

/// Device ID of every file in the virtual file system
pub const DEVICE_ID: u64 = 1;

/// Simulated system
///
/// See the [module-level documentation](self) to grasp a basic understanding
/// of `VirtualSystem`.
///
/// A `VirtualSystem` is a shared handle to a [`SystemState`]. Cloning the
/// handle does not copy the state. Since the state is reference-counted
/// without synchronization, `VirtualSystem` is neither `Send` nor `Sync`.
#[derive(Clone, Debug, Default)]
pub struct VirtualSystem {
    /// State of the system
    pub state: Rc<RefCell<SystemState>>,
}

/// State of the virtual system
#[derive(Clone, Debug, Default)]
pub struct SystemState {
    /// File system
    pub file_system: FileSystem,
    /// Open files indexed by descriptor
    pub open_files: BTreeMap<Fd, Rc<RefCell<Inode>>>,
    /// Current time
    pub now: TimeSpec,
}

impl VirtualSystem {
    /// Creates a virtual system with an empty root directory.
    #[must_use]
    pub fn new() -> VirtualSystem {
        VirtualSystem::default()
    }

    /// Opens a file.
    ///
    /// Symbolic links are followed. The new descriptor is the lowest unused
    /// one not less than [`MIN_OPEN_FD`].
    pub fn open(&self, path: &CStr) -> Result<Fd> {
        let mut state = self.state.borrow_mut();
        let file = state
            .file_system
            .resolve(&state.file_system.root, path.to_bytes(), true)?;

        let mut fd = MIN_OPEN_FD;
        for &used in state.open_files.keys() {
            if used > fd {
                break;
            }
            if used == fd {
                fd = Fd(fd.0 + 1);
            }
        }
        state.open_files.insert(fd, file);
        Ok(fd)
    }

    /// Closes a descriptor opened by [`open`](Self::open).
    pub fn close(&self, fd: Fd) -> Result<()> {
        match self.state.borrow_mut().open_files.remove(&fd) {
            Some(_) => Ok(()),
            None => Err(Errno::EBADF),
        }
    }

    fn open_file(&self, fd: Fd) -> Result<Rc<RefCell<Inode>>> {
        let state = self.state.borrow();
        state.open_files.get(&fd).cloned().ok_or(Errno::EBADF)
    }

    /// Finds the file at `path` relative to `dir_fd`.
    fn resolve(&self, dir_fd: Fd, path: &CStr, follow: bool) -> Result<Rc<RefCell<Inode>>> {
        let base = if dir_fd == AT_FDCWD || path.to_bytes().starts_with(b"/") {
            None
        } else {
            Some(self.open_file(dir_fd)?)
        };

        let state = self.state.borrow();
        let base = base.as_ref().unwrap_or(&state.file_system.root);
        if !matches!(base.borrow().body, FileBody::Directory { .. }) {
            return Err(Errno::ENOTDIR);
        }
        state.file_system.resolve(base, path.to_bytes(), follow)
    }
}

/// Returns the status of the given file.
///
/// The device ID is always [`DEVICE_ID`] and the i-node number is computed
/// from the address of the `Inode`, so it is unique among the living files.
fn stat(file: &Rc<RefCell<Inode>>) -> Stat {
    let inode = file.borrow();
    Stat {
        dev: DEVICE_ID,
        ino: Rc::as_ptr(file) as usize as u64,
        mode: inode.body.format() | inode.permissions.bits(),
        nlink: 1,
        uid: inode.uid,
        gid: inode.gid,
        size: inode.body.size(),
        atime: inode.atime,
        mtime: inode.mtime,
        ctime: inode.ctime,
    }
}

impl Fstat for VirtualSystem {
    fn fstat(&self, fd: Fd) -> Result<Stat> {
        self.open_file(fd).map(|file| stat(&file))
    }

    fn fstatat(&self, dir_fd: Fd, path: &CStr, follow_symlinks: bool) -> Result<Stat> {
        let file = self.resolve(dir_fd, path, follow_symlinks)?;
        Ok(stat(&file))
    }
}

impl Chmod for VirtualSystem {
    /// Changes the permission bits of a file.
    ///
    /// The change time of the file is set to [`SystemState::now`]. The
    /// current implementation does not check the ownership of the file.
    fn chmod(&self, path: &CStr, mode: Mode) -> Result<()> {
        let file = self.resolve(AT_FDCWD, path, true)?;
        let now = self.state.borrow().now;
        let mut inode = file.borrow_mut();
        inode.permissions = mode;
        inode.ctime = now;
        Ok(())
    }
}
