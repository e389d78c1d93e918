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

//! File system in a virtual system

use super::super::raw;
use super::super::{Errno, Gid, Mode, RawMode, Result, TimeSpec, Uid};
use std::cell::RefCell;
use std::collections::HashMap;
use std::collections::VecDeque;
use std::rc::Rc;

/// Maximum number of symbolic links followed in one pathname resolution
///
/// Resolution fails with [`Errno::ELOOP`] when more links are encountered.
pub const SYMLOOP_MAX: usize = 40;

/// Collection of files
///
/// Pathnames are byte strings as in POSIX. A pathname is always resolved
/// from the root directory or from a given directory; the virtual system has
/// no notion of a current working directory other than the root.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FileSystem {
    /// Root directory
    pub root: Rc<RefCell<Inode>>,
}

/// The default file system contains an empty root directory with mode
/// `0o755`.
impl Default for FileSystem {
    fn default() -> Self {
        FileSystem {
            root: Rc::new(RefCell::new(Inode::directory())),
        }
    }
}

impl FileSystem {
    /// Saves a file.
    ///
    /// Missing intermediate directories are created with mode `0o755`. If
    /// there is an existing file at the specified path, this function
    /// replaces it with the new file and returns the old one, regardless of
    /// permissions.
    ///
    /// Symbolic links are not followed while creating the directories. This
    /// function fails with [`Errno::ENOTDIR`] if an intermediate component
    /// names a non-directory, and with [`Errno::EINVAL`] if the path has no
    /// filename or contains a `..` component.
    pub fn save<P: AsRef<[u8]>>(
        &mut self,
        path: P,
        content: Rc<RefCell<Inode>>,
    ) -> Result<Option<Rc<RefCell<Inode>>>> {
        let mut names = Vec::new();
        for step in steps(path.as_ref()) {
            match step {
                Step::Root => names.clear(),
                Step::Current => (),
                Step::Parent => return Err(Errno::EINVAL),
                Step::Name(name) => names.push(name),
            }
        }
        let Some(last) = names.pop() else {
            return Err(Errno::EINVAL);
        };

        let mut dir = Rc::clone(&self.root);
        for name in names {
            let child = match &mut dir.borrow_mut().body {
                FileBody::Directory { files } => Rc::clone(
                    files
                        .entry(name.into_owned())
                        .or_insert_with(|| Rc::new(RefCell::new(Inode::directory()))),
                ),
                _ => return Err(Errno::ENOTDIR),
            };
            dir = child;
        }

        let mut dir = dir.borrow_mut();
        match &mut dir.body {
            FileBody::Directory { files } => Ok(files.insert(last.into_owned(), content)),
            _ => Err(Errno::ENOTDIR),
        }
    }

    /// Returns a reference to the existing file at the specified path.
    ///
    /// Intermediate symbolic links are followed, but the last component is
    /// returned as is even if it is a symbolic link.
    pub fn get<P: AsRef<[u8]>>(&self, path: P) -> Result<Rc<RefCell<Inode>>> {
        self.resolve(&self.root, path.as_ref(), false)
    }

    /// Resolves a pathname to a file.
    ///
    /// An absolute `path` is resolved from the root directory, and a relative
    /// one from `base`. A `..` component never leaves `base` for a relative
    /// path, because the virtual file system does not record the parent of a
    /// directory. If `follow_final` is true and the last component names a
    /// symbolic link, the link is followed. A symbolic link followed by `.`
    /// or a trailing slash is always followed.
    ///
    /// This function fails with [`Errno::ENOENT`] if a component does not
    /// exist or the path is empty, [`Errno::ENOTDIR`] if a non-directory is
    /// followed by another component (including `.`, `..`, and a trailing
    /// slash), and [`Errno::ELOOP`] if more than [`SYMLOOP_MAX`] symbolic
    /// links are encountered.
    pub fn resolve(
        &self,
        base: &Rc<RefCell<Inode>>,
        path: &[u8],
        follow_final: bool,
    ) -> Result<Rc<RefCell<Inode>>> {
        if path.is_empty() {
            return Err(Errno::ENOENT);
        }

        let mut dirs = vec![Rc::clone(base)];
        let mut pending: VecDeque<Step> = steps(path).collect();
        let mut links_followed = 0;

        while let Some(step) = pending.pop_front() {
            let name = match step {
                Step::Root => {
                    dirs.clear();
                    dirs.push(Rc::clone(&self.root));
                    continue;
                }
                Step::Current => continue,
                Step::Parent => {
                    if dirs.len() > 1 {
                        dirs.pop();
                    }
                    continue;
                }
                Step::Name(name) => name,
            };

            let dir = dirs.last().ok_or(Errno::ENOENT)?;
            let child = match &dir.borrow().body {
                FileBody::Directory { files } => {
                    Rc::clone(files.get(&*name).ok_or(Errno::ENOENT)?)
                }
                _ => return Err(Errno::ENOTDIR),
            };

            let is_final = pending.is_empty();
            let target = match &child.borrow().body {
                FileBody::Symlink { target } if !is_final || follow_final => Some(target.clone()),
                _ => None,
            };

            if let Some(target) = target {
                links_followed += 1;
                if links_followed > SYMLOOP_MAX {
                    return Err(Errno::ELOOP);
                }
                let mut new_steps: VecDeque<Step> =
                    steps(&target).map(Step::into_owned).collect();
                new_steps.extend(pending.drain(..));
                pending = new_steps;
                continue;
            }

            if is_final {
                return Ok(child);
            }
            if !matches!(child.borrow().body, FileBody::Directory { .. }) {
                return Err(Errno::ENOTDIR);
            }
            dirs.push(child);
        }

        dirs.pop().ok_or(Errno::ENOENT)
    }
}

/// Pathname component
#[derive(Clone, Debug, Eq, PartialEq)]
enum Step<'a> {
    /// Leading slash
    Root,
    /// `.` or a trailing slash
    Current,
    /// `..`
    Parent,
    /// Filename
    Name(std::borrow::Cow<'a, [u8]>),
}

impl Step<'_> {
    fn into_owned<'b>(self) -> Step<'b> {
        match self {
            Step::Root => Step::Root,
            Step::Current => Step::Current,
            Step::Parent => Step::Parent,
            Step::Name(name) => Step::Name(name.into_owned().into()),
        }
    }
}

/// Splits a pathname into components.
///
/// Empty components between slashes are dropped. A trailing slash yields a
/// [`Step::Current`] so that the preceding component must be a directory.
fn steps(path: &[u8]) -> impl Iterator<Item = Step<'_>> {
    let root = path.starts_with(b"/").then_some(Step::Root);
    let trailing = (path.len() > 1 && path.ends_with(b"/")).then_some(Step::Current);
    let names = path
        .split(|&b| b == b'/')
        .filter(|name| !name.is_empty())
        .map(|name| match name {
            b"." => Step::Current,
            b".." => Step::Parent,
            name => Step::Name(name.into()),
        });
    root.into_iter().chain(names).chain(trailing)
}

/// File on the file system
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Inode {
    /// File content
    pub body: FileBody,
    /// Access permissions
    pub permissions: Mode,
    /// Owner user
    pub uid: Uid,
    /// Owner group
    pub gid: Gid,
    /// Last access time
    pub atime: TimeSpec,
    /// Last modification time
    pub mtime: TimeSpec,
    /// Last status change time
    pub ctime: TimeSpec,
}

impl Inode {
    /// Creates a regular file with the given content.
    pub fn new<T: Into<Vec<u8>>>(bytes: T) -> Self {
        Inode {
            body: FileBody::new(bytes),
            ..Inode::default()
        }
    }

    /// Creates an empty directory with mode `0o755`.
    pub fn directory() -> Self {
        Inode {
            body: FileBody::Directory {
                files: HashMap::new(),
            },
            permissions: Mode::from_bits_retain(0o755),
            ..Inode::default()
        }
    }

    /// Creates a symbolic link to the given target.
    pub fn symlink<T: Into<Vec<u8>>>(target: T) -> Self {
        Inode {
            body: FileBody::Symlink {
                target: target.into(),
            },
            permissions: Mode::ALL_9,
            ..Inode::default()
        }
    }

    /// Creates a file of the given body with default permissions.
    pub fn with_body(body: FileBody) -> Self {
        Inode {
            body,
            ..Inode::default()
        }
    }
}

/// Filetype-specific content of a file
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FileBody {
    /// Regular file
    Regular {
        /// File content
        content: Vec<u8>,
    },
    /// Directory
    Directory {
        /// Files contained in this directory
        ///
        /// The keys of the hashmap are filenames without any parent directory
        /// components. The hashmap does not contain "." or "..".
        files: HashMap<Vec<u8>, Rc<RefCell<Inode>>>,
    },
    /// Named pipe
    Fifo,
    /// Symbolic link
    Symlink {
        /// Path to the file referenced by this symlink
        target: Vec<u8>,
    },
    /// Character special file
    CharacterDevice,
    /// Block special file
    BlockDevice,
    /// Socket
    Socket,
}

/// The default file body is an empty regular file.
impl Default for FileBody {
    fn default() -> Self {
        FileBody::Regular {
            content: Vec::default(),
        }
    }
}

impl FileBody {
    /// Creates a regular file body with the given content.
    pub fn new<T: Into<Vec<u8>>>(bytes: T) -> Self {
        FileBody::Regular {
            content: bytes.into(),
        }
    }

    /// Returns the native file-format bits for this body.
    ///
    /// A socket yields no format bits on platforms without a socket file
    /// type.
    #[must_use]
    pub fn format(&self) -> RawMode {
        match self {
            FileBody::Regular { .. } => raw::S_IFREG,
            FileBody::Directory { .. } => raw::S_IFDIR,
            FileBody::Fifo => raw::S_IFIFO,
            FileBody::Symlink { .. } => raw::S_IFLNK,
            FileBody::CharacterDevice => raw::S_IFCHR,
            FileBody::BlockDevice => raw::S_IFBLK,
            FileBody::Socket => raw::S_IFSOCK.unwrap_or(0),
        }
    }

    /// Returns the size of the file as reported by `stat`.
    ///
    /// The size of a directory is the number of its entries, and that of a
    /// symbolic link is the length of the target path.
    #[must_use]
    pub fn size(&self) -> u64 {
        let size = match self {
            FileBody::Regular { content } => content.len(),
            FileBody::Directory { files } => files.len(),
            FileBody::Symlink { target } => target.len(),
            FileBody::Fifo
            | FileBody::CharacterDevice
            | FileBody::BlockDevice
            | FileBody::Socket => 0,
        };
        size as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn save_creates_intermediate_directories() {
        let mut fs = FileSystem::default();
        let file = Rc::new(RefCell::new(Inode::new("x")));
        let old = fs.save("/a/b/c", Rc::clone(&file)).unwrap();
        assert_eq!(old, None);

        let dir = fs.get("/a/b").unwrap();
        assert_eq!(dir.borrow().permissions, Mode::from_bits_retain(0o755));
        assert!(Rc::ptr_eq(&fs.get("/a/b/c").unwrap(), &file));
    }

    #[test]
    fn save_returns_replaced_file() {
        let mut fs = FileSystem::default();
        let first = Rc::new(RefCell::new(Inode::new("1")));
        let second = Rc::new(RefCell::new(Inode::new("2")));
        fs.save("/file", Rc::clone(&first)).unwrap();
        let old = fs.save("/file", second).unwrap().unwrap();
        assert!(Rc::ptr_eq(&old, &first));
    }

    #[test]
    fn save_under_regular_file() {
        let mut fs = FileSystem::default();
        fs.save("/file", Rc::new(RefCell::new(Inode::new(""))))
            .unwrap();
        let result = fs.save("/file/child", Rc::new(RefCell::new(Inode::new(""))));
        assert_matches!(result, Err(Errno::ENOTDIR));
    }

    #[test]
    fn save_without_filename() {
        let mut fs = FileSystem::default();
        let result = fs.save("/", Rc::new(RefCell::new(Inode::new(""))));
        assert_matches!(result, Err(Errno::EINVAL));
    }

    #[test]
    fn resolve_root_and_dots() {
        let mut fs = FileSystem::default();
        fs.save("/dir/file", Rc::new(RefCell::new(Inode::new(""))))
            .unwrap();
        assert!(Rc::ptr_eq(&fs.get("/").unwrap(), &fs.root));
        assert!(Rc::ptr_eq(&fs.get("/dir/..").unwrap(), &fs.root));
        assert!(Rc::ptr_eq(
            &fs.get("/./dir//file").unwrap(),
            &fs.get("/dir/file").unwrap()
        ));
    }

    #[test]
    fn resolve_empty_path() {
        let fs = FileSystem::default();
        assert_matches!(fs.get(""), Err(Errno::ENOENT));
    }

    #[test]
    fn resolve_missing_file() {
        let fs = FileSystem::default();
        assert_matches!(fs.get("/no/such/file"), Err(Errno::ENOENT));
    }

    #[test]
    fn resolve_through_regular_file() {
        let mut fs = FileSystem::default();
        fs.save("/file", Rc::new(RefCell::new(Inode::new(""))))
            .unwrap();
        assert_matches!(fs.get("/file/x"), Err(Errno::ENOTDIR));
        assert_matches!(fs.get("/file/"), Err(Errno::ENOTDIR));
    }

    #[test]
    fn resolve_dot_after_regular_file() {
        let mut fs = FileSystem::default();
        fs.save("/file", Rc::new(RefCell::new(Inode::new(""))))
            .unwrap();
        assert_matches!(fs.get("/file/."), Err(Errno::ENOTDIR));
        assert_matches!(fs.get("/file/./"), Err(Errno::ENOTDIR));
    }

    #[test]
    fn resolve_dotdot_after_regular_file() {
        let mut fs = FileSystem::default();
        fs.save("/dir/file", Rc::new(RefCell::new(Inode::new(""))))
            .unwrap();
        assert_matches!(fs.get("/dir/file/.."), Err(Errno::ENOTDIR));
        assert_matches!(fs.get("/dir/file/../file"), Err(Errno::ENOTDIR));
    }

    #[test]
    fn resolve_dot_after_symlink_follows_link() {
        let mut fs = FileSystem::default();
        let dir = Rc::new(RefCell::new(Inode::directory()));
        fs.save("/dir", Rc::clone(&dir)).unwrap();
        fs.save("/link", Rc::new(RefCell::new(Inode::symlink("dir"))))
            .unwrap();

        let resolved = fs.resolve(&fs.root, b"/link/.", false).unwrap();
        assert!(Rc::ptr_eq(&resolved, &dir));
        let resolved = fs.resolve(&fs.root, b"/link/", false).unwrap();
        assert!(Rc::ptr_eq(&resolved, &dir));
    }

    #[test]
    fn resolve_dot_after_symlink_to_regular_file() {
        let mut fs = FileSystem::default();
        fs.save("/file", Rc::new(RefCell::new(Inode::new(""))))
            .unwrap();
        fs.save("/link", Rc::new(RefCell::new(Inode::symlink("file"))))
            .unwrap();
        assert_matches!(fs.resolve(&fs.root, b"/link/.", false), Err(Errno::ENOTDIR));
    }

    #[test]
    fn resolve_intermediate_symlink() {
        let mut fs = FileSystem::default();
        let file = Rc::new(RefCell::new(Inode::new("")));
        fs.save("/real/file", Rc::clone(&file)).unwrap();
        fs.save("/link", Rc::new(RefCell::new(Inode::symlink("real"))))
            .unwrap();
        assert!(Rc::ptr_eq(&fs.get("/link/file").unwrap(), &file));
    }

    #[test]
    fn resolve_final_symlink() {
        let mut fs = FileSystem::default();
        let file = Rc::new(RefCell::new(Inode::new("")));
        fs.save("/dir/file", Rc::clone(&file)).unwrap();
        fs.save("/dir/link", Rc::new(RefCell::new(Inode::symlink("file"))))
            .unwrap();

        let link = fs.resolve(&fs.root, b"/dir/link", false).unwrap();
        assert_matches!(link.borrow().body, FileBody::Symlink { .. });
        let target = fs.resolve(&fs.root, b"/dir/link", true).unwrap();
        assert!(Rc::ptr_eq(&target, &file));
    }

    #[test]
    fn resolve_absolute_symlink_target() {
        let mut fs = FileSystem::default();
        let file = Rc::new(RefCell::new(Inode::new("")));
        fs.save("/a/file", Rc::clone(&file)).unwrap();
        fs.save("/b/link", Rc::new(RefCell::new(Inode::symlink("/a/file"))))
            .unwrap();
        let target = fs.resolve(&fs.root, b"/b/link", true).unwrap();
        assert!(Rc::ptr_eq(&target, &file));
    }

    #[test]
    fn resolve_symlink_loop() {
        let mut fs = FileSystem::default();
        fs.save("/loop", Rc::new(RefCell::new(Inode::symlink("/loop"))))
            .unwrap();
        assert_matches!(fs.resolve(&fs.root, b"/loop", true), Err(Errno::ELOOP));
        assert_matches!(fs.resolve(&fs.root, b"/loop", false), Ok(_));
    }

    #[test]
    fn resolve_dangling_symlink() {
        let mut fs = FileSystem::default();
        fs.save("/link", Rc::new(RefCell::new(Inode::symlink("/nowhere"))))
            .unwrap();
        assert_matches!(fs.resolve(&fs.root, b"/link", true), Err(Errno::ENOENT));
    }

    #[test]
    fn resolve_relative_from_base() {
        let mut fs = FileSystem::default();
        let file = Rc::new(RefCell::new(Inode::new("")));
        fs.save("/dir/file", Rc::clone(&file)).unwrap();
        let dir = fs.get("/dir").unwrap();
        let resolved = fs.resolve(&dir, b"file", true).unwrap();
        assert!(Rc::ptr_eq(&resolved, &file));
    }

    #[test]
    fn body_sizes() {
        assert_eq!(FileBody::new("hello").size(), 5);
        assert_eq!(Inode::symlink("abc").body.size(), 3);
        assert_eq!(FileBody::Fifo.size(), 0);
    }
}
