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

//! This is an internal library crate for the `finfo` command. **It is not
//! intended to be used as a library by other crates.**
//!
//! The entry point for the command is the [`main`] function, which is to be
//! used as the `main` function in the binary crate. The function parses the
//! command line arguments and prints the information of each file named by
//! an operand, optionally changing its permissions first.

pub mod args;

use self::args::{Parse, Run, STDIN_OPERAND, UsageError};
use finfo_sys::system::{Chmod, Fstat};
use finfo_sys::{
    Errno, Fd, FileInfo, Pool, RealSystem, native_to_neutral, neutral_to_native,
    query_by_descriptor, query_by_path, set_permissions,
};
use std::ffi::OsStr;
use std::io::Write;
use std::os::unix::ffi::OsStrExt as _;

/// Name of the command used in messages
pub const COMMAND_NAME: &str = "finfo";

/// Usage printed by `--help`
pub const USAGE: &str = "\
Usage: finfo [-L] [-m MODE] FILE...
Print platform-neutral information about each FILE.

  -L          follow a symbolic link operand
  -m MODE     set the permissions to the octal MODE before printing
  --help      print this help and exit
  --version   print the version and exit

An operand of - examines the standard input.
";

/// Exit status of the command
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ExitStatus(pub i32);

impl ExitStatus {
    /// Every operand was processed successfully.
    pub const SUCCESS: ExitStatus = ExitStatus(0);
    /// Some operand could not be processed.
    pub const FAILURE: ExitStatus = ExitStatus(1);
    /// The command line arguments are invalid.
    pub const ERROR: ExitStatus = ExitStatus(2);
}

/// Error processing an operand
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("{}: {errno}", .operand.to_string_lossy())]
pub struct OperandError<'a> {
    /// Operand that failed
    pub operand: &'a OsStr,
    /// Error returned by the system
    pub errno: Errno,
}

/// Writes the information of a file.
pub fn print_info<W: Write + ?Sized>(
    out: &mut W,
    operand: &OsStr,
    info: &FileInfo,
) -> std::io::Result<()> {
    let mode = neutral_to_native(info.permissions);
    writeln!(out, "{}:", operand.to_string_lossy())?;
    writeln!(out, "  type: {}", info.file_type)?;
    writeln!(
        out,
        "  permissions: {} ({:04o})",
        info.permissions,
        mode.bits()
    )?;
    writeln!(out, "  owner: {}/{}", info.user, info.group)?;
    writeln!(out, "  size: {}", info.size)?;
    writeln!(out, "  device: {}", info.device)?;
    writeln!(out, "  inode: {}", info.inode)?;
    writeln!(out, "  atime: {}", info.atime)?;
    writeln!(out, "  mtime: {}", info.mtime)?;
    writeln!(out, "  ctime: {}", info.ctime)
}

fn process_operand<'a, S>(
    system: &S,
    run: &Run,
    operand: &'a OsStr,
) -> Result<FileInfo, OperandError<'a>>
where
    S: Chmod + Fstat + ?Sized,
{
    let error = |errno| OperandError { operand, errno };

    if operand == STDIN_OPERAND {
        return query_by_descriptor(system, Fd::STDIN).map_err(error);
    }

    let path = operand.as_bytes();
    if let Some(mode) = run.mode {
        set_permissions(system, path, native_to_neutral(mode)).map_err(error)?;
    }
    query_by_path(system, path, run.follow_symlinks, &Pool::new()).map_err(error)
}

/// Processes every operand.
///
/// The information of each file is written to `out`, and errors are written
/// to `err`. Processing continues after an error.
pub fn run<S, W, E>(system: &S, run: &Run, out: &mut W, err: &mut E) -> ExitStatus
where
    S: Chmod + Fstat + ?Sized,
    W: Write + ?Sized,
    E: Write + ?Sized,
{
    log::debug!("running with {run:?}");
    let mut exit_status = ExitStatus::SUCCESS;

    for operand in &run.operands {
        let result = match process_operand(system, run, operand) {
            Ok(info) => print_info(out, operand, &info),
            Err(error) => {
                exit_status = ExitStatus::FAILURE;
                writeln!(err, "{COMMAND_NAME}: {error}")
            }
        };
        if let Err(error) = result {
            log::debug!("cannot write output: {error}");
            _ = writeln!(err, "{COMMAND_NAME}: {error}");
            return ExitStatus::FAILURE;
        }
    }

    exit_status
}

/// Reports a usage error.
fn print_usage_error<E: Write + ?Sized>(err: &mut E, error: &UsageError) {
    _ = writeln!(err, "{COMMAND_NAME}: {error}");
    _ = writeln!(err, "Try '{COMMAND_NAME} --help' for more information.");
}

/// Runs the command with the given arguments.
///
/// This is [`main`] without the process-wide side effects.
pub fn run_with_args<I, S, W, E>(args: I, system: &S, out: &mut W, err: &mut E) -> ExitStatus
where
    I: IntoIterator,
    I::Item: Into<std::ffi::OsString>,
    S: Chmod + Fstat + ?Sized,
    W: Write + ?Sized,
    E: Write + ?Sized,
{
    match args::parse(args) {
        Ok(Parse::Help) => match out.write_all(USAGE.as_bytes()) {
            Ok(()) => ExitStatus::SUCCESS,
            Err(_) => ExitStatus::FAILURE,
        },
        Ok(Parse::Version) => {
            let version = env!("CARGO_PKG_VERSION");
            match writeln!(out, "{COMMAND_NAME} {version}") {
                Ok(()) => ExitStatus::SUCCESS,
                Err(_) => ExitStatus::FAILURE,
            }
        }
        Ok(Parse::Run(run_args)) => run(system, &run_args, out, err),
        Err(error) => {
            print_usage_error(err, &error);
            ExitStatus::ERROR
        }
    }
}

pub fn main() -> ! {
    pretty_env_logger::init();

    let system = RealSystem::new();
    let stdout = std::io::stdout();
    let stderr = std::io::stderr();
    let exit_status = run_with_args(
        std::env::args_os(),
        &system,
        &mut stdout.lock(),
        &mut stderr.lock(),
    );
    _ = std::io::stdout().flush();
    std::process::exit(exit_status.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use finfo_sys::system::r#virtual::{FileBody, Inode, VirtualSystem};
    use finfo_sys::{Mode, Permissions};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn save(system: &VirtualSystem, path: &str, inode: Inode) -> Rc<RefCell<Inode>> {
        let file = Rc::new(RefCell::new(inode));
        let mut state = system.state.borrow_mut();
        state.file_system.save(path, Rc::clone(&file)).unwrap();
        file
    }

    fn run_strs(system: &VirtualSystem, args: &[&str]) -> (ExitStatus, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let status = run_with_args(args.iter().copied(), system, &mut out, &mut err);
        let out = String::from_utf8(out).unwrap();
        let err = String::from_utf8(err).unwrap();
        (status, out, err)
    }

    #[test]
    fn print_regular_file() {
        let system = VirtualSystem::new();
        save(&system, "/file", Inode::new("hello"));

        let (status, out, err) = run_strs(&system, &["finfo", "/file"]);
        assert_eq!(status, ExitStatus::SUCCESS);
        assert_eq!(err, "");
        let mut lines = out.lines();
        assert_eq!(lines.next(), Some("/file:"));
        assert_eq!(lines.next(), Some("  type: regular file"));
        assert_eq!(lines.next(), Some("  permissions: rw-r--r-- (0644)"));
        assert_eq!(lines.next(), Some("  owner: 0/0"));
        assert_eq!(lines.next(), Some("  size: 5"));
        assert!(lines.next().unwrap().starts_with("  device: "));
        assert!(lines.next().unwrap().starts_with("  inode: "));
        assert_eq!(lines.next(), Some("  atime: 0.000000"));
        assert_eq!(lines.next(), Some("  mtime: 0.000000"));
        assert_eq!(lines.next(), Some("  ctime: 0.000000"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn set_mode_before_printing() {
        let system = VirtualSystem::new();
        let file = save(&system, "/file", Inode::new(""));

        let (status, out, _) = run_strs(&system, &["finfo", "-m", "4751", "/file"]);
        assert_eq!(status, ExitStatus::SUCCESS);
        assert!(out.contains("  permissions: rwsr-x--x (4751)\n"), "{out}");
        assert_eq!(file.borrow().permissions, Mode::from_bits_retain(0o4751));
    }

    #[test]
    fn symlink_operand() {
        let system = VirtualSystem::new();
        save(&system, "/dir", Inode::directory());
        save(&system, "/link", Inode::symlink("/dir"));

        let (_, out, _) = run_strs(&system, &["finfo", "/link"]);
        assert!(out.contains("  type: symbolic link\n"), "{out}");
        let (_, out, _) = run_strs(&system, &["finfo", "-L", "/link"]);
        assert!(out.contains("  type: directory\n"), "{out}");
    }

    #[test]
    fn standard_input_operand() {
        let system = VirtualSystem::new();
        let file = Rc::new(RefCell::new(Inode::with_body(FileBody::Fifo)));
        system.state.borrow_mut().open_files.insert(Fd::STDIN, file);

        let (status, out, _) = run_strs(&system, &["finfo", "-"]);
        assert_eq!(status, ExitStatus::SUCCESS);
        assert!(out.starts_with("-:\n  type: fifo\n"), "{out}");
    }

    #[test]
    fn failure_continues_with_next_operand() {
        let system = VirtualSystem::new();
        save(&system, "/file", Inode::new(""));

        let (status, out, err) = run_strs(&system, &["finfo", "/missing", "/file"]);
        assert_eq!(status, ExitStatus::FAILURE);
        assert!(out.starts_with("/file:\n"), "{out}");
        assert_eq!(err, "finfo: /missing: No such file or directory\n");
    }

    #[test]
    fn mode_failure_skips_query() {
        let system = VirtualSystem::new();

        let (status, out, err) = run_strs(&system, &["finfo", "-m", "600", "/missing"]);
        assert_eq!(status, ExitStatus::FAILURE);
        assert_eq!(out, "");
        assert!(err.starts_with("finfo: /missing: "), "{err}");
    }

    #[test]
    fn usage_error() {
        let system = VirtualSystem::new();

        let (status, out, err) = run_strs(&system, &["finfo", "-x", "/file"]);
        assert_eq!(status, ExitStatus::ERROR);
        assert_eq!(out, "");
        assert_eq!(
            err,
            "finfo: unknown option \"-x\"\nTry 'finfo --help' for more information.\n"
        );
    }

    #[test]
    fn help_and_version() {
        let system = VirtualSystem::new();

        let (status, out, _) = run_strs(&system, &["finfo", "--help"]);
        assert_eq!(status, ExitStatus::SUCCESS);
        assert_eq!(out, USAGE);

        let (status, out, _) = run_strs(&system, &["finfo", "--version"]);
        assert_eq!(status, ExitStatus::SUCCESS);
        assert_eq!(out, format!("finfo {}\n", env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn octal_column_matches_permissions() {
        let info = FileInfo {
            permissions: Permissions::USER_READ | Permissions::WORLD_STICKY,
            ..FileInfo::from_stat(&Default::default())
        };
        let mut out = Vec::new();
        print_info(&mut out, OsStr::new("x"), &info).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("  permissions: r-------T (1400)\n"), "{out}");
    }
}
