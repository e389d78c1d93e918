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

//! Command line argument parser for the `finfo` command
//!
//! The command accepts the following syntax:
//!
//! ```text
//! finfo [-L] [-m MODE] FILE...
//! finfo --help
//! finfo --version
//! ```
//!
//! Options must precede operands. Single-character options may be combined
//! as in `-Lm 644`, and the argument of `-m` may be attached as in `-m644`.
//! An argument of `--` ends the options. An operand of `-` names the
//! standard input.

use finfo_sys::Mode;
use std::ffi::OsString;
use thiserror::Error;

/// Operand naming the standard input
pub const STDIN_OPERAND: &str = "-";

/// Errors that may occur while parsing command line arguments
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum UsageError {
    /// An option is not recognized.
    #[error("unknown option {0:?}")]
    UnknownOption(String),

    /// The `-m` option is not followed by its argument.
    #[error("option -m requires an argument")]
    MissingModeArgument,

    /// The argument of `-m` is not an octal mode.
    #[error("invalid mode {0:?}")]
    InvalidMode(String),

    /// There is no file operand.
    #[error("missing file operand")]
    MissingOperand,

    /// The `-m` option is used with the standard input as an operand.
    #[error("cannot change the mode of the standard input")]
    ModeOfStandardInput,
}

/// Result of parsing command line arguments
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Parse {
    /// Print the usage and exit.
    Help,
    /// Print the version and exit.
    Version,
    /// Examine files.
    Run(Run),
}

/// Files to examine and how
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Run {
    /// Whether a symbolic link operand is followed (`-L`)
    pub follow_symlinks: bool,
    /// Mode applied to each operand before examining it (`-m`)
    pub mode: Option<Mode>,
    /// Pathnames to examine
    pub operands: Vec<OsString>,
}

/// Parses an octal file mode.
///
/// The string must consist of octal digits only, and the value must not
/// exceed `7777`.
pub fn parse_mode(s: &str) -> Result<Mode, UsageError> {
    let invalid = || UsageError::InvalidMode(s.to_owned());
    if s.is_empty() || !s.bytes().all(|b| matches!(b, b'0'..=b'7')) {
        return Err(invalid());
    }
    let bits = u32::from_str_radix(s, 8).map_err(|_| invalid())?;
    let bits = bits.try_into().map_err(|_| invalid())?;
    Mode::from_bits(bits).ok_or_else(invalid)
}

/// Parses command line arguments.
///
/// The first item of `args` is the command name and is ignored.
pub fn parse<I>(args: I) -> Result<Parse, UsageError>
where
    I: IntoIterator,
    I::Item: Into<OsString>,
{
    let mut args = args.into_iter().skip(1).map(Into::into).peekable();
    let mut run = Run::default();

    while let Some(arg) = args.peek() {
        let Some(arg_str) = arg.to_str() else { break };
        match arg_str {
            "--" => {
                args.next();
                break;
            }
            "--help" => return Ok(Parse::Help),
            "--version" => return Ok(Parse::Version),
            _ if arg_str.starts_with("--") => {
                return Err(UsageError::UnknownOption(arg_str.to_owned()));
            }
            _ if arg_str.len() < 2 || !arg_str.starts_with('-') => break,
            _ => (),
        }

        let arg = arg_str.to_owned();
        args.next();
        let mut chars = arg[1..].char_indices();
        while let Some((index, c)) = chars.next() {
            match c {
                'L' => run.follow_symlinks = true,
                'm' => {
                    let rest = &arg[1 + index + 1..];
                    let mode = if rest.is_empty() {
                        let value = args.next().ok_or(UsageError::MissingModeArgument)?;
                        value.to_string_lossy().into_owned()
                    } else {
                        rest.to_owned()
                    };
                    run.mode = Some(parse_mode(&mode)?);
                    break;
                }
                _ => return Err(UsageError::UnknownOption(format!("-{c}"))),
            }
        }
    }

    run.operands.extend(args);
    if run.operands.is_empty() {
        return Err(UsageError::MissingOperand);
    }
    if run.mode.is_some() && run.operands.iter().any(|o| o == STDIN_OPERAND) {
        return Err(UsageError::ModeOfStandardInput);
    }
    Ok(Parse::Run(run))
}
