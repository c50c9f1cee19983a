// mockirc
// Copyright (C) SOFe
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Wire vocabulary of the mock chat endpoint.
//!
//! Everything on the wire is a CRLF-terminated line of UTF-8 text. Types that can appear on the
//! wire implement [`CanIo`].

use std::error::Error;
use std::str;

use derive_more::*;

mod message;
pub use message::{Digest, Payload, PrivMsg, PREFIX, STAMPED_PROBABILITY};

mod preamble;
pub use preamble::{preamble_lines, Preamble, PREAMBLE};

/// The terminator appended to every line.
pub const TERMINATOR: &[u8] = b"\r\n";

/// An error occurred when decoding.
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq)]
pub enum DecodeError {
    /// No complete line is buffered at the offset yet.
    #[display(fmt = "unexpected end of buffer")]
    UnexpectedEof,
    #[display(fmt = "line is not valid UTF-8")]
    InvalidUtf8,
    #[display(fmt = "malformed line: {}", _0)]
    Malformed(&'static str),
}

impl Error for DecodeError {}

type Result<T = (), E = DecodeError> = std::result::Result<T, E>;

/// Allows the type to be encoded/decoded as CRLF-terminated lines.
///
/// `read` advances `offset` past the consumed terminator only if it succeeds, so a caller
/// receiving `UnexpectedEof` can buffer more bytes and retry from the same offset.
pub trait CanIo: Sized {
    fn write(&self, vec: &mut Vec<u8>);

    fn read(src: &[u8], offset: &mut usize) -> Result<Self>;
}

/// An arbitrary line, stored without its terminator.
#[derive(Clone, Debug, Display, From, Into, PartialEq, Eq)]
pub struct RawLine(pub String);

impl CanIo for RawLine {
    fn write(&self, vec: &mut Vec<u8>) {
        write_line(vec, &self.0);
    }

    fn read(src: &[u8], offset: &mut usize) -> Result<Self> {
        read_line(src, offset).map(|line| Self(line.to_owned()))
    }
}

/// Appends `line` followed by the terminator.
pub fn write_line(vec: &mut Vec<u8>, line: &str) {
    vec.extend_from_slice(line.as_bytes());
    vec.extend_from_slice(TERMINATOR);
}

/// Reads the line starting at `offset`, excluding its terminator.
pub fn read_line<'a>(src: &'a [u8], offset: &mut usize) -> Result<&'a str> {
    let rest = src.get(*offset..).ok_or(DecodeError::UnexpectedEof)?;
    let len = rest
        .windows(TERMINATOR.len())
        .position(|window| window == TERMINATOR)
        .ok_or(DecodeError::UnexpectedEof)?;

    let line = str::from_utf8(&rest[..len]).map_err(|_| DecodeError::InvalidUtf8)?;
    if line.contains(|c: char| c == '\r' || c == '\n') {
        return Err(DecodeError::Malformed("stray line break inside a line"));
    }

    *offset += len + TERMINATOR.len();
    Ok(line)
}
