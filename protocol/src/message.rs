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

use std::fmt;
use std::str::FromStr;

use derive_more::*;
use md5::{Digest as _, Md5};

use crate::{read_line, write_line, CanIo, DecodeError, Result};

/// Fixed sender, command and channel of every steady-state message.
pub const PREFIX: &str = ":mock!~mock@mock.server PRIVMSG #mock-channel :";

/// Probability that a generated payload carries the timestamp in front of its digest.
pub const STAMPED_PROBABILITY: f64 = 0.7;

/// An MD5 digest rendered as 32 lowercase hexadecimal characters.
#[derive(Clone, Debug, Display, PartialEq, Eq, Hash)]
pub struct Digest(String);

impl Digest {
    pub const LEN: usize = 32;

    /// Digest of the decimal representation of `timestamp`.
    pub fn of_timestamp(timestamp: u64) -> Self {
        Self(format!("{:x}", Md5::digest(timestamp.to_string().as_bytes())))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Digest {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self> {
        if s.len() != Self::LEN {
            return Err(DecodeError::Malformed("digest is not 32 characters long"));
        }
        if !s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')) {
            return Err(DecodeError::Malformed("digest is not lowercase hexadecimal"));
        }
        Ok(Self(s.to_owned()))
    }
}

/// The variable part of a steady-state message.
#[derive(Clone, Debug, Display, PartialEq, Eq)]
pub enum Payload {
    /// The digest alone.
    #[display(fmt = "{}", _0)]
    Digest(Digest),
    /// The timestamp, a space, then the digest of the timestamp.
    #[display(fmt = "{} {}", timestamp, digest)]
    Stamped { timestamp: u64, digest: Digest },
}

impl Payload {
    /// Builds the payload for `timestamp`, with or without the timestamp itself in front.
    pub fn new(timestamp: u64, stamped: bool) -> Self {
        let digest = Digest::of_timestamp(timestamp);
        if stamped {
            Payload::Stamped { timestamp, digest }
        } else {
            Payload::Digest(digest)
        }
    }

    pub fn digest(&self) -> &Digest {
        match self {
            Payload::Digest(digest) | Payload::Stamped { digest, .. } => digest,
        }
    }

    pub fn timestamp(&self) -> Option<u64> {
        match self {
            Payload::Digest(_) => None,
            Payload::Stamped { timestamp, .. } => Some(*timestamp),
        }
    }

    pub fn is_stamped(&self) -> bool {
        self.timestamp().is_some()
    }
}

impl FromStr for Payload {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self> {
        let (timestamp, digest) = match s.split_once(' ') {
            None => return Ok(Payload::Digest(s.parse()?)),
            Some(pair) => pair,
        };

        if timestamp.is_empty() || !timestamp.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DecodeError::Malformed("timestamp is not a decimal integer"));
        }
        let timestamp = timestamp
            .parse()
            .map_err(|_| DecodeError::Malformed("timestamp out of range"))?;

        Ok(Payload::Stamped {
            timestamp,
            digest: digest.parse()?,
        })
    }
}

/// A broadcast message from the synthetic sender to the fixed channel.
#[derive(Clone, Debug, From, PartialEq, Eq)]
pub struct PrivMsg {
    pub payload: Payload,
}

impl fmt::Display for PrivMsg {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", PREFIX, self.payload)
    }
}

impl CanIo for PrivMsg {
    fn write(&self, vec: &mut Vec<u8>) {
        write_line(vec, &self.to_string());
    }

    fn read(src: &[u8], offset: &mut usize) -> Result<Self> {
        let mut cursor = *offset;
        let line = read_line(src, &mut cursor)?;
        let payload = line
            .strip_prefix(PREFIX)
            .ok_or(DecodeError::Malformed("not a message to the mock channel"))?
            .parse()?;
        *offset = cursor;
        Ok(Self { payload })
    }
}

#[cfg(test)]
mod tests {
    use md5::Digest as _;

    use super::*;

    #[test]
    fn digest_matches_known_vectors() {
        // md5("0") and md5("1667606586")
        assert_eq!(Digest::of_timestamp(0).as_str(), "cfcd208495d565ef66e7dff9f98764da");
        assert_eq!(
            Digest::of_timestamp(1_667_606_586),
            Digest(format!("{:x}", Md5::digest(b"1667606586")))
        );
    }

    #[test]
    fn digest_rejects_uppercase() {
        let upper = "CFCD208495D565EF66E7DFF9F98764DA";
        assert!(upper.parse::<Digest>().is_err());
        assert!(upper.to_lowercase().parse::<Digest>().is_ok());
    }

    #[test]
    fn payload_shapes() {
        let stamped = Payload::new(1234, true);
        assert_eq!(stamped.to_string(), format!("1234 {}", Digest::of_timestamp(1234)));
        assert_eq!(stamped.timestamp(), Some(1234));

        let bare = Payload::new(1234, false);
        assert_eq!(bare.to_string(), Digest::of_timestamp(1234).to_string());
        assert!(!bare.is_stamped());
        assert_eq!(bare.digest(), stamped.digest());
    }

    #[test]
    fn payload_rejects_other_shapes() {
        let digest = Digest::of_timestamp(42).to_string();
        for bad in &[
            String::new(),
            format!(" {}", digest),
            format!("+42 {}", digest),
            format!("42  {}", digest),
            format!("42 {} ", digest),
            format!("4a {}", digest),
            digest[1..].to_owned(),
        ] {
            assert!(bad.parse::<Payload>().is_err(), "accepted {:?}", bad);
        }
    }

    #[test]
    fn read_rejects_foreign_sender() {
        let mut vec = vec![];
        write_line(&mut vec, ":someone!~x@y PRIVMSG #mock-channel :hi");
        let mut offset = 0;
        assert!(PrivMsg::read(&vec, &mut offset).is_err());
        assert_eq!(offset, 0);
    }
}
