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

//! Client-side helpers for exercising a mock chat endpoint in tests.

use std::io;
use std::net::SocketAddr;
use std::time::Duration;

use mockirc_protocol::{CanIo, DecodeError, Preamble, PrivMsg, RawLine};
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::net::TcpStream;
use tokio::time;

/// Generates a pair of tests checking that `$line` decodes to `$expr` and that `$expr` encodes
/// back to `$line`.
#[macro_export]
macro_rules! check_line {
    ($read_name:ident : $line:literal = $write_name:ident : $ty:ty = $expr:expr) => {
        #[test]
        pub fn $read_name() {
            let src: &[u8] = $line;
            let mut offset = 0;
            let actual = <$ty as ::mockirc_protocol::CanIo>::read(src, &mut offset)
                .expect("Panic decoding line");
            assert_eq!($expr, actual);
            assert_eq!(src.len(), offset);
        }

        #[test]
        pub fn $write_name() {
            let mut actual = ::std::vec::Vec::<u8>::new();
            ::mockirc_protocol::CanIo::write(&$expr, &mut actual);
            let expected: &[u8] = $line;
            assert_eq!(expected, &actual[..]);
        }
    };
}

/// Reads CRLF-terminated lines from a stream, buffering partial lines between reads.
pub struct LineClient<S = TcpStream> {
    stream: S,
    buf: Vec<u8>,
    offset: usize,
}

impl LineClient<TcpStream> {
    pub async fn connect(addr: SocketAddr) -> io::Result<Self> {
        Ok(Self::new(TcpStream::connect(addr).await?))
    }
}

impl<S: AsyncRead + Unpin> LineClient<S> {
    pub fn new(stream: S) -> Self {
        Self {
            stream,
            buf: vec![],
            offset: 0,
        }
    }

    /// Decodes the next value, reading from the stream until a complete one is buffered.
    pub async fn next<T: CanIo>(&mut self) -> io::Result<T> {
        loop {
            match T::read(&self.buf, &mut self.offset) {
                Ok(value) => {
                    self.buf.drain(..self.offset);
                    self.offset = 0;
                    return Ok(value);
                }
                Err(DecodeError::UnexpectedEof) => {}
                Err(err) => return Err(io::Error::new(io::ErrorKind::InvalidData, err)),
            }

            let mut chunk = [0u8; 4096];
            let size = self.stream.read(&mut chunk).await?;
            if size == 0 {
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "server closed the connection",
                ));
            }
            self.buf.extend_from_slice(&chunk[..size]);
        }
    }

    pub async fn next_line(&mut self) -> io::Result<String> {
        self.next::<RawLine>().await.map(String::from)
    }

    /// Succeeds only if the next lines are exactly the preamble script.
    pub async fn expect_preamble(&mut self) -> io::Result<()> {
        self.next::<Preamble>().await.map(drop)
    }

    pub async fn next_message(&mut self) -> io::Result<PrivMsg> {
        self.next().await
    }

    /// Like `next_message`, failing with `TimedOut` if nothing arrives within `limit`.
    pub async fn next_message_within(&mut self, limit: Duration) -> io::Result<PrivMsg> {
        match time::timeout(limit, self.next_message()).await {
            Ok(result) => result,
            Err(_) => Err(io::Error::new(
                io::ErrorKind::TimedOut,
                "no message within the time limit",
            )),
        }
    }

    /// Bytes received but not yet decoded.
    pub fn pending(&self) -> &[u8] {
        &self.buf[self.offset..]
    }
}
