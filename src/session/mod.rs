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

use std::convert::Infallible;
use std::io;
use std::time::Duration;

use derive_new::new;
use getset::CopyGetters;
use mockirc_protocol::{CanIo, Preamble};
use rand::Rng;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::time;

pub use generator::MessageGenerator;

mod generator;

/// The lifecycle of a session.
///
/// Any I/O failure moves a session straight to `Closed`; there is no way back.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Connected,
    SendingPreamble,
    SteadyState,
    Closed,
}

/// One accepted connection.
///
/// Sends are strictly sequential: each write is awaited to completion before the next one starts.
#[derive(new, CopyGetters)]
pub struct Session<S, R> {
    stream: S,
    generator: MessageGenerator<R>,
    period: Duration,
    #[new(value = "SessionState::Connected")]
    #[getset(get_copy = "pub")]
    state: SessionState,
}

impl<S, R> Session<S, R>
where
    S: AsyncWrite + Unpin,
    R: Rng,
{
    /// Greets the peer, then sends a message every `period` until a write fails.
    ///
    /// There is no other way for this to return, so the result is always the error that
    /// closed the session.
    pub async fn run(&mut self) -> io::Result<Infallible> {
        let result = self.send_all().await;
        self.state = SessionState::Closed;
        result
    }

    async fn send_all(&mut self) -> io::Result<Infallible> {
        self.state = SessionState::SendingPreamble;
        let mut buf = vec![];
        Preamble.write(&mut buf);
        self.send(&buf).await?;

        self.state = SessionState::SteadyState;
        loop {
            let message = self.generator.next_message();
            log::debug!("Sending: {}", message);

            buf.clear();
            message.write(&mut buf);
            self.send(&buf).await?;

            time::sleep(self.period).await;
        }
    }

    async fn send(&mut self, buf: &[u8]) -> io::Result<()> {
        self.stream.write_all(buf).await?;
        self.stream.flush().await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use mockirc_protocol::Digest;
    use mockirc_testkit::LineClient;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use tokio::io::{duplex, DuplexStream};
    use tokio::time::Instant;

    use super::*;
    use crate::clock::{Clock, FixedClock};

    const PERIOD: Duration = Duration::from_secs(45);

    fn session(clock: impl Clock + 'static) -> (Session<DuplexStream, StdRng>, LineClient<DuplexStream>) {
        let (server, client) = duplex(64 * 1024);
        let generator = MessageGenerator::new(Arc::new(clock), StdRng::seed_from_u64(7));
        (Session::new(server, generator, PERIOD), LineClient::new(client))
    }

    #[tokio::test(start_paused = true)]
    async fn one_message_per_period() {
        let (mut session, mut client) = session(FixedClock(1_000));
        assert_eq!(session.state(), SessionState::Connected);
        let task = tokio::spawn(async move { session.run().await });

        client.expect_preamble().await.unwrap();
        let start = Instant::now();
        client.next_message().await.unwrap();
        assert_eq!(Instant::now(), start);

        let mut last = start;
        for _ in 0..4 {
            client.next_message().await.unwrap();
            let gap = Instant::now() - last;
            assert!(gap >= PERIOD && gap < PERIOD + Duration::from_millis(5), "gap = {:?}", gap);
            last = Instant::now();
        }

        let early = time::timeout(PERIOD / 2, client.next_message()).await;
        assert!(early.is_err(), "message arrived before the period elapsed");
        assert!(client.pending().is_empty());

        drop(client);
        assert!(task.await.unwrap().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn messages_carry_digest_of_clock() {
        const T0: u64 = 1_667_606_586;

        let (mut session, mut client) = session(FixedClock(T0));
        tokio::spawn(async move { session.run().await });

        client.expect_preamble().await.unwrap();
        for _ in 0..8 {
            let payload = client.next_message().await.unwrap().payload;
            assert_eq!(payload.digest(), &Digest::of_timestamp(T0));
            assert!(payload.timestamp().map_or(true, |t| t == T0));
        }
    }

    #[tokio::test]
    async fn closed_peer_ends_preamble() {
        let (mut session, client) = session(FixedClock(0));
        drop(client);

        let err = session.run().await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
        assert_eq!(session.state(), SessionState::Closed);
    }

    #[tokio::test(start_paused = true)]
    async fn closed_peer_ends_steady_state() {
        let (mut session, mut client) = session(FixedClock(0));
        let task = tokio::spawn(async move {
            let result = session.run().await;
            (result.is_err(), session.state())
        });

        client.expect_preamble().await.unwrap();
        client.next_message().await.unwrap();
        drop(client);

        assert_eq!(task.await.unwrap(), (true, SessionState::Closed));
    }
}
