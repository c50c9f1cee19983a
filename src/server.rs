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

use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::net::{TcpListener, TcpStream};

use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::session::{MessageGenerator, Session};

/// Accepts connections and starts an independent session for each of them.
pub struct Server {
    listener: TcpListener,
    period: Duration,
    clock: Arc<dyn Clock>,
}

impl Server {
    /// Binds the listening socket described by `config`.
    pub async fn bind(config: &Config) -> Result<Self> {
        let addr = config.listen_addr();
        let listener = TcpListener::bind((config.listen_host().as_str(), config.listen_port()))
            .await
            .map_err(|source| Error::Bind { addr, source })?;

        match listener.local_addr() {
            Ok(local) => log::info!("Listening on {}", local),
            Err(err) => log::warn!("Listening on unknown address: {}", err),
        }

        Ok(Self {
            listener,
            period: config.period(),
            clock: Arc::new(SystemClock),
        })
    }

    /// Overrides the interval between two messages of a session.
    pub fn with_period(mut self, period: Duration) -> Self {
        self.period = period;
        self
    }

    /// Overrides the clock that timestamps generated messages.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accepts connections until `shutdown` resolves, then closes the listening socket.
    ///
    /// Sessions already running are left alone; they end with their connection or with the
    /// process.
    pub async fn serve<F>(self, shutdown: F) -> Result
    where
        F: Future<Output = io::Result<()>>,
    {
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                signal = &mut shutdown => {
                    signal.map_err(Error::Signal)?;
                    log::info!("Shutting down");
                    return Ok(());
                }
                accepted = self.listener.accept() => self.on_accept(accepted),
            }
        }
    }

    /// Starts a session for an accepted connection. Accept errors are only logged.
    fn on_accept(&self, accepted: io::Result<(TcpStream, SocketAddr)>) {
        let (stream, peer) = match accepted {
            Ok(pair) => pair,
            Err(err) => {
                log::error!("Error accepting connection: {}", err);
                return;
            }
        };
        log::info!("Connection from: {}", peer.ip());

        let generator = MessageGenerator::new(Arc::clone(&self.clock), StdRng::from_entropy());
        let mut session = Session::new(stream, generator, self.period);
        tokio::spawn(async move {
            match session.run().await {
                Ok(never) => match never {},
                Err(err) => log::debug!("Session with {} closed: {}", peer, err),
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use mockirc_testkit::LineClient;

    use super::*;

    #[tokio::test]
    async fn accept_error_does_not_stop_accepting() {
        let config = Config::new("127.0.0.1".to_owned(), 0, 45);
        let server = Server::bind(&config).await.unwrap();
        let addr = server.local_addr().unwrap();

        server.on_accept(Err(io::Error::from(io::ErrorKind::Other)));

        let mut client = LineClient::connect(addr).await.unwrap();
        let accepted = server.listener.accept().await;
        server.on_accept(accepted);
        client.expect_preamble().await.unwrap();
    }
}
