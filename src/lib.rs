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

//! A mock chat server for exercising clients.
//!
//! Every accepted connection receives a fixed greeting script, followed by a synthetic channel
//! message at a fixed interval for as long as the connection stays open. Connections share no
//! state with each other.

use tokio::signal;

pub mod clock;
pub mod config;
pub mod error;
pub mod server;
pub mod session;

pub use config::Config;
pub use error::{Error, Result};
pub use server::Server;

/// Serves `config` until the process receives an interrupt.
pub async fn run(config: Config) -> Result {
    let server = Server::bind(&config).await?;
    server.serve(signal::ctrl_c()).await
}
