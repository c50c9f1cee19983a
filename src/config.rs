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

use std::time::Duration;

use clap::Parser;
use derive_new::new;
use getset::{CopyGetters, Getters};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 9660;
pub const DEFAULT_PERIOD_SECONDS: u64 = 45;

/// Command line configuration.
#[derive(Clone, Debug, PartialEq, Eq, Parser, Getters, CopyGetters, new)]
#[command(
    name = "mockirc",
    version,
    about = "Accepts chat clients, greets them and sends them a synthetic message periodically"
)]
pub struct Config {
    /// Host to listen on
    #[arg(long, default_value = DEFAULT_HOST)]
    #[getset(get = "pub")]
    listen_host: String,

    /// Port to listen on
    #[arg(long, default_value_t = DEFAULT_PORT)]
    #[getset(get_copy = "pub")]
    listen_port: u16,

    /// Seconds to wait between two messages on the same connection
    #[arg(long, default_value_t = DEFAULT_PERIOD_SECONDS, value_parser = clap::value_parser!(u64).range(1..))]
    #[getset(get_copy = "pub")]
    period_seconds: u64,
}

impl Config {
    pub fn period(&self) -> Duration {
        Duration::from_secs(self.period_seconds)
    }

    /// The listening address in `host:port` form, for display.
    pub fn listen_addr(&self) -> String {
        if self.listen_host.contains(':') {
            format!("[{}]:{}", self.listen_host, self.listen_port)
        } else {
            format!("{}:{}", self.listen_host, self.listen_port)
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_HOST.to_owned(), DEFAULT_PORT, DEFAULT_PERIOD_SECONDS)
    }
}
