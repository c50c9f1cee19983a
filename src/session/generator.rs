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

use std::sync::Arc;

use derive_new::new;
use mockirc_protocol::{Payload, PrivMsg, STAMPED_PROBABILITY};
use rand::Rng;

use crate::clock::Clock;

/// Produces the steady-state messages of one session.
///
/// Each message carries the digest of the current timestamp, preceded by the timestamp itself with
/// probability `STAMPED_PROBABILITY`.
#[derive(new)]
pub struct MessageGenerator<R> {
    clock: Arc<dyn Clock>,
    rng: R,
}

impl<R: Rng> MessageGenerator<R> {
    pub fn next_message(&mut self) -> PrivMsg {
        let timestamp = self.clock.unix_seconds();
        let stamped = self.rng.gen_bool(STAMPED_PROBABILITY);
        PrivMsg::from(Payload::new(timestamp, stamped))
    }
}
