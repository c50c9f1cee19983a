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

use crate::{read_line, write_line, CanIo, DecodeError, Result};

/// The greeting script sent once when a client connects.
pub const PREAMBLE: &[&str] = &[
    ":tantalum.libera.chat NOTICE * :*** Checking Ident",
    ":tantalum.libera.chat NOTICE * :*** Looking up your hostname...",
    ":tantalum.libera.chat NOTICE * :*** Found your hostname: li2292-254.members.linode.com",
    ":tantalum.libera.chat NOTICE * :*** No Ident response",
    ":tantalum.libera.chat 001 aheadley-ink :Welcome to the Libera.Chat Internet Relay Chat Network aheadley-ink",
    ":tantalum.libera.chat 002 aheadley-ink :Your host is tantalum.libera.chat[93.158.237.2/6667], running version solanum-1.0-dev",
    ":tantalum.libera.chat 003 aheadley-ink :This server was created Sat Nov 5 2022 at 00:03:06 UTC",
    ":tantalum.libera.chat 004 aheadley-ink tantalum.libera.chat solanum-1.0-dev DGIMQRSZaghilopsuwz CFILMPQRSTbcefgijklmnopqrstuvz bkloveqjfI",
    ":tantalum.libera.chat 005 aheadley-ink WHOX MONITOR=100 SAFELIST ELIST=CMNTU ETRACE FNC CALLERID=g KNOCK CHANTYPES=# EXCEPTS INVEX CHANMODES=eIbq,k,flj,CFLMPQRSTcgimnprstuz :are supported by this server",
    ":tantalum.libera.chat 005 aheadley-ink CHANLIMIT=#:250 PREFIX=(ov)@+ MAXLIST=bqeI:100 MODES=4 NETWORK=Libera.Chat STATUSMSG=@+ CASEMAPPING=rfc1459 NICKLEN=16 MAXNICKLEN=16 CHANNELLEN=50 TOPICLEN=390 DEAF=D :are supported by this server",
    ":tantalum.libera.chat 005 aheadley-ink TARGMAX=NAMES:1,LIST:1,KICK:1,WHOIS:1,PRIVMSG:4,NOTICE:4,ACCEPT:,MONITOR: EXTBAN=$,ajrxz :are supported by this server",
    ":tantalum.libera.chat 251 aheadley-ink :There are 68 users and 45187 invisible on 28 servers",
    ":tantalum.libera.chat 252 aheadley-ink 36 :IRC Operators online",
    ":tantalum.libera.chat 253 aheadley-ink 122 :unknown connection(s)",
    ":tantalum.libera.chat 254 aheadley-ink 22947 :channels formed",
];

/// The preamble lines in sending order, stripped of surrounding whitespace.
pub fn preamble_lines() -> impl Iterator<Item = &'static str> + Clone {
    PREAMBLE.iter().map(|line| line.trim())
}

/// The whole preamble as a single wire unit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Preamble;

impl Preamble {
    /// Number of lines in the preamble.
    pub fn line_count() -> usize {
        PREAMBLE.len()
    }
}

impl CanIo for Preamble {
    fn write(&self, vec: &mut Vec<u8>) {
        for line in preamble_lines() {
            write_line(vec, line);
        }
    }

    fn read(src: &[u8], offset: &mut usize) -> Result<Self> {
        let mut cursor = *offset;
        for expected in preamble_lines() {
            if read_line(src, &mut cursor)? != expected {
                return Err(DecodeError::Malformed("preamble line out of script"));
            }
        }
        *offset = cursor;
        Ok(Preamble)
    }
}
