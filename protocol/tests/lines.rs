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

use mockirc_protocol::{read_line, CanIo, DecodeError, Digest, Payload, PrivMsg, RawLine};
use mockirc_testkit::check_line;

check_line!(read_raw_line: b"PING :server\r\n" = write_raw_line: RawLine = RawLine::from("PING :server".to_owned()));

check_line!(
    read_bare_digest: b":mock!~mock@mock.server PRIVMSG #mock-channel :cfcd208495d565ef66e7dff9f98764da\r\n"
    = write_bare_digest: PrivMsg = PrivMsg::from(Payload::new(0, false))
);

check_line!(
    read_stamped_digest: b":mock!~mock@mock.server PRIVMSG #mock-channel :0 cfcd208495d565ef66e7dff9f98764da\r\n"
    = write_stamped_digest: PrivMsg = PrivMsg::from(Payload::new(0, true))
);

#[test]
pub fn read_consecutive_lines() {
    let mut vec = vec![];
    PrivMsg::from(Payload::new(7, true)).write(&mut vec);
    PrivMsg::from(Payload::new(8, false)).write(&mut vec);

    let mut offset = 0;
    let first = PrivMsg::read(&vec, &mut offset).expect("first line");
    let second = PrivMsg::read(&vec, &mut offset).expect("second line");
    assert_eq!(first.payload.timestamp(), Some(7));
    assert_eq!(second.payload, Payload::Digest(Digest::of_timestamp(8)));
    assert_eq!(offset, vec.len());
    assert_eq!(PrivMsg::read(&vec, &mut offset), Err(DecodeError::UnexpectedEof));
}

#[test]
pub fn bare_line_feed_is_not_a_terminator() {
    let mut offset = 0;
    assert_eq!(read_line(b"abc\n", &mut offset), Err(DecodeError::UnexpectedEof));
    assert_eq!(
        read_line(b"abc\ndef\r\n", &mut offset),
        Err(DecodeError::Malformed("stray line break inside a line"))
    );
    assert_eq!(offset, 0);
}

#[test]
pub fn invalid_utf8_is_reported() {
    let mut offset = 0;
    assert_eq!(read_line(b"\xff\xfe\r\n", &mut offset), Err(DecodeError::InvalidUtf8));
}
