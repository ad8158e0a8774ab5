//
// Copyright 2017-2026 Hans W. Uhlig. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//

use crate::consts::{BEL, CSI_INTRODUCER, ESC, MAX_SEQUENCE_LENGTH, OSC_INTRODUCER, ST_FINAL};
use crate::{TranscodeError, TranscodeResult};
use bytes::Bytes;
use tokio_util::bytes::{Buf, BytesMut};
use tokio_util::codec::Decoder;
use tracing::{instrument, trace};

/// A slice of input that is either literal text or one escape sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Run {
    /// Literal text containing no `ESC` byte
    Text(Bytes),
    /// One escape sequence starting with `ESC`, possibly malformed
    Escape(Bytes),
}

impl Run {
    /// The raw bytes of this run.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Run::Text(bytes) | Run::Escape(bytes) => bytes,
        }
    }
}

/// Kind of sequence an overlong escape was cut from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Overflow {
    /// `ESC [`, discarded through its final byte
    ControlSequence,
    /// `ESC ]`, discarded through `BEL` or `ESC \`
    OperatingSystemCommand,
}

/// Outcome of scanning for the end of an escape sequence.
enum Scan {
    /// The sequence occupies this many bytes.
    Complete(usize),
    /// The sequence reached [`MAX_SEQUENCE_LENGTH`] without a terminator.
    Overlong(Overflow),
    /// More input is needed to find the end.
    Incomplete,
}

/// Splits a byte stream into alternating [`Run::Text`] and [`Run::Escape`]
/// runs.
///
/// Recognized escapes:
/// - `ESC [ ... <0x40-0x7E>` - Control Sequence
/// - `ESC ] ... BEL` or `ESC ] ... ESC \` - Operating System Command
/// - `ESC <any>` - two byte escape
///
/// A sequence interrupted by another `ESC` is cut off and emitted as an
/// escape run of its own. A sequence reaching [`MAX_SEQUENCE_LENGTH`] bytes
/// without a terminator is emitted as a truncated escape run, and the rest of
/// it is discarded up to its terminator without ever surfacing as text.
///
/// Text runs only end before an escape, at end of input, or right before a
/// printable character. The next run therefore never starts inside a UTF-8
/// character or with whitespace that depends on what preceded it.
#[derive(Clone, Copy, Debug, Default)]
pub struct RunDecoder {
    discarding: Option<Overflow>,
}

impl RunDecoder {
    pub fn new() -> RunDecoder {
        RunDecoder::default()
    }

    /// Drops the remainder of an overlong sequence from the front of `src`.
    fn discard(&mut self, overflow: Overflow, src: &mut BytesMut) {
        let (len, finished) = overflow_len(overflow, src);
        trace!(len, finished, "discarding remainder of overlong escape");
        src.advance(len);
        if finished {
            self.discarding = None;
        }
    }
}

impl Decoder for RunDecoder {
    type Item = Run;
    type Error = TranscodeError;

    #[instrument(level = "trace", skip_all)]
    fn decode(&mut self, src: &mut BytesMut) -> TranscodeResult<Option<Run>> {
        if let Some(overflow) = self.discarding {
            self.discard(overflow, src);
            if self.discarding.is_some() {
                return Ok(None);
            }
        }
        if src.is_empty() {
            return Ok(None);
        }

        if src[0] == ESC {
            return Ok(match scan_escape(src) {
                Scan::Complete(len) => Some(Run::Escape(src.split_to(len).freeze())),
                Scan::Overlong(overflow) => {
                    self.discarding = Some(overflow);
                    Some(Run::Escape(src.split_to(MAX_SEQUENCE_LENGTH).freeze()))
                }
                Scan::Incomplete => None,
            });
        }

        let text_len = match src.iter().position(|&byte| byte == ESC) {
            Some(position) => position,
            None => text_run_len(src),
        };
        if text_len == 0 {
            return Ok(None);
        }
        Ok(Some(Run::Text(src.split_to(text_len).freeze())))
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> TranscodeResult<Option<Run>> {
        if let Some(overflow) = self.discarding {
            self.discard(overflow, src);
            // Only a lone `ESC` can be left over, and it starts a new escape.
            self.discarding = None;
        }
        if src.is_empty() {
            return Ok(None);
        }

        if src[0] != ESC {
            let len = src.iter().position(|&byte| byte == ESC).unwrap_or(src.len());
            return Ok(Some(Run::Text(src.split_to(len).freeze())));
        }
        if let Some(run) = self.decode(src)? {
            return Ok(Some(run));
        }

        let rest = src.split().freeze();
        trace!(len = rest.len(), "flushing unterminated escape at end of input");
        Ok(Some(Run::Escape(rest)))
    }
}

/// Finds the end of the escape sequence at the start of `buf`.
fn scan_escape(buf: &[u8]) -> Scan {
    let Some(&introducer) = buf.get(1) else {
        return Scan::Incomplete;
    };
    match introducer {
        CSI_INTRODUCER => {
            for (index, &byte) in buf.iter().enumerate().skip(2) {
                if index >= MAX_SEQUENCE_LENGTH {
                    return Scan::Overlong(Overflow::ControlSequence);
                }
                if byte == ESC {
                    return Scan::Complete(index);
                }
                if (0x40..=0x7E).contains(&byte) {
                    return Scan::Complete(index + 1);
                }
            }
            Scan::Incomplete
        }
        OSC_INTRODUCER => {
            for (index, &byte) in buf.iter().enumerate().skip(2) {
                if index >= MAX_SEQUENCE_LENGTH {
                    return Scan::Overlong(Overflow::OperatingSystemCommand);
                }
                if byte == BEL {
                    return Scan::Complete(index + 1);
                }
                if byte == ESC {
                    return match buf.get(index + 1) {
                        Some(&ST_FINAL) => Scan::Complete(index + 2),
                        Some(_) => Scan::Complete(index),
                        None => Scan::Incomplete,
                    };
                }
            }
            Scan::Incomplete
        }
        _ => Scan::Complete(2),
    }
}

/// Number of bytes at the front of `buf` that still belong to an overlong
/// sequence, and whether its end was found. An `ESC` ends the sequence
/// without being consumed, unless it is the `ESC \` terminator of an
/// Operating System Command or the last byte seen so far.
fn overflow_len(overflow: Overflow, buf: &[u8]) -> (usize, bool) {
    for (index, &byte) in buf.iter().enumerate() {
        match overflow {
            Overflow::ControlSequence if byte == ESC => return (index, true),
            Overflow::ControlSequence if (0x40..=0x7E).contains(&byte) => {
                return (index + 1, true);
            }
            Overflow::OperatingSystemCommand if byte == BEL => return (index + 1, true),
            Overflow::OperatingSystemCommand if byte == ESC => {
                return match buf.get(index + 1) {
                    Some(&ST_FINAL) => (index + 2, true),
                    Some(_) => (index, true),
                    None => (index, false),
                };
            }
            _ => {}
        }
    }
    (buf.len(), false)
}

/// Length of the text run to emit from `buf`, which holds no `ESC`.
///
/// The run is cut right before the last printable character, so trailing
/// whitespace, control characters and partial UTF-8 wait for more input.
/// Once the held tail reaches [`MAX_SEQUENCE_LENGTH`] bytes it is cut at the
/// last character boundary instead.
fn text_run_len(buf: &[u8]) -> usize {
    let cut = (1..buf.len())
        .rev()
        .find(|&index| starts_printable(&buf[index..]))
        .unwrap_or(0);
    if buf.len() - cut < MAX_SEQUENCE_LENGTH {
        return cut;
    }
    (1..buf.len())
        .rev()
        .find(|&index| buf[index] & 0xC0 != 0x80)
        .unwrap_or(buf.len())
}

/// Whether the character starting at `buf[0]` is rendered as a visible
/// character (invalid UTF-8 included, as it becomes U+FFFD).
fn starts_printable(buf: &[u8]) -> bool {
    match buf[0] {
        b'\t' | 0x21..=0x7E => true,
        // C1 controls, U+0080 to U+009F
        0xC2 => buf.get(1).is_some_and(|next| !(0x80..=0x9F).contains(next)),
        0xC0..=0xFF => true,
        _ => false,
    }
}
