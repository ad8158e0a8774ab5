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

//! Two pass output buffering.
//!
//! Every run of output is produced by calling the same writer closure twice:
//! first into a [`ByteCounter`] to learn the exact size, then into an
//! [`OutputBuffer`] reserved with that size. The buffer never reallocates
//! during the fill pass and a size disagreement between the passes is a bug
//! in the markup backend.

use crate::{TranscodeError, TranscodeResult};
use bytes::Bytes;
use std::fmt;

/// A writer that only counts the UTF-8 bytes written to it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ByteCounter {
    len: usize,
}

impl ByteCounter {
    pub fn new() -> ByteCounter {
        ByteCounter::default()
    }

    /// Number of bytes counted so far.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl fmt::Write for ByteCounter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.len += s.len();
        Ok(())
    }
}

/// An owned output buffer whose storage is reserved up front.
#[derive(Debug)]
pub struct OutputBuffer {
    bytes: Vec<u8>,
}

impl OutputBuffer {
    /// Reserves exactly `capacity` bytes.
    ///
    /// Allocation failure is reported as [`TranscodeError::Allocation`] rather
    /// than aborting the process.
    pub fn with_exact_capacity(capacity: usize) -> TranscodeResult<OutputBuffer> {
        let mut bytes = Vec::new();
        bytes
            .try_reserve_exact(capacity)
            .map_err(|_| TranscodeError::Allocation {
                requested: capacity,
            })?;
        Ok(OutputBuffer { bytes })
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.bytes.capacity()
    }

    /// Converts the buffer into immutable bytes without copying.
    pub fn freeze(self) -> Bytes {
        Bytes::from(self.bytes)
    }
}

impl fmt::Write for OutputBuffer {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.bytes.extend_from_slice(s.as_bytes());
        Ok(())
    }
}

/// Produces one run of output with a measuring pass followed by a fill pass.
///
/// `write` must emit identical output on both calls.
///
/// # Panics
///
/// Panics if the fill pass writes a different number of bytes than the
/// measuring pass counted.
pub fn render<F>(mut write: F) -> TranscodeResult<Bytes>
where
    F: FnMut(&mut dyn fmt::Write) -> fmt::Result,
{
    let mut counter = ByteCounter::new();
    write(&mut counter)?;
    let expected = counter.len();
    if expected == 0 {
        return Ok(Bytes::new());
    }

    let mut buffer = OutputBuffer::with_exact_capacity(expected)?;
    write(&mut buffer)?;
    assert_eq!(
        buffer.len(),
        expected,
        "markup fill pass disagrees with its measurement"
    );
    Ok(buffer.freeze())
}
