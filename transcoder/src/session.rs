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

use crate::buffer::render;
use crate::config::TranscoderConfig;
use crate::escape::ParsedEscape;
use crate::markup::{self, Markup};
use crate::scanner::{Run, RunDecoder};
use crate::state::FormatState;
use crate::{TranscodeError, TranscodeResult};
use bytes::Bytes;
use std::io::{ErrorKind, Read, Write};
use tokio_util::bytes::BytesMut;
use tokio_util::codec::Decoder;
use tracing::{debug, trace};

/// Lifecycle of a document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Created, header not yet written
    Ready,
    /// Header written, accepting runs
    Open,
    /// Footer written
    Finished,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Ready => write!(f, "not started"),
            Phase::Open => write!(f, "open"),
            Phase::Finished => write!(f, "finished"),
        }
    }
}

/// Conversion session for one document.
///
/// Owns the [`FormatState`] and the dialect backend for the whole document.
/// Every call returns the output for exactly that call, which the caller is
/// expected to write out before processing the next run. Separate documents
/// use separate sessions and may be converted on separate threads.
///
/// Calls must follow the order `begin_document`, any number of
/// `process_text` / `process_escape`, then `end_document`.
#[derive(Debug)]
pub struct Transcoder {
    config: TranscoderConfig,
    state: FormatState,
    markup: Box<dyn Markup>,
    phase: Phase,
}

impl Transcoder {
    pub fn new(config: TranscoderConfig) -> Transcoder {
        let markup = markup::for_config(&config);
        Transcoder {
            config,
            state: FormatState::new(),
            markup,
            phase: Phase::Ready,
        }
    }

    pub fn config(&self) -> &TranscoderConfig {
        &self.config
    }

    /// The formatting state after the last processed escape.
    pub fn state(&self) -> &FormatState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    fn require(&self, phase: Phase, operation: &'static str) -> TranscodeResult<()> {
        if self.phase == phase {
            Ok(())
        } else {
            Err(TranscodeError::InvalidPhase {
                operation,
                phase: self.phase,
            })
        }
    }

    /// Writes the document header.
    pub fn begin_document(&mut self) -> TranscodeResult<Bytes> {
        self.require(Phase::Ready, "begin document")?;
        let output = render(|out| self.markup.write_header(out))?;
        self.phase = Phase::Open;
        debug!(dialect = %self.config.dialect, "document started");
        Ok(output)
    }

    /// Converts one run of literal text.
    ///
    /// Invalid UTF-8 is replaced with U+FFFD. The formatting state is neither
    /// read nor changed.
    pub fn process_text(&mut self, text: &[u8]) -> TranscodeResult<Bytes> {
        self.require(Phase::Open, "process text")?;
        let text = String::from_utf8_lossy(text);
        render(|out| self.markup.write_text(&text, out))
    }

    /// Interprets one escape run.
    ///
    /// SGR sequences update the formatting state and return the markup for
    /// the change. Every other sequence, well-formed or not, is dropped and
    /// returns no output.
    pub fn process_escape(&mut self, escape: &[u8]) -> TranscodeResult<Bytes> {
        self.require(Phase::Open, "process escape")?;
        let Some(parsed) = ParsedEscape::parse(escape) else {
            trace!(len = escape.len(), "dropping malformed escape sequence");
            return Ok(Bytes::new());
        };

        let mut next = self.state;
        let Some(transition) = parsed.apply_to(&mut next) else {
            return Ok(Bytes::new());
        };
        if transition.is_empty() {
            return Ok(Bytes::new());
        }

        let output = render(|out| self.markup.write_transition(&transition, out))?;
        self.markup.commit_transition(&transition);
        self.state = next;
        Ok(output)
    }

    /// Dispatches a run produced by [`RunDecoder`].
    pub fn process_run(&mut self, run: &Run) -> TranscodeResult<Bytes> {
        match run {
            Run::Text(text) => self.process_text(text),
            Run::Escape(escape) => self.process_escape(escape),
        }
    }

    /// Closes any open formatting and writes the document footer.
    pub fn end_document(&mut self) -> TranscodeResult<Bytes> {
        self.require(Phase::Open, "end document")?;
        let output = render(|out| self.markup.write_footer(out))?;
        self.markup.commit_footer();
        self.phase = Phase::Finished;
        debug!(dialect = %self.config.dialect, "document finished");
        Ok(output)
    }

    /// Converts a complete input into a complete document.
    pub fn convert(&mut self, input: &[u8]) -> TranscodeResult<Bytes> {
        let mut document = BytesMut::new();
        document.extend_from_slice(&self.begin_document()?);

        let mut decoder = RunDecoder::new();
        let mut pending = BytesMut::from(input);
        while let Some(run) = decoder.decode_eof(&mut pending)? {
            document.extend_from_slice(&self.process_run(&run)?);
        }

        document.extend_from_slice(&self.end_document()?);
        Ok(document.freeze())
    }

    /// Streams `reader` through the session into `writer`, reading
    /// `chunk_size` bytes at a time.
    ///
    /// Each run's output is written before the next run is processed.
    /// Returns the number of bytes written.
    pub fn transcode<R, W>(
        &mut self,
        mut reader: R,
        mut writer: W,
        chunk_size: usize,
    ) -> TranscodeResult<u64>
    where
        R: Read,
        W: Write,
    {
        let mut written = 0u64;
        let mut emit = |output: Bytes, writer: &mut W| -> TranscodeResult<()> {
            writer.write_all(&output)?;
            written += output.len() as u64;
            Ok(())
        };

        emit(self.begin_document()?, &mut writer)?;

        let mut decoder = RunDecoder::new();
        let mut chunk = vec![0u8; chunk_size.max(1)];
        let mut pending = BytesMut::with_capacity(chunk.len());
        loop {
            let read = match reader.read(&mut chunk) {
                Ok(0) => break,
                Ok(read) => read,
                Err(error) if error.kind() == ErrorKind::Interrupted => continue,
                Err(error) => return Err(error.into()),
            };
            pending.extend_from_slice(&chunk[..read]);
            while let Some(run) = decoder.decode(&mut pending)? {
                emit(self.process_run(&run)?, &mut writer)?;
            }
        }
        while let Some(run) = decoder.decode_eof(&mut pending)? {
            emit(self.process_run(&run)?, &mut writer)?;
        }

        emit(self.end_document()?, &mut writer)?;
        writer.flush()?;
        debug!(written, "transcode complete");
        Ok(written)
    }
}
