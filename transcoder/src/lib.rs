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

//! VT100/ANSI escape sequence transcoder.
//!
//! Converts a byte stream of console output, mixing literal text with ANSI
//! Select Graphic Rendition (SGR) sequences, into a static HTML4, HTML5 or RTF
//! document that renders with the same colors and underlining.
//!
//! The [`Transcoder`] session owns the formatting state of one document and
//! exposes four calls: [`Transcoder::begin_document`],
//! [`Transcoder::process_text`], [`Transcoder::process_escape`] and
//! [`Transcoder::end_document`]. The [`RunDecoder`] splits raw input into the
//! text and escape runs those calls expect.

mod buffer;
mod config;
mod consts;
mod escape;
pub mod markup;
mod result;
mod scanner;
mod session;
mod state;
mod style;

pub use self::buffer::{ByteCounter, OutputBuffer, render};
pub use self::config::{Dialect, TranscoderConfig};
pub use self::consts::{DEFAULT_CHUNK_SIZE, MAX_PARAMETER_COUNT, MAX_SEQUENCE_LENGTH};
pub use self::escape::ParsedEscape;
pub use self::markup::{Html, HtmlVersion, Markup, Rtf};
pub use self::result::{TranscodeError, TranscodeResult};
pub use self::scanner::{Run, RunDecoder};
pub use self::session::{Phase, Transcoder};
pub use self::state::{DEFAULT_FOREGROUND, FormatState, Transition};
pub use self::style::{Color, Palette, Rgb};
