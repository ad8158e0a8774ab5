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

/// Escape (`ESC`), the lead-in byte of every escape sequence.
pub const ESC: u8 = 0x1B;

/// Bell (`BEL`), one of the two terminators of an OSC string.
pub const BEL: u8 = 0x07;

/// Second byte of a Control Sequence Introducer (`ESC [`).
pub const CSI_INTRODUCER: u8 = b'[';

/// Second byte of an Operating System Command (`ESC ]`).
pub const OSC_INTRODUCER: u8 = b']';

/// Second byte of the String Terminator (`ESC \`).
pub const ST_FINAL: u8 = b'\\';

/// Final byte of a Select Graphic Rendition sequence.
pub const SGR_COMMAND: u8 = b'm';

/// Maximum length of an escape sequence in bytes.
///
/// An escape that grows past this length without a terminator is cut off and
/// handed on as a (malformed) escape run, which keeps the scan buffer bounded
/// on hostile or corrupt input.
pub const MAX_SEQUENCE_LENGTH: usize = 256;

/// Maximum number of parameters accepted in one CSI sequence.
///
/// Sequences carrying more parameters are treated as malformed.
pub const MAX_PARAMETER_COUNT: usize = 32;

/// Default number of bytes read from the input per chunk when streaming.
pub const DEFAULT_CHUNK_SIZE: usize = 4096;
