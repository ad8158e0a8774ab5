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

use crate::consts::{CSI_INTRODUCER, ESC, MAX_PARAMETER_COUNT, SGR_COMMAND};
use crate::state::{FormatState, Transition};
use tracing::trace;

/// One Control Sequence Introducer sequence, split into its numeric
/// parameters and command byte.
///
/// Format: `ESC [ <params> <final_byte>` where `<params>` is a list of
/// semicolon separated decimal numbers and `<final_byte>` is in
/// `0x40..=0x7E`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedEscape {
    parameters: Vec<u32>,
    command: u8,
}

impl ParsedEscape {
    /// Parses a complete escape run.
    ///
    /// Returns `None` for anything that is not a well-formed CSI sequence:
    /// a missing `ESC [` lead-in, a missing final byte, any parameter byte
    /// other than a digit or `;` (including private markers such as `?`), or
    /// more than [`MAX_PARAMETER_COUNT`] parameters.
    ///
    /// An empty slot between separators defaults to `0`. An empty parameter
    /// list yields no parameters at all. Values too large for `u32` saturate.
    pub fn parse(bytes: &[u8]) -> Option<ParsedEscape> {
        let body = bytes.strip_prefix(&[ESC, CSI_INTRODUCER])?;
        let (&command, params) = body.split_last()?;
        if !(0x40..=0x7E).contains(&command) {
            return None;
        }

        let mut parameters = Vec::new();
        if !params.is_empty() {
            for field in params.split(|&byte| byte == b';') {
                if parameters.len() == MAX_PARAMETER_COUNT {
                    return None;
                }
                let mut value: u32 = 0;
                for &digit in field {
                    if !digit.is_ascii_digit() {
                        return None;
                    }
                    value = value
                        .saturating_mul(10)
                        .saturating_add(u32::from(digit - b'0'));
                }
                parameters.push(value);
            }
        }

        Some(ParsedEscape {
            parameters,
            command,
        })
    }

    /// The numeric parameters in order of appearance.
    pub fn parameters(&self) -> &[u32] {
        &self.parameters
    }

    /// The final (command) byte.
    pub fn command(&self) -> u8 {
        self.command
    }

    /// Whether this is a Select Graphic Rendition (`m`) sequence.
    pub fn is_sgr(&self) -> bool {
        self.command == SGR_COMMAND
    }

    /// Applies this sequence to `state`.
    ///
    /// Only SGR sequences change state. Every other command (cursor movement,
    /// erase, mode changes) is swallowed and returns `None`.
    pub fn apply_to(&self, state: &mut FormatState) -> Option<Transition> {
        if self.is_sgr() {
            Some(state.apply(&self.parameters))
        } else {
            trace!(
                command = %char::from(self.command),
                "swallowing non-SGR control sequence"
            );
            None
        }
    }
}
