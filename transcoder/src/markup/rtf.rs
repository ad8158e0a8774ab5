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

use super::Markup;
use crate::config::TranscoderConfig;
use crate::state::Transition;
use crate::style::{Color, Palette};
use std::fmt;

/// Rich Text Format backend.
///
/// RTF character formatting is flat: every change reissues the control word
/// for the attribute that changed, so the backend keeps no stack. Color
/// table entry 0 is the "auto" color used for default foreground and
/// background; palette colors follow at indices 1 to 16.
#[derive(Clone, Debug)]
pub struct Rtf {
    title: String,
    font_family: String,
    font_size: u16,
    palette: Palette,
}

impl Rtf {
    pub fn new(config: &TranscoderConfig) -> Rtf {
        Rtf {
            title: config.title.clone(),
            font_family: config
                .font_family
                .chars()
                .filter(|ch| !ch.is_control() && !matches!(ch, '\\' | '{' | '}' | ';'))
                .collect(),
            font_size: config.font_size,
            palette: config.palette.clone(),
        }
    }
}

/// Color table index for a palette entry, `0` (auto) for the default.
fn color_index(color: Option<Color>) -> u32 {
    color.map_or(0, |color| u32::from(color.index()) + 1)
}

impl Markup for Rtf {
    fn write_header(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        out.write_str("{\\rtf1\\ansi\\ansicpg1252\\deff0\n")?;
        write!(
            out,
            "{{\\fonttbl{{\\f0\\fmodern\\fcharset0 {};}}}}\n",
            self.font_family
        )?;
        out.write_str("{\\colortbl ;")?;
        for (_, rgb) in self.palette.iter() {
            write!(out, "\\red{}\\green{}\\blue{};", rgb.red, rgb.green, rgb.blue)?;
        }
        out.write_str("}\n{\\info{\\title ")?;
        self.write_text(&self.title, out)?;
        out.write_str("}}\n")?;
        write!(out, "\\f0\\fs{} ", u32::from(self.font_size) * 2)
    }

    fn write_text(&self, text: &str, out: &mut dyn fmt::Write) -> fmt::Result {
        for ch in text.chars() {
            match ch {
                '\\' => out.write_str("\\\\")?,
                '{' => out.write_str("\\{")?,
                '}' => out.write_str("\\}")?,
                '\n' => out.write_str("\\par\n")?,
                '\t' => out.write_str("\\tab ")?,
                ch if ch.is_control() => {}
                ch if ch.is_ascii() => out.write_char(ch)?,
                ch => {
                    let mut units = [0u16; 2];
                    for unit in ch.encode_utf16(&mut units).iter() {
                        // RTF takes the UTF-16 unit as a signed 16-bit value.
                        write!(out, "\\u{}?", *unit as i16)?;
                    }
                }
            }
        }
        Ok(())
    }

    fn write_transition(
        &self,
        transition: &Transition,
        out: &mut dyn fmt::Write,
    ) -> fmt::Result {
        if transition.foreground_changed() {
            write!(out, "\\cf{} ", color_index(transition.after.foreground))?;
        }
        if transition.background_changed() {
            write!(out, "\\highlight{} ", color_index(transition.after.background))?;
        }
        if transition.underline_changed() {
            out.write_str(if transition.after.underline {
                "\\ul "
            } else {
                "\\ulnone "
            })?;
        }
        Ok(())
    }

    fn commit_transition(&mut self, _transition: &Transition) {}

    fn write_footer(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        out.write_str("}\n")
    }

    fn commit_footer(&mut self) {}
}
