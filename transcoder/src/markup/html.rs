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
use crate::state::{FormatState, Transition};
use crate::style::{Color, Palette};
use std::fmt;

/// HTML flavor to emit.
///
/// The two versions share all logic and differ only in doctype, head
/// markup, line break syntax and the element used for underlining.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HtmlVersion {
    /// HTML 4.01 Transitional
    Html4,
    /// HTML5
    Html5,
}

/// An element the backend has opened and not yet closed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Element {
    Colors {
        foreground: Option<Color>,
        background: Option<Color>,
    },
    Underline,
}

/// Elements to keep from the bottom of the stack, and elements to open on
/// top of them.
struct Plan {
    keep: usize,
    open: Vec<Element>,
}

/// HTML backend.
///
/// Formatting is expressed as nested elements tracked on an explicit stack.
/// A transition closes elements from the top of the stack down to the first
/// one that no longer matches the new state and opens whatever is missing,
/// so tags always close in reverse order of opening.
#[derive(Clone, Debug)]
pub struct Html {
    version: HtmlVersion,
    title: String,
    font_family: String,
    font_size: u16,
    palette: Palette,
    stack: Vec<Element>,
}

impl Html {
    pub fn new(version: HtmlVersion, config: &TranscoderConfig) -> Html {
        Html {
            version,
            title: config.title.clone(),
            font_family: sanitize_font_family(&config.font_family),
            font_size: config.font_size,
            palette: config.palette.clone(),
            stack: Vec::new(),
        }
    }

    pub fn version(&self) -> HtmlVersion {
        self.version
    }

    /// Number of elements currently open.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    fn line_break(&self) -> &'static str {
        match self.version {
            HtmlVersion::Html4 => "<br>\n",
            HtmlVersion::Html5 => "<br />\n",
        }
    }

    fn plan(&self, after: &FormatState) -> Plan {
        let wanted = elements_for(after);
        let keep = self
            .stack
            .iter()
            .take_while(|element| wanted.contains(*element))
            .count();
        let open = wanted
            .into_iter()
            .filter(|element| !self.stack[..keep].contains(element))
            .collect();
        Plan { keep, open }
    }

    fn write_open(&self, element: &Element, out: &mut dyn fmt::Write) -> fmt::Result {
        match element {
            Element::Colors {
                foreground,
                background,
            } => {
                out.write_str("<span style=\"")?;
                if let Some(color) = foreground {
                    write!(out, "color:{}", self.palette.get(*color))?;
                }
                if let Some(color) = background {
                    if foreground.is_some() {
                        out.write_char(';')?;
                    }
                    write!(out, "background-color:{}", self.palette.get(*color))?;
                }
                out.write_str("\">")
            }
            Element::Underline => match self.version {
                HtmlVersion::Html4 => out.write_str("<u>"),
                HtmlVersion::Html5 => out.write_str("<span style=\"text-decoration:underline\">"),
            },
        }
    }

    fn write_close(&self, element: &Element, out: &mut dyn fmt::Write) -> fmt::Result {
        match (element, self.version) {
            (Element::Underline, HtmlVersion::Html4) => out.write_str("</u>"),
            _ => out.write_str("</span>"),
        }
    }

    fn write_container(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        let foreground = self.palette.get(Color::White);
        let background = self.palette.get(Color::Black);
        match self.version {
            HtmlVersion::Html4 => write!(
                out,
                "<div style=\"font-family:'{}',monospace;font-size:{}pt;color:{};background-color:{}\">\n",
                self.font_family, self.font_size, foreground, background
            ),
            HtmlVersion::Html5 => out.write_str("<div class=\"console\">\n"),
        }
    }
}

impl Markup for Html {
    fn write_header(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        match self.version {
            HtmlVersion::Html4 => {
                out.write_str(
                    "<!DOCTYPE HTML PUBLIC \"-//W3C//DTD HTML 4.01 Transitional//EN\" \
                     \"http://www.w3.org/TR/html4/loose.dtd\">\n",
                )?;
                out.write_str("<html>\n<head>\n")?;
                out.write_str(
                    "<meta http-equiv=\"Content-Type\" content=\"text/html; charset=utf-8\">\n",
                )?;
                out.write_str("<title>")?;
                escape_markup(&self.title, out)?;
                out.write_str("</title>\n</head>\n<body>\n")?;
            }
            HtmlVersion::Html5 => {
                out.write_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n")?;
                out.write_str("<title>")?;
                escape_markup(&self.title, out)?;
                out.write_str("</title>\n<style>\n")?;
                write!(
                    out,
                    ".console {{ font-family: '{}', monospace; font-size: {}pt; color: {}; background-color: {}; }}\n",
                    self.font_family,
                    self.font_size,
                    self.palette.get(Color::White),
                    self.palette.get(Color::Black)
                )?;
                out.write_str("</style>\n</head>\n<body>\n")?;
            }
        }
        self.write_container(out)
    }

    fn write_text(&self, text: &str, out: &mut dyn fmt::Write) -> fmt::Result {
        // A space may only stay breaking right after a printable character
        // of the same run. A run can follow an escape or start a line, and a
        // plain space there would collapse in the browser.
        let mut after_break = true;
        let mut after_space = false;
        for ch in text.chars() {
            match ch {
                ' ' => {
                    if after_space || after_break {
                        out.write_str("&nbsp;")?;
                    } else {
                        out.write_char(' ')?;
                    }
                    after_space = true;
                    continue;
                }
                '\n' => {
                    out.write_str(self.line_break())?;
                    after_break = true;
                    after_space = false;
                    continue;
                }
                '&' => out.write_str("&amp;")?,
                '<' => out.write_str("&lt;")?,
                '>' => out.write_str("&gt;")?,
                '\t' => out.write_char('\t')?,
                ch if ch.is_control() => continue,
                ch => out.write_char(ch)?,
            }
            after_break = false;
            after_space = false;
        }
        Ok(())
    }

    fn write_transition(
        &self,
        transition: &Transition,
        out: &mut dyn fmt::Write,
    ) -> fmt::Result {
        let plan = self.plan(&transition.after);
        for element in self.stack[plan.keep..].iter().rev() {
            self.write_close(element, out)?;
        }
        for element in &plan.open {
            self.write_open(element, out)?;
        }
        Ok(())
    }

    fn commit_transition(&mut self, transition: &Transition) {
        let plan = self.plan(&transition.after);
        self.stack.truncate(plan.keep);
        self.stack.extend(plan.open);
    }

    fn write_footer(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        for element in self.stack.iter().rev() {
            self.write_close(element, out)?;
        }
        out.write_str("</div>\n</body>\n</html>\n")
    }

    fn commit_footer(&mut self) {
        self.stack.clear();
    }
}

/// Elements needed to render `state`, outermost first.
fn elements_for(state: &FormatState) -> Vec<Element> {
    let mut elements = Vec::with_capacity(2);
    if state.foreground.is_some() || state.background.is_some() {
        elements.push(Element::Colors {
            foreground: state.foreground,
            background: state.background,
        });
    }
    if state.underline {
        elements.push(Element::Underline);
    }
    elements
}

/// Escapes text for use in element content or a double quoted attribute.
fn escape_markup(text: &str, out: &mut dyn fmt::Write) -> fmt::Result {
    for ch in text.chars() {
        match ch {
            '&' => out.write_str("&amp;")?,
            '<' => out.write_str("&lt;")?,
            '>' => out.write_str("&gt;")?,
            '"' => out.write_str("&quot;")?,
            ch if ch.is_control() => {}
            ch => out.write_char(ch)?,
        }
    }
    Ok(())
}

/// Font names end up inside CSS, where entities are not decoded.
fn sanitize_font_family(name: &str) -> String {
    name.chars()
        .filter(|ch| ch.is_alphanumeric() || matches!(ch, ' ' | '-' | '_'))
        .collect()
}
