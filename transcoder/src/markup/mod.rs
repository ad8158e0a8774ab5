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

//! Output dialect backends.
//!
//! Each backend renders document framing, escaped text and formatting
//! transitions for one markup language. Rendering methods take `&self` and
//! must be repeatable, because every run is rendered twice (measure, then
//! fill). State a backend keeps between runs is only updated through the
//! `commit_*` methods once the run has been rendered successfully.

mod html;
mod rtf;

pub use self::html::{Html, HtmlVersion};
pub use self::rtf::Rtf;

use crate::config::{Dialect, TranscoderConfig};
use crate::state::Transition;
use std::fmt;

/// A markup dialect the transcoder can emit.
pub trait Markup: fmt::Debug + Send {
    /// Writes the document prologue.
    fn write_header(&self, out: &mut dyn fmt::Write) -> fmt::Result;

    /// Writes one run of literal text, escaped for this dialect.
    ///
    /// Must not depend on the current formatting state.
    fn write_text(&self, text: &str, out: &mut dyn fmt::Write) -> fmt::Result;

    /// Writes the markup needed to move from `transition.before` to
    /// `transition.after`.
    fn write_transition(&self, transition: &Transition, out: &mut dyn fmt::Write)
    -> fmt::Result;

    /// Records that the output of [`Markup::write_transition`] was emitted.
    fn commit_transition(&mut self, transition: &Transition);

    /// Writes whatever closes open formatting, then the document epilogue.
    fn write_footer(&self, out: &mut dyn fmt::Write) -> fmt::Result;

    /// Records that the output of [`Markup::write_footer`] was emitted.
    fn commit_footer(&mut self);
}

/// Creates the backend selected by `config.dialect`.
pub fn for_config(config: &TranscoderConfig) -> Box<dyn Markup> {
    match config.dialect {
        Dialect::Html4 => Box::new(Html::new(HtmlVersion::Html4, config)),
        Dialect::Html5 => Box::new(Html::new(HtmlVersion::Html5, config)),
        Dialect::Rtf => Box::new(Rtf::new(config)),
    }
}
