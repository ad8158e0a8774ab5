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

use crate::style::Palette;
use crate::TranscodeError;
use std::str::FromStr;

/// Output markup dialect.
///
/// Chosen when a [`crate::Transcoder`] is created and fixed for the lifetime
/// of the document.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Dialect {
    /// HTML 4.01 Transitional
    Html4,
    /// HTML5
    #[default]
    Html5,
    /// Rich Text Format
    Rtf,
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dialect::Html4 => write!(f, "html4"),
            Dialect::Html5 => write!(f, "html5"),
            Dialect::Rtf => write!(f, "rtf"),
        }
    }
}

impl FromStr for Dialect {
    type Err = TranscodeError;

    fn from_str(name: &str) -> Result<Dialect, TranscodeError> {
        match name.to_ascii_lowercase().as_str() {
            "html4" => Ok(Dialect::Html4),
            "html5" => Ok(Dialect::Html5),
            "rtf" => Ok(Dialect::Rtf),
            _ => Err(TranscodeError::UnknownDialect(name.to_string())),
        }
    }
}

/// Transcoder configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TranscoderConfig {
    /// Output dialect
    pub dialect: Dialect,

    /// Document title
    pub title: String,

    /// Monospace font used for the document body
    pub font_family: String,

    /// Font size in points
    pub font_size: u16,

    /// RGB values for the 16 palette colors
    pub palette: Palette,
}

impl Default for TranscoderConfig {
    fn default() -> Self {
        Self {
            dialect: Dialect::default(),
            title: "cvtvt".to_string(),
            font_family: "Courier New".to_string(),
            font_size: 10,
            palette: Palette::console(),
        }
    }
}

impl TranscoderConfig {
    /// Create a new configuration for the given dialect
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            ..Default::default()
        }
    }

    /// Set the output dialect
    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    /// Set the document title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the font family
    pub fn with_font_family(mut self, font_family: impl Into<String>) -> Self {
        self.font_family = font_family.into();
        self
    }

    /// Set the font size in points
    pub fn with_font_size(mut self, font_size: u16) -> Self {
        self.font_size = font_size;
        self
    }

    /// Set the color palette
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{Color, Rgb};

    #[test]
    fn test_config_defaults() {
        let config = TranscoderConfig::default();

        assert_eq!(config.dialect, Dialect::Html5);
        assert_eq!(config.title, "cvtvt");
        assert_eq!(config.font_family, "Courier New");
        assert_eq!(config.font_size, 10);
        assert_eq!(config.palette, Palette::console());
    }

    #[test]
    fn test_config_builder() {
        let palette = Palette::console().with_color(Color::Red, Rgb::new(0xcd, 0x31, 0x31));
        let config = TranscoderConfig::new(Dialect::Rtf)
            .with_title("build log")
            .with_font_family("Consolas")
            .with_font_size(12)
            .with_palette(palette.clone());

        assert_eq!(config.dialect, Dialect::Rtf);
        assert_eq!(config.title, "build log");
        assert_eq!(config.font_family, "Consolas");
        assert_eq!(config.font_size, 12);
        assert_eq!(config.palette, palette);

        let config = config.with_dialect(Dialect::Html4);
        assert_eq!(config.dialect, Dialect::Html4);
    }

    #[test]
    fn test_dialect_display() {
        assert_eq!(Dialect::Html4.to_string(), "html4");
        assert_eq!(Dialect::Html5.to_string(), "html5");
        assert_eq!(Dialect::Rtf.to_string(), "rtf");
    }

    #[test]
    fn test_dialect_from_str() {
        assert_eq!("html4".parse::<Dialect>().unwrap(), Dialect::Html4);
        assert_eq!("HTML5".parse::<Dialect>().unwrap(), Dialect::Html5);
        assert_eq!("Rtf".parse::<Dialect>().unwrap(), Dialect::Rtf);
        assert!(matches!(
            "pdf".parse::<Dialect>(),
            Err(TranscodeError::UnknownDialect(name)) if name == "pdf"
        ));
        for dialect in [Dialect::Html4, Dialect::Html5, Dialect::Rtf] {
            assert_eq!(dialect.to_string().parse::<Dialect>().unwrap(), dialect);
        }
    }
}
