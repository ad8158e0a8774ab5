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


use clap::{Parser, ValueEnum};
use cvtvt_transcoder::{DEFAULT_CHUNK_SIZE, Dialect, TranscoderConfig};
use std::path::PathBuf;

/// Output document type
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputType {
    /// HTML 4.01 Transitional
    Html4,
    /// HTML5 with an embedded style sheet
    #[default]
    Html5,
    /// Rich Text Format
    Rtf,
}

impl From<OutputType> for Dialect {
    fn from(output_type: OutputType) -> Dialect {
        match output_type {
            OutputType::Html4 => Dialect::Html4,
            OutputType::Html5 => Dialect::Html5,
            OutputType::Rtf => Dialect::Rtf,
        }
    }
}

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "cvtvt")]
#[command(version)]
#[command(about = "Converts ANSI colored console output into HTML or RTF", long_about = None)]
pub struct CliArgs {
    /// Output document type
    #[arg(short = 't', long = "type", value_enum, default_value_t = OutputType::default())]
    pub output_type: OutputType,

    /// Document title
    #[arg(long, value_name = "TEXT")]
    pub title: Option<String>,

    /// Monospace font family
    #[arg(long, value_name = "NAME")]
    pub font: Option<String>,

    /// Font size in points
    #[arg(long, value_name = "PT", value_parser = clap::value_parser!(u16).range(1..))]
    pub font_size: Option<u16>,

    /// Input file, standard input when omitted
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// Output file, standard output when omitted
    #[arg(short, long, value_name = "OUTPUT")]
    pub output: Option<PathBuf>,

    /// Bytes read from the input per chunk
    #[arg(long, value_name = "BYTES", default_value_t = DEFAULT_CHUNK_SIZE,
          value_parser = parse_chunk_size)]
    pub chunk_size: usize,
}

fn parse_chunk_size(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) => Err("chunk size must be at least 1".to_string()),
        Ok(size) => Ok(size),
        Err(error) => Err(error.to_string()),
    }
}

impl CliArgs {
    /// Builds the transcoder configuration, keeping defaults for anything
    /// not given on the command line.
    pub fn to_config(&self) -> TranscoderConfig {
        let mut config = TranscoderConfig::new(self.output_type.into());
        if let Some(title) = &self.title {
            config = config.with_title(title.as_str());
        } else if let Some(input) = &self.input {
            config = config.with_title(input.display().to_string());
        }
        if let Some(font) = &self.font {
            config = config.with_font_family(font.as_str());
        }
        if let Some(font_size) = self.font_size {
            config = config.with_font_size(font_size);
        }
        config
    }
}
