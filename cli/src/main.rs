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


//! `cvtvt` converts text containing VT100/ANSI color escapes into an HTML or
//! RTF document.

mod args;

use anyhow::Context;
use args::CliArgs;
use clap::Parser;
use cvtvt_transcoder::Transcoder;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args = CliArgs::parse();
    let config = args.to_config();
    info!(dialect = %config.dialect, input = ?args.input, output = ?args.output, "converting");

    let reader: Box<dyn Read> = match &args.input {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("Failed to open {}", path.display()))?,
        )),
        None => Box::new(io::stdin().lock()),
    };
    let writer: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    let written = Transcoder::new(config)
        .transcode(reader, writer, args.chunk_size)
        .context("Failed to convert input")?;
    info!(written, "done");
    Ok(())
}
