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


//! End-to-end conversions through the public session API

use cvtvt_transcoder::{
    Color, Dialect, Palette, Phase, Rgb, TranscodeError, Transcoder, TranscoderConfig,
};
use std::io::{self, Write};

fn convert(dialect: Dialect, input: &[u8]) -> String {
    let document = Transcoder::new(TranscoderConfig::new(dialect))
        .convert(input)
        .unwrap();
    String::from_utf8(document.to_vec()).unwrap()
}

/// Everything between the opening container and the footer.
fn html_body(document: &str) -> &str {
    let start = document.find("<div").unwrap();
    let start = start + document[start..].find(">\n").unwrap() + 2;
    let end = document.rfind("</div>").unwrap();
    &document[start..end]
}

/// Everything after the RTF prologue, minus the closing brace.
fn rtf_body(document: &str) -> &str {
    let start = document.find("\\fs20 ").unwrap() + "\\fs20 ".len();
    let end = document.rfind("}\n").unwrap();
    &document[start..end]
}

#[test]
fn test_empty_documents() {
    for dialect in [Dialect::Html4, Dialect::Html5, Dialect::Rtf] {
        let mut transcoder = Transcoder::new(TranscoderConfig::new(dialect));
        let header = transcoder.begin_document().unwrap();
        let footer = transcoder.end_document().unwrap();
        assert!(!header.is_empty(), "{dialect} header");
        assert!(!footer.is_empty(), "{dialect} footer");
        assert_eq!(transcoder.phase(), Phase::Finished);

        let document = [&header[..], &footer[..]].concat();
        let document = String::from_utf8(document).unwrap();
        match dialect {
            Dialect::Rtf => {
                assert!(document.starts_with("{\\rtf1"));
                assert_eq!(document.matches('{').count(), document.matches('}').count());
            }
            _ => {
                assert!(document.to_lowercase().starts_with("<!doctype html"));
                assert!(document.ends_with("</html>\n"));
                assert_eq!(document.matches("<div").count(), document.matches("</div>").count());
                assert!(html_body(&document).is_empty());
            }
        }
    }
}

#[test]
fn test_html4_example() {
    let document = convert(Dialect::Html4, b"plain \x1b[32mgreen\x1b[0m plain");
    assert_eq!(
        html_body(&document),
        "plain <span style=\"color:#008000\">green</span>&nbsp;plain"
    );
}

#[test]
fn test_spacing_survives_escapes() {
    let html = convert(Dialect::Html5, b"a \x1b[32m b\n\x1b[31m  indented");
    assert_eq!(
        html_body(&html),
        "a <span style=\"color:#008000\">&nbsp;b<br />\n</span>\
         <span style=\"color:#800000\">&nbsp;&nbsp;indented</span>"
    );

    let html = convert(Dialect::Html4, b"\n\x1b[31m  x");
    assert_eq!(
        html_body(&html),
        "<br>\n<span style=\"color:#800000\">&nbsp;&nbsp;x</span>"
    );
}

#[test]
fn test_leading_spaces_are_kept() {
    let html = convert(Dialect::Html5, b"  two leading");
    assert_eq!(html_body(&html), "&nbsp;&nbsp;two leading");
}

#[test]
fn test_overlong_sequence_never_leaks() {
    let mut input = b"x\x1b[".to_vec();
    input.extend(std::iter::repeat_n(b'1', 300));
    input.extend_from_slice(b"my");

    let html = convert(Dialect::Html5, &input);
    assert_eq!(html_body(&html), "xy");
    let rtf = convert(Dialect::Rtf, &input);
    assert_eq!(rtf_body(&rtf), "xy");

    let mut input = b"a\x1b]0;".to_vec();
    input.extend(std::iter::repeat_n(b't', 400));
    input.extend_from_slice(b"\x07b");
    assert_eq!(html_body(&convert(Dialect::Html4, &input)), "ab");
}

#[test]
fn test_red_then_reset() {
    let input = b"\x1b[31mRED\x1b[0m after";

    let html = convert(Dialect::Html5, input);
    assert_eq!(
        html_body(&html),
        "<span style=\"color:#800000\">RED</span>&nbsp;after"
    );

    let rtf = convert(Dialect::Rtf, input);
    assert_eq!(rtf_body(&rtf), "\\cf2 RED\\cf0  after");
}

#[test]
fn test_bold_red_in_one_sequence() {
    let html = convert(Dialect::Html4, b"\x1b[1;31mBOLDRED\x1b[0m");
    assert_eq!(
        html_body(&html),
        "<span style=\"color:#ff0000\">BOLDRED</span>"
    );

    let rtf = convert(Dialect::Rtf, b"\x1b[1;31mBOLDRED");
    assert_eq!(rtf_body(&rtf), "\\cf10 BOLDRED");
}

#[test]
fn test_unterminated_escape_is_dropped() {
    for dialect in [Dialect::Html4, Dialect::Html5, Dialect::Rtf] {
        assert_eq!(
            convert(dialect, b"text\x1b[3"),
            convert(dialect, b"text"),
            "{dialect}"
        );
    }

    let mut transcoder = Transcoder::new(TranscoderConfig::default());
    transcoder.begin_document().unwrap();
    transcoder.process_escape(b"\x1b[3").unwrap();
    assert!(transcoder.state().is_default());
}

#[test]
fn test_non_sgr_sequences_are_swallowed() {
    let html = convert(
        Dialect::Html5,
        b"\x1b]0;window title\x07\x1b[2J\x1b[1;1Hready\x1b[?25h",
    );
    assert_eq!(html_body(&html), "ready");
}

#[test]
fn test_nested_underline() {
    let html = convert(Dialect::Html5, b"\x1b[31;4mA\x1b[24mB\x1b[0mC");
    assert_eq!(
        html_body(&html),
        "<span style=\"color:#800000\"><span style=\"text-decoration:underline\">A</span>B</span>C"
    );

    let html = convert(Dialect::Html4, b"\x1b[4;44mA");
    assert_eq!(
        html_body(&html),
        "<span style=\"background-color:#000080\"><u>A</u></span>"
    );
}

#[test]
fn test_text_escaping() {
    let html = convert(Dialect::Html4, b"a < b && c > d\n  indented");
    assert_eq!(
        html_body(&html),
        "a &lt; b &amp;&amp; c &gt; d<br>\n&nbsp;&nbsp;indented"
    );

    let rtf = convert(Dialect::Rtf, b"if (x) { y \\ z }\n");
    assert_eq!(rtf_body(&rtf), "if (x) \\{ y \\\\ z \\}\\par\n");
}

#[test]
fn test_custom_palette_and_title() {
    let config = TranscoderConfig::new(Dialect::Html5)
        .with_title("<deploy>")
        .with_palette(Palette::console().with_color(Color::Green, Rgb::new(0x4e, 0x9a, 0x06)));
    let document = Transcoder::new(config).convert(b"\x1b[32mok").unwrap();
    let document = std::str::from_utf8(&document).unwrap();

    assert!(document.contains("<title>&lt;deploy&gt;</title>"));
    assert!(document.contains("<span style=\"color:#4e9a06\">ok</span>"));
}

#[test]
fn test_full_custom_palette_in_rtf() {
    let mut entries = [Rgb::new(0x11, 0x22, 0x33); 16];
    entries[Color::Cyan.index() as usize] = Rgb::new(0x2a, 0xa1, 0x98);
    let config = TranscoderConfig::new(Dialect::Rtf).with_palette(Palette::from_entries(entries));
    let document = Transcoder::new(config).convert(b"\x1b[36mcyan").unwrap();
    let document = std::str::from_utf8(&document).unwrap();

    assert_eq!(document.matches("\\red17\\green34\\blue51;").count(), 15);
    assert!(document.contains("\\red42\\green161\\blue152;"));
    assert_eq!(rtf_body(document), "\\cf7 cyan");
}

#[test]
fn test_independent_sessions_on_threads() {
    let handles: Vec<_> = [Dialect::Html4, Dialect::Html5, Dialect::Rtf]
        .into_iter()
        .map(|dialect| {
            std::thread::spawn(move || {
                let mut transcoder = Transcoder::new(TranscoderConfig::new(dialect));
                transcoder.begin_document().unwrap();
                transcoder.process_escape(b"\x1b[35m").unwrap();
                transcoder.process_text(b"thread").unwrap();
                (dialect, transcoder.state().foreground)
            })
        })
        .collect();

    for handle in handles {
        let (dialect, foreground) = handle.join().unwrap();
        assert_eq!(foreground, Some(Color::Purple), "{dialect}");
    }
}

struct FailingWriter;

impl Write for FailingWriter {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_transcode_reports_sink_errors() {
    let result = Transcoder::new(TranscoderConfig::default()).transcode(
        &b"hello"[..],
        FailingWriter,
        16,
    );
    match result {
        Err(TranscodeError::Io(error)) => assert_eq!(error.kind(), io::ErrorKind::BrokenPipe),
        other => panic!("expected an IO error, got {other:?}"),
    }
}

#[test]
fn test_transcode_streams_large_input() {
    let line = b"\x1b[1;32mPASS\x1b[0m test::case \xe2\x9c\x93\n";
    let input: Vec<u8> = line.iter().copied().cycle().take(line.len() * 500).collect();

    let expected = Transcoder::new(TranscoderConfig::new(Dialect::Rtf))
        .convert(&input)
        .unwrap();
    let mut output = Vec::new();
    let written = Transcoder::new(TranscoderConfig::new(Dialect::Rtf))
        .transcode(&input[..], &mut output, 1000)
        .unwrap();

    assert_eq!(written as usize, output.len());
    assert_eq!(output, &expected[..]);
    assert_eq!(
        std::str::from_utf8(&output).unwrap().matches("\\u10003?").count(),
        500
    );
}
