#![expect(missing_docs)]

use core::fmt::Write;

use pctdecode::{DEFAULT_FALLBACK_ENCODING, DecodeContext, Decoder, DecoderOptions};

fn render(cases: &[(&str, &str, bool)]) -> String {
    let mut out = String::new();
    for (input, encoding, is_query) in cases {
        match pctdecode::decode(input, encoding, *is_query) {
            Ok(text) => writeln!(out, "{input:?} {encoding} query={is_query} => Ok({text:?})"),
            Err(err) => writeln!(out, "{input:?} {encoding} query={is_query} => Err({err})"),
        }
        .unwrap();
    }
    out
}

fn render_with_fallback(inputs: &[&str]) -> String {
    let decoder = Decoder::new(DecoderOptions {
        fallback_encoding: Some(DEFAULT_FALLBACK_ENCODING),
        ..Default::default()
    });
    let mut out = String::new();
    for input in inputs {
        let decoded = decoder
            .decode(input, "utf-8", DecodeContext::Query)
            .expect("fallback decode");
        match decoded.advisory {
            Some(advisory) => writeln!(out, "{input:?} => {:?} ({advisory})", decoded.text),
            None => writeln!(out, "{input:?} => {:?}", decoded.text),
        }
        .unwrap();
    }
    out
}

#[test]
fn snapshot_decode_outcomes() {
    let cases = [
        ("%48%65%6C%6C%6F", "UTF-8", false),
        ("a+b", "UTF-8", true),
        ("a+b", "UTF-8", false),
        ("%E4%B8%AD", "UTF-8", false),
        ("caf%C3%A9", "UTF-8", false),
        ("abc%2", "UTF-8", false),
        ("%zz", "UTF-8", false),
        ("x", "no-such-encoding", false),
        ("x", "", false),
    ];

    insta::assert_snapshot!(render(&cases), @r#"
    "%48%65%6C%6C%6F" UTF-8 query=false => Ok("Hello")
    "a+b" UTF-8 query=true => Ok("a b")
    "a+b" UTF-8 query=false => Ok("a+b")
    "%E4%B8%AD" UTF-8 query=false => Ok("中")
    "caf%C3%A9" UTF-8 query=false => Ok("café")
    "abc%2" UTF-8 query=false => Err(malformed percent escape at byte offset 3)
    "%zz" UTF-8 query=false => Err(malformed percent escape at byte offset 0)
    "x" no-such-encoding query=false => Err(unsupported encoding name "no-such-encoding")
    "x"  query=false => Err(encoding name must not be empty)
    "#);
}

#[test]
fn snapshot_fallback_advisories() {
    let inputs = ["caf%C3%A9", "caf%E9", "na%EFve+caf%E9", "%81%8D"];

    insta::assert_snapshot!(render_with_fallback(&inputs), @r#"
    "caf%C3%A9" => "café"
    "caf%E9" => "café" (bytes were not valid UTF-8, decoded as windows-1252)
    "na%EFve+caf%E9" => "naïve café" (bytes were not valid UTF-8, decoded as windows-1252)
    "%81%8D" => "\u{81}\u{8d}" (bytes were not valid UTF-8, decoded as windows-1252)
    "#);
}
