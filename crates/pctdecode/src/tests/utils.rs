use alloc::string::String;
use core::fmt::Write;

/// Appends `bytes` to `out` as `%XX` escapes. Alternates digit case so both
/// spellings get exercised.
pub(crate) fn push_escaped(out: &mut String, bytes: &[u8]) {
    for (i, b) in bytes.iter().enumerate() {
        if i % 2 == 0 {
            write!(out, "%{b:02X}").unwrap();
        } else {
            write!(out, "%{b:02x}").unwrap();
        }
    }
}

/// Escapes every byte of `bytes`.
pub(crate) fn escape_all(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 3);
    push_escaped(&mut out, bytes);
    out
}

/// Encodes `text` character by character, escaping the UTF-8 bytes of a
/// character when `mask` says so (cycling through `mask`) and always escaping
/// `%` and `+`. In query form, spaces become `+`.
pub(crate) fn encode_mixed(text: &str, mask: &[bool], query: bool) -> String {
    let mut out = String::with_capacity(text.len() * 3);
    let mut scratch = [0u8; 4];
    for (idx, ch) in text.chars().enumerate() {
        let forced = ch == '%' || ch == '+';
        let chosen = !mask.is_empty() && mask[idx % mask.len()];
        if query && ch == ' ' && !chosen {
            out.push('+');
        } else if forced || chosen {
            push_escaped(&mut out, ch.encode_utf8(&mut scratch).as_bytes());
        } else {
            out.push(ch);
        }
    }
    out
}

#[test]
fn encode_mixed_forces_reserved_characters() {
    assert_eq!(encode_mixed("a+b c%", &[], true), "a%2Bb+c%25");
    assert_eq!(encode_mixed("a+b c%", &[], false), "a%2Bb c%25");
    assert_eq!(encode_mixed("\u{e9}", &[true], false), "%C3%a9");
}
