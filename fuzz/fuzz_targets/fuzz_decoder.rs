#![no_main]
use std::borrow::Cow;
use std::cell::RefCell;

use arbitrary::Arbitrary;
use libfuzzer_sys::{fuzz_mutator, fuzz_target, fuzzer_mutate};
use pctdecode::{DecodeContext, DecodeError, Decoder, DecoderOptions, LiteralEncoding};
use rand::rngs::SmallRng; // faster than StdRng
use rand::{Rng, SeedableRng};

thread_local! {
    // One SmallRng per thread, seeded once from the host OS
    static RNG: RefCell<SmallRng> =
        RefCell::new(SmallRng::from_os_rng());
}

static LABELS: &[&str] = &["utf-8", "windows-1252", "shift_jis", "gb18030", "utf-16le"];

static SNIPPETS: &[&[u8]] = &[
    b"%",
    b"+",
    b"%2B",
    b"%20",
    b"%E4%B8%AD",
    b"%C3",
    b"%FF",
    b"%zz",
    b"%8",
    "\u{4e2d}".as_bytes(),
    "\u{e9}".as_bytes(),
];

/// Helper: borrow the thread-local RNG and run a closure with it.
fn with_rng<F, R>(f: F) -> R
where
    F: FnOnce(&mut SmallRng) -> R,
{
    RNG.with(|cell| f(&mut cell.borrow_mut()))
}

/// Splices a random escape-heavy snippet into the input half of the time,
/// otherwise defers to libFuzzer's own mutations.
fn mutator(data: &mut [u8], size: usize, max_size: usize, seed: u32) -> usize {
    if size == 0 || seed % 2 == 0 {
        return fuzzer_mutate(data, size, max_size);
    }
    let snippet = with_rng(|rng| SNIPPETS[rng.random_range(0..SNIPPETS.len())]);
    if size + snippet.len() > max_size {
        return fuzzer_mutate(data, size, max_size);
    }
    let at = with_rng(|rng| rng.random_range(0..=size));
    data.copy_within(at..size, at + snippet.len());
    data[at..at + snippet.len()].copy_from_slice(snippet);
    size + snippet.len()
}

fuzz_mutator!(|data: &mut [u8], size: usize, max_size: usize, seed: u32| {
    mutator(data, size, max_size, seed)
});

#[derive(Debug, Arbitrary)]
struct Input {
    flags: u8,
    text: String,
}

fn decode(input: &Input) {
    let query = input.flags & 1 != 0;
    let label = LABELS[usize::from(input.flags >> 1) % LABELS.len()];
    let decoder = Decoder::new(DecoderOptions {
        literal_encoding: if input.flags & 0x10 != 0 {
            LiteralEncoding::Target
        } else {
            LiteralEncoding::default()
        },
        fallback_encoding: (input.flags & 0x20 != 0).then_some(pctdecode::DEFAULT_FALLBACK_ENCODING),
        ..Default::default()
    });
    let context = DecodeContext::from(query);
    let text = input.text.as_str();

    match decoder.decode(text, label, context) {
        Ok(decoded) => {
            let untouched = !text.contains('%') && !(query && text.contains('+'));
            if untouched {
                assert!(matches!(decoded.text, Cow::Borrowed(s) if s == text));
            }
            if decoder.options().fallback_encoding.is_none() {
                assert!(decoded.advisory.is_none());
            }
        }
        Err(DecodeError::EmptyEncodingName | DecodeError::UnsupportedEncodingName(_)) => {
            panic!("label {label:?} must resolve");
        }
        Err(DecodeError::InvalidEncodedText { .. }) => {
            assert!(decoder.options().fallback_encoding.is_none());
        }
        Err(DecodeError::MalformedEscape { offset }) => {
            assert_eq!(text.as_bytes()[offset], b'%');
        }
        Err(DecodeError::UnencodableCharacter { .. }) => {}
    }
}

fuzz_target!(|input: Input| decode(&input));
