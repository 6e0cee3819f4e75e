//! Sanitizer for API text fields
//!
//! Three rules, applied in order:
//!
//! 1. Un-escape: `\"`, `\n`, `\r`, `\t`, `\uXXXX` (with surrogate pairs).
//!    Every other backslash is dropped. Escaped honorific code points are
//!    kept in their canonical `\uxxxx` spelling so rule 2 can see them.
//! 2. Replace known honorific encodings with [`HONORIFIC_GLOSS`].
//! 3. Keep only printable ASCII (32..=126).
//!
//! No rule ever grows the text, so the output is never longer than the
//! input, and the output contains nothing any rule would rewrite again.

use alloc::collections::TryReserveError;
use alloc::string::String;

/// ASCII gloss used in place of the honorific ligature
pub const HONORIFIC_GLOSS: &str = "(PBUH)";

/// Lowest byte kept by the charset filter (space)
pub const BASIC_TEXT_MIN: u8 = 32;

/// Highest byte kept by the charset filter (tilde)
pub const BASIC_TEXT_MAX: u8 = 126;

/// One known honorific and the encodings it shows up as
struct Honorific {
    /// Unicode code point of the ligature
    code_point: u32,
    /// Canonical escaped spelling produced by rule 1
    escaped: &'static str,
    /// UTF-8 bytes of the ligature read back as Latin-1
    mojibake: &'static str,
    /// ASCII replacement
    gloss: &'static str,
}

/// Every pattern here must be at least as long (in bytes) as its gloss.
const HONORIFICS: &[Honorific] = &[Honorific {
    // U+FDFA ARABIC LIGATURE SALLALLAHOU ALAYHE WASALLAM
    code_point: 0xFDFA,
    escaped: "\\ufdfa",
    mojibake: "\u{ef}\u{b7}\u{ba}",
    gloss: HONORIFIC_GLOSS,
}];

/// Sanitize a raw (possibly still escaped) text field for display
pub fn sanitize(input: &str) -> String {
    let mut unescaped = String::with_capacity(input.len());
    unescape(input, &mut unescaped);

    let mut out = String::with_capacity(unescaped.len());
    replace_honorifics(&unescaped, &mut out);
    retain_basic(&mut out);
    out
}

/// Same as [`sanitize`], but reports allocation failure instead of aborting
///
/// Both working buffers are reserved up front; no rule allocates after that.
pub fn try_sanitize(input: &str) -> Result<String, TryReserveError> {
    let mut unescaped = String::new();
    unescaped.try_reserve(input.len())?;
    unescape(input, &mut unescaped);

    let mut out = String::new();
    out.try_reserve(unescaped.len())?;
    replace_honorifics(&unescaped, &mut out);
    retain_basic(&mut out);
    Ok(out)
}

/// Check whether a string only contains bytes the panel font can draw
pub fn is_basic_text(text: &str) -> bool {
    text.bytes().all(is_basic_byte)
}

fn is_basic_byte(b: u8) -> bool {
    (BASIC_TEXT_MIN..=BASIC_TEXT_MAX).contains(&b)
}

/// Rule 1: resolve escape sequences and drop escape markers
fn unescape(input: &str, out: &mut String) {
    let mut rest = input;
    while let Some(pos) = rest.find('\\') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];
        let consumed = push_escape(after, out);
        rest = &after[consumed..];
    }
    out.push_str(rest);
}

/// Emit the replacement for the escape following a backslash
///
/// Returns the number of bytes consumed after the backslash.
fn push_escape(after: &str, out: &mut String) -> usize {
    let Some(first) = after.chars().next() else {
        // Trailing backslash
        return 0;
    };

    match first {
        '"' => out.push('"'),
        'n' => out.push('\n'),
        't' => out.push(' '),
        // Carriage returns, backspace, form feed and doubled backslashes vanish
        'r' | 'b' | 'f' | '\\' => {}
        'u' => return push_unicode_escape(after, out),
        other => out.push(other),
    }
    first.len_utf8()
}

/// Handle `uXXXX` (and a following low surrogate escape, if any)
///
/// `after` starts with the `u`. Returns bytes consumed after the backslash.
fn push_unicode_escape(after: &str, out: &mut String) -> usize {
    let Some(unit) = parse_hex4(after.get(1..5)) else {
        // Not a real escape: drop the marker, keep the letter
        out.push('u');
        return 1;
    };

    if (0xD800..=0xDBFF).contains(&unit) {
        let low = after
            .get(5..7)
            .filter(|marker| *marker == "\\u")
            .and_then(|_| parse_hex4(after.get(7..11)))
            .filter(|low| (0xDC00..=0xDFFF).contains(low));

        if let Some(low) = low {
            let combined = 0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00);
            push_decoded(combined, out);
            return 11;
        }
        // Lone high surrogate
        return 5;
    }

    if let Some(honorific) = HONORIFICS.iter().find(|h| h.code_point == unit) {
        out.push_str(honorific.escaped);
    } else {
        push_decoded(unit, out);
    }
    5
}

/// Push a decoded code point, never reintroducing an escape marker
fn push_decoded(code_point: u32, out: &mut String) {
    match char::from_u32(code_point) {
        Some('\\') | None => {}
        Some(c) => out.push(c),
    }
}

fn parse_hex4(digits: Option<&str>) -> Option<u32> {
    let digits = digits?;
    if digits.len() != 4 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(digits, 16).ok()
}

/// Rule 2: swap honorific encodings for their gloss
fn replace_honorifics(text: &str, out: &mut String) {
    let mut rest = text;
    'scan: while !rest.is_empty() {
        for honorific in HONORIFICS {
            for pattern in [honorific.escaped, honorific.mojibake] {
                if let Some(tail) = rest.strip_prefix(pattern) {
                    out.push_str(honorific.gloss);
                    rest = tail;
                    continue 'scan;
                }
            }
        }

        let mut chars = rest.chars();
        if let Some(c) = chars.next() {
            out.push(c);
        }
        rest = chars.as_str();
    }
}

/// Rule 3: drop everything outside printable ASCII
fn retain_basic(text: &mut String) {
    text.retain(|c| c.is_ascii() && is_basic_byte(c as u8));
}
