//! Textual payload scanner
//!
//! Finds keys by their quoted name followed by a colon, without building a
//! document tree. Every string is skipped as a unit, honoring backslash
//! escapes, so quotes and brackets inside values never end a lookup early.
//!
//! Only the last key of each field path is searched for, anywhere inside
//! the entry object. All index arithmetic on the payload lives here.

use alloc::string::String;
use alloc::vec::Vec;

use super::{push_candidate, EntryFields, ExtractError, Field};
use crate::config::FieldMap;
use crate::item::Candidate;

/// Extract candidates by scanning for the configured keys
pub fn extract(
    body: &str,
    fields: &FieldMap,
    requested: u32,
) -> Result<Vec<Candidate>, ExtractError> {
    let bytes = body.as_bytes();
    let key = last_key(&fields.collection).ok_or(ExtractError::MissingCollection)?;

    // First occurrence of the key that holds an array
    let mut from = 0;
    let open = loop {
        let value = find_key(body, key, from)?.ok_or(ExtractError::MissingCollection)?;
        let open = skip_ws(bytes, value);
        if bytes.get(open) == Some(&b'[') {
            break open;
        }
        from = open;
    };

    let mut candidates = Vec::new();
    let mut i = open + 1;
    loop {
        i = skip_ws(bytes, i);
        match bytes.get(i) {
            None => return Err(ExtractError::Malformed),
            Some(b']') => break,
            Some(b',') => i += 1,
            Some(b'{') => {
                let end = value_end(bytes, i)?;
                let entry = scan_entry(&body[i..end], fields);
                push_candidate(&mut candidates, entry, requested)?;
                i = end;
            }
            // Entries that are not objects carry no fields
            Some(_) => i = value_end(bytes, i)?,
        }
    }

    Ok(candidates)
}

fn scan_entry<'a>(entry: &'a str, fields: &FieldMap) -> EntryFields<'a> {
    EntryFields {
        text: field(entry, &fields.text),
        narrator: field(entry, &fields.narrator),
        book: field(entry, &fields.book),
        chapter: field(entry, &fields.chapter),
        number: field(entry, &fields.number),
    }
}

fn last_key(path: &[String]) -> Option<&str> {
    path.last().map(String::as_str)
}

/// Look up one field inside an entry object
fn field<'a>(entry: &'a str, path: &[String]) -> Field<'a> {
    let Some(key) = last_key(path) else {
        return Field::Absent;
    };

    match find_key(entry, key, 0) {
        Ok(Some(pos)) => value_at(entry, pos),
        Ok(None) => Field::Absent,
        Err(_) => Field::Malformed,
    }
}

/// Classify the value starting at (or after whitespace from) `pos`
fn value_at(src: &str, pos: usize) -> Field<'_> {
    let bytes = src.as_bytes();
    let start = skip_ws(bytes, pos);

    match bytes.get(start) {
        Some(b'"') => match string_end(bytes, start) {
            Some(end) => Field::Found(&src[start + 1..end]),
            None => Field::Malformed,
        },
        Some(b'{') | Some(b'[') | None => Field::Malformed,
        Some(_) => match &src[start..scalar_end(bytes, start)] {
            "" => Field::Malformed,
            "null" => Field::Null,
            raw => Field::Scalar(raw),
        },
    }
}

/// Position just past the colon of the first `"key":` at or after `from`
///
/// `from` must not point into the middle of a string. Returns `Ok(None)` if
/// the key never appears as an object key, and `Malformed` if a string runs
/// off the end of the input first.
fn find_key(src: &str, key: &str, from: usize) -> Result<Option<usize>, ExtractError> {
    let bytes = src.as_bytes();
    let mut i = from;

    while i < bytes.len() {
        if bytes[i] != b'"' {
            i += 1;
            continue;
        }

        let end = string_end(bytes, i).ok_or(ExtractError::Malformed)?;
        let colon = skip_ws(bytes, end + 1);
        if bytes.get(colon) == Some(&b':') && &src[i + 1..end] == key {
            return Ok(Some(colon + 1));
        }
        i = end + 1;
    }

    Ok(None)
}

/// Index of the quote closing the string opened at `open`
///
/// A backslash always consumes the byte after it, so `\"` never closes.
fn string_end(bytes: &[u8], open: usize) -> Option<usize> {
    let mut j = open + 1;
    while j < bytes.len() {
        match bytes[j] {
            b'\\' => j += 2,
            b'"' => return Some(j),
            _ => j += 1,
        }
    }
    None
}

/// Index one past the end of the value starting at `start`
fn value_end(bytes: &[u8], start: usize) -> Result<usize, ExtractError> {
    match bytes.get(start) {
        Some(b'"') => string_end(bytes, start)
            .map(|end| end + 1)
            .ok_or(ExtractError::Malformed),
        Some(b'{') | Some(b'[') => {
            let mut depth = 0usize;
            let mut j = start;
            while j < bytes.len() {
                match bytes[j] {
                    b'"' => j = string_end(bytes, j).ok_or(ExtractError::Malformed)?,
                    b'{' | b'[' => depth += 1,
                    b'}' | b']' => {
                        depth -= 1;
                        if depth == 0 {
                            return Ok(j + 1);
                        }
                    }
                    _ => {}
                }
                j += 1;
            }
            Err(ExtractError::Malformed)
        }
        _ => match scalar_end(bytes, start) {
            end if end == start => Err(ExtractError::Malformed),
            end => Ok(end),
        },
    }
}

fn scalar_end(bytes: &[u8], start: usize) -> usize {
    let mut j = start;
    while j < bytes.len() && !matches!(bytes[j], b',' | b']' | b'}') && !bytes[j].is_ascii_whitespace() {
        j += 1;
    }
    j
}

fn skip_ws(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() && bytes[i].is_ascii_whitespace() {
        i += 1;
    }
    i
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    fn path(key: &str) -> Vec<String> {
        alloc::vec![key.to_string()]
    }

    fn scan(body: &str) -> Result<Vec<Candidate>, ExtractError> {
        extract(body, &FieldMap::default(), 1)
    }

    #[test]
    fn test_field_shapes() {
        let entry = r#"{"a": "text", "b": 12, "c": null, "d": {"x": 1}, "e":true}"#;
        assert_eq!(field(entry, &path("a")), Field::Found("text"));
        assert_eq!(field(entry, &path("b")), Field::Scalar("12"));
        assert_eq!(field(entry, &path("c")), Field::Null);
        assert_eq!(field(entry, &path("d")), Field::Malformed);
        assert_eq!(field(entry, &path("e")), Field::Scalar("true"));
        assert_eq!(field(entry, &path("z")), Field::Absent);
    }

    #[test]
    fn test_escaped_quote_does_not_end_value() {
        let entry = r#"{"hadithEnglish": "He said \"stop\" then left", "next": 1}"#;
        assert_eq!(
            field(entry, &path("hadithEnglish")),
            Field::Found(r#"He said \"stop\" then left"#)
        );
    }

    #[test]
    fn test_escaped_backslash_before_quote_ends_value() {
        let entry = r#"{"a": "ends in \\", "b": "x"}"#;
        assert_eq!(field(entry, &path("a")), Field::Found(r#"ends in \\"#));
        assert_eq!(field(entry, &path("b")), Field::Found("x"));
    }

    #[test]
    fn test_key_text_inside_value_ignored() {
        let entry = r#"{"narrator": "\"hadithEnglish\": fake", "hadithEnglish": "real"}"#;
        assert_eq!(field(entry, &path("hadithEnglish")), Field::Found("real"));
    }

    #[test]
    fn test_value_equal_to_key_name_ignored() {
        let entry = r#"{"kind": "hadithNumber", "hadithNumber" : 9}"#;
        assert_eq!(field(entry, &path("hadithNumber")), Field::Scalar("9"));
    }

    #[test]
    fn test_brackets_inside_strings_do_not_split_entries() {
        let body = r#"{"data":[{"hadithEnglish":"a } b ] c {"},{"hadithEnglish":"second"}]}"#;
        let candidates = scan(body).unwrap();
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].text, "a } b ] c {");
        assert_eq!(candidates[1].text, "second");
    }

    #[test]
    fn test_unterminated_string_is_malformed() {
        assert_eq!(scan(r#"{"message":"oops"#), Err(ExtractError::Malformed));
    }

    #[test]
    fn test_trailing_backslash_is_malformed() {
        assert_eq!(scan(r#"{"data":[{"hadithEnglish":"abc\"#), Err(ExtractError::Malformed));
    }

    #[test]
    fn test_unclosed_array_is_malformed() {
        assert_eq!(scan(r#"{"data":[{"hadithEnglish":"a"}"#), Err(ExtractError::Malformed));
    }

    #[test]
    fn test_unclosed_entry_is_malformed() {
        assert_eq!(scan(r#"{"data":[{"hadithEnglish":"a""#), Err(ExtractError::Malformed));
    }

    #[test]
    fn test_stray_closing_brace_is_malformed() {
        assert_eq!(scan(r#"{"data":[}"#), Err(ExtractError::Malformed));
    }

    #[test]
    fn test_missing_collection_shapes() {
        for body in ["", "<html>502 Bad Gateway</html>", r#"{"data": 5}"#, r#"{"data"}"#] {
            assert_eq!(scan(body), Err(ExtractError::MissingCollection), "{body}");
        }
    }

    #[test]
    fn test_non_array_key_of_same_name_skipped() {
        let body = r#"{"meta":{"data":1},"note":{"data":"x"},"hadiths":{"data":[{"hadithEnglish":"found"}]}}"#;
        let candidates = scan(body).unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].text, "found");
    }

    #[test]
    fn test_scalar_entries_skipped() {
        let body = r#"{"data":[1, "two", null, [3], {"hadithEnglish":"kept"}]}"#;
        let candidates = scan(body).unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].text, "kept");
    }

    #[test]
    fn test_tolerates_invalid_json_around_fields() {
        // Trailing commas and a missing closing brace on the root
        let body = r#"{"hadiths": {"data": [{"hadithEnglish": "loose", "book": {"bookName": "B",},},]"#;
        let candidates = scan(body).unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].text, "loose");
        assert_eq!(candidates[0].book, "B");
    }

    #[test]
    fn test_shared_fixture() {
        let candidates = scan(super::super::fixtures::PAYLOAD).unwrap();
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[1].identifier, 2);
    }
}
