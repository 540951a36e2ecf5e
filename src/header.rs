//! Header-to-identifier resolution
//!
//! Raw header cells can contain anything; rows expose them as map keys, so
//! each one is reduced to a unique identifier-safe name. Resolution never
//! fails: a cell that cannot produce a usable name gets a positional
//! `Column<N>` placeholder instead.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{CsvError, Result};

/// Identifier shape required of a resolved header name
static IDENTIFIER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[_a-zA-Z][_0-9a-zA-Z]*$").unwrap());

/// Default extraction pattern: strips one layer of surrounding quotes
pub const DEFAULT_HEADER_PATTERN: &str = r#"^["'](?P<header>.*)["']$"#;

/// User-supplied header name resolver
///
/// Called with the raw header text and the derived name (`None` when
/// derivation produced nothing usable). A non-empty return value overrides
/// the derived name; `None` or an empty string falls back to it.
pub type HeaderNameResolver = dyn Fn(&str, Option<&str>) -> Option<String>;

/// Compile a custom header-extraction pattern, requiring a `header` group
///
/// The named group's presence is checked against the compiled pattern's
/// metadata, so invalid configuration surfaces here rather than at parse
/// time.
pub(crate) fn compile_header_pattern(pattern: &str) -> Result<Regex> {
    let regex =
        Regex::new(pattern).map_err(|_| CsvError::InvalidHeaderPattern(pattern.to_string()))?;
    let has_header_group = regex.capture_names().flatten().any(|name| name == "header");
    if !has_header_group {
        return Err(CsvError::InvalidHeaderPattern(pattern.to_string()));
    }
    Ok(regex)
}

/// Positional fallback name for an unusable or duplicated header
pub(crate) fn placeholder_name(index: usize) -> String {
    format!("Column{}", index)
}

/// Uppercase the first letter of the string and of every whitespace-started
/// word, leaving all other characters unchanged
fn title_case(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    let mut at_word_start = true;
    for ch in input.chars() {
        if ch.is_whitespace() {
            at_word_start = true;
            output.push(ch);
        } else if at_word_start {
            output.extend(ch.to_uppercase());
            at_word_start = false;
        } else {
            output.push(ch);
        }
    }
    output
}

/// Derive an identifier from raw header text
///
/// Applies the extraction pattern, title-cases, strips whitespace and
/// validates the identifier shape. Returns `None` when the result is not a
/// usable name.
fn derive_name(raw: &str, pattern: &Regex) -> Option<String> {
    let extracted = pattern
        .captures(raw)
        .and_then(|captures| captures.name("header"))
        .map(|group| group.as_str())
        .unwrap_or(raw);
    let name: String = title_case(extracted)
        .chars()
        .filter(|ch| !ch.is_whitespace())
        .collect();
    IDENTIFIER_PATTERN.is_match(&name).then_some(name)
}

/// Resolve raw header cells into unique identifier names, preserving order
///
/// Duplicates are compared case-sensitively; the second occurrence gets the
/// positional placeholder.
pub fn resolve_headers(
    raw_headers: &[String],
    pattern: &Regex,
    resolver: Option<&HeaderNameResolver>,
) -> Vec<String> {
    let mut used: HashSet<String> = HashSet::with_capacity(raw_headers.len());
    let mut names = Vec::with_capacity(raw_headers.len());
    for (index, raw) in raw_headers.iter().enumerate() {
        let derived = derive_name(raw, pattern);
        let resolved = match resolver {
            Some(resolve) => resolve(raw, derived.as_deref())
                .filter(|name| !name.is_empty())
                .or(derived),
            None => derived,
        };
        let name = match resolved {
            Some(name) if !used.contains(&name) => name,
            _ => placeholder_name(index),
        };
        used.insert(name.clone());
        names.push(name);
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_pattern() -> Regex {
        compile_header_pattern(DEFAULT_HEADER_PATTERN).unwrap()
    }

    fn resolve(raw: &[&str]) -> Vec<String> {
        let raw: Vec<String> = raw.iter().map(|s| s.to_string()).collect();
        resolve_headers(&raw, &default_pattern(), None)
    }

    #[test]
    fn test_simple_headers_are_title_cased() {
        assert_eq!(resolve(&["head1", "head2", "head3"]), ["Head1", "Head2", "Head3"]);
    }

    #[test]
    fn test_whitespace_is_removed_after_title_casing() {
        assert_eq!(resolve(&["head1 head", "head2"]), ["Head1Head", "Head2"]);
    }

    #[test]
    fn test_surrounding_quotes_are_stripped() {
        assert_eq!(resolve(&["\"head1\"", "'head2'"]), ["Head1", "Head2"]);
    }

    #[test]
    fn test_unusable_headers_get_placeholder_names() {
        // Leading digit and non-ASCII letters both fail identifier rules.
        assert_eq!(resolve(&["1header", "head3", "два"]), ["Column0", "Head3", "Column2"]);
    }

    #[test]
    fn test_duplicate_headers_get_placeholder_names() {
        assert_eq!(resolve(&["head", "head", "HEAD"]), ["Head", "Column1", "HEAD"]);
    }

    #[test]
    fn test_duplicates_are_compared_case_sensitively() {
        assert_eq!(resolve(&["name", "Name"]), ["Name", "Column1"]);
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let once: String = title_case("wAr aND PeAce")
            .chars()
            .filter(|ch| !ch.is_whitespace())
            .collect();
        let twice: String = title_case(&once)
            .chars()
            .filter(|ch| !ch.is_whitespace())
            .collect();
        assert_eq!(once, twice);
        assert_eq!(once, "WArANDPeAce");
    }

    #[test]
    fn test_resolver_overrides_derived_name() {
        let raw = vec!["Header1".to_string(), "Header2".to_string()];
        let counter = std::cell::Cell::new(0);
        let resolver = move |_: &str, _: Option<&str>| {
            counter.set(counter.get() + 1);
            Some(format!("H{}", counter.get()))
        };
        // The callback takes precedence over derivation for every field.
        let names = resolve_headers(&raw, &default_pattern(), Some(&resolver));
        assert_eq!(names, ["H1", "H2"]);
    }

    #[test]
    fn test_resolver_none_falls_back_to_derived_name() {
        let raw = vec!["Header1".to_string(), "Header2".to_string()];
        let resolver = |raw: &str, _: Option<&str>| {
            if raw == "Header1" {
                None
            } else {
                Some("H2".to_string())
            }
        };
        let names = resolve_headers(&raw, &default_pattern(), Some(&resolver));
        assert_eq!(names, ["Header1", "H2"]);
    }

    #[test]
    fn test_unusable_header_passed_as_none_to_resolver() {
        let raw = vec!["Тест".to_string()];
        let resolver = |_: &str, suggested: Option<&str>| {
            assert!(suggested.is_none());
            None
        };
        let names = resolve_headers(&raw, &default_pattern(), Some(&resolver));
        assert_eq!(names, ["Column0"]);
    }

    #[test]
    fn test_empty_resolver_return_falls_back() {
        let raw = vec!["head".to_string()];
        let resolver = |_: &str, _: Option<&str>| Some(String::new());
        let names = resolve_headers(&raw, &default_pattern(), Some(&resolver));
        assert_eq!(names, ["Head"]);
    }

    #[test]
    fn test_pattern_without_header_group_is_rejected() {
        let err = compile_header_pattern(r"^(.*)$").unwrap_err();
        match err {
            CsvError::InvalidHeaderPattern(pattern) => assert_eq!(pattern, r"^(.*)$"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_invalid_pattern_syntax_is_rejected() {
        assert!(compile_header_pattern(r"((?P<header>").is_err());
    }

    #[test]
    fn test_custom_pattern_extracts_header_group() {
        let pattern = compile_header_pattern(r"^col_(?P<header>\w+)$").unwrap();
        let raw = vec!["col_name".to_string(), "other".to_string()];
        let names = resolve_headers(&raw, &pattern, None);
        assert_eq!(names, ["Name", "Other"]);
    }
}
