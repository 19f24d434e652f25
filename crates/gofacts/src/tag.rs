//! Struct tag parsing.
//!
//! Struct tags follow the `key:"value" key2:"value2"` convention used by
//! `reflect.StructTag`. Parsing is fail-soft: the first malformed pair stops
//! the scan and whatever was collected so far is returned.

use std::collections::BTreeMap;

/// Parse raw tag content (delimiters already stripped) into key/value pairs.
///
/// Escapes inside values are kept verbatim (`\"` stays two characters).
/// A repeated key keeps its last value.
///
/// ```
/// use gofacts::parse_struct_tag;
///
/// let tags = parse_struct_tag(r#"db:"user_id" json:"userId,omitempty""#);
/// assert_eq!(tags["db"], "user_id");
/// assert_eq!(tags["json"], "userId,omitempty");
/// ```
pub fn parse_struct_tag(tag: &str) -> BTreeMap<String, String> {
    let mut result = BTreeMap::new();
    let bytes = tag.as_bytes();
    let mut pos = 0;

    while pos < bytes.len() {
        while pos < bytes.len() && bytes[pos] == b' ' {
            pos += 1;
        }
        if pos >= bytes.len() {
            break;
        }

        let key_start = pos;
        while pos < bytes.len() && !matches!(bytes[pos], b':' | b'"' | b' ') {
            pos += 1;
        }
        // Dangling key with nothing after it
        if pos >= bytes.len() {
            break;
        }
        let key = &tag[key_start..pos];

        if bytes[pos] != b':' {
            break;
        }
        pos += 1;

        if pos >= bytes.len() || bytes[pos] != b'"' {
            break;
        }
        pos += 1;

        let value_start = pos;
        while pos < bytes.len() && bytes[pos] != b'"' {
            if bytes[pos] == b'\\' && pos + 1 < bytes.len() {
                pos += 1;
            }
            pos += 1;
        }
        // Unterminated value
        if pos >= bytes.len() {
            break;
        }

        result.insert(key.to_string(), tag[value_start..pos].to_string());
        pos += 1;
    }

    result
}

/// Strip the delimiters from a tag literal as written in source.
///
/// Raw literals lose their backticks. Interpreted literals lose their quotes
/// and have `\"` and `\\` unescaped so the content matches what the raw form
/// would have held.
pub fn unquote_tag_literal(literal: &str) -> String {
    if let Some(inner) = literal
        .strip_prefix('`')
        .and_then(|rest| rest.strip_suffix('`'))
    {
        return inner.to_string();
    }

    let Some(inner) = literal
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
    else {
        return literal.to_string();
    };

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some(next @ ('"' | '\\')) => out.push(next),
                Some(other) => {
                    out.push('\\');
                    out.push(other);
                }
                None => out.push('\\'),
            }
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(tags: &BTreeMap<String, String>) -> Vec<(&str, &str)> {
        tags.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect()
    }

    #[test]
    fn parses_multiple_keys() {
        let tags = parse_struct_tag(r#"db:"user_id" json:"userId,omitempty""#);
        assert_eq!(
            pairs(&tags),
            vec![("db", "user_id"), ("json", "userId,omitempty")]
        );
    }

    #[test]
    fn skips_repeated_spaces() {
        let tags = parse_struct_tag(r#"   json:"name"    yaml:"n"  "#);
        assert_eq!(pairs(&tags), vec![("json", "name"), ("yaml", "n")]);
    }

    #[test]
    fn keeps_escapes_verbatim() {
        let tags = parse_struct_tag(r#"regex:"a\"b\\" json:"x""#);
        assert_eq!(tags["regex"], r#"a\"b\\"#);
        assert_eq!(tags["json"], "x");
    }

    #[test]
    fn last_duplicate_wins() {
        let tags = parse_struct_tag(r#"json:"a" json:"b""#);
        assert_eq!(pairs(&tags), vec![("json", "b")]);
    }

    #[test]
    fn empty_value_is_kept() {
        let tags = parse_struct_tag(r#"json:"""#);
        assert_eq!(tags["json"], "");
    }

    #[test]
    fn stops_at_missing_colon() {
        let tags = parse_struct_tag(r#"json:"a" yaml "b" db:"c""#);
        assert_eq!(pairs(&tags), vec![("json", "a")]);
    }

    #[test]
    fn stops_at_missing_opening_quote() {
        let tags = parse_struct_tag(r#"json:"a" db:c"#);
        assert_eq!(pairs(&tags), vec![("json", "a")]);
    }

    #[test]
    fn stops_at_unterminated_value() {
        let tags = parse_struct_tag(r#"json:"a" db:"oops"#);
        assert_eq!(pairs(&tags), vec![("json", "a")]);
    }

    #[test]
    fn dangling_key_is_ignored() {
        let tags = parse_struct_tag(r#"json:"a" orphan"#);
        assert_eq!(pairs(&tags), vec![("json", "a")]);
        assert!(parse_struct_tag("").is_empty());
        assert!(parse_struct_tag("   ").is_empty());
    }

    #[test]
    fn reparsing_serialized_tags_is_stable() {
        let original = parse_struct_tag(r#"yaml:"b,flow" json:"a,omitempty" db:"c""#);
        let serialized = original
            .iter()
            .map(|(k, v)| format!("{}:\"{}\"", k, v))
            .collect::<Vec<_>>()
            .join(" ");
        assert_eq!(parse_struct_tag(&serialized), original);
    }

    #[test]
    fn unquotes_raw_literal() {
        assert_eq!(unquote_tag_literal(r#"`json:"id"`"#), r#"json:"id""#);
    }

    #[test]
    fn unquotes_interpreted_literal() {
        assert_eq!(unquote_tag_literal(r#""json:\"id\"""#), r#"json:"id""#);
        assert_eq!(unquote_tag_literal(r#""a\\b""#), r#"a\b"#);
        assert_eq!(unquote_tag_literal(r#""a\tb""#), r#"a\tb"#);
    }
}
