//! Content addressing.
//!
//! The digest covers the JSON string literal of the content plus a newline,
//! with `<`, `>`, `&`, U+2028 and U+2029 escaped as `\uXXXX`. Existing stores
//! were keyed with that encoding, so it must not drift.

use sha2::{Digest, Sha256};

use crate::error::{MemoError, Result};

/// SHA-256 of the canonical content encoding, as lowercase hex.
pub fn content_hash(content: &str) -> Result<String> {
    let canonical = canonical_content(content)?;
    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    Ok(format!("{:x}", hasher.finalize()))
}

fn canonical_content(content: &str) -> Result<String> {
    let literal = serde_json::to_string(content).map_err(MemoError::Encode)?;
    let mut out = String::with_capacity(literal.len() + 1);
    for c in literal.chars() {
        match c {
            '<' => out.push_str("\\u003c"),
            '>' => out.push_str("\\u003e"),
            '&' => out.push_str("\\u0026"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            _ => out.push(c),
        }
    }
    out.push('\n');
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_digest() {
        assert_eq!(
            content_hash("Hello world\n").unwrap(),
            "30b2efc5b47dca50dd651d291e52b237f8fe59b98f8996ac234a6ca2a0d4af80"
        );
    }

    #[test]
    fn test_digest_shape() {
        let h = content_hash("").unwrap();
        assert_eq!(h.len(), 64);
        assert!(h.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_html_characters_are_escaped() {
        assert_eq!(
            canonical_content("a<b>&c").unwrap(),
            "\"a\\u003cb\\u003e\\u0026c\"\n"
        );
        assert_eq!(canonical_content("x\u{2028}").unwrap(), "\"x\\u2028\"\n");
    }

    #[test]
    fn test_different_content_differs() {
        assert_ne!(content_hash("a").unwrap(), content_hash("b").unwrap());
    }
}
