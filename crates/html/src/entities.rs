use memchr::memchr;

const NAMED: &[(&[u8], char)] = &[
    (b"&amp;", '&'),
    (b"&lt;", '<'),
    (b"&gt;", '>'),
    (b"&quot;", '"'),
    (b"&apos;", '\''),
    (b"&nbsp;", '\u{00A0}'),
];

const MAX_HEX_DIGITS: usize = 6; // 0x10FFFF
const MAX_DEC_DIGITS: usize = 7; // 1114111

/// Decode the small set of entities documentation pages actually use.
///
/// Named: `&amp;`, `&lt;`, `&gt;`, `&quot;`, `&apos;`, `&nbsp;`. Numeric references decode only
/// when semicolon-terminated and naming a valid scalar value. Everything else is copied through
/// unchanged, so decoding is idempotent on its own output for non-entity text.
pub(crate) fn decode_entities(s: &str) -> String {
    let bytes = s.as_bytes();
    let Some(first) = memchr(b'&', bytes) else {
        return s.to_string();
    };

    let mut out = String::with_capacity(s.len());
    out.push_str(&s[..first]);
    let mut i = first;

    while i < bytes.len() {
        let Some(rel) = memchr(b'&', &bytes[i..]) else {
            out.push_str(&s[i..]);
            break;
        };
        out.push_str(&s[i..i + rel]);
        i += rel;

        if let Some((ch, len)) = decode_at(s, i) {
            out.push(ch);
            i += len;
        } else {
            out.push('&');
            i += 1;
        }
    }

    out
}

/// Try to decode one entity starting at `start` (which holds `&`).
/// Returns the decoded char and the number of input bytes consumed.
fn decode_at(s: &str, start: usize) -> Option<(char, usize)> {
    let bytes = &s.as_bytes()[start..];
    for (name, ch) in NAMED {
        if bytes.starts_with(name) {
            return Some((*ch, name.len()));
        }
    }

    let (digits_start, radix, max_digits) = match bytes {
        [b'&', b'#', b'x' | b'X', ..] => (3, 16, MAX_HEX_DIGITS),
        [b'&', b'#', ..] => (2, 10, MAX_DEC_DIGITS),
        _ => return None,
    };

    let digits = &bytes[digits_start..];
    let len = digits
        .iter()
        .take(max_digits + 1)
        .position(|b| *b == b';')?;
    if len == 0 || len > max_digits {
        return None;
    }
    let run = &digits[..len];
    let valid = if radix == 16 {
        run.iter().all(u8::is_ascii_hexdigit)
    } else {
        run.iter().all(u8::is_ascii_digit)
    };
    if !valid {
        return None;
    }
    // `run` is ASCII, so slicing the str at these offsets stays on char boundaries.
    let text = &s[start + digits_start..start + digits_start + len];
    let ch = u32::from_str_radix(text, radix).ok().and_then(char::from_u32)?;
    Some((ch, digits_start + len + 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_named_entities() {
        assert_eq!(decode_entities("a &amp; b"), "a & b");
        assert_eq!(decode_entities("&lt;pre&gt;"), "<pre>");
        assert_eq!(decode_entities("&quot;x&quot; &apos;y&apos;"), "\"x\" 'y'");
        assert_eq!(decode_entities("a&nbsp;b"), "a\u{00A0}b");
    }

    #[test]
    fn decodes_numeric_entities() {
        assert_eq!(decode_entities("&#215;"), "×");
        assert_eq!(decode_entities("&#xD7;"), "×");
        assert_eq!(decode_entities("&#X1F4A9;"), "\u{1F4A9}");
        assert_eq!(decode_entities("&#1114111;"), "\u{10FFFF}");
    }

    #[test]
    fn preserves_utf8_text() {
        assert_eq!(decode_entities("系统 &amp; 指南"), "系统 & 指南");
        assert_eq!(decode_entities("no entities here"), "no entities here");
    }

    #[test]
    fn leaves_malformed_entities_unchanged() {
        for s in [
            "&",
            "&&",
            "&;",
            "&#;",
            "&#x;",
            "&amp",
            "&unknown;",
            "&#xZZ;",
            "&#123",
            "&#-1;",
            "&#xD800;",
            "&#x110000;",
            "&#11141111;",
        ] {
            assert_eq!(decode_entities(s), s, "input {s:?}");
        }
    }

    #[test]
    fn malformed_entity_does_not_swallow_next_one() {
        assert_eq!(decode_entities("&#xZZ;&amp;"), "&#xZZ;&");
    }
}
