//! Small HTML tokenizer for the static pages this engine loads.
//!
//! Tag and attribute names are ASCII `[A-Za-z0-9:_-]` and are lowercased. `<script>` and `<style>`
//! bodies are raw text. There is no HTML5 error recovery beyond what documentation pages need.
use crate::entities::decode_entities;
use crate::types::Token;
use memchr::memchr;

const COMMENT_START: &str = "<!--";
const COMMENT_END: &str = "-->";

fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_' || b == b':'
}

pub(crate) fn is_void_element(name: &str) -> bool {
    matches!(
        name,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}

pub(crate) fn is_rawtext_element(name: &str) -> bool {
    name == "script" || name == "style"
}

/// Find `</name` followed by optional ASCII whitespace and `>`, case-insensitively.
/// Returns the byte range of the whole close tag.
fn find_rawtext_close(haystack: &str, name: &str) -> Option<(usize, usize)> {
    let bytes = haystack.as_bytes();
    let name = name.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        i += memchr(b'<', &bytes[i..])?;
        let tag_end = i + 2 + name.len();
        if bytes.get(i + 1) == Some(&b'/')
            && bytes
                .get(i + 2..tag_end)
                .is_some_and(|n| n.eq_ignore_ascii_case(name))
        {
            let mut k = tag_end;
            while k < bytes.len() && bytes[k].is_ascii_whitespace() {
                k += 1;
            }
            if bytes.get(k) == Some(&b'>') {
                return Some((i, k + 1));
            }
        }
        i += 1;
    }
    None
}

struct Cursor<'a> {
    input: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    fn skip_char(&mut self) {
        self.pos += self.input[self.pos..]
            .chars()
            .next()
            .map_or(1, char::len_utf8);
    }

    fn take_name(&mut self) -> &'a str {
        let start = self.pos;
        while self.peek().is_some_and(is_name_byte) {
            self.pos += 1;
        }
        &self.input[start..self.pos]
    }

    fn skip_past(&mut self, byte: u8) {
        match memchr(byte, &self.bytes[self.pos..]) {
            Some(rel) => self.pos += rel + 1,
            None => self.pos = self.bytes.len(),
        }
    }

    fn attribute_value(&mut self) -> String {
        self.skip_whitespace();
        match self.peek() {
            Some(quote @ (b'"' | b'\'')) => {
                self.pos += 1;
                let start = self.pos;
                let end = memchr(quote, &self.bytes[start..])
                    .map(|rel| start + rel)
                    .unwrap_or(self.bytes.len());
                self.pos = (end + 1).min(self.bytes.len());
                decode_entities(&self.input[start..end])
            }
            _ => {
                let start = self.pos;
                while let Some(b) = self.peek() {
                    if b.is_ascii_whitespace() || b == b'>' {
                        break;
                    }
                    if b == b'/' && self.bytes.get(self.pos + 1) == Some(&b'>') {
                        break;
                    }
                    self.pos += 1;
                }
                decode_entities(&self.input[start..self.pos])
            }
        }
    }

    /// Parse attributes up to and including the closing `>`.
    /// Returns the attributes and whether the tag was written self-closing.
    fn attributes(&mut self) -> (Vec<(String, Option<String>)>, bool) {
        let mut attributes = Vec::new();
        loop {
            self.skip_whitespace();
            match self.peek() {
                None => return (attributes, false),
                Some(b'>') => {
                    self.pos += 1;
                    return (attributes, false);
                }
                Some(b'/') => {
                    self.pos += 1;
                    if self.peek() == Some(b'>') {
                        self.pos += 1;
                        return (attributes, true);
                    }
                    continue;
                }
                Some(_) => {}
            }

            let name = self.take_name();
            if name.is_empty() {
                // Junk where a name should be; drop the whole character.
                self.skip_char();
                continue;
            }
            let name = name.to_ascii_lowercase();
            self.skip_whitespace();
            let value = if self.peek() == Some(b'=') {
                self.pos += 1;
                Some(self.attribute_value())
            } else {
                None
            };
            attributes.push((name, value));
        }
    }
}

pub fn tokenize(input: &str) -> Vec<Token> {
    let mut out = Vec::new();
    let mut cur = Cursor {
        input,
        bytes: input.as_bytes(),
        pos: 0,
    };

    while cur.pos < cur.bytes.len() {
        let rest = &input[cur.pos..];
        if !rest.starts_with('<') {
            let end = memchr(b'<', rest.as_bytes()).unwrap_or(rest.len());
            let text = decode_entities(&rest[..end]);
            if !text.is_empty() {
                out.push(Token::Text(text));
            }
            cur.pos += end;
            continue;
        }

        if let Some(body) = rest.strip_prefix(COMMENT_START) {
            match body.find(COMMENT_END) {
                Some(end) => {
                    out.push(Token::Comment(body[..end].to_string()));
                    cur.pos += COMMENT_START.len() + end + COMMENT_END.len();
                }
                None => {
                    out.push(Token::Comment(body.to_string()));
                    cur.pos = cur.bytes.len();
                }
            }
            continue;
        }

        if rest.len() >= 9 && rest.as_bytes()[..9].eq_ignore_ascii_case(b"<!doctype") {
            let Some(end) = rest.find('>') else {
                break;
            };
            out.push(Token::Doctype(rest[2..end].trim().to_string()));
            cur.pos += end + 1;
            continue;
        }

        if rest.as_bytes().get(1) == Some(&b'/') {
            cur.pos += 2;
            let name = cur.take_name().to_ascii_lowercase();
            cur.skip_past(b'>');
            if !name.is_empty() {
                out.push(Token::EndTag(name));
            }
            continue;
        }

        cur.pos += 1;
        let name = cur.take_name().to_ascii_lowercase();
        if name.is_empty() {
            // A lone `<` is text.
            out.push(Token::Text("<".to_string()));
            continue;
        }
        let (attributes, written_self_closing) = cur.attributes();
        let self_closing = written_self_closing || is_void_element(&name);
        let rawtext = !self_closing && is_rawtext_element(&name);

        out.push(Token::StartTag {
            name: name.clone(),
            attributes,
            self_closing,
        });

        if rawtext {
            let body = &input[cur.pos..];
            match find_rawtext_close(body, &name) {
                Some((start, end)) => {
                    if start > 0 {
                        out.push(Token::Text(body[..start].to_string()));
                    }
                    cur.pos += end;
                }
                None => {
                    // Unterminated raw text runs to the end of input.
                    if !body.is_empty() {
                        out.push(Token::Text(body.to_string()));
                    }
                    cur.pos = cur.bytes.len();
                }
            }
            out.push(Token::EndTag(name));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start(name: &str, attributes: &[(&str, Option<&str>)], self_closing: bool) -> Token {
        Token::StartTag {
            name: name.to_string(),
            attributes: attributes
                .iter()
                .map(|(k, v)| (k.to_string(), v.map(str::to_string)))
                .collect(),
            self_closing,
        }
    }

    #[test]
    fn tokenize_lowercases_names_and_keeps_utf8_text() {
        let tokens = tokenize("<P CLASS=intro>AIOT 系统</p>");
        assert_eq!(
            tokens,
            vec![
                start("p", &[("class", Some("intro"))], false),
                Token::Text("AIOT 系统".into()),
                Token::EndTag("p".into()),
            ]
        );
    }

    #[test]
    fn tokenize_reads_quoted_and_bare_attributes() {
        let tokens = tokenize(r##"<a href="#intro" data-x='a &amp; b' hidden>x</a>"##);
        assert_eq!(
            tokens[0],
            start(
                "a",
                &[
                    ("href", Some("#intro")),
                    ("data-x", Some("a & b")),
                    ("hidden", None)
                ],
                false
            )
        );
    }

    #[test]
    fn tokenize_drops_non_ascii_junk_inside_tags() {
        assert_eq!(tokenize("<a é=1>")[0], start("a", &[("1", None)], false));
        assert_eq!(tokenize("<aé b>")[0], start("a", &[("b", None)], false));
        assert_eq!(
            tokenize("<p “标题”>文本</p>"),
            vec![
                start("p", &[], false),
                Token::Text("文本".into()),
                Token::EndTag("p".into()),
            ]
        );
        assert_eq!(
            tokenize(r#"<a href="x"温>"#)[0],
            start("a", &[("href", Some("x"))], false)
        );
        assert_eq!(tokenize("<scripté></script>")[0], start("script", &[], false));
    }

    #[test]
    fn tokenize_marks_void_and_self_closing_tags() {
        let tokens = tokenize("<br><img src=a.png/><div/>");
        assert_eq!(
            tokens,
            vec![
                start("br", &[], true),
                start("img", &[("src", Some("a.png"))], true),
                start("div", &[], true),
            ]
        );
    }

    #[test]
    fn tokenize_keeps_script_body_raw() {
        let tokens = tokenize("<script>if (a < b && c) {}</ScRiPt >after");
        assert_eq!(
            tokens,
            vec![
                start("script", &[], false),
                Token::Text("if (a < b && c) {}".into()),
                Token::EndTag("script".into()),
                Token::Text("after".into()),
            ]
        );
    }

    #[test]
    fn tokenize_rawtext_ignores_near_match_close_tags() {
        let tokens = tokenize("<style>a{}</stylex>b{}</style>");
        assert_eq!(tokens[1], Token::Text("a{}</stylex>b{}".into()));
    }

    #[test]
    fn tokenize_closes_unterminated_rawtext_implicitly() {
        let tokens = tokenize("<script>let x = 1;");
        assert_eq!(
            tokens,
            vec![
                start("script", &[], false),
                Token::Text("let x = 1;".into()),
                Token::EndTag("script".into()),
            ]
        );
    }

    #[test]
    fn tokenize_reads_comments_and_doctype() {
        let tokens = tokenize("<!DOCTYPE html><!-- nav --><!-- open");
        assert_eq!(
            tokens,
            vec![
                Token::Doctype("DOCTYPE html".into()),
                Token::Comment(" nav ".into()),
                Token::Comment(" open".into()),
            ]
        );
    }

    #[test]
    fn tokenize_treats_stray_angle_bracket_as_text() {
        let tokens = tokenize("a < b");
        let text: String = tokens
            .iter()
            .map(|t| match t {
                Token::Text(s) => s.as_str(),
                _ => "",
            })
            .collect();
        assert_eq!(text, "a < b");
    }

    #[test]
    fn tokenize_handles_many_tags_linearly() {
        let input = "<a></a>".repeat(20_000);
        assert_eq!(tokenize(&input).len(), 40_000);
    }
}
