use crate::document::Document;
use crate::tokenizer::tokenize;
use crate::types::{ElementData, Id, Token};

/// Build a [`Document`] from a token sequence.
///
/// End tags close the nearest open element with the same name; end tags with no matching open
/// element are dropped. Anything left open at the end of input is closed implicitly.
pub fn build_document(tokens: Vec<Token>) -> Document {
    let mut doc = Document::new();
    let root = doc.root();
    let mut open_elements: Vec<(Id, String)> = Vec::new();

    for token in tokens {
        let parent = open_elements.last().map(|(id, _)| *id).unwrap_or(root);
        match token {
            Token::Doctype(value) => doc.set_doctype(Some(value)),
            Token::Comment(text) => {
                let node = doc.create_comment(text);
                doc.append_child(parent, node);
            }
            Token::Text(text) => {
                if !text.is_empty() {
                    let node = doc.create_text(text);
                    doc.append_child(parent, node);
                }
            }
            Token::StartTag {
                name,
                attributes,
                self_closing,
            } => {
                let node = doc.create_element_with(ElementData {
                    name: name.clone(),
                    attributes,
                });
                doc.append_child(parent, node);
                if !self_closing {
                    open_elements.push((node, name));
                }
            }
            Token::EndTag(name) => {
                if let Some(at) = open_elements.iter().rposition(|(_, open)| *open == name) {
                    open_elements.truncate(at);
                } else {
                    log::trace!(target: "html.builder", "dropping unmatched end tag </{name}>");
                }
            }
        }
    }

    doc
}

pub fn parse_document(input: &str) -> Document {
    build_document(tokenize(input))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NodeKind;

    #[test]
    fn builds_nested_structure() {
        let doc = parse_document("<!DOCTYPE html><body><p>Hi <b>there</b></p></body>");
        assert_eq!(doc.doctype(), Some("DOCTYPE html"));
        let body = doc.body().expect("body");
        let p = doc.children(body)[0];
        assert_eq!(doc.tag_name(p), Some("p"));
        assert_eq!(doc.text_content(p), "Hi there");
    }

    #[test]
    fn unmatched_end_tag_is_ignored() {
        let doc = parse_document("<div><p>a</span>b</p></div>");
        let div = doc.children(doc.root())[0];
        let p = doc.children(div)[0];
        assert_eq!(doc.text_content(p), "ab");
    }

    #[test]
    fn end_tag_closes_intervening_elements() {
        let doc = parse_document("<div><p><em>a</div>b");
        let root_children = doc.children(doc.root());
        assert_eq!(root_children.len(), 2);
        assert!(matches!(doc.kind(root_children[1]), NodeKind::Text(t) if t == "b"));
    }

    #[test]
    fn deep_nesting_builds_without_recursion() {
        let depth = 10_000;
        let input = format!("{}{}", "<div>".repeat(depth), "</div>".repeat(depth));
        let doc = parse_document(&input);

        let mut current = doc.root();
        let mut seen = 0;
        while let Some(&child) = doc.children(current).first() {
            assert_eq!(doc.tag_name(child), Some("div"));
            seen += 1;
            current = child;
        }
        assert_eq!(seen, depth);
    }
}
