use crate::document::Document;
use crate::tokenizer::{is_rawtext_element, is_void_element};
use crate::types::{Id, NodeKind};

fn push_escaped_text(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\u{00A0}' => out.push_str("&nbsp;"),
            _ => out.push(ch),
        }
    }
}

fn push_escaped_attr(out: &mut String, value: &str) {
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
}

/// Serialize `id` and its subtree. For the document node this is the whole page.
pub fn to_html(doc: &Document, id: Id) -> String {
    let mut out = String::new();
    write_node(doc, id, false, &mut out);
    out
}

/// Serialize the children of `id` only.
pub fn inner_html(doc: &Document, id: Id) -> String {
    let raw = doc
        .tag_name(id)
        .is_some_and(is_rawtext_element);
    let mut out = String::new();
    for child in doc.children(id) {
        write_node(doc, *child, raw, &mut out);
    }
    out
}

fn write_node(doc: &Document, id: Id, raw_parent: bool, out: &mut String) {
    match doc.kind(id) {
        NodeKind::Document { doctype } => {
            if let Some(dt) = doctype {
                out.push_str("<!");
                out.push_str(dt);
                out.push('>');
            }
            for child in doc.children(id) {
                write_node(doc, *child, false, out);
            }
        }
        NodeKind::Element(element) => {
            out.push('<');
            out.push_str(&element.name);
            for (key, value) in &element.attributes {
                out.push(' ');
                out.push_str(key);
                if let Some(v) = value {
                    out.push_str("=\"");
                    push_escaped_attr(out, v);
                    out.push('"');
                }
            }
            out.push('>');
            if is_void_element(&element.name) {
                return;
            }
            let raw = is_rawtext_element(&element.name);
            for child in doc.children(id) {
                write_node(doc, *child, raw, out);
            }
            out.push_str("</");
            out.push_str(&element.name);
            out.push('>');
        }
        NodeKind::Text(text) => {
            if raw_parent {
                out.push_str(text);
            } else {
                push_escaped_text(out, text);
            }
        }
        NodeKind::Comment(text) => {
            out.push_str("<!--");
            out.push_str(text);
            out.push_str("-->");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_document;

    #[test]
    fn serializes_page_round_trip() {
        let input = r#"<!DOCTYPE html><html><body class="doc"><p>a &amp; b</p><br><!-- c --></body></html>"#;
        let doc = parse_document(input);
        assert_eq!(to_html(&doc, doc.root()), input);
    }

    #[test]
    fn script_text_is_not_escaped() {
        let doc = parse_document("<script>if (a < b) {}</script>");
        let script = doc.children(doc.root())[0];
        assert_eq!(inner_html(&doc, script), "if (a < b) {}");
        assert_eq!(to_html(&doc, script), "<script>if (a < b) {}</script>");
    }

    #[test]
    fn attribute_values_are_escaped() {
        let mut doc = crate::Document::new();
        let a = doc.create_element("a");
        doc.set_attr(a, "title", r#"say "hi" & go"#);
        assert_eq!(
            to_html(&doc, a),
            r#"<a title="say &quot;hi&quot; &amp; go"></a>"#
        );
    }
}
