use crate::document::Document;
use crate::types::{Id, NodeKind};

/// Elements whose text never renders: document metadata plus script and style bodies.
pub fn is_non_rendering_element(doc: &Document, id: Id) -> bool {
    doc.element(id).is_some_and(|e| {
        let n = e.name.to_ascii_lowercase();
        matches!(
            n.as_str(),
            "head" | "style" | "script" | "title" | "meta" | "link" | "template" | "noscript"
        )
    })
}

/// Trimmed, whitespace-collapsed text of an element, the way headings and buttons read.
pub fn display_text(doc: &Document, id: Id) -> String {
    doc.text_content(id)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Indented, line-per-node view of a subtree, capped at `cap` nodes.
pub fn outline(doc: &Document, root: Id, cap: usize) -> Vec<String> {
    fn clip(text: &str) -> String {
        let t = text.replace('\n', " ");
        let t = t.trim();
        match t.char_indices().nth(40) {
            Some((at, _)) => format!("{}…", &t[..at]),
            None => t.to_string(),
        }
    }

    let mut out = Vec::new();
    let mut stack = vec![(root, 0usize)];
    while let Some((id, depth)) = stack.pop() {
        if out.len() >= cap {
            break;
        }
        let indent = "  ".repeat(depth);
        match doc.kind(id) {
            NodeKind::Document { doctype } => match doctype {
                Some(dt) => out.push(format!("{indent}<!{dt}>")),
                None => out.push(format!("{indent}#document")),
            },
            NodeKind::Element(element) => {
                let mut line = format!("{indent}<{}", element.name);
                if let Some(id_attr) = element.attr("id").filter(|v| !v.is_empty()) {
                    line.push_str(&format!(r#" id="{id_attr}""#));
                }
                if let Some(class) = element.attr("class").filter(|v| !v.is_empty()) {
                    line.push_str(&format!(r#" class="{class}""#));
                }
                line.push('>');
                out.push(line);
            }
            NodeKind::Text(text) => {
                let t = clip(text);
                if !t.is_empty() {
                    out.push(format!("{indent}\"{t}\""));
                }
            }
            NodeKind::Comment(text) => out.push(format!("{indent}<!-- {} -->", clip(text))),
        }
        for child in doc.children(id).iter().rev() {
            stack.push((*child, depth + 1));
        }
    }
    out
}
