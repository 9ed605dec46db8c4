use crate::document::Document;
use crate::types::{Id, NodeKind};

/// Text nodes under `root` in document order.
///
/// Element subtrees for which `skip` returns true are not entered at all, so text inside them is
/// never reported. `root` itself is always entered.
pub fn text_nodes_in_order(
    doc: &Document,
    root: Id,
    mut skip: impl FnMut(&Document, Id) -> bool,
) -> Vec<Id> {
    let mut out = Vec::new();
    let mut stack: Vec<Id> = doc.children(root).iter().rev().copied().collect();

    while let Some(id) = stack.pop() {
        match doc.kind(id) {
            NodeKind::Text(_) => out.push(id),
            NodeKind::Element(_) => {
                if skip(doc, id) {
                    continue;
                }
                stack.extend(doc.children(id).iter().rev().copied());
            }
            NodeKind::Comment(_) | NodeKind::Document { .. } => {}
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom_utils::is_non_rendering_element;
    use crate::parse_document;

    #[test]
    fn visits_text_in_document_order_and_skips_scripts() {
        let doc = parse_document(
            "<main>one<p>two<em>three</em></p><script>four</script><!--x-->five</main>",
        );
        let main = doc.children(doc.root())[0];
        let texts: Vec<&str> = text_nodes_in_order(&doc, main, is_non_rendering_element)
            .into_iter()
            .filter_map(|id| doc.text(id))
            .collect();
        assert_eq!(texts, vec!["one", "two", "three", "five"]);
    }

    #[test]
    fn nothing_skipped_without_predicate() {
        let doc = parse_document("<div><style>a{}</style>b</div>");
        let div = doc.children(doc.root())[0];
        assert_eq!(text_nodes_in_order(&doc, div, |_, _| false).len(), 2);
    }
}
