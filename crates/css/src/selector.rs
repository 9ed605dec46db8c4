use crate::syntax::{AttrOp, Compound, Selector, SelectorError, SelectorList, SimpleSelector, parse_selector_list};
use html::{Document, ElementData, Id};

// Check if an element matches a single compound selector
fn matches_compound(element: &ElementData, compound: &Compound) -> bool {
    if let Some(tag) = &compound.tag {
        if !element.is(tag) {
            return false;
        }
    }
    compound.simple.iter().all(|simple| match simple {
        SimpleSelector::Id(want) => element.attr("id") == Some(want.as_str()),
        SimpleSelector::Class(want) => element.has_class(want),
        SimpleSelector::Attr { name, op } => match op {
            AttrOp::Exists => element.has_attr(name),
            AttrOp::Equals(want) => element.attr(name) == Some(want.as_str()),
            AttrOp::Prefix(want) => element
                .attr(name)
                .is_some_and(|v| !want.is_empty() && v.starts_with(want.as_str())),
        },
    })
}

fn matches_selector(doc: &Document, id: Id, selector: &Selector) -> bool {
    let Some((subject, rest)) = selector.compounds.split_last() else {
        return false;
    };
    let Some(element) = doc.element(id) else {
        return false;
    };
    if !matches_compound(element, subject) {
        return false;
    }

    // Descendant combinators only, so matching each remaining compound against the nearest
    // qualifying ancestor is enough.
    let mut ancestors = doc.ancestors(id);
    'compounds: for compound in rest.iter().rev() {
        for ancestor in ancestors.by_ref() {
            if doc
                .element(ancestor)
                .is_some_and(|e| matches_compound(e, compound))
            {
                continue 'compounds;
            }
        }
        return false;
    }
    true
}

pub fn matches(doc: &Document, id: Id, list: &SelectorList) -> bool {
    list.selectors.iter().any(|s| matches_selector(doc, id, s))
}

/// Elements under `scope` (exclusive) matching `list`, in document order.
pub fn select_all(doc: &Document, scope: Id, list: &SelectorList) -> Vec<Id> {
    doc.descendants(scope)
        .filter(|id| matches(doc, *id, list))
        .collect()
}

pub fn select_first(doc: &Document, scope: Id, list: &SelectorList) -> Option<Id> {
    doc.descendants(scope).find(|id| matches(doc, *id, list))
}

pub fn query_selector(doc: &Document, scope: Id, selector: &str) -> Result<Option<Id>, SelectorError> {
    let list = parse_selector_list(selector)?;
    Ok(select_first(doc, scope, &list))
}

pub fn query_selector_all(doc: &Document, scope: Id, selector: &str) -> Result<Vec<Id>, SelectorError> {
    let list = parse_selector_list(selector)?;
    Ok(select_all(doc, scope, &list))
}

/// Nearest inclusive ancestor of `id` matching `list`.
pub fn closest(doc: &Document, id: Id, list: &SelectorList) -> Option<Id> {
    std::iter::once(id)
        .chain(doc.ancestors(id))
        .find(|candidate| matches(doc, *candidate, list))
}

#[cfg(test)]
mod tests {
    use super::*;
    use html::parse_document;

    const PAGE: &str = r##"
        <nav class="nav-menu"><a href="/index.html">Home</a><a href="#intro">Intro</a></nav>
        <main class="main-container">
          <h2 id="intro">Intro</h2><h3>Detail</h3>
          <div class="code-block"><button class="copy-btn">Copy</button><pre>make</pre></div>
        </main>"##;

    #[test]
    fn descendant_selector_matches_only_inside_ancestor() {
        let doc = parse_document(PAGE);
        let links = query_selector_all(&doc, doc.root(), ".nav-menu a").unwrap();
        assert_eq!(links.len(), 2);
        assert!(query_selector_all(&doc, doc.root(), ".main-container a")
            .unwrap()
            .is_empty());
    }

    #[test]
    fn selector_list_returns_document_order() {
        let doc = parse_document(PAGE);
        let headings = query_selector_all(&doc, doc.root(), "h3, h2").unwrap();
        let names: Vec<_> = headings.iter().filter_map(|h| doc.tag_name(*h)).collect();
        assert_eq!(names, vec!["h2", "h3"]);
    }

    #[test]
    fn attribute_prefix_selector() {
        let doc = parse_document(PAGE);
        let anchors = query_selector_all(&doc, doc.root(), r##"a[href^="#"]"##).unwrap();
        assert_eq!(anchors.len(), 1);
        assert_eq!(doc.attr(anchors[0], "href"), Some("#intro"));
    }

    #[test]
    fn scoped_query_and_closest() {
        let doc = parse_document(PAGE);
        let block = query_selector(&doc, doc.root(), ".code-block").unwrap().unwrap();
        let pre = query_selector(&doc, block, "pre").unwrap().unwrap();
        assert_eq!(doc.text_content(pre), "make");

        let list = parse_selector_list(".code-block").unwrap();
        assert_eq!(closest(&doc, pre, &list), Some(block));
        assert_eq!(closest(&doc, block, &list), Some(block));
    }

    #[test]
    fn invalid_selector_is_an_error() {
        let doc = parse_document(PAGE);
        assert!(query_selector(&doc, doc.root(), "nav >").is_err());
    }
}
