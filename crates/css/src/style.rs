//! Reading and writing individual properties of an element's `style=""` attribute.
use crate::syntax::{Declaration, parse_declarations, serialize_declarations};
use html::{Document, Id};

pub fn inline_declarations(doc: &Document, id: Id) -> Vec<Declaration> {
    doc.attr(id, "style").map(parse_declarations).unwrap_or_default()
}

pub fn style_property(doc: &Document, id: Id, name: &str) -> Option<String> {
    inline_declarations(doc, id)
        .into_iter()
        .rev()
        .find(|d| d.name.eq_ignore_ascii_case(name))
        .map(|d| d.value)
}

/// Set one property, replacing any previous value. An empty value removes the property,
/// the way `element.style.prop = ''` does.
pub fn set_style_property(doc: &mut Document, id: Id, name: &str, value: &str) {
    if doc.element(id).is_none() {
        return;
    }
    let name = name.to_ascii_lowercase();
    let mut declarations = inline_declarations(doc, id);
    declarations.retain(|d| d.name != name);
    if !value.is_empty() {
        declarations.push(Declaration {
            name,
            value: value.to_string(),
        });
    }
    write_back(doc, id, &declarations);
}

pub fn remove_style_property(doc: &mut Document, id: Id, name: &str) {
    set_style_property(doc, id, name, "");
}

/// Replace the whole inline style, like assigning `style.cssText`.
pub fn set_css_text(doc: &mut Document, id: Id, css_text: &str) {
    let declarations = parse_declarations(css_text);
    write_back(doc, id, &declarations);
}

fn write_back(doc: &mut Document, id: Id, declarations: &[Declaration]) {
    if declarations.is_empty() {
        doc.remove_attr(id, "style");
    } else {
        doc.set_attr(id, "style", serialize_declarations(declarations));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_replace_and_remove_properties() {
        let mut doc = Document::new();
        let button = doc.create_element("button");
        set_css_text(&mut doc, button, "\n  position: fixed;\n  display: none;\n");
        assert_eq!(style_property(&doc, button, "display").as_deref(), Some("none"));

        set_style_property(&mut doc, button, "display", "block");
        assert_eq!(
            doc.attr(button, "style"),
            Some("position: fixed; display: block;")
        );

        remove_style_property(&mut doc, button, "position");
        set_style_property(&mut doc, button, "display", "");
        assert_eq!(doc.attr(button, "style"), None);
    }
}
