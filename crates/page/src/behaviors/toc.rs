use html::Document;

use crate::config::Selectors;

/// Fill the table of contents from the page headings. Returns the number of entries added.
///
/// Headings without an id get `heading-<n>`, where `n` is the heading's position among all
/// matched headings. Nested (`h3`) entries are indented.
pub fn generate_toc(doc: &mut Document, selectors: &Selectors) -> usize {
    let Some(list) = css::select_first(doc, doc.root(), &selectors.toc_list) else {
        return 0;
    };
    let headings = css::select_all(doc, doc.root(), &selectors.toc_headings);

    for (index, &heading) in headings.iter().enumerate() {
        let existing = doc
            .attr(heading, "id")
            .filter(|id| !id.is_empty())
            .map(str::to_string);
        let id = match existing {
            Some(id) => id,
            None => {
                let id = format!("heading-{index}");
                doc.set_attr(heading, "id", id.as_str());
                id
            }
        };
        let title = doc.text_content(heading);
        let nested = doc.tag_name(heading) == Some("h3");

        let item = doc.create_element("li");
        let link = doc.create_element("a");
        doc.set_attr(link, "href", format!("#{id}"));
        doc.set_text_content(link, &title);
        if nested {
            css::set_style_property(doc, link, "padding-left", "15px");
            css::set_style_property(doc, link, "font-size", "0.8rem");
        }
        doc.append_child(item, link);
        doc.append_child(list, item);
    }

    log::debug!(target: "page.toc", "generated {} entries", headings.len());
    headings.len()
}
