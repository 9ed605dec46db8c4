use css::SelectorList;
use html::Document;
use url::Url;

/// Mark the navigation links that point at the current page. Returns how many were marked.
///
/// A link matches when its resolved path equals the location's path, or when the location is a
/// directory and the link is `/index.html`.
pub fn highlight_current_page(
    doc: &mut Document,
    location: &str,
    nav_links: &SelectorList,
    active_class: &str,
) -> usize {
    let base = match Url::parse(location) {
        Ok(url) => url,
        Err(err) => {
            log::warn!(target: "page.nav", "cannot parse location {location:?}: {err}");
            return 0;
        }
    };
    let current = base.path();

    let mut marked = 0;
    for link in css::select_all(doc, doc.root(), nav_links) {
        let Some(href) = doc.attr(link, "href") else {
            continue;
        };
        let Ok(resolved) = base.join(href) else {
            log::debug!(target: "page.nav", "skipping unresolvable link {href:?}");
            continue;
        };
        let path = resolved.path();
        if path == current || (current.ends_with('/') && path == "/index.html") {
            doc.add_class(link, active_class);
            marked += 1;
        }
    }
    marked
}

#[cfg(test)]
mod tests {
    use super::*;
    use css::parse_selector_list;
    use html::parse_document;

    const NAV: &str = r#"<ul class="nav-menu">
        <li><a href="/index.html">Home</a></li>
        <li><a href="guide.html">Guide</a></li>
        <li><a href="https://other.example/docs/guide.html">Mirror</a></li>
        <li><a>No href</a></li>
    </ul>"#;

    fn active(location: &str) -> Vec<String> {
        let mut doc = parse_document(NAV);
        let links = parse_selector_list(".nav-menu a").unwrap();
        highlight_current_page(&mut doc, location, &links, "active");
        css::query_selector_all(&doc, doc.root(), "a.active")
            .unwrap()
            .into_iter()
            .map(|a| doc.text_content(a))
            .collect()
    }

    #[test]
    fn relative_links_resolve_against_location() {
        assert_eq!(active("https://docs.example/docs/guide.html"), vec!["Guide", "Mirror"]);
    }

    #[test]
    fn directory_location_matches_index() {
        assert_eq!(active("https://docs.example/"), vec!["Home"]);
    }

    #[test]
    fn unparsable_location_marks_nothing() {
        assert!(active("not a url").is_empty());
    }
}
