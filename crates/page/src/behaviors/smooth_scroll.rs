use core_types::{ScrollBehavior, ScrollBlock};
use css::SelectorList;
use html::{Document, Id};

use crate::config::Selectors;
use crate::event::EventOutcome;
use crate::host::PageHost;

/// In-page links (`href="#…"`) scroll smoothly instead of jumping.
#[derive(Debug, Clone)]
pub struct SmoothScroll {
    links: SelectorList,
}

impl SmoothScroll {
    pub fn install(selectors: &Selectors) -> Self {
        Self {
            links: selectors.fragment_links.clone(),
        }
    }

    pub fn on_click<H: PageHost>(&self, doc: &Document, host: &mut H, target: Id) -> EventOutcome {
        let Some(link) = css::closest(doc, target, &self.links) else {
            return EventOutcome::default();
        };
        let Some(fragment) = doc.attr(link, "href").and_then(|href| href.strip_prefix('#')) else {
            return EventOutcome::default();
        };
        let Some(section) = doc.element_by_id(fragment) else {
            log::debug!(target: "page.scroll", "no element for #{fragment}");
            return EventOutcome::default();
        };
        host.scroll_into_view(section, ScrollBehavior::Smooth, ScrollBlock::Start);
        EventOutcome::PREVENTED
    }
}
