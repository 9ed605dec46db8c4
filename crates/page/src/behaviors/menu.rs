use css::SelectorList;
use html::{Document, Id};

use super::bubbles_to;
use crate::config::Selectors;

/// The collapsible navigation menu used on narrow screens.
#[derive(Debug, Clone)]
pub struct MobileMenu {
    toggle: Id,
    menu: Id,
    links: SelectorList,
    active_class: String,
}

impl MobileMenu {
    /// Needs both the toggle button and the menu; otherwise nothing is installed.
    pub fn install(doc: &Document, selectors: &Selectors, active_class: &str) -> Option<Self> {
        let toggle = css::select_first(doc, doc.root(), &selectors.menu_toggle)?;
        let menu = css::select_first(doc, doc.root(), &selectors.nav_menu)?;
        Some(Self {
            toggle,
            menu,
            links: selectors.nav_links.clone(),
            active_class: active_class.to_string(),
        })
    }

    pub fn is_open(&self, doc: &Document) -> bool {
        doc.has_class(self.menu, &self.active_class)
    }

    pub fn on_click(&self, doc: &mut Document, target: Id) {
        if bubbles_to(doc, target, self.toggle) {
            let open = doc.toggle_class(self.menu, &self.active_class);
            log::trace!(target: "page.menu", "menu toggled, open={open}");
        }
        let picked_link = css::closest(doc, target, &self.links)
            .is_some_and(|link| doc.is_descendant_of(link, self.menu));
        if picked_link {
            doc.remove_class(self.menu, &self.active_class);
        }
    }
}
