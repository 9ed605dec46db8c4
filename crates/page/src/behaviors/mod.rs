//! Interactive behaviours wired on `DOMContentLoaded` and `load`.
//!
//! Each behaviour is installed once against the parsed document and then only sees the events
//! and timer tasks routed to it by [`crate::Page`]. A behaviour whose elements are missing is
//! simply not installed, or does nothing when its event arrives.

pub mod back_to_top;
pub mod code_copy;
pub mod menu;
pub mod nav_active;
pub mod scroll_spy;
pub mod search;
pub mod smooth_scroll;
pub mod toc;

pub use back_to_top::BackToTop;
pub use code_copy::CodeCopy;
pub use menu::MobileMenu;
pub use nav_active::highlight_current_page;
pub use scroll_spy::ScrollSpy;
pub use search::SearchBox;
pub use smooth_scroll::SmoothScroll;
pub use toc::generate_toc;

use html::{Document, Id};

/// Whether a click on `target` reaches a listener on `element` while bubbling.
pub(crate) fn bubbles_to(doc: &Document, target: Id, element: Id) -> bool {
    target == element || doc.is_descendant_of(target, element)
}
