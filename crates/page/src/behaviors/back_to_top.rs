use core_types::ScrollBehavior;
use html::{Document, Id};

use super::bubbles_to;
use crate::host::PageHost;

pub const BUTTON_CLASS: &str = "back-to-top";

const BUTTON_STYLE: &str = "position: fixed; bottom: 30px; right: 30px; width: 50px; \
    height: 50px; background: var(--primary-color); color: white; border: none; \
    border-radius: 50%; font-size: 1.5rem; cursor: pointer; display: none; \
    box-shadow: 0 4px 6px rgba(0, 0, 0, 0.1); transition: all 0.3s; z-index: 999";

/// Floating button that appears once the reader has scrolled down.
#[derive(Debug, Clone)]
pub struct BackToTop {
    button: Id,
    threshold: f32,
}

impl BackToTop {
    /// Creates the (hidden) button and appends it to `body`, or to the document when there is
    /// no body.
    pub fn install(doc: &mut Document, label: &str, threshold: f32) -> Self {
        let button = doc.create_element("button");
        doc.set_attr(button, "class", BUTTON_CLASS);
        css::set_css_text(doc, button, BUTTON_STYLE);
        doc.set_text_content(button, label);
        let parent = doc.body().unwrap_or_else(|| doc.root());
        doc.append_child(parent, button);
        Self { button, threshold }
    }

    pub fn button(&self) -> Id {
        self.button
    }

    pub fn is_visible(&self, doc: &Document) -> bool {
        css::style_property(doc, self.button, "display").as_deref() == Some("block")
    }

    pub fn on_scroll(&self, doc: &mut Document, y: f32) {
        let display = if y > self.threshold { "block" } else { "none" };
        css::set_style_property(doc, self.button, "display", display);
    }

    /// Returns whether the click reached the button.
    pub fn on_click<H: PageHost>(&self, doc: &Document, host: &mut H, target: Id) -> bool {
        if !bubbles_to(doc, target, self.button) {
            return false;
        }
        host.scroll_to(0.0, ScrollBehavior::Smooth);
        true
    }

    pub fn on_hover(&self, doc: &mut Document, target: Id, entered: bool) {
        if target != self.button {
            return;
        }
        let scale = if entered { "scale(1.1)" } else { "scale(1)" };
        css::set_style_property(doc, self.button, "transform", scale);
    }
}
