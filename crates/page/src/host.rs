//! The browser facilities a page needs that are not part of the document tree.

use std::collections::HashMap;
use std::fmt;

use core_types::{ScrollBehavior, ScrollBlock};
use html::{Document, Id};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HostError {
    #[error("{0} is not available")]
    Unavailable(&'static str),
    #[error("{0}")]
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareData {
    pub title: String,
    pub url: String,
}

pub trait PageHost {
    /// Absolute URL of the current page.
    fn location(&self) -> &str;

    /// Asynchronous clipboard API. `Err(HostError::Unavailable)` makes callers fall back to
    /// [`PageHost::exec_copy`].
    fn write_clipboard(&mut self, text: &str) -> Result<(), HostError>;

    /// Legacy copy command run against the selected contents of `source` (a `<textarea>`).
    /// Returns whether anything was copied.
    fn exec_copy(&mut self, doc: &Document, source: Id) -> bool;

    /// Document-relative top edge of `id` in px, if it is laid out.
    fn offset_top(&self, doc: &Document, id: Id) -> Option<f32>;

    fn scroll_to(&mut self, top: f32, behavior: ScrollBehavior);

    fn scroll_into_view(&mut self, target: Id, behavior: ScrollBehavior, block: ScrollBlock);

    fn print(&mut self);

    fn can_share(&self) -> bool;

    fn share(&mut self, data: &ShareData) -> Result<(), HostError>;

    fn alert(&mut self, message: &str);
}

/// Everything a [`RecordingHost`] was asked to do, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum HostAction {
    ClipboardWrite(String),
    ExecCopy(String),
    ScrollTo {
        top: f32,
        behavior: ScrollBehavior,
    },
    ScrollIntoView {
        target: Id,
        behavior: ScrollBehavior,
        block: ScrollBlock,
    },
    Print,
    Share(ShareData),
    Alert(String),
}

impl fmt::Display for HostAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostAction::ClipboardWrite(text) => write!(f, "clipboard {text:?}"),
            HostAction::ExecCopy(text) => write!(f, "copy-command {text:?}"),
            HostAction::ScrollTo { top, behavior } => {
                write!(f, "scroll-to {top} ({behavior:?})")
            }
            HostAction::ScrollIntoView {
                target,
                behavior,
                block,
            } => write!(f, "scroll-into-view node {} ({behavior:?}, {block:?})", target.0),
            HostAction::Print => f.write_str("print"),
            HostAction::Share(data) => write!(f, "share {:?} {}", data.title, data.url),
            HostAction::Alert(message) => write!(f, "alert {message:?}"),
        }
    }
}

/// Headless host: remembers every request and answers layout queries from a table of element
/// ids to offsets.
#[derive(Debug, Clone)]
pub struct RecordingHost {
    location: String,
    clipboard_available: bool,
    share_available: bool,
    offsets: HashMap<String, f32>,
    actions: Vec<HostAction>,
}

impl RecordingHost {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            clipboard_available: true,
            share_available: false,
            offsets: HashMap::new(),
            actions: Vec::new(),
        }
    }

    pub fn with_clipboard(mut self, available: bool) -> Self {
        self.clipboard_available = available;
        self
    }

    pub fn with_share(mut self, available: bool) -> Self {
        self.share_available = available;
        self
    }

    /// Lay out the element whose `id` attribute is `element_id` at `top`.
    pub fn with_offset(mut self, element_id: impl Into<String>, top: f32) -> Self {
        self.offsets.insert(element_id.into(), top);
        self
    }

    pub fn set_location(&mut self, location: impl Into<String>) {
        self.location = location.into();
    }

    pub fn actions(&self) -> &[HostAction] {
        &self.actions
    }

    pub fn take_actions(&mut self) -> Vec<HostAction> {
        std::mem::take(&mut self.actions)
    }

    /// The most recent text that reached the clipboard by either route.
    pub fn clipboard(&self) -> Option<&str> {
        self.actions.iter().rev().find_map(|a| match a {
            HostAction::ClipboardWrite(text) | HostAction::ExecCopy(text) => Some(text.as_str()),
            _ => None,
        })
    }
}

impl PageHost for RecordingHost {
    fn location(&self) -> &str {
        &self.location
    }

    fn write_clipboard(&mut self, text: &str) -> Result<(), HostError> {
        if !self.clipboard_available {
            return Err(HostError::Unavailable("clipboard"));
        }
        self.actions.push(HostAction::ClipboardWrite(text.to_string()));
        Ok(())
    }

    fn exec_copy(&mut self, doc: &Document, source: Id) -> bool {
        if !doc.is_connected(source) {
            return false;
        }
        self.actions
            .push(HostAction::ExecCopy(doc.text_content(source)));
        true
    }

    fn offset_top(&self, doc: &Document, id: Id) -> Option<f32> {
        doc.attr(id, "id")
            .and_then(|value| self.offsets.get(value))
            .copied()
    }

    fn scroll_to(&mut self, top: f32, behavior: ScrollBehavior) {
        self.actions.push(HostAction::ScrollTo { top, behavior });
    }

    fn scroll_into_view(&mut self, target: Id, behavior: ScrollBehavior, block: ScrollBlock) {
        self.actions.push(HostAction::ScrollIntoView {
            target,
            behavior,
            block,
        });
    }

    fn print(&mut self) {
        self.actions.push(HostAction::Print);
    }

    fn can_share(&self) -> bool {
        self.share_available
    }

    fn share(&mut self, data: &ShareData) -> Result<(), HostError> {
        if !self.share_available {
            return Err(HostError::Unavailable("share"));
        }
        self.actions.push(HostAction::Share(data.clone()));
        Ok(())
    }

    fn alert(&mut self, message: &str) {
        self.actions.push(HostAction::Alert(message.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use html::parse_document;

    #[test]
    fn actions_render_as_one_line_each() {
        let mut host = RecordingHost::new("https://docs.example/");
        host.write_clipboard("cargo run").unwrap();
        host.scroll_to(0.0, ScrollBehavior::Smooth);
        host.print();
        host.alert("Thanks!");
        let lines: Vec<String> = host.actions().iter().map(ToString::to_string).collect();
        assert_eq!(
            lines,
            vec![
                r#"clipboard "cargo run""#,
                "scroll-to 0 (Smooth)",
                "print",
                r#"alert "Thanks!""#,
            ]
        );
    }

    #[test]
    fn exec_copy_needs_a_connected_source() {
        let mut doc = parse_document("<body></body>");
        let mut host = RecordingHost::new("about:blank");
        let textarea = doc.create_element("textarea");
        assert!(!host.exec_copy(&doc, textarea));
        let body = doc.body().unwrap();
        doc.append_child(body, textarea);
        doc.set_text_content(textarea, "x");
        assert!(host.exec_copy(&doc, textarea));
        assert_eq!(host.clipboard(), Some("x"));
    }
}
