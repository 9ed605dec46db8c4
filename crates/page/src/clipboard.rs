use html::{Document, Id};

use crate::error::{PageError, Result};
use crate::host::{HostError, PageHost};

const FALLBACK_STYLE: &str = "position: fixed; opacity: 0;";

/// Put `text` on the clipboard.
///
/// Uses the host clipboard first. When the host has none, the text is copied through a hidden
/// `<textarea>` that exists only for the duration of the legacy copy command.
pub fn copy_to_clipboard<H: PageHost>(doc: &mut Document, host: &mut H, text: &str) -> Result<()> {
    match host.write_clipboard(text) {
        Ok(()) => Ok(()),
        Err(HostError::Unavailable(what)) => {
            log::debug!(target: "page.copy", "{what} unavailable, using copy command");
            copy_via_textarea(doc, host, text)
        }
        Err(err) => Err(err.into()),
    }
}

fn copy_via_textarea<H: PageHost>(doc: &mut Document, host: &mut H, text: &str) -> Result<()> {
    let parent = doc.body().unwrap_or_else(|| doc.root());
    let textarea = doc.create_element("textarea");
    doc.set_attr(textarea, "style", FALLBACK_STYLE);
    let value = doc.create_text(text);
    doc.append_child(textarea, value);
    doc.append_child(parent, textarea);

    let copied = host.exec_copy(doc, textarea);
    remove(doc, parent, textarea);

    if copied {
        Ok(())
    } else {
        Err(PageError::Clipboard("copy command was rejected".into()))
    }
}

fn remove(doc: &mut Document, parent: Id, node: Id) {
    if !doc.remove_child(parent, node) {
        log::warn!(target: "page.copy", "copy textarea was moved before removal");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{HostAction, RecordingHost};
    use html::{parse_document, to_html};

    #[test]
    fn uses_host_clipboard_when_available() {
        let mut doc = parse_document("<body><p>x</p></body>");
        let mut host = RecordingHost::new("https://docs.example/");
        copy_to_clipboard(&mut doc, &mut host, "cargo build").unwrap();
        assert_eq!(
            host.actions(),
            &[HostAction::ClipboardWrite("cargo build".into())]
        );
    }

    #[test]
    fn falls_back_to_textarea_and_cleans_up() {
        let mut doc = parse_document("<body><p>x</p></body>");
        let before = to_html(&doc, doc.root());
        let mut host = RecordingHost::new("https://docs.example/").with_clipboard(false);
        copy_to_clipboard(&mut doc, &mut host, "a < b").unwrap();
        assert_eq!(host.actions(), &[HostAction::ExecCopy("a < b".into())]);
        assert_eq!(to_html(&doc, doc.root()), before);
    }

    #[test]
    fn fallback_without_body_uses_document_root() {
        let mut doc = Document::new();
        let mut host = RecordingHost::new("about:blank").with_clipboard(false);
        copy_to_clipboard(&mut doc, &mut host, "hi").unwrap();
        assert_eq!(host.clipboard(), Some("hi"));
        assert!(doc.children(doc.root()).is_empty());
    }
}
