//! One-shot page actions bound to toolbar buttons.

use html::Document;
use html::dom_utils::display_text;

use crate::clipboard::copy_to_clipboard;
use crate::config::Labels;
use crate::host::{PageHost, ShareData};

pub fn print_page<H: PageHost>(host: &mut H) {
    host.print();
}

/// Share the page through the host, or copy its URL when sharing is not supported.
pub fn share_url<H: PageHost>(doc: &mut Document, host: &mut H, labels: &Labels) {
    let url = host.location().to_string();
    if host.can_share() {
        let data = ShareData {
            title: document_title(doc),
            url,
        };
        if let Err(err) = host.share(&data) {
            log::warn!(target: "page.share", "share failed: {err}");
        }
        return;
    }

    if let Err(err) = copy_to_clipboard(doc, host, &url) {
        log::warn!(target: "page.share", "could not copy page link: {err}");
    }
    host.alert(&labels.link_copied);
}

pub fn submit_feedback<H: PageHost>(host: &mut H, labels: &Labels, helpful: bool) {
    log::info!(
        target: "page.feedback",
        "reader feedback: {}",
        if helpful { "helpful" } else { "not helpful" }
    );
    let message = if helpful {
        &labels.feedback_helpful
    } else {
        &labels.feedback_not_helpful
    };
    host.alert(message);
}

fn document_title(doc: &Document) -> String {
    doc.first_element_named(doc.root(), "title")
        .map(|title| display_text(doc, title))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{HostAction, RecordingHost};
    use html::parse_document;

    const PAGE: &str = "<head><title> Sensor guide </title></head><body></body>";

    #[test]
    fn share_uses_host_when_supported() {
        let mut doc = parse_document(PAGE);
        let mut host = RecordingHost::new("https://docs.example/guide.html").with_share(true);
        share_url(&mut doc, &mut host, &Labels::default());
        assert_eq!(
            host.actions(),
            &[HostAction::Share(ShareData {
                title: "Sensor guide".into(),
                url: "https://docs.example/guide.html".into(),
            })]
        );
    }

    #[test]
    fn share_falls_back_to_copying_the_link() {
        let mut doc = parse_document(PAGE);
        let mut host = RecordingHost::new("https://docs.example/guide.html");
        let labels = Labels::default();
        share_url(&mut doc, &mut host, &labels);
        assert_eq!(
            host.actions(),
            &[
                HostAction::ClipboardWrite("https://docs.example/guide.html".into()),
                HostAction::Alert(labels.link_copied.clone()),
            ]
        );
    }

    #[test]
    fn feedback_thanks_the_reader() {
        let mut host = RecordingHost::new("https://docs.example/");
        let labels = Labels::default();
        submit_feedback(&mut host, &labels, true);
        submit_feedback(&mut host, &labels, false);
        assert_eq!(
            host.actions(),
            &[
                HostAction::Alert(labels.feedback_helpful.clone()),
                HostAction::Alert(labels.feedback_not_helpful.clone()),
            ]
        );
    }

    #[test]
    fn print_is_forwarded() {
        let mut host = RecordingHost::new("https://docs.example/");
        print_page(&mut host);
        assert_eq!(host.actions(), &[HostAction::Print]);
    }
}
