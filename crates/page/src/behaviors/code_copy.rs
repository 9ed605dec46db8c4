use core_types::Millis;
use html::{Document, Id};
use timers::TimerQueue;

use super::bubbles_to;
use crate::clipboard::copy_to_clipboard;
use crate::config::{PageConfig, Selectors};
use crate::host::PageHost;
use crate::page::TimerTask;

#[derive(Debug, Clone)]
struct CopyBlock {
    button: Id,
    code: String,
}

/// Copy buttons on code blocks.
#[derive(Debug, Clone)]
pub struct CodeCopy {
    blocks: Vec<CopyBlock>,
    label: String,
    copied_label: String,
    copied_background: String,
    feedback_ms: Millis,
}

impl CodeCopy {
    /// The code text of each block is captured here, so later edits to the page (highlight
    /// markers included) never change what a button copies.
    pub fn install(doc: &Document, selectors: &Selectors, config: &PageConfig) -> Self {
        let blocks = css::select_all(doc, doc.root(), &selectors.code_block)
            .into_iter()
            .filter_map(|block| {
                let button = css::select_first(doc, block, &selectors.copy_button)?;
                let Some(code) = css::select_first(doc, block, &selectors.code) else {
                    log::debug!(target: "page.copy", "code block {block:?} has no code element");
                    return None;
                };
                Some(CopyBlock {
                    button,
                    code: doc.text_content(code),
                })
            })
            .collect::<Vec<_>>();
        log::debug!(target: "page.copy", "{} copy buttons", blocks.len());

        Self {
            blocks,
            label: config.labels.copy.clone(),
            copied_label: config.labels.copied.clone(),
            copied_background: config.copy.copied_background.clone(),
            feedback_ms: config.copy.feedback_ms,
        }
    }

    pub fn button_count(&self) -> usize {
        self.blocks.len()
    }

    pub fn on_click<H: PageHost>(
        &self,
        doc: &mut Document,
        host: &mut H,
        timers: &mut TimerQueue<TimerTask>,
        target: Id,
    ) {
        let Some(block) = self
            .blocks
            .iter()
            .find(|block| bubbles_to(doc, target, block.button))
        else {
            return;
        };

        if let Err(err) = copy_to_clipboard(doc, host, &block.code) {
            log::warn!(target: "page.copy", "copy failed: {err}");
        }
        doc.set_text_content(block.button, &self.copied_label);
        css::set_style_property(doc, block.button, "background", &self.copied_background);
        timers.set_timeout(self.feedback_ms, TimerTask::RestoreCopyButton(block.button));
    }

    /// Put the idle label back and drop the feedback background.
    pub fn restore(&self, doc: &mut Document, button: Id) {
        doc.set_text_content(button, &self.label);
        css::remove_style_property(doc, button, "background");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SelectorConfig;
    use crate::host::RecordingHost;
    use html::parse_document;

    const PAGE: &str = r#"<body>
        <div class="code-block"><button class="copy-btn">Copy</button><pre>cargo run</pre></div>
        <div class="code-block"><pre>no button</pre></div>
        <div class="code-block"><button class="copy-btn">Copy</button></div>
    </body>"#;

    fn setup() -> (Document, CodeCopy, Id) {
        let doc = parse_document(PAGE);
        let config = PageConfig::default();
        let selectors = Selectors::compile(&SelectorConfig::default()).unwrap();
        let copy = CodeCopy::install(&doc, &selectors, &config);
        let button = css::query_selector(&doc, doc.root(), ".copy-btn")
            .unwrap()
            .unwrap();
        (doc, copy, button)
    }

    #[test]
    fn only_complete_blocks_get_a_button() {
        let (_, copy, _) = setup();
        assert_eq!(copy.button_count(), 1);
    }

    #[test]
    fn click_copies_and_shows_feedback_until_restored() {
        let (mut doc, copy, button) = setup();
        let mut host = RecordingHost::new("https://docs.example/");
        let mut timers = TimerQueue::new();

        copy.on_click(&mut doc, &mut host, &mut timers, button);
        assert_eq!(host.clipboard(), Some("cargo run"));
        assert_eq!(doc.text_content(button), "✓ Copied");
        assert_eq!(
            css::style_property(&doc, button, "background").as_deref(),
            Some("#10b981")
        );

        let fired = timers.advance_by(1999);
        assert!(fired.is_empty());
        let fired = timers.advance_by(1);
        assert_eq!(fired.len(), 1);
        assert!(matches!(fired[0].payload, TimerTask::RestoreCopyButton(id) if id == button));

        copy.restore(&mut doc, button);
        assert_eq!(doc.text_content(button), "Copy");
        assert_eq!(css::style_property(&doc, button, "background"), None);
    }

    #[test]
    fn clicks_elsewhere_are_ignored() {
        let (mut doc, copy, _) = setup();
        let mut host = RecordingHost::new("https://docs.example/");
        let mut timers = TimerQueue::new();
        let pre = css::query_selector(&doc, doc.root(), "pre").unwrap().unwrap();
        copy.on_click(&mut doc, &mut host, &mut timers, pre);
        assert!(host.actions().is_empty());
        assert_eq!(timers.pending(), 0);
    }
}
