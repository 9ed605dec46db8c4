use core_types::{Millis, TimerId};
use css::SelectorList;
use html::{Document, Id};
use timers::{Debouncer, TimerQueue};

use crate::config::{PageConfig, Selectors};
use crate::host::PageHost;
use crate::page::TimerTask;

/// Marks the table-of-contents link of the section currently scrolled into view.
///
/// Links and sections are looked up when a pass runs, not at install, so a table of contents
/// generated on `load` is tracked too.
#[derive(Debug, Clone)]
pub struct ScrollSpy {
    links: SelectorList,
    offset: f32,
    active_class: String,
    debouncer: Debouncer,
}

impl ScrollSpy {
    pub fn install(selectors: &Selectors, config: &PageConfig) -> Self {
        Self {
            links: selectors.toc_links.clone(),
            offset: config.scroll.spy_offset,
            active_class: config.selectors.active_class.clone(),
            debouncer: Debouncer::new(config.scroll.spy_debounce_ms),
        }
    }

    pub fn window(&self) -> Millis {
        self.debouncer.window()
    }

    pub fn on_scroll(&mut self, timers: &mut TimerQueue<TimerTask>, y: f32) {
        self.debouncer.schedule(timers, TimerTask::ScrollSpy { y });
    }

    pub fn take_fired(&mut self, id: TimerId) -> bool {
        self.debouncer.take_fired(id)
    }

    /// Returns the id of the current section, if any section is at or above `y`.
    pub fn update<H: PageHost>(&self, doc: &mut Document, host: &H, y: f32) -> Option<String> {
        let links = css::select_all(doc, doc.root(), &self.links);
        let sections: Vec<(String, Id)> = links
            .iter()
            .filter_map(|&link| {
                let fragment = doc.attr(link, "href")?.strip_prefix('#')?;
                let section = doc.element_by_id(fragment)?;
                Some((fragment.to_string(), section))
            })
            .collect();
        if sections.is_empty() {
            return None;
        }

        let mut current = None;
        for (id, section) in &sections {
            let Some(top) = host.offset_top(doc, *section) else {
                continue;
            };
            if y >= top - self.offset {
                current = Some(id.clone());
            }
        }

        let wanted = current.as_ref().map(|id| format!("#{id}"));
        for link in links {
            doc.remove_class(link, &self.active_class);
            if wanted.is_some() && doc.attr(link, "href") == wanted.as_deref() {
                doc.add_class(link, &self.active_class);
            }
        }
        log::trace!(target: "page.scroll", "scroll spy at {y}: {current:?}");
        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SelectorConfig;
    use crate::host::RecordingHost;
    use html::parse_document;

    const PAGE: &str = r##"<body>
        <ul class="toc-list">
            <li><a href="#intro">Intro</a></li>
            <li><a href="#setup">Setup</a></li>
            <li><a href="#missing">Missing</a></li>
        </ul>
        <h2 id="intro">Intro</h2><h2 id="setup">Setup</h2>
    </body>"##;

    fn setup() -> (Document, ScrollSpy, RecordingHost) {
        let doc = parse_document(PAGE);
        let config = PageConfig::default();
        let selectors = Selectors::compile(&SelectorConfig::default()).unwrap();
        let host = RecordingHost::new("https://docs.example/")
            .with_offset("intro", 200.0)
            .with_offset("setup", 900.0);
        (doc, ScrollSpy::install(&selectors, &config), host)
    }

    fn active_links(doc: &Document) -> Vec<String> {
        css::query_selector_all(doc, doc.root(), ".toc-list a.active")
            .unwrap()
            .into_iter()
            .map(|a| doc.text_content(a))
            .collect()
    }

    #[test]
    fn last_section_above_offset_wins() {
        let (mut doc, spy, host) = setup();
        assert_eq!(spy.update(&mut doc, &host, 50.0), None);
        assert!(active_links(&doc).is_empty());

        assert_eq!(spy.update(&mut doc, &host, 100.0).as_deref(), Some("intro"));
        assert_eq!(active_links(&doc), vec!["Intro"]);

        assert_eq!(spy.update(&mut doc, &host, 850.0).as_deref(), Some("setup"));
        assert_eq!(active_links(&doc), vec!["Setup"]);
    }

    #[test]
    fn scrolling_back_above_all_sections_clears_active() {
        let (mut doc, spy, host) = setup();
        spy.update(&mut doc, &host, 1000.0);
        spy.update(&mut doc, &host, 0.0);
        assert!(active_links(&doc).is_empty());
    }

    #[test]
    fn scroll_events_are_debounced() {
        let (_, mut spy, _) = setup();
        let mut timers = TimerQueue::new();
        spy.on_scroll(&mut timers, 10.0);
        spy.on_scroll(&mut timers, 20.0);
        let fired = timers.advance_by(spy.window());
        assert_eq!(fired.len(), 1);
        assert!(matches!(fired[0].payload, TimerTask::ScrollSpy { y } if y == 20.0));
        assert!(spy.take_fired(fired[0].id));
    }
}
