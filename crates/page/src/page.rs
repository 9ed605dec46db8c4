use core_types::Millis;
use html::{Document, Id, parse_document};
use timers::{Fired, TimerQueue};

use crate::actions;
use crate::behaviors::{
    BackToTop, CodeCopy, MobileMenu, ScrollSpy, SearchBox, SmoothScroll, generate_toc,
    highlight_current_page,
};
use crate::clipboard;
use crate::config::{PageConfig, Selectors};
use crate::error::Result;
use crate::event::{EventOutcome, PageEvent};
use crate::highlight::Highlighter;
use crate::host::PageHost;

/// Deferred work owned by the page's timer queue.
#[derive(Debug, Clone, PartialEq)]
pub enum TimerTask {
    /// Debounced highlight pass for an already lowercased query.
    Search(String),
    /// Debounced scroll spy pass at the scroll position of the last event.
    ScrollSpy { y: f32 },
    /// End of the "copied" feedback on a code copy button.
    RestoreCopyButton(Id),
}

#[derive(Debug)]
struct Behaviors {
    menu: Option<MobileMenu>,
    code_copy: CodeCopy,
    search: Option<SearchBox>,
    scroll_spy: ScrollSpy,
    smooth_scroll: SmoothScroll,
    back_to_top: BackToTop,
}

/// A documentation page with its behaviours, driven by events and a virtual clock.
pub struct Page<H: PageHost> {
    doc: Document,
    host: H,
    config: PageConfig,
    selectors: Selectors,
    timers: TimerQueue<TimerTask>,
    highlighter: Highlighter,
    behaviors: Option<Behaviors>,
    toc_entries: Option<usize>,
}

impl<H: PageHost> Page<H> {
    pub fn new(doc: Document, host: H, config: PageConfig) -> Result<Self> {
        config.validate()?;
        let selectors = Selectors::compile(&config.selectors)?;
        let highlighter = Highlighter::new(selectors.content_root.clone(), config.search.match_mode);
        Ok(Self {
            doc,
            host,
            config,
            selectors,
            timers: TimerQueue::new(),
            highlighter,
            behaviors: None,
            toc_entries: None,
        })
    }

    /// Parse `html` and run the whole startup sequence (`DOMContentLoaded`, then `load`).
    pub fn load(html: &str, host: H, config: PageConfig) -> Result<Self> {
        let mut page = Self::new(parse_document(html), host, config)?;
        page.content_loaded();
        page.loaded();
        Ok(page)
    }

    /// Install the interactive behaviours. Runs once; later calls are ignored.
    pub fn content_loaded(&mut self) {
        if self.behaviors.is_some() {
            log::warn!(target: "page", "behaviours already installed");
            return;
        }
        let doc = &mut self.doc;
        let config = &self.config;
        let selectors = &self.selectors;
        let active = config.selectors.active_class.as_str();

        let menu = MobileMenu::install(doc, selectors, active);
        let code_copy = CodeCopy::install(doc, selectors, config);
        let search = SearchBox::install(doc, selectors, config.search.debounce_ms);
        let scroll_spy = ScrollSpy::install(selectors, config);
        let smooth_scroll = SmoothScroll::install(selectors);
        let marked = highlight_current_page(doc, self.host.location(), &selectors.nav_links, active);
        let back_to_top = BackToTop::install(
            doc,
            &config.labels.back_to_top,
            config.scroll.back_to_top_threshold,
        );

        log::info!(
            target: "page",
            "behaviours installed: menu={} search={} copy_buttons={} active_nav_links={marked}",
            menu.is_some(),
            search.is_some(),
            code_copy.button_count(),
        );
        self.behaviors = Some(Behaviors {
            menu,
            code_copy,
            search,
            scroll_spy,
            smooth_scroll,
            back_to_top,
        });
    }

    /// Window `load`: build the table of contents. Runs once.
    pub fn loaded(&mut self) {
        if self.toc_entries.is_some() {
            return;
        }
        self.toc_entries = Some(generate_toc(&mut self.doc, &self.selectors));
    }

    pub fn dispatch(&mut self, event: PageEvent) -> EventOutcome {
        let Some(behaviors) = self.behaviors.as_mut() else {
            log::trace!(target: "page", "event before content_loaded: {event:?}");
            return EventOutcome::default();
        };

        match event {
            PageEvent::Click { target } => {
                if let Some(menu) = &behaviors.menu {
                    menu.on_click(&mut self.doc, target);
                }
                behaviors
                    .code_copy
                    .on_click(&mut self.doc, &mut self.host, &mut self.timers, target);
                let outcome = behaviors
                    .smooth_scroll
                    .on_click(&self.doc, &mut self.host, target);
                behaviors
                    .back_to_top
                    .on_click(&self.doc, &mut self.host, target);
                EventOutcome::default().merge(outcome)
            }
            PageEvent::Input { target, value } => {
                if let Some(search) = behaviors.search.as_mut() {
                    search.on_input(&mut self.timers, target, &value);
                }
                EventOutcome::default()
            }
            PageEvent::Scroll { y } => {
                behaviors.scroll_spy.on_scroll(&mut self.timers, y);
                behaviors.back_to_top.on_scroll(&mut self.doc, y);
                EventOutcome::default()
            }
            PageEvent::MouseEnter { target } => {
                behaviors.back_to_top.on_hover(&mut self.doc, target, true);
                EventOutcome::default()
            }
            PageEvent::MouseLeave { target } => {
                behaviors.back_to_top.on_hover(&mut self.doc, target, false);
                EventOutcome::default()
            }
        }
    }

    /// Advance the virtual clock by `delta` ms, running every timer task that comes due on the
    /// way, in due order.
    pub fn advance_time(&mut self, delta: Millis) {
        let target = self.timers.now().saturating_add(delta);
        while let Some(fired) = self.timers.pop_due(target) {
            self.run_task(fired);
        }
        self.timers.set_now(target);
    }

    fn run_task(&mut self, fired: Fired<TimerTask>) {
        let Some(behaviors) = self.behaviors.as_mut() else {
            return;
        };
        match fired.payload {
            TimerTask::Search(query) => {
                let owned = behaviors
                    .search
                    .as_mut()
                    .is_some_and(|search| search.take_fired(fired.id));
                if owned {
                    if let Err(err) = self.highlighter.search(&mut self.doc, &query) {
                        log::warn!(target: "page.search", "{err}");
                    }
                }
            }
            TimerTask::ScrollSpy { y } => {
                if behaviors.scroll_spy.take_fired(fired.id) {
                    behaviors.scroll_spy.update(&mut self.doc, &self.host, y);
                }
            }
            TimerTask::RestoreCopyButton(button) => {
                behaviors.code_copy.restore(&mut self.doc, button);
            }
        }
    }

    /// Run a highlight pass right away, bypassing the debounce window.
    pub fn search_now(&mut self, query: &str) -> Result<usize> {
        self.highlighter.search(&mut self.doc, &query.to_lowercase())
    }

    pub fn clear_highlights(&mut self) {
        self.highlighter.clear(&mut self.doc);
    }

    pub fn copy_to_clipboard(&mut self, text: &str) -> Result<()> {
        clipboard::copy_to_clipboard(&mut self.doc, &mut self.host, text)
    }

    pub fn print(&mut self) {
        actions::print_page(&mut self.host);
    }

    pub fn share(&mut self) {
        actions::share_url(&mut self.doc, &mut self.host, &self.config.labels);
    }

    pub fn submit_feedback(&mut self, helpful: bool) {
        actions::submit_feedback(&mut self.host, &self.config.labels, helpful);
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    pub fn now(&self) -> Millis {
        self.timers.now()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.pending()
    }

    /// The search box input element, if the page has one.
    pub fn search_input(&self) -> Option<Id> {
        self.behaviors.as_ref()?.search.as_ref().map(SearchBox::input)
    }

    pub fn back_to_top(&self) -> Option<Id> {
        self.behaviors.as_ref().map(|b| b.back_to_top.button())
    }

    pub fn toc_entries(&self) -> usize {
        self.toc_entries.unwrap_or(0)
    }

    pub fn highlighted_leaves(&self) -> usize {
        self.highlighter.wrapped_leaves()
    }

    pub fn into_parts(self) -> (Document, H) {
        (self.doc, self.host)
    }
}
