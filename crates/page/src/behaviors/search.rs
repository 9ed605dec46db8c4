use core_types::{Millis, TimerId};
use html::{Document, Id};
use timers::{Debouncer, TimerQueue};

use crate::config::Selectors;
use crate::page::TimerTask;

/// The search box: turns keystrokes into at most one highlight pass per quiet window.
#[derive(Debug, Clone)]
pub struct SearchBox {
    input: Id,
    debouncer: Debouncer,
}

impl SearchBox {
    pub fn install(doc: &Document, selectors: &Selectors, window: Millis) -> Option<Self> {
        let input = css::select_first(doc, doc.root(), &selectors.search_input)?;
        Some(Self {
            input,
            debouncer: Debouncer::new(window),
        })
    }

    pub fn input(&self) -> Id {
        self.input
    }

    /// Schedule a pass for the lowercased query, replacing any pass still waiting.
    /// Returns false when the input event came from another control.
    pub fn on_input(&mut self, timers: &mut TimerQueue<TimerTask>, target: Id, raw: &str) -> bool {
        if target != self.input {
            return false;
        }
        let query = raw.to_lowercase();
        log::trace!(target: "page.search", "scheduling pass for {query:?}");
        self.debouncer.schedule(timers, TimerTask::Search(query));
        true
    }

    /// Acknowledge a fired search timer. False for a timer this box no longer owns.
    pub fn take_fired(&mut self, id: TimerId) -> bool {
        self.debouncer.take_fired(id)
    }

    pub fn is_pending(&self) -> bool {
        self.debouncer.pending().is_some()
    }
}
