use crate::queue::TimerQueue;
use core_types::{Millis, TimerId};

/// Collapses bursts of triggers into one delayed action carrying the latest payload.
///
/// The debouncer holds at most one pending timer. Every [`schedule`](Debouncer::schedule) cancels
/// it and installs a fresh one `window` ms out, so the action only runs once the triggers have
/// been quiet for the whole window.
#[derive(Debug, Clone)]
pub struct Debouncer {
    window: Millis,
    pending: Option<TimerId>,
}

impl Debouncer {
    pub fn new(window: Millis) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    pub fn window(&self) -> Millis {
        self.window
    }

    pub fn pending(&self) -> Option<TimerId> {
        self.pending
    }

    pub fn schedule<T>(&mut self, queue: &mut TimerQueue<T>, payload: T) -> TimerId {
        self.cancel(queue);
        let id = queue.set_timeout(self.window, payload);
        self.pending = Some(id);
        id
    }

    /// Drop the pending timer, if any. Returns whether one was pending.
    pub fn cancel<T>(&mut self, queue: &mut TimerQueue<T>) -> bool {
        match self.pending.take() {
            Some(id) => queue.clear_timeout(id),
            None => false,
        }
    }

    /// Acknowledge a fired timer. Returns true when `id` is this debouncer's pending timer,
    /// which is then no longer pending; stale ids return false.
    pub fn take_fired(&mut self, id: TimerId) -> bool {
        if self.pending == Some(id) {
            self.pending = None;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn burst_collapses_to_latest_payload() {
        let mut queue = TimerQueue::new();
        let mut debouncer = Debouncer::new(300);

        debouncer.schedule(&mut queue, "fo");
        queue.advance_by(100);
        debouncer.schedule(&mut queue, "fox");

        assert!(queue.advance_to(399).is_empty());
        let fired = queue.advance_to(400);
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].payload, "fox");
        assert_eq!(fired[0].due_at, 400);
        assert!(debouncer.take_fired(fired[0].id));
        assert_eq!(debouncer.pending(), None);
        assert!(queue.advance_by(1_000).is_empty());
    }

    #[test]
    fn at_most_one_timer_pending() {
        let mut queue = TimerQueue::new();
        let mut debouncer = Debouncer::new(100);
        for n in 0..10 {
            debouncer.schedule(&mut queue, n);
        }
        assert_eq!(queue.pending(), 1);
    }

    #[test]
    fn cancel_drops_pending_action() {
        let mut queue = TimerQueue::new();
        let mut debouncer = Debouncer::new(100);
        let id = debouncer.schedule(&mut queue, ());
        assert!(debouncer.cancel(&mut queue));
        assert!(!debouncer.cancel(&mut queue));
        assert!(!debouncer.take_fired(id));
        assert!(queue.advance_by(500).is_empty());
    }

    #[test]
    fn quiet_gap_longer_than_window_runs_twice() {
        let mut queue = TimerQueue::new();
        let mut debouncer = Debouncer::new(300);
        debouncer.schedule(&mut queue, 1);
        let first = queue.advance_by(300);
        assert!(debouncer.take_fired(first[0].id));
        debouncer.schedule(&mut queue, 2);
        let second = queue.advance_by(300);
        assert_eq!(second[0].payload, 2);
        assert_eq!(second[0].due_at, 600);
    }
}
