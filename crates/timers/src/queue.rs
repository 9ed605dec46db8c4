use core_types::{Millis, TimerId};

#[derive(Debug, Clone)]
struct Scheduled<T> {
    id: TimerId,
    due_at: Millis,
    order: u64,
    payload: T,
}

/// A timer that came due while the clock advanced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fired<T> {
    pub id: TimerId,
    pub due_at: Millis,
    pub payload: T,
}

#[derive(Debug)]
pub struct TimerQueue<T> {
    now: Millis,
    next_id: u64,
    next_order: u64,
    tasks: Vec<Scheduled<T>>,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self {
            now: 0,
            next_id: 1,
            next_order: 0,
            tasks: Vec::new(),
        }
    }

    pub fn now(&self) -> Millis {
        self.now
    }

    pub fn set_timeout(&mut self, delay: Millis, payload: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let order = self.next_order;
        self.next_order += 1;
        let due_at = self.now.saturating_add(delay);
        log::trace!(target: "timers", "set {id:?} due_at={due_at} now={}", self.now);
        self.tasks.push(Scheduled {
            id,
            due_at,
            order,
            payload,
        });
        id
    }

    /// Cancel a pending timer. Unknown or already-fired ids are ignored.
    pub fn clear_timeout(&mut self, id: TimerId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id != id);
        let removed = self.tasks.len() != before;
        if removed {
            log::trace!(target: "timers", "cleared {id:?}");
        }
        removed
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.tasks.iter().any(|task| task.id == id)
    }

    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    pub fn next_due(&self) -> Option<Millis> {
        self.tasks.iter().map(|task| task.due_at).min()
    }

    /// Advance the clock by `delta` and return every task that came due, earliest first.
    pub fn advance_by(&mut self, delta: Millis) -> Vec<Fired<T>> {
        let target = self.now.saturating_add(delta);
        self.advance_to(target)
    }

    /// Advance the clock to `target` (never backwards) and return the due tasks.
    pub fn advance_to(&mut self, target: Millis) -> Vec<Fired<T>> {
        let target = target.max(self.now);
        let mut due = Vec::new();
        let mut i = 0;
        while i < self.tasks.len() {
            if self.tasks[i].due_at <= target {
                due.push(self.tasks.swap_remove(i));
            } else {
                i += 1;
            }
        }
        due.sort_by_key(|task| (task.due_at, task.order));
        self.now = target;
        due.into_iter()
            .map(|task| Fired {
                id: task.id,
                due_at: task.due_at,
                payload: task.payload,
            })
            .collect()
    }

    /// Pop the earliest task due at or before `limit`, moving the clock to its due time.
    ///
    /// Lets a caller run tasks one at a time so that tasks scheduled by a running task are
    /// seen in the same advance.
    pub fn pop_due(&mut self, limit: Millis) -> Option<Fired<T>> {
        let (index, _) = self
            .tasks
            .iter()
            .enumerate()
            .filter(|(_, task)| task.due_at <= limit)
            .min_by_key(|(_, task)| (task.due_at, task.order))?;
        let task = self.tasks.remove(index);
        self.now = self.now.max(task.due_at);
        Some(Fired {
            id: task.id,
            due_at: task.due_at,
            payload: task.payload,
        })
    }

    /// Move the clock forward without running anything. Used after draining with [`pop_due`].
    ///
    /// [`pop_due`]: TimerQueue::pop_due
    pub fn set_now(&mut self, now: Millis) {
        self.now = self.now.max(now);
    }
}
