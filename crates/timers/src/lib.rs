//! # timers
//!
//! Single-threaded timer facility for page behaviours.
//!
//! - [`TimerQueue`]: `setTimeout`/`clearTimeout` over a virtual millisecond clock. The host
//!   advances the clock; due tasks are handed back to the caller in `(due_at, insertion)` order.
//! - [`Debouncer`]: owns the one pending timer of a debounced action and replaces it on every
//!   new trigger.
//!
//! Payloads are plain data, so the caller decides what a fired task means.

mod debounce;
mod queue;

pub use debounce::Debouncer;
pub use queue::{Fired, TimerQueue};
