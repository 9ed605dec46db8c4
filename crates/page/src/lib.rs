//! # page
//!
//! Interactive behaviours of a static documentation page, run against an in-memory document.
//!
//! A [`Page`] owns the parsed [`html::Document`], a [`PageHost`] standing in for the browser
//! window, and a virtual-clock [`timers::TimerQueue`]. Events go in through [`Page::dispatch`],
//! time moves with [`Page::advance_time`].
//!
//! The centrepiece is the debounced search highlighter ([`highlight`]): typing into the search
//! box wraps case-insensitive matches in the content root with `<mark>`, and clearing the query
//! restores the original text nodes.

pub mod actions;
pub mod behaviors;
pub mod clipboard;
pub mod config;
pub mod error;
pub mod event;
pub mod highlight;
pub mod host;
mod page;

pub use config::{MatchMode, PageConfig, Selectors};
pub use error::{PageError, Result};
pub use event::{EventOutcome, PageEvent};
pub use highlight::{Highlighter, Matcher};
pub use host::{HostAction, HostError, PageHost, RecordingHost, ShareData};
pub use page::{Page, TimerTask};
