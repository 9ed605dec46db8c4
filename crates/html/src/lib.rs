//! HTML parsing and the mutable document tree the page behaviours operate on.

pub mod dom_utils;
pub mod serialize;
pub mod traverse;

mod document;
mod dom_builder;
mod entities;
mod tokenizer;
mod types;

pub use crate::document::{Descendants, Document};
pub use crate::dom_builder::{build_document, parse_document};
pub use crate::serialize::{inner_html, to_html};
pub use crate::tokenizer::tokenize;
pub use crate::types::{ElementData, Id, NodeId, NodeKind, Token};
