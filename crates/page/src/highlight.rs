//! Search-as-you-type highlighting inside the content root.
//!
//! Planning and mutation are separate: [`plan_highlights`] reads the tree and decides which text
//! leaves get replaced and how, [`apply_plans`] performs the replacements. [`Highlighter`] keeps
//! the replaced leaves so [`Highlighter::clear`] can put the original nodes back.

use std::ops::Range;

use css::SelectorList;
use html::dom_utils::is_non_rendering_element;
use html::traverse::text_nodes_in_order;
use html::{Document, Id};
use regex::{Regex, RegexBuilder};

use crate::config::MatchMode;
use crate::error::{PageError, Result};

/// Attribute carried by the `<span>` that stands in for a matched text leaf.
pub const WRAPPER_ATTR: &str = "data-search-hit";
pub const MARKER_TAG: &str = "mark";

/// Case-insensitive matcher for one query.
#[derive(Debug, Clone)]
pub struct Matcher {
    regex: Regex,
}

impl Matcher {
    pub fn new(query: &str, mode: MatchMode) -> Result<Self> {
        let pattern = match mode {
            MatchMode::Literal => regex::escape(query),
            MatchMode::Pattern => query.to_string(),
        };
        let regex = RegexBuilder::new(&pattern)
            .case_insensitive(true)
            .build()
            .map_err(|source| PageError::Pattern {
                pattern: query.to_string(),
                source,
            })?;
        Ok(Self { regex })
    }

    /// Byte ranges of all non-empty matches, left to right, non-overlapping.
    pub fn find_spans(&self, text: &str) -> Vec<Range<usize>> {
        self.regex
            .find_iter(text)
            .filter(|m| !m.is_empty())
            .map(|m| m.range())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Plain(String),
    Hit(String),
}

/// Replacement for one text leaf. Concatenating the segments gives the leaf's text back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightPlan {
    pub text: Id,
    pub segments: Vec<Segment>,
}

fn segments_for(text: &str, spans: &[Range<usize>]) -> Vec<Segment> {
    let mut segments = Vec::with_capacity(spans.len() * 2 + 1);
    let mut at = 0;
    for span in spans {
        if span.start > at {
            segments.push(Segment::Plain(text[at..span.start].to_string()));
        }
        segments.push(Segment::Hit(text[span.clone()].to_string()));
        at = span.end;
    }
    if at < text.len() {
        segments.push(Segment::Plain(text[at..].to_string()));
    }
    segments
}

/// Decide which text leaves under `root` contain a match, in document order.
/// Text inside script/style (and other non-rendering elements) is never considered.
pub fn plan_highlights(doc: &Document, root: Id, matcher: &Matcher) -> Vec<HighlightPlan> {
    text_nodes_in_order(doc, root, is_non_rendering_element)
        .into_iter()
        .filter_map(|id| {
            let text = doc.text(id)?;
            let spans = matcher.find_spans(text);
            if spans.is_empty() {
                return None;
            }
            Some(HighlightPlan {
                text: id,
                segments: segments_for(text, &spans),
            })
        })
        .collect()
}

/// A text leaf that is currently swapped out for a wrapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppliedHighlight {
    pub wrapper: Id,
    pub original: Id,
}

/// Replace each planned leaf with a wrapper `<span>` holding plain text and `<mark>` runs.
pub fn apply_plans(doc: &mut Document, plans: &[HighlightPlan]) -> Vec<AppliedHighlight> {
    let mut applied = Vec::with_capacity(plans.len());
    for plan in plans {
        let wrapper = doc.create_element("span");
        doc.set_attr(wrapper, WRAPPER_ATTR, "");
        for segment in &plan.segments {
            match segment {
                Segment::Plain(text) => {
                    let node = doc.create_text(text.as_str());
                    doc.append_child(wrapper, node);
                }
                Segment::Hit(text) => {
                    let mark = doc.create_element(MARKER_TAG);
                    let node = doc.create_text(text.as_str());
                    doc.append_child(mark, node);
                    doc.append_child(wrapper, mark);
                }
            }
        }
        if doc.replace_node(plan.text, wrapper) {
            applied.push(AppliedHighlight {
                wrapper,
                original: plan.text,
            });
        }
    }
    applied
}

/// Owns the current generation of highlight markers.
#[derive(Debug)]
pub struct Highlighter {
    content_root: SelectorList,
    mode: MatchMode,
    applied: Vec<AppliedHighlight>,
}

impl Highlighter {
    pub fn new(content_root: SelectorList, mode: MatchMode) -> Self {
        Self {
            content_root,
            mode,
            applied: Vec::new(),
        }
    }

    /// Number of text leaves currently wrapped.
    pub fn wrapped_leaves(&self) -> usize {
        self.applied.len()
    }

    /// Put every original text node back where its wrapper is, then free the wrappers.
    pub fn clear(&mut self, doc: &mut Document) {
        for hit in self.applied.drain(..).rev() {
            if !doc.replace_node(hit.wrapper, hit.original) {
                log::debug!(
                    target: "page.search",
                    "highlight wrapper {:?} was detached before clear",
                    hit.wrapper
                );
            }
            doc.release_subtree(hit.wrapper);
        }
    }

    /// Run one highlight pass for `query`. Returns the number of markers created.
    ///
    /// An empty query only clears. A page without a content root is left alone.
    pub fn search(&mut self, doc: &mut Document, query: &str) -> Result<usize> {
        if query.is_empty() {
            self.clear(doc);
            return Ok(0);
        }
        let Some(root) = css::select_first(doc, doc.root(), &self.content_root) else {
            log::debug!(target: "page.search", "no content root; skipping search");
            return Ok(0);
        };

        self.clear(doc);
        let matcher = Matcher::new(query, self.mode)?;
        let plans = plan_highlights(doc, root, &matcher);
        let markers = plans
            .iter()
            .flat_map(|plan| &plan.segments)
            .filter(|segment| matches!(segment, Segment::Hit(_)))
            .count();
        self.applied = apply_plans(doc, &plans);
        log::debug!(
            target: "page.search",
            "query {query:?}: {markers} markers in {} text nodes",
            self.applied.len()
        );
        Ok(markers)
    }
}
