//! Page behaviour configuration.
//!
//! Every value has a default matching a stock documentation page, so an empty TOML document is a
//! valid configuration. Selectors are validated when the config is loaded.

use std::path::Path;

use css::{SelectorList, parse_selector_list};
use serde::{Deserialize, Serialize};

use crate::error::{PageError, Result};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub selectors: SelectorConfig,
    pub search: SearchConfig,
    pub scroll: ScrollConfig,
    pub copy: CopyConfig,
    pub labels: Labels,
}

/// `[selectors]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    pub content_root: String,
    pub search_input: String,
    pub menu_toggle: String,
    pub nav_menu: String,
    pub code_block: String,
    pub copy_button: String,
    pub code: String,
    pub toc_list: String,
    pub toc_headings: String,
    /// Class toggled on the nav menu and set on active links.
    pub active_class: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            content_root: ".main-container".into(),
            search_input: ".search-input".into(),
            menu_toggle: ".menu-toggle".into(),
            nav_menu: ".nav-menu".into(),
            code_block: ".code-block".into(),
            copy_button: ".copy-btn".into(),
            code: "pre".into(),
            toc_list: ".toc-list".into(),
            toc_headings: "h2, h3".into(),
            active_class: "active".into(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// The query is matched as literal text.
    #[default]
    Literal,
    /// The query is a case-insensitive regular expression.
    Pattern,
}

/// `[search]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub debounce_ms: u64,
    pub match_mode: MatchMode,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 300,
            match_mode: MatchMode::Literal,
        }
    }
}

/// `[scroll]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    pub spy_debounce_ms: u64,
    /// A section counts as current once the viewport is within this many px of its top.
    pub spy_offset: f32,
    pub back_to_top_threshold: f32,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            spy_debounce_ms: 100,
            spy_offset: 100.0,
            back_to_top_threshold: 300.0,
        }
    }
}

/// `[copy]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CopyConfig {
    pub feedback_ms: u64,
    pub copied_background: String,
}

impl Default for CopyConfig {
    fn default() -> Self {
        Self {
            feedback_ms: 2000,
            copied_background: "#10b981".into(),
        }
    }
}

/// `[labels]` section: user-facing strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Labels {
    pub copy: String,
    pub copied: String,
    pub link_copied: String,
    pub feedback_helpful: String,
    pub feedback_not_helpful: String,
    pub back_to_top: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            copy: "Copy".into(),
            copied: "✓ Copied".into(),
            link_copied: "Link copied to clipboard!".into(),
            feedback_helpful: "Thanks for your feedback!".into(),
            feedback_not_helpful: "We will keep improving the docs!".into(),
            back_to_top: "↑".into(),
        }
    }
}

impl PageConfig {
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(input).map_err(|e| PageError::config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| PageError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        log::debug!(target: "page.config", "loaded config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        Selectors::compile(&self.selectors)?;
        if self.selectors.active_class.split_whitespace().count() != 1 {
            return Err(PageError::config(
                "selectors.active_class must be a single class name",
            ));
        }
        if !(self.scroll.spy_offset.is_finite() && self.scroll.back_to_top_threshold.is_finite()) {
            return Err(PageError::config("scroll offsets must be finite"));
        }
        Ok(())
    }
}

/// Parsed form of [`SelectorConfig`].
#[derive(Debug, Clone)]
pub struct Selectors {
    pub content_root: SelectorList,
    pub search_input: SelectorList,
    pub menu_toggle: SelectorList,
    pub nav_menu: SelectorList,
    pub code_block: SelectorList,
    pub copy_button: SelectorList,
    pub code: SelectorList,
    pub toc_list: SelectorList,
    pub toc_headings: SelectorList,
    pub toc_links: SelectorList,
    pub nav_links: SelectorList,
    pub fragment_links: SelectorList,
}

impl Selectors {
    pub fn compile(config: &SelectorConfig) -> Result<Self> {
        fn one(field: &'static str, selector: &str) -> Result<SelectorList> {
            parse_selector_list(selector).map_err(|source| PageError::Selector {
                field,
                selector: selector.to_string(),
                source,
            })
        }

        Ok(Self {
            content_root: one("content_root", &config.content_root)?,
            search_input: one("search_input", &config.search_input)?,
            menu_toggle: one("menu_toggle", &config.menu_toggle)?,
            nav_menu: one("nav_menu", &config.nav_menu)?,
            code_block: one("code_block", &config.code_block)?,
            copy_button: one("copy_button", &config.copy_button)?,
            code: one("code", &config.code)?,
            toc_list: one("toc_list", &config.toc_list)?,
            toc_headings: one("toc_headings", &config.toc_headings)?,
            toc_links: one("toc_list", &descendant(&config.toc_list, "a"))?,
            nav_links: one("nav_menu", &descendant(&config.nav_menu, "a"))?,
            fragment_links: one("fragment_links", r##"a[href^="#"]"##)?,
        })
    }
}

/// `.toc-list, .toc` + `a` gives `.toc-list a, .toc a`.
fn descendant(list: &str, child: &str) -> String {
    list.split(',')
        .map(|part| format!("{} {child}", part.trim()))
        .collect::<Vec<_>>()
        .join(", ")
}
