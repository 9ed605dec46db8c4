pub mod selector;
pub mod style;
pub mod syntax;

pub use selector::{closest, matches, query_selector, query_selector_all, select_all, select_first};
pub use style::{remove_style_property, set_css_text, set_style_property, style_property};
pub use syntax::{Declaration, SelectorError, SelectorList, parse_declarations, parse_selector_list};
