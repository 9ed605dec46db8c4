use thiserror::Error;

// A single CSS property: "color: red"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrOp {
    Exists,
    Equals(String),
    Prefix(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimpleSelector {
    Id(String),    // #id
    Class(String), // .class
    Attr { name: String, op: AttrOp },
}

/// `div.note[data-x]`: optional type plus any number of simple selectors.
/// `tag: None` means universal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Compound {
    pub tag: Option<String>,
    pub simple: Vec<SimpleSelector>,
}

/// Compounds joined by descendant combinators. The last one is the subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    pub compounds: Vec<Compound>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorList {
    pub selectors: Vec<Selector>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    #[error("empty selector")]
    Empty,
    #[error("unexpected {found:?} at byte {at} in selector {selector:?}")]
    Unexpected {
        selector: String,
        at: usize,
        found: char,
    },
    #[error("unterminated attribute selector in {0:?}")]
    UnterminatedAttribute(String),
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_' || !c.is_ascii()
}

// input: "h2, h3", ".nav-menu a", "a[href^=\"#\"]"
// output: SelectorList with one Selector per comma-separated part
pub fn parse_selector_list(input: &str) -> Result<SelectorList, SelectorError> {
    let selectors = input
        .split(',')
        .map(parse_selector)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(SelectorList { selectors })
}

fn parse_selector(input: &str) -> Result<Selector, SelectorError> {
    let compounds = input
        .split_whitespace()
        .map(|part| parse_compound(input, part))
        .collect::<Result<Vec<_>, _>>()?;
    if compounds.is_empty() {
        return Err(SelectorError::Empty);
    }
    Ok(Selector { compounds })
}

fn take_ident(s: &str) -> (&str, &str) {
    let end = s
        .char_indices()
        .find(|(_, c)| !is_ident_char(*c))
        .map(|(i, _)| i)
        .unwrap_or(s.len());
    s.split_at(end)
}

fn parse_compound(selector: &str, part: &str) -> Result<Compound, SelectorError> {
    let unexpected = |rest: &str| {
        // `rest` is always a subslice of `selector`.
        let at = rest.as_ptr() as usize - selector.as_ptr() as usize;
        SelectorError::Unexpected {
            selector: selector.to_string(),
            at,
            found: rest.chars().next().unwrap_or(' '),
        }
    };

    let mut compound = Compound::default();
    let mut rest = part;

    if let Some(after) = rest.strip_prefix('*') {
        rest = after;
    } else {
        let (tag, after) = take_ident(rest);
        if !tag.is_empty() {
            compound.tag = Some(tag.to_ascii_lowercase());
            rest = after;
        }
    }

    while let Some(c) = rest.chars().next() {
        match c {
            '#' | '.' => {
                let (name, after) = take_ident(&rest[1..]);
                if name.is_empty() {
                    return Err(unexpected(rest));
                }
                compound.simple.push(if c == '#' {
                    SimpleSelector::Id(name.to_string())
                } else {
                    SimpleSelector::Class(name.to_string())
                });
                rest = after;
            }
            '[' => {
                let close = rest
                    .find(']')
                    .ok_or_else(|| SelectorError::UnterminatedAttribute(selector.to_string()))?;
                compound.simple.push(parse_attr(&rest[1..close]).ok_or_else(|| unexpected(rest))?);
                rest = &rest[close + 1..];
            }
            _ => return Err(unexpected(rest)),
        }
    }

    Ok(compound)
}

// input: `href^="#"`, `data-x`, `type=text`
fn parse_attr(inner: &str) -> Option<SimpleSelector> {
    let (name, op_rest) = take_ident(inner.trim());
    if name.is_empty() {
        return None;
    }
    let name = name.to_ascii_lowercase();
    let op_rest = op_rest.trim();
    let op = if op_rest.is_empty() {
        AttrOp::Exists
    } else if let Some(value) = op_rest.strip_prefix("^=") {
        AttrOp::Prefix(unquote(value)?)
    } else if let Some(value) = op_rest.strip_prefix('=') {
        AttrOp::Equals(unquote(value)?)
    } else {
        return None;
    };
    Some(SimpleSelector::Attr { name, op })
}

fn unquote(value: &str) -> Option<String> {
    let value = value.trim();
    for quote in ['"', '\''] {
        if let Some(inner) = value.strip_prefix(quote) {
            return inner.strip_suffix(quote).map(str::to_string);
        }
    }
    if value.chars().all(is_ident_char) {
        Some(value.to_string())
    } else {
        None
    }
}

// input: "color: red; font-size: 12px;"
// output: vec![Declaration { name: "color", value: "red" }, Declaration { name: "font-size", value: "12px" }]
pub fn parse_declarations(input: &str) -> Vec<Declaration> {
    input
        .split(';')
        .filter_map(|pair| {
            let (n, v) = pair.split_once(':')?;
            let name = n.trim().to_ascii_lowercase();
            if name.is_empty() {
                return None;
            }
            let value = v.trim().to_string();
            Some(Declaration { name, value })
        })
        .collect()
}

pub fn serialize_declarations(declarations: &[Declaration]) -> String {
    declarations
        .iter()
        .map(|d| format!("{}: {};", d.name, d.value))
        .collect::<Vec<_>>()
        .join(" ")
}
