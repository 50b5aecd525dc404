//! Minimal selector engine for the in-memory document.
//!
//! Supports comma-separated lists of compound selectors made of an optional
//! tag (or `*`) followed by any number of `.class`, `#id`, `[attr]` and
//! `[attr=value]` filters. Values may be quoted. Combinators are not
//! supported; a selector using one is malformed and matches nothing.

use std::{iter::Peekable, str::Chars};

use indexmap::IndexMap;

/// Attribute filter of a compound selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttrFilter {
    /// Attribute name
    pub name: String,
    /// Required value; `None` only requires presence
    pub value: Option<String>,
}

/// One compound selector, e.g. `span.field[name]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Compound {
    /// Required tag, `None` for any
    pub tag: Option<String>,
    /// Required id
    pub id: Option<String>,
    /// Required classes
    pub classes: Vec<String>,
    /// Attribute filters
    pub attrs: Vec<AttrFilter>,
}

impl Compound {
    /// Whether an element with this tag and these attributes matches.
    pub fn matches(&self, tag: &str, attrs: &IndexMap<String, String>) -> bool {
        if self.tag.as_deref().is_some_and(|wanted| !wanted.eq_ignore_ascii_case(tag)) {
            return false;
        }
        if self.id.as_deref().is_some_and(|wanted| attrs.get("id").map(String::as_str) != Some(wanted)) {
            return false;
        }

        let classes: Vec<&str> =
            attrs.get("class").map(|c| c.split_whitespace().collect()).unwrap_or_default();
        if !self.classes.iter().all(|wanted| classes.contains(&wanted.as_str())) {
            return false;
        }

        self.attrs.iter().all(|filter| match (&filter.value, attrs.get(&filter.name)) {
            (_, None) => false,
            (None, Some(_)) => true,
            (Some(wanted), Some(actual)) => wanted == actual,
        })
    }
}

/// Parse a comma-separated selector list.
///
/// Returns `None` for a malformed selector or an empty clause.
pub fn parse(selector: &str) -> Option<Vec<Compound>> {
    selector.split(',').map(|clause| parse_compound(clause.trim())).collect()
}

fn parse_compound(clause: &str) -> Option<Compound> {
    if clause.is_empty() {
        return None;
    }

    let mut chars = clause.chars().peekable();
    let mut compound = Compound::default();

    if chars.peek() == Some(&'*') {
        chars.next();
    } else {
        let tag = ident(&mut chars);
        if !tag.is_empty() {
            compound.tag = Some(tag);
        }
    }

    while let Some(c) = chars.next() {
        match c {
            '.' => compound.classes.push(non_empty(ident(&mut chars))?),
            '#' => compound.id = Some(non_empty(ident(&mut chars))?),
            '[' => compound.attrs.push(attr_filter(&mut chars)?),
            _ => return None,
        }
    }

    Some(compound)
}

fn attr_filter(chars: &mut Peekable<Chars<'_>>) -> Option<AttrFilter> {
    let name = non_empty(ident(chars))?;
    match chars.next()? {
        ']' => Some(AttrFilter { name, value: None }),
        '=' => {
            let value = match chars.peek() {
                Some(&quote @ ('"' | '\'')) => {
                    chars.next();
                    chars.by_ref().take_while(|&c| c != quote).collect()
                },
                _ => ident(chars),
            };
            (chars.next()? == ']').then_some(AttrFilter { name, value: Some(value) })
        },
        _ => None,
    }
}

fn ident(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut out = String::new();
    while let Some(&c) = chars.peek() {
        if c.is_alphanumeric() || c == '-' || c == '_' {
            out.push(c);
            chars.next();
        } else {
            break;
        }
    }
    out
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() { None } else { Some(s) }
}
