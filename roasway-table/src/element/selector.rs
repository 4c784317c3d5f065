//! A small CSS selector subset.
//!
//! Supported: type (`div`, `*`), `#id`, `.class`, `[attr]`, `[attr=value]`
//! (value optionally quoted), compounds of those, and the descendant
//! (whitespace) and child (`>`) combinators.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::Element;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason} at byte {position}")]
pub struct SelectorError {
    pub reason: &'static str,
    pub position: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Combinator {
    Descendant,
    Child,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct AttrMatch {
    name: String,
    value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<AttrMatch>,
}

impl Compound {
    fn is_empty(&self) -> bool {
        self.tag.is_none() && self.id.is_none() && self.classes.is_empty() && self.attrs.is_empty()
    }

    fn matches(&self, element: &Element) -> bool {
        if let Some(tag) = &self.tag {
            if tag != "*" && !tag.eq_ignore_ascii_case(&element.tag) {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if *id != element.id {
                return false;
            }
        }
        if !self.classes.iter().all(|c| element.has_class(c)) {
            return false;
        }
        self.attrs.iter().all(|a| match (&a.value, element.get_attr(&a.name)) {
            (_, None) => false,
            (None, Some(_)) => true,
            (Some(want), Some(have)) => want == have,
        })
    }
}

/// A parsed selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    source: String,
    // The combinator of the first part is never consulted.
    parts: Vec<(Combinator, Compound)>,
}

impl Selector {
    pub fn parse(source: &str) -> Result<Self, SelectorError> {
        Parser::new(source).parse()
    }

    /// Does `element` match, given its ancestors ordered root first?
    pub fn matches(&self, element: &Element, ancestors: &[&Element]) -> bool {
        self.matches_at(self.parts.len() - 1, element, ancestors)
    }

    fn matches_at(&self, idx: usize, element: &Element, ancestors: &[&Element]) -> bool {
        let (combinator, compound) = &self.parts[idx];
        if !compound.matches(element) {
            return false;
        }
        if idx == 0 {
            return true;
        }
        match combinator {
            Combinator::Child => match ancestors.split_last() {
                Some((parent, rest)) => self.matches_at(idx - 1, parent, rest),
                None => false,
            },
            Combinator::Descendant => (0..ancestors.len())
                .rev()
                .any(|i| self.matches_at(idx - 1, ancestors[i], &ancestors[..i])),
        }
    }
}

impl FromStr for Selector {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn error(&self, reason: &'static str) -> SelectorError {
        SelectorError {
            reason,
            position: self.pos,
        }
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_whitespace(&mut self) -> bool {
        let start = self.pos;
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
        self.pos != start
    }

    fn parse(mut self) -> Result<Selector, SelectorError> {
        let mut parts = Vec::new();
        self.skip_whitespace();
        let mut combinator = Combinator::Descendant;

        loop {
            let compound = self.compound()?;
            if compound.is_empty() {
                return Err(self.error("expected selector"));
            }
            parts.push((combinator, compound));

            let had_space = self.skip_whitespace();
            match self.peek() {
                None => break,
                Some('>') => {
                    self.bump();
                    self.skip_whitespace();
                    combinator = Combinator::Child;
                }
                Some(_) if had_space => combinator = Combinator::Descendant,
                Some(_) => return Err(self.error("unexpected character")),
            }
        }

        Ok(Selector {
            source: self.src.trim().to_string(),
            parts,
        })
    }

    fn compound(&mut self) -> Result<Compound, SelectorError> {
        let mut compound = Compound::default();

        if self.peek() == Some('*') {
            self.bump();
            compound.tag = Some("*".to_string());
        } else if self.peek().is_some_and(is_ident_char) {
            compound.tag = Some(self.ident()?);
        }

        loop {
            match self.peek() {
                Some('.') => {
                    self.bump();
                    compound.classes.push(self.ident()?);
                }
                Some('#') => {
                    self.bump();
                    if compound.id.is_some() {
                        return Err(self.error("duplicate id"));
                    }
                    compound.id = Some(self.ident()?);
                }
                Some('[') => {
                    self.bump();
                    compound.attrs.push(self.attribute()?);
                }
                _ => return Ok(compound),
            }
        }
    }

    fn ident(&mut self) -> Result<String, SelectorError> {
        let start = self.pos;
        while self.peek().is_some_and(is_ident_char) {
            self.bump();
        }
        if start == self.pos {
            return Err(self.error("expected identifier"));
        }
        Ok(self.src[start..self.pos].to_string())
    }

    fn attribute(&mut self) -> Result<AttrMatch, SelectorError> {
        self.skip_whitespace();
        let name = self.ident()?;
        self.skip_whitespace();
        let value = match self.bump() {
            Some(']') => return Ok(AttrMatch { name, value: None }),
            Some('=') => {
                self.skip_whitespace();
                self.attribute_value()?
            }
            _ => return Err(self.error("expected `]` or `=`")),
        };
        self.skip_whitespace();
        if self.bump() != Some(']') {
            return Err(self.error("unterminated attribute selector"));
        }
        Ok(AttrMatch {
            name,
            value: Some(value),
        })
    }

    fn attribute_value(&mut self) -> Result<String, SelectorError> {
        match self.peek() {
            Some(quote @ ('"' | '\'')) => {
                self.bump();
                let start = self.pos;
                while let Some(c) = self.peek() {
                    if c == quote {
                        let value = self.src[start..self.pos].to_string();
                        self.bump();
                        return Ok(value);
                    }
                    self.bump();
                }
                Err(self.error("unterminated string"))
            }
            _ => self.ident(),
        }
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain(elements: &[Element]) -> Vec<&Element> {
        elements.iter().collect()
    }

    #[test]
    fn test_parse_compound() {
        let sel = Selector::parse("div.table-line.sticky[data-column-id=\"spend\"]").unwrap();
        let el = Element::div()
            .classes("table-line sticky")
            .attr("data-column-id", "spend");
        assert!(sel.matches(&el, &[]));
        assert!(!sel.matches(&Element::span().classes("table-line sticky"), &[]));
    }

    #[test]
    fn test_attribute_presence() {
        let sel: Selector = "[data-table]".parse().unwrap();
        assert!(sel.matches(&Element::div().attr("data-table", ""), &[]));
        assert!(!sel.matches(&Element::div(), &[]));
    }

    #[test]
    fn test_descendant_and_child() {
        let ancestors = [
            Element::div().class("table"),
            Element::div().class("header-row"),
            Element::div().class("inner"),
        ];
        let cell = Element::div().class("table-line");

        let descendant = Selector::parse(".header-row .table-line").unwrap();
        assert!(descendant.matches(&cell, &chain(&ancestors)));

        let child = Selector::parse(".header-row > .table-line").unwrap();
        assert!(!child.matches(&cell, &chain(&ancestors)), "inner div sits between");
        assert!(child.matches(&cell, &chain(&ancestors[..2])));
    }

    #[test]
    fn test_invalid_selectors() {
        assert!(Selector::parse("").is_err());
        assert!(Selector::parse(".").is_err());
        assert!(Selector::parse("[data-table").is_err());
        assert!(Selector::parse("div >").is_err());
        assert!(Selector::parse("#a#b").is_err());
    }
}
