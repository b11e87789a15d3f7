#![forbid(unsafe_code)]

//! Attribute selectors for tour targets.
//!
//! # Syntax
//!
//! - `nav` - element by tag
//! - `[data-tutorial="claim-button"]` - attribute equals
//! - `[placeholder*="Search"]` - attribute contains
//! - `[href]` - attribute present
//! - `input[placeholder*="Search"][type="text"]` - tag plus chained filters
//!
//! Values may be double-quoted, single-quoted, or bare identifiers. Quoted
//! values may contain `]`. Combinators and pseudo-classes are rejected.
//!
//! # Example
//! ```
//! use zip_tour::selector::Selector;
//!
//! let sel = Selector::parse(r#"a[href="/profile"]"#).unwrap();
//! assert!(sel.matches("a", &[("href".into(), "/profile".into())]));
//! assert!(!sel.matches("button", &[("href".into(), "/profile".into())]));
//! ```

use std::fmt;
use std::iter::Peekable;
use std::str::{CharIndices, FromStr};

/// Errors that can occur during selector parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorError {
    /// The selector is empty or only whitespace.
    Empty,
    /// A character that cannot start or continue a selector part.
    UnexpectedChar { ch: char, position: usize },
    /// `[` without a matching `]`.
    UnclosedBracket { position: usize },
    /// A quoted value without its closing quote.
    UnterminatedValue { position: usize },
    /// `[` with no attribute name.
    MissingAttribute { position: usize },
}

impl fmt::Display for SelectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectorError::Empty => write!(f, "empty selector"),
            SelectorError::UnexpectedChar { ch, position } => {
                write!(f, "unexpected '{ch}' at position {position}")
            }
            SelectorError::UnclosedBracket { position } => {
                write!(f, "unclosed '[' at position {position}")
            }
            SelectorError::UnterminatedValue { position } => {
                write!(f, "unterminated quoted value at position {position}")
            }
            SelectorError::MissingAttribute { position } => {
                write!(f, "missing attribute name at position {position}")
            }
        }
    }
}

impl std::error::Error for SelectorError {}

/// How an attribute value is compared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrMatch {
    Exists,
    Equals(String),
    Contains(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttrFilter {
    pub name: String,
    pub matcher: AttrMatch,
}

impl AttrFilter {
    fn accepts(&self, value: Option<&str>) -> bool {
        match (&self.matcher, value) {
            (_, None) => false,
            (AttrMatch::Exists, Some(_)) => true,
            (AttrMatch::Equals(want), Some(have)) => have == want,
            (AttrMatch::Contains(want), Some(have)) => have.contains(want.as_str()),
        }
    }
}

/// A compound selector: optional tag plus attribute filters, all of which
/// must match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    source: String,
    tag: Option<String>,
    filters: Vec<AttrFilter>,
}

type Chars<'a> = Peekable<CharIndices<'a>>;

fn is_ident_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '-' || ch == '_'
}

fn take_ident(chars: &mut Chars<'_>) -> String {
    let mut ident = String::new();
    while let Some(&(_, ch)) = chars.peek() {
        if !is_ident_char(ch) {
            break;
        }
        ident.push(ch);
        chars.next();
    }
    ident
}

fn skip_spaces(chars: &mut Chars<'_>) {
    while chars.peek().is_some_and(|&(_, ch)| ch == ' ') {
        chars.next();
    }
}

impl Selector {
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        let source = input.trim();
        if source.is_empty() {
            return Err(SelectorError::Empty);
        }

        let mut chars = source.char_indices().peekable();
        let tag = Some(take_ident(&mut chars)).filter(|t| !t.is_empty());
        let mut filters = Vec::new();

        while let Some((position, ch)) = chars.next() {
            if ch != '[' {
                return Err(SelectorError::UnexpectedChar { ch, position });
            }
            filters.push(Self::parse_filter(&mut chars, position)?);
        }

        Ok(Self {
            source: source.to_owned(),
            tag,
            filters,
        })
    }

    /// Parse the inside of `[...]`; `open` is the position of the `[`.
    fn parse_filter(chars: &mut Chars<'_>, open: usize) -> Result<AttrFilter, SelectorError> {
        skip_spaces(chars);
        let name = take_ident(chars);
        if name.is_empty() {
            return match chars.peek() {
                None => Err(SelectorError::UnclosedBracket { position: open }),
                Some(_) => Err(SelectorError::MissingAttribute { position: open }),
            };
        }
        skip_spaces(chars);

        let contains = match chars.next() {
            Some((_, ']')) => {
                return Ok(AttrFilter {
                    name,
                    matcher: AttrMatch::Exists,
                });
            }
            Some((_, '=')) => false,
            Some((position, '*')) => match chars.next() {
                Some((_, '=')) => true,
                Some((position, ch)) => return Err(SelectorError::UnexpectedChar { ch, position }),
                None => return Err(SelectorError::UnexpectedChar { ch: '*', position }),
            },
            Some((position, ch)) => return Err(SelectorError::UnexpectedChar { ch, position }),
            None => return Err(SelectorError::UnclosedBracket { position: open }),
        };
        skip_spaces(chars);

        let value = match chars.peek().copied() {
            Some((position, quote @ ('"' | '\''))) => {
                chars.next();
                let mut value = String::new();
                loop {
                    match chars.next() {
                        Some((_, ch)) if ch == quote => break,
                        Some((_, ch)) => value.push(ch),
                        None => return Err(SelectorError::UnterminatedValue { position }),
                    }
                }
                value
            }
            _ => take_ident(chars),
        };
        skip_spaces(chars);

        match chars.next() {
            Some((_, ']')) => {}
            Some((position, ch)) => return Err(SelectorError::UnexpectedChar { ch, position }),
            None => return Err(SelectorError::UnclosedBracket { position: open }),
        }

        let matcher = if contains {
            AttrMatch::Contains(value)
        } else {
            AttrMatch::Equals(value)
        };
        Ok(AttrFilter { name, matcher })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn filters(&self) -> &[AttrFilter] {
        &self.filters
    }

    /// Whether an element with this tag and attributes matches.
    pub fn matches(&self, tag: &str, attrs: &[(String, String)]) -> bool {
        if self.tag.as_deref().is_some_and(|want| !want.eq_ignore_ascii_case(tag)) {
            return false;
        }
        self.filters.iter().all(|filter| {
            let value = attrs
                .iter()
                .find(|(name, _)| *name == filter.name)
                .map(|(_, value)| value.as_str());
            filter.accepts(value)
        })
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
