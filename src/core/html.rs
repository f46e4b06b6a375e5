// src/core/html.rs
//! Parsed-document helpers on top of `scraper`.
//!
//! A `Document` wraps one fetched page. Everything downstream works on
//! `Scope`s: either the whole document or a titled section of it. Lookups
//! that find nothing return `None`; only `Document::parse` can fail.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use super::sanitize::{fold, normalize_ws};
use crate::config::consts::{CARD_SELECTOR, HEADING_SELECTOR, PRIMARY_HEADING_SELECTOR};
use crate::error::{Result, ScrapeError};

/// A bounded region of a document that label lookups run inside.
pub type Scope<'a> = ElementRef<'a>;

/// Compile a selector from the constant markup table.
pub(crate) fn selector(css: &'static str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| panic!("bad static selector {css:?}: {e:?}"))
}

static HEADINGS: LazyLock<Selector> = LazyLock::new(|| selector(HEADING_SELECTOR));
static PRIMARY_HEADING: LazyLock<Selector> = LazyLock::new(|| selector(PRIMARY_HEADING_SELECTOR));
static CARDS: LazyLock<Selector> = LazyLock::new(|| selector(CARD_SELECTOR));

pub struct Document {
    html: Html,
}

impl Document {
    /// Parse fetched text. Rejects input that is not a document at all:
    /// empty, binary (NUL bytes) or free of any markup.
    pub fn parse(text: &str) -> Result<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(ScrapeError::DocumentUnparseable(s!("empty input")));
        }
        if trimmed.contains('\0') {
            return Err(ScrapeError::DocumentUnparseable(s!("binary content")));
        }
        if !trimmed.contains('<') {
            return Err(ScrapeError::DocumentUnparseable(s!("no markup found")));
        }
        Ok(Self { html: Html::parse_document(text) })
    }

    pub fn root(&self) -> Scope<'_> {
        self.html.root_element()
    }

    pub fn select_first(&self, sel: &Selector) -> Option<ElementRef<'_>> {
        self.html.select(sel).next()
    }

    pub fn select_all<'a>(&'a self, sel: &'a Selector) -> impl Iterator<Item = ElementRef<'a>> + 'a {
        self.html.select(sel)
    }

    /// Text of the page's main `<h1>`, if present and non-empty.
    pub fn primary_heading(&self) -> Option<String> {
        self.select_first(&PRIMARY_HEADING)
            .map(text_of)
            .filter(|t| !t.is_empty())
    }

    /// Titled sub-region, see [`section`].
    pub fn section(&self, header: &str) -> Option<Scope<'_>> {
        section(self, header)
    }
}

/// Locate the details card titled by the first heading whose text contains
/// `header` (case-insensitive). No heading, or a heading outside any card,
/// both yield `None`.
pub fn section<'a>(doc: &'a Document, header: &str) -> Option<Scope<'a>> {
    let needle = fold(header);
    let Some(heading) = doc
        .select_all(&HEADINGS)
        .find(|h| fold(&raw_text(*h)).contains(&needle))
    else {
        debug!(header, "section heading not found");
        return None;
    };

    let card = heading
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|el| CARDS.matches(el));
    if card.is_none() {
        debug!(header, "section heading has no enclosing card");
    }
    card
}

/// Whitespace-normalized visible text.
pub fn text_of(el: ElementRef<'_>) -> String {
    normalize_ws(&raw_text(el))
}

pub fn raw_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>()
}

/// First descendant of `scope` matching `sel`, as text.
pub fn first_text(scope: Scope<'_>, sel: &Selector) -> Option<String> {
    scope.select(sel).next().map(text_of)
}
