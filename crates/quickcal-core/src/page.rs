//! HTML page model.
//!
//! A [`Document`] is the markup of a loaded page plus the address it was
//! loaded from. It exposes the views the rest of the crate reads: the page
//! title, the visible text, and `datetime` attributes in document order.
//! Matching is regex based and tolerant of sloppy markup.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

/// Userscript-style match patterns of the pages the overlay activates on.
pub const SITE_PATTERNS: &[&str] = &["https://fullcast.jp/*", "http://fullcast.jp/*"];

/// Host the overlay activates on.
const SITE_HOST: &str = "fullcast.jp";

static TITLE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<title\b[^>]*>(.*?)</title\s*>").expect("Invalid title regex")
});

static BODY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<body\b[^>]*>(.*)").expect("Invalid body regex"));

/// Elements whose content is never rendered as text.
static HIDDEN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?is)<!--.*?-->|<script\b[^>]*>.*?</script\s*>|<style\b[^>]*>.*?</style\s*>|<noscript\b[^>]*>.*?</noscript\s*>|<template\b[^>]*>.*?</template\s*>",
    )
    .expect("Invalid hidden element regex")
});

static TAG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").expect("Invalid tag regex"));

static WHITESPACE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t\r\n\u{a0}]+").expect("Invalid whitespace regex"));

static DATETIME_ATTR_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)<[a-z][a-z0-9-]*(?:\s[^>]*?)?\sdatetime\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s>"']+))"#,
    )
    .expect("Invalid datetime attribute regex")
});

static ENTITY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(?:#(\d{1,7})|#[xX]([0-9a-fA-F]{1,6})|([a-zA-Z]+));")
        .expect("Invalid entity regex")
});

/// A loaded HTML page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    url: String,
    markup: String,
}

impl Document {
    /// Creates a document from its address and markup.
    pub fn new(url: impl Into<String>, markup: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            markup: markup.into(),
        }
    }

    /// Returns the address the page was loaded from.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the raw markup.
    pub fn markup(&self) -> &str {
        &self.markup
    }

    /// Consumes the document and returns its markup.
    pub fn into_markup(self) -> String {
        self.markup
    }

    pub(crate) fn markup_mut(&mut self) -> &mut String {
        &mut self.markup
    }

    /// Returns the page title with entities decoded and whitespace collapsed.
    ///
    /// Returns an empty string if the page has no `<title>`.
    pub fn title(&self) -> String {
        TITLE_REGEX
            .captures(&self.markup)
            .and_then(|caps| caps.get(1))
            .map(|m| collapse_whitespace(&decode_entities(m.as_str())))
            .unwrap_or_default()
    }

    /// Returns the rendered text of the page body.
    ///
    /// Comments, scripts, styles and templates are dropped, tags become
    /// whitespace and entities are decoded. Falls back to the whole markup
    /// when there is no `<body>` tag.
    pub fn text(&self) -> String {
        let visible = HIDDEN_REGEX.replace_all(&self.markup, " ");
        let body = BODY_REGEX
            .captures(&visible)
            .and_then(|caps| caps.get(1))
            .map_or(&*visible, |m| m.as_str());
        let stripped = TAG_REGEX.replace_all(body, " ");
        collapse_whitespace(&decode_entities(&stripped))
    }

    /// Returns every `datetime` attribute value in document order.
    pub fn datetime_attributes(&self) -> Vec<String> {
        let visible = HIDDEN_REGEX.replace_all(&self.markup, " ");
        DATETIME_ATTR_REGEX
            .captures_iter(&visible)
            .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)).or_else(|| caps.get(3)))
            .map(|m| decode_entities(m.as_str()))
            .collect()
    }

    /// Returns `true` if an element with the given `id` is present.
    pub fn has_element_id(&self, id: &str) -> bool {
        let pattern = format!(r#"(?i)\sid\s*=\s*["']?{}["'\s>/]"#, regex::escape(id));
        Regex::new(&pattern)
            .map(|re| re.is_match(&self.markup))
            .unwrap_or(false)
    }

    /// Returns `true` if the page address is on the activation site.
    pub fn is_on_site(&self) -> bool {
        matches_site(&self.url)
    }
}

/// Checks whether an address matches one of [`SITE_PATTERNS`].
///
/// Both `http` and `https` are accepted, the host must be exactly
/// `fullcast.jp`.
pub fn matches_site(address: &str) -> bool {
    let Ok(parsed) = Url::parse(address.trim()) else {
        return false;
    };
    matches!(parsed.scheme(), "http" | "https") && parsed.host_str() == Some(SITE_HOST)
}

fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_REGEX.replace_all(text, " ").trim().to_string()
}

/// Decodes numeric references and the common named entities.
///
/// Unknown entities are left untouched.
fn decode_entities(text: &str) -> String {
    ENTITY_REGEX
        .replace_all(text, |caps: &regex::Captures<'_>| {
            let decoded = if let Some(dec) = caps.get(1) {
                dec.as_str().parse().ok().and_then(char::from_u32)
            } else if let Some(hex) = caps.get(2) {
                u32::from_str_radix(hex.as_str(), 16)
                    .ok()
                    .and_then(char::from_u32)
            } else {
                caps.get(3).and_then(|name| named_entity(name.as_str()))
            };
            decoded.map_or_else(|| caps[0].to_string(), |c| c.to_string())
        })
        .into_owned()
}

fn named_entity(name: &str) -> Option<char> {
    Some(match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{a0}',
        "ensp" | "emsp" | "thinsp" => ' ',
        "ndash" => '–',
        "mdash" => '—',
        "yen" => '¥',
        "copy" => '©',
        _ => return None,
    })
}
