//! `data-i18n` extraction from HTML documents and fragments.
//!
//! The attribute value is a `;` separated list of tokens. A plain token is a
//! key translating the element's text; `[attr]key` translates the named
//! attribute instead.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::core::KeyCatalog;

pub const I18N_ATTRIBUTE: &str = "data-i18n";

/// Start or end tag, with attributes kept as one raw group.
static TAG_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"<(?:/([A-Za-z][\w:.-]*)\s*|([A-Za-z][\w:.-]*)((?:\s+[^\s"'<>/=]+(?:\s*=\s*(?:"[^"]*"|'[^']*'|[^\s"'=<>`]+))?)*)\s*(/?))>"#,
    )
    .unwrap()
});

static ATTRIBUTE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([^\s"'<>/=]+)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+)))?"#).unwrap()
});

static COMMENT_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").unwrap());

static RAW_TEXT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<(script|style)\b[^>]*>.*?</(?:script|style)\s*>").unwrap()
});

/// `data-i18n="..."` anywhere in a text, tag or not.
static FRAGMENT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)data-i18n\s*=\s*(?:"([^"]*)"|'([^']*)')"#).unwrap()
});

static ENTITY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&(#[xX][0-9a-fA-F]+|#[0-9]+|[a-zA-Z]+);").unwrap());

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

#[derive(Debug)]
enum Tag {
    Start {
        name: String,
        attributes: Vec<(String, String)>,
        end: usize,
        self_closing: bool,
    },
    End {
        name: String,
        start: usize,
    },
}

impl Tag {
    fn attribute(&self, wanted: &str) -> Option<&str> {
        match self {
            Tag::Start { attributes, .. } => attributes
                .iter()
                .find(|(name, _)| name == wanted)
                .map(|(_, value)| value.as_str()),
            Tag::End { .. } => None,
        }
    }
}

/// One `;` separated entry of a `data-i18n` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum I18nToken<'a> {
    /// `key`: translates the element's text.
    Text(&'a str),
    /// `[attr]key`: translates the named attribute.
    Attribute { name: &'a str, key: &'a str },
}

impl<'a> I18nToken<'a> {
    pub fn key(&self) -> &'a str {
        match self {
            I18nToken::Text(key) | I18nToken::Attribute { key, .. } => key,
        }
    }
}

/// Split a `data-i18n` value into tokens. Empty and malformed entries are dropped.
pub fn parse_tokens(value: &str) -> Vec<I18nToken<'_>> {
    value
        .split(';')
        .filter(|t| !t.is_empty())
        .filter_map(|token| match token.strip_prefix('[') {
            Some(rest) => rest
                .split_once(']')
                .map(|(name, key)| I18nToken::Attribute { name, key }),
            None => Some(I18nToken::Text(token)),
        })
        .collect()
}

/// Extract keys from an HTML document, with element text or attribute values as defaults.
pub fn extract_html(html: &str) -> KeyCatalog {
    let mut catalog = KeyCatalog::new();
    if !html.contains(I18N_ATTRIBUTE) {
        return catalog;
    }

    let html = COMMENT_REGEX.replace_all(html, "");
    let html = RAW_TEXT_REGEX.replace_all(&html, "");
    let tags = tokenize(&html);

    for (position, tag) in tags.iter().enumerate() {
        let Some(value) = tag.attribute(I18N_ATTRIBUTE) else {
            continue;
        };
        for token in parse_tokens(value) {
            match token {
                I18nToken::Attribute { name, key } => {
                    let default_text = tag
                        .attribute(&name.to_ascii_lowercase())
                        .unwrap_or_default()
                        .trim();
                    catalog.insert(key, default_text);
                }
                I18nToken::Text(key) => {
                    catalog.insert(key, element_text(&html, &tags, position));
                }
            }
        }
    }

    catalog
}

/// Extract keys from a `data-i18n` attribute value; each key is its own default text.
pub fn extract_attribute_value(value: &str) -> KeyCatalog {
    let mut catalog = KeyCatalog::new();
    for token in parse_tokens(value) {
        catalog.insert(token.key(), token.key());
    }
    catalog
}

/// Extract keys from markup that may only be a fragment, e.g. a string built in a script.
pub fn extract_markup_text(text: &str) -> KeyCatalog {
    let mut catalog = KeyCatalog::new();
    if !text.contains(I18N_ATTRIBUTE) {
        return catalog;
    }

    catalog.extend(extract_html(text));
    for caps in FRAGMENT_REGEX.captures_iter(text) {
        let value = caps.get(1).or_else(|| caps.get(2)).map_or("", |m| m.as_str());
        catalog.extend(extract_attribute_value(value));
    }
    catalog
}

fn tokenize(html: &str) -> Vec<Tag> {
    TAG_REGEX
        .captures_iter(html)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            if let Some(name) = caps.get(1) {
                return Some(Tag::End {
                    name: name.as_str().to_ascii_lowercase(),
                    start: whole.start(),
                });
            }
            let name = caps.get(2)?.as_str().to_ascii_lowercase();
            let attributes = caps
                .get(3)
                .map(|m| parse_attributes(m.as_str()))
                .unwrap_or_default();
            Some(Tag::Start {
                name,
                attributes,
                end: whole.end(),
                self_closing: caps.get(4).is_some_and(|m| !m.as_str().is_empty()),
            })
        })
        .collect()
}

fn parse_attributes(raw: &str) -> Vec<(String, String)> {
    ATTRIBUTE_REGEX
        .captures_iter(raw)
        .map(|caps| {
            let name = caps[1].to_ascii_lowercase();
            let value = caps
                .get(2)
                .or_else(|| caps.get(3))
                .or_else(|| caps.get(4))
                .map(|m| decode_entities(m.as_str()))
                .unwrap_or_default();
            (name, value)
        })
        .collect()
}

/// Text content of the element opened by `tags[position]`, inner tags stripped.
fn element_text(html: &str, tags: &[Tag], position: usize) -> String {
    let Tag::Start {
        name,
        end: content_start,
        self_closing,
        ..
    } = &tags[position]
    else {
        return String::new();
    };
    if *self_closing || VOID_ELEMENTS.contains(&name.as_str()) {
        return String::new();
    }

    let mut depth = 0usize;
    for tag in &tags[position + 1..] {
        match tag {
            Tag::Start {
                name: inner,
                self_closing: false,
                ..
            } if inner == name => depth += 1,
            Tag::End { name: inner, start } if inner == name => {
                if depth == 0 {
                    let inner_html = &html[*content_start..*start];
                    let text = TAG_REGEX.replace_all(inner_html, "");
                    return decode_entities(&text).trim().to_string();
                }
                depth -= 1;
            }
            _ => {}
        }
    }
    String::new()
}

fn decode_entities(text: &str) -> String {
    ENTITY_REGEX
        .replace_all(text, |caps: &Captures| {
            let entity = &caps[1];
            let decoded = if let Some(hex) = entity
                .strip_prefix("#x")
                .or_else(|| entity.strip_prefix("#X"))
            {
                u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
            } else if let Some(dec) = entity.strip_prefix('#') {
                dec.parse::<u32>().ok().and_then(char::from_u32)
            } else {
                match entity {
                    "amp" => Some('&'),
                    "lt" => Some('<'),
                    "gt" => Some('>'),
                    "quot" => Some('"'),
                    "apos" => Some('\''),
                    "nbsp" => Some('\u{a0}'),
                    _ => None,
                }
            };
            decoded.map_or_else(|| caps[0].to_string(), String::from)
        })
        .into_owned()
}
