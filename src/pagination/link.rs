//! `Link` header parsing (RFC 8288)
//!
//! Turns a raw header such as
//!
//! ```text
//! <https://api.github.com/user/1/repos?page=2>; rel="next", <https://api.github.com/user/1/repos?page=5>; rel="last"
//! ```
//!
//! into a typed relation → locator mapping.

use reqwest::header::{HeaderMap, LINK};
use std::collections::HashMap;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Link relation type
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Relation {
    Next,
    Prev,
    First,
    Last,
    Other(String),
}

impl Relation {
    /// Parse a relation name (case-insensitive)
    pub fn parse(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "next" => Self::Next,
            "prev" | "previous" => Self::Prev,
            "first" => Self::First,
            "last" => Self::Last,
            other => Self::Other(other.to_string()),
        }
    }

    /// Canonical relation name
    pub fn as_str(&self) -> &str {
        match self {
            Self::Next => "next",
            Self::Prev => "prev",
            Self::First => "first",
            Self::Last => "last",
            Self::Other(name) => name,
        }
    }
}

impl FromStr for Relation {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One link-value of a `Link` header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    /// Target URI, absolute or relative
    pub target: String,
    /// Relation types from the `rel` parameter
    pub relations: Vec<Relation>,
    /// All parameters, names lowercased
    pub params: Vec<(String, String)>,
}

impl Link {
    /// Whether this link carries the given relation
    pub fn has_relation(&self, rel: &Relation) -> bool {
        self.relations.contains(rel)
    }
}

/// Parsed `Link` header
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkHeader {
    raw: String,
    links: Vec<Link>,
}

impl LinkHeader {
    /// Parse a header value
    ///
    /// Malformed link-values are skipped, as are links whose target is
    /// empty or contains whitespace.
    pub fn parse(header: &str) -> Self {
        Self {
            raw: header.to_string(),
            links: parse_links(header),
        }
    }

    /// Read and parse every `Link` header of a response
    ///
    /// Non-ASCII bytes (e.g. a UTF-8 `title`) are decoded lossily rather
    /// than dropping the whole value.
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let values: Vec<String> = headers
            .get_all(LINK)
            .iter()
            .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
            .collect();

        if values.is_empty() {
            return None;
        }

        Some(Self::parse(&values.join(", ")))
    }

    /// The header as received
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Well-formed links, in header order
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// True when no well-formed link was found
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Target of the first link with the given relation
    pub fn get(&self, rel: &Relation) -> Option<&str> {
        self.links
            .iter()
            .find(|link| link.has_relation(rel))
            .map(|link| link.target.as_str())
    }

    /// Target of the `next` link
    pub fn next(&self) -> Option<&str> {
        self.get(&Relation::Next)
    }

    /// Relation → target mapping; the first link for a relation wins
    pub fn relations(&self) -> HashMap<Relation, String> {
        let mut map = HashMap::new();
        for link in &self.links {
            for rel in &link.relations {
                map.entry(rel.clone())
                    .or_insert_with(|| link.target.clone());
            }
        }
        map
    }

    /// Whether the raw header mentions the relation at all
    ///
    /// Unlike [`LinkHeader::get`] this also sees relations attached to
    /// link-values that failed to parse.
    pub fn claims(&self, rel: &Relation) -> bool {
        mentioned_relations(&self.raw).contains(rel)
    }
}

fn parse_links(header: &str) -> Vec<Link> {
    let mut links = Vec::new();
    let mut rest = header;

    loop {
        rest = rest.trim_start_matches(|c: char| c == ',' || c.is_whitespace());
        if rest.is_empty() {
            break;
        }

        let Some(after_open) = rest.strip_prefix('<') else {
            rest = skip_past_separator(rest);
            continue;
        };
        let Some(close) = after_open.find('>') else {
            break;
        };

        let target = &after_open[..close];
        let (params, remaining) = parse_params(&after_open[close + 1..]);
        rest = remaining;

        if target.is_empty() || target.chars().any(char::is_whitespace) {
            continue;
        }

        let relations = params
            .iter()
            .filter(|(key, _)| key == "rel")
            .flat_map(|(_, value)| value.split_whitespace().map(Relation::parse))
            .collect();

        links.push(Link {
            target: target.to_string(),
            relations,
            params,
        });
    }

    links
}

/// Parse `; name=value` pairs up to the next link separator
fn parse_params(input: &str) -> (Vec<(String, String)>, &str) {
    let mut params = Vec::new();
    let mut rest = input;

    loop {
        rest = rest.trim_start();
        let Some(after_semi) = rest.strip_prefix(';') else {
            break;
        };
        let after_semi = after_semi.trim_start();

        let name_end = after_semi
            .find(|c: char| c == '=' || c == ';' || c == ',')
            .unwrap_or(after_semi.len());
        let name = after_semi[..name_end].trim().to_ascii_lowercase();
        rest = &after_semi[name_end..];

        let mut value = String::new();
        if let Some(after_eq) = rest.strip_prefix('=') {
            let after_eq = after_eq.trim_start();
            if let Some(quoted) = after_eq.strip_prefix('"') {
                let (unquoted, remaining) = read_quoted(quoted);
                value = unquoted;
                rest = remaining;
            } else {
                let end = after_eq
                    .find(|c: char| c == ';' || c == ',')
                    .unwrap_or(after_eq.len());
                value = after_eq[..end].trim().to_string();
                rest = &after_eq[end..];
            }
        }

        if !name.is_empty() {
            params.push((name, value));
        }
    }

    if !rest.is_empty() && !rest.starts_with(',') {
        rest = skip_past_separator(rest);
    }

    (params, rest)
}

/// Read a quoted-string body (opening quote already consumed)
fn read_quoted(input: &str) -> (String, &str) {
    let mut value = String::new();
    let mut escaped = false;

    for (i, c) in input.char_indices() {
        if escaped {
            value.push(c);
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == '"' {
            return (value, &input[i + 1..]);
        } else {
            value.push(c);
        }
    }

    (value, "")
}

fn skip_past_separator(input: &str) -> &str {
    match input.find(',') {
        Some(i) => &input[i + 1..],
        None => "",
    }
}

/// Every relation named by a `rel=` parameter anywhere in the raw header
fn mentioned_relations(raw: &str) -> Vec<Relation> {
    let lower = raw.to_ascii_lowercase();
    let mut found = Vec::new();
    let mut rest = lower.as_str();

    while let Some(pos) = rest.find("rel=") {
        let preceded_ok = pos == 0
            || !rest[..pos]
                .chars()
                .next_back()
                .is_some_and(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        let after = &rest[pos + 4..];

        if preceded_ok {
            let value = match after.strip_prefix('"') {
                Some(quoted) => quoted.split('"').next().unwrap_or(""),
                None => after
                    .split(|c: char| c == ';' || c == ',' || c.is_whitespace())
                    .next()
                    .unwrap_or(""),
            };
            found.extend(value.split_whitespace().map(Relation::parse));
        }

        rest = after;
    }

    found
}
