//! Field normalizers shared by the catalog adapters and the resolver

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Node, Selector};

/// ISO-639 codes (1, 2/B and 2/T) to display labels.
static LANGUAGE_LABELS: &[(&str, &str)] = &[
    ("en", "English"),
    ("eng", "English"),
    ("fr", "Français"),
    ("fre", "Français"),
    ("fra", "Français"),
    ("es", "Español"),
    ("spa", "Español"),
    ("de", "Deutsch"),
    ("ger", "Deutsch"),
    ("deu", "Deutsch"),
    ("it", "Italiano"),
    ("ita", "Italiano"),
    ("pt", "Português"),
    ("por", "Português"),
    ("nl", "Nederlands"),
    ("dut", "Nederlands"),
    ("nld", "Nederlands"),
    ("la", "Latina"),
    ("lat", "Latina"),
    ("ja", "日本語"),
    ("jpn", "日本語"),
];

/// Look up the display label of a short language code, ignoring case.
pub fn language_label(code: &str) -> Option<&'static str> {
    let code = code.trim().to_lowercase();
    LANGUAGE_LABELS
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, label)| *label)
}

/// Short codes become their label; long forms and unknown codes pass
/// through unchanged.
pub fn normalize_language(value: &str) -> String {
    let value = value.trim();
    if value.chars().count() <= 3 {
        if let Some(label) = language_label(value) {
            return label.to_string();
        }
    }
    value.to_string()
}

/// Collapse runs of whitespace (including newlines) into single spaces.
pub fn collapse_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

// Role vocabulary of the national catalog (French cataloguing rules).
static ROLE_SUFFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\s+(?:auteur du texte|auteur|traduct(?:eur|rice)|préfaci(?:er|ère)|postfaci(?:er|ère)|illustrat(?:eur|rice)|éditeur scientifique|éditeur|direct(?:eur|rice) de (?:la )?publication|adaptat(?:eur|rice)|commentat(?:eur|rice)|annotat(?:eur|rice)|dessinat(?:eur|rice)|scénariste|coloriste|photographe|compilat(?:eur|rice))[\s.]*$",
    )
    .expect("role suffix pattern is valid")
});

// "(1948-....)", "(1900-1944)", "(1905?-1980)."
static DATE_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*\(\s*\d[^)]*\)[\s.]*$").expect("date suffix pattern is valid"));

// Period closing a full word; the one closing an initial ("R.", "R.R.") stays.
static WORD_PERIOD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\p{L}{2,})\.$").expect("word period pattern is valid"));

/// Remove trailing role words and birth/death parentheticals from a
/// catalog creator value, e.g. `Hugo, Victor (1802-1885). Auteur du texte`.
pub fn strip_author_role(value: &str) -> String {
    let original = collapse_whitespace(value);
    let mut name = original.clone();
    loop {
        let before = name.len();
        name = ROLE_SUFFIX.replace(&name, "").into_owned();
        name = DATE_SUFFIX.replace(&name, "").into_owned();
        if name.len() == before {
            break;
        }
    }
    let name = name.trim_end_matches([',', ';', ' ']);
    if name.len() == original.len() {
        return name.to_string();
    }
    WORD_PERIOD.replace(name, "$1").into_owned()
}

static ISBN13_RUN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:^|[^\d])(97[89](?:[\s-]*\d){9}[\s-]*[\dXx])").expect("isbn pattern is valid")
});

/// First ISBN-13 found in a list of free-form identifier values, cleaned to
/// digits and `X`. Archival resource keys are skipped.
pub fn isbn_from_identifiers<'a, I>(identifiers: I) -> Option<String>
where
    I: IntoIterator<Item = &'a str>,
{
    identifiers
        .into_iter()
        .filter(|id| !id.contains("ark:"))
        .find_map(|id| ISBN13_RUN.captures(id).and_then(|c| c.get(1)))
        .map(|m| {
            m.as_str()
                .chars()
                .filter(|c| c.is_ascii_digit() || *c == 'X' || *c == 'x')
                .map(|c| c.to_ascii_uppercase())
                .collect()
        })
}

/// Pull the first paragraph of the "read more" block out of an edition
/// page. Line breaks become newlines; entities are decoded by the parser.
pub fn scrape_description(html: &str) -> Option<String> {
    let selector = Selector::parse(".read-more__content p").ok()?;
    let document = Html::parse_document(html);
    let paragraph = document.select(&selector).next()?;

    let mut text = String::new();
    for node in paragraph.descendants() {
        match node.value() {
            Node::Text(t) => text.push_str(t),
            Node::Element(el) if el.name() == "br" => text.push('\n'),
            _ => {}
        }
    }

    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}
