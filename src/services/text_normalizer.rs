use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("WHITESPACE_REGEX is a valid regex pattern"));

// Page chrome that scraped problem pages surround the statement with.
static BOILERPLATE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:sign in|register|subscribe|premium|discuss|solutions|submissions)\b")
        .expect("BOILERPLATE_REGEX is a valid regex pattern")
});

fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_REGEX.replace_all(text, " ").into_owned()
}

/// Collapses whitespace runs, drops standalone boilerplate tokens and trims.
///
/// Normalizing already-normalized text returns it unchanged.
pub fn normalize(text: &str) -> String {
    let mut current = collapse_whitespace(text);
    // Removal can join fragments into a new token ("Sign Sign in in").
    while BOILERPLATE_REGEX.is_match(&current) {
        let stripped = BOILERPLATE_REGEX.replace_all(&current, "");
        current = collapse_whitespace(&stripped);
    }
    current.trim().to_string()
}
