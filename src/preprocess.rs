//! Tweet text cleanup applied before classification.

use std::sync::LazyLock;

use regex::Regex;

static URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"http\S+|www\S+|https\S+").expect("URL pattern is valid")
});

static MENTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@\w+|#").expect("mention pattern is valid"));

static NON_ALNUM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9\s]").expect("character class pattern is valid"));

/// One pass of the three substitutions followed by lowercasing.
fn clean_pass(text: &str) -> String {
    let text = URL_RE.replace_all(text, "");
    let text = MENTION_RE.replace_all(&text, "");
    let text = NON_ALNUM_RE.replace_all(&text, "");
    text.to_lowercase()
}

/// Normalizes tweet text for the sarcasm model.
///
/// The substitutions run in a fixed order: URLs are removed, then `@mentions`
/// and `#` markers, then every character outside `[A-Za-z0-9\s]`. The result is
/// lowercased. Whitespace left behind by removed tokens is kept as is.
///
/// Lowercasing or dropping punctuation can expose a new URL prefix
/// (`HTTPfoo`, `ht.tpfoo`), so passes repeat until the text stops changing.
/// Every pass only deletes characters, so this terminates, and ordinary
/// input settles after the first pass.
///
/// # Example
///
/// ```rust
/// use sarcofizz::preprocess;
///
/// assert_eq!(preprocess("Check http://x.co @user #tag!!"), "check   tag");
/// assert_eq!(preprocess(""), "");
/// ```
pub fn preprocess(text: &str) -> String {
    let mut current = clean_pass(text);
    loop {
        let next = clean_pass(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}
