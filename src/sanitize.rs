//! Display name to object-key-safe file name.
//!
//! A single pass applies the rules below in order, each on the output of the
//! previous one:
//!
//! 1. drop one leading whitespace character and one trailing `.`
//! 2. collapse human separators (`". "`, `", "`, `" : "`, `" – "`, ...) into `-`
//! 3. collapse `…` followed by whitespace into `_`
//! 4. collapse runs of `-`, `|` and `\` into a single `-`
//! 5. ` & ` becomes `_and_`, any other `&` becomes `n`
//! 6. remove punctuation that is unsafe in an object key
//! 7. remaining whitespace becomes `_`
//! 8. NFD decomposition, combining diacritics (U+0300..=U+036F) removed
//! 9. bidi embedding controls (U+202A..=U+202C) removed
//!
//! Removals in steps 6 and 8 can leave behind input that an earlier step
//! would have rewritten (`-!-` becomes `--`), so [`sanitize`] repeats the pass
//! until the output is stable.

use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

/// Separators that collapse into `-`, in application order.
const SEPARATORS: &[&str] = &[
    r"\.\s",
    r",\s",
    r"\s::\s",
    r"\s:\s",
    r":\s",
    r"\s-\s",
    r"\s--\s",
    r"\s–\s",
    r"\s––\s",
    r"\s—\s",
    r"\s——\s",
];

/// Characters removed outright.
const FORBIDDEN: &[char] = &[
    '!', '@', '#', '$', '%', '^', '*', '(', ')', '+', '=', '[', ']', '{', '}', ';', '\'', '’',
    ':', '"', '”', '“', ',', '.', '<', '>', '/', '?',
];

static LEADING_SPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s").expect("leading whitespace pattern"));
static TRAILING_DOT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.$").expect("trailing dot pattern"));
static SEPARATOR_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    SEPARATORS
        .iter()
        .map(|pattern| Regex::new(pattern).expect("separator pattern"))
        .collect()
});
static ELLIPSIS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"…\s").expect("ellipsis pattern"));
static DASH_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-|\\]+").expect("dash run pattern"));
static SPACED_AMPERSAND: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s&\s").expect("ampersand pattern"));
static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s").expect("whitespace pattern"));

fn is_combining_diacritic(c: char) -> bool {
    ('\u{0300}'..='\u{036F}').contains(&c)
}

fn is_bidi_embedding(c: char) -> bool {
    ('\u{202A}'..='\u{202C}').contains(&c)
}

fn sanitize_pass(name: &str) -> String {
    let name = LEADING_SPACE.replace(name, "");
    let mut name = TRAILING_DOT.replace(&name, "").into_owned();

    for separator in SEPARATOR_PATTERNS.iter() {
        name = separator.replace_all(&name, "-").into_owned();
    }

    let name = ELLIPSIS.replace_all(&name, "_");
    let name = DASH_RUN.replace_all(&name, "-");
    let name = SPACED_AMPERSAND.replace_all(&name, "_and_").replace('&', "n");
    let name: String = name.chars().filter(|c| !FORBIDDEN.contains(c)).collect();
    let name = WHITESPACE.replace_all(&name, "_");

    name.nfd()
        .filter(|c| !is_combining_diacritic(*c))
        .filter(|c| !is_bidi_embedding(*c))
        .collect()
}

/// Convert a human-readable record name into a file name ready for upload.
///
/// Pure and idempotent: `sanitize(&sanitize(x)) == sanitize(x)`.
pub fn sanitize(display_name: &str) -> String {
    let mut current = sanitize_pass(display_name);
    // Every pass after the first only removes or reorders characters.
    loop {
        let next = sanitize_pass(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}
