//! Naming rules shared by the registrar and the stack labels.
//!
//! Parameter names are written in `snake_case` by callers. The template
//! identifier is the camel-cased form and the environment variable is the
//! upper-cased form; both are pure functions of the name.

/// Returns the environment variable name for a snake-case parameter name.
///
/// ```rust
/// assert_eq!(cog_cfn::naming::env_name("slack_api_token"), "SLACK_API_TOKEN");
/// ```
#[must_use]
pub fn env_name(name: &str) -> String {
    name.to_ascii_uppercase()
}

/// Derives the canonical template identifier from a snake-case name.
///
/// The name is split on `_`, the first character of each segment is
/// upper-cased, and the segments are joined without a separator. The rest of
/// each segment is kept as given, so callers are expected to pass lowercase
/// names. Empty segments contribute nothing.
///
/// ```rust
/// use cog_cfn::naming::derive_id;
///
/// assert_eq!(derive_id("cog_allow_self_registration"), "CogAllowSelfRegistration");
/// ```
#[must_use]
pub fn derive_id(name: &str) -> String {
    name.split('_').map(capitalise_first).collect()
}

fn capitalise_first(segment: &str) -> String {
    let mut chars = segment.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// Turns a camel-cased identifier into space separated words.
///
/// A space is inserted between a word character and an immediately following
/// ASCII uppercase letter. Pairs are matched left to right without overlap,
/// so runs of capitals are only split once per pair.
///
/// ```rust
/// use cog_cfn::naming::humanize_id;
///
/// assert_eq!(humanize_id("EmailAddress"), "Email Address");
/// ```
#[must_use]
pub fn humanize_id(id: &str) -> String {
    let mut out = String::with_capacity(id.len() + 4);
    let mut chars = id.chars().peekable();
    while let Some(ch) = chars.next() {
        out.push(ch);
        match chars.peek() {
            Some(&next) if is_word_char(ch) && next.is_ascii_uppercase() => {
                out.push(' ');
                out.push(next);
                chars.next();
            }
            _ => {}
        }
    }
    out
}

const fn is_word_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}
