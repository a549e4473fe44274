use once_cell::sync::Lazy;
use regex::Regex;

pub const PHONE_PREFIX: &str = "+251";
pub const PHONE_MAX_LEN: usize = 13;

static NAME_REJECT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-zA-Z\s\-']").expect("name pattern is valid"));
static PHONE_REJECT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^0-9+]").expect("phone pattern is valid"));
static PHONE_PREFIX_PARTS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\+|251").expect("prefix pattern is valid"));
static EMAIL_REJECT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9_@.\-+]").expect("email pattern is valid"));

/// Keys that always reach the phone field.
const PHONE_EDIT_KEYS: [&str; 8] = [
    "Backspace",
    "Delete",
    "ArrowLeft",
    "ArrowRight",
    "Tab",
    "Home",
    "End",
    "Enter",
];

/// Letters, whitespace, hyphens and apostrophes only.
pub fn sanitize_name(raw: &str) -> String {
    NAME_REJECT.replace_all(raw, "").into_owned()
}

/// Word characters plus `@ . - + _`. Applied to pasted email text only.
pub fn sanitize_email(raw: &str) -> String {
    EMAIL_REJECT.replace_all(raw, "").into_owned()
}

/// Digits behind a forced `+251`, at most 13 characters in total.
///
/// A value that does not already start with the prefix loses every `+` and
/// every `251` run before the prefix is put back in front.
pub fn normalize_phone(raw: &str) -> String {
    let mut value = PHONE_REJECT.replace_all(raw, "").into_owned();
    if !value.starts_with(PHONE_PREFIX) {
        let rest = PHONE_PREFIX_PARTS.replace_all(&value, "");
        value = format!("{PHONE_PREFIX}{rest}");
    }
    // only ASCII digits and '+' survive, so byte truncation is safe
    value.truncate(PHONE_MAX_LEN);
    value
}

/// A keydown on the phone field.
#[derive(Debug, Clone, Copy)]
pub struct KeyPress<'a> {
    pub key: &'a str,
    /// Ctrl or Meta held: copy, paste and select-all chords.
    pub command: bool,
    /// Caret position in the field.
    pub caret: usize,
}

/// Whether a key may reach the phone field. Rejected keys get `preventDefault`.
pub fn phone_key_allowed(press: KeyPress<'_>, current: &str) -> bool {
    if press.command || PHONE_EDIT_KEYS.contains(&press.key) {
        return true;
    }
    if press.key == "+" {
        return press.caret == 0 && !current.contains('+');
    }
    let mut chars = press.key.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if c.is_ascii_digit())
}

/// Selection inside a text field, in UTF-16 code units as the DOM reports it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    pub start: Option<u32>,
    pub end: Option<u32>,
}

impl Selection {
    pub fn caret(at: u32) -> Self {
        Self {
            start: Some(at),
            end: Some(at),
        }
    }
}

/// Replaces the selected range of `current` with `insert`.
/// Without a known selection the text goes at the end.
pub fn splice(current: &str, selection: Selection, insert: &str) -> String {
    let end_of_text = current.len();
    let start = selection
        .start
        .map(|at| utf16_to_byte(current, at))
        .unwrap_or(end_of_text);
    let end = selection
        .end
        .map(|at| utf16_to_byte(current, at))
        .unwrap_or(start)
        .max(start);

    let mut out = String::with_capacity(current.len() + insert.len());
    out.push_str(&current[..start]);
    out.push_str(insert);
    out.push_str(&current[end..]);
    out
}

fn utf16_to_byte(s: &str, offset: u32) -> usize {
    let mut units = 0u32;
    for (idx, ch) in s.char_indices() {
        if units >= offset {
            return idx;
        }
        units += ch.len_utf16() as u32;
    }
    s.len()
}
