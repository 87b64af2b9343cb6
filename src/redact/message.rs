use crate::error::Result;
use crate::redact::mask::mask_value;
use regex::{Captures, Regex, RegexBuilder};
use std::borrow::Cow;

/// Builds the pattern for one sensitive key.
///
/// Groups: 1 = optionally quoted key plus `=`/`:` separator and at most one
/// whitespace, 2 = optional opening quote, 3 = the value up to the next `;`
/// or `,` (or end of text).
fn key_pattern(key: &str) -> std::result::Result<Regex, regex::Error> {
    let pattern = format!(r#"(['"]?{}['"]?[=:]\s?)(['"]?)(.*?['"]?[^;,]+)"#, regex::escape(key));
    RegexBuilder::new(&pattern).case_insensitive(true).build()
}

fn replace_value(caps: &Captures<'_>) -> String {
    let key = caps.get(1).map_or("", |m| m.as_str());
    let quote = caps.get(2).map_or("", |m| m.as_str());
    let value = caps.get(3).map_or("", |m| m.as_str());
    if key.is_empty() || value.is_empty() {
        return caps[0].to_string();
    }
    format!("{key}{quote}{}", mask_value(value))
}

#[derive(Debug, Clone)]
struct Rule {
    key: String,
    pattern: Regex,
}

/// Masks the values of configured keys wherever they appear in a message.
///
/// The same pattern covers `'key': 'value'`, `"key": "value"`, header-style
/// `Key: value` and cookie-style `key=value;` lists. Keys are applied in the
/// order they were given, each one on the output of the previous one.
#[derive(Debug, Clone, Default)]
pub struct Redactor {
    rules: Vec<Rule>,
}

impl Redactor {
    /// Compiles one case-insensitive rule per key. Blank keys are skipped.
    pub fn new<I, S>(keys: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut rules = Vec::new();
        for key in keys {
            let key = key.as_ref().trim();
            if key.is_empty() {
                continue;
            }
            rules.push(Rule { key: key.to_string(), pattern: key_pattern(key)? });
        }
        Ok(Self { rules })
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Keys in application order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|rule| rule.key.as_str())
    }

    pub fn redact(&self, message: &str) -> String {
        let mut message = message.to_string();
        for rule in &self.rules {
            let replaced = match rule.pattern.replace_all(&message, replace_value) {
                Cow::Owned(replaced) => Some(replaced),
                Cow::Borrowed(_) => None,
            };
            if let Some(replaced) = replaced {
                message = replaced;
            }
        }
        message
    }
}

/// One-shot form of [`Redactor::redact`]. A key whose pattern cannot be
/// compiled leaves the message untouched.
pub fn redact_message<S: AsRef<str>>(message: &str, keys: &[S]) -> String {
    let mut message = message.to_string();
    for key in keys {
        if let Ok(redactor) = Redactor::new([key.as_ref()]) {
            message = redactor.redact(&message);
        }
    }
    message
}
