//! Options passed to judge packs.
//!
//! An explicit mapping from lowercased names to typed values, with numeric
//! coercion applied once at construction. Rendering for logs masks long
//! values, since options routinely carry tokens.

use std::fmt;

/// One option value: coerced to an integer when purely digits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptValue {
    Int(i64),
    Str(String),
}

impl OptValue {
    /// Integer value, if this option is numeric.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            Self::Str(_) => None,
        }
    }

    /// String value, if this option is textual.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Int(_) => None,
            Self::Str(s) => Some(s),
        }
    }
}

impl fmt::Display for OptValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{}", n),
            Self::Str(s) => write!(f, "{}", s),
        }
    }
}

/// Named options, insertion order preserved.
#[derive(Debug, Clone, Default)]
pub struct Options {
    entries: Vec<(String, OptValue)>,
}

impl Options {
    /// Build from `k=v` pairs; a pair without `=` gets the value `"true"`.
    pub fn new<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut options = Self::default();
        for pair in pairs {
            options.put(pair.as_ref());
        }
        options
    }

    /// Build from a single comma-joined string, like `"a=1,b=42"`.
    pub fn parse(joined: &str) -> Self {
        Self::new(joined.split(',').filter(|p| !p.trim().is_empty()))
    }

    /// Build from explicit key/value pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut options = Self::default();
        for (key, value) in pairs {
            options.insert(key.as_ref(), value.as_ref());
        }
        options
    }

    fn put(&mut self, pair: &str) {
        match pair.split_once('=') {
            Some((key, value)) => self.insert(key, value),
            None => self.insert(pair, "true"),
        }
    }

    fn insert(&mut self, key: &str, value: &str) {
        let key = key.trim().to_lowercase();
        if key.is_empty() {
            return;
        }
        let value = value.trim();
        let coerced = if !value.is_empty() && value.chars().all(|c| c.is_ascii_digit()) {
            match value.parse::<i64>() {
                Ok(number) => OptValue::Int(number),
                Err(_) => OptValue::Str(value.to_string()),
            }
        } else {
            OptValue::Str(value.to_string())
        };
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = coerced,
            None => self.entries.push((key, coerced)),
        }
    }

    /// Look up an option by name (case-insensitive).
    pub fn get(&self, name: &str) -> Option<&OptValue> {
        let name = name.to_lowercase();
        self.entries
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value)
    }

    /// Integer option by name.
    pub fn as_i64(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(OptValue::as_i64)
    }

    /// String option by name.
    pub fn as_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(OptValue::as_str)
    }

    /// True when no options are set.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of options.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Iterate in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptValue)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value))
    }
}

impl fmt::Display for Options {
    /// One `k=v` per line; values longer than 8 characters keep their first
    /// 4 and mask the rest.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines: Vec<String> = self
            .entries
            .iter()
            .map(|(key, value)| format!("{}={}", key, mask(&value.to_string())))
            .collect();
        write!(f, "{}", lines.join("\n"))
    }
}

fn mask(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= 8 {
        return value.to_string();
    }
    let mut out: String = chars[..4].iter().collect();
    out.extend(std::iter::repeat('*').take(chars.len() - 4));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coerces_digit_values_to_integers() {
        let opts = Options::new(["token=a77", "max=42"]);
        assert_eq!(opts.as_str("token"), Some("a77"));
        assert_eq!(opts.as_i64("max"), Some(42));
    }

    #[test]
    fn strips_spaces_around_keys_and_values() {
        let opts = Options::new(["  token=a77   ", "max  =  42"]);
        assert_eq!(opts.as_str("token"), Some("a77"));
        assert_eq!(opts.as_i64("max"), Some(42));
    }

    #[test]
    fn missing_value_means_true() {
        let opts = Options::new(["verbose"]);
        assert_eq!(opts.as_str("verbose"), Some("true"));
    }

    #[test]
    fn parses_comma_joined_string() {
        let opts = Options::parse("a=1,b=42");
        assert_eq!(opts.as_i64("a"), Some(1));
        assert_eq!(opts.as_i64("b"), Some(42));
    }

    #[test]
    fn builds_from_explicit_pairs() {
        let opts = Options::from_pairs([("foo", "42"), ("bar", "hello")]);
        assert_eq!(opts.as_i64("foo"), Some(42));
        assert_eq!(opts.as_str("bar"), Some("hello"));
        assert!(opts.get("xxx").is_none());
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let opts = Options::new(["Token=a77"]);
        assert_eq!(opts.as_str("TOKEN"), Some("a77"));
    }

    #[test]
    fn masks_long_values_when_rendered() {
        let opts = Options::from_pairs([("foo", "44"), ("bar", "long-string-maybe-secret")]);
        assert_eq!(opts.to_string(), "foo=44\nbar=long********************");
    }

    #[test]
    fn last_assignment_wins() {
        let opts = Options::new(["a=1", "a=2"]);
        assert_eq!(opts.as_i64("a"), Some(2));
        assert_eq!(opts.len(), 1);
    }
}
