//! Attribute coercion: raw strings to typed values, kebab-case aliases.
//!
//! Every attribute value is coerced exactly once when an element is visited.
//! The literal `"true"`/`"false"` become booleans, anything that reads fully as
//! a number becomes a number, and the rest stays a string. Each attribute is
//! stored under its literal name and under a joined alias (`max-length` is also
//! reachable as `maxLength`).

use std::collections::BTreeMap;
use std::fmt;

// ---------------------------------------------------------------------------
// AttrValue
// ---------------------------------------------------------------------------

/// A coerced attribute value.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    /// `"true"` or `"false"`.
    Bool(bool),
    /// Any non-blank value that parses fully as a number.
    Number(f64),
    /// Everything else, unchanged.
    Text(String),
}

impl AttrValue {
    /// Borrow the string payload, if this is a [`AttrValue::Text`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// The boolean payload, if this is a [`AttrValue::Bool`].
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The numeric payload, if this is a [`AttrValue::Number`].
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Loose truthiness: `false`, `0`, `NaN` and `""` are falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Bool(b) => *b,
            Self::Number(n) => *n != 0.0 && !n.is_nan(),
            Self::Text(s) => !s.is_empty(),
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

// ---------------------------------------------------------------------------
// Coercion
// ---------------------------------------------------------------------------

/// Coerce one raw attribute value. Total and deterministic.
pub fn coerce(raw: &str) -> AttrValue {
    match raw {
        "true" => return AttrValue::Bool(true),
        "false" => return AttrValue::Bool(false),
        _ => {}
    }
    match parse_number(raw) {
        Some(n) => AttrValue::Number(n),
        None => AttrValue::Text(raw.to_owned()),
    }
}

/// Numeric reading of a raw value, surrounding whitespace allowed.
///
/// Accepts decimal and exponent forms, `0x`/`0o`/`0b` integers and the spelled
/// `Infinity`. An exponent past the `f64` range reads as infinity. Rejects
/// blanks and `NaN`.
fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    match trimmed {
        "Infinity" | "+Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {}
    }

    let radix = match trimmed.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        return u64::from_str_radix(&trimmed[2..], radix)
            .ok()
            .map(|n| n as f64);
    }

    // `f64::from_str` also takes "inf" and "nan" spellings; only digits count here.
    if trimmed
        .chars()
        .any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E')
    {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

/// Join kebab-case into its alias: every `-` followed by a lowercase ASCII
/// letter becomes that letter uppercased.
///
/// Other hyphens are kept, so `data-1` stays `data-1` and `a--b` becomes `a-B`.
pub fn kebab_to_camel(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut chars = name.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '-' {
            if let Some(&next) = chars.peek() {
                if next.is_ascii_lowercase() {
                    out.push(next.to_ascii_uppercase());
                    chars.next();
                    continue;
                }
            }
        }
        out.push(c);
    }
    out
}

// ---------------------------------------------------------------------------
// AttributeBag
// ---------------------------------------------------------------------------

/// Coerced attributes of one element, keyed by literal name and alias.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeBag {
    entries: BTreeMap<String, AttrValue>,
}

impl AttributeBag {
    /// Create an empty bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a bag from raw `(name, value)` pairs, coercing each value.
    pub fn from_raw<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut bag = Self::new();
        for (name, value) in pairs {
            bag.insert_raw(name, value);
        }
        bag
    }

    /// Coerce `raw` and store it under `name` and its joined alias.
    pub fn insert_raw(&mut self, name: &str, raw: &str) {
        self.insert(name, coerce(raw));
    }

    /// Store an already-typed value under `name` and its joined alias.
    pub fn insert(&mut self, name: &str, value: AttrValue) {
        let alias = kebab_to_camel(name);
        if alias != name {
            self.entries.insert(alias, value.clone());
        }
        self.entries.insert(name.to_owned(), value);
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, name: &str, value: impl Into<AttrValue>) -> Self {
        self.insert(name, value.into());
        self
    }

    /// Look up a value by literal name or alias.
    pub fn get(&self, key: &str) -> Option<&AttrValue> {
        self.entries.get(key)
    }

    /// The first key from `keys` that is present.
    pub fn first_of(&self, keys: &[&str]) -> Option<&AttrValue> {
        keys.iter().find_map(|key| self.entries.get(*key))
    }

    /// String payload of `key`, if present and textual.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(AttrValue::as_str)
    }

    /// Boolean payload of `key`, if present and boolean.
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(AttrValue::as_bool)
    }

    /// Numeric payload of `key`, if present and numeric.
    pub fn get_number(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(AttrValue::as_number)
    }

    /// Any value of `key` rendered as a string (`42` becomes `"42"`).
    pub fn get_string(&self, key: &str) -> Option<String> {
        self.get(key).map(ToString::to_string)
    }

    /// Whether `key` is present at all.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Whether `key` is present with a truthy value.
    pub fn is_truthy(&self, key: &str) -> bool {
        self.get(key).is_some_and(AttrValue::is_truthy)
    }

    /// Iterate all `(key, value)` pairs, aliases included, in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of stored keys (aliases count separately).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the bag is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // ── coerce ───────────────────────────────────────────────────────

    #[test]
    fn coerce_booleans() {
        assert_eq!(coerce("true"), AttrValue::Bool(true));
        assert_eq!(coerce("false"), AttrValue::Bool(false));
    }

    #[test]
    fn coerce_boolean_is_case_sensitive() {
        assert_eq!(coerce("True"), AttrValue::Text("True".into()));
    }

    #[test]
    fn coerce_integers_and_decimals() {
        assert_eq!(coerce("42"), AttrValue::Number(42.0));
        assert_eq!(coerce("3.5"), AttrValue::Number(3.5));
        assert_eq!(coerce("-7"), AttrValue::Number(-7.0));
        assert_eq!(coerce(".5"), AttrValue::Number(0.5));
        assert_eq!(coerce("1e3"), AttrValue::Number(1000.0));
    }

    #[test]
    fn coerce_number_with_surrounding_space() {
        assert_eq!(coerce(" 42 "), AttrValue::Number(42.0));
    }

    #[test]
    fn coerce_radix_prefixes() {
        assert_eq!(coerce("0x1F"), AttrValue::Number(31.0));
        assert_eq!(coerce("0b101"), AttrValue::Number(5.0));
        assert_eq!(coerce("0o17"), AttrValue::Number(15.0));
    }

    #[test]
    fn coerce_infinity_spelling() {
        assert_eq!(coerce("Infinity"), AttrValue::Number(f64::INFINITY));
        assert_eq!(coerce("inf"), AttrValue::Text("inf".into()));
    }

    #[test]
    fn coerce_overflowing_exponent_is_infinite() {
        assert_eq!(coerce("1e400"), AttrValue::Number(f64::INFINITY));
        assert_eq!(coerce("-1e400"), AttrValue::Number(f64::NEG_INFINITY));
        assert_eq!(coerce("1e-400"), AttrValue::Number(0.0));
    }

    #[test]
    fn coerce_nan_stays_text() {
        assert_eq!(coerce("NaN"), AttrValue::Text("NaN".into()));
        assert_eq!(coerce("nan"), AttrValue::Text("nan".into()));
    }

    #[test]
    fn coerce_plain_text() {
        assert_eq!(coerce("abc"), AttrValue::Text("abc".into()));
        assert_eq!(coerce("12px"), AttrValue::Text("12px".into()));
        assert_eq!(coerce("#b91c1c"), AttrValue::Text("#b91c1c".into()));
    }

    #[test]
    fn coerce_blank_is_not_numeric() {
        assert_eq!(coerce(""), AttrValue::Text(String::new()));
        assert_eq!(coerce("   "), AttrValue::Text("   ".into()));
    }

    // ── kebab_to_camel ───────────────────────────────────────────────

    #[test]
    fn kebab_alias() {
        assert_eq!(kebab_to_camel("max-length"), "maxLength");
        assert_eq!(kebab_to_camel("default-value"), "defaultValue");
        assert_eq!(kebab_to_camel("lazy-load"), "lazyLoad");
    }

    #[test]
    fn kebab_alias_leaves_other_hyphens() {
        assert_eq!(kebab_to_camel("data-1"), "data-1");
        assert_eq!(kebab_to_camel("a--b"), "a-B");
        assert_eq!(kebab_to_camel("trailing-"), "trailing-");
    }

    #[test]
    fn kebab_alias_noop_for_plain_names() {
        assert_eq!(kebab_to_camel("activeIndex"), "activeIndex");
        assert_eq!(kebab_to_camel("text"), "text");
    }

    // ── AttributeBag ─────────────────────────────────────────────────

    #[test]
    fn bag_stores_literal_and_alias() {
        let bag = AttributeBag::from_raw([("max-length", "10")]);
        assert_eq!(bag.get("max-length"), Some(&AttrValue::Number(10.0)));
        assert_eq!(bag.get("maxLength"), Some(&AttrValue::Number(10.0)));
        assert_eq!(bag.len(), 2);
    }

    #[test]
    fn bag_without_alias_has_single_key() {
        let bag = AttributeBag::from_raw([("text", "hi")]);
        assert_eq!(bag.len(), 1);
        assert_eq!(bag.get_str("text"), Some("hi"));
    }

    #[test]
    fn bag_typed_accessors() {
        let bag = AttributeBag::from_raw([("a", "true"), ("b", "2"), ("c", "x")]);
        assert_eq!(bag.get_bool("a"), Some(true));
        assert_eq!(bag.get_number("b"), Some(2.0));
        assert_eq!(bag.get_str("c"), Some("x"));
        assert_eq!(bag.get_bool("c"), None);
        assert_eq!(bag.get_string("b").as_deref(), Some("2"));
    }

    #[test]
    fn bag_first_of() {
        let bag = AttributeBag::from_raw([("default-value", "x")]);
        assert_eq!(
            bag.first_of(&["value", "defaultValue"]),
            Some(&AttrValue::Text("x".into()))
        );
        assert!(bag.first_of(&["nope"]).is_none());
    }

    #[test]
    fn truthiness() {
        let bag = AttributeBag::from_raw([
            ("t", "true"),
            ("f", "false"),
            ("zero", "0"),
            ("one", "1"),
            ("empty", ""),
            ("word", "yes"),
        ]);
        assert!(bag.is_truthy("t"));
        assert!(!bag.is_truthy("f"));
        assert!(!bag.is_truthy("zero"));
        assert!(bag.is_truthy("one"));
        assert!(!bag.is_truthy("empty"));
        assert!(bag.is_truthy("word"));
        assert!(!bag.is_truthy("missing"));
    }

    #[test]
    fn display_round_trips_numbers_cleanly() {
        assert_eq!(AttrValue::Number(42.0).to_string(), "42");
        assert_eq!(AttrValue::Number(3.5).to_string(), "3.5");
        assert_eq!(AttrValue::Bool(true).to_string(), "true");
    }

    #[test]
    fn builder_with() {
        let bag = AttributeBag::new().with("text", "hello").with("error-text", "bad");
        assert_eq!(bag.get_str("text"), Some("hello"));
        assert_eq!(bag.get_str("errorText"), Some("bad"));
    }
}
