//! Settings domain model.
//!
//! # Responsibility
//! - Hold the alert threshold, alert switch and category vocabulary.
//! - Resolve possibly partial stored JSON field by field against defaults.
//!
//! # Invariants
//! - `categories` contains no duplicates (case-sensitive exact match).
//! - A corrupt field falls back on its own; other stored fields survive.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};

/// Default due-soon threshold in days.
pub const DEFAULT_ALERT_DAYS: u32 = 3;

/// Seed category vocabulary.
pub const DEFAULT_CATEGORIES: [&str; 4] = ["仕事", "プライベート", "買い物", "その他"];

const KEY_ALERT_DAYS: &str = "alertDays";
const KEY_ALERT_ENABLED: &str = "alertEnabled";
const KEY_CATEGORIES: &str = "categories";
const KNOWN_KEYS: [&str; 3] = [KEY_ALERT_DAYS, KEY_ALERT_ENABLED, KEY_CATEGORIES];

// Leading optional sign plus digits, the prefix a form field may carry.
static LEADING_INTEGER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*([+-]?\d+)").expect("valid leading integer regex"));

/// Singleton user settings.
///
/// Serialize-only: stored values are read back through [`Settings::resolve`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub alert_days: u32,
    pub alert_enabled: bool,
    pub categories: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            alert_days: DEFAULT_ALERT_DAYS,
            alert_enabled: true,
            categories: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
        }
    }
}

/// Outcome of resolving stored settings JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSettings {
    pub settings: Settings,
    /// Known keys whose stored value was absent or unusable.
    pub defaulted_fields: Vec<&'static str>,
    /// Stored keys that are not part of the settings shape and were dropped.
    pub unknown_keys: Vec<String>,
}

impl Settings {
    /// Resolves stored JSON against defaults, one field at a time.
    ///
    /// A non-object value resolves to full defaults.
    pub fn resolve(stored: &Value) -> ResolvedSettings {
        let defaults = Settings::default();
        let empty = Map::new();
        let object = stored.as_object().unwrap_or(&empty);

        let mut defaulted_fields = Vec::new();

        let alert_days = match object.get(KEY_ALERT_DAYS).and_then(alert_days_from_value) {
            Some(days) => days,
            None => {
                defaulted_fields.push(KEY_ALERT_DAYS);
                defaults.alert_days
            }
        };

        let alert_enabled = match object.get(KEY_ALERT_ENABLED).and_then(Value::as_bool) {
            Some(enabled) => enabled,
            None => {
                defaulted_fields.push(KEY_ALERT_ENABLED);
                defaults.alert_enabled
            }
        };

        let categories = match object.get(KEY_CATEGORIES).and_then(categories_from_value) {
            Some(categories) => categories,
            None => {
                defaulted_fields.push(KEY_CATEGORIES);
                defaults.categories
            }
        };

        let unknown_keys = object
            .keys()
            .filter(|key| !KNOWN_KEYS.contains(&key.as_str()))
            .cloned()
            .collect();

        ResolvedSettings {
            settings: Settings {
                alert_days,
                alert_enabled,
                categories,
            },
            defaulted_fields,
            unknown_keys,
        }
    }

    /// Category assigned to new tasks that do not name one.
    pub fn default_category(&self) -> &str {
        self.categories.first().map(String::as_str).unwrap_or("")
    }

    pub fn has_category(&self, name: &str) -> bool {
        self.categories.iter().any(|category| category == name)
    }

    /// Appends a trimmed category name.
    ///
    /// Returns `false` (no-op) when the name is blank or already present.
    pub fn add_category(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() || self.has_category(name) {
            return false;
        }
        self.categories.push(name.to_string());
        true
    }

    /// Removes the first exact match. Returns `false` when absent.
    ///
    /// Tasks that still carry the removed name are left untouched.
    pub fn remove_category(&mut self, name: &str) -> bool {
        match self.categories.iter().position(|category| category == name) {
            Some(index) => {
                self.categories.remove(index);
                true
            }
            None => false,
        }
    }
}

/// Parses an alert-day form value.
///
/// Leading whitespace and trailing garbage are tolerated (`" 5 days"` -> 5).
/// Unparseable, negative or out-of-range input yields [`DEFAULT_ALERT_DAYS`].
pub fn parse_alert_days(raw: &str) -> u32 {
    LEADING_INTEGER_RE
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<i64>().ok())
        .and_then(|value| u32::try_from(value).ok())
        .unwrap_or(DEFAULT_ALERT_DAYS)
}

fn alert_days_from_value(value: &Value) -> Option<u32> {
    match value {
        Value::Number(number) => number
            .as_u64()
            .or_else(|| {
                number
                    .as_f64()
                    .filter(|f| f.fract() == 0.0 && *f >= 0.0)
                    .map(|f| f as u64)
            })
            .and_then(|days| u32::try_from(days).ok()),
        Value::String(text) => LEADING_INTEGER_RE
            .captures(text)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse::<u32>().ok()),
        _ => None,
    }
}

fn categories_from_value(value: &Value) -> Option<Vec<String>> {
    let items = value.as_array()?;
    let mut categories: Vec<String> = Vec::with_capacity(items.len());
    for item in items {
        let Some(name) = item.as_str().map(str::trim) else {
            continue;
        };
        if name.is_empty() || categories.iter().any(|existing| existing == name) {
            continue;
        }
        categories.push(name.to_string());
    }
    Some(categories)
}
