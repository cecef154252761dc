//! Locale-aware title ordering.

use icu_collator::options::CollatorOptions;
use icu_collator::{Collator, CollatorBorrowed, CollatorPreferences};
use icu_locale_core::locale;
use log::warn;
use once_cell::sync::Lazy;
use std::cmp::Ordering;

static TITLE_COLLATOR: Lazy<Option<CollatorBorrowed<'static>>> = Lazy::new(|| {
    let preferences: CollatorPreferences = locale!("ja").into();
    match Collator::try_new(preferences, CollatorOptions::default()) {
        Ok(collator) => Some(collator),
        Err(err) => {
            warn!("event=collator_init module=query status=fallback error={err}");
            None
        }
    }
});

/// Compares two titles with Japanese collation.
///
/// Falls back to code point order if collation data is unavailable.
pub fn compare_titles(left: &str, right: &str) -> Ordering {
    match TITLE_COLLATOR.as_ref() {
        Some(collator) => collator.compare(left, right),
        None => left.cmp(right),
    }
}
