//! Price text parsing and unit token detection.
//!
//! Both are deliberately forgiving: an unparseable price yields the `0.0`
//! sentinel with the default currency rather than an error, because a
//! record with a bad price is still informative for name/url/brand.

use matprix_core::DEFAULT_CURRENCY;

/// Known measurement units, scanned against the product *name* in this
/// exact order; the first substring match wins. Area before length before
/// volume before mass before packaging, so `"15 m²"` resolves to `m²`
/// rather than the bare `m`-less tokens further down. Note that the short
/// tokens (`l`, `g`) match aggressively; the list order is the documented
/// precedence and changing it silently changes harvested data.
const UNIT_TOKENS: [&str; 12] = [
    "m²", "m2", "cm²", "cm2", "ml", "cl", "l", "kg", "g", "pièce", "lot", "paquet",
];

/// Parses a scraped price fragment into `(price, currency)`.
///
/// Commas are treated as decimal separators (`"29,99 €"` → `29.99`); every
/// character that is not a digit or a separator is stripped before the
/// numeric parse. Failure yields `(0.0, "EUR")` — never an error.
#[must_use]
pub fn parse_price(text: &str) -> (f64, String) {
    let cleaned: String = text
        .replace(',', ".")
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    match cleaned.parse::<f64>() {
        Ok(price) if price.is_finite() && price >= 0.0 => (price, detect_currency(text)),
        _ => (0.0, DEFAULT_CURRENCY.to_string()),
    }
}

/// Maps a currency symbol in the raw text to its ISO code. The supported
/// market is French retail, so the absence of any symbol defaults to EUR.
fn detect_currency(text: &str) -> String {
    if text.contains('€') {
        "EUR"
    } else if text.contains('$') {
        "USD"
    } else if text.contains('£') {
        "GBP"
    } else {
        DEFAULT_CURRENCY
    }
    .to_string()
}

/// Scans a product name for a known unit token, case-insensitively.
///
/// Returns the first token of [`UNIT_TOKENS`] that appears as a substring,
/// or `None`.
#[must_use]
pub fn extract_unit(name: &str) -> Option<String> {
    if name.is_empty() {
        return None;
    }
    let lower = name.to_lowercase();
    UNIT_TOKENS
        .iter()
        .find(|token| lower.contains(*token))
        .map(|token| (*token).to_string())
}
