//! Reads the two stock signals out of a fetched product page.
//!
//! Both signals come from lightweight regex scans rather than a DOM: the
//! `<script type="application/ld+json">` blocks and the first
//! `<button class="add-to-cart">` element.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

use crate::types::{ControlState, PageSignals, StructuredAvailability};

/// The only `offers.availability` value treated as in stock.
pub const IN_STOCK_URI: &str = "https://schema.org/InStock";

const PRODUCT_TYPE: &str = "Product";
const ADD_TO_CART_CLASS: &str = "add-to-cart";
const DISABLED_CLASS: &str = "disabled";

static JSONLD_SCRIPT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<script\b[^>]*\stype\s*=\s*["']application/ld\+json["'][^>]*>(.*?)</script>"#)
        .expect("valid json-ld script regex")
});
// Quoted attribute values may contain `>`.
static BUTTON_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<button\b((?:[^>"']|"[^"]*"|'[^']*')*)>"#).expect("valid regex")
});
static CLASS_ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)(?:^|\s)class\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+))"#)
        .expect("valid class attribute regex")
});

#[derive(Debug, Deserialize)]
struct Offer {
    availability: Option<String>,
}

/// `offers` is a single object on most storefronts, a list on some.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Offers {
    Many(Vec<Offer>),
    One(Offer),
}

impl Offers {
    fn availability(&self) -> Option<&str> {
        match self {
            Offers::Many(offers) => offers.first()?.availability.as_deref(),
            Offers::One(offer) => offer.availability.as_deref(),
        }
    }
}

/// Extracts the structured availability and, when that is present, the
/// add-to-cart button state.
///
/// Malformed JSON-LD blocks are skipped; the first well-formed block whose
/// `@type` is `Product` decides the availability. When no such block exists
/// the button is not inspected and `control` is `None`.
#[must_use]
pub fn extract_signals(html: &str) -> PageSignals {
    let availability = extract_structured_availability(html);
    let control = match availability {
        StructuredAvailability::Absent => None,
        StructuredAvailability::InStock | StructuredAvailability::OutOfStock => {
            Some(extract_control_state(html))
        }
    };
    PageSignals {
        availability,
        control,
    }
}

/// Availability from the first JSON-LD `Product` block in document order.
#[must_use]
pub fn extract_structured_availability(html: &str) -> StructuredAvailability {
    for cap in JSONLD_SCRIPT_RE.captures_iter(html) {
        let raw = cap.get(1).map_or("", |m| m.as_str()).trim();
        if raw.is_empty() {
            continue;
        }
        let value: Value = match serde_json::from_str(raw) {
            Ok(v) => v,
            Err(e) => {
                tracing::debug!(error = %e, "skipping malformed JSON-LD block");
                continue;
            }
        };
        if !is_product_node(&value) {
            continue;
        }

        let availability = value
            .get("offers")
            .cloned()
            .and_then(|offers| serde_json::from_value::<Offers>(offers).ok());
        let in_stock = availability
            .as_ref()
            .and_then(Offers::availability)
            .is_some_and(|a| a == IN_STOCK_URI);

        return if in_stock {
            StructuredAvailability::InStock
        } else {
            StructuredAvailability::OutOfStock
        };
    }

    StructuredAvailability::Absent
}

/// Only a top-level `"@type": "Product"` string qualifies.
fn is_product_node(value: &Value) -> bool {
    matches!(value.get("@type"), Some(Value::String(s)) if s == PRODUCT_TYPE)
}

/// State of the first `<button>` carrying the `add-to-cart` class.
///
/// A `disabled` class on that button counts as inactive, as does the button
/// being absent altogether.
#[must_use]
pub fn extract_control_state(html: &str) -> ControlState {
    let button_classes = BUTTON_TAG_RE
        .captures_iter(html)
        .filter_map(|cap| cap.get(1).map(|m| class_tokens(m.as_str())))
        .find(|classes| classes.iter().any(|c| c == ADD_TO_CART_CLASS));

    match button_classes {
        Some(classes) if !classes.iter().any(|c| c == DISABLED_CLASS) => ControlState::Active,
        _ => ControlState::InactiveOrMissing,
    }
}

fn class_tokens(attrs: &str) -> Vec<String> {
    let Some(cap) = CLASS_ATTR_RE.captures(attrs) else {
        return Vec::new();
    };
    let value = cap
        .get(1)
        .or_else(|| cap.get(2))
        .or_else(|| cap.get(3))
        .map_or("", |m| m.as_str());
    value.split_whitespace().map(str::to_owned).collect()
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
