//! Heuristic HTML-to-record extraction.
//!
//! Supplier listing markup is not under our control, so every field is
//! derived through an ordered chain of class-hint heuristics with an
//! explicit fallback. The precedence is part of the contract: reordering
//! the strategies silently changes what gets harvested.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html};
use url::Url;

use matprix_core::ExtractedFields;

use crate::price::{extract_unit, parse_price};

static CONTAINER_HINT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)product|item|card").expect("valid regex"));
static NAME_HINT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)title|name|product").expect("valid regex"));
static PRICE_HINT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)price|prix").expect("valid regex"));
static PRICE_TEXT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"€|\d+[,.]?\d*").expect("valid regex"));
static BRAND_HINT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)brand|marque").expect("valid regex"));
static STOCK_HINT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)stock|disponib").expect("valid regex"));

/// A single field-detection strategy: a pure predicate over the container
/// fragment that either yields the field's raw value or defers to the next
/// strategy in the chain.
type ElementStrategy = for<'a> fn(ElementRef<'a>) -> Option<ElementRef<'a>>;

const NAME_STRATEGIES: &[ElementStrategy] = &[hinted_heading_or_link, titled_anchor];
const PRICE_STRATEGIES: &[ElementStrategy] = &[hinted_price_element, price_looking_text];

/// Heuristic extractor turning one container fragment into an
/// [`ExtractedFields`] assembly.
///
/// Stateless; one instance serves every category crawl of a run.
#[derive(Debug, Default)]
pub struct FieldExtractor;

impl FieldExtractor {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Finds the product container fragments on a listing page.
    ///
    /// Primary: `div`/`article` elements whose class hints at
    /// product/item/card. Fallback: any `div` carrying `data-product-id`.
    #[must_use]
    pub fn select_containers<'a>(&self, html: &'a Html) -> Vec<ElementRef<'a>> {
        let containers: Vec<ElementRef<'a>> = elements(html.root_element())
            .filter(|el| matches!(el.value().name(), "div" | "article"))
            .filter(|el| class_matches(*el, &CONTAINER_HINT))
            .collect();
        if !containers.is_empty() {
            return containers;
        }

        elements(html.root_element())
            .filter(|el| el.value().name() == "div" && el.value().attr("data-product-id").is_some())
            .collect()
    }

    /// Derives a record assembly from one container fragment.
    ///
    /// Returns `None` when a mandatory field (name, product URL) has no
    /// candidate — the record is discarded, never persisted half-formed.
    /// An unparseable price is not mandatory-field failure: it degrades to
    /// the `0.0` sentinel and the record survives.
    #[must_use]
    pub fn extract(&self, container: ElementRef<'_>, base_url: &Url) -> Option<ExtractedFields> {
        // 1. Name — mandatory.
        let name_el = NAME_STRATEGIES.iter().find_map(|s| s(container))?;
        let name = non_empty(element_text(&name_el))
            .or_else(|| name_el.value().attr("title").map(str::to_owned))?;

        // 2. Source URL — mandatory.
        let href = elements(container)
            .find(|el| el.value().name() == "a" && el.value().attr("href").is_some())
            .and_then(|el| el.value().attr("href").map(str::to_owned))?;
        let product_url = base_url.join(&href).ok()?.to_string();

        // 3. Price — optional, degrades to the sentinel.
        let price_text = PRICE_STRATEGIES
            .iter()
            .find_map(|s| s(container))
            .map(|el| element_text(&el));
        let (price, currency) = parse_price(price_text.as_deref().unwrap_or("0"));

        // 4. Brand.
        let brand = elements(container)
            .find(|el| {
                matches!(el.value().name(), "span" | "div") && class_matches(*el, &BRAND_HINT)
            })
            .and_then(|el| non_empty(element_text(&el)));

        // 5. Image URL, honoring lazy-load attributes.
        let image_url = elements(container)
            .find(|el| el.value().name() == "img")
            .and_then(|el| {
                el.value()
                    .attr("src")
                    .or_else(|| el.value().attr("data-src"))
            })
            .and_then(|src| base_url.join(src).ok())
            .map(|u| u.to_string());

        // 6. Unit comes from the name, not the fragment.
        let unit = extract_unit(&name);

        // 7. Stock — defaults to available when the page says nothing.
        let in_stock = elements(container)
            .find(|el| {
                matches!(el.value().name(), "span" | "div") && class_matches(*el, &STOCK_HINT)
            })
            .map_or(true, |el| {
                let text = element_text(&el).to_lowercase();
                text.contains("disponible") || text.contains("en stock")
            });

        Some(ExtractedFields {
            name,
            product_url,
            price,
            currency,
            brand,
            unit,
            pack_size: None,
            image_url,
            in_stock,
        })
    }
}

/// First `h2`/`h3`/`a` descendant whose class hints at title/name/product.
fn hinted_heading_or_link(container: ElementRef<'_>) -> Option<ElementRef<'_>> {
    elements(container).find(|el| {
        matches!(el.value().name(), "h2" | "h3" | "a") && class_matches(*el, &NAME_HINT)
    })
}

/// First anchor carrying a `title` attribute.
fn titled_anchor(container: ElementRef<'_>) -> Option<ElementRef<'_>> {
    elements(container)
        .find(|el| el.value().name() == "a" && el.value().attr("title").is_some())
}

/// First `span`/`div` whose class hints at price.
fn hinted_price_element(container: ElementRef<'_>) -> Option<ElementRef<'_>> {
    elements(container).find(|el| {
        matches!(el.value().name(), "span" | "div") && class_matches(*el, &PRICE_HINT)
    })
}

/// First element whose own text looks like a currency amount.
fn price_looking_text(container: ElementRef<'_>) -> Option<ElementRef<'_>> {
    elements(container).find(|el| {
        let own: String = el
            .children()
            .filter_map(|n| n.value().as_text().map(|t| t.text.to_string()))
            .collect();
        !own.trim().is_empty() && PRICE_TEXT.is_match(&own)
    })
}

fn elements(root: ElementRef<'_>) -> impl Iterator<Item = ElementRef<'_>> {
    root.descendants().filter_map(ElementRef::wrap)
}

fn class_matches(el: ElementRef<'_>, hint: &Regex) -> bool {
    el.value().attr("class").is_some_and(|c| hint.is_match(c))
}

/// Whitespace-normalized full text of an element.
fn element_text(el: &ElementRef<'_>) -> String {
    el.text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
