use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse page category guessed from the shape of a URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageType {
    #[serde(rename = "Homepage / Landing")]
    Landing,
    #[serde(rename = "Product Page")]
    Product,
    #[serde(rename = "Collection Page")]
    Collection,
    #[serde(rename = "Other")]
    Other,
}

impl PageType {
    /// Classifies a URL; the first matching rule wins
    ///
    /// Matching is on raw substrings of the whole URL string, so a host that
    /// contains "product" classifies every deep page as a product page.
    pub fn from_url(url: &str) -> Self {
        if url.ends_with('/') || url.matches('/').count() <= 3 {
            ::log::trace!("Classifying as Landing: {}", url);
            PageType::Landing
        } else if url.contains("product") {
            ::log::trace!("Classifying as Product: {}", url);
            PageType::Product
        } else if url.contains("collection") || url.contains("category") {
            ::log::trace!("Classifying as Collection: {}", url);
            PageType::Collection
        } else {
            ::log::trace!("Classifying as Other: {}", url);
            PageType::Other
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PageType::Landing => "Homepage / Landing",
            PageType::Product => "Product Page",
            PageType::Collection => "Collection Page",
            PageType::Other => "Other",
        }
    }
}

impl fmt::Display for PageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
