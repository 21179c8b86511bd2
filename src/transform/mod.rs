// Transform module: raw deal records into view models.

pub mod discounts;
pub mod featured;
pub mod rules;

use reqwest::Url;

pub const SLIDE_PLACEHOLDER: &str = "/placeholder.svg?height=600&width=1050";
pub const CARD_PLACEHOLDER: &str = "/placeholder.svg?height=240&width=250";

/// The image URL if it is a loadable absolute URL, otherwise the placeholder.
pub fn image_or(url: Option<&str>, placeholder: &str) -> String {
    match url {
        Some(u) if Url::parse(u).is_ok() => u.to_string(),
        _ => placeholder.to_string(),
    }
}
