// Core structs: RawDealRecord, FeaturedDeal, DiscountCard, DealQuery
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::utils::{parse_lenient_f64, parse_timestamp};

/// One entry of the deals API response.
///
/// The API sends most numbers as strings and a few as plain JSON numbers, so
/// every field is kept as optional text and parsed on demand.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawDealRecord {
    #[serde(rename = "dealID", default, deserialize_with = "loose_text")]
    pub deal_id: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub thumb: Option<String>,
    #[serde(rename = "normalPrice", default, deserialize_with = "loose_text")]
    pub normal_price: Option<String>,
    #[serde(rename = "salePrice", default, deserialize_with = "loose_text")]
    pub sale_price: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub savings: Option<String>,
    #[serde(rename = "steamAppID", default, deserialize_with = "loose_text")]
    pub steam_app_id: Option<String>,
    #[serde(rename = "metacriticScore", default, deserialize_with = "loose_text")]
    pub metacritic_score: Option<String>,
    #[serde(rename = "steamRatingText", default, deserialize_with = "loose_text")]
    pub steam_rating_text: Option<String>,
    #[serde(rename = "steamRatingPercent", default, deserialize_with = "loose_text")]
    pub steam_rating_percent: Option<String>,
    #[serde(rename = "steamRatingCount", default, deserialize_with = "loose_text")]
    pub steam_rating_count: Option<String>,
    #[serde(rename = "releaseDate", default, deserialize_with = "loose_text")]
    pub release_date: Option<String>,
    #[serde(rename = "lastChange", default, deserialize_with = "loose_text")]
    pub last_change: Option<String>,
    #[serde(rename = "dealRating", default, deserialize_with = "loose_text")]
    pub deal_rating: Option<String>,
}

/// Accepts a string, number or bool and keeps it as text. Null and empty strings become `None`.
fn loose_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

impl RawDealRecord {
    /// Parsed savings percentage, `None` when missing or not a number.
    pub fn savings(&self) -> Option<f64> {
        self.savings.as_deref().and_then(parse_lenient_f64)
    }

    pub fn normal_price_value(&self) -> Option<f64> {
        self.normal_price.as_deref().and_then(parse_lenient_f64)
    }

    pub fn sale_price_value(&self) -> Option<f64> {
        self.sale_price.as_deref().and_then(parse_lenient_f64)
    }

    pub fn metacritic_score_value(&self) -> Option<f64> {
        self.metacritic_score.as_deref().and_then(parse_lenient_f64)
    }

    /// Savings rounded to a whole percent; missing values count as zero.
    pub fn rounded_savings(&self) -> i64 {
        self.savings().map(|s| s.round() as i64).unwrap_or(0)
    }

    pub fn rating_meta(&self) -> RatingMeta {
        RatingMeta {
            metacritic_score: self.metacritic_score.clone(),
            steam_rating_text: self.steam_rating_text.clone(),
            steam_rating_percent: self.steam_rating_percent.clone(),
            steam_rating_count: self.steam_rating_count.clone(),
            release_date: self.release_date.as_deref().and_then(parse_timestamp),
            last_change: self.last_change.as_deref().and_then(parse_timestamp),
            deal_rating: self.deal_rating.clone(),
        }
    }
}

/// Rating and freshness data passed through to the view unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RatingMeta {
    pub metacritic_score: Option<String>,
    pub steam_rating_text: Option<String>,
    pub steam_rating_percent: Option<String>,
    pub steam_rating_count: Option<String>,
    pub release_date: Option<DateTime<Utc>>,
    pub last_change: Option<DateTime<Utc>>,
    pub deal_rating: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BadgeTier {
    Deal,
    GoodDeal,
    GreatDeal,
    MegaDeal,
    OnSale,
    Featured,
    Error,
}

impl BadgeTier {
    pub fn label(&self) -> &'static str {
        match self {
            BadgeTier::Deal => "DEAL",
            BadgeTier::GoodDeal => "GOOD DEAL",
            BadgeTier::GreatDeal => "GREAT DEAL",
            BadgeTier::MegaDeal => "MEGA DEAL",
            BadgeTier::OnSale => "ON SALE",
            BadgeTier::Featured => "FEATURED",
            BadgeTier::Error => "ERROR",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    CriticallyAcclaimed,
    HighlyRated,
    Recommended,
    OverwhelminglyPositive,
    VeryPositive,
    MostlyPositive,
    Action,
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Category::CriticallyAcclaimed => "CRITICALLY ACCLAIMED",
            Category::HighlyRated => "HIGHLY RATED",
            Category::Recommended => "RECOMMENDED",
            Category::OverwhelminglyPositive => "OVERWHELMINGLY POSITIVE",
            Category::VeryPositive => "VERY POSITIVE",
            Category::MostlyPositive => "MOSTLY POSITIVE",
            Category::Action => "ACTION",
        }
    }
}

/// A CSS-style gradient kept as data; the terminal views only use its lead color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gradient(pub &'static str);

/// Carousel slide.
#[derive(Debug, Clone, PartialEq)]
pub struct FeaturedDeal {
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub date_range: String,
    pub price: Option<String>,
    pub original_price: Option<String>,
    pub discount: Option<String>,
    pub image: String,
    pub cta_text: String,
    pub cta_secondary: String,
    pub badge: BadgeTier,
    pub gradient: Gradient,
    pub deal_id: Option<String>,
    pub steam_app_id: Option<String>,
    pub meta: RatingMeta,
}

/// Card in the Top Discounts rail.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscountCard {
    pub title: String,
    pub category: Category,
    pub image: String,
    pub discount: i64,
    pub original_price: f64,
    pub current_price: f64,
    pub deal_id: Option<String>,
    pub steam_app_id: Option<String>,
    pub metacritic_score: Option<String>,
    pub steam_rating_text: Option<String>,
    pub steam_rating_percent: Option<String>,
}

/// Query parameters for one request against the deals endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DealQuery {
    pub store_id: u32,
    pub upper_price: Option<u32>,
    pub page_size: u32,
    pub on_sale: bool,
}

impl DealQuery {
    /// Featured carousel, discounted titles under $60.
    pub fn featured() -> Self {
        Self { store_id: 1, upper_price: Some(60), page_size: 10, on_sale: false }
    }

    /// Broader Featured query used when nothing passes the discount filter.
    pub fn featured_fallback() -> Self {
        Self { store_id: 1, upper_price: None, page_size: 5, on_sale: false }
    }

    /// Top Discounts rail; over-fetches so exclusions still leave enough cards.
    pub fn top_discounts() -> Self {
        Self { store_id: 1, upper_price: None, page_size: 25, on_sale: true }
    }

    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("storeID", self.store_id.to_string())];
        if let Some(upper) = self.upper_price {
            params.push(("upperPrice", upper.to_string()));
        }
        params.push(("pageSize", self.page_size.to_string()));
        if self.on_sale {
            params.push(("onSale", "1".to_string()));
        }
        params
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Http(String),
    #[error("Request failed with status code {0}")]
    Status(u16),
    #[error("Invalid response body: {0}")]
    Decode(String),
    #[error("Request timed out")]
    Timeout,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config read error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_string_and_number_fields() {
        let json = r#"[{
            "dealID": "abc",
            "title": "Portal",
            "thumb": "https://img/portal.jpg",
            "normalPrice": "9.99",
            "salePrice": "1.99",
            "savings": "80.080080",
            "steamAppID": "400",
            "metacriticScore": "90",
            "steamRatingText": "Overwhelmingly Positive",
            "steamRatingPercent": "98",
            "steamRatingCount": "120000",
            "releaseDate": 1191888000,
            "lastChange": 1700000000,
            "dealRating": "9.5"
        }]"#;
        let records: Vec<RawDealRecord> = serde_json::from_str(json).unwrap();
        let r = &records[0];
        assert_eq!(r.deal_id.as_deref(), Some("abc"));
        assert_eq!(r.release_date.as_deref(), Some("1191888000"));
        assert_eq!(r.rounded_savings(), 80);
        assert_eq!(r.metacritic_score_value(), Some(90.0));
        assert!(r.rating_meta().release_date.is_some());
    }

    #[test]
    fn missing_and_null_fields_become_none() {
        let records: Vec<RawDealRecord> =
            serde_json::from_str(r#"[{"title": "X", "steamAppID": null, "savings": ""}]"#).unwrap();
        let r = &records[0];
        assert_eq!(r.steam_app_id, None);
        assert_eq!(r.savings(), None);
        assert_eq!(r.rounded_savings(), 0);
    }

    #[test]
    fn query_params_keep_endpoint_order() {
        let keys = |q: DealQuery| q.params().into_iter().map(|(k, v)| format!("{k}={v}")).collect::<Vec<_>>().join("&");
        assert_eq!(keys(DealQuery::featured()), "storeID=1&upperPrice=60&pageSize=10");
        assert_eq!(keys(DealQuery::featured_fallback()), "storeID=1&pageSize=5");
        assert_eq!(keys(DealQuery::top_discounts()), "storeID=1&pageSize=25&onSale=1");
    }
}
