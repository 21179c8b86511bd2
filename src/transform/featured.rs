// Featured carousel pipeline: primary query -> discount filter -> fallback query when empty.
use crate::fetcher::DealSource;
use crate::model::{BadgeTier, DealQuery, FeaturedDeal, FetchError, RatingMeta, RawDealRecord};
use crate::transform::rules::{ERROR_GRADIENT, badge_for, gradient_for, relaxed_badge_for};
use crate::transform::{SLIDE_PLACEHOLDER, image_or};
use tracing::info;

pub const FEATURED_COUNT: usize = 5;
pub const MIN_FEATURED_SAVINGS: f64 = 15.0;
pub const LOAD_ERROR_MESSAGE: &str = "Failed to load game deals. Please try again later.";

/// Result of one stage of the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum StageOutcome {
    Items(Vec<FeaturedDeal>),
    Empty,
}

impl StageOutcome {
    fn from_deals(deals: Vec<FeaturedDeal>) -> Self {
        if deals.is_empty() { StageOutcome::Empty } else { StageOutcome::Items(deals) }
    }
}

/// Which stage produced the carousel contents.
#[derive(Debug, Clone, PartialEq)]
pub enum FeaturedOutcome {
    Primary(Vec<FeaturedDeal>),
    Fallback(Vec<FeaturedDeal>),
    Empty,
}

impl FeaturedOutcome {
    pub fn into_deals(self) -> Vec<FeaturedDeal> {
        match self {
            FeaturedOutcome::Primary(deals) | FeaturedOutcome::Fallback(deals) => deals,
            FeaturedOutcome::Empty => Vec::new(),
        }
    }
}

/// Runs the primary query and, only if nothing survives the discount filter, the fallback query.
pub async fn load_featured(source: &dyn DealSource) -> Result<FeaturedOutcome, FetchError> {
    let records = source.fetch(&DealQuery::featured()).await?;
    if let StageOutcome::Items(deals) = map_primary(&records) {
        info!("Featured: {} discounted deals", deals.len());
        return Ok(FeaturedOutcome::Primary(deals));
    }

    info!("Featured: no deal reached {}% off, falling back to any deals", MIN_FEATURED_SAVINGS);
    let records = source.fetch(&DealQuery::featured_fallback()).await?;
    Ok(match map_fallback(&records) {
        StageOutcome::Items(deals) => FeaturedOutcome::Fallback(deals),
        StageOutcome::Empty => FeaturedOutcome::Empty,
    })
}

pub fn map_primary(records: &[RawDealRecord]) -> StageOutcome {
    let deals = records
        .iter()
        .filter(|r| r.savings().is_some_and(|s| s >= MIN_FEATURED_SAVINGS))
        .take(FEATURED_COUNT)
        .enumerate()
        .map(|(index, record)| primary_deal(index, record))
        .collect();
    StageOutcome::from_deals(deals)
}

pub fn map_fallback(records: &[RawDealRecord]) -> StageOutcome {
    let deals = records
        .iter()
        .take(FEATURED_COUNT)
        .enumerate()
        .map(|(index, record)| fallback_deal(index, record))
        .collect();
    StageOutcome::from_deals(deals)
}

fn primary_deal(index: usize, record: &RawDealRecord) -> FeaturedDeal {
    let savings = record.rounded_savings();
    let rating = rating_sentence(record).unwrap_or_else(|| "Get it now while the offer lasts!".to_string());

    FeaturedDeal {
        subtitle: format!("{}% OFF", savings),
        description: format!("Save ${:.2} on this amazing game. {}", saved_amount(record), rating),
        date_range: "LIMITED TIME OFFER".into(),
        original_price: dollars(record.normal_price.as_deref()),
        discount: Some(format!("{}%", savings)),
        cta_secondary: "View on Steam".into(),
        badge: badge_for(savings),
        ..base_deal(index, record)
    }
}

fn fallback_deal(index: usize, record: &RawDealRecord) -> FeaturedDeal {
    let savings = record.rounded_savings();
    let discounted = savings > 0;
    let lead = if discounted {
        format!("Save ${:.2} on this game.", saved_amount(record))
    } else {
        "Special pricing available now!".to_string()
    };

    FeaturedDeal {
        subtitle: if discounted { format!("{}% OFF", savings) } else { "SPECIAL PRICE".into() },
        description: format!("{} {}", lead, rating_sentence(record).unwrap_or_default()),
        date_range: "AVAILABLE NOW".into(),
        original_price: if discounted { dollars(record.normal_price.as_deref()) } else { None },
        discount: discounted.then(|| format!("{}%", savings)),
        cta_secondary: "View Details".into(),
        badge: relaxed_badge_for(savings),
        ..base_deal(index, record)
    }
}

fn base_deal(index: usize, record: &RawDealRecord) -> FeaturedDeal {
    FeaturedDeal {
        title: record.title.clone().unwrap_or_default(),
        subtitle: String::new(),
        description: String::new(),
        date_range: String::new(),
        price: dollars(record.sale_price.as_deref()),
        original_price: None,
        discount: None,
        image: image_or(record.thumb.as_deref(), SLIDE_PLACEHOLDER),
        cta_text: "Get Deal".into(),
        cta_secondary: String::new(),
        badge: BadgeTier::Deal,
        gradient: gradient_for(index),
        deal_id: record.deal_id.clone(),
        steam_app_id: record.steam_app_id.clone(),
        meta: record.rating_meta(),
    }
}

/// The single slide shown when loading failed.
pub fn error_deal() -> FeaturedDeal {
    FeaturedDeal {
        title: "Unable to Load Deals".into(),
        subtitle: "ERROR".into(),
        description: "We're having trouble loading the latest game deals. Please check your connection and try again.".into(),
        date_range: "TRY AGAIN LATER".into(),
        price: None,
        original_price: None,
        discount: None,
        image: SLIDE_PLACEHOLDER.into(),
        cta_text: "Retry".into(),
        cta_secondary: "Go Back".into(),
        badge: BadgeTier::Error,
        gradient: ERROR_GRADIENT,
        deal_id: None,
        steam_app_id: None,
        meta: RatingMeta::default(),
    }
}

fn saved_amount(record: &RawDealRecord) -> f64 {
    record.normal_price_value().unwrap_or(0.0) - record.sale_price_value().unwrap_or(0.0)
}

fn rating_sentence(record: &RawDealRecord) -> Option<String> {
    record
        .steam_rating_text
        .as_deref()
        .map(|text| format!("Rated \"{}\" by Steam users.", text))
}

fn dollars(text: Option<&str>) -> Option<String> {
    text.map(|t| format!("${}", t))
}
