// Top Discounts rail: exclusions, on-sale filter, category classification.
use std::collections::HashSet;

use crate::fetcher::DealSource;
use crate::model::{DealQuery, DiscountCard, FetchError, RawDealRecord};
use crate::transform::rules::category_for;
use crate::transform::{CARD_PLACEHOLDER, image_or};
use tracing::info;

pub const DISCOUNT_COUNT: usize = 15;

pub async fn load_discounts(
    source: &dyn DealSource,
    excluded: &HashSet<String>,
) -> Result<Vec<DiscountCard>, FetchError> {
    let records = source.fetch(&DealQuery::top_discounts()).await?;
    let cards = map_discounts(&records, excluded);
    info!("Top discounts: {} cards ({} excluded ids)", cards.len(), excluded.len());
    Ok(cards)
}

pub fn map_discounts(records: &[RawDealRecord], excluded: &HashSet<String>) -> Vec<DiscountCard> {
    records
        .iter()
        .filter(|r| !r.deal_id.as_ref().is_some_and(|id| excluded.contains(id)))
        .filter(|r| r.savings().is_some_and(|s| s > 0.0))
        .take(DISCOUNT_COUNT)
        .map(discount_card)
        .collect()
}

fn discount_card(record: &RawDealRecord) -> DiscountCard {
    DiscountCard {
        title: record.title.clone().unwrap_or_default(),
        category: category_for(record.metacritic_score_value(), record.steam_rating_text.as_deref()),
        image: image_or(record.thumb.as_deref(), CARD_PLACEHOLDER),
        discount: record.rounded_savings(),
        original_price: record.normal_price_value().unwrap_or(0.0),
        current_price: record.sale_price_value().unwrap_or(0.0),
        deal_id: record.deal_id.clone(),
        steam_app_id: record.steam_app_id.clone(),
        metacritic_score: record.metacritic_score.clone(),
        steam_rating_text: record.steam_rating_text.clone(),
        steam_rating_percent: record.steam_rating_percent.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Category;

    fn record(id: &str, savings: &str) -> RawDealRecord {
        RawDealRecord {
            deal_id: Some(id.into()),
            title: Some(format!("Game {id}")),
            savings: Some(savings.into()),
            normal_price: Some("29.99".into()),
            sale_price: Some("7.49".into()),
            thumb: Some(format!("https://cdn.example/{id}.jpg")),
            ..RawDealRecord::default()
        }
    }

    struct FixedSource(Vec<RawDealRecord>);

    #[async_trait::async_trait]
    impl DealSource for FixedSource {
        async fn fetch(&self, query: &DealQuery) -> Result<Vec<RawDealRecord>, FetchError> {
            assert_eq!(query, &DealQuery::top_discounts());
            Ok(self.0.clone())
        }
    }

    struct FailingSource;

    #[async_trait::async_trait]
    impl DealSource for FailingSource {
        async fn fetch(&self, _query: &DealQuery) -> Result<Vec<RawDealRecord>, FetchError> {
            Err(FetchError::Http("connection refused".into()))
        }
    }

    #[test]
    fn excluded_ids_are_dropped() {
        let excluded: HashSet<String> = ["1".to_string()].into();
        let cards = map_discounts(&[record("1", "50"), record("2", "40")], &excluded);
        let ids: Vec<_> = cards.iter().filter_map(|c| c.deal_id.as_deref()).collect();
        assert_eq!(ids, ["2"]);
    }

    #[test]
    fn only_discounted_records_and_at_most_fifteen() {
        let mut records: Vec<_> = (0..30).map(|i| record(&i.to_string(), "10")).collect();
        records[0].savings = Some("0".into());
        records[1].savings = None;
        let cards = map_discounts(&records, &HashSet::new());
        assert_eq!(cards.len(), DISCOUNT_COUNT);
        assert_eq!(cards[0].deal_id.as_deref(), Some("2"));
    }

    #[test]
    fn card_fields() {
        let r = RawDealRecord {
            metacritic_score: Some("78".into()),
            steam_rating_text: Some("Overwhelmingly Positive".into()),
            ..record("7", "74.9")
        };
        let card = &map_discounts(&[r], &HashSet::new())[0];
        assert_eq!(card.category, Category::HighlyRated);
        assert_eq!(card.discount, 75);
        assert_eq!(card.original_price, 29.99);
        assert_eq!(card.current_price, 7.49);
        assert_eq!(card.image, "https://cdn.example/7.jpg");
    }

    #[test]
    fn rating_text_categories() {
        let with_text = |text: &str| RawDealRecord { steam_rating_text: Some(text.into()), ..record("1", "10") };
        let cards = map_discounts(
            &[with_text("Very Positive"), with_text("Mostly Positive"), with_text("Mixed")],
            &HashSet::new(),
        );
        let categories: Vec<_> = cards.iter().map(|c| c.category).collect();
        assert_eq!(categories, [Category::VeryPositive, Category::MostlyPositive, Category::Action]);
    }

    #[tokio::test]
    async fn load_applies_exclusions() {
        let source = FixedSource(vec![record("1", "50"), record("2", "50")]);
        let excluded: HashSet<String> = ["1".to_string()].into();
        let cards = load_discounts(&source, &excluded).await.unwrap();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].deal_id.as_deref(), Some("2"));
    }

    #[tokio::test]
    async fn load_error_is_returned() {
        let err = load_discounts(&FailingSource, &HashSet::new()).await.unwrap_err();
        assert_eq!(err.to_string(), "Network error: connection refused");
    }
}
