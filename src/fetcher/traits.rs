use crate::model::{DealQuery, FetchError, RawDealRecord};

#[async_trait::async_trait]
pub trait DealSource: Send + Sync {
    async fn fetch(&self, query: &DealQuery) -> Result<Vec<RawDealRecord>, FetchError>;
}
