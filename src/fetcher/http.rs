use crate::config::AppConfig;
use crate::fetcher::traits::DealSource;
use crate::model::{DealQuery, FetchError, RawDealRecord};

use reqwest::{Client, Url};
use std::time::Duration;
use tracing::{debug, warn};

/// Deals API client. One GET per call, no retries.
pub struct CheapSharkClient {
    client: Client,
    endpoint: String,
}

impl CheapSharkClient {
    pub fn new(config: &AppConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()
            .map_err(|e| FetchError::Http(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: config.deals_endpoint.clone(),
        })
    }

    pub fn build_url(&self, query: &DealQuery) -> Result<Url, FetchError> {
        Url::parse_with_params(&self.endpoint, query.params())
            .map_err(|e| FetchError::Http(format!("invalid endpoint {}: {}", self.endpoint, e)))
    }
}

#[async_trait::async_trait]
impl DealSource for CheapSharkClient {
    async fn fetch(&self, query: &DealQuery) -> Result<Vec<RawDealRecord>, FetchError> {
        let url = self.build_url(query)?;
        debug!("GET {}", url);

        let response = self.client.get(url.clone()).send().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout
            } else {
                FetchError::Http(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!("Deals API responded [{}] for {}", status, url);
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.text().await.map_err(|e| FetchError::Http(e.to_string()))?;
        let records: Vec<RawDealRecord> =
            serde_json::from_str(&body).map_err(|e| FetchError::Decode(e.to_string()))?;
        debug!("Received {} deal records", records.len());
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_match_the_three_queries() {
        let client = CheapSharkClient::new(&AppConfig::default()).unwrap();
        assert_eq!(
            client.build_url(&DealQuery::featured()).unwrap().as_str(),
            "https://www.cheapshark.com/api/1.0/deals?storeID=1&upperPrice=60&pageSize=10"
        );
        assert_eq!(
            client.build_url(&DealQuery::featured_fallback()).unwrap().as_str(),
            "https://www.cheapshark.com/api/1.0/deals?storeID=1&pageSize=5"
        );
        assert_eq!(
            client.build_url(&DealQuery::top_discounts()).unwrap().as_str(),
            "https://www.cheapshark.com/api/1.0/deals?storeID=1&pageSize=25&onSale=1"
        );
    }

    #[test]
    fn bad_endpoint_is_reported() {
        let config = AppConfig { deals_endpoint: "not a url".into(), ..AppConfig::default() };
        let client = CheapSharkClient::new(&config).unwrap();
        assert!(matches!(client.build_url(&DealQuery::featured()), Err(FetchError::Http(_))));
    }

    #[tokio::test]
    async fn unreachable_host_is_a_fetch_error() {
        let config = AppConfig {
            deals_endpoint: "http://127.0.0.1:9/deals".into(),
            request_timeout_seconds: 2,
            ..AppConfig::default()
        };
        let client = CheapSharkClient::new(&config).unwrap();
        let result = client.fetch(&DealQuery::featured()).await;
        assert!(matches!(result, Err(FetchError::Http(_)) | Err(FetchError::Timeout)));
    }
}
