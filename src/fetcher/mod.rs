// Fetcher module: the HTTP client and the seam the transform pipelines depend on.

pub mod http;
pub mod traits;

pub use http::CheapSharkClient;
pub use traits::DealSource;
