pub mod classify;
pub mod error;
pub mod fetch;
pub mod harvest;
pub mod result;

pub use classify::{Bucket, Category, Classification, classify, dedupe_by_url};
pub use error::ScanError;
pub use fetch::{HttpFetcher, RenderClient, SmartFetcher};
pub use harvest::{Harvest, harvest_nav_links};
pub use result::{DiscoveredLink, FetchResult, Site, Strategy};
