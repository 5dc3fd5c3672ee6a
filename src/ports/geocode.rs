use crate::core::types::Location;
use anyhow::Result;
use async_trait::async_trait;

#[async_trait]
pub trait Geocoder: Send + Sync {
    /// `Ok(None)` means the search ran but matched nothing, as opposed to a
    /// transport failure.
    async fn search(&self, query: &str) -> Result<Option<Location>>;
}
