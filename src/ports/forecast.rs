use crate::core::types::{ForecastBundle, Location};
use anyhow::Result;
use async_trait::async_trait;

#[async_trait]
pub trait ForecastFeed: Send + Sync {
    async fn forecast(&self, location: &Location) -> Result<ForecastBundle>;
}
