use crate::core::types::{Config, CropThreshold};
use std::collections::HashSet;
use std::time::Duration;

pub fn validate_startup(config: &Config, crops: &[CropThreshold]) -> anyhow::Result<()> {
    if crops.is_empty() {
        anyhow::bail!("Crop threshold table is empty");
    }

    let mut keys = HashSet::new();
    for crop in crops {
        if !keys.insert(crop.key) {
            anyhow::bail!("Duplicate crop key '{}'", crop.key);
        }
        if crop.temperature_min > crop.temperature_max {
            anyhow::bail!(
                "Crop '{}' has an inverted temperature band ({} > {})",
                crop.key,
                crop.temperature_min,
                crop.temperature_max
            );
        }
        if !(0.0..=100.0).contains(&crop.humidity_max) {
            anyhow::bail!(
                "Crop '{}' has humidity_max {} outside 0..=100",
                crop.key,
                crop.humidity_max
            );
        }
    }

    if !(-90.0..=90.0).contains(&config.latitude) {
        anyhow::bail!("WEATHER_LAT {} is out of range", config.latitude);
    }
    if !(-180.0..=180.0).contains(&config.longitude) {
        anyhow::bail!("WEATHER_LON {} is out of range", config.longitude);
    }
    if config.timezone.is_empty() {
        anyhow::bail!("WEATHER_TIMEZONE is empty");
    }
    if config.refresh_interval < Duration::from_secs(60) {
        anyhow::bail!("REFRESH_MINUTES must be at least 1");
    }
    if config.forecast_days == 0 || config.forecast_days > 16 {
        anyhow::bail!("FORECAST_DAYS must be between 1 and 16");
    }

    Ok(())
}
