use crate::core::types::*;
use crate::ports::forecast::ForecastFeed;
use crate::ports::geocode::Geocoder;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;

const FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";
const GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";

pub struct OpenMeteoClient {
    client: reqwest::Client,
    timezone: String,
    language: String,
    forecast_days: u8,
}

impl OpenMeteoClient {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(10))
                .build()?,
            timezone: config.timezone.clone(),
            language: config.language.clone(),
            forecast_days: config.forecast_days,
        })
    }
}

// ── Wire Format ──

#[derive(Debug, Default, Deserialize)]
struct ForecastResponse {
    #[serde(default)]
    current: CurrentBlock,
    #[serde(default)]
    hourly: HourlyBlock,
    #[serde(default)]
    daily: DailyBlock,
}

#[derive(Debug, Default, Deserialize)]
struct CurrentBlock {
    temperature_2m: Option<f64>,
    relative_humidity_2m: Option<f64>,
    precipitation: Option<f64>,
    weather_code: Option<i32>,
}

#[derive(Debug, Default, Deserialize)]
struct HourlyBlock {
    #[serde(default)]
    time: Vec<String>,
    #[serde(default)]
    relative_humidity_2m: Vec<Option<f64>>,
    #[serde(default)]
    precipitation_probability: Vec<Option<f64>>,
}

#[derive(Debug, Default, Deserialize)]
struct DailyBlock {
    #[serde(default)]
    time: Vec<String>,
    #[serde(default)]
    weather_code: Vec<Option<i32>>,
    #[serde(default)]
    temperature_2m_max: Vec<Option<f64>>,
    #[serde(default)]
    temperature_2m_min: Vec<Option<f64>>,
    #[serde(default)]
    precipitation_sum: Vec<Option<f64>>,
    #[serde(default)]
    precipitation_probability_max: Vec<Option<f64>>,
}

impl From<ForecastResponse> for ForecastBundle {
    fn from(resp: ForecastResponse) -> Self {
        ForecastBundle {
            current: CurrentReading {
                temperature: resp.current.temperature_2m,
                humidity: resp.current.relative_humidity_2m,
                precipitation: resp.current.precipitation,
                weather_code: resp.current.weather_code,
            },
            hourly: HourlySeries {
                time: resp.hourly.time,
                relative_humidity: resp.hourly.relative_humidity_2m,
                precipitation_probability: resp.hourly.precipitation_probability,
            },
            daily: DailyForecast {
                time: resp.daily.time,
                weather_code: resp.daily.weather_code,
                temperature_max: resp.daily.temperature_2m_max,
                temperature_min: resp.daily.temperature_2m_min,
                precipitation_sum: resp.daily.precipitation_sum,
                precipitation_probability_max: resp.daily.precipitation_probability_max,
            },
        }
    }
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    results: Vec<GeocodeHit>,
}

#[derive(Debug, Deserialize)]
struct GeocodeHit {
    name: String,
    latitude: f64,
    longitude: f64,
    country: Option<String>,
}

fn first_hit(response: GeocodeResponse) -> Option<Location> {
    response.results.into_iter().next().map(|hit| Location {
        name: match hit.country {
            Some(country) => format!("{}, {}", hit.name, country),
            None => hit.name,
        },
        latitude: hit.latitude,
        longitude: hit.longitude,
    })
}

// ── Port Implementations ──

#[async_trait]
impl ForecastFeed for OpenMeteoClient {
    async fn forecast(&self, location: &Location) -> Result<ForecastBundle> {
        let url = format!(
            "{}?latitude={}&longitude={}&timezone={}&current=temperature_2m,relative_humidity_2m,precipitation,weather_code&hourly=precipitation_probability,relative_humidity_2m&daily=weather_code,temperature_2m_max,temperature_2m_min,precipitation_sum,precipitation_probability_max&forecast_days={}",
            FORECAST_URL, location.latitude, location.longitude, self.timezone, self.forecast_days
        );

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .context("Open-Meteo request failed")?;

        if !resp.status().is_success() {
            anyhow::bail!("Open-Meteo HTTP {}", resp.status());
        }

        let parsed: ForecastResponse = resp
            .json()
            .await
            .context("Open-Meteo response was not valid JSON")?;
        Ok(parsed.into())
    }
}

#[async_trait]
impl Geocoder for OpenMeteoClient {
    async fn search(&self, query: &str) -> Result<Option<Location>> {
        let resp = self
            .client
            .get(GEOCODING_URL)
            .query(&[
                ("name", query),
                ("count", "1"),
                ("language", self.language.as_str()),
                ("format", "json"),
            ])
            .send()
            .await
            .context("Geocoding request failed")?;

        if !resp.status().is_success() {
            anyhow::bail!("Geocoding HTTP {}", resp.status());
        }

        let parsed: GeocodeResponse = resp
            .json()
            .await
            .context("Geocoding response was not valid JSON")?;
        Ok(first_hit(parsed))
    }
}
