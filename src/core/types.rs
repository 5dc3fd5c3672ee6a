use std::time::Duration;

// ── Location & Config ──

#[derive(Debug, Clone)]
pub struct Location {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Widened-band allowances for the "Acceptable" tier.
#[derive(Debug, Clone, Copy)]
pub struct Tolerances {
    pub temperature: f64,
    pub humidity: f64,
}

pub struct Config {
    pub location_name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub timezone: String,
    pub language: String,
    pub forecast_days: u8,
    pub refresh_interval: Duration,
    pub tolerances: Tolerances,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            location_name: std::env::var("WEATHER_CITY").unwrap_or_else(|_| "Berlin".into()),
            latitude: std::env::var("WEATHER_LAT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(52.5200),
            longitude: std::env::var("WEATHER_LON")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(13.4050),
            timezone: std::env::var("WEATHER_TIMEZONE")
                .unwrap_or_else(|_| "Europe/Berlin".into()),
            language: std::env::var("GEOCODE_LANGUAGE").unwrap_or_else(|_| "en".into()),
            forecast_days: std::env::var("FORECAST_DAYS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(7),
            refresh_interval: Duration::from_secs(
                std::env::var("REFRESH_MINUTES")
                    .ok()
                    .and_then(|v| v.parse::<u64>().ok())
                    .unwrap_or(15)
                    * 60,
            ),
            tolerances: Tolerances {
                temperature: std::env::var("TOLERANCE_TEMP")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(2.0),
                humidity: std::env::var("TOLERANCE_HUMIDITY")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(10.0),
            },
        })
    }

    pub fn initial_location(&self) -> Location {
        Location {
            name: self.location_name.clone(),
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

// ── Forecast Data ──

/// Snapshot for the current hour. Fields the upstream response omits stay
/// `None` and render as a placeholder, never as zero.
#[derive(Debug, Clone, Default)]
pub struct CurrentReading {
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub precipitation: Option<f64>,
    pub weather_code: Option<i32>,
}

/// Hourly channels as parallel arrays, timestamps in the civil local time
/// of the forecast location at hour granularity (`2026-08-06T14:00`).
#[derive(Debug, Clone, Default)]
pub struct HourlySeries {
    pub time: Vec<String>,
    pub relative_humidity: Vec<Option<f64>>,
    pub precipitation_probability: Vec<Option<f64>>,
}

#[derive(Debug, Clone, Default)]
pub struct DailyForecast {
    pub time: Vec<String>,
    pub weather_code: Vec<Option<i32>>,
    pub temperature_max: Vec<Option<f64>>,
    pub temperature_min: Vec<Option<f64>>,
    pub precipitation_sum: Vec<Option<f64>>,
    pub precipitation_probability_max: Vec<Option<f64>>,
}

/// One fetch cycle's worth of data. Replaced wholesale on every successful
/// cycle, never merged with a previous bundle.
#[derive(Debug, Clone, Default)]
pub struct ForecastBundle {
    pub current: CurrentReading,
    pub hourly: HourlySeries,
    pub daily: DailyForecast,
}

#[derive(Debug, Clone)]
pub struct DailySummary {
    pub date: String,
    pub weekday: String,
    pub weather_code: Option<i32>,
    pub temperature_min: Option<f64>,
    pub temperature_max: Option<f64>,
    pub precipitation_sum: Option<f64>,
    pub precipitation_probability_max: Option<f64>,
    pub avg_humidity: Option<f64>,
}

// ── Crops & Status ──

/// Acceptable harvest conditions for one crop.
#[derive(Debug)]
pub struct CropThreshold {
    pub key: &'static str,
    pub name: &'static str,
    pub humidity_max: f64,
    pub temperature_min: f64,
    pub temperature_max: f64,
    pub note: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Ready,
    Acceptable,
    Problematic,
}

impl Tier {
    pub fn label(self) -> &'static str {
        match self {
            Tier::Ready => "Ready to harvest",
            Tier::Acceptable => "Acceptable",
            Tier::Problematic => "Problematic",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub enum CropSelection {
    #[default]
    All,
    Keys(Vec<String>),
}

impl CropSelection {
    pub fn includes(&self, key: &str) -> bool {
        match self {
            CropSelection::All => true,
            CropSelection::Keys(keys) => keys.iter().any(|k| k == key),
        }
    }
}

// ── Rendered Frame ──

#[derive(Debug, Clone)]
pub struct TodayPanel {
    pub weather_code: Option<i32>,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub precipitation: Option<f64>,
    pub precipitation_probability: Option<f64>,
}

#[derive(Debug)]
pub struct CropCard {
    pub crop: &'static CropThreshold,
    pub tier: Tier,
}

/// Everything one dashboard repaint needs.
#[derive(Debug)]
pub struct Frame {
    pub location: Location,
    pub updated_at: String,
    pub today: TodayPanel,
    pub tomorrow: Option<DailySummary>,
    pub week: Vec<DailySummary>,
    pub cards: Vec<CropCard>,
}
