use crate::core::{aggregate, crops, status, types::*};
use crate::ports::dashboard::Dashboard;
use chrono::{DateTime, Local, NaiveDate};

/// Turns one fetched bundle into a full dashboard repaint.
pub fn render(
    bundle: &ForecastBundle,
    location: &Location,
    selection: &CropSelection,
    tolerances: &Tolerances,
    sink: &dyn Dashboard,
) {
    let frame = build_frame(bundle, location, selection, tolerances, &Local::now());
    sink.render(&frame);
}

pub fn build_frame(
    bundle: &ForecastBundle,
    location: &Location,
    selection: &CropSelection,
    tolerances: &Tolerances,
    now: &DateTime<Local>,
) -> Frame {
    // 1. AGGREGATE hourly humidity into one mean per forecast day
    let avg_humidity = aggregate::daily_mean(
        &bundle.hourly.time,
        &bundle.hourly.relative_humidity,
        &bundle.daily.time,
    );

    // 2. SUMMARIES, one row per forecast day
    let week = build_summaries(&bundle.daily, &avg_humidity);

    // 3. TODAY: current reading plus the current hour's rain probability.
    // The hour lookup trusts the configured timezone to match the host
    // clock; when they drift apart the probability shows as missing.
    let hour_prefix = now.format("%Y-%m-%dT%H").to_string();
    let today = TodayPanel {
        weather_code: bundle.current.weather_code,
        temperature: bundle.current.temperature,
        humidity: bundle.current.humidity,
        precipitation: bundle.current.precipitation,
        precipitation_probability: current_hour_pop(&bundle.hourly, &hour_prefix),
    };

    // 4. TOMORROW: second row of the daily block
    let tomorrow = week.get(1).cloned();

    // 5. CARDS: classify every selected crop against the current reading
    let cards = crops::CROPS
        .iter()
        .filter(|crop| selection.includes(crop.key))
        .map(|crop| CropCard {
            crop,
            tier: status::classify(
                bundle.current.temperature,
                bundle.current.humidity,
                crop,
                tolerances,
            ),
        })
        .collect();

    Frame {
        location: location.clone(),
        updated_at: now.format("%Y-%m-%d %H:%M").to_string(),
        today,
        tomorrow,
        week,
        cards,
    }
}

fn build_summaries(daily: &DailyForecast, avg_humidity: &[Option<f64>]) -> Vec<DailySummary> {
    daily
        .time
        .iter()
        .enumerate()
        .map(|(i, date)| DailySummary {
            date: date.clone(),
            weekday: weekday_label(date),
            weather_code: channel(&daily.weather_code, i),
            temperature_min: channel(&daily.temperature_min, i),
            temperature_max: channel(&daily.temperature_max, i),
            precipitation_sum: channel(&daily.precipitation_sum, i),
            precipitation_probability_max: channel(&daily.precipitation_probability_max, i),
            avg_humidity: avg_humidity.get(i).copied().flatten(),
        })
        .collect()
}

fn channel<T: Copy>(values: &[Option<T>], i: usize) -> Option<T> {
    values.get(i).copied().flatten()
}

/// Rain probability for the hour whose timestamp starts with `hour_prefix`
/// (`YYYY-MM-DDTHH`). Misses resolve to `None`, not zero.
pub fn current_hour_pop(hourly: &HourlySeries, hour_prefix: &str) -> Option<f64> {
    hourly
        .time
        .iter()
        .position(|t| t.starts_with(hour_prefix))
        .and_then(|i| channel(&hourly.precipitation_probability, i))
}

fn weekday_label(date: &str) -> String {
    match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        Ok(d) => d.format("%a").to_string(),
        Err(_) => date.to_string(),
    }
}
