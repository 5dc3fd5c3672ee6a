use crate::core::refresh::Command;
use crate::core::types::*;
use crate::core::wmo;
use crate::ports::dashboard::Dashboard;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

pub struct ConsoleDashboard;

impl Dashboard for ConsoleDashboard {
    fn render(&self, frame: &Frame) {
        let mut out = String::new();
        let loc = &frame.location;
        out.push_str(&format!(
            "\n── {} ({:.4}, {:.4}) · updated {} ──\n",
            loc.name, loc.latitude, loc.longitude, frame.updated_at
        ));

        let t = &frame.today;
        out.push_str(&format!(
            "Today     {:<22} {:>8}  rain {} ({})  humidity {}\n",
            wmo::describe(t.weather_code),
            fmt_num(t.temperature, "°C"),
            fmt_num(t.precipitation, "mm"),
            fmt_num(t.precipitation_probability, "%"),
            fmt_num(t.humidity, "%"),
        ));

        match &frame.tomorrow {
            Some(d) => out.push_str(&format!(
                "Tomorrow  {:<22} {} / {}  rain {} ({})  humidity {}\n",
                wmo::describe(d.weather_code),
                fmt_num(d.temperature_min, "°C"),
                fmt_num(d.temperature_max, "°C"),
                fmt_num(d.precipitation_sum, "mm"),
                fmt_num(d.precipitation_probability_max, "%"),
                fmt_num(d.avg_humidity, "%"),
            )),
            None => out.push_str("Tomorrow  no data\n"),
        }

        out.push('\n');
        for day in &frame.week {
            out.push_str(&format!(
                "  {:<4} {:<22} {} / {}  rain {} ({})\n",
                day.weekday,
                wmo::describe(day.weather_code),
                fmt_num(day.temperature_min, "°C"),
                fmt_num(day.temperature_max, "°C"),
                fmt_num(day.precipitation_sum, "mm"),
                fmt_num(day.precipitation_probability_max, "%"),
            ));
        }

        if !frame.cards.is_empty() {
            out.push('\n');
        }
        for card in &frame.cards {
            let crop = card.crop;
            let fit: String = frame.week.iter().map(|d| day_fit(d, crop)).collect();
            out.push_str(&format!(
                "[{:<16}] {:<12} optimal {}-{} °C, humidity <= {} %  week {}\n",
                card.tier.label(),
                crop.name,
                crop.temperature_min,
                crop.temperature_max,
                crop.humidity_max,
                fit,
            ));
            out.push_str(&format!("                   {}\n", crop.note));
        }

        print!("{}", out);
    }

    fn status(&self, message: &str) {
        println!("· {}", message);
    }

    fn alert(&self, message: &str) {
        println!("⚠ {}", message);
    }
}

/// Number with unit, one decimal at most, "–" for anything missing.
fn fmt_num(value: Option<f64>, unit: &str) -> String {
    let suffix = if unit.is_empty() {
        String::new()
    } else {
        format!(" {}", unit)
    };
    match value {
        Some(v) if v.is_finite() => {
            let rounded = (v * 10.0).round() / 10.0;
            if rounded.fract() == 0.0 {
                format!("{:.0}{}", rounded, suffix)
            } else {
                format!("{:.1}{}", rounded, suffix)
            }
        }
        _ => format!("–{}", suffix),
    }
}

/// One marker per forecast day: '+' inside the crop's band, '-' outside,
/// '?' when the day is missing a value.
fn day_fit(day: &DailySummary, crop: &CropThreshold) -> char {
    match (day.temperature_min, day.temperature_max, day.avg_humidity) {
        (Some(tmin), Some(tmax), Some(rh)) => {
            if rh <= crop.humidity_max
                && tmin >= crop.temperature_min
                && tmax <= crop.temperature_max
            {
                '+'
            } else {
                '-'
            }
        }
        _ => '?',
    }
}

// ── Command Input ──

/// Reads stdin lines and forwards parsed commands until the channel closes.
pub fn spawn_command_reader(tx: mpsc::Sender<Command>) {
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            if let Some(cmd) = parse_command(&line) {
                if tx.send(cmd).await.is_err() {
                    break;
                }
            }
        }
    });
}

/// Bare words are control commands, `crops ...` adjusts the card filter,
/// everything else is a location search.
pub fn parse_command(line: &str) -> Option<Command> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    match line {
        "pause" => Some(Command::Pause),
        "resume" => Some(Command::Resume),
        "refresh" => Some(Command::Refresh),
        "quit" | "exit" => Some(Command::Quit),
        _ => {
            if let Some(rest) = line.strip_prefix("crops ") {
                let rest = rest.trim();
                let selection = match rest {
                    "all" => CropSelection::All,
                    "none" => CropSelection::Keys(Vec::new()),
                    _ => CropSelection::Keys(
                        rest.split(',')
                            .map(|k| k.trim().to_string())
                            .filter(|k| !k.is_empty())
                            .collect(),
                    ),
                };
                Some(Command::Crops(selection))
            } else {
                Some(Command::Search(line.to_string()))
            }
        }
    }
}
