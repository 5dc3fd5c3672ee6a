/// WMO weather interpretation codes reduced to an icon and a short text.
/// Unknown codes degrade to a placeholder instead of failing.
pub fn icon(code: i32) -> &'static str {
    match code {
        0 => "☀️",
        1 => "🌤️",
        2 => "⛅",
        3 => "☁️",
        45 | 48 => "🌫️",
        51 | 53 | 80 => "🌦️",
        55 | 61 | 63 | 65 | 66 | 67 | 81 => "🌧️",
        71 | 73 | 85 | 86 => "🌨️",
        75 | 77 => "❄️",
        82 | 95 | 96 | 99 => "⛈️",
        _ => "❓",
    }
}

pub fn text(code: i32) -> &'static str {
    match code {
        0 => "Clear",
        1 => "Mostly sunny",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 => "Fog",
        48 => "Rime fog",
        51 | 53 => "Drizzle",
        55 => "Heavy drizzle",
        61 | 63 => "Rain",
        65 => "Heavy rain",
        66 => "Freezing rain",
        67 => "Heavy freezing rain",
        71 | 73 => "Snow",
        75 => "Heavy snow",
        77 => "Snow grains",
        80 | 81 => "Rain showers",
        82 => "Heavy showers",
        85 => "Snow showers",
        86 => "Heavy snow showers",
        95 => "Thunderstorm",
        96 | 99 => "Thunderstorm with hail",
        _ => "Unknown conditions",
    }
}

pub fn describe(code: Option<i32>) -> String {
    match code {
        Some(c) => format!("{} {}", icon(c), text(c)),
        None => "–".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_map() {
        assert_eq!(icon(0), "☀️");
        assert_eq!(text(0), "Clear");
        assert_eq!(text(95), "Thunderstorm");
    }

    #[test]
    fn unknown_codes_degrade_to_placeholder() {
        assert_eq!(icon(42), "❓");
        assert_eq!(text(42), "Unknown conditions");
        assert_eq!(describe(None), "–");
    }
}
