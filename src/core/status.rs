use crate::core::types::{CropThreshold, Tier, Tolerances};

/// Tri-state harvest status, first match wins.
///
/// Ready needs both readings inside the crop's band (inclusive bounds).
/// Acceptable needs temperature inside the band widened by the temperature
/// tolerance AND humidity under the widened cap at the same time. Everything
/// else is Problematic. A missing reading fails every positive condition,
/// so it always lands on Problematic instead of comparing against nothing.
pub fn classify(
    temperature: Option<f64>,
    humidity: Option<f64>,
    crop: &CropThreshold,
    tolerances: &Tolerances,
) -> Tier {
    let (temp, rh) = match (temperature, humidity) {
        (Some(t), Some(h)) => (t, h),
        _ => return Tier::Problematic,
    };

    if rh <= crop.humidity_max && temp >= crop.temperature_min && temp <= crop.temperature_max {
        return Tier::Ready;
    }

    let near_temp = temp >= crop.temperature_min - tolerances.temperature
        && temp <= crop.temperature_max + tolerances.temperature;
    let near_rh = rh <= crop.humidity_max + tolerances.humidity;
    if near_temp && near_rh {
        return Tier::Acceptable;
    }

    Tier::Problematic
}
