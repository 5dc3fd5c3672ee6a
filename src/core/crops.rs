use crate::core::types::CropThreshold;

/// Harvest tolerance bands per crop. Loaded once at startup and validated
/// in `safety::validate_startup`; never mutated afterwards.
pub const CROPS: &[CropThreshold] = &[
    CropThreshold {
        key: "wheat",
        name: "Wheat",
        humidity_max: 60.0,
        temperature_min: 22.0,
        temperature_max: 26.0,
        note: "Keep grain moisture under 18 %, otherwise quality drops.",
    },
    CropThreshold {
        key: "maize",
        name: "Maize",
        humidity_max: 20.0,
        temperature_min: 15.0,
        temperature_max: 30.0,
        note: "High humidity raises the mould risk.",
    },
    CropThreshold {
        key: "rapeseed",
        name: "Rapeseed",
        humidity_max: 40.0,
        temperature_min: 20.0,
        temperature_max: 25.0,
        note: "Very sensitive, sprouting risk when damp.",
    },
    CropThreshold {
        key: "barley",
        name: "Barley",
        humidity_max: 17.0,
        temperature_min: 18.0,
        temperature_max: 24.0,
        note: "Malting quality suffers when too damp.",
    },
    CropThreshold {
        key: "potatoes",
        name: "Potatoes",
        humidity_max: 75.0,
        temperature_min: 10.0,
        temperature_max: 18.0,
        note: "Skin set matters, heat brings rot risk.",
    },
    CropThreshold {
        key: "sugar_beet",
        name: "Sugar beet",
        humidity_max: 80.0,
        temperature_min: 8.0,
        temperature_max: 15.0,
        note: "Harvest cool, otherwise storage losses.",
    },
    CropThreshold {
        key: "sunflowers",
        name: "Sunflowers",
        humidity_max: 15.0,
        temperature_min: 22.0,
        temperature_max: 28.0,
        note: "Oil quality drops with damp kernels.",
    },
];

pub fn find(key: &str) -> Option<&'static CropThreshold> {
    CROPS.iter().find(|c| c.key == key)
}
