use std::collections::BTreeMap;

use ::palette::{FromColor, Hsl, Srgb};

use crate::color::{self, ColorResult, ToneSampler};

/// Tone-keyed hex colors produced by one derivation run.
pub type ColorSet = BTreeMap<u8, String>;

/// Tone set used for the primary and status ramps.
pub const STANDARD_TONES: &[u8] = &[
    1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 15, 20, 25, 30, 35, 40, 45, 50, 55, 60, 65, 70, 75, 80, 85,
    90, 95, 99,
];

/// Neutral ramp adds dense 90-99 sampling for smoother light-mode backgrounds.
pub const NEUTRAL_TONES: &[u8] = &[
    1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 15, 20, 25, 30, 35, 40, 45, 50, 55, 60, 65, 70, 75, 80, 85,
    90, 91, 92, 93, 94, 95, 96, 97, 98, 99,
];

/// Saturation forced onto the neutral ramp. Low enough to read as gray while
/// keeping a faint brand tint. Tunable per generation via `EngineConfig`.
pub const DEFAULT_NEUTRAL_SATURATION: f32 = 0.04;

const NEUTRAL_SATURATION_MAX: f32 = 0.2;

/// Default hue/chroma anchor for a status palette when no override seed is given.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusAnchor {
    pub hue: f64,
    pub chroma: f64,
}

pub const SUCCESS_ANCHOR: StatusAnchor = StatusAnchor {
    hue: 145.0,
    chroma: 55.0,
};
pub const WARNING_ANCHOR: StatusAnchor = StatusAnchor {
    hue: 40.0,
    chroma: 70.0,
};
pub const INFO_ANCHOR: StatusAnchor = StatusAnchor {
    hue: 250.0,
    chroma: 60.0,
};
pub const FAILURE_ANCHOR: StatusAnchor = StatusAnchor {
    hue: 25.0,
    chroma: 84.0,
};

/// One derived ramp plus the exact hex that anchors it.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedPalette {
    pub colors: ColorSet,
    pub base_hex: String,
    /// True when the caller supplied an override seed for this slot.
    pub overridden: bool,
}

/// The full palette bundle one generation works from.
#[derive(Debug, Clone, PartialEq)]
pub struct DesignSystemColors {
    pub primary: DerivedPalette,
    pub neutral: DerivedPalette,
    pub success: DerivedPalette,
    pub warning: DerivedPalette,
    pub info: DerivedPalette,
    pub failure: DerivedPalette,
}

/// Optional override seeds accompanying the primary brand color.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeedOverrides {
    pub neutral_hex: Option<String>,
    pub success_hex: Option<String>,
    pub warning_hex: Option<String>,
    pub info_hex: Option<String>,
    pub failure_hex: Option<String>,
}

/// Sample the seed-anchored tonal palette at each requested tone.
/// Pure: identical inputs always yield an identical map.
pub fn generate_tonal_palette(seed_hex: &str, tones: &[u8]) -> ColorResult<ColorSet> {
    let sampler = ToneSampler::from_seed(seed_hex)?;
    Ok(sample_tones(&sampler, tones))
}

/// Derive the neutral ramp from the primary color.
///
/// This leg deliberately runs in HSL rather than the perceptual model: hue and
/// lightness are kept, saturation is forced to a small constant. Building a
/// neutral ramp directly in hue/chroma/tone space drifts hue at extreme tones;
/// hue/lightness-preserving desaturation keeps the ramp designer-predictable.
/// Returns the ramp plus the computed neutral base hex.
pub fn derive_neutral_from_primary(
    primary_hex: &str,
    tones: &[u8],
    neutral_saturation: f32,
) -> ColorResult<(ColorSet, String)> {
    let [r, g, b] = color::hex_to_rgb_f32(primary_hex)?;
    let hsl = Hsl::from_color(Srgb::new(r, g, b));
    let saturation = neutral_saturation.clamp(0.0, NEUTRAL_SATURATION_MAX);
    let desaturated = Hsl::new(hsl.hue, saturation, hsl.lightness);
    let rgb = Srgb::from_color(desaturated);
    let base_hex = color::format_hex(crate::color::Rgb8 {
        r: (rgb.red.clamp(0.0, 1.0) * 255.0).round() as u8,
        g: (rgb.green.clamp(0.0, 1.0) * 255.0).round() as u8,
        b: (rgb.blue.clamp(0.0, 1.0) * 255.0).round() as u8,
    });
    let colors = generate_tonal_palette(&base_hex, tones)?;
    Ok((colors, base_hex))
}

/// Derive a status ramp from an override seed, or from the fixed anchor when
/// no override is given. The base is the override hex itself, or the anchor's
/// tone-50 sample.
pub fn derive_status_palette(
    anchor: StatusAnchor,
    override_hex: Option<&str>,
    tones: &[u8],
) -> ColorResult<(ColorSet, String)> {
    match override_hex {
        Some(hex) => {
            let colors = generate_tonal_palette(hex, tones)?;
            let rgb = color::parse_hex(hex)?;
            Ok((colors, color::format_hex(rgb)))
        }
        None => {
            let sampler = ToneSampler::new(anchor.hue, anchor.chroma);
            let colors = sample_tones(&sampler, tones);
            let base_hex = sampler.tone(50.0);
            Ok((colors, base_hex))
        }
    }
}

/// Derive every palette a generation needs. Pure; all color math happens here,
/// before the first Token Store write.
pub fn derive_design_system(
    primary_hex: &str,
    overrides: &SeedOverrides,
    neutral_saturation: f32,
) -> ColorResult<DesignSystemColors> {
    let primary_rgb = color::parse_hex(primary_hex)?;
    let primary = DerivedPalette {
        colors: generate_tonal_palette(primary_hex, STANDARD_TONES)?,
        base_hex: color::format_hex(primary_rgb),
        overridden: true,
    };

    let neutral = match overrides.neutral_hex.as_deref() {
        Some(hex) => {
            let (colors, base_hex) =
                derive_neutral_from_primary(hex, NEUTRAL_TONES, neutral_saturation)?;
            DerivedPalette {
                colors,
                base_hex,
                overridden: true,
            }
        }
        None => {
            let (colors, base_hex) =
                derive_neutral_from_primary(primary_hex, NEUTRAL_TONES, neutral_saturation)?;
            DerivedPalette {
                colors,
                base_hex,
                overridden: false,
            }
        }
    };

    Ok(DesignSystemColors {
        primary,
        neutral,
        success: status_slot(SUCCESS_ANCHOR, overrides.success_hex.as_deref())?,
        warning: status_slot(WARNING_ANCHOR, overrides.warning_hex.as_deref())?,
        info: status_slot(INFO_ANCHOR, overrides.info_hex.as_deref())?,
        failure: status_slot(FAILURE_ANCHOR, overrides.failure_hex.as_deref())?,
    })
}

fn status_slot(anchor: StatusAnchor, override_hex: Option<&str>) -> ColorResult<DerivedPalette> {
    let (colors, base_hex) = derive_status_palette(anchor, override_hex, STANDARD_TONES)?;
    Ok(DerivedPalette {
        colors,
        base_hex,
        overridden: override_hex.is_some(),
    })
}

fn sample_tones(sampler: &ToneSampler, tones: &[u8]) -> ColorSet {
    tones
        .iter()
        .map(|&tone| (tone, sampler.tone(tone as f64)))
        .collect()
}
