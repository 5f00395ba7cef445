use material_color_utilities::hct::Hct;
use thiserror::Error;

pub type ColorResult<T> = std::result::Result<T, ColorError>;

#[derive(Debug, Error)]
pub enum ColorError {
    #[error("invalid color format: {0:?}")]
    InvalidColorFormat(String),
}

/// 24-bit RGB triple, the bridge between hex strings and color math.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Normalized RGBA as written into Color token values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.0,
    };

    pub fn opaque(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }
}

/// Hue/chroma/tone readout of a color in the perceptual model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HctInfo {
    pub hue: f64,
    pub chroma: f64,
    pub tone: f64,
}

/// Parse `#RRGGBB` (leading `#` optional, case-insensitive).
pub fn parse_hex(input: &str) -> ColorResult<Rgb8> {
    let digits = input.strip_prefix('#').unwrap_or(input);
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ColorError::InvalidColorFormat(input.to_string()));
    }
    let value = u32::from_str_radix(digits, 16)
        .map_err(|_| ColorError::InvalidColorFormat(input.to_string()))?;
    Ok(Rgb8 {
        r: ((value >> 16) & 0xFF) as u8,
        g: ((value >> 8) & 0xFF) as u8,
        b: (value & 0xFF) as u8,
    })
}

/// Canonical external form: lowercase 6-digit hex with leading `#`.
pub fn format_hex(rgb: Rgb8) -> String {
    format!("#{:02x}{:02x}{:02x}", rgb.r, rgb.g, rgb.b)
}

pub fn hex_to_hct(hex: &str) -> ColorResult<HctInfo> {
    let rgb = parse_hex(hex)?;
    let hct = Hct::from_int(rgb_to_argb(rgb));
    Ok(HctInfo {
        hue: hct.hue(),
        chroma: hct.chroma(),
        tone: hct.tone(),
    })
}

pub fn hct_to_hex(hue: f64, chroma: f64, tone: f64) -> String {
    let argb = Hct::from(hue, chroma, tone).to_int();
    format_hex(argb_to_rgb(argb))
}

/// Sample the tonal palette anchored at the seed's hue/chroma at the given tone.
pub fn tone_of(seed_hex: &str, tone: f64) -> ColorResult<String> {
    let info = hex_to_hct(seed_hex)?;
    Ok(hct_to_hex(info.hue, info.chroma, tone))
}

/// Tonal palette sampler anchored at a fixed hue/chroma pair.
#[derive(Debug, Clone, Copy)]
pub struct ToneSampler {
    hue: f64,
    chroma: f64,
}

impl ToneSampler {
    pub fn new(hue: f64, chroma: f64) -> Self {
        Self { hue, chroma }
    }

    pub fn from_seed(seed_hex: &str) -> ColorResult<Self> {
        let info = hex_to_hct(seed_hex)?;
        Ok(Self::new(info.hue, info.chroma))
    }

    pub fn tone(&self, tone: f64) -> String {
        hct_to_hex(self.hue, self.chroma, tone)
    }
}

/// Normalized RGB triple (0-1 floats) for Color token values.
pub fn hex_to_rgb_f32(hex: &str) -> ColorResult<[f32; 3]> {
    let rgb = parse_hex(hex)?;
    Ok([
        rgb.r as f32 / 255.0,
        rgb.g as f32 / 255.0,
        rgb.b as f32 / 255.0,
    ])
}

pub fn hex_to_rgba(hex: &str, alpha: f32) -> ColorResult<Rgba> {
    let [r, g, b] = hex_to_rgb_f32(hex)?;
    Ok(Rgba { r, g, b, a: alpha })
}

fn rgb_to_argb(rgb: Rgb8) -> u32 {
    0xFF00_0000 | ((rgb.r as u32) << 16) | ((rgb.g as u32) << 8) | rgb.b as u32
}

fn argb_to_rgb(argb: u32) -> Rgb8 {
    Rgb8 {
        r: ((argb >> 16) & 0xFF) as u8,
        g: ((argb >> 8) & 0xFF) as u8,
        b: (argb & 0xFF) as u8,
    }
}
