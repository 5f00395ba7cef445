/// Base-tier corner tokens: name and numeric radius.
pub const BASE_CORNERS: &[(&str, f64)] = &[
    ("None", 0.0),
    ("2", 2.0),
    ("4", 4.0),
    ("8", 8.0),
    ("12", 12.0),
    ("16", 16.0),
    ("24", 24.0),
    ("48", 48.0),
    ("96", 96.0),
    ("Circle", 9999.0),
];

/// Theme-tier corner tokens, in schema order.
pub const THEME_CORNERS: [&str; 7] = ["None", "XS", "SM", "Base", "LG", "XL", "Circle"];

pub const DEFAULT_CORNER_LEVEL: u8 = 3;

/// Discrete corner-radius density: an index into a fixed table of
/// Theme corner token -> Base corner token mappings. Level 0 collapses
/// everything to 0; level 4 is the most rounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CornerDensity(u8);

impl CornerDensity {
    /// Out-of-range or absent levels fall back to the documented default.
    pub fn from_level(level: Option<i64>) -> Self {
        match level {
            Some(l @ 0..=4) => Self(l as u8),
            Some(other) => {
                tracing::warn!(level = other, "corner radius level out of range; using default");
                Self(DEFAULT_CORNER_LEVEL)
            }
            None => Self(DEFAULT_CORNER_LEVEL),
        }
    }

    pub fn level(self) -> u8 {
        self.0
    }

    /// Theme corner token -> Base corner token name, for this density.
    pub fn targets(self) -> [(&'static str, &'static str); 7] {
        let [xs, sm, base, lg, xl] = match self.0 {
            0 => return THEME_CORNERS.map(|token| (token, "None")),
            1 => ["2", "2", "4", "8", "12"],
            2 => ["2", "4", "8", "12", "16"],
            3 => ["4", "8", "12", "16", "24"],
            _ => ["8", "12", "16", "24", "48"],
        };
        [
            ("None", "None"),
            ("XS", xs),
            ("SM", sm),
            ("Base", base),
            ("LG", lg),
            ("XL", xl),
            ("Circle", "Circle"),
        ]
    }
}
