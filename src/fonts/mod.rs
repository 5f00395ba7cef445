use std::collections::BTreeMap;

use serde::Deserialize;
use thiserror::Error;

pub type FontResult<T> = std::result::Result<T, FontError>;

#[derive(Debug, Error)]
pub enum FontError {
    #[error("failed to load font {family:?} {style:?}")]
    LoadFailed { family: String, style: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontName {
    pub family: String,
    pub style: String,
}

impl FontName {
    pub fn new(family: impl Into<String>, style: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            style: style.into(),
        }
    }
}

/// Seam to the host's font services. Listing backs the `load-fonts` message;
/// loading gates whether a typography token is written at all.
pub trait FontProvider {
    fn list_fonts(&self) -> Vec<FontName>;
    fn load_font(&self, font: &FontName) -> FontResult<()>;
}

/// Typography roles carried by the Base schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Display,
    Header,
    Primary,
    Data,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Display, Role::Header, Role::Primary, Role::Data];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Display => "Display",
            Role::Header => "Header",
            Role::Primary => "Primary",
            Role::Data => "Data",
        }
    }

    fn default_font(self) -> FontName {
        match self {
            Role::Display => FontName::new("Space Grotesk", "Medium"),
            Role::Header => FontName::new("Inter", "Semi Bold"),
            Role::Primary => FontName::new("Inter", "Regular"),
            Role::Data => FontName::new("IBM Plex Mono", "Regular"),
        }
    }
}

/// Last link of every fallback chain.
fn ultimate_fallback() -> FontName {
    FontName::new("Inter", "Regular")
}

/// Per-role font override from the generate-theme request.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontOverride {
    pub family: Option<String>,
    pub style: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontOverrides {
    pub display: Option<FontOverride>,
    pub header: Option<FontOverride>,
    pub primary: Option<FontOverride>,
    pub data: Option<FontOverride>,
}

impl FontOverrides {
    fn for_role(&self, role: Role) -> Option<&FontOverride> {
        match role {
            Role::Display => self.display.as_ref(),
            Role::Header => self.header.as_ref(),
            Role::Primary => self.primary.as_ref(),
            Role::Data => self.data.as_ref(),
        }
    }
}

/// A role whose font chain resolved: these strings get written into
/// `Typography/<role>/Font` and `Typography/<role>/Style`.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRole {
    pub role: Role,
    pub family: String,
    pub style: String,
}

/// Resolve every role's font through its fallback chain. A role whose chain
/// is exhausted is omitted from the result (its tokens are skipped, not
/// written empty); the failure is logged, never propagated.
pub fn resolve_typography(
    provider: &dyn FontProvider,
    overrides: &FontOverrides,
) -> Vec<ResolvedRole> {
    let mut resolved = Vec::new();
    for role in Role::ALL {
        match resolve_role(provider, role, overrides.for_role(role)) {
            Some(font) => resolved.push(ResolvedRole {
                role,
                family: font.family,
                style: font.style,
            }),
            None => {
                tracing::warn!(role = role.as_str(), "font fallback chain exhausted; skipping role");
            }
        }
    }
    resolved
}

/// The chain is an ordered candidate list, first successful load wins:
/// user override, then the role default, then the ultimate fallback.
fn resolve_role(
    provider: &dyn FontProvider,
    role: Role,
    override_font: Option<&FontOverride>,
) -> Option<FontName> {
    for candidate in candidates(role, override_font) {
        match provider.load_font(&candidate) {
            Ok(()) => return Some(candidate),
            Err(err) => {
                tracing::debug!(?err, role = role.as_str(), "font candidate failed; trying next");
            }
        }
    }
    None
}

fn candidates(role: Role, override_font: Option<&FontOverride>) -> Vec<FontName> {
    let default = role.default_font();
    let mut chain = Vec::with_capacity(3);
    if let Some(over) = override_font {
        if over.family.is_some() || over.style.is_some() {
            chain.push(FontName {
                family: over.family.clone().unwrap_or_else(|| default.family.clone()),
                style: over.style.clone().unwrap_or_else(|| default.style.clone()),
            });
        }
    }
    if !chain.contains(&default) {
        chain.push(default);
    }
    let last = ultimate_fallback();
    if !chain.contains(&last) {
        chain.push(last);
    }
    chain
}

/// Family-keyed style lists for the `fonts-loaded` response. Families sort
/// alphabetically; styles sort Regular first, then alphabetically with
/// italics last.
pub fn font_inventory(provider: &dyn FontProvider) -> BTreeMap<String, Vec<String>> {
    let mut families: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for font in provider.list_fonts() {
        let styles = families.entry(font.family).or_default();
        if !styles.contains(&font.style) {
            styles.push(font.style);
        }
    }
    for styles in families.values_mut() {
        sort_styles(styles);
    }
    families
}

pub fn sort_styles(styles: &mut [String]) {
    styles.sort_by(|a, b| style_rank(a).cmp(&style_rank(b)).then_with(|| a.cmp(b)));
}

fn style_rank(style: &str) -> u8 {
    if style == "Regular" {
        0
    } else if style.contains("Italic") {
        2
    } else {
        1
    }
}

/// In-memory provider for tests and offline runs.
#[derive(Debug, Clone, Default)]
pub struct FakeFonts {
    available: Vec<FontName>,
}

impl FakeFonts {
    pub fn with_fonts(available: Vec<FontName>) -> Self {
        Self { available }
    }

    /// Provider where every load attempt succeeds and listing covers the
    /// role defaults.
    pub fn permissive() -> Self {
        Self { available: Vec::new() }
    }
}

impl FontProvider for FakeFonts {
    fn list_fonts(&self) -> Vec<FontName> {
        self.available.clone()
    }

    fn load_font(&self, font: &FontName) -> FontResult<()> {
        if self.available.is_empty() || self.available.contains(font) {
            Ok(())
        } else {
            Err(FontError::LoadFailed {
                family: font.family.clone(),
                style: font.style.clone(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn styles_sort_regular_first_italics_last() {
        let mut styles = vec![
            "Thin Italic".to_string(),
            "Bold".to_string(),
            "Italic".to_string(),
            "Regular".to_string(),
            "Light".to_string(),
        ];
        sort_styles(&mut styles);
        assert_eq!(styles, ["Regular", "Bold", "Light", "Italic", "Thin Italic"]);
    }

    #[test]
    fn inventory_groups_and_sorts_families() {
        let provider = FakeFonts::with_fonts(vec![
            FontName::new("Zilla Slab", "Bold"),
            FontName::new("Inter", "Italic"),
            FontName::new("Inter", "Regular"),
            FontName::new("Inter", "Bold"),
        ]);
        let inventory = font_inventory(&provider);
        let families: Vec<&String> = inventory.keys().collect();
        assert_eq!(families, ["Inter", "Zilla Slab"]);
        assert_eq!(inventory["Inter"], ["Regular", "Bold", "Italic"]);
    }

    #[test]
    fn override_wins_when_it_loads() {
        let provider = FakeFonts::permissive();
        let overrides = FontOverrides {
            header: Some(FontOverride {
                family: Some("Archivo".into()),
                style: None,
            }),
            ..FontOverrides::default()
        };
        let resolved = resolve_typography(&provider, &overrides);
        let header = resolved
            .iter()
            .find(|r| r.role == Role::Header)
            .expect("header role should resolve");
        assert_eq!(header.family, "Archivo");
        // Style falls back to the role default when only the family is overridden.
        assert_eq!(header.style, "Semi Bold");
    }

    #[test]
    fn chain_falls_through_to_role_default_then_ultimate() {
        let provider = FakeFonts::with_fonts(vec![FontName::new("Inter", "Regular")]);
        let overrides = FontOverrides {
            data: Some(FontOverride {
                family: Some("Nonexistent Mono".into()),
                style: Some("Regular".into()),
            }),
            ..FontOverrides::default()
        };
        let resolved = resolve_typography(&provider, &overrides);
        let data = resolved
            .iter()
            .find(|r| r.role == Role::Data)
            .expect("data role should fall back");
        // Override fails, role default (IBM Plex Mono) fails, ultimate loads.
        assert_eq!(data.family, "Inter");
        assert_eq!(data.style, "Regular");
    }

    #[test]
    fn exhausted_chain_skips_the_role() {
        // Only a font unrelated to any chain is loadable.
        let provider = FakeFonts::with_fonts(vec![FontName::new("Wingdings", "Regular")]);
        let resolved = resolve_typography(&provider, &FontOverrides::default());
        assert!(resolved.is_empty());
    }
}
