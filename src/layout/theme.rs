use crate::store::{CollectionId, ModeId, ModeValue, Scope, TokenStore, TokenType, VariableId};

use super::corners::CornerDensity;
use super::{LayoutError, LayoutResult};

pub const THEME_COLLECTION: &str = "Theme";
pub const LIGHT_MODE: &str = "Light";
pub const DARK_MODE: &str = "Dark";

/// Which Base ramp a semantic token draws on.
#[derive(Debug, Clone, Copy)]
enum Ramp {
    Primary,
    Neutral,
}

impl Ramp {
    fn group(self) -> &'static str {
        match self {
            Ramp::Primary => "Primary",
            Ramp::Neutral => "Neutral",
        }
    }
}

/// Semantic token -> neutral tone per mode (light, dark).
const NEUTRAL_ALIASES: &[(&str, u8, u8)] = &[
    ("Background/Main", 90, 15),
    ("Background/Layer 1", 95, 20),
    ("Background/Layer 2", 98, 25),
    ("Background/Layer 3", 99, 30),
    ("Text/Primary", 10, 95),
    ("Text/Secondary", 30, 80),
    ("Text/Disabled", 50, 60),
    ("Misc/Divider", 80, 30),
    ("Misc/Footer", 95, 10),
    ("Misc/Skeleton", 90, 25),
];

/// Interactive groups. Input only carries Active/Inactive.
const INTERACTIVE_ALIASES: &[(&str, Ramp, u8, u8)] = &[
    ("Interactive/Primary/Active", Ramp::Primary, 40, 80),
    ("Interactive/Primary/Hover", Ramp::Primary, 30, 90),
    ("Interactive/Primary/Inactive", Ramp::Primary, 70, 50),
    ("Interactive/Primary/Disabled", Ramp::Neutral, 85, 30),
    ("Interactive/Primary/Contrast", Ramp::Primary, 99, 10),
    ("Interactive/Secondary/Active", Ramp::Neutral, 90, 25),
    ("Interactive/Secondary/Hover", Ramp::Neutral, 85, 30),
    ("Interactive/Secondary/Inactive", Ramp::Neutral, 95, 20),
    ("Interactive/Secondary/Disabled", Ramp::Neutral, 95, 15),
    ("Interactive/Secondary/Contrast", Ramp::Neutral, 10, 95),
    ("Interactive/Tertiary/Active", Ramp::Primary, 90, 30),
    ("Interactive/Tertiary/Hover", Ramp::Primary, 85, 35),
    ("Interactive/Tertiary/Inactive", Ramp::Primary, 95, 25),
    ("Interactive/Tertiary/Disabled", Ramp::Neutral, 90, 20),
    ("Interactive/Tertiary/Contrast", Ramp::Primary, 10, 90),
    ("Interactive/Input/Active", Ramp::Neutral, 99, 10),
    ("Interactive/Input/Inactive", Ramp::Neutral, 95, 15),
];

const STATUS_GROUPS: [&str; 4] = ["Warning", "Info", "Failure", "Success"];

/// Status sub-token -> status ramp tone per mode (light, dark).
const STATUS_TONES: &[(&str, u8, u8)] = &[
    ("Main", 40, 70),
    ("Foreground", 99, 10),
    ("Light", 90, 20),
    ("Dark", 20, 90),
];

/// Write the Theme tier: Light/Dark modes, every token an alias into Base.
pub fn build_theme(
    store: &mut TokenStore,
    base: CollectionId,
    density: CornerDensity,
) -> LayoutResult<CollectionId> {
    let theme = store.get_or_create_collection(THEME_COLLECTION);
    store.rename_mode(theme, ModeId(0), LIGHT_MODE)?;
    let light = ModeId(0);
    let dark = match store.collection(theme).mode_id(DARK_MODE) {
        Some(mode) => mode,
        None => store.add_mode(theme, DARK_MODE)?,
    };

    for &(path, light_tone, dark_tone) in NEUTRAL_ALIASES {
        let light_target = base_target(store, base, &format!("Colors/Neutral/{light_tone}"))?;
        let dark_target = base_target(store, base, &format!("Colors/Neutral/{dark_tone}"))?;
        alias_pair(store, theme, path, (light, light_target), (dark, dark_target))?;
    }

    for &(path, ramp, light_tone, dark_tone) in INTERACTIVE_ALIASES {
        let group = ramp.group();
        let light_target = base_target(store, base, &format!("Colors/{group}/{light_tone}"))?;
        let dark_target = base_target(store, base, &format!("Colors/{group}/{dark_tone}"))?;
        alias_pair(store, theme, path, (light, light_target), (dark, dark_target))?;
    }

    for group in STATUS_GROUPS {
        write_status_group(store, base, theme, group, group, light, dark)?;
    }
    // Legacy mirror kept so consumers still referencing Status/Error keep
    // resolving; it points at the Failure ramp.
    write_status_group(store, base, theme, "Error", "Failure", light, dark)?;

    for (token, target) in density.targets() {
        let target = base_target(store, base, &format!("Corners/{target}"))?;
        let var = store.upsert_variable(
            theme,
            &format!("Corners/{token}"),
            TokenType::Float,
            &[Scope::CornerRadius],
        );
        store.set_value(var, light, ModeValue::Alias(target))?;
        store.set_value(var, dark, ModeValue::Alias(target))?;
    }

    let brand_target = base_target(store, base, "Colors/Primary/Base")?;
    alias_pair(store, theme, "Brand", (light, brand_target), (dark, brand_target))?;

    tracing::info!(
        variables = store.collection(theme).len(),
        level = density.level(),
        "theme tier written"
    );
    Ok(theme)
}

fn write_status_group(
    store: &mut TokenStore,
    base: CollectionId,
    theme: CollectionId,
    group: &str,
    ramp: &str,
    light: ModeId,
    dark: ModeId,
) -> LayoutResult<()> {
    for &(sub, light_tone, dark_tone) in STATUS_TONES {
        let light_target = base_target(store, base, &format!("Colors/{ramp}/{light_tone}"))?;
        let dark_target = base_target(store, base, &format!("Colors/{ramp}/{dark_tone}"))?;
        alias_pair(
            store,
            theme,
            &format!("Status/{group}/{sub}"),
            (light, light_target),
            (dark, dark_target),
        )?;
    }
    Ok(())
}

fn alias_pair(
    store: &mut TokenStore,
    theme: CollectionId,
    path: &str,
    (light, light_target): (ModeId, VariableId),
    (dark, dark_target): (ModeId, VariableId),
) -> LayoutResult<()> {
    let var = store.upsert_variable(theme, path, TokenType::Color, &[Scope::All]);
    store.set_value(var, light, ModeValue::Alias(light_target))?;
    store.set_value(var, dark, ModeValue::Alias(dark_target))?;
    Ok(())
}

/// Theme targets were written by the Base builder in the same run; a miss
/// here is a schema bug and fails the generation.
fn base_target(store: &TokenStore, base: CollectionId, path: &str) -> LayoutResult<VariableId> {
    store
        .variable_id(base, path)
        .ok_or_else(|| LayoutError::MissingBaseReference {
            collection: store.collection(base).name().to_string(),
            path: path.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::base::build_base;
    use crate::palette::{derive_design_system, SeedOverrides, DEFAULT_NEUTRAL_SATURATION};
    use crate::store::TokenValue;

    fn build_sample(store: &mut TokenStore, level: Option<i64>) -> (CollectionId, CollectionId) {
        let colors = derive_design_system(
            "#3366cc",
            &SeedOverrides::default(),
            DEFAULT_NEUTRAL_SATURATION,
        )
        .expect("derivation");
        let base = build_base(store, &colors, &[]).expect("base build");
        let theme = build_theme(store, base, CornerDensity::from_level(level)).expect("theme");
        (base, theme)
    }

    #[test]
    fn theme_has_light_and_dark_modes() {
        let mut store = TokenStore::new();
        let (_, theme) = build_sample(&mut store, None);
        assert_eq!(store.collection(theme).modes(), [LIGHT_MODE, DARK_MODE]);
    }

    #[test]
    fn background_main_aliases_the_specified_neutral_tones() {
        let mut store = TokenStore::new();
        let (base, theme) = build_sample(&mut store, None);
        let var = store.variable_id(theme, "Background/Main").expect("token");

        let light = store.resolve(var, ModeId(0)).expect("light");
        let n90 = store.variable_id(base, "Colors/Neutral/90").expect("n90");
        assert_eq!(light, store.resolve(n90, ModeId(0)).expect("n90 value"));

        let dark = store.resolve(var, ModeId(1)).expect("dark");
        let n15 = store.variable_id(base, "Colors/Neutral/15").expect("n15");
        assert_eq!(dark, store.resolve(n15, ModeId(0)).expect("n15 value"));
    }

    #[test]
    fn error_group_mirrors_failure() {
        let mut store = TokenStore::new();
        let (_, theme) = build_sample(&mut store, None);
        for sub in ["Main", "Foreground", "Light", "Dark"] {
            let error = store
                .variable_id(theme, &format!("Status/Error/{sub}"))
                .expect("error token");
            let failure = store
                .variable_id(theme, &format!("Status/Failure/{sub}"))
                .expect("failure token");
            for mode in [ModeId(0), ModeId(1)] {
                assert_eq!(
                    store.resolve(error, mode).expect("error"),
                    store.resolve(failure, mode).expect("failure")
                );
            }
        }
    }

    #[test]
    fn corner_level_zero_resolves_every_token_to_zero() {
        let mut store = TokenStore::new();
        let (_, theme) = build_sample(&mut store, Some(0));
        for token in super::super::corners::THEME_CORNERS {
            let var = store
                .variable_id(theme, &format!("Corners/{token}"))
                .expect("corner token");
            assert_eq!(
                store.resolve(var, ModeId(0)).expect("resolve"),
                TokenValue::Float(0.0),
                "{token} should collapse to 0"
            );
        }
    }

    #[test]
    fn input_group_has_no_hover_token() {
        let mut store = TokenStore::new();
        let (_, theme) = build_sample(&mut store, None);
        assert!(store.variable_id(theme, "Interactive/Input/Active").is_some());
        assert!(store.variable_id(theme, "Interactive/Input/Hover").is_none());
        assert!(store.variable_id(theme, "Interactive/Input/Disabled").is_none());
    }

    #[test]
    fn brand_aliases_the_primary_base_in_both_modes() {
        let mut store = TokenStore::new();
        let (base, theme) = build_sample(&mut store, None);
        let brand = store.variable_id(theme, "Brand").expect("brand token");
        let seed = store.variable_id(base, "Colors/Primary/Base").expect("seed");
        let expected = store.resolve(seed, ModeId(0)).expect("seed value");
        assert_eq!(store.resolve(brand, ModeId(0)).expect("light"), expected);
        assert_eq!(store.resolve(brand, ModeId(1)).expect("dark"), expected);
    }

    #[test]
    fn rebuilding_with_other_colors_keeps_variable_identity() {
        let mut store = TokenStore::new();
        let (_, theme) = build_sample(&mut store, None);
        let before = store.variable_id(theme, "Background/Main").expect("token");

        let colors = derive_design_system(
            "#cc3366",
            &SeedOverrides::default(),
            DEFAULT_NEUTRAL_SATURATION,
        )
        .expect("derivation");
        let base = build_base(&mut store, &colors, &[]).expect("rebuild base");
        build_theme(&mut store, base, CornerDensity::from_level(None)).expect("rebuild theme");

        let after = store.variable_id(theme, "Background/Main").expect("token");
        assert_eq!(before, after, "external references must survive regeneration");
    }
}
