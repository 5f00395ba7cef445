use crate::color;
use crate::fonts::ResolvedRole;
use crate::palette::{DerivedPalette, DesignSystemColors};
use crate::store::{CollectionId, ModeId, ModeValue, Scope, TokenStore, TokenType, TokenValue};

use super::corners::BASE_CORNERS;
use super::LayoutResult;

pub const BASE_COLLECTION: &str = "Base";
pub const BASE_MODE: &str = "Caldera";

/// Alpha ramp (percent) for the Alpha variants and the White/Black ramps.
pub const ALPHA_STEPS: [u8; 9] = [10, 20, 30, 40, 50, 60, 70, 80, 90];

/// Spacing steps on the 8-unit grid (with a couple of sub-grid steps for
/// hairline gaps). Positive steps are sizing-scoped.
pub const SPACING_STEPS: [i32; 13] = [0, 2, 4, 8, 12, 16, 24, 32, 40, 48, 64, 80, 96];

/// Negative spacing for inset/overlap use; all-purpose scope.
pub const NEGATIVE_SPACING_STEPS: [i32; 9] = [-8, -16, -24, -32, -40, -48, -64, -80, -96];

/// Write the Base tier: raw palette ramps, white/black, corners, spacing and
/// typography. Single mode, every variable a literal leaf.
pub fn build_base(
    store: &mut TokenStore,
    colors: &DesignSystemColors,
    typography: &[ResolvedRole],
) -> LayoutResult<CollectionId> {
    let base = store.get_or_create_collection(BASE_COLLECTION);
    store.rename_mode(base, ModeId(0), BASE_MODE)?;
    let mode = ModeId(0);

    write_ramp(store, base, mode, "Primary", &colors.primary, true)?;
    write_ramp(store, base, mode, "Neutral", &colors.neutral, true)?;
    write_ramp(store, base, mode, "Success", &colors.success, false)?;
    write_ramp(store, base, mode, "Warning", &colors.warning, false)?;
    write_ramp(store, base, mode, "Info", &colors.info, false)?;
    write_ramp(store, base, mode, "Failure", &colors.failure, false)?;

    write_white_black(store, base, mode)?;
    write_corners(store, base, mode)?;
    write_spacing(store, base, mode)?;
    write_typography(store, base, mode, typography)?;

    tracing::info!(variables = store.collection(base).len(), "base tier written");
    Ok(base)
}

/// One palette group: tone leaves, the exact base hex, and (for primary and
/// neutral) an alpha-variant ramp of the base hex.
fn write_ramp(
    store: &mut TokenStore,
    base: CollectionId,
    mode: ModeId,
    group: &str,
    palette: &DerivedPalette,
    with_alpha: bool,
) -> LayoutResult<()> {
    for (tone, hex) in &palette.colors {
        set_color(store, base, mode, &format!("Colors/{group}/{tone}"), hex, 1.0)?;
    }
    // Base carries the anchoring hex itself, not the tone-50 sample.
    set_color(
        store,
        base,
        mode,
        &format!("Colors/{group}/Base"),
        &palette.base_hex,
        1.0,
    )?;
    if with_alpha {
        for pct in ALPHA_STEPS {
            set_color(
                store,
                base,
                mode,
                &format!("Colors/{group}/Alpha/{pct}"),
                &palette.base_hex,
                pct as f32 / 100.0,
            )?;
        }
    }
    Ok(())
}

fn write_white_black(store: &mut TokenStore, base: CollectionId, mode: ModeId) -> LayoutResult<()> {
    for (group, hex) in [("White", "#ffffff"), ("Black", "#000000")] {
        set_color(store, base, mode, &format!("Colors/{group}/100"), hex, 1.0)?;
        for pct in ALPHA_STEPS {
            set_color(
                store,
                base,
                mode,
                &format!("Colors/{group}/{pct}"),
                hex,
                pct as f32 / 100.0,
            )?;
        }
    }
    Ok(())
}

fn write_corners(store: &mut TokenStore, base: CollectionId, mode: ModeId) -> LayoutResult<()> {
    for &(name, radius) in BASE_CORNERS {
        let var = store.upsert_variable(
            base,
            &format!("Corners/{name}"),
            TokenType::Float,
            &[Scope::CornerRadius],
        );
        store.set_value(var, mode, ModeValue::Literal(TokenValue::Float(radius)))?;
    }
    Ok(())
}

fn write_spacing(store: &mut TokenStore, base: CollectionId, mode: ModeId) -> LayoutResult<()> {
    for step in SPACING_STEPS {
        let var = store.upsert_variable(
            base,
            &format!("Spacing/{step}"),
            TokenType::Float,
            &[Scope::WidthHeight, Scope::Gap],
        );
        store.set_value(var, mode, ModeValue::Literal(TokenValue::Float(step as f64)))?;
    }
    for step in NEGATIVE_SPACING_STEPS {
        let var = store.upsert_variable(
            base,
            &format!("Spacing/{step}"),
            TokenType::Float,
            &[Scope::All],
        );
        store.set_value(var, mode, ModeValue::Literal(TokenValue::Float(step as f64)))?;
    }
    Ok(())
}

/// Roles whose font chain was exhausted are simply absent from `typography`
/// and get no tokens at all.
fn write_typography(
    store: &mut TokenStore,
    base: CollectionId,
    mode: ModeId,
    typography: &[ResolvedRole],
) -> LayoutResult<()> {
    for resolved in typography {
        let role = resolved.role.as_str();
        let font = store.upsert_variable(
            base,
            &format!("Typography/{role}/Font"),
            TokenType::String,
            &[Scope::TextContent],
        );
        store.set_value(
            font,
            mode,
            ModeValue::Literal(TokenValue::Str(resolved.family.clone())),
        )?;
        let style = store.upsert_variable(
            base,
            &format!("Typography/{role}/Style"),
            TokenType::String,
            &[Scope::TextContent],
        );
        store.set_value(
            style,
            mode,
            ModeValue::Literal(TokenValue::Str(resolved.style.clone())),
        )?;
    }
    Ok(())
}

fn set_color(
    store: &mut TokenStore,
    collection: CollectionId,
    mode: ModeId,
    path: &str,
    hex: &str,
    alpha: f32,
) -> LayoutResult<()> {
    let rgba = color::hex_to_rgba(hex, alpha)?;
    let var = store.upsert_variable(collection, path, TokenType::Color, &[Scope::All]);
    store.set_value(var, mode, ModeValue::Literal(TokenValue::Color(rgba)))?;
    Ok(())
}
