use crate::color::Rgba;
use crate::store::{
    CollectionId, ModeId, ModeValue, Scope, TokenStore, TokenType, TokenValue, VariableId,
};

use super::{LayoutError, LayoutResult};

pub const BRIDGE_COLLECTION: &str = "Bridge";
pub const BRIDGE_MODE: &str = "Default";

/// Product-level feature toggles. These live in their own tier so the Theme
/// schema stays reusable across products.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BridgeOptions {
    pub modal_background_enabled: bool,
    /// Base spacing step the modal padding should alias, when enabled.
    pub modal_padding_size: Option<i32>,
    pub header_icons_pairing_enabled: bool,
    pub header_background_enabled: bool,
}

/// Write the Bridge tier: single mode, aliases into Theme/Base gated by
/// feature flags, with literal fallbacks when a flag is off.
pub fn build_bridge(
    store: &mut TokenStore,
    base: CollectionId,
    theme: CollectionId,
    options: &BridgeOptions,
) -> LayoutResult<CollectionId> {
    let bridge = store.get_or_create_collection(BRIDGE_COLLECTION);
    store.rename_mode(bridge, ModeId(0), BRIDGE_MODE)?;
    let mode = ModeId(0);

    let modal_background = store.upsert_variable(
        bridge,
        "Modal/Background",
        TokenType::Color,
        &[Scope::All],
    );
    let value = if options.modal_background_enabled {
        ModeValue::Alias(theme_target(store, theme, "Background/Main")?)
    } else {
        ModeValue::Literal(TokenValue::Color(Rgba::TRANSPARENT))
    };
    store.set_value(modal_background, mode, value)?;

    let modal_padding = store.upsert_variable(
        bridge,
        "Modal/Padding",
        TokenType::Float,
        &[Scope::WidthHeight, Scope::Gap],
    );
    store.set_value(modal_padding, mode, modal_padding_value(store, base, options))?;

    let icons_pairing = store.upsert_variable(
        bridge,
        "Header/Icons Pairing",
        TokenType::Boolean,
        &[Scope::All],
    );
    store.set_value(
        icons_pairing,
        mode,
        ModeValue::Literal(TokenValue::Bool(options.header_icons_pairing_enabled)),
    )?;

    let header_background = store.upsert_variable(
        bridge,
        "Header/Background",
        TokenType::Color,
        &[Scope::All],
    );
    let value = if options.header_background_enabled {
        ModeValue::Alias(theme_target(store, theme, "Misc/Divider")?)
    } else {
        ModeValue::Literal(TokenValue::Color(Rgba::TRANSPARENT))
    };
    store.set_value(header_background, mode, value)?;

    tracing::info!(variables = store.collection(bridge).len(), "bridge tier written");
    Ok(bridge)
}

/// The theme tier is built in the same run; a miss here is a schema bug.
fn theme_target(store: &TokenStore, theme: CollectionId, path: &str) -> LayoutResult<VariableId> {
    store
        .variable_id(theme, path)
        .ok_or_else(|| LayoutError::MissingBaseReference {
            collection: store.collection(theme).name().to_string(),
            path: path.to_string(),
        })
}

/// Padding aliases the requested spacing token. A missing token falls back
/// to the literal numeric value instead of failing the generation; a
/// disabled modal means literal zero.
fn modal_padding_value(
    store: &TokenStore,
    base: CollectionId,
    options: &BridgeOptions,
) -> ModeValue {
    if !options.modal_background_enabled {
        return ModeValue::Literal(TokenValue::Float(0.0));
    }
    let Some(size) = options.modal_padding_size else {
        return ModeValue::Literal(TokenValue::Float(0.0));
    };
    match store.variable_id(base, &format!("Spacing/{size}")) {
        Some(target) => ModeValue::Alias(target),
        None => {
            tracing::warn!(size, "spacing token missing; writing literal padding");
            ModeValue::Literal(TokenValue::Float(size as f64))
        }
    }
}
