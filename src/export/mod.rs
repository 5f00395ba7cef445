use serde_json::{Map, Number, Value};
use thiserror::Error;

use crate::color::Rgba;
use crate::store::{Collection, ModeId, ModeValue, TokenStore, TokenValue};

pub type ExportResult<T> = std::result::Result<T, ExportError>;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("variable {path:?} has no value in mode {mode:?}")]
    MissingValue { path: String, mode: String },
}

pub const EXPORT_FILENAME: &str = "caldera-tokens.json";

/// Serialize the three-collection token graph into the portable interchange
/// document: a single-element array wrapping one object with a bucket per
/// collection. Base and Theme nest their trees under `modes.<name>`; Bridge
/// is single-mode and stays flat. Consumers parse alias `$value` strings of
/// the form `{A.B.C}` as cross-references into the named bucket.
pub fn export(store: &TokenStore) -> ExportResult<Value> {
    let mut root = Map::new();
    for (_, collection) in store.collections() {
        if collection.name() == crate::layout::BRIDGE_COLLECTION {
            root.insert(
                collection.name().to_string(),
                mode_tree(store, collection, ModeId(0))?,
            );
            continue;
        }
        let mut modes = Map::new();
        for (index, mode_name) in collection.modes().iter().enumerate() {
            modes.insert(mode_name.clone(), mode_tree(store, collection, ModeId(index))?);
        }
        let mut bucket = Map::new();
        bucket.insert("modes".to_string(), Value::Object(modes));
        root.insert(collection.name().to_string(), Value::Object(bucket));
    }
    Ok(Value::Array(vec![Value::Object(root)]))
}

fn mode_tree(store: &TokenStore, collection: &Collection, mode: ModeId) -> ExportResult<Value> {
    let mut tree = Map::new();
    for variable in collection.variables() {
        let value = variable
            .value(mode)
            .ok_or_else(|| ExportError::MissingValue {
                path: variable.name().to_string(),
                mode: collection.modes()[mode.0].clone(),
            })?;
        let leaf = match value {
            ModeValue::Literal(literal) => literal_leaf(variable.scopes(), literal),
            ModeValue::Alias(target) => alias_leaf(store, *target),
        };
        insert_path(&mut tree, variable.name(), leaf);
    }
    Ok(Value::Object(tree))
}

fn literal_leaf(scopes: &[crate::store::Scope], literal: &TokenValue) -> Value {
    let mut leaf = Map::new();
    leaf.insert(
        "$scopes".to_string(),
        Value::Array(
            scopes
                .iter()
                .map(|s| Value::String(s.as_str().to_string()))
                .collect(),
        ),
    );
    let (type_name, value) = match literal {
        TokenValue::Color(rgba) => ("color", Value::String(format_color_value(*rgba))),
        TokenValue::Float(v) => ("number", number_value(*v)),
        TokenValue::Str(v) => ("string", Value::String(v.clone())),
        TokenValue::Bool(v) => ("boolean", Value::Bool(*v)),
    };
    leaf.insert("$type".to_string(), Value::String(type_name.to_string()));
    leaf.insert("$value".to_string(), value);
    Value::Object(leaf)
}

fn alias_leaf(store: &TokenStore, target: crate::store::VariableId) -> Value {
    let collection = store.collection(target.collection).name();
    let reference = store.variable(target).name().replace('/', ".");
    let mut leaf = Map::new();
    leaf.insert("$libraryName".to_string(), Value::String(String::new()));
    leaf.insert(
        "$collectionName".to_string(),
        Value::String(collection.to_string()),
    );
    leaf.insert("$value".to_string(), Value::String(format!("{{{reference}}}")));
    Value::Object(leaf)
}

/// Colors export as 6-digit hex at full alpha, else an `rgba(...)` string
/// with the alpha rounded to 2 decimals.
pub fn format_color_value(rgba: Rgba) -> String {
    let r = (rgba.r.clamp(0.0, 1.0) * 255.0).round() as u8;
    let g = (rgba.g.clamp(0.0, 1.0) * 255.0).round() as u8;
    let b = (rgba.b.clamp(0.0, 1.0) * 255.0).round() as u8;
    if rgba.a >= 1.0 {
        format!("#{r:02x}{g:02x}{b:02x}")
    } else {
        let alpha = (rgba.a as f64 * 100.0).round() / 100.0;
        format!("rgba({r}, {g}, {b}, {alpha})")
    }
}

fn number_value(v: f64) -> Value {
    if v.fract() == 0.0 && v.is_finite() && v.abs() < i64::MAX as f64 {
        Value::Number(Number::from(v as i64))
    } else {
        Number::from_f64(v).map(Value::Number).unwrap_or(Value::Null)
    }
}

fn insert_path(tree: &mut Map<String, Value>, path: &str, leaf: Value) {
    let mut segments = path.split('/').peekable();
    let mut node = tree;
    while let Some(segment) = segments.next() {
        if segments.peek().is_none() {
            node.insert(segment.to_string(), leaf);
            return;
        }
        let child = node
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        node = match child {
            Value::Object(map) => map,
            other => {
                // A group colliding with an existing leaf is a schema bug;
                // replace the leaf so export still produces a document.
                tracing::warn!(path, "path segment collides with a leaf; overwriting");
                *other = Value::Object(Map::new());
                match other {
                    Value::Object(map) => map,
                    _ => unreachable!(),
                }
            }
        };
    }
}

/// Parse an alias reference string of the form `{A.B.C}` into its segments.
pub fn parse_reference(value: &str) -> Option<Vec<&str>> {
    let inner = value.strip_prefix('{')?.strip_suffix('}')?;
    if inner.is_empty() {
        return None;
    }
    Some(inner.split('.').collect())
}

/// Resolve a parsed reference against a bucket of the same export document.
/// Buckets with a `modes` wrapper are read at the named mode, or their first
/// mode when none is given.
pub fn resolve_reference<'a>(
    document: &'a Value,
    collection: &str,
    mode: Option<&str>,
    path: &[&str],
) -> Option<&'a Value> {
    let root = document.as_array()?.first()?;
    let bucket = root.get(collection)?;
    let tree = match bucket.get("modes") {
        Some(modes) => match mode {
            Some(name) => modes.get(name)?,
            None => modes.as_object()?.values().next()?,
        },
        None => bucket,
    };
    let mut node = tree;
    for segment in path {
        node = node.get(segment)?;
    }
    Some(node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{build_base, build_bridge, build_theme, BridgeOptions, CornerDensity};
    use crate::palette::{derive_design_system, SeedOverrides, DEFAULT_NEUTRAL_SATURATION};

    fn sample_document() -> Value {
        let mut store = TokenStore::new();
        let colors = derive_design_system(
            "#3366cc",
            &SeedOverrides::default(),
            DEFAULT_NEUTRAL_SATURATION,
        )
        .expect("derivation");
        let base = build_base(&mut store, &colors, &[]).expect("base");
        let theme = build_theme(&mut store, base, CornerDensity::from_level(None)).expect("theme");
        let options = BridgeOptions {
            modal_background_enabled: true,
            modal_padding_size: Some(16),
            header_icons_pairing_enabled: true,
            header_background_enabled: false,
        };
        build_bridge(&mut store, base, theme, &options).expect("bridge");
        export(&store).expect("export")
    }

    #[test]
    fn document_is_a_single_element_array_with_three_buckets() {
        let document = sample_document();
        let array = document.as_array().expect("array");
        assert_eq!(array.len(), 1);
        let root = array[0].as_object().expect("object");
        assert!(root.contains_key("Base"));
        assert!(root.contains_key("Theme"));
        assert!(root.contains_key("Bridge"));
        assert!(root["Base"]["modes"]["Caldera"].is_object());
        assert!(root["Theme"]["modes"]["Light"].is_object());
        assert!(root["Theme"]["modes"]["Dark"].is_object());
        // Bridge is single-mode and flat.
        assert!(root["Bridge"].get("modes").is_none());
        assert!(root["Bridge"]["Modal"]["Background"].is_object());
    }

    #[test]
    fn base_color_leaf_is_typed_hex() {
        let document = sample_document();
        let leaf = &document[0]["Base"]["modes"]["Caldera"]["Colors"]["Primary"]["Base"];
        assert_eq!(leaf["$type"], "color");
        assert_eq!(leaf["$value"], "#3366cc");
        assert!(leaf["$scopes"].is_array());
    }

    #[test]
    fn alpha_variant_exports_rgba_string() {
        let document = sample_document();
        let leaf = &document[0]["Base"]["modes"]["Caldera"]["Colors"]["Primary"]["Alpha"]["50"];
        assert_eq!(leaf["$value"], "rgba(51, 102, 204, 0.5)");
    }

    #[test]
    fn theme_alias_leaf_carries_reference_into_base() {
        let document = sample_document();
        let leaf = &document[0]["Theme"]["modes"]["Light"]["Background"]["Main"];
        assert_eq!(leaf["$libraryName"], "");
        assert_eq!(leaf["$collectionName"], "Base");
        assert_eq!(leaf["$value"], "{Colors.Neutral.90}");
    }

    #[test]
    fn bridge_boolean_has_all_scopes() {
        let document = sample_document();
        let leaf = &document[0]["Bridge"]["Header"]["Icons Pairing"];
        assert_eq!(leaf["$type"], "boolean");
        assert_eq!(leaf["$value"], true);
        assert_eq!(leaf["$scopes"][0], "ALL_SCOPES");
    }

    #[test]
    fn references_resolve_within_the_same_document() {
        let document = sample_document();
        let leaf = &document[0]["Theme"]["modes"]["Dark"]["Background"]["Main"];
        let reference = leaf["$value"].as_str().expect("reference string");
        let path = parse_reference(reference).expect("parsable reference");
        let target =
            resolve_reference(&document, "Base", None, &path).expect("reference should resolve");
        assert_eq!(target["$type"], "color");
        assert!(target["$value"].as_str().expect("hex").starts_with('#'));
    }

    #[test]
    fn numbers_export_without_trailing_fraction() {
        let document = sample_document();
        let leaf = &document[0]["Base"]["modes"]["Caldera"]["Spacing"]["16"];
        assert_eq!(leaf["$type"], "number");
        assert_eq!(leaf["$value"], 16);
    }

    #[test]
    fn format_color_value_rounds_alpha_to_two_decimals() {
        let rgba = Rgba {
            r: 1.0,
            g: 0.0,
            b: 0.0,
            a: 0.333,
        };
        assert_eq!(format_color_value(rgba), "rgba(255, 0, 0, 0.33)");
        assert_eq!(format_color_value(Rgba::opaque(1.0, 1.0, 1.0)), "#ffffff");
    }

    #[test]
    fn malformed_references_do_not_parse() {
        assert!(parse_reference("Colors.Neutral.90").is_none());
        assert!(parse_reference("{}").is_none());
        assert!(parse_reference("{A.B").is_none());
    }
}
