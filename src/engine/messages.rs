use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::fonts::FontOverrides;

/// Inbound message envelope. The UI collaborator posts these one at a time;
/// each is fully handled before the next is read.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Request {
    GenerateTheme(GenerateThemeRequest),
    ExportJson,
    GetHctInfo { hex: String },
    LoadFonts,
    Cancel,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateThemeRequest {
    /// The brand seed. The only required input.
    pub hex: String,
    pub neutral_hex: Option<String>,
    pub success_hex: Option<String>,
    pub warning_hex: Option<String>,
    pub info_hex: Option<String>,
    pub failure_hex: Option<String>,
    pub corner_radius_level: Option<i64>,
    #[serde(default)]
    pub font_overrides: FontOverrides,
    #[serde(default)]
    pub modal_background_enabled: bool,
    pub modal_padding_size: Option<i32>,
    #[serde(default)]
    pub header_icons_pairing_enabled: bool,
    #[serde(default)]
    pub header_background_enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Response {
    GenerationComplete,
    #[serde(rename_all = "camelCase")]
    ExportData {
        json_data: String,
        filename: String,
    },
    HctInfo {
        hex: String,
        hct: HctSummary,
    },
    FontsLoaded {
        fonts: BTreeMap<String, Vec<String>>,
    },
}

/// Rounded hue/chroma/tone readout for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HctSummary {
    pub hue: i64,
    pub chroma: i64,
    pub tone: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_theme_parses_camel_case_payload() {
        let json = r##"{
            "type": "generate-theme",
            "hex": "#3366CC",
            "warningHex": "#AA5500",
            "cornerRadiusLevel": 2,
            "modalBackgroundEnabled": true,
            "modalPaddingSize": 16,
            "fontOverrides": { "header": { "family": "Archivo" } }
        }"##;
        let request: Request = serde_json::from_str(json).expect("request should parse");
        let Request::GenerateTheme(payload) = request else {
            panic!("expected generate-theme");
        };
        assert_eq!(payload.hex, "#3366CC");
        assert_eq!(payload.warning_hex.as_deref(), Some("#AA5500"));
        assert_eq!(payload.corner_radius_level, Some(2));
        assert!(payload.modal_background_enabled);
        assert_eq!(payload.modal_padding_size, Some(16));
        assert_eq!(
            payload
                .font_overrides
                .header
                .expect("header override")
                .family
                .as_deref(),
            Some("Archivo")
        );
        assert!(!payload.header_icons_pairing_enabled);
    }

    #[test]
    fn bare_messages_parse_from_type_tag_alone() {
        for (json, expected) in [
            (r#"{"type": "export-json"}"#, "export"),
            (r#"{"type": "load-fonts"}"#, "fonts"),
            (r#"{"type": "cancel"}"#, "cancel"),
        ] {
            let request: Request = serde_json::from_str(json).expect("message should parse");
            let matched = match (&request, expected) {
                (Request::ExportJson, "export")
                | (Request::LoadFonts, "fonts")
                | (Request::Cancel, "cancel") => true,
                _ => false,
            };
            assert!(matched, "{json} parsed as {request:?}");
        }
    }

    #[test]
    fn responses_serialize_with_kebab_type_tags() {
        let value = serde_json::to_value(Response::GenerationComplete).expect("serialize");
        assert_eq!(value["type"], "generation-complete");

        let value = serde_json::to_value(Response::ExportData {
            json_data: "[]".into(),
            filename: "caldera-tokens.json".into(),
        })
        .expect("serialize");
        assert_eq!(value["type"], "export-data");
        assert_eq!(value["jsonData"], "[]");
    }

    #[test]
    fn hct_info_serializes_rounded_components() {
        let value = serde_json::to_value(Response::HctInfo {
            hex: "#3366cc".into(),
            hct: HctSummary {
                hue: 265,
                chroma: 48,
                tone: 44,
            },
        })
        .expect("serialize");
        assert_eq!(value["hct"]["hue"], 265);
    }
}
