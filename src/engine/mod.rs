pub mod messages;

pub use messages::{GenerateThemeRequest, HctSummary, Request, Response};

use crate::color;
use crate::error::EngineResult;
use crate::export;
use crate::fonts::{self, FontProvider};
use crate::layout::{self, BridgeOptions, CornerDensity};
use crate::palette::{self, SeedOverrides, DEFAULT_NEUTRAL_SATURATION};
use crate::store::TokenStore;

/// Tunables that survive across requests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    /// Saturation forced onto the neutral ramp (see palette module).
    pub neutral_saturation: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            neutral_saturation: DEFAULT_NEUTRAL_SATURATION,
        }
    }
}

/// What the host should do after a message is handled.
#[derive(Debug, PartialEq)]
pub enum Outcome {
    Reply(Response),
    /// `cancel` closes the surrounding process; in-flight work is never
    /// interrupted because each message runs to completion first.
    Shutdown,
}

/// Message-driven core. One request is handled at a time; the token store is
/// the only state mutated, and only by `generate-theme`.
#[derive(Debug)]
pub struct Engine<F: FontProvider> {
    store: TokenStore,
    fonts: F,
    config: EngineConfig,
}

impl<F: FontProvider> Engine<F> {
    pub fn new(fonts: F) -> Self {
        Self::with_config(fonts, EngineConfig::default())
    }

    pub fn with_config(fonts: F, config: EngineConfig) -> Self {
        Self {
            store: TokenStore::new(),
            fonts,
            config,
        }
    }

    pub fn store(&self) -> &TokenStore {
        &self.store
    }

    pub fn handle(&mut self, request: Request) -> EngineResult<Outcome> {
        match request {
            Request::GenerateTheme(payload) => {
                if let Err(err) = self.generate(&payload) {
                    tracing::error!(?err, "theme generation failed");
                    return Err(err);
                }
                Ok(Outcome::Reply(Response::GenerationComplete))
            }
            Request::ExportJson => {
                let document = export::export(&self.store)?;
                let json_data = serde_json::to_string_pretty(&document)?;
                Ok(Outcome::Reply(Response::ExportData {
                    json_data,
                    filename: export::EXPORT_FILENAME.to_string(),
                }))
            }
            Request::GetHctInfo { hex } => {
                let info = color::hex_to_hct(&hex)?;
                Ok(Outcome::Reply(Response::HctInfo {
                    hex,
                    hct: HctSummary {
                        hue: info.hue.round() as i64,
                        chroma: info.chroma.round() as i64,
                        tone: info.tone.round() as i64,
                    },
                }))
            }
            Request::LoadFonts => Ok(Outcome::Reply(Response::FontsLoaded {
                fonts: fonts::font_inventory(&self.fonts),
            })),
            Request::Cancel => {
                tracing::info!("cancel received; shutting down");
                Ok(Outcome::Shutdown)
            }
        }
    }

    /// Full derivation + layout. All color math happens before the first
    /// store write, so a malformed seed aborts with the store untouched.
    fn generate(&mut self, request: &GenerateThemeRequest) -> EngineResult<()> {
        let overrides = SeedOverrides {
            neutral_hex: request.neutral_hex.clone(),
            success_hex: request.success_hex.clone(),
            warning_hex: request.warning_hex.clone(),
            info_hex: request.info_hex.clone(),
            failure_hex: request.failure_hex.clone(),
        };
        let colors =
            palette::derive_design_system(&request.hex, &overrides, self.config.neutral_saturation)?;
        let typography = fonts::resolve_typography(&self.fonts, &request.font_overrides);
        let density = CornerDensity::from_level(request.corner_radius_level);

        let base = layout::build_base(&mut self.store, &colors, &typography)?;
        let theme = layout::build_theme(&mut self.store, base, density)?;
        let bridge_options = BridgeOptions {
            modal_background_enabled: request.modal_background_enabled,
            modal_padding_size: request.modal_padding_size,
            header_icons_pairing_enabled: request.header_icons_pairing_enabled,
            header_background_enabled: request.header_background_enabled,
        };
        layout::build_bridge(&mut self.store, base, theme, &bridge_options)?;

        tracing::info!(seed = %request.hex, level = density.level(), "theme generated");
        Ok(())
    }
}
