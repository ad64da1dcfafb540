use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Environment variable overriding `ocr.base_url`.
pub const OCR_URL_ENV: &str = "ROI_ANNOTATOR_OCR_URL";

const MAX_RECENT_IMAGES: usize = 10;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine config directory")]
    NoConfigDir,
    #[error("config I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub canvas: CanvasConfig,
    #[serde(default)]
    pub interaction: InteractionConfig,
    #[serde(default)]
    pub appearance: AppearanceConfig,
    #[serde(default)]
    pub ocr: OcrConfig,
    #[serde(default)]
    pub files: FilesConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasConfig {
    #[serde(default = "default_min_scale")]
    pub min_scale: f32,
    #[serde(default = "default_max_scale")]
    pub max_scale: f32,
    #[serde(default = "default_zoom_step")]
    pub zoom_step: f32,
    /// Drags whose width or height is not above this (image units) are dropped.
    #[serde(default = "default_min_rect_size")]
    pub min_rect_size: f32,
    #[serde(default = "default_trash_hit_radius")]
    pub trash_hit_radius: f32,
    #[serde(default = "default_trash_glyph_radius")]
    pub trash_glyph_radius: f32,
}

/// Modifier key that turns a left-button drag into a pan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PanModifier {
    #[default]
    Control,
    Shift,
    Alt,
}

impl PanModifier {
    pub fn is_held(&self, modifiers: &crate::state::Modifiers) -> bool {
        match self {
            PanModifier::Control => modifiers.control,
            PanModifier::Shift => modifiers.shift,
            PanModifier::Alt => modifiers.alt,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionConfig {
    #[serde(default)]
    pub pan_modifier: PanModifier,
    #[serde(default = "default_true")]
    pub wheel_zoom_requires_modifier: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppearanceConfig {
    #[serde(default = "default_rect_color")]
    pub rect_color: String,
    #[serde(default = "default_selected_color")]
    pub selected_color: String,
    #[serde(default = "default_preview_color")]
    pub preview_color: String,
    #[serde(default = "default_glyph_fill")]
    pub glyph_fill: String,
    #[serde(default = "default_glyph_hover_fill")]
    pub glyph_hover_fill: String,
    #[serde(default = "default_glyph_stroke")]
    pub glyph_stroke: String,
    #[serde(default = "default_glyph_hover_stroke")]
    pub glyph_hover_stroke: String,
    #[serde(default = "default_glyph_cross")]
    pub glyph_cross: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OcrConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_process_path")]
    pub process_path: String,
    #[serde(default = "default_result_path")]
    pub result_path: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    #[serde(default = "default_max_polls")]
    pub max_polls: u32,
    #[serde(default = "default_max_encoded_bytes")]
    pub max_encoded_bytes: usize,
}

impl OcrConfig {
    /// Full URL of the ROI submission endpoint.
    pub fn process_url(&self) -> String {
        join_url(&self.base_url, &self.process_path)
    }

    /// Full URL polled for a deferred OCR task.
    pub fn result_url(&self, task_id: &str) -> String {
        format!("{}/{}", join_url(&self.base_url, &self.result_path), task_id)
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilesConfig {
    #[serde(default)]
    pub recent_images: Vec<String>,
}

// Default value functions
fn default_min_scale() -> f32 {
    0.2
}

fn default_max_scale() -> f32 {
    5.0
}

fn default_zoom_step() -> f32 {
    1.1
}

fn default_min_rect_size() -> f32 {
    10.0
}

fn default_trash_hit_radius() -> f32 {
    12.0
}

fn default_trash_glyph_radius() -> f32 {
    10.0
}

fn default_true() -> bool {
    true
}

fn default_rect_color() -> String {
    "#0000ff".to_string()
}

fn default_selected_color() -> String {
    "#ff0000".to_string()
}

fn default_preview_color() -> String {
    "#008000".to_string()
}

fn default_glyph_fill() -> String {
    "#ffffff".to_string()
}

fn default_glyph_hover_fill() -> String {
    "#f8d7da".to_string()
}

fn default_glyph_stroke() -> String {
    "#cccccc".to_string()
}

fn default_glyph_hover_stroke() -> String {
    "#dc3545".to_string()
}

fn default_glyph_cross() -> String {
    "#dc3545".to_string()
}

fn default_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_process_path() -> String {
    "/process_roi".to_string()
}

fn default_result_path() -> String {
    "/get_ocr_result".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_poll_interval_ms() -> u64 {
    1000
}

fn default_max_polls() -> u32 {
    30
}

fn default_max_encoded_bytes() -> usize {
    2 * 1024 * 1024
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            min_scale: default_min_scale(),
            max_scale: default_max_scale(),
            zoom_step: default_zoom_step(),
            min_rect_size: default_min_rect_size(),
            trash_hit_radius: default_trash_hit_radius(),
            trash_glyph_radius: default_trash_glyph_radius(),
        }
    }
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            pan_modifier: PanModifier::Control,
            wheel_zoom_requires_modifier: true,
        }
    }
}

impl Default for AppearanceConfig {
    fn default() -> Self {
        Self {
            rect_color: default_rect_color(),
            selected_color: default_selected_color(),
            preview_color: default_preview_color(),
            glyph_fill: default_glyph_fill(),
            glyph_hover_fill: default_glyph_hover_fill(),
            glyph_stroke: default_glyph_stroke(),
            glyph_hover_stroke: default_glyph_hover_stroke(),
            glyph_cross: default_glyph_cross(),
        }
    }
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: default_base_url(),
            process_path: default_process_path(),
            result_path: default_result_path(),
            timeout_secs: default_timeout_secs(),
            poll_interval_ms: default_poll_interval_ms(),
            max_polls: default_max_polls(),
            max_encoded_bytes: default_max_encoded_bytes(),
        }
    }
}

/// Get the path to the config file
pub fn config_path() -> Result<PathBuf, ConfigError> {
    let dirs = directories::ProjectDirs::from("", "", "roi-annotator").ok_or(ConfigError::NoConfigDir)?;
    Ok(dirs.config_dir().join("config.toml"))
}

/// Parse a config document; missing keys take their defaults.
pub fn parse_config(content: &str) -> Result<AppConfig, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Load configuration from file, or return default if file doesn't exist.
/// Environment overrides are applied in both cases.
pub fn load_config() -> AppConfig {
    let mut config = match config_path() {
        Ok(path) if path.exists() => match std::fs::read_to_string(&path) {
            Ok(content) => parse_config(&content).unwrap_or_else(|e| {
                log::warn!("{e}. Using defaults.");
                AppConfig::default()
            }),
            Err(e) => {
                log::warn!("Failed to read config file {}: {e}. Using defaults.", path.display());
                AppConfig::default()
            }
        },
        Ok(_) => AppConfig::default(),
        Err(e) => {
            log::warn!("{e}. Using defaults.");
            AppConfig::default()
        }
    };
    apply_env_overrides(&mut config, std::env::var(OCR_URL_ENV).ok());
    config
}

/// Apply the OCR URL override, if one is set and non-empty.
pub fn apply_env_overrides(config: &mut AppConfig, ocr_url: Option<String>) {
    if let Some(url) = ocr_url.filter(|u| !u.trim().is_empty()) {
        log::debug!("OCR endpoint overridden from {OCR_URL_ENV}: {url}");
        config.ocr.base_url = url;
    }
}

/// Save configuration to file
pub fn save_config(config: &AppConfig) -> Result<(), ConfigError> {
    let path = config_path()?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let toml = toml::to_string_pretty(config)?;
    std::fs::write(&path, toml)?;

    Ok(())
}

/// Add an image path to the front of the recent images list
pub fn add_recent_image(config: &mut AppConfig, path: String) {
    config.files.recent_images.retain(|p| p != &path);
    config.files.recent_images.insert(0, path);
    config.files.recent_images.truncate(MAX_RECENT_IMAGES);
}
