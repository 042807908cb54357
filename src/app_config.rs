use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::glyph_reflow::ReflowOptions;
use crate::segmenter::SegmenterOptions;

/// Application configuration module
/// This module handles the library configuration including loading,
/// validating and saving configuration settings.
/// Represents the extraction configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    /// Deterministic path settings
    #[serde(default)]
    pub extraction: ExtractionConfig,

    /// Vision path settings
    #[serde(default)]
    pub vision: VisionConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Vision provider type
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum VisionProviderKind {
    // @provider: Anthropic
    #[default]
    Anthropic,
    // @provider: OpenAI
    OpenAI,
}

impl VisionProviderKind {
    // @returns: Capitalized provider name
    pub fn display_name(&self) -> &str {
        match self {
            Self::Anthropic => "Anthropic",
            Self::OpenAI => "OpenAI",
        }
    }

    // @returns: Lowercase provider identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::Anthropic => "anthropic".to_string(),
            Self::OpenAI => "openai".to_string(),
        }
    }
}

impl std::fmt::Display for VisionProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

impl std::str::FromStr for VisionProviderKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "anthropic" => Ok(Self::Anthropic),
            "openai" => Ok(Self::OpenAI),
            _ => Err(anyhow!("Invalid provider type: {}", s)),
        }
    }
}

/// Settings for the deterministic reflow + segmentation path
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ExtractionConfig {
    // @field: Baseline delta treated as the same printed line
    #[serde(default = "default_vertical_tolerance")]
    pub vertical_tolerance: f64,

    // @field: Horizontal gap that produces a word space
    #[serde(default = "default_horizontal_gap")]
    pub horizontal_gap: f64,

    // @field: Width below which blank runs are extraction noise
    #[serde(default = "default_min_glyph_width")]
    pub min_glyph_width: f64,

    // @field: Maximum scene heading length
    #[serde(default = "default_max_heading_len")]
    pub max_heading_len: usize,

    // @field: Emit parenthesized spans as stage direction lines
    #[serde(default = "default_true")]
    pub emit_stage_directions: bool,

    // @field: Minimum parenthesized span length worth emitting
    #[serde(default = "default_min_direction_len")]
    pub min_direction_len: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            vertical_tolerance: default_vertical_tolerance(),
            horizontal_gap: default_horizontal_gap(),
            min_glyph_width: default_min_glyph_width(),
            max_heading_len: default_max_heading_len(),
            emit_stage_directions: true,
            min_direction_len: default_min_direction_len(),
        }
    }
}

impl ExtractionConfig {
    /// Reflow options derived from this configuration
    pub fn reflow_options(&self) -> ReflowOptions {
        ReflowOptions {
            vertical_tolerance: self.vertical_tolerance,
            horizontal_gap: self.horizontal_gap,
            min_glyph_width: self.min_glyph_width,
        }
    }

    /// Segmenter options derived from this configuration
    pub fn segmenter_options(&self) -> SegmenterOptions {
        SegmenterOptions {
            max_heading_len: self.max_heading_len,
            emit_stage_directions: self.emit_stage_directions,
            min_direction_len: self.min_direction_len,
        }
    }
}

/// Settings for the vision-assisted extraction path
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct VisionConfig {
    // @field: Provider type identifier
    #[serde(default)]
    pub provider: VisionProviderKind,

    // @field: Model name
    #[serde(default = "String::new")]
    pub model: String,

    // @field: API key
    #[serde(default = "String::new")]
    pub api_key: String,

    // @field: Service URL
    #[serde(default = "String::new")]
    pub endpoint: String,

    // @field: Page rasterization scale
    #[serde(default = "default_render_scale")]
    pub render_scale: f32,

    // @field: Pages per extraction batch
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    // @field: Pages shared between consecutive batches
    #[serde(default = "default_batch_overlap")]
    pub batch_overlap: usize,

    // @field: Hard ceiling on pages processed in one run
    #[serde(default = "default_max_pages")]
    pub max_pages: usize,

    // @field: Front-matter pages always sampled for discovery
    #[serde(default = "default_lead_pages")]
    pub lead_pages: usize,

    // @field: Body sampling stride for discovery
    #[serde(default = "default_sample_stride")]
    pub sample_stride: usize,

    // @field: Curtain-recap pages always sampled for discovery
    #[serde(default = "default_tail_pages")]
    pub tail_pages: usize,

    // @field: Accepted lines carried into the next batch prompt
    #[serde(default = "default_context_lines")]
    pub context_lines: usize,

    // @field: Fixed delay between batches
    #[serde(default = "default_rate_limit_delay_ms")]
    pub rate_limit_delay_ms: u64,

    // @field: Attempts per batch before it is skipped
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    // @field: Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    // @field: Maximum tokens per provider response
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

impl Default for VisionConfig {
    fn default() -> Self {
        Self {
            provider: VisionProviderKind::default(),
            model: String::new(),
            api_key: String::new(),
            endpoint: String::new(),
            render_scale: default_render_scale(),
            batch_size: default_batch_size(),
            batch_overlap: default_batch_overlap(),
            max_pages: default_max_pages(),
            lead_pages: default_lead_pages(),
            sample_stride: default_sample_stride(),
            tail_pages: default_tail_pages(),
            context_lines: default_context_lines(),
            rate_limit_delay_ms: default_rate_limit_delay_ms(),
            max_retries: default_max_retries(),
            timeout_secs: default_timeout_secs(),
            max_tokens: default_max_tokens(),
        }
    }
}

impl VisionConfig {
    /// Get the model for the active provider, with per-provider fallback
    pub fn get_model(&self) -> String {
        if !self.model.is_empty() {
            return self.model.clone();
        }
        match self.provider {
            VisionProviderKind::Anthropic => default_anthropic_model(),
            VisionProviderKind::OpenAI => default_openai_model(),
        }
    }

    /// Get the endpoint for the active provider, with per-provider fallback
    pub fn get_endpoint(&self) -> String {
        if !self.endpoint.is_empty() {
            return self.endpoint.clone();
        }
        match self.provider {
            VisionProviderKind::Anthropic => default_anthropic_endpoint(),
            VisionProviderKind::OpenAI => default_openai_endpoint(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_vertical_tolerance() -> f64 {
    6.0
}

fn default_horizontal_gap() -> f64 {
    2.0
}

fn default_min_glyph_width() -> f64 {
    0.1
}

fn default_max_heading_len() -> usize {
    60
}

fn default_min_direction_len() -> usize {
    2
}

fn default_render_scale() -> f32 {
    1.5
}

fn default_batch_size() -> usize {
    10
}

fn default_batch_overlap() -> usize {
    1
}

fn default_max_pages() -> usize {
    120
}

fn default_lead_pages() -> usize {
    3
}

fn default_sample_stride() -> usize {
    10
}

fn default_tail_pages() -> usize {
    2
}

fn default_context_lines() -> usize {
    3
}

fn default_rate_limit_delay_ms() -> u64 {
    1000 // 1s default delay between batches
}

fn default_max_retries() -> u32 {
    3 // Default to 3 attempts per batch
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_max_tokens() -> u32 {
    4096
}

fn default_true() -> bool {
    true
}

fn default_openai_endpoint() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_anthropic_endpoint() -> String {
    "https://api.anthropic.com".to_string()
}

fn default_openai_model() -> String {
    "gpt-4o".to_string()
}

fn default_anthropic_model() -> String {
    "claude-3-5-sonnet-latest".to_string()
}

impl Config {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.extraction.vertical_tolerance <= 0.0 {
            return Err(anyhow!("vertical_tolerance must be positive"));
        }
        if self.extraction.horizontal_gap < 0.0 {
            return Err(anyhow!("horizontal_gap must not be negative"));
        }
        if self.vision.batch_size == 0 {
            return Err(anyhow!("batch_size must be at least 1"));
        }
        if self.vision.batch_overlap >= self.vision.batch_size {
            return Err(anyhow!("batch_overlap must be smaller than batch_size"));
        }
        if self.vision.sample_stride == 0 {
            return Err(anyhow!("sample_stride must be at least 1"));
        }
        if !self.vision.endpoint.is_empty() {
            url::Url::parse(&self.vision.endpoint)
                .with_context(|| format!("Invalid endpoint URL: {}", self.vision.endpoint))?;
        }
        Ok(())
    }
}
