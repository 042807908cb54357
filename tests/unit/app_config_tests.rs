/*!
 * Tests for configuration loading and validation
 */

use std::str::FromStr;

use dramatis::app_config::{Config, VisionProviderKind};

/// Defaults match the empirically chosen constants
#[test]
fn test_defaultConfig_shouldCarryDocumentedDefaults() {
    let config = Config::default();

    assert_eq!(config.extraction.vertical_tolerance, 6.0);
    assert_eq!(config.extraction.horizontal_gap, 2.0);
    assert_eq!(config.vision.batch_size, 10);
    assert_eq!(config.vision.batch_overlap, 1);
    assert_eq!(config.vision.sample_stride, 10);
    assert_eq!(config.vision.context_lines, 3);
    assert_eq!(config.vision.max_pages, 120);
    assert_eq!(config.vision.provider, VisionProviderKind::Anthropic);
}

/// The default configuration validates
#[test]
fn test_defaultConfig_shouldValidate() {
    assert!(Config::default().validate().is_ok());
}

/// An overlap as large as the batch can never advance and is rejected
#[test]
fn test_validate_withOverlapNotSmallerThanBatch_shouldFail() {
    let mut config = Config::default();
    config.vision.batch_overlap = config.vision.batch_size;

    assert!(config.validate().is_err());
}

/// Geometry constants must stay positive
#[test]
fn test_validate_withNonPositiveTolerance_shouldFail() {
    let mut config = Config::default();
    config.extraction.vertical_tolerance = 0.0;

    assert!(config.validate().is_err());
}

/// A zero sampling stride would loop forever and is rejected
#[test]
fn test_validate_withZeroStride_shouldFail() {
    let mut config = Config::default();
    config.vision.sample_stride = 0;

    assert!(config.validate().is_err());
}

/// A custom endpoint must be a parsable URL
#[test]
fn test_validate_withGarbageEndpoint_shouldFail() {
    let mut config = Config::default();
    config.vision.endpoint = "not a url".to_string();

    assert!(config.validate().is_err());
}

/// Partial JSON fills the remaining fields with defaults
#[test]
fn test_deserialize_withPartialJson_shouldFillDefaults() {
    let json = r#"{"vision": {"provider": "openai", "batch_size": 5}}"#;

    let config: Config = serde_json::from_str(json).unwrap();

    assert_eq!(config.vision.provider, VisionProviderKind::OpenAI);
    assert_eq!(config.vision.batch_size, 5);
    assert_eq!(config.vision.batch_overlap, 1);
    assert_eq!(config.extraction.vertical_tolerance, 6.0);
}

/// Serialization round-trips through JSON
#[test]
fn test_roundTrip_withDefaultConfig_shouldSurviveJson() {
    let config = Config::default();

    let json = serde_json::to_string(&config).unwrap();
    let restored: Config = serde_json::from_str(&json).unwrap();

    assert_eq!(restored.vision.batch_size, config.vision.batch_size);
    assert_eq!(restored.vision.provider, config.vision.provider);
    assert_eq!(
        restored.extraction.max_heading_len,
        config.extraction.max_heading_len
    );
}

/// Provider kinds parse from their lowercase names and display back
#[test]
fn test_providerKind_withKnownNames_shouldParseAndDisplay() {
    assert_eq!(
        VisionProviderKind::from_str("anthropic").unwrap(),
        VisionProviderKind::Anthropic
    );
    assert_eq!(
        VisionProviderKind::from_str("OpenAI").unwrap(),
        VisionProviderKind::OpenAI
    );
    assert!(VisionProviderKind::from_str("cohere").is_err());

    assert_eq!(VisionProviderKind::Anthropic.to_string(), "anthropic");
    assert_eq!(VisionProviderKind::OpenAI.display_name(), "OpenAI");
}

/// Model and endpoint fall back to per-provider defaults
#[test]
fn test_visionConfig_withEmptyModel_shouldFallBackPerProvider() {
    let mut config = Config::default();
    assert!(config.vision.get_model().contains("claude"));
    assert!(config.vision.get_endpoint().contains("anthropic.com"));

    config.vision.provider = VisionProviderKind::OpenAI;
    assert!(config.vision.get_model().contains("gpt"));
    assert!(config.vision.get_endpoint().contains("openai.com"));

    config.vision.model = "custom-model".to_string();
    assert_eq!(config.vision.get_model(), "custom-model");
}
