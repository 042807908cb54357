/*!
 * Tests for the error taxonomy
 */

use dramatis::errors::{AppError, ExtractError, ProviderError};

/// Each extraction error formats with its context
#[test]
fn test_extractError_display_shouldDescribeFailure() {
    let input = ExtractError::Input("missing %PDF- header magic".to_string());
    assert!(input.to_string().contains("Unreadable PDF input"));

    let no_dialogue = ExtractError::NoDialogue;
    assert_eq!(no_dialogue.to_string(), "No dialogue detected in document");

    let batch = ExtractError::Batch("reply contained no JSON".to_string());
    assert!(batch.to_string().contains("Vision batch failed"));
}

/// Only the no-dialogue condition invites the vision fallback
#[test]
fn test_isRecoverable_shouldBeTrueOnlyForNoDialogue() {
    assert!(ExtractError::NoDialogue.is_recoverable());
    assert!(!ExtractError::Input("bad".to_string()).is_recoverable());
    assert!(!ExtractError::Batch("bad".to_string()).is_recoverable());
}

/// Provider errors wrap into extraction errors via From
#[test]
fn test_providerError_shouldConvertIntoExtractError() {
    let provider = ProviderError::RateLimitExceeded("slow down".to_string());

    let extract: ExtractError = provider.into();

    assert!(matches!(extract, ExtractError::Provider(_)));
    assert!(extract.to_string().contains("Rate limit exceeded"));
}

/// Extraction errors wrap into the application error
#[test]
fn test_extractError_shouldConvertIntoAppError() {
    let app: AppError = ExtractError::NoDialogue.into();

    assert!(matches!(app, AppError::Extract(_)));
}

/// API errors carry their status code in the message
#[test]
fn test_apiError_display_shouldIncludeStatusCode() {
    let error = ProviderError::ApiError {
        status_code: 429,
        message: "too many requests".to_string(),
    };

    assert!(error.to_string().contains("429"));
    assert!(error.to_string().contains("too many requests"));
}

/// Anyhow errors fold into the unknown variant
#[test]
fn test_anyhowError_shouldConvertIntoAppError() {
    let app: AppError = anyhow::anyhow!("something else").into();

    assert!(matches!(app, AppError::Unknown(_)));
}
