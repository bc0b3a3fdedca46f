use std::path::PathBuf;

use crate::client::SdClient;
use crate::config::GenerationConfig;
use crate::error::{Result, SdError};
use crate::session::Session;
use crate::types::GenerationOptions;

/// One user submission from the generation form.
#[derive(Debug, Clone, Default)]
pub struct SubmitRequest {
    /// Selected style; must name an entry in the loaded config.
    pub style: String,
    /// The user's prompt as typed. The style suffix is appended before
    /// the request goes out.
    pub prompt: String,
    /// Negative prompt from the advanced panel. `None` means the config
    /// default.
    pub negative_prompt: Option<String>,
    /// Overrides from the advanced panel.
    pub options: GenerationOptions,
}

impl SubmitRequest {
    pub fn new(style: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            style: style.into(),
            prompt: prompt.into(),
            ..Default::default()
        }
    }

    /// Set the negative prompt (overrides the config default).
    pub fn negative_prompt(mut self, negative: impl Into<String>) -> Self {
        self.negative_prompt = Some(negative.into());
        self
    }

    /// Set the advanced-panel overrides.
    pub fn options(mut self, options: GenerationOptions) -> Self {
        self.options = options;
        self
    }
}

/// Run one generation submission end to end.
///
/// Validates the prompt and style before anything touches the network,
/// appends the style suffix, performs the round trip through `client`,
/// and records a history entry on success. A failed generation leaves the
/// session untouched, so the caller can surface the error inline and keep
/// going.
///
/// While the session's advanced-options panel has not been opened, the
/// request's overrides and negative prompt are ignored and the defaults
/// apply, matching what the form actually showed the user.
///
/// # Errors
///
/// [`SdError::EmptyPrompt`] and [`SdError::UnknownStyle`] are returned
/// without issuing a request; everything else comes from
/// [`SdClient::txt2img`].
pub async fn submit(
    client: &SdClient,
    config: &GenerationConfig,
    session: &mut Session,
    request: &SubmitRequest,
) -> Result<PathBuf> {
    if request.prompt.trim().is_empty() {
        return Err(SdError::EmptyPrompt);
    }

    let final_prompt = config
        .styled_prompt(&request.style, &request.prompt)
        .ok_or_else(|| SdError::UnknownStyle(request.style.clone()))?;

    let (negative, options) = if session.advanced_options() {
        let negative = request
            .negative_prompt
            .clone()
            .unwrap_or_else(|| config.default_negative_prompt.clone());
        (negative, request.options.clone())
    } else {
        (
            config.default_negative_prompt.clone(),
            GenerationOptions::default(),
        )
    };

    let path = client.txt2img(&final_prompt, &negative, &options).await?;
    session.record(&request.prompt, &request.style, &path);
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Network-facing behavior is covered in tests/integration_tests.rs
    // against a mock server; these exercise the pre-flight guards, which
    // must fail before any request could be issued.

    fn unreachable_client() -> SdClient {
        // Port 1 is never bound; any request here would error loudly.
        SdClient::new("http://127.0.0.1:1")
    }

    #[tokio::test]
    async fn test_empty_prompt_rejected_before_network() {
        let config = GenerationConfig::fallback();
        let mut session = Session::new();
        let request = SubmitRequest::new("Paisajes", "   ");

        let err = submit(&unreachable_client(), &config, &mut session, &request)
            .await
            .unwrap_err();
        assert!(matches!(err, SdError::EmptyPrompt));
        assert!(session.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_style_rejected_before_network() {
        let config = GenerationConfig::fallback();
        let mut session = Session::new();
        let request = SubmitRequest::new("NoSuchStyle", "a castle");

        let err = submit(&unreachable_client(), &config, &mut session, &request)
            .await
            .unwrap_err();
        assert!(matches!(err, SdError::UnknownStyle(s) if s == "NoSuchStyle"));
        assert!(session.is_empty());
    }
}
