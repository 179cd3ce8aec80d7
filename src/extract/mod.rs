mod groq;
mod normalize;
mod prompt;

pub use groq::GroqExtractor;
pub use normalize::parse_model_output;
pub use prompt::build_prompt;

use crate::domain::ExtractedFields;

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("No text to extract from")]
    EmptyInput,

    #[error("LLM request failed: {0}")]
    Provider(String),

    #[error("LLM returned malformed JSON: {reason}")]
    MalformedOutput { reason: String, raw: String },
}

pub trait Extractor: Send + Sync {
    fn extract(&self, text: &str) -> Result<ExtractedFields, ExtractError>;
}

/// Run an extraction and flatten every failure into an empty result.
/// Auto-fill treats "nothing extracted" and "extraction failed" the same way.
pub fn extract_or_empty(extractor: &dyn Extractor, text: &str) -> ExtractedFields {
    match extractor.extract(text) {
        Ok(fields) => fields,
        Err(ExtractError::MalformedOutput { reason, raw }) => {
            tracing::warn!(%reason, raw = %raw, "Discarding malformed LLM response");
            ExtractedFields::default()
        }
        Err(e) => {
            tracing::warn!(error = %e, "Extraction failed");
            ExtractedFields::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Failing;

    impl Extractor for Failing {
        fn extract(&self, _text: &str) -> Result<ExtractedFields, ExtractError> {
            Err(ExtractError::MalformedOutput {
                reason: "expected value".to_string(),
                raw: "{not json".to_string(),
            })
        }
    }

    #[test]
    fn failures_flatten_to_empty() {
        assert!(extract_or_empty(&Failing, "some page").is_empty());
    }
}
