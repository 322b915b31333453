//! Text extraction from uploaded files.
//!
//! Plain text uploads pass through with lossy UTF-8 decoding. PDF parsing is
//! CPU-bound and runs on the blocking pool so it never stalls the runtime.

use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("Only txt and pdf files are supported.")]
    UnsupportedType,
    #[error("failed to extract text: {0}")]
    Extraction(String),
}

/// Extract plain text from an uploaded file based on its content type.
///
/// # Errors
///
/// [`ExtractError::UnsupportedType`] for anything other than `text/plain`
/// and `application/pdf`, [`ExtractError::Extraction`] when parsing fails.
pub async fn extract_text(content_type: &str, bytes: Vec<u8>) -> Result<String, ExtractError> {
    match content_type {
        "text/plain" => Ok(String::from_utf8_lossy(&bytes).into_owned()),
        "application/pdf" => {
            info!(size = bytes.len(), "extracting text from pdf upload");
            let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
                .await
                .map_err(|e| ExtractError::Extraction(e.to_string()))?
                .map_err(|e| ExtractError::Extraction(e.to_string()))?;
            Ok(text)
        }
        _ => Err(ExtractError::UnsupportedType),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn plain_text_passes_through() {
        let text = extract_text("text/plain", b"hello world".to_vec()).await.unwrap();
        assert_eq!(text, "hello world");
    }

    #[tokio::test]
    async fn invalid_utf8_is_decoded_lossily() {
        let text = extract_text("text/plain", vec![0x68, 0x69, 0xFF]).await.unwrap();
        assert!(text.starts_with("hi"));
    }

    #[tokio::test]
    async fn unsupported_content_type_is_rejected() {
        let err = extract_text("image/png", vec![1, 2, 3]).await.unwrap_err();
        assert!(matches!(err, ExtractError::UnsupportedType));
        assert_eq!(err.to_string(), "Only txt and pdf files are supported.");
    }

    #[tokio::test]
    async fn malformed_pdf_reports_extraction_error() {
        let err = extract_text("application/pdf", b"not a pdf".to_vec()).await.unwrap_err();
        assert!(matches!(err, ExtractError::Extraction(_)));
    }
}
