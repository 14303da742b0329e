//! Intent-resolution backend port.

use lexbridge_types::error::IntentError;
use lexbridge_types::intent::{IntentResolution, RecognizeText};

/// A text-in, structured-response-out intent-resolution service.
///
/// The backend owns all conversational state for a session; callers only
/// pass the session identifier along. Uses native async fn in traits.
pub trait IntentResolver: Send + Sync {
    /// Resolve one user utterance. Blocks the caller until the backend
    /// answers or fails.
    fn recognize_text(
        &self,
        request: &RecognizeText,
    ) -> impl std::future::Future<Output = Result<IntentResolution, IntentError>> + Send;
}
