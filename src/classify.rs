//! Textual classification of remote failures.
//!
//! The Admin REST API exposes no structured code that separates "resource
//! absent" or "throttled" from other failures, so both decisions match on the
//! error message. Callers go through [`is_suppressible`] and
//! [`is_retryable`] only; the matching strategy lives here.

use std::error::Error as StdError;

/// Marker text Shopify returns in the body of a throttled request.
pub const RATE_LIMIT_MARKER: &str = "Reduce request rates to resume uninterrupted service";

/// Patterns that mark a failure as "resource absent".
pub const DEFAULT_NOT_FOUND_PATTERNS: &[&str] = &["Not Found"];

/// Outcome of classifying one failure at a get-by-id call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Transient throttling; the transport retries it.
    Retry,
    /// The resource is absent; the caller sees an empty result.
    Suppress,
    /// Any other failure; returned to the caller unchanged.
    Propagate,
}

/// Returns `true` iff the error message contains any of `patterns`.
///
/// Matching is a case-sensitive substring test. An empty pattern set never
/// matches.
///
/// ```rust
/// use shopify_tables::classify::is_suppressible;
///
/// let err = std::io::Error::new(std::io::ErrorKind::Other, r#"{"errors":"Not Found"}"#);
/// assert!(is_suppressible(&["Not Found"], &err));
/// assert!(!is_suppressible(&["not found"], &err));
/// ```
#[must_use]
pub fn is_suppressible<E>(patterns: &[&str], error: &E) -> bool
where
    E: StdError + ?Sized,
{
    message_matches_any(patterns, &error.to_string())
}

/// Returns `true` iff the error message contains [`RATE_LIMIT_MARKER`].
#[must_use]
pub fn is_retryable<E>(error: &E) -> bool
where
    E: StdError + ?Sized,
{
    is_rate_limit_message(&error.to_string())
}

/// Message-level form of [`is_retryable`], used by the transport before an
/// error value exists.
#[must_use]
pub fn is_rate_limit_message(message: &str) -> bool {
    message.contains(RATE_LIMIT_MARKER)
}

/// Classifies `error` for a call site that tolerates `patterns`.
///
/// Rate limiting wins over suppression so a throttled request is never
/// mistaken for an absent resource.
#[must_use]
pub fn classify<E>(patterns: &[&str], error: &E) -> Classification
where
    E: StdError + ?Sized,
{
    let message = error.to_string();
    if is_rate_limit_message(&message) {
        Classification::Retry
    } else if message_matches_any(patterns, &message) {
        Classification::Suppress
    } else {
        Classification::Propagate
    }
}

fn message_matches_any(patterns: &[&str], message: &str) -> bool {
    patterns
        .iter()
        .any(|pattern| !pattern.is_empty() && message.contains(pattern))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::{HttpError, HttpResponseError};

    fn response_error(code: u16, message: &str) -> HttpError {
        HttpError::Response(HttpResponseError {
            code,
            message: message.to_string(),
            error_reference: None,
        })
    }

    #[test]
    fn test_suppressible_matches_substring() {
        let err = response_error(404, r#"{"errors":"Not Found"}"#);
        assert!(is_suppressible(DEFAULT_NOT_FOUND_PATTERNS, &err));
        assert!(is_suppressible(&["Forbidden", "Not Found"], &err));
    }

    #[test]
    fn test_suppressible_is_case_sensitive_and_literal() {
        let err = response_error(404, r#"{"errors":"Not Found"}"#);
        assert!(!is_suppressible(&["not found"], &err));
        assert!(!is_suppressible(&["Not.Found"], &err));
    }

    #[test]
    fn test_empty_pattern_set_and_empty_pattern_never_match() {
        let err = response_error(404, r#"{"errors":"Not Found"}"#);
        assert!(!is_suppressible(&[], &err));
        assert!(!is_suppressible(&[""], &err));
    }

    #[test]
    fn test_retryable_requires_marker_text() {
        let throttled = response_error(
            429,
            r#"{"errors":"Exceeded 2 calls per second for api client. Reduce request rates to resume uninterrupted service."}"#,
        );
        assert!(is_retryable(&throttled));

        let other = response_error(429, r#"{"errors":"Too many requests"}"#);
        assert!(!is_retryable(&other));
    }

    #[test]
    fn test_classify_prefers_retry_over_suppress() {
        let err = response_error(
            429,
            "Not Found? Reduce request rates to resume uninterrupted service",
        );
        assert_eq!(classify(DEFAULT_NOT_FOUND_PATTERNS, &err), Classification::Retry);

        let err = response_error(404, r#"{"errors":"Not Found"}"#);
        assert_eq!(
            classify(DEFAULT_NOT_FOUND_PATTERNS, &err),
            Classification::Suppress
        );

        let err = response_error(403, r#"{"errors":"Forbidden"}"#);
        assert_eq!(
            classify(DEFAULT_NOT_FOUND_PATTERNS, &err),
            Classification::Propagate
        );
    }

    #[test]
    fn test_accepts_trait_objects() {
        let err: Box<dyn StdError + Send + Sync> = "Not Found".into();
        assert!(is_suppressible(&["Not Found"], err.as_ref()));
    }
}
