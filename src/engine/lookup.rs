//! Get-by-id with not-found suppression.

use crate::classify::{classify, Classification};
use crate::clients::RestClient;
use crate::rest::{ResourceError, RestResource};

/// Fetches one `R` by id.
///
/// - id `0` returns `Ok(None)` without a remote call
/// - a failure whose message matches `not_found_patterns` returns `Ok(None)`
/// - any other failure is returned unchanged
///
/// # Errors
///
/// Returns [`ResourceError`] for failures that are not suppressed.
///
/// ```rust,ignore
/// use shopify_tables::classify::DEFAULT_NOT_FOUND_PATTERNS;
/// use shopify_tables::engine::get_by_id;
/// use shopify_tables::rest::resources::Order;
///
/// let order = get_by_id::<Order>(&client, 450789469, DEFAULT_NOT_FOUND_PATTERNS).await?;
/// ```
pub async fn get_by_id<R>(
    client: &RestClient,
    id: u64,
    not_found_patterns: &[&str],
) -> Result<Option<R>, ResourceError>
where
    R: RestResource<Id = u64>,
{
    if id == 0 {
        tracing::debug!(
            component = "engine",
            operation = "get_by_id",
            resource = R::NAME,
            "id 0 requested, skipping remote call"
        );
        return Ok(None);
    }

    match R::find(client, &id).await {
        Ok(response) => Ok(Some(response.into_inner())),
        Err(error) => match classify(not_found_patterns, &error) {
            Classification::Suppress => {
                tracing::debug!(
                    component = "engine",
                    operation = "get_by_id",
                    resource = R::NAME,
                    id,
                    error = %error,
                    "not found, returning empty result"
                );
                Ok(None)
            }
            // Rate-limit failures reaching this point have exhausted the
            // transport's retries.
            Classification::Retry | Classification::Propagate => {
                tracing::error!(
                    component = "engine",
                    operation = "get_by_id",
                    resource = R::NAME,
                    id,
                    error = %error,
                    "lookup failed"
                );
                Err(error)
            }
        },
    }
}
