//! Status-code handling for the hosted and local classifier calls.

use crate::error::UnavailableReason;

/// Turn a non-success classifier answer into an [`UnavailableReason`].
///
/// A 429 becomes [`UnavailableReason::RateLimited`] using the `Retry-After`
/// seconds (60 when missing). Any other failure status becomes
/// [`UnavailableReason::Api`] carrying the body, so the aspect reports why it
/// is unavailable.
pub async fn check_response(
    resp: reqwest::Response,
) -> Result<reqwest::Response, UnavailableReason> {
    if resp.status() == 429 {
        let retry_after = parse_retry_after(&resp);
        return Err(UnavailableReason::RateLimited {
            retry_after_secs: retry_after,
        });
    }
    if !resp.status().is_success() {
        return Err(UnavailableReason::Api {
            status: resp.status().as_u16(),
            message: resp.text().await.unwrap_or_default(),
        });
    }
    Ok(resp)
}

/// Parse the `Retry-After` header as seconds, falling back to 60 s.
fn parse_retry_after(resp: &reqwest::Response) -> u64 {
    resp.headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(60)
}
