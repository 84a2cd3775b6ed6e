//! Status-code handling shared by every store read.

use crate::error::StoreError;

/// Pass a successful database answer through, otherwise map it to a
/// [`StoreError`]. A 429 keeps its `Retry-After` seconds (60 when missing);
/// a 401 from an unaccepted `auth` token lands in [`StoreError::Api`].
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, StoreError> {
    if resp.status() == 429 {
        let retry_after = resp
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(60);
        return Err(StoreError::RateLimited {
            retry_after_secs: retry_after,
        });
    }
    if !resp.status().is_success() {
        return Err(StoreError::Api {
            status: resp.status().as_u16(),
            message: resp.text().await.unwrap_or_default(),
        });
    }
    Ok(resp)
}
