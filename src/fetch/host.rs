// src/fetch/host.rs
// =============================================================================
// Host name extraction. Per-host admission is keyed by the value this returns.
// =============================================================================

use url::Url;

use crate::error::MalformedUrl;

// Returns the host of an absolute URL ("https://Example.com:8080/x" -> "example.com")
//
// The url crate lowercases domain names while parsing, so hosts that differ
// only in case share one permit pool.
pub fn host_of(url: &str) -> Result<String, MalformedUrl> {
    let parsed = Url::parse(url).map_err(|e| MalformedUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    parsed
        .host_str()
        .map(str::to_string)
        .ok_or_else(|| MalformedUrl {
            url: url.to_string(),
            reason: "URL has no host".to_string(),
        })
}
