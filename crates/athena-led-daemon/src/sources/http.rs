//! Remote text fetched over HTTP.
//!
//! URLs naming netdata are answered with the router's WAN download rate
//! instead of the page body.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::time::Duration;

/// Request timeout.
const TIMEOUT: Duration = Duration::from_secs(10);

/// Netdata chart endpoint for the WAN interface.
pub const NETDATA_WAN_URL: &str =
    "http://10.0.0.1:19999/api/v1/allmetrics?format=json&filter=net.wan";

/// Rates above this many KB/s are shown in MB/s.
const KB_LIMIT: f64 = 999.0;

/// Prefix marking a download rate.
const DOWNLOAD_ARROW: char = '↘';

/// `allmetrics` response, reduced to the WAN chart.
#[derive(Debug, Default, Deserialize)]
struct AllMetrics {
    #[serde(rename = "net.wan", default)]
    wan: WanChart,
}

#[derive(Debug, Default, Deserialize)]
struct WanChart {
    #[serde(default)]
    dimensions: WanDimensions,
}

#[derive(Debug, Default, Deserialize)]
struct WanDimensions {
    #[serde(default)]
    received: Dimension,
}

#[derive(Debug, Default, Deserialize)]
struct Dimension {
    /// Kilobits per second.
    #[serde(default)]
    value: f64,
}

/// Builds the HTTP client shared by all fetches.
pub fn client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(TIMEOUT)
        .build()
        .context("Failed to build HTTP client")
}

/// Fetches the text to show for `url`.
pub async fn fetch(client: &reqwest::Client, url: &str) -> Result<String> {
    if url.contains("netdata") {
        let body = fetch_text(client, NETDATA_WAN_URL).await?;
        parse_wan_rate(&body)
    } else {
        fetch_text(client, url).await
    }
}

/// Fetches `url` and returns its body as text.
pub async fn fetch_text(client: &reqwest::Client, url: &str) -> Result<String> {
    let response = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("Failed to fetch {}", url))?;
    response
        .text()
        .await
        .with_context(|| format!("Failed to read response body from {}", url))
}

/// Extracts the WAN download rate from an `allmetrics` JSON body.
fn parse_wan_rate(body: &str) -> Result<String> {
    let metrics: AllMetrics =
        serde_json::from_str(body).context("Failed to parse netdata response")?;
    Ok(format_rate(metrics.wan.dimensions.received.value))
}

/// Formats a rate in kilobits per second as `↘<n>K` or `↘<n.n>M`.
pub fn format_rate(kilobits: f64) -> String {
    let kilobytes = (kilobits / 8.0).abs();
    if kilobytes > KB_LIMIT {
        format!("{}{:.1}M", DOWNLOAD_ARROW, kilobytes / 1024.0)
    } else {
        format!("{}{}K", DOWNLOAD_ARROW, kilobytes as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_builds() {
        assert!(client().is_ok());
    }

    #[tokio::test]
    async fn test_invalid_url_fails() {
        let client = client().unwrap();
        assert!(fetch_text(&client, "not a url").await.is_err());
    }

    #[test]
    fn test_format_rate_kilobytes() {
        assert_eq!(format_rate(0.0), "↘0K");
        assert_eq!(format_rate(800.0), "↘100K");
        // Fractions are truncated
        assert_eq!(format_rate(815.0), "↘101K");
        // Sign is ignored
        assert_eq!(format_rate(-800.0), "↘100K");
    }

    #[test]
    fn test_format_rate_threshold() {
        assert_eq!(format_rate(999.0 * 8.0), "↘999K");
        assert_eq!(format_rate(1000.0 * 8.0), "↘1.0M");
        assert_eq!(format_rate(2048.0 * 8.0), "↘2.0M");
        assert_eq!(format_rate(-1536.0 * 8.0), "↘1.5M");
    }

    #[test]
    fn test_parse_wan_rate() {
        let body = r#"{
            "net.wan": {
                "name": "net.wan",
                "dimensions": {
                    "received": { "name": "received", "value": -1600.5 },
                    "sent": { "name": "sent", "value": 240.0 }
                }
            }
        }"#;
        assert_eq!(parse_wan_rate(body).unwrap(), "↘200K");
        assert_eq!(parse_wan_rate("{}").unwrap(), "↘0K");
        assert!(parse_wan_rate("not json").is_err());
    }

    #[test]
    fn test_rate_is_drawable() {
        let columns = athena_led_hw::text::encode(&format_rate(8000.0));
        let digits = athena_led_hw::text::encode("1.0M");
        assert!(columns.len() > digits.len());
    }
}
