use reqwest::header::{ACCEPT_RANGES, CONTENT_LENGTH};
use reqwest::{Client, Request};
use url::Url;

use crate::download::error::ProbeError;

/// What the probe learned about the resource. Derived once per download and
/// immutable afterwards.
#[derive(Debug, Clone, Copy)]
pub struct ResourceInfo {
    /// Declared content length; 0 means unknown and forces the fallback path.
    pub total_size: u64,
    /// Whether the origin advertised `Accept-Ranges: bytes`.
    pub range_capable: bool,
}

/// Issues a metadata-only HEAD request. A transport error or non-success
/// status is fatal to the whole download.
pub async fn probe(client: &Client, url: Url) -> Result<ResourceInfo, ProbeError> {
    let request = Request::new(reqwest::Method::HEAD, url);
    let response = client.execute(request).await?;

    if !response.status().is_success() {
        return Err(ProbeError::Status(response.status()));
    }

    let range_capable = response
        .headers()
        .get(ACCEPT_RANGES)
        .and_then(|value| value.to_str().ok())
        .map(|value| value == "bytes")
        .unwrap_or(false);

    let total_size = response
        .headers()
        .get(CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<u64>().ok())
        .unwrap_or(0);

    Ok(ResourceInfo {
        total_size,
        range_capable,
    })
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    async fn probe_against(template: ResponseTemplate) -> Result<ResourceInfo, ProbeError> {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .respond_with(template)
            .mount(&server)
            .await;

        let url = Url::parse(&server.uri()).unwrap();
        probe(&Client::new(), url).await
    }

    #[tokio::test]
    async fn should_report_range_support() {
        // The body is stripped from the HEAD response but sizes Content-Length.
        let info = probe_against(
            ResponseTemplate::new(200)
                .insert_header("Accept-Ranges", "bytes")
                .set_body_bytes(vec![0u8; 1024]),
        )
        .await
        .unwrap();

        assert!(info.range_capable);
        assert_eq!(info.total_size, 1024);
    }

    #[tokio::test]
    async fn should_report_no_range_support() {
        let info = probe_against(
            ResponseTemplate::new(200)
                .insert_header("Accept-Ranges", "none")
                .set_body_bytes(vec![0u8; 2048]),
        )
        .await
        .unwrap();

        assert!(!info.range_capable);
        assert_eq!(info.total_size, 2048);
    }

    #[tokio::test]
    async fn should_treat_missing_headers_as_unknown() {
        let info = probe_against(ResponseTemplate::new(200)).await.unwrap();

        assert!(!info.range_capable);
        assert_eq!(info.total_size, 0);
    }

    #[tokio::test]
    async fn should_fail_on_non_success_status() {
        let result = probe_against(ResponseTemplate::new(404)).await;

        assert!(matches!(result, Err(ProbeError::Status(status)) if status == 404));
    }
}
