use reqwest::Request;
use url::Url;

pub fn clone_request(request: &Request) -> Request {
    let mut req = Request::new(request.method().clone(), request.url().clone());
    *req.headers_mut() = request.headers().clone();
    *req.version_mut() = request.version();
    *req.timeout_mut() = request.timeout().map(Clone::clone);

    req
}

/// Output file name derived from the URL's final path segment.
pub fn file_name_from_url(url: &Url) -> String {
    url.path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|segment| !segment.is_empty())
        .unwrap_or("download")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_take_last_path_segment() {
        let url = Url::parse("https://example.com/files/video.mp4").unwrap();
        assert_eq!(file_name_from_url(&url), "video.mp4");
    }

    #[test]
    fn should_fall_back_when_path_has_no_segment() {
        let url = Url::parse("https://example.com/").unwrap();
        assert_eq!(file_name_from_url(&url), "download");

        let url = Url::parse("https://example.com/files/").unwrap();
        assert_eq!(file_name_from_url(&url), "download");
    }

    #[test]
    fn should_ignore_query_and_fragment() {
        let url = Url::parse("https://example.com/a/b.bin?x=1#top").unwrap();
        assert_eq!(file_name_from_url(&url), "b.bin");
    }
}
