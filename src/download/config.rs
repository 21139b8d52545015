use std::num::NonZeroUsize;
use std::path::PathBuf;

use headers::HeaderMapExt;
use reqwest::Request;
use url::Url;

use crate::download::util::file_name_from_url;

/// Number of concurrent ranges a resource is split into.
pub const DEFAULT_PART_COUNT: usize = 4;

pub struct DownloadConfig {
    pub url: Url,
    pub save_dir: PathBuf,
    pub file_name: String,
    pub part_count: NonZeroUsize,
    /// Parent directory for temporary part storage; system temp when unset.
    pub temp_dir: Option<PathBuf>,
}

impl DownloadConfig {
    /// Config with the output name taken from the URL's final path segment.
    pub fn new(url: Url, save_dir: PathBuf, part_count: NonZeroUsize) -> Self {
        let file_name = file_name_from_url(&url);

        Self {
            url,
            save_dir,
            file_name,
            part_count,
            temp_dir: None,
        }
    }

    pub fn file_path(&self) -> PathBuf {
        self.save_dir.join(&self.file_name)
    }

    pub fn create_http_request(&self) -> Request {
        let mut request = Request::new(reqwest::Method::GET, self.url.clone());
        let header_map = request.headers_mut();

        header_map.insert(
            reqwest::header::ACCEPT,
            headers::HeaderValue::from_static("*/*"),
        );
        header_map.typed_insert(headers::Connection::keep_alive());

        request
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_config() -> DownloadConfig {
        let url = Url::parse("https://example.com/files/archive.tar.gz").unwrap();
        DownloadConfig::new(url, PathBuf::from("/tmp"), NonZeroUsize::new(4).unwrap())
    }

    #[test]
    fn should_join_save_dir_and_file_name() {
        let config = create_config();

        assert_eq!(config.file_name, "archive.tar.gz");
        assert_eq!(config.file_path(), PathBuf::from("/tmp/archive.tar.gz"));
    }

    #[test]
    fn should_build_plain_get_request() {
        let config = create_config();
        let request = config.create_http_request();

        assert_eq!(request.method(), reqwest::Method::GET);
        assert!(request.headers().get(reqwest::header::RANGE).is_none());
        assert_eq!(request.headers().get(reqwest::header::ACCEPT).unwrap(), "*/*");
    }
}
