use url::Url;

/// Returns true when `text` parses as an absolute `http` or `https` URL.
pub fn is_valid_job_url(text: &str) -> bool {
    match Url::parse(text) {
        Ok(url) => matches!(url.scheme(), "http" | "https") && url.has_host(),
        Err(_) => false,
    }
}
