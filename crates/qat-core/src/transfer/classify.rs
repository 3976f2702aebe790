//! Map curl failures and HTTP status codes onto transfer error kinds.

use super::error::{TransferError, TransferErrorKind};

/// Classify a curl error. Only timeouts are distinguished; everything else
/// (refused, DNS, reset, partial body) is a network failure.
pub fn classify_curl_error(e: &curl::Error) -> TransferErrorKind {
    if e.is_operation_timedout() {
        TransferErrorKind::Timeout
    } else {
        TransferErrorKind::NetworkFailure
    }
}

/// Wrap a curl error with the request it belongs to.
pub(crate) fn from_curl(method: &str, url: &str, e: &curl::Error) -> TransferError {
    TransferError::new(
        classify_curl_error(e),
        format!("{} {} failed: {}", method, url, e),
    )
}

/// Ok for 2xx, `HttpStatus(code)` otherwise.
pub fn check_status(method: &str, url: &str, code: u32) -> Result<(), TransferError> {
    if (200..300).contains(&code) {
        Ok(())
    } else {
        Err(TransferError::http_status(method, url, code))
    }
}

/// Reject anything that is not an absolute http(s) URL before touching the network.
pub fn validate_url(url: &str) -> Result<(), TransferError> {
    let parsed = url::Url::parse(url).map_err(|e| TransferError::invalid_url(url, e))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(TransferError::invalid_url(
            url,
            format!("unsupported scheme {:?}", other),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_2xx_ok() {
        assert!(check_status("GET", "http://h/", 200).is_ok());
        assert!(check_status("GET", "http://h/", 204).is_ok());
    }

    #[test]
    fn status_errors_carry_code() {
        let e = check_status("GET", "http://h/", 404).unwrap_err();
        assert_eq!(e.kind, TransferErrorKind::HttpStatus(404));
        let e = check_status("POST", "http://h/", 500).unwrap_err();
        assert_eq!(e.kind, TransferErrorKind::HttpStatus(500));
        let e = check_status("GET", "http://h/", 302).unwrap_err();
        assert_eq!(e.kind, TransferErrorKind::HttpStatus(302));
    }

    #[test]
    fn validate_url_accepts_http_and_https() {
        assert!(validate_url("http://127.0.0.1:8080/assets.php").is_ok());
        assert!(validate_url("https://quantumleapstudios.org/files/a.zip").is_ok());
    }

    #[test]
    fn validate_url_rejects_relative_and_other_schemes() {
        let e = validate_url("u1").unwrap_err();
        assert_eq!(e.kind, TransferErrorKind::InvalidUrl);
        let e = validate_url("file:///etc/passwd").unwrap_err();
        assert_eq!(e.kind, TransferErrorKind::InvalidUrl);
        let e = validate_url("").unwrap_err();
        assert_eq!(e.kind, TransferErrorKind::InvalidUrl);
    }
}
