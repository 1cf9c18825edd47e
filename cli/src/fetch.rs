//! Gemini transport collaborator.
//!
//! Implements the [`Fetcher`] seam the conversion pipeline consumes: TLS
//! to port 1965, one request line, one response. No retry or timeout
//! logic; failures surface verbatim.

use std::io::{Read, Write};
use std::net::TcpStream;

use log::{debug, info};
use native_tls::TlsConnector;

use gempress::{Error, Fetcher, Result};

const DEFAULT_PORT: u16 = 1965;
const MAX_REDIRECTS: usize = 5;

/// Fetches documents over the gemini protocol.
pub struct GeminiFetcher {
    connector: TlsConnector,
}

impl GeminiFetcher {
    /// Create a fetcher.
    ///
    /// Certificate verification is disabled: gemini servers conventionally
    /// present self-signed certificates under a trust-on-first-use model,
    /// and this client keeps no pin store.
    pub fn new() -> Result<Self> {
        let connector = TlsConnector::builder()
            .danger_accept_invalid_certs(true)
            .danger_accept_invalid_hostnames(true)
            .build()
            .map_err(|e| Error::Fetch(format!("TLS setup failed: {}", e)))?;
        Ok(Self { connector })
    }

    fn fetch_once(&self, url: &str) -> Result<GeminiResponse> {
        let (host, port) = parse_authority(url)?;
        debug!("connecting to {}:{}", host, port);
        let stream = TcpStream::connect((host.as_str(), port))
            .map_err(|e| Error::Fetch(format!("connecting to {}:{}: {}", host, port, e)))?;
        let mut tls = self
            .connector
            .connect(&host, stream)
            .map_err(|e| Error::Fetch(format!("TLS handshake with {}: {}", host, e)))?;

        tls.write_all(format!("{}\r\n", url).as_bytes())
            .map_err(|e| Error::Fetch(format!("sending request: {}", e)))?;
        let mut raw = Vec::new();
        tls.read_to_end(&mut raw)
            .map_err(|e| Error::Fetch(format!("reading response: {}", e)))?;
        split_response(raw)
    }
}

impl Fetcher for GeminiFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let mut target = url.to_string();
        for _ in 0..=MAX_REDIRECTS {
            let response = self.fetch_once(&target)?;
            match response.status / 10 {
                2 => {
                    if !is_text_media(&response.meta) {
                        return Err(Error::Protocol(format!(
                            "unsupported media type: {}",
                            response.meta
                        )));
                    }
                    return Ok(response.body);
                }
                3 => {
                    info!("redirected to {}", response.meta);
                    if !response.meta.starts_with("gemini://") {
                        return Err(Error::Protocol(format!(
                            "non-absolute redirect target: {}",
                            response.meta
                        )));
                    }
                    target = response.meta;
                }
                _ => {
                    return Err(Error::Protocol(format!(
                        "status {}: {}",
                        response.status, response.meta
                    )))
                }
            }
        }
        Err(Error::Protocol(format!(
            "too many redirects (limit {})",
            MAX_REDIRECTS
        )))
    }
}

struct GeminiResponse {
    status: u8,
    meta: String,
    body: Vec<u8>,
}

/// Split a raw response into its `STATUS META` header line and body.
fn split_response(raw: Vec<u8>) -> Result<GeminiResponse> {
    let header_end = raw
        .windows(2)
        .position(|w| w == b"\r\n")
        .ok_or_else(|| Error::Protocol("response header is unterminated".into()))?;
    let header = String::from_utf8_lossy(&raw[..header_end]).into_owned();

    let (status, meta) = match header.split_once(' ') {
        Some((status, meta)) => (status, meta.trim()),
        None => (header.as_str(), ""),
    };
    let status: u8 = status
        .parse()
        .map_err(|_| Error::Protocol(format!("malformed status line: {}", header)))?;
    if !(10..=69).contains(&status) {
        return Err(Error::Protocol(format!("status {} out of range", status)));
    }

    Ok(GeminiResponse {
        status,
        meta: meta.to_string(),
        body: raw[header_end + 2..].to_vec(),
    })
}

/// Host and port of a `gemini://` URL.
fn parse_authority(url: &str) -> Result<(String, u16)> {
    let rest = url
        .strip_prefix("gemini://")
        .ok_or_else(|| Error::InvalidUrl(url.to_string()))?;
    let authority = rest.split(['/', '?', '#']).next().unwrap_or("");
    if authority.is_empty() {
        return Err(Error::InvalidUrl(url.to_string()));
    }
    match authority.rsplit_once(':') {
        Some((host, port)) if !host.is_empty() => {
            let port = port
                .parse()
                .map_err(|_| Error::InvalidUrl(url.to_string()))?;
            Ok((host.to_string(), port))
        }
        _ => Ok((authority.to_string(), DEFAULT_PORT)),
    }
}

/// An empty meta means `text/gemini` per the protocol default.
fn is_text_media(meta: &str) -> bool {
    meta.is_empty() || meta.starts_with("text/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_authority_defaults_port() {
        let (host, port) = parse_authority("gemini://example.org/page.gmi").unwrap();
        assert_eq!(host, "example.org");
        assert_eq!(port, DEFAULT_PORT);
    }

    #[test]
    fn test_parse_authority_explicit_port() {
        let (host, port) = parse_authority("gemini://example.org:1966/").unwrap();
        assert_eq!(host, "example.org");
        assert_eq!(port, 1966);
    }

    #[test]
    fn test_parse_authority_rejects_other_schemes() {
        assert!(parse_authority("https://example.org/").is_err());
        assert!(parse_authority("gemini://").is_err());
    }

    #[test]
    fn test_split_response_success() {
        let raw = b"20 text/gemini\r\n# Hello\n".to_vec();
        let response = split_response(raw).unwrap();
        assert_eq!(response.status, 20);
        assert_eq!(response.meta, "text/gemini");
        assert_eq!(response.body, b"# Hello\n");
    }

    #[test]
    fn test_split_response_redirect() {
        let raw = b"31 gemini://example.org/new\r\n".to_vec();
        let response = split_response(raw).unwrap();
        assert_eq!(response.status, 31);
        assert_eq!(response.meta, "gemini://example.org/new");
        assert!(response.body.is_empty());
    }

    #[test]
    fn test_split_response_malformed() {
        assert!(split_response(b"no terminator".to_vec()).is_err());
        assert!(split_response(b"xx meta\r\n".to_vec()).is_err());
        assert!(split_response(b"99 out of range\r\n".to_vec()).is_err());
    }

    #[test]
    fn test_text_media_detection() {
        assert!(is_text_media(""));
        assert!(is_text_media("text/gemini; charset=utf-8"));
        assert!(is_text_media("text/plain"));
        assert!(!is_text_media("image/png"));
    }
}
