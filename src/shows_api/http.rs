/// HTTP implementation of the shows API.
use super::wire::{DataEnvelope, WireShowDetails, WireShowSummary};
use super::{ShowDetails, ShowSummary, ShowsApi, ShowsApiError};
use reqwest::header::AUTHORIZATION;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Base URL of the public TV Shows API.
pub const DEFAULT_BASE_URL: &str = "https://api.infinum.academy/api";

/// Connection settings for [`HttpShowsApi`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// API root, without the `shows/...` path
    pub base_url: String,
    /// Upper bound for a single request, connect included
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Shows API client backed by a blocking reqwest client.
///
/// Requests carry the session token verbatim in the `Authorization`
/// header and expect every payload enveloped under `data`.
pub struct HttpShowsApi {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl HttpShowsApi {
    /// Creates a new client for the given configuration.
    pub fn new(config: ApiConfig) -> Result<Self, ShowsApiError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ShowsApiError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Builds the absolute URL for a path below the API root.
    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Issues an authorized GET and unwraps the `data` envelope.
    fn get_data<T: DeserializeOwned>(
        &self,
        path: &str,
        auth_token: &str,
    ) -> Result<T, ShowsApiError> {
        let url = self.url(path);
        tracing::debug!(%url, "GET");

        let response = self
            .client
            .get(&url)
            .header(AUTHORIZATION, auth_token)
            .send()
            .map_err(|e| ShowsApiError::Network(e.to_string()))?;

        // Ensure request was successful
        let status = response.status();
        if !status.is_success() {
            return Err(ShowsApiError::Http {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        let envelope: DataEnvelope<T> = response
            .json()
            .map_err(|e| ShowsApiError::Decode(e.to_string()))?;

        Ok(envelope.data)
    }
}

impl ShowsApi for HttpShowsApi {
    fn fetch_show_details(
        &self,
        show_id: &str,
        auth_token: &str,
    ) -> Result<ShowDetails, ShowsApiError> {
        let wire: WireShowDetails = self.get_data(&format!("shows/{show_id}"), auth_token)?;
        Ok(wire.into())
    }

    fn fetch_episodes(
        &self,
        show_id: &str,
        auth_token: &str,
    ) -> Result<Vec<ShowSummary>, ShowsApiError> {
        let wire: Vec<WireShowSummary> =
            self.get_data(&format!("shows/{show_id}/episodes"), auth_token)?;
        Ok(wire.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Write};
    use std::net::TcpListener;
    use std::thread::{self, JoinHandle};

    /// Answers one connection per canned `(status line, body)` pair and
    /// hands back the lowercased request heads it received.
    fn serve(
        responses: Vec<(&'static str, &'static str)>,
    ) -> (HttpShowsApi, JoinHandle<Vec<String>>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = thread::spawn(move || {
            let mut requests = Vec::new();

            for (status_line, body) in responses {
                let (mut stream, _) = listener.accept().unwrap();
                let mut reader = BufReader::new(stream.try_clone().unwrap());

                let mut head = String::new();
                loop {
                    let mut line = String::new();
                    if reader.read_line(&mut line).unwrap() == 0 || line == "\r\n" {
                        break;
                    }
                    head.push_str(&line.to_lowercase());
                }
                requests.push(head);

                let response = format!(
                    "HTTP/1.1 {status_line}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                    body.len()
                );
                stream.write_all(response.as_bytes()).unwrap();
            }

            requests
        });

        // Bypass any proxy from the environment so requests reach the listener
        let api = HttpShowsApi {
            client: reqwest::blocking::Client::builder()
                .no_proxy()
                .timeout(Duration::from_secs(5))
                .build()
                .unwrap(),
            base_url: format!("http://{addr}/api"),
        };

        (api, handle)
    }

    #[test]
    fn test_requests_are_authorized_and_unwrap_data() {
        let (api, server) = serve(vec![
            (
                "200 OK",
                r#"{"data": {"_id": "42", "title": "X", "description": "", "imageUrl": null}}"#,
            ),
            (
                "200 OK",
                r#"{"data": [{"_id": "42", "title": "Pilot"}, {"_id": "42", "title": ""}]}"#,
            ),
        ]);

        let details = api.fetch_show_details("42", "t").unwrap();
        let episodes = api.fetch_episodes("42", "t").unwrap();
        let requests = server.join().unwrap();

        assert_eq!(details.id, "42");
        assert_eq!(details.title, "X");
        assert_eq!(details.description, "");
        assert_eq!(episodes.len(), 2);
        assert_eq!(episodes[0].title, "Pilot");

        assert_eq!(requests.len(), 2);
        assert!(requests[0].starts_with("get /api/shows/42 http/1.1\r\n"));
        assert!(requests[1].starts_with("get /api/shows/42/episodes http/1.1\r\n"));
        for request in &requests {
            assert!(request.contains("\r\nauthorization: t\r\n"));
        }
    }

    #[test]
    fn test_unauthorized_is_http_error() {
        let (api, server) = serve(vec![(
            "401 Unauthorized",
            r#"{"errors": ["Authentication failed"]}"#,
        )]);

        let err = api.fetch_show_details("42", "bad").unwrap_err();
        server.join().unwrap();

        match err {
            ShowsApiError::Http { status, reason } => {
                assert_eq!(status, 401);
                assert_eq!(reason, "Unauthorized");
            }
            other => panic!("expected an HTTP error, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_data_key_is_decode_error() {
        let (api, server) = serve(vec![("200 OK", r#"{"title": "X"}"#)]);

        let err = api.fetch_show_details("42", "t").unwrap_err();
        server.join().unwrap();

        assert_eq!(err.kind(), "decode");
    }

    #[test]
    fn test_url_joins_paths() {
        let api = HttpShowsApi::new(ApiConfig::default()).unwrap();

        assert_eq!(
            api.url("shows/42/episodes"),
            "https://api.infinum.academy/api/shows/42/episodes"
        );
    }

    #[test]
    fn test_url_trims_trailing_slash() {
        let api = HttpShowsApi::new(ApiConfig {
            base_url: "http://localhost:3000/api/".to_string(),
            ..ApiConfig::default()
        })
        .unwrap();

        assert_eq!(api.url("shows/7"), "http://localhost:3000/api/shows/7");
    }

    #[test]
    fn test_unreachable_host_is_network_error() {
        let api = HttpShowsApi::new(ApiConfig {
            // Port 9 (discard) on loopback is not expected to host an HTTP server
            base_url: "http://127.0.0.1:9/api".to_string(),
            timeout: Duration::from_secs(2),
        })
        .unwrap();

        let err = api.fetch_show_details("42", "t").unwrap_err();

        assert_eq!(err.kind(), "network");
    }
}
