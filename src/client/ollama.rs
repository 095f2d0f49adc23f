//! Blocking client for the Ollama `/api/generate` endpoint.

use crate::client::{GenerationError, TextGenerator};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Default endpoint base URL.
pub const DEFAULT_API_URL: &str = "http://localhost:11434";

/// Optional sampling parameters forwarded to the model.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SamplingOptions {
    pub temperature: Option<f32>,
    pub top_p: Option<f32>,
    /// Maximum tokens to generate; `None` or `Some(0)` means unlimited.
    pub max_tokens: Option<u32>,
}

impl SamplingOptions {
    fn to_wire(self) -> Option<WireOptions> {
        let options = WireOptions {
            temperature: self.temperature,
            top_p: self.top_p,
            num_predict: self.max_tokens.filter(|&n| n > 0),
        };
        let empty =
            options.temperature.is_none() && options.top_p.is_none() && options.num_predict.is_none();
        (!empty).then_some(options)
    }
}

#[derive(Debug, Serialize)]
struct WireOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    num_predict: Option<u32>,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<WireOptions>,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
}

/// Extract the `response` field from a generation body.
///
/// The body must be a JSON object; a missing field reads as an empty reply.
fn parse_reply(text: &str) -> std::result::Result<String, GenerationError> {
    let value: serde_json::Value =
        serde_json::from_str(text).map_err(|e| GenerationError::Unexpected(e.to_string()))?;
    if !value.is_object() {
        return Err(GenerationError::Unexpected(format!(
            "expected a JSON object, got {text}"
        )));
    }
    let reply: GenerateResponse =
        serde_json::from_value(value).map_err(|e| GenerationError::Unexpected(e.to_string()))?;
    Ok(reply.response)
}

/// Text generator backed by a local Ollama server.
///
/// Each call is a single blocking, non-streaming request with no timeout and
/// no retries.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    base_url: String,
    options: SamplingOptions,
    http: reqwest::blocking::Client,
}

impl OllamaClient {
    /// Create a client for the server at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(base_url: impl Into<String>, options: SamplingOptions) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(None)
            .build()
            .map_err(|e| Error::Config(format!("HTTP client: {e}")))?;
        Ok(Self {
            base_url: base_url.into(),
            options,
            http,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/api/generate", self.base_url.trim_end_matches('/'))
    }
}

impl TextGenerator for OllamaClient {
    fn generate(&self, prompt: &str, model: &str) -> std::result::Result<String, GenerationError> {
        let body = GenerateRequest {
            model,
            prompt,
            stream: false,
            options: self.options.to_wire(),
        };

        tracing::debug!(model, prompt_len = prompt.len(), "sending generation request");

        let response = self
            .http
            .post(self.endpoint())
            .json(&body)
            .send()
            .map_err(|e| GenerationError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GenerationError::Http {
                status: status.as_u16(),
                body: response.text().unwrap_or_default(),
            });
        }

        let text = response
            .text()
            .map_err(|e| GenerationError::Request(e.to_string()))?;
        parse_reply(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Read, Write};
    use std::net::TcpListener;
    use std::thread::{self, JoinHandle};

    /// Serve exactly one HTTP response, returning the base URL and a handle
    /// that yields the raw request body.
    fn serve_once(status_line: &str, body: &str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        let response = format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );

        let handle = thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream);

            let mut content_length = 0;
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).unwrap();
                let line = line.trim_end();
                if line.is_empty() {
                    break;
                }
                if let Some((name, value)) = line.split_once(':') {
                    if name.eq_ignore_ascii_case("content-length") {
                        content_length = value.trim().parse().unwrap();
                    }
                }
            }

            let mut request_body = vec![0; content_length];
            reader.read_exact(&mut request_body).unwrap();

            let mut stream = reader.into_inner();
            stream.write_all(response.as_bytes()).unwrap();
            stream.flush().unwrap();
            String::from_utf8(request_body).unwrap()
        });

        (url, handle)
    }

    #[test]
    fn returns_response_field() {
        let (url, server) = serve_once("200 OK", r#"{"model":"llama3","response":"hi there","done":true}"#);
        let client = OllamaClient::new(url, SamplingOptions::default()).unwrap();

        let reply = client.generate("User: hello\nAssistant:", "llama3").unwrap();
        assert_eq!(reply, "hi there");

        let sent: serde_json::Value = serde_json::from_str(&server.join().unwrap()).unwrap();
        assert_eq!(sent["model"], "llama3");
        assert_eq!(sent["prompt"], "User: hello\nAssistant:");
        assert_eq!(sent["stream"], false);
        assert!(sent.get("options").is_none());
    }

    #[test]
    fn forwards_sampling_options() {
        let (url, server) = serve_once("200 OK", r#"{"response":"ok"}"#);
        let options = SamplingOptions {
            temperature: Some(0.5),
            top_p: None,
            max_tokens: Some(128),
        };
        let client = OllamaClient::new(url, options).unwrap();
        client.generate("p", "m").unwrap();

        let sent: serde_json::Value = serde_json::from_str(&server.join().unwrap()).unwrap();
        assert_eq!(sent["options"]["temperature"], 0.5);
        assert_eq!(sent["options"]["num_predict"], 128);
        assert!(sent["options"].get("top_p").is_none());
    }

    #[test]
    fn zero_max_tokens_is_unlimited() {
        let options = SamplingOptions {
            max_tokens: Some(0),
            ..SamplingOptions::default()
        };
        assert!(options.to_wire().is_none());
    }

    #[test]
    fn missing_response_field_is_empty() {
        let (url, server) = serve_once("200 OK", r#"{"done":true}"#);
        let client = OllamaClient::new(url, SamplingOptions::default()).unwrap();
        assert_eq!(client.generate("p", "m").unwrap(), "");
        server.join().unwrap();
    }

    #[test]
    fn non_success_status_is_http_error() {
        let (url, server) = serve_once("500 Internal Server Error", "oops");
        let client = OllamaClient::new(url, SamplingOptions::default()).unwrap();

        let err = client.generate("p", "m").unwrap_err();
        assert_eq!(
            err,
            GenerationError::Http {
                status: 500,
                body: "oops".to_string()
            }
        );
        assert_eq!(err.to_string(), "HTTP Error: 500, oops");
        server.join().unwrap();
    }

    #[test]
    fn malformed_body_is_unexpected_error() {
        let (url, server) = serve_once("200 OK", "not json");
        let client = OllamaClient::new(url, SamplingOptions::default()).unwrap();

        let err = client.generate("p", "m").unwrap_err();
        assert!(matches!(err, GenerationError::Unexpected(_)));
        assert!(err.to_string().starts_with("Unexpected Error:"));
        server.join().unwrap();
    }

    #[test]
    fn array_body_is_unexpected_error() {
        let (url, server) = serve_once("200 OK", "[\"hi\"]");
        let client = OllamaClient::new(url, SamplingOptions::default()).unwrap();

        let err = client.generate("p", "m").unwrap_err();
        assert!(matches!(err, GenerationError::Unexpected(_)));
        server.join().unwrap();
    }

    #[test]
    fn non_object_bodies_are_rejected() {
        for body in ["[]", "\"hi\"", "null", "42"] {
            assert!(
                matches!(parse_reply(body), Err(GenerationError::Unexpected(_))),
                "{body} should be rejected"
            );
        }
        assert_eq!(parse_reply("{}").unwrap(), "");
    }

    #[test]
    fn connection_refused_is_request_error() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        let client = OllamaClient::new(url, SamplingOptions::default()).unwrap();
        let err = client.generate("p", "m").unwrap_err();
        assert!(matches!(err, GenerationError::Request(_)));
        assert!(err.to_string().starts_with("Request Error:"));
    }

    #[test]
    fn endpoint_trims_trailing_slash() {
        let client = OllamaClient::new("http://localhost:11434/", SamplingOptions::default()).unwrap();
        assert_eq!(client.endpoint(), "http://localhost:11434/api/generate");
    }
}
