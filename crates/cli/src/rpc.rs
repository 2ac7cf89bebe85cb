//! JSON-RPC server loop over a byte stream.
//!
//! Speaks the JSON-RPC 1.0 dialect used by Go's `net/rpc/jsonrpc` codec, which
//! is what the host CLI dials:
//!
//! ```text
//! → {"method": "tag.List", "params": [{"AccessToken": "...", "Args": []}], "id": 0}
//! ← {"id": 0, "result": "Name\tDroplets\n...", "error": null}
//! ```
//!
//! Requests are read as a stream of JSON values (any whitespace between them
//! is accepted). Each response is written as one line and flushed. Calls are
//! handled strictly in order, one at a time.

use std::io::{Read, Write};

use plugin::{Method, PluginError};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

/// Name the plugin's methods are registered under (`tag.List`, ...).
pub const SERVICE_NAME: &str = "tag";

/// Errors answered to the host in place of a method result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RpcError {
    #[error("rpc: request must be an object with a string \"method\"")]
    InvalidRequest,

    #[error("rpc: can't find service {0}")]
    UnknownService(String),

    #[error("rpc: can't find method {0}")]
    UnknownMethod(String),
}

/// Failures that stop the server.
#[derive(Debug, Error)]
pub enum ServeError {
    /// The input is not valid JSON; the stream cannot be resynchronised.
    #[error("failed to read request: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("failed to encode response: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("failed to write response: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Serialize)]
struct Response<'a> {
    id: &'a Value,
    result: Option<String>,
    error: Option<String>,
}

/// Serves requests from `reader` until EOF, invoking `call` for each one.
pub fn serve<R, W, F>(reader: R, mut writer: W, mut call: F) -> Result<(), ServeError>
where
    R: Read,
    W: Write,
    F: FnMut(Method, &Value) -> Result<String, PluginError>,
{
    let requests = serde_json::Deserializer::from_reader(reader).into_iter::<Value>();
    for request in requests {
        let request = request.map_err(ServeError::Decode)?;
        let id = request.get("id").cloned().unwrap_or(Value::Null);

        let outcome = match parse_request(&request) {
            Ok((method, params)) => {
                debug!(method = method.name(), "handling request");
                call(method, params).map_err(|err| err.to_string())
            }
            Err(err) => {
                warn!(error = %err, "rejecting request");
                Err(err.to_string())
            }
        };

        let response = match outcome {
            Ok(result) => Response {
                id: &id,
                result: Some(result),
                error: None,
            },
            Err(error) => Response {
                id: &id,
                result: None,
                error: Some(error),
            },
        };
        serde_json::to_writer(&mut writer, &response).map_err(ServeError::Encode)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
    }
    Ok(())
}

/// Resolves the method and extracts the arguments bag.
///
/// `params` is normally a one-element array wrapping the bag; a bare bag is
/// accepted too.
fn parse_request(request: &Value) -> Result<(Method, &Value), RpcError> {
    let service_method = request
        .get("method")
        .and_then(Value::as_str)
        .ok_or(RpcError::InvalidRequest)?;
    let method = resolve(service_method)?;

    let params = match request.get("params") {
        Some(Value::Array(items)) => items.first().unwrap_or(&Value::Null),
        Some(params) => params,
        None => &Value::Null,
    };
    Ok((method, params))
}

/// Maps `tag.Create` (or bare `Create`) to [`Method::Create`].
fn resolve(service_method: &str) -> Result<Method, RpcError> {
    let name = match service_method.split_once('.') {
        Some((SERVICE_NAME, name)) => name,
        Some(_) => return Err(RpcError::UnknownService(service_method.to_string())),
        None => service_method,
    };
    Method::from_name(name).ok_or_else(|| RpcError::UnknownMethod(service_method.to_string()))
}

#[cfg(test)]
mod tests {
    use digitalocean::{ClientConfig, DigitalOceanConnector};
    use plugin::TagPlugin;
    use serde_json::json;
    use url::Url;

    use super::*;

    /// Runs `input` through the server with `call` and returns each response.
    fn exchange<F>(input: &str, call: F) -> Vec<Value>
    where
        F: FnMut(Method, &Value) -> Result<String, PluginError>,
    {
        let mut output = Vec::new();
        serve(input.as_bytes(), &mut output, call).unwrap();
        String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    fn echo(method: Method, params: &Value) -> Result<String, PluginError> {
        Ok(format!("{method} {params}"))
    }

    #[test]
    fn answers_with_result_and_null_error() {
        let responses = exchange(
            r#"{"method":"tag.List","params":[{"AccessToken":"t","Args":[]}],"id":7}"#,
            echo,
        );
        assert_eq!(
            responses,
            [json!({
                "id": 7,
                "result": r#"List {"AccessToken":"t","Args":[]}"#,
                "error": null
            })]
        );
    }

    #[test]
    fn answers_failures_with_null_result() {
        let responses = exchange(
            r#"{"method":"tag.Create","params":[{}],"id":"a"}"#,
            |_, _| Err(PluginError::Usage("usage: create <tag name>")),
        );
        assert_eq!(
            responses,
            [json!({ "id": "a", "result": null, "error": "usage: create <tag name>" })]
        );
    }

    #[test]
    fn handles_consecutive_requests_in_order() {
        let input = concat!(
            r#"{"method":"tag.Get","params":[1],"id":1}"#,
            "\n\n",
            r#"{"method":"Rename","params":[2],"id":2}"#,
            r#" {"method":"tag.Remove","params":3,"id":3}"#,
        );
        let responses = exchange(input, echo);
        let results: Vec<_> = responses.iter().map(|r| r["result"].clone()).collect();
        assert_eq!(results, [json!("Get 1"), json!("Rename 2"), json!("Remove 3")]);
    }

    #[test]
    fn missing_params_are_passed_as_null() {
        let responses = exchange(r#"{"method":"tag.List","id":0}"#, echo);
        assert_eq!(responses[0]["result"], json!("List null"));
    }

    #[test]
    fn unknown_names_are_reported_and_serving_continues() {
        let input = concat!(
            r#"{"method":"tag.Delete","params":[],"id":1}"#,
            r#"{"method":"droplet.List","params":[],"id":2}"#,
            r#"{"params":[],"id":3}"#,
            r#"[1,2,3]"#,
            r#"{"method":"tag.List","params":[],"id":4}"#,
        );
        let mut calls = 0;
        let responses = exchange(input, |method, params| {
            calls += 1;
            echo(method, params)
        });

        let errors: Vec<_> = responses.iter().map(|r| r["error"].clone()).collect();
        assert_eq!(
            errors,
            [
                json!("rpc: can't find method tag.Delete"),
                json!("rpc: can't find service droplet.List"),
                json!("rpc: request must be an object with a string \"method\""),
                json!("rpc: request must be an object with a string \"method\""),
                Value::Null,
            ]
        );
        assert_eq!(responses[3]["id"], Value::Null);
        assert_eq!(calls, 1);
    }

    #[test]
    fn empty_input_ends_cleanly() {
        assert!(exchange("  \n", echo).is_empty());
    }

    #[test]
    fn malformed_json_stops_the_server() {
        let mut output = Vec::new();
        let err = serve(r#"{"method": "tag.List", "#.as_bytes(), &mut output, echo).unwrap_err();
        assert!(matches!(err, ServeError::Decode(_)));
        assert!(output.is_empty());
    }

    #[test]
    fn usage_errors_reach_the_host_without_contacting_the_provider() {
        // Nothing listens on the discard port; a request would fail with a
        // network error rather than the usage string.
        let config = ClientConfig::new(Url::parse("http://127.0.0.1:9/").unwrap());
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        let plugin = TagPlugin::new(DigitalOceanConnector::new(config).unwrap());

        let input = concat!(
            r#"{"method":"tag.Add","params":[{"AccessToken":"t","Args":["prod"]}],"id":1}"#,
            r#"{"method":"tag.Add","params":[{"AccessToken":"t","Args":["prod","x1"]}],"id":2}"#,
            r#"{"method":"tag.Get","params":[{"Args":["prod"]}],"id":3}"#,
        );
        let responses = exchange(input, |method, args| {
            runtime.block_on(plugin.call(method, args))
        });

        let errors: Vec<_> = responses.iter().map(|r| r["error"].clone()).collect();
        assert_eq!(
            errors,
            [
                json!("usage: add <tag> <droplet id>"),
                json!("invalid droplet id: x1"),
                json!("invalid arguments: missing field `AccessToken`"),
            ]
        );
    }
}
