//! Type definitions and helpers for the Slack API.

use super::{auth::*, error::SlackError};
use serde::{de::DeserializeOwned, Deserialize};

/// The base URL of the Slack API.
pub const API_BASE: &str = "https://slack.com/api";

/// A client bound to one API base and one access token. Holds a connection
/// pool internally, as per [reqwest::Client].
pub struct SlackClient {
    base: String,
    token: SlackAccessToken,
    http: reqwest::Client,
}

impl SlackClient {
    /// The base may carry a trailing slash; paths are always given with a
    /// leading one.
    pub fn new(base: String, token: SlackAccessToken) -> Self {
        SlackClient {
            base: base.trim_end_matches('/').to_owned(),
            token,
            http: reqwest::Client::new(),
        }
    }

    /// Create a GET request to any Slack API endpoint, handling authentication.
    pub(super) fn get<T: ToString>(&self, path: T) -> reqwest::RequestBuilder {
        self.http
            .get(self.base.to_owned() + &path.to_string())
            .header(reqwest::header::AUTHORIZATION, to_auth_header_val(&self.token))
    }

    /// Create a POST request to any Slack API endpoint, handling authentication.
    pub(super) fn post<T: ToString>(&self, path: T) -> reqwest::RequestBuilder {
        self.http
            .post(self.base.to_owned() + &path.to_string())
            .header(reqwest::header::AUTHORIZATION, to_auth_header_val(&self.token))
    }

    /// Send a request and unwrap Slack's [APIResult] envelope.
    ///
    /// The body is read in full before decoding so that a malformed body is
    /// reported as [SlackError::DecodeFailed] rather than as a request failure.
    pub(super) async fn call<T: DeserializeOwned>(
        &self,
        req: reqwest::RequestBuilder,
    ) -> Result<T, SlackError> {
        let body = req.send().await?.error_for_status()?.bytes().await?;

        match serde_json::from_slice::<APIResult<T>>(&body)? {
            APIResult::Ok(res) => Ok(res),
            APIResult::Err(res) => Err(SlackError::APIResponseError(res.error)),
        }
    }
}

/// Slack's API returns a common "untagged" response, representing whether a
/// request was successful.
///
/// ```json
/// {
///     "ok": true,
///     "channels": []
/// }
/// ```
///
/// ```json
/// {
///     "ok": false,
///     "error": "invalid_auth"
/// }
/// ```
#[derive(Deserialize)]
#[serde(untagged)]
pub enum APIResult<T> {
    Ok(T),
    Err(ErrorResponse),
}

/// The universal response in case of an unsuccessful request.
// `ok` is checked on both sides of `APIResult` so that an otherwise empty
// success body can't be mistaken for an error, nor vice versa.
#[derive(Deserialize)]
pub struct ErrorResponse {
    #[allow(dead_code)]
    #[serde(deserialize_with = "crate::de::only_false")]
    ok: bool,
    pub error: String,
}

/// The acknowledgement returned by methods whose payload we ignore.
#[derive(Deserialize)]
pub(super) struct Ack {
    #[allow(dead_code)]
    #[serde(deserialize_with = "crate::de::only_true")]
    ok: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> SlackClient {
        SlackClient::new(base.to_owned(), SlackAccessToken("xoxb-test".to_owned()))
    }

    #[tokio::test]
    async fn test_sends_bearer_token() {
        let mut srv = mockito::Server::new_async().await;

        let mock = srv
            .mock("POST", "/anything")
            .match_header("authorization", "Bearer xoxb-test")
            .with_body(r#"{"ok": true}"#)
            .create_async()
            .await;

        let c = client(&srv.url());
        let res: Result<Ack, _> = c.call(c.post("/anything")).await;

        mock.assert_async().await;
        assert!(res.is_ok());
    }

    #[tokio::test]
    async fn test_trailing_slash_in_base() {
        let mut srv = mockito::Server::new_async().await;

        let mock = srv
            .mock("GET", "/anything")
            .with_body(r#"{"ok": true}"#)
            .create_async()
            .await;

        let c = client(&format!("{}/", srv.url()));
        let res: Result<Ack, _> = c.call(c.get("/anything")).await;

        mock.assert_async().await;
        assert!(res.is_ok());
    }

    #[tokio::test]
    async fn test_error_envelope() {
        let mut srv = mockito::Server::new_async().await;

        let _mock = srv
            .mock("POST", "/anything")
            .with_body(r#"{"ok": false, "error": "invalid_auth"}"#)
            .create_async()
            .await;

        let c = client(&srv.url());
        let res: Result<Ack, _> = c.call(c.post("/anything")).await;

        assert!(matches!(
            res,
            Err(SlackError::APIResponseError(e)) if e == "invalid_auth"
        ));
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let mut srv = mockito::Server::new_async().await;

        let _mock = srv
            .mock("POST", "/anything")
            .with_body("<html>oops</html>")
            .create_async()
            .await;

        let c = client(&srv.url());
        let res: Result<Ack, _> = c.call(c.post("/anything")).await;

        assert!(matches!(res, Err(SlackError::DecodeFailed(_))));
    }

    #[tokio::test]
    async fn test_error_without_code_is_malformed() {
        let mut srv = mockito::Server::new_async().await;

        let _mock = srv
            .mock("POST", "/anything")
            .with_body(r#"{"ok": false}"#)
            .create_async()
            .await;

        let c = client(&srv.url());
        let res: Result<Ack, _> = c.call(c.post("/anything")).await;

        assert!(matches!(res, Err(SlackError::DecodeFailed(_))));
    }

    #[tokio::test]
    async fn test_server_error_status() {
        let mut srv = mockito::Server::new_async().await;

        let _mock = srv
            .mock("GET", "/anything")
            .with_status(503)
            .create_async()
            .await;

        let c = client(&srv.url());
        let res: Result<Ack, _> = c.call(c.get("/anything")).await;

        assert!(matches!(res, Err(SlackError::APIRequestFailed(_))));
    }

    #[tokio::test]
    async fn test_unreachable_host() {
        // Nothing listens on the discard port.
        let c = client("http://127.0.0.1:9");
        let res: Result<Ack, _> = c.call(c.get("/anything")).await;

        assert!(matches!(res, Err(SlackError::APIRequestFailed(_))));
    }
}
