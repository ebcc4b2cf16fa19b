//! Unit tests for the reqwest transport

use super::*;
use reqwest::header::{HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde_json::json;
use wiremock::{
    matchers::{body_string, header, method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

#[cfg(test)]
mod transport_tests {
    use super::*;

    #[test]
    fn test_base_url_constants() {
        assert_eq!(
            API_BASE_URL,
            "https://fantasysports.yahooapis.com/fantasy/v2"
        );
        assert_eq!(AUTH_BASE_URL, "https://api.login.yahoo.com");
    }

    #[test]
    fn test_response_helpers() {
        let ok = HttpResponse {
            status: 204,
            body: b"{}".to_vec(),
        };
        assert!(ok.is_success());
        assert_eq!(ok.body_text(), "{}");

        let unauthorized = HttpResponse {
            status: 401,
            body: Vec::new(),
        };
        assert!(!unauthorized.is_success());
    }

    #[test]
    fn test_logged_url_omits_signing_params() {
        let url = "https://fantasysports.yahooapis.com/fantasy/v2/game/nfl\
                   ?format=json&oauth_consumer_key=ck&oauth_nonce=n&oauth_signature=sig";
        let logged = url_without_query(url);
        assert_eq!(logged, "https://fantasysports.yahooapis.com/fantasy/v2/game/nfl");
        assert!(!logged.contains("oauth_signature"));

        let bare = "https://fantasysports.yahooapis.com/fantasy/v2/game/nfl";
        assert_eq!(url_without_query(bare), bare);
    }

    #[tokio::test]
    async fn test_get_returns_body_and_status() {
        let mock_server = MockServer::start().await;
        let body = json!({ "fantasy_content": { "league": [{ "league_key": "nfl.l.1" }] } });

        Mock::given(method("GET"))
            .and(path("/fantasy/v2/league/nfl.l.1/metadata"))
            .and(query_param("format", "json"))
            .and(header("authorization", "Bearer abc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .mount(&mock_server)
            .await;

        let transport = ReqwestTransport::new(None).unwrap();
        let mut request = HttpRequest::new(
            Method::GET,
            format!(
                "{}/fantasy/v2/league/nfl.l.1/metadata?format=json",
                mock_server.uri()
            ),
        );
        request
            .headers
            .insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc"));

        let response = transport.send(request).await.unwrap();
        assert_eq!(response.status, 200);
        let parsed: serde_json::Value = serde_json::from_slice(&response.body).unwrap();
        assert_eq!(parsed, body);
    }

    #[tokio::test]
    async fn test_non_success_status_is_not_an_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401).set_body_string("denied"))
            .mount(&mock_server)
            .await;

        let transport = ReqwestTransport::new(None).unwrap();
        let response = transport
            .send(HttpRequest::new(Method::GET, mock_server.uri()))
            .await
            .unwrap();

        assert_eq!(response.status, 401);
        assert_eq!(response.body_text(), "denied");
    }

    #[tokio::test]
    async fn test_post_sends_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/oauth2/get_token"))
            .and(header("content-type", "application/x-www-form-urlencoded"))
            .and(body_string("grant_type=refresh_token"))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let transport = ReqwestTransport::new(None).unwrap();
        let mut request = HttpRequest::new(
            Method::POST,
            format!("{}/oauth2/get_token", mock_server.uri()),
        );
        request.headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/x-www-form-urlencoded"),
        );
        request.body = Some("grant_type=refresh_token".to_string());

        let response = transport.send(request).await.unwrap();
        assert_eq!(response.body_text(), "ok");
    }

    #[tokio::test]
    async fn test_connection_failure_is_transport_error() {
        let transport = ReqwestTransport::new(Some(Duration::from_secs(2))).unwrap();
        // Port 1 on localhost refuses connections.
        let result = transport
            .send(HttpRequest::new(Method::GET, "http://127.0.0.1:1/"))
            .await;

        match result {
            Err(crate::YahooError::Transport(_)) => (),
            other => panic!("Expected Transport error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_timeout_is_transport_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
            .mount(&mock_server)
            .await;

        let transport = ReqwestTransport::new(Some(Duration::from_millis(50))).unwrap();
        let result = transport
            .send(HttpRequest::new(Method::GET, mock_server.uri()))
            .await;

        assert!(matches!(result, Err(crate::YahooError::Transport(_))));
    }
}
