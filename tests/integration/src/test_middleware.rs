//! Signature enforcement over real HTTP with the default options.

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::{PAYLOAD, SECRET, SIGNATURE, TestServer, post_webhook};

    #[tokio::test]
    async fn test_should_accept_valid_signature() {
        let server = TestServer::start_default().await.unwrap();

        let (status, body) = post_webhook(&server, Some(SIGNATURE), PAYLOAD).await.unwrap();

        assert_eq!(status, 200);
        assert_eq!(body, json!({"success": true, "payload": {"_id": "resume"}}));
    }

    #[tokio::test]
    async fn test_should_accept_freshly_signed_payload() {
        let server = TestServer::start_default().await.unwrap();
        let payload = r#"{"title":"GROQ-Hooks are neat"}"#;
        let header = hooksig_auth::encode_signature_header(payload, 1_700_000_000_000, SECRET)
            .await
            .unwrap();

        let (status, body) = post_webhook(&server, Some(&header), payload).await.unwrap();

        assert_eq!(status, 200);
        assert_eq!(body["payload"]["title"], "GROQ-Hooks are neat");
    }

    #[tokio::test]
    async fn test_should_reject_missing_signature() {
        let server = TestServer::start_default().await.unwrap();

        let (status, body) = post_webhook(&server, None, PAYLOAD).await.unwrap();

        assert_eq!(status, 401);
        assert_eq!(
            body,
            json!({"message": "Request contained no signature header"})
        );
    }

    #[tokio::test]
    async fn test_should_reject_truncated_hash() {
        let server = TestServer::start_default().await.unwrap();
        let truncated = &SIGNATURE[..SIGNATURE.len() - 5];

        let (status, body) = post_webhook(&server, Some(truncated), PAYLOAD).await.unwrap();

        assert_eq!(status, 401);
        assert_eq!(body, json!({"message": "Signature is invalid"}));
    }

    #[tokio::test]
    async fn test_should_reject_seconds_precision_timestamp() {
        let server = TestServer::start_default().await.unwrap();
        let signature = "t=1633519811,v1=tLa470fx7qkLLEcMOcEUFuBbRSkGujyskxrNXcoh0N0";

        let (status, body) = post_webhook(&server, Some(signature), PAYLOAD).await.unwrap();

        assert_eq!(status, 400);
        assert_eq!(
            body["message"],
            "Invalid signature timestamp, must be a unix timestamp with millisecond precision"
        );
    }

    #[tokio::test]
    async fn test_should_reject_unknown_signature_version() {
        let server = TestServer::start_default().await.unwrap();
        let signature = "t=1633519811123,v4=tLa470fx7qkLLEcMOcEUFuBbRS";

        let (status, body) = post_webhook(&server, Some(signature), PAYLOAD).await.unwrap();

        assert_eq!(status, 400);
        assert_eq!(body, json!({"message": "Invalid signature payload format"}));
    }

    #[tokio::test]
    async fn test_should_reject_different_payload() {
        let server = TestServer::start_default().await.unwrap();

        let (status, body) = post_webhook(&server, Some(SIGNATURE), r#"{"foo":"bar"}"#)
            .await
            .unwrap();

        assert_eq!(status, 401);
        assert_eq!(body, json!({"message": "Signature is invalid"}));
    }

    #[tokio::test]
    async fn test_should_reject_reformatted_body() {
        let server = TestServer::start_default().await.unwrap();

        let (status, _) = post_webhook(&server, Some(SIGNATURE), r#"{"_id": "resume"}"#)
            .await
            .unwrap();

        assert_eq!(status, 401);
    }

    #[tokio::test]
    async fn test_should_set_request_id_header() {
        let server = TestServer::start_default().await.unwrap();

        let response = reqwest::Client::new()
            .post(server.url())
            .body(PAYLOAD)
            .send()
            .await
            .unwrap();

        assert_eq!(response.status().as_u16(), 401);
        let request_id = response.headers().get("x-request-id").unwrap();
        assert_eq!(request_id.len(), 36);
    }
}
