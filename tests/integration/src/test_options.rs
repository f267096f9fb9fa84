//! Middleware options: body parsing and the error policy.

#[cfg(test)]
mod tests {
    use hooksig_http::SignedRequestConfig;
    use serde_json::json;

    use crate::{PAYLOAD, SECRET, SIGNATURE, TestServer, post_webhook};

    fn without_responding() -> SignedRequestConfig {
        SignedRequestConfig::builder()
            .secret(SECRET)
            .respond_on_error(false)
            .build()
    }

    #[tokio::test]
    async fn test_should_pass_valid_request_when_not_responding_on_error() {
        let server = TestServer::start(without_responding()).await.unwrap();

        let (status, body) = post_webhook(&server, Some(SIGNATURE), PAYLOAD).await.unwrap();

        assert_eq!(status, 200);
        assert_eq!(body, json!({"success": true, "payload": {"_id": "resume"}}));
    }

    #[tokio::test]
    async fn test_should_forward_missing_signature_to_error_handler() {
        let server = TestServer::start(without_responding()).await.unwrap();

        let (status, body) = post_webhook(&server, None, PAYLOAD).await.unwrap();

        assert_eq!(status, 401);
        assert_eq!(
            body,
            json!({"message": "Request contained no signature header", "success": false})
        );
    }

    #[tokio::test]
    async fn test_should_forward_invalid_signature_to_error_handler() {
        let server = TestServer::start(without_responding()).await.unwrap();

        let (status, body) = post_webhook(&server, Some(SIGNATURE), r#"{"foo":"bar"}"#)
            .await
            .unwrap();

        assert_eq!(status, 401);
        assert_eq!(
            body,
            json!({"message": "Signature is invalid", "success": false})
        );
    }

    #[tokio::test]
    async fn test_should_forward_format_error_to_error_handler() {
        let server = TestServer::start(without_responding()).await.unwrap();
        let signature = "t=1633519811123,v4=tLa470fx7qkLLEcMOcEUFuBbRS";

        let (status, body) = post_webhook(&server, Some(signature), PAYLOAD).await.unwrap();

        assert_eq!(status, 400);
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Invalid signature payload format");
    }

    #[tokio::test]
    async fn test_should_pass_raw_body_when_parsing_disabled() {
        let config = SignedRequestConfig::builder()
            .secret(SECRET)
            .parse_body(false)
            .build();
        let server = TestServer::start(config).await.unwrap();

        let (status, body) = post_webhook(&server, Some(SIGNATURE), PAYLOAD).await.unwrap();

        assert_eq!(status, 200);
        assert_eq!(body, json!({"success": true, "payload": PAYLOAD}));
    }

    #[tokio::test]
    async fn test_should_send_signed_non_json_body_to_error_handler() {
        let server = TestServer::start_default().await.unwrap();
        let payload = "not json";
        let header = hooksig_auth::encode_signature_header(payload, 1_633_519_811_129, SECRET)
            .await
            .unwrap();

        let (status, body) = post_webhook(&server, Some(&header), payload).await.unwrap();

        assert_eq!(status, 400);
        assert_eq!(body["success"], false);
    }
}
