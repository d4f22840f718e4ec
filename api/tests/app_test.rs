//! Integration tests for application-wide behaviour

mod common;

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test};

    use sg_api::create_app;

    use crate::common::{json_body, Harness};

    #[actix_web::test]
    async fn test_health_check() {
        let h = Harness::new();
        let app = test::init_service(create_app(h.state.clone())).await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = json_body(resp).await;
        assert_eq!(body["status"], "success");
        assert_eq!(body["data"]["status"], "ok");
        assert_eq!(body["data"]["server"], "SFTP Gateway");
        assert!(body["data"]["version"].is_string());
    }

    #[actix_web::test]
    async fn test_security_headers_on_every_response() {
        let h = Harness::new();
        let app = test::init_service(create_app(h.state.clone())).await;

        for uri in ["/health", "/auth/me", "/no/such/route"] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let resp = test::call_service(&app, req).await;
            let headers = resp.headers();
            assert_eq!(headers.get("x-content-type-options").unwrap(), "nosniff", "{}", uri);
            assert_eq!(headers.get("x-frame-options").unwrap(), "DENY", "{}", uri);
            assert!(headers.contains_key("content-security-policy"), "{}", uri);
            assert!(!headers.contains_key("strict-transport-security"), "{}", uri);
        }
    }

    #[actix_web::test]
    async fn test_request_id_is_echoed() {
        let h = Harness::new();
        let app = test::init_service(create_app(h.state.clone())).await;

        let req = test::TestRequest::get()
            .uri("/health")
            .insert_header(("X-Request-Id", "trace-42"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.headers().get("x-request-id").unwrap(), "trace-42");
        let body = json_body(resp).await;
        assert_eq!(body["requestId"], "trace-42");
    }

    #[actix_web::test]
    async fn test_request_id_is_generated_and_matches_body() {
        let h = Harness::new();
        let app = test::init_service(create_app(h.state.clone())).await;

        let req = test::TestRequest::get().uri("/auth/me").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let header = resp
            .headers()
            .get("x-request-id")
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        let body = json_body(resp).await;
        assert_eq!(body["requestId"], header.as_str());
        assert!(uuid::Uuid::parse_str(&header).is_ok());
    }

    #[actix_web::test]
    async fn test_unknown_route_is_enveloped_404() {
        let h = Harness::new();
        let app = test::init_service(create_app(h.state.clone())).await;

        let req = test::TestRequest::get().uri("/nope").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body = json_body(resp).await;
        assert_eq!(body["status"], "error");
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }
}
