use axum::{extract::Request, middleware::Next, response::Response};
use http::{HeaderValue, header};
use http_body::Body as _;
use tower_http::set_header::SetResponseHeaderLayer;

/// Emits one debug event per inbound request and passes it on untouched.
pub async fn access_log(req: Request, next: Next) -> Response {
    let headers = req.headers();
    let host = headers
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    tracing::debug!(
        method = %req.method(),
        host,
        url = %req.uri(),
        user_agent,
        "request"
    );

    next.run(req).await
}

type ContentTypeFor = fn(&Response) -> Option<HeaderValue>;

/// Sets `Content-Type: application/json` on responses that carry a body but
/// whose handler did not choose a content type.
pub fn json_content_type() -> SetResponseHeaderLayer<ContentTypeFor> {
    SetResponseHeaderLayer::if_not_present(
        header::CONTENT_TYPE,
        default_content_type as ContentTypeFor,
    )
}

fn default_content_type(res: &Response) -> Option<HeaderValue> {
    // Empty replies (204, 404) have nothing to describe.
    if res.body().size_hint().exact() == Some(0) {
        return None;
    }
    Some(HeaderValue::from_static("application/json"))
}

#[cfg(test)]
mod tests {
    use std::{
        io,
        sync::{Arc, Mutex},
    };

    use axum::{Router, body::Body, middleware::from_fn, response::Html, routing::get};
    use http::StatusCode;
    use http_body_util::BodyExt;
    use tower::ServiceExt;
    use tracing_subscriber::fmt::MakeWriter;

    use super::*;

    #[derive(Clone, Default)]
    struct CapturedLog(Arc<Mutex<Vec<u8>>>);

    impl CapturedLog {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl io::Write for CapturedLog {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for CapturedLog {
        type Writer = CapturedLog;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    fn request(uri: &str) -> Request {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn access_log_records_request_fields_and_passes_through() {
        let log = CapturedLog::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(log.clone())
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let app = Router::new()
            .route("/products", get(|| async { (StatusCode::ACCEPTED, "listed") }))
            .layer(from_fn(access_log));
        let req = Request::builder()
            .uri("/products?sort=name")
            .header(header::HOST, "shop.local")
            .header(header::USER_AGENT, "curl/8.4.0")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::ACCEPTED);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"listed");

        let line = log.contents();
        assert!(line.contains("DEBUG"), "{line}");
        assert!(line.contains("request"), "{line}");
        assert!(line.contains("method=GET"), "{line}");
        assert!(line.contains("url=/products?sort=name"), "{line}");
        assert!(line.contains("host=\"shop.local\""), "{line}");
        assert!(line.contains("user_agent=\"curl/8.4.0\""), "{line}");
    }

    #[tokio::test]
    async fn access_log_tolerates_missing_headers() {
        let app = Router::new()
            .route("/", get(|| async { StatusCode::OK }))
            .layer(from_fn(access_log));

        let response = app.oneshot(request("/")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn json_default_applies_only_to_untyped_bodies() {
        let app = Router::new()
            .route("/body", get(|| async { Body::from("Hello") }))
            .route("/html", get(|| async { Html("<p>hi</p>") }))
            .route("/empty", get(|| async { StatusCode::NO_CONTENT }))
            .layer(json_content_type());

        let content_type = |response: &Response| {
            response
                .headers()
                .get(header::CONTENT_TYPE)
                .map(|v| v.to_str().unwrap().to_string())
        };

        let body = app.clone().oneshot(request("/body")).await.unwrap();
        assert_eq!(content_type(&body).as_deref(), Some("application/json"));

        let html = app.clone().oneshot(request("/html")).await.unwrap();
        assert!(content_type(&html).unwrap().starts_with("text/html"));

        let empty = app.clone().oneshot(request("/empty")).await.unwrap();
        assert_eq!(empty.status(), StatusCode::NO_CONTENT);
        assert_eq!(content_type(&empty), None);

        let missing = app.oneshot(request("/nowhere")).await.unwrap();
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
        assert_eq!(content_type(&missing), None);
    }
}
