use std::sync::Arc;

use axum::{
    Form, Json,
    extract::{FromRequest, Request, State},
    http::{StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use tracing::{debug, error, info, instrument};

use crate::{
    http::{AppError, svc::HttpEndpoint},
    mail::msg::MailMsg,
};
use api::contact::{ContactReq, ContactResp, DISPATCH_ERROR, MISSING_FIELDS_ERROR};

// http api endpoints
//
// the handler only checks that the required fields are there; composing
// and sending the email is the mail service's job, which keeps the smtp
// client (and its connection pool) out of the axum state

// the page posts json, but a plain html form post (no script) arrives
// url-encoded, so both are accepted
//
// a body that cannot be decoded at all is treated like an empty one, which
// then fails the required-field check
async fn decode_contact(request: Request) -> ContactReq {
    let is_form = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|val| val.to_str().ok())
        .is_some_and(|val| val.starts_with("application/x-www-form-urlencoded"));

    let decoded = if is_form {
        Form::<ContactReq>::from_request(request, &())
            .await
            .map(|Form(req)| req)
            .map_err(|err| err.body_text())
    } else {
        Json::<ContactReq>::from_request(request, &())
            .await
            .map(|Json(req)| req)
            .map_err(|err| err.body_text())
    };

    match decoded {
        Ok(req) => req,
        Err(err) => {
            info!({ error = %err }, "undecodable contact body");
            ContactReq::default()
        }
    }
}

#[instrument(skip_all)]
pub(super) async fn submit_contact(
    State(state): State<Arc<HttpEndpoint>>,
    request: Request,
) -> Result<Response, AppError> {
    let message = decode_contact(request).await;

    // presence only; the address format is left to the page
    if message.missing_required() {
        debug!("rejecting contact submission with missing fields");

        return Ok((
            StatusCode::BAD_REQUEST,
            Json(ContactResp::failed(MISSING_FIELDS_ERROR)),
        )
            .into_response());
    }

    let (tx, rx) = tokio::sync::oneshot::channel();

    state
        .mail_svc_sender
        .send(MailMsg::SendContact { resp: tx, req: message }.into())
        .await?;

    match rx.await? {
        Ok(()) => {
            info!("contact message sent");

            Ok(Json(ContactResp::sent()).into_response())
        }
        Err(err) => {
            // the backend's error stays in the log
            error!({ error = %err }, "error sending email");

            Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ContactResp::failed(DISPATCH_ERROR)),
            )
                .into_response())
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use axum::{
        Router,
        body::Body,
        http::{Method, Request},
    };
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::http::svc::router;
    use crate::mail::svc::{
        MailService,
        tests::{OutboxBackend, RejectingBackend, SMTP_FAILURE, config, sent_to},
    };
    use crate::service::{RSMRegistry, RelayService};
    use common::mail::MailBackend;

    async fn relay<B: MailBackend>(recipient: &str, doc_root: &Path) -> (Router, MailService<B>) {
        let config = config(recipient);
        let registry = RSMRegistry::new();

        let mail_svc = MailService::<B>::create(config, &registry);
        mail_svc.start(&registry).await.unwrap();

        let state = Arc::new(HttpEndpoint::new(&registry).unwrap());

        (router(state, doc_root), mail_svc)
    }

    fn post_json(body: Value) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/api/contact")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn read_json(response: Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn missing_email_is_a_bad_request() {
        let (app, _svc) = relay::<OutboxBackend>("missing@example.com", Path::new(".")).await;

        let response = app
            .oneshot(post_json(json!({"firstName": "Jo", "message": "hi"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            read_json(response).await,
            json!({"error": "First name, email, and message are required"})
        );
        assert!(sent_to("missing@example.com").is_empty());
    }

    #[tokio::test]
    async fn blank_required_field_is_a_bad_request() {
        let (app, _svc) = relay::<OutboxBackend>("blank@example.com", Path::new(".")).await;

        let response = app
            .oneshot(post_json(
                json!({"firstName": "  ", "email": "jo@x.com", "message": "hi"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn malformed_body_is_a_bad_request() {
        let (app, _svc) = relay::<OutboxBackend>("malformed@example.com", Path::new(".")).await;

        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/contact")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            read_json(response).await,
            json!({"error": "First name, email, and message are required"})
        );
    }

    #[tokio::test]
    async fn complete_submission_is_sent() {
        let (app, _svc) = relay::<OutboxBackend>("sent@example.com", Path::new(".")).await;

        let response = app
            .oneshot(post_json(json!({
                "firstName": "Jo",
                "lastName": "Doe",
                "email": "jo@x.com",
                "subject": "Hello",
                "message": "hi\nthere",
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            read_json(response).await,
            json!({"success": true, "message": "Message sent successfully!"})
        );

        let sent = sent_to("sent@example.com");
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].subject, "Portfolio Contact: Hello");
        assert!(sent[0].html.contains("<p>hi<br>there</p>"));
    }

    #[tokio::test]
    async fn numeric_optional_field_is_accepted() {
        let (app, _svc) = relay::<OutboxBackend>("numeric@example.com", Path::new(".")).await;

        let response = app
            .oneshot(post_json(json!({
                "firstName": "Jo",
                "email": "jo@x.com",
                "message": "hi",
                "phone": 5551234,
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let sent = sent_to("numeric@example.com");
        assert_eq!(sent.len(), 1);
        assert!(sent[0].html.contains("<p><strong>Phone:</strong> 5551234</p>"));
    }

    #[tokio::test]
    async fn email_format_is_not_checked() {
        let (app, _svc) = relay::<OutboxBackend>("format@example.com", Path::new(".")).await;

        let response = app
            .oneshot(post_json(
                json!({"firstName": "Jo", "email": "not-an-email", "message": "hi"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(sent_to("format@example.com").len(), 1);
    }

    #[tokio::test]
    async fn url_encoded_form_is_accepted() {
        let (app, _svc) = relay::<OutboxBackend>("form@example.com", Path::new(".")).await;

        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/contact")
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("firstName=Jo&email=jo%40x.com&message=hello+there"))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let sent = sent_to("form@example.com");
        assert_eq!(sent.len(), 1);
        assert!(sent[0].html.contains("<p>hello there</p>"));
    }

    #[tokio::test]
    async fn dispatch_failure_is_generic() {
        let (app, _svc) = relay::<RejectingBackend>("reject@example.com", Path::new(".")).await;

        let response = app
            .oneshot(post_json(
                json!({"firstName": "Jo", "email": "jo@x.com", "message": "hi"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = read_json(response).await;
        assert_eq!(body, json!({"error": "Failed to send message. Please try again."}));
        assert!(!body.to_string().contains(SMTP_FAILURE));
        assert!(!body.to_string().contains("credentials"));
    }

    #[tokio::test]
    async fn serves_static_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "<h1>portfolio</h1>").unwrap();
        std::fs::write(dir.path().join("style.css"), "body { margin: 0; }").unwrap();

        let (app, _svc) = relay::<OutboxBackend>("static@example.com", dir.path()).await;

        let get = |uri: &str| {
            Request::builder()
                .uri(uri)
                .body(Body::empty())
                .unwrap()
        };

        let response = app.clone().oneshot(get("/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"<h1>portfolio</h1>");

        let response = app.clone().oneshot(get("/style.css")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[CONTENT_TYPE], "text/css");

        let response = app.oneshot(get("/missing.js")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn cross_origin_requests_are_allowed() {
        let (app, _svc) = relay::<OutboxBackend>("cors@example.com", Path::new(".")).await;

        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/api/contact")
            .header("origin", "https://portfolio.example.com")
            .header("access-control-request-method", "POST")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.headers()["access-control-allow-origin"], "*");
    }
}
