//! Authentication gate.
//!
//! Every request resolves to one of two terminal outcomes: forwarded
//! downstream untouched, or rejected with `403 Forbidden` without calling
//! downstream. The metrics exposition route is forwarded without a check.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use common::ServiceError;
use tracing::{error, info};

use super::route_template;
use crate::auth::{AuthStore, Credentials};
use crate::server::handlers::error_response;
use crate::server::router::METRICS_PATH;

/// Axum middleware checking basic-auth credentials against `store`.
pub async fn require_credentials(
    State(store): State<Arc<dyn AuthStore>>,
    request: Request,
    next: Next,
) -> Response {
    if route_template(&request) == METRICS_PATH {
        return next.run(request).await;
    }

    let Some(creds) = Credentials::from_headers(request.headers()) else {
        info!("rejected request without basic credentials");
        return forbidden();
    };

    match store.is_authorized(&creds.account, &creds.token).await {
        Ok(true) => {
            info!(account = %creds.account, "authenticated account");
            next.run(request).await
        }
        Ok(false) => {
            info!(account = %creds.account, "rejected credentials");
            forbidden()
        }
        Err(e) => {
            error!(account = %creds.account, error = %e, "authorization store query failed");
            forbidden()
        }
    }
}

fn forbidden() -> Response {
    error_response(&ServiceError::AuthRejected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use axum::{body::Body, http::StatusCode, routing::get, Router};
    use tower::ServiceExt;

    use crate::auth::store::MockAuthStore;
    use crate::auth::StaticAuthStore;
    use crate::repository::StoreError;

    /// Router whose handlers count their invocations.
    fn gated(store: Arc<dyn AuthStore>, hits: Arc<AtomicUsize>) -> Router {
        let h1 = hits.clone();
        let h2 = hits;
        Router::new()
            .route(
                "/services",
                get(move || {
                    let hits = h1.clone();
                    async move {
                        hits.fetch_add(1, Ordering::SeqCst);
                        "ok"
                    }
                }),
            )
            .route(
                METRICS_PATH,
                get(move || {
                    let hits = h2.clone();
                    async move {
                        hits.fetch_add(1, Ordering::SeqCst);
                        "metrics"
                    }
                }),
            )
            .layer(axum::middleware::from_fn_with_state(store, require_credentials))
    }

    fn request(uri: &str, creds: Option<Credentials>) -> Request {
        let mut builder = axum::http::Request::builder().uri(uri);
        if let Some(c) = creds {
            builder = builder.header("authorization", c.to_header_value());
        }
        builder.body(Body::empty()).unwrap()
    }

    fn alice(token: &str) -> Option<Credentials> {
        Some(Credentials {
            account: "alice".into(),
            token: token.into(),
        })
    }

    async fn body_text(resp: Response) -> String {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn valid_pair_is_forwarded() {
        let hits = Arc::new(AtomicUsize::new(0));
        let store = Arc::new(StaticAuthStore::new([("alice", "s3cret")]));
        let resp = gated(store, hits.clone())
            .oneshot(request("/services", alice("s3cret")))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_text(resp).await, "ok");
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn wrong_token_is_rejected_without_downstream_call() {
        let hits = Arc::new(AtomicUsize::new(0));
        let store = Arc::new(StaticAuthStore::new([("alice", "s3cret")]));
        let resp = gated(store, hits.clone())
            .oneshot(request("/services", alice("guess")))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        assert_eq!(body_text(resp).await, "Forbidden");
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn missing_credentials_never_query_store() {
        let hits = Arc::new(AtomicUsize::new(0));
        let mut store = MockAuthStore::new();
        store.expect_is_authorized().never();
        let resp = gated(Arc::new(store), hits.clone())
            .oneshot(request("/services", None))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn store_error_rejects() {
        let hits = Arc::new(AtomicUsize::new(0));
        let mut store = MockAuthStore::new();
        store
            .expect_is_authorized()
            .times(1)
            .returning(|_, _| Err(StoreError::MalformedRow("column matches: null".into())));
        let resp = gated(Arc::new(store), hits.clone())
            .oneshot(request("/services", alice("s3cret")))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn metrics_route_is_exempt_and_dispatched_once() {
        let hits = Arc::new(AtomicUsize::new(0));
        let mut store = MockAuthStore::new();
        store.expect_is_authorized().never();
        let resp = gated(Arc::new(store), hits.clone())
            .oneshot(request(METRICS_PATH, None))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_text(resp).await, "metrics");
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }
}
