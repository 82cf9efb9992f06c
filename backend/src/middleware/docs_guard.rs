//! Basic-auth gate in front of the API documentation.
//!
//! Requests for `/docs`, anything below it, and `/openapi.json` must carry
//! `Authorization: Basic` credentials accepted by [`DocsAccess`]. Every other
//! path passes through untouched.

use std::rc::Rc;
use std::task::{Context, Poll};

use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{AUTHORIZATION, HeaderMap, WWW_AUTHENTICATE};
use actix_web::{Error, HttpResponse};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::debug;

use crate::inbound::http::docs_access::DocsAccess;

const MISSING_AUTHENTICATION: &str = "Unauthorized: Missing authentication";
const INCORRECT_CREDENTIALS: &str = "Unauthorized: Incorrect credentials";

/// Whether `path` serves documentation.
fn is_docs_path(path: &str) -> bool {
    path == "/docs" || path.starts_with("/docs/") || path == "/openapi.json"
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rejection {
    Missing,
    Incorrect,
}

impl Rejection {
    fn message(self) -> &'static str {
        match self {
            Self::Missing => MISSING_AUTHENTICATION,
            Self::Incorrect => INCORRECT_CREDENTIALS,
        }
    }
}

fn check(headers: &HeaderMap, access: &DocsAccess) -> Result<(), Rejection> {
    let header = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or(Rejection::Missing)?;
    let encoded = match header.split_once(' ') {
        Some((scheme, rest)) if scheme.eq_ignore_ascii_case("basic") => rest.trim(),
        _ => return Err(Rejection::Missing),
    };

    let decoded = STANDARD
        .decode(encoded)
        .map_err(|_| Rejection::Incorrect)?;
    let credentials = String::from_utf8(decoded).map_err(|_| Rejection::Incorrect)?;
    let (username, password) = credentials.split_once(':').ok_or(Rejection::Incorrect)?;

    if access.verify(username, password) {
        Ok(())
    } else {
        Err(Rejection::Incorrect)
    }
}

/// Middleware enforcing documentation credentials.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use delegation_backend::inbound::http::docs_access::DocsAccess;
/// use delegation_backend::middleware::DocsGuard;
///
/// let app = App::new().wrap(DocsGuard::new(DocsAccess::new("s3cret")));
/// ```
#[derive(Clone)]
pub struct DocsGuard {
    access: Rc<DocsAccess>,
}

impl DocsGuard {
    /// Guard the docs with `access`.
    pub fn new(access: DocsAccess) -> Self {
        Self {
            access: Rc::new(access),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for DocsGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = DocsGuardMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(DocsGuardMiddleware {
            service,
            access: Rc::clone(&self.access),
        }))
    }
}

/// Service wrapper produced by [`DocsGuard`].
pub struct DocsGuardMiddleware<S> {
    service: S,
    access: Rc<DocsAccess>,
}

impl<S, B> Service<ServiceRequest> for DocsGuardMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if is_docs_path(req.path()) {
            if let Err(rejection) = check(req.headers(), &self.access) {
                debug!(path = req.path(), ?rejection, "docs request rejected");
                let response = HttpResponse::Unauthorized()
                    .insert_header((WWW_AUTHENTICATE, "Basic"))
                    .content_type("text/plain; charset=utf-8")
                    .body(rejection.message());
                let res = req.into_response(response).map_into_right_body();
                return Box::pin(ready(Ok(res)));
            }
        }

        let fut = self.service.call(req);
        Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
    }
}
