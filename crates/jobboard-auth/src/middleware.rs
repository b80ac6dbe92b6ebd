//! Request identity middleware for Axum
//!
//! Resolves the bearer token on every request into an [`Identity`] and makes
//! it available two ways: as a request extension (read by the [`Identity`]
//! extractor) and as the task-local [`context::current`] value for the
//! duration of the inner service call.
//!
//! The layer never rejects a request. Missing, malformed, tampered or expired
//! tokens, and tokens whose subject no longer exists, all leave the request
//! anonymous; the gates decide what anonymous callers may do.

use axum::{
    async_trait,
    extract::{FromRequestParts, Request},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    response::Response,
};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::task::{Context, Poll};
use tower::{Layer, Service};
use tracing::{debug, trace, warn};

use crate::context;
use crate::directory::UserDirectory;
use crate::error::{AuthError, AuthResult};
use crate::jwt::TokenCodec;
use crate::types::{Identity, Principal};

/// Turns request headers into an [`Identity`]
pub struct IdentityResolver {
    tokens: TokenCodec,
    directory: Arc<dyn UserDirectory>,
}

impl IdentityResolver {
    pub fn new(tokens: TokenCodec, directory: Arc<dyn UserDirectory>) -> Self {
        Self { tokens, directory }
    }

    /// Resolve the caller's identity; any failure yields [`Identity::Anonymous`]
    pub async fn resolve(&self, headers: &HeaderMap) -> Identity {
        let Some(token) = bearer_token(headers) else {
            trace!("No bearer token presented");
            return Identity::Anonymous;
        };

        match self.authenticate(token, Utc::now()).await {
            Ok(principal) => {
                trace!(user_id = principal.user_id, role = %principal.role, "Request authenticated");
                Identity::Authenticated(principal)
            }
            Err(e) if e.is_server_error() => {
                warn!(error = %e, "Identity resolution failed, continuing as anonymous");
                Identity::Anonymous
            }
            Err(e) => {
                debug!(reason = e.error_code(), "Bearer token rejected");
                Identity::Anonymous
            }
        }
    }

    async fn authenticate(&self, token: &str, now: DateTime<Utc>) -> AuthResult<Principal> {
        let claims = self.tokens.decode(token)?;

        let record = self
            .directory
            .find_by_username(&claims.sub)
            .await?
            .ok_or(AuthError::InvalidToken)?;

        if self.tokens.is_expired(&claims, now) {
            return Err(AuthError::TokenExpired);
        }

        if record.username != claims.sub {
            return Err(AuthError::InvalidToken);
        }

        // The stored role wins over whatever the token was issued with
        Ok(Principal::new(record.id, record.role))
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    (!token.is_empty()).then_some(token)
}

/// Identity middleware layer
#[derive(Clone)]
pub struct IdentityLayer {
    resolver: Arc<IdentityResolver>,
}

impl IdentityLayer {
    pub fn new(resolver: Arc<IdentityResolver>) -> Self {
        Self { resolver }
    }
}

impl<S> Layer<S> for IdentityLayer {
    type Service = IdentityMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        IdentityMiddleware {
            inner,
            resolver: self.resolver.clone(),
        }
    }
}

/// Identity middleware service
#[derive(Clone)]
pub struct IdentityMiddleware<S> {
    inner: S,
    resolver: Arc<IdentityResolver>,
}

impl<S> Service<Request> for IdentityMiddleware<S>
where
    S: Service<Request, Response = Response> + Send + Clone + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = std::pin::Pin<Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request) -> Self::Future {
        let resolver = self.resolver.clone();
        // Keep the instance that was driven to readiness
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        Box::pin(async move {
            // Already resolved by an outer identity layer
            if req.extensions().get::<Identity>().is_some() {
                return inner.call(req).await;
            }

            let identity = resolver.resolve(req.headers()).await;
            req.extensions_mut().insert(identity);

            context::scope(identity, inner.call(req)).await
        })
    }
}

// =============================================================================
// Axum Extractors
// =============================================================================

/// Resolved identity of the caller; anonymous if the layer is not installed
#[async_trait]
impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts.extensions.get::<Identity>().copied().unwrap_or_default())
    }
}
