//! Request-scoped identity
//!
//! The identity layer runs each request's inner service inside
//! [`scope`], so any code on that request's task can call [`current`]
//! without threading the principal through every signature. The value lives
//! in a tokio task-local: it is never visible to another request and
//! disappears when the request future completes or is dropped.
//!
//! Work moved onto a separately spawned task does not inherit the identity;
//! pass the [`Principal`](crate::Principal) explicitly in that case.

use std::future::Future;

use crate::types::Identity;

tokio::task_local! {
    static CURRENT_IDENTITY: Identity;
}

/// Identity of the request being processed on this task, or
/// [`Identity::Anonymous`] outside of any request.
pub fn current() -> Identity {
    CURRENT_IDENTITY.try_with(|identity| *identity).unwrap_or_default()
}

/// Run `fut` with `identity` as the current identity
pub(crate) async fn scope<F>(identity: Identity, fut: F) -> F::Output
where
    F: Future,
{
    CURRENT_IDENTITY.scope(identity, fut).await
}
