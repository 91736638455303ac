//! Authorization gate layer
//!
//! Wraps a handler with a declared [`Requirements`] pair at route
//! registration time. The layer resolves the call's target resource id from
//! the matched path, reads the request's access decision, and runs
//! [`pinboard_core::permissions::enforce`] before the handler body —
//! a failing gate short-circuits with the signaled error response.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use axum::body::Body;
use axum::extract::{Path, Request};
use axum::response::{IntoResponse, Response};
use axum::RequestExt;
use tower::{Layer, Service};

use pinboard_core::permissions::{enforce, AccessDecision, Requirements, ResourceKind};

use crate::error::ApiError;
use crate::state::AppState;

/// Layer form of the gate: requirements + next step in, wrapped step out.
#[derive(Clone)]
pub struct GateLayer {
    state: AppState,
    kind: ResourceKind,
    requirements: Requirements,
}

impl GateLayer {
    pub fn new(state: AppState, kind: ResourceKind, requirements: Requirements) -> Self {
        Self {
            state,
            kind,
            requirements,
        }
    }
}

impl<S> Layer<S> for GateLayer {
    type Service = GateService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        GateService {
            inner,
            state: self.state.clone(),
            kind: self.kind,
            requirements: self.requirements,
        }
    }
}

#[derive(Clone)]
pub struct GateService<S> {
    inner: S,
    state: AppState,
    kind: ResourceKind,
    requirements: Requirements,
}

impl<S> Service<Request<Body>> for GateService<S>
where
    S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut request: Request<Body>) -> Self::Future {
        let state = self.state.clone();
        let kind = self.kind;
        let requirements = self.requirements;

        let not_ready_inner = self.inner.clone();
        let mut ready_inner = std::mem::replace(&mut self.inner, not_ready_inner);

        Box::pin(async move {
            // Target resource id, when the call addresses one. Creation
            // routes carry no id; the gate then degrades to an
            // authentication check.
            let target = request
                .extract_parts::<Option<Path<i64>>>()
                .await
                .ok()
                .flatten()
                .map(|Path(id)| id);

            let decision = request
                .extensions()
                .get::<AccessDecision>()
                .cloned()
                .unwrap_or_else(AccessDecision::anonymous);

            match enforce(requirements, &decision, kind, target, &state.store).await {
                Ok(()) => ready_inner.call(request).await,
                Err(e) => Ok(ApiError::from(e).into_response()),
            }
        })
    }
}
