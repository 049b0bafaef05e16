//! Shared fetch/mutate reconcile loop behind every remote-backed store.

use crate::error::ApiError;
use crate::reactive::{RequestSequence, StateContainer};
use crate::service::ApiClient;
use crate::stores::AuthStore;
use crate::transport::ApiRequest;
use serde::de::DeserializeOwned;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Loading/error fields every resource snapshot carries.
pub trait ResourceSnapshot: Clone + Send + 'static {
    fn set_loading(&mut self, loading: bool);
    fn set_error(&mut self, error: Option<String>);
}

/// Container, in-flight count and authorized API access for one resource.
#[derive(Clone)]
pub(crate) struct RemoteResource<S> {
    state: StateContainer<S>,
    in_flight: Arc<AtomicUsize>,
    api: ApiClient,
    auth: AuthStore,
}

impl<S: ResourceSnapshot> RemoteResource<S> {
    pub fn new(initial: S, api: ApiClient, auth: AuthStore) -> Self {
        Self {
            state: StateContainer::new(initial),
            in_flight: Arc::new(AtomicUsize::new(0)),
            api,
            auth,
        }
    }

    pub fn state(&self) -> &StateContainer<S> {
        &self.state
    }

    pub fn auth(&self) -> &AuthStore {
        &self.auth
    }

    /// Attach the bearer token and decode the response body.
    pub async fn load<R: DeserializeOwned>(&self, request: ApiRequest) -> Result<R, ApiError> {
        let token = self.auth.bearer()?;
        self.api.fetch(request.bearer(token)).await
    }

    /// Attach the bearer token; the response body is ignored.
    pub async fn send(&self, request: ApiRequest) -> Result<(), ApiError> {
        let token = self.auth.bearer()?;
        self.api.execute(request.bearer(token)).await
    }

    /// Run a fetch: loading on, await `call`, then apply the result (or record
    /// the error) unless a newer fetch on the same `sequence` already landed.
    pub async fn fetch<R, Fut, F>(
        &self,
        sequence: &RequestSequence,
        fallback: &str,
        call: Fut,
        apply: F,
    ) -> Result<R, ApiError>
    where
        Fut: Future<Output = Result<R, ApiError>>,
        F: FnOnce(&mut S, &R),
    {
        let ticket = sequence.issue();
        self.start();
        let result = call.await;
        self.finish();
        let fresh = sequence.try_apply(ticket);
        if !fresh {
            tracing::debug!(fallback, "stale response discarded");
        }
        self.settle(fallback, &result, fresh, apply);
        result
    }

    /// Run a mutation. Applied in completion order, never discarded.
    pub async fn mutate<R, Fut, F>(&self, fallback: &str, call: Fut, apply: F) -> Result<R, ApiError>
    where
        Fut: Future<Output = Result<R, ApiError>>,
        F: FnOnce(&mut S, &R),
    {
        self.start();
        let result = call.await;
        self.finish();
        self.settle(fallback, &result, true, apply);
        result
    }

    /// Run a read that leaves the collection alone; only loading and error change.
    pub async fn lookup<R, Fut>(&self, fallback: &str, call: Fut) -> Result<R, ApiError>
    where
        Fut: Future<Output = Result<R, ApiError>>,
    {
        self.mutate(fallback, call, |_, _| {}).await
    }

    pub fn clear_error(&self) {
        self.state.update(|s| {
            let mut next = s.clone();
            next.set_error(None);
            next
        });
    }

    fn start(&self) {
        self.in_flight.fetch_add(1, Ordering::AcqRel);
        self.state.update(|s| {
            let mut next = s.clone();
            next.set_loading(true);
            next.set_error(None);
            next
        });
    }

    fn finish(&self) {
        self.in_flight.fetch_sub(1, Ordering::AcqRel);
    }

    fn settle<R, F>(&self, fallback: &str, result: &Result<R, ApiError>, apply_result: bool, apply: F)
    where
        F: FnOnce(&mut S, &R),
    {
        if let Err(err) = result {
            tracing::warn!(error = %err, "{}", fallback);
        }
        let in_flight = &self.in_flight;
        self.state.update(|s| {
            let mut next = s.clone();
            if apply_result {
                match result {
                    Ok(value) => {
                        apply(&mut next, value);
                        next.set_error(None);
                    }
                    Err(err) => next.set_error(Some(err.message_or(fallback))),
                }
            }
            // Read under the container lock so the last settle always sees the final count.
            next.set_loading(in_flight.load(Ordering::Acquire) > 0);
            next
        });
    }
}
