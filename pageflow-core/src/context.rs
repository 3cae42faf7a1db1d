//! Per-call navigation configuration
//!
//! A [`NavigationContext`] travels with every show/hide/push/pop request. It
//! carries the concurrency policy applied when the request collides with an
//! in-flight transition, plus an opaque payload forwarded verbatim to page
//! hooks. The orchestrators clone the context at the start of each call, so
//! mutating the caller's copy afterwards never affects a running transition.

use serde::{Deserialize, Serialize};

/// Policy applied when a navigation request arrives while another transition
/// is already running on the same orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AwaitOperation {
    /// Wait cooperatively until the in-flight transition completes, then
    /// proceed with this request. Wake order among several waiters is not
    /// FIFO; whichever waiter wins the re-acquire race goes first.
    #[default]
    Sequential,
    /// Return immediately without performing any part of the request. No
    /// events fire; the outcome is indistinguishable from a silent no-op.
    Drop,
    /// Fail immediately with [`Error::NavigationInProgress`] without touching
    /// any state.
    ///
    /// [`Error::NavigationInProgress`]: crate::Error::NavigationInProgress
    Error,
}

/// Configuration value forwarded through a single navigation request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NavigationContext {
    /// Policy for colliding with an in-flight transition.
    pub await_operation: AwaitOperation,
    /// Opaque caller data handed to the page hooks unchanged.
    pub payload: serde_json::Value,
}

impl NavigationContext {
    /// Create a context with the default policy and an empty payload
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the concurrency policy
    pub fn with_await_operation(mut self, await_operation: AwaitOperation) -> Self {
        self.await_operation = await_operation;
        self
    }

    /// Attach an opaque payload forwarded to page hooks
    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_policy_is_sequential() {
        let context = NavigationContext::new();
        assert_eq!(context.await_operation, AwaitOperation::Sequential);
        assert!(context.payload.is_null());
    }

    #[test]
    fn test_builder_methods() {
        let context = NavigationContext::new()
            .with_await_operation(AwaitOperation::Drop)
            .with_payload(json!({ "from": "settings" }));

        assert_eq!(context.await_operation, AwaitOperation::Drop);
        assert_eq!(context.payload["from"], "settings");
    }

    #[test]
    fn test_clone_isolates_caller_mutation() {
        let mut original = NavigationContext::new().with_payload(json!("first"));
        let copied = original.clone();

        original.payload = json!("second");
        assert_eq!(copied.payload, json!("first"));
    }
}
