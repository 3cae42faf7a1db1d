//! Page traits and handles
//!
//! A page is a unit of navigable content with asynchronous enter/leave hooks.
//! Pages that additionally participate in the attach/detach lifecycle expose
//! the optional [`PageLifecycle`] capability through [`Page::lifecycle`]; the
//! orchestrators never downcast.
//!
//! Pages are held by non-owning shared handles ([`PageRef`]); identity is by
//! reference, which is what membership and duplicate checks use.

use crate::{NavigationContext, Result};
use async_trait::async_trait;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Shared handle to a registered page.
pub type PageRef = Arc<dyn Page>;

/// A navigable page with enter/leave transition hooks.
///
/// Both hooks receive the request's [`NavigationContext`] and the caller's
/// cancellation token. Hook failures propagate to the caller of the
/// triggering operation; the orchestrator's in-flight guard is released
/// either way.
#[async_trait]
pub trait Page: Send + Sync {
    /// Called when this page becomes the active page.
    async fn on_navigated_to(
        &self,
        context: &NavigationContext,
        token: &CancellationToken,
    ) -> Result<()>;

    /// Called when this page stops being the active page.
    async fn on_navigated_from(
        &self,
        context: &NavigationContext,
        token: &CancellationToken,
    ) -> Result<()>;

    /// Optional attach/detach lifecycle capability.
    ///
    /// Pages that want `on_attached`/`on_detached` callbacks return a handle
    /// to their lifecycle implementation here.
    fn lifecycle(&self) -> Option<&dyn PageLifecycle> {
        None
    }
}

/// Optional capability for pages that take part in the attach/detach
/// lifecycle of a registry.
#[async_trait]
pub trait PageLifecycle: Send + Sync {
    /// Called while the page is being added to a registry, after the
    /// attached event fires and before the page becomes queryable.
    async fn on_attached(&self, token: &CancellationToken) -> Result<()>;

    /// Called after the page has been removed from a registry and the
    /// detached event has fired.
    async fn on_detached(&self, token: &CancellationToken) -> Result<()>;
}

/// Whether two handles refer to the same page.
///
/// Compares data pointer addresses only, so two handles to one page compare
/// equal regardless of which trait-object metadata they carry.
pub fn same_page(a: &PageRef, b: &PageRef) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}
