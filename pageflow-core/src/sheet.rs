//! Index-addressed navigation orchestrator
//!
//! A [`NavigationSheet`] owns a pool of registered pages and switches which
//! one is active by index. Pages are registered up front with [`add`] and
//! torn down with [`remove`]/[`remove_all`]; [`show`] and [`hide`] drive the
//! actual transitions.
//!
//! The sheet assumes one logical owner: overlapping requests interleave at
//! await points and are serialized by the transition gate according to each
//! request's [`AwaitOperation`] policy. No two transitions ever run at once
//! on the same sheet.
//!
//! [`add`]: NavigationSheet::add
//! [`remove`]: NavigationSheet::remove
//! [`remove_all`]: NavigationSheet::remove_all
//! [`show`]: NavigationSheet::show
//! [`hide`]: NavigationSheet::hide
//! [`AwaitOperation`]: crate::AwaitOperation

use crate::events::{EventBus, NavigationEvent};
use crate::page::PageRef;
use crate::registry::PageRegistry;
use crate::transition::{run_swap_transition, TransitionGate};
use crate::{Error, NavigationContext, Result};
use futures::future::join_all;
use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Orchestrator over a fixed pool of pages, navigated by index.
#[derive(Default)]
pub struct NavigationSheet {
    state: Mutex<PageRegistry>,
    gate: TransitionGate,
    events: EventBus,
}

impl NavigationSheet {
    /// Create an empty sheet
    pub fn new() -> Self {
        Self {
            state: Mutex::new(PageRegistry::new()),
            gate: TransitionGate::new(),
            events: EventBus::new(),
        }
    }

    /// Snapshot of the registered pages in insertion order
    pub fn pages(&self) -> Vec<PageRef> {
        self.state.lock().snapshot()
    }

    /// Number of registered pages
    pub fn page_count(&self) -> usize {
        self.state.lock().len()
    }

    /// The currently active page, if any
    pub fn active_page(&self) -> Option<PageRef> {
        self.state.lock().active()
    }

    /// Whether a transition is currently executing
    pub fn is_transitioning(&self) -> bool {
        self.gate.is_transitioning()
    }

    /// Register an observer for page-attached notifications
    pub fn on_page_attached<F>(&self, observer: F)
    where
        F: Fn(&PageRef) + Send + Sync + 'static,
    {
        self.events.on_page_attached(observer);
    }

    /// Register an observer for page-detached notifications
    pub fn on_page_detached<F>(&self, observer: F)
    where
        F: Fn(&PageRef) + Send + Sync + 'static,
    {
        self.events.on_page_detached(observer);
    }

    /// Register an observer fired while a transition is in flight
    pub fn on_navigating<F>(&self, observer: F)
    where
        F: Fn(&NavigationEvent) + Send + Sync + 'static,
    {
        self.events.on_navigating(observer);
    }

    /// Register an observer fired once a transition completes
    pub fn on_navigated<F>(&self, observer: F)
    where
        F: Fn(&NavigationEvent) + Send + Sync + 'static,
    {
        self.events.on_navigated(observer);
    }

    /// Register a page with the sheet.
    ///
    /// The attached notification fires before the page's `on_attached` hook
    /// runs and before the page becomes visible through [`pages`]; observers
    /// deliberately see the page while it is not yet queryable. Fails with
    /// [`Error::InvalidArgument`] if the page is already registered.
    ///
    /// [`pages`]: NavigationSheet::pages
    pub async fn add(&self, page: PageRef, token: &CancellationToken) -> Result<()> {
        if self.state.lock().contains(&page) {
            return Err(Error::invalid_argument("page is already registered"));
        }

        self.events.emit_page_attached(&page);
        if let Some(lifecycle) = page.lifecycle() {
            lifecycle.on_attached(token).await?;
        }

        let mut state = self.state.lock();
        state.insert(page);
        debug!("page attached (registered: {})", state.len());
        Ok(())
    }

    /// Unregister a page.
    ///
    /// The page is removed from the registry first; the detached
    /// notification and the `on_detached` hook run afterwards, the reverse
    /// of [`add`]'s ordering. Fails with [`Error::NotFound`] if the page is
    /// not registered. Removing the active page clears the active slot.
    ///
    /// [`add`]: NavigationSheet::add
    pub async fn remove(&self, page: &PageRef, token: &CancellationToken) -> Result<()> {
        if !self.state.lock().remove(page) {
            return Err(Error::not_found("page is not registered"));
        }

        self.events.emit_page_detached(page);
        if let Some(lifecycle) = page.lifecycle() {
            lifecycle.on_detached(token).await?;
        }
        debug!("page detached (registered: {})", self.page_count());
        Ok(())
    }

    /// Unregister every page at once.
    ///
    /// The active slot and the registry are cleared synchronously before any
    /// notification fires; a page is gone from the collection the moment
    /// this is called, even while its detach hook still runs. Detached
    /// notifications fire for every page (in insertion order), then all
    /// `on_detached` hooks run concurrently and the call resolves once every
    /// hook finishes. Hook failures are collected into a single
    /// [`Error::DetachFailed`].
    pub async fn remove_all(&self, token: &CancellationToken) -> Result<()> {
        let removed = self.state.lock().clear_all();
        info!("removing all pages (count: {})", removed.len());

        let mut hooks = Vec::with_capacity(removed.len());
        for page in removed {
            self.events.emit_page_detached(&page);
            let token = token.clone();
            hooks.push(async move {
                match page.lifecycle() {
                    Some(lifecycle) => lifecycle.on_detached(&token).await,
                    None => Ok(()),
                }
            });
        }

        let errors: Vec<Error> = join_all(hooks)
            .await
            .into_iter()
            .filter_map(|result| result.err())
            .collect();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(Error::DetachFailed { errors })
        }
    }

    /// Make the page at `index` the active page.
    ///
    /// The active slot is updated synchronously before any hook runs; the
    /// outgoing page's `on_navigated_from` and the target's `on_navigated_to`
    /// then execute concurrently, bracketed by the `navigating` and
    /// `navigated` notifications. Showing the already-active page is a
    /// no-op: no hooks, no notifications.
    pub async fn show(
        &self,
        index: usize,
        context: &NavigationContext,
        token: &CancellationToken,
    ) -> Result<()> {
        let context = context.clone();
        let Some(_guard) = self.gate.acquire(context.await_operation, token).await? else {
            debug!("show({}) dropped: navigation already in transition", index);
            return Ok(());
        };

        let (previous, target) = {
            let mut state = self.state.lock();
            let Some(target) = state.get(index) else {
                return Err(Error::invalid_argument(format!(
                    "page index {} is out of range (registered: {})",
                    index,
                    state.len(),
                )));
            };
            if state.is_active(&target) {
                return Ok(());
            }
            let previous = state.set_active(target.clone());
            (previous, target)
        };

        debug!(
            "showing page at index {} (had previous: {})",
            index,
            previous.is_some()
        );
        run_swap_transition(&self.events, previous, target, context, token).await
    }

    /// Deactivate the current page, leaving no page active.
    ///
    /// The active slot is cleared before the outgoing page's
    /// `on_navigated_from` is awaited, so a concurrent `show` observes "no
    /// active page" mid-hide. Fails with [`Error::NoActivePage`] when
    /// nothing is active.
    pub async fn hide(&self, context: &NavigationContext, token: &CancellationToken) -> Result<()> {
        let context = context.clone();
        if self.state.lock().active().is_none() {
            return Err(Error::NoActivePage);
        }

        let Some(_guard) = self.gate.acquire(context.await_operation, token).await? else {
            debug!("hide dropped: navigation already in transition");
            return Ok(());
        };

        // A transition that ran during a Sequential wait may have cleared
        // the slot already; hiding nothing is then a silent no-op.
        let Some(outgoing) = self.state.lock().take_active() else {
            return Ok(());
        };

        debug!("hiding active page");
        let event = NavigationEvent {
            previous: None,
            current: outgoing.clone(),
        };
        self.events.emit_navigating(&event);
        outgoing.on_navigated_from(&context, token).await?;
        self.events.emit_navigated(&event);
        Ok(())
    }
}
