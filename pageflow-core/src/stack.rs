//! Stack-addressed navigation orchestrator
//!
//! A [`NavigationStack`] grows by pushing pages produced by asynchronous
//! factories and shrinks by popping the top. The active page is always the
//! most recently pushed one; popping removes and detaches the top without
//! activating the page underneath (see [`pop`] for the exact contract).
//!
//! Push reuses the sheet's attach sequence (attached notification, optional
//! `on_attached` hook, then insertion) followed by the same two-sided
//! transition `show` performs; pop mirrors `hide` followed by the detach
//! sequence of `remove`.
//!
//! [`pop`]: NavigationStack::pop

use crate::events::{EventBus, NavigationEvent};
use crate::page::PageRef;
use crate::registry::PageRegistry;
use crate::transition::{run_swap_transition, TransitionGate};
use crate::{Error, NavigationContext, Result};
use parking_lot::Mutex;
use std::future::Future;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Orchestrator over a stack of pages; the top page is the active one.
#[derive(Default)]
pub struct NavigationStack {
    state: Mutex<PageRegistry>,
    gate: TransitionGate,
    events: EventBus,
}

impl NavigationStack {
    /// Create an empty stack
    pub fn new() -> Self {
        Self {
            state: Mutex::new(PageRegistry::new()),
            gate: TransitionGate::new(),
            events: EventBus::new(),
        }
    }

    /// Snapshot of the stacked pages, bottom first
    pub fn pages(&self) -> Vec<PageRef> {
        self.state.lock().snapshot()
    }

    /// Number of stacked pages
    pub fn page_count(&self) -> usize {
        self.state.lock().len()
    }

    /// The page on top of the stack, if any
    pub fn top(&self) -> Option<PageRef> {
        self.state.lock().top()
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

    /// Push a page produced by an asynchronous factory and make it active.
    ///
    /// The factory runs inside the transition gate, so overlapping pushes
    /// serialize around factory execution as well; a factory error releases
    /// the gate and propagates to the caller unchanged. The produced page
    /// goes through the attach sequence (attached notification, optional
    /// `on_attached`, insertion as the new top) and then transitions exactly
    /// like a sheet `show`: the previous top's `on_navigated_from` and the
    /// new page's `on_navigated_to` run concurrently between the
    /// `navigating` and `navigated` notifications.
    pub async fn push<F, Fut>(
        &self,
        factory: F,
        context: &NavigationContext,
        token: &CancellationToken,
    ) -> Result<()>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<PageRef>>,
    {
        let context = context.clone();
        let Some(_guard) = self.gate.acquire(context.await_operation, token).await? else {
            debug!("push dropped: navigation already in transition");
            return Ok(());
        };

        let page = factory().await?;
        if self.state.lock().contains(&page) {
            return Err(Error::invalid_argument("page is already on the stack"));
        }

        self.events.emit_page_attached(&page);
        if let Some(lifecycle) = page.lifecycle() {
            lifecycle.on_attached(token).await?;
        }

        let previous = {
            let mut state = self.state.lock();
            state.insert(page.clone());
            state.set_active(page.clone())
        };

        debug!(
            "pushing page (depth: {}, had previous: {})",
            self.page_count(),
            previous.is_some()
        );
        run_swap_transition(&self.events, previous, page, context, token).await
    }

    /// Push an already-built page.
    pub async fn push_page(
        &self,
        page: PageRef,
        context: &NavigationContext,
        token: &CancellationToken,
    ) -> Result<()> {
        self.push(move || async move { Ok(page) }, context, token).await
    }

    /// Remove the top page from the stack.
    ///
    /// The top is removed and the active slot cleared synchronously; if the
    /// top was the active page, the hide sequence runs against it
    /// (`navigating`, `on_navigated_from`, `navigated`), and afterwards the
    /// detach sequence (detached notification, `on_detached`). Popping does
    /// not activate the page underneath; the stack is left with no active
    /// page until the next push. Fails with [`Error::EmptyStack`] when
    /// nothing is stacked.
    pub async fn pop(&self, context: &NavigationContext, token: &CancellationToken) -> Result<()> {
        let context = context.clone();
        if self.state.lock().is_empty() {
            return Err(Error::EmptyStack);
        }

        let Some(_guard) = self.gate.acquire(context.await_operation, token).await? else {
            debug!("pop dropped: navigation already in transition");
            return Ok(());
        };

        // Re-checked: a transition during a Sequential wait may have emptied
        // the stack.
        let Some((top, was_active)) = self.state.lock().pop_top() else {
            return Err(Error::EmptyStack);
        };

        debug!(
            "popping page (depth: {}, was active: {})",
            self.page_count(),
            was_active
        );

        if was_active {
            let event = NavigationEvent {
                previous: None,
                current: top.clone(),
            };
            self.events.emit_navigating(&event);
            top.on_navigated_from(&context, token).await?;
            self.events.emit_navigated(&event);
        }

        self.events.emit_page_detached(&top);
        if let Some(lifecycle) = top.lifecycle() {
            lifecycle.on_detached(token).await?;
        }
        Ok(())
    }
}
