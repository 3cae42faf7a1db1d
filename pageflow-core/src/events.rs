//! Ordered observer notifications
//!
//! Collaborators (visual hosts, resource managers) observe the orchestrators
//! through four notifications: `page_attached`, `page_detached`, `navigating`
//! and `navigated`. Observers are plain callbacks invoked synchronously, in
//! registration order, on the task driving the operation. The orchestrators
//! never hold their state lock while observers run, so an observer may call
//! back into the orchestrator's accessors.

use crate::page::PageRef;
use parking_lot::Mutex;
use std::sync::Arc;

/// Payload of the `navigating`/`navigated` notifications.
///
/// For show/push transitions `previous` is the outgoing active page (if any)
/// and `current` the incoming one. For hide/pop transitions `previous` is
/// `None` and `current` carries the outgoing page.
#[derive(Clone)]
pub struct NavigationEvent {
    /// Page that was active before the transition, if any.
    pub previous: Option<PageRef>,
    /// Page the transition is about.
    pub current: PageRef,
}

type PageObserver = Arc<dyn Fn(&PageRef) + Send + Sync>;
type TransitionObserver = Arc<dyn Fn(&NavigationEvent) + Send + Sync>;

/// Registered observer lists shared by both orchestrator variants.
#[derive(Default)]
pub(crate) struct EventBus {
    page_attached: Mutex<Vec<PageObserver>>,
    page_detached: Mutex<Vec<PageObserver>>,
    navigating: Mutex<Vec<TransitionObserver>>,
    navigated: Mutex<Vec<TransitionObserver>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_page_attached<F>(&self, observer: F)
    where
        F: Fn(&PageRef) + Send + Sync + 'static,
    {
        self.page_attached.lock().push(Arc::new(observer));
    }

    pub fn on_page_detached<F>(&self, observer: F)
    where
        F: Fn(&PageRef) + Send + Sync + 'static,
    {
        self.page_detached.lock().push(Arc::new(observer));
    }

    pub fn on_navigating<F>(&self, observer: F)
    where
        F: Fn(&NavigationEvent) + Send + Sync + 'static,
    {
        self.navigating.lock().push(Arc::new(observer));
    }

    pub fn on_navigated<F>(&self, observer: F)
    where
        F: Fn(&NavigationEvent) + Send + Sync + 'static,
    {
        self.navigated.lock().push(Arc::new(observer));
    }

    pub fn emit_page_attached(&self, page: &PageRef) {
        // Clone out of the lock so observers can re-enter the bus.
        let observers = self.page_attached.lock().clone();
        for observer in observers {
            observer(page);
        }
    }

    pub fn emit_page_detached(&self, page: &PageRef) {
        let observers = self.page_detached.lock().clone();
        for observer in observers {
            observer(page);
        }
    }

    pub fn emit_navigating(&self, event: &NavigationEvent) {
        let observers = self.navigating.lock().clone();
        for observer in observers {
            observer(event);
        }
    }

    pub fn emit_navigated(&self, event: &NavigationEvent) {
        let observers = self.navigated.lock().clone();
        for observer in observers {
            observer(event);
        }
    }
}
