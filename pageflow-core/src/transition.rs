//! Transition gate: the Idle/Transitioning state machine
//!
//! Each orchestrator owns one gate. A transition enters `Transitioning` by
//! acquiring the gate and returns to `Idle` when the returned guard drops,
//! which happens on the success, error, and cancellation paths alike. The
//! gate is the sole concurrency guard; there is no queue and no per-page
//! lock.
//!
//! Acquisition uses compare-and-swap, and `Sequential` waiters are
//! registered with the notifier before the busy flag is re-checked, so the
//! check-then-wait sequence cannot lose a release even on a multi-threaded
//! runtime. Wake order among several `Sequential` waiters is whichever
//! waiter wins the re-acquire race, not FIFO.

use crate::events::{EventBus, NavigationEvent};
use crate::page::PageRef;
use crate::{AwaitOperation, Error, NavigationContext, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Notify;
use tokio::task::JoinError;
use tokio_util::sync::CancellationToken;

#[derive(Debug)]
pub(crate) struct TransitionGate {
    busy: AtomicBool,
    idle: Notify,
}

impl Default for TransitionGate {
    fn default() -> Self {
        Self::new()
    }
}

impl TransitionGate {
    pub fn new() -> Self {
        Self {
            busy: AtomicBool::new(false),
            idle: Notify::new(),
        }
    }

    /// Whether a transition is currently executing.
    pub fn is_transitioning(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Try to enter `Transitioning`, resolving collisions per `policy`.
    ///
    /// Returns `Ok(Some(guard))` once the transition may proceed,
    /// `Ok(None)` when the `Drop` policy discards the request, and an error
    /// for the `Error` policy or a cancelled `Sequential` wait.
    pub async fn acquire(
        &self,
        policy: AwaitOperation,
        token: &CancellationToken,
    ) -> Result<Option<TransitionGuard<'_>>> {
        loop {
            // Register the waiter before re-checking; a release landing
            // between the failed swap and the select would otherwise find no
            // waiter to wake and leave this caller parked on an idle gate.
            let idle = self.idle.notified();
            tokio::pin!(idle);
            idle.as_mut().enable();

            if self
                .busy
                .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
                .is_ok()
            {
                return Ok(Some(TransitionGuard { gate: self }));
            }

            match policy {
                AwaitOperation::Drop => return Ok(None),
                AwaitOperation::Error => return Err(Error::NavigationInProgress),
                AwaitOperation::Sequential => {
                    tokio::select! {
                        _ = &mut idle => {}
                        _ = token.cancelled() => return Err(Error::Cancelled),
                    }
                }
            }
        }
    }
}

/// Scoped `Transitioning` marker; dropping it returns the gate to `Idle` and
/// wakes every `Sequential` waiter.
#[derive(Debug)]
pub(crate) struct TransitionGuard<'a> {
    gate: &'a TransitionGate,
}

impl Drop for TransitionGuard<'_> {
    fn drop(&mut self) {
        self.gate.busy.store(false, Ordering::Release);
        self.gate.idle.notify_waiters();
    }
}

/// Run the enter/leave half of a transition after the active slot has
/// already been swapped.
///
/// Both hooks are spawned as tasks so they execute concurrently and keep
/// running even if the requesting future is dropped. The `navigating` event
/// fires after both tasks have been started but before they are awaited;
/// `navigated` fires only once both complete. On failure the leave-hook
/// result is surfaced first.
pub(crate) async fn run_swap_transition(
    events: &EventBus,
    previous: Option<PageRef>,
    current: PageRef,
    context: NavigationContext,
    token: &CancellationToken,
) -> Result<()> {
    let from_task = previous.clone().map(|page| {
        let context = context.clone();
        let token = token.clone();
        tokio::spawn(async move { page.on_navigated_from(&context, &token).await })
    });
    let to_task = {
        let page = current.clone();
        let token = token.clone();
        tokio::spawn(async move { page.on_navigated_to(&context, &token).await })
    };

    let event = NavigationEvent {
        previous,
        current,
    };
    events.emit_navigating(&event);

    let from_result = match from_task {
        Some(task) => flatten_hook_result(task.await),
        None => Ok(()),
    };
    let to_result = flatten_hook_result(to_task.await);
    from_result.and(to_result)?;

    events.emit_navigated(&event);
    Ok(())
}

fn flatten_hook_result(joined: std::result::Result<Result<()>, JoinError>) -> Result<()> {
    joined.unwrap_or_else(|err| Err(Error::internal(format!("lifecycle hook task failed: {err}"))))
}
