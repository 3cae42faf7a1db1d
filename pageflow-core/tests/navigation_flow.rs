//! End-to-end navigation scenarios exercising both orchestrator variants
//! through their public surface, with observers resolving page identities
//! the way a visual host would.

use async_trait::async_trait;
use parking_lot::Mutex;
use pageflow_core::{
    same_page, NavigationContext, NavigationSheet, NavigationStack, Page, PageLifecycle, PageRef,
    Result,
};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

type Log = Arc<Mutex<Vec<String>>>;

struct ScriptedPage {
    name: &'static str,
    log: Log,
}

impl ScriptedPage {
    fn new(name: &'static str, log: &Log) -> PageRef {
        Arc::new(Self {
            name,
            log: log.clone(),
        })
    }
}

#[async_trait]
impl Page for ScriptedPage {
    async fn on_navigated_to(
        &self,
        _context: &NavigationContext,
        _token: &CancellationToken,
    ) -> Result<()> {
        self.log.lock().push(format!("{}:to", self.name));
        Ok(())
    }

    async fn on_navigated_from(
        &self,
        _context: &NavigationContext,
        _token: &CancellationToken,
    ) -> Result<()> {
        self.log.lock().push(format!("{}:from", self.name));
        Ok(())
    }

    fn lifecycle(&self) -> Option<&dyn PageLifecycle> {
        Some(self)
    }
}

#[async_trait]
impl PageLifecycle for ScriptedPage {
    async fn on_attached(&self, _token: &CancellationToken) -> Result<()> {
        self.log.lock().push(format!("{}:attached", self.name));
        Ok(())
    }

    async fn on_detached(&self, _token: &CancellationToken) -> Result<()> {
        self.log.lock().push(format!("{}:detached", self.name));
        Ok(())
    }
}

/// Resolves a page handle back to its scripted name.
fn name_of(page: &PageRef, known: &[(PageRef, &'static str)]) -> &'static str {
    known
        .iter()
        .find(|(candidate, _)| same_page(candidate, page))
        .map(|(_, name)| *name)
        .unwrap_or("?")
}

fn observe_sheet(sheet: &NavigationSheet, known: Vec<(PageRef, &'static str)>, log: &Log) {
    let navigating_log = log.clone();
    let navigating_known = known.clone();
    sheet.on_navigating(move |event| {
        let previous = event
            .previous
            .as_ref()
            .map(|page| name_of(page, &navigating_known))
            .unwrap_or("none");
        let current = name_of(&event.current, &navigating_known);
        navigating_log
            .lock()
            .push(format!("navigating({previous},{current})"));
    });

    let navigated_log = log.clone();
    sheet.on_navigated(move |event| {
        let previous = event
            .previous
            .as_ref()
            .map(|page| name_of(page, &known))
            .unwrap_or("none");
        let current = name_of(&event.current, &known);
        navigated_log
            .lock()
            .push(format!("navigated({previous},{current})"));
    });
}

#[tokio::test]
async fn sheet_show_sequence_matches_contract() {
    let log: Log = Arc::new(Mutex::new(Vec::new()));
    let sheet = NavigationSheet::new();
    let token = CancellationToken::new();
    let context = NavigationContext::new();

    let a = ScriptedPage::new("a", &log);
    let b = ScriptedPage::new("b", &log);
    let c = ScriptedPage::new("c", &log);
    for page in [&a, &b, &c] {
        sheet.add(page.clone(), &token).await.unwrap();
    }
    observe_sheet(
        &sheet,
        vec![(a.clone(), "a"), (b.clone(), "b"), (c.clone(), "c")],
        &log,
    );
    log.lock().clear();

    // First show: no previous page, so only b's enter hook runs.
    sheet.show(1, &context, &token).await.unwrap();
    assert!(same_page(&sheet.active_page().unwrap(), &b));
    assert_eq!(
        *log.lock(),
        vec!["navigating(none,b)", "b:to", "navigated(none,b)"]
    );
    log.lock().clear();

    // Second show: b leaves and c enters, bracketed by the notifications.
    sheet.show(2, &context, &token).await.unwrap();
    assert!(same_page(&sheet.active_page().unwrap(), &c));

    let entries = log.lock().clone();
    assert_eq!(entries.first().map(String::as_str), Some("navigating(b,c)"));
    assert_eq!(entries.last().map(String::as_str), Some("navigated(b,c)"));
    assert!(entries.contains(&"b:from".to_string()));
    assert!(entries.contains(&"c:to".to_string()));

    // a never took part in any transition.
    assert!(!log.lock().iter().any(|entry| entry.starts_with("a:")));
}

#[tokio::test]
async fn stack_push_push_pop_lifecycle() {
    let log: Log = Arc::new(Mutex::new(Vec::new()));
    let stack = NavigationStack::new();
    let token = CancellationToken::new();
    let context = NavigationContext::new();

    stack
        .push(
            || async { Ok(ScriptedPage::new("a", &log)) },
            &context,
            &token,
        )
        .await
        .unwrap();
    let a = stack.top().unwrap();
    assert_eq!(stack.page_count(), 1);
    assert!(same_page(&stack.active_page().unwrap(), &a));

    stack
        .push(
            || async { Ok(ScriptedPage::new("b", &log)) },
            &context,
            &token,
        )
        .await
        .unwrap();
    let b = stack.top().unwrap();
    assert_eq!(stack.page_count(), 2);
    assert!(same_page(&stack.active_page().unwrap(), &b));
    assert!(log.lock().contains(&"a:from".to_string()));
    assert!(log.lock().contains(&"b:to".to_string()));
    log.lock().clear();

    let detached = Arc::new(Mutex::new(Vec::new()));
    {
        let detached = detached.clone();
        let known = vec![(a.clone(), "a"), (b.clone(), "b")];
        stack.on_page_detached(move |page| detached.lock().push(name_of(page, &known)));
    }

    stack.pop(&context, &token).await.unwrap();
    assert_eq!(stack.page_count(), 1);
    assert!(stack.active_page().is_none());
    assert_eq!(*detached.lock(), vec!["b"]);
    assert_eq!(*log.lock(), vec!["b:from", "b:detached"]);
}

#[tokio::test]
async fn sheet_remove_all_detaches_everything() {
    let log: Log = Arc::new(Mutex::new(Vec::new()));
    let sheet = NavigationSheet::new();
    let token = CancellationToken::new();

    for name in ["a", "b", "c"] {
        sheet
            .add(ScriptedPage::new(name, &log), &token)
            .await
            .unwrap();
    }
    sheet
        .show(0, &NavigationContext::new(), &token)
        .await
        .unwrap();

    sheet.remove_all(&token).await.unwrap();
    assert_eq!(sheet.page_count(), 0);
    assert!(sheet.active_page().is_none());

    let entries = log.lock().clone();
    for name in ["a", "b", "c"] {
        assert!(entries.contains(&format!("{name}:detached")));
    }
}
