//! Ordered page collection and the active-page slot
//!
//! `PageRegistry` is the shared mutable state both orchestrators guard with a
//! single mutex: the insertion-ordered collection of registered pages (the
//! tail is the stack variant's "top") and the zero-or-one active page. All
//! methods are synchronous; callers never hold the surrounding lock across an
//! await point.

use crate::page::{same_page, PageRef};

#[derive(Default)]
pub(crate) struct PageRegistry {
    pages: Vec<PageRef>,
    active: Option<PageRef>,
}

impl PageRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, page: &PageRef) -> bool {
        self.pages.iter().any(|p| same_page(p, page))
    }

    /// Append a page. Duplicate checks are the caller's responsibility.
    pub fn insert(&mut self, page: PageRef) {
        self.pages.push(page);
    }

    /// Remove a page, clearing the active slot if it pointed at the removed
    /// page. Returns false when the page was not registered.
    pub fn remove(&mut self, page: &PageRef) -> bool {
        let Some(position) = self.pages.iter().position(|p| same_page(p, page)) else {
            return false;
        };
        self.pages.remove(position);
        if self.active.as_ref().is_some_and(|a| same_page(a, page)) {
            self.active = None;
        }
        true
    }

    pub fn get(&self, index: usize) -> Option<PageRef> {
        self.pages.get(index).cloned()
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn snapshot(&self) -> Vec<PageRef> {
        self.pages.clone()
    }

    pub fn top(&self) -> Option<PageRef> {
        self.pages.last().cloned()
    }

    /// Remove and return the top page, clearing the active slot if the top
    /// was active. Returns the page and whether it was the active one.
    pub fn pop_top(&mut self) -> Option<(PageRef, bool)> {
        let page = self.pages.pop()?;
        let was_active = self.active.as_ref().is_some_and(|a| same_page(a, &page));
        if was_active {
            self.active = None;
        }
        Some((page, was_active))
    }

    pub fn active(&self) -> Option<PageRef> {
        self.active.clone()
    }

    pub fn is_active(&self, page: &PageRef) -> bool {
        self.active.as_ref().is_some_and(|a| same_page(a, page))
    }

    pub fn set_active(&mut self, page: PageRef) -> Option<PageRef> {
        self.active.replace(page)
    }

    pub fn take_active(&mut self) -> Option<PageRef> {
        self.active.take()
    }

    /// Clear the collection and the active slot, returning the pages that
    /// were registered (in insertion order).
    pub fn clear_all(&mut self) -> Vec<PageRef> {
        self.active = None;
        std::mem::take(&mut self.pages)
    }
}
