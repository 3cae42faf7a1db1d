//! Core navigation orchestration engine for Pageflow
//!
//! This crate manages ordered collections of pages (navigable units with
//! asynchronous enter/leave hooks) and drives transitions between them. Two
//! orchestrator variants share the same primitives: [`NavigationSheet`]
//! navigates a fixed pool of pages by index, [`NavigationStack`] pushes and
//! pops factory-produced pages with the top as the active page.
//!
//! Overlapping requests against one orchestrator are serialized by a
//! per-instance transition gate; each request chooses how a collision is
//! resolved through its [`NavigationContext`] ([`AwaitOperation`]:
//! `Sequential`, `Drop` or `Error`). Collaborators such as visual hosts and
//! resource managers observe the orchestrators through ordered, synchronous
//! notifications and never mutate orchestrator state directly.
//!
//! # Examples
//!
//! ```no_run
//! use pageflow_core::{NavigationContext, NavigationSheet, PageRef};
//! use tokio_util::sync::CancellationToken;
//!
//! async fn navigate(sheet: &NavigationSheet, menu: PageRef, settings: PageRef) {
//!     let token = CancellationToken::new();
//!     sheet.add(menu, &token).await.unwrap();
//!     sheet.add(settings, &token).await.unwrap();
//!
//!     sheet.show(1, &NavigationContext::new(), &token).await.unwrap();
//!     sheet.hide(&NavigationContext::new(), &token).await.unwrap();
//! }
//! ```

pub mod context;
pub mod error;
pub mod events;
pub mod page;
pub mod sheet;
pub mod stack;

mod registry;
mod transition;

pub use context::{AwaitOperation, NavigationContext};
pub use error::{Error, Result};
pub use events::NavigationEvent;
pub use page::{same_page, Page, PageLifecycle, PageRef};
pub use sheet::NavigationSheet;
pub use stack::NavigationStack;
