//! `margin-app`
//!
//! **Responsibility:** keep the product form, the product list and the
//! dashboard statistics consistent while the user creates, edits, deletes and
//! searches products.
//!
//! This crate provides:
//! - [`FormController`]: the edit buffer, live preview, validation and save
//! - [`ListController`]: the displayed collection, search and delete
//! - [`Dashboard`]: portfolio totals that follow the displayed collection
//! - [`Orchestrator`]: who is being edited and when everything must refresh
//!
//! Rendering is left to the host; controllers expose plain view-models.

pub mod dashboard;
pub mod form;
pub mod format;
pub mod list;
pub mod notify;
pub mod orchestrator;

#[cfg(test)]
pub(crate) mod testing;

pub use dashboard::Dashboard;
pub use form::{FormController, FormMode, FormSignal};
pub use format::{ProductRow, format_currency, format_percentage};
pub use list::{ListController, ListView};
pub use notify::{LogNotifier, Notifier};
pub use orchestrator::{Orchestrator, RefreshToken};
