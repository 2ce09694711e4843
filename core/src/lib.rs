//! # Comparison engine
//!
//! Keeps a bounded set of selected cards consistent across every surface that
//! shows it, and renders that set side by side through a declarative schema.
//!
//! * **[`store`]**: the [`store::SelectionStore`], single source of truth for the selection.
//! * **[`signal`]**: the [`signal::SignalBus`] connecting the store to the pill.
//! * **[`debounce`]**: keyed debounce timers with explicit cancel handles.
//! * **[`search`]**: per-slot debounced catalog search.
//! * **[`schema`]**: which card fields are comparable and how each is rendered.
//! * **[`sanitize`]**: the allow-list HTML sanitizer.
//! * **[`render`]**: grid and detail views built from the schema.
//! * **[`affordances`]**: the floating pill and the per-card toggle.
//! * **[`session`]**: one open comparison surface.
//!
//! Everything outside the engine (catalog, storage, toasts) is reached through the
//! port traits in `cardcompare_common`.

pub mod affordances;
pub mod debounce;
pub mod path;
pub mod render;
pub mod sanitize;
pub mod schema;
pub mod search;
pub mod session;
pub mod signal;
pub mod store;

#[cfg(test)]
pub(crate) mod fakes;
