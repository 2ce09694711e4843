//! # Shared building blocks
//!
//! Types shared by every crate in the workspace.
//!
//! * **[`card`]**: the [`card::CardRecord`] domain model.
//! * **[`config`]**: runtime knobs of the comparison engine.
//! * **[`error`]**: the [`error::CompareError`] type.
//! * **Ports** ([`catalog`], [`storage`], [`notify`], [`sanitize`]): traits the engine
//!   depends on and the adapters implement. No concrete IO lives here.

pub mod card;
pub mod catalog;
pub mod config;
pub mod error;
pub mod notify;
pub mod print;
pub mod sanitize;
pub mod storage;
