//! # Outbound adapters
//!
//! Concrete implementations of the ports declared in `cardcompare_common`.
//!
//! * [`storage::FileStorage`]: durable storage as one file per key.
//! * [`catalog::JsonCatalog`]: the card catalog read from a JSON file.
//! * [`notifier::TerminalNotifier`]: toasts rendered as log lines.

pub mod catalog;
pub mod notifier;
pub mod storage;
