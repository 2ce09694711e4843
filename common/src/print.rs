//! Logging macros with dedicated targets.
//!
//! They are plain `tracing` events routed through this crate, so callers need no
//! `tracing` dependency of their own. The CLI formatter picks a symbol per target.

#[doc(hidden)]
pub use tracing as __tracing;

pub const SUCCESS_TARGET: &str = "cardcompare::success";
pub const NOTICE_TARGET: &str = "cardcompare::notice";

#[macro_export]
macro_rules! success {
    ($($arg:tt)*) => {
        $crate::print::__tracing::info!(target: $crate::print::SUCCESS_TARGET, $($arg)*)
    };
}

#[macro_export]
macro_rules! notice {
    ($($arg:tt)*) => {
        $crate::print::__tracing::info!(target: $crate::print::NOTICE_TARGET, $($arg)*)
    };
}
