//! Cross-component scenarios for `cardcompare-core`, driven through in-memory
//! ports from [`support`].

pub mod support;

#[cfg(test)]
mod comparison;
#[cfg(test)]
mod search;
