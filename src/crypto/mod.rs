//! Hashing of candidate codes and the memoized access code digest.

pub mod digest;
pub mod secret;
