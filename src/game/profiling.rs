//! Function timing for the editor-side asset work.
//!
//! `#[profile]` is a no-op unless the crate is built with `--features perf_stats`.

pub use bastion_macros::profile;
