//! Hook system for extensibility
//!
//! Allows users to run custom scripts at key points of the replacement:
//! - pre-replace: Before the previous release is deleted
//! - post-publish: After the replacement release is created

pub mod executor;
pub mod lifecycle;

pub use executor::HookExecutor;
pub use lifecycle::{HookContext, HookType};
