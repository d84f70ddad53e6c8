//! Domain logic - pure business rules independent of host transport

pub mod event;
pub mod release;
pub mod slug;
pub mod tag;
pub mod template;

pub use event::TriggerEvent;
pub use release::{ReleaseRecord, ReleaseRequest};
pub use slug::RepoSlug;
pub use tag::FloatingTag;
pub use template::BodyTemplate;
