//! The timeline widget and its input handling.

pub mod input;
mod timeline;

pub use input::TimelineEvent;
pub use timeline::{SiteGuard, SiteLock, Timeline, TimelineHost};
