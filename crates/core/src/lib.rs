#![forbid(unsafe_code)]

pub mod badges;
pub mod error;
pub mod model;
pub mod time;

pub use badges::{BadgeEntry, DisplayBadge, merge_user_badges};
pub use error::Error;
