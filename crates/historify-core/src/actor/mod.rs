//! Actor resolution for history rows

mod resolver;

pub use resolver::{ActorResolver, MANUAL_ACTOR};
