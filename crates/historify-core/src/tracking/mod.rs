//! Change tracking for base entities

mod tracked;

pub use tracked::Tracked;
