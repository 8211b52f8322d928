//! AI systems (strategic layer logic)

pub mod behavior;

// Re-export all systems
pub use behavior::*;
