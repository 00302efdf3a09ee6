//! Settlement generation algorithms
//!
//! - Walled town layout with retry-bounded building placement
//! - A*-based road network between the town's anchor nodes

pub mod roads;
pub mod town;

pub use roads::*;
pub use town::*;
