//! Stream combinators for snapshot delivery.

mod pace;

pub use pace::{Paced, PaceExt};
