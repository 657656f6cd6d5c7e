//! # Light-set algebra.
//!
//! [`LightSet`] is a value type over positive light ids with two sentinels:
//! the universal set ("all lights", including ones not known yet) and the
//! empty set ("no lights").

mod set;

pub use set::LightSet;
