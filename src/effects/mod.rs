//! Effect system.
//!
//! - `Effect`: one state change with its targets fixed
//! - `ActionResolver`: card play to effect list
//! - `apply_effects`: applies a list, suspending on effects that need input

pub mod effect;
pub mod resolver;
pub mod apply;

pub use effect::{Effect, EffectList};
pub use resolver::ActionResolver;
pub use apply::{apply_effects, Resolution};
