//! CPU seat driver.
//!
//! - `legal_intents`: everything a seat may submit right now
//! - `CpuPolicy`: picks one of them; `RandomPolicy` picks uniformly
//! - `run_cpu_turns`: caller-side loop that plays CPU seats until a human is
//!   expected

pub mod legal;
pub mod policy;

pub use legal::{legal_intents, MAX_DISCARD_CHOICES};
pub use policy::{run_cpu_turns, CpuPolicy, RandomPolicy};
