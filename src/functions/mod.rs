//! Function variants implementing [`DomainFunction`](crate::core::DomainFunction).
//!
//! [`FunctionNode`] closes the set: continuous signals, fixed-step samples, rotor
//! reconstructions, merges, and display wrappers.

mod discrete;
mod merged;
mod node;
mod rotor_states;
mod signal;
mod wrapped;

pub use discrete::DiscreteFunction;
pub use merged::MergedFunction;
pub use node::{FunctionKind, FunctionNode};
pub use rotor_states::RotorStatesFunction;
pub use signal::{SignalEvaluator, SignalFunction};
pub use wrapped::WrappedFunction;
