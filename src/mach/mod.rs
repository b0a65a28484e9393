/*!
# Formula Virtual Machine Module

This module compiles arithmetic formulas to postfix programs and
executes them on a stack machine.

Compiling is a three-stage cycle: `compile` translates source text,
`validate` proves the program's stack discipline statically, and `eval`
runs it. Evaluation is generic over a [`Value`] domain, so the same
program computes a single `f64` or a whole [`Batch`] per run.

*/

pub type Address = usize;

mod compile;
mod function;
mod listing;
mod opcode;
mod operation;
mod program;
mod runtime;
mod symbol;
mod value;

pub(crate) use compile::compile;
pub use function::Function;
pub use listing::Listing;
pub use opcode::Opcode;
pub use operation::Operation;
pub use program::Program;
pub use runtime::Formula;
pub use symbol::{FuncEntry, OperEntry, Symbols};
pub use value::{Batch, Value};
