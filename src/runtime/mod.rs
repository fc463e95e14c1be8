mod class;
mod compare;
mod context;
mod errors;
mod interpreter;
mod object;

pub use class::{ClassPtr, InstancePtr, Method};
pub use compare::{equal, greater, greater_or_equal, less, less_or_equal, not_equal};
pub use context::{Context, WriterContext};
pub use errors::{RuntimeError, RuntimeResult};
pub use interpreter::execute_program;
pub use object::{Closure, Object};
