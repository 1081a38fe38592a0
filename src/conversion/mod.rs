//! Marshalling between host values and engine buffers.
//!
//! Everything here runs before an engine call: a conversion either completes
//! or fails without the engine ever seeing a partial buffer.

pub mod buffer;
pub mod operands;
pub mod selector;

pub use buffer::{
    EdgeList, Matrix, count_arg, float_buffer, floats_to_values, index_buffer, int_buffer,
    ints_to_values, vertex_count_arg,
};
pub use operands::GraphOperands;
pub use selector::{Reply, ResolvedSelector, Selector};
