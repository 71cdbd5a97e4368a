pub mod attribute;
pub mod axis_order;
pub mod dtype;
pub mod graph;
pub mod ir_graph;
pub mod node;

pub use attribute::Attribute;
pub use axis_order::{Axis, AxisOrder, ShapeDict};
pub use dtype::DType;
pub use ir_graph::{ErrorKind, IrGraph, IrGraphError, Operator, OperatorId, Variable, VariableId};
pub use node::{IrNode, ParameterValue};
