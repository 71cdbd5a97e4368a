use whisper_tensor_ir::{Axis, AxisOrder, IrGraph, VariableId};

pub mod links;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Distinct, non-unit size per axis so misplaced axes show up in assertions.
pub fn sample_size(axis: Axis) -> usize {
    match axis {
        Axis::N => 2,
        Axis::C => 3,
        Axis::H => 5,
        Axis::W => 7,
        Axis::T => 11,
    }
}

pub fn sample_shape(order: AxisOrder) -> Vec<usize> {
    order.axes().iter().map(|axis| sample_size(*axis)).collect()
}

pub fn new_variable(graph: &mut IrGraph, order: AxisOrder) -> anyhow::Result<VariableId> {
    Ok(graph.add_variable(&sample_shape(order), order)?)
}
