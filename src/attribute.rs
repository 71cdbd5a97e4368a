use serde::{Deserialize, Serialize};

/// Capability tags a pass can attach to a node. Tags carry no data; the axis order of a
/// variable lives in its own typed field.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize, strum_macros::Display)]
pub enum Attribute {
    /// Output element depends only on the input elements at the same index.
    Elementwise,
    /// Output may reuse the buffer of an input.
    Inplace,
    /// Operator consumes constant weight variables.
    HaveWeights,
    /// Operator works along a single axis of its input.
    Axiswise,
    /// An elementwise operator may be fused after this one.
    PostElementwise,
    /// An axiswise operator may be fused after this one.
    PostAxiswise,
    /// Variable is fed from outside the graph.
    Input,
    /// Variable is read back after the graph runs.
    Output,
    /// Variable holds data known at conversion time.
    Constant,
}
