use crate::axis_order::{AxisOrder, ShapeDict};
use crate::dtype::DType;
use crate::graph::Link;
use crate::ir_graph::{IrGraphError, OperatorId, VariableId};
use crate::node::{IrNode, NodeBase};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Tensor-shaped value flowing between operators.
///
/// `input_to` and `output_from` are written only by the link protocol on
/// [`IrGraph`](crate::ir_graph::IrGraph). Deserialization runs the same shape checks as
/// construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "VariableSnapshot")]
pub struct Variable {
    id: VariableId,
    base: NodeBase,
    name: Option<String>,
    shape: Vec<usize>,
    axis_order: AxisOrder,
    dtype: DType,
    pub(super) input_to: HashSet<OperatorId>,
    pub(super) output_from: Option<OperatorId>,
}

impl Variable {
    pub(super) fn new(
        id: VariableId,
        shape: Vec<usize>,
        axis_order: AxisOrder,
    ) -> Result<Self, IrGraphError> {
        if axis_order.ndim() != shape.len() {
            return Err(IrGraphError::AxisCountMismatch {
                order: axis_order,
                ndim: axis_order.ndim(),
                shape_len: shape.len(),
            });
        }
        let dtype = DType::default();
        check_byte_size(&shape, dtype)?;
        Ok(Self {
            id,
            base: NodeBase::default(),
            name: None,
            shape,
            axis_order,
            dtype,
            input_to: HashSet::new(),
            output_from: None,
        })
    }

    pub fn id(&self) -> VariableId {
        self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Element count. Construction guarantees it fits in `usize`.
    pub fn size(&self) -> usize {
        self.shape.iter().product()
    }

    pub fn axis_order(&self) -> AxisOrder {
        self.axis_order
    }

    pub fn shape_dict(&self) -> ShapeDict {
        self.axis_order.shape_dict(&self.shape)
    }

    pub fn dtype(&self) -> DType {
        self.dtype
    }

    /// Fails if the shape would no longer be addressable in bytes with the wider element type.
    pub fn set_dtype(&mut self, dtype: DType) -> Result<(), IrGraphError> {
        check_byte_size(&self.shape, dtype)?;
        self.dtype = dtype;
        Ok(())
    }

    pub fn byte_size(&self) -> usize {
        self.size() * self.dtype.size()
    }

    pub fn input_to(&self) -> &HashSet<OperatorId> {
        &self.input_to
    }

    pub fn output_from(&self) -> Option<OperatorId> {
        self.output_from
    }

    pub fn is_unlinked(&self) -> bool {
        self.input_to.is_empty() && self.output_from.is_none()
    }

    /// Reinterprets the shape under another axis order.
    ///
    /// Axes present in both orders keep their size, axes new to `axis_order` get size 1, and axes
    /// missing from `axis_order` must already have size 1. Only the shape metadata changes; the
    /// caller is responsible for permuting any materialized data to match.
    pub fn change_axis_order(&mut self, axis_order: AxisOrder) -> Result<(), IrGraphError> {
        let current = self.shape_dict();
        if let Some((axis, size)) = current
            .iter()
            .find(|(axis, size)| !axis_order.contains(*axis) && *size != 1)
        {
            return Err(IrGraphError::NonUnitAxisDropped { axis, size });
        }
        let shape: Vec<usize> = axis_order
            .axes()
            .iter()
            .map(|axis| current.get(*axis).unwrap_or(1))
            .collect();

        log::debug!(
            "Variable {}: axis order {} {:?} -> {} {:?}",
            self.id,
            self.axis_order,
            self.shape,
            axis_order,
            shape
        );
        self.axis_order = axis_order;
        self.shape = shape;
        Ok(())
    }
}

fn check_byte_size(shape: &[usize], dtype: DType) -> Result<usize, IrGraphError> {
    if shape.contains(&0) {
        return Ok(0);
    }
    shape
        .iter()
        .try_fold(dtype.size(), |acc, &dim| acc.checked_mul(dim))
        .ok_or_else(|| IrGraphError::SizeOverflow {
            shape: shape.to_vec(),
            dtype,
        })
}

#[derive(Deserialize)]
struct VariableSnapshot {
    id: VariableId,
    base: NodeBase,
    name: Option<String>,
    shape: Vec<usize>,
    axis_order: AxisOrder,
    dtype: DType,
    input_to: HashSet<OperatorId>,
    output_from: Option<OperatorId>,
}

impl TryFrom<VariableSnapshot> for Variable {
    type Error = IrGraphError;

    fn try_from(snapshot: VariableSnapshot) -> Result<Self, Self::Error> {
        let mut variable = Variable::new(snapshot.id, snapshot.shape, snapshot.axis_order)?;
        variable.set_dtype(snapshot.dtype)?;
        variable.base = snapshot.base;
        variable.name = snapshot.name;
        variable.input_to = snapshot.input_to;
        variable.output_from = snapshot.output_from;
        Ok(variable)
    }
}

impl IrNode for Variable {
    fn base(&self) -> &NodeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut NodeBase {
        &mut self.base
    }
}

impl Link<VariableId> for Variable {
    fn link_id(&self) -> VariableId {
        self.id
    }
}

impl std::fmt::Display for Variable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<Variable shape={:?}, order=\"{}\">", self.shape, self.axis_order)
    }
}
