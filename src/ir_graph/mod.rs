//! Mutable operator/variable graph that conversion passes rewrite in place.
//!
//! The graph owns every node in an arena and hands out copyable ids. Operators reference
//! variables through named slots; variables carry back-links to their consumers and their single
//! producer. Only the link protocol in [`links`] touches either side of a link, so the two sides
//! cannot drift apart.
use crate::axis_order::AxisOrder;
use crate::dtype::DType;
use crate::graph::InnerGraph;
use crate::node::ParameterValue;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub mod links;
pub mod operator;
pub mod variable;

pub use operator::Operator;
pub use variable::Variable;

/// Coarse classification of [`IrGraphError`], for passes that only care about the failure class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A variable or operator is not registered in the role the caller assumed.
    Lookup,
    /// The call would break the single-writer rule or clobber an existing link.
    Conflict,
    /// Shape and axis order disagree. Passes should treat this as fatal.
    ShapeInvariant,
}

#[derive(Debug, thiserror::Error)]
pub enum IrGraphError {
    #[error("Operator {0} is not part of this graph")]
    UnknownOperator(OperatorId),
    #[error("Variable {0} is not part of this graph")]
    UnknownVariable(VariableId),
    #[error("Variable {variable} is not an input of operator {operator}")]
    NotAnInput {
        operator: OperatorId,
        variable: VariableId,
    },
    #[error("Variable {variable} is not an output of operator {operator}")]
    NotAnOutput {
        operator: OperatorId,
        variable: VariableId,
    },
    #[error("Variable {variable} is already an output of operator {producer}")]
    OutputConflict {
        variable: VariableId,
        producer: OperatorId,
    },
    #[error("Slot \"{slot}\" of operator {operator} is already occupied by variable {occupant}")]
    SlotOccupied {
        operator: OperatorId,
        slot: String,
        occupant: VariableId,
    },
    #[error("Variable {0} is still linked to an operator")]
    VariableInUse(VariableId),
    #[error("Axis order {order} has {ndim} axes but the shape has {shape_len}")]
    AxisCountMismatch {
        order: AxisOrder,
        ndim: usize,
        shape_len: usize,
    },
    #[error("Cannot drop axis {axis} of size {size}, only unit axes can be dropped")]
    NonUnitAxisDropped {
        axis: crate::axis_order::Axis,
        size: usize,
    },
    #[error("Shape {shape:?} of {dtype} elements is too large to address")]
    SizeOverflow { shape: Vec<usize>, dtype: DType },
}

impl IrGraphError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            IrGraphError::UnknownOperator(_)
            | IrGraphError::UnknownVariable(_)
            | IrGraphError::NotAnInput { .. }
            | IrGraphError::NotAnOutput { .. } => ErrorKind::Lookup,
            IrGraphError::OutputConflict { .. }
            | IrGraphError::SlotOccupied { .. }
            | IrGraphError::VariableInUse(_) => ErrorKind::Conflict,
            IrGraphError::AxisCountMismatch { .. }
            | IrGraphError::NonUnitAxisDropped { .. }
            | IrGraphError::SizeOverflow { .. } => ErrorKind::ShapeInvariant,
        }
    }
}

#[derive(Debug, Clone, Copy, Hash, Ord, PartialOrd, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariableId {
    inner: usize,
}

#[derive(Debug, Clone, Copy, Hash, Ord, PartialOrd, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OperatorId {
    inner: usize,
}

impl std::fmt::Display for VariableId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "v{}", self.inner)
    }
}

impl std::fmt::Display for OperatorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "op{}", self.inner)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IrGraph {
    variables: HashMap<VariableId, Variable>,
    operators: HashMap<OperatorId, Operator>,
    next_variable_id: usize,
    next_operator_id: usize,
}

impl IrGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an unlinked variable. Fails if `axis_order` does not have one axis per shape entry.
    pub fn add_variable(
        &mut self,
        shape: &[usize],
        axis_order: AxisOrder,
    ) -> Result<VariableId, IrGraphError> {
        let id = VariableId {
            inner: self.next_variable_id,
        };
        let variable = Variable::new(id, shape.to_vec(), axis_order)?;
        self.next_variable_id += 1;
        self.variables.insert(id, variable);
        Ok(id)
    }

    /// Creates an unlinked operator.
    pub fn add_operator(
        &mut self,
        name: impl Into<String>,
        parameters: Option<HashMap<String, ParameterValue>>,
    ) -> OperatorId {
        let id = OperatorId {
            inner: self.next_operator_id,
        };
        self.next_operator_id += 1;
        self.operators
            .insert(id, Operator::new(id, name.into(), parameters.unwrap_or_default()));
        id
    }

    pub fn variable(&self, id: VariableId) -> Result<&Variable, IrGraphError> {
        self.variables
            .get(&id)
            .ok_or(IrGraphError::UnknownVariable(id))
    }

    /// Mutable access for metadata and axis order changes. Links stay read-only here.
    pub fn variable_mut(&mut self, id: VariableId) -> Result<&mut Variable, IrGraphError> {
        self.variables
            .get_mut(&id)
            .ok_or(IrGraphError::UnknownVariable(id))
    }

    pub fn operator(&self, id: OperatorId) -> Result<&Operator, IrGraphError> {
        self.operators
            .get(&id)
            .ok_or(IrGraphError::UnknownOperator(id))
    }

    /// Mutable access for metadata. Slot maps stay read-only here.
    pub fn operator_mut(&mut self, id: OperatorId) -> Result<&mut Operator, IrGraphError> {
        self.operators
            .get_mut(&id)
            .ok_or(IrGraphError::UnknownOperator(id))
    }

    pub fn variables(&self) -> impl Iterator<Item = &Variable> {
        self.variables.values()
    }

    pub fn operators(&self) -> impl Iterator<Item = &Operator> {
        self.operators.values()
    }

    pub fn change_axis_order(
        &mut self,
        id: VariableId,
        axis_order: AxisOrder,
    ) -> Result<(), IrGraphError> {
        self.variable_mut(id)?.change_axis_order(axis_order)
    }

    /// Variables that no operator produces or consumes, in id order.
    pub fn unreferenced_variables(&self) -> Vec<VariableId> {
        let mut ids: Vec<_> = self
            .variables
            .values()
            .filter(|v| v.is_unlinked())
            .map(|v| v.id())
            .collect();
        ids.sort();
        ids
    }

    /// Detaches every link of the operator, then drops it from the graph.
    ///
    /// The returned operator still lists its former slots so callers can rewire around it.
    pub fn remove_operator(&mut self, id: OperatorId) -> Result<Operator, IrGraphError> {
        let operator = self
            .operators
            .remove(&id)
            .ok_or(IrGraphError::UnknownOperator(id))?;
        for var in operator.inputs().values() {
            if let Some(variable) = self.variables.get_mut(var) {
                variable.input_to.remove(&id);
            }
        }
        for var in operator.outputs().values() {
            if let Some(variable) = self.variables.get_mut(var) {
                variable.output_from = None;
            }
        }
        log::debug!("Removed operator {}", operator);
        Ok(operator)
    }

    /// Drops a variable that nothing links to anymore.
    pub fn remove_variable(&mut self, id: VariableId) -> Result<Variable, IrGraphError> {
        if !self.variable(id)?.is_unlinked() {
            return Err(IrGraphError::VariableInUse(id));
        }
        let variable = self
            .variables
            .remove(&id)
            .ok_or(IrGraphError::UnknownVariable(id))?;
        log::debug!("Removed variable {} {}", id, variable);
        Ok(variable)
    }
}

impl InnerGraph for IrGraph {
    type NodeId = OperatorId;
    type LinkId = VariableId;
    type Error = IrGraphError;
    type AnyNode = Operator;
    type AnyLink = Variable;
    type InputLinkId = VariableId;
    type OutputLinkId = VariableId;

    fn nodes(&self) -> impl Iterator<Item = Self::NodeId> {
        let mut ids: Vec<_> = self.operators.keys().copied().collect();
        ids.sort();
        ids.into_iter()
    }

    fn links(&self) -> impl Iterator<Item = Self::LinkId> {
        let mut ids: Vec<_> = self.variables.keys().copied().collect();
        ids.sort();
        ids.into_iter()
    }

    fn get_node(&self, id: &Self::NodeId) -> Option<&Self::AnyNode> {
        self.operators.get(id)
    }

    fn get_link(&self, id: &Self::LinkId) -> Option<&Self::AnyLink> {
        self.variables.get(id)
    }

    /// Variables read by some operator but produced by none.
    fn input_links(&self) -> impl Iterator<Item = (Self::InputLinkId, Self::LinkId)> {
        self.links().filter_map(|id| {
            let variable = &self.variables[&id];
            (variable.output_from().is_none() && !variable.input_to().is_empty())
                .then_some((id, id))
        })
    }

    /// Variables produced by some operator but read by none.
    fn output_links(&self) -> impl Iterator<Item = (Self::OutputLinkId, Self::LinkId)> {
        self.links().filter_map(|id| {
            let variable = &self.variables[&id];
            (variable.output_from().is_some() && variable.input_to().is_empty())
                .then_some((id, id))
        })
    }
}
