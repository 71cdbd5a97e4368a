use crate::graph::Node;
use crate::ir_graph::{OperatorId, VariableId};
use crate::node::{IrNode, NodeBase, ParameterValue};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Computational unit with named input and output slots.
///
/// Slot maps are written only by the link protocol on [`IrGraph`](crate::ir_graph::IrGraph).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Operator {
    id: OperatorId,
    base: NodeBase,
    name: String,
    pub(super) inputs: BTreeMap<String, VariableId>,
    pub(super) outputs: BTreeMap<String, VariableId>,
}

impl Operator {
    pub(super) fn new(
        id: OperatorId,
        name: String,
        parameters: HashMap<String, ParameterValue>,
    ) -> Self {
        Self {
            id,
            base: NodeBase::new(parameters),
            name,
            inputs: BTreeMap::new(),
            outputs: BTreeMap::new(),
        }
    }

    pub fn id(&self) -> OperatorId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn inputs(&self) -> &BTreeMap<String, VariableId> {
        &self.inputs
    }

    pub fn outputs(&self) -> &BTreeMap<String, VariableId> {
        &self.outputs
    }

    pub fn input(&self, slot: &str) -> Option<VariableId> {
        self.inputs.get(slot).copied()
    }

    pub fn output(&self, slot: &str) -> Option<VariableId> {
        self.outputs.get(slot).copied()
    }

    /// First slot (by name) that holds `var` as an input.
    pub(super) fn find_input_slot(&self, var: VariableId) -> Option<&str> {
        find_slot(&self.inputs, var)
    }

    pub(super) fn find_output_slot(&self, var: VariableId) -> Option<&str> {
        find_slot(&self.outputs, var)
    }
}

fn find_slot(slots: &BTreeMap<String, VariableId>, var: VariableId) -> Option<&str> {
    slots
        .iter()
        .find(|(_, v)| **v == var)
        .map(|(slot, _)| slot.as_str())
}

impl IrNode for Operator {
    fn base(&self) -> &NodeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut NodeBase {
        &mut self.base
    }
}

impl Node<VariableId> for Operator {
    fn consumed_links(&self) -> impl Iterator<Item = VariableId> {
        self.inputs.values().copied()
    }

    fn produced_links(&self) -> impl Iterator<Item = VariableId> {
        self.outputs.values().copied()
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fn slots(slots: &BTreeMap<String, VariableId>) -> String {
            slots
                .iter()
                .map(|(slot, var)| format!("{slot}: {var}"))
                .collect::<Vec<_>>()
                .join(", ")
        }
        write!(
            f,
            "<Operator {} inputs={{{}}}, outputs={{{}}}>",
            self.name,
            slots(&self.inputs),
            slots(&self.outputs)
        )
    }
}
