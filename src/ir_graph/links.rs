//! Operator-initiated link protocol.
//!
//! Every call names the operator first and checks all of its preconditions before touching
//! either side of a link, so a failed call leaves the graph exactly as it was.
use crate::ir_graph::{IrGraph, IrGraphError, Operator, OperatorId, Variable, VariableId};

impl IrGraph {
    fn operator_and_variable_mut(
        &mut self,
        op: OperatorId,
        var: VariableId,
    ) -> Result<(&mut Operator, &mut Variable), IrGraphError> {
        let operator = self
            .operators
            .get_mut(&op)
            .ok_or(IrGraphError::UnknownOperator(op))?;
        let variable = self
            .variables
            .get_mut(&var)
            .ok_or(IrGraphError::UnknownVariable(var))?;
        Ok((operator, variable))
    }

    /// Slot under which `var` is an input of `op`. The first slot by name wins if there are several.
    pub fn get_input_name(&self, op: OperatorId, var: VariableId) -> Result<&str, IrGraphError> {
        self.variable(var)?;
        self.operator(op)?
            .find_input_slot(var)
            .ok_or(IrGraphError::NotAnInput {
                operator: op,
                variable: var,
            })
    }

    pub fn get_output_name(&self, op: OperatorId, var: VariableId) -> Result<&str, IrGraphError> {
        self.variable(var)?;
        self.operator(op)?
            .find_output_slot(var)
            .ok_or(IrGraphError::NotAnOutput {
                operator: op,
                variable: var,
            })
    }

    /// Binds `var` to input `slot` of `op` and registers `op` as a consumer of `var`.
    ///
    /// Re-binding the same variable is a no-op. A slot held by a different variable is never
    /// overwritten; detach it with [`IrGraph::remove_input`] or use [`IrGraph::replace_input`].
    pub fn append_input(
        &mut self,
        op: OperatorId,
        slot: &str,
        var: VariableId,
    ) -> Result<(), IrGraphError> {
        let (operator, variable) = self.operator_and_variable_mut(op, var)?;
        match operator.inputs.get(slot) {
            Some(occupant) if *occupant == var => return Ok(()),
            Some(occupant) => {
                return Err(IrGraphError::SlotOccupied {
                    operator: op,
                    slot: slot.to_string(),
                    occupant: *occupant,
                });
            }
            None => {}
        }
        operator.inputs.insert(slot.to_string(), var);
        variable.input_to.insert(op);
        log::trace!("{}: input \"{}\" <- {}", op, slot, var);
        Ok(())
    }

    /// Unbinds `var` from `op`'s inputs. `op` stays a consumer if `var` still fills another slot.
    pub fn remove_input(&mut self, op: OperatorId, var: VariableId) -> Result<(), IrGraphError> {
        let slot = self.get_input_name(op, var)?.to_string();
        let (operator, variable) = self.operator_and_variable_mut(op, var)?;
        operator.inputs.remove(&slot);
        if operator.find_input_slot(var).is_none() {
            variable.input_to.remove(&op);
        }
        log::trace!("{}: input \"{}\" -/- {}", op, slot, var);
        Ok(())
    }

    /// Puts `new` in the input slot currently held by `old`, keeping the slot name.
    pub fn replace_input(
        &mut self,
        op: OperatorId,
        old: VariableId,
        new: VariableId,
    ) -> Result<(), IrGraphError> {
        self.variable(new)?;
        let slot = self.get_input_name(op, old)?.to_string();
        if old == new {
            return Ok(());
        }

        let (operator, old_variable) = self.operator_and_variable_mut(op, old)?;
        operator.inputs.insert(slot.clone(), new);
        if operator.find_input_slot(old).is_none() {
            old_variable.input_to.remove(&op);
        }
        let (_, new_variable) = self.operator_and_variable_mut(op, new)?;
        new_variable.input_to.insert(op);
        log::trace!("{}: input \"{}\" <- {} (was {})", op, slot, new, old);
        Ok(())
    }

    /// Binds `var` to output `slot` of `op` and makes `op` its producer.
    ///
    /// Fails if `var` already has a producer, since a variable has at most one. Re-binding the same
    /// variable to the same slot is a no-op.
    pub fn append_output(
        &mut self,
        op: OperatorId,
        slot: &str,
        var: VariableId,
    ) -> Result<(), IrGraphError> {
        let (operator, variable) = self.operator_and_variable_mut(op, var)?;
        match operator.outputs.get(slot) {
            Some(occupant) if *occupant == var => return Ok(()),
            Some(occupant) => {
                return Err(IrGraphError::SlotOccupied {
                    operator: op,
                    slot: slot.to_string(),
                    occupant: *occupant,
                });
            }
            None => {}
        }
        if let Some(producer) = variable.output_from {
            return Err(IrGraphError::OutputConflict {
                variable: var,
                producer,
            });
        }
        operator.outputs.insert(slot.to_string(), var);
        variable.output_from = Some(op);
        log::trace!("{}: output \"{}\" -> {}", op, slot, var);
        Ok(())
    }

    pub fn remove_output(&mut self, op: OperatorId, var: VariableId) -> Result<(), IrGraphError> {
        let slot = self.get_output_name(op, var)?.to_string();
        let (operator, variable) = self.operator_and_variable_mut(op, var)?;
        operator.outputs.remove(&slot);
        variable.output_from = None;
        log::trace!("{}: output \"{}\" -/- {}", op, slot, var);
        Ok(())
    }

    /// Puts `new` in the output slot currently held by `old`, keeping the slot name.
    pub fn replace_output(
        &mut self,
        op: OperatorId,
        old: VariableId,
        new: VariableId,
    ) -> Result<(), IrGraphError> {
        let slot = self.get_output_name(op, old)?.to_string();
        if old == new {
            return Ok(());
        }
        if let Some(producer) = self.variable(new)?.output_from() {
            return Err(IrGraphError::OutputConflict {
                variable: new,
                producer,
            });
        }

        let (operator, old_variable) = self.operator_and_variable_mut(op, old)?;
        operator.outputs.insert(slot.clone(), new);
        old_variable.output_from = None;
        let (_, new_variable) = self.operator_and_variable_mut(op, new)?;
        new_variable.output_from = Some(op);
        log::trace!("{}: output \"{}\" -> {} (was {})", op, slot, new, old);
        Ok(())
    }
}
