use crate::ir_graph_tests::new_variable;
use whisper_tensor_ir::{AxisOrder, ErrorKind, IrGraph, IrGraphError};

pub fn test_append_input(order: AxisOrder) -> anyhow::Result<()> {
    let mut graph = IrGraph::new();
    let v = new_variable(&mut graph, order)?;
    let op = graph.add_operator("relu", None);
    graph.append_input(op, "x", v)?;

    assert_eq!(graph.operator(op)?.inputs()["x"], v);
    assert!(graph.variable(v)?.input_to().contains(&op));
    assert_eq!(graph.get_input_name(op, v)?, "x");
    assert_eq!(graph.variable(v)?.output_from(), None);
    Ok(())
}

pub fn test_append_output(order: AxisOrder) -> anyhow::Result<()> {
    let mut graph = IrGraph::new();
    let v = new_variable(&mut graph, order)?;
    let op = graph.add_operator("relu", None);
    graph.append_output(op, "y", v)?;

    assert_eq!(graph.operator(op)?.outputs()["y"], v);
    assert_eq!(graph.variable(v)?.output_from(), Some(op));
    assert_eq!(graph.get_output_name(op, v)?, "y");
    assert!(graph.variable(v)?.input_to().is_empty());
    Ok(())
}

pub fn test_second_producer_conflicts(order: AxisOrder) -> anyhow::Result<()> {
    let mut graph = IrGraph::new();
    let w = new_variable(&mut graph, order)?;
    let conv = graph.add_operator("conv", None);
    let conv2 = graph.add_operator("conv2", None);
    graph.append_output(conv, "w", w)?;

    let err = graph.append_output(conv2, "w", w).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert!(matches!(err, IrGraphError::OutputConflict { producer, .. } if producer == conv));
    assert_eq!(graph.variable(w)?.output_from(), Some(conv));
    assert_eq!(graph.operator(conv)?.output("w"), Some(w));
    assert!(graph.operator(conv2)?.outputs().is_empty());
    Ok(())
}

pub fn test_remove_input(order: AxisOrder) -> anyhow::Result<()> {
    let mut graph = IrGraph::new();
    let v = new_variable(&mut graph, order)?;
    let other = new_variable(&mut graph, order)?;
    let op = graph.add_operator("add", None);
    graph.append_input(op, "a", v)?;
    graph.append_input(op, "b", other)?;

    graph.remove_input(op, v)?;
    let operator = graph.operator(op)?;
    assert_eq!(operator.input("a"), None);
    assert_eq!(operator.input("b"), Some(other));
    assert!(graph.variable(v)?.input_to().is_empty());
    assert!(graph.variable(other)?.input_to().contains(&op));
    Ok(())
}

pub fn test_remove_output(order: AxisOrder) -> anyhow::Result<()> {
    let mut graph = IrGraph::new();
    let v = new_variable(&mut graph, order)?;
    let op = graph.add_operator("relu", None);
    graph.append_output(op, "y", v)?;

    graph.remove_output(op, v)?;
    assert!(graph.operator(op)?.outputs().is_empty());
    assert_eq!(graph.variable(v)?.output_from(), None);

    // Producer slot is free again
    let op2 = graph.add_operator("tanh", None);
    graph.append_output(op2, "y", v)?;
    assert_eq!(graph.variable(v)?.output_from(), Some(op2));
    Ok(())
}

pub fn test_remove_unlinked(order: AxisOrder) -> anyhow::Result<()> {
    let mut graph = IrGraph::new();
    let v = new_variable(&mut graph, order)?;
    let op = graph.add_operator("relu", None);

    let err = graph.remove_input(op, v).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Lookup);
    assert!(matches!(err, IrGraphError::NotAnInput { .. }));
    let err = graph.remove_output(op, v).unwrap_err();
    assert!(matches!(err, IrGraphError::NotAnOutput { .. }));

    // Consumed elsewhere is still not an input of this operator
    let other = graph.add_operator("tanh", None);
    graph.append_input(other, "x", v)?;
    assert_eq!(graph.remove_input(op, v).unwrap_err().kind(), ErrorKind::Lookup);
    assert!(graph.variable(v)?.input_to().contains(&other));
    Ok(())
}

pub fn test_replace_input(order: AxisOrder) -> anyhow::Result<()> {
    let mut graph = IrGraph::new();
    let old = new_variable(&mut graph, order)?;
    let new = new_variable(&mut graph, order)?;
    let op = graph.add_operator("relu", None);
    graph.append_input(op, "x", old)?;

    graph.replace_input(op, old, new)?;
    assert_eq!(graph.operator(op)?.input("x"), Some(new));
    assert_eq!(graph.operator(op)?.inputs().len(), 1);
    assert!(!graph.variable(old)?.input_to().contains(&op));
    assert!(graph.variable(new)?.input_to().contains(&op));

    let err = graph.replace_input(op, old, new).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Lookup);
    assert_eq!(graph.operator(op)?.input("x"), Some(new));
    Ok(())
}

pub fn test_replace_output(order: AxisOrder) -> anyhow::Result<()> {
    let mut graph = IrGraph::new();
    let old = new_variable(&mut graph, order)?;
    let new = new_variable(&mut graph, order)?;
    let op = graph.add_operator("relu", None);
    graph.append_output(op, "y", old)?;

    graph.replace_output(op, old, new)?;
    assert_eq!(graph.operator(op)?.output("y"), Some(new));
    assert_eq!(graph.variable(old)?.output_from(), None);
    assert_eq!(graph.variable(new)?.output_from(), Some(op));

    assert_eq!(
        graph.replace_output(op, old, new).unwrap_err().kind(),
        ErrorKind::Lookup
    );
    Ok(())
}

pub fn test_replace_output_conflict(order: AxisOrder) -> anyhow::Result<()> {
    let mut graph = IrGraph::new();
    let old = new_variable(&mut graph, order)?;
    let taken = new_variable(&mut graph, order)?;
    let op = graph.add_operator("relu", None);
    let producer = graph.add_operator("const", None);
    graph.append_output(op, "y", old)?;
    graph.append_output(producer, "y", taken)?;

    let err = graph.replace_output(op, old, taken).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert_eq!(graph.operator(op)?.output("y"), Some(old));
    assert_eq!(graph.variable(old)?.output_from(), Some(op));
    assert_eq!(graph.variable(taken)?.output_from(), Some(producer));
    Ok(())
}

pub fn test_identity_not_equality(order: AxisOrder) -> anyhow::Result<()> {
    let mut graph = IrGraph::new();
    let a = new_variable(&mut graph, order)?;
    let b = new_variable(&mut graph, order)?;
    assert_eq!(graph.variable(a)?.shape(), graph.variable(b)?.shape());
    let op = graph.add_operator("relu", None);
    graph.append_input(op, "x", a)?;

    assert!(graph.get_input_name(op, b).is_err());
    assert!(graph.remove_input(op, b).is_err());
    assert_eq!(graph.operator(op)?.input("x"), Some(a));
    Ok(())
}

pub fn test_remove_operator(order: AxisOrder) -> anyhow::Result<()> {
    let mut graph = IrGraph::new();
    let x = new_variable(&mut graph, order)?;
    let y = new_variable(&mut graph, order)?;
    let op = graph.add_operator("relu", None);
    let consumer = graph.add_operator("tanh", None);
    graph.append_input(op, "x", x)?;
    graph.append_output(op, "y", y)?;
    graph.append_input(consumer, "x", y)?;

    let removed = graph.remove_operator(op)?;
    assert_eq!(removed.input("x"), Some(x));
    assert!(graph.operator(op).is_err());
    assert!(graph.variable(x)?.input_to().is_empty());
    assert_eq!(graph.variable(y)?.output_from(), None);
    assert!(graph.variable(y)?.input_to().contains(&consumer));
    assert_eq!(graph.unreferenced_variables(), vec![x]);
    Ok(())
}

pub fn test_remove_variable_in_use(order: AxisOrder) -> anyhow::Result<()> {
    let mut graph = IrGraph::new();
    let x = new_variable(&mut graph, order)?;
    let op = graph.add_operator("relu", None);
    graph.append_input(op, "x", x)?;

    assert!(matches!(
        graph.remove_variable(x),
        Err(IrGraphError::VariableInUse(v)) if v == x
    ));
    graph.remove_input(op, x)?;
    let removed = graph.remove_variable(x)?;
    assert_eq!(removed.id(), x);
    assert!(graph.variable(x).is_err());
    Ok(())
}

pub fn test_snapshot_keeps_links(order: AxisOrder) -> anyhow::Result<()> {
    let mut graph = IrGraph::new();
    let x = new_variable(&mut graph, order)?;
    let y = new_variable(&mut graph, order)?;
    let op = graph.add_operator("relu", None);
    graph.append_input(op, "x", x)?;
    graph.append_output(op, "y", y)?;

    let json = serde_json::to_string(&graph)?;
    let mut restored: IrGraph = serde_json::from_str(&json)?;
    assert_eq!(restored.operator(op)?.input("x"), Some(x));
    assert_eq!(restored.variable(y)?.output_from(), Some(op));
    assert_eq!(restored.variable(x)?.axis_order(), order);

    // Fresh ids must not collide with restored ones
    let z = new_variable(&mut restored, order)?;
    assert_ne!(z, x);
    assert_ne!(z, y);
    Ok(())
}
