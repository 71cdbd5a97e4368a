//! Backbone traits shared by graph layers, so passes can walk any of them the same way.
use std::fmt::Debug;
use std::hash::Hash;

/// A value flowing from one producer node to any number of consumer nodes.
pub trait Link<LinkIdT: Clone + Eq + Hash + Debug> {
    /// Stable id of this link at graph scope.
    fn link_id(&self) -> LinkIdT;
}

/// Node within a graph, seen through the links it touches.
pub trait Node<LinkIdT: Clone + Eq + Hash + Debug> {
    /// Links read by this node, in slot order.
    fn consumed_links(&self) -> impl Iterator<Item = LinkIdT>;
    /// Links written by this node, in slot order.
    fn produced_links(&self) -> impl Iterator<Item = LinkIdT>;
}

/// The inner structure of a graph: nodes and links, plus IO interface.
pub trait InnerGraph {
    type NodeId: Clone + Eq + Hash + Debug;
    type LinkId: Clone + Eq + Hash + Debug;
    type Error: Debug;
    type AnyNode: Node<Self::LinkId>;
    type AnyLink: Link<Self::LinkId>;
    type InputLinkId: Clone + Eq + Hash + Debug;
    type OutputLinkId: Clone + Eq + Hash + Debug;

    /// Deterministic iteration over nodes and links.
    fn nodes(&self) -> impl Iterator<Item = Self::NodeId>;
    fn links(&self) -> impl Iterator<Item = Self::LinkId>;

    /// Resolve handles.
    fn get_node(&self, id: &Self::NodeId) -> Option<&Self::AnyNode>;
    fn get_link(&self, id: &Self::LinkId) -> Option<&Self::AnyLink>;

    /// External interface links.
    fn input_links(&self) -> impl Iterator<Item = (Self::InputLinkId, Self::LinkId)>;
    fn output_links(&self) -> impl Iterator<Item = (Self::OutputLinkId, Self::LinkId)>;
}
