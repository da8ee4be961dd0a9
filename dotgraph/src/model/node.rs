use super::attributes::{AttributeKind, Attributes, HasAttributes, HasComment};
use super::edge::NodeRef;
use crate::core::base::Compass;

/// A node of the graph model. Nodes are owned by the graph that contains
/// them; edges refer to them by id.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: String,
    attributes: Attributes,
    comment: Option<String>,
}

impl Node {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            attributes: Attributes::new(AttributeKind::Node),
            comment: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns a reference to this node that can be used as an edge target.
    pub fn to_ref(&self) -> NodeRef {
        NodeRef::new(self.id.clone())
    }

    /// Returns a reference to the port \p port of this node.
    pub fn port(&self, port: impl Into<String>) -> NodeRef {
        self.to_ref().with_port(port)
    }

    /// Returns a reference to the port \p port of this node, at the side
    /// \p compass.
    pub fn port_at(&self, port: impl Into<String>, compass: Compass) -> NodeRef {
        self.port(port).with_compass(compass)
    }
}

impl HasAttributes for Node {
    fn attributes(&self) -> &Attributes {
        &self.attributes
    }
    fn attributes_mut(&mut self) -> &mut Attributes {
        &mut self.attributes
    }
}

impl HasComment for Node {
    fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }
    fn set_comment(&mut self, comment: Option<String>) {
        self.comment = comment;
    }
}

#[test]
fn test_node_refs() {
    let mut node = Node::new("a");
    node.set("shape", "box");
    assert_eq!(node.get("shape").and_then(|v| v.as_text()), Some("box"));
    assert_eq!(node.attributes().kind(), AttributeKind::Node);

    let r = node.port_at("p", Compass::NE);
    assert_eq!(r.id, "a");
    assert_eq!(r.port.as_deref(), Some("p"));
    assert_eq!(r.compass, Some(Compass::NE));
    assert_eq!(node.to_ref(), NodeRef::new("a"));
}
