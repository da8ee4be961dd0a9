//! Edges of the graph model, and the ways to name their endpoints.

use super::attributes::{AttributeKind, Attributes, HasAttributes, HasComment};
use super::node::Node;
use crate::core::base::Compass;
use crate::core::error::DotError;
use std::fmt;

/// A reference to a node by id, with an optional port and compass point.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodeRef {
    pub id: String,
    pub port: Option<String>,
    pub compass: Option<Compass>,
}

impl NodeRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            port: None,
            compass: None,
        }
    }

    pub fn with_port(mut self, port: impl Into<String>) -> Self {
        self.port = Some(port.into());
        self
    }

    pub fn with_compass(mut self, compass: Compass) -> Self {
        self.compass = Some(compass);
        self
    }

    /// Parses "id", "id:port" or "id:port:compass". A compass that is not
    /// a known compass point is dropped.
    pub fn parse(text: &str) -> NodeRef {
        let mut parts = text.splitn(3, ':');
        let id = parts.next().unwrap_or_default();
        let mut result = NodeRef::new(id);
        if let Some(port) = parts.next() {
            result.port = Some(port.to_string());
        }
        if let Some(compass) = parts.next() {
            result.compass = Compass::from_name(compass);
        }
        result
    }
}

impl fmt::Display for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)?;
        if let Some(port) = &self.port {
            write!(f, ":{}", port)?;
        }
        if let Some(compass) = &self.compass {
            write!(f, ":{}", compass)?;
        }
        Ok(())
    }
}

/// Anything that can name an edge endpoint before it is validated.
#[derive(Debug, Clone, PartialEq)]
pub enum TargetSpec {
    Ref(NodeRef),
    /// "id", "id:port" or "id:port:compass".
    Text(String),
    /// A group of nodes that acts as one endpoint.
    Group(Vec<TargetSpec>),
}

impl From<&Node> for TargetSpec {
    fn from(node: &Node) -> Self {
        TargetSpec::Ref(node.to_ref())
    }
}

impl From<NodeRef> for TargetSpec {
    fn from(r: NodeRef) -> Self {
        TargetSpec::Ref(r)
    }
}

impl From<&str> for TargetSpec {
    fn from(s: &str) -> Self {
        TargetSpec::Text(s.to_string())
    }
}

impl From<String> for TargetSpec {
    fn from(s: String) -> Self {
        TargetSpec::Text(s)
    }
}

impl<T: Into<TargetSpec>> From<Vec<T>> for TargetSpec {
    fn from(list: Vec<T>) -> Self {
        TargetSpec::Group(list.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<TargetSpec>, const N: usize> From<[T; N]> for TargetSpec {
    fn from(list: [T; N]) -> Self {
        TargetSpec::Group(list.into_iter().map(Into::into).collect())
    }
}

/// One endpoint of an edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EdgeTarget {
    Node(NodeRef),
    Group(Vec<NodeRef>),
}

impl From<NodeRef> for EdgeTarget {
    fn from(r: NodeRef) -> Self {
        EdgeTarget::Node(r)
    }
}

fn check_ref(r: &NodeRef, name: &str) -> Result<(), DotError> {
    if r.id.is_empty() {
        return Err(DotError::EdgeTarget(format!("{} has an empty id", name)));
    }
    Ok(())
}

fn resolve_ref(spec: TargetSpec, name: &str) -> Result<NodeRef, DotError> {
    let r = match spec {
        TargetSpec::Ref(r) => r,
        TargetSpec::Text(s) => NodeRef::parse(&s),
        TargetSpec::Group(_) => {
            return Err(DotError::EdgeTarget(format!(
                "{} is a nested group, groups can only contain nodes",
                name
            )));
        }
    };
    check_ref(&r, name)?;
    Ok(r)
}

/// Converts the endpoint descriptions in \p specs to edge targets.
pub fn resolve_targets(specs: Vec<TargetSpec>) -> Result<Vec<EdgeTarget>, DotError> {
    let mut targets = Vec::with_capacity(specs.len());
    for (i, spec) in specs.into_iter().enumerate() {
        let name = format!("target #{}", i + 1);
        let target = match spec {
            TargetSpec::Group(members) => {
                if members.is_empty() {
                    return Err(DotError::EdgeTarget(format!(
                        "{} is an empty group",
                        name
                    )));
                }
                let mut refs = Vec::with_capacity(members.len());
                for (j, member) in members.into_iter().enumerate() {
                    let member_name = format!("{}.{}", name, j + 1);
                    refs.push(resolve_ref(member, &member_name)?);
                }
                EdgeTarget::Group(refs)
            }
            other => EdgeTarget::Node(resolve_ref(other, &name)?),
        };
        targets.push(target);
    }
    check_arity(targets.len())?;
    Ok(targets)
}

fn check_arity(count: usize) -> Result<(), DotError> {
    if count < 2 {
        return Err(DotError::EdgeTarget(format!(
            "target #{} is missing, an edge needs at least 2 targets",
            count + 1
        )));
    }
    Ok(())
}

/// An edge of the graph model. It connects two or more endpoints in order.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    targets: Vec<EdgeTarget>,
    attributes: Attributes,
    comment: Option<String>,
}

impl Edge {
    /// Creates an edge. Fails if there are fewer than two targets, or if a
    /// target is malformed.
    pub fn new(targets: Vec<EdgeTarget>) -> Result<Self, DotError> {
        check_arity(targets.len())?;
        for (i, target) in targets.iter().enumerate() {
            let name = format!("target #{}", i + 1);
            match target {
                EdgeTarget::Node(r) => {
                    check_ref(r, &name)?;
                }
                EdgeTarget::Group(refs) => {
                    if refs.is_empty() {
                        return Err(DotError::EdgeTarget(format!(
                            "{} is an empty group",
                            name
                        )));
                    }
                    for (j, r) in refs.iter().enumerate() {
                        check_ref(r, &format!("{}.{}", name, j + 1))?;
                    }
                }
            }
        }
        Ok(Self {
            targets,
            attributes: Attributes::new(AttributeKind::Edge),
            comment: None,
        })
    }

    /// Creates an edge from endpoint descriptions.
    pub fn from_specs<I, T>(targets: I) -> Result<Self, DotError>
    where
        I: IntoIterator<Item = T>,
        T: Into<TargetSpec>,
    {
        let specs = targets.into_iter().map(Into::into).collect();
        Edge::new(resolve_targets(specs)?)
    }

    pub fn targets(&self) -> &[EdgeTarget] {
        &self.targets
    }
}

impl HasAttributes for Edge {
    fn attributes(&self) -> &Attributes {
        &self.attributes
    }
    fn attributes_mut(&mut self) -> &mut Attributes {
        &mut self.attributes
    }
}

impl HasComment for Edge {
    fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }
    fn set_comment(&mut self, comment: Option<String>) {
        self.comment = comment;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(err: DotError) -> String {
        match err {
            DotError::EdgeTarget(m) => m,
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn parse_refs() {
        assert_eq!(NodeRef::parse("a"), NodeRef::new("a"));
        assert_eq!(NodeRef::parse("a:p"), NodeRef::new("a").with_port("p"));
        assert_eq!(
            NodeRef::parse("a:p:sw"),
            NodeRef::new("a").with_port("p").with_compass(Compass::SW)
        );
        // Unknown compass points are dropped, the port stays.
        assert_eq!(NodeRef::parse("a:p:up"), NodeRef::new("a").with_port("p"));
        assert_eq!(NodeRef::parse("a:p:sw").to_string(), "a:p:sw");
    }

    #[test]
    fn arity() {
        let none: Vec<&str> = vec![];
        let err = Edge::from_specs(none).unwrap_err();
        assert!(message(err).contains("target #1 is missing"));

        let err = Edge::from_specs(["a"]).unwrap_err();
        assert!(message(err).contains("target #2 is missing"));

        let edge = Edge::from_specs(["a", "b", "c"]).unwrap();
        assert_eq!(edge.targets().len(), 3);
    }

    #[test]
    fn mixed_targets() {
        let n = Node::new("n");
        let edge = Edge::from_specs(vec![
            TargetSpec::from(&n),
            TargetSpec::from("m:p"),
            TargetSpec::from(vec!["x", "y:q"]),
        ])
        .unwrap();
        assert_eq!(
            edge.targets(),
            &[
                EdgeTarget::Node(NodeRef::new("n")),
                EdgeTarget::Node(NodeRef::new("m").with_port("p")),
                EdgeTarget::Group(vec![
                    NodeRef::new("x"),
                    NodeRef::new("y").with_port("q")
                ]),
            ]
        );
    }

    #[test]
    fn bad_targets() {
        let err = Edge::from_specs(["a", ""]).unwrap_err();
        assert!(message(err).contains("target #2 has an empty id"));

        let empty: Vec<&str> = vec![];
        let err = Edge::from_specs(vec![TargetSpec::from("a"), TargetSpec::from(empty)])
            .unwrap_err();
        assert!(message(err).contains("target #2 is an empty group"));

        let nested = TargetSpec::Group(vec![TargetSpec::Group(vec!["x".into()])]);
        let err = Edge::from_specs(vec![TargetSpec::from("a"), nested]).unwrap_err();
        assert!(message(err).contains("target #2.1 is a nested group"));

        let err = Edge::new(vec![
            EdgeTarget::Node(NodeRef::new("a")),
            EdgeTarget::Group(vec![]),
        ])
        .unwrap_err();
        assert!(message(err).contains("empty group"));
    }
}
