//! Management tree node model
//!
//! Nodes are immutable once built. The three variants form a closed set:
//! - [`Node`]: a labelled position in the tree with an optional value
//! - [`TypedNode`]: an OBJECT-TYPE definition with syntax, access and status
//! - [`InstanceNode`]: a concrete instance bound from a typed template
//!
//! Every variant renders to a canonical text form through `Display`, computed
//! from its attributes alone.

mod oid;
mod types;

pub use oid::Oid;
pub use types::{Access, DefVal, ParseAttrError, Status, Syntax};

use std::fmt;
use std::sync::Arc;

/// Every attribute a node can be constructed with
///
/// All fields default to their empty value, so any subset may be supplied.
/// Factories read only the fields meaningful for the variant they build.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeAttrs {
    /// Human-readable identifier
    pub label: String,
    /// Position in the tree (empty for abstract definitions)
    pub path: Oid,
    /// Default or bound value
    pub value: Option<DefVal>,
    /// Type descriptor
    pub syntax: Option<Arc<Syntax>>,
    /// Maximum access
    pub access: Option<Access>,
    /// Lifecycle status
    pub status: Option<Status>,
    /// Name of the defining module, for diagnostics
    pub module: Option<String>,
}

impl NodeAttrs {
    /// Attributes with only a label set
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    /// Set the tree path
    pub fn path(mut self, path: impl Into<Oid>) -> Self {
        self.path = path.into();
        self
    }

    /// Set the value
    pub fn value(mut self, value: impl Into<DefVal>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Set the syntax reference
    pub fn syntax(mut self, syntax: Arc<Syntax>) -> Self {
        self.syntax = Some(syntax);
        self
    }

    /// Set the access level
    pub fn access(mut self, access: Access) -> Self {
        self.access = Some(access);
        self
    }

    /// Set the status
    pub fn status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    /// Set the defining module name
    pub fn module(mut self, module: impl Into<String>) -> Self {
        self.module = Some(module.into());
        self
    }
}

/// Plain tree node
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    label: String,
    path: Oid,
    value: Option<DefVal>,
}

impl Node {
    /// Build a plain node, ignoring typed attributes
    pub fn from_attrs(attrs: NodeAttrs) -> Self {
        Self {
            label: attrs.label,
            path: attrs.path,
            value: attrs.value,
        }
    }

    /// Label
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Tree path
    pub fn path(&self) -> &Oid {
        &self.path
    }

    /// Value, if set
    pub fn value(&self) -> Option<&DefVal> {
        self.value.as_ref()
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_plain(f, &self.label, self.value.as_ref())
    }
}

/// OBJECT-TYPE definition
#[derive(Debug, Clone, PartialEq)]
pub struct TypedNode {
    label: String,
    path: Oid,
    value: Option<DefVal>,
    syntax: Option<Arc<Syntax>>,
    access: Option<Access>,
    status: Option<Status>,
    module: Option<String>,
}

impl TypedNode {
    /// Build a typed node from the full attribute set
    pub fn from_attrs(attrs: NodeAttrs) -> Self {
        Self {
            label: attrs.label,
            path: attrs.path,
            value: attrs.value,
            syntax: attrs.syntax,
            access: attrs.access,
            status: attrs.status,
            module: attrs.module,
        }
    }

    /// Label
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Tree path
    pub fn path(&self) -> &Oid {
        &self.path
    }

    /// Default value, if set
    pub fn value(&self) -> Option<&DefVal> {
        self.value.as_ref()
    }

    /// Shared syntax reference, if set
    pub fn syntax(&self) -> Option<&Arc<Syntax>> {
        self.syntax.as_ref()
    }

    /// Access level, if set
    pub fn access(&self) -> Option<Access> {
        self.access
    }

    /// Status, if set
    pub fn status(&self) -> Option<Status> {
        self.status
    }

    /// Defining module name, if set
    pub fn module(&self) -> Option<&str> {
        self.module.as_deref()
    }
}

impl fmt::Display for TypedNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Line order is part of the canonical form: SYNTAX, ACCESS, STATUS, value.
        write!(f, "{} OBJECT-TYPE", self.label)?;
        if let Some(syntax) = &self.syntax {
            write!(f, "\nSYNTAX {}", syntax)?;
        }
        if let Some(access) = self.access {
            write!(f, "\nACCESS {}", access)?;
        }
        if let Some(status) = self.status {
            write!(f, "\nSTATUS {}", status)?;
        }
        if let Some(value) = &self.value {
            write!(f, "\n = {{ {} }}", value)?;
        }
        Ok(())
    }
}

/// Instance of an object bound to a concrete tree position
#[derive(Debug, Clone, PartialEq)]
pub struct InstanceNode {
    label: String,
    path: Oid,
    value: Option<DefVal>,
    syntax: Option<Arc<Syntax>>,
    module: Option<String>,
}

impl InstanceNode {
    /// Bind an instance to `template`, placed at the template's path plus `index`
    ///
    /// Label, module and the syntax reference are copied from the template.
    /// The syntax is shared, not cloned: `Arc::ptr_eq` holds between the two.
    pub fn bind(template: &TypedNode, index: &[u32]) -> Self {
        Self {
            label: template.label.clone(),
            path: template.path.extend(index),
            value: None,
            syntax: template.syntax.clone(),
            module: template.module.clone(),
        }
    }

    /// Build an instance directly from attributes
    pub fn from_attrs(attrs: NodeAttrs) -> Self {
        Self {
            label: attrs.label,
            path: attrs.path,
            value: attrs.value,
            syntax: attrs.syntax,
            module: attrs.module,
        }
    }

    /// Set the instance value while still under construction
    pub fn with_value(mut self, value: impl Into<DefVal>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Label
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Full instance path (template path plus index)
    pub fn path(&self) -> &Oid {
        &self.path
    }

    /// Value, if set
    pub fn value(&self) -> Option<&DefVal> {
        self.value.as_ref()
    }

    /// Syntax reference copied from the template
    pub fn syntax(&self) -> Option<&Arc<Syntax>> {
        self.syntax.as_ref()
    }

    /// Defining module name, if set
    pub fn module(&self) -> Option<&str> {
        self.module.as_deref()
    }
}

impl fmt::Display for InstanceNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_plain(f, &self.label, self.value.as_ref())
    }
}

fn write_plain(f: &mut fmt::Formatter<'_>, label: &str, value: Option<&DefVal>) -> fmt::Result {
    match value {
        Some(value) => write!(f, "{{ {} {} }}", label, value),
        None => write!(f, "{{ {}  }}", label),
    }
}

/// The closed set of node factories
///
/// Modules export these so importers can build nodes of a given kind
/// without naming a concrete constructor at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Plain [`Node`]
    Node,
    /// [`TypedNode`]
    Typed,
    /// [`InstanceNode`]
    Instance,
}

impl NodeKind {
    /// Build a node of this kind
    pub fn build(self, attrs: NodeAttrs) -> MibNode {
        match self {
            Self::Node => MibNode::Node(Node::from_attrs(attrs)),
            Self::Typed => MibNode::Typed(TypedNode::from_attrs(attrs)),
            Self::Instance => MibNode::Instance(InstanceNode::from_attrs(attrs)),
        }
    }

    /// Short name used in diagnostics
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Node => "node",
            Self::Typed => "typed node",
            Self::Instance => "instance node",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Any node in the management tree
#[derive(Debug, Clone, PartialEq)]
pub enum MibNode {
    /// Plain node
    Node(Node),
    /// OBJECT-TYPE definition
    Typed(TypedNode),
    /// Bound instance
    Instance(InstanceNode),
}

impl MibNode {
    /// Which variant this is
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Node(_) => NodeKind::Node,
            Self::Typed(_) => NodeKind::Typed,
            Self::Instance(_) => NodeKind::Instance,
        }
    }

    /// Label
    pub fn label(&self) -> &str {
        match self {
            Self::Node(n) => n.label(),
            Self::Typed(n) => n.label(),
            Self::Instance(n) => n.label(),
        }
    }

    /// Tree path
    pub fn path(&self) -> &Oid {
        match self {
            Self::Node(n) => n.path(),
            Self::Typed(n) => n.path(),
            Self::Instance(n) => n.path(),
        }
    }

    /// Value, if set
    pub fn value(&self) -> Option<&DefVal> {
        match self {
            Self::Node(n) => n.value(),
            Self::Typed(n) => n.value(),
            Self::Instance(n) => n.value(),
        }
    }

    /// The typed definition, if this is one
    pub fn as_typed(&self) -> Option<&TypedNode> {
        match self {
            Self::Typed(n) => Some(n),
            _ => None,
        }
    }

    /// The instance, if this is one
    pub fn as_instance(&self) -> Option<&InstanceNode> {
        match self {
            Self::Instance(n) => Some(n),
            _ => None,
        }
    }
}

impl From<Node> for MibNode {
    fn from(node: Node) -> Self {
        Self::Node(node)
    }
}

impl From<TypedNode> for MibNode {
    fn from(node: TypedNode) -> Self {
        Self::Typed(node)
    }
}

impl From<InstanceNode> for MibNode {
    fn from(node: InstanceNode) -> Self {
        Self::Instance(node)
    }
}

impl fmt::Display for MibNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Node(n) => fmt::Display::fmt(n, f),
            Self::Typed(n) => fmt::Display::fmt(n, f),
            Self::Instance(n) => fmt::Display::fmt(n, f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sys_up_time() -> TypedNode {
        TypedNode::from_attrs(
            NodeAttrs::new("sysUpTime")
                .path([1, 3, 6, 1, 2, 1, 1, 3])
                .syntax(Arc::new(Syntax::new("TimeTicks")))
                .access(Access::ReadOnly)
                .status(Status::Current)
                .module("SNMPv2-MIB"),
        )
    }

    #[test]
    fn test_plain_node_render() {
        let node = Node::from_attrs(NodeAttrs::new("iso").path([1]).value(1i64));
        assert_eq!(node.to_string(), "{ iso 1 }");
    }

    #[test]
    fn test_plain_node_render_without_value() {
        let node = Node::from_attrs(NodeAttrs::new("internet"));
        assert_eq!(node.to_string(), "{ internet  }");
    }

    #[test]
    fn test_typed_node_full_render() {
        let node = TypedNode::from_attrs(
            NodeAttrs::new("sysContact")
                .syntax(Arc::new(Syntax::new("DisplayString")))
                .access(Access::ReadWrite)
                .status(Status::Current)
                .value(""),
        );
        assert_eq!(
            node.to_string(),
            "sysContact OBJECT-TYPE\nSYNTAX DisplayString\nACCESS read-write\nSTATUS current\n = {  }"
        );
    }

    #[test]
    fn test_typed_node_status_only() {
        let node = TypedNode::from_attrs(NodeAttrs::new("ifTable").status(Status::Deprecated));
        let text = node.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec!["ifTable OBJECT-TYPE", "STATUS deprecated"]);
    }

    #[test]
    fn test_typed_node_header_only() {
        let node = TypedNode::from_attrs(NodeAttrs::new("bare"));
        assert_eq!(node.to_string(), "bare OBJECT-TYPE");
    }

    #[test]
    fn test_render_is_deterministic() {
        let node = MibNode::from(sys_up_time());
        assert_eq!(node.to_string(), node.to_string());
    }

    #[test]
    fn test_instance_bind_copies_identity() {
        let template = sys_up_time();
        let instance = InstanceNode::bind(&template, &[0]).with_value(42u64);

        assert_eq!(instance.label(), "sysUpTime");
        assert_eq!(instance.path().to_string(), "1.3.6.1.2.1.1.3.0");
        assert_eq!(instance.module(), Some("SNMPv2-MIB"));
        assert!(Arc::ptr_eq(
            instance.syntax().unwrap(),
            template.syntax().unwrap()
        ));
        assert_eq!(instance.to_string(), "{ sysUpTime 42 }");
    }

    #[test]
    fn test_factory_builds_each_kind() {
        let attrs = NodeAttrs::new("x").path([1, 2]).status(Status::Current);
        for kind in [NodeKind::Node, NodeKind::Typed, NodeKind::Instance] {
            let node = kind.build(attrs.clone());
            assert_eq!(node.kind(), kind);
            assert_eq!(node.label(), "x");
            assert_eq!(node.path().arcs(), &[1, 2]);
        }
    }

    #[test]
    fn test_plain_factory_drops_typed_attributes() {
        let node = NodeKind::Node.build(NodeAttrs::new("x").access(Access::ReadOnly));
        assert!(node.as_typed().is_none());
        assert_eq!(node.to_string(), "{ x  }");
    }
}
