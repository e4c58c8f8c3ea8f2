//! Derivation tree storage.
//!
//! Nodes live in a flat arena and are addressed by [`NodeId`]. Children are
//! owned through the parent's ordered `children` list; the `parent` link is a
//! plain id used only to walk the ancestor chain.

use std::fmt;

use crate::equation::Equation;
use crate::reference::NodeId;
use crate::solver::Verdict;
use crate::substitution::Substitution;
use crate::system::EqSystem;

/// The rule application that created a node.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum RuleTag {
    /// Initial reduction of the parsed equation.
    Reduce,
    /// Edge into a split system, or from a system to one of its members.
    Split,
    /// Rule 1: `x -> y`.
    Unify,
    /// Rule 1: `x -> y x`.
    PrependLeft,
    /// Rule 1: `y -> x y`.
    PrependRight,
    /// Rules 2 and 4: `x -> $`.
    Erase,
    /// Rules 2 and 4: `x -> c x`.
    Prefix,
    /// Rule 3: nulling one variable.
    Nullify,
    /// Substitution forced by the length analysis.
    Forced,
}

impl RuleTag {
    pub fn code(self) -> char {
        match self {
            RuleTag::Reduce => 'r',
            RuleTag::Split => 's',
            RuleTag::Unify => 'u',
            RuleTag::PrependLeft => 'L',
            RuleTag::PrependRight => 'R',
            RuleTag::Erase => 'e',
            RuleTag::Prefix => 'p',
            RuleTag::Nullify => 'n',
            RuleTag::Forced => 'f',
        }
    }
}

/// Evaluation state of a node.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum NodeStatus {
    Open,
    True,
    False,
    Cycled,
    /// Same (up to letter renaming) as the given ancestor.
    Repeated(NodeId),
}

impl NodeStatus {
    pub fn verdict(self) -> Verdict {
        match self {
            NodeStatus::True => Verdict::True,
            NodeStatus::Cycled => Verdict::Cycled,
            NodeStatus::Open | NodeStatus::False | NodeStatus::Repeated(_) => Verdict::False,
        }
    }

    /// Aggregation over alternative branches.
    pub fn disjunction(statuses: &[NodeStatus]) -> NodeStatus {
        if statuses.contains(&NodeStatus::True) {
            NodeStatus::True
        } else if statuses.contains(&NodeStatus::Cycled) {
            NodeStatus::Cycled
        } else {
            NodeStatus::False
        }
    }

    /// Aggregation over the members of a system.
    pub fn conjunction(statuses: &[NodeStatus]) -> NodeStatus {
        if statuses.iter().any(|s| s.verdict() == Verdict::False) {
            NodeStatus::False
        } else if statuses.contains(&NodeStatus::Cycled) {
            NodeStatus::Cycled
        } else {
            NodeStatus::True
        }
    }
}

#[derive(Debug, Clone)]
pub struct DerivationNode {
    system: EqSystem,
    substitution: Option<Substitution>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    path: Vec<RuleTag>,
    status: NodeStatus,
}

impl DerivationNode {
    pub fn system(&self) -> &EqSystem {
        &self.system
    }

    /// The equation of a singleton node.
    pub fn equation(&self) -> Option<&Equation> {
        self.system.as_single()
    }

    /// The substitution that produced this node (none for the root).
    pub fn substitution(&self) -> Option<&Substitution> {
        self.substitution.as_ref()
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn path(&self) -> &[RuleTag] {
        &self.path
    }

    pub fn depth(&self) -> usize {
        self.path.len()
    }

    pub fn status(&self) -> NodeStatus {
        self.status
    }

    /// The rule path as a string of tag codes.
    pub fn path_string(&self) -> String {
        self.path.iter().map(|tag| tag.code()).collect()
    }
}

impl fmt::Display for DerivationNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.path_string(), self.system)
    }
}

/// Arena of derivation nodes; the root is always [`NodeId::ROOT`].
#[derive(Debug, Clone)]
pub struct DerivationTree {
    nodes: Vec<DerivationNode>,
}

impl DerivationTree {
    pub fn new(root: EqSystem) -> Self {
        Self {
            nodes: vec![DerivationNode {
                system: root,
                substitution: None,
                parent: None,
                children: Vec::new(),
                path: Vec::new(),
                status: NodeStatus::Open,
            }],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    pub fn node(&self, id: NodeId) -> &DerivationNode {
        &self.nodes[id.index()]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn add_child(&mut self, parent: NodeId, system: EqSystem, substitution: Substitution, tag: RuleTag) -> NodeId {
        let id = NodeId::new(self.nodes.len() as u32);
        let mut path = self.node(parent).path.clone();
        path.push(tag);
        self.nodes.push(DerivationNode {
            system,
            substitution: Some(substitution),
            parent: Some(parent),
            children: Vec::new(),
            path,
            status: NodeStatus::Open,
        });
        self.nodes[parent.index()].children.push(id);
        id
    }

    pub fn set_status(&mut self, id: NodeId, status: NodeStatus) {
        self.nodes[id.index()].status = status;
    }

    /// Proper ancestors of `id`, nearest first.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.node(id).parent,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &DerivationNode)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (NodeId::new(i as u32), node))
    }
}

pub struct Ancestors<'a> {
    tree: &'a DerivationTree,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next?;
        self.next = self.tree.node(id).parent;
        Some(id)
    }
}
