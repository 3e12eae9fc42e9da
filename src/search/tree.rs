//! The discovered rule tree.
//!
//! Nodes live in an arena and refer to each other by [`NodeId`]. The root
//! is the empty rule; every other node records one committed attribute
//! addition. Nodes are only ever appended.

use crate::data::Interval;
use crate::front::front_points;
use crate::rule::RuleCandidate;

/// Index of a node in its [`RuleTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(pub usize);

/// One node of the rule tree.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RuleTreeNode {
    /// Attribute added at this node; `None` at the root.
    pub attribute: Option<usize>,
    /// Interval committed for `attribute`.
    pub interval: Option<Interval>,
    /// Complete antecedent at this node, in addition order.
    pub rule: Vec<(usize, Interval)>,
    /// Number of additions from the root.
    pub depth: usize,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    /// Front produced by the refinement that created this node.
    pub front: Vec<RuleCandidate>,
    /// Front distance gained over the parent front.
    pub improvement: f64,
    /// Sum of the positive improvements along the path from the root.
    pub cumulative_improvement: f64,
}

impl RuleTreeNode {
    /// `(support, confidence)` of each front member.
    pub fn front_points(&self) -> Vec<[f64; 2]> {
        front_points(&self.front)
    }
}

/// A commit record, in the order commits happened.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RuleStep {
    pub node: NodeId,
    /// Attributes already in the rule before this addition.
    pub prefix: Vec<usize>,
    pub attribute: usize,
    pub interval: Interval,
    pub depth: usize,
    pub improvement: f64,
    pub front_size: usize,
}

/// Arena of [`RuleTreeNode`]s rooted at the empty rule.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RuleTree {
    nodes: Vec<RuleTreeNode>,
    steps: Vec<RuleStep>,
}

impl Default for RuleTree {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleTree {
    /// A tree holding only the root.
    pub fn new() -> Self {
        Self {
            nodes: vec![RuleTreeNode {
                attribute: None,
                interval: None,
                rule: Vec::new(),
                depth: 0,
                parent: None,
                children: Vec::new(),
                front: Vec::new(),
                improvement: 0.0,
                cumulative_improvement: 0.0,
            }],
            steps: Vec::new(),
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn node(&self, id: NodeId) -> &RuleTreeNode {
        &self.nodes[id.0]
    }

    pub fn nodes(&self) -> &[RuleTreeNode] {
        &self.nodes
    }

    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// `true` when nothing was committed.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Commit records in chronological order.
    pub fn steps(&self) -> &[RuleStep] {
        &self.steps
    }

    /// Appends a child under `parent` and records the step.
    ///
    /// # Panics
    /// Panics if `parent` is not a node of this tree.
    pub fn add_child(
        &mut self,
        parent: NodeId,
        attribute: usize,
        interval: Interval,
        rule: Vec<(usize, Interval)>,
        front: Vec<RuleCandidate>,
        improvement: f64,
    ) -> NodeId {
        let id = NodeId(self.nodes.len());
        let (depth, cumulative, prefix) = {
            let p = &self.nodes[parent.0];
            let prefix: Vec<usize> = p.rule.iter().map(|&(a, _)| a).collect();
            (
                p.depth + 1,
                p.cumulative_improvement + improvement.max(0.0),
                prefix,
            )
        };

        self.steps.push(RuleStep {
            node: id,
            prefix,
            attribute,
            interval,
            depth,
            improvement,
            front_size: front.len(),
        });
        self.nodes.push(RuleTreeNode {
            attribute: Some(attribute),
            interval: Some(interval),
            rule,
            depth,
            parent: Some(parent),
            children: Vec::new(),
            front,
            improvement,
            cumulative_improvement: cumulative,
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Nodes from the first addition down to `id` (root excluded).
    pub fn path(&self, id: NodeId) -> Vec<NodeId> {
        let mut path = Vec::new();
        let mut current = Some(id);
        while let Some(n) = current {
            let node = &self.nodes[n.0];
            if node.parent.is_none() {
                break;
            }
            path.push(n);
            current = node.parent;
        }
        path.reverse();
        path
    }

    /// The antecedent of every committed node, in commit order.
    pub fn rules(&self) -> Vec<&[(usize, Interval)]> {
        self.nodes[1..].iter().map(|n| n.rule.as_slice()).collect()
    }

    /// Deepest node depth; 0 for an empty tree.
    pub fn depth(&self) -> usize {
        self.nodes.iter().map(|n| n.depth).max().unwrap_or(0)
    }

    /// Nodes without children, root excluded.
    pub fn leaves(&self) -> Vec<NodeId> {
        (1..self.nodes.len())
            .map(NodeId)
            .filter(|&id| self.nodes[id.0].children.is_empty())
            .collect()
    }

    /// Multi-line outline of the tree using `names` for attributes.
    pub fn render(&self, names: &[String]) -> String {
        let mut out = String::from("(root)\n");
        self.render_children(self.root(), names, &mut out);
        out
    }

    fn render_children(&self, id: NodeId, names: &[String], out: &mut String) {
        for &child in &self.nodes[id.0].children {
            let node = &self.nodes[child.0];
            let name = node
                .attribute
                .and_then(|a| names.get(a).cloned())
                .unwrap_or_else(|| format!("attr#{}", node.attribute.unwrap_or_default()));
            let interval = node
                .interval
                .map(|i| i.to_string())
                .unwrap_or_default();
            out.push_str(&format!(
                "{}+ {name} ∈ {interval}  Δ={:.4} Σ={:.4} front={}\n",
                "  ".repeat(node.depth),
                node.improvement,
                node.cumulative_improvement,
                node.front.len()
            ));
            self.render_children(child, names, out);
        }
    }
}
