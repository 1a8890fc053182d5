//! `SourceUnit`: the validated node arena for one input file.

use crate::node::{NodeData, NodeIndex, SyntaxKind};
use crate::types::JavaType;
use arkmig_common::position::{Position, Span};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A node in the input arena.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceNode {
    #[serde(flatten)]
    pub data: NodeData,
    /// Byte range of the node in the original text.
    #[serde(default)]
    pub span: Span,
    #[serde(default)]
    pub pos: Position,
    /// Static type attached by the front end, when it computed one.
    #[serde(
        default,
        rename = "resolvedType",
        skip_serializing_if = "Option::is_none"
    )]
    pub resolved_type: Option<JavaType>,
}

impl SourceNode {
    pub fn new(data: NodeData) -> Self {
        SourceNode {
            data,
            span: Span::EMPTY,
            pos: Position::UNKNOWN,
            resolved_type: None,
        }
    }

    #[inline]
    pub fn kind(&self) -> SyntaxKind {
        self.data.kind()
    }
}

/// Structural problems found while validating an input tree.
#[derive(Debug, Error)]
pub enum TreeError {
    #[error("root index {root} is out of range for {len} node(s)")]
    RootOutOfRange { root: NodeIndex, len: usize },
    #[error("root node must be a compilation unit, found {kind}")]
    RootNotCompilationUnit { kind: SyntaxKind },
    #[error("node {parent} refers to child {child}, but the arena has {len} node(s)")]
    ChildOutOfRange {
        parent: NodeIndex,
        child: NodeIndex,
        len: usize,
    },
    #[error("node {child} is a child of both {first} and {second}")]
    SharedChild {
        child: NodeIndex,
        first: NodeIndex,
        second: NodeIndex,
    },
    #[error("root node {root} appears as a child of {parent}")]
    RootHasParent { root: NodeIndex, parent: NodeIndex },
    #[error("{count} node(s) are not reachable from the root (first: {first})")]
    DetachedNodes { count: usize, first: NodeIndex },
    #[error("invalid source unit JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Wire form of a source unit, validated into [`SourceUnit`].
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSourceUnit {
    file_name: String,
    #[serde(default)]
    text: String,
    nodes: Vec<SourceNode>,
    root: NodeIndex,
}

impl TryFrom<RawSourceUnit> for SourceUnit {
    type Error = TreeError;

    fn try_from(raw: RawSourceUnit) -> Result<Self, Self::Error> {
        SourceUnit::new(raw.file_name, raw.text, raw.nodes, raw.root)
    }
}

/// One input file: its text, node arena and derived parent links.
///
/// A `SourceUnit` can only be obtained through validation, so every child
/// index is in range, every node except the root has exactly one parent and
/// every node is reachable from the root.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawSourceUnit", rename_all = "camelCase")]
pub struct SourceUnit {
    file_name: String,
    text: String,
    nodes: Vec<SourceNode>,
    root: NodeIndex,
    #[serde(skip)]
    parents: Vec<Option<NodeIndex>>,
}

impl SourceUnit {
    pub fn new(
        file_name: impl Into<String>,
        text: impl Into<String>,
        nodes: Vec<SourceNode>,
        root: NodeIndex,
    ) -> Result<Self, TreeError> {
        let len = nodes.len();
        let root_node = nodes
            .get(root.index())
            .ok_or(TreeError::RootOutOfRange { root, len })?;
        if root_node.kind() != SyntaxKind::CompilationUnit {
            return Err(TreeError::RootNotCompilationUnit {
                kind: root_node.kind(),
            });
        }

        let mut parents: Vec<Option<NodeIndex>> = vec![None; len];
        for (i, node) in nodes.iter().enumerate() {
            let parent = NodeIndex::from_usize(i);
            for child in node.data.children() {
                if child.index() >= len {
                    return Err(TreeError::ChildOutOfRange { parent, child, len });
                }
                if child == root {
                    return Err(TreeError::RootHasParent { root, parent });
                }
                if let Some(first) = parents[child.index()] {
                    return Err(TreeError::SharedChild {
                        child,
                        first,
                        second: parent,
                    });
                }
                parents[child.index()] = Some(parent);
            }
        }

        // Every node must hang off the root; cycles detached from it show up here too
        let mut reached = vec![false; len];
        let mut stack = vec![root];
        while let Some(idx) = stack.pop() {
            if std::mem::replace(&mut reached[idx.index()], true) {
                continue;
            }
            stack.extend(nodes[idx.index()].data.children());
        }
        let mut unreached = reached.iter().enumerate().filter(|(_, seen)| !**seen);
        if let Some((first, _)) = unreached.next() {
            return Err(TreeError::DetachedNodes {
                count: 1 + unreached.count(),
                first: NodeIndex::from_usize(first),
            });
        }

        Ok(SourceUnit {
            file_name: file_name.into(),
            text: text.into(),
            nodes,
            root,
            parents,
        })
    }

    /// Load and validate a unit from its JSON interchange form.
    pub fn from_json(json: &str) -> Result<Self, TreeError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self, pretty: bool) -> Result<String, TreeError> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn root(&self) -> NodeIndex {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, idx: NodeIndex) -> Option<&SourceNode> {
        self.nodes.get(idx.index())
    }

    /// Node at `idx`. Indices handed out by this unit are always in range.
    #[inline]
    pub fn node(&self, idx: NodeIndex) -> &SourceNode {
        &self.nodes[idx.index()]
    }

    #[inline]
    pub fn data(&self, idx: NodeIndex) -> &NodeData {
        &self.node(idx).data
    }

    #[inline]
    pub fn kind(&self, idx: NodeIndex) -> SyntaxKind {
        self.node(idx).kind()
    }

    pub fn parent(&self, idx: NodeIndex) -> Option<NodeIndex> {
        self.parents.get(idx.index()).copied().flatten()
    }

    /// Parent, grandparent, ... up to and including the root.
    pub fn ancestors(&self, idx: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        std::iter::successors(self.parent(idx), move |&p| self.parent(p))
    }

    pub fn position(&self, idx: NodeIndex) -> Position {
        self.node(idx).pos
    }

    /// Original source text of a node, or "" when it has no span.
    pub fn text_of(&self, idx: NodeIndex) -> &str {
        let span = self.node(idx).span;
        if span.is_empty() {
            return "";
        }
        span.slice(&self.text).unwrap_or("")
    }

    pub fn resolved_type(&self, idx: NodeIndex) -> Option<&JavaType> {
        self.node(idx).resolved_type.as_ref()
    }

    /// `idx` and all of its descendants in pre-order.
    pub fn subtree(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        let mut out = Vec::new();
        let mut stack = vec![idx];
        while let Some(next) = stack.pop() {
            out.push(next);
            let children = self.data(next).children();
            stack.extend(children.into_iter().rev());
        }
        out
    }

    /// Whether `ancestor` is `idx` or one of its ancestors.
    pub fn is_within(&self, idx: NodeIndex, ancestor: NodeIndex) -> bool {
        idx == ancestor || self.ancestors(idx).any(|a| a == ancestor)
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeIndex, &SourceNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (NodeIndex::from_usize(i), node))
    }
}
