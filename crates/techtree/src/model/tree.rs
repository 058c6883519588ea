//! Technology tree data model and JSON snapshot format
//!
//! A [`TechnologyTree`] is an immutable-per-frame snapshot handed to the
//! renderer. Nodes keep document order: hit-testing breaks ties by it.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io::Read;
use std::path::Path as FsPath;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::{debug, info, span, Level};

use super::localized::LocalizedText;
use crate::core::{Point, Size, TreeError};

/// Kind of learning unit a node stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NodeType {
    #[default]
    Topic,
    Skill,
    Module,
    Article,
}

impl NodeType {
    /// Parse a type tag; unknown tags are treated as topics
    pub fn from_tag(tag: &str) -> Self {
        match tag.to_lowercase().as_str() {
            "skill" => NodeType::Skill,
            "module" => NodeType::Module,
            "article" => NodeType::Article,
            _ => NodeType::Topic,
        }
    }

    /// Shape used when a node carries no explicit shape tag
    pub fn default_shape(&self) -> NodeShape {
        match self {
            NodeType::Topic | NodeType::Article => NodeShape::Circle,
            NodeType::Skill => NodeShape::Hexagon,
            NodeType::Module => NodeShape::Square,
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeType::Topic => write!(f, "topic"),
            NodeType::Skill => write!(f, "skill"),
            NodeType::Module => write!(f, "module"),
            NodeType::Article => write!(f, "article"),
        }
    }
}

impl From<String> for NodeType {
    fn from(tag: String) -> Self {
        NodeType::from_tag(&tag)
    }
}

impl From<NodeType> for String {
    fn from(value: NodeType) -> Self {
        value.to_string()
    }
}

/// Node outline shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NodeShape {
    #[default]
    Circle,
    Hexagon,
    Square,
}

impl NodeShape {
    /// Parse a shape tag; anything unrecognized draws as a circle
    pub fn from_tag(tag: &str) -> Self {
        match tag.to_lowercase().as_str() {
            "hexagon" | "hex" => NodeShape::Hexagon,
            "square" | "rect" | "rectangle" => NodeShape::Square,
            _ => NodeShape::Circle,
        }
    }
}

impl fmt::Display for NodeShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeShape::Circle => write!(f, "circular"),
            NodeShape::Hexagon => write!(f, "hexagon"),
            NodeShape::Square => write!(f, "square"),
        }
    }
}

impl From<String> for NodeShape {
    fn from(tag: String) -> Self {
        NodeShape::from_tag(&tag)
    }
}

impl From<NodeShape> for String {
    fn from(value: NodeShape) -> Self {
        value.to_string()
    }
}

/// Learner progress on a node; carried through, not drawn
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NodeStatus {
    #[default]
    Available,
    Locked,
    InProgress,
    Completed,
    Other(String),
}

impl From<String> for NodeStatus {
    fn from(tag: String) -> Self {
        match tag.to_lowercase().as_str() {
            "available" => NodeStatus::Available,
            "locked" => NodeStatus::Locked,
            "in_progress" | "inprogress" => NodeStatus::InProgress,
            "completed" | "done" => NodeStatus::Completed,
            _ => NodeStatus::Other(tag),
        }
    }
}

impl From<NodeStatus> for String {
    fn from(value: NodeStatus) -> Self {
        match value {
            NodeStatus::Available => "available".to_string(),
            NodeStatus::Locked => "locked".to_string(),
            NodeStatus::InProgress => "in_progress".to_string(),
            NodeStatus::Completed => "completed".to_string(),
            NodeStatus::Other(tag) => tag,
        }
    }
}

/// A node of the tree
///
/// `id` is the key of the node in the snapshot's `nodes` object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    #[serde(skip)]
    pub id: String,
    pub position: Point,
    #[serde(rename = "type", default)]
    pub node_type: NodeType,
    #[serde(default, alias = "style", skip_serializing_if = "Option::is_none")]
    pub shape: Option<NodeShape>,
    #[serde(default)]
    pub title: LocalizedText,
    #[serde(default)]
    pub description: LocalizedText,
    #[serde(default)]
    pub status: NodeStatus,
    #[serde(default = "default_difficulty")]
    pub difficulty: u8,
    #[serde(
        default,
        alias = "estimatedTime",
        skip_serializing_if = "Option::is_none"
    )]
    pub estimated_time: Option<u32>,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default, alias = "contentId", skip_serializing_if = "Option::is_none")]
    pub content_id: Option<String>,
}

fn default_difficulty() -> u8 {
    1
}

impl Node {
    pub fn new(id: impl Into<String>, node_type: NodeType, position: Point) -> Self {
        Self {
            id: id.into(),
            position,
            node_type,
            shape: None,
            title: LocalizedText::new(),
            description: LocalizedText::new(),
            status: NodeStatus::default(),
            difficulty: default_difficulty(),
            estimated_time: None,
            requirements: Vec::new(),
            content_id: None,
        }
    }

    pub fn with_title(mut self, language: impl Into<String>, text: impl Into<String>) -> Self {
        self.title.insert(language, text);
        self
    }

    pub fn with_shape(mut self, shape: NodeShape) -> Self {
        self.shape = Some(shape);
        self
    }

    pub fn with_requirements<I, S>(mut self, requirements: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.requirements = requirements.into_iter().map(Into::into).collect();
        self
    }

    /// Explicit shape tag, else the type default
    pub fn shape(&self) -> NodeShape {
        self.shape.unwrap_or_else(|| self.node_type.default_shape())
    }

    /// A node with no requirements starts a branch of the tree
    pub fn is_root(&self) -> bool {
        self.requirements.is_empty()
    }
}

/// How strongly one node leads to another
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ConnectionKind {
    Required,
    Recommended,
    Optional,
    /// Unrecognized tag, kept verbatim so snapshots round-trip
    Other(String),
}

impl ConnectionKind {
    pub fn from_tag(tag: &str) -> Self {
        match tag.to_lowercase().as_str() {
            "required" => ConnectionKind::Required,
            "recommended" => ConnectionKind::Recommended,
            "optional" => ConnectionKind::Optional,
            _ => ConnectionKind::Other(tag.to_string()),
        }
    }

    /// Style used when the connection carries no explicit style tag
    pub fn default_style(&self) -> ConnectionStyle {
        match self {
            ConnectionKind::Required => ConnectionStyle::SolidArrow,
            ConnectionKind::Recommended => ConnectionStyle::DashedLine,
            ConnectionKind::Optional | ConnectionKind::Other(_) => ConnectionStyle::Simple,
        }
    }
}

impl fmt::Display for ConnectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionKind::Required => write!(f, "required"),
            ConnectionKind::Recommended => write!(f, "recommended"),
            ConnectionKind::Optional => write!(f, "optional"),
            ConnectionKind::Other(tag) => write!(f, "{}", tag),
        }
    }
}

impl From<String> for ConnectionKind {
    fn from(tag: String) -> Self {
        ConnectionKind::from_tag(&tag)
    }
}

impl From<ConnectionKind> for String {
    fn from(value: ConnectionKind) -> Self {
        value.to_string()
    }
}

/// How a connection is stroked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ConnectionStyle {
    SolidArrow,
    DashedLine,
    #[default]
    Simple,
}

impl ConnectionStyle {
    /// Parse a style tag; anything unrecognized draws as a plain line
    pub fn from_tag(tag: &str) -> Self {
        match tag.to_lowercase().as_str() {
            "solid_arrow" => ConnectionStyle::SolidArrow,
            "dashed_line" | "dashed" => ConnectionStyle::DashedLine,
            _ => ConnectionStyle::Simple,
        }
    }
}

impl fmt::Display for ConnectionStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionStyle::SolidArrow => write!(f, "solid_arrow"),
            ConnectionStyle::DashedLine => write!(f, "dashed_line"),
            ConnectionStyle::Simple => write!(f, "simple"),
        }
    }
}

impl From<String> for ConnectionStyle {
    fn from(tag: String) -> Self {
        ConnectionStyle::from_tag(&tag)
    }
}

impl From<ConnectionStyle> for String {
    fn from(value: ConnectionStyle) -> Self {
        value.to_string()
    }
}

/// Directed edge between two nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    pub from: String,
    pub to: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ConnectionKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<ConnectionStyle>,
}

impl Connection {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            kind: None,
            style: None,
        }
    }

    pub fn with_kind(mut self, kind: ConnectionKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn with_style(mut self, style: ConnectionStyle) -> Self {
        self.style = Some(style);
        self
    }

    /// Explicit style tag, else the kind's default, else a plain line
    pub fn style(&self) -> ConnectionStyle {
        self.style
            .or_else(|| self.kind.as_ref().map(ConnectionKind::default_style))
            .unwrap_or_default()
    }
}

/// Tree-level settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Metadata {
    pub default_language: String,
    pub available_languages: Vec<String>,
    pub layout_type: Option<String>,
    pub layout_direction: Option<String>,
    pub canvas_size: Size,
}

impl Default for Metadata {
    fn default() -> Self {
        Self {
            default_language: "ru".to_string(),
            available_languages: vec!["ru".to_string(), "en".to_string()],
            layout_type: None,
            layout_direction: None,
            canvas_size: Size::default(),
        }
    }
}

/// On-disk shape of a snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TreeDocument {
    #[serde(with = "node_map")]
    nodes: Vec<Node>,
    #[serde(default)]
    connections: Vec<Connection>,
    #[serde(default)]
    metadata: Metadata,
}

/// `nodes` is a JSON object keyed by id; keep document order
mod node_map {
    use super::*;

    pub fn serialize<S>(nodes: &[Node], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(nodes.len()))?;
        for node in nodes {
            map.serialize_entry(&node.id, node)?;
        }
        map.end()
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<Node>, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct NodesVisitor;

        impl<'de> Visitor<'de> for NodesVisitor {
            type Value = Vec<Node>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "an object mapping node ids to nodes")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut nodes = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((id, mut node)) = access.next_entry::<String, Node>()? {
                    node.id = id;
                    nodes.push(node);
                }
                Ok(nodes)
            }
        }

        deserializer.deserialize_map(NodesVisitor)
    }
}

/// Snapshot of a technology tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TreeDocument", into = "TreeDocument")]
pub struct TechnologyTree {
    nodes: Vec<Node>,
    connections: Vec<Connection>,
    metadata: Metadata,
    index: HashMap<String, usize>,
}

impl TechnologyTree {
    /// Build a tree; node ids must be non-empty and unique
    pub fn new(
        nodes: Vec<Node>,
        connections: Vec<Connection>,
        metadata: Metadata,
    ) -> Result<Self, TreeError> {
        let mut index = HashMap::with_capacity(nodes.len());
        for (i, node) in nodes.iter().enumerate() {
            if node.id.is_empty() {
                return Err(TreeError::invalid_tree(format!(
                    "node #{} has an empty id",
                    i
                )));
            }
            if index.insert(node.id.clone(), i).is_some() {
                return Err(TreeError::invalid_tree(format!(
                    "duplicate node id '{}'",
                    node.id
                )));
            }
        }
        Ok(Self {
            nodes,
            connections,
            metadata,
            index,
        })
    }

    /// Parse a JSON snapshot
    pub fn from_json_str(json: &str) -> Result<Self, TreeError> {
        let load_span = span!(Level::INFO, "load_tree", input_len = json.len());
        let _enter = load_span.enter();

        let document: TreeDocument = serde_json::from_str(json)?;
        let tree = Self::try_from(document)?;
        debug!(
            nodes = tree.node_count(),
            connections = tree.connection_count(),
            "Loaded tree snapshot"
        );
        Ok(tree)
    }

    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, TreeError> {
        let mut json = String::new();
        reader.read_to_string(&mut json)?;
        Self::from_json_str(&json)
    }

    pub fn from_path(path: impl AsRef<FsPath>) -> Result<Self, TreeError> {
        let path = path.as_ref();
        info!(path = %path.display(), "Reading tree snapshot");
        Self::from_json_str(&fs::read_to_string(path)?)
    }

    /// Serialize back to the snapshot format
    pub fn to_json_string(&self) -> Result<String, TreeError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Nodes in document order
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.index.get(id).map(|&i| &self.nodes[i])
    }

    /// Position of a node in document order
    pub fn node_index(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn has_node(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Both endpoints of a connection, or `None` if either is missing
    pub fn endpoints(&self, connection: &Connection) -> Option<(&Node, &Node)> {
        Some((self.node(&connection.from)?, self.node(&connection.to)?))
    }

    /// Reposition a node; used by the state owner when applying a move
    /// request. Returns false for an unknown id.
    pub fn move_node(&mut self, id: &str, position: Point) -> bool {
        match self.index.get(id) {
            Some(&i) => {
                self.nodes[i].position = position;
                true
            }
            None => false,
        }
    }
}

impl TryFrom<TreeDocument> for TechnologyTree {
    type Error = TreeError;

    fn try_from(document: TreeDocument) -> Result<Self, Self::Error> {
        Self::new(document.nodes, document.connections, document.metadata)
    }
}

impl From<TechnologyTree> for TreeDocument {
    fn from(tree: TechnologyTree) -> Self {
        Self {
            nodes: tree.nodes,
            connections: tree.connections,
            metadata: tree.metadata,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "nodes": {
            "b": {"position": {"x": 1, "y": 2}, "type": "SKILL", "requirements": ["a"]},
            "a": {"position": {"x": 3, "y": 4}, "type": "topic", "style": "weird"}
        },
        "connections": [
            {"from": "a", "to": "b", "type": "required"},
            {"from": "a", "to": "b", "type": "mystery", "style": "dashed_line"}
        ]
    }"#;

    #[test]
    fn test_nodes_keep_document_order() {
        let tree = TechnologyTree::from_json_str(SAMPLE).unwrap();
        let ids: Vec<&str> = tree.nodes().iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert_eq!(tree.node_index("a"), Some(1));
    }

    #[test]
    fn test_tags_parse_leniently() {
        let tree = TechnologyTree::from_json_str(SAMPLE).unwrap();
        let b = tree.node("b").unwrap();
        assert_eq!(b.node_type, NodeType::Skill);
        assert_eq!(b.shape(), NodeShape::Hexagon);
        assert_eq!(tree.node("a").unwrap().shape(), NodeShape::Circle);

        let conns = tree.connections();
        assert_eq!(conns[0].style(), ConnectionStyle::SolidArrow);
        assert_eq!(conns[1].kind, Some(ConnectionKind::Other("mystery".into())));
        assert_eq!(conns[1].style(), ConnectionStyle::DashedLine);
    }

    #[test]
    fn test_metadata_defaults() {
        let tree = TechnologyTree::from_json_str(SAMPLE).unwrap();
        assert_eq!(tree.metadata().default_language, "ru");
        assert_eq!(tree.metadata().canvas_size, Size::default());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let result = TechnologyTree::new(
            vec![
                Node::new("x", NodeType::Topic, Point::ORIGIN),
                Node::new("x", NodeType::Skill, Point::ORIGIN),
            ],
            vec![],
            Metadata::default(),
        );
        assert!(matches!(result, Err(TreeError::InvalidTree { .. })));
    }

    #[test]
    fn test_json_round_trip_preserves_order_and_ids() {
        let tree = TechnologyTree::from_json_str(SAMPLE).unwrap();
        let json = tree.to_json_string().unwrap();
        let again = TechnologyTree::from_json_str(&json).unwrap();
        assert_eq!(tree, again);
    }

    #[test]
    fn test_unknown_connection_type_survives_round_trip() {
        let tree = TechnologyTree::from_json_str(SAMPLE).unwrap();
        let json = tree.to_json_string().unwrap();
        assert!(json.contains(r#""type": "mystery""#));

        let plain = Connection::new("a", "b").with_kind(ConnectionKind::from_tag("mystery"));
        assert_eq!(plain.style(), ConnectionStyle::Simple);
        assert_eq!(ConnectionKind::from_tag("Required"), ConnectionKind::Required);
    }

    #[test]
    fn test_move_node() {
        let mut tree = TechnologyTree::from_json_str(SAMPLE).unwrap();
        assert!(tree.move_node("a", Point::new(10.0, 20.0)));
        assert_eq!(tree.node("a").unwrap().position, Point::new(10.0, 20.0));
        assert!(!tree.move_node("ghost", Point::ORIGIN));
    }
}
