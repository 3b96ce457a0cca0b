//! `RouteGraph`: a named-node weighted digraph world.
//!
//! States are node names; an action is "move to node X". Each node carries a
//! heuristic (estimated remaining cost to the goal) and an ordered list of
//! outgoing edges. Successors are enumerated in edge insertion order, so
//! enumeration is deterministic.
//!
//! Graphs are built with the `with_*` builders or loaded from a JSON fixture:
//!
//! ```json
//! {
//!   "id": "demo",
//!   "goal": "G",
//!   "nodes": [{"name": "S", "heuristic": 0.0, "edges": [{"to": "A", "cost": 2.0}]}]
//! }
//! ```

use std::collections::BTreeMap;

use astar_search::contract::SearchProblemV1;
use astar_search::node::Successor;

/// Action: move the agent to the named node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MoveTo {
    pub node: String,
}

/// State: the node the agent is at.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RouteState {
    pub node: String,
}

impl RouteState {
    #[must_use]
    pub fn at(node: &str) -> Self {
        Self {
            node: node.to_string(),
        }
    }
}

/// An outgoing edge.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub to: String,
    pub cost: f64,
}

#[derive(Debug, Clone, PartialEq, Default)]
struct NodeEntry {
    heuristic: f64,
    edges: Vec<Edge>,
}

/// Error loading a graph fixture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteGraphError {
    /// A required field is missing or has the wrong JSON type.
    InvalidField { field: String },
}

impl std::fmt::Display for RouteGraphError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidField { field } => write!(f, "missing or invalid field: {field}"),
        }
    }
}

impl std::error::Error for RouteGraphError {}

/// Named-node weighted digraph with per-node heuristics.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteGraph {
    id: String,
    goal: String,
    nodes: BTreeMap<String, NodeEntry>,
}

impl RouteGraph {
    /// Empty graph whose goal is `goal`.
    #[must_use]
    pub fn new(id: &str, goal: &str) -> Self {
        Self {
            id: id.to_string(),
            goal: goal.to_string(),
            nodes: BTreeMap::new(),
        }
    }

    /// The six-node demo graph.
    ///
    /// ```text
    /// S→A(2) S→B(1) A→D(1) A→C(3) A→B(1) B→D(5) B→G(10) C→G(7) D→G(4)
    /// h: S=0 A=3 B=3 C=1 D=2 G=0
    /// ```
    ///
    /// The cheapest route from `S` is `S→A→D→G` with cost 7.
    #[must_use]
    pub fn demo() -> Self {
        Self::new("route_graph_demo", "G")
            .with_node("S", 0.0)
            .with_node("A", 3.0)
            .with_node("B", 3.0)
            .with_node("C", 1.0)
            .with_node("D", 2.0)
            .with_node("G", 0.0)
            .with_edge("S", "A", 2.0)
            .with_edge("S", "B", 1.0)
            .with_edge("A", "D", 1.0)
            .with_edge("A", "C", 3.0)
            .with_edge("A", "B", 1.0)
            .with_edge("B", "D", 5.0)
            .with_edge("B", "G", 10.0)
            .with_edge("C", "G", 7.0)
            .with_edge("D", "G", 4.0)
    }

    /// Add a node (or update its heuristic).
    #[must_use]
    pub fn with_node(mut self, name: &str, heuristic: f64) -> Self {
        self.nodes.entry(name.to_string()).or_default().heuristic = heuristic;
        self
    }

    /// Append an edge. Unknown endpoints are added with a zero heuristic.
    #[must_use]
    pub fn with_edge(mut self, from: &str, to: &str, cost: f64) -> Self {
        self.nodes.entry(to.to_string()).or_default();
        self.nodes
            .entry(from.to_string())
            .or_default()
            .edges
            .push(Edge {
                to: to.to_string(),
                cost,
            });
        self
    }

    #[must_use]
    pub fn goal(&self) -> &str {
        &self.goal
    }

    /// Node names in sorted order.
    pub fn node_names(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(String::as_str)
    }

    /// Outgoing edges of `node` (empty for unknown nodes).
    #[must_use]
    pub fn edges(&self, node: &str) -> &[Edge] {
        match self.nodes.get(node) {
            Some(entry) => &entry.edges,
            None => &[],
        }
    }

    /// Heuristic recorded for `node` (0 for unknown nodes).
    #[must_use]
    pub fn heuristic(&self, node: &str) -> f64 {
        self.nodes.get(node).map_or(0.0, |entry| entry.heuristic)
    }

    /// Cost of following `path` from `start`, or `None` if a move has no edge.
    ///
    /// With parallel edges the cheapest one is used.
    #[must_use]
    pub fn path_cost<'a>(
        &self,
        start: &str,
        path: impl IntoIterator<Item = &'a MoveTo>,
    ) -> Option<f64> {
        let mut at = start;
        let mut total = 0.0;
        for step in path {
            let cost = self
                .edges(at)
                .iter()
                .filter(|e| e.to == step.node)
                .map(|e| e.cost)
                .min_by(f64::total_cmp)?;
            total += cost;
            at = &step.node;
        }
        Some(total)
    }

    /// Load a graph from a JSON fixture value.
    ///
    /// # Errors
    ///
    /// Returns [`RouteGraphError::InvalidField`] naming the first field that
    /// is missing or has the wrong type.
    pub fn from_json_value(value: &serde_json::Value) -> Result<Self, RouteGraphError> {
        let id = str_field(value, "id")?;
        let goal = str_field(value, "goal")?;
        let nodes = value
            .get("nodes")
            .and_then(serde_json::Value::as_array)
            .ok_or_else(|| invalid("nodes"))?;

        let mut graph = Self::new(id, goal);
        for node in nodes {
            let name = str_field(node, "name")?;
            let heuristic = node
                .get("heuristic")
                .and_then(serde_json::Value::as_f64)
                .unwrap_or(0.0);
            graph = graph.with_node(name, heuristic);
            let edges = match node.get("edges") {
                None => continue,
                Some(edges) => edges.as_array().ok_or_else(|| invalid("edges"))?,
            };
            for edge in edges {
                let to = str_field(edge, "to")?;
                let cost = edge
                    .get("cost")
                    .and_then(serde_json::Value::as_f64)
                    .ok_or_else(|| invalid("cost"))?;
                graph = graph.with_edge(name, to, cost);
            }
        }
        Ok(graph)
    }

    /// Render the graph in the fixture format accepted by
    /// [`RouteGraph::from_json_value`].
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        let nodes: Vec<serde_json::Value> = self
            .nodes
            .iter()
            .map(|(name, entry)| {
                serde_json::json!({
                    "edges": entry.edges.iter().map(|e| serde_json::json!({
                        "cost": e.cost,
                        "to": e.to,
                    })).collect::<Vec<_>>(),
                    "heuristic": entry.heuristic,
                    "name": name,
                })
            })
            .collect();
        serde_json::json!({
            "goal": self.goal,
            "id": self.id,
            "nodes": nodes,
        })
    }
}

fn invalid(field: &str) -> RouteGraphError {
    RouteGraphError::InvalidField {
        field: field.to_string(),
    }
}

fn str_field<'a>(value: &'a serde_json::Value, field: &str) -> Result<&'a str, RouteGraphError> {
    value
        .get(field)
        .and_then(serde_json::Value::as_str)
        .ok_or_else(|| invalid(field))
}

impl SearchProblemV1 for RouteGraph {
    type State = RouteState;
    type Action = MoveTo;

    fn problem_id(&self) -> &str {
        &self.id
    }

    fn successors(&self, state: &RouteState) -> Vec<Successor<RouteState, MoveTo>> {
        self.edges(&state.node)
            .iter()
            .map(|edge| {
                let action = MoveTo {
                    node: edge.to.clone(),
                };
                self.successor(state, action, edge.cost)
            })
            .collect()
    }

    fn transition(&self, _state: &RouteState, action: &MoveTo) -> RouteState {
        RouteState {
            node: action.node.clone(),
        }
    }

    fn is_goal(&self, state: &RouteState) -> bool {
        state.node == self.goal
    }

    fn estimate_cost_to_goal(&self, state: &RouteState) -> f64 {
        self.heuristic(&state.node)
    }

    fn state_identity(&self, state: &RouteState) -> Option<Vec<u8>> {
        Some(state.node.as_bytes().to_vec())
    }
}
