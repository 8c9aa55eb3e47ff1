//! Windowed subgraphs over the global link table.
//!
//! Power, activity span and weights are recomputed on the year slice; ids
//! come from the global [`IdIndex`]. Filter order matters:
//! min_power → max_nodes → min_weight → endpoint join → max_edges → stumps.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::aggregate::{DEFAULT_GROUP, Edge, IdIndex, Node, author_stats, pair_weights};
use crate::links::LinkTable;
use crate::Year;

/// Closed year interval; a missing bound is unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Window {
    pub start: Option<Year>,
    pub end: Option<Year>,
}

impl Window {
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn between(start: Year, end: Year) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    /// Trailing window `[year - past_years, year]`, clamped at `Year::MIN`.
    pub fn rolling(year: Year, past_years: u32) -> Self {
        Self::between(year.saturating_sub_unsigned(past_years), year)
    }

    pub fn contains(&self, year: Year) -> bool {
        self.start.is_none_or(|s| year >= s) && self.end.is_none_or(|e| year <= e)
    }
}

/// How `last` is reported on windowed nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LastMode {
    /// Most recent active year
    #[default]
    Year,
    /// Years since last active, relative to the window end
    Recency,
}

impl std::fmt::Display for LastMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Year => write!(f, "year"),
            Self::Recency => write!(f, "recency"),
        }
    }
}

/// Node/edge pruning thresholds. `0` disables a cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphFilters {
    pub min_power: usize,
    pub max_nodes: usize,
    pub min_weight: usize,
    pub max_edges: usize,
    pub remove_stumps: bool,
    pub last: LastMode,
}

impl Default for GraphFilters {
    fn default() -> Self {
        Self {
            min_power: 1,
            max_nodes: 0,
            min_weight: 1,
            max_edges: 0,
            remove_stumps: true,
            last: LastMode::Year,
        }
    }
}

/// Result of one window: the link slice plus its filtered graph.
#[derive(Debug, Clone, Default)]
pub struct WindowGraph {
    pub window: Window,
    pub links: LinkTable,
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

/// Build the filtered subgraph for `window`.
///
/// Every returned edge has both endpoints in the returned node set. An
/// empty slice yields an empty graph.
pub fn build_window(
    links: &LinkTable,
    index: &IdIndex,
    window: Window,
    filters: &GraphFilters,
) -> WindowGraph {
    let links = links.slice(&window);

    // Nodes: window-relative stats, global ids
    let mut stats = author_stats(links.links());
    stats.retain(|(_, s)| s.power >= filters.min_power);
    if filters.max_nodes > 0 {
        stats.truncate(filters.max_nodes);
    }
    let mut nodes: Vec<Node> = stats
        .into_iter()
        .filter_map(|(name, s)| {
            let id = index.node_id(&name)?;
            Some(Node {
                id,
                name,
                power: s.power,
                first: s.first,
                last: s.last,
                group: DEFAULT_GROUP,
            })
        })
        .collect();

    // Edges: join both endpoints against the surviving nodes, then cap
    let present: FxHashMap<&str, usize> = nodes.iter().map(|n| (n.name.as_ref(), n.id)).collect();
    let mut edges: Vec<Edge> = pair_weights(links.links())
        .into_iter()
        .filter(|(_, weight)| *weight >= filters.min_weight)
        .filter_map(|((a, b), weight)| {
            let source = *present.get(a.as_ref())?;
            let target = *present.get(b.as_ref())?;
            Some(Edge {
                id: index.edge_id(source, target),
                source,
                target,
                weight,
            })
        })
        .collect();
    if filters.max_edges > 0 {
        edges.truncate(filters.max_edges);
    }

    if filters.remove_stumps {
        let connected: FxHashSet<usize> = edges.iter().flat_map(|e| [e.source, e.target]).collect();
        nodes.retain(|n| connected.contains(&n.id));
    }

    if filters.last == LastMode::Recency {
        if let Some(end) = window.end.or_else(|| links.year_range().map(|(_, max)| max)) {
            for node in &mut nodes {
                node.last = end - node.last;
            }
        }
    }

    WindowGraph {
        window,
        links,
        nodes,
        edges,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::aggregate;
    use crate::links::CoauthorLink;
    use crate::AuthorName;
    use std::sync::Arc;

    fn link(a: &str, b: &str, year: Year) -> CoauthorLink {
        let x: AuthorName = Arc::from(a);
        let y: AuthorName = Arc::from(b);
        CoauthorLink::new(&x, &y, year).unwrap()
    }

    fn names(graph: &WindowGraph) -> Vec<&str> {
        graph.nodes.iter().map(|n| n.name.as_ref()).collect()
    }

    fn assert_referential_integrity(graph: &WindowGraph) {
        let ids: FxHashSet<usize> = graph.nodes.iter().map(|n| n.id).collect();
        for edge in &graph.edges {
            assert!(ids.contains(&edge.source), "dangling source {edge:?}");
            assert!(ids.contains(&edge.target), "dangling target {edge:?}");
        }
    }

    #[test]
    fn window_contains_is_inclusive() {
        let w = Window::rolling(2020, 2);
        assert!(w.contains(2018) && w.contains(2020));
        assert!(!w.contains(2017) && !w.contains(2021));
        assert!(Window::unbounded().contains(1900));
    }

    #[test]
    fn stats_are_window_relative_ids_are_global() {
        let table = LinkTable::new(vec![
            link("A,X", "B,X", 2010),
            link("A,X", "B,X", 2011),
            link("A,X", "C,X", 2020),
        ]);
        let global = aggregate(&table);
        let graph = build_window(
            &table,
            &global.index,
            Window::between(2020, 2020),
            &GraphFilters::default(),
        );

        let a = graph.nodes.iter().find(|n| n.name.as_ref() == "A,X").unwrap();
        assert_eq!(a.id, global.index.node_id("A,X").unwrap());
        assert_eq!((a.power, a.first, a.last), (1, 2020, 2020));
        assert_eq!(graph.edges.len(), 1);
        assert_eq!(graph.edges[0].weight, 1);
        assert!(graph.edges[0].id.is_some());
    }

    #[test]
    fn min_power_drops_node_and_its_edges() {
        let table = LinkTable::new(vec![
            link("A,X", "B,X", 2020),
            link("A,X", "B,X", 2020),
            link("A,X", "Solo,S", 2020),
        ]);
        // power: A=3, B=2, Solo=1
        let global = aggregate(&table);
        let filters = GraphFilters {
            min_power: 2,
            ..Default::default()
        };
        let graph = build_window(&table, &global.index, Window::unbounded(), &filters);

        assert!(!names(&graph).contains(&"Solo,S"));
        let solo = global.index.node_id("Solo,S").unwrap();
        assert!(graph.edges.iter().all(|e| e.source != solo && e.target != solo));
        assert_referential_integrity(&graph);
    }

    #[test]
    fn max_edges_with_stumps_keeps_heaviest_component() {
        let mut links = Vec::new();
        links.extend((0..5).map(|i| link("A,X", "B,X", 2000 + i)));
        links.extend((0..3).map(|i| link("C,X", "D,X", 2000 + i)));
        let table = LinkTable::new(links);
        let global = aggregate(&table);
        let filters = GraphFilters {
            max_edges: 1,
            remove_stumps: true,
            ..Default::default()
        };
        let graph = build_window(&table, &global.index, Window::unbounded(), &filters);

        assert_eq!(graph.edges.len(), 1);
        assert_eq!(graph.edges[0].weight, 5);
        let mut kept = names(&graph);
        kept.sort_unstable();
        assert_eq!(kept, ["A,X", "B,X"]);
    }

    #[test]
    fn stumps_kept_when_disabled() {
        let table = LinkTable::new(vec![
            link("A,X", "B,X", 2020),
            link("A,X", "B,X", 2021),
            link("C,X", "D,X", 2020),
        ]);
        let global = aggregate(&table);
        let filters = GraphFilters {
            min_weight: 2,
            remove_stumps: false,
            ..Default::default()
        };
        let graph = build_window(&table, &global.index, Window::unbounded(), &filters);
        assert_eq!(graph.edges.len(), 1);
        assert_eq!(graph.nodes.len(), 4);

        let pruned = build_window(
            &table,
            &global.index,
            Window::unbounded(),
            &GraphFilters {
                remove_stumps: true,
                ..filters
            },
        );
        assert_eq!(pruned.nodes.len(), 2);
    }

    #[test]
    fn edge_cap_applies_after_join() {
        // Heaviest edge touches a node cut by max_nodes; the cap must still
        // keep one surviving edge.
        let mut links = Vec::new();
        links.extend((0..5).map(|i| link("Hub,H", "Cut,C", 2000 + i)));
        links.extend((0..4).map(|i| link("Hub,H", "Big,B", 2000 + i)));
        links.extend(["E1,E", "E2,E", "E3,E", "E4,E"].map(|e| link("Big,B", e, 2000)));
        let table = LinkTable::new(links);
        // power: Hub=9, Big=8, Cut=5 -> max_nodes=2 keeps Hub, Big
        let global = aggregate(&table);
        let filters = GraphFilters {
            max_nodes: 2,
            max_edges: 1,
            ..Default::default()
        };
        let graph = build_window(&table, &global.index, Window::unbounded(), &filters);

        assert_eq!(names(&graph), ["Hub,H", "Big,B"]);
        assert_eq!(graph.edges.len(), 1);
        assert_eq!(graph.edges[0].weight, 4);
        assert_referential_integrity(&graph);
    }

    #[test]
    fn recency_is_relative_to_window_end() {
        let table = LinkTable::new(vec![link("A,X", "B,X", 2015), link("B,X", "C,X", 2019)]);
        let global = aggregate(&table);
        let filters = GraphFilters {
            last: LastMode::Recency,
            ..Default::default()
        };
        let graph = build_window(&table, &global.index, Window::between(2010, 2020), &filters);
        let last = |name: &str| graph.nodes.iter().find(|n| n.name.as_ref() == name).unwrap().last;
        assert_eq!(last("A,X"), 5);
        assert_eq!(last("B,X"), 1);

        let unbounded = build_window(&table, &global.index, Window::unbounded(), &filters);
        let a = unbounded.nodes.iter().find(|n| n.name.as_ref() == "A,X").unwrap();
        assert_eq!(a.last, 4);
    }

    #[test]
    fn rolling_width_zero_is_single_year() {
        assert_eq!(Window::rolling(2020, 0), Window::between(2020, 2020));
    }

    #[test]
    fn rolling_width_saturates_at_year_min() {
        let w = Window::rolling(Year::MIN + 5, u32::MAX);
        assert_eq!(w, Window::between(Year::MIN, Year::MIN + 5));
        assert_eq!(Window::rolling(Year::MAX, u32::MAX).end, Some(Year::MAX));
    }

    #[test]
    fn widest_rolling_window_keeps_every_link() {
        let table = LinkTable::new(vec![link("A,X", "B,X", 1900), link("A,X", "B,X", 2020)]);
        let global = aggregate(&table);
        let graph = build_window(
            &table,
            &global.index,
            Window::rolling(2020, u32::MAX),
            &GraphFilters::default(),
        );
        assert_eq!(graph.links.len(), 2);
        assert_eq!(graph.edges[0].weight, 2);
    }

    #[test]
    fn empty_window_is_empty_graph() {
        let table = LinkTable::new(vec![link("A,X", "B,X", 2020)]);
        let global = aggregate(&table);
        let graph = build_window(
            &table,
            &global.index,
            Window::between(1990, 1995),
            &GraphFilters::default(),
        );
        assert!(graph.nodes.is_empty());
        assert!(graph.edges.is_empty());
        assert!(graph.links.is_empty());
    }

    #[test]
    fn widening_window_never_lowers_power_or_weight() {
        let table = LinkTable::new(vec![
            link("A,X", "B,X", 2010),
            link("A,X", "B,X", 2015),
            link("B,X", "C,X", 2018),
            link("A,X", "C,X", 2020),
        ]);
        let global = aggregate(&table);
        let filters = GraphFilters {
            remove_stumps: false,
            ..Default::default()
        };
        let mut previous: Option<WindowGraph> = None;
        for past_years in 0..12 {
            let window = Window::rolling(2020, past_years);
            let graph = build_window(&table, &global.index, window, &filters);
            if let Some(prev) = &previous {
                for node in &prev.nodes {
                    let now = graph.nodes.iter().find(|n| n.id == node.id).unwrap();
                    assert!(now.power >= node.power);
                }
                for edge in &prev.edges {
                    let now = graph
                        .edges
                        .iter()
                        .find(|e| (e.source, e.target) == (edge.source, edge.target))
                        .unwrap();
                    assert!(now.weight >= edge.weight);
                }
            }
            previous = Some(graph);
        }
    }
}
