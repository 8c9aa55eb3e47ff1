//! Global aggregation: node and edge tables with stable ids.
//!
//! Node ids are dense `0..N` in descending-power order (ties by name) and
//! are fixed here, once per run. Windowed graphs look them up through
//! [`IdIndex`] and never reassign them.

use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::links::{CoauthorLink, LinkTable};
use crate::{AuthorName, Year};

/// Reserved author-type class; every author is group 1 for now.
pub const DEFAULT_GROUP: u8 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    pub id: usize,
    pub name: AuthorName,
    pub power: usize,
    pub first: Year,
    pub last: Year,
    pub group: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Edge {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<usize>,
    pub source: usize,
    pub target: usize,
    pub weight: usize,
}

/// Interaction count and activity span of one author within a scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthorStats {
    pub power: usize,
    pub first: Year,
    pub last: Year,
}

/// Per-author stats over `links`, sorted by power desc then name asc.
///
/// Every link counts once for `a` and once for `b`.
pub fn author_stats<'a>(
    links: impl IntoIterator<Item = &'a CoauthorLink>,
) -> Vec<(AuthorName, AuthorStats)> {
    let mut acc: FxHashMap<&'a AuthorName, AuthorStats> = FxHashMap::default();
    for link in links {
        for name in [&link.a, &link.b] {
            acc.entry(name)
                .and_modify(|s| {
                    s.power += 1;
                    s.first = s.first.min(link.year);
                    s.last = s.last.max(link.year);
                })
                .or_insert(AuthorStats {
                    power: 1,
                    first: link.year,
                    last: link.year,
                });
        }
    }

    let mut stats: Vec<(AuthorName, AuthorStats)> =
        acc.into_iter().map(|(name, s)| (name.clone(), s)).collect();
    stats.sort_unstable_by(|(na, sa), (nb, sb)| sb.power.cmp(&sa.power).then_with(|| na.cmp(nb)));
    stats
}

/// Link count per canonical pair, sorted by weight desc then pair asc.
///
/// A publication contributes at most one row per pair, so the weight is the
/// number of publications the two authors share.
pub fn pair_weights<'a>(
    links: impl IntoIterator<Item = &'a CoauthorLink>,
) -> Vec<((AuthorName, AuthorName), usize)> {
    let mut acc: FxHashMap<(&'a AuthorName, &'a AuthorName), usize> = FxHashMap::default();
    for link in links {
        *acc.entry((&link.a, &link.b)).or_default() += 1;
    }

    let mut weights: Vec<((AuthorName, AuthorName), usize)> = acc
        .into_iter()
        .map(|((a, b), w)| ((a.clone(), b.clone()), w))
        .collect();
    weights.sort_unstable_by(|(pa, wa), (pb, wb)| wb.cmp(wa).then_with(|| pa.cmp(pb)));
    weights
}

/// Read-only lookup from author name / node pair to global ids.
#[derive(Debug, Clone, Default)]
pub struct IdIndex {
    node_ids: FxHashMap<AuthorName, usize>,
    edge_ids: FxHashMap<(usize, usize), usize>,
}

impl IdIndex {
    pub fn node_id(&self, name: &str) -> Option<usize> {
        self.node_ids.get(name).copied()
    }

    pub fn edge_id(&self, source: usize, target: usize) -> Option<usize> {
        self.edge_ids.get(&(source, target)).copied()
    }

    pub fn node_count(&self) -> usize {
        self.node_ids.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_ids.len()
    }
}

/// Full-range graph plus the id index every window reuses.
#[derive(Debug, Clone, Default)]
pub struct GlobalGraph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    pub index: IdIndex,
}

/// Aggregate the complete link table. An empty table gives an empty graph.
pub fn aggregate(links: &LinkTable) -> GlobalGraph {
    let nodes: Vec<Node> = author_stats(links.links())
        .into_iter()
        .enumerate()
        .map(|(id, (name, s))| Node {
            id,
            name,
            power: s.power,
            first: s.first,
            last: s.last,
            group: DEFAULT_GROUP,
        })
        .collect();

    let mut index = IdIndex {
        node_ids: nodes.iter().map(|n| (n.name.clone(), n.id)).collect(),
        edge_ids: FxHashMap::default(),
    };

    let mut edges = Vec::new();
    for ((a, b), weight) in pair_weights(links.links()) {
        let (Some(source), Some(target)) = (index.node_id(&a), index.node_id(&b)) else {
            log::debug!("Dropping edge {a} - {b}: endpoint without node id");
            continue;
        };
        let id = edges.len();
        index.edge_ids.insert((source, target), id);
        edges.push(Edge {
            id: Some(id),
            source,
            target,
            weight,
        });
    }

    log::info!(
        "Global graph: {} nodes, {} edges",
        nodes.len(),
        edges.len()
    );
    GlobalGraph {
        nodes,
        edges,
        index,
    }
}
