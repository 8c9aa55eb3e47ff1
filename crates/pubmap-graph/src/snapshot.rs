//! Snapshot driver: one payload per data year plus one global payload.
//!
//! Years are independent once the global [`IdIndex`] exists, so they are
//! computed on the current rayon pool and collected back in year order.

use indicatif::{ParallelProgressIterator, ProgressBar};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::aggregate::{Edge, IdIndex, Node};
use crate::links::LinkTable;
use crate::stats::{SnapshotInfo, snapshot_info};
use crate::window::{GraphFilters, Window, build_window};
use crate::{AuthorName, Year};

/// How each year's window is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowMode {
    /// `[year - past_years, year]`
    #[default]
    Rolling,
    /// `[first data year, year]`
    Cumulative,
}

impl std::fmt::Display for WindowMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rolling => write!(f, "rolling"),
            Self::Cumulative => write!(f, "cumulative"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotParams {
    pub mode: WindowMode,
    /// Rolling window width; ignored in cumulative mode
    pub past_years: u32,
    pub filters: GraphFilters,
}

impl Default for SnapshotParams {
    fn default() -> Self {
        Self {
            mode: WindowMode::Rolling,
            past_years: 25,
            filters: GraphFilters::default(),
        }
    }
}

impl SnapshotParams {
    /// One `(year, window)` per distinct year in `links`, ascending.
    pub fn windows(&self, links: &LinkTable) -> Vec<(Year, Window)> {
        let years = links.years();
        let Some(&first) = years.first() else {
            return Vec::new();
        };
        years
            .into_iter()
            .map(|year| {
                let window = match self.mode {
                    WindowMode::Rolling => Window::rolling(year, self.past_years),
                    WindowMode::Cumulative => Window::between(first, year),
                };
                (year, window)
            })
            .collect()
    }
}

/// Node as it appears in a snapshot document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SnapshotNode {
    pub id: usize,
    pub name: AuthorName,
    pub power: usize,
    pub last: Year,
    pub group: u8,
}

impl From<Node> for SnapshotNode {
    fn from(node: Node) -> Self {
        Self {
            id: node.id,
            name: node.name,
            power: node.power,
            last: node.last,
            group: node.group,
        }
    }
}

/// `{"nodes": [...], "edges": [...], "info": {...}}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    /// Snapshot year; `None` for the global payload
    #[serde(skip)]
    pub year: Option<Year>,
    pub nodes: Vec<SnapshotNode>,
    pub edges: Vec<Edge>,
    pub info: SnapshotInfo,
}

impl Snapshot {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }
}

/// Filtered graph and summary for one window.
pub fn take_snapshot(
    links: &LinkTable,
    index: &IdIndex,
    year: Option<Year>,
    window: Window,
    filters: &GraphFilters,
) -> Snapshot {
    let graph = build_window(links, index, window, filters);
    let info = snapshot_info(&graph.links, &graph.nodes, &graph.edges);
    Snapshot {
        year,
        nodes: graph.nodes.into_iter().map(SnapshotNode::from).collect(),
        edges: graph.edges,
        info,
    }
}

/// Yearly snapshots in ascending year order plus the unbounded one.
#[derive(Debug, Clone)]
pub struct SnapshotSet {
    pub yearly: Vec<Snapshot>,
    pub global: Snapshot,
}

/// Compute every snapshot. `index` must come from the full link table.
pub fn run_snapshots(
    links: &LinkTable,
    index: &IdIndex,
    params: &SnapshotParams,
    pb: &ProgressBar,
) -> SnapshotSet {
    let windows = params.windows(links);
    pb.set_length(windows.len() as u64);

    let yearly: Vec<Snapshot> = windows
        .par_iter()
        .progress_with(pb.clone())
        .map(|&(year, window)| {
            let snapshot = take_snapshot(links, index, Some(year), window, &params.filters);
            log::debug!(
                "{year}: {} nodes, {} edges",
                snapshot.nodes.len(),
                snapshot.edges.len()
            );
            snapshot
        })
        .collect();

    let global = take_snapshot(links, index, None, Window::unbounded(), &params.filters);
    log::info!(
        "Built {} yearly snapshots ({} mode) + global ({} nodes, {} edges)",
        yearly.len(),
        params.mode,
        global.nodes.len(),
        global.edges.len()
    );

    SnapshotSet { yearly, global }
}
