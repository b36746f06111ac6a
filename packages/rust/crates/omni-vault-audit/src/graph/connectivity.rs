use serde::{Deserialize, Serialize};

use super::build::NoteGraph;

/// Connectivity class of a known note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectivityClass {
    /// Has both incoming and outgoing links.
    WellConnected,
    /// Links out, nothing links in.
    OnlyOutgoing,
    /// Linked to, links nowhere.
    OnlyIncoming,
    /// No links in either direction.
    Orphan,
}

impl ConnectivityClass {
    /// Class from edge presence.
    #[must_use]
    pub const fn from_presence(has_incoming: bool, has_outgoing: bool) -> Self {
        match (has_incoming, has_outgoing) {
            (true, true) => Self::WellConnected,
            (false, true) => Self::OnlyOutgoing,
            (true, false) => Self::OnlyIncoming,
            (false, false) => Self::Orphan,
        }
    }
}

/// Connectivity of one note name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteConnectivity {
    /// Note display name.
    pub name: String,
    /// Assigned class.
    pub class: ConnectivityClass,
    /// Incoming edge count, duplicates included.
    pub incoming_count: usize,
    /// Outgoing edge count, duplicates included.
    pub outgoing_count: usize,
}

/// Note whose total link count reaches the hub threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HubRecord {
    /// Note display name.
    pub name: String,
    /// Incoming edge count.
    pub incoming_count: usize,
    /// Outgoing edge count.
    pub outgoing_count: usize,
    /// `incoming_count + outgoing_count`.
    pub total_count: usize,
}

/// Number of notes per class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectivityCounts {
    /// `well_connected` notes.
    pub well_connected: usize,
    /// `only_outgoing` notes.
    pub only_outgoing: usize,
    /// `only_incoming` notes.
    pub only_incoming: usize,
    /// `orphan` notes.
    pub orphan: usize,
}

impl ConnectivityCounts {
    fn record(&mut self, class: ConnectivityClass) {
        match class {
            ConnectivityClass::WellConnected => self.well_connected += 1,
            ConnectivityClass::OnlyOutgoing => self.only_outgoing += 1,
            ConnectivityClass::OnlyIncoming => self.only_incoming += 1,
            ConnectivityClass::Orphan => self.orphan += 1,
        }
    }

    /// Sum over all classes.
    #[must_use]
    pub fn total(&self) -> usize {
        self.well_connected + self.only_outgoing + self.only_incoming + self.orphan
    }
}

/// Connectivity classification plus the ranked hub list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectivityReport {
    /// One row per known note name, in discovery order.
    pub notes: Vec<NoteConnectivity>,
    /// Per-class totals.
    pub counts: ConnectivityCounts,
    /// Hubs by `total_count` descending, ties in discovery order.
    pub hubs: Vec<HubRecord>,
}

impl ConnectivityReport {
    /// Names assigned `class`, in discovery order.
    pub fn names_in(&self, class: ConnectivityClass) -> impl Iterator<Item = &str> {
        self.notes
            .iter()
            .filter(move |row| row.class == class)
            .map(|row| row.name.as_str())
    }

    /// Class of `name`, if it is a known note.
    #[must_use]
    pub fn class_of(&self, name: &str) -> Option<ConnectivityClass> {
        self.notes
            .iter()
            .find(|row| row.name == name)
            .map(|row| row.class)
    }
}

/// Assign exactly one class to each name in `note_names`.
///
/// Dangling vertices that are not in `note_names` are not classified, but
/// their edges still count toward the notes they touch.
#[must_use]
pub fn classify_connectivity(graph: &NoteGraph, note_names: &[String]) -> Vec<NoteConnectivity> {
    note_names
        .iter()
        .map(|name| {
            let incoming_count = graph.incoming(name).len();
            let outgoing_count = graph.outgoing(name).len();
            NoteConnectivity {
                name: name.clone(),
                class: ConnectivityClass::from_presence(incoming_count > 0, outgoing_count > 0),
                incoming_count,
                outgoing_count,
            }
        })
        .collect()
}

/// Notes with `incoming + outgoing >= threshold`, ranked by total descending.
#[must_use]
pub fn find_hubs(graph: &NoteGraph, note_names: &[String], threshold: usize) -> Vec<HubRecord> {
    let mut hubs: Vec<HubRecord> = note_names
        .iter()
        .filter_map(|name| {
            let incoming_count = graph.incoming(name).len();
            let outgoing_count = graph.outgoing(name).len();
            let total_count = incoming_count + outgoing_count;
            (total_count >= threshold).then(|| HubRecord {
                name: name.clone(),
                incoming_count,
                outgoing_count,
                total_count,
            })
        })
        .collect();
    // Stable: equal totals keep discovery order.
    hubs.sort_by(|a, b| b.total_count.cmp(&a.total_count));
    hubs
}

/// Classification and hub detection over the same graph.
#[must_use]
pub fn analyze_connectivity(
    graph: &NoteGraph,
    note_names: &[String],
    hub_threshold: usize,
) -> ConnectivityReport {
    let notes = classify_connectivity(graph, note_names);
    let mut counts = ConnectivityCounts::default();
    for row in &notes {
        counts.record(row.class);
    }
    ConnectivityReport {
        notes,
        counts,
        hubs: find_hubs(graph, note_names, hub_threshold),
    }
}
