//! Note link graph and connectivity analysis.

mod build;
mod connectivity;

pub use build::{NoteGraph, build_graph};
pub use connectivity::{
    ConnectivityClass, ConnectivityCounts, ConnectivityReport, HubRecord, NoteConnectivity,
    analyze_connectivity, classify_connectivity, find_hubs,
};
