use std::collections::HashMap;

/// Directed note-name graph with insertion-ordered vertices.
///
/// Vertices cover every note name and every link target; dangling targets are
/// ordinary vertices with no note behind them. Edge lists keep duplicates and
/// source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteGraph {
    order: Vec<String>,
    slots: HashMap<String, usize>,
    outgoing: Vec<Vec<String>>,
    incoming: Vec<Vec<String>>,
    edge_count: usize,
}

impl NoteGraph {
    /// Build from `(note name, outgoing links)` pairs.
    ///
    /// Note names are registered first, in input order, so vertex order
    /// matches discovery order; link targets follow as they are met. Runs in
    /// time linear in the number of links.
    #[must_use]
    pub fn build<'a, I>(notes: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a [String])>,
        I::IntoIter: Clone,
    {
        let notes = notes.into_iter();
        let mut graph = Self::default();
        for (name, _) in notes.clone() {
            graph.slot(name);
        }
        for (name, links) in notes {
            for target in links {
                graph.add_edge(name, target);
            }
        }
        graph
    }

    fn slot(&mut self, name: &str) -> usize {
        if let Some(&slot) = self.slots.get(name) {
            return slot;
        }
        let slot = self.order.len();
        self.order.push(name.to_string());
        self.slots.insert(name.to_string(), slot);
        self.outgoing.push(Vec::new());
        self.incoming.push(Vec::new());
        slot
    }

    fn add_edge(&mut self, from: &str, to: &str) {
        let from_slot = self.slot(from);
        let to_slot = self.slot(to);
        self.outgoing[from_slot].push(to.to_string());
        self.incoming[to_slot].push(from.to_string());
        self.edge_count += 1;
    }

    /// Targets linked from `name`; empty for unknown names.
    #[must_use]
    pub fn outgoing(&self, name: &str) -> &[String] {
        match self.slots.get(name) {
            Some(&slot) => &self.outgoing[slot],
            None => &[],
        }
    }

    /// Sources linking to `name`; empty for unknown names.
    #[must_use]
    pub fn incoming(&self, name: &str) -> &[String] {
        match self.slots.get(name) {
            Some(&slot) => &self.incoming[slot],
            None => &[],
        }
    }

    /// Whether `name` is a vertex.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.slots.contains_key(name)
    }

    /// Vertices in insertion order.
    pub fn vertices(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Every recorded edge as `(source, target)`, grouped by source vertex.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> {
        self.order.iter().zip(&self.outgoing).flat_map(|(from, targets)| {
            targets
                .iter()
                .map(move |to| (from.as_str(), to.as_str()))
        })
    }

    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.order.len()
    }

    /// Number of recorded edges, duplicates included.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }
}

/// Build a [`NoteGraph`] from owned `(name, links)` pairs.
#[must_use]
pub fn build_graph(notes: &[(String, Vec<String>)]) -> NoteGraph {
    NoteGraph::build(
        notes
            .iter()
            .map(|(name, links)| (name.as_str(), links.as_slice())),
    )
}
