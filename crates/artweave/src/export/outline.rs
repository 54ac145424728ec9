//! Indented text outline of a diagram.
//!
//! The walk starts at the central node if there is one, otherwise at the
//! first node without incoming edges, otherwise at the first node. Children
//! are visited in case-insensitive label order. A node reached again on the
//! current path is printed once more with a `(cycle)` marker and not
//! expanded. Nodes the walk cannot reach are appended as further roots.

use std::{fmt::Write as _, io::Write};

use indexmap::{IndexMap, IndexSet};

use artweave_core::{diagram::DiagramPayload, label::truncate_label};

use super::{Error, Exporter};

const INDENT: &str = "  ";

/// Text outline backend.
#[derive(Debug, Default, Clone, Copy)]
pub struct Outline;

impl Outline {
    /// Renders the outline as a string, one node per line.
    pub fn render(&self, diagram: &DiagramPayload) -> String {
        let labels: IndexMap<&str, &str> = diagram
            .nodes
            .iter()
            .map(|node| (node.id.as_str(), node.label.as_str()))
            .collect();
        let mut children: IndexMap<&str, Vec<&str>> = IndexMap::new();
        let mut has_parent = IndexSet::new();
        for edge in &diagram.edges {
            if labels.contains_key(edge.source.as_str()) && labels.contains_key(edge.target.as_str())
            {
                children
                    .entry(edge.source.as_str())
                    .or_default()
                    .push(edge.target.as_str());
                has_parent.insert(edge.target.as_str());
            }
        }
        for targets in children.values_mut() {
            targets.sort_by_key(|id| labels[*id].to_lowercase());
            targets.dedup();
        }

        let root = diagram
            .central_node()
            .map(|node| node.id.as_str())
            .or_else(|| labels.keys().copied().find(|id| !has_parent.contains(id)))
            .or_else(|| labels.keys().copied().next());

        let mut walk = Walk {
            labels: &labels,
            children: &children,
            visited: IndexSet::new(),
            path: Vec::new(),
            out: String::new(),
        };
        if let Some(root) = root {
            walk.visit(root, 0);
        }
        for id in labels.keys().copied() {
            if !walk.visited.contains(id) {
                walk.visit(id, 0);
            }
        }
        walk.out
    }
}

struct Walk<'a> {
    labels: &'a IndexMap<&'a str, &'a str>,
    children: &'a IndexMap<&'a str, Vec<&'a str>>,
    visited: IndexSet<&'a str>,
    path: Vec<&'a str>,
    out: String,
}

impl<'a> Walk<'a> {
    fn visit(&mut self, id: &'a str, depth: usize) {
        let label = truncate_label(self.labels[id]).replace('\n', " ");
        let indent = INDENT.repeat(depth);
        if self.path.contains(&id) {
            writeln!(self.out, "{indent}{label} (cycle)").expect("writing to a String cannot fail");
            return;
        }
        writeln!(self.out, "{indent}{label}").expect("writing to a String cannot fail");
        self.visited.insert(id);

        self.path.push(id);
        if let Some(targets) = self.children.get(id) {
            for &target in targets {
                self.visit(target, depth + 1);
            }
        }
        self.path.pop();
    }
}

impl Exporter for Outline {
    fn export(&self, diagram: &DiagramPayload, out: &mut dyn Write) -> Result<(), Error> {
        out.write_all(self.render(diagram).as_bytes())?;
        Ok(())
    }
}
