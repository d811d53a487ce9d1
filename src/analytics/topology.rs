//! Connectivity, cycles and reciprocal pairs over the foreign-key graph.
//!
//! Only keys whose endpoints both exist in the schema take part.

use std::collections::{HashMap, HashSet};

use crate::schema::Schema;

/// Index-based view of the schema's foreign-key graph.
pub struct FkGraph {
    node_count: usize,
    /// Directed edges (from, to) by table index, in key order.
    edges: Vec<(usize, usize)>,
    /// Keys with at least one endpoint outside the schema.
    dangling: usize,
}

impl FkGraph {
    pub fn new(schema: &Schema) -> Self {
        let index: HashMap<&str, usize> = schema
            .tables
            .iter()
            .enumerate()
            .map(|(i, t)| (t.name.as_str(), i))
            .collect();

        let mut edges = Vec::with_capacity(schema.foreign_keys.len());
        let mut dangling = 0;
        for fk in &schema.foreign_keys {
            match (
                index.get(fk.from.table.as_str()),
                index.get(fk.to.table.as_str()),
            ) {
                (Some(&from), Some(&to)) => edges.push((from, to)),
                _ => dangling += 1,
            }
        }

        Self {
            node_count: schema.tables.len(),
            edges,
            dangling,
        }
    }

    pub fn dangling_count(&self) -> usize {
        self.dangling
    }

    /// Connected components treating every key as an undirected link.
    /// Isolated tables are singleton components.
    pub fn component_count(&self) -> usize {
        let mut uf = UnionFind::new(self.node_count);
        for &(a, b) in &self.edges {
            uf.union(a, b);
        }
        uf.set_count()
    }

    /// Three-colour depth-first search for a directed cycle. A self
    /// reference is a cycle.
    pub fn has_cycle(&self) -> bool {
        #[derive(Clone, Copy, PartialEq)]
        enum Color {
            White,
            Gray,
            Black,
        }

        let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); self.node_count];
        for &(from, to) in &self.edges {
            adjacency[from].push(to);
        }

        let mut color = vec![Color::White; self.node_count];
        for root in 0..self.node_count {
            if color[root] != Color::White {
                continue;
            }
            // (node, next neighbour to visit)
            let mut stack: Vec<(usize, usize)> = vec![(root, 0)];
            color[root] = Color::Gray;

            while let Some(top) = stack.last_mut() {
                let (node, next) = *top;
                if let Some(&neighbour) = adjacency[node].get(next) {
                    top.1 += 1;
                    match color[neighbour] {
                        Color::Gray => return true,
                        Color::White => {
                            color[neighbour] = Color::Gray;
                            stack.push((neighbour, 0));
                        }
                        Color::Black => {}
                    }
                } else {
                    color[node] = Color::Black;
                    stack.pop();
                }
            }
        }
        false
    }

    /// Unordered pairs {A, B}, A != B, linked in both directions. Each pair
    /// counts once however many keys run each way.
    pub fn reciprocal_pairs(&self) -> usize {
        let directed: HashSet<(usize, usize)> = self
            .edges
            .iter()
            .copied()
            .filter(|(a, b)| a != b)
            .collect();
        directed
            .iter()
            .filter(|&&(a, b)| a < b && directed.contains(&(b, a)))
            .count()
    }
}

struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl UnionFind {
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    pub fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    pub fn union(&mut self, a: usize, b: usize) {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra == rb {
            return;
        }
        match self.rank[ra].cmp(&self.rank[rb]) {
            std::cmp::Ordering::Less => self.parent[ra] = rb,
            std::cmp::Ordering::Greater => self.parent[rb] = ra,
            std::cmp::Ordering::Equal => {
                self.parent[rb] = ra;
                self.rank[ra] += 1;
            }
        }
    }

    pub fn set_count(&mut self) -> usize {
        (0..self.parent.len()).filter(|&i| self.find(i) == i).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ColumnRef, ForeignKey, Table};

    fn graph(names: &[&str], fks: &[(&str, &str)]) -> FkGraph {
        let schema = Schema::new(
            names.iter().map(|n| Table::new(*n)).collect(),
            fks.iter()
                .enumerate()
                .map(|(i, (f, t))| {
                    ForeignKey::new(ColumnRef::new(*f, format!("c{}", i)), ColumnRef::new(*t, "id"))
                })
                .collect(),
        );
        FkGraph::new(&schema)
    }

    #[test]
    fn test_cycle_detection() {
        let cyclic = graph(&["a", "b", "c"], &[("a", "b"), ("b", "c"), ("c", "a")]);
        assert!(cyclic.has_cycle());

        let acyclic = graph(&["a", "b", "c"], &[("a", "b"), ("b", "c")]);
        assert!(!acyclic.has_cycle());
    }

    #[test]
    fn test_diamond_is_not_a_cycle() {
        let g = graph(
            &["a", "b", "c", "d"],
            &[("a", "b"), ("a", "c"), ("b", "d"), ("c", "d")],
        );
        assert!(!g.has_cycle());
    }

    #[test]
    fn test_self_loop_is_cycle() {
        let g = graph(&["x"], &[("x", "x")]);
        assert!(g.has_cycle());
    }

    #[test]
    fn test_components() {
        let g = graph(
            &["a", "b", "c", "d", "e"],
            &[("a", "b"), ("c", "b"), ("d", "d")],
        );
        // {a, b, c}, {d}, {e}
        assert_eq!(g.component_count(), 3);
        assert_eq!(graph(&[], &[]).component_count(), 0);
    }

    #[test]
    fn test_reciprocal_pairs() {
        let g = graph(&["a", "b"], &[("a", "b"), ("b", "a")]);
        assert_eq!(g.reciprocal_pairs(), 1);

        let g = graph(&["a", "b"], &[("a", "b"), ("b", "a"), ("a", "b")]);
        assert_eq!(g.reciprocal_pairs(), 1);

        let g = graph(&["a", "b"], &[("a", "a"), ("a", "b")]);
        assert_eq!(g.reciprocal_pairs(), 0);
    }

    #[test]
    fn test_dangling_edges_are_ignored() {
        let g = graph(&["a"], &[("a", "ghost"), ("ghost", "a")]);
        assert_eq!(g.dangling_count(), 2);
        assert!(!g.has_cycle());
        assert_eq!(g.component_count(), 1);
    }
}
