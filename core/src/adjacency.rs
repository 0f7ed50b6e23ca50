use log::debug;

use crate::geometry::Point;
use crate::region::RegionSet;

// A neighbouring region and the boundary points the two have in common
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Neighbor {
    pub index: usize,
    pub shared: Vec<Point>,
}

// Index-based region adjacency: neighbors[i] lists the regions touching region i
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Adjacency {
    neighbors: Vec<Vec<Neighbor>>,
}

impl Adjacency {
    // Full O(R^2 * V^2) scan; two regions touch iff they share an exact boundary point
    pub fn build(regions: &RegionSet) -> Self {
        let mut neighbors = Vec::with_capacity(regions.len());

        for (i, a) in regions.iter().enumerate() {
            let mut list = Vec::new();
            for (j, b) in regions.iter().enumerate() {
                if i == j {
                    continue;
                }
                // Shared points in A-major order, duplicates kept
                let shared = a
                    .boundary
                    .iter()
                    .flat_map(|p| b.boundary.iter().filter(move |q| *q == p))
                    .copied()
                    .collect::<Vec<_>>();

                if !shared.is_empty() && shared != a.boundary {
                    list.push(Neighbor { index: j, shared });
                }
            }
            neighbors.push(list);
        }

        let adjacency = Self { neighbors };
        debug!(
            "built adjacency for {} regions ({} directed links)",
            adjacency.len(),
            adjacency.link_count()
        );
        adjacency
    }

    pub fn len(&self) -> usize {
        self.neighbors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.neighbors.is_empty()
    }

    pub fn neighbors(&self, index: usize) -> &[Neighbor] {
        self.neighbors.get(index).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn neighbor_indices(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        self.neighbors(index).iter().map(|n| n.index)
    }

    pub fn are_neighbors(&self, a: usize, b: usize) -> bool {
        self.neighbor_indices(a).any(|n| n == b)
    }

    pub fn link_count(&self) -> usize {
        self.neighbors.iter().map(Vec::len).sum()
    }

    pub fn is_symmetric(&self) -> bool {
        (0..self.len()).all(|a| self.neighbor_indices(a).all(|b| self.are_neighbors(b, a)))
    }
}
