//! Pareto frontier over two maximized objectives: population and latitude.
//!
//! A point is on the frontier when no other point is at least as large in
//! both dimensions and strictly larger in one. Exact duplicates dominate
//! neither each other, so both survive.

use crate::domain::model::{CityRecord, FrontierPoint};

/// Anything with the two frontier objectives.
pub trait FrontierKey {
    fn population(&self) -> u64;
    fn latitude(&self) -> f64;
}

impl FrontierKey for FrontierPoint {
    fn population(&self) -> u64 {
        self.population
    }
    fn latitude(&self) -> f64 {
        self.latitude
    }
}

impl FrontierKey for CityRecord {
    fn population(&self) -> u64 {
        self.population
    }
    fn latitude(&self) -> f64 {
        self.latitude
    }
}

impl<T: FrontierKey> FrontierKey for &T {
    fn population(&self) -> u64 {
        (**self).population()
    }
    fn latitude(&self) -> f64 {
        (**self).latitude()
    }
}

/// Classic Pareto dominance: `a` dominates `b` when it is >= in both
/// dimensions and > in at least one.
pub fn dominates<A: FrontierKey, B: FrontierKey>(a: &A, b: &B) -> bool {
    a.population() >= b.population()
        && a.latitude() >= b.latitude()
        && (a.population() > b.population() || a.latitude() > b.latitude())
}

/// Indices of the non-dominated points, ascending (input order preserved).
///
/// Sort-and-sweep: walk latitude groups from north to south carrying the best
/// population seen strictly further north. Within a group only the group
/// maximum survives the equal-latitude comparison; ties on both dimensions
/// all survive. Empty input yields an empty frontier.
pub fn frontier_indices<T: FrontierKey>(points: &[T]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..points.len()).collect();
    order.sort_by(|&a, &b| {
        points[b]
            .latitude()
            .total_cmp(&points[a].latitude())
            .then_with(|| points[b].population().cmp(&points[a].population()))
    });

    let mut keep = Vec::new();
    let mut best_pop_north: Option<u64> = None;
    let mut i = 0;
    while i < order.len() {
        let lat = points[order[i]].latitude();
        let mut j = i;
        while j < order.len() && points[order[j]].latitude() == lat {
            j += 1;
        }
        // Sorted descending within the group, so the first entry is its max.
        let group_max = points[order[i]].population();
        for &idx in &order[i..j] {
            let pop = points[idx].population();
            let dominated_from_north = best_pop_north.is_some_and(|p| p >= pop);
            if !dominated_from_north && pop == group_max {
                keep.push(idx);
            }
        }
        best_pop_north = Some(best_pop_north.map_or(group_max, |p| p.max(group_max)));
        i = j;
    }

    keep.sort_unstable();
    keep
}

/// The non-dominated subset itself, in input order.
pub fn pareto_frontier<T: FrontierKey>(points: &[T]) -> Vec<&T> {
    frontier_indices(points)
        .into_iter()
        .map(|i| &points[i])
        .collect()
}
