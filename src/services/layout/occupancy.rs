//! Minute occupancy and the overlap-count resolver.
//!
//! The occupancy map discretizes each day into minute slots; the overlap
//! graph connects records sharing at least one occupied minute. Both are
//! rebuilt from scratch on every layout pass and never outlive it.

use std::collections::{BTreeMap, BTreeSet};

use crate::models::segment::OverflowInfo;

use super::buckets::MINUTES_PER_DAY;

/// Grid time map: (day, minute-of-day) -> occupying record ids.
#[derive(Debug, Default)]
pub struct MinuteOccupancy {
    days: [BTreeMap<u32, Vec<String>>; 7],
}

impl MinuteOccupancy {
    pub(crate) fn insert(&mut self, day: usize, from: u32, to: u32, record_id: &str) {
        let Some(minutes) = self.days.get_mut(day) else {
            return;
        };
        let to = to.min(MINUTES_PER_DAY - 1);
        for minute in from..=to {
            minutes
                .entry(minute)
                .or_default()
                .push(record_id.to_string());
        }
    }

    /// Number of records occupying a minute slot.
    pub fn count(&self, day: usize, minute: u32) -> usize {
        self.days
            .get(day)
            .and_then(|minutes| minutes.get(&minute))
            .map_or(0, Vec::len)
    }

    /// Record ids occupying a minute slot.
    pub fn ids(&self, day: usize, minute: u32) -> &[String] {
        self.days
            .get(day)
            .and_then(|minutes| minutes.get(&minute))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Overflow indicator for one hour bucket: the busiest minute in the
    /// hour, less the visible column cap.
    pub fn overflow_at(&self, day: usize, hour: u32, max_visible: usize) -> OverflowInfo {
        let from = hour * 60;
        let busiest = (from..from + 60)
            .map(|minute| self.count(day, minute))
            .max()
            .unwrap_or(0);
        let overflow_count = busiest.saturating_sub(max_visible);
        OverflowInfo {
            is_overflow: overflow_count > 0,
            overflow_count,
        }
    }
}

/// Undirected adjacency between one day's records that share an occupied
/// minute. Derived from the occupancy map, not from pairwise interval
/// comparison, so ranges touching only at a boundary instant may or may
/// not connect depending on minute rounding.
#[derive(Debug, Default)]
pub(crate) struct OverlapGraph {
    edges: BTreeMap<String, BTreeSet<String>>,
}

impl OverlapGraph {
    pub(crate) fn for_day(occupancy: &MinuteOccupancy, day: usize) -> Self {
        let mut graph = Self::default();
        let Some(minutes) = occupancy.days.get(day) else {
            return graph;
        };
        for ids in minutes.values() {
            for (i, a) in ids.iter().enumerate() {
                graph.edges.entry(a.clone()).or_default();
                for b in &ids[i + 1..] {
                    if a == b {
                        continue;
                    }
                    graph.edges.entry(a.clone()).or_default().insert(b.clone());
                    graph.edges.entry(b.clone()).or_default().insert(a.clone());
                }
            }
        }
        graph
    }

    /// Maximum concurrent overlaps seen from `record_id`.
    ///
    /// Depth-first search accumulating `max(1, neighbor depth + 1)`, with a
    /// visited set guarding cycles: already-seen nodes suppress alternate
    /// paths, so the result is a per-call depth bound rather than a true
    /// clique size. Capped at the day's column count.
    pub(crate) fn max_overlaps(&self, record_id: &str, column_cap: usize) -> usize {
        let mut visited = BTreeSet::new();
        let depth = self.depth_from(record_id, &mut visited);
        depth.clamp(1, column_cap.max(1))
    }

    fn depth_from(&self, record_id: &str, visited: &mut BTreeSet<String>) -> usize {
        visited.insert(record_id.to_string());
        let mut depth = 1;
        if let Some(neighbors) = self.edges.get(record_id) {
            for neighbor in neighbors {
                if !visited.contains(neighbor) {
                    depth = depth.max(1 + self.depth_from(neighbor, visited));
                }
            }
        }
        depth
    }
}
