//! Shared-boundary extraction: rings are cut at junctions and identical arcs
//! are stored once.

use std::collections::{HashMap, HashSet};

use super::quantize::Point;

/// Arc reference for a reversed arc, `-(index + 1)`.
pub fn reversed(index: usize) -> i64 {
    !(index as i64)
}

#[derive(Debug, Default)]
pub struct ArcTable {
    pub arcs: Vec<Vec<Point>>,
    lookup: HashMap<Vec<Point>, usize>,
}

impl ArcTable {
    /// Index of `arc`, reusing an equal or reversed arc when one exists.
    fn intern(&mut self, arc: Vec<Point>) -> i64 {
        if let Some(&index) = self.lookup.get(&arc) {
            return index as i64;
        }

        let backwards: Vec<Point> = arc.iter().rev().copied().collect();
        if let Some(&index) = self.lookup.get(&backwards) {
            return reversed(index);
        }

        let index = self.arcs.len();
        self.lookup.insert(arc.clone(), index);
        self.arcs.push(arc);
        index as i64
    }
}

/// Strips the closing point so every vertex appears once.
fn open_ring(ring: &[Point]) -> &[Point] {
    match ring {
        [first, .., last] if first == last => &ring[..ring.len() - 1],
        _ => ring,
    }
}

/// Points whose neighbours differ between visits.
fn find_junctions(rings: &[&[Point]]) -> HashSet<Point> {
    let mut neighbours: HashMap<Point, (Point, Point)> = HashMap::new();
    let mut junctions = HashSet::new();

    for ring in rings {
        let n = ring.len();
        for k in 0..n {
            let point = ring[k];
            let prev = ring[(k + n - 1) % n];
            let next = ring[(k + 1) % n];

            match neighbours.get(&point) {
                None => {
                    neighbours.insert(point, (prev, next));
                }
                Some(&(a, b)) => {
                    let same = (a == prev && b == next) || (a == next && b == prev);
                    if !same {
                        junctions.insert(point);
                    }
                }
            }
        }
    }

    junctions
}

fn cut_ring(ring: &[Point], junctions: &HashSet<Point>) -> Vec<Vec<Point>> {
    let n = ring.len();
    let start = ring.iter().position(|p| junctions.contains(p));

    // Rings without junctions start at their smallest point so that equal
    // rings produce equal arcs.
    let start = start.unwrap_or_else(|| {
        ring.iter()
            .enumerate()
            .min_by_key(|(_, p)| **p)
            .map(|(k, _)| k)
            .unwrap_or(0)
    });

    let rotated: Vec<Point> = ring[start..].iter().chain(&ring[..start]).copied().collect();

    let mut arcs = Vec::new();
    let mut from = 0;
    for k in 1..n {
        if junctions.contains(&rotated[k]) {
            arcs.push(rotated[from..=k].to_vec());
            from = k;
        }
    }

    let mut last = rotated[from..].to_vec();
    last.push(rotated[0]);
    arcs.push(last);

    arcs
}

/// Cuts every ring into arcs and returns the shared arc table with each
/// ring's arc references, in input order.
pub fn extract_arcs(rings: &[Vec<Point>]) -> (ArcTable, Vec<Vec<i64>>) {
    let open: Vec<&[Point]> = rings.iter().map(|r| open_ring(r)).collect();
    let junctions = find_junctions(&open);

    let mut table = ArcTable::default();
    let refs = open
        .iter()
        .map(|ring| {
            if ring.is_empty() {
                return vec![];
            }
            cut_ring(ring, &junctions)
                .into_iter()
                .map(|arc| table.intern(arc))
                .collect()
        })
        .collect();

    (table, refs)
}

/// First point absolute, the rest relative to their predecessor.
pub fn delta_encode(arc: &[Point]) -> Vec<Point> {
    let mut previous = [0, 0];
    arc.iter()
        .map(|&[x, y]| {
            let delta = [x - previous[0], y - previous[1]];
            previous = [x, y];
            delta
        })
        .collect()
}

pub fn delta_decode(arc: &[Point]) -> Vec<Point> {
    let mut position = [0, 0];
    arc.iter()
        .map(|&[dx, dy]| {
            position = [position[0] + dx, position[1] + dy];
            position
        })
        .collect()
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {

    use super::*;

    fn square(x: i64, y: i64) -> Vec<Point> {
        vec![[x + 1, y], [x + 1, y + 1], [x, y + 1], [x, y], [x + 1, y]]
    }

    fn point_count(table: &ArcTable) -> usize {
        table.arcs.iter().map(Vec::len).sum()
    }

    #[test]
    fn should_keep_lone_ring_as_one_arc() {
        let (table, refs) = extract_arcs(&[square(0, 0)]);

        assert_eq!(table.arcs.len(), 1);
        assert_eq!(refs, vec![vec![0]]);
        assert_eq!(table.arcs[0].first(), table.arcs[0].last());
        assert_eq!(table.arcs[0][0], [0, 0]);
    }

    #[test]
    fn should_share_common_edge() {
        let (table, refs) = extract_arcs(&[square(0, 0), square(1, 0)]);

        // the edge x = 1 is stored once and walked in opposite directions
        let shared: Vec<i64> = refs[0].iter().filter(|&&r| refs[1].contains(&!r)).copied().collect();
        assert_eq!(shared, vec![0]);

        let edge = &table.arcs[0];
        assert_eq!(edge.len(), 2);
        assert!(edge.iter().all(|p| p[0] == 1));
    }

    #[test]
    fn should_store_fewer_points_than_rings() {
        let rings: Vec<Vec<Point>> = (0..3).flat_map(|y| (0..3).map(move |x| square(x, y))).collect();
        let (table, refs) = extract_arcs(&rings);

        assert_eq!(refs.len(), 9);
        // 24 unit edges, the two edges at each outer corner merge into one arc
        assert_eq!(table.arcs.len(), 20);
        assert!(point_count(&table) < rings.iter().map(Vec::len).sum());
    }

    #[test]
    fn should_dedupe_identical_rings() {
        let mut backwards = square(0, 0);
        backwards.reverse();
        let (table, refs) = extract_arcs(&[square(0, 0), square(0, 0), backwards]);

        assert_eq!(table.arcs.len(), 1);
        assert_eq!(refs, vec![vec![0], vec![0], vec![!0]]);
    }

    #[test]
    fn should_round_trip_deltas() {
        let arc = vec![[5, 5], [7, 5], [7, 9], [5, 9]];
        let encoded = delta_encode(&arc);

        assert_eq!(encoded, vec![[5, 5], [2, 0], [0, 4], [-2, 0]]);
        assert_eq!(delta_decode(&encoded), arc);
    }
}
