//! Ring assembly: joins boundary fragments into closed rings and rings into
//! polygons with holes.

use geo::{Area, Contains, Coord, InteriorPoint, LineString, MultiPolygon, Polygon};
use hashbrown::HashMap;

type EndpointKey = (u64, u64);

fn endpoint_key(c: &Coord<f64>) -> EndpointKey {
    (c.x.to_bits(), c.y.to_bits())
}

fn is_closed(coords: &[Coord<f64>]) -> bool {
    coords.len() >= 4 && coords.first() == coords.last()
}

/// Open fragments looked up by either endpoint
struct FragmentPool {
    fragments: Vec<Option<Vec<Coord<f64>>>>,
    by_endpoint: HashMap<EndpointKey, Vec<usize>>,
}

impl FragmentPool {
    fn new() -> Self {
        Self {
            fragments: Vec::new(),
            by_endpoint: HashMap::new(),
        }
    }

    fn insert(&mut self, fragment: Vec<Coord<f64>>) {
        let idx = self.fragments.len();
        if let (Some(first), Some(last)) = (fragment.first(), fragment.last()) {
            self.by_endpoint
                .entry(endpoint_key(first))
                .or_default()
                .push(idx);
            self.by_endpoint
                .entry(endpoint_key(last))
                .or_default()
                .push(idx);
        }
        self.fragments.push(Some(fragment));
    }

    fn take(&mut self, idx: usize) -> Option<Vec<Coord<f64>>> {
        self.fragments.get_mut(idx).and_then(Option::take)
    }

    /// Take any remaining fragment with an endpoint at `at`, oriented so it
    /// starts there
    fn take_touching(&mut self, at: Coord<f64>) -> Option<Vec<Coord<f64>>> {
        let idx = self
            .by_endpoint
            .get(&endpoint_key(&at))?
            .iter()
            .copied()
            .find(|&i| matches!(self.fragments.get(i), Some(Some(_))))?;

        let mut fragment = self.take(idx)?;
        if fragment.first() != Some(&at) {
            fragment.reverse();
        }
        Some(fragment)
    }
}

/// Join fragments whose endpoints meet into closed rings.
///
/// Fragments are reversed where needed. A chain that can not be joined into
/// a loop is closed with a straight segment if it has at least three
/// coordinates, otherwise it is dropped.
pub fn assemble_rings(fragments: Vec<Vec<Coord<f64>>>) -> Vec<LineString<f64>> {
    let mut rings = Vec::new();
    let mut pool = FragmentPool::new();

    for fragment in fragments {
        if is_closed(&fragment) {
            rings.push(LineString::new(fragment));
        } else if fragment.len() >= 2 {
            pool.insert(fragment);
        }
    }

    for idx in 0..pool.fragments.len() {
        let Some(mut current) = pool.take(idx) else {
            continue;
        };

        // Grow forward from the end
        while !is_closed(&current) {
            let Some(&end) = current.last() else { break };
            match pool.take_touching(end) {
                Some(next) => current.extend(next.into_iter().skip(1)),
                None => break,
            }
        }

        // Then backwards from the start
        while !is_closed(&current) {
            let Some(&start) = current.first() else {
                break;
            };
            match pool.take_touching(start) {
                Some(mut prev) => {
                    prev.reverse();
                    prev.pop();
                    prev.extend(current);
                    current = prev;
                }
                None => break,
            }
        }

        if current.len() >= 3 && current.first() != current.last() {
            current.push(current[0]);
        }
        if is_closed(&current) {
            rings.push(LineString::new(current));
        }
    }

    rings
}

/// Turn closed rings into polygons.
///
/// Rings are taken largest first. A ring lying inside an earlier shell (and
/// not inside one of its holes) becomes a hole of the smallest such shell;
/// any other ring starts a new shell.
pub fn assemble_polygons(rings: Vec<LineString<f64>>) -> MultiPolygon<f64> {
    let mut by_area: Vec<(f64, LineString<f64>)> = rings
        .into_iter()
        .map(|ring| (Polygon::new(ring.clone(), vec![]).unsigned_area(), ring))
        .filter(|(area, _)| *area > 0.0)
        .collect();
    by_area.sort_by(|a, b| b.0.total_cmp(&a.0));

    let mut shells: Vec<Polygon<f64>> = Vec::new();

    for (_, ring) in by_area {
        let Some(probe) = Polygon::new(ring.clone(), vec![]).interior_point() else {
            continue;
        };

        let parent = shells.iter().rposition(|shell| {
            Polygon::new(shell.exterior().clone(), vec![]).contains(&probe)
                && !shell
                    .interiors()
                    .iter()
                    .any(|hole| Polygon::new(hole.clone(), vec![]).contains(&probe))
        });

        match parent {
            Some(idx) => shells[idx].interiors_push(ring),
            None => shells.push(Polygon::new(ring, vec![])),
        }
    }

    MultiPolygon::new(shells)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::coord;

    fn square(min: f64, max: f64) -> Vec<Coord<f64>> {
        vec![
            coord! { x: min, y: min },
            coord! { x: max, y: min },
            coord! { x: max, y: max },
            coord! { x: min, y: max },
            coord! { x: min, y: min },
        ]
    }

    #[test]
    fn test_closed_ring_passes_through() {
        let rings = assemble_rings(vec![square(0.0, 1.0)]);
        assert_eq!(rings.len(), 1);
        assert_eq!(rings[0].0.len(), 5);
    }

    #[test]
    fn test_split_ring_joins() {
        let p = square(0.0, 1.0);
        // p0 -> p1 -> p2, then p2 -> p3 -> p0
        let s1 = vec![p[0], p[1], p[2]];
        let s2 = vec![p[2], p[3], p[0]];

        let rings = assemble_rings(vec![s1.clone(), s2.clone()]);
        assert_eq!(rings.len(), 1);
        assert!(rings[0].is_closed());

        // Order of the fragments does not matter
        let rings = assemble_rings(vec![s2, s1]);
        assert_eq!(rings.len(), 1);
    }

    #[test]
    fn test_reversed_fragment_joins() {
        let p = square(0.0, 1.0);
        let s1 = vec![p[0], p[1], p[2]];
        // Drawn the other way round
        let s2 = vec![p[0], p[3], p[2]];

        let rings = assemble_rings(vec![s1, s2]);
        assert_eq!(rings.len(), 1);
        assert_eq!(rings[0].0.len(), 5);
    }

    #[test]
    fn test_middle_fragment_grows_both_ways() {
        let p = square(0.0, 1.0);
        let a = vec![p[0], p[1]];
        let b = vec![p[1], p[2]];
        let c = vec![p[2], p[3]];
        let d = vec![p[3], p[0]];

        let rings = assemble_rings(vec![b, d, a, c]);
        assert_eq!(rings.len(), 1);
        assert_eq!(rings[0].0.len(), 5);
    }

    #[test]
    fn test_gap_fails() {
        let p = square(0.0, 1.0);
        let s1 = vec![p[0], p[1]];
        let s2 = vec![p[2], p[3]];

        let rings = assemble_rings(vec![s1, s2]);
        assert!(rings.is_empty());
    }

    #[test]
    fn test_open_chain_is_closed() {
        let p = square(0.0, 1.0);
        let rings = assemble_rings(vec![vec![p[0], p[1], p[2], p[3]]]);
        assert_eq!(rings.len(), 1);
        assert!(rings[0].is_closed());
    }

    #[test]
    fn test_inner_ring_becomes_hole() {
        let rings = vec![
            LineString::new(square(4.0, 6.0)),
            LineString::new(square(0.0, 10.0)),
        ];
        let multi = assemble_polygons(rings);
        assert_eq!(multi.0.len(), 1);
        assert_eq!(multi.0[0].interiors().len(), 1);
    }

    #[test]
    fn test_island_in_hole_is_new_shell() {
        let rings = vec![
            LineString::new(square(0.0, 10.0)),
            LineString::new(square(2.0, 8.0)),
            LineString::new(square(4.0, 6.0)),
        ];
        let multi = assemble_polygons(rings);
        assert_eq!(multi.0.len(), 2);
        assert_eq!(multi.0[0].interiors().len(), 1);
        assert!(multi.0[1].interiors().is_empty());
    }

    #[test]
    fn test_disjoint_rings_are_separate_shells() {
        let mut far = square(0.0, 1.0);
        for c in &mut far {
            c.x += 5.0;
        }
        let multi = assemble_polygons(vec![
            LineString::new(square(0.0, 1.0)),
            LineString::new(far),
        ]);
        assert_eq!(multi.0.len(), 2);
    }
}
