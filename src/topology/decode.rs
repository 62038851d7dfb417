//! Decodes a topology back into cells with absolute coordinates.

use crate::{cells::GridCell, error::ConverterError};

use super::{arcs::delta_decode, quantize::Point, Topology, OBJECT_NAME};

impl Topology {
    /// Rebuilds every polygon of the cell object, in stored order.
    pub fn decode_cells(&self) -> Result<Vec<GridCell>, ConverterError> {
        let collection = self
            .objects
            .get(OBJECT_NAME)
            .ok_or_else(|| ConverterError::InvalidTopology(format!("no `{}` object", OBJECT_NAME)))?;

        let arcs: Vec<Vec<Point>> = self.arcs.iter().map(|arc| delta_decode(arc)).collect();

        collection
            .geometries
            .iter()
            .map(|geometry| -> Result<GridCell, ConverterError> {
                let ring_refs = geometry
                    .arcs
                    .first()
                    .ok_or_else(|| ConverterError::InvalidTopology("polygon without rings".to_string()))?;

                let ring = stitch(&arcs, ring_refs)?
                    .into_iter()
                    .map(|p| self.transform.apply(p))
                    .collect();

                Ok(GridCell {
                    properties: geometry.properties.clone(),
                    ring,
                })
            })
            .collect()
    }
}

/// Joins referenced arcs into one ring; consecutive arcs share an endpoint.
fn stitch(arcs: &[Vec<Point>], refs: &[i64]) -> Result<Vec<Point>, ConverterError> {
    let mut ring: Vec<Point> = Vec::new();

    for &reference in refs {
        let (index, backwards) = if reference >= 0 {
            (reference as usize, false)
        } else {
            (!reference as usize, true)
        };

        let arc = arcs
            .get(index)
            .ok_or_else(|| ConverterError::InvalidTopology(format!("arc {} out of range", reference)))?;

        let mut points = arc.clone();
        if backwards {
            points.reverse();
        }

        let skip = usize::from(!ring.is_empty());
        ring.extend(points.into_iter().skip(skip));
    }

    Ok(ring)
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {

    use crate::topology::tests::grid_cells;

    use super::*;

    fn assert_bbox_close(cell: &GridCell, expected: [f64; 4], tolerance: f64) {
        for (got, want) in cell.bbox().iter().zip(expected) {
            assert!((got - want).abs() <= tolerance, "{:?} vs {:?}", cell.bbox(), expected);
        }
    }

    #[test]
    fn should_round_trip_cells() {
        let cells = grid_cells();
        let topology = Topology::from_cells(&cells, 1_000_000);
        let decoded = topology.decode_cells().unwrap();

        assert_eq!(decoded.len(), cells.len());
        for (original, back) in cells.iter().zip(&decoded) {
            assert_eq!(back.properties, original.properties);
            assert_bbox_close(back, original.bbox(), 1e-5);
            assert_eq!(back.ring.len(), 5);
            assert_eq!(back.ring.first(), back.ring.last());
        }
    }

    #[test]
    fn should_round_trip_through_json() {
        let cells = grid_cells();
        let json = serde_json::to_string(&Topology::from_cells(&cells, 10_000)).unwrap();
        let topology: Topology = serde_json::from_str(&json).unwrap();
        let decoded = topology.decode_cells().unwrap();

        let centres: Vec<(f64, f64)> = decoded.iter().map(|c| (c.properties.lat, c.properties.lon)).collect();
        assert_eq!(centres, vec![(0.0, 0.0), (0.0, 5.0), (5.0, 0.0), (5.0, 5.0)]);
        assert_bbox_close(&decoded[2], [-2.5, 2.5, 2.5, 7.5], 1e-3);
    }

    #[test]
    fn should_reject_dangling_arc() {
        let mut topology = Topology::from_cells(&grid_cells(), 10_000);
        topology.arcs.clear();

        let err = topology.decode_cells().unwrap_err();
        assert!(matches!(err, ConverterError::InvalidTopology(_)));
    }
}
