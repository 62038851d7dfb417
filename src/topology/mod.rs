//! Handles encoding grid cells as TopoJSON and saving the artifact to disk.

pub mod arcs;
pub mod decode;
pub mod quantize;
pub mod write;

use std::{collections::BTreeMap, fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{cells::CellProperties, cells::GridCell, error::ConverterError};

pub use quantize::Quantizer;
pub use write::save_topology;

/// Name of the single object holding the cells.
pub const OBJECT_NAME: &str = "data";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub scale: [f64; 2],
    pub translate: [f64; 2],
}

impl Transform {
    pub fn apply(&self, [x, y]: quantize::Point) -> [f64; 2] {
        [
            x as f64 * self.scale[0] + self.translate[0],
            y as f64 * self.scale[1] + self.translate[1],
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    #[serde(rename = "type")]
    pub kind: String,
    pub arcs: Vec<Vec<i64>>,
    pub properties: CellProperties,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometryCollection {
    #[serde(rename = "type")]
    pub kind: String,
    pub geometries: Vec<Geometry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topology {
    #[serde(rename = "type")]
    pub kind: String,
    pub bbox: [f64; 4],
    pub transform: Transform,
    pub objects: BTreeMap<String, GeometryCollection>,
    /// Delta-encoded quantized arcs.
    pub arcs: Vec<Vec<quantize::Point>>,
}

impl Topology {
    /// Quantizes the cells onto a `quantization`-level grid and extracts
    /// shared arcs. Geometries keep the order of `cells`.
    pub fn from_cells(cells: &[GridCell], quantization: u64) -> Self {
        let bbox = collection_bbox(cells);
        let quantizer = Quantizer::new(bbox, quantization);

        let rings: Vec<_> = cells.iter().map(|c| quantizer.quantize_ring(&c.ring)).collect();
        let (table, refs) = arcs::extract_arcs(&rings);

        let geometries = cells
            .iter()
            .zip(refs)
            .map(|(cell, ring_refs)| Geometry {
                kind: "Polygon".to_string(),
                arcs: vec![ring_refs],
                properties: cell.properties.clone(),
            })
            .collect();

        let mut objects = BTreeMap::new();
        objects.insert(
            OBJECT_NAME.to_string(),
            GeometryCollection {
                kind: "GeometryCollection".to_string(),
                geometries,
            },
        );

        Topology {
            kind: "Topology".to_string(),
            bbox,
            transform: quantizer.transform(),
            objects,
            arcs: table.arcs.iter().map(|arc| arcs::delta_encode(arc)).collect(),
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, ConverterError> {
        let bytes = fs::read(path).map_err(|e| ConverterError::load(path, e))?;
        serde_json::from_slice(&bytes).map_err(|e| ConverterError::load(path, e))
    }

    pub fn cell_count(&self) -> usize {
        self.objects.values().map(|o| o.geometries.len()).sum()
    }
}

fn collection_bbox(cells: &[GridCell]) -> [f64; 4] {
    if cells.is_empty() {
        return [0.0; 4];
    }

    cells.iter().map(GridCell::bbox).fold(
        [f64::INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY],
        |acc, b| [acc[0].min(b[0]), acc[1].min(b[1]), acc[2].max(b[2]), acc[3].max(b[3])],
    )
}

// -- Tests -------------------------------------------------------------------
