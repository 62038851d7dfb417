//! Coordinate quantization onto an integer grid spanning the bounding box.

use super::Transform;

pub type Point = [i64; 2];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quantizer {
    scale: [f64; 2],
    translate: [f64; 2],
}

impl Quantizer {
    /// `bbox` is [min_x, min_y, max_x, max_y]; `levels` must be at least 2.
    pub fn new(bbox: [f64; 4], levels: u64) -> Self {
        let steps = levels.saturating_sub(1).max(1) as f64;
        let step = |min: f64, max: f64| if max > min { (max - min) / steps } else { 1.0 };

        Quantizer {
            scale: [step(bbox[0], bbox[2]), step(bbox[1], bbox[3])],
            translate: [bbox[0], bbox[1]],
        }
    }

    pub fn quantize(&self, [x, y]: [f64; 2]) -> Point {
        [
            ((x - self.translate[0]) / self.scale[0]).round() as i64,
            ((y - self.translate[1]) / self.scale[1]).round() as i64,
        ]
    }

    /// Quantizes a ring, dropping points that collapse onto their predecessor.
    pub fn quantize_ring(&self, ring: &[[f64; 2]]) -> Vec<Point> {
        let mut points: Vec<Point> = ring.iter().map(|&p| self.quantize(p)).collect();
        points.dedup();
        points
    }

    pub fn transform(&self) -> Transform {
        Transform {
            scale: self.scale,
            translate: self.translate,
        }
    }
}

// -- Tests -------------------------------------------------------------------
