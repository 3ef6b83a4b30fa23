//! Precomputed per-edge affinities for the 4-connected grid.
//!
//! Affinity evaluation is independent per edge, so the two edge planes are
//! filled with row parallelism ahead of the (inherently sequential)
//! propagation sweep. Every undirected edge is evaluated once, in canonical
//! direction (lower linear index first), which keeps the result identical to
//! on-demand evaluation.

use crate::affinity::PairwiseAffinity;
use crate::image::VectorImage;
use rayon::prelude::*;

/// Edge affinities: one plane for horizontal edges `(x,y)-(x+1,y)`, one for
/// vertical edges `(x,y)-(x,y+1)`.
#[derive(Clone, Debug)]
pub struct AffinityMap {
    w: usize,
    h: usize,
    horizontal: Vec<u16>,
    vertical: Vec<u16>,
}

impl AffinityMap {
    /// Evaluate every grid edge under `model`.
    pub fn build(input: &VectorImage, model: &dyn PairwiseAffinity) -> Self {
        let (w, h) = (input.w, input.h);
        let hor_stride = w.saturating_sub(1);
        let mut horizontal = vec![0u16; hor_stride * h];
        let mut vertical = vec![0u16; w * h.saturating_sub(1)];

        if hor_stride > 0 {
            horizontal
                .par_chunks_mut(hor_stride)
                .enumerate()
                .for_each(|(y, row)| {
                    let base = y * w;
                    for (x, slot) in row.iter_mut().enumerate() {
                        *slot = model.affinity(input.data[base + x], input.data[base + x + 1]);
                    }
                });
        }
        if h > 1 {
            vertical.par_chunks_mut(w).enumerate().for_each(|(y, row)| {
                let base = y * w;
                for (x, slot) in row.iter_mut().enumerate() {
                    *slot = model.affinity(input.data[base + x], input.data[base + w + x]);
                }
            });
        }

        Self {
            w,
            h,
            horizontal,
            vertical,
        }
    }

    /// Affinity of the edge `(x,y)-(x+1,y)`.
    #[inline]
    pub fn horizontal(&self, x: usize, y: usize) -> u16 {
        self.horizontal[y * (self.w - 1) + x]
    }

    /// Affinity of the edge `(x,y)-(x,y+1)`.
    #[inline]
    pub fn vertical(&self, x: usize, y: usize) -> u16 {
        self.vertical[y * self.w + x]
    }

    /// Total number of grid edges held by the map.
    pub fn edge_count(&self) -> usize {
        self.horizontal.len() + self.vertical.len()
    }
}
