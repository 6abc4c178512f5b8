// Crowdedness map: how many opponent snake cells sit near each cell

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::grid::Snapshot;
use crate::types::Cell;

/// Shape of the neighbourhood counted around each cell
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CrowdWindow {
    /// Square centred on the cell: rows `r - size .. r + size`, columns
    /// likewise, clamped to the grid, upper bounds exclusive
    #[default]
    Sliding,
    /// Fixed grid-aligned `size x size` tile containing the cell
    Tiled,
}

impl CrowdWindow {
    pub fn as_str(&self) -> &'static str {
        match self {
            CrowdWindow::Sliding => "sliding",
            CrowdWindow::Tiled => "tiled",
        }
    }

    pub fn parse(s: &str) -> Result<CrowdWindow, String> {
        match s.trim().to_lowercase().as_str() {
            "sliding" => Ok(CrowdWindow::Sliding),
            "tiled" => Ok(CrowdWindow::Tiled),
            _ => Err(format!("Invalid crowd window: {}", s)),
        }
    }

    /// Half-open span `[lo, hi)` covered along one axis of length `len`
    fn span(&self, pos: usize, size: usize, len: usize) -> (usize, usize) {
        match self {
            CrowdWindow::Sliding => (
                pos.saturating_sub(size),
                pos.saturating_add(size).min(len),
            ),
            // A zero-sized tile covers nothing, like a zero radius
            CrowdWindow::Tiled if size == 0 => (pos, pos),
            CrowdWindow::Tiled => {
                let lo = pos - pos % size;
                (lo, lo.saturating_add(size).min(len))
            }
        }
    }
}

impl fmt::Display for CrowdWindow {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-cell count of opponent cells inside the window around it.
/// Built once per query and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrowdMap {
    width: usize,
    counts: Vec<u32>,
}

impl CrowdMap {
    /// `size` is the radius of a sliding window or the side of a tile.
    /// Uses a 2D prefix sum over opponent cells, so every window costs O(1).
    pub fn build(snapshot: &Snapshot, window: CrowdWindow, size: usize) -> Self {
        let (h, w) = (snapshot.height, snapshot.width);

        // prefix[(r + 1) * (w + 1) + (c + 1)] = opponents in rows 0..=r, cols 0..=c
        let stride = w + 1;
        let mut prefix = vec![0u32; (h + 1) * stride];
        for r in 0..h {
            for c in 0..w {
                let opponent = snapshot.kind(Cell::new(r, c)).is_opponent() as u32;
                prefix[(r + 1) * stride + c + 1] = opponent
                    + prefix[r * stride + c + 1]
                    + prefix[(r + 1) * stride + c]
                    - prefix[r * stride + c];
            }
        }

        let mut counts = Vec::with_capacity(h * w);
        for r in 0..h {
            let (top, bottom) = window.span(r, size, h);
            for c in 0..w {
                let (left, right) = window.span(c, size, w);
                let count = prefix[bottom * stride + right] + prefix[top * stride + left]
                    - prefix[top * stride + right]
                    - prefix[bottom * stride + left];
                counts.push(count);
            }
        }

        CrowdMap { width: w, counts }
    }

    pub fn at(&self, cell: Cell) -> u32 {
        self.counts[cell.row * self.width + cell.col]
    }

    pub fn max(&self) -> u32 {
        self.counts.iter().copied().max().unwrap_or(0)
    }
}
