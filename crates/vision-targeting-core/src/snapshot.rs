//! Multi-candidate detection snapshots.

use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

/// One detected candidate, read out of a coherent snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TargetCandidate {
    /// Projected area as reported by the producer.
    pub area: f64,
    /// Projected width and height in pixels.
    pub size: Vector2<f64>,
    /// Center in pipeline pixel coordinates.
    pub center: Point2<f64>,
}

impl TargetCandidate {
    #[inline]
    pub fn width(&self) -> f64 {
        self.size.x
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.size.y
    }
}

/// Five parallel columns, one element per simultaneously detected candidate.
///
/// A column may be missing when the producer has not published it. The
/// snapshot is *coherent* only when all five columns are present and have
/// the same length; an incoherent snapshot reports no candidates.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectionSnapshot {
    area: Option<Vec<f64>>,
    width: Option<Vec<f64>>,
    height: Option<Vec<f64>>,
    center_x: Option<Vec<f64>>,
    center_y: Option<Vec<f64>>,
}

impl DetectionSnapshot {
    /// Coherent snapshot with zero candidates.
    pub fn empty() -> Self {
        Self::from_columns(
            Some(Vec::new()),
            Some(Vec::new()),
            Some(Vec::new()),
            Some(Vec::new()),
            Some(Vec::new()),
        )
    }

    /// Coherent snapshot with exactly one candidate.
    pub fn single(area: f64, width: f64, height: f64, center_x: f64, center_y: f64) -> Self {
        Self::from_columns(
            Some(vec![area]),
            Some(vec![width]),
            Some(vec![height]),
            Some(vec![center_x]),
            Some(vec![center_y]),
        )
    }

    /// Assemble a snapshot from independently read columns. No coherence
    /// check is made here; see [`DetectionSnapshot::is_coherent`].
    pub fn from_columns(
        area: Option<Vec<f64>>,
        width: Option<Vec<f64>>,
        height: Option<Vec<f64>>,
        center_x: Option<Vec<f64>>,
        center_y: Option<Vec<f64>>,
    ) -> Self {
        Self {
            area,
            width,
            height,
            center_x,
            center_y,
        }
    }

    /// Build a coherent snapshot from whole candidates.
    pub fn from_candidates(candidates: &[TargetCandidate]) -> Self {
        Self::from_columns(
            Some(candidates.iter().map(|c| c.area).collect()),
            Some(candidates.iter().map(|c| c.width()).collect()),
            Some(candidates.iter().map(|c| c.height()).collect()),
            Some(candidates.iter().map(|c| c.center.x).collect()),
            Some(candidates.iter().map(|c| c.center.y).collect()),
        )
    }

    /// All columns present and of equal length.
    pub fn is_coherent(&self) -> bool {
        match (
            &self.area,
            &self.width,
            &self.height,
            &self.center_x,
            &self.center_y,
        ) {
            (Some(a), Some(w), Some(h), Some(cx), Some(cy)) => {
                let n = a.len();
                w.len() == n && h.len() == n && cx.len() == n && cy.len() == n
            }
            _ => false,
        }
    }

    /// Number of candidates, or 0 when incoherent.
    pub fn len(&self) -> usize {
        if self.is_coherent() {
            self.area.as_ref().map_or(0, Vec::len)
        } else {
            0
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Lengths of the five columns, `None` for a missing one.
    pub fn column_lengths(&self) -> [Option<usize>; 5] {
        [
            self.area.as_ref().map(Vec::len),
            self.width.as_ref().map(Vec::len),
            self.height.as_ref().map(Vec::len),
            self.center_x.as_ref().map(Vec::len),
            self.center_y.as_ref().map(Vec::len),
        ]
    }

    pub fn area(&self) -> &[f64] {
        column(&self.area)
    }

    pub fn width(&self) -> &[f64] {
        column(&self.width)
    }

    pub fn height(&self) -> &[f64] {
        column(&self.height)
    }

    pub fn center_x(&self) -> &[f64] {
        column(&self.center_x)
    }

    pub fn center_y(&self) -> &[f64] {
        column(&self.center_y)
    }

    /// Candidate at `index`; `None` when out of range or incoherent.
    pub fn candidate(&self, index: usize) -> Option<TargetCandidate> {
        if index >= self.len() {
            return None;
        }
        Some(TargetCandidate {
            area: self.area()[index],
            size: Vector2::new(self.width()[index], self.height()[index]),
            center: Point2::new(self.center_x()[index], self.center_y()[index]),
        })
    }

    /// Iterate candidates of a coherent snapshot (nothing when incoherent).
    pub fn candidates(&self) -> impl Iterator<Item = TargetCandidate> + '_ {
        (0..self.len()).filter_map(move |i| self.candidate(i))
    }
}

#[inline]
fn column(col: &Option<Vec<f64>>) -> &[f64] {
    col.as_deref().unwrap_or(&[])
}
