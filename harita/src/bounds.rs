//! Geographic bounding boxes and their order-independent merge.

#[cfg(test)]
#[path = "bounds_test.rs"]
mod bounds_test;

use serde::{Deserialize, Serialize};

/// `(min_lon, min_lat, max_lon, max_lat)` in degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl BoundingBox {
    #[must_use]
    pub const fn new(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> Self {
        Self { min_lon, min_lat, max_lon, max_lat }
    }

    /// `min <= max` on both axes.
    #[must_use]
    pub fn is_finalized(&self) -> bool {
        self.min_lon <= self.max_lon && self.min_lat <= self.max_lat
    }

    /// Smallest box containing both `self` and `other`.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min_lon: self.min_lon.min(other.min_lon),
            min_lat: self.min_lat.min(other.min_lat),
            max_lon: self.max_lon.max(other.max_lon),
            max_lat: self.max_lat.max(other.max_lat),
        }
    }

    /// South-west and north-east corners, the `LngLatBoundsLike` array form.
    #[must_use]
    pub fn corners(&self) -> [[f64; 2]; 2] {
        [[self.min_lon, self.min_lat], [self.max_lon, self.max_lat]]
    }
}

/// Fold boxes with per-axis min/max.
///
/// Returns `None` when the input is empty or when any box is still missing:
/// the merge is a snapshot of what is already known, never a partial fit.
pub fn merge_boxes<I>(boxes: I) -> Option<BoundingBox>
where
    I: IntoIterator<Item = Option<BoundingBox>>,
{
    let mut merged: Option<BoundingBox> = None;
    for bbox in boxes {
        let bbox = bbox?;
        merged = Some(match merged {
            Some(acc) => acc.union(&bbox),
            None => bbox,
        });
    }
    merged
}
