use crate::geometry::{Point, Triangle};
use crate::model::{Vision, Weights};

/// Anything that can be placed on the ternary plot.
pub trait Weighted {
    fn weights(&self) -> &Weights;
}

impl Weighted for Weights {
    fn weights(&self) -> &Weights {
        self
    }
}

impl Weighted for Vision {
    fn weights(&self) -> &Weights {
        &self.nff
    }
}

impl<T: Weighted> Weighted for &T {
    fn weights(&self) -> &Weights {
        (**self).weights()
    }
}

/// The candidate closest to a query point.
#[derive(Debug)]
pub struct Nearest<'a, T> {
    /// Position of the candidate in the input order.
    pub index: usize,
    pub item: &'a T,
    /// Projected canvas position of the candidate.
    pub point: Point,
    pub distance_sq: f64,
}

/// Finds the candidate whose projected point is closest to `query` by
/// squared Euclidean distance. The first candidate wins on ties; an empty
/// slice yields `None`.
pub fn nearest<'a, T: Weighted>(
    triangle: &Triangle,
    query: Point,
    candidates: &'a [T],
) -> Option<Nearest<'a, T>> {
    let mut best: Option<Nearest<'a, T>> = None;

    for (index, item) in candidates.iter().enumerate() {
        let point = triangle.project(item.weights());
        let distance_sq = point.distance_sq(&query);
        let closer = best
            .as_ref()
            .map_or(true, |current| distance_sq < current.distance_sq);
        if closer {
            best = Some(Nearest {
                index,
                item,
                point,
                distance_sq,
            });
        }
    }

    best
}
