/// Ternary plot geometry.
///
/// The plot is an equilateral triangle inscribed in a padded canvas. Vertex
/// `A` is the apex (100% of component `a`), `B` the bottom-left corner and
/// `C` the bottom-right corner. Vertex coordinates are stored relative to the
/// padding origin; `project` and `vertices` return absolute canvas points.
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::model::Weights;

pub const DEFAULT_WIDTH: f64 = 420.0;
pub const DEFAULT_HEIGHT: f64 = 380.0;
pub const DEFAULT_PADDING: f64 = 30.0;

/// Relative tolerance for boundary checks, scaled by the triangle side.
const CONTAINS_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_sq(&self, other: &Point) -> f64 {
        (self.x - other.x).powi(2) + (self.y - other.y).powi(2)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Canvas the triangle is inscribed in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            padding: DEFAULT_PADDING,
        }
    }
}

impl Canvas {
    /// Side length of the inscribed triangle.
    pub fn side(&self) -> f64 {
        self.width.min(self.height) - 2.0 * self.padding
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

/// The fixed triangle points are projected into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    canvas: Canvas,
    origin: Point,
    a: Point,
    b: Point,
    c: Point,
}

impl Default for Triangle {
    fn default() -> Self {
        Self::new(Canvas::default())
    }
}

impl Triangle {
    pub fn new(canvas: Canvas) -> Self {
        let side = canvas.side();
        let base = (3.0_f64.sqrt() / 2.0) * side;
        Self {
            canvas,
            origin: Point::new(canvas.padding, canvas.padding),
            a: Point::new(0.5 * side, 0.0),
            b: Point::new(0.0, base),
            c: Point::new(side, base),
        }
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Absolute canvas positions of `A`, `B` and `C`.
    pub fn vertices(&self) -> [Point; 3] {
        [self.a, self.b, self.c].map(|v| Point::new(v.x + self.origin.x, v.y + self.origin.y))
    }

    /// Barycentric to canvas coordinates.
    ///
    /// Weights are normalized by their sum; the all-zero record lands on the
    /// origin offset instead of failing.
    pub fn project(&self, weights: &Weights) -> Point {
        let (aa, bb, cc) = weights.normalized();
        Point {
            x: aa * self.a.x + bb * self.b.x + cc * self.c.x + self.origin.x,
            y: aa * self.a.y + bb * self.b.y + cc * self.c.y + self.origin.y,
        }
    }

    /// Whether `point` lies inside the triangle or on its boundary.
    pub fn contains(&self, point: &Point) -> bool {
        let [a, b, c] = self.vertices();
        let tolerance = CONTAINS_EPSILON * self.canvas.side().abs().max(1.0).powi(2);

        let d1 = cross(&a, &b, point);
        let d2 = cross(&b, &c, point);
        let d3 = cross(&c, &a, point);

        let has_neg = d1 < -tolerance || d2 < -tolerance || d3 < -tolerance;
        let has_pos = d1 > tolerance || d2 > tolerance || d3 > tolerance;
        !(has_neg && has_pos)
    }
}

fn cross(p1: &Point, p2: &Point, p3: &Point) -> f64 {
    (p3.x - p2.x) * (p1.y - p2.y) - (p1.x - p2.x) * (p3.y - p2.y)
}
