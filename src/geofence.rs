//! Point-in-polygon test against the Philippine Area of Responsibility.

/// A closed region given as (longitude, latitude) vertices. The last vertex
/// connects back to the first.
#[derive(Debug, Clone, Copy)]
pub struct BasinPolygon {
    vertices: &'static [(f64, f64)],
}

/// PAR boundary: 25N 120E, 25N 135E, 5N 135E, 5N 115E, 15N 115E, 21N 120E.
pub const PAR: BasinPolygon = BasinPolygon {
    vertices: &[
        (120.0, 25.0),
        (135.0, 25.0),
        (135.0, 5.0),
        (115.0, 5.0),
        (115.0, 15.0),
        (120.0, 21.0),
    ],
};

// Added to the edge's latitude span so horizontal edges never divide by zero.
const EPSILON: f64 = 1e-10;

impl BasinPolygon {
    /// Ray-casting (even-odd) test. Returns false for non-finite input.
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        is_inside(lat, lon, self.vertices)
    }

    /// (min lon, min lat, max lon, max lat)
    pub fn bounding_box(&self) -> (f64, f64, f64, f64) {
        self.vertices.iter().fold(
            (f64::MAX, f64::MAX, f64::MIN, f64::MIN),
            |(x0, y0, x1, y1), &(x, y)| (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
        )
    }
}

/// Casts a ray eastward from (`lon`, `lat`) and counts edge crossings.
///
/// An edge only counts when it straddles the point's latitude with one
/// endpoint strictly above, so horizontal edges never cross. Points on the
/// southern or western boundary test inside, points on the northern or
/// eastern boundary test outside.
pub fn is_inside(lat: f64, lon: f64, polygon: &[(f64, f64)]) -> bool {
    if !lat.is_finite() || !lon.is_finite() || polygon.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = polygon.len() - 1;

    for i in 0..polygon.len() {
        let (xi, yi) = polygon[i];
        let (xj, yj) = polygon[j];

        if (yi > lat) != (yj > lat) {
            let crossing = (xj - xi) * (lat - yi) / (yj - yi + EPSILON) + xi;
            if lon < crossing {
                inside = !inside;
            }
        }

        j = i;
    }

    inside
}

// -- Tests ----------------------------------------------------------------------------
