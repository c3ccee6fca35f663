//! Point markers used to tell throughput lines apart on combined charts.
//!
//! Every marker is drawn as a filled polygon in pixel space, centred on the data point.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI, TAU};

/// Marker shapes in the order they are assigned to series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerShape {
    /// `o`
    Circle,
    /// `v`
    TriangleDown,
    /// `^`
    TriangleUp,
    /// `<`
    TriangleLeft,
    /// `>`
    TriangleRight,
    /// `s`
    Square,
    /// `p`
    Pentagon,
    /// `*`
    Star,
    /// `h`, vertex pointing up
    Hexagon,
    /// `H`, flat side on top
    HexagonFlat,
    /// `D`
    Diamond,
    /// `d`
    ThinDiamond,
}

/// Fixed marker cycle. Series beyond its length wrap around.
pub const MARKER_CYCLE: [MarkerShape; 12] = [
    MarkerShape::Circle,
    MarkerShape::TriangleDown,
    MarkerShape::TriangleUp,
    MarkerShape::TriangleLeft,
    MarkerShape::TriangleRight,
    MarkerShape::Square,
    MarkerShape::Pentagon,
    MarkerShape::Star,
    MarkerShape::Hexagon,
    MarkerShape::HexagonFlat,
    MarkerShape::Diamond,
    MarkerShape::ThinDiamond,
];

impl MarkerShape {
    /// Marker for the series at `index`, cycling through [`MARKER_CYCLE`].
    pub fn for_series(index: usize) -> Self {
        MARKER_CYCLE[index % MARKER_CYCLE.len()]
    }

    /// Single-character code of the marker (`o`, `v`, `^`, ...).
    pub fn code(self) -> char {
        match self {
            MarkerShape::Circle => 'o',
            MarkerShape::TriangleDown => 'v',
            MarkerShape::TriangleUp => '^',
            MarkerShape::TriangleLeft => '<',
            MarkerShape::TriangleRight => '>',
            MarkerShape::Square => 's',
            MarkerShape::Pentagon => 'p',
            MarkerShape::Star => '*',
            MarkerShape::Hexagon => 'h',
            MarkerShape::HexagonFlat => 'H',
            MarkerShape::Diamond => 'D',
            MarkerShape::ThinDiamond => 'd',
        }
    }

    /// Polygon vertices relative to the marker centre, in backend pixels (y grows downward).
    pub fn vertices(self, radius: i32) -> Vec<(i32, i32)> {
        let r = f64::from(radius);
        let points = match self {
            MarkerShape::Circle => regular_polygon(16, r, 0.0),
            MarkerShape::TriangleDown => regular_polygon(3, r, -FRAC_PI_2),
            MarkerShape::TriangleUp => regular_polygon(3, r, FRAC_PI_2),
            MarkerShape::TriangleLeft => regular_polygon(3, r, PI),
            MarkerShape::TriangleRight => regular_polygon(3, r, 0.0),
            MarkerShape::Square => regular_polygon(4, r, FRAC_PI_4),
            MarkerShape::Pentagon => regular_polygon(5, r, FRAC_PI_2),
            MarkerShape::Star => star(5, r, r * 0.4),
            MarkerShape::Hexagon => regular_polygon(6, r, FRAC_PI_2),
            MarkerShape::HexagonFlat => regular_polygon(6, r, 0.0),
            MarkerShape::Diamond => regular_polygon(4, r, FRAC_PI_2),
            MarkerShape::ThinDiamond => regular_polygon(4, r, FRAC_PI_2)
                .into_iter()
                .map(|(x, y)| (x * 0.6, y))
                .collect(),
        };

        points
            .into_iter()
            .map(|(x, y)| (x.round() as i32, y.round() as i32))
            .collect()
    }
}

fn regular_polygon(sides: usize, radius: f64, start_angle: f64) -> Vec<(f64, f64)> {
    (0..sides)
        .map(|k| {
            let angle = start_angle + TAU * k as f64 / sides as f64;
            (radius * angle.cos(), -radius * angle.sin())
        })
        .collect()
}

fn star(points: usize, outer: f64, inner: f64) -> Vec<(f64, f64)> {
    (0..points * 2)
        .map(|k| {
            let radius = if k % 2 == 0 { outer } else { inner };
            let angle = FRAC_PI_2 + PI * k as f64 / points as f64;
            (radius * angle.cos(), -radius * angle.sin())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn cycle_wraps_around() {
        assert_eq!(MarkerShape::for_series(0), MarkerShape::Circle);
        assert_eq!(MarkerShape::for_series(11), MarkerShape::ThinDiamond);
        assert_eq!(MarkerShape::for_series(12), MarkerShape::Circle);
        assert_eq!(MarkerShape::for_series(13), MarkerShape::TriangleDown);
    }

    #[test]
    fn codes_follow_cycle_order() {
        let codes: String = MARKER_CYCLE.iter().map(|m| m.code()).collect();
        assert_eq!(codes, "ov^<>sp*hHDd");
    }

    #[rstest]
    #[case(MarkerShape::Circle, 16)]
    #[case(MarkerShape::TriangleUp, 3)]
    #[case(MarkerShape::Square, 4)]
    #[case(MarkerShape::Pentagon, 5)]
    #[case(MarkerShape::Star, 10)]
    #[case(MarkerShape::HexagonFlat, 6)]
    #[case(MarkerShape::ThinDiamond, 4)]
    fn vertex_counts(#[case] shape: MarkerShape, #[case] expected: usize) {
        assert_eq!(shape.vertices(5).len(), expected);
    }

    #[test]
    fn triangles_point_the_right_way() {
        // Screen space: negative y is up.
        assert_eq!(MarkerShape::TriangleUp.vertices(10)[0], (0, -10));
        assert_eq!(MarkerShape::TriangleDown.vertices(10)[0], (0, 10));
        assert_eq!(MarkerShape::TriangleLeft.vertices(10)[0], (-10, 0));
        assert_eq!(MarkerShape::TriangleRight.vertices(10)[0], (10, 0));
    }

    #[test]
    fn thin_diamond_is_narrower() {
        let wide = MarkerShape::Diamond.vertices(10);
        let thin = MarkerShape::ThinDiamond.vertices(10);
        let width = |v: &[(i32, i32)]| v.iter().map(|p| p.0).max().unwrap();
        assert_eq!(width(&wide), 10);
        assert_eq!(width(&thin), 6);
    }
}
