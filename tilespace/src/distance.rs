//! Squared distances between points, lines and segments on the plane.
//!
//! Squared values are enough for comparisons and spare the square root on hot paths.

pub fn squared_distance_to_point(x_a: f64, y_a: f64, x_b: f64, y_b: f64) -> f64 {
    let dx = x_a - x_b;
    let dy = y_a - y_b;
    dx * dx + dy * dy
}

/// Where the projection of P falls on the line AB, as a factor of AB: 0 on A, 1 on B.
/// Zero when A and B are the same point.
pub fn projection_factor_to_line(
    x_p: f64,
    y_p: f64,
    x_a: f64,
    y_a: f64,
    x_b: f64,
    y_b: f64,
) -> f64 {
    if x_a == x_b && y_a == y_b {
        return 0.;
    }
    let dx = x_b - x_a;
    let dy = y_b - y_a;
    ((x_p - x_a) * dx + (y_p - y_a) * dy) / (dx * dx + dy * dy)
}

/// Like [`projection_factor_to_line`], but never beyond the segment ends.
pub fn projection_factor_to_segment(
    x_p: f64,
    y_p: f64,
    x_a: f64,
    y_a: f64,
    x_b: f64,
    y_b: f64,
) -> f64 {
    projection_factor_to_line(x_p, y_p, x_a, y_a, x_b, y_b).clamp(0., 1.)
}

pub fn squared_distance_to_projection(
    x_p: f64,
    y_p: f64,
    x_a: f64,
    y_a: f64,
    x_b: f64,
    y_b: f64,
    factor: f64,
) -> f64 {
    squared_distance_to_point(
        x_p,
        y_p,
        x_a + factor * (x_b - x_a),
        y_a + factor * (y_b - y_a),
    )
}

pub fn squared_distance_to_line(
    x_p: f64,
    y_p: f64,
    x_a: f64,
    y_a: f64,
    x_b: f64,
    y_b: f64,
) -> f64 {
    let factor = projection_factor_to_line(x_p, y_p, x_a, y_a, x_b, y_b);
    squared_distance_to_projection(x_p, y_p, x_a, y_a, x_b, y_b, factor)
}

pub fn squared_distance_to_segment(
    x_p: f64,
    y_p: f64,
    x_a: f64,
    y_a: f64,
    x_b: f64,
    y_b: f64,
) -> f64 {
    let factor = projection_factor_to_segment(x_p, y_p, x_a, y_a, x_b, y_b);
    squared_distance_to_projection(x_p, y_p, x_a, y_a, x_b, y_b, factor)
}
