use navgrid_core::Point;

/// Cost of one orthogonal (north/south/east/west) step.
pub const ORTHOGONAL_COST: i32 = 10;

/// Cost of one diagonal step (10·√2 rounded).
pub const DIAGONAL_COST: i32 = 14;

/// Manhattan (L1) distance between two points.
#[inline]
pub fn manhattan(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

/// Chebyshev (L∞) distance between two points.
#[inline]
pub fn chebyshev(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs().max((a.y - b.y).abs())
}

/// Octile distance in cost units: diagonal steps where both axes still
/// differ, orthogonal steps for the remainder.
///
/// This is the exact cost of an unobstructed 8-way path, so it never
/// overestimates and serves as the A* heuristic for any direction subset.
#[inline]
pub fn octile(a: Point, b: Point) -> i32 {
    let dx = (a.x - b.x).abs();
    let dy = (a.y - b.y).abs();
    let diag = dx.min(dy);
    DIAGONAL_COST * diag + ORTHOGONAL_COST * (dx.max(dy) - diag)
}
