use serde::{Deserialize, Serialize};

// Integer map coordinate, matches raster resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    // Euclidean distance between two points
    pub fn distance(self, other: Point) -> f32 {
        let dx = (self.x - other.x) as f32;
        let dy = (self.y - other.y) as f32;
        (dx * dx + dy * dy).sqrt()
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

// Twice the signed shoelace area of a closed polygon.
// Positive for counter-clockwise winding in a y-up frame.
pub fn polygon_area2(poly: &[Point]) -> i64 {
    if poly.len() < 3 {
        return 0;
    }
    let mut sum = 0i64;
    for i in 0..poly.len() {
        let a = poly[i];
        let b = poly[(i + 1) % poly.len()];
        sum += a.x as i64 * b.y as i64 - b.x as i64 * a.y as i64;
    }
    sum
}

// Orientation of the triple (a, b, c): >0 left turn, <0 right turn, 0 collinear
fn orient(a: Point, b: Point, c: Point) -> i64 {
    (b.x - a.x) as i64 * (c.y - a.y) as i64 - (b.y - a.y) as i64 * (c.x - a.x) as i64
}

fn on_segment(a: Point, b: Point, p: Point) -> bool {
    p.x >= a.x.min(b.x) && p.x <= a.x.max(b.x) && p.y >= a.y.min(b.y) && p.y <= a.y.max(b.y)
}

fn segments_intersect(a: Point, b: Point, c: Point, d: Point) -> bool {
    let o1 = orient(a, b, c);
    let o2 = orient(a, b, d);
    let o3 = orient(c, d, a);
    let o4 = orient(c, d, b);

    if o1.signum() * o2.signum() < 0 && o3.signum() * o4.signum() < 0 {
        return true;
    }
    (o1 == 0 && on_segment(a, b, c))
        || (o2 == 0 && on_segment(a, b, d))
        || (o3 == 0 && on_segment(c, d, a))
        || (o4 == 0 && on_segment(c, d, b))
}

// True when no two non-adjacent edges of the closed polygon touch.
// O(V^2), fine for Voronoi cells with a handful of vertices.
pub fn is_simple(poly: &[Point]) -> bool {
    let n = poly.len();
    if n < 3 {
        return false;
    }
    for i in 0..n {
        let (a, b) = (poly[i], poly[(i + 1) % n]);
        if a == b {
            return false;
        }
        for j in (i + 1)..n {
            // Skip edges sharing a vertex with edge i
            if j == i + 1 || (i == 0 && j == n - 1) {
                continue;
            }
            let (c, d) = (poly[j], poly[(j + 1) % n]);
            if segments_intersect(a, b, c, d) {
                return false;
            }
        }
    }
    true
}

// A polygon the rasterizer can fill: at least a triangle, non-zero area, no self-crossings
pub fn is_fillable(poly: &[Point]) -> bool {
    poly.len() >= 3 && polygon_area2(poly) != 0 && is_simple(poly)
}

// Drop consecutive repeats (including last == first) left behind by integer truncation
pub fn dedup_ring(poly: &[Point]) -> Vec<Point> {
    let mut ring = poly.to_vec();
    ring.dedup();
    while ring.len() > 1 && ring.first() == ring.last() {
        ring.pop();
    }
    ring
}

// Even-odd ray crossing test for a point in continuous coordinates
pub fn contains(poly: &[Point], x: f64, y: f64) -> bool {
    let mut inside = false;
    let n = poly.len();
    if n < 3 {
        return false;
    }
    let mut j = n - 1;
    for i in 0..n {
        let (xi, yi) = (poly[i].x as f64, poly[i].y as f64);
        let (xj, yj) = (poly[j].x as f64, poly[j].y as f64);
        if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(size: i32) -> Vec<Point> {
        vec![
            Point::new(0, 0),
            Point::new(size, 0),
            Point::new(size, size),
            Point::new(0, size),
        ]
    }

    #[test]
    fn distance_is_euclidean() {
        assert_eq!(Point::new(0, 0).distance(Point::new(3, 4)), 5.0);
        assert_eq!(Point::new(-2, 7).distance(Point::new(-2, 7)), 0.0);
    }

    #[test]
    fn area_of_square() {
        assert_eq!(polygon_area2(&square(10)), 200);
        let mut cw = square(10);
        cw.reverse();
        assert_eq!(polygon_area2(&cw), -200);
    }

    #[test]
    fn bowtie_is_not_simple() {
        let bowtie = vec![
            Point::new(0, 0),
            Point::new(10, 10),
            Point::new(10, 0),
            Point::new(0, 10),
        ];
        assert!(!is_simple(&bowtie));
        assert!(!is_fillable(&bowtie));
        assert!(is_simple(&square(4)));
    }

    #[test]
    fn degenerate_polygons_are_not_fillable() {
        assert!(!is_fillable(&[]));
        assert!(!is_fillable(&[Point::new(1, 1)]));
        // collinear
        let line = vec![Point::new(0, 0), Point::new(5, 5), Point::new(10, 10)];
        assert!(!is_fillable(&line));
        // repeated vertex after integer truncation
        let dup = vec![Point::new(0, 0), Point::new(0, 0), Point::new(5, 0), Point::new(0, 5)];
        assert!(!is_fillable(&dup));
    }

    #[test]
    fn dedup_ring_restores_fillable_cell() {
        let ring = vec![
            Point::new(0, 0),
            Point::new(0, 0),
            Point::new(5, 0),
            Point::new(0, 5),
            Point::new(0, 0),
        ];
        let cleaned = dedup_ring(&ring);
        assert_eq!(cleaned, vec![Point::new(0, 0), Point::new(5, 0), Point::new(0, 5)]);
        assert!(is_fillable(&cleaned));
        assert_eq!(dedup_ring(&[Point::new(2, 2), Point::new(2, 2)]), vec![Point::new(2, 2)]);
    }

    #[test]
    fn contains_uses_even_odd() {
        let sq = square(10);
        assert!(contains(&sq, 5.0, 5.0));
        assert!(contains(&sq, 0.5, 9.5));
        assert!(!contains(&sq, 10.5, 5.0));
        assert!(!contains(&sq, -0.5, 5.0));
    }
}
