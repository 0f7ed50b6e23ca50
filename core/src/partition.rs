use log::{debug, warn};
use voronoice::{BoundingBox, VoronoiBuilder};

use crate::error::GenerateError;
use crate::geometry::Point;
use crate::region::{Region, RegionSet};

// Clip box margin around the map on every side
const BOX_PAD: f64 = 0.37;

// One cell as produced by a planar partition backend, in floating-point map coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub vertices: Vec<(f64, f64)>,
    pub generator: (f64, f64),
    pub bounded: bool,
}

// Backend that splits the map into one convex cell per site
pub trait PlanarPartition {
    fn cells(&self, sites: &[Point], width: u32, height: u32) -> Result<Vec<Cell>, GenerateError>;
}

// Voronoi diagram (dual of the Delaunay triangulation) via `voronoice`
#[derive(Debug, Clone, Copy, Default)]
pub struct VoronoiPartition;

impl PlanarPartition for VoronoiPartition {
    fn cells(&self, sites: &[Point], width: u32, height: u32) -> Result<Vec<Cell>, GenerateError> {
        // Sites live in [0, w-1]; the pad keeps edge sites strictly inside the box and
        // truncated vertices in [0, w] x [0, h]. Integer sites put Voronoi vertices on
        // half-integers, so the box edge must never sit on one.
        let bbox = BoundingBox::new(
            voronoice::Point {
                x: width as f64 / 2.0,
                y: height as f64 / 2.0,
            },
            width as f64 + 2.0 * BOX_PAD,
            height as f64 + 2.0 * BOX_PAD,
        );
        let voronoi_sites = sites
            .iter()
            .map(|p| voronoice::Point {
                x: p.x as f64,
                y: p.y as f64,
            })
            .collect::<Vec<_>>();

        let diagram = VoronoiBuilder::default()
            .set_sites(voronoi_sites)
            .set_bounding_box(bbox)
            .set_lloyd_relaxation_iterations(0)
            .build()
            .ok_or(GenerateError::Partition { sites: sites.len() })?;

        Ok(diagram
            .iter_cells()
            .map(|cell| {
                let site = cell.site_position();
                Cell {
                    vertices: cell.iter_vertices().map(|v| (v.x, v.y)).collect(),
                    generator: (site.x, site.y),
                    bounded: !cell.is_on_hull(),
                }
            })
            .collect())
    }
}

// Adapter turning partition cells into regions on the integer raster grid
pub struct RegionPartitioner<P: PlanarPartition = VoronoiPartition> {
    backend: P,
}

impl Default for RegionPartitioner<VoronoiPartition> {
    fn default() -> Self {
        Self::new(VoronoiPartition)
    }
}

impl<P: PlanarPartition> RegionPartitioner<P> {
    pub fn new(backend: P) -> Self {
        Self { backend }
    }

    pub fn partition(
        &self,
        sites: &[Point],
        width: u32,
        height: u32,
    ) -> Result<RegionSet, GenerateError> {
        if sites.len() < 3 {
            warn!(
                "only {} seed points, cannot triangulate; producing no regions",
                sites.len()
            );
            return Ok(RegionSet::new(width, height, Vec::new()));
        }

        let cells = self.backend.cells(sites, width, height)?;
        let regions = cells
            .into_iter()
            .map(|cell| Self::to_region(cell, width, height))
            .collect::<Vec<_>>();

        let degenerate = regions.iter().filter(|r| r.boundary.len() < 3).count();
        if degenerate > 0 {
            warn!("{degenerate} regions have fewer than 3 boundary points");
        }
        debug!(
            "partitioned {} sites into {} regions ({} bounded)",
            sites.len(),
            regions.len(),
            regions.iter().filter(|r| r.bounded).count()
        );
        Ok(RegionSet::new(width, height, regions))
    }

    // Truncate toward zero, matching raster resolution
    fn to_region(cell: Cell, width: u32, height: u32) -> Region {
        let boundary = cell
            .vertices
            .iter()
            .map(|&(x, y)| Point::new(x as i32, y as i32))
            .collect();
        let center = Point::new(cell.generator.0 as i32, cell.generator.1 as i32);
        Region::new(boundary, center, cell.bounded, width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Backend returning canned cells
    struct Fixed(Vec<Cell>);

    impl PlanarPartition for Fixed {
        fn cells(&self, _: &[Point], _: u32, _: u32) -> Result<Vec<Cell>, GenerateError> {
            Ok(self.0.clone())
        }
    }

    fn sites() -> Vec<Point> {
        vec![Point::new(25, 25), Point::new(75, 25), Point::new(50, 75)]
    }

    #[test]
    fn truncates_vertices_and_keeps_center() {
        let cell = Cell {
            vertices: vec![(10.9, 10.2), (40.7, 10.0), (40.1, 40.99)],
            generator: (25.6, 20.4),
            bounded: true,
        };
        let set = RegionPartitioner::new(Fixed(vec![cell]))
            .partition(&sites(), 100, 100)
            .unwrap();
        let r = &set.regions[0];
        assert_eq!(
            r.boundary,
            vec![Point::new(10, 10), Point::new(40, 10), Point::new(40, 40)]
        );
        assert_eq!(r.center, Point::new(25, 20));
        assert!(r.bounded);
    }

    #[test]
    fn degenerate_cells_are_still_wrapped() {
        let cells = vec![
            Cell {
                vertices: vec![],
                generator: (1.0, 1.0),
                bounded: true,
            },
            Cell {
                vertices: vec![(5.0, 5.0)],
                generator: (5.0, 5.0),
                bounded: true,
            },
        ];
        let set = RegionPartitioner::new(Fixed(cells))
            .partition(&sites(), 100, 100)
            .unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.regions[0].boundary.is_empty());
        assert_eq!(set.regions[1].boundary.len(), 1);
    }

    #[test]
    fn too_few_sites_gives_empty_set() {
        let set = RegionPartitioner::new(VoronoiPartition)
            .partition(&[Point::new(1, 1), Point::new(2, 2)], 50, 50)
            .unwrap();
        assert!(set.is_empty());
        assert_eq!((set.width, set.height), (50, 50));
    }

    #[test]
    fn half_integer_vertices_on_the_edge_do_not_break_clipping() {
        // Tightly packed integer sites in the corners put Voronoi vertices on half-integers
        let sites = vec![
            Point::new(0, 0),
            Point::new(1, 0),
            Point::new(0, 1),
            Point::new(3, 3),
            Point::new(4, 2),
            Point::new(2, 4),
        ];
        let set = RegionPartitioner::new(VoronoiPartition)
            .partition(&sites, 5, 5)
            .unwrap();
        assert_eq!(set.len(), sites.len());
        for p in set.iter().flat_map(|r| &r.boundary) {
            assert!((0..=5).contains(&p.x) && (0..=5).contains(&p.y));
        }
    }

    #[test]
    fn voronoi_one_region_per_site() {
        let sites = vec![
            Point::new(20, 20),
            Point::new(80, 20),
            Point::new(50, 50),
            Point::new(20, 80),
            Point::new(80, 80),
        ];
        let set = RegionPartitioner::new(VoronoiPartition)
            .partition(&sites, 100, 100)
            .unwrap();
        assert_eq!(set.len(), sites.len());
        for (region, site) in set.iter().zip(&sites) {
            assert_eq!(region.center, *site);
            assert!(region.boundary.len() >= 3);
            for p in &region.boundary {
                assert!(p.x >= 0 && p.x <= 100 && p.y >= 0 && p.y <= 100);
            }
        }
        // Only the middle site is off the hull; its cell is well inside the margin
        assert!(set.regions[2].bounded);
        assert!(!set.regions[0].bounded);
    }
}
