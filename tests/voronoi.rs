//! §4.V scenario coverage: Voronoi/Delaunay construction and its two
//! subdivision converters.

use geo_kernel::voronoi::{find_all, random_sites};
use geo_kernel::{hull::signed_area, Point, Rect, SiteDensityConfig, SubdivisionElement, ValidateConfig};

const EPS: f64 = 1e-9;

fn bounds() -> Rect {
    Rect::new(Point::new(0.0, 0.0), Point::new(100.0, 100.0))
}

#[test]
fn five_site_diagram_has_one_region_per_site_all_clockwise() {
    let sites = vec![
        Point::new(20.0, 20.0),
        Point::new(80.0, 20.0),
        Point::new(50.0, 50.0),
        Point::new(20.0, 80.0),
        Point::new(80.0, 80.0),
    ];
    let result = find_all(&sites, bounds(), EPS).unwrap();
    assert_eq!(result.sites.len(), 5);
    assert_eq!(result.voronoi_regions.len(), 5);
    for region in &result.voronoi_regions {
        assert!(region.len() >= 3);
        assert!(signed_area(region) > 0.0, "voronoi regions are clockwise (§4.V)");
    }
}

#[test]
fn delaunay_subdivision_has_one_bounded_face_per_triangle() {
    let sites = vec![
        Point::new(20.0, 20.0),
        Point::new(80.0, 20.0),
        Point::new(50.0, 80.0),
        Point::new(50.0, 40.0),
    ];
    let result = find_all(&sites, bounds(), EPS).unwrap();
    let delaunay = result.to_delaunay_subdivision(EPS);
    assert!(delaunay.validate(ValidateConfig::new()).is_ok());
    // Every bounded face of the reconstructed arrangement is a triangle.
    for f in delaunay.faces() {
        if f.0 == 0 {
            continue;
        }
        let outer = delaunay.outer_edge(f).unwrap();
        assert_eq!(delaunay.cycle_points(outer).len(), 3);
    }
    assert!(delaunay.face_count() >= 2);
}

#[test]
fn voronoi_subdivision_bijection_covers_every_region() {
    let sites = vec![
        Point::new(20.0, 20.0),
        Point::new(80.0, 20.0),
        Point::new(50.0, 80.0),
    ];
    let result = find_all(&sites, bounds(), EPS).unwrap();
    let (sub, region_to_face) = result.to_voronoi_subdivision(EPS);
    assert!(sub.validate(ValidateConfig::new()).is_ok());
    assert_eq!(region_to_face.len(), sites.len());
    for (i, region) in result.voronoi_regions.iter().enumerate() {
        let c = geo_kernel::hull::centroid(region).unwrap();
        let face = *region_to_face.get(&i).unwrap();
        assert_eq!(sub.find(c), SubdivisionElement::Face(face));
    }
}

#[test]
fn duplicate_site_is_rejected_before_triangulation_runs() {
    let sites = vec![Point::new(10.0, 10.0), Point::new(10.0, 10.0)];
    assert!(find_all(&sites, bounds(), EPS).is_err());
}

#[test]
fn site_outside_the_bounding_rect_is_rejected() {
    let sites = vec![Point::new(200.0, 200.0)];
    assert!(find_all(&sites, bounds(), EPS).is_err());
}

#[test]
fn random_sites_feed_directly_into_find_all() {
    let sites = random_sites(10, bounds(), SiteDensityConfig::new(5.0).seed(99)).unwrap();
    assert_eq!(sites.len(), 10);
    let result = find_all(&sites, bounds(), EPS).unwrap();
    assert_eq!(result.voronoi_regions.len(), 10);
}
