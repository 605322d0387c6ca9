//! Ray/sphere intersection and spherical direction helpers.

use glam::DVec3;

/// Far intersection of the ray `origin + t * direction` with a sphere of
/// `radius` centered at the origin.
///
/// `origin` is relative to the sphere center; `direction` need not be unit
/// length. The ray must hit the sphere: a miss is a caller bug and is only
/// caught by a debug assertion.
pub fn sphere_intersection(origin: DVec3, direction: DVec3, radius: f64) -> DVec3 {
    let (a, b, disc) = quadratic(origin, direction, radius);
    debug_assert!(
        disc >= 0.0,
        "ray from {origin} along {direction} misses sphere of radius {radius}"
    );
    let t = (-b + disc.sqrt()) / (2.0 * a);
    origin + direction * t
}

/// Coefficients `a`, `b` and the discriminant of `a t² + b t + c = 0`.
fn quadratic(origin: DVec3, direction: DVec3, radius: f64) -> (f64, f64, f64) {
    let a = direction.length_squared();
    let b = 2.0 * direction.dot(origin);
    let c = origin.length_squared() - radius * radius;
    (a, b, b * b - 4.0 * a * c)
}

/// Unit direction for a latitude/longitude pair in radians.
///
/// Latitude is the elevation above the xy plane, longitude the azimuth
/// from +x toward +y.
pub fn direction_from_lat_lon(latitude: f64, longitude: f64) -> DVec3 {
    DVec3::new(
        latitude.cos() * longitude.cos(),
        latitude.cos() * longitude.sin(),
        latitude.sin(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

    #[test]
    fn test_from_center_hits_radius() {
        let radius = 6_420_000.0;
        for (lat, lon) in [(0.0, 0.0), (0.3, 1.2), (-1.1, 2.9), (FRAC_PI_2, 0.0), (0.7, -2.0)] {
            let dir = direction_from_lat_lon(lat, lon);
            let hit = sphere_intersection(DVec3::ZERO, dir, radius);
            assert!(
                (hit.length() - radius).abs() < 1e-6,
                "lat={lat} lon={lon}: |hit|={}",
                hit.length()
            );
            assert!(hit.dot(dir) > 0.0, "far root must lie ahead of the origin");
        }
    }

    #[test]
    fn test_far_root_selected() {
        // From outside the sphere looking through it, the far side is returned.
        let hit = sphere_intersection(DVec3::new(0.0, 0.0, -10.0), DVec3::Z, 2.0);
        assert!((hit - DVec3::new(0.0, 0.0, 2.0)).length() < 1e-12);
    }

    #[test]
    fn test_non_unit_direction() {
        let hit = sphere_intersection(DVec3::new(1.0, 0.0, 0.0), DVec3::new(0.0, 5.0, 0.0), 2.0);
        assert!((hit.length() - 2.0).abs() < 1e-12);
        assert!(hit.y > 0.0);
    }

    #[test]
    fn test_origin_on_surface_looking_out() {
        let hit = sphere_intersection(DVec3::new(0.0, 0.0, 3.0), DVec3::Z, 3.0);
        assert_eq!(hit, DVec3::new(0.0, 0.0, 3.0));
    }

    #[test]
    fn test_direction_is_unit() {
        for (lat, lon) in [(0.0, 0.0), (FRAC_PI_4, FRAC_PI_4), (-0.4, 3.0)] {
            let d = direction_from_lat_lon(lat, lon);
            assert!((d.length() - 1.0).abs() < 1e-12);
        }
        assert!((direction_from_lat_lon(FRAC_PI_2, 1.0) - DVec3::Z).length() < 1e-12);
        assert!((direction_from_lat_lon(0.0, FRAC_PI_2) - DVec3::Y).length() < 1e-12);
    }
}
