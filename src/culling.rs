//! Camera frustum culling of a probe grid
//!
//! Builds the view frustum described by [`CameraConfig`] and sorts a cubic grid
//! of probe spheres into inside / intersecting / outside.

use log::{debug, info};
use spatium_geom::{Containment, Frustum};
use spatium_math::{Quatd, Vec3d};

use crate::config::{AppConfig, CameraConfig, ProbeConfig};

/// Probe counts per containment class
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CullingReport {
    pub inside: usize,
    pub intersect: usize,
    pub outside: usize,
}

impl CullingReport {
    pub fn total(&self) -> usize {
        self.inside + self.intersect + self.outside
    }

    /// Probes that would still need drawing
    pub fn visible(&self) -> usize {
        self.inside + self.intersect
    }

    fn record(&mut self, containment: Containment) {
        match containment {
            Containment::Inside => self.inside += 1,
            Containment::Intersect => self.intersect += 1,
            Containment::Outside => self.outside += 1,
        }
    }
}

/// Camera orientation from the configured Euler angles (degrees)
pub fn camera_orientation(camera: &CameraConfig) -> Quatd {
    Quatd::from_euler(
        camera.azimuth.to_radians(),
        camera.elevation.to_radians(),
        camera.bank.to_radians(),
    )
}

/// Perspective frustum for the configured camera
pub fn camera_frustum(camera: &CameraConfig) -> Frustum<f64> {
    let [x, y, z] = camera.position;
    Frustum::from_perspective(
        Vec3d::new(x, y, z),
        &camera_orientation(camera),
        camera.fovy.to_radians(),
        camera.aspect,
        camera.near,
        camera.far,
    )
}

/// Centers of a cubic probe grid, centered on the origin
pub fn probe_centers(probes: &ProbeConfig) -> Vec<Vec3d> {
    let n = probes.grid_size;
    let half_extent = f64::from(n.saturating_sub(1)) * probes.spacing / 2.0;
    let coord = |i: u32| f64::from(i) * probes.spacing - half_extent;

    let mut centers = Vec::with_capacity((n as usize).pow(3));
    for i in 0..n {
        for j in 0..n {
            for k in 0..n {
                centers.push(Vec3d::new(coord(i), coord(j), coord(k)));
            }
        }
    }
    centers
}

/// Classify every probe sphere against `frustum`
pub fn classify_probes(
    frustum: &Frustum<f64>,
    probes: &ProbeConfig,
    log_each: bool,
) -> CullingReport {
    let mut report = CullingReport::default();
    for center in probe_centers(probes) {
        let containment = frustum.test_sphere(center, probes.radius);
        if log_each {
            debug!(
                "Probe at ({:.2}, {:.2}, {:.2}): {:?}",
                center.x(),
                center.y(),
                center.z(),
                containment
            );
        }
        report.record(containment);
    }
    report
}

/// Build the camera frustum from `config` and cull its probe grid
pub fn run(config: &AppConfig) -> CullingReport {
    let frustum = camera_frustum(&config.camera);
    let (lo, hi) = frustum.bounding_box();
    debug!(
        "Camera frustum bounds: ({:.2}, {:.2}, {:.2}) to ({:.2}, {:.2}, {:.2})",
        lo.x(),
        lo.y(),
        lo.z(),
        hi.x(),
        hi.y(),
        hi.z()
    );

    let report = classify_probes(&frustum, &config.probes, config.debug.log_probes);
    info!(
        "Culled {} probes: {} inside, {} intersecting, {} outside",
        report.total(),
        report.inside,
        report.intersect,
        report.outside
    );
    report
}
