//! Spatium - frustum culling demo
//!
//! Loads the camera and probe grid from `config/`, builds the camera frustum
//! and reports how many probes survive culling.

use spatium::config::AppConfig;
use spatium::culling;

fn main() {
    // Logging isn't up yet, so config errors are reported after init
    let (config, load_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    // RUST_LOG still wins over the configured level
    env_logger::Builder::new()
        .parse_filters(&config.debug.log_level)
        .parse_default_env()
        .init();

    if let Some(e) = load_error {
        log::warn!("Failed to load config: {}. Using defaults.", e);
    }

    let camera = &config.camera;
    log::info!(
        "Camera at ({}, {}, {}) heading {}° pitch {}° roll {}°, fovy {}°",
        camera.position[0],
        camera.position[1],
        camera.position[2],
        camera.azimuth,
        camera.elevation,
        camera.bank,
        camera.fovy
    );

    let report = culling::run(&config);
    log::info!(
        "{} of {} probes visible",
        report.visible(),
        report.total()
    );
}
