//! sdf4d - 4D SDF scene viewer (terminal edition)
//!
//! Loads a scene, builds a frame snapshot, and sweeps a probe grid through
//! the configured W slice, printing an ASCII cross-section. This plays the
//! role an external renderer or collider would: it only ever consumes the
//! field through the snapshot query interface.

use sdf4d::config::AppConfig;
use sdf4d::{SceneFile, SceneSnapshot, SliceState, Vec3};

fn main() {
    // Initialize logging
    env_logger::init();
    log::info!("Starting sdf4d");

    // Load configuration
    let config = AppConfig::load().unwrap_or_else(|e| {
        log::warn!("Failed to load config: {}. Using defaults.", e);
        AppConfig::default()
    });

    // Load the scene file
    let scene_file = SceneFile::load(&config.scene.path).unwrap_or_else(|e| {
        panic!("Failed to load scene '{}': {}", config.scene.path, e);
    });

    // Scene file settings win over config defaults
    let far = scene_file.far.unwrap_or(config.field.far_distance);
    let slice = scene_file
        .slice
        .unwrap_or_else(|| config.slice.to_slice_state());

    let scene = scene_file.to_scene();
    let snapshot = scene.snapshot().with_far(far);

    log::info!(
        "Scene '{}': {} shapes ({} top-level), far = {}",
        scene_file.name,
        snapshot.len(),
        scene.roots().len(),
        far
    );

    // Export the shape parameter buffer the way a shading stage would
    match snapshot.to_records() {
        Ok(records) => log::info!(
            "Shape buffer: {} records, {} bytes",
            records.len(),
            records.len() * std::mem::size_of::<sdf4d::ShapeRecord>()
        ),
        Err(e) => log::warn!("Scene not exportable as a shape buffer: {}", e),
    }

    print_cross_section(&snapshot, &slice, &config);
}

/// Sweep the probe grid at the configured height and print the slice
fn print_cross_section(snapshot: &SceneSnapshot, slice: &SliceState, config: &AppConfig) {
    let probe = &config.probe;
    let resolution = probe.resolution.max(2);
    let step = 2.0 * probe.extent / (resolution - 1) as f32;

    let mut hits = 0u32;
    let mut min_distance = f32::MAX;

    println!(
        "slice w = {:.2}, rotation = ({:.2}, {:.2}, {:.2}), y = {:.2}",
        slice.w_offset,
        slice.w_rotation.x,
        slice.w_rotation.y,
        slice.w_rotation.z,
        probe.height
    );

    for iz in 0..resolution {
        let z = -probe.extent + iz as f32 * step;
        let mut row = String::with_capacity(resolution as usize);
        for ix in 0..resolution {
            let x = -probe.extent + ix as f32 * step;
            let sample = snapshot.sample_at(Vec3::new(x, probe.height, z), slice);
            min_distance = min_distance.min(sample.distance);

            row.push(if sample.distance < -probe.surface_epsilon {
                hits += 1;
                '#'
            } else if sample.distance <= probe.surface_epsilon {
                hits += 1;
                '+'
            } else if sample.distance < 1.0 {
                '.'
            } else {
                ' '
            });
        }
        println!("{}", row);
    }

    let total = resolution * resolution;
    log::info!(
        "{} of {} probes inside or on a surface, nearest distance {:.3}",
        hits,
        total,
        min_distance
    );
}
