//! Office Tour entry point
//!
//! Native builds run a scripted walk through an office layout and log what
//! the avatar bumps into. The browser build uses `office_tour::web` instead.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use office_tour::{Settings, Tour};

    env_logger::init();
    log::info!("Office Tour (native) starting...");

    let mut args = std::env::args().skip(1);
    let layout_path = args.next();
    let settings_path = args.next();

    let layout = match load_layout(layout_path.as_deref()) {
        Ok(layout) => layout,
        Err(e) => {
            log::error!("Failed to load layout: {}", e);
            std::process::exit(1);
        }
    };
    let settings = settings_path
        .map(Settings::load_or_default)
        .unwrap_or_default();

    let (mut tour, index) = match Tour::from_scene(&layout, settings) {
        Ok(loaded) => loaded,
        Err(e) => {
            log::error!("Failed to build scene: {}", e);
            std::process::exit(1);
        }
    };

    walk(&mut tour);

    let found: Vec<&str> = tour.discovered().collect();
    println!(
        "\nFinished at {} (tile {:?}), discovered {}/{} buildings: {}",
        tour.position(),
        tour.tile(),
        found.len(),
        index.buildings.len(),
        found.join(", ")
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is web::start, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn load_layout(path: Option<&str>) -> Result<office_tour::SceneLayout, Box<dyn std::error::Error>> {
    const DEFAULT_LAYOUT: &str = include_str!("../assets/office.json");

    let json = match path {
        Some(path) => std::fs::read_to_string(path)?,
        None => DEFAULT_LAYOUT.to_string(),
    };
    Ok(office_tour::SceneLayout::from_json(&json)?)
}

/// Scripted route: along the main road, up the avenue, then bump into each building
#[cfg(not(target_arch = "wasm32"))]
fn walk(tour: &mut office_tour::Tour) {
    use glam::Vec2;
    use office_tour::consts::SIM_DT;
    use office_tour::{TourEvent, TourInput};

    let route: [(Vec2, f32); 7] = [
        (Vec2::X, 2.3),
        (Vec2::NEG_Y, 1.0),
        (Vec2::NEG_X, 1.0),
        (Vec2::X, 1.0),
        (Vec2::Y, 2.0),
        (Vec2::NEG_X, 1.0),
        (Vec2::X, 1.0),
    ];

    for (direction, seconds) in route {
        let input = TourInput { direction };
        let ticks = (seconds / SIM_DT).round() as u32;
        let mut blocked_ticks = 0;

        for _ in 0..ticks {
            for event in tour.step(&input, SIM_DT) {
                match event {
                    TourEvent::Moved { .. } => {}
                    TourEvent::Blocked { .. } => blocked_ticks += 1,
                    TourEvent::Discovered { name, .. } => println!("✓ Discovered {}", name),
                }
            }
        }

        log::info!(
            "Walked {} for {:.1}s: now at {} ({} blocked ticks)",
            direction,
            seconds,
            tour.position(),
            blocked_ticks
        );
    }
}
