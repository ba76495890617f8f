//! Prints what a map renderer would fetch and draw for a single frame over Warsaw.
//!
//! Zoom can be passed as the first argument. Set `RUST_LOG=trace` to see the library's logs.

use tilespace::{PathOptions, PlanarRect, ProjectedPath, Projector, TileSystem, Zoom, lat_lon};

#[expect(clippy::print_stdout)]
fn main() {
    env_logger::init();

    let zoom = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse::<f64>().ok())
        .and_then(|zoom| Zoom::try_from(zoom).ok())
        .unwrap_or_else(|| {
            log::warn!("No valid zoom given, using the default one.");
            Zoom::default()
        });

    let tile_system = TileSystem::default();
    let projector = Projector::new(
        tile_system,
        PlanarRect::new(0, 0, 1280, 720),
        lat_lon(52.2297, 21.0122),
        zoom,
    )
    .with_orientation(15.);

    match projector.visible_tiles() {
        Ok(region) => {
            println!("{} visible tiles:", region.size());
            for tile in &region {
                println!("  {}/{}/{}", tile.zoom(), tile.x(), tile.y());
            }
        }
        Err(err) => log::error!("Cannot compute visible tiles: {err}"),
    }

    // Vistula, from the south of the city to the north.
    let river = ProjectedPath::new(
        &tile_system,
        [
            lat_lon(52.1562, 21.0910),
            lat_lon(52.1967, 21.0538),
            lat_lon(52.2331, 21.0443),
            lat_lon(52.2570, 21.0153),
            lat_lon(52.2884, 20.9870),
            lat_lon(52.3346, 20.9460),
        ],
        false,
    );

    let options = PathOptions::default().with_simplification_tolerance(1.);
    let rendered = river.build_path(&projector, &options, None);
    println!(
        "River, {:.1} km long, drawn with {} points (offset {:?}):",
        river.length() / 1000.,
        rendered.points.len(),
        rendered.offset
    );
    for point in &rendered.points {
        let point = projector.rotate(*point);
        println!("  {}, {}", point.x, point.y);
    }
}
