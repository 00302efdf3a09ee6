use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use chunkworld::ascii::{chunk_summary, export_window_file, legend, render_colored_window, render_window};
use chunkworld::{ChunkWindow, World, WorldConfig, WorldPos};

#[derive(Parser, Debug)]
#[command(name = "chunkworld")]
#[command(about = "Generate an infinite chunked world with towns and roads")]
struct Args {
    /// World seed (default: 123, or the config file's seed)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Camera X position in world pixels
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    camera_x: i64,

    /// Camera Y position in world pixels
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    camera_y: i64,

    /// Chunks to keep on each side of the camera chunk
    #[arg(short, long)]
    radius: Option<u32>,

    /// Noise octave count (clamped to at least 1)
    #[arg(long)]
    octave: Option<u32>,

    /// Noise amplitude falloff per octave
    #[arg(long)]
    persistence: Option<f64>,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Print the map with ANSI colors
    #[arg(long)]
    color: bool,

    /// Export the window to a text file (e.g., "world.txt")
    #[arg(long)]
    export: Option<String>,

    /// Print the settlements of the window as JSON instead of the map
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive("chunkworld=info".parse()?))
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => WorldConfig::from_json_file(path)?,
        None => WorldConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(radius) = args.radius {
        config.retention_radius = radius;
    }
    if let Some(octave) = args.octave {
        config.generator.octave = octave;
    }
    if let Some(persistence) = args.persistence {
        config.generator.persistence = persistence;
    }

    let mut world = World::new(config);
    let camera = WorldPos::new(args.camera_x, args.camera_y);
    let generated = world.ensure_around(camera);
    let window = ChunkWindow::new(world.chunk_of(camera.x, camera.y), world.config().retention_radius);
    info!("{} chunks generated around {}", generated, window.center);

    if args.json {
        let mut settlements = Vec::new();
        for coord in world.resident_chunks() {
            if let Some(town) = world.chunk(coord)?.settlement() {
                settlements.push((coord, town));
            }
        }
        println!("{}", serde_json::to_string_pretty(&settlements)?);
        return Ok(());
    }

    if args.color {
        print!("{}", render_colored_window(&world, &window));
        println!();
    } else {
        print!("{}", render_window(&world, &window));
    }
    println!();
    print!("{}", legend());
    println!();

    for coord in world.resident_chunks() {
        print!("{}: {}", coord, chunk_summary(world.chunk(coord)?));
    }

    if let Some(path) = &args.export {
        export_window_file(&world, &window, path)?;
        info!("exported window to {}", path);
    }

    Ok(())
}
