//! ASCII rendering and export of resident chunks
//!
//! Renders a window of chunks as text, one character per cell, optionally
//! colored with ANSI truecolor codes, and writes world reports to files.

use std::fs::File;
use std::io::{self, Write};

use chrono::Local;

use crate::biomes::TerrainType;
use crate::chunk::Chunk;
use crate::coords::{ChunkCoord, ChunkWindow, LocalCoord};
use crate::objects::PlacedObject;
use crate::world::World;

/// Character drawn for cells of chunks that are not resident
const MISSING_CHAR: char = ' ';

/// Render a window of chunks as plain ASCII.
pub fn render_window(world: &World, window: &ChunkWindow) -> String {
    render_cells(world, window, |cell| match cell {
        Some((chunk, local)) => chunk.cell_char(local).to_string(),
        None => MISSING_CHAR.to_string(),
    })
}

/// Render a window of chunks with ANSI colors.
pub fn render_colored_window(world: &World, window: &ChunkWindow) -> String {
    let mut map = render_cells(world, window, |cell| match cell {
        Some((chunk, local)) => {
            let bg = chunk.terrain_at(local).color();
            let fg = chunk.cell_color(local);
            ansi_colored_char(chunk.cell_char(local), contrast(fg, bg), bg)
        }
        None => MISSING_CHAR.to_string(),
    });
    map.push_str("\x1b[0m");
    map
}

/// Walk the window row by row, one cell at a time.
fn render_cells<F>(world: &World, window: &ChunkWindow, mut cell: F) -> String
where
    F: FnMut(Option<(&Chunk, LocalCoord)>) -> String,
{
    let size = world.config().chunk_size;
    let r = window.radius as i32;
    let mut result = String::with_capacity((window.span() * size + 1) * window.span() * size);

    for cy in window.center.y - r..=window.center.y + r {
        let row: Vec<Option<&Chunk>> = (window.center.x - r..=window.center.x + r)
            .map(|cx| world.chunk(ChunkCoord::new(cx, cy)).ok())
            .collect();

        for y in 0..size {
            for chunk in &row {
                for x in 0..size {
                    result.push_str(&cell(chunk.map(|c| (c, LocalCoord::new(x, y)))));
                }
            }
            result.push('\n');
        }
    }

    result
}

/// Foreground for a cell: the object color, or a shifted terrain color when
/// the object color would vanish into the background.
fn contrast(fg: (u8, u8, u8), bg: (u8, u8, u8)) -> (u8, u8, u8) {
    if fg != bg {
        return fg;
    }
    let luma = 0.299 * bg.0 as f32 + 0.587 * bg.1 as f32 + 0.114 * bg.2 as f32;
    if luma > 128.0 {
        (bg.0.saturating_sub(60), bg.1.saturating_sub(60), bg.2.saturating_sub(60))
    } else {
        (bg.0.saturating_add(60), bg.1.saturating_add(60), bg.2.saturating_add(60))
    }
}

pub fn ansi_colored_char(ch: char, fg: (u8, u8, u8), bg: (u8, u8, u8)) -> String {
    format!(
        "\x1b[38;2;{};{};{}m\x1b[48;2;{};{};{}m{}",
        fg.0, fg.1, fg.2, bg.0, bg.1, bg.2, ch
    )
}

/// Legend for terrain and object characters
pub fn legend() -> String {
    let mut legend = String::new();
    legend.push_str("=== LEGEND ===\n");
    legend.push_str("TERRAIN:\n");
    for terrain in TerrainType::ALL {
        legend.push_str(&format!("  {} {}\n", terrain.ascii_char(), terrain.display_name()));
    }
    legend.push_str("OBJECTS:\n");
    for object in [
        PlacedObject::Wall,
        PlacedObject::Road,
        PlacedObject::Tree,
        PlacedObject::CaveEntrance,
    ] {
        legend.push_str(&format!("  {} {:?}\n", object.ascii_char(), object));
    }
    legend
}

/// Write the window map, legend and per-chunk statistics to `path`.
pub fn export_window_file(world: &World, window: &ChunkWindow, path: &str) -> io::Result<()> {
    let mut file = File::create(path)?;
    let params = &world.config().generator;

    // Header
    writeln!(file, "=== CHUNK WORLD FILE ===")?;
    writeln!(file, "Seed: {}", world.seed())?;
    writeln!(
        file,
        "Window: center {} radius {} ({} chunks of {} cells)",
        window.center,
        window.radius,
        window.span() * window.span(),
        world.config().chunk_size
    )?;
    writeln!(
        file,
        "Noise: persistence {:.2}, octave {}, interval {:.3}",
        params.persistence, params.octave, params.interval
    )?;
    writeln!(file, "Generated: {}", Local::now().format("%Y-%m-%d %H:%M:%S"))?;
    writeln!(file)?;

    writeln!(file, "=== MAP ===")?;
    write!(file, "{}", render_window(world, window))?;
    writeln!(file)?;

    write!(file, "{}", legend())?;
    writeln!(file)?;

    writeln!(file, "=== CHUNKS ===")?;
    for coord in window.coords() {
        let Ok(chunk) = world.chunk(coord) else {
            writeln!(file, "{}: not resident", coord)?;
            continue;
        };
        write!(file, "{}: {}", coord, chunk_summary(chunk))?;
    }

    Ok(())
}

/// Terrain distribution, object counts and settlement of one chunk
pub fn chunk_summary(chunk: &Chunk) -> String {
    let total = (chunk.size() * chunk.size()) as f64;
    let mut summary = String::new();

    let terrain: Vec<String> = TerrainType::ALL
        .iter()
        .zip(chunk.terrain_histogram())
        .filter(|(_, count)| *count > 0)
        .map(|(t, count)| format!("{} {:.1}%", t.display_name(), 100.0 * count as f64 / total))
        .collect();
    summary.push_str(&terrain.join(", "));
    summary.push('\n');

    let objects = chunk.objects();
    summary.push_str(&format!(
        "  objects: {} walls, {} roads, {} trees, {} caves\n",
        objects.count(PlacedObject::Wall),
        objects.count(PlacedObject::Road),
        objects.count(PlacedObject::Tree),
        objects.count(PlacedObject::CaveEntrance)
    ));

    if let Some(town) = chunk.settlement() {
        summary.push_str(&format!(
            "  town {}: radius {} (safe {}), {} buildings, {} roads ({} skipped)\n",
            town.name,
            town.radius,
            town.safe_radius,
            town.buildings.len(),
            town.roads.connected,
            town.roads.skipped
        ));
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WorldConfig;

    fn tiny_world() -> World {
        World::new(WorldConfig {
            chunk_size: 8,
            ..WorldConfig::with_seed(5)
        })
    }

    #[test]
    fn test_render_dimensions() {
        let mut world = tiny_world();
        world.ensure_chunks_in_window(ChunkCoord::new(0, 0), 1);
        let map = render_window(&world, &ChunkWindow::new(ChunkCoord::new(0, 0), 1));
        let lines: Vec<&str> = map.lines().collect();
        assert_eq!(lines.len(), 24);
        assert!(lines.iter().all(|l| l.chars().count() == 24));
        assert!(!map.contains(MISSING_CHAR));
    }

    #[test]
    fn test_missing_chunks_render_blank() {
        let mut world = tiny_world();
        world.ensure_chunks_in_window(ChunkCoord::new(0, 0), 0);
        let map = render_window(&world, &ChunkWindow::new(ChunkCoord::new(0, 0), 1));
        let first = map.lines().next().unwrap();
        assert!(first.chars().all(|c| c == MISSING_CHAR));
        let middle = map.lines().nth(8).unwrap();
        assert!(middle[8..16].chars().all(|c| c != MISSING_CHAR));
    }

    #[test]
    fn test_legend_lists_every_terrain() {
        let legend = legend();
        for terrain in TerrainType::ALL {
            assert!(legend.contains(terrain.display_name()));
        }
    }
}
