//! Gridder CLI - partition a mesh onto a grid of brick files.
//!
//! Usage: gridder <INPUT> <NX> <NY> <NZ> <OUTPUT_PREFIX>
//!
//! Run `gridder --help` for the full surface.

use std::path::PathBuf;
use std::time::Instant;

use clap::{Parser, ValueEnum};

use brickgrid::assign::{write_bricks, GridOptions};
use brickgrid::error::GridError;
use brickgrid::grid::Grid;
use brickgrid::io::{self, Format};

#[derive(Parser)]
#[command(name = "gridder")]
#[command(author, version)]
#[command(about = "Grid a mesh: one self-contained brick mesh per grid cell")]
#[command(long_about = "Grids the input mesh onto an NX x NY x NZ grid over its bounding \
box and writes every cell as <OUTPUT_PREFIX><cell>.<ext>, where <cell> is the linear \
cell index. Triangles straddling a cell boundary are written to every cell they touch; \
cells containing no geometry still produce a valid empty file.")]
struct Cli {
    /// Input mesh file (.obj or .brk, chosen by extension)
    input: PathBuf,

    /// Number of grid cells along x
    nx: usize,

    /// Number of grid cells along y
    ny: usize,

    /// Number of grid cells along z
    nz: usize,

    /// Output path prefix; cell files are <prefix><cell>.<ext>
    output_prefix: String,

    /// Output format for the per-cell bricks
    #[arg(short, long, value_enum, default_value = "obj")]
    format: OutputFormat,

    /// Use single-threaded execution (for benchmarking)
    #[arg(long)]
    sequential: bool,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Wavefront OBJ text
    Obj,
    /// Binary brick format
    Brk,
}

impl From<OutputFormat> for Format {
    fn from(f: OutputFormat) -> Format {
        match f {
            OutputFormat::Obj => Format::Obj,
            OutputFormat::Brk => Format::Brk,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), GridError> {
    let mesh = io::load_mesh(&cli.input)?;
    println!(
        "Loaded: {} vertices, {} triangles",
        mesh.num_vertices(),
        mesh.num_triangles()
    );

    if mesh.is_empty() {
        return Err(GridError::EmptyMesh);
    }

    let bounds = mesh.bounds();
    println!(
        "Bounding box: ({:.3}, {:.3}, {:.3}) to ({:.3}, {:.3}, {:.3})",
        bounds.lower.x, bounds.lower.y, bounds.lower.z,
        bounds.upper.x, bounds.upper.y, bounds.upper.z
    );

    let grid = Grid::plan(&bounds, cli.nx, cli.ny, cli.nz)?;
    let cell_size = grid.cell_size();
    println!(
        "Grid: {}x{}x{} cells of {:.3} x {:.3} x {:.3}",
        cli.nx, cli.ny, cli.nz, cell_size.x, cell_size.y, cell_size.z
    );

    let options = GridOptions::default().with_parallel(!cli.sequential);
    let mode = if cli.sequential { "sequential" } else { "parallel" };
    println!("Gridding {} cells ({})...", grid.num_cells(), mode);

    let start = Instant::now();
    let cells = write_bricks(&mesh, &grid, &cli.output_prefix, cli.format.into(), &options)?;
    let elapsed = start.elapsed();

    println!(
        "Saved: {} brick files at {}*.{} ({:.2?})",
        cells,
        cli.output_prefix,
        Format::from(cli.format).extension(),
        elapsed
    );

    Ok(())
}
