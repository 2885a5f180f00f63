//! Mood Map - Main entry point
//!
//! Loads the two session-position datasets (local and global), composes the
//! layered density scene from the requested visual parameters, renders it
//! with the reference raster driver, and writes the PNG artifact.

use std::path::PathBuf;

use anyhow::Context;

use moodmap::config::{PlotConfig, VisualParameters};
use moodmap::fetch::load_dataset;
use moodmap::pipeline;
use moodmap::raster::RasterDriver;
use moodmap::render::DisplaySlot;
use moodmap::sample::Scope;
use moodmap::state::ViewState;

/// Parsed command-line arguments
struct CliArgs {
    local_path: PathBuf,
    global_path: PathBuf,
    out_path: PathBuf,
    params: VisualParameters,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    println!("Mood Map v{}", env!("CARGO_PKG_VERSION"));

    let args: Vec<String> = std::env::args().collect();
    let cli = parse_args(&args);

    println!("  Local dataset:  {}", cli.local_path.display());
    println!("  Global dataset: {}", cli.global_path.display());
    println!("  Output:         {}", cli.out_path.display());
    println!(
        "  Parameters: opacity={}, bandwidth={}, skew={}, points={}",
        cli.params.opacity(),
        cli.params.bandwidth(),
        cli.params.skew(),
        cli.params.show_points()
    );

    let mut state = ViewState::new();
    state.params = cli.params;

    // The two fetches are independent and may resolve in either order
    println!("\n[1/3] Loading datasets...");
    let (local, global) = futures::join!(
        load_dataset(&cli.local_path, Scope::Local),
        load_dataset(&cli.global_path, Scope::Global),
    );

    match local {
        Ok(ds) => {
            println!("✓ Local dataset loaded ({} samples)", ds.len());
            state.set_dataset(Scope::Local, ds);
        }
        Err(e) => eprintln!("⚠ Local dataset unavailable: {}", e),
    }
    match global {
        Ok(ds) => {
            println!("✓ Global dataset loaded ({} samples)", ds.len());
            state.set_dataset(Scope::Global, ds);
        }
        Err(e) => eprintln!("⚠ Global dataset unavailable: {}", e),
    }

    println!("\n[2/3] Composing and rendering...");
    let config = PlotConfig::default();
    let driver = RasterDriver::new();
    let mut slot = DisplaySlot::new();

    match pipeline::recompute(&state, &config, &driver)? {
        Some(artifact) => slot.attach(artifact),
        None => {
            println!("Nothing rendered: both datasets must resolve first");
            std::process::exit(1);
        }
    }

    println!("\n[3/3] Writing artifact...");
    let artifact = slot.current().expect("artifact was just attached");
    std::fs::write(&cli.out_path, &artifact.png)
        .with_context(|| format!("Failed to write {}", cli.out_path.display()))?;

    println!(
        "✓ Plot generated ({} bytes, {}×{}): {}",
        artifact.png.len(),
        artifact.width,
        artifact.height,
        config.caption
    );

    Ok(())
}

/// Parse command-line arguments
///
/// Unknown flags are ignored; invalid numeric values fall back to the
/// parameter default with a warning. Out-of-range values clamp in the
/// parameter setters.
fn parse_args(args: &[String]) -> CliArgs {
    let mut cli = CliArgs {
        local_path: PathBuf::from("local.json"),
        global_path: PathBuf::from("global.json"),
        out_path: PathBuf::from("mood_map.png"),
        params: VisualParameters::default(),
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--local" if i + 1 < args.len() => {
                cli.local_path = PathBuf::from(&args[i + 1]);
                i += 2;
            }
            "--global" if i + 1 < args.len() => {
                cli.global_path = PathBuf::from(&args[i + 1]);
                i += 2;
            }
            "--out" if i + 1 < args.len() => {
                cli.out_path = PathBuf::from(&args[i + 1]);
                i += 2;
            }
            "--opacity" if i + 1 < args.len() => {
                if let Some(v) = parse_f64("--opacity", &args[i + 1]) {
                    cli.params.set_opacity(v);
                }
                i += 2;
            }
            "--bandwidth" if i + 1 < args.len() => {
                if let Some(v) = parse_f64("--bandwidth", &args[i + 1]) {
                    cli.params.set_bandwidth(v);
                }
                i += 2;
            }
            "--skew" if i + 1 < args.len() => {
                if let Some(v) = parse_f64("--skew", &args[i + 1]) {
                    cli.params.set_skew(v);
                }
                i += 2;
            }
            "--show-points" => {
                cli.params.set_show_points(true);
                i += 1;
            }
            _ => i += 1,
        }
    }

    cli
}

fn parse_f64(flag: &str, raw: &str) -> Option<f64> {
    match raw.parse::<f64>() {
        Ok(v) => Some(v),
        Err(_) => {
            eprintln!("⚠ Invalid value for {}: '{}', using default", flag, raw);
            None
        }
    }
}
