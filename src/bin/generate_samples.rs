//! Synthetic dataset generator
//!
//! Standalone development tool that writes a plausible local.json and
//! global.json so the renderer can be exercised without a real session
//! store. The global population scatters around several emotion landmarks;
//! the local population is a tight cluster, as a single session would be.
//!
//! Usage:
//! ```bash
//! cargo run --bin generate_samples -- --dir data/
//! cargo run --bin moodmap -- --local data/local.json --global data/global.json
//! ```

use std::path::PathBuf;

use anyhow::Context;
use serde_json::json;

/// Deterministic pseudo-random stream (splitmix64), seeded per run
struct Rng(u64);

impl Rng {
    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E3779B97F4A7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
        z ^ (z >> 31)
    }

    /// Uniform in [0,1)
    fn uniform(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Approximate standard normal (Irwin-Hall sum of 12 uniforms)
    fn normal(&mut self) -> f64 {
        (0..12).map(|_| self.uniform()).sum::<f64>() - 6.0
    }
}

/// Draw one sample near a center, clamped to the unit square
fn sample_near(rng: &mut Rng, center: (f64, f64), spread: f64) -> (f64, f64) {
    let x = (center.0 + rng.normal() * spread).clamp(0.0, 1.0);
    let y = (center.1 + rng.normal() * spread).clamp(0.0, 1.0);
    (x, y)
}

fn main() -> anyhow::Result<()> {
    let dir = parse_dir(&std::env::args().collect::<Vec<_>>());
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;

    let mut rng = Rng(0x5EED);

    // Global population: scattered across a handful of mood clusters
    let clusters = [
        ((0.78, 0.22), 0.06, 300),
        ((0.85, 0.62), 0.05, 220),
        ((0.5, 0.5), 0.1, 260),
        ((0.2, 0.7), 0.07, 140),
        ((0.35, 0.2), 0.08, 80),
    ];
    let mut global = Vec::new();
    for (center, spread, count) in clusters {
        for _ in 0..count {
            let (x, y) = sample_near(&mut rng, center, spread);
            global.push(json!({"x": x, "y": y, "scope": "global"}));
        }
    }

    // Local population: one session drifting from neutral toward relaxed
    let mut local = Vec::new();
    for i in 0..120 {
        let t = i as f64 / 120.0;
        let center = (0.5 + t * 0.28, 0.5 - t * 0.28);
        let (x, y) = sample_near(&mut rng, center, 0.04);
        local.push(json!({"x": x, "y": y, "scope": "local"}));
    }

    let global_path = dir.join("global.json");
    let local_path = dir.join("local.json");
    std::fs::write(&global_path, serde_json::to_string_pretty(&global)?)?;
    std::fs::write(&local_path, serde_json::to_string_pretty(&local)?)?;

    println!(
        "✓ Wrote {} global samples to {}",
        global.len(),
        global_path.display()
    );
    println!(
        "✓ Wrote {} local samples to {}",
        local.len(),
        local_path.display()
    );

    Ok(())
}

fn parse_dir(args: &[String]) -> PathBuf {
    let mut i = 1;
    while i < args.len() {
        if args[i] == "--dir" && i + 1 < args.len() {
            return PathBuf::from(&args[i + 1]);
        }
        i += 1;
    }
    PathBuf::from(".")
}
