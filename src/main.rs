use clap::Parser;
use crystal_growth::{CrystalModel, SimConfig};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "crystal-growth")]
#[command(about = "Diffusion-limited aggregation crystal growth in the terminal")]
struct Args {
    /// Side length of the square bath [default: 61]
    #[arg(short = 'w', long)]
    bath_width: Option<usize>,

    /// Release radius: ions launch from this circle and growth stops once
    /// the crystal reaches it [default: 20]
    #[arg(long)]
    r_start: Option<u32>,

    /// Escape radius: walkers drifting this far out are discarded [default: 28]
    #[arg(long)]
    r_escape: Option<u32>,

    /// Seed for the random sequence [default: 1]
    #[arg(short, long)]
    seed: Option<u32>,

    /// Stop after this many attached ions, 0 = run until saturated [default: 0]
    #[arg(long)]
    max_ions: Option<usize>,

    /// Ions crystallized per batch [default: 25]
    #[arg(long)]
    batch: Option<u32>,

    /// Print a snapshot every N batches, 0 = final snapshot only [default: 0]
    #[arg(long)]
    snapshot_every: Option<usize>,

    /// Load parameters from a JSON config file (flags above still override)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the effective parameters to a JSON config file and exit
    #[arg(long)]
    save_config: Option<PathBuf>,
}

/// Layer the sources of parameters: built-in defaults, then the config
/// file (explicit path, or the per-user file when present), then any
/// flags given on the command line.
fn effective_config(args: &Args) -> Result<SimConfig, String> {
    let mut config = match &args.config {
        Some(path) => SimConfig::load_from_file(path)?,
        None => match SimConfig::default_path() {
            Some(path) if path.exists() => SimConfig::load_from_file(&path)?,
            _ => SimConfig::default(),
        },
    };

    if let Some(v) = args.bath_width {
        config.bath_width = v;
    }
    if let Some(v) = args.r_start {
        config.r_start = v;
    }
    if let Some(v) = args.r_escape {
        config.r_escape = v;
    }
    if let Some(v) = args.seed {
        config.seed = v;
    }
    if let Some(v) = args.max_ions {
        config.max_ions = v;
    }
    if let Some(v) = args.batch {
        config.batch_size = v;
    }
    if let Some(v) = args.snapshot_every {
        config.snapshot_every = v;
    }
    Ok(config)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = effective_config(&args)?;

    if let Some(path) = &args.save_config {
        config.save_to_file(path)?;
        println!("Wrote config to {}", path.display());
        return Ok(());
    }

    let mut model = CrystalModel::new(config.bath_width, config.r_start, config.r_escape)?;
    model.seed(config.seed);

    let batch = config.batch_size.max(1);
    let mut batches = 0usize;
    loop {
        let step = if config.max_ions > 0 {
            let remaining = config.max_ions.saturating_sub(model.ions_attached());
            if remaining == 0 {
                break;
            }
            remaining.min(batch as usize) as u32
        } else {
            batch
        };

        let growing = model.run_some_steps(step);
        batches += 1;

        if config.snapshot_every > 0 && batches % config.snapshot_every == 0 {
            print!("{}", model.render());
            println!("{} ions attached", model.ions_attached());
        }

        if !growing {
            break;
        }
    }

    print!("{}", model.render());
    println!(
        "{} ions attached after {} batches ({}), last ion at ({}, {})",
        model.ions_attached(),
        batches,
        model.phase().name(),
        model.get_last_x(),
        model.get_last_y()
    );

    Ok(())
}
