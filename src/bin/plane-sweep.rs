use std::{
    convert::TryFrom,
    fs::File,
    io::{BufWriter, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};

use plane_sweep::{brute_force, io, Segment, Sweep, Tolerance};

/// Points printed to the terminal at most.
const MAX_PRINTED: usize = 500;

/// Find all intersections of the line segments in a file.
#[derive(Parser)]
struct Cli {
    /// Input file: the segment count, then `x1 y1 x2 y2` per line.
    input: PathBuf,

    /// Output file [default: output_plane_sweep.txt, or
    /// output_brute_force.txt with --brute-force]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Test every pair of segments instead of sweeping.
    #[arg(long)]
    brute_force: bool,

    /// Drop zero-length segments instead of failing.
    #[arg(long)]
    skip_degenerate: bool,

    /// Decimal digits kept when testing whether a point is on a line.
    #[arg(
        long,
        default_value_t = Tolerance::DEFAULT_DECIMALS,
        value_parser = clap::value_parser!(u32).range(0..=Tolerance::MAX_DECIMALS as i64),
    )]
    decimals: u32,

    /// Print the processed sweep events in order.
    #[arg(long)]
    trace: bool,
}

fn read_segments(cli: &Cli) -> Result<Vec<Segment>> {
    let input = std::fs::read_to_string(&cli.input)
        .with_context(|| format!("reading {}", cli.input.display()))?;
    let lines = io::parse_lines(&input).with_context(|| format!("parsing {}", cli.input.display()))?;

    let mut segments = Vec::with_capacity(lines.len());
    for (idx, line) in lines.into_iter().enumerate() {
        match Segment::try_from(line) {
            Ok(segment) => segments.push(segment),
            Err(e) if cli.skip_degenerate => warn!("skipping segment {}: {}", idx, e),
            Err(e) => return Err(e).with_context(|| format!("segment {}", idx)),
        }
    }
    Ok(segments)
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let tolerance = Tolerance::new(cli.decimals);

    info!("reading input file: {}", cli.input.display());
    let segments = read_segments(&cli)?;
    println!("{}", segments.len());

    let points = if cli.brute_force {
        info!("starting brute force");
        brute_force::intersections(&segments, tolerance)
    } else {
        info!("starting sweep line");
        let output = Sweep::with_tolerance(segments, tolerance).run()?;
        if cli.trace {
            for event in &output.trace {
                println!("{}", event);
            }
        }
        output.points
    };

    println!("\nINTERSECTIONS");
    println!("{}", points.len());
    if points.len() <= MAX_PRINTED {
        for pt in &points {
            println!("{}", pt);
        }
    }

    let output = cli.output.clone().unwrap_or_else(|| {
        if cli.brute_force {
            "output_brute_force.txt".into()
        } else {
            "output_plane_sweep.txt".into()
        }
    });
    info!("writing output file: {}", output.display());
    let file = File::create(&output).with_context(|| format!("creating {}", output.display()))?;
    let mut out = BufWriter::new(file);
    io::write_points(&mut out, &points)
        .and_then(|_| out.flush())
        .with_context(|| format!("writing {}", output.display()))?;
    Ok(())
}
