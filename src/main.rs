//! Curse of Dim - Main entry point
//!
//! CLI over the Monte Carlo experiments: hypersphere fill-ratio sweeps,
//! pairwise-distance concentration sweeps, and PCA projections of
//! classified samples.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use curse_of_dim::report::{
    print_projection_summary, print_sweep_table, projection_traces, sweep_trace, write_plot_json,
    write_projection_csv, write_sweep_csv, Layout, PlotData, DISPLAY_SIG_DIGITS,
};
use curse_of_dim::stats::round_sig;
use curse_of_dim::sweep::{run_distance_sweep, run_fill_sweep, run_projection};
use curse_of_dim::{
    DimensionRecord, ErrorPolicy, PointGrowth, Preprocess, ProjectionConfig, SweepConfig,
    SweepReport,
};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "curse-of-dim")]
#[command(about = "Monte Carlo experiments on the curse of dimensionality", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum GrowthArg {
    Constant,
    Linear,
    Doubling,
}

#[derive(Clone, Copy, ValueEnum)]
enum OnErrorArg {
    Abort,
    Skip,
}

#[derive(Clone, Copy, ValueEnum)]
enum PreprocessArg {
    Center,
    Standardize,
}

#[derive(Subcommand)]
enum Commands {
    /// Sweep the fraction of uniform points inside the inscribed hypersphere
    FillSweep {
        /// First dimension of the sweep
        #[arg(long, default_value = "1")]
        min_dim: usize,

        /// Last dimension of the sweep (inclusive)
        #[arg(long, default_value = "10")]
        max_dim: usize,

        /// Trials per dimension
        #[arg(short, long, default_value = "100")]
        trials: usize,

        /// Points per trial at dimension 1
        #[arg(short, long, default_value = "1000")]
        points: usize,

        /// Sphere radius; the sampling box is [0, 2 * radius]^d
        #[arg(short, long, default_value = "10.0")]
        radius: f64,

        /// Point-count growth across dimensions
        #[arg(long, value_enum, default_value = "doubling")]
        growth: GrowthArg,

        /// Step for linear growth
        #[arg(long, default_value = "50")]
        growth_step: usize,

        /// RNG seed for reproducible runs
        #[arg(long)]
        seed: Option<u64>,

        /// Behavior when one dimension fails
        #[arg(long, value_enum, default_value = "abort")]
        on_error: OnErrorArg,

        /// CSV output path
        #[arg(long, default_value = "results/fill_sweep.csv")]
        csv: String,

        /// Plot-trace JSON output path
        #[arg(long, default_value = "results/fill_sweep.json")]
        plot: String,
    },

    /// Sweep the std/mean ratio of all pairwise distances
    DistanceSweep {
        /// First dimension of the sweep
        #[arg(long, default_value = "1")]
        min_dim: usize,

        /// Last dimension of the sweep (inclusive)
        #[arg(long, default_value = "25")]
        max_dim: usize,

        /// Trials per dimension
        #[arg(short, long, default_value = "10")]
        trials: usize,

        /// Points per trial at dimension 1
        #[arg(short, long, default_value = "100")]
        points: usize,

        /// Point-count growth across dimensions
        #[arg(long, value_enum, default_value = "linear")]
        growth: GrowthArg,

        /// Step for linear growth
        #[arg(long, default_value = "50")]
        growth_step: usize,

        /// RNG seed for reproducible runs
        #[arg(long)]
        seed: Option<u64>,

        /// Behavior when one dimension fails
        #[arg(long, value_enum, default_value = "abort")]
        on_error: OnErrorArg,

        /// CSV output path
        #[arg(long, default_value = "results/distance_sweep.csv")]
        csv: String,

        /// Plot-trace JSON output path
        #[arg(long, default_value = "results/distance_sweep.json")]
        plot: String,
    },

    /// Classify one sample and project it onto its top-2 principal components
    Project {
        /// Sample dimension (must exceed 2)
        #[arg(short, long, default_value = "5")]
        dimension: usize,

        /// Points in the sample
        #[arg(short, long, default_value = "1000")]
        points: usize,

        /// Sphere radius; the sampling box is [0, 2 * radius]^d
        #[arg(short, long, default_value = "10.0")]
        radius: f64,

        /// Column preprocessing before the covariance step
        #[arg(long, value_enum, default_value = "center")]
        preprocess: PreprocessArg,

        /// RNG seed for reproducible runs
        #[arg(long)]
        seed: Option<u64>,

        /// CSV output path
        #[arg(long, default_value = "results/projection.csv")]
        csv: String,

        /// Plot-trace JSON output path
        #[arg(long, default_value = "results/projection.json")]
        plot: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::FillSweep {
            min_dim,
            max_dim,
            trials,
            points,
            radius,
            growth,
            growth_step,
            seed,
            on_error,
            csv,
            plot,
        } => {
            let config = SweepConfig {
                dimensions: (min_dim..=max_dim).collect(),
                trials,
                base_points: points,
                growth: growth_arg(growth, growth_step),
                bounds: (0.0, 2.0 * radius),
                radius,
                seed,
                on_error: on_error_arg(on_error),
            };

            println!("Hypersphere fill-ratio sweep");
            println!("  Radius: {} | Trials: {}", radius, trials);

            let report = run_timed(|observer| run_fill_sweep(&config, observer))?;
            finish_sweep(
                &report,
                "fill ratio",
                Layout {
                    title: "Fill ratio by dimension".to_string(),
                    x_label: "Dimensions".to_string(),
                    y_label: "Fraction of points inside the hypersphere".to_string(),
                },
                &csv,
                &plot,
            )?;
        }
        Commands::DistanceSweep {
            min_dim,
            max_dim,
            trials,
            points,
            growth,
            growth_step,
            seed,
            on_error,
            csv,
            plot,
        } => {
            let config = SweepConfig {
                dimensions: (min_dim..=max_dim).collect(),
                trials,
                base_points: points,
                growth: growth_arg(growth, growth_step),
                bounds: (0.0, 1.0),
                radius: 0.5,
                seed,
                on_error: on_error_arg(on_error),
            };

            println!("Pairwise-distance concentration sweep");
            println!("  Unit box | Trials: {}", trials);

            let report = run_timed(|observer| run_distance_sweep(&config, observer))?;
            finish_sweep(
                &report,
                "std/mean of pairwise distances",
                Layout {
                    title: "Distance concentration by dimension".to_string(),
                    x_label: "Dimensions".to_string(),
                    y_label: "Std dev / mean of pairwise distances".to_string(),
                },
                &csv,
                &plot,
            )?;
        }
        Commands::Project {
            dimension,
            points,
            radius,
            preprocess,
            seed,
            csv,
            plot,
        } => {
            let config = ProjectionConfig {
                dimension,
                points,
                bounds: (0.0, 2.0 * radius),
                radius,
                preprocess: match preprocess {
                    PreprocessArg::Center => Preprocess::Center,
                    PreprocessArg::Standardize => Preprocess::Standardize,
                },
                seed,
            };

            println!("PCA projection of a classified {}-d sample", dimension);

            let start = Instant::now();
            let record = run_projection(&config)?;
            println!("Elapsed: {:.1}ms", start.elapsed().as_secs_f64() * 1000.0);
            println!();

            print_projection_summary(&record);

            ensure_parent(&csv)?;
            write_projection_csv(&csv, &record)?;
            println!("\nProjection saved to: {}", csv);

            ensure_parent(&plot)?;
            write_plot_json(
                &plot,
                &PlotData {
                    layout: Layout {
                        title: format!("{}-d sample projected onto PC1/PC2", dimension),
                        x_label: "PC1".to_string(),
                        y_label: "PC2".to_string(),
                    },
                    traces: projection_traces(&record),
                },
            )?;
            println!("Plot traces saved to: {}", plot);
        }
    }

    Ok(())
}

fn growth_arg(growth: GrowthArg, step: usize) -> PointGrowth {
    match growth {
        GrowthArg::Constant => PointGrowth::Constant,
        GrowthArg::Linear => PointGrowth::Linear { step },
        GrowthArg::Doubling => PointGrowth::Doubling,
    }
}

fn on_error_arg(on_error: OnErrorArg) -> ErrorPolicy {
    match on_error {
        OnErrorArg::Abort => ErrorPolicy::Abort,
        OnErrorArg::Skip => ErrorPolicy::Skip,
    }
}

/// Run a sweep with per-dimension progress lines and a total-time report.
fn run_timed(
    sweep: impl FnOnce(&mut dyn FnMut(&DimensionRecord)) -> curse_of_dim::Result<SweepReport>,
) -> curse_of_dim::Result<SweepReport> {
    let total = Instant::now();
    let mut dim_start = Instant::now();

    let mut progress = |record: &DimensionRecord| {
        println!(
            "Dimension: {} | Points: {} | Result: {} ± {} ({:.1}ms)",
            record.dimension,
            record.points_per_trial,
            round_sig(record.mean, DISPLAY_SIG_DIGITS),
            round_sig(record.std_dev, DISPLAY_SIG_DIGITS),
            dim_start.elapsed().as_secs_f64() * 1000.0,
        );
        dim_start = Instant::now();
    };

    let report = sweep(&mut progress)?;
    println!(
        "Total execution time: {:.1}ms\n",
        total.elapsed().as_secs_f64() * 1000.0
    );
    Ok(report)
}

fn finish_sweep(
    report: &SweepReport,
    trace_name: &str,
    layout: Layout,
    csv: &str,
    plot: &str,
) -> Result<()> {
    print_sweep_table(&report.records);

    for (dimension, err) in &report.skipped {
        println!("Skipped dimension {}: {}", dimension, err);
    }

    ensure_parent(csv)?;
    write_sweep_csv(csv, &report.records)?;
    println!("\nResults saved to: {}", csv);

    ensure_parent(plot)?;
    write_plot_json(
        plot,
        &PlotData {
            layout,
            traces: vec![sweep_trace(trace_name, &report.records)],
        },
    )?;
    println!("Plot traces saved to: {}", plot);

    Ok(())
}

fn ensure_parent(path: &str) -> Result<()> {
    if let Some(parent) = std::path::Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
