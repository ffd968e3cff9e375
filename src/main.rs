use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;
use tracing::{debug, info};

use recursive_field::config::{parse_index_list, Config, SweepArgs};
use recursive_field::output::{self, OutputFormat};
use recursive_field::{angle, position, radius, DEFAULT_SCALE};

#[derive(Parser, Debug)]
#[command(name = "recursive-field")]
#[command(author, version, about = "Golden-angle phyllotaxis formulas and parameter sweeps")]
struct Args {
    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Radius, angle and position of a single index
    Point {
        /// Index n (must be positive)
        #[arg(allow_negative_numbers = true)]
        n: i64,

        /// Scale factor a
        #[arg(short, long, default_value_t = DEFAULT_SCALE, allow_negative_numbers = true)]
        a: f64,
    },

    /// Evaluate every (n, a, r_lock) combination
    Sweep {
        /// Indices, e.g. "4,7,11" or "1..20"
        #[arg(
            short = 'n',
            long = "n-values",
            value_parser = parse_indices,
            allow_negative_numbers = true
        )]
        n_values: Option<IndexList>,

        /// Scale factors, comma separated
        #[arg(
            short = 'a',
            long = "a-values",
            value_delimiter = ',',
            allow_negative_numbers = true
        )]
        a_values: Option<Vec<f64>>,

        /// Reference radii, comma separated
        #[arg(
            short = 'r',
            long = "r-lock-values",
            value_delimiter = ',',
            allow_negative_numbers = true
        )]
        r_lock_values: Option<Vec<f64>>,

        /// Config file path (defaults to ~/.config/recursive-field/config.toml if present)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output format
        #[arg(short, long)]
        format: Option<OutputFormat>,

        /// Decimal places for table and csv output
        #[arg(short, long)]
        precision: Option<usize>,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Write a commented config template to the default path
    InitConfig,

    /// Print shell completions
    Completions {
        shell: Shell,
    },
}

#[derive(Debug, Clone)]
struct IndexList(Vec<i64>);

fn parse_indices(s: &str) -> Result<IndexList, String> {
    parse_index_list(s).map(IndexList)
}

fn main() -> Result<()> {
    let args = Args::parse();

    let directive = if args.verbose {
        "recursive_field=debug"
    } else {
        "recursive_field=info"
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(directive.parse()?),
        )
        .init();

    match args.command {
        Command::Point { n, a } => {
            let r = radius(n, a)?;
            let (x, y) = position(n, a)?;
            println!("n         = {}", n);
            println!("radius    = {}", r);
            println!("angle_deg = {}", angle(n));
            println!("x         = {}", x);
            println!("y         = {}", y);
        }
        Command::Sweep {
            n_values,
            a_values,
            r_lock_values,
            config,
            format,
            precision,
            output: out_path,
        } => {
            let mut cfg = match &config {
                Some(path) => Config::load(path)?,
                None => Config::load_from_default_path().unwrap_or_default(),
            };
            cfg.merge_args(&SweepArgs {
                n_values: n_values.map(|l| l.0),
                a_values,
                r_lock_values,
                format,
                precision,
            });
            debug!("Effective config: {:?}", cfg);

            let table = cfg.to_sweep().run_grid()?;
            match out_path {
                Some(path) => {
                    output::write_to(&path, &table, cfg.output.format, cfg.output.precision)?
                }
                None => print!(
                    "{}",
                    output::render(&table, cfg.output.format, cfg.output.precision)?
                ),
            }
        }
        Command::InitConfig => {
            let path = Config::init_default_config()?;
            info!("Wrote config template to {}", path.display());
            print!("{}", Config::generate_config_template());
        }
        Command::Completions { shell } => {
            clap_complete::generate(
                shell,
                &mut Args::command(),
                "recursive-field",
                &mut std::io::stdout(),
            );
        }
    }

    Ok(())
}
