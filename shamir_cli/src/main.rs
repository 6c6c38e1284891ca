use std::path::PathBuf;

use anyhow::Context;
use num_bigint::BigInt;
use shamir_secret_sharing::dealer::{deal, DealParams, DEFAULT_COEFFICIENT_BOUND};
use shamir_secret_sharing::{ShareFile, Strategy, ThresholdPolicy};
use structopt::StructOpt;
use tracing::{info, Level};

use crate::config::Config;

mod config;

#[derive(Debug, StructOpt)]
#[structopt(name = "shamir", about = "Reconstructs Shamir shared secrets from JSON share files.")]
struct Opt {
	/// Log DEBUG output
	#[structopt(short, long)]
	verbose: bool,

	#[structopt(subcommand)]
	command: Command,
}

#[derive(Debug, StructOpt)]
enum Command {
	/// Recover the secret, the constant term of the polynomial through all shares
	Reconstruct {
		/// Share file to read
		///
		/// Defaults to src/data.json when neither the flag nor the configuration sets it.
		#[structopt(short, long, parse(from_os_str))]
		input: Option<PathBuf>,

		/// Solver strategy: float or exact
		#[structopt(long)]
		strategy: Option<Strategy>,

		/// How keys.k is applied: ignore, require or take-first
		#[structopt(long)]
		threshold_policy: Option<ThresholdPolicy>,

		/// Largest accepted distance between a solved coefficient and an integer
		#[structopt(long)]
		tolerance: Option<f64>,

		/// TOML configuration file, command line flags take precedence
		#[structopt(short, long, parse(from_os_str))]
		config: Option<PathBuf>,
	},
	/// Split a secret into a share file
	Split {
		/// Non-negative secret in decimal
		#[structopt(long)]
		secret: BigInt,

		/// Number of shares to produce
		#[structopt(long, short = "n")]
		shares: u32,

		/// Number of shares needed to reconstruct
		#[structopt(long, short = "k")]
		threshold: u32,

		/// Base the share values are written in
		#[structopt(long, default_value = "10")]
		base: u32,

		/// Upper bound for the random coefficients
		#[structopt(long)]
		coefficient_bound: Option<u64>,

		/// Where to write the share file, stdout when missing
		#[structopt(short, long, parse(from_os_str))]
		output: Option<PathBuf>,
	},
}

fn main() -> anyhow::Result<()> {
	let opt = Opt::from_args();

	let level = if opt.verbose { Level::DEBUG } else { Level::INFO };
	let collector = tracing_subscriber::fmt()
		.with_max_level(level)
		.with_writer(std::io::stderr)
		.finish();
	tracing::subscriber::set_global_default(collector)
		.context("Couldn't set up the log collector")?;

	match opt.command {
		Command::Reconstruct { input, strategy, threshold_policy, tolerance, config } => {
			let file_config = match config {
				Some(path) => Config::load(&path)?,
				None => Config::default(),
			};
			let flags = Config { input, strategy, threshold_policy, tolerance };
			let settings = file_config.merge(flags).settings()?;

			let json = std::fs::read_to_string(&settings.input)
				.with_context(|| format!("Couldn't read share file {}", settings.input.display()))?;
			let share_file = ShareFile::from_json(&json)
				.with_context(|| format!("In share file {}", settings.input.display()))?;
			info!(
				shares = share_file.shares.len(),
				strategy = %settings.options.strategy,
				policy = %settings.policy,
				"reconstructing secret"
			);

			let secret = share_file
				.reconstruct(settings.policy, &settings.options)
				.context("Reconstruction failed")?;
			println!("The secret constant term (c) is: {}", secret);
		}
		Command::Split { secret, shares, threshold, base, coefficient_bound, output } => {
			let params = DealParams {
				shares,
				threshold,
				base,
				coefficient_bound: coefficient_bound.unwrap_or(DEFAULT_COEFFICIENT_BOUND),
			};
			let share_file = deal(&secret, &params, &mut rand::thread_rng())
				.context("Couldn't split the secret")?;
			let json = share_file.to_json()?;

			match output {
				Some(path) => {
					std::fs::write(&path, json + "\n")
						.with_context(|| format!("Couldn't write share file {}", path.display()))?;
					info!(shares, threshold, path = %path.display(), "wrote share file");
				}
				None => println!("{}", json),
			}
		}
	}

	Ok(())
}
