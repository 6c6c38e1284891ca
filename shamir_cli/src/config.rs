use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use serde::Deserialize;
use shamir_secret_sharing::solver::DEFAULT_TOLERANCE;
use shamir_secret_sharing::{Options, Strategy, ThresholdPolicy};

pub const DEFAULT_INPUT: &str = "src/data.json";

// Reconstruction settings. Every field is optional so that a file, the command line
// and the defaults can be layered on top of each other.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
	pub input: Option<PathBuf>,
	pub strategy: Option<Strategy>,
	pub threshold_policy: Option<ThresholdPolicy>,
	pub tolerance: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
	pub input: PathBuf,
	pub policy: ThresholdPolicy,
	pub options: Options,
}

impl Config {
	pub fn from_toml(content: &str) -> anyhow::Result<Self> {
		toml::from_str(content).context("Configuration is not valid TOML")
	}

	pub fn load(path: &Path) -> anyhow::Result<Self> {
		let content = std::fs::read_to_string(path)
			.with_context(|| format!("Couldn't read configuration {}", path.display()))?;
		Self::from_toml(&content)
			.with_context(|| format!("In configuration {}", path.display()))
	}

	// values set in `overrides` win
	pub fn merge(self, overrides: Config) -> Config {
		Config {
			input: overrides.input.or(self.input),
			strategy: overrides.strategy.or(self.strategy),
			threshold_policy: overrides.threshold_policy.or(self.threshold_policy),
			tolerance: overrides.tolerance.or(self.tolerance),
		}
	}

	pub fn settings(self) -> anyhow::Result<Settings> {
		let tolerance = self.tolerance.unwrap_or(DEFAULT_TOLERANCE);
		if !tolerance.is_finite() || tolerance < 0.0 {
			bail!("Tolerance must be a non-negative number, got {}", tolerance);
		}

		Ok(Settings {
			input: self.input.unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT)),
			policy: self.threshold_policy.unwrap_or_default(),
			options: Options {
				strategy: self.strategy.unwrap_or_default(),
				tolerance,
			},
		})
	}
}
