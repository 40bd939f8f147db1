//! randkit
//!
//! Command-line front end for the randkit generation engine. The engine
//! itself lives in `randkit-engine`; this crate resolves parameters from the
//! command line and an optional config file, runs one generation and prints
//! the result.
//!
//! # CLI Usage
//!
//! ```bash
//! # Five unique numbers between 1 and 50, sorted
//! randkit range --set min=1 --set max=50 --set count=5 --set unique=true --set sort=asc
//!
//! # A 24 character password without look-alike characters, as JSON
//! randkit password --params '{"length": 24, "exclude_ambiguous": true}' --format pretty
//!
//! # Ticket draws that carry the remaining bag across calls
//! randkit ticket --params-file raffle.yaml --format json
//!
//! # Reproducible dice (not for secrets)
//! randkit dice --set sides=20 --set rolls=3 --seed 7
//! ```

use clap::Parser;
use std::path::PathBuf;

pub mod config;
pub mod output;
pub mod params_input;

pub use config::{ConfigError, RandkitConfig};
pub use output::OutputFormat;
pub use params_input::{ParamsInput, ParamsInputError};

#[derive(Parser, Clone, Debug, Default)]
pub struct ParamsOpts {
    /// Parameters as a JSON object
    #[arg(long, value_name = "JSON")]
    pub params: Option<String>,

    /// Parameters from a JSON or YAML file
    #[arg(long, value_name = "PATH")]
    pub params_file: Option<PathBuf>,

    /// Override one parameter (repeatable); dotted keys reach into pools,
    /// e.g. `pool_a.pick=6`
    #[arg(long = "set", value_name = "KEY=VALUE")]
    pub sets: Vec<String>,
}

impl ParamsOpts {
    pub fn to_input(&self) -> ParamsInput {
        ParamsInput {
            inline: self.params.clone(),
            file: self.params_file.clone(),
            sets: self.sets.clone(),
        }
    }
}
