//! # Stratum
//!
//! Stratum draws balanced, deduplicated samples from annotated job-ad
//! archives and extracts the relevant text zones from each selected ad.
//!
//! ## Getting started
//!
//! ```sh
//! stratum 0.1.0
//! stratified corpus sampling tool.
//!
//! USAGE:
//!     stratum <SUBCOMMAND>
//!
//! FLAGS:
//!     -h, --help       Prints help information
//!     -V, --version    Prints version information
//!
//! SUBCOMMANDS:
//!     help       Prints this message or the help of the given subcommand(s)
//!     sample     Sample and extract ads according to a configuration file
//!     shuffle    Rewrite an emitted sample in random order
//! ```
//!
use structopt::StructOpt;

#[macro_use]
extern crate log;

use stratum::cli;
use stratum::config::SamplingConfig;
use stratum::error;
use stratum::pipelines::{corpus, CorpusBuilder, Pipeline};

fn main() -> Result<(), error::Error> {
    env_logger::init();

    let opt = cli::Stratum::from_args();
    debug!("cli args\n{:#?}", opt);

    match opt {
        cli::Stratum::Sample(s) => {
            let config = SamplingConfig::from_path(&s.config)?;
            let builder = CorpusBuilder::new(config);
            builder.run()?;
        }
        cli::Stratum::Shuffle(s) => {
            let mut rng = rand::thread_rng();
            corpus::shuffle_samples(&s.src, &s.dst, &mut rng)?;
        }
    };
    Ok(())
}
