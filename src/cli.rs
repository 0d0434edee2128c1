//! Command line arguments and parameters management/parsing.
use std::path::PathBuf;

use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(name = "stratum", about = "stratified corpus sampling tool.")]
/// Holds every command callable by the `stratum` binary.
pub enum Stratum {
    #[structopt(about = "Sample and extract ads according to a configuration file")]
    Sample(Sample),
    #[structopt(about = "Rewrite an emitted sample in random order")]
    Shuffle(Shuffle),
}

#[derive(Debug, StructOpt)]
/// Sample command and parameters.
pub struct Sample {
    #[structopt(parse(from_os_str), help = "sampling configuration (JSON)")]
    pub config: PathBuf,
}

#[derive(Debug, StructOpt)]
/// Shuffle command and parameters.
pub struct Shuffle {
    #[structopt(parse(from_os_str), help = "source sample location (jsonl)")]
    pub src: PathBuf,
    #[structopt(parse(from_os_str), help = "destination of the shuffled sample")]
    pub dst: PathBuf,
}
