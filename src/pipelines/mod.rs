//! Pipelines.
//!
//! The [corpus::CorpusBuilder] is the driver that runs the sampler over
//! every configured source; [pipeline::Pipeline] is the light trait all
//! pipelines implement.
pub mod corpus;
#[allow(clippy::module_inception)]
pub mod pipeline;

pub use corpus::CorpusBuilder;
pub use pipeline::Pipeline;
