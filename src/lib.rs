pub mod cli;
pub mod config;
pub mod document;
pub mod error;
pub mod io;
pub mod pipelines;
pub mod sampling;
pub mod sources;
