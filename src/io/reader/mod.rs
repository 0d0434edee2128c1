pub mod archive;
pub mod topics;
