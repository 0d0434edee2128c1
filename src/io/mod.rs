/*! Readers/writers for archives, topic assignments and samples.
!*/
pub mod reader;
pub mod writer;

pub use reader::archive::ArchiveReader;
pub use reader::topics::TopicReader;
pub use writer::samples::SampleWriter;
