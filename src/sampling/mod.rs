/*! The sampling-and-extraction engine.

Leaf components first: [zone] extracts the windowed span, [quota] keeps
the per-year/total budgets, [dedup] the cross-run id registry, [category]
the keyword/topic qualification. [sampler] composes them per archive file.
!*/
pub mod category;
pub mod dedup;
pub mod quota;
pub mod sampler;
pub mod zone;

pub use category::{Category, CategorySelector, TermList, TopicSelector};
pub use dedup::{AcceptanceRecord, DedupRegistry};
pub use quota::{QuotaKey, QuotaTracker};
pub use sampler::{Eligibility, FileOutcome, Rejection, SamplePolicy, Sampler};
pub use zone::ZoneExtractor;
