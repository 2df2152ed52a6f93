// Resume analysis: text extraction, skill matching, job matching, gap analysis,
// course recommendations. Everything below handlers is synchronous and pure
// over the shared Catalog.

pub mod catalog;
pub mod extractor;
pub mod gaps;
pub mod handlers;
pub mod job_matching;
pub mod pipeline;
pub mod recommendations;
pub mod skills;
