// confrank: rank academic conferences by topic and deadline
//
// This is the library root. Each module corresponds to one stage of the
// load -> score -> sort -> report pipeline.

pub mod columns;
pub mod config;
pub mod dataset;
pub mod output;
pub mod pipeline;
pub mod scoring;
