/// Many requests, optionally in parallel.
pub mod batch;
/// The compositing pipeline.
pub mod engine;
/// Request, report and result types.
pub mod request;
