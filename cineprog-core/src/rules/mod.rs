// Main rules module - post-processing of assembled screening records
// - engine.rs: RuleEngine, the RecordRule trait and the pure apply_rules entry point
// - record_rules.rs: cinema aliasing, title fixes, version inference

pub mod engine;
pub mod record_rules;

pub use engine::*;
