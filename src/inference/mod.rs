/// Fixed keyword ladder used when no caller rule matches.
pub mod fallback;
/// Rule evaluation entry point.
pub mod inferencer;
/// Caller-supplied keyword rules and the per-dialect rule set.
pub mod rules;
/// The abstract type produced by inference.
pub mod types;
