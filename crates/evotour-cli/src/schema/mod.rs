//! Serialized shapes of the tool's JSON output.

pub(crate) mod solution;
