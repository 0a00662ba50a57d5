//! Computational units run by the workflows.
//!
//! Each submodule performs one self-contained step and reports its own progress.

pub mod estimation;
