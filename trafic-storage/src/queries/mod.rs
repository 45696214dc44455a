//! Report queries: the shared tagged projection and the unified assembly.

pub mod projection;
pub mod unified;
