//! Full-stack integration flows.

pub mod flows;
