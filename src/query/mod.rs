//! Query mediation for querygate.
//!
//! This module holds the gateway that turns caller-supplied SQL into a
//! rendered string, and the plain-text table renderer it uses.

pub mod gateway;
pub mod render;

pub use gateway::{QueryGateway, NO_RESULTS};
pub use render::render_table;
