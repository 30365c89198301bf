pub mod error;
pub mod geometry;
pub mod locate;
pub mod mcp_api;
pub mod model;
pub mod source;
