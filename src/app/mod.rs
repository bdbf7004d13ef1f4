pub mod api;
pub mod cli;
pub mod commands;
mod context;
pub mod logging;
pub mod response;

pub use context::AppContext;
pub use response::ApiResponse;
