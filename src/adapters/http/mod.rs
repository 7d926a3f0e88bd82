//! HTTP surface shared by the operator dashboard and the robot.

pub mod error;
pub mod handlers;
pub mod server;

pub use error::{ApiError, ErrorResponse};
pub use server::{AppState, MissionHttpServer};
