//! Logging infrastructure
//!
//! Structured logging using tracing and tracing-subscriber:
//! - Pretty or JSON stdout output
//! - JSON log files with rotation via tracing-appender

pub mod logger;

pub use logger::LoggerImpl;
