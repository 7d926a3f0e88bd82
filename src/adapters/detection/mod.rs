//! Object detection adapters.

pub mod http_detector;

pub use http_detector::HttpDetector;
