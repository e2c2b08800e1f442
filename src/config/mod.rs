//! Configuration module for fintrack
//!
//! This module provides configuration management including:
//! - Platform-aware path resolution
//! - User settings persistence, including notification preferences

pub mod paths;
pub mod settings;

pub use paths::FinTrackPaths;
pub use settings::{NotificationSettings, Settings};
