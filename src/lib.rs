//! DeepL CLI - translate text from the command line
//!
//! This library maps command-line arguments onto DeepL API requests,
//! fetches translations or account usage, and hands the result to
//! stdout and the clipboard.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;
pub mod core;

// Re-export key types for convenience
pub use crate::cli::{
    commands::{Args, SHORTHANDS},
    output::{Clipboard, SystemClipboard},
};
pub use crate::core::{
    client::DeepLClient,
    config::{ClientConfig, ConfigLoader},
    errors::TranslationError,
    models::{Formality, RequestDescriptor, TranslationRequest, TranslationResult, UsageReport},
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
