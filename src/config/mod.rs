//! Configuration module for Site-Markdown
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file, and layering command-line overrides on top of it.
//!
//! # Example
//!
//! ```no_run
//! use site_markdown::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("site-markdown.toml")).unwrap();
//! println!("Rewriting links: {}", config.output.rewrite_links);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, FilterConfig, OutputConfig};

// Re-export parser functions
pub use parser::{load_config, parse_config, resolve_config, ConfigOverrides};
