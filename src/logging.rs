// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Logging configuration with structured output
//!
//! Logs go to stderr so that stdout stays reserved for the rendered report.

use crate::constants::{defaults, env_vars};
use anyhow::Result;
use serde_json::json;
use std::env;
use std::io;
use tracing::{info, warn};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Output format (json, pretty, compact)
    pub format: LogFormat,
    /// Include source file and line numbers
    pub include_location: bool,
    /// Include thread information
    pub include_thread: bool,
    /// Include span information for tracing
    pub include_spans: bool,
    /// Service name for structured logging
    pub service_name: String,
    /// Service version
    pub service_version: String,
    /// Environment (development, staging, production)
    pub environment: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogFormat {
    /// JSON format for log collectors
    Json,
    /// Pretty format for development
    Pretty,
    /// Compact format for interactive use
    Compact,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::LOG_LEVEL.to_string(),
            format: LogFormat::Pretty,
            include_location: false,
            include_thread: false,
            include_spans: false,
            service_name: defaults::SERVICE_NAME.to_string(),
            service_version: env!("CARGO_PKG_VERSION").to_string(),
            environment: "development".to_string(),
        }
    }
}

impl LoggingConfig {
    /// Create logging configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Create logging configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let level = lookup(env_vars::LOG_LEVEL).unwrap_or_else(|| defaults::LOG_LEVEL.to_string());

        let format = match lookup("LOG_FORMAT").as_deref() {
            Some("json") => LogFormat::Json,
            Some("compact") => LogFormat::Compact,
            _ => LogFormat::Pretty,
        };

        let environment = lookup("ENVIRONMENT").unwrap_or_else(|| "development".to_string());

        // Production gets source locations and span events
        let is_production = environment == "production";

        Self {
            level,
            format,
            include_location: is_production || lookup("LOG_INCLUDE_LOCATION").is_some(),
            include_thread: is_production || lookup("LOG_INCLUDE_THREAD").is_some(),
            include_spans: is_production || lookup("LOG_INCLUDE_SPANS").is_some(),
            service_name: lookup("SERVICE_NAME").unwrap_or_else(|| defaults::SERVICE_NAME.to_string()),
            service_version: lookup("SERVICE_VERSION")
                .unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string()),
            environment,
        }
    }

    /// Override the level, e.g. from a `--verbose` flag
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_new(&self.level).unwrap_or_else(|_| EnvFilter::new(defaults::LOG_LEVEL))
    }

    fn span_events(&self) -> FmtSpan {
        if self.include_spans {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        }
    }

    /// Initialize the global tracing subscriber
    pub fn init(&self) -> Result<()> {
        let registry = tracing_subscriber::registry().with(self.env_filter());

        match self.format {
            LogFormat::Json => {
                let json_layer = fmt::layer()
                    .with_file(self.include_location)
                    .with_line_number(self.include_location)
                    .with_thread_ids(self.include_thread)
                    .with_thread_names(self.include_thread)
                    .with_target(true)
                    .with_writer(io::stderr)
                    .with_span_events(self.span_events())
                    .json();

                registry.with(json_layer).try_init()?;
            }
            LogFormat::Pretty => {
                let pretty_layer = fmt::layer()
                    .with_file(self.include_location)
                    .with_line_number(self.include_location)
                    .with_thread_ids(self.include_thread)
                    .with_thread_names(self.include_thread)
                    .with_target(true)
                    .with_writer(io::stderr)
                    .with_span_events(self.span_events());

                registry.with(pretty_layer).try_init()?;
            }
            LogFormat::Compact => {
                let compact_layer = fmt::layer()
                    .compact()
                    .with_file(false)
                    .with_line_number(false)
                    .with_thread_ids(false)
                    .with_thread_names(false)
                    .with_target(false)
                    .with_writer(io::stderr)
                    .with_span_events(FmtSpan::NONE);

                registry.with(compact_layer).try_init()?;
            }
        }

        self.log_startup_info();

        Ok(())
    }

    fn log_startup_info(&self) {
        info!(
            service.name = %self.service_name,
            service.version = %self.service_version,
            environment = %self.environment,
            log.level = %self.level,
            log.format = ?self.format,
            "Lifestyle advisor starting up"
        );

        let config_summary = json!({
            "service": {
                "name": self.service_name,
                "version": self.service_version,
                "environment": self.environment
            },
            "logging": {
                "level": self.level,
                "format": format!("{:?}", self.format),
                "features": {
                    "location": self.include_location,
                    "thread": self.include_thread,
                    "spans": self.include_spans
                }
            }
        });

        info!("Logging configured: {}", config_summary);
    }
}

/// Application-specific logging utilities
pub struct AppLogger;

impl AppLogger {
    /// Log the startup resolution of an optional capability
    pub fn log_capability(capability: &str, available: bool, details: &str) {
        if available {
            info!(
                capability.name = %capability,
                capability.available = true,
                capability.details = %details,
                "Capability enabled"
            );
        } else {
            warn!(
                capability.name = %capability,
                capability.available = false,
                capability.reason = %details,
                "Capability disabled"
            );
        }
    }

    /// Log a completed analysis
    pub fn log_analysis(
        analysis_id: &str,
        recommendation_count: usize,
        predicted: bool,
        suggestions: bool,
        duration_ms: u64,
    ) {
        info!(
            analysis.id = %analysis_id,
            analysis.recommendations = recommendation_count,
            analysis.predicted = predicted,
            analysis.suggestions = suggestions,
            analysis.duration_ms = duration_ms,
            "Analysis completed"
        );
    }

    /// Log one call to the text generation service
    pub fn log_ai_call(generator: &str, mode: &str, success: bool, duration_ms: u64) {
        if success {
            info!(
                ai.generator = %generator,
                ai.mode = %mode,
                ai.success = true,
                ai.duration_ms = duration_ms,
                "AI suggestion call"
            );
        } else {
            warn!(
                ai.generator = %generator,
                ai.mode = %mode,
                ai.success = false,
                ai.duration_ms = duration_ms,
                "AI suggestion call failed"
            );
        }
    }
}
