// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Configuration management for the lifestyle advisor

pub mod environment;
pub mod lifestyle_config;

pub use environment::{AiConfig, AppConfig, ModelConfig};
pub use lifestyle_config::{LifestyleConfig, RuleThresholds, ScoreWeights};
