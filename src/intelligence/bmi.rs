// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Body-mass index calculation and classification

use crate::config::RuleThresholds;
use serde::{Deserialize, Serialize};

/// Body-mass index, `weight_kg / height_m²`.
///
/// Returns `0.0` when `height_m` is not positive; callers treat that value as
/// "not computable" and must not analyze it as a real BMI.
pub fn calculate_bmi(weight_kg: f64, height_m: f64) -> f64 {
    if height_m > 0.0 {
        weight_kg / (height_m * height_m)
    } else {
        0.0
    }
}

/// BMI tier used by the first recommendation rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BmiCategory {
    Underweight,
    Balanced,
    Overweight,
}

impl BmiCategory {
    /// Classify with half-open tiers: `[underweight_bmi, overweight_bmi]` is balanced
    pub fn from_bmi(bmi: f64, thresholds: &RuleThresholds) -> Self {
        if bmi < thresholds.underweight_bmi {
            BmiCategory::Underweight
        } else if bmi > thresholds.overweight_bmi {
            BmiCategory::Overweight
        } else {
            BmiCategory::Balanced
        }
    }
}
