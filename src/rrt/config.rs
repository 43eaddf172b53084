use crate::rrt::error::PlannerError;
use crate::rrt::selection::SelectionPolicy;
use json::JsonValue;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tunable parameters of the planner.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlannerConfig {
    /// Maximum length of a single extension. 0 picks 20% of the space's maximum extent
    /// when solving starts.
    pub range: f64,
    /// Probability of steering at a goal sample. Only the combined-distance policy uses it.
    pub goal_bias: f64,
    /// Number of uniform samples drawn per selection.
    pub batch_size: usize,
    /// Add every discretised state along an extension instead of only its end.
    pub intermediate_states: bool,
    pub policy: SelectionPolicy,
    /// Seed for the selection strategy's own randomness. None seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            range: 0.0,
            goal_bias: 0.05,
            batch_size: 4,
            intermediate_states: false,
            policy: SelectionPolicy::default(),
            seed: None,
        }
    }
}

impl PlannerConfig {
    /// Fraction of the space's maximum extent used when `range` is 0.
    pub const AUTO_RANGE_FRACTION: f64 = 0.2;

    /// Checks every parameter.
    pub fn validate(&self) -> Result<(), PlannerError> {
        validate_range(self.range, true)?;
        validate_goal_bias(self.goal_bias)?;
        validate_batch_size(self.batch_size)
    }

    /// Parses a JSON object, filling missing keys with their defaults, and validates the
    /// result.
    ///
    /// ```json
    /// { "range": 0.5, "goal_bias": 0.05, "batch_size": 4,
    ///   "intermediate_states": false, "policy": "visibility", "seed": 7 }
    /// ```
    pub fn from_json(source: &str) -> Result<Self, PlannerError> {
        let parsed = json::parse(source)
            .map_err(|err| PlannerError::InvalidConfig(format!("malformed JSON: {}", err)))?;
        if !parsed.is_object() {
            return Err(PlannerError::InvalidConfig(
                "the configuration must be a JSON object".to_string(),
            ));
        }

        let mut config = Self::default();
        for (key, value) in parsed.entries() {
            match key {
                "range" => config.range = number(key, value)?,
                "goal_bias" => config.goal_bias = number(key, value)?,
                "batch_size" => config.batch_size = count(key, value)?,
                "intermediate_states" => {
                    config.intermediate_states =
                        value.as_bool().ok_or_else(|| wrong_type(key, "a boolean"))?
                }
                "policy" => {
                    config.policy = value
                        .as_str()
                        .ok_or_else(|| wrong_type(key, "a string"))?
                        .parse()?
                }
                "seed" => {
                    config.seed = if value.is_null() {
                        None
                    } else {
                        let seed = value
                            .as_u64()
                            .ok_or_else(|| wrong_type(key, "an unsigned integer"))?;
                        Some(seed)
                    }
                }
                other => {
                    return Err(PlannerError::InvalidConfig(format!("unknown key '{}'", other)))
                }
            }
        }
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a JSON configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, PlannerError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_json(&source)
    }

    pub fn to_json(&self) -> JsonValue {
        json::object! {
            range: self.range,
            goal_bias: self.goal_bias,
            batch_size: self.batch_size,
            intermediate_states: self.intermediate_states,
            policy: self.policy.as_str(),
            seed: self.seed,
        }
    }
}

fn wrong_type(key: &str, expected: &str) -> PlannerError {
    PlannerError::InvalidConfig(format!("'{}' must be {}", key, expected))
}

fn number(key: &str, value: &JsonValue) -> Result<f64, PlannerError> {
    value.as_f64().ok_or_else(|| wrong_type(key, "a number"))
}

fn count(key: &str, value: &JsonValue) -> Result<usize, PlannerError> {
    value
        .as_usize()
        .ok_or_else(|| wrong_type(key, "a non-negative integer"))
}

/// `allow_auto` accepts 0 as "pick a range when solving starts".
pub(crate) fn validate_range(range: f64, allow_auto: bool) -> Result<(), PlannerError> {
    if !range.is_finite() || range < 0.0 || (range == 0.0 && !allow_auto) {
        return Err(PlannerError::InvalidParameter(format!(
            "range must be a positive finite number, got {}",
            range
        )));
    }
    Ok(())
}

pub(crate) fn validate_goal_bias(goal_bias: f64) -> Result<(), PlannerError> {
    if !(0.0..=1.0).contains(&goal_bias) {
        return Err(PlannerError::InvalidParameter(format!(
            "goal bias must be in [0, 1], got {}",
            goal_bias
        )));
    }
    Ok(())
}

pub(crate) fn validate_batch_size(batch_size: usize) -> Result<(), PlannerError> {
    if batch_size == 0 {
        return Err(PlannerError::InvalidParameter(
            "batch size must be at least 1".to_string(),
        ));
    }
    Ok(())
}
