//! Canonical schedule configuration shared between the engine and the
//! backend scheduler.
//!
//! A schedule is exactly one of four recurrence kinds. On the wire the kind
//! travels as the `schedule_type` discriminator next to a `schedule_config`
//! object carrying only the parameters relevant to that kind; absent keys are
//! omitted entirely rather than serialized as null.

use std::{error::Error as StdError, fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Wire discriminator for the four supported recurrence kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleType {
    Daily,
    Weekly,
    Monthly,
    Custom,
}

impl ScheduleType {
    /// The wire name of the discriminator.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for ScheduleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScheduleType {
    type Err = ParseScheduleTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "custom" => Ok(Self::Custom),
            _ => Err(ParseScheduleTypeError),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseScheduleTypeError;

impl fmt::Display for ParseScheduleTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid schedule type; expected 'daily', 'weekly', 'monthly', or 'custom'")
    }
}

impl StdError for ParseScheduleTypeError {}

/// Wire form of the schedule parameters.
///
/// Every key is optional; only the keys belonging to the selected
/// [`ScheduleType`] are populated, and absent keys are never serialized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Time of day as `HH:MM` (daily, weekly, monthly)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    /// Day of week, 0 = Sunday through 6 = Saturday (weekly)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_of_week: Option<u8>,
    /// Day of month, 1-indexed (monthly)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_of_month: Option<u8>,
    /// Opaque cron expression (custom)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cron_expression: Option<String>,
}

/// Canonical, type-discriminated recurrence description.
///
/// Exactly one variant's parameters are populated. The discriminator and the
/// populated wire keys must agree; [`Schedule::from_wire`] rejects stored
/// configurations that violate this (e.g., `weekly` without `day_of_week`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Schedule {
    Daily { time: String },
    Weekly { day_of_week: u8, time: String },
    Monthly { day_of_month: u8, time: String },
    Custom { cron_expression: String },
}

impl Schedule {
    /// The discriminator for this schedule's variant.
    pub fn schedule_type(&self) -> ScheduleType {
        match self {
            Self::Daily { .. } => ScheduleType::Daily,
            Self::Weekly { .. } => ScheduleType::Weekly,
            Self::Monthly { .. } => ScheduleType::Monthly,
            Self::Custom { .. } => ScheduleType::Custom,
        }
    }

    /// Projects this schedule into its wire form, carrying only the keys
    /// that belong to the variant.
    pub fn to_wire(&self) -> ScheduleConfig {
        match self {
            Self::Daily { time } => ScheduleConfig {
                time: Some(time.clone()),
                ..ScheduleConfig::default()
            },
            Self::Weekly { day_of_week, time } => ScheduleConfig {
                time: Some(time.clone()),
                day_of_week: Some(*day_of_week),
                ..ScheduleConfig::default()
            },
            Self::Monthly { day_of_month, time } => ScheduleConfig {
                time: Some(time.clone()),
                day_of_month: Some(*day_of_month),
                ..ScheduleConfig::default()
            },
            Self::Custom { cron_expression } => ScheduleConfig {
                cron_expression: Some(cron_expression.clone()),
                ..ScheduleConfig::default()
            },
        }
    }

    /// Reconstructs a schedule from a stored discriminator and wire config,
    /// as read back when opening an edit view.
    ///
    /// Presence and range of the variant's parameters are enforced here so a
    /// disagreeing pair never reaches submission. Keys belonging to other
    /// variants are ignored; the caller re-normalizes on save.
    pub fn from_wire(schedule_type: ScheduleType, config: &ScheduleConfig) -> Result<Self, ScheduleError> {
        match schedule_type {
            ScheduleType::Daily => Ok(Self::Daily {
                time: required_wire_time(schedule_type, config)?,
            }),
            ScheduleType::Weekly => {
                let day_of_week = config.day_of_week.ok_or(ScheduleError::MissingParameter {
                    kind: schedule_type,
                    parameter: "day_of_week",
                })?;
                if day_of_week > 6 {
                    return Err(ScheduleError::DayOfWeekOutOfRange(day_of_week));
                }
                Ok(Self::Weekly {
                    day_of_week,
                    time: required_wire_time(schedule_type, config)?,
                })
            }
            ScheduleType::Monthly => {
                let day_of_month = config.day_of_month.ok_or(ScheduleError::MissingParameter {
                    kind: schedule_type,
                    parameter: "day_of_month",
                })?;
                if !(1..=31).contains(&day_of_month) {
                    return Err(ScheduleError::DayOfMonthOutOfRange(day_of_month));
                }
                Ok(Self::Monthly {
                    day_of_month,
                    time: required_wire_time(schedule_type, config)?,
                })
            }
            ScheduleType::Custom => {
                let cron_expression = config
                    .cron_expression
                    .as_deref()
                    .filter(|raw| !raw.trim().is_empty())
                    .ok_or(ScheduleError::MissingParameter {
                        kind: schedule_type,
                        parameter: "cron_expression",
                    })?;
                Ok(Self::Custom {
                    cron_expression: cron_expression.to_string(),
                })
            }
        }
    }
}

fn required_wire_time(kind: ScheduleType, config: &ScheduleConfig) -> Result<String, ScheduleError> {
    config
        .time
        .as_deref()
        .filter(|raw| !raw.trim().is_empty())
        .map(ToString::to_string)
        .ok_or(ScheduleError::MissingParameter { kind, parameter: "time" })
}

/// Errors rejecting a schedule whose discriminator and parameters disagree.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("{kind} schedules require a {parameter}")]
    MissingParameter { kind: ScheduleType, parameter: &'static str },

    #[error("day of week must be between 0 (Sunday) and 6 (Saturday); got {0}")]
    DayOfWeekOutOfRange(u8),

    #[error("day of month must be between 1 and 31; got {0}")]
    DayOfMonthOutOfRange(u8),

    #[error("time must be formatted as HH:MM; got '{0}'")]
    InvalidTime(String),
}
