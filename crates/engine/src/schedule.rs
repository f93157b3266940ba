//! Schedule draft normalization.
//!
//! A schedule dialog keeps one slot per parameter across type switches, so
//! an operator who configures `weekly` and then flips to `daily` still has
//! their old day-of-week in the draft. [`to_schedule`] is the single point
//! where the chosen kind selects which slots survive; everything else is
//! dropped, never serialized. [`from_schedule`] is the exact left inverse
//! used when opening an edit view on a stored schedule.

use fleetdeck_types::schedule::{Schedule, ScheduleError, ScheduleType};
use fleetdeck_util::time_handling::canonical_time_of_day;

/// Dialog draft carrying every schedule parameter slot.
///
/// Any slot may hold residue from a previous type selection; only
/// [`to_schedule`] decides what is carried onto the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleParams {
    pub time: Option<String>,
    pub day_of_week: Option<u8>,
    pub day_of_month: Option<u8>,
    pub cron_expression: Option<String>,
}

/// Normalizes a kind selection plus the draft slots into a canonical
/// [`Schedule`], carrying only the parameters relevant to the kind.
///
/// Times are canonicalized to zero-padded `HH:MM`. Day-of-month values of
/// 29-31 are accepted without checking any month's actual length; the
/// executing backend owns month-length semantics.
pub fn to_schedule(kind: ScheduleType, params: &ScheduleParams) -> Result<Schedule, ScheduleError> {
    match kind {
        ScheduleType::Daily => Ok(Schedule::Daily {
            time: required_time(kind, params)?,
        }),
        ScheduleType::Weekly => {
            let day_of_week = params.day_of_week.ok_or(ScheduleError::MissingParameter {
                kind,
                parameter: "day_of_week",
            })?;
            if day_of_week > 6 {
                return Err(ScheduleError::DayOfWeekOutOfRange(day_of_week));
            }
            Ok(Schedule::Weekly {
                day_of_week,
                time: required_time(kind, params)?,
            })
        }
        ScheduleType::Monthly => {
            let day_of_month = params.day_of_month.ok_or(ScheduleError::MissingParameter {
                kind,
                parameter: "day_of_month",
            })?;
            if !(1..=31).contains(&day_of_month) {
                return Err(ScheduleError::DayOfMonthOutOfRange(day_of_month));
            }
            Ok(Schedule::Monthly {
                day_of_month,
                time: required_time(kind, params)?,
            })
        }
        ScheduleType::Custom => {
            let cron_expression = params
                .cron_expression
                .as_deref()
                .map(str::trim)
                .filter(|raw| !raw.is_empty())
                .ok_or(ScheduleError::MissingParameter {
                    kind,
                    parameter: "cron_expression",
                })?;
            // Accepted as opaque text; the backend is the cron authority.
            Ok(Schedule::Custom {
                cron_expression: cron_expression.to_string(),
            })
        }
    }
}

/// Renders a stored schedule back into the `(kind, draft)` pair an edit
/// dialog starts from. Exact left inverse of [`to_schedule`] for every
/// valid pair: only the kind's own slots come back populated.
pub fn from_schedule(schedule: &Schedule) -> (ScheduleType, ScheduleParams) {
    let kind = schedule.schedule_type();
    let params = match schedule {
        Schedule::Daily { time } => ScheduleParams {
            time: Some(time.clone()),
            ..ScheduleParams::default()
        },
        Schedule::Weekly { day_of_week, time } => ScheduleParams {
            time: Some(time.clone()),
            day_of_week: Some(*day_of_week),
            ..ScheduleParams::default()
        },
        Schedule::Monthly { day_of_month, time } => ScheduleParams {
            time: Some(time.clone()),
            day_of_month: Some(*day_of_month),
            ..ScheduleParams::default()
        },
        Schedule::Custom { cron_expression } => ScheduleParams {
            cron_expression: Some(cron_expression.clone()),
            ..ScheduleParams::default()
        },
    };
    (kind, params)
}

fn required_time(kind: ScheduleType, params: &ScheduleParams) -> Result<String, ScheduleError> {
    let raw = params
        .time
        .as_deref()
        .map(str::trim)
        .filter(|raw| !raw.is_empty())
        .ok_or(ScheduleError::MissingParameter { kind, parameter: "time" })?;
    canonical_time_of_day(raw).ok_or_else(|| ScheduleError::InvalidTime(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_draft() -> ScheduleParams {
        ScheduleParams {
            time: Some("09:00".to_string()),
            day_of_week: Some(1),
            day_of_month: Some(15),
            cron_expression: Some("0 0 * * *".to_string()),
        }
    }

    #[test]
    fn weekly_drops_foreign_slots() {
        let schedule = to_schedule(ScheduleType::Weekly, &full_draft()).expect("weekly normalizes");
        assert_eq!(
            schedule,
            Schedule::Weekly {
                day_of_week: 1,
                time: "09:00".to_string()
            }
        );
        let wire = schedule.to_wire();
        assert!(wire.day_of_month.is_none());
        assert!(wire.cron_expression.is_none());
    }

    #[test]
    fn daily_after_weekly_drops_day_of_week() {
        // The operator configured weekly, then flipped to daily: the stale
        // day-of-week residue must not survive normalization.
        let schedule = to_schedule(ScheduleType::Daily, &full_draft()).expect("daily normalizes");
        assert_eq!(
            schedule,
            Schedule::Daily {
                time: "09:00".to_string()
            }
        );
    }

    #[test]
    fn every_kind_round_trips() {
        let cases = [
            (
                ScheduleType::Daily,
                ScheduleParams {
                    time: Some("06:30".to_string()),
                    ..ScheduleParams::default()
                },
            ),
            (
                ScheduleType::Weekly,
                ScheduleParams {
                    time: Some("09:00".to_string()),
                    day_of_week: Some(0),
                    ..ScheduleParams::default()
                },
            ),
            (
                ScheduleType::Monthly,
                ScheduleParams {
                    time: Some("23:45".to_string()),
                    day_of_month: Some(31),
                    ..ScheduleParams::default()
                },
            ),
            (
                ScheduleType::Custom,
                ScheduleParams {
                    cron_expression: Some("*/15 * * * *".to_string()),
                    ..ScheduleParams::default()
                },
            ),
        ];

        for (kind, params) in cases {
            let schedule = to_schedule(kind, &params).expect("valid pair normalizes");
            assert_eq!(from_schedule(&schedule), (kind, params.clone()), "round trip for {}", kind);
        }
    }

    #[test]
    fn times_are_canonicalized() {
        let params = ScheduleParams {
            time: Some("9:05".to_string()),
            ..ScheduleParams::default()
        };
        let schedule = to_schedule(ScheduleType::Daily, &params).expect("short time normalizes");
        assert_eq!(
            schedule,
            Schedule::Daily {
                time: "09:05".to_string()
            }
        );
    }

    #[test]
    fn missing_and_invalid_parameters_are_rejected() {
        let err = to_schedule(ScheduleType::Weekly, &ScheduleParams::default()).expect_err("no slots at all");
        assert_eq!(
            err,
            ScheduleError::MissingParameter {
                kind: ScheduleType::Weekly,
                parameter: "day_of_week"
            }
        );

        let params = ScheduleParams {
            time: Some("09:00".to_string()),
            day_of_week: Some(7),
            ..ScheduleParams::default()
        };
        assert_eq!(
            to_schedule(ScheduleType::Weekly, &params),
            Err(ScheduleError::DayOfWeekOutOfRange(7))
        );

        let params = ScheduleParams {
            time: Some("25:00".to_string()),
            ..ScheduleParams::default()
        };
        assert_eq!(
            to_schedule(ScheduleType::Daily, &params),
            Err(ScheduleError::InvalidTime("25:00".to_string()))
        );

        let params = ScheduleParams {
            day_of_month: Some(0),
            time: Some("09:00".to_string()),
            ..ScheduleParams::default()
        };
        assert_eq!(
            to_schedule(ScheduleType::Monthly, &params),
            Err(ScheduleError::DayOfMonthOutOfRange(0))
        );
    }

    #[test]
    fn late_month_days_are_accepted() {
        for day_of_month in [29, 30, 31] {
            let params = ScheduleParams {
                time: Some("08:00".to_string()),
                day_of_month: Some(day_of_month),
                ..ScheduleParams::default()
            };
            assert!(to_schedule(ScheduleType::Monthly, &params).is_ok());
        }
    }
}
