//! Recurrence policies and next-due-date calculation.
//!
//! A schedule starts on `date_begun` and each occurrence is the previous one
//! plus one interval. Calendar-month steps clamp to the last day of a shorter
//! month, and later steps continue from the clamped date: a monthly schedule
//! begun on January 31st falls on February 29th (in a leap year), then
//! March 29th.

use super::{MaintenanceDomainError, ParseRecurrenceError};
use chrono::{Days, Months, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU32;

/// Number of days in a custom interval whose stored value is unusable.
pub const DEFAULT_CUSTOM_INTERVAL_DAYS: u32 = 7;

const DEFAULT_CUSTOM_DAYS: NonZeroU32 = match NonZeroU32::new(DEFAULT_CUSTOM_INTERVAL_DAYS) {
    Some(days) => days,
    None => NonZeroU32::MIN,
};

/// Positive number of days between occurrences of a custom schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomInterval(NonZeroU32);

impl CustomInterval {
    /// Interval applied when a stored custom value cannot be used.
    pub const DEFAULT: Self = Self(DEFAULT_CUSTOM_DAYS);

    /// Creates a validated interval.
    ///
    /// # Errors
    ///
    /// Returns [`MaintenanceDomainError::InvalidCustomInterval`] when `days`
    /// is zero.
    pub fn new(days: u32) -> Result<Self, MaintenanceDomainError> {
        NonZeroU32::new(days)
            .map(Self)
            .ok_or_else(|| MaintenanceDomainError::InvalidCustomInterval(days.to_string()))
    }

    /// Parses a submitted day count strictly.
    ///
    /// # Errors
    ///
    /// Returns [`MaintenanceDomainError::InvalidCustomInterval`] unless the
    /// trimmed input is a positive integer.
    pub fn parse(raw: &str) -> Result<Self, MaintenanceDomainError> {
        raw.trim()
            .parse::<u32>()
            .ok()
            .and_then(NonZeroU32::new)
            .map(Self)
            .ok_or_else(|| MaintenanceDomainError::InvalidCustomInterval(raw.to_owned()))
    }

    /// Reads a custom interval persisted by older clients.
    ///
    /// Older rows hold free text such as `"10"` or `"10 days"`. The leading
    /// run of digits is used; anything else (missing, non-numeric, zero or
    /// negative) falls back to [`Self::DEFAULT`].
    #[must_use]
    pub fn from_stored(raw: Option<&str>) -> Self {
        let parsed = raw
            .map(str::trim_start)
            .map(|text| {
                text.char_indices()
                    .find(|(_, ch)| !ch.is_ascii_digit())
                    .map_or(text, |(end, _)| text.get(..end).unwrap_or_default())
            })
            .and_then(|digits| digits.parse::<u32>().ok())
            .and_then(NonZeroU32::new)
            .map(Self);

        parsed.unwrap_or_else(|| {
            tracing::warn!(
                stored = raw.unwrap_or_default(),
                fallback_days = DEFAULT_CUSTOM_INTERVAL_DAYS,
                "unusable custom recurrence, using default interval"
            );
            Self::DEFAULT
        })
    }

    /// Returns the number of days.
    #[must_use]
    pub const fn days(self) -> u32 {
        self.0.get()
    }
}

impl fmt::Display for CustomInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How often a routine maintenance task repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Recurrence {
    /// Every day.
    Daily,
    /// Every seven days.
    Weekly,
    /// Every fourteen days.
    Biweekly,
    /// Every calendar month.
    Monthly,
    /// Every three calendar months.
    Quarterly,
    /// Every six calendar months.
    SemiAnnually,
    /// Every calendar year.
    Yearly,
    /// Every `every` days.
    Custom {
        /// Interval between occurrences.
        every: CustomInterval,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Days(u32),
    Months(u32),
}

impl Recurrence {
    /// Returns the canonical storage name of the recurrence kind.
    #[must_use]
    pub const fn kind_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Biweekly => "biweekly",
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
            Self::SemiAnnually => "semiannually",
            Self::Yearly => "yearly",
            Self::Custom { .. } => "custom",
        }
    }

    /// Returns the custom day count, if this is a custom schedule.
    #[must_use]
    pub const fn custom_days(self) -> Option<u32> {
        match self {
            Self::Custom { every } => Some(every.days()),
            _ => None,
        }
    }

    /// Rebuilds a recurrence from its stored columns.
    ///
    /// A custom schedule with an unusable stored interval falls back to
    /// [`CustomInterval::DEFAULT`]. The custom column is ignored for every
    /// other kind.
    ///
    /// # Errors
    ///
    /// Returns [`ParseRecurrenceError`] when the kind is unknown.
    pub fn from_stored(kind: &str, custom: Option<&str>) -> Result<Self, ParseRecurrenceError> {
        let recurrence = match RecurrenceKind::parse(kind)? {
            RecurrenceKind::Fixed(fixed) => fixed,
            RecurrenceKind::Custom => Self::Custom {
                every: CustomInterval::from_stored(custom),
            },
        };
        Ok(recurrence)
    }

    /// Parses a recurrence submitted through the task form.
    ///
    /// # Errors
    ///
    /// Returns [`MaintenanceDomainError::Recurrence`] when the kind is
    /// unknown and [`MaintenanceDomainError::InvalidCustomInterval`] when a
    /// custom schedule lacks a positive day count.
    pub fn parse_submission(
        kind: &str,
        custom: Option<&str>,
    ) -> Result<Self, MaintenanceDomainError> {
        match RecurrenceKind::parse(kind)? {
            RecurrenceKind::Fixed(fixed) => Ok(fixed),
            RecurrenceKind::Custom => {
                let raw = custom.unwrap_or_default();
                Ok(Self::Custom {
                    every: CustomInterval::parse(raw)?,
                })
            }
        }
    }

    const fn step(self) -> Step {
        match self {
            Self::Daily => Step::Days(1),
            Self::Weekly => Step::Days(7),
            Self::Biweekly => Step::Days(14),
            Self::Monthly => Step::Months(1),
            Self::Quarterly => Step::Months(3),
            Self::SemiAnnually => Step::Months(6),
            Self::Yearly => Step::Months(12),
            Self::Custom { every } => Step::Days(every.days()),
        }
    }

    /// Returns the occurrence that follows `date`.
    ///
    /// Dates past chrono's supported range saturate at [`NaiveDate::MAX`].
    #[must_use]
    pub fn advance(self, date: NaiveDate) -> NaiveDate {
        let next = match self.step() {
            Step::Days(days) => date.checked_add_days(Days::new(u64::from(days))),
            Step::Months(months) => date.checked_add_months(Months::new(months)),
        };
        next.unwrap_or(NaiveDate::MAX)
    }

    /// Returns an occurrence falling on or before `day`, letting day-based
    /// schedules skip their elapsed part. Month steps depend on every
    /// earlier clamp, so they always restart from `date_begun`.
    fn last_occurrence_on_or_before(self, date_begun: NaiveDate, day: NaiveDate) -> NaiveDate {
        match self.step() {
            Step::Days(days) => u64::try_from((day - date_begun).num_days())
                .ok()
                .and_then(|elapsed| elapsed.checked_div(u64::from(days)))
                .and_then(|steps| steps.checked_mul(u64::from(days)))
                .and_then(|offset| date_begun.checked_add_days(Days::new(offset)))
                .unwrap_or(date_begun),
            Step::Months(_) => date_begun,
        }
    }
}

impl fmt::Display for Recurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Custom { every } => write!(f, "every {every} days"),
            _ => f.write_str(self.kind_str()),
        }
    }
}

enum RecurrenceKind {
    Fixed(Recurrence),
    Custom,
}

impl RecurrenceKind {
    fn parse(raw: &str) -> Result<Self, ParseRecurrenceError> {
        let normalized = raw.trim().to_ascii_lowercase();
        let kind = match normalized.as_str() {
            "daily" => Self::Fixed(Recurrence::Daily),
            "weekly" => Self::Fixed(Recurrence::Weekly),
            "biweekly" | "bi-weekly" => Self::Fixed(Recurrence::Biweekly),
            "monthly" => Self::Fixed(Recurrence::Monthly),
            "quarterly" => Self::Fixed(Recurrence::Quarterly),
            "semiannually" | "semi-annually" | "bi-annually" => {
                Self::Fixed(Recurrence::SemiAnnually)
            }
            "yearly" | "annually" => Self::Fixed(Recurrence::Yearly),
            "custom" => Self::Custom,
            _ => return Err(ParseRecurrenceError(raw.to_owned())),
        };
        Ok(kind)
    }
}

fn starts_after(date: NaiveDate, reference: NaiveDateTime) -> bool {
    date.and_time(NaiveTime::MIN) > reference
}

/// Computes the first occurrence of a schedule strictly after `reference`.
///
/// A schedule that has not started yet (`date_begun` after `reference`)
/// returns `date_begun` itself. Otherwise one interval is added at a time,
/// starting from `date_begun`, until the occurrence's start of day lies
/// strictly after `reference`.
#[must_use]
pub fn next_due_date(
    date_begun: NaiveDate,
    recurrence: Recurrence,
    reference: NaiveDateTime,
) -> NaiveDate {
    if starts_after(date_begun, reference) {
        return date_begun;
    }

    let mut occurrence = recurrence.last_occurrence_on_or_before(date_begun, reference.date());
    loop {
        occurrence = recurrence.advance(occurrence);
        if starts_after(occurrence, reference) || occurrence == NaiveDate::MAX {
            return occurrence;
        }
    }
}

/// Reports whether a schedule produces an occurrence on `day`.
///
/// Equivalent to asking whether the next due date computed for the instant
/// just before `day` begins lands on `day`.
#[must_use]
pub fn is_due_on(date_begun: NaiveDate, recurrence: Recurrence, day: NaiveDate) -> bool {
    let Some(just_before) = day
        .and_time(NaiveTime::MIN)
        .checked_sub_signed(TimeDelta::nanoseconds(1))
    else {
        return date_begun == day;
    };
    next_due_date(date_begun, recurrence, just_before) == day
}

/// Lists the next `count` due dates strictly after `reference`.
#[must_use]
pub fn upcoming_due_dates(
    date_begun: NaiveDate,
    recurrence: Recurrence,
    reference: NaiveDateTime,
    count: usize,
) -> Vec<NaiveDate> {
    let mut dates = Vec::with_capacity(count);
    let mut cursor = reference;
    while dates.len() < count {
        let next = next_due_date(date_begun, recurrence, cursor);
        dates.push(next);
        if next == NaiveDate::MAX {
            break;
        }
        cursor = next.and_time(NaiveTime::MIN);
    }
    dates
}
