//! Date/Time Formatter
//!
//! Dates arrive as `YYYY-MM-DD` from a date picker and are formatted as
//! `2024年12月25日（水）09:30`. Components are read directly; no timezone is involved.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::record::CampaignRecord;

const WEEKDAYS: [&str; 7] = ["日", "月", "火", "水", "木", "金", "土"];

/// Explicit time defaults used when a field forces a time suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeOfDay {
    pub hour: u8,
    pub minute: u8,
}

impl TimeOfDay {
    pub const START_OF_DAY: TimeOfDay = TimeOfDay { hour: 0, minute: 0 };
    pub const END_OF_DAY: TimeOfDay = TimeOfDay { hour: 23, minute: 59 };
}

/// Format a date with weekday, plus `HH:MM` when both parts exist or `force_time` asks for it.
///
/// Returns `""` for an empty date. A date that is not three `-`-separated integers
/// is returned unchanged; out-of-range months and days roll into the next period.
pub fn format_date_time(
    date: &str,
    hour: &str,
    minute: &str,
    force_time: bool,
    default_time: TimeOfDay,
) -> String {
    let date = date.trim();
    if date.is_empty() {
        return String::new();
    }
    let Some(parsed) = parse_date(date) else {
        return date.to_string();
    };

    let (hour, minute) = (hour.trim(), minute.trim());
    let time = if !hour.is_empty() && !minute.is_empty() {
        Some((hour.to_string(), minute.to_string()))
    } else if force_time {
        Some((
            or_default(hour, default_time.hour),
            or_default(minute, default_time.minute),
        ))
    } else {
        None
    };

    match time {
        Some((h, m)) => format!("{}{}:{}", date_label(parsed), pad2(&h), pad2(&m)),
        None => date_label(parsed),
    }
}

/// Date and weekday only.
pub fn format_date(date: &str) -> String {
    format_date_time(date, "", "", false, TimeOfDay::START_OF_DAY)
}

fn or_default(part: &str, fallback: u8) -> String {
    if part.is_empty() {
        fallback.to_string()
    } else {
        part.to_string()
    }
}

fn pad2(part: &str) -> String {
    format!("{part:0>2}")
}

fn date_label(date: NaiveDate) -> String {
    let weekday = WEEKDAYS[date.weekday().num_days_from_sunday() as usize];
    format!("{}年{}月{}日（{}）", date.year(), date.month(), date.day(), weekday)
}

/// Calendar date from `Y-M-D`, rolling over out-of-range months and days.
fn parse_date(date: &str) -> Option<NaiveDate> {
    let parts: Vec<i64> = date
        .split('-')
        .map(|p| p.trim().parse::<i64>())
        .collect::<Result<_, _>>()
        .ok()?;
    let &[year, month, day] = parts.as_slice() else {
        return None;
    };

    let months = year.checked_mul(12)?.checked_add(month - 1)?;
    let first = NaiveDate::from_ymd_opt(
        i32::try_from(months.div_euclid(12)).ok()?,
        u32::try_from(months.rem_euclid(12) + 1).ok()?,
        1,
    )?;
    first.checked_add_signed(Duration::try_days(day - 1)?)
}

/// Date fields that combine a date with optional hour and minute parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateTimeField {
    ApplicationStart,
    ApplicationEnd,
    FormDeadline,
    ContactStart,
    ContactEnd,
}

impl DateTimeField {
    pub const ALL: [DateTimeField; 5] = [
        DateTimeField::ApplicationStart,
        DateTimeField::ApplicationEnd,
        DateTimeField::FormDeadline,
        DateTimeField::ContactStart,
        DateTimeField::ContactEnd,
    ];

    /// Internal token the formatted value replaces.
    pub fn token(self) -> &'static str {
        match self {
            DateTimeField::ApplicationStart => "[start_date]",
            DateTimeField::ApplicationEnd => "[end_date]",
            DateTimeField::FormDeadline => "[form_deadline]",
            DateTimeField::ContactStart => "[contact_start]",
            DateTimeField::ContactEnd => "[contact_end]",
        }
    }

    pub fn date_key(self) -> &'static str {
        match self {
            DateTimeField::ApplicationStart => "start_date",
            DateTimeField::ApplicationEnd => "end_date",
            DateTimeField::FormDeadline => "form_deadline_date",
            DateTimeField::ContactStart => "contact_start_date",
            DateTimeField::ContactEnd => "contact_end_date",
        }
    }

    pub fn hour_key(self) -> &'static str {
        match self {
            DateTimeField::ApplicationStart => "start_time_hour",
            DateTimeField::ApplicationEnd => "end_time_hour",
            DateTimeField::FormDeadline => "form_deadline_hour",
            DateTimeField::ContactStart => "contact_start_hour",
            DateTimeField::ContactEnd => "contact_end_hour",
        }
    }

    pub fn minute_key(self) -> &'static str {
        match self {
            DateTimeField::ApplicationStart => "start_time_minute",
            DateTimeField::ApplicationEnd => "end_time_minute",
            DateTimeField::FormDeadline => "form_deadline_minute",
            DateTimeField::ContactStart => "contact_start_minute",
            DateTimeField::ContactEnd => "contact_end_minute",
        }
    }

    pub fn default_time(self) -> TimeOfDay {
        match self {
            DateTimeField::ApplicationStart | DateTimeField::ContactStart => TimeOfDay::START_OF_DAY,
            _ => TimeOfDay::END_OF_DAY,
        }
    }

    /// Formatted value for this field, or `""` when the record has no date.
    pub fn format(self, record: &CampaignRecord, force_time: bool) -> String {
        format_date_time(
            record.get(self.date_key()),
            record.get(self.hour_key()),
            record.get(self.minute_key()),
            force_time,
            self.default_time(),
        )
    }
}

/// Which date-time fields a document always prints with a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimePolicy {
    forced: BTreeSet<DateTimeField>,
}

impl TimePolicy {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn forcing(fields: &[DateTimeField]) -> Self {
        Self {
            forced: fields.iter().copied().collect(),
        }
    }

    pub fn forces(&self, field: DateTimeField) -> bool {
        self.forced.contains(&field)
    }
}

/// Coarse year/month/period dates such as the DM dispatch date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodDateField {
    DmDispatch,
    Shipment,
}

impl PeriodDateField {
    pub const ALL: [PeriodDateField; 2] = [PeriodDateField::DmDispatch, PeriodDateField::Shipment];

    pub fn token(self) -> &'static str {
        match self {
            PeriodDateField::DmDispatch => "[dm_send_date]",
            PeriodDateField::Shipment => "[shipping_date]",
        }
    }

    fn prefix(self) -> &'static str {
        match self {
            PeriodDateField::DmDispatch => "dm_send",
            PeriodDateField::Shipment => "shipping",
        }
    }

    /// Record keys for year, month and period, in that order.
    pub fn keys(self) -> [String; 3] {
        let prefix = self.prefix();
        [
            format!("{prefix}_year"),
            format!("{prefix}_month"),
            format!("{prefix}_period"),
        ]
    }

    /// The period value, present only when all three parts are filled in.
    pub fn read<'a>(self, record: &'a CampaignRecord) -> Option<PeriodField<'a>> {
        let [year, month, period] = self.keys();
        Some(PeriodField {
            year: record.value(&year)?,
            month: record.value(&month)?,
            period: record.value(&period)?,
        })
    }
}

/// `{year}年{month}月{period}`, period being 上旬 / 中旬 / 下旬.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodField<'a> {
    pub year: &'a str,
    pub month: &'a str,
    pub period: &'a str,
}

impl fmt::Display for PeriodField<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.year.chars().count() == 2 {
            write!(f, "20")?;
        }
        write!(f, "{}年{}月{}", self.year, self.month, self.period)
    }
}
