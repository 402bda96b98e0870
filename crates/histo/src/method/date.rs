use foundation::time::{
    MONTH_NAMES, MS_PER_DAY, MS_PER_HOUR, MS_PER_MINUTE, WEEKDAY_NAMES, datetime_from_epoch_ms,
    epoch_ms_from_civil, weekday_from_days,
};
use foundation::value::FieldValue;

use crate::bin::{BinKey, MAGIC_EMPTY, MAGIC_NAN};
use crate::method::{BinMethod, NO_DATA_LABEL};
use crate::method::numeric::NAN_LABEL;

/// Date binning over epoch-millisecond values.
///
/// Interval types key on the floored start of the interval (still epoch
/// ms, so keys order chronologically); cyclic types key on the ordinal
/// within the cycle (hour 0-23, weekday 0-6, month 0-11).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DateBinType {
    Minute,
    Hour,
    Day,
    Month,
    Year,
    HourOfDay,
    DayOfWeek,
    MonthOfYear,
}

impl DateBinType {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "minute" => Some(Self::Minute),
            "hour" => Some(Self::Hour),
            "day" => Some(Self::Day),
            "month" => Some(Self::Month),
            "year" => Some(Self::Year),
            "hour-of-day" => Some(Self::HourOfDay),
            "day-of-week" => Some(Self::DayOfWeek),
            "month-of-year" => Some(Self::MonthOfYear),
            _ => None,
        }
    }
}

#[derive(Debug, Copy, Clone)]
pub struct DateBinMethod {
    bin_type: DateBinType,
}

impl DateBinMethod {
    pub fn new(bin_type: DateBinType) -> Self {
        Self { bin_type }
    }

    pub fn bin_type(&self) -> DateBinType {
        self.bin_type
    }

    fn key_ms(&self, value: &FieldValue) -> Option<i64> {
        if value.is_empty() {
            return None;
        }
        let n = value.as_number()?;
        if !n.is_finite() {
            return None;
        }
        let ms = n.floor() as i64;
        Some(match self.bin_type {
            DateBinType::Minute => ms - ms.rem_euclid(MS_PER_MINUTE),
            DateBinType::Hour => ms - ms.rem_euclid(MS_PER_HOUR),
            DateBinType::Day => ms - ms.rem_euclid(MS_PER_DAY),
            DateBinType::Month => {
                let dt = datetime_from_epoch_ms(ms);
                epoch_ms_from_civil(dt.year, dt.month, 1)
            }
            DateBinType::Year => {
                let dt = datetime_from_epoch_ms(ms);
                epoch_ms_from_civil(dt.year, 1, 1)
            }
            DateBinType::HourOfDay => i64::from(datetime_from_epoch_ms(ms).hour),
            DateBinType::DayOfWeek => i64::from(weekday_from_days(ms.div_euclid(MS_PER_DAY))),
            DateBinType::MonthOfYear => i64::from(datetime_from_epoch_ms(ms).month) - 1,
        })
    }

    fn label_for_key(&self, key: i64) -> String {
        match self.bin_type {
            DateBinType::Minute => {
                let dt = datetime_from_epoch_ms(key);
                format!(
                    "{:04}-{:02}-{:02} {:02}:{:02}",
                    dt.year, dt.month, dt.day, dt.hour, dt.minute
                )
            }
            DateBinType::Hour => {
                let dt = datetime_from_epoch_ms(key);
                format!("{:04}-{:02}-{:02} {:02}:00", dt.year, dt.month, dt.day, dt.hour)
            }
            DateBinType::Day => {
                let dt = datetime_from_epoch_ms(key);
                format!("{:04}-{:02}-{:02}", dt.year, dt.month, dt.day)
            }
            DateBinType::Month => {
                let dt = datetime_from_epoch_ms(key);
                format!("{:04}-{:02}", dt.year, dt.month)
            }
            DateBinType::Year => format!("{:04}", datetime_from_epoch_ms(key).year),
            DateBinType::HourOfDay => format!("{key:02}"),
            DateBinType::DayOfWeek => WEEKDAY_NAMES[key.rem_euclid(7) as usize].to_string(),
            DateBinType::MonthOfYear => MONTH_NAMES[key.rem_euclid(12) as usize].to_string(),
        }
    }
}

impl BinMethod for DateBinMethod {
    fn kind(&self) -> &'static str {
        "date"
    }

    fn bin_key(&self, value: &FieldValue) -> BinKey {
        match self.key_ms(value) {
            Some(ms) => BinKey::Number(ms as f64),
            None if value.is_empty() => BinKey::Number(MAGIC_EMPTY),
            None => BinKey::Number(MAGIC_NAN),
        }
    }

    fn bin_label(&self, value: &FieldValue) -> String {
        match self.key_ms(value) {
            Some(ms) => self.label_for_key(ms),
            None if value.is_empty() => NO_DATA_LABEL.to_string(),
            None => NAN_LABEL.to_string(),
        }
    }
}
