use crate::course::CourseSettings;
use chrono::prelude::*;
use rrule::{Frequenzy, ParsedOptions, RRule, RRuleSet};
use serde::{de::Visitor, Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

const MAX_OCCURRENCE_COUNT: i32 = 740;
pub(crate) const MAX_RECURRENCE_SPAN_MILLIS: i64 = 1000 * 60 * 60 * 24 * 366 * 2; // 2 years

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum RRuleFrequency {
    Yearly,
    Monthly,
    Weekly,
    Daily,
}

/// Recurrence descriptor of a repeating `Lecture`.
///
/// The rule is anchored at the start time of the lecture that owns it and is
/// expanded in the timezone of the `Course`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RRuleOptions {
    pub freq: RRuleFrequency,
    pub interval: isize,
    pub count: Option<i32>,
    pub until: Option<i64>,
    pub byweekday: Option<Vec<WeekDay>>,
    pub bymonthday: Option<Vec<isize>>,
}

impl Default for RRuleOptions {
    fn default() -> Self {
        Self {
            freq: RRuleFrequency::Weekly,
            interval: 1,
            count: None,
            until: None,
            byweekday: None,
            bymonthday: None,
        }
    }
}

fn freq_convert(freq: &RRuleFrequency) -> Frequenzy {
    match freq {
        RRuleFrequency::Yearly => Frequenzy::Yearly,
        RRuleFrequency::Monthly => Frequenzy::Monthly,
        RRuleFrequency::Weekly => Frequenzy::Weekly,
        RRuleFrequency::Daily => Frequenzy::Daily,
    }
}

impl RRuleOptions {
    pub fn is_valid(&self, start_ts: i64) -> bool {
        if self.interval < 1 || self.interval > 365 {
            return false;
        }
        if let Some(count) = self.count {
            if count < 1 || count > MAX_OCCURRENCE_COUNT {
                return false;
            }
        }
        if let Some(until) = self.until {
            if until < start_ts || until - start_ts > MAX_RECURRENCE_SPAN_MILLIS {
                return false;
            }
        }
        if let Some(bymonthday) = &self.bymonthday {
            if bymonthday.iter().any(|d| *d == 0 || *d < -31 || *d > 31) {
                return false;
            }
        }
        true
    }

    pub fn get_parsed_options(&self, start_ts: i64, settings: &CourseSettings) -> ParsedOptions {
        let tzid = settings.timezone;
        let dtstart = tzid.timestamp_millis(start_ts);
        let until = self.until.map(|ts| tzid.timestamp_millis(ts));
        let count = self.count.map(|c| std::cmp::max(c, 0) as u32);

        let mut byweekday = Vec::new();
        let mut bynweekday = Vec::new();
        for wday in self.byweekday.clone().unwrap_or_default() {
            match wday.nth() {
                Some(n) => bynweekday.push(vec![wday.weekday() as isize, n]),
                None => byweekday.push(wday.weekday()),
            }
        }

        let mut bymonthday = Vec::new();
        let mut bynmonthday = Vec::new();
        for day in self.bymonthday.clone().unwrap_or_default() {
            if day > 0 {
                bymonthday.push(day);
            } else {
                bynmonthday.push(day);
            }
        }

        // The rrule crate leaves filling in defaults derived from dtstart to
        // its string parser, so it has to be done here.
        let no_weekdays = byweekday.is_empty() && bynweekday.is_empty();
        let no_monthdays = bymonthday.is_empty() && bynmonthday.is_empty();
        let mut bymonth = Vec::new();
        match self.freq {
            RRuleFrequency::Weekly if no_weekdays => {
                byweekday.push(dtstart.weekday().num_days_from_monday() as usize);
            }
            RRuleFrequency::Monthly if no_weekdays && no_monthdays => {
                bymonthday.push(dtstart.day() as isize);
            }
            RRuleFrequency::Yearly if no_weekdays && no_monthdays => {
                bymonth.push(dtstart.month() as usize);
                bymonthday.push(dtstart.day() as isize);
            }
            _ => (),
        }

        ParsedOptions {
            freq: freq_convert(&self.freq),
            interval: self.interval as usize,
            count,
            until,
            tzid,
            dtstart,
            wkst: settings.week_start,
            bysetpos: vec![],
            bymonth,
            bymonthday,
            bynmonthday,
            byyearday: vec![],
            byweekno: vec![],
            byweekday,
            byhour: vec![dtstart.hour() as usize],
            byminute: vec![dtstart.minute() as usize],
            bysecond: vec![dtstart.second() as usize],
            bynweekday,
            byeaster: None,
        }
    }

    pub fn get_rrule_set(&self, start_ts: i64, settings: &CourseSettings) -> RRuleSet {
        let mut rrule_set = RRuleSet::new();
        rrule_set.rrule(RRule::new(self.get_parsed_options(start_ts, settings)));
        rrule_set
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct WeekDay {
    n: Option<isize>,
    weekday: usize,
}

impl WeekDay {
    fn create(weekday: usize, n: Option<isize>) -> Result<Self, ()> {
        if !Self::is_valid_weekday(weekday) {
            return Err(());
        }
        if let Some(n) = n {
            if !Self::is_valid_n(n) {
                return Err(());
            }
        }
        Ok(Self { weekday, n })
    }

    pub fn nth(&self) -> Option<isize> {
        self.n
    }

    /// 0 is monday
    pub fn weekday(&self) -> usize {
        self.weekday
    }

    pub fn new(weekday: usize) -> Result<Self, ()> {
        Self::create(weekday, None)
    }

    pub fn new_nth(weekday: usize, n: isize) -> Result<Self, ()> {
        Self::create(weekday, Some(n))
    }

    fn is_valid_n(n: isize) -> bool {
        n != 0 && n < 6 && n > -6
    }

    fn is_valid_weekday(wday: usize) -> bool {
        wday <= 6
    }
}

impl Display for WeekDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let n_prefix = match self.n {
            Some(n) => format!("{}", n),
            None => "".into(),
        };
        write!(f, "{}{}", n_prefix, weekday_to_str(self.weekday))
    }
}

fn str_to_weekday(d: &str) -> Result<usize, InvalidWeekDayError> {
    match d.to_uppercase().as_str() {
        "MO" => Ok(0),
        "TU" => Ok(1),
        "WE" => Ok(2),
        "TH" => Ok(3),
        "FR" => Ok(4),
        "SA" => Ok(5),
        "SU" => Ok(6),
        _ => Err(InvalidWeekDayError::InvalidWeekdayIdentifier(d.to_string())),
    }
}

fn weekday_to_str(wday: usize) -> &'static str {
    match wday {
        0 => "MO",
        1 => "TU",
        2 => "WE",
        3 => "TH",
        4 => "FR",
        5 => "SA",
        _ => "SU",
    }
}

#[derive(Error, Debug)]
pub enum InvalidWeekDayError {
    #[error("Invalid weekday specified: {0}")]
    InvalidWeekdayIdentifier(String),
    #[error("Malformed weekday: {0}")]
    Malformed(String),
}

impl FromStr for WeekDay {
    type Err = InvalidWeekDayError;

    fn from_str(day: &str) -> Result<Self, Self::Err> {
        let e = InvalidWeekDayError::Malformed(day.to_string());
        if day.len() < 2 || !day.is_ascii() {
            Err(e)
        } else if day.len() == 2 {
            let wday = str_to_weekday(day)?;
            WeekDay::new(wday).map_err(|_| e)
        } else {
            let wday = str_to_weekday(&day[day.len() - 2..])?;
            let n = match day[0..day.len() - 2].parse::<isize>() {
                Ok(n) => n,
                Err(_) => return Err(e),
            };
            WeekDay::new_nth(wday, n).map_err(|_| e)
        }
    }
}

impl Serialize for WeekDay {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for WeekDay {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct WeekDayVisitor;

        impl<'de> Visitor<'de> for WeekDayVisitor {
            type Value = WeekDay;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("A valid string representation of weekday")
            }

            fn visit_str<E>(self, value: &str) -> Result<WeekDay, E>
            where
                E: serde::de::Error,
            {
                value
                    .parse::<WeekDay>()
                    .map_err(|_| E::custom(format!("Malformed weekday: {}", value)))
            }
        }

        deserializer.deserialize_str(WeekDayVisitor)
    }
}
