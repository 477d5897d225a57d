use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveTime, Timelike, Utc, Weekday};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::i18n::Locale;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ClassType {
    Group,
    Private,
    Recurring,
}

impl ClassType {
    pub fn as_str(self) -> &'static str {
        match self {
            ClassType::Group => "group",
            ClassType::Private => "private",
            ClassType::Recurring => "recurring",
        }
    }
}

impl fmt::Display for ClassType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClassType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "group" => Ok(ClassType::Group),
            "private" => Ok(ClassType::Private),
            "recurring" => Ok(ClassType::Recurring),
            other => Err(format!("unknown class type '{other}'")),
        }
    }
}

/// Day a class takes place on, indexed 0 (Sunday) through 6 (Saturday).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct DayOfWeek(Weekday);

impl DayOfWeek {
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek(Weekday::Sun),
        DayOfWeek(Weekday::Mon),
        DayOfWeek(Weekday::Tue),
        DayOfWeek(Weekday::Wed),
        DayOfWeek(Weekday::Thu),
        DayOfWeek(Weekday::Fri),
        DayOfWeek(Weekday::Sat),
    ];

    pub fn from_index(index: i64) -> Option<Self> {
        usize::try_from(index)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
    }

    pub fn index(self) -> u8 {
        self.0.num_days_from_sunday() as u8
    }

    /// Two-letter code used by iCalendar `BYDAY`.
    pub fn rrule_code(self) -> &'static str {
        match self.0 {
            Weekday::Sun => "SU",
            Weekday::Mon => "MO",
            Weekday::Tue => "TU",
            Weekday::Wed => "WE",
            Weekday::Thu => "TH",
            Weekday::Fri => "FR",
            Weekday::Sat => "SA",
        }
    }
}

impl From<Weekday> for DayOfWeek {
    fn from(value: Weekday) -> Self {
        DayOfWeek(value)
    }
}

impl TryFrom<u8> for DayOfWeek {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_index(value.into())
            .ok_or_else(|| format!("dayOfWeek must be between 0 and 6, got {value}"))
    }
}

impl From<DayOfWeek> for u8 {
    fn from(value: DayOfWeek) -> Self {
        value.index()
    }
}

impl Ord for DayOfWeek {
    fn cmp(&self, other: &Self) -> Ordering {
        self.index().cmp(&other.index())
    }
}

impl PartialOrd for DayOfWeek {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Parses a class start time. Browsers may submit `HH:MM:SS`; seconds are dropped.
pub fn parse_start_time(raw: &str) -> Option<NaiveTime> {
    let raw = raw.trim();
    let parsed = NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .ok()?;
    parsed.with_second(0)
}

mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_start_time(&raw)
            .ok_or_else(|| D::Error::custom(format!("invalid start time '{raw}'")))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClassSchedule {
    #[schema(example = "5f0c7a8e-3d0b-4a53-9d7e-2b1f6f1f7c11")]
    pub id: String,
    #[serde(rename = "type")]
    pub class_type: ClassType,
    #[schema(example = "Morning Flow")]
    pub title_en: String,
    #[schema(example = "Утренняя практика")]
    pub title_ru: String,
    pub desc_en: Option<String>,
    pub desc_ru: Option<String>,
    #[schema(value_type = Option<u8>, minimum = 0, maximum = 6, example = 1)]
    pub day_of_week: Option<DayOfWeek>,
    #[serde(with = "hhmm")]
    #[schema(value_type = String, example = "09:00")]
    pub start_time: NaiveTime,
    #[schema(example = 60)]
    pub duration: u32,
    #[schema(example = 15)]
    pub capacity: u32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ClassSchedule {
    pub fn title(&self, locale: Locale) -> &str {
        match locale {
            Locale::En => &self.title_en,
            Locale::Ru => &self.title_ru,
        }
    }

    pub fn description(&self, locale: Locale) -> Option<&str> {
        match locale {
            Locale::En => self.desc_en.as_deref(),
            Locale::Ru => self.desc_ru.as_deref(),
        }
    }
}

/// Body accepted by the admin create and update endpoints.
///
/// Fields are kept loose here and checked by [`crate::validation::validate_class`]
/// so that every problem surfaces as a 400 with a readable message.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClassInput {
    #[serde(rename = "type")]
    #[schema(example = "group")]
    pub class_type: String,
    pub title_en: String,
    pub title_ru: String,
    #[serde(default)]
    pub desc_en: Option<String>,
    #[serde(default)]
    pub desc_ru: Option<String>,
    #[serde(default)]
    #[schema(minimum = 0, maximum = 6)]
    pub day_of_week: Option<i64>,
    #[schema(example = "09:00")]
    pub start_time: String,
    #[schema(example = 60)]
    pub duration: i64,
    #[schema(example = 15)]
    pub capacity: i64,
    /// Only honoured on update; new classes always start active.
    #[serde(default)]
    pub is_active: Option<bool>,
}

/// A validated class ready to be written to the store.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassDraft {
    pub class_type: ClassType,
    pub title_en: String,
    pub title_ru: String,
    pub desc_en: Option<String>,
    pub desc_ru: Option<String>,
    pub day_of_week: Option<DayOfWeek>,
    pub start_time: NaiveTime,
    pub duration: u32,
    pub capacity: u32,
    pub is_active: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_of_week_indexing() {
        assert_eq!(DayOfWeek::from_index(0), Some(DayOfWeek::from(Weekday::Sun)));
        assert_eq!(DayOfWeek::from_index(6), Some(DayOfWeek::from(Weekday::Sat)));
        assert!(DayOfWeek::from_index(7).is_none());
        assert!(DayOfWeek::from_index(-1).is_none());
        assert_eq!(DayOfWeek::from(Weekday::Fri).index(), 5);
        assert_eq!(DayOfWeek::from(Weekday::Wed).rrule_code(), "WE");
    }

    #[test]
    fn test_day_of_week_serde() {
        let day: DayOfWeek = serde_json::from_str("1").unwrap();
        assert_eq!(day, DayOfWeek::from(Weekday::Mon));
        assert_eq!(serde_json::to_string(&day).unwrap(), "1");
        assert!(serde_json::from_str::<DayOfWeek>("9").is_err());
    }

    #[test]
    fn test_sunday_sorts_first() {
        let mut days = vec![
            DayOfWeek::from(Weekday::Sat),
            DayOfWeek::from(Weekday::Sun),
            DayOfWeek::from(Weekday::Mon),
        ];
        days.sort();
        let indexes: Vec<u8> = days.into_iter().map(DayOfWeek::index).collect();
        assert_eq!(indexes, vec![0, 1, 6]);
    }

    #[test]
    fn test_parse_start_time() {
        assert_eq!(
            parse_start_time("09:00"),
            NaiveTime::from_hms_opt(9, 0, 0)
        );
        assert_eq!(
            parse_start_time("18:30:45"),
            NaiveTime::from_hms_opt(18, 30, 0)
        );
        assert!(parse_start_time("25:00").is_none());
        assert!(parse_start_time("nine").is_none());
    }

    #[test]
    fn test_class_type_round_trip_through_str() {
        for class_type in [ClassType::Group, ClassType::Private, ClassType::Recurring] {
            assert_eq!(class_type.as_str().parse::<ClassType>(), Ok(class_type));
        }
        assert!("yin".parse::<ClassType>().is_err());
    }
}
