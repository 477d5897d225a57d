use std::ops::RangeInclusive;

use crate::error::ApiError;
use crate::models::{ClassDraft, ClassInput, ClassType, DayOfWeek, parse_start_time};

pub const DURATION_RANGE: RangeInclusive<i64> = 15..=180;
pub const CAPACITY_RANGE: RangeInclusive<i64> = 1..=50;

fn required(value: &str, field: &str) -> Result<String, ApiError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ApiError::BadRequest(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}

fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn bounded(value: i64, range: RangeInclusive<i64>, field: &str) -> Result<u32, ApiError> {
    if range.contains(&value) {
        // range bounds fit in u32
        Ok(value as u32)
    } else {
        Err(ApiError::BadRequest(format!(
            "{field} must be between {} and {}",
            range.start(),
            range.end()
        )))
    }
}

pub fn validate_class(input: ClassInput) -> Result<ClassDraft, ApiError> {
    let class_type = input
        .class_type
        .parse::<ClassType>()
        .map_err(ApiError::BadRequest)?;
    let title_en = required(&input.title_en, "titleEn")?;
    let title_ru = required(&input.title_ru, "titleRu")?;

    let day_of_week = match input.day_of_week {
        Some(index) => Some(DayOfWeek::from_index(index).ok_or_else(|| {
            ApiError::BadRequest("dayOfWeek must be between 0 (Sunday) and 6 (Saturday)".into())
        })?),
        None => None,
    };

    let start_time = parse_start_time(&input.start_time)
        .ok_or_else(|| ApiError::BadRequest("startTime must be in HH:MM format".into()))?;

    Ok(ClassDraft {
        class_type,
        title_en,
        title_ru,
        desc_en: optional(input.desc_en),
        desc_ru: optional(input.desc_ru),
        day_of_week,
        start_time,
        duration: bounded(input.duration, DURATION_RANGE, "duration")?,
        capacity: bounded(input.capacity, CAPACITY_RANGE, "capacity")?,
        is_active: input.is_active,
    })
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveTime, Weekday};

    use super::*;

    fn input() -> ClassInput {
        ClassInput {
            class_type: "group".to_string(),
            title_en: "Morning Flow".to_string(),
            title_ru: "Утренняя практика".to_string(),
            desc_en: Some("  Energizing vinyasa  ".to_string()),
            desc_ru: Some(String::new()),
            day_of_week: Some(1),
            start_time: "09:00".to_string(),
            duration: 60,
            capacity: 15,
            is_active: None,
        }
    }

    #[test]
    fn test_validate_class_normalizes() {
        let draft = validate_class(input()).unwrap();
        assert_eq!(draft.class_type, ClassType::Group);
        assert_eq!(draft.desc_en.as_deref(), Some("Energizing vinyasa"));
        assert_eq!(draft.desc_ru, None);
        assert_eq!(draft.day_of_week, Some(DayOfWeek::from(Weekday::Mon)));
        assert_eq!(draft.start_time, NaiveTime::from_hms_opt(9, 0, 0).unwrap());
    }

    #[test]
    fn test_flexible_day() {
        let mut raw = input();
        raw.day_of_week = None;
        assert_eq!(validate_class(raw).unwrap().day_of_week, None);
    }

    #[test]
    fn test_rejects_bad_fields() {
        let cases: Vec<fn(&mut ClassInput)> = vec![
            |i| i.class_type = "hot".into(),
            |i| i.title_en = "   ".into(),
            |i| i.title_ru = String::new(),
            |i| i.day_of_week = Some(7),
            |i| i.start_time = "9am".into(),
            |i| i.duration = 10,
            |i| i.duration = 181,
            |i| i.capacity = 0,
            |i| i.capacity = 51,
        ];
        for mutate in cases {
            let mut raw = input();
            mutate(&mut raw);
            assert!(matches!(validate_class(raw), Err(ApiError::BadRequest(_))));
        }
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let mut raw = input();
        raw.duration = 180;
        raw.capacity = 1;
        assert!(validate_class(raw).is_ok());
    }
}
