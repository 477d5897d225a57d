//! Grouping of active classes for the public schedule page.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::i18n::Locale;
use crate::models::{ClassSchedule, DayOfWeek};

#[derive(Debug, Clone, PartialEq)]
pub struct DayGroup {
    pub day: DayOfWeek,
    pub classes: Vec<ClassSchedule>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScheduleView {
    pub days: Vec<DayGroup>,
    /// Classes without a fixed day, booked by appointment.
    pub appointments: Vec<ClassSchedule>,
}

impl ScheduleView {
    pub fn build(classes: Vec<ClassSchedule>) -> Self {
        let mut by_day: BTreeMap<DayOfWeek, Vec<ClassSchedule>> = BTreeMap::new();
        let mut appointments = Vec::new();

        for class in classes {
            match class.day_of_week {
                Some(day) => by_day.entry(day).or_default().push(class),
                None => appointments.push(class),
            }
        }

        let days = by_day
            .into_iter()
            .map(|(day, mut classes)| {
                classes.sort_by(|a, b| {
                    a.start_time
                        .cmp(&b.start_time)
                        .then_with(|| a.title_en.cmp(&b.title_en))
                });
                DayGroup { day, classes }
            })
            .collect();

        Self { days, appointments }
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty() && self.appointments.is_empty()
    }

    /// Flattens the view into template-friendly rows for `locale`.
    pub fn localize(&self, locale: Locale) -> LocalizedSchedule {
        LocalizedSchedule {
            is_empty: self.is_empty(),
            days: self
                .days
                .iter()
                .map(|group| LocalizedDay {
                    name: locale.day_name(group.day),
                    classes: group
                        .classes
                        .iter()
                        .map(|c| LocalizedClass::new(c, locale))
                        .collect(),
                })
                .collect(),
            appointments: self
                .appointments
                .iter()
                .map(|c| LocalizedClass::new(c, locale))
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LocalizedSchedule {
    pub is_empty: bool,
    pub days: Vec<LocalizedDay>,
    pub appointments: Vec<LocalizedClass>,
}

#[derive(Debug, Serialize)]
pub struct LocalizedDay {
    pub name: &'static str,
    pub classes: Vec<LocalizedClass>,
}

#[derive(Debug, Serialize)]
pub struct LocalizedClass {
    pub id: String,
    pub start_time: String,
    pub type_label: &'static str,
    pub title: String,
    pub description: Option<String>,
    pub duration: u32,
    pub capacity: u32,
}

impl LocalizedClass {
    fn new(class: &ClassSchedule, locale: Locale) -> Self {
        Self {
            id: class.id.clone(),
            start_time: class.start_time.format("%H:%M").to_string(),
            type_label: locale.class_type_label(class.class_type),
            title: class.title(locale).to_string(),
            description: class.description(locale).map(str::to_string),
            duration: class.duration,
            capacity: class.capacity,
        }
    }
}
