use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use chrono_tz::Tz;
use icalendar::{Calendar, CalendarDateTime, Component, Event, EventLike};

use crate::i18n::Locale;
use crate::models::{ClassSchedule, DayOfWeek};

/// Exports weekly classes as recurring iCalendar events in the studio timezone.
#[derive(Clone)]
pub struct ICalExporter {
    calendar_name: String,
    timezone: Tz,
    location: Option<String>,
}

impl ICalExporter {
    pub fn new(calendar_name: impl Into<String>, timezone: Tz, location: Option<String>) -> Self {
        Self {
            calendar_name: calendar_name.into(),
            timezone,
            location,
        }
    }

    /// First date on or after `today` that falls on `day`.
    pub fn next_occurrence(today: NaiveDate, day: DayOfWeek) -> NaiveDate {
        let today_index = i64::from(today.weekday().num_days_from_sunday());
        let ahead = (7 + i64::from(day.index()) - today_index) % 7;
        today + Duration::days(ahead)
    }

    /// Appointment-only classes (no day of week) are left out.
    pub fn generate(&self, classes: &[ClassSchedule], locale: Locale, today: NaiveDate) -> Vec<u8> {
        let weekly: Vec<(&ClassSchedule, DayOfWeek)> = classes
            .iter()
            .filter_map(|c| c.day_of_week.map(|day| (c, day)))
            .collect();
        if weekly.is_empty() {
            return Vec::new();
        }

        let tzid = self.timezone.name();
        let mut calendar = Calendar::new();
        calendar.name(&self.calendar_name);
        calendar.timezone(tzid);

        for (item, day) in weekly {
            let start = NaiveDateTime::new(Self::next_occurrence(today, day), item.start_time);
            let end = start + Duration::minutes(i64::from(item.duration));

            let mut event = Event::new();
            event.summary(item.title(locale));
            event.starts(CalendarDateTime::WithTimezone {
                date_time: start,
                tzid: tzid.to_string(),
            });
            event.ends(CalendarDateTime::WithTimezone {
                date_time: end,
                tzid: tzid.to_string(),
            });
            event.add_property("RRULE", format!("FREQ=WEEKLY;BYDAY={}", day.rrule_code()));
            if let Some(description) = item.description(locale) {
                event.description(description);
            }
            if let Some(location) = &self.location {
                event.location(location);
            }
            event.uid(&format!("{}-{}-yoga-schedule", item.id, locale));
            calendar.push(event);
        }

        calendar.to_string().into_bytes()
    }
}
