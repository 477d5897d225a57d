//! Demo classes used to populate a fresh installation.

use chrono::{NaiveTime, Weekday};

use crate::models::{ClassDraft, ClassType, DayOfWeek};

struct DemoClass {
    class_type: ClassType,
    title_en: &'static str,
    title_ru: &'static str,
    desc_en: &'static str,
    desc_ru: &'static str,
    day: Option<Weekday>,
    start: (u32, u32),
    duration: u32,
    capacity: u32,
}

const DEMO_CLASSES: [DemoClass; 6] = [
    DemoClass {
        class_type: ClassType::Group,
        title_en: "Morning Flow",
        title_ru: "Утренняя практика",
        desc_en: "Energizing vinyasa flow to start your day",
        desc_ru: "Бодрящая виньяса-флоу для начала дня",
        day: Some(Weekday::Mon),
        start: (9, 0),
        duration: 60,
        capacity: 15,
    },
    DemoClass {
        class_type: ClassType::Group,
        title_en: "Evening Relax",
        title_ru: "Вечерняя релаксация",
        desc_en: "Gentle stretches and relaxation",
        desc_ru: "Мягкая растяжка и релаксация",
        day: Some(Weekday::Mon),
        start: (19, 0),
        duration: 60,
        capacity: 15,
    },
    DemoClass {
        class_type: ClassType::Group,
        title_en: "Hatha Yoga",
        title_ru: "Хатха-йога",
        desc_en: "Traditional hatha practice for all levels",
        desc_ru: "Традиционная практика хатха-йоги для всех уровней",
        day: Some(Weekday::Wed),
        start: (10, 0),
        duration: 75,
        capacity: 12,
    },
    DemoClass {
        class_type: ClassType::Recurring,
        title_en: "Power Yoga",
        title_ru: "Силовая йога",
        desc_en: "Build strength and flexibility",
        desc_ru: "Развитие силы и гибкости",
        day: Some(Weekday::Fri),
        start: (18, 0),
        duration: 60,
        capacity: 20,
    },
    DemoClass {
        class_type: ClassType::Group,
        title_en: "Sunday Flow",
        title_ru: "Воскресная практика",
        desc_en: "Weekend vinyasa flow",
        desc_ru: "Виньяса-флоу выходного дня",
        day: Some(Weekday::Sun),
        start: (11, 0),
        duration: 90,
        capacity: 15,
    },
    DemoClass {
        class_type: ClassType::Private,
        title_en: "Private Session",
        title_ru: "Индивидуальное занятие",
        desc_en: "One-on-one personalized practice",
        desc_ru: "Индивидуальная персонализированная практика",
        day: None,
        start: (14, 0),
        duration: 60,
        capacity: 1,
    },
];

pub fn demo_classes() -> Vec<ClassDraft> {
    DEMO_CLASSES
        .iter()
        .filter_map(|demo| {
            let start_time = NaiveTime::from_hms_opt(demo.start.0, demo.start.1, 0)?;
            Some(ClassDraft {
                class_type: demo.class_type,
                title_en: demo.title_en.to_string(),
                title_ru: demo.title_ru.to_string(),
                desc_en: Some(demo.desc_en.to_string()),
                desc_ru: Some(demo.desc_ru.to_string()),
                day_of_week: demo.day.map(DayOfWeek::from),
                start_time,
                duration: demo.duration,
                capacity: demo.capacity,
                is_active: Some(true),
            })
        })
        .collect()
}
