use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::{ClassType, DayOfWeek};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Ru,
}

impl Locale {
    pub fn as_str(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Ru => "ru",
        }
    }

    pub fn other(self) -> Locale {
        match self {
            Locale::En => Locale::Ru,
            Locale::Ru => Locale::En,
        }
    }

    /// Rewrites `/en/about` into `/ru/about` and back. Paths without this
    /// locale's prefix fall back to the other locale's home page.
    pub fn switch_path(self, path: &str) -> String {
        let prefix = format!("/{}", self.as_str());
        match path.strip_prefix(&prefix) {
            Some(rest) if rest.is_empty() || rest.starts_with('/') => {
                format!("/{}{}", self.other().as_str(), rest)
            }
            _ => format!("/{}", self.other().as_str()),
        }
    }

    /// Picks the preferred supported locale from an `Accept-Language` header.
    pub fn negotiate(accept_language: Option<&str>) -> Locale {
        let Some(header) = accept_language else {
            return Locale::default();
        };

        let mut best: Option<(Locale, f32)> = None;
        for entry in header.split(',') {
            let mut parts = entry.trim().split(';');
            let tag = parts.next().unwrap_or("").trim();
            let quality = parts
                .find_map(|p| p.trim().strip_prefix("q="))
                .and_then(|q| q.parse::<f32>().ok())
                .unwrap_or(1.0);
            // q=0 marks the language as not acceptable
            if quality <= 0.0 {
                continue;
            }
            let primary = tag.split('-').next().unwrap_or("");
            let Ok(locale) = primary.to_ascii_lowercase().parse::<Locale>() else {
                continue;
            };
            if best.is_none_or(|(_, q)| quality > q) {
                best = Some((locale, quality));
            }
        }
        best.map(|(locale, _)| locale).unwrap_or_default()
    }

    pub fn messages(self) -> &'static Messages {
        match self {
            Locale::En => &EN,
            Locale::Ru => &RU,
        }
    }

    pub fn day_name(self, day: DayOfWeek) -> &'static str {
        const EN_DAYS: [&str; 7] = [
            "Sunday",
            "Monday",
            "Tuesday",
            "Wednesday",
            "Thursday",
            "Friday",
            "Saturday",
        ];
        const RU_DAYS: [&str; 7] = [
            "Воскресенье",
            "Понедельник",
            "Вторник",
            "Среда",
            "Четверг",
            "Пятница",
            "Суббота",
        ];
        let names = match self {
            Locale::En => &EN_DAYS,
            Locale::Ru => &RU_DAYS,
        };
        names[usize::from(day.index())]
    }

    pub fn class_type_label(self, class_type: ClassType) -> &'static str {
        match (self, class_type) {
            (Locale::En, ClassType::Group) => "Group Class",
            (Locale::En, ClassType::Private) => "Private",
            (Locale::En, ClassType::Recurring) => "Drop-in Class",
            (Locale::Ru, ClassType::Group) => "Групповое занятие",
            (Locale::Ru, ClassType::Private) => "Индивидуальное",
            (Locale::Ru, ClassType::Recurring) => "Разовое занятие",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "en" => Ok(Locale::En),
            "ru" => Ok(Locale::Ru),
            other => Err(format!("unsupported locale '{other}'")),
        }
    }
}

/// Static copy for the content pages.
#[derive(Debug, Serialize)]
pub struct Messages {
    pub nav_home: &'static str,
    pub nav_about: &'static str,
    pub nav_schedule: &'static str,
    pub toggle_label: &'static str,

    pub hero_title: &'static str,
    pub hero_subtitle: &'static str,
    pub hero_cta: &'static str,

    pub about_title: &'static str,
    pub about_preview: &'static str,
    pub about_read_more: &'static str,

    pub classes_title: &'static str,
    pub classes_group_title: &'static str,
    pub classes_group_desc: &'static str,
    pub classes_private_title: &'static str,
    pub classes_private_desc: &'static str,
    pub classes_recurring_title: &'static str,
    pub classes_recurring_desc: &'static str,
    pub classes_appointment_title: &'static str,
    pub classes_appointment_desc: &'static str,
    pub classes_pricing: &'static str,

    pub contact_title: &'static str,
    pub contact_instagram: &'static str,
    pub contact_telegram: &'static str,

    pub about_page_title: &'static str,
    pub about_page_subtitle: &'static str,
    pub about_journey_title: &'static str,
    pub about_journey_text: &'static str,
    pub about_specializations_title: &'static str,
    pub about_specializations: [&'static str; 4],
    pub about_philosophy_title: &'static str,
    pub about_philosophy_text: &'static str,
    pub about_cta_title: &'static str,
    pub about_cta_text: &'static str,
    pub about_cta_schedule: &'static str,
    pub about_cta_contact: &'static str,

    pub schedule_title: &'static str,
    pub schedule_intro: &'static str,
    pub schedule_empty: &'static str,
    pub schedule_minutes: &'static str,
    pub schedule_spots: &'static str,
    pub schedule_private_title: &'static str,
    pub schedule_private_note: &'static str,
    pub schedule_book_title: &'static str,
    pub schedule_book_text: &'static str,

    pub footer_rights: &'static str,
}

static EN: Messages = Messages {
    nav_home: "Home",
    nav_about: "About",
    nav_schedule: "Schedule",
    toggle_label: "RU",

    hero_title: "Yoga with Tim",
    hero_subtitle: "Find balance, strength and calm through mindful practice",
    hero_cta: "View Schedule",

    about_title: "About Me",
    about_preview: "Certified yoga instructor helping students of every level build a steady, joyful practice.",
    about_read_more: "Read More",

    classes_title: "Classes",
    classes_group_title: "Group Classes",
    classes_group_desc: "Practice together in a small, supportive group.",
    classes_private_title: "Private Sessions",
    classes_private_desc: "One-on-one practice tailored to your body and goals.",
    classes_recurring_title: "Drop-in Classes",
    classes_recurring_desc: "Join any single class whenever it suits you.",
    classes_appointment_title: "By Appointment",
    classes_appointment_desc: "Flexible times arranged around your schedule.",
    classes_pricing: "Contact for pricing",

    contact_title: "Get in Touch",
    contact_instagram: "Instagram",
    contact_telegram: "Telegram",

    about_page_title: "About Tim",
    about_page_subtitle: "Certified Yoga Instructor",
    about_journey_title: "My Journey",
    about_journey_text: "Certified yoga instructor passionate about helping students discover balance, strength, and inner peace through mindful practice.",
    about_specializations_title: "Specializations",
    about_specializations: [
        "Hatha Yoga",
        "Vinyasa Flow",
        "Meditation & Breathwork",
        "Personalized Practice for All Levels",
    ],
    about_philosophy_title: "Philosophy",
    about_philosophy_text: "Yoga is more than physical practice. It's a journey to self-discovery, inner growth, and harmony between body and mind.",
    about_cta_title: "Ready to Start Your Practice?",
    about_cta_text: "Check out the class schedule and get in touch",
    about_cta_schedule: "View Schedule",
    about_cta_contact: "Contact",

    schedule_title: "Class Schedule",
    schedule_intro: "Choose a time that works for you. Contact me via Instagram or Telegram to book your spot.",
    schedule_empty: "No classes are scheduled right now.",
    schedule_minutes: "min",
    schedule_spots: "spots",
    schedule_private_title: "🧘 Private Sessions",
    schedule_private_note: "Contact me to discuss scheduling and details",
    schedule_book_title: "Ready to Book?",
    schedule_book_text: "Get in touch to reserve your spot",

    footer_rights: "All rights reserved.",
};

static RU: Messages = Messages {
    nav_home: "Главная",
    nav_about: "Обо мне",
    nav_schedule: "Расписание",
    toggle_label: "EN",

    hero_title: "Йога с Тимом",
    hero_subtitle: "Баланс, сила и спокойствие через осознанную практику",
    hero_cta: "Посмотреть расписание",

    about_title: "Обо мне",
    about_preview: "Сертифицированный инструктор по йоге. Помогаю ученикам любого уровня выстроить устойчивую и радостную практику.",
    about_read_more: "Подробнее",

    classes_title: "Занятия",
    classes_group_title: "Групповые занятия",
    classes_group_desc: "Практика в небольшой дружной группе.",
    classes_private_title: "Индивидуальные занятия",
    classes_private_desc: "Практика один на один с учётом ваших целей.",
    classes_recurring_title: "Разовые занятия",
    classes_recurring_desc: "Приходите на любое занятие, когда вам удобно.",
    classes_appointment_title: "По записи",
    classes_appointment_desc: "Гибкое время под ваше расписание.",
    classes_pricing: "Стоимость уточняйте лично",

    contact_title: "Связаться со мной",
    contact_instagram: "Instagram",
    contact_telegram: "Telegram",

    about_page_title: "О Тиме",
    about_page_subtitle: "Сертифицированный инструктор по йоге",
    about_journey_title: "Моя история",
    about_journey_text: "Сертифицированный инструктор по йоге, увлечённый помощью студентам в обретении баланса, силы и внутреннего спокойствия через осознанную практику.",
    about_specializations_title: "Специализация",
    about_specializations: [
        "Хатха-йога",
        "Виньяса флоу",
        "Медитация и дыхательные практики",
        "Индивидуальный подход для всех уровней",
    ],
    about_philosophy_title: "Философия",
    about_philosophy_text: "Йога — это больше, чем физическая практика. Это путь к самопознанию, внутреннему росту и гармонии между телом и разумом.",
    about_cta_title: "Готовы начать свою практику?",
    about_cta_text: "Посмотрите расписание занятий и свяжитесь со мной",
    about_cta_schedule: "Посмотреть расписание",
    about_cta_contact: "Связаться",

    schedule_title: "Расписание занятий",
    schedule_intro: "Выберите удобное время для практики. Для записи свяжитесь со мной через Instagram или Telegram.",
    schedule_empty: "Сейчас занятий в расписании нет.",
    schedule_minutes: "мин",
    schedule_spots: "мест",
    schedule_private_title: "🧘 Индивидуальные занятия",
    schedule_private_note: "Свяжитесь со мной, чтобы обсудить расписание и детали",
    schedule_book_title: "Готовы записаться?",
    schedule_book_text: "Свяжитесь со мной для записи на занятие",

    footer_rights: "Все права защищены.",
};

#[cfg(test)]
mod tests {
    use chrono::Weekday;

    use super::*;

    #[test]
    fn test_switch_path() {
        assert_eq!(Locale::En.switch_path("/en"), "/ru");
        assert_eq!(Locale::En.switch_path("/en/about"), "/ru/about");
        assert_eq!(
            Locale::Ru.switch_path("/ru/admin/dashboard"),
            "/en/admin/dashboard"
        );
        assert_eq!(Locale::En.switch_path("/english"), "/ru");
        assert_eq!(Locale::Ru.switch_path("/"), "/en");
    }

    #[test]
    fn test_negotiate() {
        assert_eq!(Locale::negotiate(None), Locale::En);
        assert_eq!(Locale::negotiate(Some("ru-RU,ru;q=0.9,en;q=0.8")), Locale::Ru);
        assert_eq!(Locale::negotiate(Some("en-US,en;q=0.9,ru;q=0.5")), Locale::En);
        assert_eq!(Locale::negotiate(Some("de-DE, ru;q=0.3")), Locale::Ru);
        assert_eq!(Locale::negotiate(Some("fr")), Locale::En);
        assert_eq!(Locale::negotiate(Some("ru;q=0")), Locale::En);
        assert_eq!(Locale::negotiate(Some("ru;q=0, en;q=0.1")), Locale::En);
        assert_eq!(Locale::negotiate(Some("en;q=0.0, ru;q=0.2")), Locale::Ru);
    }

    #[test]
    fn test_day_names() {
        let sunday = DayOfWeek::from(Weekday::Sun);
        let friday = DayOfWeek::from(Weekday::Fri);
        assert_eq!(Locale::En.day_name(sunday), "Sunday");
        assert_eq!(Locale::Ru.day_name(sunday), "Воскресенье");
        assert_eq!(Locale::Ru.day_name(friday), "Пятница");
    }

    #[test]
    fn test_class_type_labels() {
        assert_eq!(Locale::En.class_type_label(ClassType::Recurring), "Drop-in Class");
        assert_eq!(Locale::Ru.class_type_label(ClassType::Group), "Групповое занятие");
    }
}
