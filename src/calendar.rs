use chrono::{Datelike, Local, NaiveDate};

/// Fixed Gregorian (month, day) -> label table. No year, no lunar calendar.
const SPECIAL_DAYS: &[((u32, u32), &str)] = &[
    ((1, 1), "New Year's Day (Jan 1)"),
    ((2, 14), "Valentine's Day (Feb 14)"),
    ((3, 8), "International Women's Day (Mar 8)"),
    ((4, 14), "Black Day (Apr 14)"),
    ((6, 1), "International Children's Day (Jun 1)"),
    ((9, 2), "Vietnam National Day (Sep 2)"),
    ((10, 31), "Halloween (Oct 31)"),
    ((11, 20), "Vietnamese Teachers' Day (Nov 20)"),
    ((12, 25), "Christmas Day (Dec 25)"),
];

pub fn special_day_label(month: u32, day: u32) -> Option<&'static str> {
    SPECIAL_DAYS
        .iter()
        .find(|((m, d), _)| *m == month && *d == day)
        .map(|(_, label)| *label)
}

pub fn special_day_on(date: NaiveDate) -> Option<&'static str> {
    special_day_label(date.month(), date.day())
}

pub fn today_special_day() -> Option<&'static str> {
    special_day_on(Local::now().date_naive())
}

pub fn has_special_day_today() -> bool {
    today_special_day().is_some()
}
