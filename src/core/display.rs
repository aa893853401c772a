use chrono::{DateTime, Duration, TimeZone, Utc};
use regex::Regex;
use std::sync::LazyLock;

static LIFE_DATES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r", [0-9]{4}(?:-(?:[0-9]{4})?)?$").expect("valid life-dates pattern"));

static TRAILING_DESCRIPTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" \([A-Za-z ]+\)$").expect("valid description pattern"));

/// 把目錄裡的作者標籤轉成顯示用的名字
///
/// `"Le Guin, Ursula K., 1929-2018"` → `"Ursula K. Le Guin"`,
/// `"Douglas, Claire (Journalist)"` → `"Claire Douglas"`.
/// Labels that are not `"Last, First"` come back unchanged.
pub fn display_author_name(label: &str) -> String {
    let label = LIFE_DATES.replace(label, "");

    let parts: Vec<&str> = label.split(',').collect();
    match parts.as_slice() {
        [last, first] => {
            let first = TRAILING_DESCRIPTION.replace(first, "");
            format!("{} {}", first.trim(), last.trim())
        }
        _ => label.to_string(),
    }
}

/// `"today at 12:17"`, `"yesterday at 11:00"` or `"Fri, 22 May 2020 at 10:00"`,
/// in the viewer's time zone.
///
/// Days are compared as formatted calendar dates, so a timestamp just before
/// UTC midnight can still be "today" locally.
pub fn human_friendly_date<Tz>(date: DateTime<Utc>, now: DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let local = date.with_timezone(&now.timezone());
    let day = |d: &DateTime<Tz>| d.format("%a, %-d %B %Y").to_string();
    let time = local.format("%H:%M");

    let yesterday = now.clone() - Duration::days(1);

    if day(&local) == day(&now) {
        format!("today at {}", time)
    } else if day(&local) == day(&yesterday) {
        format!("yesterday at {}", time)
    } else {
        format!("{} at {}", day(&local), time)
    }
}
