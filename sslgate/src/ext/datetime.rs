use chrono::{DateTime, Datelike, Duration, Utc, Weekday};

/// Calendar and wording helpers on [`DateTime<Utc>`].
pub trait DateTimeExt: Sized {
    /// Whether the instant lies inside the inclusive range.
    fn between(&self, range_beg: Self, range_end: Self) -> bool;

    /// Age in whole years as of now.
    fn age(&self) -> i32;

    /// Age in whole years as of `on`.
    fn age_at(&self, on: Self) -> i32;

    /// A readable sentence for how long ago this instant was, e.g.
    /// "one second ago" or "2 months ago".
    fn to_readable_time(&self) -> String;

    /// Same as [`to_readable_time`](Self::to_readable_time), measured
    /// against an explicit `now`.
    fn to_readable_time_at(&self, now: Self) -> String;

    fn is_working_day(&self) -> bool;

    fn is_weekend(&self) -> bool;

    /// The next upcoming workday; a workday yields itself.
    fn next_workday(&self) -> Self;

    /// The next date falling on `weekday`, always strictly in the future.
    fn next_weekday(&self, weekday: Weekday) -> Self;
}

impl DateTimeExt for DateTime<Utc> {
    fn between(&self, range_beg: Self, range_end: Self) -> bool {
        *self >= range_beg && *self <= range_end
    }

    fn age(&self) -> i32 {
        self.age_at(Utc::now())
    }

    fn age_at(&self, on: Self) -> i32 {
        let mut age = on.year() - self.year();
        if on < add_years(*self, age) {
            age -= 1;
        }

        age
    }

    fn to_readable_time(&self) -> String {
        self.to_readable_time_at(Utc::now())
    }

    fn to_readable_time_at(&self, now: Self) -> String {
        let since = now.signed_duration_since(*self);
        let secs = since.num_seconds();

        if secs < 60 {
            return if secs == 1 {
                "one second ago".to_string()
            } else {
                format!("{} seconds ago", secs)
            };
        }
        if secs < 2 * 60 {
            return "a minute ago".to_string();
        }
        if secs < 45 * 60 {
            return format!("{} minutes ago", since.num_minutes());
        }
        if secs < 90 * 60 {
            return "an hour ago".to_string();
        }
        if secs < 24 * 60 * 60 {
            return format!("{} hours ago", since.num_hours());
        }
        if secs < 48 * 60 * 60 {
            return "yesterday".to_string();
        }
        if secs < 30 * 24 * 60 * 60 {
            return format!("{} days ago", since.num_days());
        }
        if secs < 12 * 30 * 24 * 60 * 60 {
            let months = since.num_days() / 30;
            return if months <= 1 {
                "one month ago".to_string()
            } else {
                format!("{} months ago", months)
            };
        }

        let years = since.num_days() / 365;
        if years <= 1 {
            "one year ago".to_string()
        } else {
            format!("{} years ago", years)
        }
    }

    fn is_working_day(&self) -> bool {
        !self.is_weekend()
    }

    fn is_weekend(&self) -> bool {
        matches!(self.weekday(), Weekday::Sat | Weekday::Sun)
    }

    fn next_workday(&self) -> Self {
        let mut day = *self;
        while day.is_weekend() {
            day = day + Duration::days(1);
        }

        day
    }

    fn next_weekday(&self, weekday: Weekday) -> Self {
        let offset = weekday.num_days_from_monday() as i64
            - self.weekday().num_days_from_monday() as i64;
        let offset = if offset <= 0 { offset + 7 } else { offset };

        *self + Duration::days(offset)
    }
}

fn add_years(date: DateTime<Utc>, years: i32) -> DateTime<Utc> {
    match date.with_year(date.year() + years) {
        Some(shifted) => shifted,
        // Feb 29 in a non-leap target year clamps to Feb 28.
        None => (date - Duration::days(1))
            .with_year(date.year() + years)
            .unwrap_or(date),
    }
}
