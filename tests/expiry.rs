#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime, TimeDelta, Timelike};
    use taskbell::libs::error::ValidationError;
    use taskbell::libs::expiry::{is_expired, is_same_calendar_day, resolve_due_instant, to_24_hour, validate};
    use taskbell::libs::task::{Meridiem, TaskForm};

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap().and_hms_opt(14, 30, 20).unwrap()
    }

    fn form(hour: u32, minute: u32, meridiem: &str, day: u32) -> TaskForm {
        TaskForm {
            title: "Stand-up".to_string(),
            hour,
            minute,
            day,
            month: "October".to_string(),
            year: 2026,
            meridiem: meridiem.to_string(),
        }
    }

    #[test]
    fn test_every_twelve_hour_value_maps_to_one_24_hour_value() {
        let mut seen = Vec::new();
        for meridiem in [Meridiem::Am, Meridiem::Pm] {
            for hour in 1..=12 {
                seen.push(to_24_hour(hour, meridiem));
            }
        }
        seen.sort_unstable();
        assert_eq!(seen, (0..24).collect::<Vec<_>>());
    }

    #[test]
    fn test_resolved_instant_round_trips_through_the_clock() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        for hour in 1..=12 {
            let due = resolve_due_instant(date, hour, 0, Meridiem::Pm);
            let (is_pm, hour12) = due.hour12();
            assert!(is_pm);
            assert_eq!(hour12, hour);
        }
    }

    #[test]
    fn test_expiry_classes() {
        let now = now();
        assert!(is_expired(now - TimeDelta::days(1), now), "yesterday");
        assert!(is_expired(now - TimeDelta::minutes(1), now), "earlier minute today");
        assert!(!is_expired(now.with_second(0).unwrap(), now), "current minute");
        assert!(!is_expired(now + TimeDelta::minutes(1), now), "next minute");
        assert!(!is_expired(now + TimeDelta::days(365), now), "next year");
    }

    #[test]
    fn test_same_day_is_independent_of_expiry() {
        let now = now();
        let earlier = now - TimeDelta::hours(3);
        assert!(is_same_calendar_day(earlier, now));
        assert!(is_expired(earlier, now));
    }

    #[test]
    fn test_validate_accepts_current_minute_and_rejects_the_previous_one() {
        assert!(validate(form(2, 30, "PM", 16), now()).is_ok());
        assert!(matches!(validate(form(2, 29, "PM", 16), now()), Err(ValidationError::Expired(_))));
    }

    #[test]
    fn test_validate_reports_shape_errors_before_expiry() {
        let mut bad = form(2, 30, "PM", 1);
        bad.title = String::new();
        assert_eq!(validate(bad, now()), Err(ValidationError::EmptyTitle));

        assert_eq!(
            validate(form(2, 30, "XM", 16), now()),
            Err(ValidationError::UnknownMeridiem("XM".to_string()))
        );
    }
}
