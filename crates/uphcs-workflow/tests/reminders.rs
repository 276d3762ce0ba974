use jiff::ToSpan;
use jiff::civil::{Date, date};
use proptest::prelude::*;
use uphcs_core::models::reminder::Reminder;
use uphcs_workflow::reminders::{ReminderStatus, ReminderTab, classify, counts, filter};

fn reminder(id: i64, due: Date) -> Reminder {
    Reminder {
        id,
        patient_id: 42,
        reminder_type: "Follow-up Assessment".to_string(),
        reminder_date: due,
        description: "Schedule PHQ-9".to_string(),
        status: "pending".to_string(),
        first_name: "Dana".to_string(),
        last_name: "Reyes".to_string(),
        mrn: "MRN-0042".to_string(),
        clinic_name: None,
    }
}

#[test]
fn classify_around_today() {
    let today = date(2024, 3, 15);
    assert_eq!(classify(today, today), ReminderStatus::DueToday);
    assert_eq!(classify(date(2024, 3, 14), today), ReminderStatus::Overdue);
    assert_eq!(classify(date(2024, 3, 16), today), ReminderStatus::Upcoming);
    assert_eq!(classify(date(2023, 12, 31), date(2024, 1, 1)), ReminderStatus::Overdue);
}

#[test]
fn tabs_filter_by_badge() {
    let today = date(2024, 3, 15);
    let list = vec![
        reminder(1, date(2024, 3, 1)),
        reminder(2, today),
        reminder(3, date(2024, 4, 1)),
        reminder(4, date(2024, 3, 10)),
    ];

    let overdue: Vec<i64> = filter(&list, "overdue".parse().unwrap(), today)
        .iter()
        .map(|(r, _)| r.id)
        .collect();
    assert_eq!(overdue, vec![1, 4]);
    assert_eq!(filter(&list, ReminderTab::All, today).len(), 4);
    assert_eq!(filter(&list, "today".parse().unwrap(), today)[0].1, ReminderStatus::DueToday);

    let c = counts(&list, today);
    assert_eq!((c.overdue, c.today, c.upcoming), (2, 1, 1));
}

#[test]
fn unknown_tab_is_rejected() {
    assert!("later".parse::<ReminderTab>().is_err());
    assert_eq!("ALL".parse::<ReminderTab>().unwrap(), ReminderTab::All);
}

proptest! {
    #[test]
    fn one_day_either_side(offset in -20_000i32..20_000) {
        let today = date(2000, 1, 1).checked_add(offset.days()).unwrap();
        prop_assert_eq!(classify(today, today), ReminderStatus::DueToday);
        prop_assert_eq!(classify(today.yesterday().unwrap(), today), ReminderStatus::Overdue);
        prop_assert_eq!(classify(today.tomorrow().unwrap(), today), ReminderStatus::Upcoming);
    }
}
