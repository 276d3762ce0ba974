use jiff::civil::{Date, date};
use proptest::prelude::*;
use uphcs_core::models::patient::{ActivePatient, PatientStatus};
use uphcs_workflow::listing::{
    ACTIVE_PAGE_SIZE, ActiveColumn, Direction, ListQuery, SortKey, SortState, compare, page_count,
    paginate,
};

fn row(id: i64, first: &str, last: &str, mrn: &str, phq9_last: Option<u8>) -> ActivePatient {
    ActivePatient {
        id,
        mrn: mrn.to_string(),
        first_name: first.to_string(),
        last_name: last.to_string(),
        status: PatientStatus::Active,
        phq9_first: None,
        phq9_last,
        gad7_first: None,
        gad7_last: None,
        initial_assessment_date: None,
        last_follow_up_date: None,
        last_psychiatric_consult_date: None,
        last_relapse_plan_date: None,
        total_contacts: None,
        weeks_since_initial_assessment: None,
        minutes_this_month: None,
    }
}

fn sample() -> Vec<ActivePatient> {
    vec![
        row(101, "Dana", "Reyes", "MRN-0042", Some(12)),
        row(205, "Ali", "Khan", "MRN-1001", None),
        row(310, "Maria", "Lopez", "mrn-7777", Some(3)),
        row(412, "Sam", "Delacroix", "MRN-0420", Some(20)),
    ]
}

fn ids(query: &ListQuery<ActiveColumn>, rows: &[ActivePatient]) -> Vec<i64> {
    query.apply(rows).rows.iter().map(|r| r.id).collect()
}

#[test]
fn search_matches_names_and_mrn_case_insensitively() {
    let rows = sample();
    let mut q = ListQuery::new(ACTIVE_PAGE_SIZE);
    q.search = "REY".to_string();
    assert_eq!(ids(&q, &rows), vec![101]);
    q.search = "MRN-7".to_string();
    assert_eq!(ids(&q, &rows), vec![310]);
    q.search = String::new();
    assert_eq!(ids(&q, &rows).len(), 4);
}

#[test]
fn whitespace_query_is_not_trimmed() {
    let rows = sample();
    let mut q = ListQuery::new(ACTIVE_PAGE_SIZE);
    q.search = "  ".to_string();
    assert!(ids(&q, &rows).is_empty());
    q.search = " rey".to_string();
    assert!(ids(&q, &rows).is_empty());
}

#[test]
fn search_matches_id_substring() {
    let rows = sample();
    let mut q = ListQuery::new(ACTIVE_PAGE_SIZE);
    q.search = "20".to_string();
    // 205 by id, 412 via "MRN-0420".
    assert_eq!(ids(&q, &rows), vec![205, 412]);
}

#[test]
fn sort_by_text_and_toggle_direction() {
    let rows = sample();
    let mut q = ListQuery::new(ACTIVE_PAGE_SIZE);
    let sort = SortState::new(ActiveColumn::LastName);
    q.sort = Some(sort);
    assert_eq!(ids(&q, &rows), vec![412, 205, 310, 101]);

    q.sort = Some(sort.select(ActiveColumn::LastName));
    assert_eq!(q.sort.unwrap().direction, Direction::Descending);
    assert_eq!(ids(&q, &rows), vec![101, 310, 205, 412]);

    let switched = q.sort.unwrap().select(ActiveColumn::Mrn);
    assert_eq!(switched, SortState::new(ActiveColumn::Mrn));
}

#[test]
fn missing_values_sort_last_in_both_directions() {
    let rows = sample();
    let mut q = ListQuery::new(ACTIVE_PAGE_SIZE);
    q.sort = Some(SortState::new(ActiveColumn::Phq9Last));
    assert_eq!(ids(&q, &rows), vec![310, 101, 412, 205]);
    q.sort = Some(SortState {
        column: ActiveColumn::Phq9Last,
        direction: Direction::Descending,
    });
    assert_eq!(ids(&q, &rows), vec![412, 101, 310, 205]);
}

#[test]
fn pages_and_page_count() {
    let rows = sample();
    let mut q = ListQuery::new(3);
    let first = q.apply(&rows);
    assert_eq!(first.rows.len(), 3);
    assert_eq!(first.page_count, 2);
    assert_eq!(first.total, 4);

    q.page = 1;
    assert_eq!(ids(&q, &rows), vec![412]);
    q.page = 5;
    assert!(q.apply(&rows).rows.is_empty());
}

#[test]
fn paginate_edges() {
    let items = [1, 2, 3, 4, 5];
    assert_eq!(paginate(&items, 0, 2), &[1, 2]);
    assert_eq!(paginate(&items, 2, 2), &[5]);
    assert!(paginate(&items, 3, 2).is_empty());
    assert_eq!(page_count(0, 10), 0);
    assert_eq!(page_count(11, 10), 2);
    assert_eq!(page_count(10, 10), 1);
}

#[test]
fn column_names_parse() {
    assert_eq!("last-name".parse::<ActiveColumn>().unwrap(), ActiveColumn::LastName);
    assert_eq!("PHQ9-LAST".parse::<ActiveColumn>().unwrap(), ActiveColumn::Phq9Last);
    assert!("shoe-size".parse::<ActiveColumn>().is_err());
}

#[test]
fn compare_dates() {
    let a = SortKey::Date(date(2024, 1, 1));
    let b = SortKey::Date(date(2024, 6, 1));
    assert!(compare(a, b, Direction::Ascending).is_lt());
    assert!(compare(a, b, Direction::Descending).is_gt());
    assert!(compare(SortKey::Missing, a, Direction::Descending).is_gt());
}

fn arb_row() -> impl Strategy<Value = ActivePatient> {
    (
        1i64..1000,
        "[A-Za-z]{1,8}",
        "[A-Za-z]{1,8}",
        "MRN-[0-9]{4}",
        prop::option::of(0u8..=27),
        prop::option::of(0i32..1000),
    )
        .prop_map(|(id, first, last, mrn, phq9, days)| {
            let mut r = row(id, &first, &last, &mrn, phq9);
            r.last_follow_up_date = days.and_then(|d| Date::new(2023, 1, 1).ok()?.checked_add(jiff::Span::new().days(d)).ok());
            r
        })
}

fn arb_column() -> impl Strategy<Value = ActiveColumn> {
    prop::sample::select(ActiveColumn::ALL.to_vec())
}

proptest! {
    #[test]
    fn filter_sort_paginate_is_idempotent(
        rows in prop::collection::vec(arb_row(), 0..40),
        search in "[a-z0-9]{0,2}",
        column in arb_column(),
        descending in any::<bool>(),
        page in 0usize..5,
        per_page in 1usize..15,
    ) {
        let mut q = ListQuery::new(per_page);
        q.search = search;
        q.page = page;
        q.sort = Some(SortState {
            column,
            direction: if descending { Direction::Descending } else { Direction::Ascending },
        });

        let once: Vec<ActivePatient> = q.apply(&rows).rows.into_iter().cloned().collect();
        let twice = ids(&q, &rows);
        prop_assert_eq!(once.iter().map(|r| r.id).collect::<Vec<_>>(), twice);

        // Re-applying search and sort to an already processed page changes nothing.
        let mut again = q.clone();
        again.page = 0;
        again.per_page = once.len().max(1);
        prop_assert_eq!(ids(&again, &once), once.iter().map(|r| r.id).collect::<Vec<_>>());
    }

    #[test]
    fn pages_partition_the_matches(
        rows in prop::collection::vec(arb_row(), 0..40),
        per_page in 1usize..15,
    ) {
        let q = ListQuery::<ActiveColumn>::new(per_page);
        let count = q.apply(&rows).page_count;
        let mut seen = 0;
        for page in 0..count {
            let mut p = q.clone();
            p.page = page;
            seen += p.apply(&rows).rows.len();
        }
        prop_assert_eq!(seen, rows.len());
        let mut past = q.clone();
        past.page = count;
        prop_assert!(past.apply(&rows).rows.is_empty());
    }
}
