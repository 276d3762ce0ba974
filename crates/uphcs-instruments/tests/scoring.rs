use proptest::prelude::*;
use uphcs_core::models::assessment::Measure;
use uphcs_instruments::error::InstrumentError;
use uphcs_instruments::scoring::{Severity, ValidationError};
use uphcs_instruments::{all_instruments, describe, for_measure, get_instrument};

#[test]
fn registry_lists_both_instruments() {
    let ids: Vec<String> = all_instruments().iter().map(|i| i.id().to_string()).collect();
    assert_eq!(ids, vec!["phq9", "gad7"]);
    assert!(get_instrument("gad7").is_some());
    assert!(get_instrument("vineland3").is_none());
}

#[test]
fn item_counts_and_maximums() {
    let phq9 = for_measure(Measure::Phq9);
    let gad7 = for_measure(Measure::Gad7);
    assert_eq!(phq9.items().len(), 9);
    assert_eq!(gad7.items().len(), 7);
    assert_eq!(phq9.max_score(), 27);
    assert_eq!(gad7.max_score(), 21);
    assert_eq!(phq9.items()[0].id, "phq9_1");
    assert_eq!(gad7.items()[6].prompt, "Feeling afraid as if something awful might happen");
}

#[test]
fn phq9_band_boundaries() {
    let phq9 = for_measure(Measure::Phq9);
    let cases = [
        (0, Severity::Minimal),
        (4, Severity::Minimal),
        (5, Severity::Mild),
        (9, Severity::Mild),
        (10, Severity::Moderate),
        (14, Severity::Moderate),
        (15, Severity::ModeratelySevere),
        (19, Severity::ModeratelySevere),
        (20, Severity::Severe),
        (27, Severity::Severe),
    ];
    for (score, expected) in cases {
        assert_eq!(phq9.severity(score).unwrap(), expected, "score {score}");
    }
}

#[test]
fn gad7_band_boundaries() {
    let gad7 = for_measure(Measure::Gad7);
    let cases = [
        (4, Severity::Minimal),
        (5, Severity::Mild),
        (9, Severity::Mild),
        (10, Severity::Moderate),
        (14, Severity::Moderate),
        (15, Severity::Severe),
        (21, Severity::Severe),
    ];
    for (score, expected) in cases {
        assert_eq!(gad7.severity(score).unwrap(), expected, "score {score}");
    }
}

#[test]
fn severity_above_max_is_rejected() {
    let err = for_measure(Measure::Gad7).severity(22).unwrap_err();
    assert!(matches!(
        err,
        InstrumentError::ScoreOutOfRange { score: 22, max: 21, .. }
    ));
    assert!(for_measure(Measure::Phq9).severity(28).is_err());
}

#[test]
fn wrong_length_is_reported() {
    let errors = for_measure(Measure::Phq9).validate_answers(&[1, 1, 1]);
    assert_eq!(
        errors,
        vec![ValidationError::WrongLength {
            instrument: "PHQ-9".to_string(),
            expected: 9,
            actual: 3,
        }]
    );
}

#[test]
fn each_out_of_range_item_is_reported() {
    let errors = for_measure(Measure::Gad7).validate_answers(&[0, 4, 1, 1, 9, 0, 0]);
    let items: Vec<usize> = errors
        .iter()
        .filter_map(|e| match e {
            ValidationError::OutOfRange { item, .. } => Some(*item),
            _ => None,
        })
        .collect();
    assert_eq!(items, vec![2, 5]);
    assert!(errors[0].to_string().contains("outside range [0, 3]"));
}

#[test]
fn score_refuses_invalid_answers() {
    let err = for_measure(Measure::Phq9).score(&[3; 8]).unwrap_err();
    assert!(matches!(err, InstrumentError::Validation(ValidationError::WrongLength { .. })));
}

#[test]
fn describe_formats_score_and_band() {
    assert_eq!(describe(Measure::Phq9, Some(12)), "12/27, Moderate");
    assert_eq!(describe(Measure::Gad7, Some(15)), "15/21, Severe");
    assert_eq!(describe(Measure::Phq9, None), "N/A");
    assert_eq!(describe(Measure::Gad7, Some(30)), "30/21");
}

#[test]
fn severity_serializes_snake_case() {
    let json = serde_json::to_string(&Severity::ModeratelySevere).unwrap();
    assert_eq!(json, "\"moderately_severe\"");
    assert_eq!(Severity::ModeratelySevere.to_string(), "Moderately Severe");
}

fn expected_phq9(score: u8) -> Severity {
    match score {
        0..=4 => Severity::Minimal,
        5..=9 => Severity::Mild,
        10..=14 => Severity::Moderate,
        15..=19 => Severity::ModeratelySevere,
        _ => Severity::Severe,
    }
}

fn expected_gad7(score: u8) -> Severity {
    match score {
        0..=4 => Severity::Minimal,
        5..=9 => Severity::Mild,
        10..=14 => Severity::Moderate,
        _ => Severity::Severe,
    }
}

proptest! {
    #[test]
    fn phq9_score_is_sum_and_band_matches(answers in prop::collection::vec(0u8..=3, 9)) {
        let phq9 = for_measure(Measure::Phq9);
        let score = phq9.score(&answers).unwrap();
        prop_assert_eq!(u32::from(score), answers.iter().map(|&a| u32::from(a)).sum::<u32>());
        prop_assert_eq!(phq9.severity(score).unwrap(), expected_phq9(score));
    }

    #[test]
    fn gad7_score_is_sum_and_band_matches(answers in prop::collection::vec(0u8..=3, 7)) {
        let gad7 = for_measure(Measure::Gad7);
        let score = gad7.score(&answers).unwrap();
        prop_assert_eq!(u32::from(score), answers.iter().map(|&a| u32::from(a)).sum::<u32>());
        prop_assert_eq!(gad7.severity(score).unwrap(), expected_gad7(score));
    }

    #[test]
    fn any_item_above_three_fails_validation(
        mut answers in prop::collection::vec(0u8..=3, 9),
        idx in 0usize..9,
        bad in 4u8..=u8::MAX,
    ) {
        answers[idx] = bad;
        let errors = for_measure(Measure::Phq9).validate_answers(&answers);
        prop_assert_eq!(errors.len(), 1);
        let is_expected = matches!(
            &errors[0],
            ValidationError::OutOfRange { item, value, .. } if *item == idx + 1 && *value == bad
        );
        prop_assert!(is_expected);
    }
}
