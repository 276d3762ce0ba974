//! Patient intake (and the safety-plan documents generated from it).

use std::collections::BTreeMap;

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

pub const SYMPTOMS: &[&str] = &[
    "depressedMood",
    "littlePleasureInterest",
    "lowEnergyMotivation",
    "lowOrIncreasedAppetite",
    "changeInSleep",
    "suicidalThoughts",
    "feelingGuiltyBad",
    "troubleConcentrating",
    "elevatedEuphoricMood",
    "severeIrritability",
    "impulsivityOutOfCharacter",
    "talkingTooFast",
    "constantWorrying",
    "muscleTension",
    "fatigueFromWorrying",
    "troubleSleepingDueToWorry",
    "unableToControlWorrying",
    "worryingAboutJudgment",
    "avoidingSocialSituations",
    "avoidingPanicAttackTriggers",
    "historyOfTrauma",
    "recurrentUnwantedThoughts",
    "flashbacks",
    "nightmares",
    "compulsiveBehaviors",
    "avoidingTraumaTriggers",
    "fearfulOnEdge",
    "hearingSeeingThings",
    "difficultyTrusting",
    "paranoia",
];

pub const PAST_MENTAL_HEALTH: &[&str] = &[
    "suicideAttempt",
    "therapyCounselingCurrent",
    "therapyCounselingPast",
    "substanceUseTreatmentResidential",
    "substanceUseTreatmentOutpatient",
];

pub const SUBSTANCES: &[&str] = &[
    "alcohol",
    "cannabis",
    "painPills",
    "heroinFentanyl",
    "methamphetamine",
    "prescriptionMisuse",
    "cocaine",
];

pub const MEDICAL_HISTORY: &[&str] = &[
    "thyroid",
    "htn",
    "dyslipemia",
    "diabetes",
    "copdAsthma",
    "drugAllergies",
];

pub const FAMILY_MENTAL_HEALTH: &[&str] = &[
    "depression",
    "bipolarDisorder",
    "anxiety",
    "schizophrenia",
    "substanceUse",
];

pub const SOCIAL_SITUATION: &[&str] = &["livingSituation", "maritalStatus", "children", "employment"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubstanceHistory {
    pub current: bool,
    pub past: bool,
}

/// The intake questionnaire.
///
/// Checklists are keyed by the camelCase item names above, matching the
/// backend's JSON. Unknown keys from the backend are preserved.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntakeForm {
    #[serde(with = "crate::dates::lenient")]
    pub contact_date: Date,
    #[serde(default)]
    pub symptoms: BTreeMap<String, bool>,
    #[serde(default)]
    pub columbia_suicide_severity: String,
    #[serde(default)]
    pub anxiety_panic_attacks: String,
    #[serde(default)]
    pub past_mental_health: BTreeMap<String, bool>,
    #[serde(default)]
    pub psychiatric_hospitalizations: String,
    #[serde(default)]
    pub substance_use: BTreeMap<String, SubstanceHistory>,
    #[serde(default)]
    pub medical_history: BTreeMap<String, bool>,
    #[serde(default)]
    pub other_medical_history: String,
    #[serde(default)]
    pub family_mental_health: BTreeMap<String, bool>,
    #[serde(default)]
    pub social_situation: BTreeMap<String, String>,
    #[serde(default)]
    pub current_medications: String,
    #[serde(default)]
    pub past_medications: String,
    #[serde(default)]
    pub narrative: String,
    #[serde(default)]
    pub safety_plan_discussed: bool,
    #[serde(default)]
    pub minutes: u32,
}

impl IntakeForm {
    /// An empty form with every known checklist item present and unchecked.
    pub fn blank(contact_date: Date) -> Self {
        fn unchecked(keys: &[&str]) -> BTreeMap<String, bool> {
            keys.iter().map(|k| (k.to_string(), false)).collect()
        }

        Self {
            contact_date,
            symptoms: unchecked(SYMPTOMS),
            columbia_suicide_severity: String::new(),
            anxiety_panic_attacks: String::new(),
            past_mental_health: unchecked(PAST_MENTAL_HEALTH),
            psychiatric_hospitalizations: String::new(),
            substance_use: SUBSTANCES
                .iter()
                .map(|k| (k.to_string(), SubstanceHistory::default()))
                .collect(),
            medical_history: unchecked(MEDICAL_HISTORY),
            other_medical_history: String::new(),
            family_mental_health: unchecked(FAMILY_MENTAL_HEALTH),
            social_situation: SOCIAL_SITUATION
                .iter()
                .map(|k| (k.to_string(), String::new()))
                .collect(),
            current_medications: String::new(),
            past_medications: String::new(),
            narrative: String::new(),
            safety_plan_discussed: false,
            minutes: 0,
        }
    }

    /// Labels of the checked symptoms, in key order.
    pub fn checked_symptoms(&self) -> Vec<String> {
        checked_labels(&self.symptoms)
    }

    /// Substance-use lines such as `Alcohol: Current, Past`. Substances with
    /// neither flag are omitted.
    pub fn substance_summary(&self) -> Vec<String> {
        self.substance_use
            .iter()
            .filter(|(_, h)| h.current || h.past)
            .map(|(key, h)| {
                let when = match (h.current, h.past) {
                    (true, true) => "Current, Past",
                    (true, false) => "Current",
                    _ => "Past",
                };
                format!("{}: {when}", format_label(key))
            })
            .collect()
    }
}

/// Body of `POST /api/patient-intake`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntakeSubmission {
    pub patient_id: i64,
    pub created_by: i64,
    #[serde(flatten)]
    pub form: IntakeForm,
}

/// Labels for every checked entry of a checklist.
pub fn checked_labels(items: &BTreeMap<String, bool>) -> Vec<String> {
    items
        .iter()
        .filter(|(_, checked)| **checked)
        .map(|(key, _)| format_label(key))
        .collect()
}

/// Turn a camelCase checklist key into a display label.
pub fn format_label(key: &str) -> String {
    match key {
        "htn" => return "HTN".to_string(),
        "copdAsthma" => return "COPD/Asthma".to_string(),
        _ => {}
    }

    let mut label = String::with_capacity(key.len() + 4);
    for (i, ch) in key.chars().enumerate() {
        if i == 0 {
            label.extend(ch.to_uppercase());
        } else if ch.is_uppercase() {
            label.push(' ');
            label.push(ch);
        } else {
            label.push(ch);
        }
    }
    label
}
