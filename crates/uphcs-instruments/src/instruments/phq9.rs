use uphcs_core::models::assessment::Measure;

use crate::Instrument;
use crate::scoring::{Band, Item, Severity};

/// PHQ-9: Patient Health Questionnaire, depression module.
/// 9 items rated 0-3 over the last two weeks. Total 0-27.
pub struct Phq9;

const BANDS: [Band; 5] = [
    Band::new(0, 4, Severity::Minimal),
    Band::new(5, 9, Severity::Mild),
    Band::new(10, 14, Severity::Moderate),
    Band::new(15, 19, Severity::ModeratelySevere),
    Band::new(20, 27, Severity::Severe),
];

impl Instrument for Phq9 {
    fn id(&self) -> &str {
        "phq9"
    }

    fn name(&self) -> &str {
        "PHQ-9"
    }

    fn measure(&self) -> Measure {
        Measure::Phq9
    }

    fn items(&self) -> &[Item] {
        static ITEMS: std::sync::LazyLock<Vec<Item>> = std::sync::LazyLock::new(|| {
            super::items(
                "phq9",
                &[
                    "Little interest or pleasure in doing things",
                    "Feeling down, depressed, or hopeless",
                    "Trouble falling or staying asleep, or sleeping too much",
                    "Feeling tired or having little energy",
                    "Poor appetite or overeating",
                    "Feeling bad about yourself - or that you are a failure or have let yourself or your family down",
                    "Trouble concentrating on things, such as reading the newspaper or watching television",
                    "Moving or speaking so slowly that other people could have noticed. Or the opposite - being so fidgety or restless that you have been moving around a lot more than usual",
                    "Thoughts that you would be better off dead, or of hurting yourself in some way",
                ],
            )
        });
        &ITEMS
    }

    fn bands(&self) -> &[Band] {
        &BANDS
    }
}
