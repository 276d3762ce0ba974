use uphcs_core::models::assessment::Measure;

use crate::Instrument;
use crate::scoring::{Band, Item, Severity};

/// GAD-7: Generalized Anxiety Disorder scale.
/// 7 items rated 0-3. Total 0-21, with no "moderately severe" band.
pub struct Gad7;

const BANDS: [Band; 4] = [
    Band::new(0, 4, Severity::Minimal),
    Band::new(5, 9, Severity::Mild),
    Band::new(10, 14, Severity::Moderate),
    Band::new(15, 21, Severity::Severe),
];

impl Instrument for Gad7 {
    fn id(&self) -> &str {
        "gad7"
    }

    fn name(&self) -> &str {
        "GAD-7"
    }

    fn measure(&self) -> Measure {
        Measure::Gad7
    }

    fn items(&self) -> &[Item] {
        static ITEMS: std::sync::LazyLock<Vec<Item>> = std::sync::LazyLock::new(|| {
            super::items(
                "gad7",
                &[
                    "Feeling nervous, anxious or on edge",
                    "Not being able to stop or control worrying",
                    "Worrying too much about different things",
                    "Trouble relaxing",
                    "Being so restless that it is hard to sit still",
                    "Becoming easily annoyed or irritable",
                    "Feeling afraid as if something awful might happen",
                ],
            )
        });
        &ITEMS
    }

    fn bands(&self) -> &[Band] {
        &BANDS
    }
}
