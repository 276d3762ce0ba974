pub mod gad7;
pub mod phq9;

use crate::scoring::Item;

pub(crate) fn items(prefix: &str, prompts: &[&str]) -> Vec<Item> {
    prompts
        .iter()
        .enumerate()
        .map(|(idx, prompt)| Item {
            id: format!("{prefix}_{}", idx + 1),
            prompt: prompt.to_string(),
        })
        .collect()
}
