use super::domain::AnswerValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Answers keyed by question id. Only the navigator writes to a live record;
/// entries are never removed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerRecord {
    entries: BTreeMap<String, AnswerValue>,
}

impl AnswerRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, question_id: &str) -> Option<&AnswerValue> {
        self.entries.get(question_id)
    }

    pub fn contains(&self, question_id: &str) -> bool {
        self.entries.contains_key(question_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AnswerValue)> + '_ {
        self.entries
            .iter()
            .map(|(question_id, value)| (question_id.as_str(), value))
    }

    pub(crate) fn record(&mut self, question_id: &str, value: AnswerValue) {
        self.entries.insert(question_id.to_string(), value);
    }
}

impl<K: Into<String>> FromIterator<(K, AnswerValue)> for AnswerRecord {
    fn from_iter<I: IntoIterator<Item = (K, AnswerValue)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(question_id, value)| (question_id.into(), value))
                .collect(),
        }
    }
}
