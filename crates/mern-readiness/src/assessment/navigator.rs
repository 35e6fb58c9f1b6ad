use super::answers::AnswerRecord;
use super::catalog::{BatteryCatalog, QuestionGroup, QuestionView};
use super::domain::{AnswerRejection, AnswerValue, AssessmentError, BatteryKind, QuestionItem};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

/// "Question N of M" indicator for the active battery.
#[derive(Debug, Clone, Serialize)]
pub struct ProgressView {
    pub battery: BatteryKind,
    pub battery_label: &'static str,
    pub question_number: usize,
    pub total_questions: usize,
    pub percent_complete: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_label: Option<&'static str>,
    pub complete: bool,
}

/// Cursor plus collected answers for one battery traversal.
#[derive(Debug, Clone)]
pub struct BatterySession {
    catalog: Arc<BatteryCatalog>,
    cursor: usize,
    answers: AnswerRecord,
}

impl BatterySession {
    pub fn new(catalog: Arc<BatteryCatalog>) -> Self {
        Self {
            catalog,
            cursor: 0,
            answers: AnswerRecord::new(),
        }
    }

    /// Rebuilds a session from previously collected answers, replaying them in
    /// catalog order up to the first unanswered question.
    pub fn resume(
        catalog: Arc<BatteryCatalog>,
        answers: AnswerRecord,
    ) -> Result<Self, AssessmentError> {
        if let Some((question_id, _)) = answers
            .iter()
            .find(|(question_id, _)| catalog.item(question_id).is_none())
        {
            return Err(AssessmentError::invalid_answer(
                question_id,
                AnswerRejection::UnknownQuestion,
            ));
        }

        let mut session = Self::new(catalog);
        while !session.is_complete() {
            let question_id = session.current_item()?.id;
            match answers.get(question_id) {
                Some(value) => session.submit_answer(value.clone())?,
                None => break,
            }
        }

        let discarded = answers.len().saturating_sub(session.answers.len());
        if discarded > 0 {
            warn!(
                battery = session.battery().key(),
                discarded, "answers after the first unanswered question were discarded"
            );
        }

        Ok(session)
    }

    pub fn battery(&self) -> BatteryKind {
        self.catalog.battery()
    }

    pub fn catalog(&self) -> &Arc<BatteryCatalog> {
        &self.catalog
    }

    pub fn current_item(&self) -> Result<&QuestionItem, AssessmentError> {
        self.current_entry().map(|(_, item)| item)
    }

    pub fn current_group(&self) -> Result<&QuestionGroup, AssessmentError> {
        self.current_entry().map(|(group, _)| group)
    }

    pub fn current_view(&self) -> Result<QuestionView, AssessmentError> {
        self.current_entry().map(|(group, item)| item.to_view(group))
    }

    fn current_entry(&self) -> Result<(&QuestionGroup, &QuestionItem), AssessmentError> {
        self.catalog.entry(self.cursor).ok_or_else(|| {
            AssessmentError::OutOfSequence(format!(
                "{} battery is already complete",
                self.battery().key()
            ))
        })
    }

    /// Records the answer for the current question and moves to the next one.
    /// A rejected value leaves the session untouched.
    pub fn submit_answer(&mut self, value: AnswerValue) -> Result<(), AssessmentError> {
        let item = self.current_item()?;
        let question_id = item.id;

        if let Err(rejection) = item.validate(&value) {
            warn!(question_id, %rejection, "answer rejected");
            return Err(AssessmentError::invalid_answer(question_id, rejection));
        }

        debug!(question_id, answer = %value, "answer recorded");
        self.answers.record(question_id, value);
        self.cursor += 1;
        Ok(())
    }

    pub fn is_complete(&self) -> bool {
        self.cursor >= self.catalog.len()
    }

    /// True when the current question already holds an answer.
    pub fn can_proceed(&self) -> bool {
        self.current_item()
            .map(|item| self.answers.contains(item.id))
            .unwrap_or(false)
    }

    pub fn position(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.catalog.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalog.is_empty()
    }

    pub fn answers(&self) -> &AnswerRecord {
        &self.answers
    }

    pub fn progress(&self) -> ProgressView {
        let total = self.catalog.len();
        let complete = self.is_complete();
        let question_number = if complete { total } else { self.cursor + 1 };
        let percent_complete = if complete || total == 0 {
            100
        } else {
            ((question_number as f64 / total as f64) * 100.0).round() as u8
        };

        ProgressView {
            battery: self.battery(),
            battery_label: self.battery().label(),
            question_number,
            total_questions: total,
            percent_complete,
            group_label: self.current_group().ok().map(|group| group.label),
            complete,
        }
    }

    /// Hands off the collected answers once every question has been answered.
    pub fn into_answers(self) -> Result<AnswerRecord, AssessmentError> {
        if !self.is_complete() {
            return Err(AssessmentError::OutOfSequence(format!(
                "{} battery stopped at question {} of {}",
                self.battery().key(),
                self.cursor + 1,
                self.catalog.len()
            )));
        }
        Ok(self.answers)
    }
}
