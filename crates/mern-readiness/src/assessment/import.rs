use super::answers::AnswerRecord;
use super::catalog::BatteryCatalog;
use super::domain::{AnswerKind, AnswerRejection, AnswerValue, AssessmentError};
use super::navigator::BatterySession;
use serde::{Deserialize, Deserializer};
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum AnswerImportError {
    #[error("failed to read answer sheet: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid answer sheet CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("could not apply answer sheet: {0}")]
    Assessment(#[from] AssessmentError),
}

/// Loads a respondent's answers for one battery from a two-column CSV sheet
/// (`Question ID`, `Answer`).
pub struct AnswerSheetImporter;

impl AnswerSheetImporter {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        catalog: Arc<BatteryCatalog>,
    ) -> Result<BatterySession, AnswerImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, catalog)
    }

    pub fn from_reader<R: Read>(
        reader: R,
        catalog: Arc<BatteryCatalog>,
    ) -> Result<BatterySession, AnswerImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut entries = Vec::new();

        for row in csv_reader.deserialize::<AnswerRow>() {
            let row = row?;
            let Some(raw) = row.answer else {
                continue;
            };
            let value = convert_answer(&catalog, &row.question_id, raw)?;
            entries.push((row.question_id, value));
        }

        let answers: AnswerRecord = entries.into_iter().collect();
        Ok(BatterySession::resume(catalog, answers)?)
    }
}

#[derive(Debug, Deserialize)]
struct AnswerRow {
    #[serde(rename = "Question ID")]
    question_id: String,
    #[serde(rename = "Answer", default, deserialize_with = "empty_string_as_none")]
    answer: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn convert_answer(
    catalog: &BatteryCatalog,
    question_id: &str,
    raw: String,
) -> Result<AnswerValue, AssessmentError> {
    let item = catalog.item(question_id).ok_or_else(|| {
        AssessmentError::invalid_answer(question_id, AnswerRejection::UnknownQuestion)
    })?;

    match item.format.answer_kind() {
        AnswerKind::SingleChoice => Ok(AnswerValue::Choice(raw)),
        AnswerKind::BoundedScale | AnswerKind::Slider => {
            raw.trim().parse::<i64>().map(AnswerValue::Number).map_err(|_| {
                AssessmentError::invalid_answer(
                    question_id,
                    AnswerRejection::KindMismatch { expected: "number" },
                )
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::domain::BatteryKind;
    use std::io::Cursor;

    fn readiness_catalog() -> Arc<BatteryCatalog> {
        Arc::new(BatteryCatalog::standard(BatteryKind::Readiness).expect("standard catalog"))
    }

    #[test]
    fn converts_numeric_cells_for_sliders() {
        let sheet = "Question ID,Answer\nwill_1, 20 \nwill_2,Keep working systematically until solved\n";
        let session = AnswerSheetImporter::from_reader(Cursor::new(sheet), readiness_catalog())
            .expect("sheet imports");

        assert_eq!(session.position(), 2);
        assert_eq!(
            session.answers().get("will_1"),
            Some(&AnswerValue::Number(20))
        );
    }

    #[test]
    fn rejects_non_numeric_slider_cell() {
        let sheet = "Question ID,Answer\nwill_1,twenty\n";
        let err = AnswerSheetImporter::from_reader(Cursor::new(sheet), readiness_catalog())
            .expect_err("non numeric rejected");

        match err {
            AnswerImportError::Assessment(AssessmentError::InvalidAnswer {
                question_id,
                rejection: AnswerRejection::KindMismatch { .. },
            }) => assert_eq!(question_id, "will_1"),
            other => panic!("expected kind mismatch, got {other:?}"),
        }
    }

    #[test]
    fn blank_answers_are_skipped() {
        let sheet = "Question ID,Answer\nwill_1,12\nwill_2,\n";
        let session = AnswerSheetImporter::from_reader(Cursor::new(sheet), readiness_catalog())
            .expect("sheet imports");

        assert_eq!(session.position(), 1);
        assert_eq!(session.current_item().expect("open question").id, "will_2");
    }
}
