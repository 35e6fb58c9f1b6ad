use std::sync::Arc;

use mern_readiness::assessment::{
    aggregate, AnswerImportError, AnswerRejection, AnswerSheetImporter, AssessmentError,
    BatteryCatalog, BatteryKind, Recommendation, ScoringEngine,
};

fn catalog(battery: BatteryKind) -> Arc<BatteryCatalog> {
    Arc::new(BatteryCatalog::standard(battery).expect("standard catalog"))
}

#[test]
fn sample_sheets_score_into_a_report() {
    let sheets: [(BatteryKind, &[u8]); 3] = [
        (
            BatteryKind::Psychometric,
            include_bytes!("../fixtures/psychometric_answers.csv"),
        ),
        (
            BatteryKind::Technical,
            include_bytes!("../fixtures/technical_answers.csv"),
        ),
        (
            BatteryKind::Readiness,
            include_bytes!("../fixtures/readiness_answers.csv"),
        ),
    ];

    let mut results = Vec::new();
    for (battery, data) in sheets {
        let catalog = catalog(battery);
        let session = AnswerSheetImporter::from_reader(data, Arc::clone(&catalog))
            .expect("sheet imports");
        assert!(session.is_complete(), "{} sheet is complete", battery.key());

        let answers = session.into_answers().expect("answers available");
        results.push(
            ScoringEngine::new(catalog)
                .score(&answers)
                .expect("battery scores"),
        );
    }

    let readiness = results.pop().expect("readiness result");
    let technical = results.pop().expect("technical result");
    let psychometric = results.pop().expect("psychometric result");
    assert_eq!(technical.overall, 78);

    let report = aggregate(psychometric, technical, readiness).expect("report aggregates");
    assert_eq!(report.overall, 68);
    assert_eq!(report.recommendation, Recommendation::Maybe);
}

#[test]
fn partial_sheet_resumes_mid_battery() {
    let csv = "Question ID,Answer\n\
logic_1,\"\"\"532\"\"\"\n\
logic_2,Stack\n\
logic_3,\n\
js_1,\"let has block scope, var has function scope\"\n";

    let session = AnswerSheetImporter::from_reader(csv.as_bytes(), catalog(BatteryKind::Technical))
        .expect("sheet imports");

    assert_eq!(session.position(), 2);
    assert!(!session.is_complete());
    assert_eq!(session.current_item().expect("open question").id, "logic_3");
    assert_eq!(session.progress().question_number, 3);
}

#[test]
fn unknown_question_is_rejected() {
    let csv = "Question ID,Answer\nriasec_1,4\nhobby_1,Chess\n";

    let err = AnswerSheetImporter::from_reader(csv.as_bytes(), catalog(BatteryKind::Psychometric))
        .expect_err("hobby_1 is not in the catalog");

    match err {
        AnswerImportError::Assessment(AssessmentError::InvalidAnswer {
            question_id,
            rejection: AnswerRejection::UnknownQuestion,
        }) => assert_eq!(question_id, "hobby_1"),
        other => panic!("expected unknown question, got {other:?}"),
    }
}

#[test]
fn out_of_range_cell_is_rejected() {
    let csv = "Question ID,Answer\nriasec_1,9\n";

    let err = AnswerSheetImporter::from_reader(csv.as_bytes(), catalog(BatteryKind::Psychometric))
        .expect_err("nine exceeds the scale");

    assert!(matches!(
        err,
        AnswerImportError::Assessment(AssessmentError::InvalidAnswer {
            rejection: AnswerRejection::OutOfRange { value: 9, .. },
            ..
        })
    ));
}

#[test]
fn missing_file_is_an_io_error() {
    let err = AnswerSheetImporter::from_path(
        "fixtures/does_not_exist.csv",
        catalog(BatteryKind::Readiness),
    )
    .expect_err("file is missing");

    assert!(matches!(err, AnswerImportError::Io(_)));
}
