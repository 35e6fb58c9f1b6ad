use mern_readiness::assessment::{
    AnswerKind, AnswerValue, AssessmentError, AssessmentFlow, BatteryKind, CatalogSet, FlowStage,
    PathKind, Recommendation, ResponseFormat,
};

/// Answers each question with its strongest option: the top of a scale or
/// slider, the highest weighted scenario option, the correct quiz option.
fn best_answer(format: &ResponseFormat) -> AnswerValue {
    match format {
        ResponseFormat::Likert { points } => AnswerValue::Number(i64::from(*points)),
        ResponseFormat::Slider { max, .. } => AnswerValue::Number(*max),
        ResponseFormat::Scenario { options } => {
            let best = options
                .iter()
                .max_by_key(|option| option.weight)
                .expect("scenario has options");
            AnswerValue::choice(best.label)
        }
        ResponseFormat::Quiz { correct, .. } => AnswerValue::choice(*correct),
    }
}

/// Answers each question at its weakest: scale minimum, lowest weight, a wrong option.
fn worst_answer(format: &ResponseFormat) -> AnswerValue {
    match format {
        ResponseFormat::Likert { .. } => AnswerValue::Number(1),
        ResponseFormat::Slider { min, .. } => AnswerValue::Number(*min),
        ResponseFormat::Scenario { options } => {
            let worst = options
                .iter()
                .min_by_key(|option| option.weight)
                .expect("scenario has options");
            AnswerValue::choice(worst.label)
        }
        ResponseFormat::Quiz {
            options, correct, ..
        } => {
            let wrong = options
                .iter()
                .find(|option| *option != correct)
                .expect("quiz has a wrong option");
            AnswerValue::choice(*wrong)
        }
    }
}

fn run(answer: fn(&ResponseFormat) -> AnswerValue) -> AssessmentFlow {
    let mut flow = AssessmentFlow::new(CatalogSet::standard().expect("standard catalogs"));
    flow.begin().expect("flow begins");

    while flow.stage() != FlowStage::Results {
        let value = answer(&flow.current_item().expect("open question").format);
        flow.submit_answer(value).expect("answer accepted");
    }
    flow
}

#[test]
fn best_answers_recommend_the_full_stack_track() {
    let flow = run(best_answer);
    let report = flow.report().expect("report ready");

    for section in report.sections() {
        assert_eq!(section.overall, 100, "{} battery", section.battery.key());
    }
    assert_eq!(report.overall, 100);
    assert_eq!(report.recommendation, Recommendation::Yes);
    assert_eq!(report.learning_path.kind, PathKind::FullStack);
    assert!(report.summary().missed_questions.is_empty());
}

#[test]
fn worst_answers_recommend_alternatives() {
    let flow = run(worst_answer);
    let report = flow.report().expect("report ready");

    assert_eq!(report.technical.overall, 0);
    assert_eq!(report.recommendation, Recommendation::No);
    assert_eq!(report.learning_path.kind, PathKind::Alternatives);
    assert_eq!(report.summary().missed_questions.len(), 9);
    assert_eq!(report.gaps.len(), 3);
}

#[test]
fn readiness_report_lists_six_factors() {
    let flow = run(best_answer);
    let report = flow.report().expect("report ready");

    let labels: Vec<&str> = report
        .readiness
        .scores
        .iter()
        .map(|entry| entry.label)
        .collect();
    assert_eq!(
        labels,
        [
            "Will (Persistence)",
            "Interest (Engagement)",
            "Skill (Technical Base)",
            "Cognitive Readiness",
            "Ability to Learn",
            "Real-World Fit",
        ]
    );
}

#[test]
fn progress_tracks_each_battery() {
    let mut flow = AssessmentFlow::new(CatalogSet::standard().expect("standard catalogs"));
    flow.begin().expect("flow begins");

    let mut totals = Vec::new();
    while flow.stage() != FlowStage::Results {
        let progress = flow.progress().expect("battery open");
        if progress.question_number == 1 {
            totals.push((progress.battery, progress.total_questions));
        }
        let value = best_answer(&flow.current_item().expect("open question").format);
        flow.submit_answer(value).expect("answer accepted");
    }

    assert_eq!(
        totals,
        [
            (BatteryKind::Psychometric, 9),
            (BatteryKind::Technical, 9),
            (BatteryKind::Readiness, 12),
        ]
    );
}

#[test]
fn views_describe_answer_shape() {
    let mut flow = AssessmentFlow::new(CatalogSet::standard().expect("standard catalogs"));
    flow.begin().expect("flow begins");

    let view = flow.current_view().expect("open question");
    assert_eq!(view.answer_kind, AnswerKind::BoundedScale);
    assert_eq!((view.min, view.max), (Some(1), Some(5)));

    flow.restart();
    assert!(matches!(
        flow.current_view(),
        Err(AssessmentError::OutOfSequence(_))
    ));
}
