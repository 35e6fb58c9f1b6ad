use crate::infra::{parse_battery, InMemorySessionStore};
use clap::{Args, ValueEnum};
use mern_readiness::assessment::report::views::ReportSummary;
use mern_readiness::assessment::{
    aggregate, AnswerSheetImporter, AnswerValue, AssessmentReport, AssessmentService,
    BatteryCatalog, BatteryKind, CatalogSet, FlowStage, ResponseFormat, ScoringEngine,
    SectionResult,
};
use mern_readiness::error::AppError;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct CatalogArgs {
    /// Battery to print: psychometric, technical, or readiness (alias: wiscar)
    #[arg(value_parser = parse_battery)]
    pub(crate) battery: BatteryKind,
    /// Emit the catalog as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Answer sheet for the psychometric battery (CSV: Question ID,Answer)
    #[arg(long)]
    pub(crate) psychometric: PathBuf,
    /// Answer sheet for the technical battery
    #[arg(long)]
    pub(crate) technical: PathBuf,
    /// Answer sheet for the readiness (WISCAR) battery
    #[arg(long)]
    pub(crate) readiness: PathBuf,
    /// Emit the report as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Scripted respondent to walk through the assessment
    #[arg(long, value_enum, default_value_t = DemoProfile::Moderate)]
    pub(crate) profile: DemoProfile,
    /// Emit the final report as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum DemoProfile {
    /// Picks the strongest answer everywhere
    Strong,
    /// Leans positive and misses every third quiz question
    Moderate,
    /// Low ratings and mostly wrong quiz answers
    Emerging,
}

impl DemoProfile {
    fn label(self) -> &'static str {
        match self {
            Self::Strong => "strong",
            Self::Moderate => "moderate",
            Self::Emerging => "emerging",
        }
    }

    fn answer(self, format: &ResponseFormat, question_number: usize) -> AnswerValue {
        match format {
            ResponseFormat::Likert { points } => {
                let points = i64::from(*points);
                AnswerValue::Number(match self {
                    Self::Strong => points,
                    Self::Moderate => points - 1,
                    Self::Emerging => 2,
                })
            }
            ResponseFormat::Slider { min, max, .. } => {
                let (low, high) = (i128::from(*min), i128::from(*max));
                let span = high - low;
                let position = match self {
                    Self::Strong => high,
                    Self::Moderate => low + span * 2 / 3,
                    Self::Emerging => low + span / 4,
                };
                AnswerValue::Number(i64::try_from(position).unwrap_or(*max))
            }
            ResponseFormat::Scenario { options } => {
                let mut ranked: Vec<_> = options.iter().collect();
                ranked.sort_by(|a, b| b.weight.cmp(&a.weight));
                let index = match self {
                    Self::Strong => 0,
                    Self::Moderate => 1,
                    Self::Emerging => ranked.len().saturating_sub(1),
                };
                let choice = ranked
                    .get(index)
                    .or_else(|| ranked.first())
                    .map(|option| option.label)
                    .unwrap_or_default();
                AnswerValue::choice(choice)
            }
            ResponseFormat::Quiz {
                options, correct, ..
            } => {
                let answers_correctly = match self {
                    Self::Strong => true,
                    Self::Moderate => question_number % 3 != 0,
                    Self::Emerging => question_number % 3 == 1,
                };
                let choice = if answers_correctly {
                    *correct
                } else {
                    options
                        .iter()
                        .copied()
                        .find(|option| option != correct)
                        .unwrap_or(*correct)
                };
                AnswerValue::choice(choice)
            }
        }
    }
}

#[derive(Serialize)]
struct ReportOutput<'a> {
    report: &'a AssessmentReport,
    summary: ReportSummary,
}

pub(crate) fn run_catalog(args: CatalogArgs) -> Result<(), AppError> {
    let catalog = BatteryCatalog::standard(args.battery)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&catalog.to_view())?);
        return Ok(());
    }

    println!("{} ({} questions)", args.battery.label(), catalog.len());
    let mut number = 0;
    for group in catalog.groups() {
        println!("\n{}", group.label);
        for item in &group.items {
            number += 1;
            println!("{number}. {}", item.prompt);
            match &item.format {
                ResponseFormat::Likert { points } => {
                    println!("   scale 1-{points} (Strongly Disagree to Strongly Agree)");
                }
                ResponseFormat::Slider { min, max, unit } => {
                    println!("   slider {min}-{max} {unit}");
                }
                ResponseFormat::Scenario { options } => {
                    for option in options {
                        println!("   - {}", option.label);
                    }
                }
                ResponseFormat::Quiz { options, .. } => {
                    for option in options {
                        println!("   - {option}");
                    }
                }
            }
        }
    }

    Ok(())
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let catalogs = CatalogSet::standard()?;

    let psychometric = score_sheet(&args.psychometric, catalogs.get(BatteryKind::Psychometric))?;
    let technical = score_sheet(&args.technical, catalogs.get(BatteryKind::Technical))?;
    let readiness = score_sheet(&args.readiness, catalogs.get(BatteryKind::Readiness))?;

    let report = aggregate(psychometric, technical, readiness)?;
    render_report(&report, args.json)
}

fn score_sheet(path: &Path, catalog: &Arc<BatteryCatalog>) -> Result<SectionResult, AppError> {
    let session = AnswerSheetImporter::from_path(path, Arc::clone(catalog))?;
    let answers = session.into_answers()?;
    Ok(ScoringEngine::new(Arc::clone(catalog)).score(&answers)?)
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    println!("MERN readiness demo ({} respondent)", args.profile.label());
    let report = play(args.profile, !args.json)?;
    render_report(&report, args.json)
}

/// Drives one scripted respondent through a fresh session, optionally echoing
/// each question and answer.
fn play(profile: DemoProfile, echo: bool) -> Result<AssessmentReport, AppError> {
    let service = AssessmentService::new(
        Arc::new(InMemorySessionStore::with_capacity(1)),
        CatalogSet::standard()?,
    );
    walk(&service, profile, echo)
}

fn walk(
    service: &AssessmentService<InMemorySessionStore>,
    profile: DemoProfile,
    echo: bool,
) -> Result<AssessmentReport, AppError> {
    let mut view = service.start()?;
    while view.stage != FlowStage::Results {
        let (Some(progress), Some(question)) = (&view.progress, &view.current_question) else {
            break;
        };
        let Some(item) = service.catalogs().get(progress.battery).item(question.id) else {
            break;
        };

        if echo && progress.question_number == 1 {
            println!(
                "\n{} ({} questions)",
                progress.battery_label, progress.total_questions
            );
        }
        let value = profile.answer(&item.format, progress.question_number);
        if echo {
            println!(
                "  [{}/{}] {} -> {}",
                progress.question_number, progress.total_questions, question.prompt, value
            );
        }

        view = service.answer(&view.session_id, value)?;
    }

    Ok(service.report(&view.session_id)?)
}

fn render_report(report: &AssessmentReport, json: bool) -> Result<(), AppError> {
    let summary = report.summary();

    if json {
        let output = ReportOutput { report, summary };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("\n{}", summary.headline);
    println!(
        "Overall readiness: {}/100 ({})",
        summary.overall, summary.recommendation_label
    );

    for battery in &summary.batteries {
        println!(
            "\n{}: {}/100 ({})",
            battery.battery_label, battery.overall, battery.band_label
        );
        for entry in &battery.sub_scores {
            println!("- {}: {}", entry.label, entry.score);
        }
    }

    if summary.strengths.is_empty() {
        println!("\nStrengths: none yet");
    } else {
        println!("\nStrengths");
        for strength in &summary.strengths {
            println!("- {strength}");
        }
    }

    if summary.gaps.is_empty() {
        println!("\nAreas to develop: none");
    } else {
        println!("\nAreas to develop");
        for gap in &summary.gaps {
            println!("- {gap}");
        }
    }

    println!("\nLearning path: {}", report.learning_path.label);
    for (index, step) in summary.learning_path.iter().enumerate() {
        println!("{}. {}", index + 1, step);
    }

    let missed: Vec<_> = report
        .technical
        .item_outcomes
        .iter()
        .filter(|outcome| !outcome.is_correct)
        .collect();
    if !missed.is_empty() {
        println!("\nTechnical review");
        for outcome in missed {
            println!(
                "- {}: answered {}, expected {}. {}",
                outcome.question_id, outcome.selected, outcome.correct_option, outcome.explanation
            );
        }
    }

    Ok(())
}
