use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::assessment::answers::AnswerRecord;
use crate::assessment::catalog::{BatteryCatalog, QuestionGroup};
use crate::assessment::domain::{AnswerValue, BatteryKind, QuestionItem, ResponseFormat};
use crate::assessment::flow::{AssessmentFlow, CatalogSet};
use crate::assessment::scoring::SectionResult;
use crate::assessment::service::AssessmentService;
use crate::assessment::store::{SessionId, SessionRecord, SessionStore, StoreError};

pub(super) type Answers = Vec<(&'static str, AnswerValue)>;

fn number(id: &'static str, value: i64) -> (&'static str, AnswerValue) {
    (id, AnswerValue::Number(value))
}

fn pick(id: &'static str, label: &str) -> (&'static str, AnswerValue) {
    (id, AnswerValue::choice(label))
}

pub(super) fn catalog(battery: BatteryKind) -> Arc<BatteryCatalog> {
    Arc::new(BatteryCatalog::standard(battery).expect("standard catalog"))
}

pub(super) fn catalogs() -> CatalogSet {
    CatalogSet::standard().expect("standard catalogs")
}

pub(super) fn record(answers: Answers) -> AnswerRecord {
    answers.into_iter().collect()
}

/// Every psychometric item at its top value: 100 per group.
pub(super) fn strong_psychometric() -> Answers {
    vec![
        number("riasec_1", 5),
        number("riasec_2", 5),
        pick(
            "riasec_3",
            "Optimizing database queries for better performance",
        ),
        number("openness_1", 5),
        number("conscientiousness_1", 5),
        number("persistence_1", 8),
        number("grit_1", 5),
        number("growth_1", 5),
        pick(
            "motivation_1",
            "The intellectual challenge and problem-solving",
        ),
    ]
}

/// riasec 62, big_five 56, grit 78, overall 65.
pub(super) fn moderate_psychometric() -> Answers {
    vec![
        number("riasec_1", 4),
        number("riasec_2", 3),
        pick("riasec_3", "Writing technical documentation for developers"),
        number("openness_1", 4),
        number("conscientiousness_1", 3),
        number("persistence_1", 4),
        number("grit_1", 4),
        number("growth_1", 5),
        pick("motivation_1", "Career opportunities and salary potential"),
    ]
}

/// riasec 13, big_five 0, grit 17, overall 10.
pub(super) fn weak_psychometric() -> Answers {
    vec![
        number("riasec_1", 1),
        number("riasec_2", 1),
        pick(
            "riasec_3",
            "Leading a team meeting to plan project milestones",
        ),
        number("openness_1", 1),
        number("conscientiousness_1", 1),
        number("persistence_1", 1),
        number("grit_1", 1),
        number("growth_1", 1),
        pick("motivation_1", "The flexibility and remote work possibilities"),
    ]
}

pub(super) fn perfect_technical() -> Answers {
    vec![
        pick("logic_1", "\"532\""),
        pick("logic_2", "Stack"),
        pick("logic_3", "O(n)"),
        pick("js_1", "let has block scope, var has function scope"),
        pick("js_2", "\"object\""),
        pick("js_3", "new Promise((resolve, reject) => {...})"),
        pick("mern_1", "JavaScript XML - a syntax extension"),
        pick("mern_2", "Building web servers and APIs"),
        pick("mern_3", "NoSQL Document"),
    ]
}

/// Misses logic_1 and mern_3: 7 of 9 correct.
pub(super) fn partial_technical() -> Answers {
    let mut answers = perfect_technical();
    answers[0] = pick("logic_1", "10");
    answers[8] = pick("mern_3", "Relational");
    answers
}

pub(super) fn failing_technical() -> Answers {
    vec![
        pick("logic_1", "10"),
        pick("logic_2", "Array"),
        pick("logic_3", "O(1)"),
        pick("js_1", "No difference, they are identical"),
        pick("js_2", "\"null\""),
        pick("js_3", "Promise.create((resolve, reject) => {...})"),
        pick("mern_1", "A CSS framework"),
        pick("mern_2", "CSS preprocessing"),
        pick("mern_3", "Graph"),
    ]
}

pub(super) fn strong_readiness() -> Answers {
    vec![
        number("will_1", 40),
        pick("will_2", "Keep working systematically until solved"),
        pick("interest_1", "Connecting different technologies together"),
        number("interest_2", 10),
        pick("skill_1", "Familiar with JavaScript basics"),
        number("skill_2", 10),
        pick(
            "cognitive_1",
            "Find multiple resources and compare approaches",
        ),
        number("cognitive_2", 10),
        pick(
            "ability_1",
            "Analyze what went wrong to avoid repeating it",
        ),
        number("ability_2", 10),
        pick("realworld_1", "Career change to tech industry"),
        number("realworld_2", 10),
    ]
}

/// will 42, interest 73, skill 37, cognitive 63, ability 62, realworld 81; overall 60.
pub(super) fn moderate_readiness() -> Answers {
    vec![
        number("will_1", 14),
        pick("will_2", "Ask for help immediately"),
        pick("interest_1", "Solving complex algorithmic problems"),
        number("interest_2", 7),
        pick("skill_1", "Some basic HTML/CSS knowledge"),
        number("skill_2", 4),
        pick("cognitive_1", "Jump in and learn by trial and error"),
        number("cognitive_2", 6),
        pick("ability_1", "See it as a normal part of learning"),
        number("ability_2", 5),
        pick("realworld_1", "Freelancing and personal projects"),
        number("realworld_2", 8),
    ]
}

/// will 10, interest 40, skill 5, cognitive 25, ability 8, realworld 38; overall 21.
pub(super) fn weak_readiness() -> Answers {
    vec![
        number("will_1", 1),
        pick("will_2", "Switch to an easier task"),
        pick("interest_1", "Solving complex algorithmic problems"),
        number("interest_2", 1),
        pick("skill_1", "Complete beginner with no coding experience"),
        number("skill_2", 1),
        pick("cognitive_1", "Follow step-by-step tutorials exactly"),
        number("cognitive_2", 1),
        pick("ability_1", "Feel discouraged and doubt your abilities"),
        number("ability_2", 1),
        pick("realworld_1", "Starting my own tech company"),
        number("realworld_2", 1),
    ]
}

/// Result stub carrying only the overall score, for aggregation tests.
pub(super) fn section(battery: BatteryKind, overall: u8) -> SectionResult {
    SectionResult {
        battery,
        answers: AnswerRecord::new(),
        scores: Vec::new(),
        overall,
        item_outcomes: Vec::new(),
    }
}

/// Drives a started flow through all three batteries.
pub(super) fn complete_flow(
    flow: &mut AssessmentFlow,
    psychometric: Answers,
    technical: Answers,
    readiness: Answers,
) {
    for (_, value) in psychometric
        .into_iter()
        .chain(technical)
        .chain(readiness)
    {
        flow.submit_answer(value).expect("answer accepted");
    }
}

pub(super) fn quiz_item(
    id: &'static str,
    options: [&'static str; 3],
    correct: &'static str,
) -> QuestionItem {
    QuestionItem {
        id,
        prompt: "Pick one",
        format: ResponseFormat::Quiz {
            options: options.to_vec(),
            correct,
            explanation: "Only one option holds.",
        },
    }
}

/// Single three-question "Logic" group.
pub(super) fn logic_catalog() -> BatteryCatalog {
    BatteryCatalog::new(
        BatteryKind::Technical,
        vec![QuestionGroup {
            key: "logic",
            label: "Logic",
            items: vec![
                quiz_item("q1", ["a", "b", "c"], "a"),
                quiz_item("q2", ["a", "b", "c"], "b"),
                quiz_item("q3", ["a", "b", "c"], "c"),
            ],
        }],
    )
    .expect("logic catalog is valid")
}

pub(super) fn build_service() -> (AssessmentService<MemoryStore>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::default());
    let service = AssessmentService::new(store.clone(), catalogs());
    (service, store)
}

#[derive(Default, Clone)]
pub(super) struct MemoryStore {
    pub(super) records: Arc<Mutex<HashMap<SessionId, SessionRecord>>>,
}

impl SessionStore for MemoryStore {
    fn insert(&self, record: SessionRecord) -> Result<SessionRecord, StoreError> {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        if guard.contains_key(&record.id) {
            return Err(StoreError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn modify<T, F>(&self, id: &SessionId, change: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut SessionRecord) -> T,
    {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        let record = guard.get_mut(id).ok_or(StoreError::NotFound)?;
        Ok(change(record))
    }

    fn fetch(&self, id: &SessionId) -> Result<Option<SessionRecord>, StoreError> {
        let guard = self.records.lock().expect("store mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn remove(&self, id: &SessionId) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        guard.remove(id).map(|_| ()).ok_or(StoreError::NotFound)
    }
}

pub(super) struct UnavailableStore;

impl SessionStore for UnavailableStore {
    fn insert(&self, _record: SessionRecord) -> Result<SessionRecord, StoreError> {
        Err(StoreError::Unavailable("store offline".to_string()))
    }

    fn modify<T, F>(&self, _id: &SessionId, _change: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut SessionRecord) -> T,
    {
        Err(StoreError::Unavailable("store offline".to_string()))
    }

    fn fetch(&self, _id: &SessionId) -> Result<Option<SessionRecord>, StoreError> {
        Err(StoreError::Unavailable("store offline".to_string()))
    }

    fn remove(&self, _id: &SessionId) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("store offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
