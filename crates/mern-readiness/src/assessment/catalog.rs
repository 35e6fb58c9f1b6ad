use super::domain::{
    AnswerKind, AssessmentError, BatteryKind, QuestionItem, ReadinessFactor, ResponseFormat,
    ScenarioOption,
};
use serde::Serialize;
use std::collections::HashSet;

/// Named category owning an ordered run of questions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionGroup {
    pub key: &'static str,
    pub label: &'static str,
    pub items: Vec<QuestionItem>,
}

/// Validated question catalog for one battery.
#[derive(Debug, Clone)]
pub struct BatteryCatalog {
    battery: BatteryKind,
    groups: Vec<QuestionGroup>,
    order: Vec<(usize, usize)>,
}

impl BatteryCatalog {
    pub fn new(battery: BatteryKind, groups: Vec<QuestionGroup>) -> Result<Self, AssessmentError> {
        validate_groups(battery, &groups)?;

        let order = groups
            .iter()
            .enumerate()
            .flat_map(|(group_idx, group)| {
                (0..group.items.len()).map(move |item_idx| (group_idx, item_idx))
            })
            .collect();

        Ok(Self {
            battery,
            groups,
            order,
        })
    }

    pub fn standard(battery: BatteryKind) -> Result<Self, AssessmentError> {
        let groups = match battery {
            BatteryKind::Psychometric => psychometric_groups(),
            BatteryKind::Technical => technical_groups(),
            BatteryKind::Readiness => readiness_groups(),
        };
        Self::new(battery, groups)
    }

    pub fn battery(&self) -> BatteryKind {
        self.battery
    }

    pub fn groups(&self) -> &[QuestionGroup] {
        &self.groups
    }

    /// Number of questions in the flattened sequence.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn entry(&self, position: usize) -> Option<(&QuestionGroup, &QuestionItem)> {
        self.order.get(position).map(|(group_idx, item_idx)| {
            let group = &self.groups[*group_idx];
            (group, &group.items[*item_idx])
        })
    }

    pub fn items(&self) -> impl Iterator<Item = &QuestionItem> + '_ {
        self.groups.iter().flat_map(|group| group.items.iter())
    }

    pub fn item(&self, id: &str) -> Option<&QuestionItem> {
        self.items().find(|item| item.id == id)
    }

    pub fn to_view(&self) -> CatalogView {
        CatalogView {
            battery: self.battery,
            battery_label: self.battery.label(),
            total_questions: self.len(),
            questions: self
                .groups
                .iter()
                .flat_map(|group| group.items.iter().map(move |item| item.to_view(group)))
                .collect(),
        }
    }
}

/// Respondent-facing rendering of a question. Never exposes answer keys or weights.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionView {
    pub id: &'static str,
    pub prompt: &'static str,
    pub group_key: &'static str,
    pub group_label: &'static str,
    pub answer_kind: AnswerKind,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CatalogView {
    pub battery: BatteryKind,
    pub battery_label: &'static str,
    pub total_questions: usize,
    pub questions: Vec<QuestionView>,
}

const LIKERT_LABELS: [&str; 5] = [
    "Strongly Disagree",
    "Disagree",
    "Neutral",
    "Agree",
    "Strongly Agree",
];

impl QuestionItem {
    pub fn to_view(&self, group: &QuestionGroup) -> QuestionView {
        let mut view = QuestionView {
            id: self.id,
            prompt: self.prompt,
            group_key: group.key,
            group_label: group.label,
            answer_kind: self.format.answer_kind(),
            options: Vec::new(),
            min: None,
            max: None,
            unit: None,
        };

        match &self.format {
            ResponseFormat::Likert { points } => {
                view.min = Some(1);
                view.max = Some(i64::from(*points));
                if usize::from(*points) == LIKERT_LABELS.len() {
                    view.options = LIKERT_LABELS.to_vec();
                }
            }
            ResponseFormat::Slider { min, max, unit } => {
                view.min = Some(*min);
                view.max = Some(*max);
                view.unit = Some(*unit);
            }
            ResponseFormat::Scenario { options } => {
                view.options = options.iter().map(|option| option.label).collect();
            }
            ResponseFormat::Quiz { options, .. } => {
                view.options = options.clone();
            }
        }

        view
    }
}

fn validate_groups(battery: BatteryKind, groups: &[QuestionGroup]) -> Result<(), AssessmentError> {
    if groups.is_empty() {
        return Err(AssessmentError::InvalidCatalog(format!(
            "{} catalog declares no groups",
            battery.key()
        )));
    }

    let mut seen_ids = HashSet::new();
    for group in groups {
        if group.items.is_empty() {
            return Err(AssessmentError::InvalidCatalog(format!(
                "group {} has no questions",
                group.key
            )));
        }

        for item in &group.items {
            if !seen_ids.insert(item.id) {
                return Err(AssessmentError::InvalidCatalog(format!(
                    "duplicate question id {}",
                    item.id
                )));
            }
            validate_item(battery, item)?;
        }
    }

    if battery == BatteryKind::Readiness {
        let keys: Vec<&str> = groups.iter().map(|group| group.key).collect();
        let canonical: Vec<&str> = ReadinessFactor::ordered()
            .into_iter()
            .map(ReadinessFactor::key)
            .collect();
        if keys != canonical {
            return Err(AssessmentError::InvalidCatalog(format!(
                "readiness groups must be {} in order, found {}",
                canonical.join(", "),
                keys.join(", ")
            )));
        }
    }

    Ok(())
}

fn validate_item(battery: BatteryKind, item: &QuestionItem) -> Result<(), AssessmentError> {
    let invalid = |detail: String| AssessmentError::InvalidCatalog(format!("{}: {detail}", item.id));
    let is_quiz = matches!(item.format, ResponseFormat::Quiz { .. });

    if battery == BatteryKind::Technical && !is_quiz {
        return Err(invalid("technical battery accepts quiz items only".to_string()));
    }
    if battery != BatteryKind::Technical && is_quiz {
        return Err(invalid(format!(
            "quiz items belong to the technical battery only (found in {})",
            battery.key()
        )));
    }

    match &item.format {
        ResponseFormat::Likert { points } => {
            if *points < 2 {
                return Err(invalid(format!("scale needs at least 2 points, has {points}")));
            }
        }
        ResponseFormat::Slider { min, max, .. } => {
            if min >= max {
                return Err(invalid(format!("slider bounds {min}..={max} are empty")));
            }
            if max.checked_sub(*min).is_none() {
                return Err(invalid(format!("slider bounds {min}..={max} are too wide")));
            }
        }
        ResponseFormat::Scenario { options } => {
            let labels: Vec<&str> = options.iter().map(|option| option.label).collect();
            check_options(&labels).map_err(invalid)?;
            if let Some(option) = options.iter().find(|option| option.weight > 100) {
                return Err(invalid(format!(
                    "option '{}' weight {} exceeds 100",
                    option.label, option.weight
                )));
            }
        }
        ResponseFormat::Quiz {
            options, correct, ..
        } => {
            check_options(options).map_err(invalid)?;
            if !options.contains(correct) {
                return Err(invalid(format!("correct option '{correct}' is not listed")));
            }
        }
    }

    Ok(())
}

fn check_options(labels: &[&str]) -> Result<(), String> {
    if labels.is_empty() {
        return Err("choice question lists no options".to_string());
    }
    let mut seen = HashSet::new();
    for label in labels {
        if !seen.insert(*label) {
            return Err(format!("option '{label}' listed twice"));
        }
    }
    Ok(())
}

fn likert(id: &'static str, prompt: &'static str) -> QuestionItem {
    QuestionItem {
        id,
        prompt,
        format: ResponseFormat::Likert { points: 5 },
    }
}

fn slider(
    id: &'static str,
    prompt: &'static str,
    min: i64,
    max: i64,
    unit: &'static str,
) -> QuestionItem {
    QuestionItem {
        id,
        prompt,
        format: ResponseFormat::Slider { min, max, unit },
    }
}

fn scenario(
    id: &'static str,
    prompt: &'static str,
    options: [(&'static str, u8); 4],
) -> QuestionItem {
    QuestionItem {
        id,
        prompt,
        format: ResponseFormat::Scenario {
            options: options
                .into_iter()
                .map(|(label, weight)| ScenarioOption { label, weight })
                .collect(),
        },
    }
}

fn quiz(
    id: &'static str,
    prompt: &'static str,
    options: [&'static str; 4],
    correct: &'static str,
    explanation: &'static str,
) -> QuestionItem {
    QuestionItem {
        id,
        prompt,
        format: ResponseFormat::Quiz {
            options: options.to_vec(),
            correct,
            explanation,
        },
    }
}

fn psychometric_groups() -> Vec<QuestionGroup> {
    vec![
        QuestionGroup {
            key: "riasec",
            label: "Interest Assessment (RIASEC)",
            items: vec![
                likert(
                    "riasec_1",
                    "I enjoy solving abstract logic puzzles and mathematical problems.",
                ),
                likert(
                    "riasec_2",
                    "I prefer working with data and systems rather than people.",
                ),
                scenario(
                    "riasec_3",
                    "Which task would you find most engaging?",
                    [
                        ("Designing a user interface for a mobile app", 80),
                        ("Optimizing database queries for better performance", 100),
                        ("Leading a team meeting to plan project milestones", 40),
                        ("Writing technical documentation for developers", 60),
                    ],
                ),
            ],
        },
        QuestionGroup {
            key: "big_five",
            label: "Big Five Personality",
            items: vec![
                likert(
                    "openness_1",
                    "I am always curious about how things work and enjoy learning new concepts.",
                ),
                likert(
                    "conscientiousness_1",
                    "I can focus on debugging code for hours without getting frustrated.",
                ),
                slider(
                    "persistence_1",
                    "How many hours can you typically focus on a challenging programming problem?",
                    1,
                    8,
                    "hours",
                ),
            ],
        },
        QuestionGroup {
            key: "grit",
            label: "Grit & Growth Mindset",
            items: vec![
                likert(
                    "grit_1",
                    "When I encounter a difficult coding problem, I see it as an opportunity to improve my skills.",
                ),
                likert(
                    "growth_1",
                    "I believe that programming ability can be developed through dedication and hard work.",
                ),
                scenario(
                    "motivation_1",
                    "What motivates you most about learning to code?",
                    [
                        ("The intellectual challenge and problem-solving", 100),
                        ("Career opportunities and salary potential", 60),
                        ("Creating useful applications that help people", 90),
                        ("The flexibility and remote work possibilities", 50),
                    ],
                ),
            ],
        },
    ]
}

fn technical_groups() -> Vec<QuestionGroup> {
    vec![
        QuestionGroup {
            key: "logic",
            label: "Logic & Reasoning",
            items: vec![
                quiz(
                    "logic_1",
                    "What would be the output of this JavaScript expression: `\"5\" + 3 + 2`?",
                    ["10", "\"532\"", "\"8\"", "Error"],
                    "\"532\"",
                    "JavaScript performs string concatenation from left to right when a string is involved.",
                ),
                quiz(
                    "logic_2",
                    "Which data structure would be most efficient for implementing an undo feature?",
                    ["Array", "Stack", "Queue", "Hash Table"],
                    "Stack",
                    "Stack follows LIFO (Last In, First Out) principle, perfect for undo operations.",
                ),
                quiz(
                    "logic_3",
                    "What is the time complexity of finding an element in an unsorted array?",
                    ["O(1)", "O(log n)", "O(n)", "O(n²)"],
                    "O(n)",
                    "In worst case, you might need to check every element, giving O(n) complexity.",
                ),
            ],
        },
        QuestionGroup {
            key: "javascript",
            label: "JavaScript Fundamentals",
            items: vec![
                quiz(
                    "js_1",
                    "What is the difference between `let` and `var` in JavaScript?",
                    [
                        "No difference, they are identical",
                        "let has block scope, var has function scope",
                        "var is newer than let",
                        "let can be redeclared, var cannot",
                    ],
                    "let has block scope, var has function scope",
                    "let respects block boundaries, while var is function-scoped or globally-scoped.",
                ),
                quiz(
                    "js_2",
                    "What will `console.log(typeof null)` output in JavaScript?",
                    ["\"null\"", "\"undefined\"", "\"object\"", "\"boolean\""],
                    "\"object\"",
                    "This is a famous JavaScript quirk - typeof null returns \"object\".",
                ),
                quiz(
                    "js_3",
                    "How do you create a promise in JavaScript?",
                    [
                        "new Promise((resolve, reject) => {...})",
                        "Promise.create((resolve, reject) => {...})",
                        "createPromise((resolve, reject) => {...})",
                        "Promise((resolve, reject) => {...})",
                    ],
                    "new Promise((resolve, reject) => {...})",
                    "Promises are created using the Promise constructor with resolve and reject callbacks.",
                ),
            ],
        },
        QuestionGroup {
            key: "mern",
            label: "MERN Stack Knowledge",
            items: vec![
                quiz(
                    "mern_1",
                    "What is JSX in React?",
                    [
                        "A separate templating language",
                        "JavaScript XML - a syntax extension",
                        "A CSS framework",
                        "A database query language",
                    ],
                    "JavaScript XML - a syntax extension",
                    "JSX allows you to write HTML-like syntax in JavaScript.",
                ),
                quiz(
                    "mern_2",
                    "What is Express.js primarily used for?",
                    [
                        "Frontend state management",
                        "Database operations",
                        "Building web servers and APIs",
                        "CSS preprocessing",
                    ],
                    "Building web servers and APIs",
                    "Express.js is a web application framework for Node.js, used for building servers and APIs.",
                ),
                quiz(
                    "mern_3",
                    "Which type of database is MongoDB?",
                    ["Relational", "NoSQL Document", "Graph", "Key-Value"],
                    "NoSQL Document",
                    "MongoDB is a document-oriented NoSQL database that stores data in flexible, JSON-like documents.",
                ),
            ],
        },
    ]
}

fn readiness_group(factor: ReadinessFactor, items: Vec<QuestionItem>) -> QuestionGroup {
    QuestionGroup {
        key: factor.key(),
        label: factor.label(),
        items,
    }
}

fn readiness_groups() -> Vec<QuestionGroup> {
    vec![
        readiness_group(
            ReadinessFactor::Will,
            vec![
                slider(
                    "will_1",
                    "How many hours per week are you willing to dedicate to learning MERN stack?",
                    1,
                    40,
                    "hours/week",
                ),
                scenario(
                    "will_2",
                    "When facing a challenging bug that takes hours to solve, you typically:",
                    [
                        ("Get frustrated and take a long break", 25),
                        ("Ask for help immediately", 50),
                        ("Keep working systematically until solved", 100),
                        ("Switch to an easier task", 20),
                    ],
                ),
            ],
        ),
        readiness_group(
            ReadinessFactor::Interest,
            vec![
                scenario(
                    "interest_1",
                    "Which aspect of web development excites you most?",
                    [
                        ("Creating beautiful user interfaces", 90),
                        ("Building efficient backend systems", 90),
                        ("Solving complex algorithmic problems", 80),
                        ("Connecting different technologies together", 100),
                    ],
                ),
                slider(
                    "interest_2",
                    "How interested are you in staying up-to-date with new web technologies?",
                    1,
                    10,
                    "interest level",
                ),
            ],
        ),
        readiness_group(
            ReadinessFactor::Skill,
            vec![
                scenario(
                    "skill_1",
                    "What best describes your current programming experience?",
                    [
                        ("Complete beginner with no coding experience", 10),
                        ("Some basic HTML/CSS knowledge", 40),
                        ("Familiar with JavaScript basics", 100),
                        ("Experience with other programming languages", 80),
                    ],
                ),
                slider(
                    "skill_2",
                    "How comfortable are you with using command line/terminal?",
                    1,
                    10,
                    "comfort level",
                ),
            ],
        ),
        readiness_group(
            ReadinessFactor::Cognitive,
            vec![
                scenario(
                    "cognitive_1",
                    "When learning a new concept, you prefer to:",
                    [
                        ("Follow step-by-step tutorials exactly", 50),
                        ("Understand the theory first, then practice", 85),
                        ("Jump in and learn by trial and error", 70),
                        ("Find multiple resources and compare approaches", 100),
                    ],
                ),
                slider(
                    "cognitive_2",
                    "How well do you handle ambiguous problems with multiple solutions?",
                    1,
                    10,
                    "comfort level",
                ),
            ],
        ),
        readiness_group(
            ReadinessFactor::Ability,
            vec![
                scenario(
                    "ability_1",
                    "When you make a mistake in your code, you typically:",
                    [
                        ("Feel discouraged and doubt your abilities", 15),
                        ("See it as a normal part of learning", 80),
                        ("Analyze what went wrong to avoid repeating it", 100),
                        ("Ask someone else to fix it for you", 25),
                    ],
                ),
                slider(
                    "ability_2",
                    "How quickly do you typically pick up new technical skills?",
                    1,
                    10,
                    "learning speed",
                ),
            ],
        ),
        readiness_group(
            ReadinessFactor::RealWorld,
            vec![
                scenario(
                    "realworld_1",
                    "What is your primary motivation for learning MERN stack?",
                    [
                        ("Career change to tech industry", 100),
                        ("Freelancing and personal projects", 85),
                        ("Starting my own tech company", 75),
                        ("Improving skills in current role", 80),
                    ],
                ),
                slider(
                    "realworld_2",
                    "How important is remote work flexibility to you?",
                    1,
                    10,
                    "importance",
                ),
            ],
        ),
    ]
}
