//! Turning extracted JSON into typed artifacts.
//!
//! Quizzes are checked strictly and all-or-nothing. Roadmaps only need a
//! non-empty `phases` list whose entries are named; every other roadmap field
//! is taken as-is or defaulted. Interview questions never fail: a short set is
//! replaced by a fixed fallback list.

use std::collections::{BTreeSet, HashSet};

use serde_json::{Map, Value};

use crate::domain::artifact::{
    CourseRef, InterviewQuestionSet, Phase, QUIZ_OPTION_COUNT, QUIZ_QUESTION_COUNT, QuestionSource,
    QuizArtifact, QuizQuestion, RoadmapArtifact, StructuredArtifact,
};
use crate::domain::extraction::{scan_question_lines, scan_question_segments};
use crate::domain::{ValidationError, ValidationFailure};

/// JSON-backed artifact shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeId {
    Roadmap,
    Quiz,
}

/// Validate `payload` against `shape`.
pub fn validate(payload: &Value, shape: ShapeId) -> Result<StructuredArtifact, ValidationError> {
    match shape {
        ShapeId::Roadmap => validate_roadmap(payload).map(StructuredArtifact::Roadmap),
        ShapeId::Quiz => validate_quiz(payload).map(StructuredArtifact::Quiz),
    }
}

const QUIZ: &str = "quiz";
const ROADMAP: &str = "roadmap";

fn quiz_error(reason: ValidationFailure, detail: impl Into<String>) -> ValidationError {
    ValidationError::new(QUIZ, reason, detail)
}

fn roadmap_error(reason: ValidationFailure, detail: impl Into<String>) -> ValidationError {
    ValidationError::new(ROADMAP, reason, detail)
}

pub fn validate_quiz(payload: &Value) -> Result<QuizArtifact, ValidationError> {
    let questions = match payload.get("questions") {
        None | Some(Value::Null) => {
            return Err(quiz_error(ValidationFailure::MissingField, "missing 'questions'"));
        }
        Some(Value::Array(items)) => items,
        Some(_) => {
            return Err(quiz_error(ValidationFailure::WrongType, "'questions' must be an array"));
        }
    };

    if questions.len() != QUIZ_QUESTION_COUNT {
        return Err(quiz_error(
            ValidationFailure::WrongCount,
            format!("Expected {} questions, got {}", QUIZ_QUESTION_COUNT, questions.len()),
        ));
    }

    questions
        .iter()
        .enumerate()
        .map(|(index, question)| validate_question(index + 1, question))
        .collect::<Result<Vec<_>, _>>()
        .map(|questions| QuizArtifact { questions })
}

fn validate_question(position: usize, value: &Value) -> Result<QuizQuestion, ValidationError> {
    let at = |detail: &str| format!("question {}: {}", position, detail);

    let Value::Object(fields) = value else {
        return Err(quiz_error(ValidationFailure::WrongType, at("must be an object")));
    };

    let id = question_id(fields.get("id")).map_err(|reason| quiz_error(reason, at("invalid 'id'")))?;

    let question = required_text(fields.get("question"))
        .map_err(|reason| quiz_error(reason, at("'question' must be non-empty text")))?;

    let options = match fields.get("options") {
        None | Some(Value::Null) => {
            return Err(quiz_error(ValidationFailure::MissingField, at("missing 'options'")));
        }
        Some(Value::Array(items)) => items,
        Some(_) => {
            return Err(quiz_error(ValidationFailure::WrongType, at("'options' must be an array")));
        }
    };
    if options.len() != QUIZ_OPTION_COUNT {
        return Err(quiz_error(
            ValidationFailure::WrongCount,
            at(&format!("expected {} options, got {}", QUIZ_OPTION_COUNT, options.len())),
        ));
    }
    let options = options
        .iter()
        .map(|option| option.as_str().map(str::to_string))
        .collect::<Option<Vec<_>>>()
        .ok_or_else(|| quiz_error(ValidationFailure::WrongType, at("options must be text")))?;
    if options.iter().collect::<HashSet<_>>().len() != QUIZ_OPTION_COUNT {
        return Err(quiz_error(
            ValidationFailure::WrongCount,
            at(&format!("expected {} distinct options", QUIZ_OPTION_COUNT)),
        ));
    }

    let correct_answer = required_text(fields.get("correctAnswer"))
        .map_err(|reason| quiz_error(reason, at("'correctAnswer' must be non-empty text")))?;
    if !options.contains(&correct_answer) {
        return Err(quiz_error(
            ValidationFailure::AnswerNotInOptions,
            at(&format!("correctAnswer '{}' is not one of the options", correct_answer)),
        ));
    }

    Ok(QuizQuestion { id, question, options, correct_answer })
}

/// Question ids must be positive integers; numeric strings are accepted.
fn question_id(value: Option<&Value>) -> Result<u64, ValidationFailure> {
    match value {
        None | Some(Value::Null) => Err(ValidationFailure::MissingField),
        Some(Value::Number(n)) => match n.as_u64() {
            Some(0) => Err(ValidationFailure::MissingField),
            Some(id) => Ok(id),
            None => Err(ValidationFailure::WrongType),
        },
        Some(Value::String(s)) if s.is_empty() => Err(ValidationFailure::MissingField),
        Some(Value::String(s)) => match s.trim().parse::<u64>() {
            Ok(0) | Err(_) => Err(ValidationFailure::WrongType),
            Ok(id) => Ok(id),
        },
        Some(_) => Err(ValidationFailure::WrongType),
    }
}

fn required_text(value: Option<&Value>) -> Result<String, ValidationFailure> {
    match value {
        None | Some(Value::Null) => Err(ValidationFailure::MissingField),
        Some(Value::String(s)) if s.is_empty() => Err(ValidationFailure::MissingField),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(ValidationFailure::WrongType),
    }
}

/// Validate a roadmap payload.
///
/// Accepts either the full model response (`{"userId", "roadmap": {...}}`)
/// or the bare roadmap object.
pub fn validate_roadmap(payload: &Value) -> Result<RoadmapArtifact, ValidationError> {
    let body = match payload.get("roadmap") {
        Some(Value::Object(roadmap)) => roadmap,
        _ => match payload {
            Value::Object(fields) => fields,
            _ => {
                return Err(roadmap_error(ValidationFailure::WrongType, "payload must be an object"));
            }
        },
    };

    let phases = match body.get("phases") {
        None | Some(Value::Null) => {
            return Err(roadmap_error(ValidationFailure::MissingField, "missing 'phases'"));
        }
        Some(Value::Array(items)) => items,
        Some(_) => {
            return Err(roadmap_error(ValidationFailure::WrongType, "'phases' must be an array"));
        }
    };
    if phases.is_empty() {
        return Err(roadmap_error(ValidationFailure::WrongCount, "'phases' must not be empty"));
    }

    let phases = phases
        .iter()
        .enumerate()
        .map(|(index, phase)| loose_phase(index + 1, phase))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(RoadmapArtifact {
        title: text_or_default(body.get("title")),
        overview: text_or_default(body.get("overview")),
        phases,
        additional_resources: body.get("additionalResources").filter(|v| !v.is_null()).cloned(),
        challenges_and_solutions: body
            .get("challengesAndSolutions")
            .filter(|v| !v.is_null())
            .cloned(),
    })
}

fn loose_phase(position: usize, value: &Value) -> Result<Phase, ValidationError> {
    let Value::Object(fields) = value else {
        return Err(roadmap_error(
            ValidationFailure::WrongType,
            format!("phase {} must be an object", position),
        ));
    };

    let phase_name = match fields.get("phaseName") {
        Some(Value::String(name)) if !name.trim().is_empty() => name.clone(),
        _ => {
            return Err(roadmap_error(
                ValidationFailure::MissingField,
                format!("phase {} is missing 'phaseName'", position),
            ));
        }
    };

    let actionable_steps = text_list(fields.get("actionableSteps"));
    let completed_steps: BTreeSet<usize> = fields
        .get("completedSteps")
        .and_then(Value::as_array)
        .map(|steps| {
            steps
                .iter()
                .filter_map(Value::as_u64)
                .map(|step| step as usize)
                .filter(|step| *step < actionable_steps.len())
                .collect()
        })
        .unwrap_or_default();

    Ok(Phase {
        phase_name,
        description: text_or_default(fields.get("description")),
        recommended_courses: fields
            .get("recommendedCourses")
            .and_then(Value::as_array)
            .map(|courses| courses.iter().filter_map(loose_course).collect())
            .unwrap_or_default(),
        industry_trends: text_or_default(fields.get("industryTrends")),
        quiz_completed: fields.get("quizCompleted").and_then(Value::as_bool).unwrap_or(false),
        completed_steps,
        actionable_steps,
    })
}

fn loose_course(value: &Value) -> Option<CourseRef> {
    let fields: &Map<String, Value> = value.as_object()?;
    let optional = |key: &str| fields.get(key).and_then(Value::as_str).map(str::to_string);

    Some(CourseRef {
        platform: text_or_default(fields.get("platform")),
        title: text_or_default(fields.get("title")),
        link: text_or_default(fields.get("link")),
        price: text_or_default(fields.get("price")),
        duration: text_or_default(fields.get("duration")),
        mentor: optional("mentor"),
        image: optional("image"),
        description: optional("description"),
    })
}

fn text_or_default(value: Option<&Value>) -> String {
    value.and_then(Value::as_str).unwrap_or_default().to_string()
}

fn text_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(Value::as_str).map(str::to_string).collect())
        .unwrap_or_default()
}

/// Question counts used by the interview pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterviewCounts {
    /// Segments the pattern scan must find for the set to count as generated.
    pub requested: usize,
    /// Minimum `Question` lines for the line scan; also the kept length.
    pub line_scan: usize,
}

impl Default for InterviewCounts {
    fn default() -> Self {
        Self { requested: 50, line_scan: 10 }
    }
}

/// Resolve interview questions from raw model text, falling back when short.
pub fn resolve_interview_questions(
    raw: &str,
    phase_name: &str,
    counts: InterviewCounts,
) -> InterviewQuestionSet {
    let segments = scan_question_segments(raw);
    if segments.len() == counts.requested {
        return InterviewQuestionSet {
            phase_name: phase_name.to_string(),
            questions: segments,
            source: QuestionSource::Generated,
        };
    }

    let mut lines = scan_question_lines(raw);
    if lines.len() >= counts.line_scan {
        lines.truncate(counts.line_scan);
        return InterviewQuestionSet {
            phase_name: phase_name.to_string(),
            questions: lines,
            source: QuestionSource::LineScan,
        };
    }

    fallback_interview_questions(phase_name)
}

/// The fixed ten-question set used when model output is unusable.
pub fn fallback_interview_questions(phase_name: &str) -> InterviewQuestionSet {
    let questions = vec![
        format!("What experience do you have with {} technologies?", phase_name),
        format!("How would you approach debugging in a {} project?", phase_name),
        "Describe your workflow when developing a new feature.".to_string(),
        "How do you stay updated with the latest trends in web development?".to_string(),
        "What challenges have you faced in previous projects?".to_string(),
        "How do you ensure code quality?".to_string(),
        "Describe your experience with version control systems.".to_string(),
        "How do you approach optimization in your projects?".to_string(),
        "What team collaboration tools have you used?".to_string(),
        "How do you handle tight deadlines?".to_string(),
    ];

    InterviewQuestionSet {
        phase_name: phase_name.to_string(),
        questions,
        source: QuestionSource::Fallback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn question(id: u64) -> Value {
        json!({
            "id": id,
            "question": format!("Question text {}", id),
            "options": ["A", "B", "C", "D"],
            "correctAnswer": "B"
        })
    }

    fn quiz_with(questions: Vec<Value>) -> Value {
        json!({ "questions": questions })
    }

    fn ten_questions() -> Vec<Value> {
        (1..=10).map(question).collect()
    }

    #[test]
    fn accepts_well_formed_quiz() {
        let quiz = validate_quiz(&quiz_with(ten_questions())).unwrap();
        assert_eq!(quiz.questions.len(), 10);
        assert_eq!(quiz.questions[0].id, 1);
        assert_eq!(quiz.questions[9].correct_answer, "B");
    }

    #[test]
    fn rejects_missing_questions() {
        let err = validate_quiz(&json!({"quiz": []})).unwrap_err();
        assert_eq!(err.reason, ValidationFailure::MissingField);
    }

    #[test]
    fn rejects_wrong_question_count() {
        let mut questions = ten_questions();
        questions.pop();
        let err = validate_quiz(&quiz_with(questions)).unwrap_err();
        assert_eq!(err.reason, ValidationFailure::WrongCount);
        assert!(err.detail.contains("Expected 10 questions, got 9"));
    }

    #[test]
    fn rejects_question_with_three_options() {
        let mut questions = ten_questions();
        questions[4]["options"] = json!(["A", "B", "C"]);
        let err = validate_quiz(&quiz_with(questions)).unwrap_err();
        assert_eq!(err.reason, ValidationFailure::WrongCount);
        assert!(err.detail.starts_with("question 5"));
    }

    #[test]
    fn rejects_duplicate_options() {
        let mut questions = ten_questions();
        questions[0]["options"] = json!(["A", "B", "B", "D"]);
        let err = validate_quiz(&quiz_with(questions)).unwrap_err();
        assert_eq!(err.reason, ValidationFailure::WrongCount);
    }

    #[test]
    fn rejects_answer_outside_options() {
        let mut questions = ten_questions();
        questions[2]["correctAnswer"] = json!("E");
        let err = validate_quiz(&quiz_with(questions)).unwrap_err();
        assert_eq!(err.reason, ValidationFailure::AnswerNotInOptions);
    }

    #[test]
    fn rejects_missing_or_zero_id() {
        let mut questions = ten_questions();
        questions[1].as_object_mut().unwrap().remove("id");
        assert_eq!(
            validate_quiz(&quiz_with(questions)).unwrap_err().reason,
            ValidationFailure::MissingField
        );

        let mut questions = ten_questions();
        questions[1]["id"] = json!(0);
        assert_eq!(
            validate_quiz(&quiz_with(questions)).unwrap_err().reason,
            ValidationFailure::MissingField
        );
    }

    #[test]
    fn accepts_numeric_string_id() {
        let mut questions = ten_questions();
        questions[0]["id"] = json!("1");
        assert_eq!(validate_quiz(&quiz_with(questions)).unwrap().questions[0].id, 1);
    }

    #[test]
    fn rejects_non_text_option() {
        let mut questions = ten_questions();
        questions[0]["options"] = json!(["A", 2, "C", "D"]);
        assert_eq!(
            validate_quiz(&quiz_with(questions)).unwrap_err().reason,
            ValidationFailure::WrongType
        );
    }

    #[test]
    fn rejects_empty_question_text() {
        let mut questions = ten_questions();
        questions[7]["question"] = json!("");
        assert_eq!(
            validate_quiz(&quiz_with(questions)).unwrap_err().reason,
            ValidationFailure::MissingField
        );
    }

    #[test]
    fn validation_is_repeatable() {
        let mut questions = ten_questions();
        questions[3]["correctAnswer"] = json!("Z");
        let payload = quiz_with(questions);
        assert_eq!(validate(&payload, ShapeId::Quiz), validate(&payload, ShapeId::Quiz));

        let payload = quiz_with(ten_questions());
        assert_eq!(validate(&payload, ShapeId::Quiz), validate(&payload, ShapeId::Quiz));
    }

    #[test]
    fn roadmap_accepts_wrapped_and_bare_shapes() {
        let bare = json!({
            "title": "X",
            "overview": "Y",
            "phases": [{"phaseName": "Beginner"}]
        });
        let wrapped = json!({"userId": "u", "userName": "Om", "roadmap": bare.clone()});

        assert_eq!(validate_roadmap(&bare).unwrap(), validate_roadmap(&wrapped).unwrap());
        assert_eq!(validate_roadmap(&bare).unwrap().title, "X");
    }

    #[test]
    fn roadmap_requires_non_empty_phases() {
        let err = validate_roadmap(&json!({"title": "X"})).unwrap_err();
        assert_eq!(err.reason, ValidationFailure::MissingField);

        let err = validate_roadmap(&json!({"title": "X", "phases": []})).unwrap_err();
        assert_eq!(err.reason, ValidationFailure::WrongCount);

        let err = validate_roadmap(&json!({"phases": "Beginner"})).unwrap_err();
        assert_eq!(err.reason, ValidationFailure::WrongType);
    }

    #[test]
    fn roadmap_requires_phase_names() {
        let err = validate_roadmap(&json!({"phases": [{"description": "nameless"}]})).unwrap_err();
        assert_eq!(err.reason, ValidationFailure::MissingField);
    }

    #[test]
    fn roadmap_phase_fields_are_best_effort() {
        let payload = json!({
            "phases": [{
                "phaseName": "Beginner",
                "actionableSteps": ["CSS", 3, "JavaScript"],
                "recommendedCourses": [
                    {"platform": "Udemy", "title": "JS", "price": 89, "mentor": "Jonas"},
                    "not a course"
                ],
                "industryTrends": ["not", "text"],
                "completedSteps": [0, 7]
            }]
        });

        let roadmap = validate_roadmap(&payload).unwrap();
        let phase = &roadmap.phases[0];
        assert_eq!(roadmap.title, "");
        assert_eq!(phase.actionable_steps, vec!["CSS", "JavaScript"]);
        assert_eq!(phase.recommended_courses.len(), 1);
        assert_eq!(phase.recommended_courses[0].price, "");
        assert_eq!(phase.recommended_courses[0].mentor.as_deref(), Some("Jonas"));
        assert_eq!(phase.industry_trends, "");
        assert_eq!(phase.completed_steps.iter().copied().collect::<Vec<_>>(), vec![0]);
        assert!(!phase.quiz_completed);
    }

    fn numbered(count: usize) -> String {
        (1..=count).map(|n| format!("Question {}: Topic {}?\n", n, n)).collect()
    }

    #[test]
    fn interview_accepts_exact_requested_count() {
        let set = resolve_interview_questions(&numbered(50), "Beginner", InterviewCounts::default());
        assert_eq!(set.source, QuestionSource::Generated);
        assert_eq!(set.questions.len(), 50);
        assert_eq!(set.questions[49], "Topic 50?");
    }

    #[test]
    fn interview_truncates_line_scan_to_ten() {
        let set = resolve_interview_questions(&numbered(12), "Beginner", InterviewCounts::default());
        assert_eq!(set.source, QuestionSource::LineScan);
        assert_eq!(set.questions.len(), 10);
        assert_eq!(set.questions[0], "Topic 1?");
    }

    #[test]
    fn interview_more_than_requested_falls_to_line_scan() {
        let set = resolve_interview_questions(&numbered(51), "Expert", InterviewCounts::default());
        assert_eq!(set.source, QuestionSource::LineScan);
        assert_eq!(set.questions.len(), 10);
    }

    #[test]
    fn interview_short_output_uses_fallback() {
        let set = resolve_interview_questions(&numbered(9), "Beginner", InterviewCounts::default());
        assert_eq!(set, fallback_interview_questions("Beginner"));
        assert!(set.source.is_fallback());
        assert_eq!(set.questions.len(), 10);
        assert_eq!(set.questions[0], "What experience do you have with Beginner technologies?");
        assert_eq!(set.questions[9], "How do you handle tight deadlines?");
    }

    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prose_without_questions_always_falls_back(
            raw in "[a-z .,\n]{0,200}",
            phase in "[A-Z][a-z]{2,12}",
        ) {
            let set = resolve_interview_questions(&raw, &phase, InterviewCounts::default());
            prop_assert_eq!(set, fallback_interview_questions(&phase));
        }

        #[test]
        fn validated_quiz_revalidates_unchanged(answer in 0usize..4) {
            let questions: Vec<Value> = (1..=10u64)
                .map(|id| {
                    let options = ["w", "x", "y", "z"];
                    json!({
                        "id": id,
                        "question": format!("Q{}?", id),
                        "options": options,
                        "correctAnswer": options[answer],
                    })
                })
                .collect();
            let first = validate_quiz(&json!({ "questions": questions })).unwrap();
            let again = validate_quiz(&serde_json::to_value(&first).unwrap()).unwrap();
            prop_assert_eq!(first, again);
        }
    }
}
