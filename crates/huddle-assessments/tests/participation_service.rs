use std::sync::Arc;

use huddle_assessments::assessment::{AssessmentService, NewAssessment};
use huddle_assessments::participation::ParticipationService;
use huddle_core::models::assessment::ResultCallToAction;
use huddle_core::models::participation::QuestionAnswered;
use huddle_storage::store::MemoryStore;
use uuid::Uuid;

fn service(store: &MemoryStore) -> ParticipationService {
    ParticipationService::new(Arc::new(store.clone()), "https://quiz.example.com/")
}

fn answered(question: &str, answer: &str, description: &str) -> QuestionAnswered {
    QuestionAnswered {
        question_id: Uuid::new_v4(),
        question_text: question.to_string(),
        answer_id: Uuid::new_v4(),
        answer_text: answer.to_string(),
        result_description: description.to_string(),
        result_image: format!("https://img/{answer}.png"),
    }
}

#[tokio::test]
async fn create_then_fetch_participation() {
    let store = MemoryStore::new();
    let service = service(&store);
    let assessment_id = Uuid::new_v4();

    let created = service
        .create_new_participation("sam@example.com", assessment_id, "Color Quiz")
        .await
        .unwrap();
    assert!(!created.completed);
    assert!(created.questions_answered.is_empty());
    assert_eq!(created.assessment_id, assessment_id);

    let fetched = service
        .get_participation_by_id(&created.id.to_string())
        .await
        .unwrap();
    assert_eq!(fetched, Some(created));

    assert!(service.get_participation_by_id("nope").await.is_err());
}

#[tokio::test]
async fn answering_appends_and_completes() {
    let store = MemoryStore::new();
    let service = service(&store);
    let participation = service
        .create_new_participation("sam@example.com", Uuid::new_v4(), "Color Quiz")
        .await
        .unwrap();

    let participation = service
        .answer_question(participation, answered("Pick a color", "Red", "Bold"), false)
        .await
        .unwrap();
    assert!(!participation.completed);

    let participation = service
        .answer_question(participation, answered("Pick a shape", "Circle", "Smooth"), true)
        .await
        .unwrap();
    assert!(participation.completed);

    let stored = service
        .get_participation_by_id(&participation.id.to_string())
        .await
        .unwrap()
        .unwrap();
    let texts: Vec<&str> = stored
        .questions_answered
        .iter()
        .map(|qa| qa.answer_text.as_str())
        .collect();
    assert_eq!(texts, vec!["Red", "Circle"]);
    assert!(stored.completed);
}

#[tokio::test]
async fn permalink_uses_root_url() {
    let store = MemoryStore::new();
    let service = service(&store);
    let id = Uuid::new_v4();
    assert_eq!(
        service.participation_permalink(id),
        format!("https://quiz.example.com/participation/{id}")
    );
}

#[tokio::test]
async fn results_list_answers_and_call_to_action() {
    let store = MemoryStore::new();
    let participations = service(&store);
    let assessments = AssessmentService::new(Arc::new(store.clone()));

    let assessment = assessments
        .create_new_assessment(
            NewAssessment {
                name: "Color Quiz".to_string(),
                description: "d".to_string(),
                call_to_action: "Start".to_string(),
                image_url: "x.png".to_string(),
                result_call_to_action: ResultCallToAction {
                    heading: "Book a session".to_string(),
                    copy: "We can help".to_string(),
                    button_text: "Book now".to_string(),
                    url: "https://example.com/book".to_string(),
                },
            },
            "admin",
        )
        .await
        .unwrap();

    let participation = participations
        .create_new_participation("sam@example.com", assessment.id, &assessment.name)
        .await
        .unwrap();
    let participation = participations
        .answer_question(participation, answered("Pick <one>", "Red", "Bold & bright"), true)
        .await
        .unwrap();

    let text = participations
        .plain_text_results(&participation, Some(&assessment))
        .unwrap();
    assert!(text.contains("Thanks for taking Color Quiz."));
    assert!(text.contains("Pick <one>"));
    assert!(text.contains("Your answer: Red"));
    assert!(text.contains("Bold & bright"));
    assert!(text.contains("Book now: https://example.com/book"));
    assert!(text.contains(&participations.participation_permalink(participation.id)));

    let html = participations.html_results(&participation, Some(&assessment)).unwrap();
    assert!(html.contains("Pick &lt;one&gt;"));
    assert!(html.contains("Bold &amp; bright"));
    assert!(html.contains("Book a session"));

    let without_assessment = participations.plain_text_results(&participation, None).unwrap();
    assert!(without_assessment.contains("Your answer: Red"));
    assert!(!without_assessment.contains("Book now"));
}
