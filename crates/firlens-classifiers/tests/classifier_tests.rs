//! End-to-end classifier tests against the reference complaint fixture.

use firlens_classifiers::{ComplaintClassifier, UnavailableRecordSource, ACCURACY_FLOOR};
use firlens_core::{DecisionPath, Label, TrainingExample};

fn fixture() -> Vec<TrainingExample> {
    vec![
        TrainingExample::fir("My phone was stolen from the bus"),
        TrainingExample::fir("There was a robbery at my home"),
        TrainingExample::fir("Victim of assault near market"),
        TrainingExample::fir("Someone threatened me with a knife"),
        TrainingExample::fir("Car theft reported last night"),
        TrainingExample::non_fir("Apply for police verification certificate"),
        TrainingExample::non_fir("Need address proof and NOC"),
        TrainingExample::non_fir("Request clearance certificate for passport"),
        TrainingExample::non_fir("Document verification required"),
        TrainingExample::non_fir("Service issue with helpdesk"),
        TrainingExample::fir("Burglary attempt in apartment"),
        TrainingExample::fir("Pickpocketing incident reported"),
        TrainingExample::fir("Harassment complaint at workplace"),
        TrainingExample::fir("Extortion calls received"),
        TrainingExample::non_fir("Application for character certificate"),
        TrainingExample::non_fir("Lost document request"),
        TrainingExample::non_fir("Passport police verification appointment"),
        TrainingExample::fir("Attack by unknown persons"),
        TrainingExample::fir("Molestation case report"),
        TrainingExample::non_fir("Need NOC for address change"),
        TrainingExample::non_fir(
            "I lost my personal item and could not find it despite searching the surrounding area",
        ),
    ]
}

#[test]
fn test_fixture_accuracy_floor() {
    let classifier = ComplaintClassifier::new().unwrap();
    let examples = fixture();

    let outcome = classifier.train_from_examples(&examples);
    assert_eq!(outcome.documents, 21);
    assert_eq!(outcome.vocab_size, 63);

    let eval = classifier.evaluate(&examples);
    assert_eq!(eval.total, 21);
    assert!(
        eval.meets(ACCURACY_FLOOR),
        "accuracy {:.3} below floor, misclassified: {:?}",
        eval.accuracy,
        eval.misclassified
    );
}

#[test]
fn test_fixture_confident_fir_predictions() {
    let classifier = ComplaintClassifier::new().unwrap();
    classifier.train_from_examples(&fixture());

    let result = classifier.classify_text("My phone was stolen from the bus");
    assert_eq!(result.path, DecisionPath::Bayes);
    assert_eq!(result.label, Label::Fir);
    assert!(result.prob_fir > 0.85 && result.prob_fir < 0.9);

    let result = classifier.classify_text("Car theft reported last night");
    assert!(result.prob_fir > 0.9);
}

#[test]
fn test_preprocess_scenario() {
    let classifier = ComplaintClassifier::new().unwrap();
    assert_eq!(
        classifier.preprocess("My phone was stolen from the bus"),
        vec!["phone", "stolen", "bus"]
    );
}

#[tokio::test]
async fn test_rule_override_regardless_of_model() {
    let untrained_tokens = vec!["app", "police", "verification", "certificate"];

    let seeded = ComplaintClassifier::new().unwrap();
    seeded.init(&UnavailableRecordSource::default()).await;

    let trained = ComplaintClassifier::new().unwrap();
    trained.train_from_examples(&fixture());

    for classifier in [&seeded, &trained] {
        let result = classifier.classify_text("Apply for police verification certificate");
        assert_eq!(result.label, Label::NonFir);
        assert_eq!(result.prob_fir, 0.35);
        assert_eq!(result.prob_non_fir, 0.65);
        assert_eq!(result.tokens, untrained_tokens);
    }
}

#[test]
fn test_empty_training_set_does_not_fail() {
    let classifier = ComplaintClassifier::new().unwrap();
    classifier.train_from_examples(&[]);

    let model = classifier.model();
    assert!(model.vocab().is_empty());
    assert_eq!(model.priors().fir, 0.5);
    assert_eq!(model.priors().non_fir, 0.5);

    for text in ["", "robbery", "lost passport", "something happened"] {
        let result = classifier.classify_text(text);
        assert!((result.prob_fir + result.prob_non_fir - 1.0).abs() < 1e-9);
    }
}

#[tokio::test]
async fn test_seed_fallback_classification() {
    let classifier = ComplaintClassifier::new().unwrap();
    classifier.init(&UnavailableRecordSource::default()).await;

    let result = classifier.classify_text("I want to give feedback");
    assert_eq!(result.path, DecisionPath::RuleOverride);
    assert_eq!(result.tokens, vec!["i", "want", "give", "feedback"]);

    let result = classifier.classify_text("My phone was stolen by robbers");
    assert_eq!(result.label, Label::Fir);
}

#[test]
fn test_examples_from_json() {
    let examples: Vec<TrainingExample> = serde_json::from_str(
        r#"[
            {"text": "Chain snatching near the temple", "label": "fir"},
            {"text": null, "label": "fir"},
            {"text": "Need NOC", "label": "NON-FIR"},
            {"text": "Parking pass", "label": "bogus"}
        ]"#,
    )
    .unwrap();

    let classifier = ComplaintClassifier::new().unwrap();
    let outcome = classifier.train_from_examples(&examples);
    assert_eq!(outcome.documents, 4);
    assert_eq!(outcome.fir_documents, 2);
    assert_eq!(outcome.non_fir_documents, 2);
}
