use triage_core::SymptomInput;
use triage_engine::{normalize, tokenize, tokenize_input};

#[test]
fn folds_case_and_strips_punctuation() {
    let tokens = tokenize("Fever, COUGH!! fatigue");
    assert_eq!(tokens.tokens(), ["fever", "cough", "fatigue"]);
    assert_eq!(tokens.text(), "fever, cough!! fatigue");
}

#[test]
fn keeps_repeated_tokens_in_source_order() {
    let tokens = tokenize("cough; fever; cough");
    assert_eq!(tokens.tokens(), ["cough", "fever", "cough"]);
}

#[test]
fn digits_and_hyphens_split_tokens() {
    let tokens = tokenize("fever 39C, sore-throat");
    assert_eq!(tokens.tokens(), ["fever", "c", "sore", "throat"]);
}

#[test]
fn empty_and_symbol_only_input_yield_no_tokens() {
    assert!(tokenize("").is_empty());
    assert!(tokenize("  ,,!! 123 ").is_empty());
    assert!(tokenize_input(&SymptomInput::default()).is_empty());
}

#[test]
fn phrase_lists_are_joined_with_comma_space() {
    let input = SymptomInput::List(vec![
        "Chest pain".to_string(),
        "Shortness of breath".to_string(),
    ]);
    let tokens = tokenize_input(&input);

    assert_eq!(tokens.text(), "chest pain, shortness of breath");
    assert_eq!(
        tokens.tokens(),
        ["chest", "pain", "shortness", "of", "breath"]
    );
    assert!(tokens.contains_phrase("pain, shortness"));
}

#[test]
fn normalize_only_lowercases() {
    assert_eq!(normalize("Sore-Throat, FEVER"), "sore-throat, fever");
}

#[test]
fn token_membership_is_exact() {
    let tokens = tokenize("breathlessness");
    assert!(tokens.has_token("breathlessness"));
    assert!(!tokens.has_token("breath"));
    assert!(tokens.contains_phrase("breath"));
}
