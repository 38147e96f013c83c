use std::fs;
use std::sync::Arc;

use advisor_core::domain::answers::QuizAnswers;
use serde_json::{json, Value};

use super::{build_recommender, input_failure, open_store, to_json, CommandResult, Failure, Invocation};

#[derive(Debug, Clone, Default)]
pub struct RecommendArgs {
    /// Inline JSON object, or `@path` to read one from a file.
    pub answers: String,
    pub no_save: bool,
}

pub fn run(invocation: &Invocation, args: &RecommendArgs) -> CommandResult {
    match execute(invocation, args) {
        Ok((message, data)) => CommandResult::success_with_data("recommend", message, Some(data)),
        Err(failure) => CommandResult::from_failure("recommend", failure),
    }
}

fn execute(invocation: &Invocation, args: &RecommendArgs) -> Result<(String, Value), Failure> {
    let config = invocation.load_config()?;
    let answers = parse_answers(&args.answers)?;
    let recommender = Arc::new(build_recommender(&config, invocation.load_catalog()?));

    let result = recommender.generate_recommendations(&answers);

    let saved = if args.no_save {
        Value::Null
    } else {
        let store = open_store(&config, Arc::clone(&recommender))?;
        let report = store.save(&result, &answers);
        json!({ "result": report.result.as_str(), "answers": report.answers.as_str() })
    };

    let message = format!(
        "generated {} top picks across {} categories",
        result.top_recommendations.len(),
        result.recommendations_by_category.len()
    );
    Ok((message, json!({ "saved": saved, "result": to_json(&result)? })))
}

fn parse_answers(raw: &str) -> Result<QuizAnswers, Failure> {
    let text = match raw.strip_prefix('@') {
        Some(path) => fs::read_to_string(path)
            .map_err(|error| ("input_read", format!("could not read answers file `{path}`: {error}"), 3))?,
        None => raw.to_string(),
    };

    let value: Value = serde_json::from_str(&text)
        .map_err(|error| ("invalid_answers", format!("answers are not valid JSON: {error}"), 3))?;
    QuizAnswers::from_json_value(&value).map_err(|error| input_failure(error.into()))
}
