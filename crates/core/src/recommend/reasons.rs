//! Explanation text attached to each ranked product.

use crate::catalog::Catalog;
use crate::domain::answers::{InstallationPreference, QuizAnswers};
use crate::domain::product::Product;
use crate::scoring::rules;
use crate::scoring::ScoringWeights;

/// Reasons in fixed priority order: goal, ecosystem, budget, installation.
/// Stops once `limit` reasons are collected.
pub fn explain(
    product: &Product,
    answers: &QuizAnswers,
    catalog: &Catalog,
    weights: &ScoringWeights,
    limit: usize,
) -> Vec<String> {
    let candidates = [
        goal_reason(product, answers, catalog),
        ecosystem_reason(product, answers, catalog),
        budget_reason(product, answers, weights),
        installation_reason(product, answers),
    ];

    candidates.into_iter().flatten().take(limit).collect()
}

fn goal_reason(product: &Product, answers: &QuizAnswers, catalog: &Catalog) -> Option<String> {
    answers.goals().into_iter().find_map(|goal| {
        let profile = catalog.goal_mapping().resolve(goal)?;
        rules::goal_match(product, profile).is_aligned().then(|| format!("Matches your {goal} goal"))
    })
}

fn ecosystem_reason(product: &Product, answers: &QuizAnswers, catalog: &Catalog) -> Option<String> {
    let ecosystem = answers.ecosystem()?;
    let terms = catalog.ecosystem_terms();
    rules::ecosystem_match(product, ecosystem, terms.terms(ecosystem))
        .is_match()
        .then(|| format!("Compatible with your {} devices", terms.display_name(ecosystem)))
}

fn budget_reason(product: &Product, answers: &QuizAnswers, weights: &ScoringWeights) -> Option<String> {
    let budget = answers.budget()?;
    let ratio = product.price / budget;
    if ratio <= weights.great_value_ratio {
        Some("Great value for your budget".to_string())
    } else if ratio <= 1.0 {
        Some("Fits within your budget".to_string())
    } else {
        None
    }
}

fn installation_reason(product: &Product, answers: &QuizAnswers) -> Option<String> {
    match answers.installation()? {
        InstallationPreference::Diy if rules::is_diy_friendly(product) && !product.is_provider_linked() => {
            Some("Easy DIY installation".to_string())
        }
        InstallationPreference::Professional
            if product.is_provider_linked() || rules::offers_professional_install(product) =>
        {
            Some("Professional installation available".to_string())
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::explain;
    use crate::catalog::Catalog;
    use crate::domain::answers::{AnswerValue, QuizAnswers};
    use crate::domain::product::ProductId;
    use crate::scoring::ScoringWeights;

    fn builtin_product(id: &str) -> (Catalog, crate::domain::product::Product) {
        let catalog = Catalog::builtin();
        let product = catalog.product(&ProductId::new(id)).cloned().expect("seed product");
        (catalog, product)
    }

    fn answers() -> QuizAnswers {
        QuizAnswers::new()
            .with("goals", AnswerValue::MultiSelect(vec!["energy".to_owned(), "security".to_owned()]))
            .with("ecosystem", AnswerValue::SingleSelect("alexa".to_owned()))
            .with("budget", AnswerValue::Range(250.0))
            .with("installation", AnswerValue::SingleSelect("diy".to_owned()))
    }

    #[test]
    fn reasons_follow_priority_and_stop_at_two() {
        let (catalog, doorbell) = builtin_product("ring-video-doorbell");
        let reasons = explain(&doorbell, &answers(), &catalog, &ScoringWeights::default(), 2);

        assert_eq!(
            reasons,
            vec!["Matches your security goal".to_owned(), "Compatible with your Alexa devices".to_owned()]
        );
    }

    #[test]
    fn budget_and_installation_fill_in_when_earlier_reasons_are_missing() {
        let (catalog, doorbell) = builtin_product("ring-video-doorbell");
        let answers = QuizAnswers::new()
            .with("budget", AnswerValue::Range(250.0))
            .with("installation", AnswerValue::SingleSelect("diy".to_owned()));

        let reasons = explain(&doorbell, &answers, &catalog, &ScoringWeights::default(), 2);
        assert_eq!(reasons, vec!["Great value for your budget".to_owned(), "Easy DIY installation".to_owned()]);
    }

    #[test]
    fn near_budget_reads_as_fits_within_budget() {
        let (catalog, lock) = builtin_product("august-smart-lock");
        let answers = QuizAnswers::new().with("budget", AnswerValue::Range(250.0));

        let reasons = explain(&lock, &answers, &catalog, &ScoringWeights::default(), 2);
        assert_eq!(reasons, vec!["Fits within your budget".to_owned()]);
    }

    #[test]
    fn professional_reason_applies_to_provider_products() {
        let (catalog, alarm) = builtin_product("guardian-pro-alarm");
        let answers = QuizAnswers::new().with("installation", AnswerValue::SingleSelect("professional".to_owned()));

        let reasons = explain(&alarm, &answers, &catalog, &ScoringWeights::default(), 2);
        assert_eq!(reasons, vec!["Professional installation available".to_owned()]);
    }

    #[test]
    fn empty_answers_produce_no_reasons() {
        let (catalog, doorbell) = builtin_product("ring-video-doorbell");
        assert!(explain(&doorbell, &QuizAnswers::new(), &catalog, &ScoringWeights::default(), 2).is_empty());
    }
}
