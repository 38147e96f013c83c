//! Service-provider eligibility for a set of answers.

use crate::catalog::Catalog;
use crate::domain::answers::QuizAnswers;
use crate::domain::provider::ServiceProvider;
use crate::recommend::ProviderMatch;

/// Providers matching the stated ecosystem and location, with packages
/// narrowed to the budget.
///
/// With a budget, providers left with no affordable package are dropped and
/// `best_package` is the highest-priced affordable one. Results are ordered by
/// how many of the provider's services line up with the stated goals, then by
/// catalog order.
pub fn eligible_providers(catalog: &Catalog, answers: &QuizAnswers) -> Vec<ProviderMatch> {
    let ecosystem = answers.ecosystem();
    let location = answers.location();
    let budget = answers.budget();

    let mut matches: Vec<(usize, ProviderMatch)> = catalog
        .providers()
        .iter()
        .filter(|provider| ecosystem.map_or(true, |ecosystem| provider.supports_ecosystem(ecosystem)))
        .filter(|provider| location.map_or(true, |location| provider.serves_location(location)))
        .filter_map(|provider| {
            let provider_match = narrow_to_budget(provider, budget)?;
            Some((goal_alignment(provider, catalog, answers), provider_match))
        })
        .collect();

    matches.sort_by(|a, b| b.0.cmp(&a.0));
    matches.into_iter().map(|(_, provider_match)| provider_match).collect()
}

fn narrow_to_budget(provider: &ServiceProvider, budget: Option<f64>) -> Option<ProviderMatch> {
    let Some(budget) = budget else {
        return Some(ProviderMatch { provider: provider.clone(), best_package: None });
    };

    let packages = provider.affordable_packages(budget);
    let best_package = packages.iter().max_by(|a, b| a.price.total_cmp(&b.price)).cloned()?;

    Some(ProviderMatch {
        provider: ServiceProvider { packages, ..provider.clone() },
        best_package: Some(best_package),
    })
}

/// Number of provider services naming a stated goal or one of its categories.
fn goal_alignment(provider: &ServiceProvider, catalog: &Catalog, answers: &QuizAnswers) -> usize {
    let goals = answers.goals();
    provider
        .services
        .iter()
        .filter(|service| {
            goals.iter().any(|goal| {
                service.eq_ignore_ascii_case(goal)
                    || catalog.goal_mapping().resolve(goal).is_some_and(|profile| profile.matches_category(service))
            })
        })
        .count()
}

#[cfg(test)]
mod tests {
    use super::eligible_providers;
    use crate::catalog::Catalog;
    use crate::domain::answers::{AnswerValue, QuizAnswers};

    fn ids(answers: &QuizAnswers) -> Vec<String> {
        eligible_providers(&Catalog::builtin(), answers)
            .into_iter()
            .map(|provider_match| provider_match.provider.id.0)
            .collect()
    }

    #[test]
    fn no_answers_keeps_every_provider_in_catalog_order() {
        let matches = eligible_providers(&Catalog::builtin(), &QuizAnswers::new());
        assert_eq!(matches.len(), Catalog::builtin().providers().len());
        assert!(matches.iter().all(|provider_match| provider_match.best_package.is_none()));
        assert_eq!(matches[0].provider.id.as_str(), "guardian-home");
    }

    #[test]
    fn ecosystem_and_location_filter_providers() {
        let answers = QuizAnswers::new()
            .with("ecosystem", AnswerValue::SingleSelect("apple".to_owned()))
            .with("location", AnswerValue::SingleSelect("ny".to_owned()));

        assert_eq!(ids(&answers), vec!["homeconnect-installers".to_owned()]);
    }

    #[test]
    fn budget_narrows_packages_and_picks_the_priciest_affordable() {
        let answers = QuizAnswers::new().with("budget", AnswerValue::Range(50.0));
        let matches = eligible_providers(&Catalog::builtin(), &answers);

        let guardian = matches
            .iter()
            .find(|provider_match| provider_match.provider.id.as_str() == "guardian-home")
            .expect("guardian has affordable packages");
        assert_eq!(guardian.provider.packages.len(), 2);
        assert_eq!(guardian.best_package.as_ref().map(|package| package.name.as_str()), Some("Interactive"));

        assert!(matches.iter().all(|provider_match| provider_match.provider.id.as_str() != "brightpath-electric"));
    }

    #[test]
    fn providers_serving_stated_goals_rank_first() {
        let answers = QuizAnswers::new().with("goals", AnswerValue::MultiSelect(vec!["networking".to_owned()]));
        assert_eq!(ids(&answers).first().map(String::as_str), Some("homeconnect-installers"));
    }
}
