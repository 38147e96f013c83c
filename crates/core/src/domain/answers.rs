//! Questionnaire answers as consumed by scoring.
//!
//! Answers arrive from the questionnaire as an untyped JSON object and are
//! validated once, here, into [`QuizAnswers`]. Scoring only reads the question
//! ids listed in [`questions`]; everything else is carried through opaquely.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::DomainError;

/// Question ids that carry meaning for scoring and provider eligibility.
pub mod questions {
    pub const GOALS: &str = "goals";
    pub const INSTALLATION: &str = "installation";
    pub const ECOSYSTEM: &str = "ecosystem";
    pub const BUDGET: &str = "budget";
    /// Accepted spellings of the postal/region question, checked in order.
    pub const LOCATION: &[&str] = &["location", "zipCode", "postalCode"];
}

const NO_ECOSYSTEM: &str = "none";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Range(f64),
    SingleSelect(String),
    MultiSelect(Vec<String>),
}

impl AnswerValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::SingleSelect(value) => Some(value.as_str()),
            _ => None,
        }
    }

    /// Multi-select values, with a single selection treated as a one-item list.
    pub fn as_list(&self) -> Vec<&str> {
        match self {
            Self::MultiSelect(values) => values.iter().map(String::as_str).collect(),
            Self::SingleSelect(value) => vec![value.as_str()],
            Self::Range(_) => Vec::new(),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Range(value) => Some(*value),
            Self::SingleSelect(value) => value.trim().parse::<f64>().ok(),
            Self::MultiSelect(_) => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InstallationPreference {
    Diy,
    Professional,
}

impl InstallationPreference {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "diy" => Some(Self::Diy),
            "professional" => Some(Self::Professional),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuizAnswers {
    answers: BTreeMap<String, AnswerValue>,
}

impl QuizAnswers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, question: impl Into<String>, value: AnswerValue) -> Self {
        self.insert(question, value);
        self
    }

    pub fn insert(&mut self, question: impl Into<String>, value: AnswerValue) {
        self.answers.insert(question.into(), value);
    }

    pub fn get(&self, question: &str) -> Option<&AnswerValue> {
        self.answers.get(question)
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AnswerValue)> {
        self.answers.iter().map(|(question, value)| (question.as_str(), value))
    }

    /// Validate a raw questionnaire payload.
    ///
    /// `null` entries are treated as unanswered and dropped. Booleans, nested
    /// objects and arrays holding anything other than strings are rejected.
    /// `budget` additionally accepts numeric strings and must not be negative.
    pub fn from_json_value(value: &Value) -> Result<Self, DomainError> {
        let Some(object) = value.as_object() else {
            return Err(DomainError::InvalidAnswer {
                question: "<root>".to_owned(),
                reason: "answers must be a JSON object".to_owned(),
            });
        };

        let mut answers = Self::new();
        for (question, raw) in object {
            let parsed = match raw {
                Value::Null => continue,
                Value::Number(number) => {
                    AnswerValue::Range(number.as_f64().ok_or_else(|| invalid(question, "number is out of range"))?)
                }
                Value::String(text) => AnswerValue::SingleSelect(text.clone()),
                Value::Array(items) => {
                    let values = items
                        .iter()
                        .map(|item| item.as_str().map(str::to_owned))
                        .collect::<Option<Vec<_>>>()
                        .ok_or_else(|| invalid(question, "multi-select answers must contain only strings"))?;
                    AnswerValue::MultiSelect(values)
                }
                Value::Bool(_) | Value::Object(_) => {
                    return Err(invalid(question, "expected a string, a list of strings, or a number"))
                }
            };

            let parsed = if question == questions::BUDGET { validate_budget(question, parsed)? } else { parsed };
            answers.insert(question.clone(), parsed);
        }

        Ok(answers)
    }

    pub fn goals(&self) -> Vec<&str> {
        self.get(questions::GOALS)
            .map(AnswerValue::as_list)
            .unwrap_or_default()
            .into_iter()
            .filter(|goal| !goal.trim().is_empty())
            .collect()
    }

    pub fn installation(&self) -> Option<InstallationPreference> {
        self.get(questions::INSTALLATION).and_then(AnswerValue::as_str).and_then(InstallationPreference::parse)
    }

    /// The stated ecosystem, unless absent, blank, or `none`.
    pub fn ecosystem(&self) -> Option<&str> {
        self.get(questions::ECOSYSTEM)
            .and_then(AnswerValue::as_str)
            .map(str::trim)
            .filter(|ecosystem| !ecosystem.is_empty() && !ecosystem.eq_ignore_ascii_case(NO_ECOSYSTEM))
    }

    /// The budget, when present as a finite positive amount.
    pub fn budget(&self) -> Option<f64> {
        self.get(questions::BUDGET)
            .and_then(AnswerValue::as_number)
            .filter(|budget| budget.is_finite() && *budget > 0.0)
    }

    pub fn location(&self) -> Option<&str> {
        questions::LOCATION
            .iter()
            .find_map(|question| self.get(question).and_then(AnswerValue::as_str))
            .map(str::trim)
            .filter(|location| !location.is_empty())
    }
}

fn validate_budget(question: &str, value: AnswerValue) -> Result<AnswerValue, DomainError> {
    let amount = value.as_number().ok_or_else(|| invalid(question, "budget must be a number"))?;
    if !amount.is_finite() || amount < 0.0 {
        return Err(invalid(question, "budget must be a non-negative number"));
    }
    Ok(AnswerValue::Range(amount))
}

fn invalid(question: &str, reason: &str) -> DomainError {
    DomainError::InvalidAnswer { question: question.to_owned(), reason: reason.to_owned() }
}
