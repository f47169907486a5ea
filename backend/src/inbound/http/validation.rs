//! Request validation and violation reporting.
//!
//! [`RequestValidator`] turns decoded payloads into domain drafts. It runs the
//! `validator` rules declared on the payload types, checks the optional body
//! `id` against the configured backend's [`IdFormat`] and compiles filter
//! patterns. Every violation is collected before anything is reported.
//!
//! Two renderings exist for the same violations:
//! - the client message, `Bad request: login is required, ...`, using wire
//!   names and grouping the violations of each offending index entry;
//! - the log message, `User input validation error: indexes[1].name:
//!   required; ...`, using full paths and raw codes. It is logged at `warn`
//!   and never returned.

use std::fmt;

use tracing::warn;
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

use crate::domain::{Error, FilterDraft, FilterPattern, IdFormat, UserDraft};

use super::payloads::{FilterPayload, IndexPayload, UserPayload};

pub(crate) const REGEX_MESSAGE: &str =
    "Bad request: regex must be a regular expression accepted by RE2";

const CODE_REQUIRED: &str = "required";
const CODE_ID_FORMAT: &str = "id_format";

/// Ordered table of `(validation key, wire name)` pairs for one payload.
///
/// The order is the payload's declaration order and fixes the order in which
/// violations are reported.
#[derive(Debug, Clone, Copy)]
pub struct WireFields(&'static [(&'static str, &'static str)]);

impl WireFields {
    pub const USER: Self = Self(&[
        ("id", "id"),
        ("login", "login"),
        ("password", "password"),
        ("index_limit", "index_limit"),
        ("indexes", "indexes"),
    ]);
    pub const INDEX: Self = Self(&[("id", "id"), ("name", "name")]);
    pub const FILTER: Self = Self(&[("id", "id"), ("regex", "regex")]);

    fn iter(self) -> impl Iterator<Item = (&'static str, &'static str)> {
        self.0.iter().copied()
    }
}

/// Entry of a list field holding a violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Parent {
    list: &'static str,
    index: usize,
}

/// One failed rule.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Violation {
    parent: Option<Parent>,
    field: &'static str,
    code: String,
}

impl Violation {
    fn phrase(&self) -> String {
        match self.code.as_str() {
            CODE_REQUIRED => format!("{} is required", self.field),
            CODE_ID_FORMAT => format!("{} must be a valid identifier", self.field),
            _ => format!("{} is invalid", self.field),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(parent) = self.parent {
            write!(f, "{}[{}].", parent.list, parent.index)?;
        }
        write!(f, "{}: {}", self.field, self.code)
    }
}

/// Violations collected for one request, in report order.
#[derive(Debug, Default)]
struct Violations(Vec<Violation>);

impl Violations {
    fn push(&mut self, parent: Option<Parent>, field: &'static str, code: impl Into<String>) {
        self.0.push(Violation {
            parent,
            field,
            code: code.into(),
        });
    }

    /// Append the field errors of `errors` in `fields` order.
    fn extend_from(&mut self, parent: Option<Parent>, fields: WireFields, errors: &ValidationErrors) {
        for (key, wire) in fields.iter() {
            if let Some(ValidationErrorsKind::Field(list)) = errors.errors().get(key) {
                for error in list {
                    self.push(parent, wire, error.code.to_string());
                }
            }
        }
    }

    fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn client_message(&self) -> String {
        let mut parts = Vec::with_capacity(self.0.len());
        let mut current: Option<Parent> = None;
        for violation in &self.0 {
            let phrase = violation.phrase();
            match violation.parent {
                Some(parent) if current != Some(parent) => {
                    parts.push(format!("in {} {phrase}", parent.list));
                }
                _ => parts.push(phrase),
            }
            current = violation.parent;
        }
        format!("Bad request: {}", parts.join(", "))
    }

    fn log_message(&self) -> String {
        let paths: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        format!("User input validation error: {}", paths.join("; "))
    }

    fn into_result(self) -> Result<(), Error> {
        if self.is_empty() {
            return Ok(());
        }
        let error = Error::invalid_request(self.client_message());
        warn!(
            request_id = error.request_id().unwrap_or_default(),
            "{}",
            self.log_message()
        );
        Err(error)
    }
}

/// Validation rules and translation tables, built once at server setup.
#[derive(Debug, Clone, Copy)]
pub struct RequestValidator {
    id_format: IdFormat,
}

impl RequestValidator {
    /// Validator accepting body ids in `id_format`.
    pub fn new(id_format: IdFormat) -> Self {
        Self { id_format }
    }

    /// Backend id format the validator checks against.
    pub fn id_format(&self) -> IdFormat {
        self.id_format
    }

    fn check_id(&self, id: Option<&str>, violations: &mut Violations) {
        match id {
            Some(raw) if !raw.is_empty() && !self.id_format.accepts(raw) => {
                violations.push(None, "id", CODE_ID_FORMAT);
            }
            _ => {}
        }
    }

    /// Validate a user payload and build the draft to persist.
    ///
    /// # Errors
    /// Returns an [`Error::invalid_request`] listing every violation.
    pub fn user_draft(&self, payload: UserPayload) -> Result<UserDraft, Error> {
        let mut violations = Violations::default();
        self.check_id(payload.id.as_deref(), &mut violations);
        if let Err(errors) = payload.validate() {
            // `id` is checked above; the remaining fields come from the rules.
            violations.extend_from(None, WireFields::USER, &errors);
        }
        let indexes = payload.indexes.unwrap_or_default();
        for (index, entry) in indexes.iter().enumerate() {
            if let Err(errors) = entry.validate() {
                let parent = Parent {
                    list: "indexes",
                    index,
                };
                violations.extend_from(Some(parent), WireFields::INDEX, &errors);
            }
        }
        violations.into_result()?;

        Ok(UserDraft {
            login: payload.login.unwrap_or_default(),
            password: payload.password.unwrap_or_default(),
            index_limit: payload.index_limit.unwrap_or_default(),
            indexes: indexes.into_iter().map(IndexPayload::into_index).collect(),
        })
    }

    /// Validate a filter payload and compile its pattern.
    ///
    /// # Errors
    /// Returns an [`Error::invalid_request`] listing every structural
    /// violation, or the RE2 message when the pattern does not compile.
    pub fn filter_draft(&self, payload: FilterPayload) -> Result<FilterDraft, Error> {
        let mut violations = Violations::default();
        self.check_id(payload.id.as_deref(), &mut violations);
        if let Err(errors) = payload.validate() {
            violations.extend_from(None, WireFields::FILTER, &errors);
        }
        violations.into_result()?;

        let raw = payload.regex.unwrap_or_default();
        let regex = FilterPattern::parse(&raw).map_err(|err| {
            let error = Error::invalid_request(REGEX_MESSAGE);
            warn!(
                request_id = error.request_id().unwrap_or_default(),
                error = %err,
                "User input validation error: regex: re2"
            );
            error
        })?;
        Ok(FilterDraft { regex })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::{fixture, rstest};
    use serde_json::json;

    #[fixture]
    fn validator() -> RequestValidator {
        RequestValidator::new(IdFormat::ObjectId)
    }

    fn user(body: serde_json::Value) -> UserPayload {
        serde_json::from_value(body).expect("decode user payload")
    }

    fn message_for(validator: RequestValidator, body: serde_json::Value) -> String {
        let err = validator.user_draft(user(body)).expect_err("invalid payload");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        err.message().to_owned()
    }

    #[rstest]
    fn valid_user_builds_draft(validator: RequestValidator) {
        let draft = validator
            .user_draft(user(json!({
                "login": "mary",
                "password": "12345",
                "index_limit": 5,
                "indexes": [{"id": "aaa", "name": "bbb"}],
            })))
            .expect("valid payload");
        assert_eq!(draft.login, "mary");
        assert_eq!(draft.index_limit, 5);
        assert_eq!(draft.indexes.len(), 1);
    }

    #[rstest]
    fn absent_indexes_become_empty(validator: RequestValidator) {
        let draft = validator
            .user_draft(user(json!({"login": "m", "password": "p", "index_limit": 1})))
            .expect("valid payload");
        assert!(draft.indexes.is_empty());
    }

    #[rstest]
    fn every_missing_field_is_listed_in_order(validator: RequestValidator) {
        assert_eq!(
            message_for(validator, json!({})),
            "Bad request: login is required, password is required, index_limit is required"
        );
    }

    #[rstest]
    #[case(json!({"login": "", "password": "p", "index_limit": 1}), "Bad request: login is required")]
    #[case(json!({"login": "m", "password": "p", "index_limit": 0}), "Bad request: index_limit is required")]
    #[case(json!({"login": "m", "index_limit": 3}), "Bad request: password is required")]
    fn empty_values_count_as_missing(
        validator: RequestValidator,
        #[case] body: serde_json::Value,
        #[case] expected: &str,
    ) {
        assert_eq!(message_for(validator, body), expected);
    }

    #[rstest]
    fn one_empty_index_among_valid_ones(validator: RequestValidator) {
        let body = json!({
            "login": "mary",
            "password": "12345",
            "index_limit": 5,
            "indexes": [{"id": "aaa", "name": "bbb"}, {}, {"id": "ccc", "name": "ddd"}],
        });
        assert_eq!(
            message_for(validator, body),
            "Bad request: in indexes id is required, name is required"
        );
    }

    #[rstest]
    fn each_offending_index_is_reported(validator: RequestValidator) {
        let body = json!({
            "login": "mary",
            "password": "12345",
            "index_limit": 5,
            "indexes": [{"id": "aaa"}, {"name": "bbb"}],
        });
        assert_eq!(
            message_for(validator, body),
            "Bad request: in indexes name is required, in indexes id is required"
        );
    }

    #[rstest]
    fn top_level_and_nested_violations_combine(validator: RequestValidator) {
        let body = json!({"password": "p", "index_limit": 1, "indexes": [{"id": "", "name": ""}]});
        assert_eq!(
            message_for(validator, body),
            "Bad request: login is required, in indexes id is required, name is required"
        );
    }

    #[rstest]
    #[case(IdFormat::ObjectId, "12")]
    #[case(IdFormat::Counter, "66d8420df6e5311a791e0a08")]
    fn malformed_body_id_is_reported(#[case] format: IdFormat, #[case] id: &str) {
        let body = json!({"id": id, "login": "m", "password": "p", "index_limit": 1});
        assert_eq!(
            message_for(RequestValidator::new(format), body),
            "Bad request: id must be a valid identifier"
        );
    }

    #[rstest]
    #[case(json!({"id": "", "login": "m", "password": "p", "index_limit": 1}))]
    #[case(json!({"id": "66d8420df6e5311a791e0a08", "login": "m", "password": "p", "index_limit": 1}))]
    fn absent_empty_or_well_formed_ids_pass(
        validator: RequestValidator,
        #[case] body: serde_json::Value,
    ) {
        assert!(validator.user_draft(user(body)).is_ok());
    }

    #[rstest]
    fn log_message_uses_paths_and_codes() {
        let mut violations = Violations::default();
        violations.push(None, "login", CODE_REQUIRED);
        violations.push(
            Some(Parent {
                list: "indexes",
                index: 1,
            }),
            "name",
            CODE_REQUIRED,
        );
        assert_eq!(
            violations.log_message(),
            "User input validation error: login: required; indexes[1].name: required"
        );
    }

    #[rstest]
    fn valid_filter_compiles(validator: RequestValidator) {
        let draft = validator
            .filter_draft(FilterPayload {
                id: None,
                regex: Some("^foo.*bar$".into()),
            })
            .expect("valid filter");
        assert_eq!(draft.regex.as_str(), "^foo.*bar$");
    }

    #[rstest]
    #[case("+++")]
    #[case(r"(a)\1")]
    #[case("(?=a)b")]
    fn non_re2_patterns_are_rejected(validator: RequestValidator, #[case] regex: &str) {
        let err = validator
            .filter_draft(FilterPayload {
                id: None,
                regex: Some(regex.into()),
            })
            .expect_err("invalid pattern");
        assert_eq!(err.message(), REGEX_MESSAGE);
    }

    #[rstest]
    #[case(None)]
    #[case(Some(String::new()))]
    fn missing_regex_is_required_not_re2(
        validator: RequestValidator,
        #[case] regex: Option<String>,
    ) {
        let err = validator
            .filter_draft(FilterPayload { id: None, regex })
            .expect_err("missing regex");
        assert_eq!(err.message(), "Bad request: regex is required");
    }
}
