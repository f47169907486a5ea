//! Request bodies accepted by the user and filter endpoints.
//!
//! Every field is optional at the decode step so a missing value surfaces as
//! a validation violation rather than a decode failure. Presence and
//! non-emptiness are declared with `validator` rules; a present but empty
//! string or a zero limit is reported under the same `required` code as an
//! absent one.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::Index;

/// Search index entry inside a user payload.
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate, ToSchema)]
pub struct IndexPayload {
    #[validate(required, length(min = 1, code = "required"))]
    #[schema(example = "aaa")]
    pub id: Option<String>,
    #[validate(required, length(min = 1, code = "required"))]
    #[schema(example = "products")]
    pub name: Option<String>,
}

/// Body of `POST /user` and `PUT /user/{id}`.
///
/// Example JSON:
/// `{"login":"mary","password":"12345","index_limit":5,"indexes":[]}`
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate, ToSchema)]
pub struct UserPayload {
    /// Ignored on create; replaced by the path id on update.
    #[serde(default)]
    pub id: Option<String>,
    #[validate(required, length(min = 1, code = "required"))]
    #[schema(example = "mary")]
    pub login: Option<String>,
    #[validate(required, length(min = 1, code = "required"))]
    #[schema(example = "12345")]
    pub password: Option<String>,
    #[validate(required, range(min = 1, code = "required"))]
    #[schema(example = 5)]
    pub index_limit: Option<u32>,
    #[serde(default)]
    pub indexes: Option<Vec<IndexPayload>>,
}

/// Body of `POST /filter`.
///
/// Example JSON: `{"regex":"^foo.*bar$"}`
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate, ToSchema)]
pub struct FilterPayload {
    #[serde(default)]
    pub id: Option<String>,
    #[validate(required, length(min = 1, code = "required"))]
    #[schema(example = "^foo.*bar$")]
    pub regex: Option<String>,
}

impl IndexPayload {
    /// Convert a payload that already passed validation.
    pub(crate) fn into_index(self) -> Index {
        Index {
            id: self.id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn absent_fields_decode_to_none() {
        let payload: UserPayload = serde_json::from_value(json!({})).expect("decode");
        assert!(payload.login.is_none());
        assert!(payload.indexes.is_none());
    }

    #[rstest]
    fn null_indexes_decode_to_none() {
        let payload: UserPayload =
            serde_json::from_value(json!({"indexes": null})).expect("decode");
        assert!(payload.indexes.is_none());
    }

    #[rstest]
    #[case(json!({"index_limit": -1}))]
    #[case(json!({"index_limit": "5"}))]
    #[case(json!({"login": 3}))]
    fn wrong_types_fail_to_decode(#[case] body: serde_json::Value) {
        assert!(serde_json::from_value::<UserPayload>(body).is_err());
    }

    #[rstest]
    #[case(json!({"login": "mary", "password": "x", "index_limit": 1}), true)]
    #[case(json!({"login": "", "password": "x", "index_limit": 1}), false)]
    #[case(json!({"login": "mary", "password": "x", "index_limit": 0}), false)]
    #[case(json!({"login": "mary", "password": "x"}), false)]
    fn user_rules(#[case] body: serde_json::Value, #[case] valid: bool) {
        let payload: UserPayload = serde_json::from_value(body).expect("decode");
        assert_eq!(payload.validate().is_ok(), valid);
    }

    #[rstest]
    fn empty_string_reports_required_code() {
        let payload = IndexPayload {
            id: Some(String::new()),
            name: Some("n".into()),
        };
        let errors = payload.validate().expect_err("empty id");
        let codes: Vec<_> = errors
            .field_errors()
            .values()
            .flat_map(|errs| errs.iter().map(|e| e.code.to_string()))
            .collect();
        assert_eq!(codes, ["required"]);
    }
}
