//! JSON Tool Validator - Implementation of ToolValidator.
//!
//! Validates provider payloads field by field against the Tool Record schema.
//! Provider output may use either the wire names (`tool_name`, `pricing`,
//! `why_fit`, `type`) or the domain names (`name`, `pricing_tier`,
//! `fit_explanation`, `kind`); values are checked strictly either way.

use serde_json::{Map, Value};

use crate::domain::recommendation::{PricingTier, ToolKind, ToolRecord};
use crate::ports::{ToolValidationError, ToolValidator};

const NAME: &[&str] = &["tool_name", "name"];
const PURPOSE: &[&str] = &["purpose"];
const PROS: &[&str] = &["pros"];
const CONS: &[&str] = &["cons"];
const PRICING: &[&str] = &["pricing", "pricing_tier"];
const WHY_FIT: &[&str] = &["why_fit", "fit_explanation"];
const LINK: &[&str] = &["link"];
const KIND: &[&str] = &["type", "kind"];

/// Stateless validator for recommendation payloads.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonToolValidator;

impl JsonToolValidator {
    pub fn new() -> Self {
        Self
    }

    fn validate_item(&self, value: &Value, index: usize) -> Result<ToolRecord, ToolValidationError> {
        let path = format!("[{}]", index);
        let obj = value
            .as_object()
            .ok_or_else(|| ToolValidationError::NotAnObject {
                path: path.clone(),
                actual: Self::type_name(value),
            })?;

        let name = self.require_non_empty_string(obj, NAME, &path)?;
        let purpose = self.require_non_empty_string(obj, PURPOSE, &path)?;
        let pros = self.require_string_list(obj, PROS, &path)?;
        let cons = self.require_string_list(obj, CONS, &path)?;
        let pricing_tier = self.require_enum::<PricingTier>(obj, PRICING, "Free, Freemium, Paid", &path)?;
        let fit_explanation = self.require_non_empty_string(obj, WHY_FIT, &path)?;
        let link = self.optional_string(obj, LINK, &path)?;
        let kind = self.optional_enum::<ToolKind>(obj, KIND, "tool, agent", &path)?;

        Ok(ToolRecord {
            name,
            purpose,
            pros,
            cons,
            pricing_tier,
            fit_explanation,
            link,
            kind,
        })
    }

    // =========================================================================
    // Helper methods
    // =========================================================================

    /// Finds the first present key among `keys`; null counts as absent.
    fn lookup<'a>(obj: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
        keys.iter()
            .filter_map(|k| obj.get(*k))
            .find(|v| !v.is_null())
    }

    fn field_path(parent: &str, keys: &[&str]) -> String {
        format!("{}.{}", parent, keys[0])
    }

    fn require<'a>(
        &self,
        obj: &'a Map<String, Value>,
        keys: &[&str],
        parent: &str,
    ) -> Result<&'a Value, ToolValidationError> {
        Self::lookup(obj, keys).ok_or_else(|| ToolValidationError::MissingField {
            path: Self::field_path(parent, keys),
        })
    }

    fn require_string<'a>(
        &self,
        obj: &'a Map<String, Value>,
        keys: &[&str],
        parent: &str,
    ) -> Result<&'a str, ToolValidationError> {
        let value = self.require(obj, keys, parent)?;
        value.as_str().ok_or_else(|| ToolValidationError::InvalidType {
            path: Self::field_path(parent, keys),
            expected: "string".to_string(),
            actual: Self::type_name(value),
        })
    }

    fn require_non_empty_string(
        &self,
        obj: &Map<String, Value>,
        keys: &[&str],
        parent: &str,
    ) -> Result<String, ToolValidationError> {
        let s = self.require_string(obj, keys, parent)?;
        if s.trim().is_empty() {
            return Err(ToolValidationError::EmptyField {
                path: Self::field_path(parent, keys),
            });
        }
        Ok(s.to_string())
    }

    fn require_string_list(
        &self,
        obj: &Map<String, Value>,
        keys: &[&str],
        parent: &str,
    ) -> Result<Vec<String>, ToolValidationError> {
        let path = Self::field_path(parent, keys);
        let value = self.require(obj, keys, parent)?;
        let items = value.as_array().ok_or_else(|| ToolValidationError::InvalidType {
            path: path.clone(),
            expected: "array".to_string(),
            actual: Self::type_name(value),
        })?;

        items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let item_path = format!("{}[{}]", path, i);
                let s = item.as_str().ok_or_else(|| ToolValidationError::InvalidType {
                    path: item_path.clone(),
                    expected: "string".to_string(),
                    actual: Self::type_name(item),
                })?;
                if s.trim().is_empty() {
                    return Err(ToolValidationError::EmptyField { path: item_path });
                }
                Ok(s.to_string())
            })
            .collect()
    }

    fn require_enum<T: std::str::FromStr>(
        &self,
        obj: &Map<String, Value>,
        keys: &[&str],
        allowed: &str,
        parent: &str,
    ) -> Result<T, ToolValidationError> {
        let s = self.require_string(obj, keys, parent)?;
        s.parse::<T>().map_err(|_| ToolValidationError::InvalidEnum {
            path: Self::field_path(parent, keys),
            value: s.to_string(),
            allowed: allowed.to_string(),
        })
    }

    fn optional_string(
        &self,
        obj: &Map<String, Value>,
        keys: &[&str],
        parent: &str,
    ) -> Result<Option<String>, ToolValidationError> {
        if Self::lookup(obj, keys).is_none() {
            return Ok(None);
        }
        let s = self.require_string(obj, keys, parent)?.trim();
        Ok((!s.is_empty()).then(|| s.to_string()))
    }

    fn optional_enum<T: std::str::FromStr>(
        &self,
        obj: &Map<String, Value>,
        keys: &[&str],
        allowed: &str,
        parent: &str,
    ) -> Result<Option<T>, ToolValidationError> {
        if Self::lookup(obj, keys).is_none() {
            return Ok(None);
        }
        self.require_enum(obj, keys, allowed, parent).map(Some)
    }

    fn type_name(value: &Value) -> String {
        match value {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
        .to_string()
    }
}

impl ToolValidator for JsonToolValidator {
    fn validate(&self, raw: &Value) -> Result<Vec<ToolRecord>, ToolValidationError> {
        let items = raw.as_array().ok_or_else(|| ToolValidationError::NotAnArray {
            actual: Self::type_name(raw),
        })?;

        items
            .iter()
            .enumerate()
            .map(|(i, item)| self.validate_item(item, i))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn valid_item() -> Value {
        json!({
            "tool_name": "Canva",
            "purpose": "Graphic design for social media",
            "pros": ["Templates", "Easy to use"],
            "cons": ["Premium assets cost extra"],
            "pricing": "Freemium",
            "why_fit": "Creates Instagram posts without a designer",
            "link": "https://canva.com",
            "type": "tool"
        })
    }

    fn validate(raw: Value) -> Result<Vec<ToolRecord>, ToolValidationError> {
        JsonToolValidator::new().validate(&raw)
    }

    #[test]
    fn accepts_well_formed_item() {
        let tools = validate(json!([valid_item()])).unwrap();

        assert_eq!(tools.len(), 1);
        let tool = &tools[0];
        assert_eq!(tool.name, "Canva");
        assert_eq!(tool.pricing_tier, PricingTier::Freemium);
        assert_eq!(tool.pros, vec!["Templates", "Easy to use"]);
        assert_eq!(tool.link.as_deref(), Some("https://canva.com"));
        assert_eq!(tool.kind, Some(ToolKind::Tool));
    }

    #[test]
    fn accepts_domain_field_names() {
        let raw = json!([{
            "name": "Zapier",
            "purpose": "Automation",
            "pros": [],
            "cons": [],
            "pricing_tier": "Paid",
            "fit_explanation": "Connects the shop to email",
            "kind": "agent"
        }]);

        let tools = validate(raw).unwrap();
        assert_eq!(tools[0].name, "Zapier");
        assert_eq!(tools[0].kind, Some(ToolKind::Agent));
        assert!(tools[0].pros.is_empty());
    }

    #[test]
    fn empty_array_is_valid_shape() {
        assert!(validate(json!([])).unwrap().is_empty());
    }

    #[test]
    fn rejects_non_array_root() {
        let err = validate(json!({"tool_name": "x"})).unwrap_err();
        assert_eq!(
            err,
            ToolValidationError::NotAnArray {
                actual: "object".to_string()
            }
        );
    }

    #[test]
    fn rejects_non_object_element() {
        let err = validate(json!([valid_item(), "Canva"])).unwrap_err();
        assert!(matches!(err, ToolValidationError::NotAnObject { ref path, .. } if path == "[1]"));
    }

    #[test]
    fn rejects_missing_required_field() {
        let mut item = valid_item();
        item.as_object_mut().unwrap().remove("why_fit");

        let err = validate(json!([item])).unwrap_err();
        assert_eq!(
            err,
            ToolValidationError::MissingField {
                path: "[0].why_fit".to_string()
            }
        );
    }

    #[test]
    fn rejects_whitespace_only_name() {
        let mut item = valid_item();
        item["tool_name"] = json!("   ");

        let err = validate(json!([item])).unwrap_err();
        assert!(matches!(err, ToolValidationError::EmptyField { ref path } if path == "[0].tool_name"));
    }

    #[test]
    fn rejects_unknown_pricing_tier() {
        let mut item = valid_item();
        item["pricing"] = json!("Enterprise");

        let err = validate(json!([item])).unwrap_err();
        assert!(matches!(err, ToolValidationError::InvalidEnum { ref value, .. } if value == "Enterprise"));
    }

    #[test]
    fn pricing_tier_match_is_case_sensitive() {
        let mut item = valid_item();
        item["pricing"] = json!("free");

        assert!(validate(json!([item])).is_err());
    }

    #[test]
    fn rejects_non_string_pro() {
        let mut item = valid_item();
        item["pros"] = json!(["ok", 3]);

        let err = validate(json!([item])).unwrap_err();
        assert!(matches!(err, ToolValidationError::InvalidType { ref path, .. } if path == "[0].pros[1]"));
    }

    #[test]
    fn rejects_unknown_kind_but_allows_missing_kind() {
        let mut item = valid_item();
        item["type"] = json!("robot");
        assert!(validate(json!([item])).is_err());

        let mut item = valid_item();
        item.as_object_mut().unwrap().remove("type");
        let tools = validate(json!([item])).unwrap();
        assert_eq!(tools[0].kind, None);
    }

    #[test]
    fn empty_link_is_treated_as_absent() {
        let mut item = valid_item();
        item["link"] = json!("");

        let tools = validate(json!([item])).unwrap();
        assert_eq!(tools[0].link, None);
    }

    #[test]
    fn null_optional_fields_are_absent() {
        let mut item = valid_item();
        item["link"] = Value::Null;
        item["type"] = Value::Null;

        let tools = validate(json!([item])).unwrap();
        assert_eq!(tools[0].link, None);
        assert_eq!(tools[0].kind, None);
    }

    #[test]
    fn error_messages_include_path() {
        let mut item = valid_item();
        item["pricing"] = json!(42);

        let err = validate(json!([valid_item(), item])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid type for [1].pricing: expected string, got number"
        );
    }

    proptest! {
        #[test]
        fn validated_records_always_satisfy_invariants(
            name in ".{0,12}",
            purpose in ".{0,12}",
            fit in ".{0,12}",
            pricing in prop_oneof![
                Just("Free".to_string()),
                Just("Freemium".to_string()),
                Just("Paid".to_string()),
                "[A-Za-z]{0,10}",
            ],
        ) {
            let raw = json!([{
                "tool_name": name,
                "purpose": purpose,
                "pros": [],
                "cons": [],
                "pricing": pricing,
                "why_fit": fit,
            }]);

            if let Ok(tools) = JsonToolValidator::new().validate(&raw) {
                let tool = &tools[0];
                prop_assert!(!tool.name.trim().is_empty());
                prop_assert!(!tool.purpose.trim().is_empty());
                prop_assert!(!tool.fit_explanation.trim().is_empty());
                prop_assert!(PricingTier::ALL.contains(&tool.pricing_tier));
            }
        }
    }
}
