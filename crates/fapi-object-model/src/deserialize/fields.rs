//! Named field access and allow-list validation.

use serde_json::Value;
use tracing::{error, warn};

use crate::error::DeserializeError;

/// Looks up a named child of a JSON object.
///
/// Exact key match wins; otherwise the first case-insensitive match is
/// taken, since stored documents are not consistent about field casing.
pub fn get_sub_object<'a>(jso: &'a Value, field: &str) -> Option<&'a Value> {
    let map = jso.as_object()?;
    if let Some(sub) = map.get(field) {
        return Some(sub);
    }
    map.iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(field))
        .map(|(_, sub)| sub)
}

/// Looks up a required field, classifying absence as [`DeserializeError::MissingField`].
pub fn required<'a>(jso: &'a Value, field: &'static str) -> Result<&'a Value, DeserializeError> {
    get_sub_object(jso, field).ok_or_else(|| {
        error!("Field \"{field}\" not found.");
        DeserializeError::MissingField(field)
    })
}

/// Warns about keys outside the allow-list for a record type.
///
/// A forward-compatibility guard against schema typos: unknown keys are
/// logged and tolerated, never rejected.
pub fn check_json_object_fields(jso: &Value, allowed: &[&str]) {
    let Some(map) = jso.as_object() else {
        return;
    };
    for key in map.keys() {
        if !allowed.contains(&key.as_str()) {
            warn!("Unknown field \"{key}\" in JSON object.");
        }
    }
}

/// Logs and attributes a child decode failure to the field being decoded.
pub fn bad_value(field: &'static str) -> impl FnOnce(DeserializeError) -> DeserializeError {
    move |err| {
        error!("Bad value for field \"{field}\".");
        err.for_field(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn exact_match_beats_case_insensitive() {
        let jso = json!({ "eventdata": 1, "eventData": 2 });
        assert_eq!(get_sub_object(&jso, "eventData"), Some(&json!(2)));
        assert_eq!(get_sub_object(&jso, "EVENTDATA"), Some(&json!(1)));
        assert_eq!(get_sub_object(&jso, "missing"), None);
    }

    #[test]
    fn required_classifies_absence() {
        let jso = json!({ "a": 1 });
        assert!(required(&jso, "a").is_ok());
        assert!(matches!(
            required(&jso, "b"),
            Err(DeserializeError::MissingField("b"))
        ));
    }

    #[test]
    fn allow_list_check_never_fails() {
        // Only observable through logs; must not panic on non-objects.
        check_json_object_fields(&json!({ "x": 1 }), &["a", "$schema"]);
        check_json_object_fields(&json!([1, 2]), &["a"]);
    }
}
