use serde_json::Value;

const AUTHORIZED: &str = "Authorized";
const NOT_AUTHORIZED: &str = "Not Authorized";

/// The outcome of a check request.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckResult {
    /// The server returned a plain `Authorized` / `Not Authorized` verdict.
    Decision(bool),
    /// Any other response shape, returned as parsed.
    Raw(Value),
}

impl CheckResult {
    /// Interprets a check response body.
    ///
    /// ## Examples
    ///
    /// ```
    /// use serde_json::json;
    /// use warrant::CheckResult;
    ///
    /// let result = CheckResult::from_body(json!({"code": 200, "result": "Authorized"}));
    /// assert_eq!(result, CheckResult::Decision(true));
    /// ```
    pub fn from_body(body: Value) -> Self {
        match body.get("result").and_then(Value::as_str) {
            Some(AUTHORIZED) => Self::Decision(true),
            Some(NOT_AUTHORIZED) => Self::Decision(false),
            _ => Self::Raw(body),
        }
    }

    /// The verdict, if the server gave one.
    pub fn decision(&self) -> Option<bool> {
        match self {
            Self::Decision(allowed) => Some(*allowed),
            Self::Raw(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_authorized() {
        let result = CheckResult::from_body(json!({"result": "Authorized"}));
        assert_eq!(result.decision(), Some(true));
    }

    #[test]
    fn test_not_authorized() {
        let result = CheckResult::from_body(json!({"result": "Not Authorized"}));
        assert_eq!(result.decision(), Some(false));
    }

    #[test]
    fn test_other_shapes_are_returned_unchanged() {
        let body = json!({"result": "Pending", "warrants": []});
        assert_eq!(CheckResult::from_body(body.clone()), CheckResult::Raw(body));

        let body = json!({"code": 200});
        assert_eq!(CheckResult::from_body(body.clone()), CheckResult::Raw(body));

        let body = json!([1, 2]);
        assert_eq!(CheckResult::from_body(body.clone()), CheckResult::Raw(body));
    }
}
