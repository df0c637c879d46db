//! Turn free-text model replies into validated drafts
//!
//! Models often wrap the JSON object in markdown fences or a sentence of
//! prose. The reply is cleaned, the outermost `{ ... }` span is decoded, and
//! the result must pass [`ExpenseDraft::normalized`]. Anything else becomes a
//! [`ParseFailure`] carrying the original reply.
//!
//! The span runs from the first `{` to the last `}`, so braces in trailing
//! prose are captured too and the decode then fails.

use crate::error::ParseFailure;
use serde::Deserialize;
use snap_domain::dates::parse_date;
use snap_domain::{Category, ExpenseDraft};
use tracing::debug;

/// Fields the model is asked to return
#[derive(Debug, Deserialize)]
struct RawDraft {
    total: f64,
    currency: String,
    category: String,
    vendor: String,
    #[serde(default, rename = "billingDate", alias = "billing_date")]
    billing_date: Option<String>,
}

/// Parse a model reply into a validated draft
///
/// # Examples
///
/// ```
/// use snap_extractor::normalize_response;
///
/// let reply = "```json\n{\"total\": 4.5, \"currency\": \"usd\", \"category\": \"Food\", \"vendor\": \"Cafe\", \"billingDate\": null}\n```";
/// let draft = normalize_response(reply).unwrap();
/// assert_eq!(draft.currency, "USD");
/// assert!(draft.billing_date.is_none());
/// ```
pub fn normalize_response(text: &str) -> Result<ExpenseDraft, ParseFailure> {
    let candidate = extract_json(text)
        .ok_or_else(|| ParseFailure::new(ParseFailure::MALFORMED, text))?;

    let raw: RawDraft = serde_json::from_str(&candidate).map_err(|e| {
        debug!("Reply did not decode: {}", e);
        ParseFailure::new(ParseFailure::MALFORMED, text)
    })?;

    let billing_date = match raw.billing_date.as_deref().map(str::trim) {
        None | Some("") | Some("null") => None,
        Some(value) => Some(parse_date(value).ok_or_else(|| {
            debug!("Unreadable billing date: {}", value);
            ParseFailure::new(ParseFailure::INVALID_FIELD, text)
        })?),
    };

    let draft = ExpenseDraft {
        total: raw.total,
        currency: raw.currency,
        category: Category::from(raw.category),
        vendor: raw.vendor,
        billing_date,
    };

    draft.normalized().map_err(|e| {
        debug!("Reply failed validation: {}", e);
        ParseFailure::new(ParseFailure::INVALID_FIELD, text)
    })
}

/// Strip code fences and isolate the JSON object span
fn extract_json(text: &str) -> Option<String> {
    let cleaned = text.replace("```json", "").replace("```", "");
    let trimmed = cleaned.trim();

    let start = trimmed.find('{')?;
    if start == 0 {
        return Some(trimmed.to_string());
    }

    let tail = &trimmed[start..];
    let span = match tail.rfind('}') {
        Some(end) => &tail[..=end],
        None => tail,
    };
    Some(span.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const PLAIN: &str = r#"{"total":12.5,"currency":"USD","category":"Food","vendor":"Cafe","billingDate":"2024-03-01"}"#;

    fn expected() -> ExpenseDraft {
        ExpenseDraft::new(12.5, "USD", Category::Food, "Cafe")
            .with_billing_date(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
    }

    #[test]
    fn test_plain_object() {
        assert_eq!(normalize_response(PLAIN).unwrap(), expected());
    }

    #[test]
    fn test_fenced_with_prose() {
        let reply = format!("Here is the JSON: ```json {} ```", PLAIN);
        assert_eq!(normalize_response(&reply).unwrap(), expected());
    }

    #[test]
    fn test_multiple_fences() {
        let reply = format!("```json\n```\n{}\n```", PLAIN);
        assert_eq!(normalize_response(&reply).unwrap(), expected());
    }

    #[test]
    fn test_prose_without_object() {
        let reply = "Sorry, I cannot read this receipt.";
        let failure = normalize_response(reply).unwrap_err();
        assert_eq!(failure.reason, ParseFailure::MALFORMED);
        assert_eq!(failure.raw_text, reply);
    }

    #[test]
    fn test_null_billing_date_is_absent() {
        let reply = r#"{"total":3,"currency":"EUR","category":"Travel","vendor":"Metro","billingDate":null}"#;
        let draft = normalize_response(reply).unwrap();
        assert_eq!(draft.billing_date, None);
        assert_eq!(draft.total, 3.0);
    }

    #[test]
    fn test_missing_and_string_null_billing_date() {
        let missing = r#"{"total":1,"currency":"EUR","category":"Other","vendor":"Shop"}"#;
        assert_eq!(normalize_response(missing).unwrap().billing_date, None);

        let string_null =
            r#"{"total":1,"currency":"EUR","category":"Other","vendor":"Shop","billingDate":"null"}"#;
        assert_eq!(normalize_response(string_null).unwrap().billing_date, None);
    }

    #[test]
    fn test_snake_case_alias() {
        let reply = r#"{"total":1,"currency":"EUR","category":"Other","vendor":"Shop","billing_date":"2023-12-31"}"#;
        assert_eq!(
            normalize_response(reply).unwrap().billing_date,
            NaiveDate::from_ymd_opt(2023, 12, 31)
        );
    }

    #[test]
    fn test_unparseable_date_is_invalid_field() {
        let reply = r#"{"total":1,"currency":"EUR","category":"Other","vendor":"Shop","billingDate":"last Tuesday"}"#;
        let failure = normalize_response(reply).unwrap_err();
        assert_eq!(failure.reason, ParseFailure::INVALID_FIELD);
    }

    #[test]
    fn test_negative_total_is_invalid_field() {
        let reply = r#"{"total":-4,"currency":"USD","category":"Food","vendor":"Cafe"}"#;
        let failure = normalize_response(reply).unwrap_err();
        assert_eq!(failure.reason, ParseFailure::INVALID_FIELD);
    }

    #[test]
    fn test_string_total_is_malformed() {
        let reply = r#"{"total":"12.50","currency":"USD","category":"Food","vendor":"Cafe"}"#;
        let failure = normalize_response(reply).unwrap_err();
        assert_eq!(failure.reason, ParseFailure::MALFORMED);
    }

    #[test]
    fn test_missing_field_is_malformed() {
        let reply = r#"{"total":2,"currency":"USD","category":"Food"}"#;
        assert_eq!(normalize_response(reply).unwrap_err().reason, ParseFailure::MALFORMED);
    }

    #[test]
    fn test_unknown_keys_ignored_and_fields_cleaned() {
        let reply = r#"{"total":9.99,"currency":"gbp","category":"pet care","vendor":"  Paws ","tax":1.2}"#;
        let draft = normalize_response(reply).unwrap();
        assert_eq!(draft.currency, "GBP");
        assert_eq!(draft.vendor, "Paws");
        assert_eq!(draft.category, Category::Custom("pet care".to_string()));
    }

    #[test]
    fn test_trailing_braces_over_capture() {
        let reply = format!("Result: {} (note: {{approx}})", PLAIN);
        let failure = normalize_response(&reply).unwrap_err();
        assert_eq!(failure.reason, ParseFailure::MALFORMED);
    }

    #[test]
    fn test_unclosed_object() {
        let reply = r#"Sure! {"total": 5, "currency": "USD""#;
        assert_eq!(normalize_response(reply).unwrap_err().raw_text, reply);
    }

    #[test]
    fn test_timestamp_billing_date_truncated() {
        let reply = r#"{"total":1,"currency":"USD","category":"Food","vendor":"Deli","billingDate":"2024-05-06T18:30:00Z"}"#;
        assert_eq!(
            normalize_response(reply).unwrap().billing_date,
            NaiveDate::from_ymd_opt(2024, 5, 6)
        );
    }

    #[test]
    fn test_extract_json_slices_between_braces() {
        assert_eq!(extract_json("abc {\"a\":1} def").as_deref(), Some("{\"a\":1}"));
        assert_eq!(extract_json("no braces"), None);
        assert_eq!(extract_json("  {\"a\":1}  ").as_deref(), Some("{\"a\":1}"));
    }
}
