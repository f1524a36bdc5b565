//! Wire envelope shapes for the Kitchensink REST service.

use serde::Deserialize;

/// Every response body: `{ success, data, message? }`.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Error-side envelope: `data` may carry a field→message map when the
/// server rejects input on validation, or arbitrary detail otherwise.
#[derive(Debug, Deserialize)]
pub struct ErrorEnvelope {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

/// `POST /profile/{userId}/email/request-otp` payload of the envelope.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OtpIssued {
    pub otp_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_with_data() {
        let raw = r#"{"success": true, "data": {"otpId": "o-1"}, "message": "OTP sent"}"#;
        let envelope: Envelope<OtpIssued> = serde_json::from_str(raw).unwrap();
        assert!(envelope.success);
        assert_eq!(envelope.data.unwrap().otp_id, "o-1");
    }

    #[test]
    fn test_envelope_without_data_or_message() {
        let raw = r#"{"success": true}"#;
        let envelope: Envelope<OtpIssued> = serde_json::from_str(raw).unwrap();
        assert!(envelope.data.is_none());
        assert!(envelope.message.is_none());
    }

    #[test]
    fn test_error_envelope_with_field_map() {
        let raw = r#"{"success": false, "message": "Validation failed",
                      "data": {"email": "Email already registered"}}"#;
        let envelope: ErrorEnvelope = serde_json::from_str(raw).unwrap();
        assert_eq!(envelope.message.as_deref(), Some("Validation failed"));
        assert!(envelope.data.unwrap().is_object());
    }
}
