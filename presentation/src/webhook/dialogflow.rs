//! Dialogflow CX webhook codec
//!
//! Only the fields the orchestrator reads are modelled; everything else in
//! the payload is ignored.

use agendai_domain::{WebhookReply, WebhookRequest};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Inbound `WebhookRequest` as sent by Dialogflow CX.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogflowRequest {
    #[serde(default)]
    pub session_info: SessionInfo,
    #[serde(default)]
    pub intent_info: IntentInfo,
    #[serde(default)]
    pub language_code: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SessionInfo {
    /// Full session resource name
    #[serde(default)]
    pub session: String,
    #[serde(default)]
    pub parameters: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentInfo {
    #[serde(default)]
    pub display_name: String,
}

impl DialogflowRequest {
    /// Convert to the transport-neutral request. A missing or blank
    /// `languageCode` becomes `default_language`.
    pub fn into_request(self, default_language: &str) -> WebhookRequest {
        let language = self
            .language_code
            .map(|code| code.trim().to_string())
            .filter(|code| !code.is_empty())
            .unwrap_or_else(|| default_language.to_string());

        let mut request = WebhookRequest::new(
            self.session_info.session,
            self.intent_info.display_name.trim(),
        )
        .with_language(language);
        request.parameters = self.session_info.parameters.unwrap_or_default();
        request
    }
}

/// Outbound fulfillment response carrying one text message.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FulfillmentEnvelope {
    pub fulfillment_response: FulfillmentResponse,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FulfillmentResponse {
    pub messages: Vec<ResponseMessage>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseMessage {
    pub text: MessageText,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessageText {
    pub text: Vec<String>,
}

impl From<WebhookReply> for FulfillmentEnvelope {
    fn from(reply: WebhookReply) -> Self {
        Self {
            fulfillment_response: FulfillmentResponse {
                messages: vec![ResponseMessage {
                    text: MessageText {
                        text: vec![reply.text],
                    },
                }],
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_full_request() {
        let body = json!({
            "detectIntentResponseId": "abc",
            "intentInfo": {"lastMatchedIntent": "projects/x/intents/1", "displayName": "consultar_agenda"},
            "sessionInfo": {
                "session": "projects/p/locations/l/agents/a/sessions/s-42",
                "parameters": {"data_consulta": "2025-05-24", "professional_id": "prof9"}
            },
            "languageCode": "en"
        });

        let request = serde_json::from_value::<DialogflowRequest>(body)
            .unwrap()
            .into_request("pt-br");

        assert_eq!(request.session_id, "projects/p/locations/l/agents/a/sessions/s-42");
        assert_eq!(request.intent_name, "consultar_agenda");
        assert_eq!(request.language_code, "en");
        assert_eq!(request.parameter_str("professional_id"), Some("prof9"));
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let request = serde_json::from_value::<DialogflowRequest>(json!({}))
            .unwrap()
            .into_request("pt-br");

        assert_eq!(request.session_id, "");
        assert_eq!(request.intent_name, "");
        assert_eq!(request.language_code, "pt-br");
        assert!(request.parameters.is_empty());
    }

    #[test]
    fn test_null_parameters() {
        let request = serde_json::from_value::<DialogflowRequest>(json!({
            "sessionInfo": {"session": "s", "parameters": null},
            "languageCode": "  "
        }))
        .unwrap()
        .into_request("pt-br");
        assert!(request.parameters.is_empty());
        assert_eq!(request.language_code, "pt-br");
    }

    #[test]
    fn test_envelope_shape() {
        let envelope = FulfillmentEnvelope::from(WebhookReply::new("Agendado!"));
        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({"fulfillmentResponse": {"messages": [{"text": {"text": ["Agendado!"]}}]}})
        );
    }
}
