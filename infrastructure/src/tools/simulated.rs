//! Simulated scheduling tool executor.
//!
//! Stands in for the calendar and spreadsheet backends. Returns fixed,
//! realistic payloads and echoes the relevant invocation arguments so that the
//! whole request flow can be exercised end to end without external accounts.

use agendai_application::ports::tool_executor::{ExecutorError, ToolExecutorPort};
use agendai_domain::ToolInvocation;
use agendai_domain::tool::scheduling::{
    CREATE_CALENDAR_EVENT, DELETE_CALENDAR_EVENT, GET_BOOKING_STATS, GET_CALENDAR_FREE_BUSY,
    LIST_CALENDAR_EVENTS, LOG_BOOKING_ACTION, READ_SHEET_CONFIG, UPDATE_CALENDAR_EVENT,
    UPDATE_SHEET_CONFIG,
};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde_json::{Value, json};
use tracing::info;

/// Executor returning canned backend responses.
#[derive(Debug, Clone, Default)]
pub struct SimulatedToolExecutor {
    fixed_time: Option<NaiveDateTime>,
}

impl SimulatedToolExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a fixed timestamp instead of the local clock.
    pub fn with_fixed_time(mut self, at: NaiveDateTime) -> Self {
        self.fixed_time = Some(at);
        self
    }

    fn now(&self) -> String {
        let at = self
            .fixed_time
            .unwrap_or_else(|| chrono::Local::now().naive_local());
        at.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
    }

    fn respond(&self, invocation: &ToolInvocation) -> Result<Value, ExecutorError> {
        let arg = |key: &str| invocation.get_string(key).unwrap_or_default().to_string();

        let payload = match invocation.name.as_str() {
            LIST_CALENDAR_EVENTS => json!({
                "events": [
                    {
                        "id": "event123",
                        "summary": "[Confirmado] - Consulta Inicial",
                        "start": "2025-05-24T09:00:00",
                        "end": "2025-05-24T10:00:00",
                        "status": "confirmed",
                        "attendees": [{"email": "cliente@example.com", "displayName": "Cliente A"}]
                    },
                    {
                        "id": "event456",
                        "summary": "[Pendente] - Reunião",
                        "start": "2025-05-24T14:00:00",
                        "end": "2025-05-24T15:00:00",
                        "status": "tentative",
                        "attendees": [{"email": "cliente@example.com", "displayName": "Cliente B"}]
                    }
                ]
            }),
            GET_CALENDAR_FREE_BUSY => json!({
                "timeMin": "2025-05-24T00:00:00",
                "timeMax": "2025-05-24T23:59:59",
                "busy": [
                    {"start": "2025-05-24T09:00:00", "end": "2025-05-24T10:00:00"},
                    {"start": "2025-05-24T14:00:00", "end": "2025-05-24T15:00:00"}
                ],
                "free": [
                    {"start": "2025-05-24T10:30:00", "end": "2025-05-24T12:30:00"},
                    {"start": "2025-05-24T15:30:00", "end": "2025-05-24T17:30:00"}
                ]
            }),
            CREATE_CALENDAR_EVENT => json!({
                "id": "new_event_789",
                "summary": arg("summary"),
                "start": arg("start_datetime"),
                "end": arg("end_datetime"),
                "status": arg("status"),
                "created": self.now(),
            }),
            UPDATE_CALENDAR_EVENT => json!({
                "id": arg("event_id"),
                "summary": arg("summary"),
                "status": arg("status"),
                "updated": self.now(),
            }),
            DELETE_CALENDAR_EVENT => json!({
                "id": arg("event_id"),
                "deleted": true,
            }),
            READ_SHEET_CONFIG => sheet_config(invocation, &arg("config_type"))?,
            UPDATE_SHEET_CONFIG => json!({
                "updated": true,
                "config_type": arg("config_type"),
                "timestamp": self.now(),
            }),
            LOG_BOOKING_ACTION => json!({
                "logged": true,
                "action": arg("action"),
                "timestamp": self.now(),
            }),
            GET_BOOKING_STATS => booking_stats(invocation, &arg("stat_type"))?,
            other => return Err(ExecutorError::Unsupported(other.to_string())),
        };

        Ok(payload)
    }
}

fn sheet_config(invocation: &ToolInvocation, config_type: &str) -> Result<Value, ExecutorError> {
    let weekday = |day: &str| json!({"day": day, "start": "09:00", "end": "17:00"});
    match config_type {
        "availability" => Ok(json!({
            "availability": [
                weekday("Monday"),
                weekday("Tuesday"),
                weekday("Wednesday"),
                weekday("Thursday"),
                weekday("Friday"),
            ]
        })),
        "cancellation_policy" => Ok(json!({
            "cancellation_policy": {
                "free_cancellation_hours": 24,
                "cancellation_fee": 50.0
            }
        })),
        "service_types" => Ok(json!({
            "service_types": [
                {"name": "Consulta Inicial", "duration": 60, "price": 200.0},
                {"name": "Consulta de Retorno", "duration": 30, "price": 150.0},
                {"name": "Reunião", "duration": 60, "price": 180.0}
            ]
        })),
        other => Err(ExecutorError::Failed {
            tool: invocation.name.clone(),
            message: format!("unsupported config_type '{other}'"),
        }),
    }
}

fn booking_stats(invocation: &ToolInvocation, stat_type: &str) -> Result<Value, ExecutorError> {
    match stat_type {
        "confirmed_count" => Ok(json!({"count": 15})),
        "cancellation_rate" => Ok(json!({"rate": 0.12})),
        "no_show_rate" => Ok(json!({"rate": 0.05})),
        "cancellation_fees" => Ok(json!({"total_fees": 150.0})),
        other => Err(ExecutorError::Failed {
            tool: invocation.name.clone(),
            message: format!("unsupported stat_type '{other}'"),
        }),
    }
}

#[async_trait]
impl ToolExecutorPort for SimulatedToolExecutor {
    async fn invoke(&self, invocation: &ToolInvocation) -> Result<Value, ExecutorError> {
        info!(tool = %invocation.name, "Simulating tool execution");
        self.respond(invocation)
    }
}
