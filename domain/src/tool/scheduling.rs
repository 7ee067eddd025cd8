//! Built-in scheduling tools (calendar + booking spreadsheet).
//!
//! Every tool is scoped by `professional_id`. Calendar colour ids follow the
//! Google Calendar palette: 6 (orange) marks pending, 10 (green) confirmed.

use super::catalog::{CatalogError, ToolCatalog};
use super::schema::{ParameterSpec, ToolSchema};

pub const LIST_CALENDAR_EVENTS: &str = "list_calendar_events";
pub const GET_CALENDAR_FREE_BUSY: &str = "get_calendar_free_busy";
pub const CREATE_CALENDAR_EVENT: &str = "create_calendar_event";
pub const UPDATE_CALENDAR_EVENT: &str = "update_calendar_event";
pub const DELETE_CALENDAR_EVENT: &str = "delete_calendar_event";
pub const READ_SHEET_CONFIG: &str = "read_sheet_config";
pub const UPDATE_SHEET_CONFIG: &str = "update_sheet_config";
pub const LOG_BOOKING_ACTION: &str = "log_booking_action";
pub const GET_BOOKING_STATS: &str = "get_booking_stats";

const CONFIG_TYPES: [&str; 3] = ["availability", "cancellation_policy", "service_types"];
const EVENT_STATUSES: [&str; 2] = ["pending", "confirmed"];

fn professional(whose: &str) -> ParameterSpec {
    ParameterSpec::string(
        "professional_id",
        format!("ID of the professional whose {whose} to access"),
    )
}

fn calendar_tools() -> Vec<ToolSchema> {
    vec![
        ToolSchema::new(
            LIST_CALENDAR_EVENTS,
            "Lists events from a professional's calendar within a date range",
        )
        .with_required(professional("calendar"))
        .with_required(ParameterSpec::string("start_date", "Start date (YYYY-MM-DD)"))
        .with_required(ParameterSpec::string("end_date", "End date (YYYY-MM-DD)"))
        .with_parameter(ParameterSpec::enumeration(
            "status_filter",
            "Optional filter for event status",
            ["confirmed", "pending", "all"],
        )),
        ToolSchema::new(
            GET_CALENDAR_FREE_BUSY,
            "Gets free/busy information for a professional's calendar",
        )
        .with_required(professional("calendar"))
        .with_required(ParameterSpec::string("start_date", "Start date (YYYY-MM-DD)"))
        .with_required(ParameterSpec::string("end_date", "End date (YYYY-MM-DD)"))
        .with_parameter(ParameterSpec::string(
            "time_zone",
            "Time zone for the query (e.g. 'America/Sao_Paulo')",
        )),
        ToolSchema::new(
            CREATE_CALENDAR_EVENT,
            "Creates a new event in a professional's calendar",
        )
        .with_required(professional("calendar"))
        .with_required(ParameterSpec::string("summary", "Event title"))
        .with_required(ParameterSpec::string(
            "start_datetime",
            "Start date and time (YYYY-MM-DDTHH:MM:SS)",
        ))
        .with_required(ParameterSpec::string(
            "end_datetime",
            "End date and time (YYYY-MM-DDTHH:MM:SS)",
        ))
        .with_parameter(ParameterSpec::string("client_email", "Email of the client to invite"))
        .with_parameter(ParameterSpec::string("description", "Event description"))
        .with_required(ParameterSpec::enumeration(
            "status",
            "Event status",
            EVENT_STATUSES,
        ))
        .with_parameter(ParameterSpec::string(
            "color_id",
            "Calendar color ID (6 = pending, 10 = confirmed)",
        )),
        ToolSchema::new(
            UPDATE_CALENDAR_EVENT,
            "Updates an existing event in a professional's calendar",
        )
        .with_required(professional("calendar"))
        .with_required(ParameterSpec::string("event_id", "ID of the event to update"))
        .with_parameter(ParameterSpec::string("summary", "Updated event title"))
        .with_parameter(ParameterSpec::enumeration(
            "status",
            "Updated event status",
            EVENT_STATUSES,
        ))
        .with_parameter(ParameterSpec::string("color_id", "Updated calendar color ID")),
        ToolSchema::new(
            DELETE_CALENDAR_EVENT,
            "Deletes an event from a professional's calendar",
        )
        .with_required(professional("calendar"))
        .with_required(ParameterSpec::string("event_id", "ID of the event to delete")),
    ]
}

fn sheet_tools() -> Vec<ToolSchema> {
    vec![
        ToolSchema::new(
            READ_SHEET_CONFIG,
            "Reads configuration data from a professional's spreadsheet",
        )
        .with_required(professional("sheet"))
        .with_required(ParameterSpec::string("sheet_id", "ID of the spreadsheet"))
        .with_required(ParameterSpec::enumeration(
            "config_type",
            "Type of configuration to read",
            CONFIG_TYPES,
        )),
        ToolSchema::new(
            UPDATE_SHEET_CONFIG,
            "Updates configuration data in a professional's spreadsheet",
        )
        .with_required(professional("sheet"))
        .with_required(ParameterSpec::string("sheet_id", "ID of the spreadsheet"))
        .with_required(ParameterSpec::enumeration(
            "config_type",
            "Type of configuration to update",
            CONFIG_TYPES,
        ))
        .with_required(ParameterSpec::object(
            "config_data",
            "Configuration data to write (structure depends on config_type)",
        )),
        ToolSchema::new(
            LOG_BOOKING_ACTION,
            "Logs a booking-related action in the booking log sheet",
        )
        .with_required(ParameterSpec::string("professional_id", "ID of the professional"))
        .with_required(ParameterSpec::string("sheet_id", "ID of the booking log sheet"))
        .with_required(ParameterSpec::string("client_name", "Name of the client"))
        .with_parameter(ParameterSpec::string("client_email", "Email of the client"))
        .with_required(ParameterSpec::string("service_type", "Type of service requested"))
        .with_required(ParameterSpec::string(
            "datetime",
            "Date and time of the appointment (ISO-8601)",
        ))
        .with_required(ParameterSpec::enumeration(
            "action",
            "Action being logged",
            [
                "pre_booking",
                "confirmed",
                "rejected",
                "canceled",
                "completed",
                "no_show",
            ],
        ))
        .with_parameter(ParameterSpec::string("event_id", "Calendar event ID, if any"))
        .with_parameter(ParameterSpec::string("notes", "Additional notes")),
        ToolSchema::new(
            GET_BOOKING_STATS,
            "Retrieves booking statistics from the booking log sheet",
        )
        .with_required(ParameterSpec::string("professional_id", "ID of the professional"))
        .with_required(ParameterSpec::string("sheet_id", "ID of the booking log sheet"))
        .with_required(ParameterSpec::string(
            "start_date",
            "Start of the statistics period (YYYY-MM-DD)",
        ))
        .with_required(ParameterSpec::string(
            "end_date",
            "End of the statistics period (YYYY-MM-DD)",
        ))
        .with_required(ParameterSpec::enumeration(
            "stat_type",
            "Type of statistics to retrieve",
            [
                "confirmed_count",
                "cancellation_rate",
                "no_show_rate",
                "cancellation_fees",
            ],
        )),
    ]
}

/// The catalog exposed to the model: five calendar tools followed by four
/// spreadsheet tools.
pub fn scheduling_catalog() -> Result<ToolCatalog, CatalogError> {
    let mut catalog = ToolCatalog::new();
    for schema in calendar_tools().into_iter().chain(sheet_tools()) {
        catalog.register(schema)?;
    }
    Ok(catalog)
}
