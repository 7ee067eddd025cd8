//! Dialogue intents recognized by the orchestrator

use std::str::FromStr;

/// Intent names as configured in the dialogue agent.
///
/// Names that are not recognized map to [`Intent::Other`] and get a generic
/// instruction, they are never rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Intent {
    /// Professional sets working days and hours
    ConfigureAvailability,
    /// Professional sets the free-cancellation window and fee
    ConfigureCancellationPolicy,
    /// Client asks for a booking and wants available slots
    RequestBooking,
    /// Client picks one slot; a pending event is created
    SelectSpecificTime,
    /// Professional confirms or rejects a pending booking
    ManagePendingRequest,
    /// Professional lists the day's appointments
    QueryAgenda,
    /// Client wants to cancel a booking
    RequestCancellation,
    Other(String),
}

impl Intent {
    pub fn as_str(&self) -> &str {
        match self {
            Intent::ConfigureAvailability => "configurar_disponibilidade",
            Intent::ConfigureCancellationPolicy => "configurar_politica_cancelamento",
            Intent::RequestBooking => "solicitar_agendamento",
            Intent::SelectSpecificTime => "selecionar_horario_especifico",
            Intent::ManagePendingRequest => "gerenciar_pedido_pendente",
            Intent::QueryAgenda => "consultar_agenda",
            Intent::RequestCancellation => "solicitar_cancelamento",
            Intent::Other(name) => name,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Intent::Other(_))
    }
}

impl FromStr for Intent {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim() {
            "configurar_disponibilidade" => Intent::ConfigureAvailability,
            "configurar_politica_cancelamento" => Intent::ConfigureCancellationPolicy,
            "solicitar_agendamento" => Intent::RequestBooking,
            "selecionar_horario_especifico" => Intent::SelectSpecificTime,
            "gerenciar_pedido_pendente" => Intent::ManagePendingRequest,
            "consultar_agenda" => Intent::QueryAgenda,
            "solicitar_cancelamento" => Intent::RequestCancellation,
            other => Intent::Other(other.to_string()),
        })
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_known_names() {
        for intent in [
            Intent::ConfigureAvailability,
            Intent::ConfigureCancellationPolicy,
            Intent::RequestBooking,
            Intent::SelectSpecificTime,
            Intent::ManagePendingRequest,
            Intent::QueryAgenda,
            Intent::RequestCancellation,
        ] {
            let parsed: Intent = intent.as_str().parse().unwrap();
            assert_eq!(parsed, intent);
            assert!(parsed.is_known());
        }
    }

    #[test]
    fn test_unknown_name_is_other() {
        let intent: Intent = "saudacao".parse().unwrap();
        assert_eq!(intent, Intent::Other("saudacao".to_string()));
        assert!(!intent.is_known());
        assert_eq!(intent.to_string(), "saudacao");
    }
}
