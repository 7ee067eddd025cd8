//! Instruction templates for each intent
//!
//! Instructions are written in Brazilian Portuguese, the language end users
//! talk to the assistant in.

use super::intent::Intent;
use crate::util::display_value;
use chrono::NaiveDate;
use serde_json::{Map, Value};

/// Builds the instruction text for an intent from its slot parameters.
pub struct IntentPromptTemplate;

impl IntentPromptTemplate {
    /// Instruction for `intent`. `today` fills in dates the user left out.
    pub fn instruction(intent: &Intent, parameters: &Map<String, Value>, today: NaiveDate) -> String {
        let p = |key: &str| param(parameters, key, "");

        match intent {
            Intent::ConfigureAvailability => Self::availability(
                &p("dias_semana"),
                &p("horario_inicio"),
                &p("horario_fim"),
            ),
            Intent::ConfigureCancellationPolicy => Self::cancellation_policy(
                &param(parameters, "limite_cancelamento_horas", "0"),
                &param(parameters, "taxa_cancelamento_valor", "0"),
            ),
            Intent::RequestBooking => format!(
                r#"Um cliente deseja agendar um serviço com os seguintes detalhes:
- Nome do cliente: {}
- Email do cliente: {}
- Tipo de serviço: {}
- Preferência de data: {}
- Preferência de período: {}

Por favor, verifique a disponibilidade do profissional para esta preferência
e sugira horários específicos disponíveis. A resposta deve ser em português
brasileiro (pt-BR)."#,
                p("cliente_nome"),
                p("cliente_email"),
                p("servico_tipo"),
                p("preferencia_data"),
                p("preferencia_periodo"),
            ),
            Intent::SelectSpecificTime => format!(
                r#"O cliente selecionou um horário específico para agendamento:
- Nome do cliente: {}
- Email do cliente: {}
- Tipo de serviço: {}
- Data escolhida: {}
- Horário escolhido: {}

Por favor, crie um evento pendente no Google Calendar do profissional com
status "Pendente" e cor laranja (color_id=6). Também registre este pré-agendamento
no Google Sheets. Em seguida, gere uma mensagem de confirmação do pré-agendamento
para o cliente em português brasileiro (pt-BR), informando que o profissional
precisa confirmar o agendamento."#,
                p("cliente_nome"),
                p("cliente_email"),
                p("servico_tipo"),
                p("data_escolhida"),
                p("horario_escolhido"),
            ),
            Intent::ManagePendingRequest => Self::pending_request(&p("action"), &p("event_id")),
            Intent::QueryAgenda => {
                let mut date = p("data_consulta");
                if date.is_empty() {
                    date = today.format("%Y-%m-%d").to_string();
                }
                format!(
                    r#"O profissional deseja consultar sua agenda para a data: {date}.

Por favor, liste todos os compromissos (confirmados e pendentes) para esta data,
obtendo as informações do Google Calendar. A resposta deve ser em português
brasileiro (pt-BR) e deve incluir o horário, status (confirmado/pendente) e
nome do cliente para cada compromisso."#
                )
            }
            Intent::RequestCancellation => format!(
                r#"O cliente {} deseja cancelar o agendamento com ID {}.

Por favor, verifique a política de cancelamento do profissional e determine
se há alguma taxa aplicável com base no tempo restante até o agendamento.

Em seguida, informe ao cliente sobre a política e pergunte se deseja prosseguir
com o cancelamento. A resposta deve ser em português brasileiro (pt-BR)."#,
                p("cliente_nome"),
                p("event_id"),
            ),
            Intent::Other(name) => Self::generic(name, parameters),
        }
    }

    fn availability(days: &str, start: &str, end: &str) -> String {
        format!(
            r#"O profissional deseja configurar sua disponibilidade com os seguintes parâmetros:
- Dias da semana: {days}
- Horário de início: {start}
- Horário de fim: {end}

Por favor, configure esta disponibilidade no Google Calendar do profissional
e atualize a configuração no Google Sheets. Em seguida, gere uma resposta
de confirmação em português brasileiro (pt-BR)."#
        )
    }

    fn cancellation_policy(hours: &str, fee: &str) -> String {
        format!(
            r#"O profissional deseja configurar sua política de cancelamento com os seguintes parâmetros:
- Limite de horas para cancelamento gratuito: {hours} horas
- Taxa de cancelamento (se fora do prazo): R$ {fee}

Por favor, atualize esta política de cancelamento no Google Sheets do profissional.
Em seguida, gere uma resposta de confirmação em português brasileiro (pt-BR)."#
        )
    }

    fn pending_request(action: &str, event_id: &str) -> String {
        format!(
            r#"O profissional deseja {action} (confirmar ou rejeitar) o agendamento pendente com ID {event_id}.

Se a ação for 'confirm':
- Atualize o evento no Google Calendar para status "Confirmado" e cor verde (color_id=10)
- Atualize o registro no Google Sheets
- Gere uma mensagem de notificação para o cliente em português brasileiro (pt-BR)

Se a ação for 'reject':
- Exclua o evento do Google Calendar
- Atualize o registro no Google Sheets como "Rejeitado"
- Gere uma mensagem de notificação para o cliente em português brasileiro (pt-BR)"#
        )
    }

    fn generic(intent_name: &str, parameters: &Map<String, Value>) -> String {
        let rendered = serde_json::to_string_pretty(parameters).unwrap_or_else(|_| "{}".to_string());
        format!(
            r#"O usuário acionou a intent "{intent_name}" com os seguintes parâmetros:
{rendered}

Por favor, gere uma resposta apropriada em português brasileiro (pt-BR)."#
        )
    }
}

fn param(parameters: &Map<String, Value>, key: &str, default: &str) -> String {
    match parameters.get(key) {
        None | Some(Value::Null) => default.to_string(),
        Some(value) => display_value(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
    }

    #[test]
    fn test_availability_joins_weekdays() {
        let text = IntentPromptTemplate::instruction(
            &Intent::ConfigureAvailability,
            &params(json!({
                "dias_semana": ["segunda", "quarta"],
                "horario_inicio": "09:00",
                "horario_fim": "18:00"
            })),
            today(),
        );
        assert!(text.contains("- Dias da semana: segunda, quarta"));
        assert!(text.contains("- Horário de início: 09:00"));
        assert!(text.contains("- Horário de fim: 18:00"));
    }

    #[test]
    fn test_cancellation_policy_defaults_to_zero() {
        let text = IntentPromptTemplate::instruction(
            &Intent::ConfigureCancellationPolicy,
            &Map::new(),
            today(),
        );
        assert!(text.contains("cancelamento gratuito: 0 horas"));
        assert!(text.contains("R$ 0"));
    }

    #[test]
    fn test_numbers_render_without_quotes() {
        let text = IntentPromptTemplate::instruction(
            &Intent::ConfigureCancellationPolicy,
            &params(json!({"limite_cancelamento_horas": 24, "taxa_cancelamento_valor": 50.5})),
            today(),
        );
        assert!(text.contains("24 horas"));
        assert!(text.contains("R$ 50.5"));
    }

    #[test]
    fn test_agenda_query_defaults_to_today() {
        let text = IntentPromptTemplate::instruction(&Intent::QueryAgenda, &Map::new(), today());
        assert!(text.contains("para a data: 2025-03-14."));

        let text = IntentPromptTemplate::instruction(
            &Intent::QueryAgenda,
            &params(json!({"data_consulta": "2025-04-01"})),
            today(),
        );
        assert!(text.contains("para a data: 2025-04-01."));
    }

    #[test]
    fn test_pending_request_mentions_action_and_event() {
        let text = IntentPromptTemplate::instruction(
            &Intent::ManagePendingRequest,
            &params(json!({"event_id": "evt_42", "action": "confirm"})),
            today(),
        );
        assert!(text.starts_with("O profissional deseja confirm "));
        assert!(text.contains("ID evt_42"));
        assert!(text.contains("color_id=10"));
    }

    #[test]
    fn test_specific_time_selection_requests_pending_event() {
        let text = IntentPromptTemplate::instruction(
            &Intent::SelectSpecificTime,
            &params(json!({
                "cliente_nome": "Ana",
                "data_escolhida": "2025-03-20",
                "horario_escolhido": "14:00"
            })),
            today(),
        );
        assert!(text.contains("- Nome do cliente: Ana"));
        assert!(text.contains("- Email do cliente: \n"));
        assert!(text.contains("color_id=6"));
    }

    #[test]
    fn test_booking_and_cancellation() {
        let booking = IntentPromptTemplate::instruction(
            &Intent::RequestBooking,
            &params(json!({"cliente_nome": "Bruno", "servico_tipo": "Corte"})),
            today(),
        );
        assert!(booking.contains("- Tipo de serviço: Corte"));

        let cancel = IntentPromptTemplate::instruction(
            &Intent::RequestCancellation,
            &params(json!({"cliente_nome": "Bruno", "event_id": "evt_7"})),
            today(),
        );
        assert!(cancel.starts_with("O cliente Bruno deseja cancelar o agendamento com ID evt_7."));
    }

    #[test]
    fn test_generic_intent_embeds_parameters() {
        let text = IntentPromptTemplate::instruction(
            &Intent::Other("saudacao".to_string()),
            &params(json!({"nome": "Júlia"})),
            today(),
        );
        assert!(text.contains("acionou a intent \"saudacao\""));
        assert!(text.contains("\"nome\": \"Júlia\""));
    }
}
