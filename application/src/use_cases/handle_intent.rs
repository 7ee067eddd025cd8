//! Handle Intent use case
//!
//! Serves one inbound dialogue request: intent → instruction + context →
//! fresh conversation session → tool dispatch loop → reply text.

use super::conversation_session::{ConversationSession, SessionError};
use super::dispatch_loop::{DispatchError, ToolDispatchLoop};
use super::shared::CallGuard;
use crate::config::ExecutionParams;
use crate::ports::conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger};
use crate::ports::model_responder::ModelResponder;
use crate::ports::tool_executor::ToolExecutorPort;
use agendai_domain::util::truncate_str;
use agendai_domain::{
    GenerationSettings, Intent, IntentPromptTemplate, PromptBuilder, PromptError, ToolCatalog,
    WebhookReply, WebhookRequest,
};
use chrono::NaiveDateTime;
use serde_json::{Map, Value, json};
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// Errors that can occur while handling an intent
#[derive(Error, Debug)]
pub enum HandleIntentError {
    #[error("Prompt error: {0}")]
    Prompt(#[from] PromptError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    #[error("Model returned an empty reply")]
    EmptyReply,
}

impl HandleIntentError {
    pub fn is_cancelled(&self) -> bool {
        match self {
            HandleIntentError::Session(e) => e.is_cancelled(),
            HandleIntentError::Dispatch(e) => e.is_cancelled(),
            _ => false,
        }
    }
}

/// Input for the HandleIntent use case
#[derive(Debug, Clone)]
pub struct HandleIntentInput {
    pub request: WebhookRequest,
    /// Local time the request was received; feeds the context timestamp and
    /// date defaults such as "today".
    pub received_at: NaiveDateTime,
}

impl HandleIntentInput {
    pub fn new(request: WebhookRequest, received_at: NaiveDateTime) -> Self {
        Self {
            request,
            received_at,
        }
    }
}

/// Output of a successfully handled intent
#[derive(Debug, Clone)]
pub struct HandleIntentOutput {
    pub reply: WebhookReply,
    /// Tool rounds the request needed
    pub iterations: usize,
    /// Tools executed, in order
    pub executed_tools: Vec<String>,
}

/// Use case for serving one webhook request
pub struct HandleIntentUseCase {
    responder: Arc<dyn ModelResponder>,
    executor: Arc<dyn ToolExecutorPort>,
    catalog: Arc<ToolCatalog>,
    settings: GenerationSettings,
    params: ExecutionParams,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl HandleIntentUseCase {
    pub fn new(
        responder: Arc<dyn ModelResponder>,
        executor: Arc<dyn ToolExecutorPort>,
        catalog: Arc<ToolCatalog>,
    ) -> Self {
        Self {
            responder,
            executor,
            catalog,
            settings: GenerationSettings::default(),
            params: ExecutionParams::default(),
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    pub fn with_settings(mut self, settings: GenerationSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_params(mut self, params: ExecutionParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    pub fn params(&self) -> &ExecutionParams {
        &self.params
    }

    /// Serve the request. Every failure is returned to the caller.
    pub async fn execute(
        &self,
        input: HandleIntentInput,
        cancellation: CancellationToken,
    ) -> Result<HandleIntentOutput, HandleIntentError> {
        let request = &input.request;
        let Ok(intent) = request.intent_name.parse::<Intent>();
        info!(
            session = %request.session_id,
            intent = %intent,
            known = intent.is_known(),
            "Handling intent"
        );

        let context = self.build_context(&input);
        let instruction = IntentPromptTemplate::instruction(
            &intent,
            &request.parameters,
            input.received_at.date(),
        );
        let prompt = PromptBuilder::build(&instruction, &context)?;

        self.conversation_logger.log(ConversationEvent::new(
            "prompt",
            json!({
                "session": request.session_id,
                "intent": intent.as_str(),
                "text": prompt,
            }),
        ));

        let guard = CallGuard::new(cancellation).with_timeout(self.params.request_timeout);
        let mut session = ConversationSession::new(
            Arc::clone(&self.responder),
            Arc::clone(&self.catalog),
            self.settings,
            guard,
        )
        .with_id(request.session_id.clone());

        let initial = session
            .start_with_context(&prompt, Value::Object(context))
            .await?;

        let dispatch = ToolDispatchLoop::new(Arc::clone(&self.executor), self.params.max_iterations)
            .with_parallel_batches(self.params.parallel_batches)
            .with_conversation_logger(Arc::clone(&self.conversation_logger));
        let outcome = dispatch.run(&mut session, initial).await?;

        if outcome.text.trim().is_empty() {
            return Err(HandleIntentError::EmptyReply);
        }

        info!(
            session = %request.session_id,
            iterations = outcome.iterations,
            tools = outcome.executed.len(),
            "Reply ready: {}",
            truncate_str(&outcome.text, 100)
        );
        self.conversation_logger.log(ConversationEvent::new(
            "reply",
            json!({
                "session": request.session_id,
                "text": outcome.text,
                "iterations": outcome.iterations,
                "tools": outcome.executed,
            }),
        ));

        Ok(HandleIntentOutput {
            reply: WebhookReply::new(outcome.text),
            iterations: outcome.iterations,
            executed_tools: outcome.executed,
        })
    }

    /// Serve the request, converting any failure into the localized fallback
    /// reply. Error details go to the log only.
    pub async fn respond(&self, input: HandleIntentInput, cancellation: CancellationToken) -> WebhookReply {
        let language = input.request.language();
        let session_id = input.request.session_id.clone();
        match self.execute(input, cancellation).await {
            Ok(output) => output.reply,
            Err(e) => {
                error!(session = %session_id, cancelled = e.is_cancelled(), "Request failed: {}", e);
                WebhookReply::fallback(language)
            }
        }
    }

    fn build_context(&self, input: &HandleIntentInput) -> Map<String, Value> {
        let request = &input.request;
        let professional_id = request
            .parameter_str("professional_id")
            .unwrap_or(&self.params.default_professional_id);

        let mut context = Map::new();
        context.insert("professional_id".to_string(), json!(professional_id));
        context.insert("intent".to_string(), json!(request.intent_name));
        context.insert(
            "parameters".to_string(),
            Value::Object(request.parameters.clone()),
        );
        context.insert("session_id".to_string(), json!(request.session_id));
        context.insert("language_code".to_string(), json!(request.language_code));
        context.insert(
            "timestamp".to_string(),
            json!(input.received_at.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()),
        );
        context
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::model_responder::ResponderError;
    use crate::ports::tool_executor::ExecutorError;
    use crate::use_cases::conversation_session::tests::ScriptedResponder;
    use agendai_domain::prompt::CONTEXT_DELIMITER;
    use agendai_domain::{
        ConversationTurn, ExtractError, Part, ResponseTurn, ToolInvocation, scheduling_catalog,
    };
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::sync::Mutex;

    #[derive(Default)]
    struct CountingExecutor {
        invoked: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl ToolExecutorPort for CountingExecutor {
        async fn invoke(&self, invocation: &ToolInvocation) -> Result<Value, ExecutorError> {
            self.invoked.lock().unwrap().push(invocation.name.clone());
            Ok(json!({"id": "evt_1", "status": "pending"}))
        }
    }

    fn received_at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 14)
            .unwrap()
            .and_hms_micro_opt(10, 30, 0, 250)
            .unwrap()
    }

    fn use_case(
        responder: Arc<ScriptedResponder>,
        executor: Arc<CountingExecutor>,
    ) -> HandleIntentUseCase {
        HandleIntentUseCase::new(
            responder,
            executor,
            Arc::new(scheduling_catalog().unwrap()),
        )
    }

    fn first_prompt(responder: &ScriptedResponder) -> (String, Value) {
        let seen = responder.seen.lock().unwrap();
        match &seen[0][0] {
            ConversationTurn::Prompt { text, context } => {
                (text.clone(), context.clone().unwrap_or(Value::Null))
            }
            other => panic!("expected prompt turn, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_booking_selection_creates_pending_event() {
        let responder = Arc::new(ScriptedResponder::new(vec![
            Ok(ResponseTurn::from_parts(vec![Part::function_call(
                "create_calendar_event",
                json!({
                    "professional_id": "prof123",
                    "summary": "Corte - Ana",
                    "start_datetime": "2025-03-20T14:00:00",
                    "end_datetime": "2025-03-20T15:00:00",
                    "status": "pending",
                    "color_id": "6"
                }),
            )])),
            Ok(ResponseTurn::from_text(
                "Seu pré-agendamento foi registrado!",
            )),
        ]));
        let executor = Arc::new(CountingExecutor::default());
        let request = WebhookRequest::new("sessions/abc", "selecionar_horario_especifico")
            .with_parameter("cliente_nome", json!("Ana"))
            .with_parameter("horario_escolhido", json!("14:00"));

        let output = use_case(responder.clone(), executor.clone())
            .execute(
                HandleIntentInput::new(request, received_at()),
                CancellationToken::new(),
            )
            .await
            .unwrap();

        assert_eq!(output.reply.text, "Seu pré-agendamento foi registrado!");
        assert_eq!(output.iterations, 1);
        assert_eq!(output.executed_tools, vec!["create_calendar_event"]);
        assert_eq!(
            *executor.invoked.lock().unwrap(),
            vec!["create_calendar_event".to_string()]
        );
    }

    #[tokio::test]
    async fn test_prompt_carries_request_context() {
        let responder = Arc::new(ScriptedResponder::new(vec![Ok(ResponseTurn::from_text(
            "Agenda vazia.",
        ))]));
        let request = WebhookRequest::new("sessions/xyz", "consultar_agenda");

        use_case(responder.clone(), Arc::new(CountingExecutor::default()))
            .execute(
                HandleIntentInput::new(request, received_at()),
                CancellationToken::new(),
            )
            .await
            .unwrap();

        let (text, context) = first_prompt(&responder);
        assert!(text.contains("para a data: 2025-03-14."));
        assert!(text.contains(CONTEXT_DELIMITER));
        assert_eq!(context["professional_id"], "prof123");
        assert_eq!(context["intent"], "consultar_agenda");
        assert_eq!(context["session_id"], "sessions/xyz");
        assert_eq!(context["language_code"], "pt-br");
        assert_eq!(context["timestamp"], "2025-03-14T10:30:00.000250");
        assert_eq!(context["parameters"], json!({}));
    }

    #[tokio::test]
    async fn test_professional_id_from_parameters_wins() {
        let responder = Arc::new(ScriptedResponder::new(vec![Ok(ResponseTurn::from_text(
            "ok",
        ))]));
        let request = WebhookRequest::new("s", "configurar_disponibilidade")
            .with_parameter("professional_id", json!("prof777"));

        use_case(responder.clone(), Arc::new(CountingExecutor::default()))
            .with_params(ExecutionParams::default().with_default_professional_id("ignored"))
            .execute(
                HandleIntentInput::new(request, received_at()),
                CancellationToken::new(),
            )
            .await
            .unwrap();

        let (_, context) = first_prompt(&responder);
        assert_eq!(context["professional_id"], "prof777");
    }

    #[tokio::test]
    async fn test_unknown_tool_yields_fallback_reply() {
        let responder = Arc::new(ScriptedResponder::new(vec![Ok(ResponseTurn::from_parts(
            vec![Part::function_call("send_sms", json!({}))],
        ))]));
        let executor = Arc::new(CountingExecutor::default());
        let uc = use_case(responder.clone(), executor.clone());

        let err = uc
            .execute(
                HandleIntentInput::new(WebhookRequest::new("s", "solicitar_agendamento"), received_at()),
                CancellationToken::new(),
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            HandleIntentError::Dispatch(DispatchError::Extract(ExtractError::UnknownTool(ref name)))
                if name == "send_sms"
        ));

        let responder = Arc::new(ScriptedResponder::new(vec![Ok(ResponseTurn::from_parts(
            vec![Part::function_call("send_sms", json!({}))],
        ))]));
        let reply = use_case(responder, executor.clone())
            .respond(
                HandleIntentInput::new(WebhookRequest::new("s", "solicitar_agendamento"), received_at()),
                CancellationToken::new(),
            )
            .await;
        assert_eq!(
            reply.text,
            "Desculpe, ocorreu um erro ao processar sua solicitação. Por favor, tente novamente mais tarde."
        );
        assert!(executor.invoked.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_transport_failure_yields_english_fallback() {
        let responder = Arc::new(ScriptedResponder::new(vec![Err(ResponderError::Transport(
            "dns failure".to_string(),
        ))]));
        let request = WebhookRequest::new("s", "consultar_agenda").with_language("en-US");

        let reply = use_case(responder, Arc::new(CountingExecutor::default()))
            .respond(
                HandleIntentInput::new(request, received_at()),
                CancellationToken::new(),
            )
            .await;
        assert!(reply.text.starts_with("Sorry"));
    }

    #[tokio::test]
    async fn test_empty_final_text_is_an_error() {
        let responder = Arc::new(ScriptedResponder::new(vec![Ok(ResponseTurn::default())]));
        let err = use_case(responder, Arc::new(CountingExecutor::default()))
            .execute(
                HandleIntentInput::new(WebhookRequest::new("s", "x"), received_at()),
                CancellationToken::new(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, HandleIntentError::EmptyReply));
    }

    #[tokio::test]
    async fn test_cancelled_before_start() {
        let responder = Arc::new(ScriptedResponder::new(vec![Ok(ResponseTurn::from_text(
            "never",
        ))]));
        let token = CancellationToken::new();
        token.cancel();

        let err = use_case(responder.clone(), Arc::new(CountingExecutor::default()))
            .execute(
                HandleIntentInput::new(WebhookRequest::new("s", "consultar_agenda"), received_at()),
                token,
            )
            .await
            .unwrap_err();
        assert!(err.is_cancelled());
        assert_eq!(responder.calls(), 0);
    }
}
