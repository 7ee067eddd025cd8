//! Tool catalog
//!
//! The catalog is built once at start-up, then shared read-only (behind an
//! `Arc`) by every conversation session.

use super::invocation::ToolInvocation;
use super::schema::{ParameterKind, ToolSchema};
use super::validation::{ArgumentError, validate_arguments};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// Errors raised while assembling a catalog
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Tool '{0}' is already registered")]
    DuplicateName(String),

    #[error("Invalid schema for tool '{tool}': {reason}")]
    Schema { tool: String, reason: String },
}

/// Ordered, name-indexed set of tool schemas.
#[derive(Debug, Clone, Default)]
pub struct ToolCatalog {
    tools: Vec<ToolSchema>,
    index: HashMap<String, usize>,
}

impl ToolCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style registration.
    pub fn with_tool(mut self, schema: ToolSchema) -> Result<Self, CatalogError> {
        self.register(schema)?;
        Ok(self)
    }

    /// Add a schema after checking its shape.
    pub fn register(&mut self, schema: ToolSchema) -> Result<(), CatalogError> {
        check_shape(&schema)?;
        if self.index.contains_key(&schema.name) {
            return Err(CatalogError::DuplicateName(schema.name));
        }
        self.index.insert(schema.name.clone(), self.tools.len());
        self.tools.push(schema);
        Ok(())
    }

    /// Look a tool up by name. `None` means the tool is unknown.
    pub fn lookup(&self, name: &str) -> Option<&ToolSchema> {
        self.index.get(name).map(|&i| &self.tools[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Schemas in registration order.
    pub fn tools(&self) -> &[ToolSchema] {
        &self.tools
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tools.iter().map(|t| t.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Check an invocation's arguments against its schema.
    pub fn validate(&self, invocation: &ToolInvocation) -> Result<(), ArgumentError> {
        let schema = self
            .lookup(&invocation.name)
            .ok_or_else(|| ArgumentError::UnknownTool(invocation.name.clone()))?;
        validate_arguments(schema, &invocation.arguments)
    }
}

fn check_shape(schema: &ToolSchema) -> Result<(), CatalogError> {
    let fail = |reason: String| CatalogError::Schema {
        tool: schema.name.clone(),
        reason,
    };

    if schema.name.trim().is_empty() {
        return Err(fail("tool name is empty".to_string()));
    }

    let mut seen = HashSet::new();
    for param in &schema.parameters {
        if !seen.insert(param.name.as_str()) {
            return Err(fail(format!("parameter '{}' declared twice", param.name)));
        }
        if let ParameterKind::Enum { values } = &param.kind
            && values.is_empty()
        {
            return Err(fail(format!("parameter '{}' has an empty enumeration", param.name)));
        }
    }

    for required in &schema.required {
        if !seen.contains(required.as_str()) {
            return Err(fail(format!(
                "required parameter '{}' is not declared",
                required
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::schema::ParameterSpec;

    fn event_tool(name: &str) -> ToolSchema {
        ToolSchema::new(name, "test tool")
            .with_required(ParameterSpec::string("professional_id", "Owner"))
            .with_parameter(ParameterSpec::string("summary", "Title"))
    }

    #[test]
    fn test_lookup_registered_and_unknown() {
        let catalog = ToolCatalog::new()
            .with_tool(event_tool("create_calendar_event"))
            .unwrap()
            .with_tool(event_tool("delete_calendar_event"))
            .unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(
            catalog.lookup("create_calendar_event").unwrap().name,
            "create_calendar_event"
        );
        assert!(catalog.lookup("send_sms").is_none());
        assert!(!catalog.contains("send_sms"));
    }

    #[test]
    fn test_registration_order_is_preserved() {
        let catalog = ToolCatalog::new()
            .with_tool(event_tool("b"))
            .unwrap()
            .with_tool(event_tool("a"))
            .unwrap()
            .with_tool(event_tool("c"))
            .unwrap();

        assert_eq!(catalog.names().collect::<Vec<_>>(), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut catalog = ToolCatalog::new();
        catalog.register(event_tool("list_calendar_events")).unwrap();
        let err = catalog
            .register(event_tool("list_calendar_events"))
            .unwrap_err();
        assert_eq!(
            err,
            CatalogError::DuplicateName("list_calendar_events".to_string())
        );
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_undeclared_required_parameter_rejected() {
        let mut schema = event_tool("broken");
        schema.required.push("event_id".to_string());

        let err = ToolCatalog::new().with_tool(schema).unwrap_err();
        assert!(matches!(err, CatalogError::Schema { ref tool, .. } if tool == "broken"));
        assert!(err.to_string().contains("event_id"));
    }

    #[test]
    fn test_empty_name_and_empty_enum_rejected() {
        assert!(ToolCatalog::new().with_tool(ToolSchema::new("  ", "x")).is_err());

        let schema = ToolSchema::new("t", "x").with_parameter(ParameterSpec::enumeration(
            "status",
            "s",
            Vec::<String>::new(),
        ));
        assert!(ToolCatalog::new().with_tool(schema).is_err());
    }

    #[test]
    fn test_duplicate_parameter_rejected() {
        let schema = ToolSchema::new("t", "x")
            .with_parameter(ParameterSpec::string("a", "first"))
            .with_parameter(ParameterSpec::string("a", "again"));
        assert!(ToolCatalog::new().with_tool(schema).is_err());
    }

    #[test]
    fn test_validate_unknown_tool() {
        let catalog = ToolCatalog::new();
        let invocation = ToolInvocation::new("send_sms", serde_json::Map::new());
        assert_eq!(
            catalog.validate(&invocation),
            Err(ArgumentError::UnknownTool("send_sms".to_string()))
        );
    }
}
