use std::sync::Arc;

use rmcp::handler::server::ServerHandler;
use rmcp::model::{
    CallToolRequestParams, CallToolResult, Content, Implementation, ListToolsResult,
    PaginatedRequestParams, ServerCapabilities, ServerInfo, Tool, ToolsCapability,
};
use rmcp::service::RequestContext;
use rmcp::{ErrorData as McpError, RoleServer};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::structure::{analyze_project_with, AnalyzeOptions};

const ANALYZE_PROJECT_TOOL: &str = "analyze_project";

/// Stateless: every call builds its own analysis.
#[derive(Clone, Default)]
pub struct McpServer;

impl McpServer {
    pub fn new() -> Self {
        Self
    }

    async fn analyze_project_impl(&self, params: AnalyzeProjectParams) -> Result<CallToolResult, McpError> {
        let project_path = match params.project_path {
            Some(path) if !path.trim().is_empty() => path,
            _ => return Err(McpError::invalid_params("No projectPath provided", None)),
        };

        let mut options = AnalyzeOptions::new().with_sort_children(params.sort.unwrap_or(false));
        if let Some(depth) = params.max_depth {
            options = options.with_max_depth(depth);
        }

        let structure = tokio::task::spawn_blocking(move || analyze_project_with(&project_path, &options))
            .await
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;

        let Some(structure) = structure else {
            return Ok(CallToolResult::error(vec![Content::text("Failed to analyze project")]));
        };
        Ok(structure_result(structure.to_json_pretty()))
    }
}

fn structure_result(json: serde_json::Result<String>) -> CallToolResult {
    match json {
        Ok(json) => CallToolResult::success(vec![Content::text(json)]),
        Err(e) => {
            tracing::error!("Failed to serialize project structure: {}", e);
            CallToolResult::error(vec![Content::text(format!(
                "Failed to serialize project structure: {}",
                e
            ))])
        }
    }
}

fn schema_for<T: JsonSchema>() -> Arc<serde_json::Map<String, serde_json::Value>> {
    let schema = schemars::schema_for!(T);
    match serde_json::to_value(&schema) {
        Ok(serde_json::Value::Object(map)) => Arc::new(map),
        _ => Arc::new(serde_json::Map::new()),
    }
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeProjectParams {
    /// Path of the project root to analyze
    #[serde(default)]
    pub project_path: Option<String>,
    /// Sort children by name at every level
    #[serde(default)]
    pub sort: Option<bool>,
    /// Fail instead of descending deeper than this many directories
    #[serde(default)]
    pub max_depth: Option<usize>,
}

impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: Some(false),
                }),
                ..Default::default()
            },
            server_info: Implementation {
                name: "project-structure".to_string(),
                title: Some("Project Structure".to_string()),
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Analyzes a TypeScript/JavaScript project directory and returns its \
                 directory/file tree with ids, timestamps and detected languages."
                    .to_string(),
            ),
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        let tools = vec![Tool {
            name: ANALYZE_PROJECT_TOOL.into(),
            title: Some("Analyze Project".to_string()),
            description: Some("Return the project structure for a directory".into()),
            input_schema: schema_for::<AnalyzeProjectParams>(),
            output_schema: None,
            annotations: None,
            icons: None,
            meta: None,
        }];

        Ok(ListToolsResult {
            next_cursor: None,
            tools,
            meta: None,
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        match request.name.as_ref() {
            ANALYZE_PROJECT_TOOL => {
                let params: AnalyzeProjectParams = serde_json::from_value(
                    serde_json::Value::Object(request.arguments.unwrap_or_default()),
                )
                .map_err(|e| McpError::invalid_params(e.to_string(), None))?;

                self.analyze_project_impl(params).await
            }
            _ => Err(McpError::invalid_params(
                format!("Unknown tool: {}", request.name),
                None,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_use_camel_case() {
        let params: AnalyzeProjectParams =
            serde_json::from_value(serde_json::json!({ "projectPath": "/tmp/x", "maxDepth": 3 }))
                .unwrap();
        assert_eq!(params.project_path.as_deref(), Some("/tmp/x"));
        assert_eq!(params.max_depth, Some(3));
        assert!(params.sort.is_none());
    }

    #[test]
    fn test_params_schema_names_project_path() {
        let schema = schema_for::<AnalyzeProjectParams>();
        let properties = schema.get("properties").and_then(|p| p.as_object()).unwrap();
        assert!(properties.contains_key("projectPath"));
        assert!(properties.contains_key("maxDepth"));
    }

    #[test]
    fn test_serialization_failure_is_tool_error() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let result = structure_result(Err(err));
        assert_eq!(result.is_error, Some(true));
        assert_eq!(result.content.len(), 1);

        let ok = structure_result(Ok("{}".to_string()));
        assert_ne!(ok.is_error, Some(true));
    }

    #[tokio::test]
    async fn test_missing_project_path_is_invalid_params() {
        let server = McpServer::new();
        let params = AnalyzeProjectParams {
            project_path: Some("  ".to_string()),
            sort: None,
            max_depth: None,
        };
        assert!(server.analyze_project_impl(params).await.is_err());
    }

    #[tokio::test]
    async fn test_failed_analysis_is_tool_error() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let server = McpServer::new();
        let params = AnalyzeProjectParams {
            project_path: Some(temp_dir.path().join("missing").to_string_lossy().into_owned()),
            sort: None,
            max_depth: None,
        };

        let result = server.analyze_project_impl(params).await.unwrap();
        assert_eq!(result.is_error, Some(true));
    }

    #[tokio::test]
    async fn test_successful_analysis_returns_json() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("index.ts"), "export {};").unwrap();
        let server = McpServer::new();
        let params = AnalyzeProjectParams {
            project_path: Some(temp_dir.path().to_string_lossy().into_owned()),
            sort: Some(true),
            max_depth: None,
        };

        let result = server.analyze_project_impl(params).await.unwrap();
        assert_ne!(result.is_error, Some(true));
        assert_eq!(result.content.len(), 1);
    }
}
