// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! API documentation: an OpenAPI 3 document built from the `schemas` types
//! plus Swagger UI and ReDoc pages that render it.

use axum::response::Html;
use schemars::gen::SchemaSettings;
use schemars::JsonSchema;
use serde_json::{json, Map, Value};

use super::schemas::{
    EchoResponse, ErrorResponse, GenerateCourseRequest, GenerateCourseResponse,
    GenerateLessonRequest, GenerateLessonResponse, HealthResponse,
};

pub const OPENAPI_PATH: &str = "/openapi.json";

const SWAGGER_UI: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <title>EdHub Course Generator API</title>
  <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css" />
</head>
<body>
  <div id="swagger-ui"></div>
  <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
  <script>
    window.onload = () => {
      window.ui = SwaggerUIBundle({ url: "/openapi.json", dom_id: "#swagger-ui" });
    };
  </script>
</body>
</html>
"##;

const REDOC: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <title>EdHub Course Generator API - ReDoc</title>
</head>
<body>
  <redoc spec-url="/openapi.json"></redoc>
  <script src="https://cdn.redoc.ly/redoc/latest/bundles/redoc.standalone.js"></script>
</body>
</html>
"#;

fn reference<T: JsonSchema>() -> Value {
    json!({ "$ref": format!("#/components/schemas/{}", T::schema_name()) })
}

fn json_content(schema: Value) -> Value {
    json!({ "application/json": { "schema": schema } })
}

fn error_response(description: &str) -> Value {
    json!({ "description": description, "content": json_content(reference::<ErrorResponse>()) })
}

/// Build the OpenAPI document for the service
pub fn openapi_document(title: &str, version: &str) -> Value {
    let mut generator = SchemaSettings::openapi3().into_generator();
    generator.subschema_for::<HealthResponse>();
    generator.subschema_for::<EchoResponse>();
    generator.subschema_for::<ErrorResponse>();
    generator.subschema_for::<GenerateCourseRequest>();
    generator.subschema_for::<GenerateCourseResponse>();
    generator.subschema_for::<GenerateLessonRequest>();
    generator.subschema_for::<GenerateLessonResponse>();
    let schemas: Map<String, Value> = generator
        .take_definitions()
        .into_iter()
        .map(|(name, schema)| (name, serde_json::to_value(schema).unwrap_or(Value::Null)))
        .collect();

    json!({
        "openapi": "3.0.3",
        "info": { "title": title, "version": version },
        "paths": {
            "/health": {
                "get": {
                    "summary": "Health check",
                    "responses": {
                        "200": { "description": "Service is up", "content": json_content(reference::<HealthResponse>()) }
                    }
                }
            },
            "/ai/echo": {
                "get": {
                    "summary": "Echo text through the workflow graph",
                    "parameters": [{
                        "name": "text",
                        "in": "query",
                        "required": true,
                        "schema": { "type": "string" }
                    }],
                    "responses": {
                        "200": { "description": "The input, unchanged", "content": json_content(reference::<EchoResponse>()) },
                        "400": error_response("Missing or malformed query")
                    }
                }
            },
            "/api/courses/generate": {
                "post": {
                    "summary": "Generate a multi-module course for a topic",
                    "requestBody": { "required": true, "content": json_content(reference::<GenerateCourseRequest>()) },
                    "responses": {
                        "200": { "description": "Generation outcome", "content": json_content(reference::<GenerateCourseResponse>()) },
                        "422": error_response("Malformed request body")
                    }
                }
            },
            "/lessons/generate": {
                "post": {
                    "summary": "Generate a single lesson",
                    "requestBody": { "required": true, "content": json_content(reference::<GenerateLessonRequest>()) },
                    "responses": {
                        "200": { "description": "The generated lesson", "content": json_content(reference::<GenerateLessonResponse>()) },
                        "422": error_response("Invalid topic or malformed request body"),
                        "500": error_response("Lesson generation failed")
                    }
                }
            }
        },
        "components": { "schemas": schemas }
    })
}

pub async fn swagger_ui() -> Html<&'static str> {
    Html(SWAGGER_UI)
}

pub async fn redoc() -> Html<&'static str> {
    Html(REDOC)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_references_resolve() {
        let doc = openapi_document("EdHub", "0.1.0");
        let schemas = doc["components"]["schemas"].as_object().unwrap();
        for name in [
            "HealthResponse",
            "EchoResponse",
            "ErrorResponse",
            "GenerateCourseRequest",
            "GenerateCourseResponse",
            "GenerateLessonRequest",
            "GenerateLessonResponse",
            "CourseSchema",
            "DifficultyLevel",
        ] {
            assert!(schemas.contains_key(name), "missing schema {}", name);
        }
        assert!(doc["paths"]["/ai/echo"]["get"].is_object());
    }

    #[test]
    fn test_pages_load_the_served_document() {
        assert!(SWAGGER_UI.contains(&format!("url: \"{}\"", OPENAPI_PATH)));
        assert!(SWAGGER_UI.contains("dom_id: \"#swagger-ui\""));
        assert!(REDOC.contains(&format!("spec-url=\"{}\"", OPENAPI_PATH)));
    }
}
