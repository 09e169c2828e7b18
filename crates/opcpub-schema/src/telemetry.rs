//! # Telemetry Configuration Schema
//!
//! JSON Schema (draft-04) for OPC Publisher's telemetry configuration file,
//! which selects the message fields published for every monitored item.
//! `Defaults` applies to all endpoints; each `EndpointSpecific` entry
//! overrides the publish switches for the endpoint named by
//! `ForEndpointUrl`.

use serde_json::{json, Value};

/// `$schema` URI of the generated telemetry schema.
pub const JSON_SCHEMA_DRAFT_04: &str = "http://json-schema.org/draft-04/schema#";

/// `{ Publish, Name }` pair used by the defaults section.
fn publish_with_name() -> Value {
    json!({
        "type": "object",
        "properties": {
            "Publish": { "type": "boolean" },
            "Name": { "type": "string" }
        },
        "required": ["Publish", "Name"]
    })
}

/// `{ Publish }` switch used by endpoint overrides.
fn publish_only() -> Value {
    json!({
        "type": "object",
        "properties": {
            "Publish": { "type": "boolean" }
        },
        "required": ["Publish"]
    })
}

fn defaults_section() -> Value {
    json!({
        "type": "object",
        "properties": {
            "EndpointUrl": {
                "type": "object",
                "properties": {
                    "Publish": { "type": "boolean" },
                    "Pattern": { "type": "string" },
                    "Name": { "type": "string" }
                },
                "required": ["Publish", "Pattern", "Name"]
            },
            "NodeId": publish_with_name(),
            "MonitoredItem": {
                "type": "object",
                "properties": {
                    "Flat": { "type": "boolean" },
                    "ApplicationUri": publish_with_name(),
                    "DisplayName": publish_with_name()
                },
                "required": ["Flat", "ApplicationUri", "DisplayName"]
            },
            "Value": {
                "type": "object",
                "properties": {
                    "Flat": { "type": "boolean" },
                    "Value": publish_with_name(),
                    "SourceTimestamp": publish_with_name(),
                    "StatusCode": publish_with_name(),
                    "Status": publish_with_name()
                },
                "required": ["Flat", "Value", "SourceTimestamp", "StatusCode", "Status"]
            }
        },
        "required": ["EndpointUrl", "NodeId", "MonitoredItem", "Value"]
    })
}

fn endpoint_override() -> Value {
    json!({
        "type": "object",
        "properties": {
            "ForEndpointUrl": { "type": "string" },
            "EndpointUrl": {
                "type": "object",
                "properties": {
                    "Publish": { "type": "boolean" },
                    "Pattern": { "type": "string" }
                },
                "required": ["Publish", "Pattern"]
            },
            "NodeId": publish_only(),
            "MonitoredItem": {
                "type": "object",
                "properties": {
                    "ApplicationUri": publish_only(),
                    "DisplayName": publish_only()
                },
                "required": ["ApplicationUri", "DisplayName"]
            },
            "Value": {
                "type": "object",
                "properties": {
                    "Value": publish_only(),
                    "SourceTimestamp": publish_only(),
                    "StatusCode": publish_only(),
                    "Status": publish_only()
                },
                "required": ["Value", "SourceTimestamp", "StatusCode", "Status"]
            }
        },
        "required": ["ForEndpointUrl", "EndpointUrl", "NodeId", "MonitoredItem", "Value"]
    })
}

/// Build the telemetry configuration schema document.
pub fn telemetry_configuration_schema() -> Value {
    json!({
        "$schema": JSON_SCHEMA_DRAFT_04,
        "type": "object",
        "properties": {
            "Defaults": defaults_section(),
            "EndpointSpecific": {
                "type": "array",
                "items": [endpoint_override()]
            }
        },
        "required": ["Defaults", "EndpointSpecific"]
    })
}
