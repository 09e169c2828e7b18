//! # publishednodes.json Schema
//!
//! Generates the JSON Schema (draft-07) for OPC Publisher's
//! `publishednodes.json`: an array whose elements each match exactly one of
//! three record shapes, listed newest first.
//!
//! | Shape | Node list | Identifier field |
//! |-------|-----------|------------------|
//! | [`RecordShape::Current`] | `OpcNodes[]` | `Id`, `ExpandedNodeId` |
//! | [`RecordShape::LegacyExpandedNodeId`] | `OpcNodes[]` | `ExpandedNodeId` |
//! | [`RecordShape::LegacyNodeId`] | `NodeId` | `Identifier` |
//!
//! Identifier value validation is off by default. Older configuration files
//! carry identifiers the patterns would reject, and OPC Publisher still
//! loads them.
//!
//! The document is assembled from immutable [`AlternativeSchema`] values.
//! The security requirement policy maps each alternative to a new one, so
//! repeated builds never share schema state.

use opcpub_core::{build_node_id_pattern, NodeIdFormat};
use serde_json::{json, Map, Value};

use crate::security::SecurityRequirementPolicy;

/// `$schema` URI of generated publishednodes schemas.
pub const JSON_SCHEMA_DRAFT_07: &str = "http://json-schema.org/draft-07/schema#";

/// OPC UA server endpoint. Covers the common URI character set only.
pub const ENDPOINT_URL_PATTERN: &str =
    r"opc.tcp://(?:[a-zA-Z]|[0-9]|[$-_@.&+]|[!*\(\),]|(?:%[0-9a-fA-F][0-9a-fA-F]))+";

/// Name of the endpoint security indicator field.
pub const USE_SECURITY: &str = "UseSecurity";

/// Formats accepted by the legacy `Identifier` field.
const IDENTIFIER_FORMATS: [NodeIdFormat; 2] = [NodeIdFormat::NodeId, NodeIdFormat::NamespaceIndex];

/// Caller options for schema generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaOptions {
    /// Emit identifier patterns instead of bare string types.
    pub generate_value_validation: bool,
    /// Formats accepted by the generic `Id` field, in emission order.
    pub formats: Vec<NodeIdFormat>,
    /// With `require_use_security`, pin `UseSecurity` to `true`.
    pub use_security: bool,
    /// Make `UseSecurity` a required field wherever it is declared.
    pub require_use_security: bool,
}

impl Default for SchemaOptions {
    fn default() -> Self {
        Self {
            generate_value_validation: false,
            formats: vec![
                NodeIdFormat::ExpandedNodeId,
                NodeIdFormat::NodeId,
                NodeIdFormat::NamespaceIndex,
            ],
            use_security: false,
            require_use_security: false,
        }
    }
}

/// Historical record shapes accepted in the configuration array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordShape {
    /// Current shape: `OpcNodes` entries keyed by `Id`.
    Current,
    /// Legacy shape: `OpcNodes` entries keyed by `ExpandedNodeId`.
    LegacyExpandedNodeId,
    /// Legacy shape: a single `NodeId` object keyed by `Identifier`.
    LegacyNodeId,
}

impl RecordShape {
    /// Returns all shapes in `oneOf` order, newest first.
    pub fn all_shapes() -> &'static [RecordShape] {
        &[Self::Current, Self::LegacyExpandedNodeId, Self::LegacyNodeId]
    }

    /// Position of this shape in the generated `oneOf` array.
    pub fn one_of_index(&self) -> usize {
        match self {
            Self::Current => 0,
            Self::LegacyExpandedNodeId => 1,
            Self::LegacyNodeId => 2,
        }
    }
}

/// One `oneOf` alternative describing a record shape.
#[derive(Debug, Clone, PartialEq)]
pub struct AlternativeSchema {
    shape: RecordShape,
    comment: Option<&'static str>,
    properties: Map<String, Value>,
    required: Vec<String>,
}

impl AlternativeSchema {
    /// Build the alternative for `shape`. `formats` scopes the generic `Id`
    /// field; the other identifier fields use their fixed format subsets.
    pub fn for_shape(
        shape: RecordShape,
        generate_value_validation: bool,
        formats: &[NodeIdFormat],
    ) -> Self {
        match shape {
            RecordShape::Current => {
                let mut properties = endpoint_properties(json!({ "type": ["integer", "string"] }));
                properties.insert(USE_SECURITY.to_string(), json!({ "type": "boolean" }));
                properties.insert(
                    "OpcNodes".to_string(),
                    json!({
                        "type": "array",
                        "items": {
                            "type": "object",
                            "properties": {
                                "Id": id_schema(generate_value_validation, formats),
                                "ExpandedNodeId": expanded_node_id_schema(generate_value_validation),
                                "DisplayName": { "type": "string" },
                                "DataSetFieldId": { "type": "string" },
                                "OpcSamplingInterval": { "type": "integer" },
                                "OpcPublishingInterval": { "type": "integer" },
                                "HeartbeatInterval": { "type": "integer" },
                                "HeartbeatIntervalTimespan": { "type": "string" },
                                "SkipFirst": { "type": "boolean" }
                            },
                            "required": ["Id"]
                        }
                    }),
                );
                Self {
                    shape,
                    comment: Some(
                        "The following subschema is the most current allowable configuration schema for OPC Publisher",
                    ),
                    properties,
                    required: vec!["EndpointUrl".to_string(), "OpcNodes".to_string()],
                }
            }
            RecordShape::LegacyExpandedNodeId => {
                let mut properties = endpoint_properties(json!({ "type": "string" }));
                properties.insert(USE_SECURITY.to_string(), json!({ "type": "boolean" }));
                properties.insert(
                    "OpcNodes".to_string(),
                    json!({
                        "type": "array",
                        "items": {
                            "type": "object",
                            "properties": {
                                "ExpandedNodeId": expanded_node_id_schema(generate_value_validation),
                                "OpcSamplingInterval": { "type": "integer" },
                                "OpcPublishingInterval": { "type": "integer" }
                            },
                            "required": ["ExpandedNodeId"]
                        }
                    }),
                );
                Self {
                    shape,
                    comment: None,
                    properties,
                    required: vec!["EndpointUrl".to_string(), "OpcNodes".to_string()],
                }
            }
            RecordShape::LegacyNodeId => {
                let mut properties = endpoint_properties(json!({ "type": "string" }));
                properties.insert(
                    "NodeId".to_string(),
                    json!({
                        "type": "object",
                        "properties": {
                            "Identifier": identifier_schema(generate_value_validation),
                            "OpcSamplingInterval": { "type": "integer" },
                            "OpcPublishingInterval": { "type": "integer" }
                        },
                        "required": ["Identifier"]
                    }),
                );
                Self {
                    shape,
                    comment: None,
                    properties,
                    required: vec!["EndpointUrl".to_string(), "NodeId".to_string()],
                }
            }
        }
    }

    /// The record shape this alternative describes.
    pub fn shape(&self) -> RecordShape {
        self.shape
    }

    /// Schema of a declared property.
    pub fn property(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }

    /// Required top-level fields, in order.
    pub fn required(&self) -> &[String] {
        &self.required
    }

    /// True if this alternative declares `field`.
    pub fn declares(&self, field: &str) -> bool {
        self.properties.contains_key(field)
    }

    /// True if `field` is in the required list.
    pub fn requires(&self, field: &str) -> bool {
        self.required.iter().any(|r| r == field)
    }

    /// Returns a copy with `field` appended to the required list. A field
    /// that is already required is not added twice.
    pub fn with_required(mut self, field: &str) -> Self {
        if !self.requires(field) {
            self.required.push(field.to_string());
        }
        self
    }

    /// Returns a copy with the schema of `name` replaced.
    pub fn with_property(mut self, name: &str, schema: Value) -> Self {
        self.properties.insert(name.to_string(), schema);
        self
    }

    /// Render as a JSON Schema object.
    pub fn to_value(&self) -> Value {
        let mut object = Map::new();
        if let Some(comment) = self.comment {
            object.insert("$comment".to_string(), Value::from(comment));
        }
        object.insert("type".to_string(), Value::from("object"));
        object.insert("properties".to_string(), Value::Object(self.properties.clone()));
        object.insert("required".to_string(), json!(self.required));
        Value::Object(object)
    }
}

/// The complete publishednodes schema.
#[derive(Debug, Clone, PartialEq)]
pub struct PublishedNodesSchema {
    alternatives: Vec<AlternativeSchema>,
}

impl PublishedNodesSchema {
    /// Assemble the schema for `options`, applying the security requirement
    /// policy to every alternative.
    pub fn build(options: &SchemaOptions) -> Self {
        let policy =
            SecurityRequirementPolicy::from_options(options.use_security, options.require_use_security);

        let alternatives = RecordShape::all_shapes()
            .iter()
            .map(|shape| {
                AlternativeSchema::for_shape(*shape, options.generate_value_validation, &options.formats)
            })
            .map(|alternative| policy.apply(alternative))
            .collect();

        Self { alternatives }
    }

    /// Alternatives in `oneOf` order.
    pub fn alternatives(&self) -> &[AlternativeSchema] {
        &self.alternatives
    }

    /// The alternative describing `shape`.
    pub fn alternative(&self, shape: RecordShape) -> Option<&AlternativeSchema> {
        self.alternatives.iter().find(|a| a.shape == shape)
    }

    /// Render the full schema document.
    pub fn to_value(&self) -> Value {
        let one_of: Vec<Value> = self.alternatives.iter().map(AlternativeSchema::to_value).collect();
        json!({
            "$schema": JSON_SCHEMA_DRAFT_07,
            "$comment": "The outer most object of the configuration file must be an array, though its contents \
                         may adhere to several differing schema, presented from newest to oldest supported schema.",
            "type": "array",
            "items": {
                "$comment": "Each array element must conform to exactly one of the following subschema.",
                "oneOf": one_of
            }
        })
    }
}

/// Build the publishednodes schema document.
pub fn published_nodes_schema(options: &SchemaOptions) -> Value {
    PublishedNodesSchema::build(options).to_value()
}

/// Fields shared by every record shape. Only the publishing interval type
/// differs between shapes.
fn endpoint_properties(publishing_interval: Value) -> Map<String, Value> {
    let mut properties = Map::new();
    properties.insert("DataSetWriterId".to_string(), json!({ "type": "string" }));
    properties.insert("DataSetWriterGroup".to_string(), json!({ "type": "string" }));
    properties.insert("DataSetPublishingInterval".to_string(), publishing_interval);
    properties.insert("EncryptedAuthPassword".to_string(), json!({ "type": "string" }));
    properties.insert("OpcAuthenticationPassword".to_string(), json!({ "type": "string" }));
    properties.insert(
        "EndpointUrl".to_string(),
        json!({
            "type": "string",
            "format": "uri",
            "$comment": format!(
                "Endpoint urls must adhere to OPC UA server addressing schemes which begin with `opc.tcp` \
                 followed by acceptable URI formatting, e.g. `{ENDPOINT_URL_PATTERN}`"
            ),
            "pattern": ENDPOINT_URL_PATTERN
        }),
    );
    properties
}

fn node_id_field(generate_value_validation: bool, comment: &str, formats: &[NodeIdFormat]) -> Value {
    if generate_value_validation {
        json!({
            "type": "string",
            "$comment": comment,
            "pattern": build_node_id_pattern(formats)
        })
    } else {
        json!({ "type": "string" })
    }
}

fn id_schema(generate_value_validation: bool, formats: &[NodeIdFormat]) -> Value {
    node_id_field(
        generate_value_validation,
        "This subschema supports all allowable formats, e.g. `nsu={url/urn resource path}/;{nodeId type}={nodeId}` \
         or `ns={namespace index based on OPC UA IM};{nodeId type}={nodeId}` or `{nodeId type}={nodeId}`",
        formats,
    )
}

fn expanded_node_id_schema(generate_value_validation: bool) -> Value {
    node_id_field(
        generate_value_validation,
        "This subschema only supports the expanded nodeid format, e.g. `nsu={url/urn resource path}/;{nodeId type}={nodeId}`",
        &[NodeIdFormat::ExpandedNodeId],
    )
}

fn identifier_schema(generate_value_validation: bool) -> Value {
    node_id_field(
        generate_value_validation,
        "This subschema supports the historical `{nodeId type}={nodeId}` and `ns={namespace index};{nodeId type}={nodeId}` formats",
        &IDENTIFIER_FORMATS,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strict(formats: Vec<NodeIdFormat>) -> SchemaOptions {
        SchemaOptions {
            generate_value_validation: true,
            formats,
            ..SchemaOptions::default()
        }
    }

    #[test]
    fn test_root_structure() {
        let schema = published_nodes_schema(&SchemaOptions::default());
        assert_eq!(schema["$schema"], JSON_SCHEMA_DRAFT_07);
        assert_eq!(schema["type"], "array");
        let one_of = schema["items"]["oneOf"].as_array().unwrap();
        assert_eq!(one_of.len(), 3);
        for alternative in one_of {
            assert_eq!(alternative["type"], "object");
            assert!(alternative["required"].is_array());
        }
    }

    #[test]
    fn test_shapes_follow_one_of_order() {
        let schema = PublishedNodesSchema::build(&SchemaOptions::default());
        for (index, alternative) in schema.alternatives().iter().enumerate() {
            assert_eq!(alternative.shape().one_of_index(), index);
        }
    }

    #[test]
    fn test_default_identifier_fields_are_plain_strings() {
        let schema = published_nodes_schema(&SchemaOptions::default());
        let id = schema
            .pointer("/items/oneOf/0/properties/OpcNodes/items/properties/Id")
            .unwrap();
        assert_eq!(*id, json!({ "type": "string" }));
        let identifier = schema
            .pointer("/items/oneOf/2/properties/NodeId/properties/Identifier")
            .unwrap();
        assert_eq!(*identifier, json!({ "type": "string" }));
    }

    #[test]
    fn test_value_validation_scopes_formats_per_field() {
        let schema = published_nodes_schema(&strict(NodeIdFormat::all_formats().to_vec()));

        let id_pattern = schema
            .pointer("/items/oneOf/0/properties/OpcNodes/items/properties/Id/pattern")
            .and_then(Value::as_str)
            .unwrap();
        assert_eq!(id_pattern, build_node_id_pattern(NodeIdFormat::all_formats()));

        for pointer in [
            "/items/oneOf/0/properties/OpcNodes/items/properties/ExpandedNodeId/pattern",
            "/items/oneOf/1/properties/OpcNodes/items/properties/ExpandedNodeId/pattern",
        ] {
            let pattern = schema.pointer(pointer).and_then(Value::as_str).unwrap();
            assert_eq!(pattern, build_node_id_pattern(&[NodeIdFormat::ExpandedNodeId]));
        }

        let identifier_pattern = schema
            .pointer("/items/oneOf/2/properties/NodeId/properties/Identifier/pattern")
            .and_then(Value::as_str)
            .unwrap();
        assert_eq!(identifier_pattern, build_node_id_pattern(&IDENTIFIER_FORMATS));
        assert!(!identifier_pattern.contains("nsu="));
    }

    #[test]
    fn test_id_pattern_uses_caller_formats_only() {
        let schema = published_nodes_schema(&strict(vec![NodeIdFormat::NamespaceIndex]));
        let id_pattern = schema
            .pointer("/items/oneOf/0/properties/OpcNodes/items/properties/Id/pattern")
            .and_then(Value::as_str)
            .unwrap();
        assert!(id_pattern.starts_with("(^ns="));
        assert!(!id_pattern.contains("nsu="));
    }

    #[test]
    fn test_required_fields_per_shape() {
        let schema = PublishedNodesSchema::build(&SchemaOptions::default());
        let required = |shape| schema.alternative(shape).unwrap().required().to_vec();
        assert_eq!(required(RecordShape::Current), vec!["EndpointUrl", "OpcNodes"]);
        assert_eq!(required(RecordShape::LegacyExpandedNodeId), vec!["EndpointUrl", "OpcNodes"]);
        assert_eq!(required(RecordShape::LegacyNodeId), vec!["EndpointUrl", "NodeId"]);
    }

    #[test]
    fn test_publishing_interval_type_differs_by_shape() {
        let schema = published_nodes_schema(&SchemaOptions::default());
        assert_eq!(
            schema["items"]["oneOf"][0]["properties"]["DataSetPublishingInterval"]["type"],
            json!(["integer", "string"])
        );
        assert_eq!(
            schema["items"]["oneOf"][1]["properties"]["DataSetPublishingInterval"]["type"],
            "string"
        );
    }

    #[test]
    fn test_only_legacy_node_id_lacks_use_security() {
        let schema = PublishedNodesSchema::build(&SchemaOptions::default());
        for alternative in schema.alternatives() {
            let expected = alternative.shape() != RecordShape::LegacyNodeId;
            assert_eq!(alternative.declares(USE_SECURITY), expected);
        }
    }

    #[test]
    fn test_endpoint_url_constraints() {
        let schema = published_nodes_schema(&SchemaOptions::default());
        for index in 0..3 {
            let endpoint = &schema["items"]["oneOf"][index]["properties"]["EndpointUrl"];
            assert_eq!(endpoint["format"], "uri");
            assert_eq!(endpoint["pattern"], ENDPOINT_URL_PATTERN);
        }
    }

    #[test]
    fn test_build_is_deterministic() {
        let options = SchemaOptions {
            generate_value_validation: true,
            use_security: true,
            require_use_security: true,
            ..SchemaOptions::default()
        };
        assert_eq!(published_nodes_schema(&options), published_nodes_schema(&options));
    }

    #[test]
    fn test_with_required_is_idempotent() {
        let alternative = AlternativeSchema::for_shape(RecordShape::Current, false, &[])
            .with_required("OpcNodes")
            .with_required(USE_SECURITY)
            .with_required(USE_SECURITY);
        assert_eq!(alternative.required(), ["EndpointUrl", "OpcNodes", USE_SECURITY]);
    }
}
