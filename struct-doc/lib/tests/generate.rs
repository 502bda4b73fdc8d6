use std::path::PathBuf;

use regex::Regex;
use serde_json::{Value, json};
use struct_doc_lib::{Generator, OpenapiGenerator, Schema, SourceError, StructDocError};

fn fixture_path(name: &str) -> String {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
        .display()
        .to_string()
}

fn generate(filter: &str, locations: &[&str]) -> Result<Vec<Schema>, StructDocError> {
    OpenapiGenerator::new().document_struct(&Regex::new(filter).unwrap(), locations)
}

fn to_json(schema: &Schema) -> Value {
    serde_json::to_value(schema).unwrap()
}

fn ids(schemas: &[Schema]) -> Vec<&str> {
    schemas.iter().map(Schema::id).collect()
}

#[test]
fn unknown_location_is_a_load_error() {
    let missing = fixture_path("unknown");
    let result = generate("TestStruct1", &[&missing]);

    match result {
        Err(StructDocError::SourceLoad { locations, source }) => {
            assert_eq!(locations, vec![missing]);
            assert!(matches!(source, SourceError::NotFound { .. }));
        }
        other => panic!("expected a load error, got {other:?}"),
    }
}

#[test]
fn private_struct_keeps_only_public_fields() -> Result<(), StructDocError> {
    let models = fixture_path("models");
    let schemas = generate("TestStruct0", &[&models])?;

    assert_eq!(schemas.len(), 1);
    assert_eq!(
        to_json(&schemas[0]),
        json!({
            "id": "TestStruct0",
            "type": "object",
            "title": "Test Struct 0",
            "description": "Test Struct 0 description",
            "properties": {
                "field_b": { "type": "string" },
                "field_c": { "type": "integer" },
                "field_d": { "type": "boolean" }
            }
        })
    );
    Ok(())
}

#[test]
fn field_comments_become_descriptions() -> Result<(), StructDocError> {
    let models = fixture_path("models");
    let schemas = generate("TestStruct1", &[&models])?;

    assert_eq!(ids(&schemas), vec!["TestStruct1"]);
    assert_eq!(
        to_json(&schemas[0])["properties"],
        json!({
            "field_b": { "type": "string", "description": "FieldB comment" },
            "field_c": { "type": "integer", "description": "FieldC comment" },
            "field_d": { "type": "boolean", "description": "FieldD comment" }
        })
    );
    Ok(())
}

#[test]
fn flattened_struct_and_primitive_arrays() -> Result<(), StructDocError> {
    let models = fixture_path("models");
    let schemas = generate("TestStruct2", &[&models])?;

    assert_eq!(ids(&schemas), vec!["TestStruct2"]);
    assert_eq!(
        to_json(&schemas[0])["properties"],
        json!({
            "base_field_b": { "type": "string", "description": "BaseFieldB comment" },
            "base_field_c": { "type": "number", "description": "BaseFieldC comment" },
            "base_field_d": { "type": "boolean", "description": "BaseFieldD comment" },
            "field_b": { "type": "array", "description": "FieldB comment", "items": { "type": "string" } },
            "field_c": { "type": "array", "description": "FieldC comment", "items": { "type": "integer" } },
            "field_d": { "type": "array", "description": "FieldD comment", "items": { "type": "boolean" } }
        })
    );
    Ok(())
}

#[test]
fn every_field_shape() -> Result<(), StructDocError> {
    let models = fixture_path("models");
    let schemas = generate("TestStruct3", &[&models])?;
    let reference = json!({ "$ref": "#/components/schemas/TestUnderlyingStruct" });

    assert_eq!(ids(&schemas), vec!["TestStruct3", "TestUnderlyingStruct"]);

    let schema = to_json(&schemas[0]);
    let props = &schema["properties"];
    assert_eq!(props["base_field_c"], json!({ "type": "number", "description": "BaseFieldC comment" }));
    assert_eq!(
        props["field_a"],
        json!({ "type": "string", "format": "RFC3339", "description": "FieldA comment" })
    );
    assert_eq!(props["field_b"], reference);
    assert_eq!(props["field_c"], reference);
    assert_eq!(
        props["field_d"],
        json!({ "type": "array", "description": "FieldD comment", "items": reference })
    );
    assert_eq!(
        props["field_e"],
        json!({ "type": "array", "description": "FieldE comment", "items": reference })
    );
    assert_eq!(props["field_f"], json!({ "type": "object", "description": "FieldF comment" }));
    assert_eq!(
        props["field_g"],
        json!({ "type": "string", "format": "RFC3339", "description": "FieldG comment" })
    );
    assert_eq!(
        props["field_h"],
        json!({
            "type": "object",
            "description": "FieldH comment",
            "additionalProperties": { "type": "string" }
        })
    );
    assert_eq!(props["field_i"], json!({ "type": "object", "description": "FieldI comment" }));
    assert_eq!(props["field_j"], json!({ "type": "string", "description": "FieldJ comment" }));
    assert_eq!(
        props["field_k"],
        json!({ "type": "object", "description": "FieldK comment", "additionalProperties": reference })
    );

    assert_eq!(
        to_json(&schemas[1]),
        json!({
            "id": "TestUnderlyingStruct",
            "type": "object",
            "title": "Test Underlying Struct",
            "description": "Test Underlying Struct description",
            "properties": {
                "underlying_field_b": { "type": "string", "description": "UnderlyingFieldB comment" },
                "underlying_field_c": { "type": "number", "description": "UnderlyingFieldC comment" },
                "underlying_field_d": { "type": "boolean", "description": "UnderlyingFieldD comment" }
            }
        })
    );
    Ok(())
}

#[test]
fn serde_renames_become_property_names() -> Result<(), StructDocError> {
    let models = fixture_path("models");
    let schemas = generate("TestStruct4", &[&models])?;

    let names: Vec<_> = schemas[0].properties.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["otherFieldA", "otherFieldB", "otherFieldC", "otherFieldD"]);
    Ok(())
}

#[test]
fn method_locals_reach_across_units() -> Result<(), StructDocError> {
    let models = fixture_path("models");
    let other = fixture_path("other");
    let schemas = generate("HttpHandler", &[&models, &other])?;

    assert_eq!(
        ids(&schemas),
        vec![
            "HttpHandler",
            "HttpHandlerResp",
            "TestOtherStruct5",
            "TestOtherUnderlyingStruct",
            "TestStruct4",
        ]
    );

    let resp = to_json(&schemas[1]);
    assert_eq!(resp["title"], json!("MyAsset"));
    assert_eq!(resp["description"], json!("MyAsset description"));
    assert_eq!(
        resp["properties"]["other_structs"],
        json!({ "type": "array", "items": { "$ref": "#/components/schemas/TestOtherStruct5" } })
    );

    let other_struct = to_json(&schemas[2]);
    assert_eq!(
        other_struct["properties"]["base_field_b"],
        json!({ "type": "string", "description": "BaseFieldB comment" })
    );
    assert_eq!(
        other_struct["properties"]["otherFieldB"],
        json!({ "$ref": "#/components/schemas/TestOtherUnderlyingStruct" })
    );
    Ok(())
}

#[test]
fn references_outside_loaded_units_degrade_to_objects() -> Result<(), StructDocError> {
    let models = fixture_path("models");
    let schemas = generate("HttpHandler", &[&models])?;

    assert_eq!(ids(&schemas), vec!["HttpHandler", "HttpHandlerResp", "TestStruct4"]);
    assert_eq!(
        to_json(&schemas[1])["properties"]["other_structs"],
        json!({ "type": "array", "items": { "type": "object" } })
    );
    Ok(())
}

#[test]
fn output_is_sorted_and_unique_for_broad_filters() -> Result<(), StructDocError> {
    let models = fixture_path("models");
    let other = fixture_path("other");
    let schemas = generate(".*", &[&models, &other, &models])?;

    let found = ids(&schemas);
    let mut sorted = found.clone();
    sorted.sort_unstable();
    sorted.dedup();
    assert_eq!(found, sorted);
    assert!(!found.contains(&"MyString"));
    assert!(found.contains(&"TestBaseStruct"));
    Ok(())
}
