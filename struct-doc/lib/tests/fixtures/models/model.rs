use std::collections::HashMap;
use std::sync::mpsc::Receiver;

use chrono::{DateTime, Utc};

pub trait TestBaseInterface {}

/// @title Test Base Struct
/// Test Base description
pub struct TestBaseStruct {
    /// base_field_a comment
    base_field_a: String,
    /// BaseFieldB comment
    pub base_field_b: String,
    /// BaseFieldC comment
    pub base_field_c: f64,
    /// BaseFieldD comment
    pub base_field_d: bool,
}

/// @title Test Underlying Struct
/// Test Underlying Struct description
pub struct TestUnderlyingStruct {
    /// underlying_field_a comment
    underlying_field_a: String,
    /// UnderlyingFieldB comment
    pub underlying_field_b: String,
    /// UnderlyingFieldC comment
    pub underlying_field_c: f32,
    /// UnderlyingFieldD comment
    pub underlying_field_d: bool,
}

/// @title Test Struct 0
/// Test Struct 0 description
struct TestStruct0 {
    field_a: String,
    pub field_b: String,
    pub field_c: i32,
    pub field_d: bool,
}

/// @title Test Struct 1
/// Test Struct 1 description
pub struct TestStruct1 {
    /// field_a comment
    field_a: String,
    /// FieldB comment
    pub field_b: String,
    /// FieldC comment
    pub field_c: i64,
    /// FieldD comment
    pub field_d: bool,
}

/// @title Test Struct 2
/// Test Struct 2 description
pub struct TestStruct2 {
    /// TestBaseStruct comment
    #[serde(flatten)]
    pub base: TestBaseStruct,
    /// field_a comment
    field_a: Vec<String>,
    /// FieldB comment
    pub field_b: Vec<String>,
    /// FieldC comment
    pub field_c: Vec<u32>,
    /// FieldD comment
    pub field_d: Vec<bool>,
}

/// MyString description
pub struct MyString(String);

/// @title Test Struct 3
/// Test Struct 3 description
pub struct TestStruct3 {
    /// TestBaseStruct comment
    #[serde(flatten)]
    pub base: TestBaseStruct,
    /// FieldA comment
    pub field_a: DateTime<Utc>,
    /// FieldB comment
    pub field_b: TestUnderlyingStruct,
    /// FieldC comment
    pub field_c: Box<TestUnderlyingStruct>,
    /// FieldD comment
    pub field_d: Vec<TestUnderlyingStruct>,
    /// FieldE comment
    pub field_e: Vec<Box<TestUnderlyingStruct>>,
    /// FieldF comment
    pub field_f: Box<dyn TestBaseInterface>,
    /// FieldG comment
    pub field_g: Option<DateTime<Utc>>,
    /// FieldH comment
    pub field_h: HashMap<String, String>,
    /// FieldI comment
    pub field_i: Receiver<bool>,
    /// FieldJ comment
    pub field_j: MyString,
    /// FieldK comment
    pub field_k: HashMap<String, Box<TestUnderlyingStruct>>,
}

/// @title Test Struct 4
/// Test Struct 4 description
pub struct TestStruct4 {
    /// FieldA comment
    #[serde(rename = "otherFieldA")]
    pub field_a: Vec<String>,
    /// FieldB comment
    #[serde(rename = "otherFieldB")]
    pub field_b: Vec<String>,
    /// FieldC comment
    #[serde(rename = "otherFieldC")]
    pub field_c: Vec<i32>,
    /// FieldD comment
    #[serde(rename = "otherFieldD")]
    pub field_d: Vec<bool>,
}
