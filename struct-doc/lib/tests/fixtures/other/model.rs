/// @title Test Other Base Struct
/// Test Other Base Struct description
pub struct TestOtherBaseStruct {
    /// base_field_a comment
    base_field_a: String,
    /// BaseFieldB comment
    pub base_field_b: String,
    /// BaseFieldC comment
    pub base_field_c: f64,
    /// BaseFieldD comment
    pub base_field_d: bool,
}

/// @title Test OtherUnderlying Struct
/// Test OtherUnderlying description
pub struct TestOtherUnderlyingStruct {
    /// underlying_field_a comment
    underlying_field_a: String,
    /// UnderlyingFieldB comment
    pub underlying_field_b: String,
    /// UnderlyingFieldC comment
    pub underlying_field_c: f32,
    /// UnderlyingFieldD comment
    pub underlying_field_d: bool,
}

/// @title Test Other Struct 5
/// Test Other Struct 5 description
pub struct TestOtherStruct5 {
    #[serde(flatten)]
    pub base: TestOtherBaseStruct,
    /// FieldA comment
    #[serde(rename = "otherFieldA")]
    pub field_a: Vec<String>,
    /// FieldB comment
    #[serde(rename = "otherFieldB")]
    pub field_b: TestOtherUnderlyingStruct,
    /// FieldC comment
    #[serde(rename = "otherFieldC")]
    pub field_c: Vec<i32>,
    /// FieldD comment
    #[serde(rename = "otherFieldD")]
    pub field_d: Vec<bool>,
}
