use other::TestOtherStruct5;

use crate::model::TestStruct4;

/// @title HTTP Handler
pub struct HttpHandler;

impl HttpHandler {
    pub fn handle_request(&self) {
        /// @title MyAsset
        /// MyAsset description
        struct HttpHandlerResp {
            #[serde(rename = "structs")]
            pub test_structs: Vec<Box<TestStruct4>>,
            #[serde(rename = "other_structs")]
            pub other_structs: Vec<Box<TestOtherStruct5>>,
        }

        let _ = std::mem::size_of::<HttpHandlerResp>();
    }
}
