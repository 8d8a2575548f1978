#![expect(
    clippy::expect_used,
    clippy::panic,
    reason = "panics and expects are fine for proc macros"
)]

use proc_macro::TokenStream;

mod model;

/// Implements `iot_providers::model::ResourceModel` for a resource model struct.
///
/// The struct carries `#[resource(type_name = "AWS::IoT::...")]`. Fields are
/// annotated with any of `primary_identifier`, `read_only` and `create_only`.
/// Property names follow the serde naming of the struct: a field's
/// `#[serde(rename = "...")]` wins, otherwise the field name in PascalCase.
#[proc_macro_derive(ResourceModel, attributes(resource))]
pub fn resource_model(input: TokenStream) -> TokenStream {
    model::transform(input)
}
