pub mod connection;
pub mod endpoints;

pub use connection::ApiConnectionError;
pub use endpoints::{
    ChatCompletionRequest, ChatCompletionResponse, ChatMessage, JsonSchema, JsonSchemaDefinition,
    Provider, ResponseFormat,
};
