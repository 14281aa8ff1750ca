//! Request payload types carried by request nodes.
//!
//! The tree engine copies these values around but only ever reads the
//! method and URL (for filtering and row badges).

mod data;
mod key_value;
mod kind;

pub use data::{
    ApiKeyAuth, ApiKeyLocation, AuthData, AuthType, BasicAuth, BearerAuth, BodyType, HttpVersion,
    RawType, RequestData, RequestSettings,
};
pub use key_value::KeyValue;
pub use kind::RequestType;
