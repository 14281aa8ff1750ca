//! Request payload factory port.

use courier_domain::{RequestData, RequestType};

/// Builds fresh request payloads for newly created request nodes.
///
/// Supplied by the request composer, which owns the payload defaults
/// (headers, auth, body, settings).
pub trait RequestDataFactory {
    /// Builds a payload for the given method, URL and protocol.
    fn build(&self, method: &str, url: &str, request_type: RequestType) -> RequestData;
}

impl<F> RequestDataFactory for F
where
    F: Fn(&str, &str, RequestType) -> RequestData,
{
    fn build(&self, method: &str, url: &str, request_type: RequestType) -> RequestData {
        self(method, url, request_type)
    }
}
