//! Default request payloads.

use courier_application::ports::RequestDataFactory;
use courier_domain::{KeyValue, RequestData, RequestType};

/// Header rows every new request starts with.
pub const DEFAULT_HEADERS: [(&str, &str); 2] = [("Accept", "*/*"), ("User-Agent", "Courier/1.0")];

/// Builds the payload of a freshly created request: one blank parameter
/// row, the default headers, no auth and no body.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultRequestDataFactory;

impl DefaultRequestDataFactory {
    /// Creates a new `DefaultRequestDataFactory`.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl RequestDataFactory for DefaultRequestDataFactory {
    fn build(&self, method: &str, url: &str, request_type: RequestType) -> RequestData {
        let mut data = DEFAULT_HEADERS
            .iter()
            .fold(RequestData::new(method, url), |data, (key, value)| {
                data.with_header(*key, *value)
            })
            .with_request_type(request_type);
        data.params.push(KeyValue::empty());
        data.body_form_data.push(KeyValue::empty());
        data.body_url_encoded.push(KeyValue::empty());
        data
    }
}
