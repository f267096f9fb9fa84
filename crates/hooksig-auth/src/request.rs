//! Framework-neutral view of an inbound webhook request.
//!
//! The verifier only needs two things from a request: the value of the
//! signature header and the raw body. [`ConnectLikeRequest`] exposes both as
//! tagged unions so the verifier can match on shape instead of probing types at
//! runtime. It is implemented for [`http::Request<B>`] for every body type that
//! implements [`AsRequestBody`].

use bytes::Bytes;

/// Name of the header carrying the webhook signature (lowercase).
pub const SIGNATURE_HEADER_NAME: &str = "sanity-webhook-signature";

/// The value(s) a request carries for a given header name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderField<'a> {
    /// The header is absent.
    Missing,
    /// Exactly one textual value.
    Single(&'a str),
    /// The header occurs more than once. Holds the values that are valid text.
    Multiple(Vec<&'a str>),
    /// Exactly one value, but it is not valid visible-ASCII text.
    NotText,
}

/// The shape of a request body as seen by the verifier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RequestBody<'a> {
    /// Raw text, exactly as received.
    Text(&'a str),
    /// Raw bytes, exactly as received.
    Bytes(&'a [u8]),
    /// A body that has already been parsed into a structured value.
    Parsed(&'a serde_json::Value),
}

/// Describes the shape of a request body type.
pub trait AsRequestBody {
    /// The body as a [`RequestBody`], or `None` if there is no body.
    fn as_request_body(&self) -> Option<RequestBody<'_>>;
}

impl AsRequestBody for () {
    fn as_request_body(&self) -> Option<RequestBody<'_>> {
        None
    }
}

impl AsRequestBody for Bytes {
    fn as_request_body(&self) -> Option<RequestBody<'_>> {
        Some(RequestBody::Bytes(self))
    }
}

impl AsRequestBody for Vec<u8> {
    fn as_request_body(&self) -> Option<RequestBody<'_>> {
        Some(RequestBody::Bytes(self))
    }
}

impl AsRequestBody for String {
    fn as_request_body(&self) -> Option<RequestBody<'_>> {
        Some(RequestBody::Text(self))
    }
}

impl AsRequestBody for &str {
    fn as_request_body(&self) -> Option<RequestBody<'_>> {
        Some(RequestBody::Text(self))
    }
}

impl AsRequestBody for serde_json::Value {
    fn as_request_body(&self) -> Option<RequestBody<'_>> {
        Some(RequestBody::Parsed(self))
    }
}

impl<T: AsRequestBody> AsRequestBody for Option<T> {
    fn as_request_body(&self) -> Option<RequestBody<'_>> {
        self.as_ref().and_then(AsRequestBody::as_request_body)
    }
}

/// A Connect/Express-like request: headers plus a body of unknown shape.
pub trait ConnectLikeRequest {
    /// Look up a header by its lowercase name.
    fn header_field(&self, name: &str) -> HeaderField<'_>;

    /// The request body, or `None` if the request carries none.
    fn raw_body(&self) -> Option<RequestBody<'_>>;
}

impl<B: AsRequestBody> ConnectLikeRequest for http::Request<B> {
    fn header_field(&self, name: &str) -> HeaderField<'_> {
        let mut values = self.headers().get_all(name).iter().peekable();
        let Some(first) = values.next() else {
            return HeaderField::Missing;
        };
        if values.peek().is_none() {
            return first
                .to_str()
                .map_or(HeaderField::NotText, HeaderField::Single);
        }
        HeaderField::Multiple(
            std::iter::once(first)
                .chain(values)
                .filter_map(|v| v.to_str().ok())
                .collect(),
        )
    }

    fn raw_body(&self) -> Option<RequestBody<'_>> {
        self.body().as_request_body()
    }
}
