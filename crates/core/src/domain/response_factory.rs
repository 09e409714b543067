use serde_json::{Map, Value};

/// Builds framework responses on behalf of [`PayloadResponder`](super::PayloadResponder).
///
/// Implementations own every transport detail; the responder only supplies
/// the serialized body, the view data and the status.
pub trait ResponseFactory {
    type Response;
    type Error;

    fn json(&self, body: Value, status: u16) -> Result<Self::Response, Self::Error>;

    fn view(
        &self,
        view: &str,
        data: Map<String, Value>,
        status: u16,
    ) -> Result<Self::Response, Self::Error>;
}
