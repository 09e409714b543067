use serde_json::{Map, Value};
use tracing::debug;

use super::{Payload, PayloadError, ResponseFactory};

pub const DEFAULT_VIEW_DATA_KEY: &str = "payload";

/// Turns payloads into responses through an injected [`ResponseFactory`].
#[derive(Debug, Clone)]
pub struct PayloadResponder<F> {
    factory: F,
}

impl<F> PayloadResponder<F>
where
    F: ResponseFactory,
    F::Error: From<PayloadError>,
{
    pub fn new(factory: F) -> Self {
        Self { factory }
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }

    pub fn json_response(&self, payload: &Payload) -> Result<F::Response, F::Error> {
        let status = payload.status()?;
        debug!(status, "building json response from payload");

        self.factory.json(payload.for_response(), status)
    }

    pub fn view_response(&self, view: &str, payload: &Payload) -> Result<F::Response, F::Error> {
        self.view_response_with_key(view, payload, DEFAULT_VIEW_DATA_KEY)
    }

    /// Renders `view` with the raw payload output under `key`.
    pub fn view_response_with_key(
        &self,
        view: &str,
        payload: &Payload,
        key: &str,
    ) -> Result<F::Response, F::Error> {
        let status = payload.status()?;
        debug!(status, view, key, "rendering view from payload");

        let mut data = Map::new();
        data.insert(
            key.to_string(),
            payload.output().cloned().unwrap_or(Value::Null),
        );

        self.factory.view(view, data, status)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use serde_json::{Map, Value, json};

    use super::PayloadResponder;
    use crate::domain::{Payload, PayloadError, ResponseFactory, status};

    #[derive(Debug, PartialEq)]
    enum Recorded {
        Json {
            body: Value,
            status: u16,
        },
        View {
            view: String,
            data: Map<String, Value>,
            status: u16,
        },
    }

    #[derive(Debug)]
    enum FakeError {
        Payload(PayloadError),
        Rejected,
    }

    impl From<PayloadError> for FakeError {
        fn from(err: PayloadError) -> Self {
            Self::Payload(err)
        }
    }

    #[derive(Default)]
    struct RecordingFactory {
        calls: RefCell<Vec<Recorded>>,
        reject: bool,
    }

    impl ResponseFactory for RecordingFactory {
        type Response = usize;
        type Error = FakeError;

        fn json(&self, body: Value, status: u16) -> Result<usize, FakeError> {
            if self.reject {
                return Err(FakeError::Rejected);
            }
            let mut calls = self.calls.borrow_mut();
            calls.push(Recorded::Json { body, status });
            Ok(calls.len())
        }

        fn view(
            &self,
            view: &str,
            data: Map<String, Value>,
            status: u16,
        ) -> Result<usize, FakeError> {
            if self.reject {
                return Err(FakeError::Rejected);
            }
            let mut calls = self.calls.borrow_mut();
            calls.push(Recorded::View {
                view: view.to_string(),
                data,
                status,
            });
            Ok(calls.len())
        }
    }

    fn created_user() -> Payload {
        let mut payload = Payload::new();
        payload
            .set_status(status::CREATED)
            .set_output(json!({ "id": 7 }), Some("user"))
            .set_messages(["user created"]);
        payload
    }

    #[test]
    fn json_response_forwards_serialized_form_and_status() {
        let responder = PayloadResponder::new(RecordingFactory::default());

        responder
            .json_response(&created_user())
            .expect("json response builds");

        assert_eq!(
            responder.factory().calls.borrow().as_slice(),
            &[Recorded::Json {
                body: json!({ "user": { "id": 7 }, "messages": ["user created"] }),
                status: 201,
            }]
        );
    }

    #[test]
    fn view_response_passes_raw_output_under_default_key() {
        let responder = PayloadResponder::new(RecordingFactory::default());

        responder
            .view_response("users.show", &created_user())
            .expect("view response builds");

        let mut data = Map::new();
        data.insert("payload".to_string(), json!({ "id": 7 }));
        assert_eq!(
            responder.factory().calls.borrow().as_slice(),
            &[Recorded::View {
                view: "users.show".to_string(),
                data,
                status: 201,
            }]
        );
    }

    #[test]
    fn view_response_with_custom_key_and_unset_output() {
        let responder = PayloadResponder::new(RecordingFactory::default());
        let mut payload = Payload::new();
        payload.set_status(status::NO_CONTENT);

        responder
            .view_response_with_key("empty", &payload, "user")
            .expect("view response builds");

        let calls = responder.factory().calls.borrow();
        let Recorded::View { data, status, .. } = &calls[0] else {
            panic!("expected a view call, got {:?}", calls[0]);
        };
        assert_eq!(data.get("user"), Some(&Value::Null));
        assert_eq!(*status, 204);
    }

    #[test]
    fn missing_status_fails_before_reaching_factory() {
        let responder = PayloadResponder::new(RecordingFactory::default());
        let mut payload = Payload::new();
        payload.set_output(json!({ "id": 7 }), None);

        let err = responder
            .json_response(&payload)
            .expect_err("status is required");

        assert!(matches!(err, FakeError::Payload(PayloadError::StatusNotSet)));
        assert!(responder.factory().calls.borrow().is_empty());
    }

    #[test]
    fn factory_errors_are_returned_untouched() {
        let responder = PayloadResponder::new(RecordingFactory {
            reject: true,
            ..RecordingFactory::default()
        });

        let err = responder
            .view_response("users.show", &created_user())
            .expect_err("factory rejects");

        assert!(matches!(err, FakeError::Rejected));
    }
}
