use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use super::PayloadError;

const DEFAULT_OUTPUT_WRAPPER: &str = "data";
const MESSAGES_WRAPPER: &str = "messages";

/// Status, output and messages returned from application logic to the
/// response layer.
///
/// Mutators return `&mut Self` so calls can be chained on one instance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Payload {
    status: Option<u16>,
    output: Option<Value>,
    messages: Map<String, Value>,
    output_wrapper: Option<String>,
}

impl Payload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_status(&mut self, status: u16) -> &mut Self {
        self.status = Some(status);
        self
    }

    pub fn status(&self) -> Result<u16, PayloadError> {
        self.status.ok_or(PayloadError::StatusNotSet)
    }

    /// Stores the output. A non-empty `wrapper` also becomes the key the
    /// output is nested under when serialized; an empty one is ignored.
    pub fn set_output(&mut self, output: impl Into<Value>, wrapper: Option<&str>) -> &mut Self {
        if let Some(wrapper) = wrapper.filter(|wrapper| !wrapper.is_empty()) {
            self.output_wrapper = Some(wrapper.to_string());
        }

        self.output = Some(output.into());
        self
    }

    pub fn try_set_output<T>(
        &mut self,
        output: &T,
        wrapper: Option<&str>,
    ) -> Result<&mut Self, PayloadError>
    where
        T: Serialize + ?Sized,
    {
        let output = serde_json::to_value(output)?;
        Ok(self.set_output(output, wrapper))
    }

    pub fn output(&self) -> Option<&Value> {
        self.output.as_ref()
    }

    pub fn output_wrapper(&self) -> Option<&str> {
        self.output_wrapper.as_deref()
    }

    /// The output nested under the wrapper key, or under `"data"` when no
    /// wrapper was set. Unset output is wrapped as `null`.
    pub fn wrapped_output(&self) -> Map<String, Value> {
        let key = self.output_wrapper().unwrap_or(DEFAULT_OUTPUT_WRAPPER);

        let mut wrapped = Map::new();
        wrapped.insert(key.to_string(), self.output.clone().unwrap_or(Value::Null));
        wrapped
    }

    /// Replaces any previous messages. Messages are kept already nested
    /// under the messages wrapper.
    pub fn set_messages<I, M>(&mut self, messages: I) -> &mut Self
    where
        I: IntoIterator<Item = M>,
        M: Into<Value>,
    {
        let messages = messages.into_iter().map(Into::into).collect();

        self.messages = Map::new();
        self.messages
            .insert(MESSAGES_WRAPPER.to_string(), Value::Array(messages));
        self
    }

    pub fn messages(&self) -> &Map<String, Value> {
        &self.messages
    }

    pub fn messages_wrapper(&self) -> &'static str {
        MESSAGES_WRAPPER
    }

    /// Serialized form of the payload.
    ///
    /// Without a wrapper or messages this is the raw output. Otherwise the
    /// output is wrapped and the messages mapping is merged alongside it,
    /// overwriting a colliding key.
    pub fn to_value(&self) -> Value {
        if self.output_wrapper.is_none() && self.messages.is_empty() {
            return self.output.clone().unwrap_or(Value::Null);
        }

        let mut merged = self.wrapped_output();
        merged.extend(
            self.messages
                .iter()
                .map(|(key, value)| (key.clone(), value.clone())),
        );
        Value::Object(merged)
    }

    pub fn for_response(&self) -> Value {
        self.to_value()
    }

    pub fn to_json(&self) -> Result<String, PayloadError> {
        Ok(serde_json::to_string(&self.to_value())?)
    }

    pub fn to_json_pretty(&self) -> Result<String, PayloadError> {
        Ok(serde_json::to_string_pretty(&self.to_value())?)
    }

    /// Reads `output[key]`. Fails when the output is not a JSON object or the
    /// key is absent.
    pub fn get(&self, key: &str) -> Result<&Value, PayloadError> {
        let fields = self
            .output
            .as_ref()
            .and_then(Value::as_object)
            .ok_or(PayloadError::NotKeyed)?;

        fields
            .get(key)
            .ok_or_else(|| PayloadError::MissingKey(key.to_string()))
    }

    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Result<T, PayloadError> {
        let value = self.get(key)?.clone();
        Ok(serde_json::from_value(value)?)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.output
            .as_ref()
            .and_then(Value::as_object)
            .is_some_and(|fields| fields.contains_key(key))
    }

    /// Writes `output[key]`, starting an empty object when no output is set.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<&mut Self, PayloadError> {
        let fields = self
            .output
            .get_or_insert_with(|| Value::Object(Map::new()))
            .as_object_mut()
            .ok_or(PayloadError::NotKeyed)?;

        fields.insert(key.into(), value.into());
        Ok(self)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.output
            .as_mut()
            .and_then(Value::as_object_mut)
            .and_then(|fields| fields.shift_remove(key))
    }
}

impl Serialize for Payload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = self.to_json().map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}
