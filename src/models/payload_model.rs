//! models/payload_model.rs
//! Forma tipada del webhook de oportunidades.
//!
//! El CRM manda casi todo como string, pero a veces llegan números
//! (`lead_value`, `Value`) o `null`. Los campos de texto aceptan string,
//! número o booleano; `null` o ausente equivale a vacío.

use serde::{de, Deserialize, Deserializer};
use serde_json::Value;

use crate::errors::PayloadError;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OpportunityPayload {
    #[serde(deserialize_with = "lenient_string")]
    pub contact_id: String,
    #[serde(deserialize_with = "lenient_string")]
    pub first_name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub last_name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub full_name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub email: String,
    #[serde(deserialize_with = "lenient_string")]
    pub phone: String,
    #[serde(deserialize_with = "lenient_string")]
    pub address1: String,
    #[serde(deserialize_with = "lenient_string")]
    pub city: String,
    #[serde(deserialize_with = "lenient_string")]
    pub state: String,
    #[serde(deserialize_with = "lenient_string")]
    pub country: String,
    #[serde(deserialize_with = "lenient_string")]
    pub timezone: String,

    /// `id` del payload = id de la oportunidad
    #[serde(rename = "id", deserialize_with = "lenient_string")]
    pub opportunity_id: String,
    #[serde(deserialize_with = "lenient_string")]
    pub opportunity_name: String,
    #[serde(deserialize_with = "lenient_opt_string")]
    pub status: Option<String>,
    #[serde(deserialize_with = "lenient_opt_string")]
    pub lead_value: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub opportunity_source: String,
    #[serde(deserialize_with = "lenient_string")]
    pub source: String,
    /// El CRM lo manda con el typo "pipleline_stage"
    #[serde(rename = "pipleline_stage", deserialize_with = "lenient_opt_string")]
    pub pipleline_stage: Option<String>,
    #[serde(deserialize_with = "lenient_opt_string")]
    pub pipeline_stage: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub pipeline_name: String,
    #[serde(rename = "Quote Link", deserialize_with = "lenient_opt_string")]
    pub quote_link: Option<String>,
    #[serde(deserialize_with = "lenient_opt_string")]
    pub date_created: Option<String>,

    #[serde(rename = "customData", deserialize_with = "null_as_default")]
    pub custom_data: CustomData,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CustomData {
    #[serde(rename = "Handler", deserialize_with = "lenient_string")]
    pub handler: String,
    #[serde(rename = "Workers Assigned", deserialize_with = "lenient_string")]
    pub workers_assigned: String,
    #[serde(rename = "Value", deserialize_with = "lenient_opt_string")]
    pub value: Option<String>,
}

impl OpportunityPayload {
    pub fn from_value(value: &Value) -> Result<Self, PayloadError> {
        if !value.is_object() {
            return Err(PayloadError::NotAnObject(json_kind(value)));
        }
        Ok(OpportunityPayload::deserialize(value)?)
    }

    /// "open" si el payload no trae status
    pub fn status(&self) -> &str {
        match self.status.as_deref() {
            Some(s) if !s.is_empty() => s,
            _ => "open",
        }
    }

    pub fn pipeline_stage(&self) -> &str {
        self.pipleline_stage
            .as_deref()
            .or(self.pipeline_stage.as_deref())
            .unwrap_or_default()
    }

    pub fn quote_link(&self) -> Option<&str> {
        self.quote_link.as_deref().filter(|l| !l.trim().is_empty())
    }
}

impl CustomData {
    pub fn handler(&self) -> &str {
        self.handler.trim()
    }

    /// Lista de workers: separada por comas, sin espacios ni entradas vacías.
    pub fn worker_names(&self) -> Vec<String> {
        self.workers_assigned
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// `Value` sin procesar; "0" si no viene.
    pub fn raw_value(&self) -> &str {
        self.value.as_deref().unwrap_or("0")
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn lenient_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(de::Error::custom(format!(
            "expected a string or number, got {}",
            json_kind(&other)
        ))),
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_opt_string(deserializer)?.unwrap_or_default())
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
