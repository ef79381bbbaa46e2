//! models/lead_model.rs
//! Lead: una fila por persona asignada a una oportunidad.

use std::fmt;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Rol de la persona dentro de la oportunidad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserType {
    #[serde(rename = "handler")]
    Handler,
    #[serde(rename = "worker-assigned")]
    WorkerAssigned,
}

impl UserType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Handler => "handler",
            UserType::WorkerAssigned => "worker-assigned",
        }
    }

    /// Etiqueta corta que se reporta en `records_created`
    pub fn label(&self) -> &'static str {
        match self {
            UserType::Handler => "handler",
            UserType::WorkerAssigned => "worker",
        }
    }

    /// Status con el que se guarda la fila. Los workers quedan como
    /// "employee assigned"; el handler conserva el de la oportunidad.
    pub fn record_status<'a>(&self, opportunity_status: &'a str) -> &'a str {
        match self {
            UserType::Handler => opportunity_status,
            UserType::WorkerAssigned => "employee assigned",
        }
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "handler" => Ok(UserType::Handler),
            "worker-assigned" => Ok(UserType::WorkerAssigned),
            other => Err(anyhow::anyhow!("unknown user_type '{other}'")),
        }
    }
}

/// Campos de contacto y oportunidad compartidos por todas las filas
/// que se crean para un mismo webhook.
#[derive(Debug, Clone)]
pub struct LeadCommon {
    pub contact_id: String,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address1: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub timezone: String,

    pub opportunity_id: String,
    pub opportunity_name: String,
    pub status: String,
    pub lead_value: BigDecimal,
    pub opportunity_source: String,
    pub source: String,
    pub pipeline_stage: String,
    pub pipeline_name: String,
    pub quote_link: Option<String>,
    /// `customData.Value` tal como llegó
    pub value: String,
    pub date_created: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct LeadRecord {
    pub id: String,
    pub common: LeadCommon,
    pub user_name: String,
    pub employee_price: BigDecimal,
    pub user_type: UserType,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
