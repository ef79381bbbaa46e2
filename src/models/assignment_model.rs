//! models/assignment_model.rs
//! Resultado estructurado de `handle_employee_assigner`.

use bigdecimal::{BigDecimal, ToPrimitive};
use serde::{Serialize, Serializer};

use crate::models::lead_model::UserType;

pub const HANDLER_PERCENTAGE: u32 = 15;
pub const WORKERS_PERCENTAGE: u32 = 35;

/// Datos del payload que se reemplazaron por un default o que no
/// pasaron la validación. No hacen fallar el request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DataWarning {
    ValueDefaulted,
    LeadValueDefaulted,
    DateDefaulted,
    PhoneInvalid,
    MissingContactId,
    MissingOpportunityId,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreatedRecord {
    #[serde(rename = "type")]
    pub record_type: &'static str,
    pub name: String,
    #[serde(serialize_with = "decimal_as_number")]
    pub price: BigDecimal,
}

impl CreatedRecord {
    pub fn new(user_type: UserType, name: String, price: BigDecimal) -> Self {
        CreatedRecord {
            record_type: user_type.label(),
            name,
            price,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AssignmentResult {
    pub success: bool,
    pub message: String,
    pub records_created: Vec<CreatedRecord>,
    #[serde(serialize_with = "decimal_as_number")]
    pub total_value: BigDecimal,
    pub handler_percentage: u32,
    pub workers_percentage: u32,
    /// true si la oportunidad ya se había procesado
    pub duplicate: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<DataWarning>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AssignmentResult {
    pub fn completed(
        records_created: Vec<CreatedRecord>,
        total_value: BigDecimal,
        warnings: Vec<DataWarning>,
    ) -> Self {
        AssignmentResult {
            success: true,
            message: format!("Successfully created {} records", records_created.len()),
            records_created,
            total_value,
            handler_percentage: HANDLER_PERCENTAGE,
            workers_percentage: WORKERS_PERCENTAGE,
            duplicate: false,
            warnings,
            error: None,
        }
    }

    /// Sin registros nuevos; `total_value` queda en 0 porque no se repartió nada.
    /// Los avisos de ids faltantes se conservan.
    pub fn duplicate(warnings: Vec<DataWarning>) -> Self {
        AssignmentResult {
            success: true,
            message: "Records already exist for this contact and opportunity".to_string(),
            records_created: Vec::new(),
            total_value: BigDecimal::from(0),
            handler_percentage: HANDLER_PERCENTAGE,
            workers_percentage: WORKERS_PERCENTAGE,
            duplicate: true,
            warnings,
            error: None,
        }
    }

    pub fn failed(error: &anyhow::Error) -> Self {
        AssignmentResult {
            success: false,
            message: "Failed to create records".to_string(),
            records_created: Vec::new(),
            total_value: BigDecimal::from(0),
            handler_percentage: HANDLER_PERCENTAGE,
            workers_percentage: WORKERS_PERCENTAGE,
            duplicate: false,
            warnings: Vec::new(),
            error: Some(format!("{error:#}")),
        }
    }
}

fn decimal_as_number<S>(value: &BigDecimal, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_f64(value.to_f64().unwrap_or_default())
}
