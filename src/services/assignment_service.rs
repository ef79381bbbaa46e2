//! services/assignment_service.rs
//! Reparto del valor de una oportunidad entre handler y workers.
//!
//! - handler: 15% del valor
//! - workers: 35% del valor, dividido en partes iguales
//!
//! Se crea una fila `leads` por persona. Un webhook repetido con el mismo
//! (contact_id, opportunity_id) no crea nada y se reporta como éxito.

use anyhow::Result;
use bigdecimal::BigDecimal;
use chrono::Utc;
use serde_json::Value;

use crate::models::assignment_model::{
    AssignmentResult, CreatedRecord, DataWarning, HANDLER_PERCENTAGE, WORKERS_PERCENTAGE,
};
use crate::models::lead_model::{LeadCommon, UserType};
use crate::models::payload_model::OpportunityPayload;
use crate::parsing::{is_valid_phone, parse_datetime, parse_decimal};
use crate::services::lead_service::LeadService;

/// Parte de una persona, sin redondear.
#[derive(Debug, Clone, PartialEq)]
pub struct Share {
    pub user_type: UserType,
    pub user_name: String,
    pub price: BigDecimal,
}

/// Calcula las partes. El handler va primero si existe; los workers
/// mantienen el orden en que llegaron. Los nombres ya deben venir limpios.
pub fn compute_shares(handler: &str, workers: &[String], total_value: &BigDecimal) -> Vec<Share> {
    let mut shares = Vec::with_capacity(workers.len() + 1);

    if !handler.is_empty() {
        shares.push(Share {
            user_type: UserType::Handler,
            user_name: handler.to_string(),
            price: percentage_of(total_value, HANDLER_PERCENTAGE),
        });
    }

    if !workers.is_empty() {
        let workers_total = percentage_of(total_value, WORKERS_PERCENTAGE);
        let worker_price = workers_total / BigDecimal::from(workers.len() as u64);

        shares.extend(workers.iter().map(|worker| Share {
            user_type: UserType::WorkerAssigned,
            user_name: worker.clone(),
            price: worker_price.clone(),
        }));
    }

    shares
}

fn percentage_of(amount: &BigDecimal, percentage: u32) -> BigDecimal {
    amount.clone() * BigDecimal::from(percentage) / BigDecimal::from(100)
}

#[derive(Clone, Debug)]
pub struct AssignmentService {
    lead_service: LeadService,
}

impl AssignmentService {
    pub fn new(lead_service: LeadService) -> Self {
        AssignmentService { lead_service }
    }

    /// Crea los registros de handler y workers a partir del webhook.
    /// Nunca devuelve error: cualquier fallo queda en `success = false`.
    pub async fn handle_employee_assigner(&self, payload: &Value) -> AssignmentResult {
        match self.assign(payload).await {
            Ok(result) => result,
            Err(e) => {
                log::error!("(handle_employee_assigner) Falló la asignación: {:#}", e);
                AssignmentResult::failed(&e)
            }
        }
    }

    async fn assign(&self, payload: &Value) -> Result<AssignmentResult> {
        let payload = OpportunityPayload::from_value(payload)?;
        let contact_id = payload.contact_id.as_str();
        let opportunity_id = payload.opportunity_id.as_str();

        let mut warnings = Vec::new();
        if contact_id.is_empty() {
            log::warn!("(handle_employee_assigner) Payload sin contact_id, se usa vacío");
            warnings.push(DataWarning::MissingContactId);
        }
        if opportunity_id.is_empty() {
            log::warn!("(handle_employee_assigner) Payload sin id de oportunidad, se usa vacío");
            warnings.push(DataWarning::MissingOpportunityId);
        }

        // 1) idempotencia: reclamar antes de crear cualquier fila
        if !self
            .lead_service
            .claim_opportunity(contact_id, opportunity_id)
            .await?
        {
            log::info!(
                "(handle_employee_assigner) Duplicado contact_id={} opportunity_id={}, no se crea nada",
                contact_id,
                opportunity_id
            );
            return Ok(AssignmentResult::duplicate(warnings));
        }

        // 2) valor total
        let raw_value = payload.custom_data.raw_value();
        let total_value = parse_decimal(raw_value).unwrap_or_else(|| {
            log::warn!(
                "(handle_employee_assigner) Value '{}' no es numérico, se usa 0.00",
                raw_value
            );
            warnings.push(DataWarning::ValueDefaulted);
            BigDecimal::from(0)
        });

        // 3) campos comunes
        let common = build_common(&payload, &mut warnings);

        // 4) partes
        let handler = payload.custom_data.handler();
        let workers = payload.custom_data.worker_names();
        let shares = compute_shares(handler, &workers, &total_value);

        let mut created = Vec::with_capacity(shares.len());
        for share in shares {
            let insert = self
                .lead_service
                .create_lead(&common, &share.user_name, share.user_type, &share.price)
                .await;

            let lead = match insert {
                Ok(lead) => lead,
                Err(e) => {
                    // sin filas creadas, un reintento del CRM debe poder procesarse
                    if created.is_empty() {
                        if let Err(release_err) = self
                            .lead_service
                            .release_claim(contact_id, opportunity_id)
                            .await
                        {
                            log::error!(
                                "(handle_employee_assigner) No se pudo liberar el reclamo: {:#}",
                                release_err
                            );
                        }
                    }
                    return Err(e);
                }
            };

            log::info!(
                "(handle_employee_assigner) Creado {} '{}' precio={}",
                lead.user_type,
                lead.user_name,
                lead.employee_price
            );
            created.push(CreatedRecord::new(
                lead.user_type,
                lead.user_name,
                lead.employee_price,
            ));
        }

        Ok(AssignmentResult::completed(created, total_value, warnings))
    }
}

/// Campos de contacto/oportunidad comunes a todas las filas.
fn build_common(payload: &OpportunityPayload, warnings: &mut Vec<DataWarning>) -> LeadCommon {
    let date_created = payload
        .date_created
        .as_deref()
        .and_then(parse_datetime)
        .unwrap_or_else(|| {
            log::warn!(
                "(handle_employee_assigner) date_created {:?} inválido, se usa la hora actual",
                payload.date_created
            );
            warnings.push(DataWarning::DateDefaulted);
            Utc::now()
        });

    let lead_value = match payload.lead_value.as_deref() {
        None => BigDecimal::from(0),
        Some(raw) => parse_decimal(raw).unwrap_or_else(|| {
            log::warn!(
                "(handle_employee_assigner) lead_value '{}' no es numérico, se usa 0.00",
                raw
            );
            warnings.push(DataWarning::LeadValueDefaulted);
            BigDecimal::from(0)
        }),
    };

    // Se guarda igual; solo se avisa.
    if !payload.phone.is_empty() && !is_valid_phone(&payload.phone) {
        log::warn!(
            "(handle_employee_assigner) Teléfono '{}' no cumple el formato +999999999",
            payload.phone
        );
        warnings.push(DataWarning::PhoneInvalid);
    }

    LeadCommon {
        contact_id: payload.contact_id.clone(),
        first_name: payload.first_name.clone(),
        last_name: payload.last_name.clone(),
        full_name: payload.full_name.clone(),
        email: payload.email.clone(),
        phone: payload.phone.clone(),
        address1: payload.address1.clone(),
        city: payload.city.clone(),
        state: payload.state.clone(),
        country: payload.country.clone(),
        timezone: payload.timezone.clone(),
        opportunity_id: payload.opportunity_id.clone(),
        opportunity_name: payload.opportunity_name.clone(),
        status: payload.status().to_string(),
        lead_value,
        opportunity_source: payload.opportunity_source.clone(),
        source: payload.source.clone(),
        pipeline_stage: payload.pipeline_stage().to_string(),
        pipeline_name: payload.pipeline_name.clone(),
        quote_link: payload.quote_link().map(str::to_string),
        value: payload.custom_data.raw_value().to_string(),
        date_created,
    }
}
