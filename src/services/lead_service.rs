//! services/lead_service.rs
//! Persistencia de leads y de la clave de idempotencia por oportunidad.

use anyhow::{Context, Result};
use bigdecimal::BigDecimal;
use chrono::Utc;
use sqlx::{Pool, Sqlite};
use uuid::Uuid;

use crate::models::lead_model::{LeadCommon, LeadRecord, UserType};
use crate::parsing::round_money;

#[derive(Clone, Debug)]
pub struct LeadService {
    db_pool: Pool<Sqlite>,
}

impl LeadService {
    pub fn new(db_pool: Pool<Sqlite>) -> Self {
        LeadService { db_pool }
    }

    /// Reclama (contact_id, opportunity_id) antes de crear filas.
    /// `false` si otro webhook ya lo había reclamado; la PK de
    /// `opportunity_claims` resuelve entregas simultáneas.
    pub async fn claim_opportunity(&self, contact_id: &str, opportunity_id: &str) -> Result<bool> {
        let now = Utc::now().to_rfc3339();

        let result = sqlx::query(
            r#"
            INSERT INTO opportunity_claims (contact_id, opportunity_id, claimed_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT (contact_id, opportunity_id) DO NOTHING
            "#,
        )
        .bind(contact_id)
        .bind(opportunity_id)
        .bind(now)
        .execute(&self.db_pool)
        .await
        .context("Fallo al reclamar la oportunidad")?;

        Ok(result.rows_affected() == 1)
    }

    /// Libera el reclamo; solo se usa si no se llegó a crear ninguna fila.
    pub async fn release_claim(&self, contact_id: &str, opportunity_id: &str) -> Result<()> {
        sqlx::query(
            r#"
            DELETE FROM opportunity_claims
            WHERE contact_id = ?1 AND opportunity_id = ?2
            "#,
        )
        .bind(contact_id)
        .bind(opportunity_id)
        .execute(&self.db_pool)
        .await
        .context("Fallo al liberar la oportunidad")?;

        Ok(())
    }

    /// Inserta una fila por persona asignada. Los montos se guardan en centavos.
    pub async fn create_lead(
        &self,
        common: &LeadCommon,
        user_name: &str,
        user_type: UserType,
        employee_price: &BigDecimal,
    ) -> Result<LeadRecord> {
        let now = Utc::now();
        let lead = LeadRecord {
            id: Uuid::new_v4().to_string(),
            common: common.clone(),
            user_name: user_name.to_string(),
            employee_price: round_money(employee_price),
            user_type,
            created_at: now,
            updated_at: now,
        };
        let common = &lead.common;

        sqlx::query(
            r#"
            INSERT INTO leads (
                id, contact_id, first_name, last_name, full_name, email, phone,
                address1, city, state, country, timezone,
                opportunity_id, opportunity_name, status, lead_value,
                opportunity_source, source, pipeline_stage, pipeline_name,
                quote_link, value,
                user_name, employee_price, user_type,
                date_created, created_at, updated_at
            )
            VALUES (
                ?1, ?2, ?3, ?4, ?5, ?6, ?7,
                ?8, ?9, ?10, ?11, ?12,
                ?13, ?14, ?15, ?16,
                ?17, ?18, ?19, ?20,
                ?21, ?22,
                ?23, ?24, ?25,
                ?26, ?27, ?28
            )
            "#,
        )
        .bind(&lead.id)
        .bind(&common.contact_id)
        .bind(&common.first_name)
        .bind(&common.last_name)
        .bind(&common.full_name)
        .bind(&common.email)
        .bind(&common.phone)
        .bind(&common.address1)
        .bind(&common.city)
        .bind(&common.state)
        .bind(&common.country)
        .bind(&common.timezone)
        .bind(&common.opportunity_id)
        .bind(&common.opportunity_name)
        .bind(lead.user_type.record_status(&common.status))
        .bind(round_money(&common.lead_value).to_string())
        .bind(&common.opportunity_source)
        .bind(&common.source)
        .bind(&common.pipeline_stage)
        .bind(&common.pipeline_name)
        .bind(common.quote_link.as_deref())
        .bind(&common.value)
        .bind(&lead.user_name)
        .bind(lead.employee_price.to_string())
        .bind(lead.user_type.as_str())
        .bind(common.date_created.to_rfc3339())
        .bind(lead.created_at.to_rfc3339())
        .bind(lead.updated_at.to_rfc3339())
        .execute(&self.db_pool)
        .await
        .with_context(|| format!("Fallo al insertar lead {} ({})", user_name, user_type))?;

        Ok(lead)
    }
}
