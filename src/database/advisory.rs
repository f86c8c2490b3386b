//! Expert consultations and the input supplier directory

use super::Database;
use crate::models::like_contains;
use crate::models::CreateConsultationRequest;
use crate::models::ExpertConsultation;
use crate::models::InputSupplier;
use crate::models::CONSULTATION_PENDING;
use crate::models::DEMO_SUPPLIERS;
use crate::Result;

/// Suppliers returned by the directory listing
const SUPPLIER_LIST_LIMIT: i64 = 50;

impl Database {
    /// Book a consultation; it starts out pending
    pub async fn create_consultation(
        &self,
        user_id: i64,
        request: &CreateConsultationRequest,
    ) -> Result<ExpertConsultation> {
        let consultation = sqlx::query_as::<_, ExpertConsultation>(
            r"
            INSERT INTO expert_consultations
                (user_id, expert_name, topic, consultation_type,
                 preferred_date, preferred_time, description, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            ",
        )
        .bind(user_id)
        .bind(request.expert_name.trim())
        .bind(request.topic.trim())
        .bind(request.consultation_type.trim().to_lowercase())
        .bind(&request.preferred_date)
        .bind(&request.preferred_time)
        .bind(&request.description)
        .bind(CONSULTATION_PENDING)
        .fetch_one(&self.pool)
        .await?;

        Ok(consultation)
    }

    /// Consultations of a farmer, newest first
    pub async fn list_consultations(&self, user_id: i64) -> Result<Vec<ExpertConsultation>> {
        let consultations = sqlx::query_as::<_, ExpertConsultation>(
            "SELECT * FROM expert_consultations WHERE user_id = $1 ORDER BY id DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(consultations)
    }

    pub async fn list_suppliers(&self) -> Result<Vec<InputSupplier>> {
        let suppliers = sqlx::query_as::<_, InputSupplier>(
            "SELECT * FROM input_suppliers ORDER BY id LIMIT $1",
        )
        .bind(SUPPLIER_LIST_LIMIT)
        .fetch_all(&self.pool)
        .await?;

        Ok(suppliers)
    }

    /// Suppliers whose category contains `category`, ignoring case
    pub async fn suppliers_by_category(&self, category: &str) -> Result<Vec<InputSupplier>> {
        let suppliers = sqlx::query_as::<_, InputSupplier>(
            "SELECT * FROM input_suppliers WHERE category ILIKE $1 ORDER BY id",
        )
        .bind(like_contains(category))
        .fetch_all(&self.pool)
        .await?;

        Ok(suppliers)
    }

    /// Insert the demo suppliers when the directory is empty; returns the number inserted
    pub async fn seed_demo_suppliers(&self) -> Result<usize> {
        let mut tx = self.pool.begin().await?;

        // concurrent seeds wait here instead of both seeing an empty table
        sqlx::query("LOCK TABLE input_suppliers IN SHARE ROW EXCLUSIVE MODE")
            .execute(&mut *tx)
            .await?;
        let existing = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM input_suppliers")
            .fetch_one(&mut *tx)
            .await?;
        if existing > 0 {
            return Ok(0);
        }

        for (name, category, contact, location) in DEMO_SUPPLIERS {
            sqlx::query(
                "INSERT INTO input_suppliers (name, category, contact, location) VALUES ($1, $2, $3, $4)",
            )
            .bind(name)
            .bind(category)
            .bind(contact)
            .bind(location)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        tracing::info!("Seeded {} demo input suppliers", DEMO_SUPPLIERS.len());
        Ok(DEMO_SUPPLIERS.len())
    }
}
