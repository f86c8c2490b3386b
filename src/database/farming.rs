use super::Database;
use crate::models::*;
use crate::KhetGuruError;
use crate::Result;

impl Database {
    /// Record a soil test for a farmer
    pub async fn create_soil_test(
        &self,
        user_id: i64,
        request: &CreateSoilTestRequest,
    ) -> Result<SoilTest> {
        let test = sqlx::query_as::<_, SoilTest>(
            r"
            INSERT INTO soil_tests (user_id, ph, nitrogen, phosphorus, potassium, recommendation)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            ",
        )
        .bind(user_id)
        .bind(request.ph)
        .bind(request.nitrogen)
        .bind(request.phosphorus)
        .bind(request.potassium)
        .bind(request.recommendation())
        .fetch_one(&self.pool)
        .await?;

        Ok(test)
    }

    /// Soil tests of a farmer, newest first
    pub async fn list_soil_tests(&self, user_id: i64) -> Result<Vec<SoilTest>> {
        let tests = sqlx::query_as::<_, SoilTest>(
            "SELECT * FROM soil_tests WHERE user_id = $1 ORDER BY id DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(tests)
    }

    pub async fn create_field(&self, user_id: i64, request: &CreateFieldRequest) -> Result<FarmField> {
        let field = sqlx::query_as::<_, FarmField>(
            r"
            INSERT INTO farm_fields (user_id, name, area_acres, latitude, longitude, notes)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            ",
        )
        .bind(user_id)
        .bind(&request.name)
        .bind(request.area_acres)
        .bind(request.latitude)
        .bind(request.longitude)
        .bind(&request.notes)
        .fetch_one(&self.pool)
        .await?;

        Ok(field)
    }

    pub async fn list_fields(&self, user_id: i64) -> Result<Vec<FarmField>> {
        let fields = sqlx::query_as::<_, FarmField>(
            "SELECT * FROM farm_fields WHERE user_id = $1 ORDER BY id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(fields)
    }

    /// Save the crop a farmer picked
    pub async fn create_crop_plan(
        &self,
        user_id: i64,
        request: &CreateCropPlanRequest,
    ) -> Result<CropPlan> {
        let plan = sqlx::query_as::<_, CropPlan>(
            r"
            INSERT INTO crop_plans (user_id, crop, season, notes)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            ",
        )
        .bind(user_id)
        .bind(request.crop.trim().to_lowercase())
        .bind(request.season.trim().to_lowercase())
        .bind(&request.notes)
        .fetch_one(&self.pool)
        .await?;

        Ok(plan)
    }

    /// Saved plans of a farmer, newest first
    pub async fn list_crop_plans(&self, user_id: i64) -> Result<Vec<CropPlan>> {
        let plans = sqlx::query_as::<_, CropPlan>(
            "SELECT * FROM crop_plans WHERE user_id = $1 ORDER BY id DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(plans)
    }

    /// Register a policy; policy numbers are unique across farmers
    pub async fn create_policy(
        &self,
        user_id: i64,
        request: &CreatePolicyRequest,
    ) -> Result<InsurancePolicy> {
        let policy = sqlx::query_as::<_, InsurancePolicy>(
            r"
            INSERT INTO insurance_policies (user_id, policy_number, crop, coverage_amount, premium)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (policy_number) DO NOTHING
            RETURNING *
            ",
        )
        .bind(user_id)
        .bind(request.policy_number.trim())
        .bind(&request.crop)
        .bind(request.coverage_amount)
        .bind(request.premium)
        .fetch_optional(&self.pool)
        .await?;

        policy.ok_or_else(|| {
            KhetGuruError::Conflict(format!(
                "policy {} already exists",
                request.policy_number.trim()
            ))
        })
    }

    pub async fn list_policies(&self, user_id: i64) -> Result<Vec<InsurancePolicy>> {
        let policies = sqlx::query_as::<_, InsurancePolicy>(
            "SELECT * FROM insurance_policies WHERE user_id = $1 ORDER BY id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(policies)
    }
}
