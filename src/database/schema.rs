use super::Database;
use crate::KhetGuruError;
use crate::Result;

const REQUIRED_TABLES: [&str; 8] = [
    "market_prices",
    "soil_tests",
    "farm_fields",
    "crop_plans",
    "insurance_policies",
    "weather_alerts",
    "expert_consultations",
    "input_suppliers",
];

impl Database {
    /// Check if database schema is initialized
    /// Returns true if all required tables exist
    pub async fn is_schema_initialized(&self) -> Result<bool> {
        for table_name in REQUIRED_TABLES {
            let exists = sqlx::query_scalar::<_, bool>(
                r"
                SELECT EXISTS (
                    SELECT FROM information_schema.tables
                    WHERE table_schema = 'public'
                    AND table_name = $1
                )
                ",
            )
            .bind(table_name)
            .fetch_one(&self.pool)
            .await?;

            if !exists {
                tracing::debug!("Missing required table: {}", table_name);
                return Ok(false);
            }
        }

        Ok(true)
    }

    /// Verify database schema or return helpful error
    pub async fn verify_schema_or_error(&self) -> Result<()> {
        if !self.is_schema_initialized().await? {
            return Err(KhetGuruError::Custom(
                "Database schema not initialized!\n\n\
                 Please run the following command to initialize the database:\n\n\
                 \x1b[1;32mkhetguru init\x1b[0m"
                    .to_string(),
            ));
        }
        Ok(())
    }

    /// Initialize database schema
    pub async fn init_schema(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS market_prices (
                id BIGSERIAL PRIMARY KEY,
                crop VARCHAR(64) NOT NULL,
                mandi VARCHAR(128) NOT NULL,
                price_per_quintal DOUBLE PRECISION NOT NULL,
                quality VARCHAR(16) NOT NULL DEFAULT 'A',
                unit VARCHAR(16) NOT NULL DEFAULT 'quintal',
                date TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_market_prices_crop ON market_prices(crop, id DESC)")
            .execute(&self.pool)
            .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS soil_tests (
                id BIGSERIAL PRIMARY KEY,
                user_id BIGINT NOT NULL,
                ph DOUBLE PRECISION NOT NULL,
                nitrogen DOUBLE PRECISION NOT NULL,
                phosphorus DOUBLE PRECISION NOT NULL,
                potassium DOUBLE PRECISION NOT NULL,
                recommendation TEXT NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS farm_fields (
                id BIGSERIAL PRIMARY KEY,
                user_id BIGINT NOT NULL,
                name VARCHAR(255) NOT NULL,
                area_acres DOUBLE PRECISION NOT NULL,
                latitude DOUBLE PRECISION NOT NULL,
                longitude DOUBLE PRECISION NOT NULL,
                notes TEXT,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS crop_plans (
                id BIGSERIAL PRIMARY KEY,
                user_id BIGINT NOT NULL,
                crop VARCHAR(64) NOT NULL,
                season VARCHAR(32) NOT NULL,
                start_date TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                notes TEXT
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS insurance_policies (
                id BIGSERIAL PRIMARY KEY,
                user_id BIGINT NOT NULL,
                policy_number VARCHAR(64) UNIQUE NOT NULL,
                crop VARCHAR(64) NOT NULL,
                coverage_amount DOUBLE PRECISION NOT NULL,
                premium DOUBLE PRECISION NOT NULL,
                status VARCHAR(16) NOT NULL DEFAULT 'active'
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS weather_alerts (
                id BIGSERIAL PRIMARY KEY,
                user_id BIGINT,
                title VARCHAR(255) NOT NULL,
                severity VARCHAR(16) NOT NULL,
                message TEXT NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS expert_consultations (
                id BIGSERIAL PRIMARY KEY,
                user_id BIGINT NOT NULL,
                expert_name VARCHAR(255) NOT NULL,
                topic VARCHAR(255) NOT NULL,
                consultation_type VARCHAR(16) NOT NULL DEFAULT 'call',
                preferred_date VARCHAR(32),
                preferred_time VARCHAR(32),
                description TEXT,
                status VARCHAR(16) NOT NULL DEFAULT 'pending',
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS input_suppliers (
                id BIGSERIAL PRIMARY KEY,
                name VARCHAR(255) NOT NULL,
                category VARCHAR(64) NOT NULL,
                contact VARCHAR(64) NOT NULL,
                location VARCHAR(128) NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        for table in [
            "soil_tests",
            "farm_fields",
            "crop_plans",
            "insurance_policies",
            "weather_alerts",
            "expert_consultations",
        ] {
            sqlx::query(&format!(
                "CREATE INDEX IF NOT EXISTS idx_{table}_user ON {table}(user_id)"
            ))
            .execute(&self.pool)
            .await?;
        }

        tracing::info!("Database schema initialized");
        Ok(())
    }
}
