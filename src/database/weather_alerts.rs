use super::Database;
use crate::models::CreateWeatherAlertRequest;
use crate::models::WeatherAlert;
use crate::models::DEMO_WEATHER_ALERTS;
use crate::Result;

/// Alerts returned by the list queries
pub const ALERT_LIST_LIMIT: i64 = 20;

impl Database {
    /// Newest alerts of every scope
    pub async fn list_weather_alerts(&self) -> Result<Vec<WeatherAlert>> {
        let alerts = sqlx::query_as::<_, WeatherAlert>(
            "SELECT * FROM weather_alerts ORDER BY id DESC LIMIT $1",
        )
        .bind(ALERT_LIST_LIMIT)
        .fetch_all(&self.pool)
        .await?;

        Ok(alerts)
    }

    /// Global alerts plus the ones private to `user_id`, newest first
    pub async fn list_user_weather_alerts(&self, user_id: i64) -> Result<Vec<WeatherAlert>> {
        let alerts = sqlx::query_as::<_, WeatherAlert>(
            r"
            SELECT * FROM weather_alerts
            WHERE user_id IS NULL OR user_id = $1
            ORDER BY id DESC
            LIMIT $2
            ",
        )
        .bind(user_id)
        .bind(ALERT_LIST_LIMIT)
        .fetch_all(&self.pool)
        .await?;

        Ok(alerts)
    }

    /// Store an alert raised by `user_id`; only user-scoped alerts keep the owner
    ///
    /// The severity must already be validated.
    pub async fn create_weather_alert(
        &self,
        user_id: i64,
        request: &CreateWeatherAlertRequest,
    ) -> Result<WeatherAlert> {
        let alert = sqlx::query_as::<_, WeatherAlert>(
            r"
            INSERT INTO weather_alerts (user_id, title, severity, message)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            ",
        )
        .bind(request.owner(user_id))
        .bind(request.title.trim())
        .bind(request.severity.trim().to_lowercase())
        .bind(request.message.trim())
        .fetch_one(&self.pool)
        .await?;

        Ok(alert)
    }

    /// Insert the demo alerts when the table is empty; returns the number inserted
    pub async fn seed_weather_alerts(&self) -> Result<usize> {
        let mut tx = self.pool.begin().await?;

        // concurrent seeds wait here instead of both seeing an empty table
        sqlx::query("LOCK TABLE weather_alerts IN SHARE ROW EXCLUSIVE MODE")
            .execute(&mut *tx)
            .await?;
        let existing = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM weather_alerts")
            .fetch_one(&mut *tx)
            .await?;
        if existing > 0 {
            return Ok(0);
        }

        for (title, severity, message) in DEMO_WEATHER_ALERTS {
            sqlx::query("INSERT INTO weather_alerts (title, severity, message) VALUES ($1, $2, $3)")
                .bind(title)
                .bind(severity.as_str())
                .bind(message)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        tracing::info!("Seeded {} demo weather alerts", DEMO_WEATHER_ALERTS.len());
        Ok(DEMO_WEATHER_ALERTS.len())
    }
}
