use tracing::warn;

use super::Database;
use crate::models::like_contains;
use crate::models::CreateMarketPriceRequest;
use crate::models::MandiRateQuery;
use crate::models::MarketPrice;
use crate::models::MarketTrend;
use crate::planner::PriceSnapshot;
use crate::Result;

/// Demo mandi prices inserted by `seed_demo_prices`: (crop, mandi, price per quintal)
pub const DEMO_PRICES: [(&str, &str, f64); 9] = [
    ("wheat", "Delhi", 2250.0),
    ("rice", "Kolkata", 2300.0),
    ("maize", "Hyderabad", 2100.0),
    ("soybean", "Indore", 4800.0),
    ("mustard", "Jaipur", 5600.0),
    ("chickpea", "Bhopal", 5450.0),
    ("cotton", "Nagpur", 7050.0),
    ("groundnut", "Rajkot", 6550.0),
    ("bajra", "Jaipur", 2520.0),
];

/// Default number of mandi rate rows
pub const DEFAULT_RATE_LIMIT: i64 = 50;
/// Upper bound for mandi rate rows
pub const MAX_RATE_LIMIT: i64 = 200;
/// Samples averaged for a trend
const TREND_WINDOW: i64 = 10;
/// Rows returned by the unfiltered price listing
pub const PRICE_LIST_LIMIT: i64 = 50;
/// Rows returned by a crop price search
pub const CROP_PRICE_LIMIT: i64 = 20;

impl Database {
    /// Record a mandi price sample
    pub async fn insert_market_price(&self, request: &CreateMarketPriceRequest) -> Result<MarketPrice> {
        let price = sqlx::query_as::<_, MarketPrice>(
            r"
            INSERT INTO market_prices (crop, mandi, price_per_quintal, quality, unit)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            ",
        )
        .bind(request.crop.trim().to_lowercase())
        .bind(request.mandi.trim())
        .bind(request.price_per_quintal)
        .bind(&request.quality)
        .bind(&request.unit)
        .fetch_one(&self.pool)
        .await?;

        Ok(price)
    }

    /// Most recently inserted price for a crop, optionally at one mandi
    pub async fn latest_market_price(&self, crop: &str, mandi: Option<&str>) -> Result<Option<f64>> {
        let price = sqlx::query_scalar::<_, f64>(
            r"
            SELECT price_per_quintal FROM market_prices
            WHERE crop = $1 AND ($2::TEXT IS NULL OR mandi = $2)
            ORDER BY id DESC
            LIMIT 1
            ",
        )
        .bind(crop)
        .bind(mandi)
        .fetch_optional(&self.pool)
        .await?;

        Ok(price)
    }

    /// Latest price of every listed crop that has one
    pub async fn latest_prices_for(&self, crops: &[String]) -> Result<PriceSnapshot> {
        let rows = sqlx::query_as::<_, (String, f64)>(
            r"
            SELECT DISTINCT ON (crop) crop, price_per_quintal
            FROM market_prices
            WHERE crop = ANY($1)
            ORDER BY crop, id DESC
            ",
        )
        .bind(crops)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().collect())
    }

    /// Like `latest_prices_for`, but a failed read yields an empty snapshot
    pub async fn price_snapshot(&self, crops: &[String]) -> PriceSnapshot {
        match self.latest_prices_for(crops).await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!("Market prices unavailable, using fallback prices: {}", e);
                PriceSnapshot::new()
            }
        }
    }

    /// Newest mandi rows matching the filter; the limit is clamped to 1..=200
    pub async fn mandi_rates(&self, query: &MandiRateQuery) -> Result<Vec<MarketPrice>> {
        let limit = query
            .limit
            .unwrap_or(DEFAULT_RATE_LIMIT)
            .clamp(1, MAX_RATE_LIMIT);

        let rows = sqlx::query_as::<_, MarketPrice>(
            r"
            SELECT * FROM market_prices
            WHERE ($1::TEXT IS NULL OR crop = $1)
            AND ($2::TEXT IS NULL OR mandi = $2)
            ORDER BY id DESC
            LIMIT $3
            ",
        )
        .bind(query.crop.as_deref())
        .bind(query.mandi.as_deref())
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Newest price samples of any crop
    pub async fn list_market_prices(&self) -> Result<Vec<MarketPrice>> {
        let rows = sqlx::query_as::<_, MarketPrice>(
            "SELECT * FROM market_prices ORDER BY id DESC LIMIT $1",
        )
        .bind(PRICE_LIST_LIMIT)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Newest samples of crops whose name contains `crop`, ignoring case
    pub async fn search_crop_prices(&self, crop: &str) -> Result<Vec<MarketPrice>> {
        let rows = sqlx::query_as::<_, MarketPrice>(
            r"
            SELECT * FROM market_prices
            WHERE crop ILIKE $1
            ORDER BY id DESC
            LIMIT $2
            ",
        )
        .bind(like_contains(crop))
        .bind(CROP_PRICE_LIMIT)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Per-crop latest price against the average of its last ten samples
    pub async fn market_trends(&self) -> Result<Vec<MarketTrend>> {
        let crops = sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT crop FROM market_prices ORDER BY crop",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut trends = Vec::with_capacity(crops.len());
        for crop in crops {
            let prices = sqlx::query_scalar::<_, f64>(
                r"
                SELECT price_per_quintal FROM market_prices
                WHERE crop = $1
                ORDER BY id DESC
                LIMIT $2
                ",
            )
            .bind(&crop)
            .bind(TREND_WINDOW)
            .fetch_all(&self.pool)
            .await?;

            if let Some(trend) = MarketTrend::from_recent(crop, &prices) {
                trends.push(trend);
            }
        }

        Ok(trends)
    }

    /// Insert the demo prices that are not present yet; returns the number inserted
    pub async fn seed_demo_prices(&self) -> Result<usize> {
        let mut tx = self.pool.begin().await?;
        let mut inserted = 0;

        for (crop, mandi, price) in DEMO_PRICES {
            let result = sqlx::query(
                r"
                INSERT INTO market_prices (crop, mandi, price_per_quintal)
                SELECT $1, $2, $3
                WHERE NOT EXISTS (
                    SELECT 1 FROM market_prices
                    WHERE crop = $1 AND mandi = $2 AND price_per_quintal = $3
                )
                ",
            )
            .bind(crop)
            .bind(mandi)
            .bind(price)
            .execute(&mut *tx)
            .await?;

            inserted += result.rows_affected() as usize;
        }

        tx.commit().await?;
        tracing::info!("Seeded {} demo market prices", inserted);
        Ok(inserted)
    }
}
