//! Food gateway — best-effort text search against OpenFoodFacts.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::GatewayError;

const OPENFOODFACTS_URL: &str = "https://world.openfoodfacts.org/cgi/search.pl";

/// First-match nutrition info for a food query.
#[derive(Debug, Clone, PartialEq)]
pub struct FoodInfo {
    pub name: String,
    pub calories_per_100g: f64,
}

/// Source of per-100g nutrition data for a free-text food query.
#[async_trait]
pub trait FoodGateway: Send + Sync {
    /// First search hit for the query. Empty results map to
    /// [`GatewayError::NotFound`]; network failures to
    /// [`GatewayError::Unavailable`]. Either way the flow aborts with a
    /// user-facing message rather than a fault.
    async fn fetch_food_info(&self, query: &str) -> Result<FoodInfo, GatewayError>;
}

/// OpenFoodFacts search client.
pub struct OpenFoodFactsGateway {
    base_url: String,
    timeout: Duration,
    client: reqwest::Client,
}

impl OpenFoodFactsGateway {
    pub fn new(timeout: Duration) -> Self {
        Self {
            base_url: OPENFOODFACTS_URL.to_string(),
            timeout,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl FoodGateway for OpenFoodFactsGateway {
    async fn fetch_food_info(&self, query: &str) -> Result<FoodInfo, GatewayError> {
        let resp = self
            .client
            .get(&self.base_url)
            .timeout(self.timeout)
            .query(&[
                ("search_terms", query),
                ("search_simple", "1"),
                ("action", "process"),
                ("fields", "product_name,nutriments"),
                ("json", "1"),
                ("page_size", "1"),
            ])
            .send()
            .await
            .map_err(|e| GatewayError::unavailable("food", e))?;

        if !resp.status().is_success() {
            return Err(GatewayError::not_found(query));
        }

        let data: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| GatewayError::unavailable("food", e))?;

        parse_food(&data).ok_or_else(|| GatewayError::not_found(query))
    }
}

/// Extract the first product's name and per-100g energy from a search
/// response. A hit without an energy field counts as 0 kcal.
fn parse_food(data: &serde_json::Value) -> Option<FoodInfo> {
    let product = data.get("products")?.as_array()?.first()?;
    let name = product
        .get("product_name")
        .and_then(|n| n.as_str())
        .filter(|n| !n.is_empty())
        .unwrap_or("unknown")
        .to_string();
    let calories_per_100g = product
        .get("nutriments")
        .and_then(|n| n.get("energy-kcal_100g"))
        .and_then(|c| c.as_f64())
        .unwrap_or(0.0);
    Some(FoodInfo {
        name,
        calories_per_100g,
    })
}
