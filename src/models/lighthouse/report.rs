use crate::models::lighthouse::category::Categories;
use serde::{Deserialize, Serialize};

/// The slice of a `runPagespeed` response body this service reads.
#[derive(Debug, Deserialize, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PageSpeedResponse {
    pub lighthouse_result: Option<LighthouseResult>,
}

#[derive(Debug, Deserialize, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct LighthouseResult {
    pub categories: Option<Categories>,
}
