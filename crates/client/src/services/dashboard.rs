use crate::envelope::Envelope;
use crate::error::ApiResult;
use crate::http::{ApiClient, Auth};
use crate::models::DashboardStats;

#[derive(Debug, Clone)]
pub struct DashboardService {
    api: ApiClient,
}

impl DashboardService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Aggregate counters for the admin dashboard.
    pub async fn stats(&self) -> ApiResult<Envelope<DashboardStats>> {
        self.api.get("/dashboard", None, Auth::Required).await
    }
}
