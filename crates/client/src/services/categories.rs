use serde_json::Value;

use eventhub_core::{CategoryUid, PageRequest};

use crate::envelope::Envelope;
use crate::error::ApiResult;
use crate::http::{ApiClient, Auth};
use crate::models::{Category, CategoryInput};
use crate::query::Query;
use crate::resource::ResourceClient;

/// `/categories`. Reads are public.
#[derive(Debug, Clone)]
pub struct CategoryService {
    resource: ResourceClient<Category, CategoryUid>,
}

impl CategoryService {
    pub fn new(api: ApiClient) -> Self {
        Self {
            resource: ResourceClient::new(api, "/categories", Auth::None),
        }
    }

    pub async fn list(
        &self,
        active: Option<bool>,
        page: PageRequest,
    ) -> ApiResult<Envelope<Vec<Category>>> {
        let query = Query::new().active(active).page(page);
        self.resource.list(&query).await
    }

    pub async fn get(&self, uid: &CategoryUid) -> ApiResult<Envelope<Category>> {
        self.resource.get(uid).await
    }

    pub async fn create(&self, input: &CategoryInput) -> ApiResult<Envelope<Category>> {
        self.resource.create(input).await
    }

    pub async fn update(
        &self,
        uid: &CategoryUid,
        input: &CategoryInput,
    ) -> ApiResult<Envelope<Category>> {
        self.resource.update(uid, input).await
    }

    pub async fn delete(&self, uid: &CategoryUid) -> ApiResult<Envelope<Value>> {
        self.resource.delete(uid).await
    }
}
