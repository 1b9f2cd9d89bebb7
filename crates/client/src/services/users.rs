//! `/users` administration endpoints.

use eventhub_core::{PageRequest, UserUid};

use crate::envelope::Envelope;
use crate::error::ApiResult;
use crate::http::{ApiClient, Auth};
use crate::models::{UpdateUserRequest, UpdateUserStatusRequest, User, UserStatus};
use crate::query::Query;
use crate::resource::ResourceClient;

#[derive(Debug, Clone)]
pub struct UserService {
    resource: ResourceClient<User, UserUid>,
}

impl UserService {
    pub fn new(api: ApiClient) -> Self {
        Self {
            resource: ResourceClient::new(api, "/users", Auth::Required),
        }
    }

    pub async fn list(
        &self,
        status: Option<UserStatus>,
        search: Option<&str>,
        page: PageRequest,
    ) -> ApiResult<Envelope<Vec<User>>> {
        let query = Query::new().status(status).search(search).page(page);
        self.resource.list(&query).await
    }

    pub async fn get(&self, uid: &UserUid) -> ApiResult<Envelope<User>> {
        self.resource.get(uid).await
    }

    pub async fn update(&self, uid: &UserUid, input: &UpdateUserRequest) -> ApiResult<Envelope<User>> {
        self.resource.update(uid, input).await
    }

    pub async fn disable(&self, uid: &UserUid) -> ApiResult<Envelope<User>> {
        self.toggle(uid, "/disable").await
    }

    pub async fn enable(&self, uid: &UserUid) -> ApiResult<Envelope<User>> {
        self.toggle(uid, "/enable").await
    }

    async fn toggle(&self, uid: &UserUid, suffix: &str) -> ApiResult<Envelope<User>> {
        let path = self.resource.path(uid, suffix);
        self.resource
            .api()
            .post::<_, serde_json::Value>(&path, None, Auth::Required)
            .await
    }

    pub async fn set_status(&self, uid: &UserUid, status: UserStatus) -> ApiResult<Envelope<User>> {
        let path = self.resource.path(uid, "/status");
        let body = UpdateUserStatusRequest { status };
        self.resource
            .api()
            .patch(&path, Some(&body), Auth::Required)
            .await
    }
}
