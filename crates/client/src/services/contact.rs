//! Public contact form and its admin inbox.

use eventhub_core::{MessageUid, PageRequest};

use crate::envelope::Envelope;
use crate::error::ApiResult;
use crate::http::{ApiClient, Auth};
use crate::models::{ContactMessage, ContactRequest, ReplyRequest};
use crate::query::Query;
use crate::resource::ResourceClient;

#[derive(Debug, Clone)]
pub struct ContactService {
    resource: ResourceClient<ContactMessage, MessageUid>,
}

impl ContactService {
    pub fn new(api: ApiClient) -> Self {
        Self {
            resource: ResourceClient::new(api, "/contact", Auth::Required),
        }
    }

    /// Anonymous submission; never carries the stored token.
    pub async fn submit(&self, request: &ContactRequest) -> ApiResult<Envelope<ContactMessage>> {
        self.resource
            .api()
            .post(self.resource.base(), Some(request), Auth::None)
            .await
    }

    pub async fn list(&self, page: PageRequest) -> ApiResult<Envelope<Vec<ContactMessage>>> {
        self.resource.list(&Query::from(page)).await
    }

    pub async fn mark_read(&self, uid: &MessageUid) -> ApiResult<Envelope<ContactMessage>> {
        let path = self.resource.path(uid, "/read");
        self.resource
            .api()
            .patch::<_, serde_json::Value>(&path, None, Auth::Required)
            .await
    }

    pub async fn reply(
        &self,
        uid: &MessageUid,
        reply_message: impl Into<String>,
    ) -> ApiResult<Envelope<ContactMessage>> {
        let path = self.resource.path(uid, "/reply");
        let body = ReplyRequest {
            reply_message: reply_message.into(),
        };
        self.resource
            .api()
            .post(&path, Some(&body), Auth::Required)
            .await
    }
}
