use eventhub_core::{EventUid, PageRequest, TicketUid};

use crate::envelope::Envelope;
use crate::error::ApiResult;
use crate::http::{ApiClient, Auth};
use crate::models::{CreateTicketRequest, Ticket, TicketStatus};
use crate::query::Query;
use crate::resource::ResourceClient;

/// `/tickets`. Every call is authenticated.
#[derive(Debug, Clone)]
pub struct TicketService {
    resource: ResourceClient<Ticket, TicketUid>,
}

impl TicketService {
    pub fn new(api: ApiClient) -> Self {
        Self {
            resource: ResourceClient::new(api, "/tickets", Auth::Required),
        }
    }

    pub async fn list(
        &self,
        event_uid: Option<&EventUid>,
        status: Option<TicketStatus>,
        page: PageRequest,
    ) -> ApiResult<Envelope<Vec<Ticket>>> {
        let query = Query::new()
            .opt("event_uid", event_uid)
            .status(status)
            .page(page);
        self.resource.list(&query).await
    }

    pub async fn get(&self, uid: &TicketUid) -> ApiResult<Envelope<Ticket>> {
        self.resource.get(uid).await
    }

    pub async fn create(&self, input: &CreateTicketRequest) -> ApiResult<Envelope<Ticket>> {
        self.resource.create(input).await
    }

    /// Mark a ticket as used at the venue.
    pub async fn validate(&self, uid: &TicketUid) -> ApiResult<Envelope<Ticket>> {
        let path = self.resource.path(uid, "/validate");
        self.resource
            .api()
            .post::<_, serde_json::Value>(&path, None, Auth::Required)
            .await
    }
}
