use eventhub_core::{PageRequest, TransactionUid};

use crate::envelope::Envelope;
use crate::error::ApiResult;
use crate::http::{ApiClient, Auth};
use crate::models::{
    CreateTransactionRequest, Transaction, TransactionStatus, UpdateTransactionStatusRequest,
};
use crate::query::Query;
use crate::resource::ResourceClient;

#[derive(Debug, Clone)]
pub struct TransactionService {
    resource: ResourceClient<Transaction, TransactionUid>,
}

impl TransactionService {
    pub fn new(api: ApiClient) -> Self {
        Self {
            resource: ResourceClient::new(api, "/transactions", Auth::Required),
        }
    }

    pub async fn list(
        &self,
        status: Option<TransactionStatus>,
        page: PageRequest,
    ) -> ApiResult<Envelope<Vec<Transaction>>> {
        let query = Query::new().status(status).page(page);
        self.resource.list(&query).await
    }

    pub async fn get(&self, uid: &TransactionUid) -> ApiResult<Envelope<Transaction>> {
        self.resource.get(uid).await
    }

    pub async fn create(
        &self,
        input: &CreateTransactionRequest,
    ) -> ApiResult<Envelope<Transaction>> {
        self.resource.create(input).await
    }

    pub async fn update_status(
        &self,
        uid: &TransactionUid,
        status: TransactionStatus,
    ) -> ApiResult<Envelope<Transaction>> {
        let path = self.resource.path(uid, "/status");
        let body = UpdateTransactionStatusRequest { status };
        self.resource
            .api()
            .put(&path, Some(&body), Auth::Required)
            .await
    }
}
