//! `/events` endpoints, including free registration and favourites.

use futures::future::join_all;
use serde_json::Value;

use eventhub_core::{CategoryUid, EventUid, PageRequest};

use crate::envelope::Envelope;
use crate::error::ApiResult;
use crate::http::{ApiClient, Auth};
use crate::models::{
    Event, EventInput, EventRegistrations, FavoriteCheck, Registration, RegistrationCheck,
    RegistrationStatus,
};
use crate::query::Query;
use crate::resource::ResourceClient;

/// Filters accepted by `GET /events`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventFilter {
    pub page: PageRequest,
    pub category_uid: Option<CategoryUid>,
    pub search: Option<String>,
    pub active: Option<bool>,
    pub status: Option<String>,
}

impl EventFilter {
    pub fn to_query(&self) -> Query {
        Query::new()
            .page(self.page)
            .opt("category_uid", self.category_uid.as_ref())
            .search(self.search.as_deref())
            .active(self.active)
            .status(self.status.as_deref())
    }
}

#[derive(Debug, Clone)]
pub struct EventService {
    resource: ResourceClient<Event, EventUid>,
}

impl EventService {
    pub fn new(api: ApiClient) -> Self {
        Self {
            resource: ResourceClient::new(api, "/events", Auth::None),
        }
    }

    fn api(&self) -> &ApiClient {
        self.resource.api()
    }

    pub async fn list(&self, filter: &EventFilter) -> ApiResult<Envelope<Vec<Event>>> {
        self.resource.list(&filter.to_query()).await
    }

    pub async fn get(&self, uid: &EventUid) -> ApiResult<Envelope<Event>> {
        self.resource.get(uid).await
    }

    pub async fn create(&self, input: &EventInput) -> ApiResult<Envelope<Event>> {
        self.resource.create(input).await
    }

    pub async fn update(&self, uid: &EventUid, input: &EventInput) -> ApiResult<Envelope<Event>> {
        self.resource.update(uid, input).await
    }

    pub async fn delete(&self, uid: &EventUid) -> ApiResult<Envelope<Value>> {
        self.resource.delete(uid).await
    }

    // Free registration

    pub async fn register_free(&self, uid: &EventUid) -> ApiResult<Envelope<Registration>> {
        let path = self.resource.path(uid, "/register-free");
        self.api().post::<_, Value>(&path, None, Auth::Required).await
    }

    pub async fn cancel_free_registration(&self, uid: &EventUid) -> ApiResult<Envelope<Value>> {
        let path = self.resource.path(uid, "/register-free");
        self.api().delete(&path, Auth::Required).await
    }

    pub async fn check_free_registration(
        &self,
        uid: &EventUid,
    ) -> ApiResult<Envelope<RegistrationCheck>> {
        let path = self.resource.path(uid, "/register-free/check");
        self.api().get(&path, None, Auth::Required).await
    }

    /// Attendees of one event, optionally filtered by registration status.
    pub async fn registrations(
        &self,
        uid: &EventUid,
        status: Option<RegistrationStatus>,
        page: PageRequest,
    ) -> ApiResult<Envelope<EventRegistrations>> {
        let path = self.resource.path(uid, "/registrations");
        let query = Query::new().status(status).page(page);
        self.api().get(&path, Some(&query), Auth::Required).await
    }

    // Favourites

    pub async fn add_favorite(&self, uid: &EventUid) -> ApiResult<Envelope<Value>> {
        let path = self.resource.path(uid, "/favorite");
        self.api().post::<_, Value>(&path, None, Auth::Required).await
    }

    pub async fn remove_favorite(&self, uid: &EventUid) -> ApiResult<Envelope<Value>> {
        let path = self.resource.path(uid, "/favorite");
        self.api().delete(&path, Auth::Required).await
    }

    pub async fn check_favorite(&self, uid: &EventUid) -> ApiResult<Envelope<FavoriteCheck>> {
        let path = self.resource.path(uid, "/favorite/check");
        self.api().get(&path, None, Auth::Required).await
    }

    /// Favourite flags for many events, in input order.
    ///
    /// The checks are read-only and independent, so they run concurrently.
    pub async fn check_favorites(&self, uids: &[EventUid]) -> Vec<(EventUid, ApiResult<bool>)> {
        let checks = uids.iter().map(|uid| async move {
            let favorite = self
                .check_favorite(uid)
                .await
                .and_then(Envelope::into_data)
                .map(|check| check.favorite);
            (uid.clone(), favorite)
        });
        join_all(checks).await
    }
}
