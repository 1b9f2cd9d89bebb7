//! Generic CRUD binding of one base path to the HTTP client core.

use std::marker::PhantomData;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::envelope::Envelope;
use crate::error::ApiResult;
use crate::http::{ApiClient, Auth};
use crate::query::Query;

/// Stateless client for `base`, `base/:uid`.
///
/// `T` is the resource representation, `Id` its typed identifier. Reads use
/// `read_auth`; writes always require auth.
#[derive(Debug)]
pub struct ResourceClient<T, Id> {
    api: ApiClient,
    base: &'static str,
    read_auth: Auth,
    _marker: PhantomData<fn() -> (T, Id)>,
}

impl<T, Id> Clone for ResourceClient<T, Id> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            base: self.base,
            read_auth: self.read_auth,
            _marker: PhantomData,
        }
    }
}

impl<T, Id> ResourceClient<T, Id>
where
    T: DeserializeOwned,
    Id: AsRef<str>,
{
    pub fn new(api: ApiClient, base: &'static str, read_auth: Auth) -> Self {
        Self {
            api,
            base,
            read_auth,
            _marker: PhantomData,
        }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn base(&self) -> &'static str {
        self.base
    }

    /// `base/:uid` followed by `suffix` (which starts with `/` or is empty).
    pub fn path(&self, uid: &Id, suffix: &str) -> String {
        format!("{}/{}{}", self.base, uid.as_ref(), suffix)
    }

    pub async fn list(&self, query: &Query) -> ApiResult<Envelope<Vec<T>>> {
        self.api.get(self.base, Some(query), self.read_auth).await
    }

    pub async fn get(&self, uid: &Id) -> ApiResult<Envelope<T>> {
        self.api.get(&self.path(uid, ""), None, self.read_auth).await
    }

    pub async fn create<B: Serialize + ?Sized>(&self, body: &B) -> ApiResult<Envelope<T>> {
        self.api.post(self.base, Some(body), Auth::Required).await
    }

    pub async fn update<B: Serialize + ?Sized>(&self, uid: &Id, body: &B) -> ApiResult<Envelope<T>> {
        self.api
            .put(&self.path(uid, ""), Some(body), Auth::Required)
            .await
    }

    pub async fn delete(&self, uid: &Id) -> ApiResult<Envelope<Value>> {
        self.api.delete(&self.path(uid, ""), Auth::Required).await
    }
}
