use std::fmt::Display;

use serde_json::Value;

use super::segment;
use crate::{ApiResource, HttpClient, Method, Params, RequestOptions, Result};

/// Contact endpoints.
#[derive(Debug)]
pub struct Contacts<'a, C> {
    resource: &'a ApiResource<C>,
}

impl<'a, C> Contacts<'a, C> {
    pub(crate) const fn new(resource: &'a ApiResource<C>) -> Self {
        Self { resource }
    }
}

impl<C: HttpClient> Contacts<'_, C> {
    /// Create a contact in `account_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API rejects it.
    pub async fn create(&self, account_id: impl Display, params: &Params) -> Result<Value> {
        let path = format!("/accounts/{}/contacts", segment(account_id));
        self.call(Method::Post, &path, params).await
    }

    /// Retrieve a single contact.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API rejects it.
    pub async fn retrieve(&self, id: impl Display) -> Result<Value> {
        let path = format!("/contacts/{}", segment(id));
        self.call(Method::Get, &path, &Params::new()).await
    }

    /// Update a contact.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API rejects it.
    pub async fn update(&self, id: impl Display, params: &Params) -> Result<Value> {
        let path = format!("/contacts/{}", segment(id));
        self.call(Method::Put, &path, params).await
    }

    /// Delete a contact.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API rejects it.
    pub async fn delete(&self, id: impl Display) -> Result<Value> {
        let path = format!("/contacts/{}", segment(id));
        self.call(Method::Delete, &path, &Params::new()).await
    }

    /// List contacts of `account_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API rejects it.
    pub async fn list(&self, account_id: impl Display, params: &Params) -> Result<Value> {
        let path = format!("/accounts/{}/contacts", segment(account_id));
        self.call(Method::Get, &path, params).await
    }

    async fn call(&self, method: Method, path: &str, params: &Params) -> Result<Value> {
        self.resource
            .request(method, path, params, &RequestOptions::default())
            .await
    }
}
