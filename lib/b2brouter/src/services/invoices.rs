use std::fmt::Display;

use bytes::Bytes;
use serde_json::Value;

use super::{DocumentFormat, segment};
use crate::{ApiResource, HttpClient, Method, Params, RequestOptions, Result};

/// Invoice endpoints.
///
/// Obtained from [`B2BRouterClient::invoices`](crate::B2BRouterClient::invoices).
#[derive(Debug)]
pub struct Invoices<'a, C> {
    resource: &'a ApiResource<C>,
}

impl<'a, C> Invoices<'a, C> {
    pub(crate) const fn new(resource: &'a ApiResource<C>) -> Self {
        Self { resource }
    }
}

impl<C: HttpClient> Invoices<'_, C> {
    /// Create an invoice in `account_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API rejects it.
    pub async fn create(&self, account_id: impl Display, params: &Params) -> Result<Value> {
        let path = format!("/accounts/{}/invoices", segment(account_id));
        self.call(Method::Post, &path, params).await
    }

    /// Retrieve a single invoice.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API rejects it.
    pub async fn retrieve(&self, id: impl Display, params: &Params) -> Result<Value> {
        let path = format!("/invoices/{}", segment(id));
        self.call(Method::Get, &path, params).await
    }

    /// Update an invoice.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API rejects it.
    pub async fn update(&self, id: impl Display, params: &Params) -> Result<Value> {
        let path = format!("/invoices/{}", segment(id));
        self.call(Method::Put, &path, params).await
    }

    /// Delete an invoice.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API rejects it.
    pub async fn delete(&self, id: impl Display) -> Result<Value> {
        let path = format!("/invoices/{}", segment(id));
        self.call(Method::Delete, &path, &Params::new()).await
    }

    /// List invoices of `account_id`; `params` become query filters.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API rejects it.
    pub async fn list(&self, account_id: impl Display, params: &Params) -> Result<Value> {
        let path = format!("/accounts/{}/invoices", segment(account_id));
        self.call(Method::Get, &path, params).await
    }

    /// Send an invoice to its recipient.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API rejects it.
    pub async fn send(&self, id: impl Display) -> Result<Value> {
        let path = format!("/invoices/send_invoice/{}", segment(id));
        self.call(Method::Post, &path, &Params::new()).await
    }

    /// Download an invoice rendered in `format`.
    ///
    /// The format identifier is used both in the path and as `Accept`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API rejects it. A format
    /// the account does not support yields a not-found API error.
    pub async fn download_as(
        &self,
        id: impl Display,
        format: impl Into<DocumentFormat>,
        params: &Params,
    ) -> Result<Bytes> {
        let format = format.into();
        let path = format!("/invoices/{}/as/{}", segment(id), segment(&format));
        self.resource
            .request_binary(
                Method::Get,
                &path,
                format.as_str(),
                params,
                &RequestOptions::default(),
            )
            .await
    }

    /// Download an invoice as PDF.
    ///
    /// # Errors
    ///
    /// See [`Invoices::download_as`].
    pub async fn download_pdf(&self, id: impl Display, params: &Params) -> Result<Bytes> {
        self.download_as(id, DocumentFormat::PdfInvoice, params).await
    }

    async fn call(&self, method: Method, path: &str, params: &Params) -> Result<Value> {
        self.resource
            .request(method, path, params, &RequestOptions::default())
            .await
    }
}
