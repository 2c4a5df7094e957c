//! The transport seam.

use std::sync::Arc;

use async_trait::async_trait;

use crate::element::Element;
use crate::error::Result;

/// Sends named admin operations to the directory service.
///
/// The request element's name is the operation name (`GetAccountRequest`,
/// `ModifyAccountRequest`, ...); implementations wrap it in whatever session
/// and transport context they manage and hand back the parsed response body
/// element. A SOAP fault surfaces as [`crate::Error::Fault`], which read
/// paths can classify with [`crate::Error::is_not_found`].
#[async_trait]
pub trait SoapInvoker: Send + Sync {
    /// Performs one request/response round trip.
    ///
    /// # Errors
    ///
    /// Returns an error if the transport fails, the response cannot be
    /// parsed, or the server answers with a fault.
    async fn invoke(&self, request: Element) -> Result<Element>;
}

#[async_trait]
impl<T: SoapInvoker + ?Sized> SoapInvoker for Arc<T> {
    async fn invoke(&self, request: Element) -> Result<Element> {
        self.as_ref().invoke(request).await
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::redundant_clone,
    clippy::manual_string_new,
    clippy::needless_collect,
    clippy::unreadable_literal,
    clippy::used_underscore_items,
    clippy::similar_names
)]
mod tests {
    use super::*;

    /// Invoker answering every operation with its response counterpart.
    struct Echo;

    #[async_trait]
    impl SoapInvoker for Echo {
        async fn invoke(&self, request: Element) -> Result<Element> {
            Ok(Element::new(request.name().replace("Request", "Response")))
        }
    }

    async fn invoke_through<I: SoapInvoker>(invoker: &I) -> Result<Element> {
        invoker.invoke(Element::new("GetAccountRequest")).await
    }

    #[tokio::test]
    async fn test_arc_forwards_to_the_inner_invoker() {
        let invoker = Arc::new(Echo);
        let response = invoke_through(&invoker).await.unwrap();
        assert_eq!(response.name(), "GetAccountResponse");
    }

    #[tokio::test]
    async fn test_arc_of_trait_object_dispatches() {
        let invoker: Arc<dyn SoapInvoker> = Arc::new(Echo);
        let response = invoker
            .invoke(Element::new("DeleteAccountRequest"))
            .await
            .unwrap();
        assert_eq!(response.name(), "DeleteAccountResponse");
    }
}
