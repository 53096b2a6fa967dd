//! `fetch`-backed [`Transport`] via `gloo-net`.

use gloo_net::http::{Method as HttpMethod, RequestBuilder};
use web_sys::{FormData, RequestCredentials, RequestRedirect};

use crate::error::ClientError;
use crate::net::transport::{Body, HttpRequest, HttpResponse, Method, Transport, encode_form};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

fn http_method(method: Method) -> HttpMethod {
    match method {
        Method::Get => HttpMethod::GET,
        Method::Post => HttpMethod::POST,
        Method::Put => HttpMethod::PUT,
        Method::Patch => HttpMethod::PATCH,
        Method::Delete => HttpMethod::DELETE,
    }
}

/// Same-origin `fetch` with session cookies.
pub struct FetchTransport;

#[async_trait::async_trait(?Send)]
impl Transport for FetchTransport {
    type Multipart = FormData;

    async fn send(&self, request: HttpRequest<FormData>) -> Result<HttpResponse, ClientError> {
        let mut builder = RequestBuilder::new(&request.url)
            .method(http_method(request.method))
            .credentials(RequestCredentials::SameOrigin)
            .redirect(RequestRedirect::Follow);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        // Multipart bodies get their boundary header from the browser.
        let built = match request.body {
            Body::Empty => builder.build(),
            Body::Form(fields) => builder.header("content-type", FORM_CONTENT_TYPE).body(encode_form(&fields)),
            Body::Multipart(form_data) => builder.body(form_data),
        }
        .map_err(|e| ClientError::Dom(e.to_string()))?;

        let response = built.send().await.map_err(|e| ClientError::Transport(e.to_string()))?;
        let body = response.text().await.map_err(|e| ClientError::Malformed(e.to_string()))?;
        Ok(HttpResponse {
            status: response.status(),
            redirected: response.redirected(),
            url: response.url(),
            body,
        })
    }
}
