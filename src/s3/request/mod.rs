use anyhow::Result;
use bytes::Bytes;
use reqwest::{
    Body, Client, Method, Response,
    header::{CONTENT_LENGTH, HeaderMap, HeaderName, HeaderValue},
};
use std::{collections::BTreeMap, path::Path, time::Duration};
use tokio::fs::File;
use tokio_util::codec::{BytesCodec, FramedRead};
use url::Url;

static APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

fn client() -> Result<Client> {
    Ok(Client::builder()
        .user_agent(APP_USER_AGENT)
        .connect_timeout(Duration::from_secs(30))
        .build()?)
}

fn header_map(headers: &BTreeMap<String, String>) -> Result<HeaderMap> {
    headers
        .iter()
        .map(|(k, v)| Ok((k.parse::<HeaderName>()?, v.parse::<HeaderValue>()?)))
        .collect::<Result<HeaderMap>>()
}

/// Send a request without a body
///
/// # Errors
///
/// Will return `Err` if can not make the request
pub async fn request(
    url: Url,
    method: Method,
    headers: &BTreeMap<String, String>,
) -> Result<Response> {
    let headers = header_map(headers)?;

    log::debug!("{method} {url}");

    Ok(client()?
        .request(method, url)
        .headers(headers)
        .send()
        .await?)
}

/// Send a request with an in memory body (XML configuration documents)
///
/// # Errors
///
/// Will return `Err` if can not make the request
pub async fn request_body(
    url: Url,
    method: Method,
    headers: &BTreeMap<String, String>,
    body: Bytes,
) -> Result<Response> {
    let headers = header_map(headers)?;

    log::debug!("{method} {url} ({} bytes)", body.len());

    Ok(client()?
        .request(method, url)
        .headers(headers)
        .body(body)
        .send()
        .await?)
}

/// Stream a file as the request body
///
/// # Errors
///
/// Will return `Err` if can not make the request
pub async fn upload(
    url: Url,
    method: Method,
    headers: &BTreeMap<String, String>,
    file: &Path,
    length: u64,
) -> Result<Response> {
    let mut headers = header_map(headers)?;
    headers.insert(CONTENT_LENGTH, HeaderValue::from(length));

    let file = File::open(file).await?;
    let stream = FramedRead::new(file, BytesCodec::new());
    let body = Body::wrap_stream(stream);

    log::debug!("{method} {url} ({length} bytes)");

    Ok(client()?
        .request(method, url)
        .headers(headers)
        .body(body)
        .send()
        .await?)
}
