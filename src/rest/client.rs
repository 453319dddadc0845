/// Blocking client for the vCenter tagging REST API (`/rest/com/vmware/cis`).
use std::borrow::Cow;
use std::cell::OnceCell;
use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::{Method, StatusCode, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::errors::{RestError, service_message};
use crate::tags::{Tag, TagService};

/// Header carrying the session token on authenticated requests.
const SESSION_HEADER: &str = "vmware-api-session-id";

const SESSION_PATH: &str = "com/vmware/cis/session";
const TAG_PATH: &str = "com/vmware/cis/tagging/tag";

/// Settings needed to open a session.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the REST endpoint, ending in `/rest/`.
    pub base: Url,
    pub username: Option<String>,
    pub password: Option<String>,
    pub insecure: bool,
    pub timeout: Duration,
}

impl ClientConfig {
    /// Build a config from a user-supplied URL and optional credential overrides.
    ///
    /// Accepts `https://host`, `host`, or `user:pass@host`. A URL without a
    /// path gets `/rest` appended. Explicit credentials win over userinfo.
    ///
    /// # Errors
    ///
    /// Returns `RestError::InvalidUrl` if the URL cannot be parsed.
    pub fn from_url(
        raw: &str,
        username: Option<&str>,
        password: Option<&str>,
        insecure: bool,
        timeout: Duration,
    ) -> Result<Self, RestError> {
        let with_scheme = if raw.contains("://") {
            raw.to_owned()
        } else {
            format!("https://{raw}")
        };
        let mut url =
            Url::parse(&with_scheme).map_err(|_| RestError::InvalidUrl(raw.to_owned()))?;
        if url.cannot_be_a_base() || url.host_str().is_none() {
            return Err(RestError::InvalidUrl(raw.to_owned()));
        }

        let url_user = Some(url.username())
            .filter(|u| !u.is_empty())
            .map(decode_userinfo);
        let url_pass = url.password().map(decode_userinfo);
        // Userinfo must never leak into request URLs or error messages.
        let _ = url.set_username("");
        let _ = url.set_password(None);

        let path = url.path().trim_end_matches('/').to_owned();
        if path.is_empty() {
            url.set_path("/rest/");
        } else {
            url.set_path(&format!("{path}/"));
        }

        Ok(Self {
            base: url,
            username: username.map(str::to_owned).or(url_user),
            password: password.map(str::to_owned).or(url_pass),
            insecure,
            timeout,
        })
    }
}

/// Percent-decode a userinfo component (`%40` -> `@`).
fn decode_userinfo(raw: &str) -> String {
    urlencoding::decode(raw).map_or_else(|_| raw.to_owned(), Cow::into_owned)
}

/// vAPI responses wrap their payload in `{"value": ...}`.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    value: T,
}

/// A client for the tagging service.
///
/// The session is opened on the first request and closed when the client is
/// dropped.
pub struct RestClient {
    http: Client,
    base: Url,
    username: Option<String>,
    password: Option<String>,
    session: OnceCell<String>,
}

impl RestClient {
    /// Build the HTTP client. No request is made until the first lookup.
    ///
    /// # Errors
    ///
    /// Returns `RestError::Http` if the TLS backend cannot be initialized.
    pub fn new(config: &ClientConfig) -> Result<Self, RestError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .danger_accept_invalid_certs(config.insecure)
            .user_agent(concat!("tagctl/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base: config.base.clone(),
            username: config.username.clone(),
            password: config.password.clone(),
            session: OnceCell::new(),
        })
    }

    /// The session token, logging in with basic auth if needed.
    fn session(&self) -> Result<&str, RestError> {
        if let Some(session) = self.session.get() {
            return Ok(session.as_str());
        }

        let username = self
            .username
            .as_deref()
            .ok_or_else(|| RestError::Session("no username configured".to_owned()))?;

        let url = join(&self.base, SESSION_PATH)?;
        let response = self
            .http
            .post(url)
            .basic_auth(username, self.password.as_deref())
            .send()?;
        let session: String = decode(response, None)?;
        if session.is_empty() {
            return Err(RestError::Session(
                "service returned an empty session".to_owned(),
            ));
        }

        Ok(self.session.get_or_init(|| session).as_str())
    }

    fn request(&self, method: Method, url: Url) -> Result<RequestBuilder, RestError> {
        let session = self.session()?;
        Ok(self
            .http
            .request(method, url)
            .header(SESSION_HEADER, session))
    }

    /// IDs of every tag in a category, in service order.
    ///
    /// # Errors
    ///
    /// Returns `RestError::Service` when the category ID is invalid.
    pub fn list_tags_for_category(&self, category_id: &str) -> Result<Vec<String>, RestError> {
        let url = tag_url(&self.base, category_id)?;
        let response = self
            .request(Method::POST, url)?
            .query(&[("~action", "list-tags-for-category")])
            .send()?;
        decode(response, None)
    }

    fn logout(&self) -> Result<(), RestError> {
        let url = join(&self.base, SESSION_PATH)?;
        let response = self.request(Method::DELETE, url)?.send()?;
        check(response, None).map(drop)
    }
}

impl TagService for RestClient {
    fn get_tag(&self, id: &str) -> Result<Tag, RestError> {
        let url = tag_url(&self.base, id)?;
        let response = self.request(Method::GET, url)?.send()?;
        decode(response, Some(id))
    }

    fn get_tags_by_name_for_category(
        &self,
        name: &str,
        category_id: &str,
    ) -> Result<Vec<Tag>, RestError> {
        let mut tags = Vec::new();
        for id in self.list_tags_for_category(category_id)? {
            let tag = self.get_tag(&id)?;
            if tag.name == name {
                tags.push(tag);
            }
        }
        Ok(tags)
    }
}

impl Drop for RestClient {
    fn drop(&mut self) {
        // Sessions expire server-side anyway; a failed logout is not worth reporting.
        if self.session.get().is_some() {
            let _ = self.logout();
        }
    }
}

fn join(base: &Url, path: &str) -> Result<Url, RestError> {
    base.join(path)
        .map_err(|_| RestError::InvalidUrl(format!("{base}{path}")))
}

/// `{base}/com/vmware/cis/tagging/tag/id:{id}`, with `id` percent-encoded as a
/// single path segment.
fn tag_url(base: &Url, id: &str) -> Result<Url, RestError> {
    let mut url = join(base, TAG_PATH)?;
    url.path_segments_mut()
        .map_err(|()| RestError::InvalidUrl(base.to_string()))?
        .push(&format!("id:{id}"));
    Ok(url)
}

/// Map a non-success status to `RestError`. `not_found` names the tag ID a 404
/// refers to, if any.
fn check(response: Response, not_found: Option<&str>) -> Result<Response, RestError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == StatusCode::NOT_FOUND {
        if let Some(id) = not_found {
            return Err(RestError::NotFound { id: id.to_owned() });
        }
    }

    let fallback = status.to_string();
    let body = response.text().unwrap_or_default();
    Err(RestError::Service {
        status: status.as_u16(),
        message: service_message(&body, &fallback),
    })
}

fn decode<T: DeserializeOwned>(response: Response, not_found: Option<&str>) -> Result<T, RestError> {
    let envelope: Envelope<T> = check(response, not_found)?.json()?;
    Ok(envelope.value)
}
