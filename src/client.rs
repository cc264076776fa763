//! mail.gw async client implementation.

use crate::models::{MEMBER_KEY, TokenResponse};
use crate::{Account, Domain, Error, MessageDetail, MessageSummary, Outcome, Result, Session};
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;

/// Async client for the mail.gw temporary email service.
///
/// The client owns the credentials it registers and the session token it
/// obtains, so the calls must happen in order: [`Client::create_account`],
/// then [`Client::login`], then any number of [`Client::list_messages`] and
/// [`Client::fetch_message`] calls.
#[derive(Debug)]
pub struct Client {
    http: reqwest::Client,
    base_url: Url,
    proxy: Option<String>,
    user_agent: HeaderValue,
    account: Option<Account>,
    session: Option<Session>,
}

impl Client {
    /// Create a builder for configuring the client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Create a client pointed at the public mail.gw API.
    ///
    /// No request is made until the first operation.
    ///
    /// # Examples
    /// ```no_run
    /// # use mailgw_client::Client;
    /// let client = Client::new()?;
    /// # Ok::<(), mailgw_client::Error>(())
    /// ```
    pub fn new() -> Result<Self> {
        ClientBuilder::new().build()
    }

    /// Get the proxy URL if one was configured.
    pub fn proxy(&self) -> Option<&str> {
        self.proxy.as_deref()
    }

    /// The API root every endpoint is resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Credentials registered by [`Client::create_account`], if any.
    pub fn account(&self) -> Option<&Account> {
        self.account.as_ref()
    }

    /// Session obtained by [`Client::login`], if any.
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.session.is_some()
    }

    /// Return the first domain the service currently offers.
    ///
    /// Any failure, including an empty listing, is reported as
    /// [`Error::NoDomain`]; the underlying cause is logged.
    pub async fn discover_domain(&self) -> Result<String> {
        match self.list_domains().await {
            Ok(domains) => domains
                .into_iter()
                .next()
                .map(|d| d.domain)
                .ok_or(Error::NoDomain),
            Err(err) => {
                tracing::warn!(error = %err, "domain discovery failed");
                Err(Error::NoDomain)
            }
        }
    }

    /// Register a fresh account with random credentials.
    ///
    /// Discovers a domain first. Only `201 Created` counts as success; on any
    /// other outcome the client keeps no account and [`Client::login`] will
    /// refuse to run.
    ///
    /// # Examples
    /// ```no_run
    /// # use mailgw_client::Client;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), mailgw_client::Error> {
    /// let mut client = Client::new()?;
    /// let account = client.create_account().await?;
    /// println!("{}", account.address);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create_account(&mut self) -> Result<Account> {
        let domain = self.discover_domain().await?;
        let account = Account::generate(&domain, &mut rand::rng());

        let response = self
            .http
            .post(self.endpoint(&["accounts"])?)
            .headers(self.headers())
            .json(&account)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::CREATED {
            tracing::warn!(%status, "account creation rejected");
            return Err(Error::Status(status));
        }

        tracing::info!(address = %account.address, "account created");
        self.account = Some(account.clone());
        Ok(account)
    }

    /// Exchange the stored credentials for a bearer token.
    ///
    /// Fails with [`Error::NoAccount`] without touching the network when no
    /// account has been created.
    pub async fn login(&mut self) -> Result<()> {
        let account = self.account.as_ref().ok_or(Error::NoAccount)?;

        let response = self
            .http
            .post(self.endpoint(&["token"])?)
            .headers(self.headers())
            .json(account)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            tracing::warn!(%status, "login rejected");
            return Err(Error::Status(status));
        }

        let body: TokenResponse = response.json().await?;
        let token = body
            .token
            .filter(|t| !t.is_empty())
            .ok_or(Error::ResponseParse("token"))?;

        tracing::info!("logged in");
        self.session = Some(Session { token });
        Ok(())
    }

    /// List the first page of the inbox.
    ///
    /// Returns [`Outcome::Empty`] for an empty inbox and
    /// [`Outcome::Failed`] for anything other than `200 OK`. Without a session
    /// this returns [`Error::NotLoggedIn`] and sends nothing.
    ///
    /// # Examples
    /// ```no_run
    /// # use mailgw_client::Client;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), mailgw_client::Error> {
    /// let mut client = Client::new()?;
    /// client.create_account().await?;
    /// client.login().await?;
    /// for msg in client.list_messages().await.found().unwrap_or_default() {
    ///     println!("{}: {}", msg.id, msg.from.address);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn list_messages(&self) -> Outcome<Vec<MessageSummary>> {
        let Some(session) = &self.session else {
            return Outcome::Failed(Error::NotLoggedIn);
        };
        self.try_list_messages(session).await.into()
    }

    async fn try_list_messages(&self, session: &Session) -> Result<Outcome<Vec<MessageSummary>>> {
        let response = self.get_authorized(session, &["messages"]).await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(Error::Status(status));
        }

        let body: serde_json::Value = response.json().await?;
        let messages: Vec<MessageSummary> = Self::members(&body);
        tracing::debug!(count = messages.len(), "listed messages");

        if messages.is_empty() {
            Ok(Outcome::Empty)
        } else {
            Ok(Outcome::Found(messages))
        }
    }

    /// Fetch the full content of one message.
    ///
    /// The id is passed to the server as-is; the server decides whether this
    /// session may see it. Any status other than `200 OK` is
    /// [`Outcome::Empty`].
    pub async fn fetch_message(&self, id: &str) -> Outcome<MessageDetail> {
        let Some(session) = &self.session else {
            return Outcome::Failed(Error::NotLoggedIn);
        };
        self.try_fetch_message(session, id).await.into()
    }

    async fn try_fetch_message(&self, session: &Session, id: &str) -> Result<Outcome<MessageDetail>> {
        let response = self.get_authorized(session, &["messages", id]).await?;

        let status = response.status();
        if status != StatusCode::OK {
            tracing::debug!(%status, id, "message not available");
            return Ok(Outcome::Empty);
        }

        Ok(Outcome::Found(response.json().await?))
    }

    async fn list_domains(&self) -> Result<Vec<Domain>> {
        let body: serde_json::Value = self
            .http
            .get(self.endpoint(&["domains"])?)
            .headers(self.headers())
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(Self::members(&body))
    }

    async fn get_authorized(&self, session: &Session, segments: &[&str]) -> Result<reqwest::Response> {
        self.http
            .get(self.endpoint(segments)?)
            .headers(self.headers())
            .bearer_auth(session.token())
            .send()
            .await
            .map_err(Into::into)
    }

    /// Decode the member collection, skipping entries of the wrong shape.
    fn members<T: DeserializeOwned>(body: &serde_json::Value) -> Vec<T> {
        body.get(MEMBER_KEY)
            .and_then(|v| v.as_array())
            .map(|arr| {
                arr.iter()
                    .filter_map(|v| serde_json::from_value::<T>(v.clone()).ok())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Resolve path segments against the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| Error::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Build headers for API requests.
    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/ld+json"));
        headers.insert(USER_AGENT, self.user_agent.clone());
        headers
    }
}

/// Public mail.gw API root.
pub const DEFAULT_BASE_URL: &str = "https://api.mail.gw";
const USER_AGENT_VALUE: &str = concat!("mailgw-client/", env!("CARGO_PKG_VERSION"));

/// Builder for configuring a mail.gw client.
///
/// Start with [`Client::builder`] to override defaults.
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    proxy: Option<String>,
    danger_accept_invalid_certs: bool,
    user_agent: String,
    base_url: String,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientBuilder {
    /// Create a new builder with default settings.
    ///
    /// Defaults:
    /// - No proxy
    /// - `danger_accept_invalid_certs = false`
    /// - `mailgw-client/<version>` user agent
    /// - [`DEFAULT_BASE_URL`]
    pub fn new() -> Self {
        Self {
            proxy: None,
            danger_accept_invalid_certs: false,
            user_agent: USER_AGENT_VALUE.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Set a proxy URL (e.g., "socks5://127.0.0.1:9050").
    ///
    /// This uses reqwest's proxy support for all requests.
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Control whether to accept invalid TLS certificates (default: false).
    pub fn danger_accept_invalid_certs(mut self, value: bool) -> Self {
        self.danger_accept_invalid_certs = value;
        self
    }

    /// Override the default user agent string.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Override the API root.
    ///
    /// Useful for testing against a stub server.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Build the client.
    ///
    /// # Examples
    /// ```no_run
    /// # use mailgw_client::Client;
    /// let client = Client::builder()
    ///     .user_agent("my-app/1.0")
    ///     .build()?;
    /// # Ok::<(), mailgw_client::Error>(())
    /// ```
    pub fn build(self) -> Result<Client> {
        let base_url = Url::parse(&self.base_url)
            .ok()
            .filter(|url| !url.cannot_be_a_base())
            .ok_or_else(|| Error::InvalidBaseUrl(self.base_url.clone()))?;

        let user_agent = HeaderValue::from_str(&self.user_agent)
            .map_err(|_| Error::InvalidUserAgent(self.user_agent.clone()))?;

        let mut builder =
            reqwest::Client::builder().danger_accept_invalid_certs(self.danger_accept_invalid_certs);

        if let Some(proxy_url) = &self.proxy {
            builder = builder.proxy(reqwest::Proxy::all(proxy_url)?);
        }

        let http = builder.build()?;

        Ok(Client {
            http,
            base_url,
            proxy: self.proxy,
            user_agent,
            account: None,
            session: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_appends_segments() {
        let client = Client::builder()
            .base_url("http://localhost:8080/api/")
            .build()
            .unwrap();
        let url = client.endpoint(&["messages", "a/b c"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/messages/a%2Fb%20c");
    }

    #[test]
    fn rejects_unusable_base_url() {
        let err = Client::builder().base_url("mailto:x@y").build().unwrap_err();
        assert!(matches!(err, Error::InvalidBaseUrl(_)));

        let err = Client::builder().base_url("not a url").build().unwrap_err();
        assert!(matches!(err, Error::InvalidBaseUrl(_)));
    }

    #[test]
    fn rejects_user_agent_that_is_not_a_header_value() {
        let err = Client::builder()
            .user_agent("my-app/1.0\r\nX-Injected: 1")
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidUserAgent(_)));
    }

    #[test]
    fn custom_user_agent_is_sent() {
        let client = Client::builder().user_agent("my-app/1.0").build().unwrap();
        assert_eq!(client.headers()[USER_AGENT], "my-app/1.0");
    }

    #[test]
    fn members_skips_malformed_entries() {
        let body = serde_json::json!({
            "hydra:member": [
                { "domain": "one.test" },
                { "unexpected": true },
                { "domain": "two.test" }
            ]
        });
        let domains: Vec<Domain> = Client::members(&body);
        let names: Vec<_> = domains.into_iter().map(|d| d.domain).collect();
        assert_eq!(names, ["one.test", "two.test"]);
    }

    #[test]
    fn members_of_missing_key_is_empty() {
        let domains: Vec<Domain> = Client::members(&serde_json::json!({}));
        assert!(domains.is_empty());
    }

    #[test]
    fn fresh_client_has_no_state() {
        let client = Client::new().unwrap();
        assert!(client.account().is_none());
        assert!(!client.is_logged_in());
        assert_eq!(client.base_url().as_str(), "https://api.mail.gw/");
    }
}
