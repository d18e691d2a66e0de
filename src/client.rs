//! Fakemailgenerator async client implementation.
//!
//! This module provides an async [`Client`] and [`ClientBuilder`] for the
//! fakemailgenerator.com disposable email site.
//!
//! Typical flow:
//! 1) Build a client (`Client::new` or `Client::builder().build()`)
//! 2) Create an address via [`Client::generate_email`]
//! 3) Either poll once via [`Client::get_mail`], or run the repeating
//!    [`Client::watch`] loop with a cancellation token

use crate::parse;
use crate::{Error, Inbox, Message, Result};
use rand::distributions::Alphanumeric;
use rand::Rng;
use reqwest::Url;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

const BASE_URL: &str = "http://www.fakemailgenerator.com/";
const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_millis(5000);

/// Async client for the fakemailgenerator.com disposable email site.
///
/// The site has no API; every operation fetches an HTML page and scrapes it.
/// A `Client` is cheap to clone at the `reqwest` level (internally shared
/// connection pool), and this type is `Clone`. Independent watch sessions may
/// run concurrently from clones as long as each owns its own [`Inbox`].
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: String,
    name: Option<String>,
    refresh_interval: Duration,
}

impl Client {
    /// Create a [`ClientBuilder`] for configuring a new client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Create a new client using default settings.
    ///
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new() -> Result<Self> {
        ClientBuilder::new().build()
    }

    /// Fetch the list of domain suffixes currently offered by the site.
    ///
    /// Every call re-fetches the front page; nothing is cached. Each returned
    /// entry carries its leading `@` as rendered by the site. A page without
    /// the expected dropdown markup produces an empty list rather than an
    /// error; callers treat an empty catalog as fatal where it matters
    /// ([`Client::generate_email`]).
    ///
    /// # Errors
    /// Returns [`Error::Network`] if the site is unreachable or responds with
    /// a non-success status.
    pub async fn fetch_domains(&self) -> Result<Vec<String>> {
        let page = self.fetch_page(&self.base_url).await?;
        Ok(parse::domain_list(&page))
    }

    /// Generate a disposable email address.
    ///
    /// The local part is the configured `name` when one was set on the
    /// builder, otherwise a random lowercase alphanumeric string whose length
    /// is drawn uniformly from 5 to 25. The domain suffix is chosen uniformly
    /// at random from a fresh catalog fetch. The suffix already carries its
    /// `@`, so the two halves are joined with no extra separator.
    ///
    /// Logs the generated address at info level.
    ///
    /// # Errors
    /// Returns [`Error::Network`] if the catalog fetch fails and
    /// [`Error::NoDomains`] if the catalog is empty.
    ///
    /// # Examples
    /// ```no_run
    /// # use fakemailgen_client::Client;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), fakemailgen_client::Error> {
    /// let client = Client::builder().name("myalias").build()?;
    /// let email = client.generate_email().await?;
    /// println!("{email}");
    /// # Ok(())
    /// # }
    /// ```
    pub async fn generate_email(&self) -> Result<String> {
        let domains = self.fetch_domains().await?;
        if domains.is_empty() {
            return Err(Error::NoDomains);
        }

        let local = match &self.name {
            Some(name) if !name.is_empty() => name.clone(),
            _ => random_local_part(),
        };
        let domain = &domains[rand::thread_rng().gen_range(0..domains.len())];

        let email = format!("{local}{domain}");
        info!("your email: {email}");
        Ok(email)
    }

    /// Run one extraction pass over the inbox page for `email`.
    ///
    /// Fetches the inbox page, scrapes each list entry into a [`Message`],
    /// fetches each entry's body frame sequentially in entry order, and
    /// appends every record whose fingerprint is not already in `inbox`.
    /// Returns only the newly accepted records, in page order.
    ///
    /// An entry without a frame reference ends the pass at that entry; the
    /// frameless entry and everything after it are dropped without an error
    /// (see [`Message::fingerprint`] for what deduplication keys on).
    ///
    /// # Errors
    /// Returns [`Error::Network`] if the inbox page or any frame page fails
    /// to fetch, and [`Error::Parse`] if `email` has no `@`.
    pub async fn get_mail(&self, email: &str, inbox: &mut Inbox) -> Result<Vec<Message>> {
        let url = self.inbox_url(email)?;
        let page = self.fetch_page(&url).await?;
        let entries = parse::inbox_entries(&page);

        let mut accepted = Vec::new();
        for entry in entries {
            let frame_url = self.resolve_frame_url(&entry.frame_src)?;
            let body = parse::frame_body(&self.fetch_page(frame_url.as_str()).await?);

            let message = Message {
                to: entry.to,
                from: entry.from,
                subject: entry.subject,
                received: entry.received,
                expires: entry.expires,
                body,
                display_time: entry.display_time,
            };
            if inbox.push(message.clone()) {
                accepted.push(message);
            }
        }
        Ok(accepted)
    }

    /// Watch the inbox for `email`, polling until cancelled.
    ///
    /// Each cycle re-fetches the domain catalog and verifies the address's
    /// suffix is still offered, runs one [`Client::get_mail`] pass against
    /// `inbox`, then sleeps for the configured refresh interval. The catalog
    /// check runs every cycle, so a session fails mid-flight if the site
    /// stops offering that domain.
    ///
    /// The sleep is the only interruption point: a pass already in flight
    /// runs to completion before cancellation takes effect. Cancellation
    /// returns `Ok(())`; collected messages remain available through `inbox`.
    ///
    /// # Errors
    /// Any failure terminates the loop: [`Error::UnsupportedDomain`] when the
    /// suffix disappears from the catalog, [`Error::Network`] /
    /// [`Error::Parse`] from the cycle's fetches. Failed cycles are not
    /// retried.
    ///
    /// # Examples
    /// ```no_run
    /// # use fakemailgen_client::{Client, Inbox};
    /// # use tokio_util::sync::CancellationToken;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), fakemailgen_client::Error> {
    /// let client = Client::new()?;
    /// let email = client.generate_email().await?;
    ///
    /// let mut inbox = Inbox::new();
    /// let cancel = CancellationToken::new();
    /// let stop = cancel.clone();
    /// tokio::spawn(async move {
    ///     tokio::time::sleep(std::time::Duration::from_secs(120)).await;
    ///     stop.cancel();
    /// });
    ///
    /// client.watch(&email, &mut inbox, cancel).await?;
    /// println!("collected {} message(s)", inbox.len());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn watch(
        &self,
        email: &str,
        inbox: &mut Inbox,
        cancel: CancellationToken,
    ) -> Result<()> {
        let (_, domain) = split_address(email)?;
        let suffix = format!("@{domain}");

        loop {
            if cancel.is_cancelled() {
                return Ok(());
            }

            let domains = self.fetch_domains().await?;
            if !domains.iter().any(|offered| offered == &suffix) {
                return Err(Error::UnsupportedDomain {
                    domain: domain.to_string(),
                });
            }

            let accepted = self.get_mail(email, inbox).await?;
            debug!(new = accepted.len(), total = inbox.len(), "poll cycle complete");

            tokio::select! {
                _ = cancel.cancelled() => return Ok(()),
                _ = tokio::time::sleep(self.refresh_interval) => {}
            }
        }
    }

    async fn fetch_page(&self, url: &str) -> Result<String> {
        let response = self.http.get(url).send().await?;
        let body = response.error_for_status()?.text().await?;
        Ok(body)
    }

    fn inbox_url(&self, email: &str) -> Result<String> {
        let (local, domain) = split_address(email)?;
        Ok(format!(
            "{}/inbox/{}/{}",
            self.base_url.trim_end_matches('/'),
            domain,
            local
        ))
    }

    /// Frame references on the live site are protocol-relative or absolute;
    /// fixtures use root-relative paths. All three resolve against the base.
    fn resolve_frame_url(&self, src: &str) -> Result<Url> {
        let base = Url::parse(&self.base_url).map_err(|err| Error::Parse {
            msg: format!("invalid base URL {}: {err}", self.base_url),
        })?;
        base.join(src).map_err(|err| Error::Parse {
            msg: format!("invalid frame reference {src}: {err}"),
        })
    }
}

/// Split a full address into local part and domain (without the `@`).
fn split_address(email: &str) -> Result<(&str, &str)> {
    email.split_once('@').ok_or_else(|| Error::Parse {
        msg: format!("email address without '@': {email}"),
    })
}

/// Random lowercase alphanumeric local part, length uniform in [5, 25].
fn random_local_part() -> String {
    let mut rng = rand::thread_rng();
    let len = rng.gen_range(5..=25);
    (&mut rng)
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(|byte| char::from(byte).to_ascii_lowercase())
        .collect()
}

/// Builder for configuring a fakemailgenerator [`Client`].
///
/// # Defaults
/// - Random local part per [`Client::generate_email`] call (no fixed name)
/// - 5000 ms refresh interval
/// - The live fakemailgenerator.com base URL
/// - Reqwest default timeout
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    name: Option<String>,
    base_url: String,
    refresh_interval: Duration,
    timeout: Option<Duration>,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            name: None,
            base_url: BASE_URL.to_string(),
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
            timeout: None,
        }
    }

    /// Fix the local part used by [`Client::generate_email`].
    ///
    /// An empty string behaves as if no name was set: a random local part is
    /// synthesized per call.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Override the site base URL. Primarily useful for testing.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the delay between poll cycles of [`Client::watch`]
    /// (default 5000 ms).
    pub fn refresh_interval(mut self, interval: Duration) -> Self {
        self.refresh_interval = interval;
        self
    }

    /// Set a request timeout applied to all fetches.
    ///
    /// Defaults to reqwest's built-in timeout when not specified.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the [`Client`].
    ///
    /// Unlike services that hand out a session token, fakemailgenerator needs
    /// no bootstrap request; construction is purely local.
    ///
    /// # Errors
    /// Returns an error if the underlying `reqwest::Client` cannot be
    /// constructed.
    pub fn build(self) -> Result<Client> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        Ok(Client {
            http,
            base_url: self.base_url,
            name: self.name,
            refresh_interval: self.refresh_interval,
        })
    }
}
