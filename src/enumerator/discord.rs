//! Discord REST enumerator

use async_trait::async_trait;
use serde::Deserialize;
use url::Url;

use crate::error::{Error, Result};
use crate::types::{Emoji, EmojiInventory, GuildEmojis};

use super::EmojiEnumerator;

const DEFAULT_API_BASE: &str = "https://discord.com/api/v10";
const DEFAULT_CDN_BASE: &str = "https://cdn.discordapp.com";

/// Identity returned by the authentication handshake
#[derive(Clone, Debug, Deserialize)]
struct CurrentUser {
    id: String,
    username: String,
}

/// One guild as returned by the guild listing endpoint
#[derive(Clone, Debug, Deserialize)]
struct GuildRecord {
    id: String,
    name: String,
}

/// One emoji as returned by the per-guild emoji endpoint
#[derive(Clone, Debug, Deserialize)]
struct EmojiRecord {
    id: String,
    name: String,
    #[serde(default)]
    animated: bool,
}

/// [`EmojiEnumerator`] over the Discord REST API.
///
/// Enumerates guild membership and each guild's custom emojis, producing CDN
/// URLs of the form `<cdn>/emojis/<id>.<gif|png>`. Only metadata is
/// transferred; emoji binaries are fetched later by the dump engine.
///
/// # Examples
///
/// ```no_run
/// use emoji_dl::enumerator::{DiscordEnumerator, EmojiEnumerator};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut enumerator = DiscordEnumerator::new("token".to_string())?;
/// enumerator.connect().await?;
/// let inventory = enumerator.await_ready().await?;
/// enumerator.disconnect().await?;
/// println!("{} emojis visible", inventory.emoji_count());
/// # Ok(())
/// # }
/// ```
pub struct DiscordEnumerator {
    token: String,
    api_base: String,
    cdn_base: String,
    client: reqwest::Client,
    user: Option<CurrentUser>,
}

impl DiscordEnumerator {
    /// Create an enumerator authenticating with `token`.
    ///
    /// Bot tokens must carry their platform prefix (e.g. `Bot <token>`);
    /// the value is sent as the `Authorization` header verbatim.
    pub fn new(token: String) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()?;
        Ok(Self {
            token,
            api_base: DEFAULT_API_BASE.to_string(),
            cdn_base: DEFAULT_CDN_BASE.to_string(),
            client,
            user: None,
        })
    }

    /// Override the REST API base URL (integration tests point this at a
    /// mock server).
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into();
        self
    }

    /// Override the CDN base URL used when constructing emoji URLs.
    pub fn with_cdn_base(mut self, base: impl Into<String>) -> Self {
        self.cdn_base = base.into();
        self
    }

    fn api_url(&self, path: &str) -> Result<Url> {
        let raw = format!("{}/{}", self.api_base.trim_end_matches('/'), path);
        Url::parse(&raw).map_err(|e| Error::Enumeration(format!("invalid API URL {raw}: {e}")))
    }

    fn emoji_url(&self, record: &EmojiRecord) -> String {
        let suffix = if record.animated { "gif" } else { "png" };
        format!(
            "{}/emojis/{}.{}",
            self.cdn_base.trim_end_matches('/'),
            record.id,
            suffix
        )
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.api_url(path)?;
        let response = self
            .client
            .get(url)
            .header(reqwest::header::AUTHORIZATION, &self.token)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(Error::Enumeration(format!(
                "authentication rejected (status {status}); check DISCORD_TOKEN"
            )));
        }
        if !status.is_success() {
            return Err(Error::Enumeration(format!(
                "request to {path} failed with status {status}"
            )));
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl EmojiEnumerator for DiscordEnumerator {
    async fn connect(&mut self) -> Result<()> {
        let user: CurrentUser = self.get_json("users/@me").await?;
        tracing::info!(user = %user.username, id = %user.id, "authenticated with the platform");
        self.user = Some(user);
        Ok(())
    }

    async fn await_ready(&mut self) -> Result<EmojiInventory> {
        if self.user.is_none() {
            return Err(Error::Enumeration(
                "connect() must succeed before await_ready()".to_string(),
            ));
        }

        let started = std::time::Instant::now();
        let guilds: Vec<GuildRecord> = self.get_json("users/@me/guilds").await?;

        let mut inventory = EmojiInventory::default();
        for guild in guilds {
            let records: Vec<EmojiRecord> =
                self.get_json(&format!("guilds/{}/emojis", guild.id)).await?;
            let emojis = records
                .iter()
                .map(|record| Emoji {
                    name: record.name.clone(),
                    url: self.emoji_url(record),
                    animated: record.animated,
                })
                .collect();
            inventory.guilds.push(GuildEmojis {
                guild: guild.name,
                emojis,
            });
        }

        tracing::info!(
            emojis = inventory.emoji_count(),
            guilds = inventory.guild_count(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "enumeration complete"
        );
        Ok(inventory)
    }

    async fn disconnect(&mut self) -> Result<()> {
        // REST sessions are stateless; dropping the cached identity is the
        // whole release.
        self.user = None;
        Ok(())
    }
}
