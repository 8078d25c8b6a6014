use crate::{ApiError, Envelope};
use async_trait::async_trait;
use hearting_config::ApiConfig;
use hearting_core::{EmojiReaction, HeartResponse, InboxItem, MessageDetail, MessageId};
use reqwest::RequestBuilder;
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

/// Remote hearting backend. Success means the envelope status was `"success"`;
/// everything else surfaces as an [`ApiError`].
#[async_trait]
pub trait HeartApi: Send + Sync {
    async fn message_detail(&self, id: MessageId) -> Result<MessageDetail, ApiError>;

    async fn sent_message_detail(&self, id: MessageId) -> Result<MessageDetail, ApiError>;

    async fn respond_heart(&self, response: &HeartResponse) -> Result<EmojiReaction, ApiError>;

    async fn report_message(&self, id: MessageId, content: &str) -> Result<(), ApiError>;

    async fn delete_temporary_message(&self, id: MessageId) -> Result<(), ApiError>;

    async fn inbox(&self) -> Result<Vec<InboxItem>, ApiError>;
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InboxPayload {
    #[serde(default)]
    inbox_list: Vec<InboxItem>,
}

#[derive(Debug, Serialize)]
struct ReportBody<'a> {
    content: &'a str,
}

/// Endpoints are joined onto the base url, which drops its last segment
/// unless the path ends in `/`.
fn directory_url(base_url: &Url) -> Url {
    let mut url = base_url.clone();
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

#[derive(Debug, Clone)]
pub struct HttpHeartApi {
    http: reqwest::Client,
    base_url: Url,
    access_token: Option<String>,
}

impl HttpHeartApi {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            http: builder.build()?,
            base_url: directory_url(&config.base_url),
            access_token: config.access_token.clone(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.base_url.join(path)?)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        mut request: RequestBuilder,
    ) -> Result<Envelope<T>, ApiError> {
        if let Some(token) = &self.access_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            tracing::debug!(status = status.as_u16(), "hearting backend returned an error status");
            return Err(ApiError::Status {
                code: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl HeartApi for HttpHeartApi {
    async fn message_detail(&self, id: MessageId) -> Result<MessageDetail, ApiError> {
        tracing::debug!(message_id = %id, "fetching received message detail");
        let url = self.endpoint(&format!("message/{id}"))?;
        self.send(self.http.get(url)).await?.into_data()
    }

    async fn sent_message_detail(&self, id: MessageId) -> Result<MessageDetail, ApiError> {
        tracing::debug!(message_id = %id, "fetching sent message detail");
        let url = self.endpoint(&format!("message/sent/{id}"))?;
        self.send(self.http.get(url)).await?.into_data()
    }

    async fn respond_heart(&self, response: &HeartResponse) -> Result<EmojiReaction, ApiError> {
        tracing::debug!(
            message_id = %response.message_id,
            emoji_id = response.emoji_id,
            "posting emoji reaction"
        );
        let url = self.endpoint("message/emoji")?;
        self.send(self.http.post(url).json(response))
            .await?
            .into_data()
    }

    async fn report_message(&self, id: MessageId, content: &str) -> Result<(), ApiError> {
        tracing::debug!(message_id = %id, "reporting message");
        let url = self.endpoint(&format!("message/{id}/report"))?;
        self.send::<IgnoredAny>(self.http.post(url).json(&ReportBody { content }))
            .await?
            .into_unit()
    }

    async fn delete_temporary_message(&self, id: MessageId) -> Result<(), ApiError> {
        tracing::debug!(message_id = %id, "deleting message");
        let url = self.endpoint(&format!("message/{id}"))?;
        self.send::<IgnoredAny>(self.http.delete(url))
            .await?
            .into_unit()
    }

    async fn inbox(&self) -> Result<Vec<InboxItem>, ApiError> {
        tracing::debug!("fetching inbox");
        let url = self.endpoint("message/save")?;
        let payload: InboxPayload = self.send(self.http.get(url)).await?.into_data()?;
        Ok(payload.inbox_list)
    }
}
