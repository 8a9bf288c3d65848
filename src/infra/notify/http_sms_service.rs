use crate::domain::ports::SmsSender;
use crate::error::AppError;
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::error;

pub struct HttpSmsService {
    client: Client,
    api_url: String,
    api_key: String,
}

impl HttpSmsService {
    pub fn new(api_url: String, api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_url,
            api_key,
        }
    }
}

#[derive(Serialize)]
struct SmsPayload {
    to_number: String,
    body: String,
}

#[async_trait]
impl SmsSender for HttpSmsService {
    async fn send(&self, phone: &str, body: &str) -> Result<(), AppError> {
        let payload = SmsPayload {
            to_number: phone.to_string(),
            body: body.to_string(),
        };

        let res = self.client.post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                let msg = format!("SMS service connection error: {}", e);
                error!("{}", msg);
                AppError::Notification(msg)
            })?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            let msg = format!("SMS service failed. Status: {}, Body: {}", status, text);
            error!("{}", msg);
            return Err(AppError::Notification(msg));
        }

        Ok(())
    }
}
