use crate::domain::ports::ReferenceSource;
use crate::utils::error::{Result, SyllabusError};
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use std::time::Duration;
use url::Url;

#[derive(Debug, Clone)]
pub struct HttpOptions {
    pub timeout: Duration,
    pub retry_attempts: u32,
    pub retry_delay: Duration,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            retry_attempts: 3,
            retry_delay: Duration::from_millis(500),
        }
    }
}

/// 以 reqwest 取得參考網頁與 .docx 檔案
pub struct HttpReferenceSource {
    client: Client,
    options: HttpOptions,
}

impl HttpReferenceSource {
    pub fn new(options: HttpOptions) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("syllabus-compiler/", env!("CARGO_PKG_VERSION")))
            .timeout(options.timeout)
            .build()?;
        Ok(Self { client, options })
    }

    /// 逾時、連線錯誤、5xx 與 429 會重試；其他失敗立即回報
    async fn get_with_retries(&self, url: &Url) -> Result<Response> {
        let max = self.options.retry_attempts.max(1);
        let mut attempt = 0;

        loop {
            attempt += 1;
            tracing::debug!("📡 GET {} (attempt {}/{})", url, attempt, max);

            let failure = match self.client.get(url.clone()).send().await {
                Ok(response) if response.status().is_success() => return Ok(response),
                Ok(response) => {
                    let status = response.status();
                    let retryable =
                        status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS;
                    (format!("HTTP {}", status), retryable)
                }
                Err(err) => {
                    let retryable = err.is_timeout() || err.is_connect() || err.is_request();
                    (err.to_string(), retryable)
                }
            };

            let (message, retryable) = failure;
            if attempt >= max || !retryable {
                return Err(SyllabusError::FetchFailure {
                    url: url.to_string(),
                    message: format!("{} after {} attempt(s)", message, attempt),
                });
            }

            tracing::warn!("⚠️ {} failed ({}), retrying", url, message);
            tokio::time::sleep(self.options.retry_delay).await;
        }
    }
}

#[async_trait]
impl ReferenceSource for HttpReferenceSource {
    async fn fetch_page(&self, url: &Url) -> Result<String> {
        let response = self.get_with_retries(url).await?;
        Ok(response.text().await?)
    }

    async fn fetch_file(&self, url: &Url) -> Result<Vec<u8>> {
        let response = self.get_with_retries(url).await?;
        Ok(response.bytes().await?.to_vec())
    }
}
