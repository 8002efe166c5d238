use crate::utils::error::Result;
use async_trait::async_trait;
use url::Url;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// 參考文件來源 (網頁與檔案下載)
#[async_trait]
pub trait ReferenceSource: Send + Sync {
    async fn fetch_page(&self, url: &Url) -> Result<String>;
    async fn fetch_file(&self, url: &Url) -> Result<Vec<u8>>;
}

/// 使用者從候選清單中挑選一項，回傳 0 起算的索引
pub trait Selector {
    fn select(&mut self, options: &[String]) -> Result<usize>;
}
