//! 资源获取 - 基础设施层
//!
//! 持有 HTTP 客户端，只暴露"按地址取回文本"的能力

use crate::error::LoadError;
use std::collections::HashMap;
use tracing::debug;

/// 按地址取回原始文本
///
/// 职责：
/// - 区分 http(s) 地址和本地文件
/// - 非 2xx 状态码、文件不存在都算作不可达
/// - 不解析 JSON
#[allow(async_fn_in_trait)]
pub trait ResourceFetcher {
    async fn fetch_text(&self, location: &str) -> Result<String, LoadError>;
}

/// 默认实现：http(s) 走 reqwest，其余按本地路径读取
pub struct ResourceClient {
    http: reqwest::Client,
}

impl ResourceClient {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }

    fn is_remote(location: &str) -> bool {
        location.starts_with("http://") || location.starts_with("https://")
    }

    async fn fetch_remote(&self, url: &str) -> Result<String, LoadError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| LoadError::unreachable(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::unreachable(url, format!("状态码 {}", status)));
        }

        response.text().await.map_err(|e| LoadError::unreachable(url, e))
    }

    async fn fetch_local(&self, path: &str) -> Result<String, LoadError> {
        tokio::fs::read_to_string(path)
            .await
            .map_err(|e| LoadError::unreachable(path, e))
    }
}

impl Default for ResourceClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceFetcher for ResourceClient {
    async fn fetch_text(&self, location: &str) -> Result<String, LoadError> {
        debug!("获取资源: {}", location);
        if Self::is_remote(location) {
            self.fetch_remote(location).await
        } else {
            self.fetch_local(location).await
        }
    }
}

/// 内存中的固定资源表，未登记的地址视为不可达
#[derive(Debug, Default, Clone)]
pub struct StaticFetcher {
    resources: HashMap<String, String>,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_resource(mut self, location: &str, body: impl Into<String>) -> Self {
        self.resources.insert(location.to_string(), body.into());
        self
    }
}

impl ResourceFetcher for StaticFetcher {
    async fn fetch_text(&self, location: &str) -> Result<String, LoadError> {
        self.resources
            .get(location)
            .cloned()
            .ok_or_else(|| LoadError::unreachable(location, "状态码 404 Not Found"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_local_file_is_unreachable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");

        let err = ResourceClient::new()
            .fetch_text(path.to_str().unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, LoadError::ResourceUnreachable { .. }));
    }

    #[tokio::test]
    async fn local_file_is_read_as_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        std::fs::write(&path, "[]").unwrap();

        let text = ResourceClient::new()
            .fetch_text(path.to_str().unwrap())
            .await
            .unwrap();
        assert_eq!(text, "[]");
    }

    #[test]
    fn remote_detection() {
        assert!(ResourceClient::is_remote("https://example.com/data.json"));
        assert!(!ResourceClient::is_remote("data/data.json"));
    }
}
