// ==========================================
// 实验室设备管理系统 - 传感器上游网关
// ==========================================
// 职责: 向固定上游主机发起 GET 并透传 JSON 响应
// 失败语义: 任何上游错误（网络/非2xx/非JSON）→ SensorGatewayError，
//           由路由层映射为 500 { error, details }
// ==========================================

use async_trait::async_trait;
use thiserror::Error;

/// 实时读数透传路径
pub const CURRENT_READINGS_PATH: &str = "/v1/readings/current";

/// 历史读数透传路径
pub const READING_HISTORY_PATH: &str = "/v1/readings/history";

/// 监测站列表透传路径
pub const STATIONS_PATH: &str = "/v1/stations";

/// 传感器网关错误
#[derive(Error, Debug)]
pub enum SensorGatewayError {
    #[error("传感器上游请求失败: {details}")]
    Upstream { details: String },
}

// ==========================================
// Trait: SensorGateway
// ==========================================
// 用途: 上游访问接口，便于路由层在测试中替换实现
#[async_trait]
pub trait SensorGateway: Send + Sync {
    /// 对上游 path 发起 GET 并返回 JSON 负载（不做转换）
    async fn fetch_json(&self, path: &str) -> Result<serde_json::Value, SensorGatewayError>;
}

// ==========================================
// HttpSensorGateway - reqwest 实现
// ==========================================
pub struct HttpSensorGateway {
    client: reqwest::Client,
    base_url: String,
}

impl HttpSensorGateway {
    /// 创建网关实例
    ///
    /// # 参数
    /// - `base_url`: 上游 base URL（不含末尾斜杠）
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }
}

#[async_trait]
impl SensorGateway for HttpSensorGateway {
    async fn fetch_json(&self, path: &str) -> Result<serde_json::Value, SensorGatewayError> {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SensorGatewayError::Upstream {
                details: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SensorGatewayError::Upstream {
                details: format!("上游返回 {}: {}", status, truncate(&body, 512)),
            });
        }

        response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| SensorGatewayError::Upstream {
                details: format!("上游响应不是合法 JSON: {}", e),
            })
    }
}

// ==========================================
// 辅助函数
// ==========================================

/// 截断错误详情，避免把超长上游响应塞进错误信封
fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("abc", 5), "abc");
        assert_eq!(truncate("abcdef", 3), "abc");
    }
}
