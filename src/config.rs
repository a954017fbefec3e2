// ==========================================
// 实验室设备管理系统 - 运行时配置
// ==========================================
// 职责: 从环境变量读取服务配置（数据库路径、监听地址、传感器上游）
// ==========================================

use std::net::SocketAddr;
use std::path::PathBuf;

/// 默认监听地址
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";

/// 默认传感器上游地址（第三方遥测服务）
pub const DEFAULT_SENSOR_BASE_URL: &str = "https://telemetry.lab-sensors.example.com";

/// 服务配置
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// SQLite 数据库文件路径
    pub db_path: String,

    /// HTTP 监听地址
    pub bind_addr: SocketAddr,

    /// 传感器上游 base URL（代理层转发目标，固定主机）
    pub sensor_base_url: String,
}

impl ServerConfig {
    /// 从环境变量构建配置
    ///
    /// # 环境变量
    /// - LAB_EMS_DB_PATH: 数据库路径（默认: 用户数据目录下 lab_equipment_ems.db）
    /// - LAB_EMS_BIND_ADDR: 监听地址（默认: 127.0.0.1:8080）
    /// - LAB_EMS_SENSOR_BASE_URL: 传感器上游地址
    pub fn from_env() -> Result<Self, String> {
        let db_path = get_default_db_path();

        let bind_addr = std::env::var("LAB_EMS_BIND_ADDR")
            .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| format!("监听地址格式错误: {}", e))?;

        let sensor_base_url = std::env::var("LAB_EMS_SENSOR_BASE_URL")
            .ok()
            .map(|s| s.trim().trim_end_matches('/').to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_SENSOR_BASE_URL.to_string());

        Ok(Self {
            db_path,
            bind_addr,
            sensor_base_url,
        })
    }
}

/// 获取默认数据库路径
///
/// # 返回
/// - 开发环境: 用户数据目录/lab-equipment-ems-dev/lab_equipment_ems.db
/// - 生产环境: 用户数据目录/lab-equipment-ems/lab_equipment_ems.db
pub fn get_default_db_path() -> String {
    // 允许通过环境变量显式指定 DB 路径（便于调试/测试/CI）
    if let Ok(path) = std::env::var("LAB_EMS_DB_PATH") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    // 先给一个默认回退值，后续如果能拿到 data_dir 再覆盖
    let mut path = PathBuf::from("./lab_equipment_ems.db");

    if let Some(data_dir) = dirs::data_dir() {
        // 开发环境使用独立目录，避免污染生产数据
        #[cfg(debug_assertions)]
        {
            path = data_dir.join("lab-equipment-ems-dev");
        }

        #[cfg(not(debug_assertions))]
        {
            path = data_dir.join("lab-equipment-ems");
        }

        // 确保目录存在
        std::fs::create_dir_all(&path).ok();
        path = path.join("lab_equipment_ems.db");
    }

    path.to_string_lossy().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_default_db_path() {
        let path = get_default_db_path();
        assert!(!path.is_empty());
        assert!(path.ends_with(".db"));
    }

    #[test]
    fn test_from_env_默认值() {
        let config = ServerConfig::from_env().expect("默认配置应该有效");
        assert!(!config.sensor_base_url.ends_with('/'));
    }
}
