// ==========================================
// 实验室设备管理系统 - 传感器代理层
// ==========================================
// 职责: 对第三方实验室遥测服务的透传转发
// 边界: 不重试、不缓存、不转换上游负载；上游 schema 不在本系统范围内
// ==========================================

pub mod sensor_gateway;

// 重导出核心类型
pub use sensor_gateway::{
    HttpSensorGateway, SensorGateway, SensorGatewayError, CURRENT_READINGS_PATH,
    READING_HISTORY_PATH, STATIONS_PATH,
};
