// ==========================================
// 实验室设备管理系统 - 服务入口
// ==========================================
// 技术栈: axum + Rust + SQLite
// ==========================================

use std::sync::Arc;

use lab_equipment_ems::app::{build_router, AppState};
use lab_equipment_ems::config::ServerConfig;
use lab_equipment_ems::logging;
use lab_equipment_ems::proxy::sensor_gateway::HttpSensorGateway;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 初始化日志系统
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{} - 设备台账与借用服务", lab_equipment_ems::APP_NAME);
    tracing::info!("系统版本: {}", lab_equipment_ems::VERSION);
    tracing::info!("==================================================");

    // 读取配置
    let config = ServerConfig::from_env().map_err(|e| anyhow::anyhow!(e))?;
    tracing::info!("使用数据库: {}", config.db_path);
    tracing::info!("传感器上游: {}", config.sensor_base_url);

    // 创建AppState
    tracing::info!("正在初始化AppState...");
    let sensor_gateway = Arc::new(HttpSensorGateway::new(config.sensor_base_url.clone()));
    let app_state = Arc::new(
        AppState::new(config.db_path.clone(), sensor_gateway).map_err(|e| anyhow::anyhow!(e))?,
    );

    // 装配路由并启动
    let router = build_router(app_state);
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!("HTTP 服务监听: http://{}", config.bind_addr);

    // Ctrl+C 优雅退出
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("服务已退出");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("监听 ctrl-c 失败: {}", e);
        return;
    }
    tracing::info!("收到退出信号，正在关闭 HTTP 服务...");
}
