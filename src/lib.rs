//! 文件上传中转服务库
//!
//! 这是一个基于Axum的上传服务，主要功能包括：
//! - 接收 multipart 表单中的文件
//! - 以随机对象名流式写入 Google Cloud Storage 存储桶
//! - 返回对象的公开访问 URL

pub mod config;
pub mod error;
pub mod handlers;
pub mod storage;
pub mod telemetry;
pub mod utils;

use axum::extract::DefaultBodyLimit;
use axum::routing::post;
use config::Config;
use http::Method;
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;
use storage::Bucket;
use tower_http::cors::{AllowHeaders, CorsLayer};
use tower_http::trace::TraceLayer;

/// 所有请求共享的应用状态，启动时构建，之后只读
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub bucket: Arc<dyn Bucket>,
}

impl AppState {
    pub fn new(config: Config, bucket: Arc<dyn Bucket>) -> Self {
        Self {
            config: Arc::new(config),
            bucket,
        }
    }
}

/// 创建并配置Axum应用程序
///
/// 此函数设置了：
/// - CORS配置，允许浏览器跨域 POST 上传
/// - 请求追踪中间件
/// - /upload 路由及其请求体大小上限
///
/// # 参数
///
/// * `state` - 应用状态，包含配置与存储桶句柄。
///
/// # Returns
///
/// 返回配置好的Axum Router实例
pub fn app(state: AppState) -> axum::Router {
    // 配置 CORS
    let cors = CorsLayer::permissive()
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers(AllowHeaders::any());

    let upload = post(handlers::handle_upload)
        .fallback(handlers::method_not_allowed)
        .layer(DefaultBodyLimit::max(state.config.max_upload_bytes));

    axum::Router::new()
        .route("/upload", upload)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// 在 `0.0.0.0:<port>` 上启动服务，直到进程被终止。
pub async fn serve(state: AppState) -> anyhow::Result<()> {
    let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, state.config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!(%addr, bucket = %state.config.bucket, "Server listening");

    axum::serve(listener, app(state)).await?;
    Ok(())
}
