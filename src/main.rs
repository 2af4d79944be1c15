use std::sync::Arc;
use upload_relay::config::{self, Config};
use upload_relay::storage::{ObjectStoreBucket, gcs};
use upload_relay::{AppState, serve, telemetry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载 .env 文件，文件不存在时继续使用已有的环境变量
    let dotenv = config::load_dotenv();

    telemetry::init_tracing()?;

    match dotenv {
        Ok(true) => tracing::debug!("Loaded .env file"),
        Ok(false) => tracing::info!("No .env file found, using process environment"),
        Err(e) => {
            tracing::error!(error = ?e, "Error loading .env file");
            return Err(e.into());
        }
    }

    let config = Config::from_env()?;

    // 存储客户端在开始监听之前构建一次
    let store = gcs::build_store(&config)?;
    let bucket = Arc::new(ObjectStoreBucket::new(store));

    serve(AppState::new(config, bucket)).await
}
