//! 上传中转服务的配置模块。
//!
//! 该模块负责在进程启动时从环境变量（以及可选的 `.env` 文件）加载配置，
//! 加载后的配置在进程生命周期内只读。

use std::env;
use std::path::PathBuf;
use thiserror::Error;

/// 存储服务凭据文件路径
pub const CREDENTIALS_VAR: &str = "GOOGLE_APPLICATION_CREDENTIALS";

/// 目标存储桶名称
pub const BUCKET_VAR: &str = "BUCKETNAME";

/// 监听端口
pub const PORT_VAR: &str = "PORT";

/// 单次上传请求体的最大字节数
pub const MAX_UPLOAD_BYTES_VAR: &str = "MAX_UPLOAD_BYTES";

/// 返回给客户端的公开 URL 前缀
pub const PUBLIC_BASE_URL_VAR: &str = "PUBLIC_BASE_URL";

pub const DEFAULT_PORT: u16 = 8080;

/// 默认上传上限：32 MiB
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 32 * 1024 * 1024;

pub const DEFAULT_PUBLIC_BASE_URL: &str = "https://storage.googleapis.com";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("environment variable {0} must be set")]
    Missing(&'static str),

    #[error("environment variable {name} has invalid value {value:?}")]
    Invalid { name: &'static str, value: String },

    #[error("failed to parse .env file")]
    Dotenv(#[source] dotenvy::Error),
}

/// 服务运行配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// 凭据文件路径（服务账号密钥或用户凭据），未设置时交给存储客户端自行发现凭据
    pub credentials_path: Option<PathBuf>,
    pub bucket: String,
    pub port: u16,
    pub max_upload_bytes: usize,
    pub public_base_url: String,
}

impl Config {
    /// 从当前进程的环境变量读取配置。
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// 通过任意键值查找函数读取配置。
    ///
    /// 空字符串与未设置同等对待。
    ///
    /// # 参数
    ///
    /// * `lookup` - 按变量名返回变量值的函数。
    ///
    /// # 返回值
    ///
    /// 解析后的配置，缺少存储桶名称或数值无法解析时返回错误。
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let bucket = get(BUCKET_VAR).ok_or(ConfigError::Missing(BUCKET_VAR))?;

        let port = match get(PORT_VAR) {
            Some(value) => parse_number(PORT_VAR, value)?,
            None => DEFAULT_PORT,
        };

        let max_upload_bytes = match get(MAX_UPLOAD_BYTES_VAR) {
            Some(value) => parse_number(MAX_UPLOAD_BYTES_VAR, value)?,
            None => DEFAULT_MAX_UPLOAD_BYTES,
        };

        let public_base_url = get(PUBLIC_BASE_URL_VAR)
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_PUBLIC_BASE_URL.to_string());

        Ok(Self {
            credentials_path: get(CREDENTIALS_VAR).map(PathBuf::from),
            bucket: bucket.trim().to_string(),
            port,
            max_upload_bytes,
            public_base_url,
        })
    }
}

fn parse_number<T: std::str::FromStr>(name: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { name, value })
}

/// 加载当前目录下的 `.env` 文件。
///
/// 文件不存在时返回 `Ok(false)` 并继续使用已有的环境变量；
/// 文件存在但解析失败时返回错误。
pub fn load_dotenv() -> Result<bool, ConfigError> {
    match dotenvy::dotenv() {
        Ok(_) => Ok(true),
        Err(e) if e.not_found() => Ok(false),
        Err(e) => Err(ConfigError::Dotenv(e)),
    }
}
