//! Google Cloud Storage 客户端配置
//!
//! 在进程启动时构建一次，之后作为只读句柄被所有请求共享。

use super::StorageError;
use crate::config::Config;
use object_store::ObjectStore;
use object_store::gcp::GoogleCloudStorageBuilder;
use std::sync::Arc;

/// 根据配置构建 GCS 对象存储客户端。
///
/// 凭据文件可以是服务账号密钥，也可以是 `gcloud auth application-default login`
/// 生成的用户凭据。未配置凭据文件时，使用 `GoogleCloudStorageBuilder::from_env` 的默认凭据发现。
///
/// # 参数
///
/// * `config` - 服务配置，提供存储桶名称与凭据文件路径。
///
/// # 返回值
///
/// 绑定到目标存储桶的 `ObjectStore`。
///
/// # Errors
///
/// 凭据文件无法读取或配置不完整时返回错误。
pub fn build_store(config: &Config) -> Result<Arc<dyn ObjectStore>, StorageError> {
    let mut builder = GoogleCloudStorageBuilder::from_env().with_bucket_name(&config.bucket);

    if let Some(path) = &config.credentials_path {
        builder = builder.with_application_credentials(path.to_string_lossy());
    }

    Ok(Arc::new(builder.build()?))
}
