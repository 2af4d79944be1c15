//! 对象存储模块
//!
//! 该模块定义上传处理器与远端对象存储之间的接口：
//! - `Bucket`：按对象名打开写入器
//! - `ObjectWriter`：分块写入、提交、放弃
//!
//! 生产环境使用基于 `object_store` 的 GCS 实现，测试可替换为内存实现或 mock。

pub mod buffered;
pub mod gcs;

pub use buffered::ObjectStoreBucket;

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to write object data")]
    Write(#[source] std::io::Error),

    #[error("failed to commit object")]
    Commit(#[source] std::io::Error),

    #[error("failed to abort object upload")]
    Abort(#[source] object_store::Error),

    #[error("invalid object name")]
    InvalidName(#[from] object_store::path::Error),

    #[error(transparent)]
    Backend(#[from] object_store::Error),
}

/// 绑定到单个目标对象的写入器。
///
/// 对象在 `finish` 成功返回之前不保证可见。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectWriter: Send {
    /// 写入一块数据。
    async fn write(&mut self, chunk: Bytes) -> Result<(), StorageError>;

    /// 提交对象，使其在存储桶中可见。
    async fn finish(&mut self) -> Result<(), StorageError>;

    /// 放弃本次写入，清理已上传的部分数据。
    async fn abort(&mut self) -> Result<(), StorageError>;
}

/// 上传目标存储桶。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Bucket: Send + Sync {
    /// 为指定对象名打开一个新的写入器。
    ///
    /// # 参数
    ///
    /// * `object` - 存储桶内的对象名。
    async fn open_writer(&self, object: &str) -> Result<Box<dyn ObjectWriter>, StorageError>;
}
