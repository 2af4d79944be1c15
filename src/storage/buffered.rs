//! 基于 `object_store` 的存储桶实现
//!
//! 写入通过 `object_store::buffered::BufWriter` 完成：小文件在提交时一次性 PUT，
//! 超过缓冲容量后自动切换为分片上传，`shutdown` 即提交。

use super::{Bucket, ObjectWriter, StorageError};
use async_trait::async_trait;
use bytes::Bytes;
use object_store::buffered::BufWriter;
use object_store::path::Path;
use object_store::{Attribute, AttributeValue, Attributes, ObjectStore};
use std::sync::Arc;
use tokio::io::AsyncWriteExt;

/// 写入缓冲容量，超过后切换为分片上传：10 MiB
const WRITE_CAPACITY: usize = 10 * 1024 * 1024;

/// 任意 `ObjectStore` 之上的存储桶
#[derive(Clone)]
pub struct ObjectStoreBucket {
    store: Arc<dyn ObjectStore>,
    capacity: usize,
}

impl ObjectStoreBucket {
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self {
            store,
            capacity: WRITE_CAPACITY,
        }
    }

    /// 调整写入缓冲容量。
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }
}

#[async_trait]
impl Bucket for ObjectStoreBucket {
    async fn open_writer(&self, object: &str) -> Result<Box<dyn ObjectWriter>, StorageError> {
        let path = Path::parse(object)?;

        // 按对象名后缀推断 Content-Type，不检查上传内容本身
        let content_type = mime_guess::from_path(object).first_or_octet_stream();
        let mut attributes = Attributes::new();
        attributes.insert(
            Attribute::ContentType,
            AttributeValue::from(content_type.to_string()),
        );

        let inner = BufWriter::with_capacity(self.store.clone(), path, self.capacity)
            .with_attributes(attributes);

        Ok(Box::new(StoreWriter {
            inner,
            finishing: false,
        }))
    }
}

struct StoreWriter {
    inner: BufWriter,
    /// 已开始提交；此后上传已被 `shutdown` 消耗，`BufWriter::abort` 不能再调用
    finishing: bool,
}

#[async_trait]
impl ObjectWriter for StoreWriter {
    async fn write(&mut self, chunk: Bytes) -> Result<(), StorageError> {
        self.inner.write_all(&chunk).await.map_err(StorageError::Write)
    }

    async fn finish(&mut self) -> Result<(), StorageError> {
        self.finishing = true;
        self.inner.shutdown().await.map_err(StorageError::Commit)
    }

    async fn abort(&mut self) -> Result<(), StorageError> {
        if self.finishing {
            return Ok(());
        }
        self.inner.abort().await.map_err(StorageError::Abort)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use object_store::local::LocalFileSystem;
    use object_store::memory::InMemory;

    fn bucket() -> (ObjectStoreBucket, Arc<InMemory>) {
        let store = Arc::new(InMemory::new());
        (ObjectStoreBucket::new(store.clone()), store)
    }

    #[tokio::test]
    async fn test_write_then_finish_stores_object() {
        let (bucket, store) = bucket();

        let mut writer = bucket.open_writer("report.pdf").await.unwrap();
        writer.write(Bytes::from_static(b"hello ")).await.unwrap();
        writer.write(Bytes::from_static(b"world")).await.unwrap();
        writer.finish().await.unwrap();

        let result = store.get(&Path::from("report.pdf")).await.unwrap();
        assert_eq!(
            result.attributes.get(&Attribute::ContentType),
            Some(&AttributeValue::from("application/pdf"))
        );
        let bytes = result.bytes().await.unwrap();
        assert_eq!(bytes.as_ref(), b"hello world");
    }

    #[tokio::test]
    async fn test_object_not_visible_before_finish() {
        let (bucket, store) = bucket();

        let mut writer = bucket.open_writer("pending.pdf").await.unwrap();
        writer.write(Bytes::from_static(b"abc")).await.unwrap();

        assert!(store.head(&Path::from("pending.pdf")).await.is_err());
    }

    #[tokio::test]
    async fn test_abort_leaves_no_object() {
        let (bucket, store) = bucket();

        let mut writer = bucket.open_writer("aborted.pdf").await.unwrap();
        writer.write(Bytes::from_static(b"partial")).await.unwrap();
        writer.abort().await.unwrap();

        assert!(store.head(&Path::from("aborted.pdf")).await.is_err());
    }

    #[tokio::test]
    async fn test_large_object_uses_multipart() {
        let store = Arc::new(InMemory::new());
        let bucket = ObjectStoreBucket::new(store.clone()).with_capacity(16);

        let chunk = Bytes::from(vec![7u8; 40]);
        let mut writer = bucket.open_writer("big.pdf").await.unwrap();
        for _ in 0..3 {
            writer.write(chunk.clone()).await.unwrap();
        }
        writer.finish().await.unwrap();

        let bytes = store
            .get(&Path::from("big.pdf"))
            .await
            .unwrap()
            .bytes()
            .await
            .unwrap();
        assert_eq!(bytes.len(), 120);
        assert!(bytes.iter().all(|b| *b == 7));
    }

    #[tokio::test]
    async fn test_abort_after_failed_finish() {
        // 本地文件系统不支持对象属性，提交必然失败
        let store = Arc::new(LocalFileSystem::new_with_prefix(std::env::temp_dir()).unwrap());
        let bucket = ObjectStoreBucket::new(store);

        let mut writer = bucket.open_writer("rejected.pdf").await.unwrap();
        writer.write(Bytes::from_static(b"abc")).await.unwrap();

        let err = writer.finish().await.unwrap_err();
        assert!(matches!(err, StorageError::Commit(_)));
        writer.abort().await.unwrap();
    }

    #[tokio::test]
    async fn test_invalid_object_name() {
        let (bucket, _) = bucket();
        assert!(bucket.open_writer("a//b.pdf").await.is_err());
    }
}
