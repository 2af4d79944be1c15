use crate::AppState;
use crate::error::UploadError;
use crate::storage::ObjectWriter;
use crate::utils::path::{new_object_name, public_url};
use axum::{
    Json,
    extract::{
        Multipart, State,
        multipart::{Field, MultipartRejection},
    },
};
use serde::{Deserialize, Serialize};

/// 表单中文件字段的名称
pub const FILE_FIELD: &str = "file";

/// 上传成功的响应体
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct UploadResponse {
    /// 对象的公开访问 URL
    pub file: String,
}

/// 处理文件上传请求
///
/// 从 multipart 表单中取出 `file` 字段，生成新的对象名，
/// 将文件内容分块流式写入存储桶，提交后返回对象的公开 URL。
///
/// # 请求方法
///
/// POST /upload
///
/// # 返回值
///
/// * `Ok(Json)` - `{"file": "<url>"}`
/// * `Err(UploadError)` - 400 / 413 / 500，纯文本错误消息
///
/// 复制或提交失败时会尝试放弃本次写入，不做重试。
pub async fn handle_upload(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, UploadError> {
    let mut multipart = multipart.map_err(|e| UploadError::InvalidForm(e.body_text()))?;

    // 取第一个名为 file 的字段，其它字段忽略
    while let Some(mut field) = multipart.next_field().await.map_err(UploadError::from_form)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        return relay_field(&state, &mut field).await.map(Json);
    }

    Err(UploadError::MissingFile)
}

/// 将文件字段写入一个新对象并返回其公开 URL。
async fn relay_field(state: &AppState, field: &mut Field<'_>) -> Result<UploadResponse, UploadError> {
    let object_name = new_object_name();
    tracing::info!(
        object = %object_name,
        filename = ?field.file_name(),
        content_type = ?field.content_type(),
        "Starting upload"
    );

    let mut writer = state
        .bucket
        .open_writer(&object_name)
        .await
        .map_err(UploadError::Open)?;

    let total = match copy_field(field, writer.as_mut()).await {
        Ok(total) => total,
        Err(e) => {
            abort(writer.as_mut(), &object_name).await;
            return Err(e);
        }
    };

    if let Err(e) = writer.finish().await {
        abort(writer.as_mut(), &object_name).await;
        return Err(UploadError::Finalize(e));
    }

    let url = public_url(&state.config.public_base_url, &state.config.bucket, &object_name);
    tracing::info!(object = %object_name, bytes = total, "Upload finished");

    Ok(UploadResponse { file: url })
}

/// 处理 /upload 上除 POST 之外的请求方法
pub async fn method_not_allowed() -> UploadError {
    UploadError::MethodNotAllowed
}

/// 将文件字段的数据逐块写入目标对象，返回写入的总字节数。
async fn copy_field(field: &mut Field<'_>, writer: &mut dyn ObjectWriter) -> Result<u64, UploadError> {
    let mut total = 0u64;

    while let Some(chunk) = field.chunk().await.map_err(UploadError::from_body)? {
        total += chunk.len() as u64;
        writer.write(chunk).await.map_err(UploadError::Copy)?;
    }

    Ok(total)
}

async fn abort(writer: &mut dyn ObjectWriter, object_name: &str) {
    if let Err(e) = writer.abort().await {
        tracing::warn!(object = %object_name, error = ?e, "Failed to abort upload");
    }
}
