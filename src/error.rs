//! 上传请求的错误类型
//!
//! 所有错误都在处理器边界转换为带纯文本消息的 HTTP 响应。

use crate::storage::StorageError;
use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// 请求不是合法的 multipart 表单，附带解析错误详情用于日志
    #[error("Failed to get file from request")]
    InvalidForm(String),

    #[error("Failed to get file from request")]
    MissingFile,

    #[error("File exceeds the maximum upload size")]
    TooLarge,

    #[error("Failed to open storage writer")]
    Open(#[source] StorageError),

    /// 从客户端读取请求体失败，例如连接中断
    #[error("Failed to copy file to storage")]
    Read(#[source] MultipartError),

    #[error("Failed to copy file to storage")]
    Copy(#[source] StorageError),

    #[error("Failed to close writer")]
    Finalize(#[source] StorageError),
}

impl UploadError {
    /// 解析表单字段时的 multipart 错误：超出大小上限为 413，其余视为格式错误。
    pub fn from_form(err: MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            Self::TooLarge
        } else {
            Self::InvalidForm(err.body_text())
        }
    }

    /// 读取文件内容时的 multipart 错误：超出大小上限为 413，其余视为复制失败。
    pub fn from_body(err: MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            Self::TooLarge
        } else {
            Self::Read(err)
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::InvalidForm(_) | Self::MissingFile => StatusCode::BAD_REQUEST,
            Self::TooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Open(_) | Self::Read(_) | Self::Copy(_) | Self::Finalize(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for UploadError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            let source = std::error::Error::source(&self).map(|e| e.to_string());
            tracing::error!(error = %self, source = ?source, "Upload failed");
        } else {
            let detail = match &self {
                Self::InvalidForm(detail) => Some(detail.as_str()),
                _ => None,
            };
            tracing::warn!(status = status.as_u16(), error = %self, detail, "Rejected upload request");
        }

        (status, self.to_string()).into_response()
    }
}
