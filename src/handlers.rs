//! HTTP请求处理模块
//!
//! 此模块包含上传接口的处理器：
//! - POST /upload 文件上传
//! - 其它请求方法返回 405

pub mod upload;

pub use upload::{handle_upload, method_not_allowed};
