//! 工具函数模块
//!
//! 此模块包含对象命名与公开 URL 拼接等工具函数。

pub mod path;
