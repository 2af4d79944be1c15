use uuid::Uuid;

/// 上传对象固定使用的文件后缀，不检查上传内容的实际类型
pub const OBJECT_SUFFIX: &str = ".pdf";

/// 生成新的对象名：随机 UUID v4 加固定后缀。
///
/// UUID 每次请求都重新生成，因此不需要检查存储桶中是否已存在同名对象。
pub fn new_object_name() -> String {
    format!("{}{}", Uuid::new_v4(), OBJECT_SUFFIX)
}

/// 使用正斜杠连接多个字符串组件
///
/// 它会自动处理组件前后的斜杠，确保结果中组件之间只有一个正斜杠。
///
/// # 示例
///
/// ```
/// use upload_relay::utils::path::join_slash;
///
/// assert_eq!(join_slash(&["bucket", "object.pdf"]), "bucket/object.pdf");
/// assert_eq!(join_slash(&["bucket/", "/object.pdf"]), "bucket/object.pdf");
/// ```
pub fn join_slash(components: &[&str]) -> String {
    components
        .iter()
        .map(|s| s.trim_matches('/'))
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

/// 由存储桶名称和对象名得到对象的公开访问 URL。
///
/// # 参数
///
/// * `base_url` - 公开访问前缀，如 `https://storage.googleapis.com`。
/// * `bucket` - 存储桶名称。
/// * `object` - 对象名。
///
/// # 示例
///
/// ```
/// use upload_relay::utils::path::public_url;
///
/// assert_eq!(
///     public_url("https://storage.googleapis.com", "docs", "a.pdf"),
///     "https://storage.googleapis.com/docs/a.pdf"
/// );
/// ```
pub fn public_url(base_url: &str, bucket: &str, object: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        join_slash(&[bucket, object])
    )
}
