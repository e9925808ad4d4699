//! 核心响应处理模块

use serde::Serialize;

/// 只带一句提示的响应，删除类接口使用
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
    /// 受影响的行数，只有批量删除时返回
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted: Option<u64>,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            deleted: None,
        }
    }

    pub fn with_deleted(mut self, deleted: u64) -> Self {
        self.deleted = Some(deleted);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deleted_is_omitted_when_absent() {
        let body = serde_json::to_value(MessageResponse::new("product deleted successfully")).unwrap();
        assert_eq!(body, serde_json::json!({ "message": "product deleted successfully" }));
    }

    #[test]
    fn test_deleted_count_is_serialized() {
        let body = serde_json::to_value(
            MessageResponse::new("products deleted successfully").with_deleted(3),
        )
        .unwrap();
        assert_eq!(body["deleted"], 3);
    }
}
