//! 产品数据模型

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub stock: i32,
    pub price: f32,
}

/// 新增和更新共用的请求体，字段全部必填（description 除外）
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ProductPayload {
    #[validate(required(message = "name is required"))]
    pub name: Option<String>,

    pub description: Option<String>,

    #[validate(required(message = "stock is required"))]
    pub stock: Option<i32>,

    #[validate(required(message = "price is required"))]
    pub price: Option<f32>,
}

/// 校验通过后的产品字段
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub stock: i32,
    pub price: f32,
}

impl NewProduct {
    pub fn with_id(self, id: i32) -> Product {
        Product {
            id,
            name: self.name,
            description: self.description,
            stock: self.stock,
            price: self.price,
        }
    }
}

impl TryFrom<ProductPayload> for NewProduct {
    type Error = ValidationErrors;

    fn try_from(payload: ProductPayload) -> Result<Self, Self::Error> {
        let mut errors = payload.validate().err().unwrap_or_else(ValidationErrors::new);

        // 超出 f32 范围的 JSON 数字会被转成 inf，REAL 列能存下但读回来无法表示
        if payload.price.is_some_and(|price| !price.is_finite()) {
            let mut error = ValidationError::new("finite");
            error.message = Some("price must be a finite number".into());
            errors.add("price", error);
        }

        if !errors.errors().is_empty() {
            return Err(errors);
        }

        let (Some(name), Some(stock), Some(price)) = (payload.name, payload.stock, payload.price)
        else {
            return Err(errors);
        };

        Ok(NewProduct {
            name,
            description: payload.description,
            stock,
            price,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_payload_converts() {
        let payload: ProductPayload = serde_json::from_value(serde_json::json!({
            "name": "Widget",
            "stock": 10,
            "price": 9.99
        }))
        .unwrap();

        let product = NewProduct::try_from(payload).unwrap();
        assert_eq!(product.name, "Widget");
        assert_eq!(product.description, None);
        assert_eq!(product.stock, 10);
        assert_eq!(product.price, 9.99);
    }

    #[test]
    fn test_missing_fields_are_reported() {
        let payload = ProductPayload {
            name: Some("Widget".to_string()),
            ..Default::default()
        };

        let errors = NewProduct::try_from(payload).unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("stock"));
        assert!(fields.contains_key("price"));
        assert!(!fields.contains_key("name"));
    }

    #[test]
    fn test_infinite_price_is_rejected() {
        let payload: ProductPayload = serde_json::from_value(serde_json::json!({
            "name": "Big",
            "stock": 1,
            "price": 1e39
        }))
        .unwrap();

        let errors = NewProduct::try_from(payload).unwrap_err();
        assert!(errors.field_errors().contains_key("price"));
    }

    #[test]
    fn test_price_serializes_without_float_noise() {
        let product = NewProduct {
            name: "Widget".to_string(),
            description: Some("A widget".to_string()),
            stock: 10,
            price: 9.99,
        }
        .with_id(1);

        let json = serde_json::to_string(&product).unwrap();
        assert!(json.contains("\"price\":9.99"));
    }
}
