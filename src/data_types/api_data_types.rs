use serde::{Deserialize, Serialize};

use super::{MealCategory, MenuFormError};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MenuItem {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub price: f64,
    pub category: MealCategory,
    #[serde(rename = "imageUrl", default)]
    pub image_url: String,
}

/// Create/update body for the staff menu endpoints.
#[derive(Serialize, Debug, Clone)]
pub struct NewMenuItem {
    pub name: String,
    pub price: f64,
    pub category: MealCategory,
    #[serde(rename = "imageUrl")]
    pub image_url: String,
}

impl NewMenuItem {
    pub fn validate(&self) -> Result<(), MenuFormError> {
        if self.name.trim().is_empty() {
            return Err(MenuFormError::EmptyName);
        }
        if self.image_url.trim().is_empty() {
            return Err(MenuFormError::EmptyImage);
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(MenuFormError::InvalidPrice);
        }
        Ok(())
    }
}

/// Coerce form input into a non-negative price.
pub fn parse_price(raw: &str) -> Result<f64, MenuFormError> {
    let price: f64 = raw.trim().parse().map_err(|_| MenuFormError::InvalidPrice)?;
    if !price.is_finite() || price < 0.0 {
        return Err(MenuFormError::InvalidPrice);
    }
    Ok(price)
}

/// A cart line frozen at order time, as the server stores and echoes it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct OrderItem {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub price: f64,
    pub category: MealCategory,
    #[serde(rename = "imageUrl", default)]
    pub image_url: String,
    pub quantity: u32,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Order {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "studentId")]
    pub student_id: String,
    pub items: Vec<OrderItem>,
    #[serde(rename = "orderType")]
    pub order_type: MealCategory,
    // ISO timestamp, kept raw and parsed only for display
    #[serde(rename = "createdAt", default)]
    pub created_at: String,
}

#[derive(Serialize, Debug, Clone)]
pub struct OrderRequest {
    #[serde(rename = "studentId")]
    pub student_id: String,
    pub items: Vec<OrderItem>,
    #[serde(rename = "orderType")]
    pub order_type: MealCategory,
}

#[derive(Deserialize, Debug)]
pub struct OrderEnvelope {
    pub order: Order,
}

#[derive(Deserialize, Debug, Default)]
pub struct TodaysOrders {
    #[serde(default)]
    pub orders: Vec<Order>,
}

/// One day of grouped order history.
#[derive(Deserialize, Debug, Clone)]
pub struct HistoryDay {
    #[serde(rename = "_id")]
    pub date: String,
    #[serde(rename = "totalOrders")]
    pub total_orders: u32,
    #[serde(rename = "totalSpent")]
    pub total_spent: f64,
    pub orders: Vec<Order>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct StudentProfile {
    #[serde(rename = "_id", default)]
    pub id: String,
    pub name: String,
    #[serde(rename = "walletBalance")]
    pub wallet_balance: f64,
    #[serde(default)]
    pub email: String,
}

#[derive(Deserialize, Debug)]
pub struct OtpVerify {
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

/// Error bodies are `{message}` across all endpoints.
#[derive(Deserialize, Debug)]
pub struct ApiMessage {
    pub message: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct LoginResponse {
    pub token: String,
    pub role: String,
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Deserialize, Debug, Default)]
pub struct MenuStats {
    #[serde(default)]
    pub stats: StatsBody,
}

#[derive(Deserialize, Debug, Default)]
pub struct StatsBody {
    #[serde(rename = "popularItems", default)]
    pub popular_items: Vec<PopularItem>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct PopularItem {
    pub name: String,
    pub count: u32,
}

/// Payload shown as a QR code at the counter. Client-generated, not a wire
/// contract with the server.
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct QrReceipt {
    pub order_id: String,
    pub student_id: String,
    pub student_name: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub order_type: MealCategory,
    pub time: String,
}
