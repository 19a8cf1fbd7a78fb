use std::time::Instant;

use crate::api_backend::{api_url, error_from_response, read_json};
use crate::data_types::api_data_types::{
    HistoryDay, MenuItem, Order, OrderEnvelope, OrderRequest, OtpVerify, StudentProfile,
    TodaysOrders,
};
use crate::data_types::ApiError;

pub async fn fetch_menu() -> Result<Vec<MenuItem>, ApiError> {
    let client = reqwest::Client::new();
    let now = Instant::now();
    let resp = client.get(format!("{}/api/menu", api_url())).send().await?;
    let menu = read_json(resp).await?;
    log::debug!("menu fetch: {:.2?}", now.elapsed());
    Ok(menu)
}

pub async fn fetch_profile(student_id: &str) -> Result<StudentProfile, ApiError> {
    let client = reqwest::Client::new();
    let resp = client
        .get(format!("{}/api/student/profile/{}", api_url(), student_id))
        .send()
        .await?;
    read_json(resp).await
}

pub async fn fetch_todays_orders(student_id: &str) -> Result<Vec<Order>, ApiError> {
    let client = reqwest::Client::new();
    let resp = client
        .get(format!("{}/api/orders/today/{}", api_url(), student_id))
        .send()
        .await?;
    let body: TodaysOrders = read_json(resp).await?;
    Ok(body.orders)
}

/// History comes back already grouped by day, newest first.
pub async fn fetch_order_history(student_id: &str) -> Result<Vec<HistoryDay>, ApiError> {
    let client = reqwest::Client::new();
    let resp = client
        .get(format!("{}/api/orders/history/{}", api_url(), student_id))
        .send()
        .await?;
    read_json(resp).await
}

/// Submit a frozen cart snapshot. The server is the authority on wallet
/// balance; a client-side check having passed does not guarantee success.
pub async fn submit_order(request: &OrderRequest) -> Result<Order, ApiError> {
    let client = reqwest::Client::new();
    let now = Instant::now();
    let resp = client
        .post(format!("{}/api/order", api_url()))
        .json(request)
        .send()
        .await?;
    let envelope: OrderEnvelope = read_json(resp).await?;
    log::debug!("order submit: {:.2?}", now.elapsed());
    Ok(envelope.order)
}

/// Ask the backend to mail a 6-digit code to the student's registered address.
pub async fn request_wallet_otp(student_id: &str) -> Result<(), ApiError> {
    let client = reqwest::Client::new();
    let resp = client
        .post(format!("{}/api/wallet/otp/{}", api_url(), student_id))
        .send()
        .await?;
    if resp.status().is_success() {
        Ok(())
    } else {
        Err(error_from_response(resp).await)
    }
}

pub async fn verify_wallet_otp(student_id: &str, entered_otp: &str) -> Result<OtpVerify, ApiError> {
    let client = reqwest::Client::new();
    let resp = client
        .post(format!("{}/api/wallet/verify/{}", api_url(), student_id))
        .json(&serde_json::json!({ "enteredOtp": entered_otp }))
        .send()
        .await?;
    read_json(resp).await
}
