use crate::api_backend::{api_url, error_from_response, read_json};
use crate::data_types::api_data_types::{ApiMessage, MenuItem, MenuStats, NewMenuItem};
use crate::data_types::ApiError;

pub async fn fetch_staff_menu() -> Result<Vec<MenuItem>, ApiError> {
    let client = reqwest::Client::new();
    let resp = client
        .get(format!("{}/api/staff/menu", api_url()))
        .send()
        .await?;
    read_json(resp).await
}

pub async fn fetch_menu_stats() -> Result<MenuStats, ApiError> {
    let client = reqwest::Client::new();
    let resp = client
        .get(format!("{}/api/staff/stats", api_url()))
        .send()
        .await?;
    read_json(resp).await
}

/// Callers validate the form first (see [`NewMenuItem::validate`]); the
/// server echoes the created item back.
pub async fn create_menu_item(item: &NewMenuItem) -> Result<MenuItem, ApiError> {
    let client = reqwest::Client::new();
    let resp = client
        .post(format!("{}/api/staff/menu", api_url()))
        .json(item)
        .send()
        .await?;
    read_json(resp).await
}

pub async fn update_menu_item(id: &str, item: &NewMenuItem) -> Result<MenuItem, ApiError> {
    let client = reqwest::Client::new();
    let resp = client
        .put(format!("{}/api/staff/menu/{}", api_url(), id))
        .json(item)
        .send()
        .await?;
    read_json(resp).await
}

/// Destructive; the confirmation step lives with the caller.
pub async fn delete_menu_item(id: &str) -> Result<String, ApiError> {
    let client = reqwest::Client::new();
    let resp = client
        .delete(format!("{}/api/staff/menu/{}", api_url(), id))
        .send()
        .await?;
    if resp.status().is_success() {
        let body: ApiMessage = read_json(resp).await?;
        Ok(body
            .message
            .unwrap_or_else(|| "Menu item deleted".to_string()))
    } else {
        Err(error_from_response(resp).await)
    }
}
