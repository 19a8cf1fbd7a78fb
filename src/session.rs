use std::fmt;

use serde::Serialize;

use crate::api_backend::{api_url, read_json};
use crate::data_types::api_data_types::{ApiMessage, LoginResponse};
use crate::data_types::ApiError;

pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Student,
    Staff,
    Admin,
}

impl Role {
    fn from_wire(raw: &str) -> Option<Role> {
        match raw {
            "student" => Some(Role::Student),
            "staff" => Some(Role::Staff),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Staff => "staff",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Held and passed explicitly; nothing is stashed in ambient storage.
/// Dropping it (via [`logout`]) is the whole teardown.
#[derive(Debug, Clone)]
pub struct Session {
    pub user_id: String,
    pub name: String,
    pub role: Role,
    pub token: String,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RegisterRequest<'a> {
    name: &'a str,
    email: &'a str,
    password: &'a str,
    // self-service registration is student-only
    role: &'static str,
}

pub async fn login(credentials: &Credentials) -> Result<Session, ApiError> {
    let client = reqwest::Client::new();
    let resp = client
        .post(format!("{}/api/login", api_url()))
        .json(&LoginRequest {
            email: &credentials.email,
            password: &credentials.password,
        })
        .send()
        .await?;
    let body: LoginResponse = read_json(resp).await?;

    let role = Role::from_wire(&body.role)
        .ok_or_else(|| ApiError::MalformedResponse(format!("unknown role '{}'", body.role)))?;

    Ok(Session {
        user_id: body.id,
        name: body.name,
        role,
        token: body.token,
    })
}

pub async fn register(name: &str, email: &str, password: &str) -> Result<String, ApiError> {
    let client = reqwest::Client::new();
    let resp = client
        .post(format!("{}/api/register", api_url()))
        .json(&RegisterRequest {
            name,
            email,
            password,
            role: "student",
        })
        .send()
        .await?;
    let body: ApiMessage = read_json(resp).await?;
    Ok(body.message.unwrap_or_else(|| "Registered".to_string()))
}

pub fn logout(session: Session) {
    log::info!("{} ({}) logged out", session.name, session.role);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_roles_parse() {
        assert_eq!(Role::from_wire("student"), Some(Role::Student));
        assert_eq!(Role::from_wire("staff"), Some(Role::Staff));
        assert_eq!(Role::from_wire("admin"), Some(Role::Admin));
        assert_eq!(Role::from_wire("superuser"), None);
    }
}
