pub mod api_backend;
pub mod cart;
pub mod checkout;
pub mod constants;
pub mod data_types;
pub mod session;
pub mod shared_main;
pub mod wallet_gate;
