pub mod client_ip;
pub mod contact_service;
pub mod notifier;
