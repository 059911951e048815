//! 场馆预订平台核心库
//! 身份、角色权限矩阵与服务商入驻审核

pub mod auth;
pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;
pub mod store;
pub mod telemetry;
