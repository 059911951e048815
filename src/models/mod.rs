//! 数据模型模块
//! 用户与角色、服务商入驻申请、权限矩阵、审计日志

pub mod application;
pub mod audit;
pub mod permission;
pub mod user;
