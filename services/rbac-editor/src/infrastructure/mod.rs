//! 基础设施层

pub mod http;
pub mod metrics;
