//! 编辑器指标

use std::time::Instant;

use metrics::{counter, histogram};

pub struct EditorMetrics;

impl EditorMetrics {
    /// 记录一次矩阵加载结果
    pub fn record_load(outcome: &'static str) {
        counter!("rbac_matrix_loads_total", "outcome" => outcome).increment(1);
    }

    /// 记录一次矩阵保存结果
    pub fn record_save(start: Instant, outcome: &'static str) {
        histogram!("rbac_matrix_save_duration_ms", "outcome" => outcome)
            .record(start.elapsed().as_millis() as f64);
        counter!("rbac_matrix_saves_total", "outcome" => outcome).increment(1);
    }

    /// 被丢弃的过期响应
    pub fn record_stale(operation: &'static str) {
        counter!("rbac_stale_responses_total", "operation" => operation).increment(1);
    }

    /// 角色组成员提交结果
    pub fn record_assignment_commit(outcome: &'static str) {
        counter!("rbac_assignment_commits_total", "outcome" => outcome).increment(1);
    }

    /// HTTP 请求
    pub fn record_request(start: Instant, method: &'static str, status: u16) {
        histogram!("rbac_api_request_duration_ms", "method" => method)
            .record(start.elapsed().as_millis() as f64);
        counter!(
            "rbac_api_requests_total",
            "method" => method,
            "status" => status.to_string()
        )
        .increment(1);
    }
}
