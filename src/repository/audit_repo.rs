//! Audit log repository (审计日志文档访问)

use crate::{error::AppError, models::audit::AuditRecord, store::Store};
use std::sync::Arc;

pub struct AuditRepository {
    store: Arc<Store>,
}

impl AuditRepository {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// 追加审计日志条目
    pub fn append(&self, record: &AuditRecord) -> Result<(), AppError> {
        self.store.with_tx(|state| {
            state.audit_log.push(record.clone());
            Ok(())
        })
    }

    /// 最近的审计日志，最新在前
    pub fn recent(&self, limit: usize) -> Vec<AuditRecord> {
        self.store.read(|state| {
            state
                .audit_log
                .iter()
                .rev()
                .take(limit)
                .cloned()
                .collect()
        })
    }
}
