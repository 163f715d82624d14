// ==========================================
// ERP 产品目录 - 搜索输入防抖
// ==========================================
// 职责: 合并连续输入，静默 delay 之后才提交搜索词
// 说明: 时钟由调用方注入（Instant），便于测试
// ==========================================

use std::time::{Duration, Instant};

pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 300;

#[derive(Debug, Clone)]
pub struct SearchDebouncer {
    delay: Duration,
    pending: Option<(String, Instant)>, // (搜索词, 到期时刻)
}

impl Default for SearchDebouncer {
    fn default() -> Self {
        Self::from_millis(DEFAULT_SEARCH_DEBOUNCE_MS)
    }
}

impl SearchDebouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn from_millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// 记录一次输入；覆盖尚未提交的输入并重新计时
    pub fn input(&mut self, text: impl Into<String>, now: Instant) {
        self.pending = Some((text.into(), now + self.delay));
    }

    /// 到期则取出待提交的搜索词
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        match &self.pending {
            Some((_, deadline)) if *deadline <= now => self.pending.take().map(|(text, _)| text),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// 立即取出待提交的搜索词（忽略剩余等待时间）
    pub fn flush(&mut self) -> Option<String> {
        self.pending.take().map(|(text, _)| text)
    }
}
