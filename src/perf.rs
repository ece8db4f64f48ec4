// ==========================================
// 导出 / 导入分阶段计时
// ==========================================
// 用法: 每个阶段结束时 mark；drop 时在 target "perf" 下输出一条汇总
// 慢操作: 设置 MARKETPLACE_BRIDGE_SLOW_OP_MS 后，总耗时超过阈值追加一条 warn
// ==========================================

use std::time::Instant;

const SLOW_OP_ENV: &str = "MARKETPLACE_BRIDGE_SLOW_OP_MS";

/// ```ignore
/// let mut timer = StageTimer::start("export");
/// timer.mark("select");
/// timer.mark("save");
/// ```
pub struct StageTimer {
    op: &'static str,
    started: Instant,
    last_mark: Instant,
    stages: Vec<(&'static str, u128)>,
    slow_threshold_ms: Option<u128>,
}

impl StageTimer {
    pub fn start(op: &'static str) -> Self {
        let now = Instant::now();
        Self {
            op,
            started: now,
            last_mark: now,
            stages: Vec::new(),
            slow_threshold_ms: parse_threshold(std::env::var(SLOW_OP_ENV).ok().as_deref()),
        }
    }

    /// 记录上一个 mark 以来的耗时
    pub fn mark(&mut self, stage: &'static str) {
        let now = Instant::now();
        self.stages
            .push((stage, now.duration_since(self.last_mark).as_millis()));
        self.last_mark = now;
    }

    pub fn stages(&self) -> &[(&'static str, u128)] {
        &self.stages
    }
}

impl Drop for StageTimer {
    fn drop(&mut self) {
        let elapsed_ms = self.started.elapsed().as_millis();
        let stages = format_stages(&self.stages);

        tracing::info!(target: "perf", op = self.op, elapsed_ms, stages = %stages, "done");

        if let Some(threshold) = self.slow_threshold_ms {
            if elapsed_ms >= threshold {
                tracing::warn!(
                    target: "perf",
                    op = self.op,
                    elapsed_ms,
                    threshold_ms = threshold,
                    stages = %stages,
                    "slow operation"
                );
            }
        }
    }
}

/// `select=3ms load=12ms`
fn format_stages(stages: &[(&'static str, u128)]) -> String {
    stages
        .iter()
        .map(|(name, ms)| format!("{}={}ms", name, ms))
        .collect::<Vec<_>>()
        .join(" ")
}

/// 未设置 / 非数字 / 0 均视为关闭
fn parse_threshold(raw: Option<&str>) -> Option<u128> {
    raw.and_then(|v| v.trim().parse::<u128>().ok())
        .filter(|ms| *ms > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marks_keep_stage_order() {
        let mut timer = StageTimer::start("export");
        timer.mark("select");
        timer.mark("load_template");
        timer.mark("save");

        let names: Vec<_> = timer.stages().iter().map(|(name, _)| *name).collect();
        assert_eq!(names, vec!["select", "load_template", "save"]);
    }

    #[test]
    fn test_stage_times_sum_within_total() {
        let mut timer = StageTimer::start("import");
        std::thread::sleep(std::time::Duration::from_millis(5));
        timer.mark("load");
        timer.mark("rows");

        let sum: u128 = timer.stages().iter().map(|(_, ms)| *ms).sum();
        assert!(timer.stages()[0].1 >= 5);
        assert!(sum <= timer.started.elapsed().as_millis());
    }

    #[test]
    fn test_format_stages() {
        assert_eq!(format_stages(&[]), "");
        assert_eq!(
            format_stages(&[("select", 3), ("save", 12)]),
            "select=3ms save=12ms"
        );
    }

    #[test]
    fn test_parse_threshold() {
        assert_eq!(parse_threshold(None), None);
        assert_eq!(parse_threshold(Some(" 250 ")), Some(250));
        assert_eq!(parse_threshold(Some("0")), None);
        assert_eq!(parse_threshold(Some("fast")), None);
    }
}
