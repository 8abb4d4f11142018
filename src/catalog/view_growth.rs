//! View-growth estimator
//!
//! Every detail fetch bumps a resource's view counter by a pseudo-random,
//! recency-weighted amount. The longer a resource has gone without a bump,
//! the larger (and wider) the increment range becomes, saturating after a day.

use chrono::{DateTime, Utc};

/// 饱和时长（小时）
const SATURATION_HOURS: f64 = 24.0;

const MIN_BASE: i64 = 10;
const MIN_SPAN: f64 = 70.0;
const MAX_BASE: i64 = 20;
const MAX_SPAN: f64 = 80.0;

/// 一次浏览量增长
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewBump {
    pub increment: i64,
    pub updated_at: DateTime<Utc>,
}

/// 计算增量区间 `[min_inc, max_inc]`
///
/// `hours_diff` 为负时按 0 处理。
pub fn increment_bounds(hours_diff: f64) -> (i64, i64) {
    let hours = if hours_diff.is_finite() {
        hours_diff.max(0.0)
    } else if hours_diff > 0.0 {
        SATURATION_HOURS
    } else {
        0.0
    };
    let time_factor = (hours / SATURATION_HOURS).min(1.0);

    let min_inc = MIN_BASE + (MIN_SPAN * time_factor).floor() as i64;
    let max_inc = MAX_BASE + (MAX_SPAN * time_factor).floor() as i64;
    (min_inc, max_inc)
}

/// 上一次增长的基准时间：updated_at 缺省时回落到 created_at
pub fn baseline(updated_at: Option<DateTime<Utc>>, created_at: DateTime<Utc>) -> DateTime<Utc> {
    match updated_at {
        Some(ts) if ts.timestamp() > 0 => ts,
        _ => created_at,
    }
}

/// 用注入的随机源估算一次增长
///
/// `sample(span)` 必须返回 `[0, span]` 内的整数（含两端）。
pub fn estimate_with<F>(last_update: DateTime<Utc>, now: DateTime<Utc>, sample: F) -> ViewBump
where
    F: FnOnce(i64) -> i64,
{
    let hours_diff = (now - last_update).num_milliseconds() as f64 / 3_600_000.0;
    let (min_inc, max_inc) = increment_bounds(hours_diff);

    let increment = if max_inc > min_inc {
        let span = max_inc - min_inc;
        min_inc + sample(span).clamp(0, span)
    } else {
        min_inc
    };

    ViewBump {
        increment,
        updated_at: now,
    }
}

/// 使用线程随机数估算一次增长
pub fn estimate(last_update: DateTime<Utc>, now: DateTime<Utc>) -> ViewBump {
    estimate_with(last_update, now, |span| rand::random_range(0..=span))
}
