use crate::models::{Period, WindowPoint, BUCKET_COUNT, PERIOD_COUNT};

/// Minimum display scale: keeps the chart visually stable when every window
/// is small, and keeps the vertical projection away from division by zero.
pub const DISPLAY_FLOOR: i64 = 6;

/// Span of one period on the global minute axis.
pub const PERIOD_SPAN: u32 = 20;

/// Representative minute for each bucket inside its period block, in the
/// declared countdown bucket order ("19-15" first). The highest-countdown
/// bucket sits nearest the middle of the block, so no bucket reversal is
/// needed on the way in from the reader.
pub const BUCKET_MINUTES: [u32; BUCKET_COUNT] = [17, 12, 7, 2];

/// Smoothing passes applied to the per-minute profile.
const SMOOTHING_PASSES: usize = 4;

/// Number of slots on the 0..=60 minute axis.
pub const MINUTE_SLOTS: usize = 61;

/// Map 3 periods to 12 windows in (period, bucket) order, each tagged with
/// its representative minute.
pub fn windows(periods: &[Period; PERIOD_COUNT]) -> Vec<WindowPoint> {
    let mut out = Vec::with_capacity(PERIOD_COUNT * BUCKET_COUNT);
    for (p, period) in periods.iter().enumerate() {
        for b in 0..BUCKET_COUNT {
            out.push(WindowPoint {
                minute: p as u32 * PERIOD_SPAN + BUCKET_MINUTES[b],
                value: period.scored[b].saturating_sub(period.conceded[b]),
            });
        }
    }
    out
}

/// Display scale: `max(1, max |value|, DISPLAY_FLOOR)`. Saturating, since
/// the reader accepts any JSON integer the source cares to hold.
pub fn max_scale(windows: &[WindowPoint]) -> i64 {
    windows
        .iter()
        .map(|point| point.value.saturating_abs())
        .max()
        .unwrap_or(0)
        .max(1)
        .max(DISPLAY_FLOOR)
}

/// Scatter the windows onto a 61-slot per-minute profile and run a few
/// passes of the 3-tap moving average (0.25/0.5/0.25) over interior slots,
/// then clamp to the display floor. Alternative to the discrete 12-point
/// representation, selected by the chart profile flag.
pub fn smooth_profile(windows: &[WindowPoint]) -> Vec<f64> {
    let mut slots = vec![0.0f64; MINUTE_SLOTS];
    for point in windows {
        let minute = point.minute.min(MINUTE_SLOTS as u32 - 1) as usize;
        slots[minute] += point.value as f64;
    }

    for _ in 0..SMOOTHING_PASSES {
        let prev = slots.clone();
        for i in 1..MINUTE_SLOTS - 1 {
            slots[i] = 0.25 * prev[i - 1] + 0.5 * prev[i] + 0.25 * prev[i + 1];
        }
    }

    let floor = DISPLAY_FLOOR as f64;
    for value in &mut slots {
        *value = value.clamp(-floor, floor);
    }
    slots
}

/// Split a point series into the positive and negative sign-clipped series
/// used for the two independent area fills.
pub fn sign_split(points: &[(f64, f64)]) -> (Vec<(f64, f64)>, Vec<(f64, f64)>) {
    let positive = points.iter().map(|&(x, y)| (x, y.max(0.0))).collect();
    let negative = points.iter().map(|&(x, y)| (x, y.min(0.0))).collect();
    (positive, negative)
}
