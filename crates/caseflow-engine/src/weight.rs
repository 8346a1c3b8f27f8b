use crate::normalize::fold;

/// Weight range for ranking alert types against the user-ordered
/// configuration list.
pub const ALERT_TYPE_WEIGHT_MAX: u32 = 500;
pub const ALERT_TYPE_WEIGHT_MIN: u32 = 50;

/// Weight range for ranking case statuses against the user-ordered, opt-in
/// status list.
pub const CASE_STATUS_WEIGHT_MAX: u32 = 5000;
pub const CASE_STATUS_WEIGHT_MIN: u32 = 500;

/// Exponential-decay rank weight for position `index` in a user-ordered
/// list of `count` entries.
///
/// The decay factor is `(min/max)^(1/(count-1))`, so position 0 weighs
/// `max` and position `count-1` weighs `min`; positions past the end clamp
/// to `min`. A single-entry (or empty) list always weighs `max`.
///
/// # Examples
///
/// ```
/// use caseflow_engine::weight::rank_weight;
///
/// assert_eq!(rank_weight(0, 5, 500, 50), 500);
/// assert_eq!(rank_weight(1, 5, 500, 50), 281);
/// assert_eq!(rank_weight(4, 5, 500, 50), 50);
/// ```
pub fn rank_weight(index: usize, count: usize, max: u32, min: u32) -> u32 {
    if count <= 1 {
        return max;
    }
    if index >= count {
        return min;
    }
    let decay = (f64::from(min) / f64::from(max)).powf(1.0 / (count as f64 - 1.0));
    let weight = f64::from(max) * decay.powi(index as i32);
    (weight.round() as u32).max(min)
}

/// Rank weight for an alert type against the configured order list.
/// Types absent from the configuration fall to the minimum weight.
pub fn alert_type_weight(alert_type: &str, configured_order: &[String]) -> u32 {
    let folded = fold(alert_type);
    match configured_order.iter().position(|t| fold(t) == folded) {
        Some(index) => rank_weight(
            index,
            configured_order.len(),
            ALERT_TYPE_WEIGHT_MAX,
            ALERT_TYPE_WEIGHT_MIN,
        ),
        None => ALERT_TYPE_WEIGHT_MIN,
    }
}

/// Rank weight for a case status against the opt-in status order list.
/// Statuses not opted in contribute nothing.
pub fn case_status_weight(status: &str, opted_in_order: &[String]) -> u32 {
    let folded = fold(status);
    match opted_in_order.iter().position(|s| fold(s) == folded) {
        Some(index) => rank_weight(
            index,
            opted_in_order.len(),
            CASE_STATUS_WEIGHT_MAX,
            CASE_STATUS_WEIGHT_MIN,
        ),
        None => 0,
    }
}
