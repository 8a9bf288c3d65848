/// Resolves the capacity that applies to one guest. The per-guest override
/// always wins when present, even when it is smaller than (or equal to zero
/// relative to) the event default. None = unlimited.
pub fn effective_limit(global_max: Option<i64>, per_guest_max: Option<i64>) -> Option<i64> {
    per_guest_max.or(global_max)
}

/// Decides whether a party of `1 + additional_count` fits the effective
/// limit. `Ok(None)` means unlimited; `Ok(Some(n))` is the seats left after
/// this party. The invitee counts against their own limit, so the rejection
/// message reports the allowed number of *additional* guests.
pub fn check(
    global_max: Option<i64>,
    additional_count: usize,
    per_guest_max: Option<i64>,
) -> Result<Option<i64>, String> {
    let Some(max) = effective_limit(global_max, per_guest_max) else {
        return Ok(None);
    };

    let total = 1 + additional_count as i64;
    if total > max {
        let allowed = (max - 1).max(0);
        let noun = if allowed == 1 { "guest" } else { "guests" };
        return Err(format!("Only {} additional {} allowed", allowed, noun));
    }

    Ok(Some(max - total))
}
