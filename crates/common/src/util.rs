//! Display helpers for wallet addresses and voting deadlines

use chrono::{DateTime, Utc};

/// Shorten a wallet address for display, e.g. `0x1234...7890`.
///
/// Addresses too short to truncate are returned unchanged.
pub fn short_address(address: &str) -> String {
    if address.len() <= 10 {
        return address.to_string();
    }

    match (address.get(..6), address.get(address.len() - 4..)) {
        (Some(head), Some(tail)) => format!("{}...{}", head, tail),
        _ => address.to_string(),
    }
}

/// Human-readable time left until a voting deadline
pub fn time_remaining(ends_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let left = ends_at - now;

    if left.num_seconds() <= 0 {
        return "Ended".to_string();
    }

    let days = left.num_days();
    let hours = left.num_hours() % 24;
    let minutes = left.num_minutes() % 60;

    if days > 0 {
        format!("{} day{} left", days, if days != 1 { "s" } else { "" })
    } else if hours > 0 {
        format!("{} hour{} left", hours, if hours != 1 { "s" } else { "" })
    } else if minutes > 0 {
        format!("{} minute{} left", minutes, if minutes != 1 { "s" } else { "" })
    } else {
        "Ending soon".to_string()
    }
}
