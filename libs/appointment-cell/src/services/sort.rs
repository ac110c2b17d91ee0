use std::cmp::Ordering;

use crate::models::{Appointment, SortKey};

/// Order a list by a sort key from the query string. Unknown keys fall
/// back to a copy in input order rather than an error. The input is never
/// mutated.
pub fn sort_appointments(appointments: &[Appointment], sort_key: &str) -> Vec<Appointment> {
    match SortKey::parse(sort_key) {
        Some(key) => sort_by_key(appointments, key),
        None => appointments.to_vec(),
    }
}

/// Copy-then-sort by a parsed key. `sort_by` is stable, so equal keys keep
/// their relative input order.
pub fn sort_by_key(appointments: &[Appointment], key: SortKey) -> Vec<Appointment> {
    let mut sorted = appointments.to_vec();

    match key {
        SortKey::DateAsc => sorted.sort_by(|a, b| a.starts_at.cmp(&b.starts_at)),
        SortKey::DateDesc => sorted.sort_by(|a, b| b.starts_at.cmp(&a.starts_at)),
        SortKey::DealerAsc => sorted.sort_by(|a, b| compare_folded(&a.dealer_name, &b.dealer_name)),
        SortKey::DealerDesc => sorted.sort_by(|a, b| compare_folded(&b.dealer_name, &a.dealer_name)),
        SortKey::StatusAsc => {
            sorted.sort_by(|a, b| compare_folded(&a.status.to_string(), &b.status.to_string()))
        }
        SortKey::StatusDesc => {
            sorted.sort_by(|a, b| compare_folded(&b.status.to_string(), &a.status.to_string()))
        }
        SortKey::DurationAsc => sorted.sort_by(|a, b| a.duration_minutes.cmp(&b.duration_minutes)),
        SortKey::DurationDesc => sorted.sort_by(|a, b| b.duration_minutes.cmp(&a.duration_minutes)),
    }

    sorted
}

// Case-insensitive ordering over Unicode lowercase folds.
fn compare_folded(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}
