use crate::models::{Appointment, StatusCount, StatusFilter};

/// Select the appointments matching a status filter. `All` yields a copy
/// of the whole list; order and field values are preserved, the input is
/// never mutated.
pub fn filter_by_status(appointments: &[Appointment], filter: StatusFilter) -> Vec<Appointment> {
    appointments
        .iter()
        .filter(|appointment| filter.matches(appointment.status))
        .cloned()
        .collect()
}

/// Build the status filter index for a list: one `{value, label, count}`
/// entry per recognized filter value, `All` counting the full list.
pub fn status_counts(appointments: &[Appointment]) -> Vec<StatusCount> {
    StatusFilter::ALL_VALUES
        .iter()
        .map(|filter| StatusCount {
            value: *filter,
            label: filter.label().to_string(),
            count: appointments
                .iter()
                .filter(|appointment| filter.matches(appointment.status))
                .count(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AppointmentStatus, MeetingType};
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn appointment(dealer_name: &str, status: AppointmentStatus) -> Appointment {
        Appointment {
            id: Uuid::new_v4(),
            dealer_id: Uuid::new_v4(),
            dealer_name: dealer_name.to_string(),
            dealer_contact: None,
            starts_at: Utc.with_ymd_and_hms(2026, 8, 10, 9, 0, 0).unwrap(),
            ends_at: None,
            duration_minutes: 30,
            status,
            notes: None,
            location: None,
            meeting_type: MeetingType::InPerson,
            created_at: None,
            updated_at: None,
        }
    }

    fn sample_list() -> Vec<Appointment> {
        vec![
            appointment("Apex Motors", AppointmentStatus::Pending),
            appointment("Brightway Auto", AppointmentStatus::Confirmed),
            appointment("Cedar Lane Cars", AppointmentStatus::Confirmed),
            appointment("Downtown Deals", AppointmentStatus::Cancelled),
        ]
    }

    #[test]
    fn all_filter_returns_full_copy() {
        let list = sample_list();
        let filtered = filter_by_status(&list, StatusFilter::All);

        assert_eq!(filtered.len(), list.len());
        assert_eq!(filtered[0].dealer_name, "Apex Motors");
    }

    #[test]
    fn status_filter_selects_matching_subset_in_order() {
        let list = sample_list();
        let filtered = filter_by_status(&list, StatusFilter::Confirmed);

        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0].dealer_name, "Brightway Auto");
        assert_eq!(filtered[1].dealer_name, "Cedar Lane Cars");
    }

    #[test]
    fn counts_agree_with_filtered_lengths() {
        let list = sample_list();

        for entry in status_counts(&list) {
            let filtered = filter_by_status(&list, entry.value);
            assert_eq!(filtered.len(), entry.count, "mismatch for {}", entry.value);
        }
    }

    #[test]
    fn empty_input_yields_zero_counts_everywhere() {
        let counts = status_counts(&[]);

        assert_eq!(counts.len(), 4);
        assert!(counts.iter().all(|entry| entry.count == 0));
        assert!(filter_by_status(&[], StatusFilter::Pending).is_empty());
        assert!(filter_by_status(&[], StatusFilter::All).is_empty());
    }

    #[test]
    fn counts_carry_display_labels() {
        let counts = status_counts(&sample_list());

        let labels: Vec<&str> = counts.iter().map(|entry| entry.label.as_str()).collect();
        assert_eq!(labels, vec!["All", "Pending", "Confirmed", "Cancelled"]);
    }
}
