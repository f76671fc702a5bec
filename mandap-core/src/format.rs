//! Human-readable formatting for list views.

use chrono::NaiveDate;

/// Long date form, e.g. `15 December 2025`.
pub fn format_event_date(date: NaiveDate) -> String {
    date.format("%-d %B %Y").to_string()
}

/// Rupee amount with Indian digit grouping, e.g. `₹5,70,000`.
pub fn format_rupees(amount: u64) -> String {
    let digits = amount.to_string();
    if digits.len() <= 3 {
        return format!("₹{}", digits);
    }
    let (head, last_three) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut rest = head;
    while rest.len() > 2 {
        let (front, pair) = rest.split_at(rest.len() - 2);
        groups.push(pair);
        rest = front;
    }
    groups.push(rest);
    groups.reverse();
    format!("₹{},{}", groups.join(","), last_three)
}
