//! Plain-text export of the grouped view, and the clipboard it is copied to.
use std::future::Future;

use thiserror::Error;

use crate::GroupedView;

/// Currency symbol used by the report unless configured otherwise.
pub const DEFAULT_CURRENCY_SYMBOL: &str = "₹";

#[derive(Error, Debug)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Destination of the exported report.
pub trait Clipboard {
    fn set_text(&self, text: &str) -> impl Future<Output = Result<(), ClipboardError>> + Send;
}

/// Renders `view` group by group, in display order.
///
/// Every entry takes two lines and a blank one:
///
/// ```text
/// Name: Coffee
/// 05/1/2024 - ₹ 3.50
///
/// ```
///
/// and each group is closed by one more blank line.
pub fn export_report(view: &GroupedView, currency_symbol: &str) -> String {
    let mut content = String::new();
    for group in view {
        for entry in &group.entries {
            content.push_str(&format!(
                "Name: {}\n{} - {currency_symbol} {:.2}\n\n",
                entry.name, group.key, entry.cost
            ));
        }
        content.push('\n');
    }
    content
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use chrono_tz::Tz;

    use super::*;
    use crate::Entry;

    fn entry(name: &str, cost: f64, month: u32, day: u32) -> Entry {
        Entry::new(
            name.to_string(),
            cost,
            Utc.with_ymd_and_hms(2024, month, day, 10, 0, 0).unwrap(),
        )
    }

    #[test]
    fn report_lists_groups_in_display_order() {
        let entries = vec![
            entry("Milk", 40.0, 1, 5),
            entry("Bus", 20.5, 3, 1),
            entry("Bread", 30.0, 1, 5),
        ];
        let view = GroupedView::build(&entries, "", &Tz::UTC);

        let report = export_report(&view, DEFAULT_CURRENCY_SYMBOL);
        assert_eq!(
            report,
            "Name: Bus\n01/3/2024 - ₹ 20.50\n\n\n\
             Name: Milk\n05/1/2024 - ₹ 40.00\n\n\
             Name: Bread\n05/1/2024 - ₹ 30.00\n\n\n"
        );
    }

    #[test]
    fn report_mentions_every_entry_once() {
        let entries = vec![
            entry("Coffee", 3.456, 2, 2),
            entry("Tea", 2.0, 2, 3),
            entry("Snacks", 15.1, 2, 3),
        ];
        let view = GroupedView::build(&entries, "", &Tz::UTC);
        let report = export_report(&view, "$");

        assert_eq!(report.matches("Name: ").count(), view.entry_count());
        for needle in ["Name: Coffee\n", "$ 3.46", "Name: Tea\n", "$ 2.00", "$ 15.10"] {
            assert_eq!(report.matches(needle).count(), 1, "{needle}");
        }
    }

    #[test]
    fn empty_view_exports_nothing() {
        let view = GroupedView::build(&[], "", &Tz::UTC);
        assert_eq!(export_report(&view, DEFAULT_CURRENCY_SYMBOL), "");
    }
}
