use crate::clean::normalize::normalize_email;
use crate::table::Table;
use std::collections::HashSet;

/// Row counts from one cleaning pass. `rows_before` counts rows that
/// survived the unusable-email drop, not the raw input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterCounts {
    pub rows_before: usize,
    pub rows_removed: usize,
    pub rows_after: usize,
}

/// Normalized address set from one column of a table. Empty cells map to
/// the empty string, which never matches a kept contact row.
pub fn bounce_set(table: &Table, column: usize) -> HashSet<String> {
    table
        .rows
        .iter()
        .map(|row| normalize_email(cell_at(row, column)))
        .collect()
}

/// Drop rows without a usable address, then drop rows whose address is in
/// the bounce set. Addresses are compared in normalized form but cells are
/// never rewritten; surviving rows keep their original content and order.
pub fn drop_bounced(table: &mut Table, column: usize, bounced: &HashSet<String>) -> FilterCounts {
    table
        .rows
        .retain(|row| !normalize_email(cell_at(row, column)).is_empty());
    let rows_before = table.rows.len();

    table
        .rows
        .retain(|row| !bounced.contains(&normalize_email(cell_at(row, column))));
    let rows_after = table.rows.len();

    FilterCounts {
        rows_before,
        rows_removed: rows_before - rows_after,
        rows_after,
    }
}

fn cell_at(row: &[String], column: usize) -> &str {
    row.get(column).map(String::as_str).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact_table(rows: &[(&str, &str)]) -> Table {
        let mut table = Table::new(vec!["Nombre".to_string(), "Email".to_string()]);
        for (name, email) in rows {
            table.push_row(vec![name.to_string(), email.to_string()]);
        }
        table
    }

    fn set_of(addresses: &[&str]) -> HashSet<String> {
        addresses.iter().map(|a| a.to_string()).collect()
    }

    #[test]
    fn test_removes_bounced_rows_in_order() {
        let mut table = contact_table(&[
            ("Ana", "ana@example.com"),
            ("Luis", "luis@example.com"),
            ("Marta", "marta@example.com"),
        ]);

        let counts = drop_bounced(&mut table, 1, &set_of(&["luis@example.com"]));

        assert_eq!(
            counts,
            FilterCounts {
                rows_before: 3,
                rows_removed: 1,
                rows_after: 2,
            }
        );
        assert_eq!(table.rows[0][0], "Ana");
        assert_eq!(table.rows[1][0], "Marta");
    }

    #[test]
    fn test_matching_is_normalized() {
        let mut table = contact_table(&[("Ana", "  Ana@Example.COM ")]);

        let counts = drop_bounced(&mut table, 1, &set_of(&["ana@example.com"]));
        assert_eq!(counts.rows_removed, 1);
        assert_eq!(counts.rows_after, 0);
    }

    #[test]
    fn test_kept_rows_keep_original_content() {
        let mut table = contact_table(&[("Ana", " Ana.Maria@Example.COM ")]);

        let counts = drop_bounced(&mut table, 1, &HashSet::new());
        assert_eq!(counts.rows_removed, 0);
        assert_eq!(table.rows[0], vec!["Ana", " Ana.Maria@Example.COM "]);
    }

    #[test]
    fn test_unusable_rows_dropped_before_counting() {
        let mut table = contact_table(&[
            ("Ana", "ana@example.com"),
            ("SinCorreo", ""),
            ("Nulo", "nan"),
            ("Marta", "marta@example.com"),
        ]);

        let counts = drop_bounced(&mut table, 1, &set_of(&["marta@example.com"]));

        assert_eq!(counts.rows_before, 2);
        assert_eq!(counts.rows_removed, 1);
        assert_eq!(counts.rows_after, 1);
        assert_eq!(table.rows[0][0], "Ana");
    }

    #[test]
    fn test_filtering_is_idempotent() {
        let mut table = contact_table(&[
            ("Ana", "ana@example.com"),
            ("Luis", "luis@example.com"),
        ]);
        let bounced = set_of(&["luis@example.com"]);

        let first = drop_bounced(&mut table, 1, &bounced);
        assert_eq!(first.rows_removed, 1);

        let second = drop_bounced(&mut table, 1, &bounced);
        assert_eq!(second.rows_removed, 0);
        assert_eq!(second.rows_before, first.rows_after);
        assert_eq!(second.rows_after, first.rows_after);
    }

    #[test]
    fn test_bounce_set_normalizes_and_deduplicates() {
        let mut table = Table::new(vec!["Email".to_string()]);
        table.push_row(vec![" User@X.com ".to_string()]);
        table.push_row(vec!["user@x.com".to_string()]);
        table.push_row(vec!["".to_string()]);

        let set = bounce_set(&table, 0);
        assert_eq!(set.len(), 2);
        assert!(set.contains("user@x.com"));
        assert!(set.contains(""));
    }

    #[test]
    fn test_empty_bounce_entry_never_removes_contacts() {
        let mut table = contact_table(&[("Ana", "ana@example.com")]);

        // An empty string in the bounce set only matches rows that were
        // already dropped as unusable.
        let counts = drop_bounced(&mut table, 1, &set_of(&[""]));
        assert_eq!(counts.rows_removed, 0);
        assert_eq!(counts.rows_after, 1);
    }
}
