//! Sample user rows for the table demo

use chrono::{Datelike, Duration, Local};
use rand::seq::SliceRandom;
use rand::Rng;
use serde_json::{json, Map, Value};

use super::{ColumnAlign, TableColumn};

const FIRST_NAMES: &[&str] = &[
    "Ada", "Grace", "Alan", "Barbara", "Dennis", "Edsger", "Frances", "Ken", "Linus", "Margaret",
    "Niklaus", "Radia", "Tim", "Donald", "Shafi", "John",
];

const LAST_NAMES: &[&str] = &[
    "Lovelace", "Hopper", "Turing", "Liskov", "Ritchie", "Dijkstra", "Allen", "Thompson",
    "Torvalds", "Hamilton", "Wirth", "Perlman", "Berners-Lee", "Knuth", "Goldwasser", "Backus",
];

const DOMAINS: &[&str] = &["example.com", "example.org", "example.net"];

const STATUSES: &[&str] = &["active", "inactive", "pending", "suspended"];

/// Generate `count` random user records plus the columns that display them
///
/// Ids run from 1; every third row is highlighted through `class_name`.
pub fn generate_user_data(count: usize) -> (Vec<Map<String, Value>>, Vec<TableColumn>) {
    let mut rng = rand::thread_rng();
    let today = Local::now().date_naive();

    let users = (1..=count)
        .map(|id| {
            let first = FIRST_NAMES.choose(&mut rng).copied().unwrap_or("Ada");
            let last = LAST_NAMES.choose(&mut rng).copied().unwrap_or("Lovelace");
            let domain = DOMAINS.choose(&mut rng).copied().unwrap_or("example.com");
            let status = STATUSES.choose(&mut rng).copied().unwrap_or("active");
            // Any day from January 1st up to today
            let created = today - Duration::days(rng.gen_range(0..=i64::from(today.ordinal0())));

            let class_name = if id % 3 == 0 { "bg-yellow-50" } else { "" };

            let mut user = Map::new();
            user.insert("id".into(), json!(id));
            user.insert("name".into(), json!(format!("{first} {last}")));
            user.insert(
                "email".into(),
                json!(format!("{}.{}@{domain}", first.to_lowercase(), last.to_lowercase())),
            );
            user.insert("status".into(), json!(status));
            user.insert(
                "created_at".into(),
                json!(created.format("%Y-%m-%d").to_string()),
            );
            user.insert("class_name".into(), json!(class_name));
            user
        })
        .collect();

    (users, user_columns())
}

/// Name, Email, Status, Created
pub fn user_columns() -> Vec<TableColumn> {
    vec![
        TableColumn::new("Name", "name", ColumnAlign::Left),
        TableColumn::new("Email", "email", ColumnAlign::Left),
        TableColumn::new("Status", "status", ColumnAlign::Center),
        TableColumn::new("Created", "created_at", ColumnAlign::Right),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::table::{RowId, TableComponent};

    #[test]
    fn test_user_data_shape() {
        let (users, columns) = generate_user_data(15);
        assert_eq!(users.len(), 15);
        assert_eq!(columns.len(), 4);

        for (i, user) in users.iter().enumerate() {
            let id = i + 1;
            assert_eq!(user["id"], id);
            for column in &columns {
                assert!(user.contains_key(&column.key), "missing {}", column.key);
            }
            let expected_class = if id % 3 == 0 { "bg-yellow-50" } else { "" };
            assert_eq!(user["class_name"], expected_class);
            assert!(STATUSES.contains(&user["status"].as_str().unwrap()));
            assert!(user["email"].as_str().unwrap().contains('@'));
        }
    }

    #[test]
    fn test_created_at_is_this_year() {
        let year = Local::now().year().to_string();
        let (users, _) = generate_user_data(30);
        for user in users {
            assert!(user["created_at"].as_str().unwrap().starts_with(&year));
        }
    }

    #[test]
    fn test_column_alignment() {
        let aligns: Vec<ColumnAlign> = user_columns().iter().map(|c| c.align).collect();
        assert_eq!(
            aligns,
            vec![
                ColumnAlign::Left,
                ColumnAlign::Left,
                ColumnAlign::Center,
                ColumnAlign::Right
            ]
        );
    }

    #[test]
    fn test_generated_rows_keep_their_ids() {
        let (users, columns) = generate_user_data(4);
        let table = TableComponent::new("Users", columns, users);
        let ids: Vec<RowId> = table.rows.iter().map(|r| r.id.clone()).collect();
        assert_eq!(
            ids,
            vec![RowId::Int(1), RowId::Int(2), RowId::Int(3), RowId::Int(4)]
        );
        assert_eq!(table.rows[2].class_name, "bg-yellow-50");
    }

    #[test]
    fn test_zero_users() {
        let (users, columns) = generate_user_data(0);
        assert!(users.is_empty());
        assert_eq!(columns.len(), 4);
    }
}
