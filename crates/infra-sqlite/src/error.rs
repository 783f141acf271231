// sqlx::Error -> AppError mapping

use domainhub_core::error::AppError;

/// Convert sqlx::Error to AppError with structured information
pub(crate) fn map_sqlx_error(err: sqlx::Error) -> AppError {
    match &err {
        sqlx::Error::Database(db_err) => {
            if db_err.is_unique_violation() {
                AppError::Conflict(conflict_message(db_err.message()))
            } else if db_err.is_foreign_key_violation() {
                AppError::Validation(format!(
                    "referenced record does not exist ({})",
                    db_err.message()
                ))
            } else {
                // SQLite result codes: https://www.sqlite.org/rescode.html
                match db_err.code().as_deref() {
                    Some("5") => AppError::Database(format!(
                        "Database locked (SQLITE_BUSY): {}",
                        db_err.message()
                    )),
                    Some("13") => {
                        AppError::Database(format!("Database full: {}", db_err.message()))
                    }
                    Some(code) => AppError::Database(format!(
                        "Database error [{}]: {}",
                        code,
                        db_err.message()
                    )),
                    None => AppError::Database(format!("Database error: {}", db_err.message())),
                }
            }
        }
        sqlx::Error::RowNotFound => AppError::Database("Row not found".to_string()),
        sqlx::Error::ColumnNotFound(col) => {
            AppError::Database(format!("Column not found: {}", col))
        }
        // Connection, pool, protocol errors
        _ => AppError::Database(err.to_string()),
    }
}

/// Stored row that does not decode into a domain value
pub(crate) fn corrupt_row(table: &str, id: impl std::fmt::Display, detail: impl std::fmt::Display) -> AppError {
    AppError::Database(format!("Corrupt {} row {}: {}", table, id, detail))
}

fn conflict_message(message: &str) -> String {
    // SQLite reports "UNIQUE constraint failed: <table>.<column>"
    if message.contains("domains.name") {
        "a domain with this name already exists".to_string()
    } else if message.contains("users.email") {
        "a user with this email already exists".to_string()
    } else {
        message.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::setup_test_db;

    #[tokio::test]
    async fn test_unique_violation_is_conflict() {
        let (pool, _) = setup_test_db().await;
        let insert = "INSERT INTO domains (name, title, created_at, updated_at) \
                      VALUES ('example.com', 'Example', '2024-01-01T00:00:00+00:00', '2024-01-01T00:00:00+00:00')";
        sqlx::query(insert).execute(&pool).await.unwrap();
        let err = sqlx::query(insert).execute(&pool).await.unwrap_err();

        match map_sqlx_error(err) {
            AppError::Conflict(msg) => assert!(msg.contains("domain")),
            other => panic!("expected conflict, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_foreign_key_violation_is_validation() {
        let (pool, _) = setup_test_db().await;
        let err = sqlx::query(
            "INSERT INTO pages (domain_id, name, title, created_at, updated_at) \
             VALUES (999, 'home', 'Home', '2024-01-01T00:00:00+00:00', '2024-01-01T00:00:00+00:00')",
        )
        .execute(&pool)
        .await
        .unwrap_err();

        assert!(matches!(map_sqlx_error(err), AppError::Validation(_)));
    }
}
