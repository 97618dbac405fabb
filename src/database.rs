//! Database dialects and the UUID layouts they sort efficiently.

use std::{fmt, str};

use crate::Layout;

/// A database engine whose primary key ordering a database-friendly UUID is tuned for.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Database {
    /// PostgreSQL compares `uuid` values as big-endian byte strings.
    PostgreSql,
    /// SQL Server compares `uniqueidentifier` values in a byte order of its own.
    SqlServer,
    /// SQLite compares UUIDs stored as blobs or text as opaque byte strings.
    Sqlite,
    /// Any other database.
    Other,
}

impl Database {
    /// All dialects, with [`Database::Other`] last.
    pub const ALL: [Self; 4] = [Self::PostgreSql, Self::SqlServer, Self::Sqlite, Self::Other];

    /// Returns the layout of UUIDs that sort chronologically under the dialect's comparison.
    pub const fn layout(self) -> Layout {
        match self {
            Self::PostgreSql => Layout::V7,
            Self::SqlServer => Layout::SqlServerV8,
            Self::Sqlite => Layout::V7,
            Self::Other => Layout::V7,
        }
    }

    /// Returns the dialect name accepted by [`FromStr`](str::FromStr).
    pub const fn name(self) -> &'static str {
        match self {
            Self::PostgreSql => "PostgreSQL",
            Self::SqlServer => "SqlServer",
            Self::Sqlite => "SQLite",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for Database {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl str::FromStr for Database {
    type Err = ParseDatabaseError;

    /// Parses a dialect name case-insensitively.
    fn from_str(src: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|e| e.name().eq_ignore_ascii_case(src))
            .ok_or_else(|| ParseDatabaseError(src.to_owned()))
    }
}

/// Error parsing an unknown database name.
#[derive(Clone, Eq, PartialEq, Hash, Debug, thiserror::Error)]
#[error("Unknown dbName [{0}]. Expected dbName values are [{choices}]", choices = expected_names())]
pub struct ParseDatabaseError(pub String);

fn expected_names() -> String {
    Database::ALL.map(Database::name).join(", ")
}

#[cfg(test)]
mod tests {
    use super::{Database, Layout};

    /// Parses names case-insensitively
    #[test]
    fn parses_names_case_insensitively() {
        let cases = [
            ("PostgreSQL", Database::PostgreSql),
            ("postgresql", Database::PostgreSql),
            ("SQLSERVER", Database::SqlServer),
            ("sqlite", Database::Sqlite),
            ("other", Database::Other),
        ];
        for (text, db) in cases {
            assert_eq!(text.parse(), Ok(db));
            assert_eq!(db.to_string().parse(), Ok(db));
        }
    }

    /// Lists choices with Other last on unknown name
    #[test]
    fn lists_choices_with_other_last_on_unknown_name() {
        let err = "Oracle".parse::<Database>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unknown dbName [Oracle]. Expected dbName values are [PostgreSQL, SqlServer, SQLite, Other]"
        );
        assert!("".parse::<Database>().is_err());
        assert!(" sqlite".parse::<Database>().is_err());
    }

    /// Maps each dialect to one layout
    #[test]
    fn maps_each_dialect_to_one_layout() {
        assert_eq!(Database::PostgreSql.layout(), Layout::V7);
        assert_eq!(Database::SqlServer.layout(), Layout::SqlServerV8);
        assert_eq!(Database::Sqlite.layout(), Layout::V7);
        assert_eq!(Database::Other.layout(), Layout::V7);
        assert_eq!(Database::ALL.last(), Some(&Database::Other));
    }
}
