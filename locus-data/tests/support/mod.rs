use camino::{Utf8Path, Utf8PathBuf};
use rusqlite::Connection;
use std::fs;
use tempfile::TempDir;

/// Scratch directory holding a database and its import files.
pub struct Scratch {
    dir: TempDir,
}

impl Scratch {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("create temp dir"),
        }
    }

    pub fn root(&self) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(self.dir.path().to_path_buf()).expect("utf-8 temp dir")
    }

    pub fn database(&self) -> Utf8PathBuf {
        self.root().join("db.sqlite3")
    }

    /// Write `contents` to a file called `name` and return its path.
    pub fn write_file(&self, name: &str, contents: &str) -> Utf8PathBuf {
        let path = self.root().join(name);
        fs::write(path.as_std_path(), contents).unwrap_or_else(|err| {
            panic!("failed to write fixture {path}: {err}");
        });
        path
    }
}

/// Count the rows of `table` through an independent connection.
pub fn count_rows(database: &Utf8Path, table: &str) -> i64 {
    let connection = Connection::open(database.as_std_path()).expect("open database");
    connection
        .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
            row.get(0)
        })
        .unwrap_or_else(|err| panic!("failed to count rows of {table}: {err}"))
}

/// Read `(id, latitude, longitude)` rows of `table` ordered by id.
pub fn location_rows(database: &Utf8Path, table: &str) -> Vec<(i64, f64, f64)> {
    let connection = Connection::open(database.as_std_path()).expect("open database");
    let mut statement = connection
        .prepare(&format!(
            "SELECT id, latitude, longitude FROM {table} ORDER BY id"
        ))
        .expect("prepare select");
    statement
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)))
        .expect("query rows")
        .collect::<Result<_, _>>()
        .expect("collect rows")
}
