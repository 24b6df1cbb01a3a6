//! Test helpers for driving CLI commands against a scratch database.

use super::*;
use std::fs;
use tempfile::TempDir;

pub(super) struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 tempdir");
        Self { _dir: dir, root }
    }

    pub(super) fn database(&self) -> Utf8PathBuf {
        self.root.join("db.sqlite3")
    }

    pub(super) fn path(&self, name: &str) -> Utf8PathBuf {
        self.root.join(name)
    }

    pub(super) fn write_file(&self, name: &str, contents: &str) -> Utf8PathBuf {
        let path = self.path(name);
        fs::write(path.as_std_path(), contents).expect("write input file");
        path
    }

    /// Parse `args` as a `locus` invocation against this workspace's
    /// database and run it, returning captured stdout.
    pub(super) fn run(&self, args: &[&str]) -> Result<String, CliError> {
        let database = self.database();
        let argv = ["locus", "--database", database.as_str()]
            .into_iter()
            .chain(args.iter().copied());
        let cli = Cli::try_parse_from(argv)?;
        let mut output = Vec::new();
        execute(cli, &mut output)?;
        Ok(String::from_utf8(output).expect("utf-8 output"))
    }

    pub(super) fn count_rows(&self, table: &str) -> i64 {
        let connection =
            rusqlite::Connection::open(self.database().as_std_path()).expect("open database");
        connection
            .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
                row.get(0)
            })
            .expect("count rows")
    }
}
