pub mod errors;

use rusqlite::{params, Connection};
use crate::manager_db::errors::DBError;
use crate::recent_searches::RecentSearches;

pub struct DB {
    db_conn: Connection,
}

impl DB {

    /// Creates a new instance of DB
    ///
    /// # Arguments
    ///
    /// * 'db_path' - full path to db file, or ':memory:'
    pub fn new(db_path: &str) -> Result<Self, DBError> {
        let db_conn = Connection::open(db_path)?;
        db_conn.execute(
           "CREATE TABLE IF NOT EXISTS recent_searches (
                position integer primary key,
                term text not null
           )",
           [],
        )?;

        Ok(DB { db_conn })
    }

    /// Loads the stored recent searches
    ///
    pub fn load_recent_searches(&self) -> Result<RecentSearches, DBError> {
        let mut stmt = self.db_conn.prepare(
            "SELECT term
                FROM recent_searches
                ORDER BY position;",
        )?;
        let terms = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<String>, rusqlite::Error>>()?;

        Ok(RecentSearches::from_terms(terms))
    }

    /// Replaces the stored recent searches
    ///
    /// # Arguments
    ///
    /// * 'recent' - recent searches, most recent first
    pub fn save_recent_searches(&mut self, recent: &RecentSearches) -> Result<(), DBError> {
        let tx = self.db_conn.transaction()?;
        tx.execute("DELETE FROM recent_searches;", [])?;
        for (position, term) in recent.iter().enumerate() {
            tx.execute(
                "INSERT INTO recent_searches (position, term) values (?1, ?2)",
                params![position as i64, term],
            )?;
        }
        tx.commit()?;

        Ok(())
    }

    /// Drops the table so that every following read or write fails
    #[cfg(test)]
    pub fn drop_tables(&self) -> Result<(), DBError> {
        self.db_conn.execute("DROP TABLE recent_searches;", [])?;
        Ok(())
    }
}
