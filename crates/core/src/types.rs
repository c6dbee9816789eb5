/// All primary keys are SQLite `INTEGER PRIMARY KEY AUTOINCREMENT` rowids.
pub type DbId = i64;
