//! History table DDL

mod ddl;

pub use ddl::{
    create_index_sql, create_table_sql, ensure_history_table, ensure_history_tables,
};
