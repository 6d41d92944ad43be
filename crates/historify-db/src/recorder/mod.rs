//! Change recorder - the PostgreSQL side of the lifecycle hooks

mod pg_recorder;

pub use pg_recorder::PgChangeRecorder;
