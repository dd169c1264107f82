/// Database layer for Taskbook
///
/// # Modules
///
/// - `pool`: PostgreSQL connection pool management with health checks
/// - `migrations`: Embedded migration runner
/// - `update`: Builder for single-statement partial `UPDATE`s
///
/// Models and their queries live in the `models` module at crate root level.

pub mod migrations;
pub mod pool;
pub mod update;
