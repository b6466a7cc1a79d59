//! Running backups or cleans across every loaded schema
//!
//! A failing schema is logged and counted; the sweep moves on to the next one.

use crate::error::SnapkeepResult;
use crate::models::Schema;

use super::executor::execute_schema;
use super::pruner::clean_schema;

/// Totals for a sweep over several schemas
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SweepSummary {
    pub succeeded: usize,
    /// Names of the schemas that failed
    pub failed: Vec<String>,
}

impl SweepSummary {
    pub fn total(&self) -> usize {
        self.succeeded + self.failed.len()
    }
}

/// Back up every schema in order
pub fn execute_all(schemas: &[Schema]) -> SweepSummary {
    sweep(schemas, "Executing", |schema| execute_schema(schema).map(|_| ()))
}

/// Clean every schema in order
pub fn clean_all(schemas: &[Schema]) -> SweepSummary {
    sweep(schemas, "Cleaning", |schema| clean_schema(schema).map(|_| ()))
}

fn sweep<F>(schemas: &[Schema], verb: &str, mut run: F) -> SweepSummary
where
    F: FnMut(&Schema) -> SnapkeepResult<()>,
{
    let mut summary = SweepSummary::default();

    for schema in schemas {
        log::info!("{} schema {}...", verb, schema.name);
        match run(schema) {
            Ok(()) => summary.succeeded += 1,
            Err(e) => {
                log::error!("Schema '{}' failed: {}", schema.name, e);
                summary.failed.push(schema.name.clone());
            }
        }
        log::info!("");
    }

    summary
}
