//! `judges trim` - Delete old facts from the factbase.

use anyhow::Result;
use chrono::{SecondsFormat, Utc};
use judges_core::{Factbase, Impex, Predicate};
use tracing::info;

use super::EXIT_SUCCESS;
use crate::cli::args::TrimArgs;

/// What a trim pass did to the factbase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrimOutcome {
    /// This many facts were deleted; the factbase must be re-exported.
    Deleted(usize),

    /// The predicate matched nothing; the file on disk is left untouched.
    NothingToDelete,
}

/// Apply the predicate and report what happened.
pub fn trim_factbase(fb: &mut Factbase, predicate: &Predicate) -> TrimOutcome {
    match fb.delete(predicate) {
        0 => TrimOutcome::NothingToDelete,
        count => TrimOutcome::Deleted(count),
    }
}

pub fn run(args: TrimArgs) -> Result<i32> {
    let impex = Impex::new(&args.file);
    let mut fb = impex.import()?;

    let query = if let Some(query) = args.query {
        query
    } else if let Some(days) = args.days {
        let cutoff = Utc::now() - chrono::Duration::days(i64::from(days));
        info!("deleting facts older than {} days", days);
        format!(
            "(lt time {})",
            cutoff.to_rfc3339_opts(SecondsFormat::Secs, true)
        )
    } else {
        anyhow::bail!("specify either --days or --query");
    };
    let predicate = Predicate::parse(&query)?;

    match trim_factbase(&mut fb, &predicate) {
        TrimOutcome::Deleted(count) => {
            impex.export(&fb)?;
            info!("{} fact(s) deleted", count);
        }
        TrimOutcome::NothingToDelete => info!("no facts deleted"),
    }
    Ok(EXIT_SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_deleted_count() {
        let mut fb = Factbase::new();
        fb.insert().set("age", 10);
        fb.insert().set("age", 30);

        let predicate = Predicate::parse("(lt age 20)").unwrap();
        assert_eq!(trim_factbase(&mut fb, &predicate), TrimOutcome::Deleted(1));
        assert_eq!(fb.len(), 1);
    }

    #[test]
    fn reports_nothing_to_delete() {
        let mut fb = Factbase::new();
        fb.insert().set("age", 30);

        let predicate = Predicate::parse("(lt age 20)").unwrap();
        assert_eq!(
            trim_factbase(&mut fb, &predicate),
            TrimOutcome::NothingToDelete
        );
        assert_eq!(fb.len(), 1);
    }
}
