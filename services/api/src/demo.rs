use crate::infra::sample_worksheet;
use appraisal::error::AppError;
use appraisal::handbooks::HandbookRegistry;
use appraisal::worksheet::import::import_analogs;
use appraisal::worksheet::WorksheetSession;
use clap::Args;
use std::fs::File;
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Handbook id to evaluate against (defaults to the registry default)
    #[arg(long)]
    pub(crate) handbook: Option<String>,
    /// Optional analog listing export (CSV) to fill the worksheet from
    #[arg(long)]
    pub(crate) analog_csv: Option<PathBuf>,
    /// Print the refreshed worksheet snapshot alongside the valuation
    #[arg(long)]
    pub(crate) include_worksheet: bool,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let registry = HandbookRegistry::builtin();
    let mut session = WorksheetSession::new(&registry, args.handbook.as_deref())?;

    let mut worksheet = sample_worksheet(&registry);
    if let Some(path) = args.analog_csv {
        let file = File::open(path)?;
        let imported = import_analogs(file)?;
        for (slot, analog) in worksheet.analogs.iter_mut().zip(imported) {
            *slot = analog;
        }
    }

    let refreshed = session.submit(worksheet).clone();
    let valuation = session.evaluate();
    let summary = valuation.summary(&session.handbook().info);

    if args.include_worksheet {
        println!(
            "{}",
            serde_json::to_string_pretty(&refreshed).expect("worksheet serializes")
        );
    }
    println!(
        "{}",
        serde_json::to_string_pretty(&summary).expect("summary serializes")
    );

    Ok(())
}

pub(crate) fn run_handbook_listing() -> Result<(), AppError> {
    let registry = HandbookRegistry::builtin();
    let listing = serde_json::json!({
        "default_id": registry.default_handbook_id(),
        "handbooks": registry.available(),
    });
    println!(
        "{}",
        serde_json::to_string_pretty(&listing).expect("listing serializes")
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_runs_on_the_builtin_sample() {
        run_demo(DemoArgs::default()).expect("sample worksheet evaluates");
    }

    #[test]
    fn demo_rejects_unknown_handbook_ids() {
        let args = DemoArgs {
            handbook: Some("flats_1999".to_string()),
            ..DemoArgs::default()
        };
        assert!(matches!(run_demo(args), Err(AppError::Handbook(_))));
    }

    #[test]
    fn handbook_listing_prints() {
        run_handbook_listing().expect("listing serializes");
    }
}
