use spindle_core::IntegrationPlan;
use spindle_engine::{ApplyReport, ApplyRequest, ExitOutcome, Flow, apply_proposal};

use crate::bootstrap;
use crate::cli::GlobalFlags;
use crate::cli::root_commands::ApplyPrArgs;
use crate::output;

/// Handle `git-bucket apply-pr`.
pub async fn handle(args: &ApplyPrArgs, flags: &GlobalFlags) -> anyhow::Result<ExitOutcome> {
    let session = bootstrap::open_session(flags)?;
    let host = bootstrap::host_client(&session.config)?;
    let mut confirm = bootstrap::confirmer(
        flags,
        session.config.general.prompt,
        bootstrap::is_interactive(),
    );

    let request = ApplyRequest {
        id: args.id,
        prefer_parent: args.parent,
    };
    let result =
        apply_proposal(&session.ctx, &session.git, &host, confirm.as_mut(), request).await;

    if let Ok(Flow::Completed(report)) = &result {
        output::output(report, flags.format, &summary(report))?;
    }
    Ok(ExitOutcome::from(result))
}

fn summary(report: &ApplyReport) -> String {
    let action = match &report.plan {
        IntegrationPlan::Skip => "already merged".to_string(),
        IntegrationPlan::FastForward => "fast-forwarded".to_string(),
        IntegrationPlan::Replay {
            range_start,
            range_end,
        } => format!("cherry-picked {range_start}..{range_end}"),
    };
    format!("Pull request #{} ({}): {action}", report.id, report.title)
}
