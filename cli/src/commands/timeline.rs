use clap::Args;
use colored::*;

use attendr_common::attendance::record::CanonicalAttendanceRecord;
use attendr_common::config::Config;
use attendr_common::{success, warn};
use attendr_core::timeline::{self, TimelineFilter};

use crate::commands::{self, AccountArgs};
use crate::mprint;
use crate::terminal::{colors, format, print, spinner};

#[derive(Args)]
pub struct TimelineArgs {
    #[command(flatten)]
    pub account: AccountArgs,

    /// Only this subject (exact name)
    #[arg(long)]
    pub subject: Option<String>,

    /// Month to show, YYYY-MM; defaults to the latest month with data
    #[arg(long)]
    pub month: Option<String>,

    /// Exact day, dd-mm-yyyy
    #[arg(long)]
    pub date: Option<String>,

    /// Show every month instead of only the latest one
    #[arg(long)]
    pub all: bool,
}

pub async fn timeline(args: TimelineArgs, cfg: &Config, quiet: u8) -> anyhow::Result<()> {
    let account = args.account.resolve_input()?;
    let service = commands::build_service(cfg)?;

    let sp = spinner::start("Logging in to the ERP...");
    let outcome = async {
        let (session, _) =
            commands::establish(&service, account, args.account.user.as_deref()).await?;
        sp.set_message(format!(
            "Fetching attendance for {}...",
            session.identity.display_name
        ));
        service
            .timeline_for_session(&session)
            .await
            .map_err(commands::friendly)
    }
    .await;

    sp.finish_and_clear();
    let report = outcome?;

    let filter = build_filter(&args, &report.records)?;
    let filtered = filter.apply(&report.records);
    let days = timeline::group_by_day(&filtered);

    success!(
        "Hello, {}. {} records fetched.",
        report.identity.display_name,
        report.records.len()
    );

    if days.is_empty() {
        warn!("No attendance records match the selected filters.");
        return Ok(());
    }

    if let Some((year, month)) = filter.month {
        print::print_status(format!("Showing {year}-{month:02}"));
    }

    for (idx, day) in days.iter().enumerate() {
        mprint!();
        print::tree_head(
            idx,
            &format!("{} ({})", day.date.format("%d %b %Y"), day.weekday()),
        );

        let mut details: Vec<format::Detail> = Vec::with_capacity(day.records.len() + 1);
        for record in &day.records {
            details.push(format::record_detail(record));
        }
        details.push((
            "Total".to_string(),
            class_count(&day.records).color(colors::ACCENT),
        ));
        print::as_tree_one_level(details);
    }

    if quiet == 0 {
        print::fat_separator();
        print::centerln(&format!(
            "{} day(s), {} class(es) shown",
            days.len(),
            filtered.len()
        ));
    }
    Ok(())
}

fn class_count(records: &[CanonicalAttendanceRecord]) -> String {
    let attended = records.iter().filter(|r| r.is_present).count();
    format!("{} of {} attended", attended, records.len())
}

fn build_filter(
    args: &TimelineArgs,
    records: &[CanonicalAttendanceRecord],
) -> anyhow::Result<TimelineFilter> {
    let month = match &args.month {
        Some(raw) => Some(parse_month(raw).ok_or_else(|| {
            anyhow::anyhow!("--month expects YYYY-MM, got '{raw}'")
        })?),
        // An explicit day should not be hidden by the latest-month default.
        None if args.all || args.date.is_some() => None,
        None => timeline::latest_month(records),
    };

    let day = match &args.date {
        Some(raw) => Some(TimelineFilter::parse_day(raw).ok_or_else(|| {
            anyhow::anyhow!("--date expects dd-mm-yyyy, got '{raw}'")
        })?),
        None => None,
    };

    Ok(TimelineFilter {
        subject: args.subject.clone(),
        month,
        day,
    })
}

fn parse_month(s: &str) -> Option<(i32, u32)> {
    let (year, month) = s.trim().split_once('-')?;
    let year: i32 = year.parse().ok()?;
    let month: u32 = month.parse().ok()?;
    (1..=12).contains(&month).then_some((year, month))
}
