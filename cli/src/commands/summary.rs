use std::time::{Duration, Instant};

use colored::*;

use attendr_common::attendance::course::{AttendanceSummary, CourseStat};
use attendr_common::config::Config;
use attendr_common::session::Identity;
use attendr_common::success;

use crate::commands::{self, AccountArgs};
use crate::mprint;
use crate::terminal::{colors, format, print, spinner};

pub async fn summary(args: AccountArgs, cfg: &Config, quiet: u8) -> anyhow::Result<()> {
    let account = args.resolve_input()?;
    let service = commands::build_service(cfg)?;

    let sp = spinner::start("Logging in to the ERP...");
    let started = Instant::now();

    let outcome = async {
        let (session, eligible) = commands::establish(&service, account, args.user.as_deref()).await?;
        sp.set_message(format!(
            "Fetching attendance for {}...",
            session.identity.display_name
        ));
        let report = service
            .summary_for_session(&session, eligible)
            .await
            .map_err(commands::friendly)?;
        Ok::<_, anyhow::Error>((report, eligible))
    }
    .await;

    sp.finish_and_clear();
    let (report, eligible) = outcome?;

    print_summary(
        &report.identity,
        &report.summary,
        eligible,
        started.elapsed(),
        quiet,
    );
    Ok(())
}

fn print_summary(
    identity: &Identity,
    summary: &AttendanceSummary,
    eligible: bool,
    total_time: Duration,
    quiet: u8,
) {
    success!("Welcome back, {}!", identity.display_name);
    mprint!();

    print::GLOBAL_KEY_WIDTH.set(12);
    print::aligned_line(
        "Overall",
        overall_colored(summary.overall_percentage),
    );
    print::aligned_line(
        "Classes",
        format!("{}/{}", summary.total_attended, summary.total_classes),
    );
    print::aligned_line(
        "Safe",
        summary.safe_count().to_string().color(colors::SAFE),
    );
    print::aligned_line(
        "At risk",
        summary.danger_count().to_string().color(colors::DANGER),
    );
    if summary.disabled_count() > 0 {
        print::aligned_line(
            "Disabled",
            summary.disabled_count().to_string().color(colors::DISABLED),
        );
    }
    if eligible && summary.total_condonation > 0 {
        print::aligned_line(
            "Condonation",
            format::rupees(summary.total_condonation)
                .color(colors::FEE)
                .bold(),
        );
    }

    let safe: Vec<&CourseStat> = summary
        .courses
        .iter()
        .filter(|c| !c.is_disabled() && c.standing.is_safe())
        .collect();
    let danger: Vec<&CourseStat> = summary
        .courses
        .iter()
        .filter(|c| !c.is_disabled() && !c.standing.is_safe())
        .collect();
    let disabled: Vec<&CourseStat> = summary.courses.iter().filter(|c| c.is_disabled()).collect();

    if quiet < 2 {
        print_section("safe courses", &safe, quiet);
        print_section("at-risk courses", &danger, quiet);
        print_section("disabled courses", &disabled, quiet);
    }

    print_footer(summary, total_time, quiet);
}

fn overall_colored(percentage: f64) -> ColoredString {
    let value = format::percentage_str(percentage);
    if percentage >= attendr_core::summary::REQUIRED_PERCENTAGE {
        value.color(colors::SAFE).bold()
    } else {
        value.color(colors::DANGER).bold()
    }
}

fn print_section(title: &str, stats: &[&CourseStat], quiet: u8) {
    if stats.is_empty() {
        return;
    }

    mprint!();
    print::header(&format!("{} ({})", title, stats.len()), quiet);

    for (idx, stat) in stats.iter().enumerate() {
        print::tree_head(idx, &stat.course);

        let mut details: Vec<format::Detail> =
            vec![format::percentage_detail(stat), format::ratio_detail(stat)];
        if let Some(detail) = format::standing_detail(stat) {
            details.push(detail);
        }
        if let Some(detail) = format::fee_detail(stat) {
            details.push(detail);
        }
        if let Some(detail) = format::disabled_detail(stat) {
            details.push(detail);
        }

        print::as_tree_one_level(details);
        if idx + 1 != stats.len() {
            mprint!();
        }
    }
}

fn print_footer(summary: &AttendanceSummary, total_time: Duration, quiet: u8) {
    let courses: ColoredString = format!("{} courses", summary.courses.len()).bold().green();
    let elapsed: ColoredString = format!("{:.2}s", total_time.as_secs_f64()).bold().yellow();
    let output: String = format!("Summary complete: {courses} aggregated in {elapsed}")
        .color(colors::TEXT_DEFAULT)
        .to_string();

    match quiet {
        0 => {
            print::fat_separator();
            print::centerln(&output);
        }
        _ => {
            mprint!();
            success!("{}", output);
        }
    }
}
