use attendr_common::attendance::course::Standing;
use attendr_common::config::{Config, EmptyBatchPolicy};
use attendr_common::credentials::Credentials;
use attendr_common::errors::ErpError;
use attendr_core::fetcher;
use attendr_core::service::AttendanceService;
use chrono::NaiveDate;

use crate::support::{self, FailAt, FakeGateway, line};

fn config() -> Config {
    Config::default()
}

fn many_lines(count: usize) -> Vec<attendr_common::attendance::line::AttendanceLine> {
    (0..count)
        .map(|i| line("2024-03-15", 9, &format!("Course {i}"), "present"))
        .collect()
}

fn service_over(gateway: &FakeGateway, cfg: Config) -> AttendanceService {
    AttendanceService::new(Box::new(gateway.clone()), cfg)
}

#[tokio::test]
async fn fetch_batches_in_chunks_of_eighty() {
    let gateway = FakeGateway::with_lines(many_lines(165));
    let handle = FakeGateway::handle();
    let ids: Vec<_> = (1..=165)
        .map(attendr_common::attendance::line::LineRecordId)
        .collect();

    let lines = fetcher::fetch_lines(&gateway, &handle, &ids, &config())
        .await
        .expect("fetch should succeed");

    assert_eq!(gateway.batch_sizes(), vec![80, 80, 5]);
    assert_eq!(lines.len(), 165);
}

#[tokio::test]
async fn fetch_preserves_id_order_across_batches() {
    let gateway = FakeGateway::with_lines(many_lines(165));
    let handle = FakeGateway::handle();
    let ids: Vec<_> = (1..=165)
        .map(attendr_common::attendance::line::LineRecordId)
        .collect();

    let lines = fetcher::fetch_lines(&gateway, &handle, &ids, &config())
        .await
        .unwrap();

    let courses: Vec<Option<String>> = lines.iter().map(|l| l.course.display()).collect();
    let expected: Vec<Option<String>> = (0..165).map(|i| Some(format!("Course {i}"))).collect();
    assert_eq!(courses, expected);
}

#[tokio::test]
async fn fetch_with_no_ids_makes_no_requests() {
    let gateway = FakeGateway::with_lines(Vec::new());
    let handle = FakeGateway::handle();

    let lines = fetcher::fetch_lines(&gateway, &handle, &[], &config())
        .await
        .unwrap();

    assert!(lines.is_empty());
    assert!(gateway.batch_sizes().is_empty());
}

#[tokio::test]
async fn missing_result_array_counts_as_empty_batch() {
    let mut gateway = FakeGateway::with_lines(many_lines(165));
    gateway.holey_batches = vec![1];
    let handle = FakeGateway::handle();
    let ids: Vec<_> = (1..=165)
        .map(attendr_common::attendance::line::LineRecordId)
        .collect();

    let lines = fetcher::fetch_lines(&gateway, &handle, &ids, &config())
        .await
        .unwrap();

    // The second batch vanished, the third was still fetched.
    assert_eq!(gateway.batch_sizes(), vec![80, 80, 5]);
    assert_eq!(lines.len(), 85);
}

#[tokio::test]
async fn missing_result_array_is_fatal_under_strict_policy() {
    let mut gateway = FakeGateway::with_lines(many_lines(165));
    gateway.holey_batches = vec![1];
    let handle = FakeGateway::handle();
    let ids: Vec<_> = (1..=165)
        .map(attendr_common::attendance::line::LineRecordId)
        .collect();

    let mut cfg = config();
    cfg.empty_batch = EmptyBatchPolicy::Fail;

    let result = fetcher::fetch_lines(&gateway, &handle, &ids, &cfg).await;

    assert!(matches!(result, Err(ErpError::Shape { .. })));
    // Nothing after the broken batch was requested.
    assert_eq!(gateway.batch_sizes(), vec![80, 80]);
}

#[tokio::test]
async fn transport_failure_aborts_the_fetch() {
    let mut gateway = FakeGateway::with_lines(many_lines(165));
    gateway.fail_at = FailAt::Batch(1);
    let handle = FakeGateway::handle();
    let ids: Vec<_> = (1..=165)
        .map(attendr_common::attendance::line::LineRecordId)
        .collect();

    let result = fetcher::fetch_lines(&gateway, &handle, &ids, &config()).await;

    assert!(matches!(
        result,
        Err(ErpError::Transport { step: "read_lines", .. })
    ));
    assert_eq!(gateway.batch_sizes(), vec![80, 80]);
}

#[tokio::test]
async fn summary_end_to_end() {
    let mut lines = Vec::new();
    // Physics: 5 of 10, Maths: 9 of 12.
    for i in 0..10 {
        lines.push(line(
            "2024-03-15",
            9,
            "Physics",
            if i < 5 { "present" } else { "absent" },
        ));
    }
    for i in 0..12 {
        lines.push(line(
            "2024-03-16",
            3,
            "Maths",
            if i < 9 { "present" } else { "absent" },
        ));
    }

    let gateway = FakeGateway::with_lines(lines);
    let service = service_over(&gateway, config());

    let report = service
        .summary(&Credentials::new("va24cs042", "pw"))
        .await
        .expect("summary should succeed");

    assert_eq!(report.identity.display_name, support::FAKE_NAME);
    assert_eq!(report.summary.courses.len(), 2);

    let physics = &report.summary.courses[0];
    assert_eq!(physics.course, "Physics");
    assert_eq!(physics.standing, Standing::Danger { must_attend: 10 });
    assert_eq!(physics.condonation, 500);

    let maths = &report.summary.courses[1];
    assert_eq!(maths.standing, Standing::Safe { can_skip: 0 });
    assert_eq!(maths.condonation, 0);

    assert_eq!(report.summary.total_attended, 14);
    assert_eq!(report.summary.total_classes, 22);
    assert_eq!(report.summary.total_condonation, 500);
}

#[tokio::test]
async fn summary_without_eligibility_charges_nothing() {
    let lines = vec![
        line("2024-03-15", 9, "Physics", "absent"),
        line("2024-03-15", 10, "Physics", "present"),
    ];
    let gateway = FakeGateway::with_lines(lines);
    let service = service_over(&gateway, config());

    // Batch of 23 is below the threshold of 24.
    let report = service
        .summary(&Credentials::new("va23cs042", "pw"))
        .await
        .unwrap();

    assert_eq!(report.summary.total_condonation, 0);
}

#[tokio::test]
async fn timeline_end_to_end_sorts_and_normalizes() {
    let lines = vec![
        line("2024-03-14", 9, "Physics", "present"),
        line("2024-03-15", 10, "Maths", "absent"),
        line("2024-03-15", 8, "Chemistry", "present"),
    ];
    let gateway = FakeGateway::with_lines(lines);
    let service = service_over(&gateway, config());

    let report = service
        .timeline(&Credentials::new("va24cs042", "pw"))
        .await
        .unwrap();

    assert_eq!(report.records.len(), 3);
    // Most recent day first, ascending period within the day.
    assert_eq!(
        report.records[0].date,
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    );
    assert_eq!(report.records[0].subject, "Chemistry");
    assert_eq!(report.records[0].hour.to_string(), "1");
    assert_eq!(report.records[1].subject, "Maths");
    assert_eq!(report.records[1].hour.to_string(), "3");
    assert_eq!(report.records[2].subject, "Physics");
    assert!(!report.records[1].is_present);
}

#[tokio::test]
async fn rejected_login_is_a_typed_failure() {
    let mut gateway = FakeGateway::with_lines(Vec::new());
    gateway.reject_login = true;
    let service = service_over(&gateway, config());

    let result = service.summary(&Credentials::new("va24cs042", "wrong")).await;

    let err = result.expect_err("login should be rejected");
    assert!(matches!(err, ErpError::AuthRejected));
    assert_eq!(err.user_message(), "Incorrect username or password.");
}

#[tokio::test]
async fn display_name_failure_fails_the_whole_login() {
    let mut gateway = FakeGateway::with_lines(Vec::new());
    gateway.fail_at = FailAt::DisplayName;
    let service = service_over(&gateway, config());

    let result = service.summary(&Credentials::new("va24cs042", "pw")).await;

    assert!(matches!(
        result,
        Err(ErpError::Transport { step: "read_user_name", .. })
    ));
}

#[tokio::test]
async fn locator_failure_aborts_before_any_batch() {
    let mut gateway = FakeGateway::with_lines(many_lines(5));
    gateway.fail_at = FailAt::Compute;
    let service = service_over(&gateway, config());

    let result = service.summary(&Credentials::new("va24cs042", "pw")).await;

    assert!(matches!(
        result,
        Err(ErpError::Transport { step: "button_check_status", .. })
    ));
    assert!(gateway.batch_sizes().is_empty());
}

#[tokio::test]
async fn student_with_no_records_gets_an_empty_summary() {
    let gateway = FakeGateway::with_lines(Vec::new());
    let service = service_over(&gateway, config());

    let report = service
        .summary(&Credentials::new("va24cs042", "pw"))
        .await
        .unwrap();

    assert!(report.summary.courses.is_empty());
    assert_eq!(report.summary.overall_percentage, 0.0);
    assert!(gateway.batch_sizes().is_empty());
}
