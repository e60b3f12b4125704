use std::fs;

use wordcloudkit_table::{
    EnumDistribution, EnumRenderOutcome, SpecChartOptions, SpecSession, TableError,
    write_cloud_text, write_cloud_weights, write_frequency_chart, write_histogram_chart,
};
use wordcloudkit_text::{SpecFreqOptions, StopwordFilter, derive_cloud_weights};

fn write_reviews(dir: &std::path::Path) -> std::path::PathBuf {
    let path = dir.join("reviews.csv");
    fs::write(
        &path,
        "review,score\n\
         배송 이 빠름,5\n\
         배송 빠름 좋음,4\n\
         ,3\n\
         좋음,\n",
    )
    .expect("write csv");
    path
}

#[test]
fn csv_to_chart_and_cloud() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let path_csv = write_reviews(tmp.path());

    let mut session = SpecSession::new();
    session.load(&path_csv).expect("load csv");

    let options = SpecFreqOptions {
        top_n: Some(2),
        ..Default::default()
    };
    let ranked = session
        .compute_frequencies("review", &options)
        .expect("frequencies");
    assert_eq!(ranked.iter().collect::<Vec<_>>(), vec![("배송", 2), ("빠름", 2)]);

    let path_chart = tmp.path().join("review.xlsx");
    let outcome = write_frequency_chart(&path_chart, "review", &ranked, &SpecChartOptions::default())
        .expect("chart");
    assert_eq!(outcome, EnumRenderOutcome::Written(path_chart.clone()));
    assert!(fs::read(&path_chart).expect("read chart").starts_with(b"PK"));

    let c_cloud = session
        .derive_cloud_text("review", &options)
        .expect("cloud text");
    assert_eq!(c_cloud, "배송 빠름 배송 빠름 좋음 좋음");
    let path_cloud = tmp.path().join("cloud.txt");
    write_cloud_text(&path_cloud, &c_cloud).expect("write cloud");
    assert_eq!(fs::read_to_string(&path_cloud).expect("read cloud"), c_cloud);

    let path_weights = tmp.path().join("cloud.tsv");
    write_cloud_weights(&path_weights, &derive_cloud_weights(&ranked)).expect("weights");
    assert_eq!(
        fs::read_to_string(&path_weights).expect("read weights"),
        "배송\t1.000000\n빠름\t1.000000\n"
    );
}

#[test]
fn stopword_only_column_has_nothing_to_display() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let path_csv = tmp.path().join("particles.csv");
    fs::write(&path_csv, "text\n은 는\n이\n").expect("write csv");

    let mut session = SpecSession::new();
    session.load(&path_csv).expect("load csv");

    let options = SpecFreqOptions::default();
    let ranked = session.compute_frequencies("text", &options).expect("freq");
    assert!(ranked.is_empty());

    let path_chart = tmp.path().join("text.xlsx");
    let outcome = write_frequency_chart(&path_chart, "text", &ranked, &SpecChartOptions::default())
        .expect("chart");
    assert_eq!(outcome, EnumRenderOutcome::NothingToDisplay);
    assert!(!path_chart.exists());

    let c_cloud = session.derive_cloud_text("text", &options).expect("cloud");
    assert_eq!(
        write_cloud_text(&tmp.path().join("cloud.txt"), &c_cloud).expect("cloud"),
        EnumRenderOutcome::NothingToDisplay
    );
}

#[test]
fn invalid_column_reports_available_columns() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let path_csv = write_reviews(tmp.path());

    let mut session = SpecSession::new();
    session.load(&path_csv).expect("load csv");

    let options = SpecFreqOptions {
        stopwords: StopwordFilter::empty(),
        ..Default::default()
    };
    match session.compute_frequencies("comment", &options) {
        Err(TableError::InvalidColumn { column, available }) => {
            assert_eq!(column, "comment");
            assert_eq!(available, vec!["review", "score"]);
        }
        other => panic!("expected invalid column, got {other:?}"),
    }
}

#[test]
fn snapshot_then_histogram() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let path_csv = write_reviews(tmp.path());
    let path_snapshot = tmp.path().join("reviews.ipc");

    let mut session = SpecSession::new();
    session.load(&path_csv).expect("load csv");
    session.save_snapshot(&path_snapshot).expect("snapshot");

    let mut session_restored = SpecSession::new();
    session_restored.load(&path_snapshot).expect("load snapshot");
    assert_eq!(
        session_restored.list_columns().expect("columns"),
        vec!["review", "score"]
    );

    let distribution = session_restored
        .compute_distribution("score", None, Some(2))
        .expect("distribution");
    match &distribution {
        EnumDistribution::Numeric(l_bins) => {
            assert_eq!(l_bins.len(), 2);
            assert_eq!(l_bins.iter().map(|b| b.count).sum::<u64>(), 3);
        }
        other => panic!("expected numeric bins, got {other:?}"),
    }

    let path_hist = tmp.path().join("score.xlsx");
    let outcome =
        write_histogram_chart(&path_hist, "score", &distribution, &SpecChartOptions::default())
            .expect("histogram");
    assert_eq!(outcome, EnumRenderOutcome::Written(path_hist));
}
