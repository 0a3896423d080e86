//! Driver tests: full runs, table dump, summary text and config loading.

use heatmap_cli::config::{load_render_config, resolve, Overrides};
use heatmap_cli::{run, write_summary, Job};
use heatmap_common::{EngagementTable, SummaryStats};
use renderer::{RenderConfig, ResizeStrategy};
use test_utils::{read_png_header, seed_42_table, temp_output, workspace_root};

fn job(output: std::path::PathBuf) -> Job {
    Job {
        seed: 42,
        output,
        table_json: None,
        render: RenderConfig::default(),
    }
}

#[test]
fn test_run_writes_chart_and_reports_stats() {
    let out = temp_output("chart.png");
    let (table, stats) = run(&job(out.path.clone())).unwrap();

    assert_eq!(table, seed_42_table());
    assert_eq!((stats.max, stats.min), (148, 2));
    let header = read_png_header(&out.path).expect("valid PNG");
    assert_eq!((header.width, header.height), (512, 512));
}

#[test]
fn test_run_dumps_table_json() {
    let out = temp_output("chart.png");
    let json_path = out.path.with_file_name("table.json");
    let mut job = job(out.path.clone());
    job.table_json = Some(json_path.clone());
    run(&job).unwrap();

    let dumped = EngagementTable::from_json(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(dumped, seed_42_table());
}

#[test]
fn test_run_into_missing_directory_fails() {
    let out = temp_output("chart.png");
    let job = job(out.path.with_file_name("nope").join("chart.png"));
    let err = run(&job).unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to render heatmap"));
}

#[test]
fn test_summary_text() {
    let stats = SummaryStats::from_table(&seed_42_table());
    let mut buf = Vec::new();
    write_summary(&mut buf, &stats).unwrap();

    let expected = format!(
        "Customer Engagement Heatmap Analysis\n{}\nMax Engagement: 148\nMin Engagement: 2\nAverage Engagement: 74.30\n\nChart generated successfully with heatmap!\n",
        "=".repeat(50)
    );
    assert_eq!(String::from_utf8(buf).unwrap(), expected);
}

#[test]
fn test_example_config_loads() {
    let config = load_render_config(workspace_root().join("config/heatmap.yaml")).unwrap();
    assert!(config.validate().is_ok());
    assert_eq!(config.size, 512);
}

#[test]
fn test_overrides_win_over_file() {
    let out = temp_output("render.yaml");
    std::fs::write(&out.path, "strategy: direct\nstyle:\n  palette: Blues\n").unwrap();

    let overrides = Overrides {
        strategy: Some(ResizeStrategy::Resample),
        ..Overrides::default()
    };
    let config = resolve(Some(&out.path), &overrides).unwrap();
    assert_eq!(config.strategy, ResizeStrategy::Resample);
}

#[test]
fn test_bad_config_files() {
    let out = temp_output("render.yaml");
    assert!(load_render_config(&out.path).is_err());

    std::fs::write(&out.path, "direct:\n  width_in: 4\n  height_in: 4\n  dpi: 100\n").unwrap();
    let err = resolve(Some(&out.path), &Overrides::default()).unwrap_err();
    assert!(format!("{:#}", err).contains("Invalid render configuration"));

    std::fs::write(&out.path, "strategy: sideways\n").unwrap();
    assert!(resolve(Some(&out.path), &Overrides::default()).is_err());
}

#[test]
fn test_oversized_output_is_rejected() {
    let overrides = Overrides {
        size: Some(100_000),
        ..Overrides::default()
    };
    let err = resolve(None, &overrides).unwrap_err();
    let message = format!("{:#}", err);
    assert!(message.contains("Invalid render configuration"));
    assert!(message.contains("'size'"));

    let out = temp_output("render.yaml");
    std::fs::write(
        &out.path,
        "strategy: resample\nresample:\n  width_in: 1000\n  height_in: 1000\n  dpi: 150\n",
    )
    .unwrap();
    let err = resolve(Some(&out.path), &Overrides::default()).unwrap_err();
    assert!(format!("{:#}", err).contains("exceeds the limit"));
}
