use catmouse::cli::commands::train::{TrainArgs, execute};
use clap::Parser;
use tempfile::tempdir;

fn parse_args<I, T>(args: I) -> TrainArgs
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    TrainArgs::parse_from(args)
}

#[test]
fn summary_without_extension_appends_json() {
    let tmp = tempdir().unwrap();
    let summary_stem = tmp.path().join("run_overview");

    let args = parse_args([
        "catmouse-train",
        "--width",
        "4",
        "--height",
        "4",
        "--steps",
        "500",
        "--seed",
        "1",
        "--summary",
        summary_stem.to_str().unwrap(),
    ]);

    execute(args).expect("training with summary should succeed");

    let expected_path = summary_stem.with_extension("json");
    assert!(
        expected_path.exists(),
        "expected summary at {}",
        expected_path.display()
    );

    let contents = std::fs::read_to_string(&expected_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(parsed["total_steps"], 500);
    assert_eq!(parsed["grid"]["width"], 4);
    assert_eq!(parsed["seed"], 1);
}

#[test]
fn summary_directory_argument_creates_default_file() {
    let tmp = tempdir().unwrap();
    let summary_dir = tmp.path().join("summaries");
    let summary_arg = format!("{}/", summary_dir.display());

    let args = parse_args([
        "catmouse-train",
        "--width",
        "3",
        "--height",
        "3",
        "--steps",
        "200",
        "--summary",
        &summary_arg,
    ]);

    execute(args).expect("training with directory summary should succeed");

    let expected_path = summary_dir.join("training_summary.json");
    assert!(
        expected_path.exists(),
        "expected summary at {}",
        expected_path.display()
    );

    let contents = std::fs::read_to_string(&expected_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(parsed["total_steps"], 200);
}

#[test]
fn curve_and_config_outputs() {
    let tmp = tempdir().unwrap();
    let curve = tmp.path().join("curve.csv");
    let saved = tmp.path().join("run.json");

    let args = parse_args([
        "catmouse-train",
        "--width",
        "3",
        "--height",
        "2",
        "--steps",
        "100",
        "--buckets",
        "10",
        "--cat",
        "stay",
        "--learning-rate",
        "constant",
        "--rate",
        "0.3",
        "--curve",
        curve.to_str().unwrap(),
        "--save-config",
        saved.to_str().unwrap(),
    ]);
    execute(args).expect("training with curve output should succeed");

    let contents = std::fs::read_to_string(&curve).unwrap();
    assert_eq!(contents.lines().count(), 11);
    assert!(contents.starts_with("step,mean_reward"));

    // A saved configuration replays as the same run
    let replay = parse_args([
        "catmouse-train",
        "--config",
        saved.to_str().unwrap(),
    ]);
    execute(replay).expect("training from saved config should succeed");
}

#[test]
fn invalid_discount_is_rejected() {
    let args = parse_args(["catmouse-train", "--steps", "10", "--discount", "1.5"]);
    let err = execute(args).unwrap_err();
    assert!(format!("{err:#}").contains("discount"));
}
