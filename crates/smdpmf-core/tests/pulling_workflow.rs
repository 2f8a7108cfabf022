use smdpmf::core::io::discovery::UnindexedPolicy;
use smdpmf::core::models::color::Rgb;
use smdpmf::core::models::condition::ConditionSpec;
use smdpmf::engine::config::{PipelineConfig, PipelineConfigBuilder};
use smdpmf::engine::error::EngineError;
use smdpmf::engine::progress::{Progress, ProgressReporter};
use smdpmf::workflows::pulling::{self, ConditionOutcome};
use std::fs;
use std::path::Path;
use std::sync::Mutex;
use tempfile::{TempDir, tempdir};

const HEADER: &str = "\
# This file was created by a pulling run
# header line 2
@    title \"Pull force\"
@    xaxis  label \"Time (ps)\"
";

fn write_xvg(path: &Path, values: &[f64]) {
    let mut content = String::from(HEADER);
    for (i, v) in values.iter().enumerate() {
        content.push_str(&format!("{:.3}\t{}\n", i as f64 * 0.5, v));
    }
    fs::write(path, content).unwrap();
}

fn write_trajectory(dir: &Path, index: u64, distance: &[f64], force: &[f64]) {
    write_xvg(&dir.join(format!("slow_pullx{index}.xvg")), distance);
    write_xvg(&dir.join(format!("slow_pullf{index}.xvg")), force);
}

fn condition(root: &TempDir, name: &str) -> ConditionSpec {
    let dir = root.path().join(name);
    fs::create_dir_all(&dir).unwrap();
    ConditionSpec::new(name, name.replace('_', "+"), "orange".parse::<Rgb>().unwrap(), dir)
}

fn config(conditions: Vec<ConditionSpec>, fail_fast: bool) -> PipelineConfig {
    PipelineConfigBuilder::new()
        .boltzmann_constant(0.008314)
        .temperature(298.15)
        .header_rows(2)
        .value_column(1)
        .max_rows(None)
        .force_pattern("slow_pullf*.xvg")
        .distance_pattern("slow_pullx*.xvg")
        .unindexed_files(UnindexedPolicy::Reject)
        .force_window(1)
        .work_window(1)
        .conditions(conditions)
        .fail_fast(fail_fast)
        .build()
        .unwrap()
}

#[test]
fn constant_force_ensemble_gives_linear_free_energy() {
    let root = tempdir().unwrap();
    let water = condition(&root, "NNQQ_Water");
    for index in 1..=3 {
        write_trajectory(
            &water.data_dir,
            index,
            &[0.0, 1.0, 2.0, 3.0, 4.0],
            &[10.0; 5],
        );
    }

    let report = pulling::run(&config(vec![water], false), &ProgressReporter::new()).unwrap();
    assert!(!report.has_failures());
    let result = report.completed().next().unwrap();

    assert_eq!(result.n_trajectories(), 3);
    for work in &result.work.trajectories {
        assert_eq!(work.work.y, vec![0.0, 10.0, 20.0, 30.0, 40.0]);
    }
    let expected = [0.0, 10.0, 20.0, 30.0, 40.0];
    for (dg, want) in result.free_energy.raw.y.iter().zip(expected) {
        assert!((dg - want).abs() < 1e-9, "{dg} != {want}");
    }
    assert_eq!(result.free_energy.raw.x, vec![0.0, 1.0, 2.0, 3.0, 4.0]);
    assert!(result.force.std_dev.iter().all(|&s| s == 0.0));
}

#[test]
fn unsorted_samples_are_reordered_before_integration() {
    let root = tempdir().unwrap();
    let spec = condition(&root, "shuffled");
    write_trajectory(
        &spec.data_dir,
        7,
        &[2.0, 0.0, 4.0, 1.0, 3.0],
        &[10.0, 10.0, 10.0, 10.0, 10.0],
    );

    let result = pulling::analyze_condition(&spec, &config(vec![spec.clone()], false)).unwrap();
    let work = &result.work.trajectories[0];
    assert_eq!(work.work.x, vec![0.0, 1.0, 2.0, 3.0, 4.0]);
    assert_eq!(work.work.y, vec![0.0, 10.0, 20.0, 30.0, 40.0]);
    assert_eq!(work.max_work, 40.0);
}

#[test]
fn failing_condition_does_not_stop_the_others() {
    let root = tempdir().unwrap();
    let good = condition(&root, "good");
    let broken = condition(&root, "broken");
    write_trajectory(&good.data_dir, 1, &[0.0, 1.0, 2.0], &[1.0, 1.0, 1.0]);
    write_trajectory(&broken.data_dir, 1, &[0.0, 1.0, 2.0], &[1.0, 1.0, 1.0]);
    write_xvg(&broken.data_dir.join("slow_pullf2.xvg"), &[1.0, 2.0, 3.0]);

    let events = Mutex::new(Vec::new());
    let reporter = ProgressReporter::with_callback(Box::new(|event| {
        events.lock().unwrap().push(event);
    }));
    let report = pulling::run(&config(vec![good, broken], false), &reporter).unwrap();
    drop(reporter);

    assert_eq!(report.outcomes.len(), 2);
    assert!(matches!(report.outcomes[0], ConditionOutcome::Completed(_)));
    let failures: Vec<_> = report.failures().collect();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].0, "broken");

    let events = events.into_inner().unwrap();
    assert!(events.iter().any(|e| matches!(
        e,
        Progress::ConditionFailed { name, .. } if name == "broken"
    )));
    assert!(events.iter().any(|e| matches!(
        e,
        Progress::ConditionDone { name, trajectories: 1 } if name == "good"
    )));
}

#[test]
fn fail_fast_returns_the_first_failure() {
    let root = tempdir().unwrap();
    let empty = condition(&root, "empty");

    let result = pulling::run(&config(vec![empty], true), &ProgressReporter::new());
    match result {
        Err(EngineError::ConditionFailed { name, source }) => {
            assert_eq!(name, "empty");
            assert!(matches!(*source, EngineError::EmptyEnsemble(_)));
        }
        other => panic!("expected a failed condition, got {other:?}"),
    }
}

#[test]
fn results_can_be_exported_as_csv() {
    let root = tempdir().unwrap();
    let spec = condition(&root, "water");
    for index in 1..=2 {
        write_trajectory(&spec.data_dir, index, &[0.0, 0.5, 1.0], &[2.0, 4.0, 6.0]);
    }
    let result = pulling::analyze_condition(&spec, &config(vec![spec.clone()], false)).unwrap();

    let out = tempdir().unwrap();
    let written = result.export_csv(out.path()).unwrap();
    let names: Vec<String> = written
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        names,
        vec![
            "water_force.csv",
            "water_work.csv",
            "water_free_energy.csv",
            "water_trajectories.csv",
        ]
    );

    let trajectories = fs::read_to_string(out.path().join("water_trajectories.csv")).unwrap();
    assert_eq!(trajectories.lines().count(), 3);
    assert!(trajectories.lines().nth(1).unwrap().starts_with("1,3,4.0,"));
}
