use descent_results::{DescentResult, Metric, ResultsErr, ResultsOfSeveralDescents};
use ndarray::{array, Array1, Array2};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn artificial(losses: Vec<Vec<f64>>) -> DescentResult {
    DescentResult {
        averaged_losses: losses.iter().map(|run| run.iter().map(|l| l / 2.0).collect()).collect(),
        losses,
        artificial: true,
        ..Default::default()
    }
}

fn two_algorithms() -> ResultsOfSeveralDescents {
    ResultsOfSeveralDescents::new(
        vec![
            ("A", artificial(vec![vec![2.0, 4.0], vec![4.0, 6.0]])),
            ("B", artificial(vec![vec![1.0, 1.0]])),
        ],
        10,
    )
    .unwrap()
}

fn assert_close(got: &Array1<f64>, expected: &Array1<f64>) {
    assert_eq!(got.len(), expected.len());
    for (g, e) in got.iter().zip(expected) {
        assert!((g - e).abs() < 1e-12, "got {got}, expected {expected}");
    }
}

#[test]
fn test_mean_loss_of_two_algorithms() {
    init_logger();
    let results = two_algorithms();

    let loss = results.get_loss(0.0, false, false);

    assert_eq!(loss, vec![array![3.0, 5.0], array![1.0, 1.0]]);
}

#[test]
fn test_mean_loss_is_relative_to_the_objective() {
    init_logger();
    let results = two_algorithms();

    let loss = results.get_loss(1.0, false, false);

    assert_eq!(loss, vec![array![2.0, 4.0], array![0.0, 0.0]]);
}

#[test]
fn test_std_loss_is_the_population_std() {
    init_logger();
    let results = two_algorithms();

    let std = results.get_std(0.5, false, false);

    assert_close(&std[0], &array![1.0, 1.0]);
    assert_close(&std[1], &array![0.0, 0.0]);
    assert!(std.iter().flatten().all(|s| *s >= 0.0));
}

#[test]
fn test_averaged_flag_selects_the_averaged_losses() {
    init_logger();
    let results = two_algorithms();

    assert_eq!(
        results.get_loss(0.0, true, false),
        vec![array![1.5, 2.5], array![0.5, 0.5]]
    );
    assert_eq!(
        results.get_losses_i(0, true).unwrap(),
        &array![[1.0, 2.0], [2.0, 3.0]]
    );
    assert_eq!(
        results.get_losses_i(1, false).unwrap(),
        &array![[1.0, 1.0]]
    );
}

#[test]
fn test_log_loss_of_a_single_run_is_the_log_of_the_loss() {
    init_logger();
    let results =
        ResultsOfSeveralDescents::new(vec![("A", artificial(vec![vec![11.0, 101.0, 2.0]]))], 1)
            .unwrap();

    let linear = results.get_loss(1.0, false, false);
    let log = results.get_loss(1.0, false, true);

    assert_close(&log[0], &linear[0].mapv(f64::log10));
    assert_close(&log[0], &array![1.0, 2.0, 0.0]);
}

#[test]
fn test_log_loss_averages_the_logs_of_each_run() {
    init_logger();
    let results = ResultsOfSeveralDescents::new(
        vec![("A", artificial(vec![vec![10.0, 100.0], vec![1000.0, 100.0]]))],
        1,
    )
    .unwrap();

    assert_close(&results.get_loss(0.0, false, true)[0], &array![2.0, 2.0]);
    assert_close(&results.get_std(0.0, false, true)[0], &array![1.0, 0.0]);
}

#[test]
fn test_log_loss_below_the_objective_is_not_finite() {
    init_logger();
    let results = two_algorithms();

    let log = results.get_loss(1.0, false, true);

    assert!(log[1].iter().all(|l| l.is_infinite() && *l < 0.0));
    assert!(log[0].iter().all(|l| l.is_finite()));
}

#[test]
fn test_getter_of_a_single_run_is_the_run() {
    let runs: Vec<Array2<f64>> = vec![array![[0.3, 0.2, 0.1]]];

    assert_eq!(
        ResultsOfSeveralDescents::getter(&runs, false),
        vec![array![0.3, 0.2, 0.1]]
    );
    assert_eq!(
        ResultsOfSeveralDescents::getter_std(&runs, false),
        vec![array![0.0, 0.0, 0.0]]
    );
}

#[test]
fn test_names_keep_the_input_order() {
    init_logger();
    let results = ResultsOfSeveralDescents::new(
        vec![
            ("zeta", artificial(vec![vec![1.0]])),
            ("alpha", artificial(vec![vec![2.0]])),
            ("mid", artificial(vec![vec![3.0]])),
        ],
        4,
    )
    .unwrap();

    assert_eq!(results.names(), ["zeta", "alpha", "mid"]);
    assert_eq!(results.index_of("alpha"), Some(1));
    assert_eq!(results.index_of("omega"), None);
    assert_eq!(results.len(), 3);
    assert_eq!(results.nb_devices_for_the_run(), 4);
    assert_eq!(
        results.get_loss(0.0, false, false),
        vec![array![1.0], array![2.0], array![3.0]]
    );
}

#[test]
fn test_in_log_is_honored_by_every_metric() {
    init_logger();
    let descent = DescentResult {
        losses: vec![vec![1.0, 1.0]],
        norm_error_feedback: vec![vec![10.0, 1000.0], vec![10.0, 1000.0]],
        dist_to_model: vec![vec![100.0, 100.0], vec![10000.0, 1.0]],
        var_models: vec![vec![1.0, 10.0], vec![1.0, 10.0]],
        artificial: true,
        ..Default::default()
    };
    let results = ResultsOfSeveralDescents::new(vec![("A", descent)], 2).unwrap();

    assert_eq!(results.get_error_feedback(false), vec![array![10.0, 1000.0]]);
    assert_close(&results.get_error_feedback(true)[0], &array![1.0, 3.0]);
    assert_close(&results.get_error_feedback_std(true)[0], &array![0.0, 0.0]);

    assert_eq!(results.get_distance_to_model(false), vec![array![5050.0, 50.5]]);
    assert_close(&results.get_distance_to_model(true)[0], &array![3.0, 1.0]);

    assert_eq!(results.get_var_models(false), vec![array![1.0, 10.0]]);
    assert_close(&results.get_var_models(true)[0], &array![0.0, 1.0]);
    assert_close(&results.get_var_models_std(true)[0], &array![0.0, 0.0]);
}

#[test]
fn test_distance_to_model_std_reduces_the_distances() {
    init_logger();
    let descent = DescentResult {
        losses: vec![vec![1.0], vec![1.0]],
        norm_error_feedback: vec![vec![5.0], vec![5.0]],
        dist_to_model: vec![vec![1.0], vec![3.0]],
        artificial: true,
        ..Default::default()
    };
    let results = ResultsOfSeveralDescents::new(vec![("A", descent)], 2).unwrap();

    assert_eq!(results.get_error_feedback_std(false), vec![array![0.0]]);
    assert_eq!(results.get_distance_to_model_std(false), vec![array![1.0]]);
}

#[test]
fn test_untracked_metrics_reduce_to_empty_sequences() {
    init_logger();
    let results = two_algorithms();

    let ef = results.get_error_feedback(true);

    assert_eq!(ef.len(), 2);
    assert!(ef.iter().all(|e| e.is_empty()));
}

#[test]
fn test_metric_accessors_match_the_named_ones() {
    init_logger();
    let results = two_algorithms();

    assert_eq!(
        results.mean(Metric::Loss, false),
        results.get_loss(0.0, false, false)
    );
    assert_eq!(
        results.std(Metric::AveragedLoss, false),
        results.get_std(0.0, true, false)
    );
    assert_eq!(
        results.mean(Metric::VarModels, true),
        results.get_var_models(true)
    );
}

#[test]
fn test_summarize_pairs_names_with_bands() {
    init_logger();
    let results = two_algorithms();

    let summaries = results.summarize(Metric::Loss, 0.0, false);

    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[0].name, "A");
    assert_eq!(summaries[0].metric, Metric::Loss);
    assert_eq!(summaries[0].rounds(), 2);
    assert_eq!(summaries[0].mean, vec![3.0, 5.0]);
    assert_eq!(summaries[0].lower(), vec![2.0, 4.0]);
    assert_eq!(summaries[0].upper(), vec![4.0, 6.0]);
    assert_eq!(summaries[1].name, "B");
    assert_eq!(summaries[1].std, vec![0.0, 0.0]);
}

#[test]
fn test_summary_serializes_for_plotting() {
    init_logger();
    let results = two_algorithms();

    let summaries = results.summarize(Metric::AveragedLoss, 0.0, false);
    let json = serde_json::to_value(&summaries[1]).unwrap();

    assert_eq!(json["name"], "B");
    assert_eq!(json["metric"], "averaged_loss");
    assert_eq!(json["in_log"], false);
    assert_eq!(json["mean"], serde_json::json!([0.5, 0.5]));
}

#[test]
fn test_empty_input_is_rejected() {
    init_logger();
    let err = ResultsOfSeveralDescents::new(Vec::<(String, DescentResult)>::new(), 1).unwrap_err();

    assert_eq!(err, ResultsErr::NoDescents);
}

#[test]
fn test_duplicate_names_are_rejected() {
    init_logger();
    let err = ResultsOfSeveralDescents::new(
        vec![
            ("A", artificial(vec![vec![1.0]])),
            ("A", artificial(vec![vec![2.0]])),
        ],
        1,
    )
    .unwrap_err();

    assert_eq!(err, ResultsErr::DuplicateName { name: "A".into() });
}

#[test]
fn test_ragged_runs_are_rejected() {
    init_logger();
    let err = ResultsOfSeveralDescents::new(
        vec![("A", artificial(vec![vec![1.0, 2.0], vec![1.0, 2.0], vec![1.0]]))],
        1,
    )
    .unwrap_err();

    assert_eq!(
        err,
        ResultsErr::RaggedRuns {
            name: "A".into(),
            metric: Metric::Loss,
            run: 2,
            got: 1,
            expected: 2,
        }
    );
    assert_eq!(
        err.to_string(),
        "run 2 of A has 1 rounds of losses, expected 2"
    );
}

#[test]
fn test_out_of_bounds_index_is_rejected() {
    init_logger();
    let results = two_algorithms();

    assert_eq!(
        results.get_losses_i(2, false).unwrap_err(),
        ResultsErr::OutOfBounds { index: 2, len: 2 }
    );
    assert!(results.bookkeeping(5).is_err());
}

#[test]
fn test_results_are_shareable_between_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResultsOfSeveralDescents>();
}
