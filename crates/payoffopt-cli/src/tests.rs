// Tests for the command-line runner

#[cfg(test)]
mod tests {
    use crate::*;
    use payoffopt_solver::SolverKind;
    use payoffopt_types::PayoffOptError;
    use std::path::Path;

    fn write_chain(dir: &Path) -> std::path::PathBuf {
        let path = dir.join("maximize_payoff_input.csv");
        std::fs::write(&path, "Strike;Price_CALL;Price_PUT\n100;5;3\n110;1;8\n").unwrap();
        path
    }

    #[test]
    fn test_default_config() {
        let config = OptimizerConfig::default();

        assert_eq!(config.delimiter, ';');
        assert_eq!(config.delimiter_byte().unwrap(), b';');
        assert_eq!(config.solver.backend, SolverKind::MicroLp);
        assert!(config.report_path.is_none());
        assert!(config.output_path.ends_with("results_maximize_payoff.json"));
    }

    #[test]
    fn test_load_partial_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{"input_path": "chain.csv", "solver": {"backend": "microlp"}, "limits": {"total_max": 10}}"#,
        )
        .unwrap();

        let config = OptimizerConfig::load(&path).unwrap();

        assert_eq!(config.input_path, Path::new("chain.csv"));
        assert_eq!(config.limits.total_max, 10);
        assert_eq!(config.limits.per_cell_max, 4);
        assert_eq!(config.delimiter, ';');
    }

    #[test]
    fn test_bad_config_is_configuration_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"limits": {"total_max": "many"}}"#).unwrap();

        let err = OptimizerConfig::load(&path).unwrap_err();
        assert!(matches!(err, PayoffOptError::Configuration(_)));
    }

    #[test]
    fn test_invalid_delimiter() {
        let config = OptimizerConfig {
            delimiter: 'é',
            ..OptimizerConfig::default()
        };
        assert!(matches!(
            config.validate().unwrap_err(),
            PayoffOptError::Configuration(_)
        ));
    }

    #[test]
    fn test_run_writes_results_and_report() {
        let dir = tempfile::tempdir().unwrap();
        let config = OptimizerConfig {
            input_path: write_chain(dir.path()),
            output_path: dir.path().join("out").join("results.json"),
            report_path: Some(dir.path().join("out").join("report.json")),
            ..OptimizerConfig::default()
        };

        let outcome = run(&config).unwrap();
        let solution = outcome.solution().unwrap();
        assert!((solution.objective - 95.0).abs() < 1e-6);

        let records: std::collections::BTreeMap<String, [f64; 4]> =
            serde_json::from_str(&std::fs::read_to_string(&config.output_path).unwrap()).unwrap();
        assert_eq!(records.len(), solution.positions().len());
        assert!(records.keys().all(|k| k.starts_with('(')));

        let report: serde_json::Value = serde_json::from_str(
            &std::fs::read_to_string(config.report_path.as_ref().unwrap()).unwrap(),
        )
        .unwrap();
        assert_eq!(report["status"], "Optimal");
    }

    #[test]
    fn test_run_with_unavailable_solver() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = OptimizerConfig {
            input_path: write_chain(dir.path()),
            output_path: dir.path().join("results.json"),
            ..OptimizerConfig::default()
        };
        config.solver.backend = SolverKind::Highs;

        let err = run(&config).unwrap_err();
        assert!(matches!(err, PayoffOptError::SolverUnavailable(_)));
        assert!(!config.output_path.exists());
    }

    #[test]
    fn test_run_with_duplicate_strikes() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("dup.csv");
        std::fs::write(&input, "Strike;Price_CALL;Price_PUT\n100;5;3\n100;1;8\n").unwrap();
        let config = OptimizerConfig {
            input_path: input,
            output_path: dir.path().join("results.json"),
            ..OptimizerConfig::default()
        };

        let err = run(&config).unwrap_err();
        assert!(matches!(err, PayoffOptError::Configuration(_)));
    }
}
