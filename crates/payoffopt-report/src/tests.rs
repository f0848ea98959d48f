// Integration tests for report

#[cfg(test)]
mod tests {
    use crate::*;
    use payoffopt_model::StrategyOptimizer;
    use payoffopt_types::{PositionLimits, StrikeGrid, StrikeRow};
    use std::io::Write;

    fn two_strike_grid() -> StrikeGrid {
        StrikeGrid::new(vec![
            StrikeRow::new(100.0, 5.0, 3.0),
            StrikeRow::new(110.0, 1.0, 8.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_records_contain_only_nonzero_cells() {
        let outcome = StrategyOptimizer::new().optimize(&two_strike_grid()).unwrap();
        let solution = outcome.solution().unwrap();

        let records = result_records(solution);

        assert_eq!(records.len(), solution.positions().len());
        for (key, quantities) in &records {
            assert!(key.starts_with('(') && key.ends_with(')'));
            assert!(quantities.iter().sum::<f64>() > 0.0);
        }
        let total: f64 = records.values().flat_map(|q| q.iter()).sum();
        assert_eq!(total, f64::from(solution.total_contracts()));
    }

    #[test]
    fn test_json_file_writer() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("results_maximize_payoff.json");

        let mut records = ResultRecords::new();
        records.insert("(2900, 2950)".to_string(), [1.0, 0.0, 0.0, 2.0]);

        let mut writer = JsonFileWriter::new(&path);
        writer.write(&records).unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written, serde_json::json!({"(2900, 2950)": [1.0, 0.0, 0.0, 2.0]}));
    }

    #[test]
    fn test_memory_writer() {
        let mut writer = MemoryWriter::new();
        writer.write(&ResultRecords::new()).unwrap();
        assert_eq!(writer.records, Some(ResultRecords::new()));
    }

    #[test]
    fn test_load_grid_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Price_CALL;Price_PUT;Strike").unwrap();
        writeln!(file, "120;35;2900").unwrap();
        writeln!(file, "85;50;2950").unwrap();
        writeln!(file, "55;70;3000").unwrap();
        file.flush().unwrap();

        let grid = load_strike_grid(file.path(), DEFAULT_DELIMITER).unwrap();
        assert_eq!(grid.len(), 3);
        assert_eq!(grid.row(2), Some(&StrikeRow::new(3000.0, 55.0, 70.0)));

        assert_eq!(hash_file(file.path()).unwrap().len(), 64);
    }

    #[test]
    fn test_load_grid_rejects_duplicates() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Price_CALL;Price_PUT;Strike").unwrap();
        writeln!(file, "120;35;2900").unwrap();
        writeln!(file, "121;36;2900").unwrap();
        file.flush().unwrap();

        let err = load_strike_grid(file.path(), DEFAULT_DELIMITER).unwrap_err();
        assert!(matches!(err, payoffopt_types::PayoffOptError::Configuration(_)));
    }

    #[test]
    fn test_report_determinism() {
        let grid = two_strike_grid();
        let limits = PositionLimits::default();
        let outcome = StrategyOptimizer::new().optimize(&grid).unwrap();
        let reporter = MemoryReporter::new();

        let report1 = reporter.publish(&grid, &limits, &outcome).unwrap();
        let report2 = reporter.publish(&grid, &limits, &outcome).unwrap();

        // Same inputs should produce same hashes
        assert_eq!(report1.input_hash, report2.input_hash);
        assert_eq!(report1.output_hash, report2.output_hash);
        assert!(report1.report_data.outputs.summary.is_some());
    }

    #[test]
    fn test_json_file_reporter() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run_report.json");
        let grid = two_strike_grid();
        let outcome = StrategyOptimizer::new().optimize(&grid).unwrap();

        let report = JsonFileReporter::new(&path)
            .publish(&grid, &PositionLimits::default(), &outcome)
            .unwrap();

        let back: RunReport =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(back.input_hash, report.input_hash);
        assert_eq!(back.report_data.inputs.grid, grid);
    }
}
