// Integration tests for types crate

#[cfg(test)]
mod tests {
    use crate::*;

    #[test]
    fn test_empty_grid_is_configuration_error() {
        let err = StrikeGrid::new(vec![]).unwrap_err();
        assert!(matches!(err, PayoffOptError::Configuration(_)));
    }

    #[test]
    fn test_duplicate_strike_is_configuration_error() {
        let rows = vec![
            StrikeRow::new(2900.0, 120.0, 35.0),
            StrikeRow::new(2950.0, 85.0, 50.0),
            StrikeRow::new(2900.0, 121.0, 36.0),
        ];

        let err = StrikeGrid::new(rows).unwrap_err();
        match err {
            PayoffOptError::Configuration(msg) => assert!(msg.contains("2900")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_grid_roundtrip_serialization() {
        let grid = StrikeGrid::new(vec![
            StrikeRow::new(2900.0, 120.0, 35.0),
            StrikeRow::new(2950.0, 85.0, 50.0),
        ])
        .unwrap();

        let json = serde_json::to_string(&grid).unwrap();
        let back: StrikeGrid = serde_json::from_str(&json).unwrap();
        assert_eq!(grid, back);
    }

    #[test]
    fn test_grid_deserialization_validates() {
        let json = r#"[{"strike":1.0,"call_price":1.0,"put_price":1.0},
                       {"strike":1.0,"call_price":2.0,"put_price":2.0}]"#;
        assert!(serde_json::from_str::<StrikeGrid>(json).is_err());
    }

    #[test]
    fn test_default_limits() {
        let limits = PositionLimits::default();
        assert_eq!(limits.per_variable_max, 4);
        assert_eq!(limits.per_cell_max, 4);
        assert_eq!(limits.per_strike_max, 4);
        assert_eq!(limits.total_max, 16);
        assert_eq!(limits.call_side_max, 8);
        assert_eq!(limits.put_side_max, 8);
        assert_eq!(limits.balance_counter_max, 100.0);
        assert!(limits.validate().is_ok());
    }

    #[test]
    fn test_limits_validation() {
        let limits = PositionLimits {
            total_max: 0,
            ..PositionLimits::default()
        };
        assert!(limits.validate().is_err());

        let limits = PositionLimits {
            shorts_per_long: -1.0,
            ..PositionLimits::default()
        };
        assert!(limits.validate().is_err());
    }

    #[test]
    fn test_partial_limits_from_json() {
        let limits: PositionLimits = serde_json::from_str(r#"{"total_max": 12}"#).unwrap();
        assert_eq!(limits.total_max, 12);
        assert_eq!(limits.per_cell_max, 4);
    }
}
