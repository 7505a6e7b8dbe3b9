#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use std::collections::{BTreeMap, HashMap};
    use std::path::PathBuf;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};
    use worklog::api::TogglConfig;
    use worklog::libs::config::{Config, ReportConfig, DEFAULT_API_URL, DEFAULT_DATE_FORMAT, DEFAULT_ROUNDING_INTERVAL};
    use worklog::libs::error::ConfigError;
    use worklog::libs::grouping::{GroupingKey, GroupingMode, ProjectFilter};
    use worklog::libs::interval::ProjectId;
    use worklog::libs::report::ReportLayout;
    use worklog::libs::settings::{DateRange, ReportRequest, ReportSettings};

    /// Test context that points the data directory at a temporary home.
    struct ConfigTestContext {
        _temp_dir: TempDir,
    }

    impl TestContext for ConfigTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            // Mock the home/appdata directory for cross-platform compatibility.
            std::env::set_var("HOME", temp_dir.path());
            std::env::set_var("LOCALAPPDATA", temp_dir.path());
            ConfigTestContext { _temp_dir: temp_dir }
        }
    }

    fn configured(token: &str) -> Config {
        Config {
            toggl: Some(TogglConfig {
                api_url: "https://toggl.example.com/api/v8/".to_string(),
                api_token: token.to_string(),
            }),
            report: None,
        }
    }

    fn march() -> DateRange {
        DateRange::month(2020, 3).unwrap()
    }

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_read_save_and_read_back(_ctx: &mut ConfigTestContext) {
        // Nothing stored yet
        let config = Config::read().unwrap();
        assert_eq!(config, Config::default());

        let mut project_names = BTreeMap::new();
        project_names.insert(7, "Kunde A".to_string());
        let config = Config {
            report: Some(ReportConfig {
                rounding_interval: 30,
                project_ids: vec![7],
                project_names,
                ..ReportConfig::default()
            }),
            ..configured("secret")
        };
        config.save().unwrap();

        assert_eq!(Config::read().unwrap(), config);
    }

    #[test]
    fn test_missing_sections_are_omitted() {
        let json = serde_json::to_string(&configured("secret")).unwrap();
        assert!(!json.contains("report"));

        let config: Config = serde_json::from_str(r#"{"report":{"rounding_interval":10,"ms_per_minute":60000.0,"date_format":"%d.%m.%Y","output_dir":"out"}}"#).unwrap();
        let report = config.report.unwrap();
        assert_eq!(report.rounding_interval, 10);
        assert!(report.project_ids.is_empty());
        assert!(config.toggl.is_none());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        config
            .apply_env_with(env(&[
                ("API_TOKEN", "from-env"),
                ("ROUNDING_INTERVAL", " 30 "),
                ("REPORT_DIR", "/tmp/reports"),
            ]))
            .unwrap();

        let toggl = config.toggl.unwrap();
        assert_eq!(toggl.api_token, "from-env");
        assert_eq!(toggl.api_url, DEFAULT_API_URL);
        let report = config.report.unwrap();
        assert_eq!(report.rounding_interval, 30);
        assert_eq!(report.output_dir, "/tmp/reports");
        assert_eq!(report.date_format, DEFAULT_DATE_FORMAT);
    }

    #[test]
    fn test_env_blank_values_are_ignored() {
        let mut config = configured("stored");
        config.apply_env_with(env(&[("API_TOKEN", "  "), ("API_URL", "")])).unwrap();

        assert_eq!(config, configured("stored"));
    }

    #[test]
    fn test_env_invalid_interval() {
        let mut config = Config::default();
        let result = config.apply_env_with(env(&[("ROUNDING_INTERVAL", "quarter")]));

        assert!(matches!(result, Err(ConfigError::InvalidEnv { ref key, .. }) if key == "ROUNDING_INTERVAL"));
    }

    #[test]
    fn test_resolve_defaults() {
        let request = ReportRequest {
            range: Some(march()),
            ..ReportRequest::default()
        };
        let settings = ReportSettings::resolve(&configured("secret"), request).unwrap();

        assert_eq!(settings.rounding_interval, DEFAULT_ROUNDING_INTERVAL as u32);
        assert_eq!(settings.mode, GroupingMode::PerDay);
        assert_eq!(settings.key, GroupingKey::DayOfMonth);
        assert_eq!(settings.layout, ReportLayout::Basic);
        assert_eq!(settings.filter, ProjectFilter::All);
        assert_eq!(settings.date_format, DEFAULT_DATE_FORMAT);
        assert_eq!(settings.output_dir, PathBuf::from("./dist"));
        assert_eq!(settings.file_name(), "2020-03-01_2020-03-31.csv");
    }

    #[test]
    fn test_resolve_per_project_forces_extended_layout() {
        let request = ReportRequest {
            range: Some(march()),
            per_project: true,
            full_date: true,
            ..ReportRequest::default()
        };
        let settings = ReportSettings::resolve(&configured("secret"), request).unwrap();

        assert_eq!(settings.mode, GroupingMode::PerProject);
        assert_eq!(settings.layout, ReportLayout::Extended);
        assert_eq!(settings.key, GroupingKey::CalendarDate);
    }

    #[test]
    fn test_resolve_single_project_file_name() {
        let request = ReportRequest {
            range: Some(march()),
            project_ids: vec![ProjectId(123)],
            output_dir: Some(PathBuf::from("out")),
            ..ReportRequest::default()
        };
        let settings = ReportSettings::resolve(&configured("secret"), request).unwrap();

        assert_eq!(settings.file_name(), "2020-03-01_2020-03-31_123.csv");
        assert_eq!(settings.output_dir, PathBuf::from("out"));
    }

    #[test]
    fn test_resolve_uses_configured_projects_when_none_requested() {
        let config = Config {
            report: Some(ReportConfig {
                project_ids: vec![5, 6],
                ..ReportConfig::default()
            }),
            ..configured("secret")
        };
        let request = ReportRequest {
            range: Some(march()),
            ..ReportRequest::default()
        };
        let settings = ReportSettings::resolve(&config, request).unwrap();

        assert!(settings.filter.accepts(Some(ProjectId(5))));
        assert!(!settings.filter.accepts(Some(ProjectId(7))));
        assert_eq!(settings.file_name(), "2020-03-01_2020-03-31.csv");
    }

    #[test]
    fn test_resolve_missing_token() {
        let request = ReportRequest {
            range: Some(march()),
            ..ReportRequest::default()
        };
        assert!(matches!(ReportSettings::resolve(&Config::default(), request.clone()), Err(ConfigError::MissingToken)));
        assert!(matches!(ReportSettings::resolve(&configured(" "), request), Err(ConfigError::MissingToken)));
    }

    #[test]
    fn test_resolve_rejects_non_positive_interval() {
        for interval in [0, -15] {
            let config = Config {
                report: Some(ReportConfig {
                    rounding_interval: interval,
                    ..ReportConfig::default()
                }),
                ..configured("secret")
            };
            let request = ReportRequest {
                range: Some(march()),
                ..ReportRequest::default()
            };
            let result = ReportSettings::resolve(&config, request);
            assert!(matches!(result, Err(ConfigError::InvalidRoundingInterval(value)) if value == interval));
        }
    }

    #[test]
    fn test_resolve_rejects_bad_conversion_factor() {
        let config = Config {
            report: Some(ReportConfig {
                ms_per_minute: 0.0,
                ..ReportConfig::default()
            }),
            ..configured("secret")
        };
        let request = ReportRequest {
            range: Some(march()),
            ..ReportRequest::default()
        };
        assert!(matches!(ReportSettings::resolve(&config, request), Err(ConfigError::InvalidConversionFactor(_))));
    }

    #[test]
    fn test_resolve_rejects_bad_date_format() {
        let config = Config {
            report: Some(ReportConfig {
                date_format: "%Q".to_string(),
                ..ReportConfig::default()
            }),
            ..configured("secret")
        };
        let request = ReportRequest {
            range: Some(march()),
            ..ReportRequest::default()
        };
        assert!(matches!(ReportSettings::resolve(&config, request), Err(ConfigError::InvalidDateFormat(_))));
    }

    #[test]
    fn test_resolve_rejects_time_fields_in_date_format() {
        for format in ["%d.%m.%Y %H:%M", "%-d.%-m.%Y %z", "%F %T"] {
            let config = Config {
                report: Some(ReportConfig {
                    date_format: format.to_string(),
                    ..ReportConfig::default()
                }),
                ..configured("secret")
            };
            let request = ReportRequest {
                range: Some(march()),
                ..ReportRequest::default()
            };
            let result = ReportSettings::resolve(&config, request);
            assert!(matches!(result, Err(ConfigError::InvalidDateFormat(ref value)) if value == format), "format={format}");
        }
    }

    #[test]
    fn test_resolve_accepts_date_only_formats() {
        for format in ["%Y-%m-%d", "%d.%m.%Y", "%a %e %b %Y", "KW %V, %d.%m."] {
            let config = Config {
                report: Some(ReportConfig {
                    date_format: format.to_string(),
                    ..ReportConfig::default()
                }),
                ..configured("secret")
            };
            let request = ReportRequest {
                range: Some(march()),
                ..ReportRequest::default()
            };
            assert!(ReportSettings::resolve(&config, request).is_ok(), "format={format}");
        }
    }

    #[test]
    fn test_resolve_per_project_requires_range() {
        let request = ReportRequest {
            per_project: true,
            ..ReportRequest::default()
        };
        assert!(matches!(ReportSettings::resolve(&configured("secret"), request), Err(ConfigError::MissingRange)));
    }

    #[test]
    fn test_resolve_per_day_defaults_to_current_month() {
        let settings = ReportSettings::resolve(&configured("secret"), ReportRequest::default()).unwrap();

        assert_eq!(settings.range, DateRange::current_month().unwrap());
    }

    #[test]
    fn test_date_range_month() {
        let february = DateRange::month(2020, 2).unwrap();
        assert_eq!(february.to, NaiveDate::from_ymd_opt(2020, 2, 29).unwrap());

        let december = DateRange::parse_month("2019-12").unwrap();
        assert_eq!(december.from, NaiveDate::from_ymd_opt(2019, 12, 1).unwrap());
        assert_eq!(december.to, NaiveDate::from_ymd_opt(2019, 12, 31).unwrap());
        assert_eq!(december.file_stem(), "2019-12-01_2019-12-31");

        assert!(matches!(DateRange::parse_month("2019-13"), Err(ConfigError::InvalidMonth(_))));
        assert!(matches!(DateRange::month(2020, 0), Err(ConfigError::InvalidMonth(_))));
    }

    #[test]
    fn test_date_range_rejects_inverted() {
        let from = NaiveDate::from_ymd_opt(2020, 3, 10).unwrap();
        let to = NaiveDate::from_ymd_opt(2020, 3, 9).unwrap();

        assert!(matches!(DateRange::new(from, to), Err(ConfigError::InvalidRange { .. })));
        assert!(DateRange::new(from, from).is_ok());
    }

    #[test]
    fn test_query_bounds_cover_last_day() {
        let (start, end) = march().query_bounds().unwrap();

        assert_eq!(start.date_naive(), NaiveDate::from_ymd_opt(2020, 3, 1).unwrap());
        assert_eq!(end.date_naive(), NaiveDate::from_ymd_opt(2020, 4, 1).unwrap());
        assert_eq!(end.format("%H:%M").to_string(), "00:00");
    }
}
