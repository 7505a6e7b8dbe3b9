#[cfg(test)]
mod tests {
    use chrono::{DateTime, Local, NaiveDateTime};
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};
    use worklog::api::{FetchError, IntervalSource, Toggl, TogglConfig};
    use worklog::libs::config::Config;
    use worklog::libs::interval::{Project, ProjectId};
    use worklog::libs::settings::{DateRange, ReportRequest, ReportSettings};
    use worklog::libs::timesheet;

    /// `secret:api_token` in base64
    const AUTHORIZATION: &str = "Basic c2VjcmV0OmFwaV90b2tlbg==";

    fn toggl_config(server: &MockServer) -> TogglConfig {
        TogglConfig {
            api_url: format!("{}/", server.uri()),
            api_token: "secret".to_string(),
        }
    }

    fn local(timestamp: &str) -> NaiveDateTime {
        DateTime::parse_from_rfc3339(timestamp).unwrap().with_timezone(&Local).naive_local()
    }

    fn march() -> DateRange {
        DateRange::month(2020, 3).unwrap()
    }

    fn entries() -> serde_json::Value {
        json!([
            {"id": 1, "pid": 1, "start": "2020-03-02T08:02:00+00:00", "stop": "2020-03-02T12:14:00+00:00", "duration": 15120},
            {"id": 2, "pid": 2, "start": "2020-03-02T13:00:00+00:00", "stop": "2020-03-02T17:00:00+00:00", "duration": 14400},
            {"id": 3, "start": "2020-03-03T09:00:00+00:00", "stop": "2020-03-03T10:00:00+00:00", "duration": 3600},
            {"id": 4, "pid": 1, "start": "2020-03-03T10:00:00+00:00", "duration": -1583136000}
        ])
    }

    async fn mount_entries(server: &MockServer) {
        let (start, end) = march().query_bounds().unwrap();
        Mock::given(method("GET"))
            .and(path("/time_entries"))
            .and(header("authorization", AUTHORIZATION))
            .and(query_param("start_date", start.to_rfc3339()))
            .and(query_param("end_date", end.to_rfc3339()))
            .respond_with(ResponseTemplate::new(200).set_body_json(entries()))
            .expect(1)
            .mount(server)
            .await;
    }

    async fn mount_project(server: &MockServer, id: u64, name: &str) {
        Mock::given(method("GET"))
            .and(path(format!("/projects/{id}")))
            .and(header("authorization", AUTHORIZATION))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"id": id, "name": name, "active": true}})))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_fetch_intervals_converts_entries() {
        let server = MockServer::start().await;
        mount_entries(&server).await;

        let records = Toggl::new(&toggl_config(&server)).fetch_intervals(&march()).await.unwrap();

        // The running entry has no stop and is skipped
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].start, local("2020-03-02T08:02:00Z"));
        assert_eq!(records[0].stop, local("2020-03-02T12:14:00Z"));
        assert_eq!(records[0].project_id, Some(ProjectId(1)));
        assert_eq!(records[2].project_id, None);
    }

    #[tokio::test]
    async fn test_fetch_intervals_skips_inverted_entries() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/time_entries"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 1, "start": "2020-03-02T12:00:00+00:00", "stop": "2020-03-02T08:00:00+00:00"}
            ])))
            .mount(&server)
            .await;

        let records = Toggl::new(&toggl_config(&server)).fetch_intervals(&march()).await.unwrap();
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_intervals_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/time_entries"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let result = Toggl::new(&toggl_config(&server)).fetch_intervals(&march()).await;
        assert!(matches!(result, Err(FetchError::Status { status, .. }) if status.as_u16() == 500));
    }

    #[tokio::test]
    async fn test_fetch_intervals_unauthorized() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/time_entries"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let config = TogglConfig {
            api_token: "wrong".to_string(),
            ..toggl_config(&server)
        };
        let result = Toggl::new(&config).fetch_intervals(&march()).await;
        assert!(matches!(result, Err(FetchError::Status { status, .. }) if status.as_u16() == 403));
    }

    #[tokio::test]
    async fn test_fetch_intervals_malformed_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/time_entries"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
            .mount(&server)
            .await;

        let result = Toggl::new(&toggl_config(&server)).fetch_intervals(&march()).await;
        assert!(matches!(result, Err(FetchError::Decode { .. })));
    }

    #[tokio::test]
    async fn test_fetch_projects_keeps_requested_order() {
        let server = MockServer::start().await;
        mount_project(&server, 1, "Backend").await;
        mount_project(&server, 2, "Frontend").await;

        let toggl = Toggl::new(&toggl_config(&server));
        let projects = toggl.fetch_projects(&[ProjectId(2), ProjectId(1)]).await.unwrap();

        assert_eq!(
            projects,
            vec![
                Project {
                    id: ProjectId(2),
                    name: "Frontend".to_string()
                },
                Project {
                    id: ProjectId(1),
                    name: "Backend".to_string()
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_fetch_projects_fails_on_missing_project() {
        let server = MockServer::start().await;
        mount_project(&server, 1, "Backend").await;

        let toggl = Toggl::new(&toggl_config(&server));
        let result = toggl.fetch_projects(&[ProjectId(1), ProjectId(3)]).await;

        assert!(matches!(result, Err(FetchError::Status { status, .. }) if status.as_u16() == 404));
    }

    #[tokio::test]
    async fn test_timesheet_per_day_against_server() {
        let server = MockServer::start().await;
        mount_entries(&server).await;

        let config = Config {
            toggl: Some(toggl_config(&server)),
            report: None,
        };
        let request = ReportRequest {
            range: Some(march()),
            ..ReportRequest::default()
        };
        let settings = ReportSettings::resolve(&config, request).unwrap();
        let sheet = timesheet::build(&Toggl::new(&settings.api), &settings).await.unwrap();

        assert!(sheet.totals.is_none());
        assert_eq!(sheet.sessions.len(), 2);

        let first = &sheet.sessions[0];
        assert_eq!(first.break_minutes, 45);
        assert_eq!(first.work_minutes, 495);
        assert_eq!(first.span_minutes(), 540);

        let mut lines = sheet.content.lines();
        assert_eq!(lines.next(), Some("date;startHours;startMinutes;stopHours;stopMinutes;breakTime"));
        assert!(lines.next().unwrap().ends_with(";0,75"));
        assert!(lines.next().unwrap().ends_with(";0"));
        assert_eq!(lines.next(), None);
    }

    #[tokio::test]
    async fn test_timesheet_per_project_against_server() {
        let server = MockServer::start().await;
        mount_entries(&server).await;
        mount_project(&server, 1, "Backend").await;
        mount_project(&server, 2, "Frontend").await;

        let config = Config {
            toggl: Some(toggl_config(&server)),
            report: None,
        };
        let request = ReportRequest {
            range: Some(march()),
            per_project: true,
            full_date: true,
            ..ReportRequest::default()
        };
        let settings = ReportSettings::resolve(&config, request).unwrap();
        let sheet = timesheet::build(&Toggl::new(&settings.api), &settings).await.unwrap();

        assert_eq!(sheet.sessions.len(), 3);

        let totals: Vec<_> = sheet.totals.unwrap().iter().map(|t| (t.project_id(), t.minutes)).collect();
        assert_eq!(totals, vec![(None, 60), (Some(ProjectId(1)), 255), (Some(ProjectId(2)), 240)]);

        assert!(sheet.content.ends_with("\n\n1h No project\n4,25h Backend\n4h Frontend\n"));
    }

    #[tokio::test]
    async fn test_timesheet_filtered_by_project() {
        let server = MockServer::start().await;
        mount_entries(&server).await;

        let config = Config {
            toggl: Some(toggl_config(&server)),
            report: None,
        };
        let request = ReportRequest {
            range: Some(march()),
            project_ids: vec![ProjectId(2)],
            ..ReportRequest::default()
        };
        let settings = ReportSettings::resolve(&config, request).unwrap();
        let sheet = timesheet::build(&Toggl::new(&settings.api), &settings).await.unwrap();

        assert_eq!(sheet.sessions.len(), 1);
        assert_eq!(sheet.sessions[0].work_minutes, 240);
        assert_eq!(settings.file_name(), "2020-03-01_2020-03-31_2.csv");
    }
}
