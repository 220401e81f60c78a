use httpmock::prelude::*;
use laundry_planner::domain::ports::PlanService;
use laundry_planner::{
    ConfigSession, Floor, HttpPlanService, JsonConfigStore, OpenHolidaysClient, PlanEngine,
    PlannerError, Position, SessionCommand,
};
use serde_json::json;

fn ready_session() -> ConfigSession {
    let mut session = ConfigSession::new();
    for command in [
        SessionCommand::SetTitle("Hauptstraße 1".into()),
        SessionCommand::SetYear(2025),
        SessionCommand::AddRow,
        SessionCommand::AddApartment(Floor::Upper(1)),
        SessionCommand::SelectFloor(Floor::Upper(1)),
        SessionCommand::SelectPosition(Position::Right),
        SessionCommand::SelectDay(1),
        SessionCommand::SetExcludeSunday(false),
    ] {
        session.apply(command).unwrap();
    }
    session
}

#[tokio::test]
async fn test_plan_request_is_posted_as_json() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/create_laundry_plan")
            .json_body_partial(
                json!({
                    "year": 2025,
                    "exclude_sunday": false,
                    "apartment_info": {
                        "current_floor": 1,
                        "position": "Right",
                        "days_left": 0
                    },
                    "config": {
                        "title": "Hauptstraße 1",
                        "position_map": {
                            "0": {"OneApartment": {"days_total": 1}},
                            "1": {"TwoApartments": {"left_days_total": 1, "right_days_total": 1}}
                        }
                    }
                })
                .to_string(),
            );
        then.status(200)
            .header("Content-Type", "text/html")
            .body("<table>plan</table>");
    });

    let service = HttpPlanService::new(server.url("/create_laundry_plan"));
    let request = ready_session().plan_request().unwrap();
    let html = service.create_laundry_plan(&request).await.unwrap();

    api_mock.assert();
    assert_eq!(html, "<table>plan</table>");
}

#[tokio::test]
async fn test_plan_service_error_keeps_status_and_body() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/create_laundry_plan");
        then.status(422).body("year out of range");
    });

    let service = HttpPlanService::new(server.url("/create_laundry_plan"));
    let request = ready_session().plan_request().unwrap();
    let err = service.create_laundry_plan(&request).await.unwrap_err();

    assert!(matches!(
        err,
        PlannerError::ServiceError { status: 422, ref message } if message == "year out of range"
    ));
    assert!(err.user_friendly_message().contains("422"));
}

#[tokio::test]
async fn test_engine_renders_preview_with_imported_holidays() {
    let server = MockServer::start();
    let holidays_mock = server.mock(|when, then| {
        when.method(GET).path("/PublicHolidays");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!([
                {"startDate": "2025-10-03", "name": [{"language": "DE", "text": "Tag der Deutschen Einheit"}]}
            ]));
    });
    let plan_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/plan")
            .json_body_partial(
                json!({"holidays": {"3.10.2025": "Tag der Deutschen Einheit"}}).to_string(),
            );
        then.status(200).body("<html></html>");
    });

    let engine = PlanEngine::new(
        HttpPlanService::new(server.url("/plan")),
        OpenHolidaysClient::new(server.base_url(), "DE"),
        JsonConfigStore::default(),
    );
    let mut session = ready_session();
    session.apply(SessionCommand::SetCountry(Some("DE".into()))).unwrap();
    session
        .apply(SessionCommand::SetSubdivision(Some("DE-BE".into())))
        .unwrap();

    assert_eq!(engine.import_holidays(&mut session).await.unwrap(), 1);
    let html = engine.render_preview(&mut session).await.unwrap();

    holidays_mock.assert();
    plan_mock.assert();
    assert_eq!(html, "<html></html>");
    assert!(session.notifications().is_empty());
}

#[tokio::test]
async fn test_engine_does_not_post_incomplete_session() {
    let server = MockServer::start();
    let plan_mock = server.mock(|when, then| {
        when.method(POST).path("/plan");
        then.status(200).body("<html></html>");
    });

    let engine = PlanEngine::new(
        HttpPlanService::new(server.url("/plan")),
        OpenHolidaysClient::new(server.base_url(), "DE"),
        JsonConfigStore::default(),
    );
    let mut session = ConfigSession::new();
    session.apply(SessionCommand::SetTitle("Haus".into())).unwrap();

    let result = engine.render_preview(&mut session).await;

    assert!(matches!(result, Err(PlannerError::NotReady { .. })));
    plan_mock.assert_hits(0);
    assert_eq!(session.notifications().len(), 1);
}
