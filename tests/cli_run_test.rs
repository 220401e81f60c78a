use clap::Parser;
use httpmock::prelude::*;
use laundry_planner::app::runner::run;
use laundry_planner::CliConfig;
use tempfile::TempDir;

fn write_settings(dir: &TempDir, plan_endpoint: &str) -> std::path::PathBuf {
    let path = dir.path().join("laundry-planner.toml");
    std::fs::write(
        &path,
        format!("[plan_service]\nendpoint = \"{}\"\n", plan_endpoint),
    )
    .unwrap();
    path
}

#[tokio::test]
async fn test_save_without_config_path_still_writes_plan() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let server = MockServer::start();
    let plan_mock = server.mock(|when, then| {
        when.method(POST).path("/plan");
        then.status(200)
            .header("Content-Type", "text/html")
            .body("<table>plan</table>");
    });
    let settings = write_settings(&temp_dir, &server.url("/plan"));
    let output = temp_dir.path().join("out").join("plan.html");

    let config = CliConfig::try_parse_from([
        "laundry-planner",
        "--settings",
        settings.to_str().unwrap(),
        "--title",
        "Haus",
        "--year",
        "2025",
        "--floor",
        "P",
        "--position",
        "single",
        "--day",
        "1",
        "--save",
        "--output",
        output.to_str().unwrap(),
    ])?;

    let written = run(config).await?;

    plan_mock.assert();
    assert_eq!(written, output);
    assert_eq!(std::fs::read_to_string(&output)?, "<table>plan</table>");
    Ok(())
}

#[tokio::test]
async fn test_save_with_config_path_stores_building() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/plan");
        then.status(200).body("<html></html>");
    });
    let settings = write_settings(&temp_dir, &server.url("/plan"));
    let building = temp_dir.path().join("building.json");
    std::fs::write(
        &building,
        r#"{"position_map": {"0": {"OneApartment": {"days_total": 1}}}, "title": "Alt"}"#,
    )?;
    let output = temp_dir.path().join("plan.html");

    let config = CliConfig::try_parse_from([
        "laundry-planner",
        "--settings",
        settings.to_str().unwrap(),
        "--config",
        building.to_str().unwrap(),
        "--title",
        "Haus",
        "--year",
        "2025",
        "--floor",
        "P",
        "--position",
        "single",
        "--day",
        "1",
        "--save",
        "--output",
        output.to_str().unwrap(),
    ])?;

    run(config).await?;

    let document: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&building)?)?;
    assert_eq!(document["title"], "Haus");
    assert!(output.exists());
    Ok(())
}
