use nbpx::AppCommand;
use nbpx::core::config::{AppConfig, NbpProviderConfig};
use nbpx::core::rate::BaseCurrency;
use std::fs;
use std::path::Path;
use tracing::info;

mod test_utils {
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub const TABLE_A: &str = r#"[
        {
            "table": "A",
            "no": "201/A/NBP/2026",
            "effectiveDate": "2026-10-16",
            "rates": [
                {"currency": "dolar amerykański", "code": "USD", "mid": 4.0},
                {"currency": "euro", "code": "EUR", "mid": 4.25}
            ]
        }
    ]"#;

    pub async fn create_nbp_mock_server(status: u16, mock_response: &str) -> MockServer {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/exchangerates/tables/A"))
            .and(query_param("format", "json"))
            .respond_with(ResponseTemplate::new(status).set_body_string(mock_response))
            .mount(&mock_server)
            .await;

        mock_server
    }
}

fn config_for(base_url: &str, cache_path: &Path) -> AppConfig {
    AppConfig {
        provider: NbpProviderConfig {
            base_url: base_url.to_string(),
            table: "A".to_string(),
            timeout_secs: 5,
        },
        cache_path: cache_path.to_path_buf(),
        base_currency: BaseCurrency::default(),
    }
}

fn convert(source: &str, destination: &str, amount: &str) -> AppCommand {
    AppCommand::Convert {
        source: source.to_string(),
        destination: destination.to_string(),
        amount: amount.to_string(),
    }
}

#[test_log::test(tokio::test)]
async fn test_live_fetch_converts_and_writes_cache() {
    let mock_server = test_utils::create_nbp_mock_server(200, test_utils::TABLE_A).await;
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let cache_path = dir.path().join("nbp_rates.json");
    let config = config_for(&mock_server.uri(), &cache_path);

    let output = nbpx::execute(convert("EUR", "USD", "100"), &config)
        .await
        .expect("Conversion failed");
    info!(%output, "Converted with live rates");
    assert_eq!(output, "106.2500 USD");

    let cached: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&cache_path).unwrap()).unwrap();
    assert_eq!(cached.as_array().map(Vec::len), Some(2));
    assert_eq!(cached[1]["code"], "EUR");
}

#[test_log::test(tokio::test)]
async fn test_offline_fallback_uses_cache() {
    let mock_server = test_utils::create_nbp_mock_server(503, "").await;
    let dir = tempfile::tempdir().unwrap();
    let cache_path = dir.path().join("nbp_rates.json");
    fs::write(
        &cache_path,
        r#"[{"code":"USD","currency":"dolar amerykański","mid":4.00}]"#,
    )
    .unwrap();
    let config = config_for(&mock_server.uri(), &cache_path);

    let output = nbpx::execute(
        convert("PLN złoty polski", "USD dolar amerykański", "100"),
        &config,
    )
    .await
    .unwrap();
    assert_eq!(output, "25.0000 USD");

    let table = nbpx::load_rates(&config).await.unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(table.base().mid, 1.0);

    // A failed fetch leaves the snapshot untouched
    assert_eq!(
        fs::read_to_string(&cache_path).unwrap(),
        r#"[{"code":"USD","currency":"dolar amerykański","mid":4.00}]"#
    );
}

#[test_log::test(tokio::test)]
async fn test_unreachable_source_without_cache_is_fatal() {
    let mock_server = test_utils::create_nbp_mock_server(500, "").await;
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(&mock_server.uri(), &dir.path().join("nbp_rates.json"));

    let err = nbpx::execute(AppCommand::Rates, &config).await.unwrap_err();
    assert!(err.to_string().starts_with("no rates available"));
    assert!(err.to_string().contains("HTTP error: 500"));
}

#[test_log::test(tokio::test)]
async fn test_conversion_errors_are_reported() {
    let mock_server = test_utils::create_nbp_mock_server(200, test_utils::TABLE_A).await;
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(&mock_server.uri(), &dir.path().join("nbp_rates.json"));

    let message = |e: anyhow::Error| e.to_string();
    let unknown = nbpx::execute(convert("PLN", "GBP", "1"), &config).await;
    assert_eq!(unknown.map_err(message).unwrap_err(), "unknown currency code");

    let missing = nbpx::execute(convert("PLN", "USD", " "), &config).await;
    assert_eq!(missing.map_err(message).unwrap_err(), "amount missing");

    let comma = nbpx::execute(convert("USD", "PLN", "10,5"), &config).await;
    assert_eq!(comma.unwrap(), "42.0000 PLN");
}

#[test_log::test(tokio::test)]
async fn test_rates_listing_from_config_file() {
    let mock_server = test_utils::create_nbp_mock_server(200, test_utils::TABLE_A).await;
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("config.yaml");
    let cache_path = dir.path().join("nbp_rates.json");
    let config_content = format!(
        r#"
provider:
  base_url: "{}"
cache_path: "{}"
"#,
        mock_server.uri(),
        cache_path.display()
    );
    fs::write(&config_path, config_content).unwrap();

    let config = nbpx::load_config(config_path.to_str()).unwrap();
    assert_eq!(config.provider.timeout_secs, 5);

    let output = nbpx::execute(AppCommand::Rates, &config).await.unwrap();
    assert!(output.contains("201/A/NBP/2026"));
    assert!(output.contains("dolar amerykański"));
    assert!(output.contains("4.2500"));

    nbpx::run_command(AppCommand::Rates, config_path.to_str())
        .await
        .expect("run_command failed");
}
