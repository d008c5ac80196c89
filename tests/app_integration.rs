use fintrack::AppCommand;
use fintrack::core::analytics::render_summary;
use fintrack::core::stats::build_stats;
use fintrack::core::{Expense, FallbackConverter, Investment, TrackerError};
use fintrack::providers::HttpRateResolver;
use fintrack::store::LedgerStore;
use fintrack::store::json::JsonFileStore;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::info;

// Adds automatic logging to test
mod test_utils {
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub async fn create_rates_mock_server(rates: &[(&str, &str, f64, f64)]) -> MockServer {
        let mock_server = MockServer::start().await;

        for (from, to, amount, result) in rates {
            Mock::given(method("GET"))
                .and(path("/convert"))
                .and(query_param("from", *from))
                .and(query_param("to", *to))
                .and(query_param("amount", amount.to_string()))
                .respond_with(
                    ResponseTemplate::new(200)
                        .set_body_string(format!(r#"{{"result": {result}}}"#)),
                )
                .mount(&mock_server)
                .await;
        }

        mock_server
    }

    pub fn write_config(dir: &std::path::Path, store: &str, rates_url: &str) -> std::path::PathBuf {
        let config_path = dir.join("config.yaml");
        let config_content = format!(
            r#"
            data_path: "{}"
            store: {}
            providers:
              rates:
                base_url: "{}"
                timeout_secs: 1
            "#,
            dir.join("data").display(),
            store,
            rates_url
        );
        std::fs::write(&config_path, config_content).expect("Failed to write config file");
        config_path
    }
}

async fn run(command: AppCommand, config_path: &Path) -> anyhow::Result<()> {
    fintrack::run_command(command, Some(config_path.to_str().unwrap())).await
}

fn add_expense(category: &str, amount: f64, currency: Option<&str>) -> AppCommand {
    AppCommand::AddExpense {
        category: category.to_string(),
        amount,
        note: String::new(),
        currency: currency.map(str::to_string),
    }
}

#[test_log::test(tokio::test)]
async fn test_full_app_flow_with_mock_rates() {
    let mock_server = test_utils::create_rates_mock_server(&[
        ("INR", "USD", 1000.0, 12.0),
        ("PLN", "USD", 2000.0, 500.0),
    ])
    .await;
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config_path = test_utils::write_config(dir.path(), "json", &mock_server.uri());

    run(add_expense("food", 50.0, None), &config_path).await.unwrap();
    run(add_expense("rent", 1000.0, Some("inr")), &config_path)
        .await
        .unwrap();
    run(
        AppCommand::AddInvestment {
            kind: "mutualfund".to_string(),
            amount: 2000.0,
            returns: "8%".to_string(),
            note: "index fund".to_string(),
            currency: Some("PLN".to_string()),
        },
        &config_path,
    )
    .await
    .unwrap();

    let result = run(
        AppCommand::Stats {
            target_currency: Some("usd".to_string()),
            json: true,
        },
        &config_path,
    )
    .await;
    assert!(result.is_ok(), "Stats failed with: {:?}", result.err());

    let store = JsonFileStore::new(dir.path().join("data"));
    let expenses = store.load::<Expense>().unwrap();
    let investments = store.load::<Investment>().unwrap();
    assert_eq!(expenses.len(), 2);
    assert_eq!(expenses[1].base.currency, "INR");

    let converter = FallbackConverter::new(HttpRateResolver::new(
        &mock_server.uri(),
        Duration::from_secs(1),
    ));
    let stats = build_stats(&expenses, &investments, Some("USD"), &converter, &|| ()).await;
    info!(?stats, "Computed stats");

    assert_eq!(stats.total_expenses, 1050.0);
    assert_eq!(stats.total_expenses_converted, Some(62.0));
    assert_eq!(stats.total_investments_converted, Some(500.0));
    assert_eq!(stats.converted_currency.as_deref(), Some("USD"));
    assert_eq!(stats.degraded_conversions, Some(0));
}

#[test_log::test(tokio::test)]
async fn test_stats_survive_unreachable_rate_service() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config_path = test_utils::write_config(dir.path(), "json", "http://127.0.0.1:9");

    run(add_expense("travel", 100.0, Some("PLN")), &config_path)
        .await
        .unwrap();

    let result = run(
        AppCommand::Stats {
            target_currency: Some("INR".to_string()),
            json: false,
        },
        &config_path,
    )
    .await;
    assert!(result.is_ok(), "Stats failed with: {:?}", result.err());
}

#[test_log::test(tokio::test)]
async fn test_invalid_expense_is_rejected() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config_path = test_utils::write_config(dir.path(), "json", "http://127.0.0.1:9");

    let err = run(add_expense("food", -50.0, None), &config_path)
        .await
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<TrackerError>(),
        Some(TrackerError::InvalidInput(_))
    ));

    let err = run(add_expense("", 5.0, None), &config_path).await.unwrap_err();
    assert_eq!(err.to_string(), "Category must be a non-empty string");

    assert!(!dir.path().join("data").join("expenses.json").exists());
}

#[test_log::test(tokio::test)]
async fn test_crud_flow_with_fjall_store() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config_path = test_utils::write_config(dir.path(), "fjall", "http://127.0.0.1:9");

    run(add_expense("food", 50.0, None), &config_path).await.unwrap();
    run(add_expense("rent", 1000.0, None), &config_path)
        .await
        .unwrap();
    run(
        AppCommand::UpdateExpense {
            index: 1,
            category: None,
            amount: Some(950.0),
            note: Some("negotiated".to_string()),
        },
        &config_path,
    )
    .await
    .unwrap();
    run(AppCommand::DeleteExpense { index: 0 }, &config_path)
        .await
        .unwrap();
    run(AppCommand::ListExpenses, &config_path).await.unwrap();

    let err = run(AppCommand::DeleteInvestment { index: 0 }, &config_path)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "No investments record at index 0");

    let store = fintrack::store::disk::DiskStore::open(&dir.path().join("data")).unwrap();
    let expenses = store.load::<Expense>().unwrap();
    assert_eq!(expenses.len(), 1);
    assert_eq!(expenses[0].category, "rent");
    assert_eq!(expenses[0].base.amount, 950.0);
    assert_eq!(expenses[0].base.note, "negotiated");
    assert!(render_summary(&expenses).contains("Total Spent: 950.0"));
}

#[test_log::test(tokio::test)]
async fn test_list_and_currencies_on_empty_store() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config_path = test_utils::write_config(dir.path(), "json", "http://127.0.0.1:9");

    run(AppCommand::ListInvestments, &config_path).await.unwrap();
    run(AppCommand::Currencies { json: true }, &config_path)
        .await
        .unwrap();
    run(
        AppCommand::Stats {
            target_currency: None,
            json: true,
        },
        &config_path,
    )
    .await
    .unwrap();
}

#[test_log::test(tokio::test)]
async fn test_missing_config_path_fails() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let missing = dir.path().join("nope.yaml");

    let result = run(AppCommand::ListExpenses, &missing).await;
    assert!(result.is_err());
    assert!(!fs::exists(&missing).unwrap());
}
