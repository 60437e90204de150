use ratesheet::core::ConversionError;
use std::fs;

// Adds automatic logging to test
mod test_utils {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub const SHEET_PATH: &str = "/spreadsheets/d/e/test/pubhtml";

    pub const SHEET_HTML: &str = r#"<!DOCTYPE html>
<html><head><meta charset="utf-8"></head><body>
<div id="sheets-viewport"><div id="0" style="display:none;position:relative;">
<div class="ritz grid-container" dir="ltr">
<table class="waffle" cellspacing="0" cellpadding="0">
<thead><tr><th class="row-header freezebar-origin-ltr"></th><th id="0C0">A</th><th id="0C1">B</th><th id="0C2">C</th><th id="0C3">D</th></tr></thead>
<tbody>
<tr style="height: 20px"><th id="0R0" class="row-headers-background"><div class="row-header-wrapper">1</div></th><td class="s0"></td><td class="s0">USD</td><td class="s0">EUR</td><td class="s0">RUB</td></tr>
<tr style="height: 20px"><th id="0R1" class="row-headers-background"><div class="row-header-wrapper">2</div></th><td class="s1">USD</td><td class="s1">1</td><td class="s1">0,92</td><td class="s1">92,5</td></tr>
<tr style="height: 20px"><th id="0R2" class="row-headers-background"><div class="row-header-wrapper">3</div></th><td class="s1">EUR</td><td class="s1">1,087</td><td class="s1">1</td><td class="s1">N/A</td></tr>
<tr style="height: 20px"><th id="0R3" class="row-headers-background"><div class="row-header-wrapper">4</div></th><td class="s1"></td><td class="s1"></td><td class="s1"></td><td class="s1"></td></tr>
</tbody></table></div></div></div></body></html>"#;

    pub async fn create_mock_server(status: u16, body: &str) -> MockServer {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(SHEET_PATH))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&mock_server)
            .await;

        mock_server
    }

    pub fn write_config(file: &tempfile::NamedTempFile, server_uri: &str) {
        let config_content = format!(
            r#"
        source:
          url: "{server_uri}{SHEET_PATH}"
        display:
          precision: 4
    "#
        );
        std::fs::write(file.path(), config_content).expect("Failed to write config file");
    }
}

async fn run_against(
    status: u16,
    body: &str,
    command: ratesheet::AppCommand,
) -> anyhow::Result<String> {
    let mock_server = test_utils::create_mock_server(status, body).await;
    let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    test_utils::write_config(&config_file, &mock_server.uri());

    ratesheet::render_command(command, Some(config_file.path().to_str().unwrap())).await
}

fn convert(from: &str, to: &str, amount: &str, swap: bool) -> ratesheet::AppCommand {
    ratesheet::AppCommand::Convert {
        from: from.to_string(),
        to: to.to_string(),
        amount: amount.to_string(),
        swap,
    }
}

#[test_log::test(tokio::test)]
async fn test_convert_with_mock_sheet() {
    let output = run_against(200, test_utils::SHEET_HTML, convert("USD", "EUR", "10", false))
        .await
        .expect("Convert failed");
    assert_eq!(output, "10 USD = 9.2000 EUR");

    let output = run_against(200, test_utils::SHEET_HTML, convert("EUR", "USD", "2", false))
        .await
        .expect("Convert failed");
    assert_eq!(output, "2 EUR = 2.1740 USD");
}

#[test_log::test(tokio::test)]
async fn test_convert_with_swap() {
    // The sheet has no RUB row; swapping inverts USD -> RUB
    let output = run_against(200, test_utils::SHEET_HTML, convert("RUB", "USD", "925", true))
        .await
        .expect("Convert failed");
    assert_eq!(output, "925 RUB = 10.0000 USD");
}

#[test_log::test(tokio::test)]
async fn test_convert_missing_rate() {
    let result = run_against(200, test_utils::SHEET_HTML, convert("RUB", "USD", "1", false)).await;
    let err = result.unwrap_err();
    assert_eq!(
        err.downcast_ref::<ConversionError>(),
        Some(&ConversionError::RateNotFound {
            from: "RUB".to_string(),
            to: "USD".to_string()
        })
    );
}

#[test_log::test(tokio::test)]
async fn test_invalid_amount_is_rejected() {
    let result = run_against(200, test_utils::SHEET_HTML, convert("USD", "EUR", "lots", false)).await;
    assert!(matches!(
        result.unwrap_err().downcast_ref::<ConversionError>(),
        Some(ConversionError::InvalidAmount(_))
    ));
}

#[test_log::test(tokio::test)]
async fn test_missing_currency_selection() {
    let result = run_against(200, test_utils::SHEET_HTML, convert("USD", " ", "1", false)).await;
    assert_eq!(
        result.unwrap_err().downcast_ref::<ConversionError>(),
        Some(&ConversionError::MissingCurrencySelection)
    );
}

#[test_log::test(tokio::test)]
async fn test_currencies_and_rates_commands() {
    console::set_colors_enabled(false);

    let output = run_against(200, test_utils::SHEET_HTML, ratesheet::AppCommand::Currencies)
        .await
        .expect("Currencies failed");
    assert_eq!(output, "From: EUR, USD\nTo: EUR, RUB, USD");

    let output = run_against(
        200,
        test_utils::SHEET_HTML,
        ratesheet::AppCommand::Rates { json: false },
    )
    .await
    .expect("Rates failed");
    assert!(output.contains("92.5000"));
    assert!(output.contains("3 rows read, 1 skipped without a base currency"));
    assert!(output.contains("Ignored EUR -> RUB: 'N/A' is not a number"));

    let output = run_against(
        200,
        test_utils::SHEET_HTML,
        ratesheet::AppCommand::Rates { json: true },
    )
    .await
    .expect("Rates --json failed");
    let rates: serde_json::Value = serde_json::from_str(&output).expect("Invalid JSON");
    assert_eq!(rates["USD"]["EUR"], serde_json::json!(0.92));
    assert_eq!(rates["EUR"]["USD"], serde_json::json!(1.087));
    assert!(rates.get("RUB").is_none());
}

#[test_log::test(tokio::test)]
async fn test_server_error_is_transport_failure() {
    let result = run_against(503, "", convert("USD", "EUR", "1", false)).await;
    assert!(matches!(
        result.unwrap_err().downcast_ref::<ConversionError>(),
        Some(ConversionError::TransportFailure(_))
    ));
}

#[test_log::test(tokio::test)]
async fn test_page_without_table() {
    let result = run_against(
        200,
        "<html><body><p>Sheet unpublished</p></body></html>",
        ratesheet::AppCommand::Currencies,
    )
    .await;
    assert!(matches!(
        result.unwrap_err().downcast_ref::<ConversionError>(),
        Some(ConversionError::TableNotFound { .. })
    ));
}

#[test_log::test(tokio::test)]
async fn test_invalid_config_file() {
    let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    fs::write(config_file.path(), "source: [not, a, map]").expect("Failed to write config file");

    let result = ratesheet::render_command(
        ratesheet::AppCommand::Currencies,
        Some(config_file.path().to_str().unwrap()),
    )
    .await;
    assert!(
        result
            .unwrap_err()
            .to_string()
            .contains("Failed to parse config file")
    );
}
