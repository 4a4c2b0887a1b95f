use anyhow::Result;
use coinos::{AccountDetails, SessionClient};

const RULE_WIDTH: usize = 50;

pub async fn account(client: &SessionClient) -> Result<()> {
    let details = client.get_account_details().await?;

    print_account_summary(&details);

    Ok(())
}

pub fn print_account_summary(details: &AccountDetails) {
    println!("\nAccount Details:");
    println!("{}", "-".repeat(RULE_WIDTH));
    for line in summary_lines(details) {
        println!("{line}");
    }
    println!("{}", "-".repeat(RULE_WIDTH));
}

fn summary_lines(details: &AccountDetails) -> Vec<String> {
    let balance = details
        .balance()
        .map(|b| b.to_string())
        .unwrap_or_else(|| "unknown".to_string());

    vec![
        format!("Username: {}", details.username().unwrap_or("unknown")),
        format!("Balance: {} {}", balance, details.currency().unwrap_or("")),
        format!(
            "Supported Currencies: {}",
            details.currencies().unwrap_or_default().join(", ")
        ),
        format!("Account ID: {}", details.id().unwrap_or("unknown")),
        format!("Public Key: {}", details.pubkey().unwrap_or("unknown")),
    ]
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_summary_lines() {
        let details: AccountDetails = serde_json::from_value(json!({
            "username": "alice",
            "balance": 21000,
            "currency": "USD",
            "currencies": ["USD", "CAD"],
            "id": "abc",
            "pubkey": "02ff"
        }))
        .expect("Account should deserialize");

        assert_eq!(
            summary_lines(&details),
            vec![
                "Username: alice",
                "Balance: 21000 USD",
                "Supported Currencies: USD, CAD",
                "Account ID: abc",
                "Public Key: 02ff",
            ]
        );
    }

    #[test]
    fn test_summary_lines_missing_fields() {
        let details = AccountDetails::default();
        let lines = summary_lines(&details);

        assert_eq!(lines[0], "Username: unknown");
        assert_eq!(lines[2], "Supported Currencies: ");
    }
}
