use anyhow::Result;
use coinos::{InvoiceRequest, InvoiceType, SessionClient};

use super::account::print_account_summary;
use super::invoice::print_invoice;

const DEMO_INVOICE_AMOUNT: u64 = 1000;

/// Print the account summary, then create a test lightning invoice
pub async fn demo(client: &SessionClient) -> Result<()> {
    let details = client.get_account_details().await?;
    print_account_summary(&details);

    println!("\nCreating Test Invoice:");
    println!("{}", "-".repeat(50));

    let request = InvoiceRequest::new(DEMO_INVOICE_AMOUNT).with_type(InvoiceType::Lightning);
    let invoice = client.create_invoice(&request).await?;

    print_invoice(&invoice)
}
