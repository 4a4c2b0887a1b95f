use anyhow::Result;
use clap::Args;
use coinos::{Invoice, InvoiceRequest, InvoiceType, SessionClient};

#[derive(Args)]
pub struct InvoiceSubCommand {
    /// Amount in satoshis
    amount: u64,
    /// Invoice type, lightning or bitcoin
    #[arg(short = 't', long = "type", default_value = "lightning")]
    invoice_type: InvoiceType,
    /// Webhook called when the invoice is paid
    #[arg(short, long)]
    webhook: Option<String>,
    /// Secret sent along with the webhook
    #[arg(short, long)]
    secret: Option<String>,
}

impl InvoiceSubCommand {
    fn request(&self) -> InvoiceRequest {
        let mut request = InvoiceRequest::new(self.amount).with_type(self.invoice_type.clone());
        if let Some(webhook) = &self.webhook {
            request = request.with_webhook(webhook);
        }
        if let Some(secret) = &self.secret {
            request = request.with_secret(secret);
        }
        request
    }
}

pub async fn invoice(client: &SessionClient, sub_command_args: &InvoiceSubCommand) -> Result<()> {
    let invoice = client.create_invoice(&sub_command_args.request()).await?;

    print_invoice(&invoice)
}

pub fn print_invoice(invoice: &Invoice) -> Result<()> {
    println!("Invoice created successfully!");
    println!("{}", serde_json::to_string_pretty(invoice)?);
    Ok(())
}
