use anyhow::{bail, Context};
use property_enquiry::form::prompt::Questionnaire;
use property_enquiry::form::EnquiryForm;
use property_enquiry::relay::{self, WebhookClient};
use property_enquiry::settings::{self, Backend, Settings};
use property_enquiry::store::{EnquiryStore, MemoryStore, RestTableStore};
use tokio::io::BufReader;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn open_store(cfg: &settings::Store) -> anyhow::Result<Box<dyn EnquiryStore>> {
    match cfg.backend {
        Backend::Rest => {
            if cfg.url.is_empty() {
                bail!("store.url must be set for the rest backend");
            }
            let store = RestTableStore::new(&cfg.url, &cfg.api_key, &cfg.table)?;
            Ok(Box::new(store))
        }
        Backend::Memory => {
            warn!("Using the in-memory store; enquiries are lost on exit");
            Ok(Box::new(MemoryStore::new()))
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let settings = Settings::new().context("Failed to load settings")?;
    let mode = std::env::args().nth(1).unwrap_or_else(|| "relay".to_string());

    match mode.as_str() {
        "relay" => {
            info!("🏠 Property Enquiry - webhook relay");
            let webhook = WebhookClient::new(&settings.relay.webhook_url, settings.relay.timeout())?;
            relay::serve(&settings.relay.bind_addr, webhook).await
        }
        "form" => {
            let store = open_store(&settings.store)?;
            info!("Submitting enquiries to the {} store", store.store_name());

            let mut form = EnquiryForm::new();
            let mut session = Questionnaire::new(
                BufReader::new(tokio::io::stdin()),
                tokio::io::stdout(),
            );
            let stored = session.run(&mut form, store.as_ref()).await?;
            info!("💾 Stored {} enquiries", stored);
            Ok(())
        }
        other => bail!("unknown mode '{}', expected 'relay' or 'form'", other),
    }
}
