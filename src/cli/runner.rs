//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, ObjectType, OutputFormat, QueryArgs};
use crate::client::CrmClient;
use crate::config::CrmConfig;
use crate::error::Result;
use crate::models::CrmObject;
use crate::pagination::{ListResponse, PageParams};
use futures::stream::BoxStream;
use futures::TryStreamExt;
use serde::Serialize;
use std::io::Write;
use tracing::{debug, info};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command, writing results to stdout
    pub async fn run(&self) -> Result<()> {
        let client = self.build_client()?;
        let mut stdout = std::io::stdout();
        self.execute(&client, &mut stdout).await
    }

    /// Load the config file (if any), overlay the environment and build a client
    fn build_client(&self) -> Result<CrmClient> {
        let config = match &self.cli.config {
            Some(path) => CrmConfig::load(path)?,
            None => CrmConfig::default(),
        }
        .with_env();

        info!("Using {} (auth: {})", config.base_url, config.auth.kind());
        config.build_client()
    }

    /// Run the command against `client`, writing results to `out`
    pub async fn execute<W: Write>(&self, client: &CrmClient, out: &mut W) -> Result<()> {
        match &self.cli.command {
            Commands::List { object, query } => {
                let page = list_page(client, *object, &query.to_params()).await?;
                debug!(
                    "Listed {} {:?}, next cursor: {:?}",
                    page.results.len(),
                    object,
                    page.next_cursor()
                );
                self.emit(out, &page)
            }
            Commands::Get {
                object,
                id,
                properties,
            } => {
                let params = QueryArgs {
                    properties: properties.clone(),
                    ..QueryArgs::default()
                }
                .to_params();
                let item = get_object(client, *object, id, &params).await?;
                self.emit(out, &item)
            }
            Commands::Stream { object, query } => {
                let mut items = stream_objects(client, *object, &query.to_params());
                let mut count = 0usize;
                while let Some(item) = items.try_next().await? {
                    self.emit(out, &item)?;
                    out.flush()?;
                    count += 1;
                }
                info!("Streamed {count} {:?}", object);
                Ok(())
            }
            Commands::All { object, query } => {
                let items = all_objects(client, *object, &query.to_params()).await?;
                info!("Collected {} {:?}", items.len(), object);
                self.emit(out, &items)
            }
        }
    }

    /// Write one value in the selected format
    fn emit<W: Write, T: Serialize>(&self, out: &mut W, value: &T) -> Result<()> {
        match self.cli.format {
            OutputFormat::Json => serde_json::to_writer(&mut *out, value)?,
            OutputFormat::Pretty => serde_json::to_writer_pretty(&mut *out, value)?,
        }
        writeln!(out)?;
        Ok(())
    }
}

async fn list_page(
    client: &CrmClient,
    object: ObjectType,
    params: &PageParams,
) -> Result<ListResponse<CrmObject>> {
    match object {
        ObjectType::Contacts => client.contacts().list_contacts(params).await,
        ObjectType::Companies => client.companies().list_companies(params).await,
        ObjectType::Deals => client.deals().list_deals(params).await,
    }
}

async fn get_object(
    client: &CrmClient,
    object: ObjectType,
    id: &str,
    params: &PageParams,
) -> Result<CrmObject> {
    match object {
        ObjectType::Contacts => client.contacts().get_contact_with(id, params).await,
        ObjectType::Companies => client.companies().get_company_with(id, params).await,
        ObjectType::Deals => client.deals().get_deal_with(id, params).await,
    }
}

fn stream_objects(
    client: &CrmClient,
    object: ObjectType,
    params: &PageParams,
) -> BoxStream<'static, Result<CrmObject>> {
    match object {
        ObjectType::Contacts => client.contacts().stream_contacts(params),
        ObjectType::Companies => client.companies().stream_companies(params),
        ObjectType::Deals => client.deals().stream_deals(params),
    }
}

async fn all_objects(
    client: &CrmClient,
    object: ObjectType,
    params: &PageParams,
) -> Result<Vec<CrmObject>> {
    match object {
        ObjectType::Contacts => client.contacts().get_contacts(params).await,
        ObjectType::Companies => client.companies().get_companies(params).await,
        ObjectType::Deals => client.deals().get_deals(params).await,
    }
}
