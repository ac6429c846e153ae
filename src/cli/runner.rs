//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands};
use crate::cli::table::columnar;
use crate::config::ClientConfig;
use crate::error::{Error, Result, ResultExt};
use crate::http::ApiClient;
use crate::pagination::{PageSource, Pull};
use crate::resources::{App, AppClient, GithubBranch, GithubRepo, SshKey, UserClient};
use crate::types::OutputFormat;
use serde::Serialize;
use std::time::Instant;
use tracing::info;

/// Rows and headers for table output
trait TableRow {
    const HEADERS: &'static [&'static str];

    fn cells(&self) -> Vec<String>;
}

impl TableRow for App {
    const HEADERS: &'static [&'static str] = &["id", "name", "slug"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.slug.clone().unwrap_or_default(),
        ]
    }
}

impl TableRow for GithubRepo {
    const HEADERS: &'static [&'static str] = &["id", "full_name"];

    fn cells(&self) -> Vec<String> {
        vec![self.id.to_string(), self.full_name.clone()]
    }
}

impl TableRow for GithubBranch {
    const HEADERS: &'static [&'static str] = &["name"];

    fn cells(&self) -> Vec<String> {
        vec![self.name.clone()]
    }
}

impl TableRow for SshKey {
    const HEADERS: &'static [&'static str] = &["fingerprint", "name", "annotation"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.fingerprint.clone(),
            self.name.clone(),
            self.annotation.clone(),
        ]
    }
}

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let client = ApiClient::new(self.client_config()?)?;

        match &self.cli.command {
            Commands::Apps { page_size, max } => {
                let apps = AppClient::new(client, self.token()?);
                let mut paginator = apps.paginate(*page_size, *max);
                let items = self.drain("apps", &mut paginator).await?;
                self.print(&items)
            }
            Commands::Repos { user_id, max } => {
                let users = UserClient::new(client, self.token()?);
                let mut paginator = users.paginate_github_repositories(*user_id, *max);
                let items = self.drain("repositories", &mut paginator).await?;
                self.print(&items)
            }
            Commands::Branches { user_id, repo_id } => {
                let users = UserClient::new(client, self.token()?);
                let mut paginator = users.paginate_github_branches(*user_id, *repo_id, None);
                let items = self.drain("branches", &mut paginator).await?;
                self.print(&items)
            }
            Commands::SshKeys { user_id } => {
                let users = UserClient::new(client, self.token()?);
                let keys = users.list_ssh_keys(*user_id).await?;
                if keys.is_empty() {
                    info!("No SSH keys found");
                }
                self.print(&keys)
            }
        }
    }

    /// Build the client config from file, flags and environment
    fn client_config(&self) -> Result<ClientConfig> {
        let mut config = match &self.cli.config {
            Some(path) => ClientConfig::from_file(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => ClientConfig::default(),
        };

        if let Some(url) = &self.cli.api_url {
            config.api_url = Some(url.clone());
        }

        if config.api_url.is_none() {
            return Err(Error::config(
                "API URL not specified (use --api-url or the config file)",
            ));
        }

        Ok(config.with_env_proxy())
    }

    fn token(&self) -> Result<String> {
        self.cli
            .token
            .clone()
            .ok_or_else(|| Error::config("Token not specified (use --token or API_PAGER_TOKEN)"))
    }

    /// Pull every page, logging progress as items accumulate
    async fn drain<T, P>(&self, what: &str, paginator: &mut P) -> Result<Vec<T>>
    where
        T: Send,
        P: PageSource<T>,
    {
        let start = Instant::now();
        let mut items = Vec::new();

        while let Pull::Page(page) = paginator.pull().await? {
            items.extend(page.data);
            info!("Looking up {what}: {} found", items.len());
        }

        info!(
            "Loaded {} {what} in {:.2}s",
            paginator.loaded(),
            start.elapsed().as_secs_f64()
        );
        Ok(items)
    }

    fn print<T: Serialize + TableRow>(&self, items: &[T]) -> Result<()> {
        match self.cli.format {
            OutputFormat::Json => {
                for item in items {
                    println!("{}", serde_json::to_string(item)?);
                }
            }
            OutputFormat::Table => {
                let rows: Vec<Vec<String>> = items.iter().map(TableRow::cells).collect();
                let table = columnar(&rows, Some(T::HEADERS));
                if !table.is_empty() {
                    println!("{table}");
                }
            }
        }
        Ok(())
    }
}
